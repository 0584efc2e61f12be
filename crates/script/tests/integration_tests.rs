use alloy::node_bindings::Anvil;
use alloy::primitives::Bytes;
use alloy::providers::Provider;
use alloy::transports::http::reqwest::Url;
use anyhow::Result;
use direct_staking_scripts::eth_client::{deploy_bytecode, ProviderFactory};
use direct_staking_scripts::scripts;

mod test_utils;
use test_utils::STOP_CONTRACT_INIT_CODE;

// Requires `anvil` on PATH.
#[ignore]
#[tokio::test]
async fn deploy_logic_and_proxy() -> Result<()> {
    let anvil = Anvil::new().try_spawn()?;
    let endpoint: Url = anvil.endpoint().parse()?;
    let key = anvil.keys()[0].clone();
    let provider = ProviderFactory::create_provider(key, endpoint);
    let admin = anvil.addresses()[1];

    let init_code = Bytes::from_static(&STOP_CONTRACT_INIT_CODE);
    let deployed = scripts::deploy::deploy_behind_proxy(&provider, init_code.clone(), &init_code, admin).await?;

    assert_ne!(deployed.logic, deployed.proxy);
    assert_eq!(provider.get_code_at(deployed.logic).await?, Bytes::from_static(&[0x00]));
    assert_eq!(provider.get_code_at(deployed.proxy).await?, Bytes::from_static(&[0x00]));
    Ok(())
}

#[ignore]
#[tokio::test]
async fn reverting_deployment_reported() -> Result<()> {
    let anvil = Anvil::new().try_spawn()?;
    let endpoint: Url = anvil.endpoint().parse()?;
    let provider = ProviderFactory::create_provider(anvil.keys()[0].clone(), endpoint);

    // PUSH1 0 PUSH1 0 REVERT
    let reverting = Bytes::from_static(&[0x60, 0x00, 0x60, 0x00, 0xfd]);
    let result = deploy_bytecode(&provider, reverting).await;
    assert!(result.is_err());
    Ok(())
}
