use alloy::primitives::{Address, B256};

use crate::artifacts::ContractKind;
use crate::eth_client::deploy_bytecode;
use crate::scripts::prelude::ScriptRuntime;

/// Proxy to upgrade. The address comes from the runtime settings for the contract kind.
fn proxy_address(runtime: &ScriptRuntime, kind: ContractKind) -> anyhow::Result<Address> {
    match kind {
        ContractKind::DirectStaking => Ok(*runtime.direct_staking()?.address()),
        ContractKind::RewardPool => Ok(*runtime.reward_pool()?.address()),
        ContractKind::TransparentUpgradeableProxy => anyhow::bail!("A proxy cannot be upgraded to another proxy"),
    }
}

pub async fn run(runtime: &ScriptRuntime, kind: ContractKind, dry_run: bool) -> anyhow::Result<Option<(Address, B256)>> {
    let proxy = proxy_address(runtime, kind)?;
    let proxy_admin = runtime.proxy_admin()?;
    let logic_code = runtime.artifact_store()?.creation_bytecode(kind)?;
    tracing::info!(contract = kind.name(), %proxy, code_size = logic_code.len(), "Preparing upgrade");

    if dry_run || runtime.is_dry_run() {
        tracing::info!("Dry run is set, not upgrading");
        return Ok(None);
    }

    let logic = deploy_bytecode(runtime.deployer_provider.as_ref(), logic_code).await?;
    let receipt = proxy_admin.upgrade(proxy, logic).await?;
    tracing::info!(contract = kind.name(), %logic, "Upgrade complete");
    Ok(Some((logic, receipt.transaction_hash)))
}
