use std::path::Path;

use alloy::network::Ethereum;
use alloy::primitives::{Address, Bytes};
use alloy::providers::{Provider, WalletProvider};
use serde::{Deserialize, Serialize};

use crate::artifacts::{ArtifactStore, ContractKind};
use crate::consts::NetworkInfo;
use crate::eth_client::{deploy_bytecode, proxy_creation_code};
use crate::scripts::prelude::ScriptRuntime;
use crate::utils;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxiedContract {
    pub proxy: Address,
    pub logic: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedContracts {
    pub network: String,
    pub chain_id: u64,
    pub proxy_admin: Address,
    pub reward_pool: ProxiedContract,
    pub direct_staking: ProxiedContract,
}

/// Deploys the logic contract, then a `TransparentUpgradeableProxy` administered by `admin`.
pub async fn deploy_behind_proxy<P>(
    provider: &P,
    logic_bytecode: Bytes,
    proxy_bytecode: &Bytes,
    admin: Address,
) -> anyhow::Result<ProxiedContract>
where
    P: Provider<Ethereum>,
{
    let logic = deploy_bytecode(provider, logic_bytecode).await?;
    let proxy = deploy_bytecode(provider, proxy_creation_code(proxy_bytecode, logic, admin)).await?;
    Ok(ProxiedContract { proxy, logic })
}

pub async fn run(runtime: &ScriptRuntime, store: Option<&Path>, dry_run: bool) -> anyhow::Result<Option<DeployedContracts>> {
    let artifacts: ArtifactStore = runtime.artifact_store()?;
    let proxy_admin = runtime.proxy_admin_address()?;

    let reward_pool_code = artifacts.creation_bytecode(ContractKind::RewardPool)?;
    let direct_staking_code = artifacts.creation_bytecode(ContractKind::DirectStaking)?;
    let proxy_code = artifacts.creation_bytecode(ContractKind::TransparentUpgradeableProxy)?;
    tracing::info!(
        reward_pool_size = reward_pool_code.len(),
        direct_staking_size = direct_staking_code.len(),
        proxy_size = proxy_code.len(),
        %proxy_admin,
        "Loaded contract artifacts"
    );

    if dry_run || runtime.is_dry_run() {
        tracing::info!("Dry run is set, not deploying");
        return Ok(None);
    }

    let provider = runtime.deployer_provider.as_ref();
    tracing::info!("Deploying as {}", provider.default_signer_address());

    let reward_pool = deploy_behind_proxy(provider, reward_pool_code, &proxy_code, proxy_admin).await?;
    tracing::info!(proxy = %reward_pool.proxy, logic = %reward_pool.logic, "Deployed RewardPool");

    let direct_staking = deploy_behind_proxy(provider, direct_staking_code, &proxy_code, proxy_admin).await?;
    tracing::info!(proxy = %direct_staking.proxy, logic = %direct_staking.logic, "Deployed DirectStaking");

    let deployed = DeployedContracts {
        network: runtime.network.as_str(),
        chain_id: runtime.network.get_config().chain_id,
        proxy_admin,
        reward_pool,
        direct_staking,
    };

    if let Some(path) = store {
        tracing::info!("Writing deployed addresses to {:?}", path.as_os_str());
        utils::write_json(path, &deployed)?;
    }
    Ok(Some(deployed))
}
