use alloy::primitives::Address;

use crate::consts::NetworkInfo;
use crate::scripts::prelude::ScriptRuntime;

#[derive(Debug, Clone)]
pub struct Settings {
    pub signer: Address,
    /// Manager share of rewards in thousandths.
    pub manager_fee_share: Option<u64>,
    pub toggle_shanghai: bool,
    pub skip_initialize: bool,
}

pub async fn run(runtime: &ScriptRuntime, settings: &Settings, dry_run: bool) -> anyhow::Result<()> {
    let direct_staking = runtime.direct_staking()?;
    let reward_pool = runtime.reward_pool()?;
    let deposit_contract = Address::from(runtime.network().get_config().eth_deposit_contract);

    tracing::info!(
        direct_staking = %direct_staking.address(),
        reward_pool = %reward_pool.address(),
        %deposit_contract,
        "Configuring contracts {settings:?}"
    );

    if dry_run || runtime.is_dry_run() {
        tracing::info!("Dry run is set, not configuring");
        return Ok(());
    }

    if !settings.skip_initialize {
        reward_pool.initialize().await?;
        direct_staking.initialize().await?;
    }

    if reward_pool.has_controller_role(*direct_staking.address()).await? {
        tracing::info!("DirectStaking already holds the controller role");
    } else {
        reward_pool.grant_controller_role(*direct_staking.address()).await?;
    }

    direct_staking.set_eth_deposit_contract(deposit_contract).await?;
    direct_staking.set_reward_pool(*reward_pool.address()).await?;
    direct_staking.set_signer(settings.signer).await?;

    if let Some(milli) = settings.manager_fee_share {
        reward_pool.set_manager_fee_share(milli).await?;
    }
    if settings.toggle_shanghai {
        direct_staking.toggle_shanghai().await?;
    }

    tracing::info!("Configuration complete");
    Ok(())
}
