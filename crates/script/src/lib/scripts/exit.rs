use alloy::primitives::B256;

use crate::scripts::prelude::ScriptRuntime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitMode {
    Normal,
    Emergency { claim_rewards: bool },
}

pub async fn run(
    runtime: &ScriptRuntime,
    validator_ids: &[u64],
    mode: ExitMode,
    dry_run: bool,
) -> anyhow::Result<Option<B256>> {
    if validator_ids.is_empty() {
        anyhow::bail!("At least one validator id is required");
    }
    let direct_staking = runtime.direct_staking()?;
    tracing::info!(?validator_ids, ?mode, contract = %direct_staking.address(), "Requesting exit");

    if dry_run || runtime.is_dry_run() {
        tracing::info!("Dry run is set, not exiting");
        return Ok(None);
    }

    let receipt = match mode {
        ExitMode::Normal => direct_staking.exit(validator_ids).await?,
        ExitMode::Emergency { claim_rewards } => direct_staking.emergency_exit(validator_ids, claim_rewards).await?,
    };
    Ok(Some(receipt.transaction_hash))
}
