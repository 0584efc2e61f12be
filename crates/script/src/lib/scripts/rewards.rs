use alloy::primitives::{Address, B256, U256};

use crate::scripts::prelude::ScriptRuntime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewardAction {
    Update,
    Claim { beneficiary: Address, amount: U256 },
    ClaimFor { claim_address: Address },
    WithdrawManagerRevenue { amount: U256, to: Address },
}

pub async fn run(runtime: &ScriptRuntime, action: &RewardAction, dry_run: bool) -> anyhow::Result<Option<B256>> {
    let reward_pool = runtime.reward_pool()?;
    tracing::info!(reward_pool = %reward_pool.address(), "Reward pool action {action:?}");

    if dry_run || runtime.is_dry_run() {
        tracing::info!("Dry run is set, not sending");
        return Ok(None);
    }

    let receipt = match action {
        RewardAction::Update => reward_pool.update_reward().await?,
        RewardAction::Claim { beneficiary, amount } => reward_pool.claim_rewards(*beneficiary, *amount).await?,
        RewardAction::ClaimFor { claim_address } => reward_pool.claim_rewards_for(*claim_address).await?,
        RewardAction::WithdrawManagerRevenue { amount, to } => {
            let pending = reward_pool.get_pending_manager_revenue().await?;
            if *amount > pending {
                anyhow::bail!("Requested {amount} exceeds pending manager revenue {pending}");
            }
            reward_pool.withdraw_manager_revenue(*amount, *to).await?
        }
    };
    Ok(Some(receipt.transaction_hash))
}
