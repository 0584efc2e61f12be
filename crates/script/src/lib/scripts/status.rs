use alloy::primitives::{Address, Bytes, U256};
use serde::Serialize;

use crate::consts::NetworkInfo;
use crate::scripts::prelude::ScriptRuntime;

#[derive(Debug, Serialize)]
pub struct AccountStatus {
    pub account: Address,
    pub pending_reward: U256,
}

#[derive(Debug, Serialize)]
pub struct Status {
    pub network: String,
    pub accounted_balance: U256,
    pub pending_manager_revenue: U256,
    pub account: Option<AccountStatus>,
    pub exit_queue_length: U256,
    pub exit_queue: Vec<Bytes>,
}

pub async fn run(runtime: &ScriptRuntime, account: Option<Address>) -> anyhow::Result<Status> {
    let reward_pool = runtime.reward_pool()?;
    let direct_staking = runtime.direct_staking()?;

    let accounted_balance = reward_pool.get_accounted_balance().await?;
    let pending_manager_revenue = reward_pool.get_pending_manager_revenue().await?;
    let account = match account {
        Some(account) => Some(AccountStatus {
            account,
            pending_reward: reward_pool.get_pending_reward(account).await?,
        }),
        None => None,
    };

    let exit_queue_length = direct_staking.get_exit_queue_length().await?;
    let exit_queue = if exit_queue_length.is_zero() {
        vec![]
    } else {
        direct_staking.get_exit_queue(U256::ZERO, exit_queue_length).await?
    };

    Ok(Status {
        network: runtime.network.as_str(),
        accounted_balance,
        pending_manager_revenue,
        account,
        exit_queue_length,
        exit_queue,
    })
}
