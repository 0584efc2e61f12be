use alloy_primitives::{Address, U256};
use clap::{Parser, Subcommand};
use direct_staking_scripts::env;
use direct_staking_scripts::scripts::{self, rewards::RewardAction};
use direct_staking_scripts::tracing as tracing_config;

// cargo run --bin rewards --release -- claim-for --claim-address 0x66aB6D9362d4F35596279692F0251Db635165871

#[derive(Subcommand, Debug)]
enum Action {
    Update,
    Claim {
        #[clap(long)]
        beneficiary: Address,
        /// Amount in wei.
        #[clap(long)]
        amount: U256,
    },
    ClaimFor {
        #[clap(long)]
        claim_address: Address,
    },
    WithdrawManagerRevenue {
        /// Amount in wei.
        #[clap(long)]
        amount: U256,
        #[clap(long)]
        to: Address,
    },
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct RewardsArgs {
    #[clap(subcommand)]
    action: Action,
    #[clap(long, required = false, default_value = "false")]
    dry_run: bool,
}

impl From<Action> for RewardAction {
    fn from(action: Action) -> Self {
        match action {
            Action::Update => RewardAction::Update,
            Action::Claim { beneficiary, amount } => RewardAction::Claim { beneficiary, amount },
            Action::ClaimFor { claim_address } => RewardAction::ClaimFor { claim_address },
            Action::WithdrawManagerRevenue { amount, to } => RewardAction::WithdrawManagerRevenue { amount, to },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let log_format = env::LOG_FORMAT.default(tracing_config::LogFormat::Plain)?;
    tracing_config::setup_logger(tracing_config::LoggingConfig::default().use_format(log_format.value));

    let args = RewardsArgs::parse();
    tracing::debug!("Args: {:?}", args);

    let action = RewardAction::from(args.action);
    let script_runtime = scripts::prelude::ScriptRuntime::init_from_env()?;
    if let Some(tx_hash) = scripts::rewards::run(&script_runtime, &action, args.dry_run).await? {
        tracing::info!("Reward pool transaction {tx_hash}");
    }
    Ok(())
}
