use clap::{Parser, ValueEnum};
use direct_staking_scripts::artifacts::ContractKind;
use direct_staking_scripts::env;
use direct_staking_scripts::scripts;
use direct_staking_scripts::tracing as tracing_config;

// cargo run --bin upgrade --release -- --contract direct-staking

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Target {
    DirectStaking,
    RewardPool,
}

impl From<Target> for ContractKind {
    fn from(value: Target) -> Self {
        match value {
            Target::DirectStaking => ContractKind::DirectStaking,
            Target::RewardPool => ContractKind::RewardPool,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct UpgradeArgs {
    #[clap(long, value_enum, default_value = "direct-staking")]
    contract: Target,
    #[clap(long, required = false, default_value = "false")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let log_format = env::LOG_FORMAT.default(tracing_config::LogFormat::Plain)?;
    tracing_config::setup_logger(tracing_config::LoggingConfig::default().use_format(log_format.value));

    let args = UpgradeArgs::parse();
    tracing::debug!("Args: {:?}", args);

    let script_runtime = scripts::prelude::ScriptRuntime::init_from_env()?;
    if let Some((logic, tx_hash)) = scripts::upgrade::run(&script_runtime, args.contract.into(), args.dry_run).await? {
        tracing::info!("New logic contract {logic}, upgrade transaction {tx_hash}");
    }
    Ok(())
}
