use clap::Parser;
use direct_staking_scripts::env;
use direct_staking_scripts::scripts::{self, exit::ExitMode};
use direct_staking_scripts::tracing as tracing_config;

// cargo run --bin exit --release -- --validator-id 0 --validator-id 1 --emergency --claim-rewards

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct ExitArgs {
    #[clap(long = "validator-id", required = true)]
    validator_ids: Vec<u64>,
    #[clap(long, required = false, default_value = "false")]
    emergency: bool,
    #[clap(long, required = false, default_value = "false", requires = "emergency")]
    claim_rewards: bool,
    #[clap(long, required = false, default_value = "false")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let log_format = env::LOG_FORMAT.default(tracing_config::LogFormat::Plain)?;
    tracing_config::setup_logger(tracing_config::LoggingConfig::default().use_format(log_format.value));

    let args = ExitArgs::parse();
    tracing::debug!("Args: {:?}", args);

    let mode = if args.emergency {
        ExitMode::Emergency {
            claim_rewards: args.claim_rewards,
        }
    } else {
        ExitMode::Normal
    };

    let script_runtime = scripts::prelude::ScriptRuntime::init_from_env()?;
    if let Some(tx_hash) = scripts::exit::run(&script_runtime, &args.validator_ids, mode, args.dry_run).await? {
        tracing::info!("Exit transaction {tx_hash}");
    }
    Ok(())
}
