use std::path::PathBuf;

use clap::Parser;
use direct_staking_scripts::env;
use direct_staking_scripts::scripts;
use direct_staking_scripts::tracing as tracing_config;

// cargo run --bin stake --release -- --manifest ../data/signed/manifest.json

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct StakeArgs {
    #[clap(long)]
    manifest: PathBuf,
    #[clap(long, required = false, default_value = "false")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let log_format = env::LOG_FORMAT.default(tracing_config::LogFormat::Plain)?;
    tracing_config::setup_logger(tracing_config::LoggingConfig::default().use_format(log_format.value));

    let args = StakeArgs::parse();
    tracing::debug!("Args: {:?}", args);

    let script_runtime = scripts::prelude::ScriptRuntime::init_from_env()?;
    if let Some(tx_hash) = scripts::stake::run(&script_runtime, &args.manifest, args.dry_run).await? {
        tracing::info!("Stake transaction {tx_hash}");
    }
    Ok(())
}
