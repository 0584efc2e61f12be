use std::path::PathBuf;

use clap::Parser;
use direct_staking_scripts::env;
use direct_staking_scripts::scripts;
use direct_staking_scripts::tracing as tracing_config;

// cargo run --bin deploy --release -- --store "../data/deploy/${EVM_CHAIN}-deploy.json"

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct DeployArgs {
    #[clap(long, required = false)]
    store: Option<PathBuf>,
    #[clap(long, required = false, default_value = "false")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let log_format = env::LOG_FORMAT.default(tracing_config::LogFormat::Plain)?;
    tracing_config::setup_logger(tracing_config::LoggingConfig::default().use_format(log_format.value));

    let args = DeployArgs::parse();
    tracing::debug!("Args: {:?}", args);

    let script_runtime = scripts::prelude::ScriptRuntime::init_from_env()?;
    match scripts::deploy::run(&script_runtime, args.store.as_deref(), args.dry_run).await? {
        Some(deployed) => println!("{}", serde_json::to_string_pretty(&deployed)?),
        None => tracing::info!("Nothing deployed"),
    }
    Ok(())
}
