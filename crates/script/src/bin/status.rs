use alloy_primitives::Address;
use clap::Parser;
use direct_staking_scripts::env;
use direct_staking_scripts::scripts;
use direct_staking_scripts::tracing as tracing_config;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct StatusArgs {
    /// Claim address to report pending rewards for.
    #[clap(long, required = false)]
    account: Option<Address>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let log_format = env::LOG_FORMAT.default(tracing_config::LogFormat::Plain)?;
    tracing_config::setup_logger(tracing_config::LoggingConfig::default().use_format(log_format.value));

    let args = StatusArgs::parse();
    let script_runtime = scripts::prelude::ScriptRuntime::init_from_env()?;
    let status = scripts::status::run(&script_runtime, args.account).await?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
