use alloy_primitives::Address;
use clap::Parser;
use direct_staking_scripts::env;
use direct_staking_scripts::scripts;
use direct_staking_scripts::tracing as tracing_config;

// cargo run --bin configure --release -- --signer 0x2c4594b11baad822b5be6a65348779bb97473682 --manager-fee-share 100

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct ConfigureArgs {
    /// Authority whose signatures `stake` accepts.
    #[clap(long)]
    signer: Address,
    #[clap(long, required = false)]
    manager_fee_share: Option<u64>,
    #[clap(long, required = false, default_value = "false")]
    toggle_shanghai: bool,
    #[clap(long, required = false, default_value = "false")]
    skip_initialize: bool,
    #[clap(long, required = false, default_value = "false")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let log_format = env::LOG_FORMAT.default(tracing_config::LogFormat::Plain)?;
    tracing_config::setup_logger(tracing_config::LoggingConfig::default().use_format(log_format.value));

    let args = ConfigureArgs::parse();
    tracing::debug!("Args: {:?}", args);

    let script_runtime = scripts::prelude::ScriptRuntime::init_from_env()?;
    let settings = scripts::configure::Settings {
        signer: args.signer,
        manager_fee_share: args.manager_fee_share,
        toggle_shanghai: args.toggle_shanghai,
        skip_initialize: args.skip_initialize,
    };
    scripts::configure::run(&script_runtime, &settings, args.dry_run).await
}
