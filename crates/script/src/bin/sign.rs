use std::path::PathBuf;

use alloy_primitives::{Address, Bytes, U256};
use clap::Parser;
use direct_staking_scripts::env;
use direct_staking_scripts::scripts::{self, sign::RequestSource};
use direct_staking_scripts::tracing as tracing_config;

/*
Run variants:
* Sign a request file:
cargo run --bin sign --release -- --request ../data/fixtures/mainnet-stake-request.json --store ../data/signed/manifest.json

* Build the request from arguments (contract and chain come from DIRECT_STAKING_ADDRESS and EVM_CHAIN):
cargo run --bin sign --release -- --claim 0x.. --withdraw 0x.. --pubkey 0x.. --signature 0x.. --tips 100000000000000000
*/

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct SignArgs {
    #[clap(long, required = false, conflicts_with_all = ["claim", "withdraw", "pubkey", "signature"])]
    request: Option<PathBuf>,
    #[clap(long, required = false)]
    claim: Option<Address>,
    #[clap(long, required = false)]
    withdraw: Option<Address>,
    #[clap(long, required = false, default_value = "0")]
    extra_data: U256,
    #[clap(long, required = false)]
    pubkey: Vec<Bytes>,
    #[clap(long, required = false)]
    signature: Vec<Bytes>,
    /// Tips in wei attached on top of the deposits.
    #[clap(long, required = false, default_value = "0")]
    tips: U256,
    #[clap(long, required = false)]
    store: Option<PathBuf>,
}

fn request_source(args: &SignArgs) -> anyhow::Result<RequestSource> {
    if let Some(path) = &args.request {
        return Ok(RequestSource::File(path.clone()));
    }
    let (Some(claim_address), Some(withdraw_address)) = (args.claim, args.withdraw) else {
        anyhow::bail!("Either --request or both --claim and --withdraw are required");
    };
    Ok(RequestSource::Args {
        claim_address,
        withdraw_address,
        extra_data: args.extra_data,
        pubkeys: args.pubkey.clone(),
        signatures: args.signature.clone(),
    })
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let log_format = env::LOG_FORMAT.default(tracing_config::LogFormat::Plain)?;
    tracing_config::setup_logger(tracing_config::LoggingConfig::default().use_format(log_format.value));

    let args = SignArgs::parse();
    tracing::debug!("Args: {:?}", args);

    let runtime = scripts::prelude::SigningRuntime::init_from_env()?;
    let manifest = scripts::sign::run(&runtime, request_source(&args)?, args.tips, args.store.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&manifest)?);
    Ok(())
}
