#![allow(dead_code)]
use std::path::PathBuf;

use alloy_primitives::{address, Address};
use direct_staking_scripts::consts::{Network, WrappedNetwork};
use direct_staking_scripts::scripts::prelude::EnvVars;

pub static NETWORK: WrappedNetwork = WrappedNetwork::Id(Network::Mainnet);

pub const SIGNER_KEY: &str = "0xa441e60dd489bdfa4a848bee22d9225a6d53f4aadad492ccae5014e1d88d84cc";
pub const SIGNER_ADDRESS: Address = address!("2c4594b11baad822b5be6a65348779bb97473682");
pub const DIRECT_STAKING_ADDRESS: Address = address!("3194cbdc3dbcd3e11a07892e7ba5c3394048cc87");

// First anvil dev account.
pub const OWNER_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
// Nothing listens on the discard port, so any RPC call fails.
pub const UNREACHABLE_RPC: &str = "http://127.0.0.1:9";

// Creation code returning a single STOP byte as runtime code.
pub const STOP_CONTRACT_INIT_CODE: [u8; 10] = hex_literal::hex!("600060005360016000f3");
// Creation code for a contract answering every call with uint256(32 ether).
pub const CONSTANT_32_ETHER_INIT_CODE: [u8; 29] =
    hex_literal::hex!("601280600b6000396000f36801bc16d674ec80000060005260206000f3");

pub fn env_vars(evm_chain: &str, endpoint: &str, private_key: &str) -> EnvVars {
    EnvVars::new(
        evm_chain.to_owned(),
        endpoint.parse().expect("Failed to parse endpoint"),
        private_key.to_owned(),
    )
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data/fixtures")
        .join(name)
}
