pub mod artifacts;
pub mod consts;
pub mod env;
pub mod eth_client;
pub mod scripts;
pub mod signer;
pub mod tracing;
pub mod utils;
