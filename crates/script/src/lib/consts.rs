use std::str::FromStr;

use thiserror::Error;

pub mod eth_deposit_contract {
    use hex_literal::hex;
    // https://ethereum.org/en/staking/deposit-contract/
    pub const MAINNET: [u8; 20] = hex!("00000000219ab540356cbb839cbe05303d7705fa");
    pub const GOERLI: [u8; 20] = hex!("ff50ed3d0ec03aC01D4C79aAd74928BFF48a7b2b");
}

pub const ANVIL_CHAIN_ID: u64 = 31337;

pub struct NetworkConfig {
    pub chain_id: u64,
    pub eth_deposit_contract: [u8; 20],
}

pub trait NetworkInfo {
    fn as_str(&self) -> String;
    fn get_config(&self) -> NetworkConfig;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Goerli,
}

impl NetworkInfo for Network {
    fn as_str(&self) -> String {
        let val = match self {
            Self::Mainnet => "mainnet",
            Self::Goerli => "goerli",
        };
        val.to_owned()
    }

    fn get_config(&self) -> NetworkConfig {
        match self {
            Self::Mainnet => NetworkConfig {
                chain_id: 1,
                eth_deposit_contract: eth_deposit_contract::MAINNET,
            },
            Self::Goerli => NetworkConfig {
                chain_id: 5,
                eth_deposit_contract: eth_deposit_contract::GOERLI,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrappedNetwork {
    Anvil(Network),
    Id(Network),
}

impl NetworkInfo for WrappedNetwork {
    fn as_str(&self) -> String {
        match self {
            Self::Anvil(fork) => format!("anvil-{}", fork.as_str()),
            Self::Id(network) => network.as_str(),
        }
    }

    fn get_config(&self) -> NetworkConfig {
        match self {
            Self::Id(network) => network.get_config(),
            Self::Anvil(fork) => {
                let mut fork_config = fork.get_config();
                fork_config.chain_id = ANVIL_CHAIN_ID;
                fork_config
            }
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NetworkParseError {
    #[error("Unknown network {0}")]
    UnknownNetwork(String),
}

impl FromStr for Network {
    type Err = NetworkParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Network::Mainnet),
            "goerli" => Ok(Network::Goerli),
            other => Err(NetworkParseError::UnknownNetwork(other.to_owned())),
        }
    }
}

impl FromStr for WrappedNetwork {
    type Err = NetworkParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("anvil-") {
            Some(fork) => Ok(WrappedNetwork::Anvil(fork.parse()?)),
            None => Ok(WrappedNetwork::Id(s.parse()?)),
        }
    }
}
