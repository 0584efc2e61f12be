use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::consts::{DEPOSIT_SIZE_ETH, WEI_PER_ETH};
use crate::digest::{self, StakeDigest};
use crate::io::serde_utils::serde_hex_as_string;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeRequest {
    pub extra_data: U256,
    pub contract_address: Address,
    pub chain_id: u64,
    pub claim_address: Address,
    pub withdraw_address: Address,
    #[serde(with = "serde_hex_as_string::VecOfHexStringProtocol")]
    pub pubkeys: Vec<Vec<u8>>,
    #[serde(with = "serde_hex_as_string::VecOfHexStringProtocol")]
    pub signatures: Vec<Vec<u8>>,
}

impl StakeRequest {
    pub fn digest(&self) -> Result<StakeDigest, digest::Error> {
        digest::compute_digest(
            self.extra_data,
            self.contract_address,
            self.chain_id,
            self.claim_address,
            self.withdraw_address,
            &self.pubkeys,
            &self.signatures,
        )
    }

    pub fn validator_count(&self) -> usize {
        self.pubkeys.len()
    }

    /// ETH value to attach to `stake`: one full deposit per validator plus tips.
    pub fn stake_value(&self, tips: U256) -> U256 {
        stake_value(self.validator_count(), tips)
    }
}

pub fn deposit_size_wei() -> U256 {
    U256::from(DEPOSIT_SIZE_ETH) * U256::from(WEI_PER_ETH)
}

pub fn stake_value(validators: usize, tips: U256) -> U256 {
    deposit_size_wei() * U256::from(validators) + tips
}
