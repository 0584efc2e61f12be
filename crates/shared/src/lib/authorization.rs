use std::fmt;

use alloy_primitives::{eip191_hash_message, Address, Signature, B256};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::consts::AUTHORIZATION_LENGTH;
use crate::digest::StakeDigest;
use crate::io::serde_utils::serde_hex_as_string;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid authorization: expected 65 bytes, got {0}")]
    InvalidLength(usize),

    #[error("Invalid authorization: unsupported recovery id {0}")]
    InvalidRecoveryId(u8),

    #[error("Failed to recover signer: {0}")]
    Recovery(String),

    #[error("Authorization signed by {recovered}, expected {expected}")]
    SignerMismatch { expected: Address, recovered: Address },
}

/// `keccak256("\x19Ethereum Signed Message:\n32" || digest)`
pub fn authorization_message_hash(digest: &StakeDigest) -> B256 {
    eip191_hash_message(digest.as_bytes())
}

/// EIP-191 signature over a [`StakeDigest`], laid out as `r || s || v` with `v` in {27, 28}.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StakeAuthorization(#[serde(with = "serde_hex_as_string::FixedHexStringProtocol::<65>")] [u8; 65]);

impl StakeAuthorization {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        let mut raw: [u8; AUTHORIZATION_LENGTH] = bytes.try_into().map_err(|_| Error::InvalidLength(bytes.len()))?;
        raw[64] = match raw[64] {
            0 | 1 => raw[64] + 27,
            27 | 28 => raw[64],
            other => return Err(Error::InvalidRecoveryId(other)),
        };
        Ok(Self(raw))
    }

    pub fn from_signature(signature: &Signature) -> Self {
        let mut raw = signature.as_bytes();
        raw[64] = 27 + u8::from(signature.v());
        Self(raw)
    }

    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    pub fn v(&self) -> u8 {
        self.0[64]
    }

    pub fn recover_signer(&self, digest: &StakeDigest) -> Result<Address, Error> {
        let signature = Signature::from_raw(&self.0).map_err(|e| Error::Recovery(e.to_string()))?;
        signature
            .recover_address_from_prehash(&authorization_message_hash(digest))
            .map_err(|e| Error::Recovery(e.to_string()))
    }

    /// Performs the same check `DirectStaking` does before accepting a stake.
    pub fn verify(&self, digest: &StakeDigest, expected: Address) -> Result<(), Error> {
        let recovered = self.recover_signer(digest)?;
        if recovered != expected {
            tracing::warn!(%expected, %recovered, "Stake authorization signer mismatch");
            return Err(Error::SignerMismatch { expected, recovered });
        }
        Ok(())
    }
}

impl TryFrom<&[u8]> for StakeAuthorization {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(value)
    }
}

impl<'de> Deserialize<'de> for StakeAuthorization {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_hex_as_string::FixedHexStringProtocol::<65>::deserialize(deserializer)?;
        Self::from_slice(&raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for StakeAuthorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for StakeAuthorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StakeAuthorization({self})")
    }
}
