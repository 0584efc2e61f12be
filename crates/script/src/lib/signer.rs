use std::fmt;

use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use alloy_primitives::Address;
use direct_staking_shared::authorization::{self, StakeAuthorization};
use direct_staking_shared::digest::StakeDigest;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Failed to convert string to hex")]
    FromHexError,
    #[error("Failed to parse private key")]
    ParsePrivateKeyError,
    #[error("Failed to deserialize private key")]
    DeserializePrivateKeyError,
}

#[derive(Debug, Error)]
pub enum SigningError {
    #[error("Failed to sign stake digest: {0}")]
    Signer(#[from] alloy::signers::Error),

    #[error("Produced authorization failed verification: {0}")]
    Verification(#[from] authorization::Error),
}

pub fn decode_key(private_key_raw: &str) -> Result<k256::SecretKey, KeyError> {
    let key_str = private_key_raw
        .split("0x")
        .last()
        .ok_or(KeyError::ParsePrivateKeyError)?
        .trim();
    let key_hex = hex::decode(key_str).map_err(|_e| KeyError::FromHexError)?;
    let key = k256::SecretKey::from_slice(&key_hex).map_err(|_e| KeyError::DeserializePrivateKeyError)?;
    Ok(key)
}

/// Holder of the key registered on `DirectStaking` via `setSigner`.
pub struct AuthoritySigner {
    signer: PrivateKeySigner,
}

impl AuthoritySigner {
    pub fn new(key: k256::SecretKey) -> Self {
        Self {
            signer: PrivateKeySigner::from(key),
        }
    }

    pub fn from_hex(private_key_raw: &str) -> Result<Self, KeyError> {
        Ok(Self::new(decode_key(private_key_raw)?))
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn sign_digest(&self, digest: &StakeDigest) -> Result<StakeAuthorization, SigningError> {
        let signature = self.signer.sign_message_sync(digest.as_bytes())?;
        let authorization = StakeAuthorization::from_signature(&signature);
        authorization.verify(digest, self.address())?;
        tracing::debug!(signer = %self.address(), digest = %digest, "Signed stake digest");
        Ok(authorization)
    }
}

impl fmt::Debug for AuthoritySigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthoritySigner")
            .field("address", &self.address())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, B256};
    use hex_literal::hex;

    const SIGNER_KEY: &str = "a441e60dd489bdfa4a848bee22d9225a6d53f4aadad492ccae5014e1d88d84cc";
    const DIGEST: StakeDigest = StakeDigest(B256::new(hex!(
        "e2ffa0159393b8693c992da6d53c6e9e677dc423c015e9d7d2f8c3651f92b926"
    )));

    #[test]
    fn derives_registered_address() {
        let signer = AuthoritySigner::from_hex(SIGNER_KEY).expect("Failed to decode key");
        assert_eq!(signer.address(), address!("2c4594b11baad822b5be6a65348779bb97473682"));

        let prefixed = AuthoritySigner::from_hex(&format!("0x{SIGNER_KEY}")).expect("Failed to decode key");
        assert_eq!(prefixed.address(), signer.address());
    }

    #[test]
    fn signing_is_deterministic() {
        let signer = AuthoritySigner::from_hex(SIGNER_KEY).expect("Failed to decode key");
        let authorization = signer.sign_digest(&DIGEST).expect("Failed to sign");

        assert_eq!(
            authorization.as_bytes(),
            &hex!(
                "e5bec9513a32808429a37d2dd2d7ba74139ab6f98e820e1346fe416028623bca"
                "6471594d8969d52ec0b41e7dba6a831fcb862a4ea57d8652117ec8aec76f3d72"
                "1b"
            )
        );
        assert_eq!(signer.sign_digest(&DIGEST).expect("Failed to sign"), authorization);
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!(matches!(decode_key("0xzz"), Err(KeyError::FromHexError)));
        assert!(matches!(decode_key("00"), Err(KeyError::DeserializePrivateKeyError)));
    }

    #[test]
    fn debug_does_not_leak_key() {
        let signer = AuthoritySigner::from_hex(SIGNER_KEY).expect("Failed to decode key");
        assert!(!format!("{signer:?}").contains(SIGNER_KEY));
    }
}
