use std::fmt;

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolValue;
use ethereum_hashing::hash_fixed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{PUBKEY_LENGTH, SIGNATURE_LENGTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorField {
    Pubkey,
    Signature,
}

impl fmt::Display for ValidatorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pubkey => f.write_str("pubkey"),
            Self::Signature => f.write_str("signature"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Input mismatch: {pubkeys} pubkeys, {signatures} signatures")]
    InputMismatch { pubkeys: usize, signatures: usize },

    #[error("Invalid {field} length at index {index}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        field: ValidatorField,
        index: usize,
        expected: usize,
        actual: usize,
    },
}

/// Commitment over a staking request that the signing authority signs and
/// `DirectStaking` recomputes before accepting a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StakeDigest(pub B256);

impl StakeDigest {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0 .0
    }
}

impl fmt::Display for StakeDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<StakeDigest> for B256 {
    fn from(value: StakeDigest) -> Self {
        value.0
    }
}

impl AsRef<[u8]> for StakeDigest {
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}

/// ABI encoding of `(uint256, address, uint256, address, address)`, the seed of the fold.
pub fn encode_request_header(
    extra_data: U256,
    contract_address: Address,
    chain_id: u64,
    claim_address: Address,
    withdraw_address: Address,
) -> Vec<u8> {
    (
        extra_data,
        contract_address,
        U256::from(chain_id),
        claim_address,
        withdraw_address,
    )
        .abi_encode_params()
}

/// ABI encoding of `(bytes32, bytes, bytes)` for a single validator entry.
pub fn encode_validator_entry(previous: &B256, pubkey: &[u8], signature: &[u8]) -> Vec<u8> {
    (
        *previous,
        Bytes::copy_from_slice(pubkey),
        Bytes::copy_from_slice(signature),
    )
        .abi_encode_params()
}

fn check_lengths<P, S>(pubkeys: &[P], signatures: &[S]) -> Result<(), Error>
where
    P: AsRef<[u8]>,
    S: AsRef<[u8]>,
{
    if pubkeys.len() != signatures.len() {
        return Err(Error::InputMismatch {
            pubkeys: pubkeys.len(),
            signatures: signatures.len(),
        });
    }

    let fields = pubkeys
        .iter()
        .map(|pubkey| (ValidatorField::Pubkey, pubkey.as_ref().len(), PUBKEY_LENGTH))
        .enumerate()
        .chain(
            signatures
                .iter()
                .map(|signature| (ValidatorField::Signature, signature.as_ref().len(), SIGNATURE_LENGTH))
                .enumerate(),
        );

    for (index, (field, actual, expected)) in fields {
        if actual != expected {
            return Err(Error::InvalidLength {
                field,
                index,
                expected,
                actual,
            });
        }
    }
    Ok(())
}

/// Chained SHA-256 over the request header and every `(pubkey, signature)` pair, in order.
///
/// All inputs are validated before the first hash is taken.
pub fn compute_digest<P, S>(
    extra_data: U256,
    contract_address: Address,
    chain_id: u64,
    claim_address: Address,
    withdraw_address: Address,
    pubkeys: &[P],
    signatures: &[S],
) -> Result<StakeDigest, Error>
where
    P: AsRef<[u8]>,
    S: AsRef<[u8]>,
{
    check_lengths(pubkeys, signatures)?;

    let header = encode_request_header(extra_data, contract_address, chain_id, claim_address, withdraw_address);
    let seed = B256::from(hash_fixed(&header));

    let digest = pubkeys
        .iter()
        .zip(signatures)
        .fold(seed, |previous, (pubkey, signature)| {
            let entry = encode_validator_entry(&previous, pubkey.as_ref(), signature.as_ref());
            B256::from(hash_fixed(&entry))
        });

    tracing::trace!(validators = pubkeys.len(), digest = %digest, "Computed stake digest");
    Ok(StakeDigest(digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use hex_literal::hex;

    const CONTRACT: Address = address!("3194cbdc3dbcd3e11a07892e7ba5c3394048cc87");
    const CLAIM: Address = address!("66ab6d9362d4f35596279692f0251db635165871");
    const WITHDRAW: Address = address!("11ad6f6224eaad9a75f5985dd5cbe5c28187e1b7");

    const PUBKEY_1: [u8; 48] =
        hex!("99380e442ac9955cd0b82a820f4d2b5a630cc0b24fa57f1d0f80dd42fcc1be92ac4038b29de057e9b62c7783103651f9");
    const PUBKEY_2: [u8; 48] =
        hex!("ae73a54c8206f664523e4a45f802c6b3b8f7bdb9a8c64f2af53bf7c4425e350c68cd906ec822e1ec84e8e3d626f958f3");
    const SIGNATURE_1: [u8; 96] = hex!(
        "a2f1845644cee06469cea42dbd5ebf4505b9489ed896788ab2b8e42124aceb88a6565a375546254f5507b425d15c90a1"
        "0e772708dbe9a56b3e46f5c47e8aaf6a9849ae4f838bb9bac068bcde47b616fd2b0824de23ec17981987668a4c50e17d"
    );
    const SIGNATURE_2: [u8; 96] = hex!(
        "b337f858d1938704cdb2e5bf5dfb82723f7f5a08b6ce66200d24efa3973132dd3e701111cccf940c5965e80b5068af83"
        "0be5e9d1ca1aa06e57ddd7b3948501f16e79c48e039738836ca4e5f3442b5e5c52eff472b4526a973649d0dad73698d5"
    );

    fn digest_for(chain_id: u64, pubkeys: &[[u8; 48]], signatures: &[[u8; 96]]) -> Result<StakeDigest, Error> {
        compute_digest(U256::ZERO, CONTRACT, chain_id, CLAIM, WITHDRAW, pubkeys, signatures)
    }

    #[test]
    fn header_encoding_layout() {
        let encoded = encode_request_header(U256::from(7), CONTRACT, 5, CLAIM, WITHDRAW);
        assert_eq!(encoded.len(), 5 * 32);
        assert_eq!(encoded[31], 7);
        assert_eq!(&encoded[32..44], &[0u8; 12]);
        assert_eq!(&encoded[44..64], CONTRACT.as_slice());
        assert_eq!(encoded[95], 5);
        assert_eq!(&encoded[108..128], CLAIM.as_slice());
        assert_eq!(&encoded[140..160], WITHDRAW.as_slice());
    }

    #[test]
    fn validator_entry_encoding_layout() {
        let previous = B256::repeat_byte(0xab);
        let encoded = encode_validator_entry(&previous, &PUBKEY_1, &SIGNATURE_1);

        // head (3 words) + pubkey (length word + 2 words) + signature (length word + 3 words)
        assert_eq!(encoded.len(), 320);
        assert_eq!(&encoded[0..32], previous.as_slice());
        assert_eq!(U256::from_be_slice(&encoded[32..64]), U256::from(0x60));
        assert_eq!(U256::from_be_slice(&encoded[64..96]), U256::from(0xc0));
        assert_eq!(U256::from_be_slice(&encoded[96..128]), U256::from(48));
        assert_eq!(&encoded[128..176], &PUBKEY_1);
        assert_eq!(&encoded[176..192], &[0u8; 16]);
        assert_eq!(U256::from_be_slice(&encoded[192..224]), U256::from(96));
        assert_eq!(&encoded[224..320], &SIGNATURE_1);
    }

    #[test]
    fn empty_batch_is_header_hash() {
        let digest = digest_for(1, &[], &[]).expect("Failed to compute digest");
        let header = encode_request_header(U256::ZERO, CONTRACT, 1, CLAIM, WITHDRAW);

        assert_eq!(digest.0, B256::from(hash_fixed(&header)));
        assert_eq!(
            digest.0,
            B256::from(hex!("06a0a9ea7d45dd20cef2605e4568f86a4b5a6b5bb6b69d47385bb0c9ae4054ae"))
        );
    }

    #[test]
    fn single_validator_golden() {
        let digest = digest_for(1, &[PUBKEY_1], &[SIGNATURE_1]).expect("Failed to compute digest");
        assert_eq!(
            digest.0,
            B256::from(hex!("51f33295ccefe30f77dffd951e8c42184479608878b8184ce30b2032e800a93e"))
        );
    }

    #[test]
    fn two_validators_golden() {
        let digest = digest_for(1, &[PUBKEY_1, PUBKEY_2], &[SIGNATURE_1, SIGNATURE_2]).expect("Failed to compute digest");
        assert_eq!(
            digest.0,
            B256::from(hex!("e2ffa0159393b8693c992da6d53c6e9e677dc423c015e9d7d2f8c3651f92b926"))
        );
    }

    #[test]
    fn goerli_chain_id_golden() {
        let digest = digest_for(5, &[PUBKEY_1, PUBKEY_2], &[SIGNATURE_1, SIGNATURE_2]).expect("Failed to compute digest");
        assert_eq!(
            digest.0,
            B256::from(hex!("72ed71d4f8f5d18c41f7620bc8d6ea3e8726a51271e427811549dec23370a8de"))
        );
    }

    #[test]
    fn extra_data_golden() {
        let digest = compute_digest(U256::from(7), CONTRACT, 1, CLAIM, WITHDRAW, &[PUBKEY_1], &[SIGNATURE_1])
            .expect("Failed to compute digest");
        assert_eq!(
            digest.0,
            B256::from(hex!("1a58552c1d93a4ddbd5c62c73570a38fb575067e7ab092c569b0f9589ca91049"))
        );
    }

    #[test]
    fn reordered_pairs_golden() {
        let digest = digest_for(1, &[PUBKEY_2, PUBKEY_1], &[SIGNATURE_2, SIGNATURE_1]).expect("Failed to compute digest");
        assert_eq!(
            digest.0,
            B256::from(hex!("5776e48fb151bf70c4caa07c3554d9df18c6b09b3e58b5b31d5f5be9e1fbc65b"))
        );
    }

    #[test]
    fn accepts_vec_inputs() {
        let pubkeys = vec![PUBKEY_1.to_vec()];
        let signatures = vec![Bytes::copy_from_slice(&SIGNATURE_1)];
        let from_vecs = compute_digest(U256::ZERO, CONTRACT, 1, CLAIM, WITHDRAW, &pubkeys, &signatures)
            .expect("Failed to compute digest");
        let from_arrays = digest_for(1, &[PUBKEY_1], &[SIGNATURE_1]).expect("Failed to compute digest");
        assert_eq!(from_vecs, from_arrays);
    }

    #[test]
    fn mismatched_counts_rejected() {
        let result = digest_for(1, &[PUBKEY_1, PUBKEY_2], &[SIGNATURE_1]);
        assert_eq!(
            result,
            Err(Error::InputMismatch {
                pubkeys: 2,
                signatures: 1
            })
        );

        let result = digest_for(1, &[], &[SIGNATURE_1]);
        assert_eq!(
            result,
            Err(Error::InputMismatch {
                pubkeys: 0,
                signatures: 1
            })
        );
    }

    #[test]
    fn short_pubkey_rejected() {
        let pubkeys = vec![PUBKEY_1.to_vec(), PUBKEY_2[..47].to_vec()];
        let signatures = vec![SIGNATURE_1.to_vec(), SIGNATURE_2.to_vec()];
        let result = compute_digest(U256::ZERO, CONTRACT, 1, CLAIM, WITHDRAW, &pubkeys, &signatures);
        assert_eq!(
            result,
            Err(Error::InvalidLength {
                field: ValidatorField::Pubkey,
                index: 1,
                expected: 48,
                actual: 47
            })
        );
    }

    #[test]
    fn long_signature_rejected() {
        let mut signature = SIGNATURE_1.to_vec();
        signature.push(0);
        let result = compute_digest(U256::ZERO, CONTRACT, 1, CLAIM, WITHDRAW, &[PUBKEY_1], &[signature]);
        assert_eq!(
            result,
            Err(Error::InvalidLength {
                field: ValidatorField::Signature,
                index: 0,
                expected: 96,
                actual: 97
            })
        );
    }

    #[test]
    fn count_mismatch_reported_before_lengths() {
        let result = compute_digest(U256::ZERO, CONTRACT, 1, CLAIM, WITHDRAW, &[vec![0u8; 3]], &Vec::<Vec<u8>>::new());
        assert!(matches!(result, Err(Error::InputMismatch { .. })));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn pubkey() -> impl Strategy<Value = Vec<u8>> {
            prop::collection::vec(any::<u8>(), PUBKEY_LENGTH)
        }

        fn signature() -> impl Strategy<Value = Vec<u8>> {
            prop::collection::vec(any::<u8>(), SIGNATURE_LENGTH)
        }

        fn validators(min: usize, max: usize) -> impl Strategy<Value = Vec<(Vec<u8>, Vec<u8>)>> {
            prop::collection::vec((pubkey(), signature()), min..=max)
        }

        fn address_strategy() -> impl Strategy<Value = Address> {
            any::<[u8; 20]>().prop_map(Address::from)
        }

        fn digest_of(
            contract: Address,
            chain_id: u64,
            claim: Address,
            withdraw: Address,
            pairs: &[(Vec<u8>, Vec<u8>)],
        ) -> StakeDigest {
            let (pubkeys, signatures): (Vec<_>, Vec<_>) = pairs.iter().cloned().unzip();
            compute_digest(U256::ZERO, contract, chain_id, claim, withdraw, &pubkeys, &signatures)
                .expect("Failed to compute digest")
        }

        proptest! {
            #[test]
            fn deterministic(
                contract in address_strategy(),
                claim in address_strategy(),
                withdraw in address_strategy(),
                chain_id in any::<u64>(),
                pairs in validators(0, 4),
            ) {
                let first = digest_of(contract, chain_id, claim, withdraw, &pairs);
                let second = digest_of(contract, chain_id, claim, withdraw, &pairs);
                prop_assert_eq!(first, second);
            }

            #[test]
            fn order_sensitive(pairs in validators(2, 5)) {
                prop_assume!(pairs[0] != pairs[1]);
                let mut swapped = pairs.clone();
                swapped.swap(0, 1);

                let original = digest_of(CONTRACT, 1, CLAIM, WITHDRAW, &pairs);
                let reordered = digest_of(CONTRACT, 1, CLAIM, WITHDRAW, &swapped);
                prop_assert_ne!(original, reordered);
            }

            #[test]
            fn binds_addresses_and_chain(
                pairs in validators(0, 3),
                byte in 0usize..20,
                flip in 1u8..=255,
                chain_id in 0u64..u64::MAX,
            ) {
                let base = digest_of(CONTRACT, chain_id, CLAIM, WITHDRAW, &pairs);

                let mutate = |address: Address| {
                    let mut raw = address.0 .0;
                    raw[byte] ^= flip;
                    Address::from(raw)
                };

                prop_assert_ne!(base, digest_of(mutate(CONTRACT), chain_id, CLAIM, WITHDRAW, &pairs));
                prop_assert_ne!(base, digest_of(CONTRACT, chain_id, mutate(CLAIM), WITHDRAW, &pairs));
                prop_assert_ne!(base, digest_of(CONTRACT, chain_id, CLAIM, mutate(WITHDRAW), &pairs));
                prop_assert_ne!(base, digest_of(CONTRACT, chain_id + 1, CLAIM, WITHDRAW, &pairs));
            }

            #[test]
            fn mismatch_never_digests(pairs in validators(1, 4), drop_pubkey in any::<bool>()) {
                let (mut pubkeys, mut signatures): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
                if drop_pubkey {
                    pubkeys.pop();
                } else {
                    signatures.pop();
                }
                let result = compute_digest(U256::ZERO, CONTRACT, 1, CLAIM, WITHDRAW, &pubkeys, &signatures);
                let is_mismatch = matches!(result, Err(Error::InputMismatch { .. }));
                prop_assert!(is_mismatch);
            }
        }
    }
}
