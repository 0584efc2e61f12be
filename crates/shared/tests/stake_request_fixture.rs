use std::path::PathBuf;

use alloy_primitives::{address, B256, U256};
use direct_staking_shared::authorization::StakeAuthorization;
use direct_staking_shared::digest::{self, compute_digest};
use direct_staking_shared::stake_request::StakeRequest;
use hex_literal::hex;

fn read_fixture(name: &str) -> StakeRequest {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data/fixtures")
        .join(name);
    let content = std::fs::read(path).expect("Failed to read fixture");
    serde_json::from_slice(&content).expect("Failed to parse fixture")
}

#[test]
fn fixture_digest_matches_reference() {
    let request = read_fixture("mainnet-stake-request.json");
    assert_eq!(request.validator_count(), 2);
    assert_eq!(request.chain_id, 1);
    assert_eq!(
        request.contract_address,
        address!("3194cbdc3dbcd3e11a07892e7ba5c3394048cc87")
    );

    let digest = request.digest().expect("Failed to compute digest");
    assert_eq!(
        digest.0,
        B256::from(hex!("e2ffa0159393b8693c992da6d53c6e9e677dc423c015e9d7d2f8c3651f92b926"))
    );
}

#[test]
fn fixture_authorization_recovers_registered_signer() {
    let request = read_fixture("mainnet-stake-request.json");
    let digest = request.digest().expect("Failed to compute digest");
    let authorization = StakeAuthorization::from_slice(&hex!(
        "e5bec9513a32808429a37d2dd2d7ba74139ab6f98e820e1346fe416028623bca"
        "6471594d8969d52ec0b41e7dba6a831fcb862a4ea57d8652117ec8aec76f3d72"
        "1b"
    ))
    .expect("Failed to parse authorization");

    authorization
        .verify(&digest, address!("2c4594b11baad822b5be6a65348779bb97473682"))
        .expect("Authorization should verify");
}

#[test]
fn truncated_batch_is_rejected() {
    let mut request = read_fixture("mainnet-stake-request.json");
    request.signatures.pop();
    assert_eq!(
        request.digest(),
        Err(digest::Error::InputMismatch {
            pubkeys: 2,
            signatures: 1
        })
    );
}

#[test]
fn single_entry_prefix_differs_from_full_batch() {
    let request = read_fixture("mainnet-stake-request.json");
    let prefix = compute_digest(
        U256::ZERO,
        request.contract_address,
        request.chain_id,
        request.claim_address,
        request.withdraw_address,
        &request.pubkeys[..1],
        &request.signatures[..1],
    )
    .expect("Failed to compute digest");

    assert_eq!(
        prefix.0,
        B256::from(hex!("51f33295ccefe30f77dffd951e8c42184479608878b8184ce30b2032e800a93e"))
    );
    assert_ne!(Some(prefix), request.digest().ok());
}
