use std::path::{Path, PathBuf};

use alloy::primitives::{Address, Bytes, U256};
use direct_staking_shared::authorization::{self, StakeAuthorization};
use direct_staking_shared::digest::{self, StakeDigest};
use direct_staking_shared::stake_request::StakeRequest;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::NetworkInfo;
use crate::scripts::prelude::SigningRuntime;
use crate::signer::{AuthoritySigner, SigningError};
use crate::utils;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Request targets chain {actual}, network expects {expected}")]
    ChainIdMismatch { expected: u64, actual: u64 },

    #[error("Request targets contract {actual}, expected {expected}")]
    ContractMismatch { expected: Address, actual: Address },

    #[error("Stored digest {stored} does not match recomputed {computed}")]
    DigestMismatch { stored: StakeDigest, computed: StakeDigest },

    #[error("Invalid stake request: {0}")]
    Digest(#[from] digest::Error),

    #[error("Invalid authorization: {0}")]
    Authorization(#[from] authorization::Error),

    #[error(transparent)]
    Signing(#[from] SigningError),
}

/// A stake request together with the authority's signature over its digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedStakeManifest {
    pub network: String,
    pub request: StakeRequest,
    pub digest: StakeDigest,
    pub authorization: StakeAuthorization,
    pub signer: Address,
    pub tips: U256,
}

impl SignedStakeManifest {
    /// Re-derives the digest and checks chain, contract and signer.
    /// Without `expected_signer` the authorization is checked against the recorded signer.
    pub fn verify(
        &self,
        network: &impl NetworkInfo,
        expected_contract: Option<Address>,
        expected_signer: Option<Address>,
    ) -> Result<(), ManifestError> {
        let computed = check_request(&self.request, network, expected_contract)?;
        if computed != self.digest {
            return Err(ManifestError::DigestMismatch {
                stored: self.digest,
                computed,
            });
        }
        self.authorization
            .verify(&computed, expected_signer.unwrap_or(self.signer))?;
        Ok(())
    }

    pub fn stake_value(&self) -> U256 {
        self.request.stake_value(self.tips)
    }
}

/// Checks the request against the selected network and returns its digest.
pub fn check_request(
    request: &StakeRequest,
    network: &impl NetworkInfo,
    expected_contract: Option<Address>,
) -> Result<StakeDigest, ManifestError> {
    let expected_chain_id = network.get_config().chain_id;
    if request.chain_id != expected_chain_id {
        return Err(ManifestError::ChainIdMismatch {
            expected: expected_chain_id,
            actual: request.chain_id,
        });
    }
    if let Some(expected) = expected_contract {
        if request.contract_address != expected {
            return Err(ManifestError::ContractMismatch {
                expected,
                actual: request.contract_address,
            });
        }
    }
    Ok(request.digest()?)
}

pub fn sign_request(
    signer: &AuthoritySigner,
    network: &impl NetworkInfo,
    expected_contract: Option<Address>,
    request: StakeRequest,
    tips: U256,
) -> Result<SignedStakeManifest, ManifestError> {
    let digest = check_request(&request, network, expected_contract)?;
    let authorization = signer.sign_digest(&digest)?;
    tracing::info!(
        validators = request.validator_count(),
        %digest,
        signer = %signer.address(),
        "Authorized stake request"
    );
    Ok(SignedStakeManifest {
        network: network.as_str(),
        request,
        digest,
        authorization,
        signer: signer.address(),
        tips,
    })
}

pub enum RequestSource {
    File(PathBuf),
    Args {
        claim_address: Address,
        withdraw_address: Address,
        extra_data: U256,
        pubkeys: Vec<Bytes>,
        signatures: Vec<Bytes>,
    },
}

impl RequestSource {
    /// Contract address and chain id for argument-built requests come from the runtime.
    pub fn load(self, runtime: &SigningRuntime) -> anyhow::Result<StakeRequest> {
        match self {
            Self::File(path) => {
                tracing::info!("Reading stake request from {:?}", path.as_os_str());
                Ok(utils::read_json(&path)?)
            }
            Self::Args {
                claim_address,
                withdraw_address,
                extra_data,
                pubkeys,
                signatures,
            } => {
                let contract_address = runtime
                    .direct_staking_address
                    .ok_or_else(|| anyhow::anyhow!("DIRECT_STAKING_ADDRESS is required to build a request"))?;
                Ok(StakeRequest {
                    extra_data,
                    contract_address,
                    chain_id: runtime.network.get_config().chain_id,
                    claim_address,
                    withdraw_address,
                    pubkeys: pubkeys.into_iter().map(|pk| pk.to_vec()).collect(),
                    signatures: signatures.into_iter().map(|sig| sig.to_vec()).collect(),
                })
            }
        }
    }
}

pub fn run(
    runtime: &SigningRuntime,
    source: RequestSource,
    tips: U256,
    store: Option<&Path>,
) -> anyhow::Result<SignedStakeManifest> {
    let request = source.load(runtime)?;
    let manifest = sign_request(
        &runtime.signer,
        &runtime.network,
        runtime.direct_staking_address,
        request,
        tips,
    )?;

    if let Some(path) = store {
        tracing::info!("Writing signed manifest to {:?}", path.as_os_str());
        utils::write_json(path, &manifest)?;
    }
    Ok(manifest)
}
