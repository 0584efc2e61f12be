use crate::artifacts::ArtifactStore;
use crate::consts::{self, NetworkInfo, WrappedNetwork};
use crate::env::{self, EnvVarValue};
use crate::eth_client::{
    DefaultProvider, DirectStakingContract, DirectStakingContractWrapper, ProviderFactory, ProxyAdminContract,
    ProxyAdminWrapper, RewardPoolContract, RewardPoolContractWrapper,
};
use crate::signer::{AuthoritySigner, KeyError};

use alloy::primitives::Address;
use alloy::transports::http::reqwest::Url;

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

const DEFAULT_DRY_RUN: bool = true; // Fail close

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read env var: {0}")]
    Env(#[from] env::Error),

    #[error("Failed to read network from env var: {0:?}")]
    FailedToParseNetwork(#[from] consts::NetworkParseError),

    #[error("Failed to decode private key: {0}")]
    Key(#[from] KeyError),

    #[error("Setting {0} is required for this operation")]
    MissingSetting(&'static str),
}

#[derive(Debug)]
pub struct EnvVars {
    pub evm_chain: EnvVarValue<String>,
    pub execution_layer_rpc: EnvVarValue<Url>,
    pub private_key: EnvVarValue<String>,
    pub deployer_private_key: EnvVarValue<Option<String>>,
    pub direct_staking_address: EnvVarValue<Option<Address>>,
    pub reward_pool_address: EnvVarValue<Option<Address>>,
    pub proxy_admin_address: EnvVarValue<Option<Address>>,
    pub signer_address: EnvVarValue<Option<Address>>,
    pub artifacts_dir: EnvVarValue<Option<PathBuf>>,
    pub dry_run: EnvVarValue<Option<bool>>,
}

impl EnvVars {
    /// Required settings only. Every optional setting starts unset.
    pub fn new(evm_chain: String, execution_layer_rpc: Url, private_key: String) -> Self {
        Self {
            evm_chain: EnvVarValue {
                spec: &env::EVM_CHAIN,
                value: evm_chain,
            },
            execution_layer_rpc: EnvVarValue {
                spec: &env::EXECUTION_LAYER_RPC,
                value: execution_layer_rpc,
            },
            private_key: EnvVarValue {
                spec: &env::PRIVATE_KEY,
                value: private_key,
            },
            deployer_private_key: EnvVarValue {
                spec: &env::DEPLOYER_PRIVATE_KEY,
                value: None,
            },
            direct_staking_address: EnvVarValue {
                spec: &env::DIRECT_STAKING_ADDRESS,
                value: None,
            },
            reward_pool_address: EnvVarValue {
                spec: &env::REWARD_POOL_ADDRESS,
                value: None,
            },
            proxy_admin_address: EnvVarValue {
                spec: &env::PROXY_ADMIN_ADDRESS,
                value: None,
            },
            signer_address: EnvVarValue {
                spec: &env::SIGNER_ADDRESS,
                value: None,
            },
            artifacts_dir: EnvVarValue {
                spec: &env::CONTRACTS_ARTIFACTS_DIR,
                value: None,
            },
            dry_run: EnvVarValue {
                spec: &env::DRY_RUN,
                value: None,
            },
        }
    }

    pub fn init_from_env() -> Result<Self, Error> {
        Ok(Self {
            evm_chain: env::EVM_CHAIN.required()?,
            execution_layer_rpc: env::EXECUTION_LAYER_RPC.required()?,
            private_key: env::PRIVATE_KEY.required()?,
            deployer_private_key: env::DEPLOYER_PRIVATE_KEY.optional()?,
            direct_staking_address: env::DIRECT_STAKING_ADDRESS.optional()?,
            reward_pool_address: env::REWARD_POOL_ADDRESS.optional()?,
            proxy_admin_address: env::PROXY_ADMIN_ADDRESS.optional()?,
            signer_address: env::SIGNER_ADDRESS.optional()?,
            artifacts_dir: env::CONTRACTS_ARTIFACTS_DIR.optional()?,
            dry_run: env::DRY_RUN.optional()?,
        })
    }
}

pub struct ScriptRuntime {
    pub network: WrappedNetwork,
    pub provider: Arc<DefaultProvider>,
    pub deployer_provider: Arc<DefaultProvider>,
    direct_staking: Option<DirectStakingContract>,
    reward_pool: Option<RewardPoolContract>,
    proxy_admin: Option<ProxyAdminContract>,
    pub env_vars: EnvVars,
}

impl ScriptRuntime {
    pub fn init(env_vars: EnvVars) -> Result<Self, Error> {
        let network = env_vars.evm_chain.value.parse::<WrappedNetwork>()?;
        let endpoint = env_vars.execution_layer_rpc.value.clone();

        let provider = Arc::new(ProviderFactory::create_provider_decode_key(
            &env_vars.private_key.value,
            endpoint.clone(),
        )?);
        let deployer_provider = match &env_vars.deployer_private_key.value {
            Some(key) => Arc::new(ProviderFactory::create_provider_decode_key(key, endpoint)?),
            None => Arc::clone(&provider),
        };

        let direct_staking = env_vars
            .direct_staking_address
            .value
            .map(|address| DirectStakingContractWrapper::new(Arc::clone(&provider), address));
        let reward_pool = env_vars
            .reward_pool_address
            .value
            .map(|address| RewardPoolContractWrapper::new(Arc::clone(&provider), address));
        let proxy_admin = env_vars
            .proxy_admin_address
            .value
            .map(|address| ProxyAdminWrapper::new(Arc::clone(&provider), address));

        tracing::debug!(network = network.as_str(), "Initialized script runtime {:?}", env_vars);

        Ok(Self {
            network,
            provider,
            deployer_provider,
            direct_staking,
            reward_pool,
            proxy_admin,
            env_vars,
        })
    }

    pub fn init_from_env() -> Result<Self, Error> {
        Self::init(EnvVars::init_from_env()?)
    }

    pub fn network(&self) -> &impl NetworkInfo {
        &self.network
    }

    pub fn direct_staking(&self) -> Result<&DirectStakingContract, Error> {
        self.direct_staking
            .as_ref()
            .ok_or(Error::MissingSetting(env::DIRECT_STAKING_ADDRESS.key))
    }

    pub fn reward_pool(&self) -> Result<&RewardPoolContract, Error> {
        self.reward_pool
            .as_ref()
            .ok_or(Error::MissingSetting(env::REWARD_POOL_ADDRESS.key))
    }

    pub fn proxy_admin(&self) -> Result<&ProxyAdminContract, Error> {
        self.proxy_admin
            .as_ref()
            .ok_or(Error::MissingSetting(env::PROXY_ADMIN_ADDRESS.key))
    }

    pub fn proxy_admin_address(&self) -> Result<Address, Error> {
        self.env_vars
            .proxy_admin_address
            .value
            .ok_or(Error::MissingSetting(env::PROXY_ADMIN_ADDRESS.key))
    }

    pub fn artifact_store(&self) -> Result<ArtifactStore, Error> {
        self.env_vars
            .artifacts_dir
            .value
            .as_ref()
            .map(ArtifactStore::new)
            .ok_or(Error::MissingSetting(env::CONTRACTS_ARTIFACTS_DIR.key))
    }

    pub fn expected_signer(&self) -> Option<Address> {
        self.env_vars.signer_address.value
    }

    pub fn is_dry_run(&self) -> bool {
        self.env_vars.dry_run.value.unwrap_or(DEFAULT_DRY_RUN)
    }
}

/// Offline context for producing stake authorizations. Needs no RPC access.
pub struct SigningRuntime {
    pub network: WrappedNetwork,
    pub signer: AuthoritySigner,
    pub direct_staking_address: Option<Address>,
}

impl SigningRuntime {
    pub fn init_from_env() -> Result<Self, Error> {
        let evm_chain: EnvVarValue<String> = env::EVM_CHAIN.required()?;
        let signer_key: EnvVarValue<String> = env::SIGNER_PRIVATE_KEY.required()?;
        let direct_staking_address: EnvVarValue<Option<Address>> = env::DIRECT_STAKING_ADDRESS.optional()?;

        let network = evm_chain.value.parse::<WrappedNetwork>()?;
        let signer = AuthoritySigner::from_hex(&signer_key.value)?;
        tracing::debug!(network = network.as_str(), signer = %signer.address(), "Initialized signing runtime");

        Ok(Self {
            network,
            signer,
            direct_staking_address: direct_staking_address.value,
        })
    }
}
