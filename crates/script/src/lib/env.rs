use std::env;
use std::fmt::Debug;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read env var {key}: {source}")]
    Missing { key: &'static str, source: env::VarError },

    #[error("Failed to parse env var {key}: {message}")]
    Parse { key: &'static str, message: String },
}

#[derive(Clone, Copy)]
pub struct EnvVarSpec {
    pub key: &'static str,
    pub sensitive: bool,
}

#[derive(Clone, Copy)]
pub struct EnvVarValue<TVal> {
    pub spec: &'static EnvVarSpec,
    pub value: TVal,
}

impl EnvVarSpec {
    fn parse<TVal>(&'static self, raw_value: &str) -> Result<TVal, Error>
    where
        TVal: FromStr,
        TVal::Err: Debug,
    {
        raw_value.parse().map_err(|e| {
            let message = if self.sensitive {
                "<redacted>".to_owned()
            } else {
                format!("{raw_value}: {e:?}")
            };
            Error::Parse { key: self.key, message }
        })
    }

    pub fn default<TVal>(&'static self, default: TVal) -> Result<EnvVarValue<TVal>, Error>
    where
        TVal: FromStr,
        TVal::Err: Debug,
    {
        let as_optional = self.optional()?;
        Ok(EnvVarValue {
            spec: as_optional.spec,
            value: as_optional.value.unwrap_or(default),
        })
    }

    pub fn optional<TVal>(&'static self) -> Result<EnvVarValue<Option<TVal>>, Error>
    where
        TVal: FromStr,
        TVal::Err: Debug,
    {
        let value = match env::var(self.key) {
            Ok(val) => Some(self.parse(&val)?),
            Err(e) => {
                tracing::debug!("Failed reading env var {}: {e:?}", self.key);
                None
            }
        };
        Ok(EnvVarValue { spec: self, value })
    }

    pub fn required<TVal>(&'static self) -> Result<EnvVarValue<TVal>, Error>
    where
        TVal: FromStr,
        TVal::Err: Debug,
    {
        let raw_value = env::var(self.key).map_err(|source| Error::Missing { key: self.key, source })?;
        let value = self.parse(&raw_value)?;
        Ok(EnvVarValue { spec: self, value })
    }

    pub fn is_set(&self) -> bool {
        env::var(self.key).is_ok()
    }
}

impl<TVal: Debug> Debug for EnvVarValue<TVal> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value_print = if self.spec.sensitive {
            "***".to_string()
        } else {
            format!("{:?}", self.value)
        };
        f.debug_struct("EnvVarValue")
            .field("name", &self.spec.key)
            .field("value", &value_print)
            .finish()
    }
}

pub const LOG_FORMAT: EnvVarSpec = EnvVarSpec {
    key: "LOG_FORMAT",
    sensitive: false,
};
pub const DRY_RUN: EnvVarSpec = EnvVarSpec {
    key: "DRY_RUN",
    sensitive: false,
};
pub const SKIP_PREFLIGHT_CALL: EnvVarSpec = EnvVarSpec {
    key: "SKIP_PREFLIGHT_CALL",
    sensitive: false,
};

pub const EVM_CHAIN: EnvVarSpec = EnvVarSpec {
    key: "EVM_CHAIN",
    sensitive: false,
};
pub const EXECUTION_LAYER_RPC: EnvVarSpec = EnvVarSpec {
    key: "EXECUTION_LAYER_RPC",
    sensitive: true,
};

pub const PRIVATE_KEY: EnvVarSpec = EnvVarSpec {
    key: "PRIVATE_KEY",
    sensitive: true,
};
pub const DEPLOYER_PRIVATE_KEY: EnvVarSpec = EnvVarSpec {
    key: "DEPLOYER_PRIVATE_KEY",
    sensitive: true,
};
pub const SIGNER_PRIVATE_KEY: EnvVarSpec = EnvVarSpec {
    key: "SIGNER_PRIVATE_KEY",
    sensitive: true,
};

pub const DIRECT_STAKING_ADDRESS: EnvVarSpec = EnvVarSpec {
    key: "DIRECT_STAKING_ADDRESS",
    sensitive: false,
};
pub const REWARD_POOL_ADDRESS: EnvVarSpec = EnvVarSpec {
    key: "REWARD_POOL_ADDRESS",
    sensitive: false,
};
pub const PROXY_ADMIN_ADDRESS: EnvVarSpec = EnvVarSpec {
    key: "PROXY_ADMIN_ADDRESS",
    sensitive: false,
};
pub const SIGNER_ADDRESS: EnvVarSpec = EnvVarSpec {
    key: "SIGNER_ADDRESS",
    sensitive: false,
};
pub const CONTRACTS_ARTIFACTS_DIR: EnvVarSpec = EnvVarSpec {
    key: "CONTRACTS_ARTIFACTS_DIR",
    sensitive: false,
};
