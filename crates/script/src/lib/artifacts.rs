use std::path::{Path, PathBuf};

use alloy_primitives::Bytes;
use thiserror::Error;

use crate::utils;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read artifact {path:?}: {source}")]
    Read { path: PathBuf, source: utils::Error },

    #[error("Artifact {0:?} has no creation bytecode")]
    MissingBytecode(PathBuf),

    #[error("Artifact {path:?} has malformed bytecode: {source}")]
    MalformedBytecode { path: PathBuf, source: hex::FromHexError },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractKind {
    DirectStaking,
    RewardPool,
    TransparentUpgradeableProxy,
}

impl ContractKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DirectStaking => "DirectStaking",
            Self::RewardPool => "RewardPool",
            Self::TransparentUpgradeableProxy => "TransparentUpgradeableProxy",
        }
    }
}

/// Locates compiled contract artifacts. Both Brownie (`<dir>/<Name>.json`) and
/// Foundry (`<dir>/<Name>.sol/<Name>.json`) layouts are supported.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, kind: ContractKind) -> PathBuf {
        let name = kind.name();
        let foundry = self.root.join(format!("{name}.sol")).join(format!("{name}.json"));
        if foundry.exists() {
            foundry
        } else {
            self.root.join(format!("{name}.json"))
        }
    }

    pub fn creation_bytecode(&self, kind: ContractKind) -> Result<Bytes, Error> {
        read_creation_bytecode(&self.path_for(kind))
    }
}

pub fn read_creation_bytecode(path: &Path) -> Result<Bytes, Error> {
    let artifact = utils::read_untyped_json(path).map_err(|source| Error::Read {
        path: path.to_owned(),
        source,
    })?;
    parse_creation_bytecode(path, &artifact)
}

fn parse_creation_bytecode(path: &Path, artifact: &serde_json::Value) -> Result<Bytes, Error> {
    let raw = match &artifact["bytecode"] {
        serde_json::Value::String(value) => value.as_str(),
        serde_json::Value::Object(value) => value
            .get("object")
            .and_then(|object| object.as_str())
            .ok_or_else(|| Error::MissingBytecode(path.to_owned()))?,
        _ => return Err(Error::MissingBytecode(path.to_owned())),
    };

    let trimmed = raw.strip_prefix("0x").unwrap_or(raw);
    if trimmed.is_empty() {
        return Err(Error::MissingBytecode(path.to_owned()));
    }
    let decoded = hex::decode(trimmed).map_err(|source| Error::MalformedBytecode {
        path: path.to_owned(),
        source,
    })?;
    Ok(decoded.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn artifact_path() -> PathBuf {
        PathBuf::from("build/contracts/DirectStaking.json")
    }

    #[test]
    fn brownie_layout() {
        let artifact = json!({"contractName": "DirectStaking", "bytecode": "600060005360016000f3"});
        let bytecode = parse_creation_bytecode(&artifact_path(), &artifact).expect("Failed to parse");
        assert_eq!(&bytecode[..], &hex_literal::hex!("600060005360016000f3"));
    }

    #[test]
    fn foundry_layout() {
        let artifact = json!({"bytecode": {"object": "0x6000", "linkReferences": {}}});
        let bytecode = parse_creation_bytecode(&artifact_path(), &artifact).expect("Failed to parse");
        assert_eq!(&bytecode[..], &[0x60, 0x00]);
    }

    #[test]
    fn missing_or_empty_bytecode() {
        let no_bytecode = json!({"abi": []});
        assert!(matches!(
            parse_creation_bytecode(&artifact_path(), &no_bytecode),
            Err(Error::MissingBytecode(_))
        ));

        let interface_only = json!({"bytecode": "0x"});
        assert!(matches!(
            parse_creation_bytecode(&artifact_path(), &interface_only),
            Err(Error::MissingBytecode(_))
        ));
    }

    #[test]
    fn unlinked_bytecode_rejected() {
        let artifact = json!({"bytecode": "6000__$lib$__6000"});
        assert!(matches!(
            parse_creation_bytecode(&artifact_path(), &artifact),
            Err(Error::MalformedBytecode { .. })
        ));
    }

    #[test]
    fn store_falls_back_to_flat_layout() {
        let store = ArtifactStore::new("/nonexistent/build/contracts");
        assert_eq!(
            store.path_for(ContractKind::RewardPool),
            PathBuf::from("/nonexistent/build/contracts/RewardPool.json")
        );
    }
}
