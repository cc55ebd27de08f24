//! Contract descriptors produced by artifact discovery

use crate::error::{BindgenError, BindgenResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A contract name paired with everything else discovery knows about it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractDescriptor {
    /// Contract name, used for the banner and the export identifier
    pub name: String,
    /// Everything except the name; never inspected by the naming transform
    #[serde(flatten)]
    pub payload: DescriptorPayload,
}

/// Opaque remainder of a descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptorPayload {
    /// The artifact's `abi` array, key order preserved
    pub abi: serde_json::Value,
    /// Solidity source the contract was compiled from, when the artifact records it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
    /// Artifact file the descriptor was read from
    #[serde(default)]
    pub artifact_path: PathBuf,
}

impl ContractDescriptor {
    pub fn new(name: impl Into<String>, payload: DescriptorPayload) -> BindgenResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(BindgenError::invalid_input("Contract name is empty")
                .with_details(payload.artifact_path.display().to_string()));
        }
        Ok(Self { name, payload })
    }

    /// Build a descriptor from loosely typed JSON.
    ///
    /// `name` must be present and a non-empty string; anything else is
    /// `InvalidInput` so a malformed identifier never reaches the emitter.
    pub fn from_value(value: serde_json::Value) -> BindgenResult<Self> {
        match value.get("name") {
            Some(serde_json::Value::String(s)) if !s.is_empty() => {}
            Some(serde_json::Value::String(_)) => {
                return Err(BindgenError::invalid_input("Contract name is empty"));
            }
            Some(other) => {
                return Err(BindgenError::invalid_input("Contract name is not a string")
                    .with_details(other.to_string()));
            }
            None => return Err(BindgenError::invalid_input("Contract name is missing")),
        }

        serde_json::from_value(value)
            .map_err(|e| BindgenError::invalid_input(format!("Invalid descriptor: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_from_value() {
        let d = ContractDescriptor::from_value(json!({
            "name": "IPoolV3",
            "abi": [{"type": "function", "name": "asset", "inputs": []}],
            "sourcePath": "contracts/interfaces/IPoolV3.sol"
        }))
        .unwrap();

        assert_eq!(d.name, "IPoolV3");
        assert_eq!(d.payload.source_path.as_deref(), Some("contracts/interfaces/IPoolV3.sol"));
        assert_eq!(d.payload.abi[0]["name"], "asset");
        assert_eq!(d.payload.artifact_path, PathBuf::new());
    }

    #[test]
    fn test_from_value_rejects_bad_names() {
        let missing = ContractDescriptor::from_value(json!({"abi": []})).unwrap_err();
        assert_eq!(missing.code, ErrorCode::InvalidInput);

        let number = ContractDescriptor::from_value(json!({"name": 3, "abi": []})).unwrap_err();
        assert_eq!(number.code, ErrorCode::InvalidInput);

        let empty = ContractDescriptor::from_value(json!({"name": "", "abi": []})).unwrap_err();
        assert_eq!(empty.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_new_rejects_empty_name() {
        let payload = DescriptorPayload {
            abi: json!([]),
            source_path: None,
            artifact_path: PathBuf::from("out/X.sol/X.json"),
        };
        let err = ContractDescriptor::new("", payload).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.details.as_deref(), Some("out/X.sol/X.json"));
    }
}
