//! TypeScript binding emitter
//!
//! Renders one `export const <name>Abi = [...]` declaration per
//! descriptor, each under a banner naming the contract.

use crate::descriptor::ContractDescriptor;
use crate::error::{BindgenError, BindgenResult};
use crate::log_debug;
use convert_case::{Case, Casing};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const MODULE: &str = "emitter";
const BANNER_WIDTH: usize = 166;

/// Export identifier for a contract (`IPoolV310` -> `iPoolV310Abi`)
pub fn export_name(contract: &str) -> String {
    format!("{}Abi", contract.to_case(Case::Camel))
}

/// Render all descriptors into one TypeScript source
pub fn render(descriptors: &[ContractDescriptor]) -> BindgenResult<String> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    let banner = "/".repeat(BANNER_WIDTH);
    let mut out = String::new();

    for descriptor in descriptors {
        if descriptor.name.is_empty() {
            return Err(BindgenError::invalid_input("Contract name is empty")
                .with_details(descriptor.payload.artifact_path.display().to_string()));
        }

        let export = export_name(&descriptor.name);
        if let Some(previous) = seen.insert(export.clone(), &descriptor.name) {
            return Err(BindgenError::invalid_input(format!(
                "Duplicate export `{}` for contracts {} and {}",
                export, previous, descriptor.name
            )));
        }

        let abi = serde_json::to_string_pretty(&descriptor.payload.abi)?;

        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&banner);
        out.push_str("\n// ");
        out.push_str(&descriptor.name);
        out.push('\n');
        out.push_str(&banner);
        out.push_str("\n\n");
        out.push_str(&format!("export const {} = {}\n", export, abi));
    }

    Ok(out)
}

/// Write rendered bindings, creating parent directories
pub fn write_bindings(out: &Path, source: &str) -> BindgenResult<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            BindgenError::io_error(format!("Cannot create output directory: {}", e))
                .with_details(parent.display().to_string())
        })?;
    }

    fs::write(out, source).map_err(|e| {
        BindgenError::io_error(format!("Cannot write bindings: {}", e))
            .with_details(out.display().to_string())
    })?;

    log_debug!(MODULE, "Wrote bindings", out = out.display(), bytes = source.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DescriptorPayload;
    use crate::error::ErrorCode;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::path::PathBuf;

    fn descriptor(name: &str, abi: serde_json::Value) -> ContractDescriptor {
        ContractDescriptor {
            name: name.to_string(),
            payload: DescriptorPayload {
                abi,
                source_path: None,
                artifact_path: PathBuf::from(format!("out/{0}.sol/{0}.json", name)),
            },
        }
    }

    #[test]
    fn test_export_name() {
        assert_eq!(export_name("IPriceFeedCompressor"), "iPriceFeedCompressorAbi");
        assert_eq!(export_name("IPoolV310"), "iPoolV310Abi");
        assert_eq!(export_name("ICreditFacadeV3Multicall"), "iCreditFacadeV3MulticallAbi");
    }

    #[test]
    fn test_render_single() {
        let abi = json!([{
            "type": "function",
            "inputs": [],
            "name": "version",
            "outputs": [{"name": "", "internalType": "uint256", "type": "uint256"}],
            "stateMutability": "view"
        }]);
        let source = render(&[descriptor("IPoolV310", abi)]).unwrap();

        let banner = "/".repeat(166);
        let expected = format!(
            "{b}\n// IPoolV310\n{b}\n\nexport const iPoolV310Abi = [\n  {{\n    \"type\": \"function\",\n    \"inputs\": [],\n    \"name\": \"version\",\n    \"outputs\": [\n      {{\n        \"name\": \"\",\n        \"internalType\": \"uint256\",\n        \"type\": \"uint256\"\n      }}\n    ],\n    \"stateMutability\": \"view\"\n  }}\n]\n",
            b = banner
        );
        assert_eq!(source, expected);
    }

    #[test]
    fn test_render_multiple_separated() {
        let source = render(&[
            descriptor("IGaugeV310", json!([{"type": "fallback"}])),
            descriptor("IPoolV310", json!([{"type": "receive"}])),
        ])
        .unwrap();

        let gauge = source.find("export const iGaugeV310Abi").unwrap();
        let pool = source.find("export const iPoolV310Abi").unwrap();
        assert!(gauge < pool);
        assert!(source.contains("]\n\n////"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[]).unwrap(), "");
    }

    #[test]
    fn test_duplicate_exports_rejected() {
        let err = render(&[
            descriptor("IPoolV310", json!([{"type": "fallback"}])),
            descriptor("IPoolV310", json!([{"type": "fallback"}])),
        ])
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_write_bindings_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("src/generated/v310.generated.ts");

        write_bindings(&out, "export {}\n").unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "export {}\n");
    }
}
