//! Artifact discovery
//!
//! Walks a Foundry artifacts directory (`out/<File>.sol/<Contract>.json`)
//! and turns every selected artifact into a [`ContractDescriptor`]. The ABI
//! array is copied out as-is; nothing inside it is interpreted.

use crate::descriptor::{ContractDescriptor, DescriptorPayload};
use crate::error::{BindgenError, BindgenResult};
use crate::glob::PatternSet;
use crate::{log_debug, log_info, log_warn};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const MODULE: &str = "discovery";

/// Artifact path relative to the artifacts directory, `/`-separated
pub fn relative_artifact_path(root: &Path, path: &Path) -> BindgenResult<String> {
    let relative = path.strip_prefix(root).map_err(|e| {
        BindgenError::internal(format!("Artifact outside artifacts dir: {}", e))
            .with_details(path.display().to_string())
    })?;

    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}

/// Every `.json` file under `artifacts` selected by `patterns`, sorted
pub fn select_artifacts(artifacts: &Path, patterns: &PatternSet) -> BindgenResult<Vec<PathBuf>> {
    if !artifacts.is_dir() {
        return Err(BindgenError::artifact_not_found("Artifacts directory not found")
            .with_details(artifacts.display().to_string()));
    }

    let mut selected = Vec::new();
    for entry in WalkDir::new(artifacts).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        let relative = relative_artifact_path(artifacts, path)?;
        if patterns.is_selected(&relative) {
            selected.push(path.to_path_buf());
        }
    }

    Ok(selected)
}

/// Contract name from the artifact file stem (`IPoolV3.json` -> `IPoolV3`)
pub fn contract_name(path: &Path) -> BindgenResult<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            BindgenError::invalid_input("Cannot derive contract name from artifact path")
                .with_details(path.display().to_string())
        })
}

/// Read one artifact. `Ok(None)` means the artifact has an empty ABI.
pub fn read_artifact(path: &Path) -> BindgenResult<Option<ContractDescriptor>> {
    let raw = fs::read_to_string(path)
        .map_err(|e| BindgenError::from(e).with_details(path.display().to_string()))?;
    let mut artifact: Value = serde_json::from_str(&raw).map_err(|e| {
        BindgenError::parse_error(format!("Artifact is not valid JSON: {}", e))
            .with_details(path.display().to_string())
    })?;

    let abi = match artifact.get_mut("abi").map(Value::take) {
        Some(abi @ Value::Array(_)) => abi,
        Some(_) => {
            return Err(BindgenError::parse_error("Artifact `abi` is not an array")
                .with_details(path.display().to_string()));
        }
        None => {
            return Err(BindgenError::parse_error("Artifact has no `abi`")
                .with_details(path.display().to_string()));
        }
    };

    if abi.as_array().map_or(true, Vec::is_empty) {
        return Ok(None);
    }

    let source_path = artifact
        .pointer("/ast/absolutePath")
        .and_then(Value::as_str)
        .map(str::to_string);

    let payload = DescriptorPayload {
        abi,
        source_path,
        artifact_path: path.to_path_buf(),
    };

    ContractDescriptor::new(contract_name(path)?, payload).map(Some)
}

/// Discover descriptors for every selected artifact, in path order
pub fn discover(artifacts: &Path, patterns: &PatternSet) -> BindgenResult<Vec<ContractDescriptor>> {
    let paths = select_artifacts(artifacts, patterns)?;
    let mut descriptors = Vec::with_capacity(paths.len());

    for path in paths {
        match read_artifact(&path)? {
            Some(descriptor) => {
                log_debug!(MODULE, "Read artifact", name = descriptor.name, path = path.display());
                descriptors.push(descriptor);
            }
            None => {
                log_debug!(MODULE, "Skipped artifact with empty abi", path = path.display());
            }
        }
    }

    if descriptors.is_empty() {
        log_warn!(
            MODULE,
            "No contracts selected",
            artifacts = artifacts.display(),
            include = patterns.describe_include(),
        );
    }

    log_info!(
        MODULE,
        "Discovered contracts",
        artifacts = artifacts.display(),
        count = descriptors.len(),
    );

    Ok(descriptors)
}
