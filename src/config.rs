//! Bindgen configuration
//!
//! A config file is JSON holding either a single target or an array of
//! targets:
//!
//! ```json
//! [
//!   {
//!     "out": "./v310.generated.ts",
//!     "artifacts": "out",
//!     "include": ["IPoolV3.sol/IPoolV3.json"],
//!     "exclude": ["base/IAddressProvider.sol/IAddressProvider.json"],
//!     "rename": { "trim": "V3", "suffix": "V310" }
//!   }
//! ]
//! ```

use crate::error::{BindgenError, BindgenResult, ErrorCode};
use crate::glob::PatternSet;
use crate::naming::NamingRule;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "bindgen.json";
pub const DEFAULT_ARTIFACTS_DIR: &str = "out";

/// Selects every artifact when a target lists no include patterns
pub const DEFAULT_INCLUDE: &[&str] = &["**/*.json"];

/// forge-std, scripts and tests; always excluded
pub const DEFAULT_EXCLUDE: &[&str] = &[
    "Common.sol/**",
    "Components.sol/**",
    "Script.sol/**",
    "StdAssertions.sol/**",
    "StdInvariant.sol/**",
    "StdError.sol/**",
    "StdCheats.sol/**",
    "StdMath.sol/**",
    "StdJson.sol/**",
    "StdStorage.sol/**",
    "StdUtils.sol/**",
    "Vm.sol/**",
    "console.sol/**",
    "console2.sol/**",
    "test.sol/**",
    "**/*.s.sol/*.json",
    "**/*.t.sol/*.json",
];

/// One output file and the artifacts that go into it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Output file
    pub out: PathBuf,
    /// Artifacts directory
    #[serde(default = "default_artifacts")]
    pub artifacts: PathBuf,
    #[serde(default)]
    pub include: Vec<String>,
    /// Added to [`DEFAULT_EXCLUDE`]
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Applied to every discovered contract name when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rename: Option<NamingRule>,
}

fn default_artifacts() -> PathBuf {
    PathBuf::from(DEFAULT_ARTIFACTS_DIR)
}

impl TargetConfig {
    pub fn new(out: impl Into<PathBuf>) -> Self {
        Self {
            out: out.into(),
            artifacts: default_artifacts(),
            include: Vec::new(),
            exclude: Vec::new(),
            rename: None,
        }
    }

    /// Effective include/exclude patterns, defaults applied
    pub fn patterns(&self) -> BindgenResult<PatternSet> {
        let include: Vec<&str> = if self.include.is_empty() {
            DEFAULT_INCLUDE.to_vec()
        } else {
            self.include.iter().map(String::as_str).collect()
        };
        let exclude = DEFAULT_EXCLUDE
            .iter()
            .copied()
            .chain(self.exclude.iter().map(String::as_str));

        PatternSet::new(include, exclude).map_err(|e| {
            BindgenError::from(e).with_details(self.out.display().to_string())
        })
    }

    fn validate(&self) -> BindgenResult<()> {
        if self.out.as_os_str().is_empty() {
            return Err(BindgenError::config_error("Target `out` must not be empty"));
        }
        if let Some(rule) = &self.rename {
            rule.validate()
                .map_err(|e| e.with_details(self.out.display().to_string()))?;
        }
        Ok(())
    }

    fn resolve(mut self, root: &Path) -> Self {
        self.out = root.join(&self.out);
        self.artifacts = root.join(&self.artifacts);
        self
    }
}

fn parse_target(value: Value, index: usize) -> BindgenResult<TargetConfig> {
    serde_json::from_value(value).map_err(|e| {
        BindgenError::config_error(format!("Invalid target #{}: {}", index, e))
    })
}

/// Loaded and resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindgenConfig {
    pub targets: Vec<TargetConfig>,
}

impl BindgenConfig {
    /// Parse config JSON; relative paths resolve against `root`
    pub fn from_json(json: &str, root: &Path) -> BindgenResult<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| {
            BindgenError::config_error(format!("Invalid config: {}", e))
        })?;

        // A config is one target object or an array of them
        let targets = match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| parse_target(item, index))
                .collect::<BindgenResult<Vec<_>>>()?,
            other => vec![parse_target(other, 0)?],
        };

        Self::from_targets(targets, root)
    }

    pub fn from_targets(targets: Vec<TargetConfig>, root: &Path) -> BindgenResult<Self> {
        if targets.is_empty() {
            return Err(BindgenError::config_error("Config has no targets"));
        }
        for target in &targets {
            target.validate()?;
        }

        Ok(Self {
            targets: targets.into_iter().map(|t| t.resolve(root)).collect(),
        })
    }

    /// Load a config file. Without an explicit `root`, paths resolve
    /// against the directory holding the file.
    pub fn load(path: &Path, root: Option<&Path>) -> BindgenResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            BindgenError::new(ErrorCode::ConfigError, format!("Cannot read config: {}", e))
                .with_details(path.display().to_string())
        })?;

        let root = match root {
            Some(r) => r.to_path_buf(),
            None => path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };

        Self::from_json(&json, &root).map_err(|e| {
            if e.details.is_none() {
                e.with_details(path.display().to_string())
            } else {
                e
            }
        })
    }
}
