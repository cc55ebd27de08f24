//! Contract renaming
//!
//! Rewrites contract names to a target naming convention before emission:
//! every occurrence of `trim` is removed, then `suffix` is appended once.
//! With the defaults, `ICreditManagerV3` becomes `ICreditManagerV310`.

use crate::descriptor::ContractDescriptor;
use crate::error::{BindgenError, BindgenResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TRIM: &str = "V3";
pub const DEFAULT_SUFFIX: &str = "V310";

/// Substring to strip and suffix to append
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingRule {
    pub trim: String,
    pub suffix: String,
}

impl Default for NamingRule {
    fn default() -> Self {
        Self {
            trim: DEFAULT_TRIM.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

impl NamingRule {
    pub fn new(trim: impl Into<String>, suffix: impl Into<String>) -> BindgenResult<Self> {
        let rule = Self {
            trim: trim.into(),
            suffix: suffix.into(),
        };
        rule.validate()?;
        Ok(rule)
    }

    /// An empty `trim` matches at every position, which has no sensible meaning.
    pub fn validate(&self) -> BindgenResult<()> {
        if self.trim.is_empty() {
            return Err(BindgenError::invalid_input("Rename trim must not be empty"));
        }
        Ok(())
    }

    /// Transform a single name
    pub fn apply(&self, name: &str) -> BindgenResult<String> {
        self.validate()?;
        if name.is_empty() {
            return Err(BindgenError::invalid_input("Contract name is empty"));
        }

        let mut renamed = name.replace(&self.trim, "");
        renamed.push_str(&self.suffix);
        Ok(renamed)
    }
}

/// Rename every descriptor, keeping order, length and payloads.
///
/// Payloads are moved into the output untouched. The first bad name aborts
/// the whole pass.
pub fn rename(
    descriptors: Vec<ContractDescriptor>,
    rule: &NamingRule,
) -> BindgenResult<Vec<ContractDescriptor>> {
    rule.validate()?;

    descriptors
        .into_iter()
        .map(|descriptor| {
            let name = rule.apply(&descriptor.name).map_err(|e| {
                e.with_details(descriptor.payload.artifact_path.display().to_string())
            })?;
            Ok(ContractDescriptor {
                name,
                payload: descriptor.payload,
            })
        })
        .collect()
}
