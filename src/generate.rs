//! Generation pipeline: discover -> rename -> emit, per target

use crate::config::{BindgenConfig, TargetConfig};
use crate::descriptor::ContractDescriptor;
use crate::discovery;
use crate::emitter;
use crate::error::BindgenResult;
use crate::log_info;
use crate::naming;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const MODULE: &str = "generate";

/// Generation options
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Render but do not write output files
    pub dry_run: bool,
}

/// Outcome for one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetReport {
    pub out: PathBuf,
    pub contracts: Vec<String>,
    pub written: bool,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateReport {
    pub targets: Vec<TargetReport>,
}

impl GenerateReport {
    pub fn contract_count(&self) -> usize {
        self.targets.iter().map(|t| t.contracts.len()).sum()
    }
}

/// Discover a target's contracts and apply its rename rule
pub fn collect(target: &TargetConfig) -> BindgenResult<Vec<ContractDescriptor>> {
    let patterns = target.patterns()?;
    let descriptors = discovery::discover(&target.artifacts, &patterns)?;

    match &target.rename {
        Some(rule) => naming::rename(descriptors, rule),
        None => Ok(descriptors),
    }
}

/// Run one target
pub fn generate_target(target: &TargetConfig, options: GenerateOptions) -> BindgenResult<TargetReport> {
    let descriptors = collect(target)?;
    let source = emitter::render(&descriptors)?;

    if !options.dry_run {
        emitter::write_bindings(&target.out, &source)?;
    }

    log_info!(
        MODULE,
        if options.dry_run { "Rendered target" } else { "Generated target" },
        out = target.out.display(),
        contracts = descriptors.len(),
    );

    Ok(TargetReport {
        out: target.out.clone(),
        contracts: descriptors.into_iter().map(|d| d.name).collect(),
        written: !options.dry_run,
    })
}

/// Run every target in config order, stopping at the first failure
pub fn generate(config: &BindgenConfig, options: GenerateOptions) -> BindgenResult<GenerateReport> {
    let targets = config
        .targets
        .iter()
        .map(|target| generate_target(target, options))
        .collect::<BindgenResult<Vec<_>>>()?;

    Ok(GenerateReport { targets })
}
