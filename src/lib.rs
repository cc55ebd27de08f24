//! contract-bindgen
//!
//! Generates TypeScript ABI bindings from Foundry contract artifacts.
//!
//! # Architecture
//!
//! This crate provides:
//! - **config**: output targets with include/exclude artifact patterns
//! - **discovery**: artifact directory walk producing contract descriptors
//! - **naming**: the rename pass (strip a substring, append a suffix)
//! - **emitter**: TypeScript rendering and output writing
//! - **generate**: the per-target pipeline tying the above together
//!
//! # Example
//!
//! ```rust,ignore
//! use contract_bindgen::{rename, NamingRule};
//!
//! let renamed = rename(descriptors, &NamingRule::default())?;
//! assert_eq!(renamed[0].name, "IPoolV310");
//! ```

pub mod utils;
pub mod error;
pub mod descriptor;
pub mod naming;
pub mod glob;
pub mod config;
pub mod discovery;
pub mod emitter;
pub mod generate;

// Re-export key types for convenience
pub use error::{BindgenError, BindgenResult, ErrorCode};
pub use descriptor::{ContractDescriptor, DescriptorPayload};
pub use naming::{rename, NamingRule, DEFAULT_SUFFIX, DEFAULT_TRIM};
pub use config::{BindgenConfig, TargetConfig, DEFAULT_CONFIG_FILE};
pub use generate::{generate, GenerateOptions, GenerateReport, TargetReport};
