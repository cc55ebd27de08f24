//! Unified error types for contract-bindgen
//!
//! Every fallible operation in the crate returns a `BindgenResult`, so the
//! CLI can report a stable error code alongside the message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for all bindgen operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindgenError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl BindgenError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, msg)
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, msg)
    }

    pub fn pattern_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::PatternError, msg)
    }

    pub fn artifact_not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ArtifactNotFound, msg)
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParseError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::IoError, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, msg)
    }
}

impl fmt::Display for BindgenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for BindgenError {}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Input errors
    InvalidInput,
    ConfigError,
    PatternError,

    // Artifact errors
    ArtifactNotFound,
    ParseError,
    JsonError,

    // Filesystem
    IoError,

    // Internal
    Internal,
}

/// Result type alias for bindgen operations
pub type BindgenResult<T> = Result<T, BindgenError>;

// Conversions from common error types

impl From<serde_json::Error> for BindgenError {
    fn from(e: serde_json::Error) -> Self {
        BindgenError::new(ErrorCode::JsonError, e.to_string())
    }
}

impl From<std::io::Error> for BindgenError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            BindgenError::new(ErrorCode::ArtifactNotFound, e.to_string())
        } else {
            BindgenError::new(ErrorCode::IoError, e.to_string())
        }
    }
}

impl From<walkdir::Error> for BindgenError {
    fn from(e: walkdir::Error) -> Self {
        let path = e.path().map(|p| p.display().to_string());
        let err = BindgenError::new(ErrorCode::IoError, format!("Directory walk failed: {}", e));
        match path {
            Some(p) => err.with_details(p),
            None => err,
        }
    }
}

impl From<crate::glob::GlobError> for BindgenError {
    fn from(e: crate::glob::GlobError) -> Self {
        BindgenError::pattern_error(e.to_string())
    }
}
