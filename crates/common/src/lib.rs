//! Common types and utilities for Gatebridge
//!
//! This crate contains the shared error type, CloudFormation intrinsic
//! value types, and the deployment template structure used across the
//! config, synthesizer, and CLI components.

pub mod intrinsics;
pub mod template;

pub use intrinsics::{CfnValue, GetAtt, Join, Ref};
pub use template::{MergePolicy, Template};

use thiserror::Error;

/// Errors that can occur during integration synthesis
#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("No integration type recognised, expecting one of [{supported}]")]
    UnrecognizedIntegration { supported: String },

    #[error("Ambiguous configuration: multiple integration blocks present [{present}]")]
    AmbiguousIntegration { present: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Merge conflict: template already defines [{conflicts}]")]
    MergeConflict { conflicts: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for synthesis operations
pub type Result<T> = std::result::Result<T, SynthesisError>;

impl SynthesisError {
    /// Whether this error is the non-fatal "no recognized integration"
    /// outcome: callers warn and emit no resources, the build continues.
    pub fn is_soft(&self) -> bool {
        matches!(self, SynthesisError::UnrecognizedIntegration { .. })
    }
}
