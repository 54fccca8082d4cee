//! Integration configuration for Gatebridge
//!
//! This crate handles the user-supplied configuration block describing a
//! desired API gateway integration: the serde schema, file loading (YAML
//! or JSON), upfront validation, and resolution of which integration kind
//! the block requests.
//!
//! ## Resolution strategy
//!
//! Recognized integration kinds form an ordered registry
//! ([`IntegrationKind::ALL`]). A configuration must carry exactly one
//! variant block:
//! - none present is the non-fatal "unrecognized" outcome (callers warn
//!   and emit nothing)
//! - more than one present is rejected as ambiguous

mod loader;
mod resolve;
mod types;

pub use loader::ConfigFormat;
pub use resolve::{resolve_integration, IntegrationKind, ResolvedIntegration};
pub use types::{EventBridgeConfig, IntegrationConfig};
