//! Integration configuration schema

use gatebridge_common::{Result, SynthesisError};
use serde::{Deserialize, Serialize};

/// User-supplied description of a desired API gateway integration
///
/// Wire field names are camelCase. Unknown keys are ignored so that a
/// config requesting an unsupported integration kind degrades to the
/// soft "unrecognized" path instead of a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationConfig {
    /// Naming prefix shared by every generated logical resource name
    pub prefix: String,

    /// Custom domain name the API is mapped under
    pub domain: String,

    /// URL path segment for the domain mapping
    pub path: String,

    /// Title of the emitted OpenAPI document
    pub title: String,

    /// Event-bus variant block
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_bridge: Option<EventBridgeConfig>,
}

/// Parameters of the event-bus integration variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBridgeConfig {
    /// Event source recorded on submitted events
    pub source_name: String,

    /// Name of the target event bus
    pub bus_name: String,
}

impl IntegrationConfig {
    /// Validate the whole configuration upfront.
    ///
    /// Synthesis calls this before building anything, so an invalid
    /// config fails atomically with no fragments produced. The prefix
    /// must be usable as a logical-name fragment (ASCII alphanumeric,
    /// starting with a letter); every other required field must be
    /// non-empty.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_prefix(&self.prefix) {
            return Err(SynthesisError::InvalidConfig(format!(
                "prefix '{}' must be ASCII alphanumeric and start with a letter",
                self.prefix
            )));
        }
        require_non_empty("domain", &self.domain)?;
        require_non_empty("path", &self.path)?;
        require_non_empty("title", &self.title)?;

        if let Some(event_bridge) = &self.event_bridge {
            require_non_empty("eventBridge.sourceName", &event_bridge.source_name)?;
            require_non_empty("eventBridge.busName", &event_bridge.bus_name)?;
        }

        Ok(())
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SynthesisError::InvalidConfig(format!(
            "missing required field '{}'",
            field
        )));
    }
    Ok(())
}

/// Logical names are alphanumeric, so the prefix has to be too
fn is_valid_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric())
}
