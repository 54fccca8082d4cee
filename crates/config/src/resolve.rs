//! Integration kind resolution

use crate::types::{EventBridgeConfig, IntegrationConfig};
use gatebridge_common::{Result, SynthesisError};
use std::fmt;

/// A recognized integration kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationKind {
    /// Request proxying onto an event bus
    EventBridge,
}

impl IntegrationKind {
    /// Ordered registry of recognized kinds
    pub const ALL: &'static [IntegrationKind] = &[IntegrationKind::EventBridge];

    /// Configuration key naming this kind's variant block
    pub fn config_key(&self) -> &'static str {
        match self {
            IntegrationKind::EventBridge => "eventBridge",
        }
    }

    /// Comma-joined list of recognized config keys, for diagnostics
    pub fn supported_keys() -> String {
        Self::ALL
            .iter()
            .map(IntegrationKind::config_key)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for IntegrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.config_key())
    }
}

/// An integration variant resolved from a configuration, borrowing its
/// kind-specific block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedIntegration<'a> {
    EventBridge(&'a EventBridgeConfig),
}

impl ResolvedIntegration<'_> {
    pub fn kind(&self) -> IntegrationKind {
        match self {
            ResolvedIntegration::EventBridge(_) => IntegrationKind::EventBridge,
        }
    }
}

/// Determine which integration variant a configuration requests.
///
/// Exactly one variant block must be present: zero is the soft
/// "unrecognized" outcome, more than one is an ambiguity error rather
/// than first-match-wins.
pub fn resolve_integration(config: &IntegrationConfig) -> Result<ResolvedIntegration<'_>> {
    let mut present = Vec::new();
    if let Some(event_bridge) = &config.event_bridge {
        present.push(ResolvedIntegration::EventBridge(event_bridge));
    }

    match present.len() {
        0 => Err(SynthesisError::UnrecognizedIntegration {
            supported: IntegrationKind::supported_keys(),
        }),
        1 => Ok(present.remove(0)),
        _ => Err(SynthesisError::AmbiguousIntegration {
            present: present
                .iter()
                .map(|r| r.kind().config_key())
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(event_bridge: Option<EventBridgeConfig>) -> IntegrationConfig {
        IntegrationConfig {
            prefix: "Ord".to_string(),
            domain: "api.example.com".to_string(),
            path: "orders".to_string(),
            title: "Orders API".to_string(),
            event_bridge,
        }
    }

    #[test]
    fn test_event_bridge_block_resolves() {
        let config = config(Some(EventBridgeConfig {
            source_name: "svc.orders".to_string(),
            bus_name: "orders-bus".to_string(),
        }));

        let resolved = resolve_integration(&config).unwrap();
        assert_eq!(resolved.kind(), IntegrationKind::EventBridge);
        match resolved {
            ResolvedIntegration::EventBridge(block) => {
                assert_eq!(block.bus_name, "orders-bus");
            }
        }
    }

    #[test]
    fn test_no_variant_block_is_unrecognized() {
        let err = resolve_integration(&config(None)).unwrap_err();
        assert!(err.is_soft());
        assert!(err.to_string().contains("eventBridge"));
    }

    #[test]
    fn test_supported_keys_listing() {
        assert_eq!(IntegrationKind::supported_keys(), "eventBridge");
    }
}
