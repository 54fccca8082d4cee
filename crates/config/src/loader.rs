//! Configuration file loading

use crate::types::IntegrationConfig;
use gatebridge_common::Result;
use std::fs;
use std::path::Path;

/// On-disk format of a configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Detect the format from the file extension. YAML is the default:
    /// deployment configs are conventionally written in it.
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }
}

impl IntegrationConfig {
    /// Load an integration config from a YAML or JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        match ConfigFormat::detect(path.as_ref()) {
            ConfigFormat::Json => Self::from_json(&content),
            ConfigFormat::Yaml => Self::from_yaml(&content),
        }
    }

    /// Parse an integration config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse an integration config from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(
            ConfigFormat::detect(Path::new("integrations.json")),
            ConfigFormat::Json
        );
        assert_eq!(
            ConfigFormat::detect(Path::new("integrations.yml")),
            ConfigFormat::Yaml
        );
        assert_eq!(
            ConfigFormat::detect(Path::new("integrations")),
            ConfigFormat::Yaml
        );
    }

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r#"
prefix: Ord
domain: api.example.com
path: orders
title: Orders API
eventBridge:
  sourceName: svc.orders
  busName: orders-bus
"#;

        let config = IntegrationConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.prefix, "Ord");
        let event_bridge = config.event_bridge.unwrap();
        assert_eq!(event_bridge.source_name, "svc.orders");
        assert_eq!(event_bridge.bus_name, "orders-bus");
    }

    #[test]
    fn test_unknown_variant_key_is_ignored() {
        // An unsupported variant block parses fine and later resolves to
        // the soft "unrecognized" outcome.
        let json = r#"{
            "prefix": "Q",
            "domain": "api.example.com",
            "path": "queue",
            "title": "Queue API",
            "sqs": {"queueName": "jobs"}
        }"#;

        let config = IntegrationConfig::from_json(json).unwrap();
        assert!(config.event_bridge.is_none());
    }
}
