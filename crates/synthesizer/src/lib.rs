//! Resource synthesis for API gateway event-bus integrations
//!
//! This crate turns a resolved integration configuration into
//! CloudFormation resource fragments: an HTTP API wrapping an OpenAPI
//! document, a stage, a custom-domain mapping, and an IAM role scoped to
//! the target event bus. Synthesis is pure; the fragments come back as an
//! explicit [`FragmentSet`] and merging into a deployment template is a
//! separate, auditable step.

mod event_bridge;
mod iam;
mod openapi;
mod resources;

pub use event_bridge::{
    build_event_bridge_integration, build_event_bridge_policy, ApiGatewayIntegration,
    EventBridgeRequestParameters, ACTION_PUT_EVENTS, EVENT_BRIDGE_POLICY_NAME,
};
pub use iam::{
    AssumeRolePolicyDocument, InlinePolicy, PolicyDocument, PolicyStatement, ServicePrincipal,
    TrustStatement, API_GATEWAY_SERVICE_PRINCIPAL, IAM_POLICY_VERSION,
};
pub use openapi::{
    build_open_api_body, Info, OpenApiDocument, Operation, PathItem, ResponseObject,
    OPENAPI_VERSION,
};
pub use resources::{
    api_logical_id, build_api, build_api_mapping, build_role, build_stage, mapping_logical_id,
    role_logical_id, stage_logical_id, ApiMappingProperties, ApiProperties, Resource,
    RoleProperties, StageProperties,
};

use gatebridge_common::{MergePolicy, Result, Template};
use gatebridge_config::{resolve_integration, IntegrationConfig, ResolvedIntegration};
use serde::Serialize;
use std::collections::BTreeMap;

/// Synthesizes the resource fragments for one integration configuration
///
/// The stage name is ambient deployment state rather than part of the
/// integration config, so it is supplied separately.
pub struct TemplateSynthesizer {
    config: IntegrationConfig,
    stage_name: String,
}

impl TemplateSynthesizer {
    pub fn new(config: IntegrationConfig, stage_name: impl Into<String>) -> Self {
        Self {
            config,
            stage_name: stage_name.into(),
        }
    }

    /// Validate, resolve the integration kind, and build all fragments.
    ///
    /// Fails before anything is built when the config is invalid, so a
    /// caller never observes a partial set. Identical inputs always
    /// yield identical fragments.
    pub fn synthesize(&self) -> Result<FragmentSet> {
        self.config.validate()?;
        let resolved = resolve_integration(&self.config)?;

        let prefix = &self.config.prefix;
        let mut fragments = BTreeMap::new();

        match resolved {
            ResolvedIntegration::EventBridge(event_bridge) => {
                let policies = vec![build_event_bridge_policy(&event_bridge.bus_name)];
                let integration = build_event_bridge_integration(
                    prefix,
                    &event_bridge.source_name,
                    &event_bridge.bus_name,
                );

                fragments.insert(
                    mapping_logical_id(prefix),
                    build_api_mapping(prefix, &self.config.domain, &self.config.path),
                );
                fragments.insert(
                    api_logical_id(prefix),
                    build_api(&self.config.title, integration),
                );
                fragments.insert(
                    stage_logical_id(prefix),
                    build_stage(prefix, &self.stage_name),
                );
                fragments.insert(role_logical_id(prefix), build_role(policies));
            }
        }

        Ok(FragmentSet { fragments })
    }
}

/// The synthesized resource fragments, keyed by logical name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FragmentSet {
    fragments: BTreeMap<String, Resource>,
}

impl FragmentSet {
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn get(&self, logical_id: &str) -> Option<&Resource> {
        self.fragments.get(logical_id)
    }

    /// Logical names in deterministic order
    pub fn logical_ids(&self) -> Vec<&str> {
        self.fragments.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Resource)> {
        self.fragments.iter()
    }

    /// Serialize the fragments as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Merge every fragment into the template under its logical name,
    /// according to the given conflict policy. Returns the logical names
    /// of any replaced entries.
    pub fn merge_into(&self, template: &mut Template, policy: MergePolicy) -> Result<Vec<String>> {
        let mut values = BTreeMap::new();
        for (logical_id, fragment) in &self.fragments {
            values.insert(logical_id.clone(), serde_json::to_value(fragment)?);
        }
        template.merge_resources(values, policy)
    }
}

impl<'a> IntoIterator for &'a FragmentSet {
    type Item = (&'a String, &'a Resource);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatebridge_config::EventBridgeConfig;

    fn config() -> IntegrationConfig {
        IntegrationConfig {
            prefix: "Foo".to_string(),
            domain: "api.example.com".to_string(),
            path: "orders".to_string(),
            title: "Orders API".to_string(),
            event_bridge: Some(EventBridgeConfig {
                source_name: "svc.orders".to_string(),
                bus_name: "orders-bus".to_string(),
            }),
        }
    }

    #[test]
    fn test_synthesize_produces_exactly_four_fragments() {
        let fragments = TemplateSynthesizer::new(config(), "dev").synthesize().unwrap();

        assert_eq!(
            fragments.logical_ids(),
            vec![
                "FooApiGatewayApi",
                "FooApiGatewayApiMapping",
                "FooApiGatewayStage",
                "FooIamRole",
            ]
        );
    }

    #[test]
    fn test_unrecognized_kind_yields_no_fragments() {
        let mut config = config();
        config.event_bridge = None;

        let err = TemplateSynthesizer::new(config, "dev")
            .synthesize()
            .unwrap_err();
        assert!(err.is_soft());
    }

    #[test]
    fn test_invalid_config_fails_before_building() {
        let mut config = config();
        config.title = String::new();

        let err = TemplateSynthesizer::new(config, "dev")
            .synthesize()
            .unwrap_err();
        assert!(!err.is_soft());
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let first = TemplateSynthesizer::new(config(), "dev").synthesize().unwrap();
        let second = TemplateSynthesizer::new(config(), "dev").synthesize().unwrap();
        assert_eq!(first, second);
    }
}
