//! Event-bus integration builders
//!
//! Produces the `x-amazon-apigateway-integration` extension that turns
//! the API's POST operation into a direct PutEvents call, and the IAM
//! policy scoping the execution role to a single event bus.

use crate::iam::{InlinePolicy, PolicyDocument, PolicyStatement, IAM_POLICY_VERSION};
use crate::resources::role_logical_id;
use gatebridge_common::{CfnValue, GetAtt, Join, Ref};
use serde::{Deserialize, Serialize};

const INTEGRATION_SUBTYPE: &str = "EventBridge-PutEvents";
const INTEGRATION_TYPE_PROXY: &str = "aws_proxy";
const CONNECTION_TYPE_INTERNET: &str = "INTERNET";

/// Payload format version, pinned
const PAYLOAD_FORMAT_VERSION: &str = "1.0";

/// Name of the inline policy granting event submission
pub const EVENT_BRIDGE_POLICY_NAME: &str = "ApiDirectWriteEventBridge";

/// The only action the synthesized policy grants
pub const ACTION_PUT_EVENTS: &str = "events:PutEvents";

/// The `x-amazon-apigateway-integration` extension payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayIntegration {
    pub integration_subtype: String,

    /// Reference to the ARN of the synthesized execution role
    pub credentials: CfnValue,

    pub request_parameters: EventBridgeRequestParameters,

    pub payload_format_version: String,

    #[serde(rename = "type")]
    pub integration_type: String,

    pub connection_type: String,
}

/// Mapping from the incoming HTTP request body to PutEvents parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventBridgeRequestParameters {
    pub detail: String,
    pub detail_type: String,
    pub source: String,
    pub event_bus_name: String,
}

/// Build the proxy integration forwarding request bodies onto the named
/// bus, running as the prefixed execution role
pub fn build_event_bridge_integration(
    prefix: &str,
    source_name: &str,
    bus_name: &str,
) -> ApiGatewayIntegration {
    ApiGatewayIntegration {
        integration_subtype: INTEGRATION_SUBTYPE.to_string(),
        credentials: GetAtt::arn(role_logical_id(prefix)).into(),
        request_parameters: EventBridgeRequestParameters {
            detail: "$request.body.Detail".to_string(),
            detail_type: "$request.body.DetailType".to_string(),
            source: source_name.to_string(),
            event_bus_name: bus_name.to_string(),
        },
        payload_format_version: PAYLOAD_FORMAT_VERSION.to_string(),
        integration_type: INTEGRATION_TYPE_PROXY.to_string(),
        connection_type: CONNECTION_TYPE_INTERNET.to_string(),
    }
}

/// Build the inline policy permitting event submission to one bus
pub fn build_event_bridge_policy(bus_name: &str) -> InlinePolicy {
    InlinePolicy {
        policy_name: EVENT_BRIDGE_POLICY_NAME.to_string(),
        policy_document: PolicyDocument {
            version: IAM_POLICY_VERSION.to_string(),
            statement: PolicyStatement {
                action: vec![ACTION_PUT_EVENTS.to_string()],
                effect: "Allow".to_string(),
                resource: vec![event_bus_arn(bus_name).into()],
            },
        },
    }
}

/// ARN of the named event bus; region and account stay deferred
/// references resolved at deploy time
fn event_bus_arn(bus_name: &str) -> Join {
    Join::new(
        ":",
        vec![
            "arn".into(),
            "aws".into(),
            "events".into(),
            Ref::region().into(),
            Ref::account_id().into(),
            format!("event-bus/{}", bus_name).into(),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_policy_is_scoped_to_the_named_bus() {
        let policy = build_event_bridge_policy("orders");

        assert_eq!(policy.policy_name, "ApiDirectWriteEventBridge");
        let statement = &policy.policy_document.statement;
        assert_eq!(statement.action, vec!["events:PutEvents".to_string()]);
        assert_eq!(statement.effect, "Allow");

        let arn = serde_json::to_value(&statement.resource[0]).unwrap();
        let tokens = arn["Fn::Join"][1].as_array().unwrap();
        assert_eq!(tokens.last().unwrap(), &json!("event-bus/orders"));
    }

    #[test]
    fn test_policy_arn_shape() {
        let policy = build_event_bridge_policy("orders-bus");
        let arn = serde_json::to_value(&policy.policy_document.statement.resource[0]).unwrap();

        assert_eq!(
            arn,
            json!({
                "Fn::Join": [":", [
                    "arn",
                    "aws",
                    "events",
                    {"Ref": "AWS::Region"},
                    {"Ref": "AWS::AccountId"},
                    "event-bus/orders-bus"
                ]]
            })
        );
    }

    #[test]
    fn test_integration_credentials_point_at_prefixed_role() {
        let integration = build_event_bridge_integration("Ord", "svc.orders", "orders-bus");

        let credentials = serde_json::to_value(&integration.credentials).unwrap();
        assert_eq!(credentials, json!({"Fn::GetAtt": ["OrdIamRole", "Arn"]}));
    }

    #[test]
    fn test_integration_pinned_fields() {
        let integration = build_event_bridge_integration("Ord", "svc.orders", "orders-bus");

        assert_eq!(integration.integration_subtype, "EventBridge-PutEvents");
        assert_eq!(integration.payload_format_version, "1.0");
        assert_eq!(integration.integration_type, "aws_proxy");
        assert_eq!(integration.connection_type, "INTERNET");
    }

    #[test]
    fn test_request_parameter_mapping() {
        let integration = build_event_bridge_integration("Ord", "svc.orders", "orders-bus");

        let params = serde_json::to_value(&integration.request_parameters).unwrap();
        assert_eq!(
            params,
            json!({
                "Detail": "$request.body.Detail",
                "DetailType": "$request.body.DetailType",
                "Source": "svc.orders",
                "EventBusName": "orders-bus"
            })
        );
    }
}
