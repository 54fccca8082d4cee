//! IAM policy and trust document shapes

use gatebridge_common::CfnValue;
use serde::{Deserialize, Serialize};

/// IAM policy language version
pub const IAM_POLICY_VERSION: &str = "2012-10-17";

/// The only service principal synthesized roles ever trust
pub const API_GATEWAY_SERVICE_PRINCIPAL: &str = "apigateway.amazonaws.com";

const ACTION_ASSUME_ROLE: &str = "sts:AssumeRole";

/// An inline policy carried on a role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InlinePolicy {
    pub policy_name: String,
    pub policy_document: PolicyDocument,
}

/// A permission policy with a single statement object.
///
/// The backend accepts a lone statement as well as a statement list; the
/// scoped policies emitted here use the single-object form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: PolicyStatement,
}

/// One permission grant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    pub action: Vec<String>,
    pub effect: String,
    pub resource: Vec<CfnValue>,
}

/// A role trust policy (statement list form)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssumeRolePolicyDocument {
    pub version: String,
    pub statement: Vec<TrustStatement>,
}

/// One trust grant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrustStatement {
    pub effect: String,
    pub principal: ServicePrincipal,
    pub action: Vec<String>,
}

/// A service principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServicePrincipal {
    pub service: String,
}

impl AssumeRolePolicyDocument {
    /// Trust policy admitting only the API gateway service principal.
    /// This is an invariant of every synthesized role, not configurable.
    pub fn api_gateway() -> Self {
        Self {
            version: IAM_POLICY_VERSION.to_string(),
            statement: vec![TrustStatement {
                effect: "Allow".to_string(),
                principal: ServicePrincipal {
                    service: API_GATEWAY_SERVICE_PRINCIPAL.to_string(),
                },
                action: vec![ACTION_ASSUME_ROLE.to_string()],
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trust_policy_shape() {
        let value = serde_json::to_value(AssumeRolePolicyDocument::api_gateway()).unwrap();
        assert_eq!(
            value,
            json!({
                "Version": "2012-10-17",
                "Statement": [{
                    "Effect": "Allow",
                    "Principal": {"Service": "apigateway.amazonaws.com"},
                    "Action": ["sts:AssumeRole"]
                }]
            })
        );
    }
}
