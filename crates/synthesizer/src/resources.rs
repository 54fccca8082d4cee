//! Resource fragment builders
//!
//! Each builder is a pure function from primitive inputs to one resource
//! declaration. All four fragments share the caller's prefix as their
//! naming root, so they can reference each other by `Ref`/`Fn::GetAtt`
//! before the backend has assigned physical ids.

use crate::event_bridge::ApiGatewayIntegration;
use crate::iam::{AssumeRolePolicyDocument, InlinePolicy};
use crate::openapi::{build_open_api_body, OpenApiDocument};
use gatebridge_common::Ref;
use serde::{Deserialize, Serialize};

/// A resource declaration, tagged the way the provisioning backend
/// expects: `{"Type": ..., "Properties": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type", content = "Properties")]
pub enum Resource {
    #[serde(rename = "AWS::ApiGatewayV2::Api")]
    Api(ApiProperties),

    #[serde(rename = "AWS::ApiGatewayV2::Stage")]
    Stage(StageProperties),

    #[serde(rename = "AWS::ApiGatewayV2::ApiMapping")]
    ApiMapping(ApiMappingProperties),

    #[serde(rename = "AWS::IAM::Role")]
    Role(RoleProperties),
}

/// Properties of the HTTP API, defined entirely by its inline OpenAPI
/// body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiProperties {
    pub body: OpenApiDocument,
}

/// Properties of the deployment stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StageProperties {
    pub api_id: Ref,
    pub stage_name: String,
    pub auto_deploy: bool,
}

/// Properties binding a custom domain and path to a stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiMappingProperties {
    pub domain_name: String,
    pub api_mapping_key: String,
    pub api_id: Ref,
    pub stage: Ref,
}

/// Properties of the execution role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleProperties {
    pub assume_role_policy_document: AssumeRolePolicyDocument,
    pub policies: Vec<InlinePolicy>,
}

pub fn api_logical_id(prefix: &str) -> String {
    format!("{}ApiGatewayApi", prefix)
}

pub fn stage_logical_id(prefix: &str) -> String {
    format!("{}ApiGatewayStage", prefix)
}

pub fn mapping_logical_id(prefix: &str) -> String {
    format!("{}ApiGatewayApiMapping", prefix)
}

pub fn role_logical_id(prefix: &str) -> String {
    format!("{}IamRole", prefix)
}

/// Bind a custom domain and path to the prefixed API and stage
pub fn build_api_mapping(prefix: &str, domain_name: &str, path: &str) -> Resource {
    Resource::ApiMapping(ApiMappingProperties {
        domain_name: domain_name.to_string(),
        api_mapping_key: path.to_string(),
        api_id: Ref::new(api_logical_id(prefix)),
        stage: Ref::new(stage_logical_id(prefix)),
    })
}

/// Wrap an integration in an API fragment
pub fn build_api(title: &str, integration: ApiGatewayIntegration) -> Resource {
    Resource::Api(ApiProperties {
        body: build_open_api_body(title, integration),
    })
}

/// Auto-deploying stage: every template update publishes a new
/// deployment without a manual step
pub fn build_stage(prefix: &str, stage_name: &str) -> Resource {
    Resource::Stage(StageProperties {
        api_id: Ref::new(api_logical_id(prefix)),
        stage_name: stage_name.to_string(),
        auto_deploy: true,
    })
}

/// Execution role trusting the API gateway service, carrying the
/// supplied inline policies
pub fn build_role(policies: Vec<InlinePolicy>) -> Resource {
    Resource::Role(RoleProperties {
        assume_role_policy_document: AssumeRolePolicyDocument::api_gateway(),
        policies,
    })
}
