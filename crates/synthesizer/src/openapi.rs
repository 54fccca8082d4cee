//! Emitted OpenAPI document shape
//!
//! The API fragment carries its whole definition inline: an OpenAPI
//! document with a single POST operation on `/`. The integration
//! extension sits in the operation object as a sibling of `responses`.

use crate::event_bridge::ApiGatewayIntegration;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// OpenAPI version pinned for emitted documents
pub const OPENAPI_VERSION: &str = "3.0.1";

const DOCUMENT_VERSION: &str = "1";
const DEFAULT_RESPONSE_DESCRIPTION: &str = "Success";

/// OpenAPI document root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    pub openapi: String,
    pub info: Info,
    pub paths: BTreeMap<String, PathItem>,
}

/// API metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    pub version: String,
    pub title: String,
}

/// Operations for a path; emitted documents only ever carry POST
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    pub post: Operation,
}

/// The POST operation with its integration extension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub responses: BTreeMap<String, ResponseObject>,

    #[serde(rename = "x-amazon-apigateway-integration")]
    pub integration: ApiGatewayIntegration,
}

/// A response description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseObject {
    pub description: String,
}

/// Build the fixed-shape document wrapping the given integration
pub fn build_open_api_body(title: &str, integration: ApiGatewayIntegration) -> OpenApiDocument {
    let mut responses = BTreeMap::new();
    responses.insert(
        "default".to_string(),
        ResponseObject {
            description: DEFAULT_RESPONSE_DESCRIPTION.to_string(),
        },
    );

    let mut paths = BTreeMap::new();
    paths.insert(
        "/".to_string(),
        PathItem {
            post: Operation {
                responses,
                integration,
            },
        },
    );

    OpenApiDocument {
        openapi: OPENAPI_VERSION.to_string(),
        info: Info {
            version: DOCUMENT_VERSION.to_string(),
            title: title.to_string(),
        },
        paths,
    }
}
