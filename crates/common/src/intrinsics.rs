//! CloudFormation intrinsic function values
//!
//! Typed representations of the intrinsics the synthesizer emits (`Ref`,
//! `Fn::GetAtt`, `Fn::Join`). The provisioning backend resolves these at
//! deploy time; this tool only has to spell them exactly.

use serde::{Deserialize, Serialize};

/// Pseudo parameter for the deployment region
pub const AWS_REGION: &str = "AWS::Region";

/// Pseudo parameter for the deployment account id
pub const AWS_ACCOUNT_ID: &str = "AWS::AccountId";

/// A `{"Ref": "LogicalName"}` reference to another template resource or
/// pseudo parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ref {
    #[serde(rename = "Ref")]
    pub logical_id: String,
}

impl Ref {
    pub fn new(logical_id: impl Into<String>) -> Self {
        Self {
            logical_id: logical_id.into(),
        }
    }

    /// Reference to the `AWS::Region` pseudo parameter
    pub fn region() -> Self {
        Self::new(AWS_REGION)
    }

    /// Reference to the `AWS::AccountId` pseudo parameter
    pub fn account_id() -> Self {
        Self::new(AWS_ACCOUNT_ID)
    }
}

/// A `{"Fn::GetAtt": ["LogicalName", "Attribute"]}` attribute lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetAtt {
    #[serde(rename = "Fn::GetAtt")]
    pub parts: (String, String),
}

impl GetAtt {
    pub fn new(logical_id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            parts: (logical_id.into(), attribute.into()),
        }
    }

    /// Lookup of a resource's `Arn` attribute
    pub fn arn(logical_id: impl Into<String>) -> Self {
        Self::new(logical_id, "Arn")
    }
}

/// A `{"Fn::Join": [delimiter, [values...]]}` string join
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    #[serde(rename = "Fn::Join")]
    pub parts: (String, Vec<CfnValue>),
}

impl Join {
    pub fn new(delimiter: impl Into<String>, values: Vec<CfnValue>) -> Self {
        Self {
            parts: (delimiter.into(), values),
        }
    }
}

/// A template property value: either a literal string or an intrinsic
/// resolved later by the provisioning backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CfnValue {
    Ref(Ref),
    GetAtt(GetAtt),
    Join(Box<Join>),
    String(String),
}

impl From<Ref> for CfnValue {
    fn from(value: Ref) -> Self {
        CfnValue::Ref(value)
    }
}

impl From<GetAtt> for CfnValue {
    fn from(value: GetAtt) -> Self {
        CfnValue::GetAtt(value)
    }
}

impl From<Join> for CfnValue {
    fn from(value: Join) -> Self {
        CfnValue::Join(Box::new(value))
    }
}

impl From<String> for CfnValue {
    fn from(value: String) -> Self {
        CfnValue::String(value)
    }
}

impl From<&str> for CfnValue {
    fn from(value: &str) -> Self {
        CfnValue::String(value.to_string())
    }
}
