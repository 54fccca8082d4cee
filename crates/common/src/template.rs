//! Deployment template handling
//!
//! A deployment template is the host document the synthesizer writes into.
//! Only the `Resources` section is interpreted; every other top-level key
//! is carried through untouched.

use crate::{Result, SynthesisError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// How to treat fragments whose logical name already exists in the
/// template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Fail the merge, naming every colliding logical name
    #[default]
    Reject,

    /// Replace existing entries wholesale (last write wins)
    Overwrite,
}

/// A CloudFormation deployment template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Template format version, if the document carries one
    #[serde(rename = "AWSTemplateFormatVersion")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub format_version: Option<String>,

    /// Resource declarations keyed by logical name
    #[serde(rename = "Resources")]
    #[serde(default)]
    pub resources: BTreeMap<String, Value>,

    /// Any other top-level sections (Outputs, Parameters, ...), passed
    /// through unmodified
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Template {
    /// Create an empty template
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a template from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parse a template from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the template as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the template to a JSON file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path.as_ref(), self.to_json_pretty()?)?;
        Ok(())
    }

    /// Whether a resource with the given logical name exists
    pub fn contains_resource(&self, logical_id: &str) -> bool {
        self.resources.contains_key(logical_id)
    }

    /// Merge resource fragments into the template under their logical
    /// names.
    ///
    /// Under [`MergePolicy::Reject`] the merge fails atomically if any
    /// logical name is already taken. Under [`MergePolicy::Overwrite`]
    /// existing entries are replaced and their logical names returned, so
    /// callers can report what was clobbered.
    pub fn merge_resources(
        &mut self,
        fragments: BTreeMap<String, Value>,
        policy: MergePolicy,
    ) -> Result<Vec<String>> {
        let conflicts: Vec<String> = fragments
            .keys()
            .filter(|id| self.resources.contains_key(*id))
            .cloned()
            .collect();

        if policy == MergePolicy::Reject && !conflicts.is_empty() {
            return Err(SynthesisError::MergeConflict {
                conflicts: conflicts.join(", "),
            });
        }

        for (logical_id, fragment) in fragments {
            self.resources.insert(logical_id, fragment);
        }

        Ok(conflicts)
    }
}
