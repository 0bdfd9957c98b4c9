//! Root record attached to each rig.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::version::{AddonVersion, SpecVersion};
use crate::vrm0::Vrm0Document;
use crate::vrm1::{ConstraintDocument, SpringBoneDocument, Vrm1Document};

/// Normalized VRM document owned by one rig.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizedDocument {
    /// Add-on version that last stamped this document.
    pub addon_version: AddonVersion,
    pub spec_version: SpecVersion,
    pub armature_data_name: String,
    pub vrm0: Vrm0Document,
    pub vrm1: Vrm1Document,
    pub spring_bone1: SpringBoneDocument,
    pub node_constraint1: ConstraintDocument,
}

impl NormalizedDocument {
    /// Creates an empty document at `addon_version`.
    pub fn at_version(addon_version: AddonVersion) -> Self {
        Self {
            addon_version,
            ..Self::default()
        }
    }

    pub fn is_vrm0(&self) -> bool {
        self.spec_version.is_vrm0()
    }

    pub fn is_vrm1(&self) -> bool {
        self.spec_version.is_vrm1()
    }

    /// Parses a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the document to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serializes the document to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, SchemaError> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_json_loads_defaults() {
        let doc = NormalizedDocument::from_json("{}").unwrap();
        assert_eq!(doc, NormalizedDocument::default());
        assert!(doc.is_vrm0());
        assert!(doc.addon_version.needs_legacy_migration());
    }

    #[test]
    fn test_json_round_trip_keeps_version() {
        let doc = NormalizedDocument::at_version(AddonVersion(2, 0, 1));
        let json = doc.to_json_pretty().unwrap();
        let parsed = NormalizedDocument::from_json(&json).unwrap();
        assert_eq!(parsed.addon_version, AddonVersion(2, 0, 1));
        assert_eq!(parsed, doc);
    }
}
