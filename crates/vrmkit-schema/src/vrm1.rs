//! VRM 1.0 sections of the normalized document.
//!
//! These live in the same ownership tree as the VRM 0.x records but are never
//! written by the legacy migration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::reference::BoneReference;

/// VRM 1.0 meta.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrm1Meta {
    pub vrm_name: String,
    pub version: String,
    pub authors: Vec<String>,
    pub license_url: String,
}

/// VRM 1.0 humanoid, keyed by VRM 1.0 human bone name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrm1Humanoid {
    pub human_bones: BTreeMap<String, BoneReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrm1Document {
    pub meta: Vrm1Meta,
    pub humanoid: Vrm1Humanoid,
}

/// VRM 1.0 spring-bone sphere collider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringBone1Collider {
    pub node: BoneReference,
    pub offset: [f64; 3],
    pub radius: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringBone1Spring {
    pub name: String,
    pub joints: Vec<BoneReference>,
    pub collider_groups: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringBoneDocument {
    pub colliders: Vec<SpringBone1Collider>,
    pub springs: Vec<SpringBone1Spring>,
}

/// Node constraints (roll, aim, rotation) keyed by constrained bone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintDocument {
    pub roll_constraints: BTreeMap<String, BoneReference>,
    pub aim_constraints: BTreeMap<String, BoneReference>,
    pub rotation_constraints: BTreeMap<String, BoneReference>,
}
