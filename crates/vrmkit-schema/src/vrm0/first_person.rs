//! VRM 0.x first-person record.

use serde::{Deserialize, Serialize};

use crate::reference::{BoneReference, MeshReference};

/// Visibility of a mesh in first-person and third-person views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FirstPersonFlag {
    #[default]
    Auto,
    FirstPersonOnly,
    ThirdPersonOnly,
    Both,
}

impl FirstPersonFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            FirstPersonFlag::Auto => "Auto",
            FirstPersonFlag::FirstPersonOnly => "FirstPersonOnly",
            FirstPersonFlag::ThirdPersonOnly => "ThirdPersonOnly",
            FirstPersonFlag::Both => "Both",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Auto" => Some(FirstPersonFlag::Auto),
            "FirstPersonOnly" => Some(FirstPersonFlag::FirstPersonOnly),
            "ThirdPersonOnly" => Some(FirstPersonFlag::ThirdPersonOnly),
            "Both" => Some(FirstPersonFlag::Both),
            _ => None,
        }
    }
}

/// How eye look-at is driven.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookAtType {
    #[default]
    Bone,
    BlendShape,
}

impl LookAtType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookAtType::Bone => "Bone",
            LookAtType::BlendShape => "BlendShape",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Bone" => Some(LookAtType::Bone),
            "BlendShape" => Some(LookAtType::BlendShape),
            _ => None,
        }
    }
}

/// Per-mesh first-person visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrm0MeshAnnotation {
    pub mesh: MeshReference,
    pub first_person_flag: FirstPersonFlag,
}

/// Number of scalars in a look-at curve.
pub const CURVE_LEN: usize = 8;

/// Look-at mapping curve with its input and output ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrm0DegreeMap {
    /// Four 2-D control points, flattened.
    pub curve: [f64; CURVE_LEN],
    pub x_range: f64,
    pub y_range: f64,
}

impl Default for Vrm0DegreeMap {
    fn default() -> Self {
        Self {
            curve: [0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0],
            x_range: 90.0,
            y_range: 10.0,
        }
    }
}

impl Vrm0DegreeMap {
    /// Returns the curve as ordered 2-D control points.
    pub fn control_points(&self) -> [[f64; 2]; 4] {
        let c = &self.curve;
        [[c[0], c[1]], [c[2], c[3]], [c[4], c[5]], [c[6], c[7]]]
    }
}

/// VRM 0.x first-person record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrm0FirstPerson {
    pub first_person_bone: BoneReference,
    pub first_person_bone_offset: [f64; 3],
    pub mesh_annotations: Vec<Vrm0MeshAnnotation>,
    pub look_at_type_name: LookAtType,
    pub look_at_horizontal_inner: Vrm0DegreeMap,
    pub look_at_horizontal_outer: Vrm0DegreeMap,
    pub look_at_vertical_down: Vrm0DegreeMap,
    pub look_at_vertical_up: Vrm0DegreeMap,
}
