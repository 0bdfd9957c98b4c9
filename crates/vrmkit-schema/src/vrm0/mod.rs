//! VRM 0.x normalized records.

mod blend_shape;
mod first_person;
mod humanoid;
mod meta;
mod secondary_animation;

use serde::{Deserialize, Serialize};

pub use blend_shape::{
    BlendShapePreset, Vrm0BlendShapeBind, Vrm0BlendShapeGroup, Vrm0BlendShapeMaster,
    Vrm0MaterialValueBind,
};
pub use first_person::{
    FirstPersonFlag, LookAtType, Vrm0DegreeMap, Vrm0FirstPerson, Vrm0MeshAnnotation, CURVE_LEN,
};
pub use humanoid::{Vrm0HumanBone, Vrm0Humanoid};
pub use meta::{AllowedUserName, LicenseName, UsagePermission, Vrm0Meta};
pub use secondary_animation::{
    Vrm0BoneGroup, Vrm0Collider, Vrm0ColliderGroup, Vrm0SecondaryAnimation,
};

/// The VRM 0.x section of a normalized document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrm0Document {
    pub meta: Vrm0Meta,
    pub humanoid: Vrm0Humanoid,
    pub first_person: Vrm0FirstPerson,
    pub blend_shape_master: Vrm0BlendShapeMaster,
    pub secondary_animation: Vrm0SecondaryAnimation,
}
