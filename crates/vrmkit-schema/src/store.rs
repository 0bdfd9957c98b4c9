//! Entity-store seam.
//!
//! The host application owns bones, meshes, materials, images, text blocks and
//! scene objects. Migration only ever reads them through [`EntityStore`].

use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

/// Kind of a scene object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// A lightweight helper object with no geometry (an "empty").
    #[serde(alias = "empty")]
    Marker,
    Mesh,
    Armature,
    #[default]
    Other,
}

/// Display shape of a marker object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    #[default]
    PlainAxes,
    Arrows,
    SingleArrow,
    Circle,
    Cube,
    Sphere,
    Cone,
    Image,
}

/// How a scene object is attached to its parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentType {
    #[default]
    Object,
    Bone,
}

/// Read-only view of a scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
    pub marker_shape: MarkerShape,
    /// Display size of a marker; a sphere marker's radius.
    pub marker_size: f64,
    /// Name of the parent object, if any.
    pub parent: Option<String>,
    pub parent_type: ParentType,
    /// Parent bone name when `parent_type` is `Bone`.
    pub parent_bone: String,
    /// Location relative to the parent.
    pub location: [f64; 3],
}

impl Default for SceneObject {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: ObjectKind::Other,
            marker_shape: MarkerShape::PlainAxes,
            marker_size: 1.0,
            parent: None,
            parent_type: ParentType::Object,
            parent_bone: String::new(),
            location: [0.0; 3],
        }
    }
}

impl SceneObject {
    /// Creates a sphere marker parented to `bone` of `rig`.
    pub fn sphere_marker(
        name: impl Into<String>,
        rig: impl Into<String>,
        bone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Marker,
            marker_shape: MarkerShape::Sphere,
            parent: Some(rig.into()),
            parent_type: ParentType::Bone,
            parent_bone: bone.into(),
            ..Self::default()
        }
    }

    /// Sets the marker display size.
    pub fn with_size(mut self, size: f64) -> Self {
        self.marker_size = size;
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: [f64; 3]) -> Self {
        self.location = location;
        self
    }

    /// Returns true if this object encodes a spring-bone collider: a sphere
    /// marker parented by bone.
    pub fn is_collider_marker(&self) -> bool {
        self.kind == ObjectKind::Marker
            && self.marker_shape == MarkerShape::Sphere
            && self.parent_type == ParentType::Bone
    }
}

/// A mesh datablock and its shape-key names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mesh {
    pub name: String,
    pub shape_keys: Vec<String>,
}

impl Mesh {
    pub fn has_shape_key(&self, key: &str) -> bool {
        self.shape_keys.iter().any(|k| k == key)
    }
}

/// A material datablock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
}

/// An image datablock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub name: String,
}

/// A named multi-line text attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextBlock {
    pub name: String,
    pub lines: Vec<String>,
}

impl TextBlock {
    /// Creates a text block holding `body` split into lines.
    pub fn new(name: impl Into<String>, body: &str) -> Self {
        Self {
            name: name.into(),
            lines: body.lines().map(str::to_string).collect(),
        }
    }

    /// Concatenated content of all lines, without separators.
    pub fn body(&self) -> String {
        self.lines.concat()
    }
}

/// Direct reference to a text block stored in a custom property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextRef {
    pub text: String,
}

/// Value of an ad-hoc custom property on a rig object or its armature data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomProperty {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Text(TextRef),
    Other(serde_json::Value),
}

impl CustomProperty {
    /// Returns the string payload, if this is a string property.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CustomProperty::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the name of the text block this property points at, either
    /// through a direct reference or by naming it.
    pub fn text_name(&self) -> Option<&str> {
        match self {
            CustomProperty::Text(text_ref) => Some(&text_ref.text),
            CustomProperty::String(name) => Some(name),
            _ => None,
        }
    }
}

impl From<&str> for CustomProperty {
    fn from(value: &str) -> Self {
        CustomProperty::String(value.to_string())
    }
}

/// Queryable store of named host entities.
///
/// Every query may fail with a store fault. Rig-scoped queries return owned
/// snapshots; global registries return borrowed entities.
pub trait EntityStore {
    /// Bone names of the rig's skeleton, in skeleton order.
    fn bone_names(&self, rig: &str) -> StoreResult<Vec<String>>;

    /// Direct children of the rig object, in scene order.
    fn child_objects(&self, rig: &str) -> StoreResult<Vec<SceneObject>>;

    /// Custom property stored on the rig object.
    fn object_property(&self, rig: &str, key: &str) -> StoreResult<Option<CustomProperty>>;

    /// Custom property stored on the rig's armature data.
    fn data_property(&self, rig: &str, key: &str) -> StoreResult<Option<CustomProperty>>;

    fn text(&self, name: &str) -> StoreResult<Option<&TextBlock>>;

    fn mesh(&self, name: &str) -> StoreResult<Option<&Mesh>>;

    fn material(&self, name: &str) -> StoreResult<Option<&Material>>;

    fn image(&self, name: &str) -> StoreResult<Option<&Image>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_property_untagged_serde() {
        let props: Vec<CustomProperty> =
            serde_json::from_str(r#"[true, 3, 1.5, "Head", {"text": "humanoid_params"}, [1, 2]]"#)
                .unwrap();
        assert_eq!(props[0], CustomProperty::Bool(true));
        assert_eq!(props[1], CustomProperty::Int(3));
        assert_eq!(props[2], CustomProperty::Float(1.5));
        assert_eq!(props[3].as_str(), Some("Head"));
        assert_eq!(props[4].text_name(), Some("humanoid_params"));
        assert!(matches!(props[5], CustomProperty::Other(_)));
        assert_eq!(props[5].text_name(), None);
    }

    #[test]
    fn test_collider_marker_detection() {
        let marker = SceneObject::sphere_marker("c0", "Armature", "Head");
        assert!(marker.is_collider_marker());

        let cube = SceneObject {
            marker_shape: MarkerShape::Cube,
            ..marker.clone()
        };
        assert!(!cube.is_collider_marker());

        let object_parented = SceneObject {
            parent_type: ParentType::Object,
            ..marker
        };
        assert!(!object_parented.is_collider_marker());
    }

    #[test]
    fn test_object_kind_accepts_empty_alias() {
        let obj: SceneObject = serde_json::from_str(r#"{"name": "e", "kind": "empty"}"#).unwrap();
        assert_eq!(obj.kind, ObjectKind::Marker);
        assert_eq!(obj.marker_size, 1.0);
    }

    #[test]
    fn test_text_block_body_concatenates_lines() {
        let text = TextBlock {
            name: "t".to_string(),
            lines: vec!["{\"a\":".to_string(), " 1}".to_string()],
        };
        assert_eq!(text.body(), "{\"a\": 1}");
        assert_eq!(TextBlock::new("t", "x\ny").lines, vec!["x", "y"]);
    }
}
