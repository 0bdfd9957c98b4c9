//! VRM 0.x blend-shape (expression) groups.

use serde::{Deserialize, Serialize};

use crate::reference::{MaterialReference, MeshReference};

/// Expression preset of a blend-shape group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendShapePreset {
    #[default]
    Unknown,
    Neutral,
    A,
    I,
    U,
    E,
    O,
    Blink,
    Joy,
    Angry,
    Sorrow,
    Fun,
    #[serde(rename = "lookup")]
    LookUp,
    #[serde(rename = "lookdown")]
    LookDown,
    #[serde(rename = "lookleft")]
    LookLeft,
    #[serde(rename = "lookright")]
    LookRight,
    BlinkL,
    BlinkR,
}

impl BlendShapePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlendShapePreset::Unknown => "unknown",
            BlendShapePreset::Neutral => "neutral",
            BlendShapePreset::A => "a",
            BlendShapePreset::I => "i",
            BlendShapePreset::U => "u",
            BlendShapePreset::E => "e",
            BlendShapePreset::O => "o",
            BlendShapePreset::Blink => "blink",
            BlendShapePreset::Joy => "joy",
            BlendShapePreset::Angry => "angry",
            BlendShapePreset::Sorrow => "sorrow",
            BlendShapePreset::Fun => "fun",
            BlendShapePreset::LookUp => "lookup",
            BlendShapePreset::LookDown => "lookdown",
            BlendShapePreset::LookLeft => "lookleft",
            BlendShapePreset::LookRight => "lookright",
            BlendShapePreset::BlinkL => "blink_l",
            BlendShapePreset::BlinkR => "blink_r",
        }
    }

    pub fn all() -> &'static [BlendShapePreset] {
        &[
            BlendShapePreset::Unknown,
            BlendShapePreset::Neutral,
            BlendShapePreset::A,
            BlendShapePreset::I,
            BlendShapePreset::U,
            BlendShapePreset::E,
            BlendShapePreset::O,
            BlendShapePreset::Blink,
            BlendShapePreset::Joy,
            BlendShapePreset::Angry,
            BlendShapePreset::Sorrow,
            BlendShapePreset::Fun,
            BlendShapePreset::LookUp,
            BlendShapePreset::LookDown,
            BlendShapePreset::LookLeft,
            BlendShapePreset::LookRight,
            BlendShapePreset::BlinkL,
            BlendShapePreset::BlinkR,
        ]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        BlendShapePreset::all()
            .iter()
            .copied()
            .find(|preset| preset.as_str() == name)
    }
}

/// Morph (shape-key) bind of a blend-shape group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrm0BlendShapeBind {
    pub mesh: MeshReference,
    /// Shape-key name on `mesh`.
    pub index: String,
    pub weight: f64,
}

impl Default for Vrm0BlendShapeBind {
    fn default() -> Self {
        Self {
            mesh: MeshReference::default(),
            index: String::new(),
            weight: 1.0,
        }
    }
}

/// Material property bind of a blend-shape group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrm0MaterialValueBind {
    pub material: MaterialReference,
    pub property_name: String,
    pub target_value: Vec<f64>,
}

/// A blend-shape group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrm0BlendShapeGroup {
    pub name: String,
    pub preset_name: BlendShapePreset,
    pub binds: Vec<Vrm0BlendShapeBind>,
    pub material_values: Vec<Vrm0MaterialValueBind>,
    pub is_binary: bool,
}

/// Container of all blend-shape groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrm0BlendShapeMaster {
    pub blend_shape_groups: Vec<Vrm0BlendShapeGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_serde_matches_as_str() {
        for preset in BlendShapePreset::all() {
            let json = serde_json::to_string(preset).unwrap();
            assert_eq!(json, format!("\"{}\"", preset.as_str()));
            assert_eq!(BlendShapePreset::from_name(preset.as_str()), Some(*preset));
        }
        assert_eq!(BlendShapePreset::from_name("Joy"), None);
    }

    #[test]
    fn test_bind_default_weight() {
        let bind: Vrm0BlendShapeBind = serde_json::from_str(r#"{"index": "A"}"#).unwrap();
        assert_eq!(bind.weight, 1.0);
        assert!(bind.mesh.is_empty());
    }
}
