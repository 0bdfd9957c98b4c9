//! VRM 0.x humanoid record.

use serde::{Deserialize, Serialize};

use crate::human_bone::HumanBoneName;
use crate::reference::BoneReference;
use crate::rig::RigSnapshot;

/// Assignment of one human bone role to a rig bone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vrm0HumanBone {
    pub bone: HumanBoneName,
    #[serde(default)]
    pub node: BoneReference,
    #[serde(default = "default_true")]
    pub use_default_values: bool,
}

fn default_true() -> bool {
    true
}

impl Vrm0HumanBone {
    pub fn new(bone: HumanBoneName) -> Self {
        Self {
            bone,
            node: BoneReference::default(),
            use_default_values: true,
        }
    }
}

/// VRM 0.x humanoid record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrm0Humanoid {
    pub human_bones: Vec<Vrm0HumanBone>,
    pub arm_stretch: f64,
    pub leg_stretch: f64,
    pub upper_arm_twist: f64,
    pub lower_arm_twist: f64,
    pub upper_leg_twist: f64,
    pub lower_leg_twist: f64,
    pub feet_spacing: f64,
    pub has_translation_dof: bool,
    /// Bone names of the rig as of the last structural check.
    pub last_bone_names: Vec<String>,
}

impl Default for Vrm0Humanoid {
    fn default() -> Self {
        Self {
            human_bones: Vec::new(),
            arm_stretch: 0.05,
            leg_stretch: 0.05,
            upper_arm_twist: 0.5,
            lower_arm_twist: 0.5,
            upper_leg_twist: 0.5,
            lower_leg_twist: 0.5,
            feet_spacing: 0.0,
            has_translation_dof: false,
            last_bone_names: Vec::new(),
        }
    }
}

impl Vrm0Humanoid {
    pub fn human_bone(&self, role: HumanBoneName) -> Option<&Vrm0HumanBone> {
        self.human_bones.iter().find(|human_bone| human_bone.bone == role)
    }

    pub fn human_bone_mut(&mut self, role: HumanBoneName) -> Option<&mut Vrm0HumanBone> {
        self.human_bones
            .iter_mut()
            .find(|human_bone| human_bone.bone == role)
    }

    /// Returns the bone name assigned to `role`, if any.
    pub fn assigned_bone(&self, role: HumanBoneName) -> Option<&str> {
        self.human_bone(role)
            .map(|human_bone| human_bone.node.value.as_str())
            .filter(|value| !value.is_empty())
    }

    /// Normalizes `human_bones` to exactly one entry per role, in canonical
    /// role order. The first entry seen for a role wins.
    ///
    /// Returns true if the list changed.
    pub fn fixup_human_bones(&mut self) -> bool {
        let fixed: Vec<Vrm0HumanBone> = HumanBoneName::all()
            .iter()
            .map(|role| {
                self.human_bone(*role)
                    .cloned()
                    .unwrap_or_else(|| Vrm0HumanBone::new(*role))
            })
            .collect();

        if fixed == self.human_bones {
            return false;
        }
        self.human_bones = fixed;
        true
    }

    /// Replaces the bone-name cache with the rig's current bones.
    ///
    /// Returns true if the bone set changed since the last check.
    pub fn check_last_bone_names_and_update(&mut self, rig: &RigSnapshot) -> bool {
        if self.last_bone_names == rig.bones {
            return false;
        }
        self.last_bone_names = rig.bones.clone();
        true
    }
}
