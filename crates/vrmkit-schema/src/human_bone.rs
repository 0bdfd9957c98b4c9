//! VRM 0.x human bone roles.
//!
//! The role set is closed: a humanoid maps each of these roles to at most one
//! bone of the rig.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Number of VRM 0.x human bone roles.
pub const HUMAN_BONE_COUNT: usize = 55;

/// A VRM 0.x human bone role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HumanBoneName {
    Hips,
    LeftUpperLeg,
    RightUpperLeg,
    LeftLowerLeg,
    RightLowerLeg,
    LeftFoot,
    RightFoot,
    Spine,
    Chest,
    Neck,
    Head,
    LeftShoulder,
    RightShoulder,
    LeftUpperArm,
    RightUpperArm,
    LeftLowerArm,
    RightLowerArm,
    LeftHand,
    RightHand,
    LeftToes,
    RightToes,
    LeftEye,
    RightEye,
    Jaw,
    LeftThumbProximal,
    LeftThumbIntermediate,
    LeftThumbDistal,
    LeftIndexProximal,
    LeftIndexIntermediate,
    LeftIndexDistal,
    LeftMiddleProximal,
    LeftMiddleIntermediate,
    LeftMiddleDistal,
    LeftRingProximal,
    LeftRingIntermediate,
    LeftRingDistal,
    LeftLittleProximal,
    LeftLittleIntermediate,
    LeftLittleDistal,
    RightThumbProximal,
    RightThumbIntermediate,
    RightThumbDistal,
    RightIndexProximal,
    RightIndexIntermediate,
    RightIndexDistal,
    RightMiddleProximal,
    RightMiddleIntermediate,
    RightMiddleDistal,
    RightRingProximal,
    RightRingIntermediate,
    RightRingDistal,
    RightLittleProximal,
    RightLittleIntermediate,
    RightLittleDistal,
    UpperChest,
}

impl HumanBoneName {
    /// Returns the role name as used in VRM JSON and legacy custom properties.
    pub fn as_str(&self) -> &'static str {
        match self {
            HumanBoneName::Hips => "hips",
            HumanBoneName::LeftUpperLeg => "leftUpperLeg",
            HumanBoneName::RightUpperLeg => "rightUpperLeg",
            HumanBoneName::LeftLowerLeg => "leftLowerLeg",
            HumanBoneName::RightLowerLeg => "rightLowerLeg",
            HumanBoneName::LeftFoot => "leftFoot",
            HumanBoneName::RightFoot => "rightFoot",
            HumanBoneName::Spine => "spine",
            HumanBoneName::Chest => "chest",
            HumanBoneName::Neck => "neck",
            HumanBoneName::Head => "head",
            HumanBoneName::LeftShoulder => "leftShoulder",
            HumanBoneName::RightShoulder => "rightShoulder",
            HumanBoneName::LeftUpperArm => "leftUpperArm",
            HumanBoneName::RightUpperArm => "rightUpperArm",
            HumanBoneName::LeftLowerArm => "leftLowerArm",
            HumanBoneName::RightLowerArm => "rightLowerArm",
            HumanBoneName::LeftHand => "leftHand",
            HumanBoneName::RightHand => "rightHand",
            HumanBoneName::LeftToes => "leftToes",
            HumanBoneName::RightToes => "rightToes",
            HumanBoneName::LeftEye => "leftEye",
            HumanBoneName::RightEye => "rightEye",
            HumanBoneName::Jaw => "jaw",
            HumanBoneName::LeftThumbProximal => "leftThumbProximal",
            HumanBoneName::LeftThumbIntermediate => "leftThumbIntermediate",
            HumanBoneName::LeftThumbDistal => "leftThumbDistal",
            HumanBoneName::LeftIndexProximal => "leftIndexProximal",
            HumanBoneName::LeftIndexIntermediate => "leftIndexIntermediate",
            HumanBoneName::LeftIndexDistal => "leftIndexDistal",
            HumanBoneName::LeftMiddleProximal => "leftMiddleProximal",
            HumanBoneName::LeftMiddleIntermediate => "leftMiddleIntermediate",
            HumanBoneName::LeftMiddleDistal => "leftMiddleDistal",
            HumanBoneName::LeftRingProximal => "leftRingProximal",
            HumanBoneName::LeftRingIntermediate => "leftRingIntermediate",
            HumanBoneName::LeftRingDistal => "leftRingDistal",
            HumanBoneName::LeftLittleProximal => "leftLittleProximal",
            HumanBoneName::LeftLittleIntermediate => "leftLittleIntermediate",
            HumanBoneName::LeftLittleDistal => "leftLittleDistal",
            HumanBoneName::RightThumbProximal => "rightThumbProximal",
            HumanBoneName::RightThumbIntermediate => "rightThumbIntermediate",
            HumanBoneName::RightThumbDistal => "rightThumbDistal",
            HumanBoneName::RightIndexProximal => "rightIndexProximal",
            HumanBoneName::RightIndexIntermediate => "rightIndexIntermediate",
            HumanBoneName::RightIndexDistal => "rightIndexDistal",
            HumanBoneName::RightMiddleProximal => "rightMiddleProximal",
            HumanBoneName::RightMiddleIntermediate => "rightMiddleIntermediate",
            HumanBoneName::RightMiddleDistal => "rightMiddleDistal",
            HumanBoneName::RightRingProximal => "rightRingProximal",
            HumanBoneName::RightRingIntermediate => "rightRingIntermediate",
            HumanBoneName::RightRingDistal => "rightRingDistal",
            HumanBoneName::RightLittleProximal => "rightLittleProximal",
            HumanBoneName::RightLittleIntermediate => "rightLittleIntermediate",
            HumanBoneName::RightLittleDistal => "rightLittleDistal",
            HumanBoneName::UpperChest => "upperChest",
        }
    }

    /// Returns true if a VRM 0.x humanoid must assign this role.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            HumanBoneName::Hips
                | HumanBoneName::LeftUpperLeg
                | HumanBoneName::RightUpperLeg
                | HumanBoneName::LeftLowerLeg
                | HumanBoneName::RightLowerLeg
                | HumanBoneName::LeftFoot
                | HumanBoneName::RightFoot
                | HumanBoneName::Spine
                | HumanBoneName::Chest
                | HumanBoneName::Neck
                | HumanBoneName::Head
                | HumanBoneName::LeftUpperArm
                | HumanBoneName::RightUpperArm
                | HumanBoneName::LeftLowerArm
                | HumanBoneName::RightLowerArm
                | HumanBoneName::LeftHand
                | HumanBoneName::RightHand
        )
    }

    /// Returns all roles in canonical order.
    pub fn all() -> &'static [HumanBoneName] {
        &[
            HumanBoneName::Hips,
            HumanBoneName::LeftUpperLeg,
            HumanBoneName::RightUpperLeg,
            HumanBoneName::LeftLowerLeg,
            HumanBoneName::RightLowerLeg,
            HumanBoneName::LeftFoot,
            HumanBoneName::RightFoot,
            HumanBoneName::Spine,
            HumanBoneName::Chest,
            HumanBoneName::Neck,
            HumanBoneName::Head,
            HumanBoneName::LeftShoulder,
            HumanBoneName::RightShoulder,
            HumanBoneName::LeftUpperArm,
            HumanBoneName::RightUpperArm,
            HumanBoneName::LeftLowerArm,
            HumanBoneName::RightLowerArm,
            HumanBoneName::LeftHand,
            HumanBoneName::RightHand,
            HumanBoneName::LeftToes,
            HumanBoneName::RightToes,
            HumanBoneName::LeftEye,
            HumanBoneName::RightEye,
            HumanBoneName::Jaw,
            HumanBoneName::LeftThumbProximal,
            HumanBoneName::LeftThumbIntermediate,
            HumanBoneName::LeftThumbDistal,
            HumanBoneName::LeftIndexProximal,
            HumanBoneName::LeftIndexIntermediate,
            HumanBoneName::LeftIndexDistal,
            HumanBoneName::LeftMiddleProximal,
            HumanBoneName::LeftMiddleIntermediate,
            HumanBoneName::LeftMiddleDistal,
            HumanBoneName::LeftRingProximal,
            HumanBoneName::LeftRingIntermediate,
            HumanBoneName::LeftRingDistal,
            HumanBoneName::LeftLittleProximal,
            HumanBoneName::LeftLittleIntermediate,
            HumanBoneName::LeftLittleDistal,
            HumanBoneName::RightThumbProximal,
            HumanBoneName::RightThumbIntermediate,
            HumanBoneName::RightThumbDistal,
            HumanBoneName::RightIndexProximal,
            HumanBoneName::RightIndexIntermediate,
            HumanBoneName::RightIndexDistal,
            HumanBoneName::RightMiddleProximal,
            HumanBoneName::RightMiddleIntermediate,
            HumanBoneName::RightMiddleDistal,
            HumanBoneName::RightRingProximal,
            HumanBoneName::RightRingIntermediate,
            HumanBoneName::RightRingDistal,
            HumanBoneName::RightLittleProximal,
            HumanBoneName::RightLittleIntermediate,
            HumanBoneName::RightLittleDistal,
            HumanBoneName::UpperChest,
        ]
    }
}

impl std::fmt::Display for HumanBoneName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for HumanBoneName {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HumanBoneName::all()
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| SchemaError::unknown_name("human bone", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_table_is_complete() {
        assert_eq!(HumanBoneName::all().len(), HUMAN_BONE_COUNT);
        let required = HumanBoneName::all().iter().filter(|b| b.is_required()).count();
        assert_eq!(required, 17);
    }

    #[test]
    fn test_names_round_trip_through_from_str() {
        for bone in HumanBoneName::all() {
            assert_eq!(bone.as_str().parse::<HumanBoneName>().unwrap(), *bone);
        }
        assert!("Head".parse::<HumanBoneName>().is_err());
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let json = serde_json::to_string(&HumanBoneName::LeftThumbIntermediate).unwrap();
        assert_eq!(json, "\"leftThumbIntermediate\"");
        assert_eq!(HumanBoneName::UpperChest.to_string(), "upperChest");
    }
}
