//! Humanoid migration: shaping parameters from `humanoid_params` and bone
//! assignments from per-role armature-data properties.

use serde_json::Value;
use vrmkit_schema::vrm0::Vrm0Humanoid;
use vrmkit_schema::{BoneReference, EntityStore, HumanBoneName, StoreResult};

use super::root_object;
use crate::legacy::{bool_field, child_path, number_field};
use crate::report::{MigrationReport, WarningCode};

/// Migrates humanoid shaping parameters from the `humanoid_params` attachment.
pub fn migrate_humanoid(
    humanoid: &mut Vrm0Humanoid,
    humanoid_params: Option<&Value>,
    report: &mut MigrationReport,
) {
    const PATH: &str = "humanoid_params";
    let Some(params) = root_object(humanoid_params, PATH, report) else {
        return;
    };

    let numbers: [(&str, &mut f64); 7] = [
        ("armStretch", &mut humanoid.arm_stretch),
        ("legStretch", &mut humanoid.leg_stretch),
        ("upperArmTwist", &mut humanoid.upper_arm_twist),
        ("lowerArmTwist", &mut humanoid.lower_arm_twist),
        ("upperLegTwist", &mut humanoid.upper_leg_twist),
        ("lowerLegTwist", &mut humanoid.lower_leg_twist),
        ("feetSpacing", &mut humanoid.feet_spacing),
    ];
    for (key, slot) in numbers {
        if let Some(value) = report.accept(number_field(params, key), &child_path(PATH, key)) {
            *slot = value;
        }
    }

    let path = child_path(PATH, "hasTranslationDoF");
    if let Some(value) = report.accept(bool_field(params, "hasTranslationDoF"), &path) {
        humanoid.has_translation_dof = value;
    }
}

/// Assigns human bones from the legacy per-role properties on the armature
/// data (`"head": "Head"`, ...), visiting roles in canonical order.
///
/// A property only fills a role that is still unassigned. A bone already
/// claimed by an earlier role property is not claimed again.
pub fn migrate_human_bone_properties<S: EntityStore + ?Sized>(
    store: &S,
    rig: &str,
    humanoid: &mut Vrm0Humanoid,
    report: &mut MigrationReport,
) -> StoreResult<()> {
    let mut claimed: Vec<String> = Vec::new();

    for role in HumanBoneName::all() {
        let Some(property) = store.data_property(rig, role.as_str())? else {
            continue;
        };
        let Some(bone_name) = property.as_str().filter(|name| !name.is_empty()) else {
            report.warn(
                WarningCode::InvalidFieldType,
                "human bone property is not a bone name",
                role.as_str(),
            );
            continue;
        };
        if claimed.iter().any(|claimed| claimed == bone_name) {
            report.warn(
                WarningCode::DuplicateHumanBoneTarget,
                format!("bone '{}' is already assigned to another role", bone_name),
                role.as_str(),
            );
            continue;
        }
        claimed.push(bone_name.to_string());

        if let Some(human_bone) = humanoid.human_bone_mut(*role) {
            if human_bone.node.is_empty() {
                human_bone.node = BoneReference::new(bone_name);
            }
        }
    }

    Ok(())
}
