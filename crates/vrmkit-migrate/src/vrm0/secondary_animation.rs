//! Secondary-animation migration and spring-bone graph reconstruction.
//!
//! Collider groups are not stored in legacy data at all. They are rebuilt from
//! the sphere markers parented to the rig's bones, one group per bone. Legacy
//! bone groups then name their collider groups by bone, and each name is
//! resolved against the groups rebuilt in the same pass.

use linked_hash_map::LinkedHashMap;
use serde_json::{Map, Value};
use vrmkit_schema::vrm0::{
    Vrm0BoneGroup, Vrm0Collider, Vrm0ColliderGroup, Vrm0SecondaryAnimation,
};
use vrmkit_schema::{BoneReference, RigSnapshot, SceneObject};

use super::{element_object, root_array};
use crate::id::IdSource;
use crate::legacy::{
    array_field, child_path, index_path, number_field, str_field, swap_yz, vector3_field,
};
use crate::report::{MigrationReport, WarningCode};

const PATH: &str = "spring_bone";

/// Rebuilds collider groups from `rig` and migrates bone groups from the
/// `spring_bone` attachment.
///
/// Both lists are replaced, never extended: collider groups come only from
/// the rig's markers and bone groups only from the attachment, so running the
/// pass again yields the same graph.
pub fn migrate_secondary_animation(
    rig: &RigSnapshot,
    secondary_animation: &mut Vrm0SecondaryAnimation,
    spring_bone: Option<&Value>,
    ids: &mut dyn IdSource,
    report: &mut MigrationReport,
) {
    let created = reconstruct_collider_groups(rig, ids);
    report.collider_groups_created += created.len();

    let bone_group_dicts = root_array(spring_bone, PATH, report).unwrap_or_default();
    let mut bone_groups = Vec::with_capacity(bone_group_dicts.len());
    for (index, item) in bone_group_dicts.iter().enumerate() {
        let path = index_path(PATH, index);
        let mut bone_group = Vrm0BoneGroup::default();
        if let Some(map) = element_object(item, &path, report) {
            migrate_bone_group(&mut bone_group, map, &created, &path, report);
        }
        bone_groups.push(bone_group);
    }

    for discarded in &secondary_animation.collider_groups {
        let node = discarded.node.value.as_str();
        if !created.iter().any(|group| group.node.value == node) {
            report.warn(
                WarningCode::DiscardedColliderGroup,
                format!(
                    "collider group '{}' has no collider markers and was dropped",
                    discarded.name
                ),
                "colliderGroups",
            );
        }
    }
    secondary_animation.collider_groups = created;
    secondary_animation.bone_groups = bone_groups;
    secondary_animation.refresh_bone_groups();
}

/// Groups collider markers by parent bone, in scan order, and creates one
/// refreshed collider group per bone.
fn reconstruct_collider_groups(
    rig: &RigSnapshot,
    ids: &mut dyn IdSource,
) -> Vec<Vrm0ColliderGroup> {
    let mut markers_by_bone: LinkedHashMap<&str, Vec<&SceneObject>> = LinkedHashMap::new();
    for marker in rig.collider_markers() {
        markers_by_bone
            .entry(marker.parent_bone.as_str())
            .or_insert_with(Vec::new)
            .push(marker);
    }

    let mut collider_groups = Vec::with_capacity(markers_by_bone.len());
    for (bone, markers) in markers_by_bone {
        let mut collider_group =
            Vrm0ColliderGroup::new(ids.next_id(), BoneReference::new(bone));
        collider_group.colliders = markers
            .iter()
            .map(|marker| Vrm0Collider::new(marker.name.as_str()))
            .collect();
        collider_group.refresh(rig);
        collider_groups.push(collider_group);
    }
    collider_groups
}

fn migrate_bone_group(
    bone_group: &mut Vrm0BoneGroup,
    map: &Map<String, Value>,
    collider_groups: &[Vrm0ColliderGroup],
    path: &str,
    report: &mut MigrationReport,
) {
    let comment = str_field(map, "comment");
    if let Some(comment) = report.accept(comment, &child_path(path, "comment")) {
        bone_group.comment = comment.to_string();
    }

    let numbers = [
        ("stiffiness", &mut bone_group.stiffness),
        ("gravityPower", &mut bone_group.gravity_power),
        ("dragForce", &mut bone_group.drag_force),
        ("hitRadius", &mut bone_group.hit_radius),
    ];
    for (key, slot) in numbers {
        if let Some(value) = report.accept(number_field(map, key), &child_path(path, key)) {
            *slot = value;
        }
    }

    let gravity_dir = vector3_field(map, "gravityDir");
    if let Some(gravity_dir) = report.accept(gravity_dir, &child_path(path, "gravityDir")) {
        bone_group.gravity_dir = swap_yz(gravity_dir);
    }

    if let Some(center) = report.accept(str_field(map, "center"), &child_path(path, "center")) {
        bone_group.center = BoneReference::new(center);
    }

    let bones_path = child_path(path, "bones");
    if let Some(bones) = report.accept(array_field(map, "bones"), &bones_path) {
        for (index, bone) in bones.iter().enumerate() {
            // Non-string entries still occupy a slot.
            let reference = match bone.as_str() {
                Some(name) => BoneReference::new(name),
                None => {
                    report.warn(
                        WarningCode::InvalidFieldType,
                        "bone entry is not a string",
                        index_path(&bones_path, index),
                    );
                    BoneReference::default()
                }
            };
            bone_group.bones.push(reference);
        }
    }

    let names_path = child_path(path, "colliderGroups");
    let Some(names) = report.accept(array_field(map, "colliderGroups"), &names_path) else {
        return;
    };
    for (index, name) in names.iter().enumerate() {
        let name_path = index_path(&names_path, index);
        let Some(name) = name.as_str() else {
            report.warn(
                WarningCode::InvalidFieldType,
                "collider group entry is not a string",
                name_path,
            );
            continue;
        };
        match collider_groups.iter().find(|group| group.node.value == name) {
            Some(collider_group) => {
                bone_group.collider_groups.push(collider_group.name.clone());
            }
            None => report.warn(
                WarningCode::UnresolvedColliderGroup,
                format!("no collider group on bone '{}'", name),
                name_path,
            ),
        }
    }
}
