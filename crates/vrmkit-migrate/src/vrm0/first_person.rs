//! First-person migration from the `firstPerson_params` attachment.

use serde_json::Value;
use vrmkit_schema::vrm0::{FirstPersonFlag, LookAtType, Vrm0FirstPerson, Vrm0MeshAnnotation};
use vrmkit_schema::{BoneReference, EntityStore, MeshReference, StoreResult};

use super::{element_object, root_object};
use crate::legacy::{
    array_field, child_path, curve_field, index_path, number_field, object_field, str_field,
    swap_yz, vector3_field,
};
use crate::report::{MigrationReport, WarningCode};

const PATH: &str = "firstPerson_params";

/// Migrates the first-person record.
pub fn migrate_first_person<S: EntityStore + ?Sized>(
    store: &S,
    first_person: &mut Vrm0FirstPerson,
    first_person_params: Option<&Value>,
    report: &mut MigrationReport,
) -> StoreResult<()> {
    let Some(params) = root_object(first_person_params, PATH, report) else {
        return Ok(());
    };

    let path = child_path(PATH, "firstPersonBone");
    if let Some(bone) = report.accept(str_field(params, "firstPersonBone"), &path) {
        first_person.first_person_bone = BoneReference::new(bone);
    }

    let path = child_path(PATH, "firstPersonBoneOffset");
    if let Some(offset) = report.accept(vector3_field(params, "firstPersonBoneOffset"), &path) {
        first_person.first_person_bone_offset = swap_yz(offset);
    }

    let path = child_path(PATH, "meshAnnotations");
    if let Some(items) = report.accept(array_field(params, "meshAnnotations"), &path) {
        let mut annotations = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let item_path = index_path(&path, index);
            annotations.push(migrate_mesh_annotation(store, item, &item_path, report)?);
        }
        first_person.mesh_annotations = annotations;
    }

    let path = child_path(PATH, "lookAtTypeName");
    if let Some(name) = report.accept(str_field(params, "lookAtTypeName"), &path) {
        match LookAtType::from_name(name) {
            Some(look_at_type) => first_person.look_at_type_name = look_at_type,
            None => report.warn(
                WarningCode::InvalidFieldType,
                format!("unknown look-at type '{}'", name),
                path,
            ),
        }
    }

    let degree_maps = [
        ("lookAtHorizontalInner", &mut first_person.look_at_horizontal_inner),
        ("lookAtHorizontalOuter", &mut first_person.look_at_horizontal_outer),
        ("lookAtVerticalDown", &mut first_person.look_at_vertical_down),
        ("lookAtVerticalUp", &mut first_person.look_at_vertical_up),
    ];
    for (key, degree_map) in degree_maps {
        let path = child_path(PATH, key);
        let Some(look_at) = report.accept(object_field(params, key), &path) else {
            continue;
        };
        let curve = curve_field(look_at, "curve");
        if let Some(curve) = report.accept(curve, &child_path(&path, "curve")) {
            degree_map.curve = curve;
        }
        let x_range = number_field(look_at, "xRange");
        if let Some(x_range) = report.accept(x_range, &child_path(&path, "xRange")) {
            degree_map.x_range = x_range;
        }
        let y_range = number_field(look_at, "yRange");
        if let Some(y_range) = report.accept(y_range, &child_path(&path, "yRange")) {
            degree_map.y_range = y_range;
        }
    }

    Ok(())
}

fn migrate_mesh_annotation<S: EntityStore + ?Sized>(
    store: &S,
    item: &Value,
    path: &str,
    report: &mut MigrationReport,
) -> StoreResult<Vrm0MeshAnnotation> {
    let mut annotation = Vrm0MeshAnnotation::default();
    let Some(map) = element_object(item, path, report) else {
        return Ok(annotation);
    };

    let mesh_path = child_path(path, "mesh");
    if let Some(mesh) = report.accept(str_field(map, "mesh"), &mesh_path) {
        let reference = MeshReference::new(mesh);
        if reference.resolve(store)?.is_some() {
            annotation.mesh = reference;
        } else {
            report.warn(
                WarningCode::DanglingReference,
                format!("mesh '{}' does not exist", mesh),
                mesh_path,
            );
        }
    }

    let flag_path = child_path(path, "firstPersonFlag");
    if let Some(flag) = report.accept(str_field(map, "firstPersonFlag"), &flag_path) {
        match FirstPersonFlag::from_name(flag) {
            Some(flag) => annotation.first_person_flag = flag,
            None => report.warn(
                WarningCode::InvalidFieldType,
                format!("unknown first-person flag '{}'", flag),
                flag_path,
            ),
        }
    }

    Ok(annotation)
}
