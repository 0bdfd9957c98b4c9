//! Blend-shape group migration from the `blendshape_group` attachment.

use serde_json::{Map, Value};
use vrmkit_schema::vrm0::{
    BlendShapePreset, Vrm0BlendShapeBind, Vrm0BlendShapeGroup, Vrm0BlendShapeMaster,
    Vrm0MaterialValueBind,
};
use vrmkit_schema::{EntityStore, MaterialReference, MeshReference, StoreResult};

use super::{element_object, root_array};
use crate::legacy::{
    array_field, bool_field, child_path, index_path, number_field, number_or_zero, str_field,
};
use crate::report::{MigrationReport, WarningCode};

const PATH: &str = "blendshape_group";

/// Replaces the blend-shape groups with one group per legacy list entry, in
/// list order. An absent or unreadable list leaves no groups.
pub fn migrate_blend_shape_groups<S: EntityStore + ?Sized>(
    store: &S,
    master: &mut Vrm0BlendShapeMaster,
    blendshape_group: Option<&Value>,
    report: &mut MigrationReport,
) -> StoreResult<()> {
    let items = root_array(blendshape_group, PATH, report).unwrap_or_default();

    let mut groups = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let path = index_path(PATH, index);
        let mut group = Vrm0BlendShapeGroup::default();
        if let Some(map) = element_object(item, &path, report) {
            migrate_group(store, &mut group, map, &path, report)?;
        }
        groups.push(group);
    }
    master.blend_shape_groups = groups;

    Ok(())
}

fn migrate_group<S: EntityStore + ?Sized>(
    store: &S,
    group: &mut Vrm0BlendShapeGroup,
    map: &Map<String, Value>,
    path: &str,
    report: &mut MigrationReport,
) -> StoreResult<()> {
    if let Some(name) = report.accept(str_field(map, "name"), &child_path(path, "name")) {
        group.name = name.to_string();
    }

    let preset_path = child_path(path, "presetName");
    if let Some(preset) = report.accept(str_field(map, "presetName"), &preset_path) {
        match BlendShapePreset::from_name(preset) {
            Some(preset) => group.preset_name = preset,
            None => report.warn(
                WarningCode::InvalidFieldType,
                format!("unknown blend shape preset '{}'", preset),
                preset_path,
            ),
        }
    }

    let binds_path = child_path(path, "binds");
    if let Some(items) = report.accept(array_field(map, "binds"), &binds_path) {
        for (index, item) in items.iter().enumerate() {
            let bind = migrate_bind(store, item, &index_path(&binds_path, index), report)?;
            group.binds.push(bind);
        }
    }

    let values_path = child_path(path, "materialValues");
    if let Some(items) = report.accept(array_field(map, "materialValues"), &values_path) {
        for (index, item) in items.iter().enumerate() {
            let item_path = index_path(&values_path, index);
            let material_value = migrate_material_value(store, item, &item_path, report)?;
            group.material_values.push(material_value);
        }
    }

    let binary_path = child_path(path, "isBinary");
    if let Some(is_binary) = report.accept(bool_field(map, "isBinary"), &binary_path) {
        group.is_binary = is_binary;
    }

    Ok(())
}

fn migrate_bind<S: EntityStore + ?Sized>(
    store: &S,
    item: &Value,
    path: &str,
    report: &mut MigrationReport,
) -> StoreResult<Vrm0BlendShapeBind> {
    let mut bind = Vrm0BlendShapeBind::default();
    let Some(map) = element_object(item, path, report) else {
        return Ok(bind);
    };

    let mesh_path = child_path(path, "mesh");
    if let Some(mesh_name) = report.accept(str_field(map, "mesh"), &mesh_path) {
        let reference = MeshReference::new(mesh_name);
        match reference.resolve(store)? {
            Some(mesh) => {
                // The shape key is only meaningful on a mesh that exists.
                let index_path = child_path(path, "index");
                if let Some(index) = report.accept(str_field(map, "index"), &index_path) {
                    if mesh.has_shape_key(index) {
                        bind.index = index.to_string();
                    } else {
                        report.warn(
                            WarningCode::DanglingReference,
                            format!("mesh '{}' has no shape key '{}'", mesh_name, index),
                            index_path,
                        );
                    }
                }
                bind.mesh = reference;
            }
            None => report.warn(
                WarningCode::DanglingReference,
                format!("mesh '{}' does not exist", mesh_name),
                mesh_path,
            ),
        }
    }

    let weight_path = child_path(path, "weight");
    if let Some(weight) = report.accept(number_field(map, "weight"), &weight_path) {
        bind.weight = weight;
    }

    Ok(bind)
}

fn migrate_material_value<S: EntityStore + ?Sized>(
    store: &S,
    item: &Value,
    path: &str,
    report: &mut MigrationReport,
) -> StoreResult<Vrm0MaterialValueBind> {
    let mut material_value = Vrm0MaterialValueBind::default();
    let Some(map) = element_object(item, path, report) else {
        return Ok(material_value);
    };

    let material_path = child_path(path, "materialName");
    if let Some(name) = report.accept(str_field(map, "materialName"), &material_path) {
        let reference = MaterialReference::new(name);
        if reference.resolve(store)?.is_some() {
            material_value.material = reference;
        } else {
            report.warn(
                WarningCode::DanglingReference,
                format!("material '{}' does not exist", name),
                material_path,
            );
        }
    }

    let property_path = child_path(path, "propertyName");
    if let Some(property) = report.accept(str_field(map, "propertyName"), &property_path) {
        material_value.property_name = property.to_string();
    }

    let target_path = child_path(path, "targetValue");
    if let Some(values) = report.accept(array_field(map, "targetValue"), &target_path) {
        material_value.target_value = values.iter().map(number_or_zero).collect();
    }

    Ok(material_value)
}
