//! Migration orchestrator.
//!
//! A rig below [`LEGACY_PROPERTIES_SUPERSEDED`] still keeps its VRM data in
//! legacy custom properties and text attachments. [`migrate`] moves that data
//! into the normalized document once, then always runs the cleanup pass.
//! The add-on version is never changed here; see
//! [`stamp_addon_version`](crate::trigger::stamp_addon_version).
//!
//! [`LEGACY_PROPERTIES_SUPERSEDED`]: vrmkit_schema::LEGACY_PROPERTIES_SUPERSEDED

use serde_json::Value;
use tracing::{debug, info};
use vrmkit_schema::{EntityStore, NormalizedDocument, RigSnapshot, StoreResult, Vrm0Document};

use crate::cleanup::cleanup;
use crate::error::MigrationResult;
use crate::id::IdSource;
use crate::legacy::{read_text_json, Attachment};
use crate::report::{MigrationReport, WarningCode};
use crate::vrm0::{
    migrate_blend_shape_groups, migrate_first_person, migrate_human_bone_properties,
    migrate_humanoid, migrate_meta, migrate_secondary_animation,
};

/// Text attachment keys on the rig object.
pub const BLEND_SHAPE_GROUP_KEY: &str = "blendshape_group";
pub const FIRST_PERSON_PARAMS_KEY: &str = "firstPerson_params";
pub const HUMANOID_PARAMS_KEY: &str = "humanoid_params";
pub const SPRING_BONE_KEY: &str = "spring_bone";

/// Migrates one rig's document.
///
/// # Arguments
/// * `store` - Entity store the rig lives in
/// * `rig` - Name of the rig object
/// * `document` - The rig's normalized document
/// * `ids` - Source of collider group identifiers
///
/// # Returns
/// A report of what was migrated and skipped. Only store faults are errors; a
/// failed pass may leave `document` partially migrated.
pub fn migrate<S: EntityStore + ?Sized>(
    store: &S,
    rig: &str,
    document: &mut NormalizedDocument,
    ids: &mut dyn IdSource,
) -> MigrationResult<MigrationReport> {
    info!(rig, addon_version = %document.addon_version, "Migrating rig");

    let snapshot = RigSnapshot::capture(store, rig)?;
    let mut report = MigrationReport::new(rig);

    document.vrm0.humanoid.fixup_human_bones();

    if document.addon_version.needs_legacy_migration() {
        migrate_legacy_custom_properties(store, &snapshot, &mut document.vrm0, ids, &mut report)?;
        report.legacy_migrated = true;
    } else {
        debug!(rig, "Legacy properties already migrated");
    }

    cleanup(&snapshot, &mut document.vrm0, &mut report);

    info!(
        rig,
        legacy_migrated = report.legacy_migrated,
        warnings = report.warnings.len(),
        "Rig migrated"
    );
    Ok(report)
}

/// Runs the legacy migration steps in order: meta, blend-shape groups,
/// first person, humanoid, secondary animation, then per-role human bone
/// properties.
pub fn migrate_legacy_custom_properties<S: EntityStore + ?Sized>(
    store: &S,
    rig: &RigSnapshot,
    vrm0: &mut Vrm0Document,
    ids: &mut dyn IdSource,
    report: &mut MigrationReport,
) -> StoreResult<()> {
    let name = rig.name.as_str();

    migrate_meta(store, name, &mut vrm0.meta, report)?;

    let blend_shape_group = read_attachment(store, name, BLEND_SHAPE_GROUP_KEY, report)?;
    migrate_blend_shape_groups(
        store,
        &mut vrm0.blend_shape_master,
        blend_shape_group.as_ref(),
        report,
    )?;

    let first_person_params = read_attachment(store, name, FIRST_PERSON_PARAMS_KEY, report)?;
    migrate_first_person(
        store,
        &mut vrm0.first_person,
        first_person_params.as_ref(),
        report,
    )?;

    let humanoid_params = read_attachment(store, name, HUMANOID_PARAMS_KEY, report)?;
    migrate_humanoid(&mut vrm0.humanoid, humanoid_params.as_ref(), report);

    let spring_bone = read_attachment(store, name, SPRING_BONE_KEY, report)?;
    migrate_secondary_animation(
        rig,
        &mut vrm0.secondary_animation,
        spring_bone.as_ref(),
        ids,
        report,
    );

    migrate_human_bone_properties(store, name, &mut vrm0.humanoid, report)
}

/// Reads a text attachment, treating every unreadable attachment as absent.
fn read_attachment<S: EntityStore + ?Sized>(
    store: &S,
    rig: &str,
    key: &str,
    report: &mut MigrationReport,
) -> StoreResult<Option<Value>> {
    Ok(match read_text_json(store, rig, key)? {
        Attachment::Json(value) => Some(value),
        Attachment::Missing => None,
        Attachment::Unreadable(fault) => {
            report.warn(WarningCode::MalformedAttachment, fault.to_string(), key);
            None
        }
    })
}
