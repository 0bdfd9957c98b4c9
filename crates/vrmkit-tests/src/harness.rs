//! Helpers that run a migration pass on a fixture scene.

use vrmkit_migrate::{
    migrate, migrate_rig, MigrateOptions, MigrationReport, MigrationResult, Scene,
    SequentialIds,
};
use vrmkit_schema::NormalizedDocument;

fn with_document<T>(
    scene: &mut Scene,
    rig: &str,
    pass: impl FnOnce(&Scene, &mut NormalizedDocument) -> T,
) -> T {
    let index = scene
        .rigs
        .iter()
        .position(|candidate| candidate.name == rig)
        .expect("Rig not in fixture scene");
    let mut document = std::mem::take(&mut scene.rigs[index].extension);
    let result = pass(&*scene, &mut document);
    scene.rigs[index].extension = document;
    result
}

/// Run the trigger with version stamping and deterministic ids.
pub fn migrate_stamped(scene: &mut Scene, rig: &str) -> MigrationResult<MigrationReport> {
    run_trigger(scene, rig, &MigrateOptions::default())
}

/// Run the trigger without touching the add-on version.
pub fn migrate_unstamped(scene: &mut Scene, rig: &str) -> MigrationResult<MigrationReport> {
    run_trigger(scene, rig, &MigrateOptions { stamp_version: false })
}

fn run_trigger(
    scene: &mut Scene,
    rig: &str,
    options: &MigrateOptions,
) -> MigrationResult<MigrationReport> {
    with_document(scene, rig, |store, document| {
        migrate_rig(store, rig, document, options, &mut SequentialIds::default())
    })
}

/// Run the orchestrator directly, bypassing the trigger.
pub fn run_orchestrator(scene: &mut Scene, rig: &str) -> MigrationResult<MigrationReport> {
    with_document(scene, rig, |store, document| {
        migrate(store, rig, document, &mut SequentialIds::default())
    })
}

/// The normalized document of `rig`.
pub fn document<'a>(scene: &'a Scene, rig: &str) -> &'a NormalizedDocument {
    &scene.rig(rig).expect("Rig not in fixture scene").extension
}
