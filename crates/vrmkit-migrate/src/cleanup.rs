//! Cleanup pass run on every migration, whatever the document's version.

use vrmkit_schema::{BoneReference, HumanBoneName, RigSnapshot, Vrm0Document};

use crate::report::MigrationReport;

/// Returns true when the first-person bone is already set or there is no
/// head bone to copy into it.
pub fn is_first_person_backfill_unnecessary(vrm0: &Vrm0Document) -> bool {
    !vrm0.first_person.first_person_bone.is_empty()
        || vrm0.humanoid.assigned_bone(HumanBoneName::Head).is_none()
}

/// Re-derives cached state from `rig`.
///
/// Refreshes secondary-animation caches, backfills the first-person bone from
/// the head bone and recomputes the bone-name cache. Idempotent.
pub fn cleanup(rig: &RigSnapshot, vrm0: &mut Vrm0Document, report: &mut MigrationReport) {
    vrm0.secondary_animation.refresh(rig);

    if !is_first_person_backfill_unnecessary(vrm0) {
        if let Some(head) = vrm0.humanoid.assigned_bone(HumanBoneName::Head) {
            vrm0.first_person.first_person_bone = BoneReference::new(head);
            report.first_person_backfilled = true;
        }
    }

    report.bone_names_changed = vrm0.humanoid.check_last_bone_names_and_update(rig);
}
