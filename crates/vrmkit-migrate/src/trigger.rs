//! Trigger entry points and version stamping.

use tracing::{info, warn};
use vrmkit_schema::{AddonVersion, EntityStore, NormalizedDocument, ADDON_VERSION};

use crate::error::MigrationResult;
use crate::id::IdSource;
use crate::orchestrator::migrate;
use crate::report::MigrationReport;

/// Options for [`migrate_rig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrateOptions {
    /// Stamp the document with [`ADDON_VERSION`] after migrating.
    pub stamp_version: bool,
}

impl Default for MigrateOptions {
    fn default() -> Self {
        Self {
            stamp_version: true,
        }
    }
}

/// Raises the document's add-on version to `version`. Never lowers it.
///
/// Returns true if the version changed.
pub fn stamp_addon_version(document: &mut NormalizedDocument, version: AddonVersion) -> bool {
    if document.addon_version >= version {
        return false;
    }
    info!(from = %document.addon_version, to = %version, "Stamping add-on version");
    document.addon_version = version;
    true
}

/// Migrates one rig now, as on document load or on request.
///
/// The pass runs on a copy of `document`, which is replaced only when the
/// pass succeeds. After a store fault `document` is unchanged and the call
/// can be retried.
pub fn migrate_rig<S: EntityStore + ?Sized>(
    store: &S,
    rig: &str,
    document: &mut NormalizedDocument,
    options: &MigrateOptions,
    ids: &mut dyn IdSource,
) -> MigrationResult<MigrationReport> {
    let mut working = document.clone();
    match migrate(store, rig, &mut working, ids) {
        Ok(report) => {
            if options.stamp_version {
                stamp_addon_version(&mut working, ADDON_VERSION);
            }
            *document = working;
            Ok(report)
        }
        Err(e) => {
            warn!(rig, error = %e, "Migration aborted; document left unchanged");
            Err(e)
        }
    }
}
