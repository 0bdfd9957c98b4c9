//! vrmkit legacy data migration engine
//!
//! This crate rewrites VRM 0.x data that older add-on versions kept in ad-hoc
//! custom properties and JSON text attachments into the normalized records of
//! [`vrmkit_schema`].
//!
//! # Overview
//!
//! - **Legacy Data Reader** ([`legacy`]): reads JSON text attachments and
//!   decodes fields into a tri-state [`Field`](legacy::Field).
//! - **Field Migrators** ([`vrm0`]): one per record (meta, humanoid, first
//!   person, blend-shape groups, secondary animation).
//! - **Graph Reconstructor**: rebuilds collider groups from collider markers
//!   and links legacy bone groups to them.
//! - **Orchestrator** ([`orchestrator`]): version gate, step sequencing and the
//!   unconditional [`cleanup`] pass.
//! - **Trigger** ([`trigger`]): per-rig entry point with version stamping;
//!   [`Scene::migrate_all`] migrates a whole scene.
//!
//! Malformed legacy input never fails a pass. It is skipped and recorded in a
//! [`MigrationReport`]. Only entity-store faults are errors.
//!
//! # Example
//!
//! ```
//! use vrmkit_migrate::{migrate_rig, MigrateOptions, Scene, SceneRig, SequentialIds};
//! use vrmkit_schema::{CustomProperty, HumanBoneName, ADDON_VERSION};
//!
//! let mut rig = SceneRig::new("Armature");
//! rig.bones = vec!["Head".to_string()];
//! rig.data_properties.insert("head".to_string(), CustomProperty::from("Head"));
//! let mut scene = Scene { rigs: vec![rig], ..Scene::default() };
//!
//! let mut document = std::mem::take(&mut scene.rigs[0].extension);
//! let report = migrate_rig(
//!     &scene,
//!     "Armature",
//!     &mut document,
//!     &MigrateOptions::default(),
//!     &mut SequentialIds::default(),
//! )
//! .unwrap();
//!
//! assert!(report.legacy_migrated);
//! assert_eq!(document.addon_version, ADDON_VERSION);
//! assert_eq!(document.vrm0.humanoid.assigned_bone(HumanBoneName::Head), Some("Head"));
//! assert_eq!(document.vrm0.first_person.first_person_bone.value, "Head");
//! ```

pub mod cleanup;
pub mod error;
pub mod id;
pub mod legacy;
pub mod orchestrator;
pub mod report;
pub mod scene;
pub mod trigger;
pub mod vrm0;

// Re-export commonly used types at the crate root
pub use cleanup::{cleanup, is_first_person_backfill_unnecessary};
pub use error::{MigrationError, MigrationResult, SceneError};
pub use id::{IdSource, SequentialIds, UuidSource};
pub use orchestrator::{migrate, migrate_legacy_custom_properties};
pub use report::{MigrationReport, MigrationWarning, WarningCode};
pub use scene::{RigOutcome, Scene, SceneRig};
pub use trigger::{migrate_rig, stamp_addon_version, MigrateOptions};
