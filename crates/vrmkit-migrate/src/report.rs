//! Migration diagnostics.
//!
//! Nothing a migrator skips is an error. Each skipped field, dropped element
//! or rejected assignment is recorded here with a stable code and the legacy
//! JSON path it came from, and mirrored to `tracing`.

use serde::Serialize;
use tracing::{debug, warn};

use crate::legacy::Field;

/// Warning codes for migration diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WarningCode {
    /// W101: Field present with the wrong type or outside its closed set
    InvalidFieldType,
    /// W102: Legacy attachment missing, of the wrong type, or not valid JSON
    MalformedAttachment,
    /// W103: Name does not resolve in the entity store
    DanglingReference,
    /// W104: Bone already claimed by an earlier human bone role
    DuplicateHumanBoneTarget,
    /// W105: Collider group name matches no reconstructed collider group
    UnresolvedColliderGroup,
    /// W106: Collider group without collider markers dropped by the rebuild
    DiscardedColliderGroup,
    /// W107: List element is not an object
    MalformedElement,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W101").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::InvalidFieldType => "W101",
            WarningCode::MalformedAttachment => "W102",
            WarningCode::DanglingReference => "W103",
            WarningCode::DuplicateHumanBoneTarget => "W104",
            WarningCode::UnresolvedColliderGroup => "W105",
            WarningCode::DiscardedColliderGroup => "W106",
            WarningCode::MalformedElement => "W107",
        }
    }

    /// Returns true for inconsistencies between records, as opposed to a
    /// single malformed value.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            WarningCode::DuplicateHumanBoneTarget
                | WarningCode::UnresolvedColliderGroup
                | WarningCode::DiscardedColliderGroup
        )
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A migration warning with code, message and legacy path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationWarning {
    pub code: WarningCode,
    pub message: String,
    /// Legacy path of the offending value (e.g. "spring_bone\[0\].bones\[2\]").
    pub path: String,
}

impl std::fmt::Display for MigrationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} (at {})", self.code, self.message, self.path)
    }
}

/// Outcome of one migration pass over one rig.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MigrationReport {
    pub rig: String,
    /// Whether the version-gated legacy migration ran.
    pub legacy_migrated: bool,
    /// Collider groups rebuilt from collider markers.
    pub collider_groups_created: usize,
    /// Whether the first-person bone was backfilled from the head bone.
    pub first_person_backfilled: bool,
    /// Whether the bone-name cache changed.
    pub bone_names_changed: bool,
    pub warnings: Vec<MigrationWarning>,
}

impl MigrationReport {
    pub fn new(rig: impl Into<String>) -> Self {
        Self {
            rig: rig.into(),
            ..Self::default()
        }
    }

    /// Records a warning.
    pub fn warn(&mut self, code: WarningCode, message: impl Into<String>, path: impl Into<String>) {
        let warning = MigrationWarning {
            code,
            message: message.into(),
            path: path.into(),
        };
        if code.is_structural() {
            warn!(rig = %self.rig, code = %code, path = %warning.path, "{}", warning.message);
        } else {
            debug!(rig = %self.rig, code = %code, path = %warning.path, "{}", warning.message);
        }
        self.warnings.push(warning);
    }

    /// Unwraps a decoded field, recording a warning if it was present but
    /// invalid.
    pub fn accept<T>(&mut self, field: Field<T>, path: &str) -> Option<T> {
        match field {
            Field::Valid(value) => Some(value),
            Field::Invalid => {
                self.warn(
                    WarningCode::InvalidFieldType,
                    "value has the wrong type; keeping the default",
                    path,
                );
                None
            }
            Field::Absent => None,
        }
    }

    /// Warnings with the given code.
    pub fn warnings_with(&self, code: WarningCode) -> impl Iterator<Item = &MigrationWarning> {
        self.warnings.iter().filter(move |w| w.code == code)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
