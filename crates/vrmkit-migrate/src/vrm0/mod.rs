//! Field migrators for the VRM 0.x records.
//!
//! Each migrator fills one normalized record from legacy data. A migrator
//! never fails on malformed input: it keeps the record's defaults, records a
//! warning and moves on. Only entity-store faults propagate.

mod blend_shape;
mod first_person;
mod humanoid;
mod meta;
mod secondary_animation;

use serde_json::{Map, Value};

use crate::report::{MigrationReport, WarningCode};

pub use blend_shape::migrate_blend_shape_groups;
pub use first_person::migrate_first_person;
pub use humanoid::{migrate_human_bone_properties, migrate_humanoid};
pub use meta::migrate_meta;
pub use secondary_animation::migrate_secondary_animation;

/// Returns the attachment root if it is an object.
pub(crate) fn root_object<'a>(
    value: Option<&'a Value>,
    path: &str,
    report: &mut MigrationReport,
) -> Option<&'a Map<String, Value>> {
    match value {
        None => None,
        Some(Value::Object(map)) => Some(map),
        Some(_) => {
            report.warn(
                WarningCode::MalformedAttachment,
                "expected a JSON object",
                path,
            );
            None
        }
    }
}

/// Returns the attachment root if it is an array.
pub(crate) fn root_array<'a>(
    value: Option<&'a Value>,
    path: &str,
    report: &mut MigrationReport,
) -> Option<&'a [Value]> {
    match value {
        None => None,
        Some(Value::Array(items)) => Some(items),
        Some(_) => {
            report.warn(
                WarningCode::MalformedAttachment,
                "expected a JSON array",
                path,
            );
            None
        }
    }
}

/// Returns a list element if it is an object. The caller has already created
/// the output record for it.
pub(crate) fn element_object<'a>(
    item: &'a Value,
    path: &str,
    report: &mut MigrationReport,
) -> Option<&'a Map<String, Value>> {
    let map = item.as_object();
    if map.is_none() {
        report.warn(
            WarningCode::MalformedElement,
            "list element is not an object; keeping defaults",
            path,
        );
    }
    map
}
