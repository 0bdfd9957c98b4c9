//! Identifier sources for generated collider groups.

use uuid::Uuid;

/// Produces unique identifiers for records created during migration.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Random UUID v4 rendered as 32 lowercase hex digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Deterministic ids (`"000...001"`, `"000...002"`, ...) in the same format as
/// [`UuidSource`]. Used for reproducible runs.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    issued: u128,
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        self.issued += 1;
        format!("{:032x}", self.issued)
    }
}
