//! Add-on and VRM spec versions.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Version of the add-on that last wrote a normalized document.
///
/// Serialized as a 3-element array and ordered lexicographically by
/// `(major, minor, patch)`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AddonVersion(pub u32, pub u32, pub u32);

/// First add-on version whose documents no longer carry legacy custom
/// properties. Documents below it need the legacy migration.
pub const LEGACY_PROPERTIES_SUPERSEDED: AddonVersion = AddonVersion(2, 0, 1);

/// Version stamped onto documents after a migration pass.
pub const ADDON_VERSION: AddonVersion = AddonVersion(2, 3, 0);

impl AddonVersion {
    /// Creates a new version.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self(major, minor, patch)
    }

    /// Returns true if a document at this version still needs the legacy
    /// custom-property migration.
    pub fn needs_legacy_migration(&self) -> bool {
        *self < LEGACY_PROPERTIES_SUPERSEDED
    }
}

impl std::fmt::Display for AddonVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.0, self.1, self.2)
    }
}

impl std::str::FromStr for AddonVersion {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.len() != 3 {
            return Err(SchemaError::InvalidVersion(s.to_string()));
        }
        let mut numbers = [0u32; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| SchemaError::InvalidVersion(s.to_string()))?;
        }
        Ok(Self(numbers[0], numbers[1], numbers[2]))
    }
}

/// VRM spec version targeted by a rig.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecVersion {
    /// VRM 0.x.
    #[default]
    #[serde(rename = "0.0")]
    Vrm0,
    /// VRM 1.0 beta.
    #[serde(rename = "1.0-beta")]
    Vrm1,
}

impl SpecVersion {
    /// Returns the version as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecVersion::Vrm0 => "0.0",
            SpecVersion::Vrm1 => "1.0-beta",
        }
    }

    pub fn is_vrm0(&self) -> bool {
        matches!(self, SpecVersion::Vrm0)
    }

    pub fn is_vrm1(&self) -> bool {
        matches!(self, SpecVersion::Vrm1)
    }
}

impl std::fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
