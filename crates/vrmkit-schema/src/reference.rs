//! Name-based weak references into host-owned collections.
//!
//! A reference never owns its target. It holds a name that is resolved lazily;
//! an empty name means "unset".

use serde::{Deserialize, Serialize};

use crate::error::StoreResult;
use crate::rig::RigSnapshot;
use crate::store::{EntityStore, Image, Material, Mesh};

/// Weak reference to a bone of the owning rig.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoneReference {
    pub value: String,
}

impl BoneReference {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns the bone name if it exists on `rig`.
    pub fn resolve<'r>(&self, rig: &'r RigSnapshot) -> Option<&'r str> {
        if self.value.is_empty() {
            return None;
        }
        rig.bones
            .iter()
            .find(|bone| **bone == self.value)
            .map(String::as_str)
    }
}

/// Weak reference to a mesh datablock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeshReference {
    pub value: String,
}

impl MeshReference {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn resolve<'s, S: EntityStore + ?Sized>(
        &self,
        store: &'s S,
    ) -> StoreResult<Option<&'s Mesh>> {
        if self.value.is_empty() {
            return Ok(None);
        }
        store.mesh(&self.value)
    }
}

/// Weak reference to a material datablock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialReference {
    pub value: String,
}

impl MaterialReference {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn resolve<'s, S: EntityStore + ?Sized>(
        &self,
        store: &'s S,
    ) -> StoreResult<Option<&'s Material>> {
        if self.value.is_empty() {
            return Ok(None);
        }
        store.material(&self.value)
    }
}

/// Weak reference to an image datablock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageReference {
    pub value: String,
}

impl ImageReference {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn resolve<'s, S: EntityStore + ?Sized>(
        &self,
        store: &'s S,
    ) -> StoreResult<Option<&'s Image>> {
        if self.value.is_empty() {
            return Ok(None);
        }
        store.image(&self.value)
    }
}
