//! Immutable snapshot of a rig's skeleton and children.

use crate::error::StoreResult;
use crate::store::{EntityStore, SceneObject};

/// Bones and child objects of one rig, read once from the entity store.
///
/// Records are rebuilt and refreshed against the snapshot so that no record
/// construction depends on iterating a store that is being mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RigSnapshot {
    pub name: String,
    pub bones: Vec<String>,
    pub children: Vec<SceneObject>,
}

impl RigSnapshot {
    /// Reads bones and children of `rig` from `store`.
    pub fn capture<S: EntityStore + ?Sized>(store: &S, rig: &str) -> StoreResult<Self> {
        Ok(Self {
            name: rig.to_string(),
            bones: store.bone_names(rig)?,
            children: store.child_objects(rig)?,
        })
    }

    pub fn has_bone(&self, name: &str) -> bool {
        self.bones.iter().any(|bone| bone == name)
    }

    /// Returns the child object named `name`.
    pub fn child(&self, name: &str) -> Option<&SceneObject> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Children that encode colliders on an existing bone, in scan order.
    pub fn collider_markers(&self) -> impl Iterator<Item = &SceneObject> {
        self.children
            .iter()
            .filter(move |child| child.is_collider_marker() && self.has_bone(&child.parent_bone))
    }
}
