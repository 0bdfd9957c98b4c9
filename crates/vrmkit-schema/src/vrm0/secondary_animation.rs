//! VRM 0.x secondary animation: spring-bone groups and collider groups.
//!
//! Collider groups are identified by a generated `uuid`; their display `name`
//! is derived as `"<node>#<uuid>"`. Bone groups refer to collider groups by
//! that name and are re-synchronized through the uuid suffix on refresh.

use serde::{Deserialize, Serialize};

use crate::reference::BoneReference;
use crate::rig::RigSnapshot;

/// A sphere collider backed by a marker object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrm0Collider {
    /// Name of the marker object.
    pub object: String,
    /// Cached marker location relative to its bone.
    pub offset: [f64; 3],
    /// Cached marker display size.
    pub radius: f64,
}

impl Default for Vrm0Collider {
    fn default() -> Self {
        Self {
            object: String::new(),
            offset: [0.0; 3],
            radius: 1.0,
        }
    }
}

impl Vrm0Collider {
    pub fn new(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            ..Self::default()
        }
    }
}

/// Colliders attached to one bone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrm0ColliderGroup {
    pub uuid: String,
    pub name: String,
    pub node: BoneReference,
    pub colliders: Vec<Vrm0Collider>,
}

impl Vrm0ColliderGroup {
    pub fn new(uuid: impl Into<String>, node: BoneReference) -> Self {
        let mut group = Self {
            uuid: uuid.into(),
            name: String::new(),
            node,
            colliders: Vec::new(),
        };
        group.name = group.derived_name();
        group
    }

    /// Name derived from the node and uuid.
    pub fn derived_name(&self) -> String {
        format!("{}#{}", self.node.value, self.uuid)
    }

    /// Recomputes the name and cached collider geometry from `rig`.
    ///
    /// If the node bone no longer exists on the rig the cached geometry is
    /// left as is.
    pub fn refresh(&mut self, rig: &RigSnapshot) {
        self.name = self.derived_name();

        if self.node.resolve(rig).is_none() {
            return;
        }

        self.colliders.retain(|collider| rig.child(&collider.object).is_some());
        for collider in &mut self.colliders {
            if let Some(marker) = rig.child(&collider.object) {
                collider.offset = marker.location;
                collider.radius = marker.marker_size;
            }
        }
    }
}

/// Spring-bone group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrm0BoneGroup {
    pub comment: String,
    pub stiffness: f64,
    pub gravity_power: f64,
    pub gravity_dir: [f64; 3],
    pub drag_force: f64,
    pub center: BoneReference,
    pub hit_radius: f64,
    pub bones: Vec<BoneReference>,
    /// Names of referenced collider groups.
    pub collider_groups: Vec<String>,
}

impl Default for Vrm0BoneGroup {
    fn default() -> Self {
        Self {
            comment: String::new(),
            stiffness: 1.0,
            gravity_power: 0.0,
            gravity_dir: [0.0, 0.0, -1.0],
            drag_force: 0.4,
            center: BoneReference::default(),
            hit_radius: 0.02,
            bones: Vec::new(),
            collider_groups: Vec::new(),
        }
    }
}

impl Vrm0BoneGroup {
    /// Rewrites collider-group references to the current names of the groups
    /// they point at, matching on the uuid after the last `#`. References to
    /// groups that no longer exist are dropped.
    pub fn refresh(&mut self, collider_groups: &[Vrm0ColliderGroup]) {
        self.collider_groups = self
            .collider_groups
            .iter()
            .filter_map(|reference| {
                let uuid = reference.rsplit('#').next().unwrap_or(reference);
                collider_groups
                    .iter()
                    .find(|group| group.uuid == uuid)
                    .map(|group| group.name.clone())
            })
            .collect();
    }
}

/// Secondary animation container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrm0SecondaryAnimation {
    pub bone_groups: Vec<Vrm0BoneGroup>,
    pub collider_groups: Vec<Vrm0ColliderGroup>,
}

impl Vrm0SecondaryAnimation {
    pub fn refresh_collider_groups(&mut self, rig: &RigSnapshot) {
        for collider_group in &mut self.collider_groups {
            collider_group.refresh(rig);
        }
    }

    pub fn refresh_bone_groups(&mut self) {
        let collider_groups = &self.collider_groups;
        for bone_group in &mut self.bone_groups {
            bone_group.refresh(collider_groups);
        }
    }

    /// Refreshes collider groups, then bone groups.
    pub fn refresh(&mut self, rig: &RigSnapshot) {
        self.refresh_collider_groups(rig);
        self.refresh_bone_groups();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SceneObject;
    use pretty_assertions::assert_eq;

    fn rig() -> RigSnapshot {
        RigSnapshot {
            name: "Armature".to_string(),
            bones: vec!["Head".to_string()],
            children: vec![SceneObject::sphere_marker("c0", "Armature", "Head")
                .with_size(0.2)
                .with_location([0.0, 0.1, 0.0])],
        }
    }

    #[test]
    fn test_collider_group_refresh_updates_cache() {
        let mut group = Vrm0ColliderGroup::new("abc", BoneReference::new("Head"));
        group.colliders.push(Vrm0Collider::new("c0"));
        group.colliders.push(Vrm0Collider::new("gone"));

        group.refresh(&rig());

        assert_eq!(group.name, "Head#abc");
        assert_eq!(group.colliders.len(), 1);
        assert_eq!(group.colliders[0].radius, 0.2);
        assert_eq!(group.colliders[0].offset, [0.0, 0.1, 0.0]);
    }

    #[test]
    fn test_collider_group_refresh_with_dangling_bone_keeps_stale_cache() {
        let mut group = Vrm0ColliderGroup::new("abc", BoneReference::new("Tail"));
        group.colliders.push(Vrm0Collider::new("c0"));
        let before = group.colliders.clone();

        group.refresh(&rig());

        assert_eq!(group.name, "Tail#abc");
        assert_eq!(group.colliders, before);
    }

    #[test]
    fn test_bone_group_refresh_resyncs_names_by_uuid() {
        let mut renamed = Vrm0ColliderGroup::new("u1", BoneReference::new("Neck"));
        renamed.node = BoneReference::new("Head");
        renamed.name = renamed.derived_name();

        let mut bone_group = Vrm0BoneGroup {
            collider_groups: vec!["Neck#u1".to_string(), "Hips#u2".to_string()],
            ..Vrm0BoneGroup::default()
        };
        bone_group.refresh(&[renamed]);

        assert_eq!(bone_group.collider_groups, vec!["Head#u1".to_string()]);
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let mut secondary = Vrm0SecondaryAnimation::default();
        let mut group = Vrm0ColliderGroup::new("u1", BoneReference::new("Head"));
        group.colliders.push(Vrm0Collider::new("c0"));
        secondary.collider_groups.push(group);
        secondary.bone_groups.push(Vrm0BoneGroup {
            collider_groups: vec!["Head#u1".to_string()],
            ..Vrm0BoneGroup::default()
        });

        secondary.refresh(&rig());
        let once = secondary.clone();
        secondary.refresh(&rig());

        assert_eq!(secondary, once);
    }
}
