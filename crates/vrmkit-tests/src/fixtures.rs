//! Test fixture utilities for building legacy scenes.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;
use vrmkit_migrate::{Scene, SceneRig};
use vrmkit_schema::{
    AddonVersion, CustomProperty, Image, Material, Mesh, SceneObject, TextBlock, TextRef,
};

/// Builder for a scene holding one rig with legacy VRM data.
#[derive(Debug, Clone)]
pub struct LegacyRigFixture {
    rig: SceneRig,
    scene: Scene,
}

impl LegacyRigFixture {
    /// Create a rig at add-on version 0.0.0 with no bones.
    pub fn new(name: &str) -> Self {
        Self {
            rig: SceneRig::new(name),
            scene: Scene::default(),
        }
    }

    pub fn bones(mut self, bones: &[&str]) -> Self {
        self.rig.bones = bones.iter().map(|bone| bone.to_string()).collect();
        self
    }

    pub fn version(mut self, version: AddonVersion) -> Self {
        self.rig.extension.addon_version = version;
        self
    }

    /// Set a custom property on the rig object.
    pub fn object_property(mut self, key: &str, value: impl Into<CustomProperty>) -> Self {
        self.rig
            .object_properties
            .insert(key.to_string(), value.into());
        self
    }

    /// Set a legacy per-role property (`"head": "Head"`) on the armature data.
    pub fn human_bone(mut self, role: &str, bone: &str) -> Self {
        self.rig
            .data_properties
            .insert(role.to_string(), CustomProperty::from(bone));
        self
    }

    /// Set an arbitrary custom property on the armature data.
    pub fn data_property(mut self, key: &str, value: CustomProperty) -> Self {
        self.rig.data_properties.insert(key.to_string(), value);
        self
    }

    /// Attach `value` as a JSON text block referenced by the `key` property.
    pub fn attachment(self, key: &str, value: &Value) -> Self {
        self.raw_attachment(key, &value.to_string())
    }

    /// Attach raw text, which need not be valid JSON.
    pub fn raw_attachment(mut self, key: &str, body: &str) -> Self {
        let text_name = format!("{}.{}", self.rig.name, key);
        self.scene.texts.push(TextBlock::new(text_name.as_str(), body));
        self.rig.object_properties.insert(
            key.to_string(),
            CustomProperty::Text(TextRef { text: text_name }),
        );
        self
    }

    /// Add a sphere collider marker parented to `bone`.
    pub fn collider(mut self, name: &str, bone: &str, radius: f64, location: [f64; 3]) -> Self {
        let marker = SceneObject::sphere_marker(name, self.rig.name.as_str(), bone)
            .with_size(radius)
            .with_location(location);
        self.scene.objects.push(marker);
        self
    }

    pub fn object(mut self, object: SceneObject) -> Self {
        self.scene.objects.push(object);
        self
    }

    pub fn mesh(mut self, name: &str, shape_keys: &[&str]) -> Self {
        self.scene.meshes.push(Mesh {
            name: name.to_string(),
            shape_keys: shape_keys.iter().map(|key| key.to_string()).collect(),
        });
        self
    }

    pub fn material(mut self, name: &str) -> Self {
        self.scene.materials.push(Material {
            name: name.to_string(),
        });
        self
    }

    pub fn image(mut self, name: &str) -> Self {
        self.scene.images.push(Image {
            name: name.to_string(),
        });
        self
    }

    /// Finish the scene. The rig is appended after any rigs already present.
    pub fn build(self) -> Scene {
        let mut scene = self.scene;
        scene.rigs.push(self.rig);
        scene
    }

    /// Merge this rig and its entities into an existing scene.
    pub fn build_into(self, scene: &mut Scene) {
        let built = self.build();
        scene.rigs.extend(built.rigs);
        scene.objects.extend(built.objects);
        scene.meshes.extend(built.meshes);
        scene.materials.extend(built.materials);
        scene.images.extend(built.images);
        scene.texts.extend(built.texts);
    }
}

/// A scene written to a temporary directory.
pub struct SceneFileFixture {
    pub root: TempDir,
    pub scene_path: PathBuf,
}

impl SceneFileFixture {
    /// Write `scene` as `scene.json` in a fresh temp dir.
    pub fn new(scene: &Scene) -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let scene_path = root.path().join("scene.json");
        scene
            .save(&scene_path, true)
            .expect("Failed to write scene file");
        Self { root, scene_path }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn scene_path_str(&self) -> &str {
        self.scene_path.to_str().expect("Non UTF-8 temp path")
    }

    /// Path for an output file in the fixture directory.
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    pub fn load(&self, path: &Path) -> Scene {
        Scene::load(path).expect("Failed to load scene file")
    }
}
