//! In-memory scene: a serializable [`EntityStore`] implementation.
//!
//! A scene file is a JSON snapshot of everything migration reads from a host
//! (rigs with their custom properties and normalized documents, scene
//! objects, meshes, materials, images and text blocks).

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use vrmkit_schema::{
    CustomProperty, EntityStore, Image, Material, Mesh, NormalizedDocument, SceneObject,
    StoreError, StoreResult, TextBlock,
};

use crate::error::{MigrationError, SceneError};
use crate::id::IdSource;
use crate::report::MigrationReport;
use crate::trigger::{migrate_rig, MigrateOptions};

/// A rig (armature object) together with its armature data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneRig {
    pub name: String,
    /// Bone names in skeleton order.
    pub bones: Vec<String>,
    /// Custom properties on the rig object.
    pub object_properties: BTreeMap<String, CustomProperty>,
    /// Custom properties on the armature data.
    pub data_properties: BTreeMap<String, CustomProperty>,
    /// Normalized document owned by the rig.
    pub extension: NormalizedDocument,
}

impl SceneRig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Outcome of migrating one rig of a scene.
#[derive(Debug)]
pub struct RigOutcome {
    pub rig: String,
    pub result: Result<MigrationReport, MigrationError>,
}

/// A loaded scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub rigs: Vec<SceneRig>,
    pub objects: Vec<SceneObject>,
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
    pub images: Vec<Image>,
    pub texts: Vec<TextBlock>,
}

impl Scene {
    /// Parses a scene from JSON.
    ///
    /// Rig names must be unique, as object names are in a host scene.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let scene: Self = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Checks that no two rigs share a name.
    pub fn validate(&self) -> Result<(), SceneError> {
        match self.duplicate_rig_indices().next() {
            Some(index) => Err(SceneError::DuplicateRig(self.rigs[index].name.clone())),
            None => Ok(()),
        }
    }

    /// Indices of rigs whose name was already used by an earlier rig.
    fn duplicate_rig_indices(&self) -> impl Iterator<Item = usize> + '_ {
        let mut seen = HashSet::new();
        self.rigs
            .iter()
            .enumerate()
            .filter(move |&(_, rig)| !seen.insert(rig.name.as_str()))
            .map(|(index, _)| index)
    }

    /// Loads a scene file.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let json = std::fs::read_to_string(path).map_err(|source| SceneError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Serializes the scene to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serializes the scene to compact JSON.
    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Writes the scene to `path`.
    pub fn save(&self, path: &Path, pretty: bool) -> Result<(), SceneError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        std::fs::write(path, json).map_err(|source| SceneError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn rig(&self, name: &str) -> Option<&SceneRig> {
        self.rigs.iter().find(|rig| rig.name == name)
    }

    pub fn rig_mut(&mut self, name: &str) -> Option<&mut SceneRig> {
        self.rigs.iter_mut().find(|rig| rig.name == name)
    }

    fn require_rig(&self, name: &str) -> StoreResult<&SceneRig> {
        self.rig(name)
            .ok_or_else(|| StoreError::RigNotFound(name.to_string()))
    }

    /// Migrates every rig in scene order, as on document load.
    ///
    /// A store fault aborts the pass for that rig only; its document is left
    /// as it was and the fault is returned in its outcome. A rig repeating an
    /// earlier rig's name is never migrated, since the store would answer its
    /// queries with the earlier rig's data.
    pub fn migrate_all(
        &mut self,
        options: &MigrateOptions,
        ids: &mut dyn IdSource,
    ) -> Vec<RigOutcome> {
        let names: Vec<String> = self.rigs.iter().map(|rig| rig.name.clone()).collect();
        let duplicates: HashSet<usize> = self.duplicate_rig_indices().collect();
        info!(rigs = names.len(), "Migrating scene");

        names
            .into_iter()
            .enumerate()
            .map(|(index, name)| {
                if duplicates.contains(&index) {
                    warn!(rig = %name, index, "Skipping rig with a duplicate name");
                    let result = Err(MigrationError::DuplicateRig(name.clone()));
                    return RigOutcome { rig: name, result };
                }
                // The document is taken out so the scene can be queried as a
                // store while it is being rewritten.
                let mut document = std::mem::take(&mut self.rigs[index].extension);
                let result = migrate_rig(&*self, &name, &mut document, options, ids);
                self.rigs[index].extension = document;
                RigOutcome { rig: name, result }
            })
            .collect()
    }
}

impl EntityStore for Scene {
    fn bone_names(&self, rig: &str) -> StoreResult<Vec<String>> {
        Ok(self.require_rig(rig)?.bones.clone())
    }

    fn child_objects(&self, rig: &str) -> StoreResult<Vec<SceneObject>> {
        self.require_rig(rig)?;
        Ok(self
            .objects
            .iter()
            .filter(|object| object.parent.as_deref() == Some(rig))
            .cloned()
            .collect())
    }

    fn object_property(&self, rig: &str, key: &str) -> StoreResult<Option<CustomProperty>> {
        Ok(self.require_rig(rig)?.object_properties.get(key).cloned())
    }

    fn data_property(&self, rig: &str, key: &str) -> StoreResult<Option<CustomProperty>> {
        Ok(self.require_rig(rig)?.data_properties.get(key).cloned())
    }

    fn text(&self, name: &str) -> StoreResult<Option<&TextBlock>> {
        Ok(self.texts.iter().find(|text| text.name == name))
    }

    fn mesh(&self, name: &str) -> StoreResult<Option<&Mesh>> {
        Ok(self.meshes.iter().find(|mesh| mesh.name == name))
    }

    fn material(&self, name: &str) -> StoreResult<Option<&Material>> {
        Ok(self.materials.iter().find(|material| material.name == name))
    }

    fn image(&self, name: &str) -> StoreResult<Option<&Image>> {
        Ok(self.images.iter().find(|image| image.name == name))
    }
}
