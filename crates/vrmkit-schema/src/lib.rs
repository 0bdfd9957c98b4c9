//! vrmkit normalized VRM schema
//!
//! This crate provides the normalized, versioned records that a rig carries
//! once its VRM metadata has been migrated, along with the seam through which
//! host-owned entities (bones, meshes, materials, images, text blocks, scene
//! objects) are queried.
//!
//! # Overview
//!
//! - **Document**: [`NormalizedDocument`] is the root record owned by one rig.
//!   It is tagged with an [`AddonVersion`] and owns the VRM 0.x records
//!   ([`vrm0`]) plus the VRM 1.0, spring-bone and constraint sections ([`vrm1`]).
//! - **References**: records point at host entities by name only
//!   ([`BoneReference`], [`MeshReference`], ...). Resolution is explicit and
//!   lazy; dangling names are representable.
//! - **Store seam**: [`EntityStore`] is the read-only query interface the host
//!   implements. [`RigSnapshot`] captures a rig's bones and children once so
//!   records can be rebuilt from an immutable view.
//!
//! # Example
//!
//! ```
//! use vrmkit_schema::{BoneReference, HumanBoneName, NormalizedDocument, RigSnapshot};
//!
//! let mut document = NormalizedDocument::default();
//! document.vrm0.humanoid.fixup_human_bones();
//! document
//!     .vrm0
//!     .humanoid
//!     .human_bone_mut(HumanBoneName::Head)
//!     .unwrap()
//!     .node = BoneReference::new("Head");
//!
//! let rig = RigSnapshot {
//!     name: "Armature".to_string(),
//!     bones: vec!["Head".to_string()],
//!     children: Vec::new(),
//! };
//! let head = document.vrm0.humanoid.human_bone(HumanBoneName::Head).unwrap();
//! assert_eq!(head.node.resolve(&rig), Some("Head"));
//! ```
//!
//! # Modules
//!
//! - [`error`]: Store faults and schema errors
//! - [`extension`]: The root [`NormalizedDocument`]
//! - [`hash`]: Canonical document hashing
//! - [`human_bone`]: The closed VRM 0.x human bone role set
//! - [`reference`]: Name-based weak references
//! - [`rig`]: Immutable rig snapshots
//! - [`store`]: The entity-store trait and entity snapshots
//! - [`version`]: Add-on and VRM spec versions
//! - [`vrm0`]: VRM 0.x records and their `refresh` operations
//! - [`vrm1`]: VRM 1.0, spring-bone and node-constraint sections

pub mod error;
pub mod extension;
pub mod hash;
pub mod human_bone;
pub mod reference;
pub mod rig;
pub mod store;
pub mod version;
pub mod vrm0;
pub mod vrm1;

// Re-export commonly used types at the crate root
pub use error::{SchemaError, StoreError, StoreResult};
pub use extension::NormalizedDocument;
pub use hash::{canonicalize_json, document_hash, value_hash};
pub use human_bone::{HumanBoneName, HUMAN_BONE_COUNT};
pub use reference::{BoneReference, ImageReference, MaterialReference, MeshReference};
pub use rig::RigSnapshot;
pub use store::{
    CustomProperty, EntityStore, Image, MarkerShape, Material, Mesh, ObjectKind, ParentType,
    SceneObject, TextBlock, TextRef,
};
pub use version::{AddonVersion, SpecVersion, ADDON_VERSION, LEGACY_PROPERTIES_SUPERSEDED};
pub use vrm0::Vrm0Document;
pub use vrm1::{ConstraintDocument, SpringBoneDocument, Vrm1Document};
