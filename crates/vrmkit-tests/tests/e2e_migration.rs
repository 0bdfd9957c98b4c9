//! End-to-End Migration Tests for vrmkit
//!
//! Tests run whole migration passes over fixture scenes and check the
//! resulting normalized documents and reports.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p vrmkit-tests --test e2e_migration
//! ```

use pretty_assertions::assert_eq;
use serde_json::json;

use vrmkit_migrate::{
    migrate_rig, MigrateOptions, MigrationError, Scene, SequentialIds, WarningCode,
};
use vrmkit_schema::vrm0::{
    BlendShapePreset, FirstPersonFlag, LicenseName, LookAtType, Vrm0Humanoid,
};
use vrmkit_schema::{
    document_hash, AddonVersion, CustomProperty, EntityStore, HumanBoneName, Image, Material,
    Mesh, SceneObject, StoreError, StoreResult, TextBlock, ADDON_VERSION,
};
use vrmkit_tests::fixtures::LegacyRigFixture;
use vrmkit_tests::harness::{document, migrate_stamped, migrate_unstamped, run_orchestrator};

/// A rig carrying every kind of legacy data.
fn full_legacy_rig() -> LegacyRigFixture {
    LegacyRigFixture::new("Armature")
        .version(AddonVersion(1, 0, 0))
        .bones(&["Hips", "Spine", "Head", "HairRoot", "HairTip"])
        .object_property("title", "Alicia")
        .object_property("author", "Dwango")
        .object_property("licenseName", "CC_BY_NC")
        .object_property("texture", "thumbnail.png")
        .image("thumbnail.png")
        .mesh("Face", &["Basis", "Smile"])
        .material("Skin")
        .attachment(
            "blendshape_group",
            &json!([{
                "name": "Joy",
                "presetName": "joy",
                "binds": [{"mesh": "Face", "index": "Smile", "weight": 0.8}],
                "materialValues": [{
                    "materialName": "Skin",
                    "propertyName": "_Color",
                    "targetValue": [1, 0.5, "x", 1]
                }],
                "isBinary": true
            }]),
        )
        .attachment(
            "firstPerson_params",
            &json!({
                "firstPersonBoneOffset": {"x": 0.0, "y": 0.06, "z": 0.1},
                "meshAnnotations": [{"mesh": "Face", "firstPersonFlag": "ThirdPersonOnly"}],
                "lookAtTypeName": "BlendShape",
                "lookAtHorizontalInner": {
                    "curve": [0, 0, 0, 1, 1, 1, 1, 0],
                    "xRange": 90,
                    "yRange": 8
                }
            }),
        )
        .attachment(
            "humanoid_params",
            &json!({"armStretch": 0.1, "legStretch": 0.2, "hasTranslationDoF": true}),
        )
        .attachment(
            "spring_bone",
            &json!([{
                "comment": "hair",
                "stiffiness": 0.5,
                "gravityDir": {"x": 0, "y": -1, "z": 0},
                "center": "Head",
                "bones": ["HairRoot"],
                "colliderGroups": ["Head"]
            }]),
        )
        .collider("head_collider", "Head", 0.1, [0.0, 0.0, 0.05])
        .human_bone("hips", "Hips")
        .human_bone("spine", "Spine")
        .human_bone("head", "Head")
}

#[test]
fn test_full_legacy_migration() {
    let mut scene = full_legacy_rig().build();

    let report = migrate_stamped(&mut scene, "Armature").unwrap();
    let doc = document(&scene, "Armature");
    let vrm0 = &doc.vrm0;

    assert!(report.legacy_migrated);
    assert!(report.first_person_backfilled);
    assert_eq!(report.collider_groups_created, 1);
    assert_eq!(doc.addon_version, ADDON_VERSION);

    // Meta
    assert_eq!(vrm0.meta.title, "Alicia");
    assert_eq!(vrm0.meta.author, "Dwango");
    assert_eq!(vrm0.meta.license_name, LicenseName::CcByNc);
    assert_eq!(vrm0.meta.texture.value, "thumbnail.png");

    // Blend shapes
    let group = &vrm0.blend_shape_master.blend_shape_groups[0];
    assert_eq!(group.name, "Joy");
    assert_eq!(group.preset_name, BlendShapePreset::Joy);
    assert!(group.is_binary);
    assert_eq!(group.binds[0].mesh.value, "Face");
    assert_eq!(group.binds[0].index, "Smile");
    assert_eq!(group.binds[0].weight, 0.8);
    assert_eq!(group.material_values[0].material.value, "Skin");
    assert_eq!(group.material_values[0].target_value, vec![1.0, 0.5, 0.0, 1.0]);

    // First person
    let first_person = &vrm0.first_person;
    assert_eq!(first_person.first_person_bone.value, "Head");
    assert_eq!(first_person.first_person_bone_offset, [0.0, 0.1, 0.06]);
    assert_eq!(first_person.look_at_type_name, LookAtType::BlendShape);
    assert_eq!(
        first_person.mesh_annotations[0].first_person_flag,
        FirstPersonFlag::ThirdPersonOnly
    );
    assert_eq!(first_person.look_at_horizontal_inner.x_range, 90.0);
    assert_eq!(first_person.look_at_horizontal_inner.y_range, 8.0);

    // Humanoid
    assert_eq!(vrm0.humanoid.arm_stretch, 0.1);
    assert_eq!(vrm0.humanoid.leg_stretch, 0.2);
    assert!(vrm0.humanoid.has_translation_dof);
    assert_eq!(vrm0.humanoid.assigned_bone(HumanBoneName::Hips), Some("Hips"));
    assert_eq!(vrm0.humanoid.assigned_bone(HumanBoneName::Spine), Some("Spine"));
    assert_eq!(vrm0.humanoid.assigned_bone(HumanBoneName::Head), Some("Head"));
    assert_eq!(
        vrm0.humanoid.last_bone_names,
        vec!["Hips", "Spine", "Head", "HairRoot", "HairTip"]
    );

    // Secondary animation
    let secondary = &vrm0.secondary_animation;
    assert_eq!(secondary.collider_groups.len(), 1);
    let collider_group = &secondary.collider_groups[0];
    assert_eq!(collider_group.node.value, "Head");
    assert_eq!(collider_group.colliders[0].object, "head_collider");
    assert_eq!(collider_group.colliders[0].radius, 0.1);
    assert_eq!(collider_group.colliders[0].offset, [0.0, 0.0, 0.05]);

    let bone_group = &secondary.bone_groups[0];
    assert_eq!(bone_group.comment, "hair");
    assert_eq!(bone_group.stiffness, 0.5);
    assert_eq!(bone_group.gravity_dir, [0.0, 0.0, -1.0]);
    assert_eq!(bone_group.center.value, "Head");
    assert_eq!(bone_group.bones[0].value, "HairRoot");
    assert_eq!(bone_group.collider_groups, vec![collider_group.name.clone()]);

    assert!(!report.has_warnings(), "unexpected warnings: {:?}", report.warnings);
}

#[test]
fn test_second_pass_is_idempotent() {
    let mut scene = full_legacy_rig().build();

    migrate_stamped(&mut scene, "Armature").unwrap();
    let first = document_hash(document(&scene, "Armature")).unwrap();

    let report = migrate_stamped(&mut scene, "Armature").unwrap();
    let second = document_hash(document(&scene, "Armature")).unwrap();

    assert!(!report.legacy_migrated);
    assert_eq!(report.collider_groups_created, 0);
    assert!(!report.bone_names_changed);
    assert_eq!(first, second);
}

#[test]
fn test_repeated_orchestrator_pass_below_gate_is_idempotent() {
    let mut scene = full_legacy_rig().build();

    run_orchestrator(&mut scene, "Armature").unwrap();
    let first = document(&scene, "Armature").clone();

    let report = run_orchestrator(&mut scene, "Armature").unwrap();
    let second = document(&scene, "Armature");

    // Still below the gate, so the legacy steps ran again
    assert!(report.legacy_migrated);
    assert_eq!(second.addon_version, AddonVersion(1, 0, 0));
    assert_eq!(second.vrm0.blend_shape_master.blend_shape_groups.len(), 1);
    assert_eq!(second.vrm0.first_person.mesh_annotations.len(), 1);
    assert_eq!(second.vrm0.secondary_animation.collider_groups.len(), 1);
    assert_eq!(second.vrm0.secondary_animation.bone_groups.len(), 1);
    assert_eq!(
        document_hash(&first).unwrap(),
        document_hash(second).unwrap()
    );
}

#[test]
fn test_unstamped_reruns_do_not_accumulate_groups() {
    let mut scene = full_legacy_rig().build();

    for _ in 0..3 {
        migrate_unstamped(&mut scene, "Armature").unwrap();
    }

    let secondary = &document(&scene, "Armature").vrm0.secondary_animation;
    assert_eq!(secondary.collider_groups.len(), 1);
    assert_eq!(
        secondary.bone_groups[0].collider_groups,
        vec![secondary.collider_groups[0].name.clone()]
    );
}

#[test]
fn test_orchestrator_backfills_without_stamping() {
    let mut scene = LegacyRigFixture::new("Armature")
        .version(AddonVersion(1, 0, 0))
        .bones(&["Hips", "Head"])
        .human_bone("head", "Head")
        .build();

    let report = run_orchestrator(&mut scene, "Armature").unwrap();
    let doc = document(&scene, "Armature");

    assert!(report.legacy_migrated);
    assert!(report.first_person_backfilled);
    assert_eq!(doc.vrm0.humanoid.assigned_bone(HumanBoneName::Head), Some("Head"));
    assert_eq!(doc.vrm0.first_person.first_person_bone.value, "Head");
    assert_eq!(doc.addon_version, AddonVersion(1, 0, 0));
}

#[test]
fn test_current_document_skips_legacy_steps() {
    let mut scene = LegacyRigFixture::new("Armature")
        .version(AddonVersion(2, 0, 1))
        .bones(&["Hips", "Head"])
        .object_property("title", "Ignored")
        .attachment("humanoid_params", &json!({"armStretch": 0.9}))
        .human_bone("head", "Head")
        .collider("c0", "Head", 0.1, [0.0; 3])
        .build();

    let report = migrate_unstamped(&mut scene, "Armature").unwrap();
    let doc = document(&scene, "Armature");

    assert!(!report.legacy_migrated);
    assert!(report.bone_names_changed);
    assert_eq!(doc.vrm0.meta.title, "");
    assert_eq!(doc.vrm0.humanoid.arm_stretch, Vrm0Humanoid::default().arm_stretch);
    assert_eq!(doc.vrm0.humanoid.assigned_bone(HumanBoneName::Head), None);
    assert!(doc.vrm0.secondary_animation.collider_groups.is_empty());
    assert_eq!(doc.vrm0.humanoid.last_bone_names, vec!["Hips", "Head"]);
    assert_eq!(doc.addon_version, AddonVersion(2, 0, 1));
}

#[test]
fn test_version_stamp_is_monotonic() {
    let newer = AddonVersion(9, 0, 0);
    let mut scene = LegacyRigFixture::new("Armature").version(newer).build();

    migrate_stamped(&mut scene, "Armature").unwrap();

    assert_eq!(document(&scene, "Armature").addon_version, newer);
}

#[test]
fn test_missing_attachments_keep_defaults() {
    let mut scene = LegacyRigFixture::new("Armature").bones(&["Hips"]).build();

    let report = migrate_unstamped(&mut scene, "Armature").unwrap();
    let doc = document(&scene, "Armature");

    let defaults = Vrm0Humanoid::default();
    assert!(report.legacy_migrated);
    assert!(!report.has_warnings());
    assert_eq!(doc.vrm0.humanoid.arm_stretch, defaults.arm_stretch);
    assert_eq!(doc.vrm0.humanoid.leg_stretch, defaults.leg_stretch);
    assert!(doc.vrm0.blend_shape_master.blend_shape_groups.is_empty());
    assert!(doc.vrm0.secondary_animation.bone_groups.is_empty());
    assert!(doc.vrm0.first_person.first_person_bone.is_empty());
}

#[test]
fn test_type_mismatch_is_skipped_and_reported() {
    let mut scene = LegacyRigFixture::new("Armature")
        .attachment(
            "humanoid_params",
            &json!({"armStretch": 0.3, "legStretch": "long", "hasTranslationDoF": 1}),
        )
        .build();

    let report = migrate_unstamped(&mut scene, "Armature").unwrap();
    let humanoid = &document(&scene, "Armature").vrm0.humanoid;

    assert_eq!(humanoid.arm_stretch, 0.3);
    assert_eq!(humanoid.leg_stretch, Vrm0Humanoid::default().leg_stretch);
    assert!(!humanoid.has_translation_dof);

    let paths: Vec<&str> = report
        .warnings_with(WarningCode::InvalidFieldType)
        .map(|warning| warning.path.as_str())
        .collect();
    assert_eq!(
        paths,
        vec!["humanoid_params.legStretch", "humanoid_params.hasTranslationDoF"]
    );
}

#[test]
fn test_malformed_attachment_is_treated_as_absent() {
    let mut scene = LegacyRigFixture::new("Armature")
        .raw_attachment("humanoid_params", "{not json")
        .object_property("spring_bone", CustomProperty::Int(3))
        .object_property("firstPerson_params", "no_such_text")
        .build();

    let report = migrate_unstamped(&mut scene, "Armature").unwrap();

    let keys: Vec<&str> = report
        .warnings_with(WarningCode::MalformedAttachment)
        .map(|warning| warning.path.as_str())
        .collect();
    assert_eq!(keys, vec!["firstPerson_params", "humanoid_params", "spring_bone"]);
    assert!(report.legacy_migrated);
}

#[test]
fn test_axis_remap_of_first_person_offset() {
    let mut scene = LegacyRigFixture::new("Armature")
        .attachment(
            "firstPerson_params",
            &json!({"firstPersonBoneOffset": {"x": 1, "y": 2, "z": 3}}),
        )
        .build();

    migrate_unstamped(&mut scene, "Armature").unwrap();

    assert_eq!(
        document(&scene, "Armature").vrm0.first_person.first_person_bone_offset,
        [1.0, 3.0, 2.0]
    );
}

#[test]
fn test_markers_on_one_bone_form_one_group() {
    let mut scene = LegacyRigFixture::new("Armature")
        .bones(&["Head", "Neck"])
        .collider("c0", "Head", 0.1, [0.0; 3])
        .collider("c1", "Head", 0.2, [0.0; 3])
        .collider("c2", "Head", 0.3, [0.0; 3])
        .build();

    let report = migrate_unstamped(&mut scene, "Armature").unwrap();
    let groups = &document(&scene, "Armature").vrm0.secondary_animation.collider_groups;

    assert_eq!(report.collider_groups_created, 1);
    assert_eq!(groups.len(), 1);
    let objects: Vec<&str> = groups[0].colliders.iter().map(|c| c.object.as_str()).collect();
    assert_eq!(objects, vec!["c0", "c1", "c2"]);
}

#[test]
fn test_markers_on_two_bones_form_two_groups_in_scan_order() {
    let mut scene = LegacyRigFixture::new("Armature")
        .bones(&["Head", "Neck"])
        .collider("n0", "Neck", 0.1, [0.0; 3])
        .collider("h0", "Head", 0.1, [0.0; 3])
        .collider("n1", "Neck", 0.1, [0.0; 3])
        .build();

    migrate_unstamped(&mut scene, "Armature").unwrap();
    let groups = &document(&scene, "Armature").vrm0.secondary_animation.collider_groups;

    let nodes: Vec<&str> = groups.iter().map(|group| group.node.value.as_str()).collect();
    assert_eq!(nodes, vec!["Neck", "Head"]);
    assert_eq!(groups[0].colliders.len(), 2);
    assert_eq!(groups[0].name, "Neck#00000000000000000000000000000001");
    assert_eq!(groups[1].name, "Head#00000000000000000000000000000002");
}

#[test]
fn test_non_collider_children_are_ignored() {
    let mut plain = SceneObject::sphere_marker("plain", "Armature", "Head");
    plain.parent_type = vrmkit_schema::ParentType::Object;
    let mut scene = LegacyRigFixture::new("Armature")
        .bones(&["Head"])
        .object(plain)
        .collider("ghost", "Tail", 0.1, [0.0; 3])
        .build();

    let report = migrate_unstamped(&mut scene, "Armature").unwrap();

    assert_eq!(report.collider_groups_created, 0);
    assert!(document(&scene, "Armature")
        .vrm0
        .secondary_animation
        .collider_groups
        .is_empty());
}

#[test]
fn test_bone_group_collider_references() {
    let mut scene = LegacyRigFixture::new("Armature")
        .bones(&["BoneA", "BoneB"])
        .collider("a0", "BoneA", 0.1, [0.0; 3])
        .attachment(
            "spring_bone",
            &json!([{"colliderGroups": ["BoneA", "BoneB", 7]}]),
        )
        .build();

    let report = migrate_unstamped(&mut scene, "Armature").unwrap();
    let secondary = &document(&scene, "Armature").vrm0.secondary_animation;

    assert_eq!(
        secondary.bone_groups[0].collider_groups,
        vec![secondary.collider_groups[0].name.clone()]
    );

    let unresolved: Vec<&str> = report
        .warnings_with(WarningCode::UnresolvedColliderGroup)
        .map(|warning| warning.path.as_str())
        .collect();
    assert_eq!(unresolved, vec!["spring_bone[0].colliderGroups[1]"]);
    assert_eq!(report.warnings_with(WarningCode::InvalidFieldType).count(), 1);
}

#[test]
fn test_duplicate_human_bone_target_first_writer_wins() {
    let mut scene = LegacyRigFixture::new("Armature")
        .bones(&["Hips", "Spine"])
        .human_bone("hips", "Hips")
        .human_bone("spine", "Hips")
        .human_bone("chest", "")
        .build();

    let report = migrate_unstamped(&mut scene, "Armature").unwrap();
    let humanoid = &document(&scene, "Armature").vrm0.humanoid;

    assert_eq!(humanoid.assigned_bone(HumanBoneName::Hips), Some("Hips"));
    assert_eq!(humanoid.assigned_bone(HumanBoneName::Spine), None);
    assert_eq!(humanoid.assigned_bone(HumanBoneName::Chest), None);

    let duplicate: Vec<&str> = report
        .warnings_with(WarningCode::DuplicateHumanBoneTarget)
        .map(|warning| warning.path.as_str())
        .collect();
    assert_eq!(duplicate, vec!["spine"]);
    assert_eq!(report.warnings_with(WarningCode::InvalidFieldType).count(), 1);
}

#[test]
fn test_dangling_references_are_reported() {
    let mut scene = LegacyRigFixture::new("Armature")
        .object_property("texture", "missing.png")
        .attachment(
            "blendshape_group",
            &json!([{"name": "A", "binds": [{"mesh": "NoMesh", "index": "A"}]}]),
        )
        .build();

    let report = migrate_unstamped(&mut scene, "Armature").unwrap();
    let doc = document(&scene, "Armature");

    assert!(doc.vrm0.meta.texture.is_empty());
    assert!(doc.vrm0.blend_shape_master.blend_shape_groups[0].binds[0]
        .mesh
        .is_empty());
    let paths: Vec<&str> = report
        .warnings_with(WarningCode::DanglingReference)
        .map(|warning| warning.path.as_str())
        .collect();
    assert_eq!(paths, vec!["texture", "blendshape_group[0].binds[0].mesh"]);
}

#[test]
fn test_migrate_all_isolates_rig_failures() {
    let mut scene = LegacyRigFixture::new("A")
        .bones(&["Head"])
        .human_bone("head", "Head")
        .build();
    LegacyRigFixture::new("B")
        .bones(&["Hips"])
        .attachment("humanoid_params", &json!({"feetSpacing": 0.5}))
        .build_into(&mut scene);

    let outcomes = scene.migrate_all(&MigrateOptions::default(), &mut SequentialIds::default());

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|outcome| outcome.result.is_ok()));
    assert_eq!(document(&scene, "A").vrm0.first_person.first_person_bone.value, "Head");
    assert_eq!(document(&scene, "B").vrm0.humanoid.feet_spacing, 0.5);
    assert_eq!(document(&scene, "B").addon_version, ADDON_VERSION);
}

#[test]
fn test_missing_rig_is_a_store_fault() {
    let scene = LegacyRigFixture::new("Armature").build();
    let mut document = scene.rigs[0].extension.clone();
    let before = document.clone();

    let result = migrate_rig(
        &scene,
        "Nope",
        &mut document,
        &MigrateOptions::default(),
        &mut SequentialIds::default(),
    );

    assert!(result.is_err());
    assert_eq!(document, before);
}

/// A store whose text registry is offline.
struct TextsOffline(Scene);

impl EntityStore for TextsOffline {
    fn bone_names(&self, rig: &str) -> StoreResult<Vec<String>> {
        self.0.bone_names(rig)
    }

    fn child_objects(&self, rig: &str) -> StoreResult<Vec<SceneObject>> {
        self.0.child_objects(rig)
    }

    fn object_property(&self, rig: &str, key: &str) -> StoreResult<Option<CustomProperty>> {
        self.0.object_property(rig, key)
    }

    fn data_property(&self, rig: &str, key: &str) -> StoreResult<Option<CustomProperty>> {
        self.0.data_property(rig, key)
    }

    fn text(&self, _name: &str) -> StoreResult<Option<&TextBlock>> {
        Err(StoreError::unavailable("text registry offline"))
    }

    fn mesh(&self, name: &str) -> StoreResult<Option<&Mesh>> {
        self.0.mesh(name)
    }

    fn material(&self, name: &str) -> StoreResult<Option<&Material>> {
        self.0.material(name)
    }

    fn image(&self, name: &str) -> StoreResult<Option<&Image>> {
        self.0.image(name)
    }
}

#[test]
fn test_store_fault_aborts_and_keeps_document() {
    let scene = full_legacy_rig().build();
    let mut document = scene.rigs[0].extension.clone();
    let before = document.clone();
    let store = TextsOffline(scene);

    let err = migrate_rig(
        &store,
        "Armature",
        &mut document,
        &MigrateOptions::default(),
        &mut SequentialIds::default(),
    )
    .unwrap_err();

    assert!(matches!(err, MigrationError::Store(StoreError::Unavailable(_))));
    assert_eq!(document, before);
}
