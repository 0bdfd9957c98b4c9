//! Meta migration from the rig object's own custom properties.

use vrmkit_schema::vrm0::{AllowedUserName, LicenseName, UsagePermission, Vrm0Meta};
use vrmkit_schema::{CustomProperty, EntityStore, ImageReference, StoreResult};

use crate::legacy::Field;
use crate::report::{MigrationReport, WarningCode};

fn string_property<S: EntityStore + ?Sized>(
    store: &S,
    rig: &str,
    key: &str,
) -> StoreResult<Field<String>> {
    Ok(match store.object_property(rig, key)? {
        None => Field::Absent,
        Some(CustomProperty::String(value)) => Field::Valid(value),
        Some(_) => Field::Invalid,
    })
}

fn read_string<S: EntityStore + ?Sized>(
    store: &S,
    rig: &str,
    key: &str,
    report: &mut MigrationReport,
) -> StoreResult<Option<String>> {
    Ok(report.accept(string_property(store, rig, key)?, key))
}

/// Reads a string from a closed set, warning on anything else.
fn read_enum<S: EntityStore + ?Sized, T>(
    store: &S,
    rig: &str,
    key: &str,
    parse: impl FnOnce(&str) -> Option<T>,
    report: &mut MigrationReport,
) -> StoreResult<Option<T>> {
    let Some(value) = read_string(store, rig, key, report)? else {
        return Ok(None);
    };
    let parsed = parse(&value);
    if parsed.is_none() {
        report.warn(
            WarningCode::InvalidFieldType,
            format!("'{}' is not a recognized value", value),
            key,
        );
    }
    Ok(parsed)
}

fn assign<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Migrates meta fields from the rig object's custom properties.
pub fn migrate_meta<S: EntityStore + ?Sized>(
    store: &S,
    rig: &str,
    meta: &mut Vrm0Meta,
    report: &mut MigrationReport,
) -> StoreResult<()> {
    use AllowedUserName as Users;
    use UsagePermission as Usage;

    let r = report;
    assign(
        &mut meta.allowed_user_name,
        read_enum(store, rig, "allowedUserName", Users::from_name, r)?,
    );
    assign(&mut meta.author, read_string(store, rig, "author", r)?);
    assign(
        &mut meta.commercial_ussage_name,
        read_enum(store, rig, "commercialUssageName", Usage::from_name, r)?,
    );
    assign(
        &mut meta.contact_information,
        read_string(store, rig, "contactInformation", r)?,
    );
    assign(
        &mut meta.license_name,
        read_enum(store, rig, "licenseName", LicenseName::from_name, r)?,
    );
    assign(
        &mut meta.other_license_url,
        read_string(store, rig, "otherLicenseUrl", r)?,
    );
    assign(
        &mut meta.other_permission_url,
        read_string(store, rig, "otherPermissionUrl", r)?,
    );
    assign(&mut meta.reference, read_string(store, rig, "reference", r)?);
    assign(
        &mut meta.sexual_ussage_name,
        read_enum(store, rig, "sexualUssageName", Usage::from_name, r)?,
    );
    assign(&mut meta.title, read_string(store, rig, "title", r)?);
    assign(&mut meta.version, read_string(store, rig, "version", r)?);
    assign(
        &mut meta.violent_ussage_name,
        read_enum(store, rig, "violentUssageName", Usage::from_name, r)?,
    );

    if let Some(texture) = read_string(store, rig, "texture", r)? {
        let reference = ImageReference::new(texture);
        if reference.resolve(store)?.is_some() {
            meta.texture = reference;
        } else {
            r.warn(
                WarningCode::DanglingReference,
                format!("image '{}' does not exist", reference.value),
                "texture",
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Scene, SceneRig};
    use vrmkit_schema::Image;

    fn scene(properties: &[(&str, CustomProperty)]) -> Scene {
        let mut rig = SceneRig::new("Armature");
        for (key, value) in properties {
            rig.object_properties.insert(key.to_string(), value.clone());
        }
        Scene {
            rigs: vec![rig],
            images: vec![Image {
                name: "thumbnail".to_string(),
            }],
            ..Scene::default()
        }
    }

    fn migrate(scene: &Scene) -> (Vrm0Meta, MigrationReport) {
        let mut meta = Vrm0Meta::default();
        let mut report = MigrationReport::new("Armature");
        migrate_meta(scene, "Armature", &mut meta, &mut report).unwrap();
        (meta, report)
    }

    #[test]
    fn test_migrate_meta_strings_and_enums() {
        let scene = scene(&[
            ("title", CustomProperty::from("Avatar")),
            ("author", CustomProperty::from("someone")),
            ("licenseName", CustomProperty::from("CC_BY_NC")),
            ("allowedUserName", CustomProperty::from("Everyone")),
            ("commercialUssageName", CustomProperty::from("Allow")),
            ("texture", CustomProperty::from("thumbnail")),
        ]);
        let (meta, report) = migrate(&scene);

        assert_eq!(meta.title, "Avatar");
        assert_eq!(meta.author, "someone");
        assert_eq!(meta.license_name, LicenseName::CcByNc);
        assert_eq!(meta.allowed_user_name, AllowedUserName::Everyone);
        assert_eq!(meta.commercial_ussage_name, UsagePermission::Allow);
        assert_eq!(meta.texture.value, "thumbnail");
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_migrate_meta_skips_bad_values() {
        let scene = scene(&[
            ("title", CustomProperty::Int(7)),
            ("licenseName", CustomProperty::from("WTFPL")),
            ("texture", CustomProperty::from("missing")),
        ]);
        let (meta, report) = migrate(&scene);

        assert_eq!(meta, Vrm0Meta::default());
        assert_eq!(report.warnings_with(WarningCode::InvalidFieldType).count(), 2);
        assert_eq!(report.warnings_with(WarningCode::DanglingReference).count(), 1);
    }

    #[test]
    fn test_migrate_meta_without_properties_keeps_defaults() {
        let (meta, report) = migrate(&scene(&[]));
        assert_eq!(meta, Vrm0Meta::default());
        assert!(!report.has_warnings());
    }
}
