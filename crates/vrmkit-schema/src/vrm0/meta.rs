//! VRM 0.x meta (license and authorship) record.

use serde::{Deserialize, Serialize};

use crate::reference::ImageReference;

/// Who may perform as the avatar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AllowedUserName {
    #[default]
    OnlyAuthor,
    ExplicitlyLicensedPerson,
    Everyone,
}

impl AllowedUserName {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllowedUserName::OnlyAuthor => "OnlyAuthor",
            AllowedUserName::ExplicitlyLicensedPerson => "ExplicitlyLicensedPerson",
            AllowedUserName::Everyone => "Everyone",
        }
    }

    /// Parses a legacy value; names outside the closed set yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "OnlyAuthor" => Some(AllowedUserName::OnlyAuthor),
            "ExplicitlyLicensedPerson" => Some(AllowedUserName::ExplicitlyLicensedPerson),
            "Everyone" => Some(AllowedUserName::Everyone),
            _ => None,
        }
    }
}

/// Allow/disallow flag used by the usage permissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsagePermission {
    #[default]
    Disallow,
    Allow,
}

impl UsagePermission {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsagePermission::Disallow => "Disallow",
            UsagePermission::Allow => "Allow",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Disallow" => Some(UsagePermission::Disallow),
            "Allow" => Some(UsagePermission::Allow),
            _ => None,
        }
    }
}

/// Distribution license.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseName {
    #[default]
    #[serde(rename = "Redistribution_Prohibited")]
    RedistributionProhibited,
    #[serde(rename = "CC0")]
    Cc0,
    #[serde(rename = "CC_BY")]
    CcBy,
    #[serde(rename = "CC_BY_NC")]
    CcByNc,
    #[serde(rename = "CC_BY_SA")]
    CcBySa,
    #[serde(rename = "CC_BY_NC_SA")]
    CcByNcSa,
    #[serde(rename = "CC_BY_ND")]
    CcByNd,
    #[serde(rename = "CC_BY_NC_ND")]
    CcByNcNd,
    Other,
}

impl LicenseName {
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseName::RedistributionProhibited => "Redistribution_Prohibited",
            LicenseName::Cc0 => "CC0",
            LicenseName::CcBy => "CC_BY",
            LicenseName::CcByNc => "CC_BY_NC",
            LicenseName::CcBySa => "CC_BY_SA",
            LicenseName::CcByNcSa => "CC_BY_NC_SA",
            LicenseName::CcByNd => "CC_BY_ND",
            LicenseName::CcByNcNd => "CC_BY_NC_ND",
            LicenseName::Other => "Other",
        }
    }

    pub fn all() -> &'static [LicenseName] {
        &[
            LicenseName::RedistributionProhibited,
            LicenseName::Cc0,
            LicenseName::CcBy,
            LicenseName::CcByNc,
            LicenseName::CcBySa,
            LicenseName::CcByNcSa,
            LicenseName::CcByNd,
            LicenseName::CcByNcNd,
            LicenseName::Other,
        ]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        LicenseName::all()
            .iter()
            .copied()
            .find(|license| license.as_str() == name)
    }
}

/// VRM 0.x meta record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrm0Meta {
    pub allowed_user_name: AllowedUserName,
    pub author: String,
    pub commercial_ussage_name: UsagePermission,
    pub contact_information: String,
    pub license_name: LicenseName,
    pub other_license_url: String,
    pub other_permission_url: String,
    pub reference: String,
    pub sexual_ussage_name: UsagePermission,
    pub title: String,
    pub version: String,
    pub violent_ussage_name: UsagePermission,
    /// Thumbnail image.
    pub texture: ImageReference,
}
