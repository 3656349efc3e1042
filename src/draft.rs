//! School and administrator drafts.
//!
//! A draft is the in-memory, not-yet-persisted record the user edits before
//! submission. Field names serialize in camelCase, which is also the backend's
//! wire format for create-school and create-admin.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum::{Display, EnumIter};

/// School attributes collected on step 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchoolDraft {
    pub name: String,
    pub address: String,
    pub city: String,
    pub phone: String,
    pub email: String,
    pub country_id: String,
    pub subscription_id: String,
    /// Marker of an attached file (logo upload reference). Never required.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub file_marker: String,
}

/// Editable fields of a [`SchoolDraft`], in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum SchoolField {
    Name,
    Address,
    City,
    Phone,
    Email,
    Country,
    Subscription,
    FileMarker,
}

impl SchoolField {
    /// Fields that must be non-empty before leaving step 1.
    pub const REQUIRED: [Self; 7] = [
        Self::Name,
        Self::City,
        Self::Address,
        Self::Phone,
        Self::Email,
        Self::Country,
        Self::Subscription,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "School name",
            Self::Address => "Address",
            Self::City => "City",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::Country => "Country",
            Self::Subscription => "Subscription",
            Self::FileMarker => "Logo file",
        }
    }

    /// Fields whose value is picked from a fetched catalog list.
    pub const fn is_select(self) -> bool {
        matches!(self, Self::Country | Self::Subscription)
    }
}

impl SchoolDraft {
    pub fn field(&self, field: SchoolField) -> &str {
        match field {
            SchoolField::Name => &self.name,
            SchoolField::Address => &self.address,
            SchoolField::City => &self.city,
            SchoolField::Phone => &self.phone,
            SchoolField::Email => &self.email,
            SchoolField::Country => &self.country_id,
            SchoolField::Subscription => &self.subscription_id,
            SchoolField::FileMarker => &self.file_marker,
        }
    }

    pub fn field_mut(&mut self, field: SchoolField) -> &mut String {
        match field {
            SchoolField::Name => &mut self.name,
            SchoolField::Address => &mut self.address,
            SchoolField::City => &mut self.city,
            SchoolField::Phone => &mut self.phone,
            SchoolField::Email => &mut self.email,
            SchoolField::Country => &mut self.country_id,
            SchoolField::Subscription => &mut self.subscription_id,
            SchoolField::FileMarker => &mut self.file_marker,
        }
    }
}

/// Administrator attributes collected on step 2.
///
/// Defaults are per field: the type implements `Drop`, so serde cannot fill
/// gaps from a whole default value.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDraft {
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Editable fields of an [`AdminDraft`], in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum AdminField {
    LastName,
    FirstName,
    Gender,
    Phone,
    Email,
    Address,
    Password,
    ConfirmPassword,
}

impl AdminField {
    /// Fields that must be non-empty before submission.
    pub const REQUIRED: [Self; 8] = [
        Self::LastName,
        Self::FirstName,
        Self::Gender,
        Self::Phone,
        Self::Email,
        Self::Address,
        Self::Password,
        Self::ConfirmPassword,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::LastName => "Last name",
            Self::FirstName => "First name",
            Self::Gender => "Gender",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::Address => "Address",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm password",
        }
    }

    /// Masked on screen, never logged.
    pub const fn is_secret(self) -> bool {
        matches!(self, Self::Password | Self::ConfirmPassword)
    }

    pub const fn is_select(self) -> bool {
        matches!(self, Self::Gender)
    }
}

impl AdminDraft {
    pub fn field(&self, field: AdminField) -> &str {
        match field {
            AdminField::LastName => &self.last_name,
            AdminField::FirstName => &self.first_name,
            AdminField::Gender => &self.gender,
            AdminField::Phone => &self.phone,
            AdminField::Email => &self.email,
            AdminField::Address => &self.address,
            AdminField::Password => &self.password,
            AdminField::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn field_mut(&mut self, field: AdminField) -> &mut String {
        match field {
            AdminField::LastName => &mut self.last_name,
            AdminField::FirstName => &mut self.first_name,
            AdminField::Gender => &mut self.gender,
            AdminField::Phone => &mut self.phone,
            AdminField::Email => &mut self.email,
            AdminField::Address => &mut self.address,
            AdminField::Password => &mut self.password,
            AdminField::ConfirmPassword => &mut self.confirm_password,
        }
    }

    /// Zero out the password fields.
    ///
    /// Called when the wizard completes and again on drop.
    pub fn zero_sensitive_data(&mut self) {
        for pwd in [&mut self.password, &mut self.confirm_password] {
            pwd.clear();
            pwd.shrink_to_fit();
        }
    }
}

impl std::fmt::Debug for AdminDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminDraft")
            .field("last_name", &self.last_name)
            .field("first_name", &self.first_name)
            .field("gender", &self.gender)
            .field("phone", &self.phone)
            .field("email", &self.email)
            .field("address", &self.address)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .finish()
    }
}

impl Drop for AdminDraft {
    fn drop(&mut self) {
        self.zero_sensitive_data();
    }
}

/// Both drafts, as stored on disk for pre-filling or headless creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftFile {
    pub school: SchoolDraft,
    pub admin: AdminDraft,
}

impl DraftFile {
    /// Load drafts from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read draft from {:?}", path.as_ref()))?;

        let drafts: Self =
            serde_json::from_str(&content).context("Failed to parse draft JSON")?;

        Ok(drafts)
    }

    /// Save drafts to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize draft to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write draft to {:?}", path.as_ref()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_school_draft_wire_names() {
        let mut school = SchoolDraft::default();
        school.country_id = "c1".to_string();
        school.subscription_id = "s1".to_string();

        let json = serde_json::to_value(&school).unwrap();
        assert_eq!(json["countryId"], "c1");
        assert_eq!(json["subscriptionId"], "s1");
        assert!(json.get("fileMarker").is_none());
    }

    #[test]
    fn test_admin_draft_wire_names() {
        let mut admin = AdminDraft::default();
        admin.confirm_password = "pass".to_string();
        let json = serde_json::to_value(&admin).unwrap();
        assert_eq!(json["confirmPassword"], "pass");
        assert!(json.get("lastName").is_some());
    }

    #[test]
    fn test_field_accessors_cover_every_field() {
        let mut school = SchoolDraft::default();
        for field in SchoolField::iter() {
            school.field_mut(field).push_str(field.label());
            assert_eq!(school.field(field), field.label());
        }

        let mut admin = AdminDraft::default();
        for field in AdminField::iter() {
            admin.field_mut(field).push('x');
            assert_eq!(admin.field(field), "x");
        }
    }

    #[test]
    fn test_zero_sensitive_data() {
        let mut admin = AdminDraft::default();
        admin.password = "secret".to_string();
        admin.confirm_password = "secret".to_string();
        admin.zero_sensitive_data();
        assert!(admin.password.is_empty());
        assert!(admin.confirm_password.is_empty());
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let mut admin = AdminDraft::default();
        admin.password = "hunter22".to_string();
        let debug = format!("{:?}", admin);
        assert!(!debug.contains("hunter22"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_draft_file_partial_json_defaults() {
        let drafts: DraftFile =
            serde_json::from_str(r#"{"school": {"name": "Lycée X"}}"#).unwrap();
        assert_eq!(drafts.school.name, "Lycée X");
        assert!(drafts.school.city.is_empty());
        assert!(drafts.admin.password.is_empty());
    }

    #[test]
    fn test_partial_admin_section_defaults() {
        let drafts: DraftFile = serde_json::from_str(
            r#"{"admin": {"firstName": "Awa", "confirmPassword": "s3cret"}}"#,
        )
        .unwrap();
        assert_eq!(drafts.admin.first_name, "Awa");
        assert_eq!(drafts.admin.confirm_password, "s3cret");
        assert!(drafts.admin.last_name.is_empty());
        assert!(drafts.admin.password.is_empty());

        let admin: AdminDraft = serde_json::from_str("{}").unwrap();
        assert_eq!(admin, AdminDraft::default());
    }

    #[test]
    fn test_draft_file_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");

        let mut drafts = DraftFile::default();
        drafts.school.city = "Dakar".to_string();
        drafts.admin.first_name = "Awa".to_string();
        drafts.save_to_file(&path).unwrap();

        let loaded = DraftFile::load_from_file(&path).unwrap();
        assert_eq!(loaded.school.city, "Dakar");
        assert_eq!(loaded.admin.first_name, "Awa");
    }

    #[test]
    fn test_draft_file_missing_is_error() {
        let err = DraftFile::load_from_file("/nonexistent/draft.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read draft"));
    }
}
