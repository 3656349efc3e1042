//! Tests for configuration and draft files
//!
//! These tests verify:
//! - partial config files fall back to defaults
//! - command-line overrides win over file values
//! - draft files pre-fill the wizard and feed headless creation

use schooladmin::api::DryRunApi;
use schooladmin::config_file::ClientConfig;
use schooladmin::draft::DraftFile;
use schooladmin::headless::{self, CreateReport};
use schooladmin::sequencer::CreationWizard;
use schooladmin::types::WizardStep;
use std::fs;
use tempfile::TempDir;

const DRAFT_JSON: &str = r#"{
    "school": {
        "name": "Lycée X",
        "address": "12 rue Y",
        "city": "Dakar",
        "phone": "+221",
        "email": "a@b.com",
        "countryId": "c1",
        "subscriptionId": "s1"
    },
    "admin": {
        "lastName": "Diop",
        "firstName": "Awa",
        "gender": "female",
        "phone": "+221 77",
        "email": "awa@example.org",
        "address": "Dakar",
        "password": "s3cret",
        "confirmPassword": "s3cret"
    }
}"#;

// =============================================================================
// Client configuration
// =============================================================================

#[test]
fn test_partial_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"api_base_url": "https://api.example.org/v1", "token": "abc"}"#).unwrap();

    let config = ClientConfig::load_from_file(&path).unwrap();

    assert_eq!(config.api_base_url, "https://api.example.org/v1");
    assert_eq!(config.token.as_deref(), Some("abc"));
    assert_eq!(config.endpoints.schools, "schools-list");
    assert!(config.validate().is_ok());
}

#[test]
fn test_overrides_win_over_file() {
    let config = ClientConfig {
        token: Some("from-file".to_string()),
        ..ClientConfig::default()
    }
    .with_overrides(
        Some("https://staging.example.org".to_string()),
        Some("from-flag".to_string()),
    );

    assert_eq!(config.api_base_url, "https://staging.example.org");
    assert_eq!(config.token.as_deref(), Some("from-flag"));
    assert_eq!(
        config.endpoint_url("create-school"),
        "https://staging.example.org/create-school"
    );
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"api_base_url": "ftp://example.org", "timeout_secs": 0}"#).unwrap();

    let config = ClientConfig::load_from_file(&path).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_saved_default_config_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    ClientConfig::default().save_to_file(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.contains("token"));
    assert_eq!(ClientConfig::load_from_file(&path).unwrap(), ClientConfig::default());
}

// =============================================================================
// Draft files
// =============================================================================

#[test]
fn test_draft_file_prefills_wizard() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("draft.json");
    fs::write(&path, DRAFT_JSON).unwrap();

    let drafts = DraftFile::load_from_file(&path).unwrap();
    let wizard = CreationWizard::with_drafts(drafts);

    assert_eq!(wizard.step(), Some(WizardStep::SchoolInfo));
    assert_eq!(wizard.school().country_id, "c1");
    assert_eq!(wizard.admin().confirm_password, "s3cret");
    assert!(wizard.current_step_valid());
}

#[test]
fn test_malformed_draft_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("draft.json");
    fs::write(&path, "{ not json").unwrap();

    let err = DraftFile::load_from_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse draft JSON"));
}

#[test]
fn test_headless_create_from_draft_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("draft.json");
    fs::write(&path, DRAFT_JSON).unwrap();

    let drafts = DraftFile::load_from_file(&path).unwrap();
    let report = headless::run_create(&DryRunApi::new(), drafts);

    match report {
        CreateReport::Created { school_id } => assert_eq!(school_id.as_str(), "dry-run-1"),
        other => panic!("Expected Created, got {:?}", other),
    }
}

#[test]
fn test_partial_draft_reports_missing_admin() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("draft.json");
    fs::write(
        &path,
        r#"{"school": {"name": "Lycée X", "address": "12 rue Y", "city": "Dakar",
            "phone": "+221", "email": "a@b.com", "countryId": "c1", "subscriptionId": "s1"}}"#,
    )
    .unwrap();

    let drafts = DraftFile::load_from_file(&path).unwrap();
    let results = headless::validate_drafts(&drafts);

    assert!(results[0].1.is_ok());
    assert!(results[1].1.is_err());
}
