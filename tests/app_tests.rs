//! Tests for the interactive application
//!
//! These tests drive `App` through key events with worker threads running
//! against the dry-run backend, and verify:
//! - the full wizard flow ends on the schools list
//! - partial success still navigates, with a blocking warning
//! - cancelling from step 1 discards the wizard
//! - results for a replaced wizard are discarded
//! - forward navigation waits for the catalog lists

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use schooladmin::api::{
    ApiError, ApiResponse, Country, CreateSchoolResponse, DryRunApi, SchoolApi, SchoolSummary,
    Subscription,
};
use schooladmin::app::{App, AppMode};
use schooladmin::draft::{AdminDraft, DraftFile, SchoolDraft};
use schooladmin::types::{NotificationLevel, WizardStep};
use schooladmin::wizard_state::SchoolId;
use std::sync::Arc;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(5);

// =============================================================================
// Helpers
// =============================================================================

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn press(app: &mut App, code: KeyCode) -> bool {
    app.handle_key_event(key(code))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Handle exactly `count` worker messages, failing on timeout.
fn settle(app: &mut App, count: usize) {
    for _ in 0..count {
        assert!(app.wait_for_worker(WAIT), "worker message timed out");
    }
}

fn valid_drafts() -> DraftFile {
    let mut admin = AdminDraft::default();
    admin.last_name = "Diop".to_string();
    admin.first_name = "Awa".to_string();
    admin.gender = "female".to_string();
    admin.phone = "+221 77".to_string();
    admin.email = "awa@example.org".to_string();
    admin.address = "Dakar".to_string();
    admin.password = "s3cret".to_string();
    admin.confirm_password = "s3cret".to_string();

    DraftFile {
        school: SchoolDraft {
            name: "Lycée X".to_string(),
            address: "12 rue Y".to_string(),
            city: "Dakar".to_string(),
            phone: "+221".to_string(),
            email: "a@b.com".to_string(),
            country_id: "dry-country".to_string(),
            subscription_id: "dry-basic".to_string(),
            file_marker: String::new(),
        },
        admin,
    }
}

/// App with the catalog already loaded.
fn ready_app(api: Arc<dyn SchoolApi>, drafts: Option<DraftFile>) -> App {
    let mut app = App::new(api, true, drafts);
    settle(&mut app, 2);
    assert!(!app.state().catalog.is_loading());
    app
}

fn current_step(app: &App) -> Option<WizardStep> {
    app.state().wizard.as_ref().and_then(|w| w.step())
}

/// Dry-run backend whose create-admin always fails.
#[derive(Default)]
struct AdminRejectingApi {
    inner: DryRunApi,
}

impl SchoolApi for AdminRejectingApi {
    fn subscriptions(&self) -> Result<Vec<Subscription>, ApiError> {
        self.inner.subscriptions()
    }

    fn countries(&self) -> Result<Vec<Country>, ApiError> {
        self.inner.countries()
    }

    fn create_school(&self, school: &SchoolDraft) -> Result<CreateSchoolResponse, ApiError> {
        self.inner.create_school(school)
    }

    fn create_admin(&self, _school_id: &SchoolId, _admin: &AdminDraft) -> Result<ApiResponse, ApiError> {
        Err(ApiError::Status {
            status: 409,
            message: "email already used".to_string(),
        })
    }

    fn schools(&self) -> Result<Vec<SchoolSummary>, ApiError> {
        self.inner.schools()
    }
}

// =============================================================================
// Full flow
// =============================================================================

#[test]
fn test_full_flow_ends_on_schools_list() {
    let mut app = ready_app(Arc::new(DryRunApi::new()), Some(valid_drafts()));
    assert_eq!(app.state().mode, AppMode::Wizard);

    // Step 1 -> create-school
    press(&mut app, KeyCode::Enter);
    assert!(app.state().wizard.as_ref().unwrap().is_busy());
    settle(&mut app, 1);
    assert_eq!(current_step(&app), Some(WizardStep::AdminInfo));
    assert_eq!(
        app.state().wizard.as_ref().unwrap().school_id().map(SchoolId::as_str),
        Some("dry-run-1")
    );

    // Step 2 -> confirmation (local)
    press(&mut app, KeyCode::Enter);
    assert_eq!(current_step(&app), Some(WizardStep::Confirmation));

    // Submit -> create-admin, then the schools listing loads
    press(&mut app, KeyCode::Enter);
    settle(&mut app, 1);
    assert_eq!(app.state().mode, AppMode::SchoolsList);
    assert!(app.state().wizard.is_none());

    settle(&mut app, 1);
    let schools = app.state().schools.loaded().unwrap();
    assert_eq!(schools.len(), 1);
    assert_eq!(schools[0].name, "Lycée X");
}

#[test]
fn test_partial_success_navigates_with_warning() {
    let mut app = ready_app(Arc::new(AdminRejectingApi::default()), Some(valid_drafts()));

    press(&mut app, KeyCode::Enter);
    settle(&mut app, 1);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    settle(&mut app, 1);

    assert_eq!(app.state().mode, AppMode::SchoolsList);
    let warning = app
        .state()
        .notifications
        .iter()
        .find(|n| n.level == NotificationLevel::Warning)
        .unwrap();
    assert!(warning.message.contains("email already used"));

    // The warning stays until dismissed, and swallows other keys meanwhile.
    assert!(app.state().notifications.is_blocking());
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.state().mode, AppMode::SchoolsList);
    press(&mut app, KeyCode::Enter);
    assert!(
        app.state()
            .notifications
            .iter()
            .all(|n| n.level != NotificationLevel::Warning)
    );
}

// =============================================================================
// Cancel and stale results
// =============================================================================

#[test]
fn test_escape_on_first_step_discards_wizard() {
    let mut app = ready_app(Arc::new(DryRunApi::new()), None);
    type_text(&mut app, "Half-typed");

    press(&mut app, KeyCode::Esc);

    assert_eq!(app.state().mode, AppMode::SchoolsList);
    assert!(app.state().wizard.is_none());
    assert!(
        app.state()
            .notifications
            .iter()
            .any(|n| n.message == "Draft discarded")
    );

    // A new wizard starts from empty drafts.
    settle(&mut app, 1);
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.state().mode, AppMode::Wizard);
    assert!(app.state().wizard.as_ref().unwrap().school().name.is_empty());
}

#[test]
fn test_escape_after_school_created_warns() {
    let mut app = ready_app(Arc::new(DryRunApi::new()), Some(valid_drafts()));

    press(&mut app, KeyCode::Enter);
    settle(&mut app, 1);
    assert_eq!(current_step(&app), Some(WizardStep::AdminInfo));

    // Back to step 1, then out of the wizard.
    press(&mut app, KeyCode::Esc);
    assert_eq!(current_step(&app), Some(WizardStep::SchoolInfo));
    press(&mut app, KeyCode::Esc);

    assert_eq!(app.state().mode, AppMode::SchoolsList);
    assert!(app.state().wizard.is_none());
    assert!(app.state().notifications.is_blocking());
    let warning = app.state().notifications.current().unwrap();
    assert_eq!(warning.level, NotificationLevel::Warning);
    assert!(warning.message.contains("Lycée X"));
    assert!(warning.message.contains("no administrator"));
    assert!(
        app.state()
            .notifications
            .iter()
            .all(|n| n.message != "Draft discarded")
    );
}

#[test]
fn test_late_schools_result_keeps_wizard_status() {
    let mut app = ready_app(Arc::new(DryRunApi::new()), None);

    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.state().mode, AppMode::Wizard);
    let status = app.state().status_message.clone();

    // Schools listing from the cancelled wizard plus the new catalog fetch.
    settle(&mut app, 3);

    assert_eq!(app.state().mode, AppMode::Wizard);
    assert_eq!(app.state().status_message, status);
    assert!(app.state().schools.loaded().is_some());
}

#[test]
fn test_result_for_replaced_wizard_is_discarded() {
    let mut app = ready_app(Arc::new(DryRunApi::new()), Some(valid_drafts()));

    press(&mut app, KeyCode::Enter);
    app.mount_wizard(None);
    // Stale create-school result plus the new catalog fetch.
    settle(&mut app, 3);

    let wizard = app.state().wizard.as_ref().unwrap();
    assert_eq!(wizard.step(), Some(WizardStep::SchoolInfo));
    assert!(wizard.school_id().is_none());
    assert!(!wizard.is_busy());
}

// =============================================================================
// Editing and gating
// =============================================================================

#[test]
fn test_advance_waits_for_catalog() {
    let mut app = App::new(Arc::new(DryRunApi::new()), true, Some(valid_drafts()));

    press(&mut app, KeyCode::Enter);

    let wizard = app.state().wizard.as_ref().unwrap();
    assert!(!wizard.is_busy());
    assert_eq!(wizard.step(), Some(WizardStep::SchoolInfo));
    assert!(app.state().status_message.contains("reference lists"));
}

#[test]
fn test_typing_and_selecting() {
    let mut app = ready_app(Arc::new(DryRunApi::new()), None);

    type_text(&mut app, "Lyc");
    press(&mut app, KeyCode::Backspace);
    assert_eq!(app.state().wizard.as_ref().unwrap().school().name, "Ly");

    // Focus the country select; typing is ignored, arrows pick an option.
    for _ in 0..5 {
        press(&mut app, KeyCode::Down);
    }
    type_text(&mut app, "zz");
    press(&mut app, KeyCode::Right);
    assert_eq!(
        app.state().wizard.as_ref().unwrap().school().country_id,
        "dry-country"
    );
}

#[test]
fn test_invalid_step_blocks_with_status() {
    let mut app = ready_app(Arc::new(DryRunApi::new()), None);

    press(&mut app, KeyCode::Enter);

    let wizard = app.state().wizard.as_ref().unwrap();
    assert!(!wizard.is_busy());
    assert!(wizard.inline_error().is_some());
    assert!(app.state().status_message.starts_with("Cannot continue"));
}

#[test]
fn test_help_overlay_swallows_keys() {
    let mut app = ready_app(Arc::new(DryRunApi::new()), None);

    press(&mut app, KeyCode::F(1));
    assert!(app.state().help_visible);
    type_text(&mut app, "abc");
    assert!(app.state().wizard.as_ref().unwrap().school().name.is_empty());

    press(&mut app, KeyCode::Esc);
    assert!(!app.state().help_visible);
    assert_eq!(app.state().mode, AppMode::Wizard);
}

#[test]
fn test_ctrl_c_quits() {
    let mut app = ready_app(Arc::new(DryRunApi::new()), None);
    assert!(app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
}
