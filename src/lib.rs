//! schooladmin library
//!
//! Core of the school onboarding client: the three-step creation wizard, its
//! validation rules, the backend client, and the terminal UI built on them.

pub mod api;
pub mod app;
pub mod cli;
pub mod components;
pub mod config_file;
pub mod draft;
pub mod error;
pub mod headless;
pub mod input;
pub mod notification;
pub mod sequencer;
pub mod theme;
pub mod types;
pub mod ui;
pub mod validator;
pub mod wizard_state;
pub mod worker;

// Re-export main types for convenience
pub use api::{ApiError, DryRunApi, HttpSchoolApi, SchoolApi};
pub use config_file::ClientConfig;
pub use draft::{AdminDraft, AdminField, DraftFile, SchoolDraft, SchoolField};
pub use error::AdminError;
pub use notification::{Notification, NotificationQueue};
pub use sequencer::{Advance, CallResult, CreationWizard, RemoteCall, WizardError, WizardEvent};
pub use types::{Gender, NotificationLevel, WizardStep};
pub use validator::ValidationError;
pub use wizard_state::{CompletionOutcome, SchoolId, StageTransitionError, WizardStage};
