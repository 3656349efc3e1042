//! Backend access.
//!
//! `SchoolApi` is the seam between the wizard and the REST backend. The
//! wizard and the TUI only ever hold a `dyn SchoolApi`; production uses
//! [`HttpSchoolApi`], `--dry-run` uses [`DryRunApi`], and tests plug in their
//! own recorders.

pub mod dry_run;
pub mod dto;
pub mod http;

pub use dry_run::DryRunApi;
pub use dto::{ApiResponse, Country, CreateSchoolResponse, SchoolSummary, Subscription};
pub use http::HttpSchoolApi;

use crate::draft::{AdminDraft, SchoolDraft};
use crate::wizard_state::SchoolId;
use thiserror::Error;

/// Failures talking to the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connection, TLS, timeout, or body read failure.
    #[error("request failed: {0}")]
    Transport(String),

    /// Non-2xx status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// 2xx with `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// create-school answered without an identifier.
    #[error("response did not include a school identifier")]
    MissingIdentifier,

    /// Body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Operations the wizard and listings need from the backend.
///
/// Calls block; the TUI runs them on worker threads.
pub trait SchoolApi: Send + Sync {
    /// `GET subscriptions-list`
    fn subscriptions(&self) -> Result<Vec<Subscription>, ApiError>;

    /// `GET countries-list`
    fn countries(&self) -> Result<Vec<Country>, ApiError>;

    /// `POST create-school`. The raw envelope is returned; callers decide
    /// whether it carries a usable identifier.
    fn create_school(&self, school: &SchoolDraft) -> Result<CreateSchoolResponse, ApiError>;

    /// `POST create-admin`
    fn create_admin(&self, school_id: &SchoolId, admin: &AdminDraft)
    -> Result<ApiResponse, ApiError>;

    /// `GET schools-list`
    fn schools(&self) -> Result<Vec<SchoolSummary>, ApiError>;
}
