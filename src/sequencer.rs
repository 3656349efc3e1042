//! Remote creation sequencer.
//!
//! `CreationWizard` owns the two drafts and the [`WizardStage`] and is the
//! only place that decides what happens when the user presses next,
//! previous, or submit.
//!
//! Remote calls are split in two halves so the TUI can run them off the UI
//! thread:
//!
//! 1. [`CreationWizard::next`] / [`CreationWizard::submit`] validate, mark a
//!    call as in flight, and hand back a [`RemoteCall`].
//! 2. Whoever ran the call feeds the [`CallResult`] to
//!    [`CreationWizard::apply`].
//!
//! While a call is in flight every navigation request is refused, so a
//! school can never be created twice. Headless callers use the `*_with`
//! helpers, which do both halves inline.

use crate::api::{ApiError, ApiResponse, CreateSchoolResponse, SchoolApi};
use crate::draft::{AdminDraft, AdminField, DraftFile, SchoolDraft, SchoolField};
use crate::notification::Notification;
use crate::types::WizardStep;
use crate::validator::{self, ValidationError};
use crate::wizard_state::{CompletionOutcome, SchoolId, StageTransitionError, WizardStage};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Refusals from the wizard. None of these touch the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A request is already in progress")]
    CallInFlight,

    #[error("School details can no longer be changed once the school exists")]
    SchoolLocked,

    #[error("Action is only available on step {expected}")]
    WrongStep { expected: u8 },

    #[error("Wizard is already complete")]
    Completed,

    #[error("Received a result for a request that was not in progress")]
    UnexpectedResult,

    #[error(transparent)]
    Stage(#[from] StageTransitionError),
}

/// Which remote call is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingCall {
    CreateSchool,
    CreateAdmin,
}

/// A remote call the wizard wants made, with a snapshot of its input.
#[derive(Debug, Clone)]
pub enum RemoteCall {
    CreateSchool(SchoolDraft),
    CreateAdmin {
        school_id: SchoolId,
        admin: AdminDraft,
    },
}

impl RemoteCall {
    /// Run the call against a backend. Blocks.
    pub fn execute(&self, api: &dyn SchoolApi) -> CallResult {
        match self {
            Self::CreateSchool(school) => CallResult::CreateSchool(api.create_school(school)),
            Self::CreateAdmin { school_id, admin } => {
                CallResult::CreateAdmin(api.create_admin(school_id, admin))
            }
        }
    }

    pub fn pending(&self) -> PendingCall {
        match self {
            Self::CreateSchool(_) => PendingCall::CreateSchool,
            Self::CreateAdmin { .. } => PendingCall::CreateAdmin,
        }
    }
}

/// What came back from a [`RemoteCall`].
#[derive(Debug, Clone)]
pub enum CallResult {
    CreateSchool(Result<CreateSchoolResponse, ApiError>),
    CreateAdmin(Result<ApiResponse, ApiError>),
}

/// Result of pressing next.
#[derive(Debug, Clone)]
pub enum Advance {
    /// Cursor moved; nothing remote happened.
    Moved(WizardStep),
    /// A remote call must run before the wizard can move.
    Remote(RemoteCall),
}

/// What a navigation or an applied result did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    Moved(WizardStep),
    SchoolCreated(SchoolId),
    SchoolCreationFailed(ApiError),
    /// Terminal. The caller navigates to the schools list for both outcomes.
    Finished(CompletionOutcome),
}

/// Drafts, stage, and the in-flight marker of one wizard run.
#[derive(Debug, Default)]
pub struct CreationWizard {
    school: SchoolDraft,
    admin: AdminDraft,
    stage: WizardStage,
    pending: Option<PendingCall>,
    inline_error: Option<ValidationError>,
    notifications: Vec<Notification>,
    admin_attempts: u32,
}

impl CreationWizard {
    /// Empty drafts, step 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drafts pre-filled, e.g. when re-opening a saved record.
    pub fn with_drafts(drafts: DraftFile) -> Self {
        let DraftFile { school, admin } = drafts;
        Self {
            school,
            admin,
            ..Self::default()
        }
    }

    pub fn school(&self) -> &SchoolDraft {
        &self.school
    }

    pub fn admin(&self) -> &AdminDraft {
        &self.admin
    }

    pub fn stage(&self) -> &WizardStage {
        &self.stage
    }

    /// Current step cursor; `None` once complete.
    pub fn step(&self) -> Option<WizardStep> {
        self.stage.step()
    }

    pub fn school_id(&self) -> Option<&SchoolId> {
        self.stage.school_id()
    }

    pub fn pending(&self) -> Option<PendingCall> {
        self.pending
    }

    /// A remote call is outstanding; forward controls are disabled.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_completed(&self) -> bool {
        self.stage.is_completed()
    }

    /// Validation failure from the last refused next/submit, for inline display.
    pub fn inline_error(&self) -> Option<&ValidationError> {
        self.inline_error.as_ref()
    }

    /// Number of create-admin calls whose result was applied.
    pub fn admin_attempts(&self) -> u32 {
        self.admin_attempts
    }

    /// Hand queued notifications to the caller.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Whether the current step is valid right now.
    pub fn current_step_valid(&self) -> bool {
        self.step()
            .is_some_and(|step| validator::is_step_valid(step, &self.school, &self.admin))
    }

    /// Mutable access to a school field.
    ///
    /// Refused once the school exists, and while a call is in flight.
    pub fn school_field_mut(&mut self, field: SchoolField) -> Result<&mut String, WizardError> {
        if self.pending.is_some() {
            return Err(WizardError::CallInFlight);
        }
        match self.stage {
            WizardStage::AwaitingSchoolInfo => {
                self.inline_error = None;
                Ok(self.school.field_mut(field))
            }
            WizardStage::SchoolCreated { .. } => Err(WizardError::SchoolLocked),
            WizardStage::Completed { .. } => Err(WizardError::Completed),
        }
    }

    /// Mutable access to an administrator field.
    pub fn admin_field_mut(&mut self, field: AdminField) -> Result<&mut String, WizardError> {
        if self.pending.is_some() {
            return Err(WizardError::CallInFlight);
        }
        if self.stage.is_completed() {
            return Err(WizardError::Completed);
        }
        self.inline_error = None;
        Ok(self.admin.field_mut(field))
    }

    pub fn set_school_field(
        &mut self,
        field: SchoolField,
        value: impl Into<String>,
    ) -> Result<(), WizardError> {
        *self.school_field_mut(field)? = value.into();
        Ok(())
    }

    pub fn set_admin_field(
        &mut self,
        field: AdminField,
        value: impl Into<String>,
    ) -> Result<(), WizardError> {
        *self.admin_field_mut(field)? = value.into();
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), WizardError> {
        if self.pending.is_some() {
            return Err(WizardError::CallInFlight);
        }
        if self.stage.is_completed() {
            return Err(WizardError::Completed);
        }
        Ok(())
    }

    fn check_step(&mut self, step: WizardStep) -> Result<(), WizardError> {
        if let Err(e) = validator::validate_step(step, &self.school, &self.admin) {
            debug!("Step {} blocked: {}", step.number(), e);
            self.inline_error = Some(e.clone());
            return Err(e.into());
        }
        self.inline_error = None;
        Ok(())
    }

    /// Press next.
    ///
    /// From step 1 with no school yet this requests create-school. From the
    /// confirmation step it is the same as [`submit`](Self::submit).
    pub fn next(&mut self) -> Result<Advance, WizardError> {
        self.ensure_idle()?;
        match &self.stage {
            WizardStage::AwaitingSchoolInfo => {
                self.check_step(WizardStep::SchoolInfo)?;
                info!("Requesting school creation for '{}'", self.school.name);
                self.pending = Some(PendingCall::CreateSchool);
                Ok(Advance::Remote(RemoteCall::CreateSchool(self.school.clone())))
            }
            WizardStage::SchoolCreated {
                step: WizardStep::Confirmation,
                ..
            } => self.submit().map(Advance::Remote),
            WizardStage::SchoolCreated { step, .. } => {
                let step = *step;
                self.check_step(step)?;
                let moved = self.stage.advance_cursor()?;
                debug!("Advanced to step {}", moved.number());
                Ok(Advance::Moved(moved))
            }
            WizardStage::Completed { .. } => Err(WizardError::Completed),
        }
    }

    /// Press previous. Only moves the cursor; a created school stays.
    pub fn previous(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_idle()?;
        self.inline_error = None;
        let step = self.stage.retreat_cursor()?;
        debug!("Moved back to step {}", step.number());
        Ok(step)
    }

    /// Press submit on the confirmation step; requests create-admin.
    pub fn submit(&mut self) -> Result<RemoteCall, WizardError> {
        self.ensure_idle()?;
        let school_id = match &self.stage {
            WizardStage::SchoolCreated {
                school_id,
                step: WizardStep::Confirmation,
            } => school_id.clone(),
            _ => {
                return Err(WizardError::WrongStep {
                    expected: WizardStep::Confirmation.number(),
                });
            }
        };
        self.check_step(WizardStep::AdminInfo)?;
        info!("Requesting administrator creation for school {}", school_id);
        self.pending = Some(PendingCall::CreateAdmin);
        Ok(RemoteCall::CreateAdmin {
            school_id,
            admin: self.admin.clone(),
        })
    }

    /// Feed back the result of the outstanding call.
    pub fn apply(&mut self, result: CallResult) -> Result<WizardEvent, WizardError> {
        match (self.pending, result) {
            (Some(PendingCall::CreateSchool), CallResult::CreateSchool(response)) => {
                self.pending = None;
                Ok(self.apply_school(response))
            }
            (Some(PendingCall::CreateAdmin), CallResult::CreateAdmin(response)) => {
                self.pending = None;
                self.apply_admin(response)
            }
            _ => Err(WizardError::UnexpectedResult),
        }
    }

    fn apply_school(&mut self, response: Result<CreateSchoolResponse, ApiError>) -> WizardEvent {
        match response.and_then(|r| r.school_id()) {
            Ok(school_id) => match self.stage.school_created(school_id.clone()) {
                Ok(()) => {
                    info!("School created with id {}", school_id);
                    self.notifications.push(Notification::success(format!(
                        "School '{}' created",
                        self.school.name
                    )));
                    WizardEvent::SchoolCreated(school_id)
                }
                Err(e) => {
                    // Unreachable through the public API: create-school is
                    // only requested from AwaitingSchoolInfo.
                    warn!("Ignoring school id {}: {}", school_id, e);
                    WizardEvent::SchoolCreationFailed(ApiError::Decode(e.to_string()))
                }
            },
            Err(e) => {
                warn!("School creation failed: {}", e);
                self.notifications
                    .push(Notification::error(format!("Could not create school: {}", e)));
                WizardEvent::SchoolCreationFailed(e)
            }
        }
    }

    fn apply_admin(
        &mut self,
        response: Result<ApiResponse, ApiError>,
    ) -> Result<WizardEvent, WizardError> {
        self.admin_attempts += 1;
        let school_id = self
            .stage
            .school_id()
            .cloned()
            .ok_or(WizardError::UnexpectedResult)?;

        let outcome = match response.and_then(ApiResponse::into_result) {
            Ok(_) => {
                info!("Administrator created for school {}", school_id);
                self.notifications.push(Notification::success(format!(
                    "School '{}' and its administrator were created",
                    self.school.name
                )));
                CompletionOutcome::Created
            }
            Err(e) => {
                warn!(
                    "School {} exists but administrator creation failed: {}",
                    school_id, e
                );
                self.notifications.push(Notification::warning(format!(
                    "School '{}' was created, but its administrator could not be: {}",
                    self.school.name, e
                )));
                CompletionOutcome::PartialSuccess {
                    admin_error: e.to_string(),
                }
            }
        };

        self.stage.complete(outcome.clone())?;
        self.admin.zero_sensitive_data();
        Ok(WizardEvent::Finished(outcome))
    }

    /// Press next and, if that needs the backend, run the call inline.
    pub fn next_with(&mut self, api: &dyn SchoolApi) -> Result<WizardEvent, WizardError> {
        match self.next()? {
            Advance::Moved(step) => Ok(WizardEvent::Moved(step)),
            Advance::Remote(call) => {
                let result = call.execute(api);
                self.apply(result)
            }
        }
    }

    /// Submit and run create-admin inline.
    pub fn submit_with(&mut self, api: &dyn SchoolApi) -> Result<WizardEvent, WizardError> {
        let call = self.submit()?;
        let result = call.execute(api);
        self.apply(result)
    }
}
