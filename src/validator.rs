//! Step validator.
//!
//! Pure predicates over the current drafts that gate forward navigation.
//! Nothing here mutates state or touches the network; calling the validator
//! twice on the same drafts yields the same answer.

use crate::draft::{AdminDraft, AdminField, SchoolDraft, SchoolField};
use crate::types::WizardStep;
use thiserror::Error;

/// Minimum administrator password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 4;

/// Why a step is not yet valid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check the step-1 school requirements.
pub fn validate_school(school: &SchoolDraft) -> Result<(), ValidationError> {
    match SchoolField::REQUIRED
        .iter()
        .find(|f| is_blank(school.field(**f)))
    {
        Some(field) => Err(ValidationError::MissingField {
            field: field.label(),
        }),
        None => Ok(()),
    }
}

/// Check the step-2 administrator requirements.
pub fn validate_admin(admin: &AdminDraft) -> Result<(), ValidationError> {
    if let Some(field) = AdminField::REQUIRED
        .iter()
        .find(|f| is_blank(admin.field(**f)))
    {
        return Err(ValidationError::MissingField {
            field: field.label(),
        });
    }
    if admin.password != admin.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    if admin.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Return the first reason `step` cannot be left forward, if any.
pub fn validate_step(
    step: WizardStep,
    school: &SchoolDraft,
    admin: &AdminDraft,
) -> Result<(), ValidationError> {
    match step {
        WizardStep::SchoolInfo => validate_school(school),
        WizardStep::AdminInfo => validate_admin(admin),
        WizardStep::Confirmation => Ok(()),
    }
}

/// `true` when `step` may be left forward.
pub fn is_step_valid(step: WizardStep, school: &SchoolDraft, admin: &AdminDraft) -> bool {
    validate_step(step, school, admin).is_ok()
}
