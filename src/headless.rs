//! Non-interactive commands.
//!
//! `create` drives the same [`CreationWizard`] the TUI uses, with the remote
//! calls run inline. The other commands are read-only listings and draft
//! validation.

use crate::api::SchoolApi;
use crate::draft::DraftFile;
use crate::error::Result;
use crate::sequencer::{CreationWizard, WizardEvent};
use crate::types::{NotificationLevel, WizardStep};
use crate::validator::{self, ValidationError};
use crate::wizard_state::{CompletionOutcome, SchoolId};
use std::io::Write;
use tracing::{error, info, warn};

pub const EXIT_CREATED: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_PARTIAL: i32 = 2;

/// Result of a headless creation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateReport {
    Created { school_id: SchoolId },
    /// The school exists, its administrator does not.
    PartialSuccess {
        school_id: SchoolId,
        admin_error: String,
    },
    /// Nothing was created.
    Failed { reason: String },
}

impl CreateReport {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Created { .. } => EXIT_CREATED,
            Self::PartialSuccess { .. } => EXIT_PARTIAL,
            Self::Failed { .. } => EXIT_FAILURE,
        }
    }

    fn failed(reason: impl ToString) -> Self {
        Self::Failed {
            reason: reason.to_string(),
        }
    }
}

/// Run the whole wizard against `api`.
///
/// Both drafts are validated before anything is sent, so an invalid
/// administrator section never leaves a school behind.
pub fn run_create(api: &dyn SchoolApi, drafts: DraftFile) -> CreateReport {
    for (step, result) in validate_drafts(&drafts) {
        if let Err(e) = result {
            warn!("Draft rejected at step {}: {}", step.number(), e);
            return CreateReport::failed(format!("{}: {}", step.title(), e));
        }
    }

    let mut wizard = CreationWizard::with_drafts(drafts);
    let report = drive(&mut wizard, api);

    for note in wizard.drain_notifications() {
        match note.level {
            NotificationLevel::Error => error!("{}", note.message),
            NotificationLevel::Warning => warn!("{}", note.message),
            _ => info!("{}", note.message),
        }
    }
    report
}

fn drive(wizard: &mut CreationWizard, api: &dyn SchoolApi) -> CreateReport {
    let school_id = match wizard.next_with(api) {
        Ok(WizardEvent::SchoolCreated(id)) => id,
        Ok(WizardEvent::SchoolCreationFailed(e)) => return CreateReport::failed(e),
        Ok(other) => return CreateReport::failed(format!("unexpected wizard event {:?}", other)),
        Err(e) => return CreateReport::failed(e),
    };

    if let Err(e) = wizard.next_with(api) {
        // The school exists; report it rather than pretending nothing happened.
        return CreateReport::PartialSuccess {
            school_id,
            admin_error: e.to_string(),
        };
    }

    match wizard.submit_with(api) {
        Ok(WizardEvent::Finished(CompletionOutcome::Created)) => CreateReport::Created { school_id },
        Ok(WizardEvent::Finished(CompletionOutcome::PartialSuccess { admin_error })) => {
            CreateReport::PartialSuccess {
                school_id,
                admin_error,
            }
        }
        Ok(other) => CreateReport::PartialSuccess {
            school_id,
            admin_error: format!("unexpected wizard event {:?}", other),
        },
        Err(e) => CreateReport::PartialSuccess {
            school_id,
            admin_error: e.to_string(),
        },
    }
}

/// Validation result of each form step of a draft file.
pub fn validate_drafts(drafts: &DraftFile) -> Vec<(WizardStep, std::result::Result<(), ValidationError>)> {
    [WizardStep::SchoolInfo, WizardStep::AdminInfo]
        .into_iter()
        .map(|step| (step, validator::validate_step(step, &drafts.school, &drafts.admin)))
        .collect()
}

/// Print subscription plans and countries.
pub fn print_catalog(api: &dyn SchoolApi, out: &mut impl Write) -> Result<()> {
    let subscriptions = api.subscriptions()?;
    let countries = api.countries()?;

    writeln!(out, "Subscriptions ({})", subscriptions.len())?;
    for plan in &subscriptions {
        writeln!(out, "  {:<12} {}", plan.id, plan.display_line())?;
    }
    writeln!(out)?;
    writeln!(out, "Countries ({})", countries.len())?;
    for country in &countries {
        writeln!(out, "  {:<12} {}", country.id, country.name)?;
    }
    Ok(())
}

/// Print the schools listing.
pub fn print_schools(api: &dyn SchoolApi, out: &mut impl Write) -> Result<()> {
    let schools = api.schools()?;
    if schools.is_empty() {
        writeln!(out, "No schools.")?;
        return Ok(());
    }
    for school in &schools {
        writeln!(
            out,
            "  {:<12} {:<30} {:<16} {}",
            school.id, school.name, school.city, school.email
        )?;
    }
    Ok(())
}
