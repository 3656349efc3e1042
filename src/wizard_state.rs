//! Wizard stage machine
//!
//! The stage is the single source of truth for where the wizard is and what
//! has already happened remotely. Creating the school is irreversible, so the
//! stage carries the school identifier from that point on and the illegal
//! state "past step 1 without a school" cannot be built.
//!
//! # Stage Flow
//!
//! ```text
//! AwaitingSchoolInfo ──next (create-school ok)──▶ SchoolCreated{AdminInfo}
//!         ▲                                              │   ▲
//!         │ (failure stays here)          previous/next  ▼   │
//!                                         SchoolCreated{SchoolInfo}
//! SchoolCreated{AdminInfo} ──next──▶ SchoolCreated{Confirmation}
//! SchoolCreated{Confirmation} ──submit──▶ Completed{Created | PartialSuccess}
//! ```

use crate::types::WizardStep;
use std::fmt;
use thiserror::Error;

/// Identifier the backend assigned to a newly created school.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchoolId(String);

impl SchoolId {
    /// Wrap a backend identifier. Blank identifiers are rejected.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the wizard finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// School and administrator both exist.
    Created,
    /// The school exists but creating its administrator failed. The school
    /// is left without an administrator; nothing is rolled back.
    PartialSuccess { admin_error: String },
}

impl CompletionOutcome {
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::PartialSuccess { .. })
    }
}

/// Where the wizard is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WizardStage {
    /// Step 1 and no school has been created yet.
    #[default]
    AwaitingSchoolInfo,
    /// The school exists; the cursor may sit on any of the three steps.
    SchoolCreated {
        school_id: SchoolId,
        step: WizardStep,
    },
    /// Terminal.
    Completed {
        school_id: SchoolId,
        outcome: CompletionOutcome,
    },
}

/// Errors raised by illegal stage moves.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StageTransitionError {
    #[error("Cannot move {direction} from {step}")]
    OutOfRange {
        direction: &'static str,
        step: WizardStep,
    },

    #[error("A school has already been created ({0})")]
    SchoolAlreadyCreated(SchoolId),

    #[error("No school has been created yet")]
    NoSchool,

    #[error("Cannot complete from {0}; confirmation comes first")]
    NotConfirmed(WizardStep),

    #[error("Wizard is already complete")]
    Completed,
}

impl WizardStage {
    /// Step cursor for display. `None` once completed.
    pub fn step(&self) -> Option<WizardStep> {
        match self {
            Self::AwaitingSchoolInfo => Some(WizardStep::SchoolInfo),
            Self::SchoolCreated { step, .. } => Some(*step),
            Self::Completed { .. } => None,
        }
    }

    pub fn school_id(&self) -> Option<&SchoolId> {
        match self {
            Self::AwaitingSchoolInfo => None,
            Self::SchoolCreated { school_id, .. } | Self::Completed { school_id, .. } => {
                Some(school_id)
            }
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Record the school identifier and move to step 2.
    pub fn school_created(&mut self, school_id: SchoolId) -> Result<(), StageTransitionError> {
        match self {
            Self::AwaitingSchoolInfo => {
                *self = Self::SchoolCreated {
                    school_id,
                    step: WizardStep::AdminInfo,
                };
                Ok(())
            }
            Self::SchoolCreated { school_id: id, .. } => {
                Err(StageTransitionError::SchoolAlreadyCreated(id.clone()))
            }
            Self::Completed { .. } => Err(StageTransitionError::Completed),
        }
    }

    /// Move the cursor forward without any remote side effect.
    ///
    /// Only legal once the school exists and not from the last step.
    pub fn advance_cursor(&mut self) -> Result<WizardStep, StageTransitionError> {
        match self {
            Self::AwaitingSchoolInfo => Err(StageTransitionError::NoSchool),
            Self::SchoolCreated { step, .. } => {
                let next = step.next().ok_or(StageTransitionError::OutOfRange {
                    direction: "forward",
                    step: *step,
                })?;
                *step = next;
                Ok(next)
            }
            Self::Completed { .. } => Err(StageTransitionError::Completed),
        }
    }

    /// Move the cursor back. Never undoes the created school.
    pub fn retreat_cursor(&mut self) -> Result<WizardStep, StageTransitionError> {
        match self {
            Self::AwaitingSchoolInfo => Err(StageTransitionError::OutOfRange {
                direction: "back",
                step: WizardStep::SchoolInfo,
            }),
            Self::SchoolCreated { step, .. } => {
                let prev = step.previous().ok_or(StageTransitionError::OutOfRange {
                    direction: "back",
                    step: *step,
                })?;
                *step = prev;
                Ok(prev)
            }
            Self::Completed { .. } => Err(StageTransitionError::Completed),
        }
    }

    /// Enter the terminal stage. Only reachable from the confirmation step.
    pub fn complete(&mut self, outcome: CompletionOutcome) -> Result<(), StageTransitionError> {
        match self {
            Self::SchoolCreated {
                school_id,
                step: WizardStep::Confirmation,
            } => {
                let school_id = school_id.clone();
                *self = Self::Completed { school_id, outcome };
                Ok(())
            }
            Self::SchoolCreated { step, .. } => Err(StageTransitionError::NotConfirmed(*step)),
            Self::AwaitingSchoolInfo => Err(StageTransitionError::NoSchool),
            Self::Completed { .. } => Err(StageTransitionError::Completed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> SchoolId {
        SchoolId::new(s).unwrap()
    }

    #[test]
    fn test_blank_school_id_rejected() {
        assert!(SchoolId::new("").is_none());
        assert!(SchoolId::new("  ").is_none());
        assert_eq!(id("sch123").as_str(), "sch123");
    }

    #[test]
    fn test_initial_stage() {
        let stage = WizardStage::default();
        assert_eq!(stage.step(), Some(WizardStep::SchoolInfo));
        assert!(stage.school_id().is_none());
    }

    #[test]
    fn test_cannot_advance_cursor_without_school() {
        let mut stage = WizardStage::default();
        assert_eq!(stage.advance_cursor(), Err(StageTransitionError::NoSchool));
    }

    #[test]
    fn test_school_created_moves_to_admin_step() {
        let mut stage = WizardStage::default();
        stage.school_created(id("sch123")).unwrap();
        assert_eq!(stage.step(), Some(WizardStep::AdminInfo));
        assert_eq!(stage.school_id(), Some(&id("sch123")));
    }

    #[test]
    fn test_school_created_only_once() {
        let mut stage = WizardStage::default();
        stage.school_created(id("a")).unwrap();
        assert_eq!(
            stage.school_created(id("b")),
            Err(StageTransitionError::SchoolAlreadyCreated(id("a")))
        );
    }

    #[test]
    fn test_retreat_keeps_school() {
        let mut stage = WizardStage::default();
        stage.school_created(id("sch123")).unwrap();
        assert_eq!(stage.retreat_cursor(), Ok(WizardStep::SchoolInfo));
        assert_eq!(stage.school_id(), Some(&id("sch123")));
        assert_eq!(stage.advance_cursor(), Ok(WizardStep::AdminInfo));
    }

    #[test]
    fn test_cursor_bounds() {
        let mut stage = WizardStage::default();
        assert!(stage.retreat_cursor().is_err());
        stage.school_created(id("x")).unwrap();
        stage.advance_cursor().unwrap();
        assert!(stage.advance_cursor().is_err());
    }

    #[test]
    fn test_complete_is_terminal() {
        let mut stage = WizardStage::default();
        assert_eq!(
            stage.complete(CompletionOutcome::Created),
            Err(StageTransitionError::NoSchool)
        );
        stage.school_created(id("x")).unwrap();
        stage.advance_cursor().unwrap();
        stage.complete(CompletionOutcome::Created).unwrap();
        assert!(stage.is_completed());
        assert_eq!(stage.step(), None);
        assert_eq!(stage.retreat_cursor(), Err(StageTransitionError::Completed));
    }

    #[test]
    fn test_complete_requires_confirmation_step() {
        let mut stage = WizardStage::default();
        stage.school_created(id("x")).unwrap();
        assert_eq!(
            stage.complete(CompletionOutcome::Created),
            Err(StageTransitionError::NotConfirmed(WizardStep::AdminInfo))
        );
        stage.retreat_cursor().unwrap();
        assert_eq!(
            stage.complete(CompletionOutcome::Created),
            Err(StageTransitionError::NotConfirmed(WizardStep::SchoolInfo))
        );
        assert_eq!(stage.school_id(), Some(&id("x")));
        assert!(!stage.is_completed());
    }
}
