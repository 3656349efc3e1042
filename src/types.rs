//! Type-safe enums shared across the wizard, the UI, and the CLI.
//!
//! Free-text values that the backend owns (country ids, subscription ids)
//! stay `String`; closed sets get proper enums here.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// One of the three wizard steps, numbered 1..=3 for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[repr(u8)]
pub enum WizardStep {
    #[strum(serialize = "school")]
    SchoolInfo = 1,
    #[strum(serialize = "admin")]
    AdminInfo = 2,
    #[strum(serialize = "confirm")]
    Confirmation = 3,
}

impl WizardStep {
    /// Total number of steps.
    pub const TOTAL_STEPS: u8 = 3;

    /// Returns the 1-indexed step number.
    #[inline]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Maps a step number back to a step.
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::SchoolInfo),
            2 => Some(Self::AdminInfo),
            3 => Some(Self::Confirmation),
            _ => None,
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::SchoolInfo => Some(Self::AdminInfo),
            Self::AdminInfo => Some(Self::Confirmation),
            Self::Confirmation => None,
        }
    }

    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::SchoolInfo => None,
            Self::AdminInfo => Some(Self::SchoolInfo),
            Self::Confirmation => Some(Self::AdminInfo),
        }
    }

    /// Display title for the step header.
    pub const fn title(self) -> &'static str {
        match self {
            Self::SchoolInfo => "School Information",
            Self::AdminInfo => "Administrator Information",
            Self::Confirmation => "Confirmation",
        }
    }
}

/// Administrator gender as offered by the step-2 select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    /// Partial success: something was created but a dependent step failed.
    Warning,
    Error,
}

impl NotificationLevel {
    /// Errors stay on screen until dismissed; the rest are informational.
    pub const fn requires_dismissal(self) -> bool {
        matches!(self, Self::Error | Self::Warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_step_numbers_round_trip() {
        for step in WizardStep::iter() {
            assert_eq!(WizardStep::from_number(step.number()), Some(step));
        }
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(4), None);
    }

    #[test]
    fn test_step_sequence() {
        assert_eq!(WizardStep::SchoolInfo.next(), Some(WizardStep::AdminInfo));
        assert_eq!(WizardStep::Confirmation.next(), None);
        assert_eq!(WizardStep::SchoolInfo.previous(), None);
        assert_eq!(WizardStep::Confirmation.previous(), Some(WizardStep::AdminInfo));
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::from_str("female").ok(), Some(Gender::Female));
        assert_eq!(Gender::Male.to_string(), "male");
        assert!(Gender::from_str("").is_err());
    }

    #[test]
    fn test_warning_requires_dismissal() {
        assert!(NotificationLevel::Warning.requires_dismissal());
        assert!(!NotificationLevel::Success.requires_dismissal());
    }
}
