//! Input handling for the wizard forms.
//!
//! Maps key events to wizard intents and tracks which form field has focus.
//! Nothing here touches the drafts; the app applies the intents.

use crate::draft::{AdminField, SchoolField};
use crate::types::WizardStep;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strum::IntoEnumIterator;

/// A focusable field on one of the form steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    School(SchoolField),
    Admin(AdminField),
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            Self::School(f) => f.label(),
            Self::Admin(f) => f.label(),
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, Self::Admin(f) if f.is_secret())
    }

    pub fn is_select(self) -> bool {
        match self {
            Self::School(f) => f.is_select(),
            Self::Admin(f) => f.is_select(),
        }
    }

    pub fn is_required(self) -> bool {
        match self {
            Self::School(f) => SchoolField::REQUIRED.contains(&f),
            Self::Admin(f) => AdminField::REQUIRED.contains(&f),
        }
    }
}

/// Fields shown on a step, in focus order. The confirmation step has none.
pub fn fields_for(step: WizardStep) -> Vec<FormField> {
    match step {
        WizardStep::SchoolInfo => SchoolField::iter().map(FormField::School).collect(),
        WizardStep::AdminInfo => AdminField::iter().map(FormField::Admin).collect(),
        WizardStep::Confirmation => Vec::new(),
    }
}

/// Focus cursor within the current step's fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormState {
    pub focus: usize,
}

impl FormState {
    /// Move focus down, wrapping at the end.
    pub fn focus_next(&mut self, field_count: usize) {
        if field_count > 0 {
            self.focus = (self.focus + 1) % field_count;
        }
    }

    /// Move focus up, wrapping at the top.
    pub fn focus_previous(&mut self, field_count: usize) {
        if field_count > 0 {
            self.focus = (self.focus + field_count - 1) % field_count;
        }
    }

    pub fn reset(&mut self) {
        self.focus = 0;
    }

    pub fn current(&self, step: WizardStep) -> Option<FormField> {
        fields_for(step).get(self.focus).copied()
    }
}

/// What a key press means on the wizard screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardInput {
    FocusNext,
    FocusPrevious,
    Insert(char),
    Backspace,
    ClearField,
    CycleNext,
    CyclePrevious,
    /// Next on steps 1-2, submit on step 3.
    Advance,
    Back,
    Help,
    Quit,
    Ignored,
}

/// Translate a key event for the wizard screen.
pub fn map_wizard_key(key: KeyEvent) -> WizardInput {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => WizardInput::Quit,
            KeyCode::Char('u') => WizardInput::ClearField,
            _ => WizardInput::Ignored,
        };
    }

    match key.code {
        KeyCode::Down | KeyCode::Tab => WizardInput::FocusNext,
        KeyCode::Up | KeyCode::BackTab => WizardInput::FocusPrevious,
        KeyCode::Right => WizardInput::CycleNext,
        KeyCode::Left => WizardInput::CyclePrevious,
        KeyCode::Enter => WizardInput::Advance,
        KeyCode::Esc => WizardInput::Back,
        KeyCode::F(1) => WizardInput::Help,
        KeyCode::Backspace => WizardInput::Backspace,
        KeyCode::Char(c) => WizardInput::Insert(c),
        _ => WizardInput::Ignored,
    }
}

/// Pick the option after (or before) `current`, wrapping around.
///
/// An unknown or empty `current` selects the first option going forward and
/// the last one going backward. Returns `None` when there is nothing to pick.
pub fn cycle_option<'a>(options: &[&'a str], current: &str, forward: bool) -> Option<&'a str> {
    if options.is_empty() {
        return None;
    }
    let len = options.len();
    let index = match options.iter().position(|o| *o == current) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    Some(options[index])
}
