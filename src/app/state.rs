//! Application state definitions
//!
//! Everything the renderer reads lives here. The state is owned by the UI
//! thread; worker threads only ever talk to it through the app's channel.

use crate::api::{Country, SchoolSummary, Subscription};
use crate::draft::{AdminField, SchoolField};
use crate::input::{FormField, FormState};
use crate::notification::NotificationQueue;
use crate::sequencer::CreationWizard;
use crate::types::Gender;
use strum::IntoEnumIterator;

/// Application operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMode {
    /// School-creation wizard
    Wizard,
    /// Schools listing, the wizard's navigation target
    SchoolsList,
}

/// Progress of a background fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// One entry of a select field: the stored value and what the user sees.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Reference lists backing the step-1 select fields.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub subscriptions: LoadState<Vec<Subscription>>,
    pub countries: LoadState<Vec<Country>>,
}

impl Catalog {
    pub fn is_loading(&self) -> bool {
        self.subscriptions.is_loading() || self.countries.is_loading()
    }

    /// Options for a select field.
    ///
    /// `None` means the field is edited as free text: either it is not a
    /// select, or its list failed to load or came back empty.
    pub fn options_for(&self, field: FormField) -> Option<Vec<SelectOption>> {
        let options: Vec<SelectOption> = match field {
            FormField::School(SchoolField::Country) => self
                .countries
                .loaded()?
                .iter()
                .map(|c| SelectOption {
                    value: c.id.clone(),
                    label: c.name.clone(),
                })
                .collect(),
            FormField::School(SchoolField::Subscription) => self
                .subscriptions
                .loaded()?
                .iter()
                .map(|s| SelectOption {
                    value: s.id.clone(),
                    label: s.display_line(),
                })
                .collect(),
            FormField::Admin(AdminField::Gender) => Gender::iter()
                .map(|g| SelectOption {
                    value: g.to_string(),
                    label: g.to_string(),
                })
                .collect(),
            _ => return None,
        };

        (!options.is_empty()).then_some(options)
    }

    /// Label for a stored select value, falling back to the raw value.
    pub fn display_value(&self, field: FormField, value: &str) -> String {
        self.options_for(field)
            .and_then(|options| options.into_iter().find(|o| o.value == value))
            .map(|o| o.label)
            .unwrap_or_else(|| value.to_string())
    }
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    /// Current application mode
    pub mode: AppMode,
    /// The mounted wizard, if any. Dropping it discards both drafts.
    pub wizard: Option<CreationWizard>,
    /// Incremented each time a wizard is mounted
    pub wizard_generation: u64,
    /// Field focus on the current step
    pub form: FormState,
    pub catalog: Catalog,
    pub schools: LoadState<Vec<SchoolSummary>>,
    /// Selected row in the schools list
    pub schools_selection: usize,
    pub notifications: NotificationQueue,
    /// Status message for user feedback
    pub status_message: String,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Backend calls are simulated
    pub dry_run: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Wizard,
            wizard: None,
            wizard_generation: 0,
            form: FormState::default(),
            catalog: Catalog::default(),
            schools: LoadState::Idle,
            schools_selection: 0,
            notifications: NotificationQueue::default(),
            status_message: "Ready".to_string(),
            help_visible: false,
            dry_run: false,
        }
    }
}

impl AppState {
    /// Forward navigation is disabled while a call is in flight, and on
    /// step 1 while the catalog lists are still loading.
    pub fn can_advance(&self) -> bool {
        match &self.wizard {
            Some(wizard) if wizard.is_busy() || wizard.is_completed() => false,
            Some(wizard) => {
                !(self.catalog.is_loading()
                    && wizard.step() == Some(crate::types::WizardStep::SchoolInfo)
                    && wizard.school_id().is_none())
            }
            None => false,
        }
    }

    /// Move the schools-list selection, clamped to the list.
    pub fn move_school_selection(&mut self, down: bool) {
        let len = self.schools.loaded().map_or(0, Vec::len);
        if len == 0 {
            self.schools_selection = 0;
        } else if down {
            self.schools_selection = (self.schools_selection + 1).min(len - 1);
        } else {
            self.schools_selection = self.schools_selection.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription(id: &str) -> Subscription {
        Subscription {
            id: id.to_string(),
            name: "Basic".to_string(),
            price: 10.0,
        }
    }

    #[test]
    fn test_options_fall_back_to_text_on_failure() {
        let mut catalog = Catalog::default();
        catalog.countries = LoadState::Failed("offline".to_string());
        assert!(catalog
            .options_for(FormField::School(SchoolField::Country))
            .is_none());

        catalog.countries = LoadState::Loaded(Vec::new());
        assert!(catalog
            .options_for(FormField::School(SchoolField::Country))
            .is_none());
    }

    #[test]
    fn test_subscription_options_use_ids() {
        let mut catalog = Catalog::default();
        catalog.subscriptions = LoadState::Loaded(vec![subscription("s1"), subscription("s2")]);
        let options = catalog
            .options_for(FormField::School(SchoolField::Subscription))
            .unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[1].value, "s2");
    }

    #[test]
    fn test_gender_options_always_available() {
        let catalog = Catalog::default();
        let options = catalog
            .options_for(FormField::Admin(AdminField::Gender))
            .unwrap();
        let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["male", "female"]);
    }

    #[test]
    fn test_cannot_advance_while_catalog_loads() {
        let mut state = AppState::default();
        state.wizard = Some(CreationWizard::new());
        state.catalog.countries = LoadState::Loading;
        assert!(!state.can_advance());

        state.catalog.countries = LoadState::Failed("x".to_string());
        assert!(state.can_advance());
    }

    #[test]
    fn test_schools_selection_clamped() {
        let mut state = AppState::default();
        state.move_school_selection(true);
        assert_eq!(state.schools_selection, 0);

        state.schools = LoadState::Loaded(vec![SchoolSummary::default(), SchoolSummary::default()]);
        state.move_school_selection(true);
        state.move_school_selection(true);
        assert_eq!(state.schools_selection, 1);
        state.move_school_selection(false);
        assert_eq!(state.schools_selection, 0);
    }
}
