//! Application module
//!
//! Contains the main application logic, state management, and event handling.
//!
//! # Module Structure
//! - `state` - Application state types (AppState, AppMode, Catalog, ...)
//! - Main module - App struct and event loop

mod state;

pub use state::{AppMode, AppState, Catalog, LoadState, SelectOption};

use crate::api::SchoolApi;
use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::draft::{DraftFile, SchoolField};
use crate::error::Result;
use crate::input::{self, FormField, WizardInput, cycle_option, fields_for};
use crate::notification::Notification;
use crate::sequencer::{Advance, CallResult, CreationWizard, WizardError, WizardEvent};
use crate::theme::UiText;
use crate::types::WizardStep;
use crate::ui::UiRenderer;
use crate::wizard_state::{CompletionOutcome, StageTransitionError};
use crate::worker::{Worker, WorkerMessage};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Status-line text for a refused wizard action.
fn status_for(err: &WizardError) -> String {
    match err {
        WizardError::Validation(e) => format!("Cannot continue: {}", e),
        WizardError::CallInFlight => "Please wait for the current request".to_string(),
        WizardError::SchoolLocked => {
            "The school is saved; its details can no longer be changed".to_string()
        }
        other => other.to_string(),
    }
}

/// Main application struct
pub struct App {
    state: AppState,
    ui_renderer: UiRenderer,
    /// Keybinding context for navigation hints and the schools list
    keybinding_context: KeybindingContext,
    worker: Worker,
    /// Results from worker threads (polled in main loop)
    worker_rx: Receiver<WorkerMessage>,
}

impl App {
    /// Create the app with a freshly mounted wizard.
    pub fn new(api: Arc<dyn SchoolApi>, dry_run: bool, drafts: Option<DraftFile>) -> Self {
        info!("Creating new App instance");
        let (tx, worker_rx) = mpsc::channel();

        let mut app = Self {
            state: AppState {
                dry_run,
                ..AppState::default()
            },
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
            worker: Worker::new(api, tx),
            worker_rx,
        };
        app.mount_wizard(drafts);
        app
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Toggle help overlay visibility
    pub fn toggle_help(&mut self) {
        self.state.help_visible = !self.state.help_visible;
    }

    /// Mount a new wizard, replacing any current one.
    ///
    /// Bumps the generation so results still in flight for the old wizard
    /// are discarded, and starts loading the catalog lists.
    pub fn mount_wizard(&mut self, drafts: Option<DraftFile>) {
        self.state.wizard_generation += 1;
        self.state.wizard = Some(match drafts {
            Some(drafts) => CreationWizard::with_drafts(drafts),
            None => CreationWizard::new(),
        });
        self.state.form.reset();
        self.state.mode = AppMode::Wizard;
        self.state.catalog.subscriptions = LoadState::Loading;
        self.state.catalog.countries = LoadState::Loading;
        self.state.status_message = "Enter the school details".to_string();
        debug!("Mounted wizard #{}", self.state.wizard_generation);

        self.worker.fetch_catalog();
    }

    /// Drop the wizard and its drafts, then show the schools listing.
    fn show_schools_list(&mut self) {
        self.state.wizard = None;
        self.state.form.reset();
        self.state.mode = AppMode::SchoolsList;
        self.state.help_visible = false;
        self.refresh_schools();
    }

    fn refresh_schools(&mut self) {
        self.state.schools = LoadState::Loading;
        self.worker.fetch_schools();
    }

    /// Drain all pending worker messages without blocking
    pub fn poll_worker_messages(&mut self) {
        while let Ok(msg) = self.worker_rx.try_recv() {
            self.handle_worker_message(msg);
        }
    }

    /// Block up to `timeout` for one worker message and handle it.
    ///
    /// Returns false on timeout.
    pub fn wait_for_worker(&mut self, timeout: Duration) -> bool {
        match self.worker_rx.recv_timeout(timeout) {
            Ok(msg) => {
                self.handle_worker_message(msg);
                true
            }
            Err(_) => false,
        }
    }

    pub fn handle_worker_message(&mut self, msg: WorkerMessage) {
        match msg {
            WorkerMessage::Wizard { generation, result } => {
                self.apply_wizard_result(generation, result);
            }
            WorkerMessage::Subscriptions(result) => {
                self.state.catalog.subscriptions = match result {
                    Ok(list) => LoadState::Loaded(list),
                    Err(e) => {
                        warn!("Failed to load subscriptions: {}", e);
                        self.state.notifications.push(Notification::error(format!(
                            "Could not load subscription plans: {}. Type the plan id instead.",
                            e
                        )));
                        LoadState::Failed(e.to_string())
                    }
                };
            }
            WorkerMessage::Countries(result) => {
                self.state.catalog.countries = match result {
                    Ok(list) => LoadState::Loaded(list),
                    Err(e) => {
                        warn!("Failed to load countries: {}", e);
                        self.state.notifications.push(Notification::error(format!(
                            "Could not load countries: {}. Type the country id instead.",
                            e
                        )));
                        LoadState::Failed(e.to_string())
                    }
                };
            }
            WorkerMessage::Schools(result) => {
                self.state.schools = match result {
                    Ok(list) => {
                        if self.state.mode == AppMode::SchoolsList {
                            self.state.status_message = format!("{} school(s)", list.len());
                        }
                        LoadState::Loaded(list)
                    }
                    Err(e) => {
                        warn!("Failed to load schools: {}", e);
                        LoadState::Failed(e.to_string())
                    }
                };
                let len = self.state.schools.loaded().map_or(0, Vec::len);
                self.state.schools_selection = self.state.schools_selection.min(len.saturating_sub(1));
            }
        }
    }

    fn apply_wizard_result(&mut self, generation: u64, result: CallResult) {
        if generation != self.state.wizard_generation {
            debug!("Discarding result for wizard #{}", generation);
            return;
        }
        let Some(wizard) = self.state.wizard.as_mut() else {
            debug!("Discarding result; no wizard mounted");
            return;
        };

        let event = wizard.apply(result);
        let notifications = wizard.drain_notifications();
        self.state.notifications.extend(notifications);

        match event {
            Ok(WizardEvent::SchoolCreated(id)) => {
                self.state.form.reset();
                self.state.status_message = format!("School saved (id {})", id);
            }
            Ok(WizardEvent::SchoolCreationFailed(_)) => {
                self.state.status_message = "School was not created".to_string();
            }
            Ok(WizardEvent::Finished(outcome)) => {
                self.state.status_message = match outcome {
                    CompletionOutcome::Created => "School and administrator created".to_string(),
                    CompletionOutcome::PartialSuccess { .. } => {
                        "School created without an administrator".to_string()
                    }
                };
                self.show_schools_list();
            }
            Ok(WizardEvent::Moved(step)) => {
                self.state.form.reset();
                self.state.status_message = step.title().to_string();
            }
            Err(e) => warn!("Wizard rejected result: {}", e),
        }
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            self.poll_worker_messages();

            if crossterm::event::poll(Duration::from_millis(50))? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    if key_event.kind == KeyEventKind::Press && self.handle_key_event(key_event) {
                        break;
                    }
                }
            }

            terminal.draw(|f| {
                self.ui_renderer
                    .render(f, &self.state, &self.keybinding_context);
            })?;
        }

        info!("Leaving main application loop");
        Ok(())
    }

    /// Handle keyboard input events. Returns true when the app should exit.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            info!("Quit requested");
            return true;
        }

        if self.state.help_visible {
            if matches!(key_event.code, KeyCode::F(1) | KeyCode::Esc) {
                self.toggle_help();
            }
            return false;
        }

        if key_event.code == KeyCode::F(1) {
            self.toggle_help();
            return false;
        }

        if self.state.notifications.is_blocking() {
            if matches!(key_event.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.notifications.dismiss();
            }
            return false;
        }
        self.state.notifications.expire_transient();

        match self.state.mode {
            AppMode::Wizard => self.handle_wizard_input(input::map_wizard_key(key_event)),
            AppMode::SchoolsList => self.handle_schools_key(key_event),
        }
    }

    fn handle_schools_key(&mut self, key_event: KeyEvent) -> bool {
        let action = self
            .keybinding_context
            .resolve(&self.state.mode, &key_event);

        match action {
            Some(KeyAction::NavigateUp) => self.state.move_school_selection(false),
            Some(KeyAction::NavigateDown) => self.state.move_school_selection(true),
            Some(KeyAction::NewSchool) => self.mount_wizard(None),
            Some(KeyAction::Refresh) => {
                self.state.status_message = "Refreshing...".to_string();
                self.refresh_schools();
            }
            Some(KeyAction::Quit) => return true,
            _ => {}
        }
        false
    }

    fn handle_wizard_input(&mut self, input: WizardInput) -> bool {
        let Some(step) = self.state.wizard.as_ref().and_then(|w| w.step()) else {
            return false;
        };
        let field_count = fields_for(step).len();

        match input {
            WizardInput::Quit => return true,
            WizardInput::Help => self.toggle_help(),
            WizardInput::FocusNext => self.state.form.focus_next(field_count),
            WizardInput::FocusPrevious => self.state.form.focus_previous(field_count),
            WizardInput::Insert(c) => self.edit_focused(|value| value.push(c)),
            WizardInput::Backspace => self.edit_focused(|value| {
                value.pop();
            }),
            WizardInput::ClearField => self.edit_focused(String::clear),
            WizardInput::CycleNext => self.cycle_focused(true),
            WizardInput::CyclePrevious => self.cycle_focused(false),
            WizardInput::Advance => self.advance(),
            WizardInput::Back => self.go_back(),
            WizardInput::Ignored => {}
        }
        false
    }

    /// The focused field when it accepts typed text.
    ///
    /// Select fields take text only when their option list is unavailable,
    /// and never while it is still loading.
    fn typable_focus(&self, step: WizardStep) -> Option<FormField> {
        let field = self.state.form.current(step)?;
        if field.is_select() {
            let catalog = &self.state.catalog;
            let loading = match field {
                FormField::School(SchoolField::Country) => {
                    catalog.countries.is_loading()
                }
                FormField::School(SchoolField::Subscription) => {
                    catalog.subscriptions.is_loading()
                }
                _ => false,
            };
            if loading || catalog.options_for(field).is_some() {
                return None;
            }
        }
        Some(field)
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(step) = self.state.wizard.as_ref().and_then(|w| w.step()) else {
            return;
        };
        let Some(field) = self.typable_focus(step) else {
            return;
        };
        let Some(wizard) = self.state.wizard.as_mut() else {
            return;
        };

        let target = match field {
            FormField::School(f) => wizard.school_field_mut(f),
            FormField::Admin(f) => wizard.admin_field_mut(f),
        };
        match target {
            Ok(value) => edit(value),
            Err(e) => self.state.status_message = status_for(&e),
        }
    }

    fn cycle_focused(&mut self, forward: bool) {
        let Some(wizard) = self.state.wizard.as_ref() else {
            return;
        };
        let Some(field) = wizard.step().and_then(|step| self.state.form.current(step)) else {
            return;
        };
        let Some(options) = self.state.catalog.options_for(field) else {
            return;
        };

        let current = match field {
            FormField::School(f) => wizard.school().field(f),
            FormField::Admin(f) => wizard.admin().field(f),
        };
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        let Some(next) = cycle_option(&values, current, forward).map(str::to_string) else {
            return;
        };

        let Some(wizard) = self.state.wizard.as_mut() else {
            return;
        };
        let result = match field {
            FormField::School(f) => wizard.set_school_field(f, next),
            FormField::Admin(f) => wizard.set_admin_field(f, next),
        };
        if let Err(e) = result {
            self.state.status_message = status_for(&e);
        }
    }

    fn advance(&mut self) {
        if !self.state.can_advance() {
            self.state.status_message = match &self.state.wizard {
                Some(w) if w.is_busy() => "Please wait for the current request".to_string(),
                _ => "Waiting for reference lists to load".to_string(),
            };
            return;
        }
        let generation = self.state.wizard_generation;
        let Some(wizard) = self.state.wizard.as_mut() else {
            return;
        };

        match wizard.next() {
            Ok(Advance::Moved(step)) => {
                self.state.form.reset();
                self.state.status_message = step.title().to_string();
            }
            Ok(Advance::Remote(call)) => {
                self.state.status_message = UiText::PROCESSING.to_string();
                self.worker.spawn_call(generation, call);
            }
            Err(e) => self.state.status_message = status_for(&e),
        }
    }

    fn go_back(&mut self) {
        let Some(wizard) = self.state.wizard.as_mut() else {
            return;
        };

        match wizard.previous() {
            Ok(step) => {
                self.state.form.reset();
                self.state.status_message = step.title().to_string();
            }
            Err(WizardError::Stage(StageTransitionError::OutOfRange { .. })) => {
                let notification = match wizard.school_id() {
                    Some(id) => {
                        warn!("Wizard cancelled; school {} has no administrator", id);
                        Notification::warning(format!(
                            "School '{}' was created but has no administrator",
                            wizard.school().name
                        ))
                    }
                    None => {
                        info!("Wizard cancelled from the first step");
                        Notification::info("Draft discarded")
                    }
                };
                self.state.notifications.push(notification);
                self.show_schools_list();
            }
            Err(e) => self.state.status_message = status_for(&e),
        }
    }
}
