//! User interface rendering module
//!
//! - `header` - title bar, step progress, status line, nav bar
//! - `screens` - the three wizard step screens
//! - `schools` - the schools listing
//! - `dialogs` - notification popups and popup geometry

pub mod dialogs;
mod header;
pub mod schools;
pub mod screens;

use crate::app::{AppMode, AppState};
use crate::components::keybindings::KeybindingContext;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

/// UI renderer for the application
///
/// Main entry point for rendering; delegates to the submodules.
#[derive(Debug, Default)]
pub struct UiRenderer;

impl UiRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render the complete UI
    pub fn render(&self, f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(1), // Step progress
                Constraint::Min(8),    // Main content
                Constraint::Length(2), // Status line
                Constraint::Length(1), // Navigation bar
            ])
            .split(f.area());

        header::render_header(f, chunks[0], state);

        match state.mode {
            AppMode::Wizard => {
                if let Some(step) = state.wizard.as_ref().and_then(|w| w.step()) {
                    header::render_step_progress(f, chunks[1], step);
                }
                screens::render_wizard_step(f, chunks[2], state);
            }
            AppMode::SchoolsList => schools::render_schools_list(f, chunks[2], state),
        }

        header::render_status(f, chunks[3], &state.status_message);
        header::render_nav_bar(f, state, keybinding_ctx, chunks[4]);

        dialogs::render_notification(f, chunks[2], &state.notifications);

        if state.help_visible {
            header::render_help_overlay(f, state, keybinding_ctx);
        }
    }
}
