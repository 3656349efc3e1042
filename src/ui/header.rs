//! Header, step progress, status line and nav bar rendering

use crate::app::{AppMode, AppState};
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::theme::{Colors, Styles, Theme, UiText};
use crate::types::WizardStep;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strum::IntoEnumIterator;

const APP_TITLE: &str = "School Administration";

/// Render the title bar
pub fn render_header(f: &mut Frame, area: Rect, state: &AppState) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let mut spans = vec![Span::styled(APP_TITLE, Styles::title())];
    let section = match state.mode {
        AppMode::Wizard => "New school",
        AppMode::SchoolsList => "Schools",
    };
    spans.push(Span::styled(format!("  |  {}", section), Styles::text_secondary()));
    if state.dry_run {
        spans.push(Span::styled(
            UiText::DRY_RUN_BADGE,
            Style::default()
                .fg(Colors::SELECTED_FG)
                .bg(Colors::WARNING)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_active()),
        );
    f.render_widget(header, area);
}

/// One span per step: done, current, or pending.
pub fn step_progress_line(current: WizardStep) -> Line<'static> {
    let mut spans = Vec::new();
    for step in WizardStep::iter() {
        if step.number() > 1 {
            spans.push(Span::styled("  >  ", Styles::text_muted()));
        }
        let completed = step.number() < current.number();
        let active = step == current;
        let marker = if completed { "[x]" } else if active { "[>]" } else { "[ ]" };
        spans.push(Span::styled(
            format!("{} {}. {}", marker, step.number(), step.title()),
            Theme::step_style(completed, active),
        ));
    }
    Line::from(spans)
}

/// Render the step progress row above the wizard form
pub fn render_step_progress(f: &mut Frame, area: Rect, current: WizardStep) {
    let progress = Paragraph::new(step_progress_line(current)).alignment(Alignment::Center);
    f.render_widget(progress, area);
}

/// Render the status line
pub fn render_status(f: &mut Frame, area: Rect, status: &str) {
    let widget = Paragraph::new(format!(" {}", status))
        .style(Styles::text_secondary())
        .block(Block::default().borders(Borders::TOP).border_style(Styles::border_inactive()));
    f.render_widget(widget, area);
}

/// Render the navigation bar
pub fn render_nav_bar(
    f: &mut Frame,
    state: &AppState,
    keybinding_ctx: &KeybindingContext,
    area: Rect,
) {
    let mut spans = Vec::new();
    for item in keybinding_ctx.get_nav_items(&state.mode) {
        spans.push(Span::styled(format!(" {} ", item.key_display), Styles::key_hint()));
        spans.push(Span::styled(format!("{}  ", item.action_label), Styles::nav_hint()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
    let area = f.area();
    let help_overlay = HelpOverlay::new(&state.mode, keybinding_ctx);
    help_overlay.render(f, area);
}
