//! Wizard step screens.
//!
//! The step cursor picks one of three presentations:
//! - school information form
//! - administrator information form
//! - confirmation summary of both drafts
//!
//! Passwords are masked everywhere, including the summary.

use crate::app::{AppState, Catalog};
use crate::draft::SchoolField;
use crate::input::{FormField, fields_for};
use crate::sequencer::{CreationWizard, PendingCall};
use crate::theme::{Colors, Styles, UiText};
use crate::types::WizardStep;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

const MASK: char = '*';

/// Text shown for a field value.
///
/// Secrets are masked one `*` per character. A focused select field gets
/// `< >` arrows when it has options to cycle through.
pub fn field_display(field: FormField, value: &str, catalog: &Catalog, focused: bool) -> String {
    if field.is_secret() {
        return MASK.to_string().repeat(value.chars().count());
    }

    if field.is_select() && catalog.options_for(field).is_some() {
        let shown = if value.is_empty() {
            "(choose)".to_string()
        } else {
            catalog.display_value(field, value)
        };
        return if focused {
            format!("< {} >", shown)
        } else {
            shown
        };
    }

    value.to_string()
}

fn field_value<'a>(wizard: &'a CreationWizard, field: FormField) -> &'a str {
    match field {
        FormField::School(f) => wizard.school().field(f),
        FormField::Admin(f) => wizard.admin().field(f),
    }
}

/// Label/value rows of the confirmation summary, per section.
pub fn summary_rows(
    wizard: &CreationWizard,
    catalog: &Catalog,
) -> Vec<(&'static str, Vec<(&'static str, String)>)> {
    let section = |step: WizardStep| {
        fields_for(step)
            .into_iter()
            .filter(|f| f.is_required())
            .map(|f| (f.label(), field_display(f, field_value(wizard, f), catalog, false)))
            .collect::<Vec<_>>()
    };

    vec![
        ("School", section(WizardStep::SchoolInfo)),
        ("Administrator", section(WizardStep::AdminInfo)),
    ]
}

/// Render the screen for the wizard's current step.
pub fn render_wizard_step(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(wizard) = state.wizard.as_ref() else {
        return;
    };
    let Some(step) = wizard.step() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(6),    // Form or summary
            Constraint::Length(2), // Inline error / status
        ])
        .split(area);

    let title = Paragraph::new(step.title())
        .style(Styles::title())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, chunks[0]);

    match step {
        WizardStep::SchoolInfo | WizardStep::AdminInfo => {
            render_form(f, chunks[1], state, wizard, step);
        }
        WizardStep::Confirmation => render_confirmation(f, chunks[1], state, wizard),
    }

    render_step_status(f, chunks[2], state, wizard, step);
}

fn render_form(
    f: &mut Frame,
    area: Rect,
    state: &AppState,
    wizard: &CreationWizard,
    step: WizardStep,
) {
    let locked = step == WizardStep::SchoolInfo && wizard.school_id().is_some();
    let label_width = fields_for(step)
        .iter()
        .map(|field| field.label().len())
        .max()
        .unwrap_or(0)
        + 2;

    let lines: Vec<Line> = fields_for(step)
        .into_iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = i == state.form.focus;
            let value = field_value(wizard, field);
            let missing = field.is_required() && value.trim().is_empty();

            let label_style = if focused {
                Styles::focused()
            } else if missing {
                Styles::warning()
            } else {
                Styles::text_secondary()
            };
            let value_style = if locked {
                Styles::text_muted()
            } else {
                Styles::text()
            };

            let marker = if field.is_required() { "*" } else { " " };
            let cursor = if focused && !locked && !field.is_select() { "_" } else { "" };
            let pointer = if focused { "> " } else { "  " };

            let mut spans = vec![
                Span::styled(pointer, label_style),
                Span::styled(
                    format!("{:<width$}", format!("{}{}", field.label(), marker), width = label_width),
                    label_style,
                ),
                Span::styled(field_display(field, value, &state.catalog, focused), value_style),
                Span::styled(cursor, Styles::focused()),
            ];

            if field.is_select() && focused {
                if let Some(hint) = select_hint(field, &state.catalog) {
                    spans.push(Span::styled(format!("  {}", hint), Styles::text_muted()));
                }
            }

            Line::from(spans)
        })
        .collect();

    let block_title = if locked {
        " Saved - school details can no longer be changed "
    } else {
        " * Required fields "
    };
    let border_style = if locked {
        Styles::border_inactive()
    } else {
        Styles::border_active()
    };

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(block_title),
    );
    f.render_widget(form, area);
}

/// Explains why a select field is (not) cycling.
fn select_hint(field: FormField, catalog: &Catalog) -> Option<&'static str> {
    let load = match field {
        FormField::School(SchoolField::Country) => {
            (catalog.countries.is_loading(), catalog.countries.error().is_some())
        }
        FormField::School(SchoolField::Subscription) => (
            catalog.subscriptions.is_loading(),
            catalog.subscriptions.error().is_some(),
        ),
        _ => return None,
    };
    match load {
        (true, _) => Some(UiText::LOADING),
        (_, true) => Some("(list unavailable, type the id)"),
        _ => None,
    }
}

fn render_confirmation(f: &mut Frame, area: Rect, state: &AppState, wizard: &CreationWizard) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (column, (title, rows)) in columns.iter().zip(summary_rows(wizard, &state.catalog)) {
        let mut lines: Vec<Line> = rows
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!(" {:<18}", label), Styles::text_secondary()),
                    Span::styled(value, Styles::text()),
                ])
            })
            .collect();

        if title == "School" {
            if let Some(id) = wizard.school_id() {
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled(format!(" {:<18}", "Identifier"), Styles::text_secondary()),
                    Span::styled(id.to_string(), Styles::success()),
                ]));
            }
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .title(Span::styled(
                format!(" {} ", title),
                Style::default()
                    .fg(Colors::SECONDARY)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            *column,
        );
    }
}

fn render_step_status(
    f: &mut Frame,
    area: Rect,
    state: &AppState,
    wizard: &CreationWizard,
    step: WizardStep,
) {
    let line = if let Some(pending) = wizard.pending() {
        let text = match pending {
            PendingCall::CreateSchool => "Creating school...",
            PendingCall::CreateAdmin => "Creating administrator...",
        };
        Line::from(Span::styled(format!("  {}", text), Styles::warning()))
    } else if let Some(err) = wizard.inline_error() {
        Line::from(Span::styled(format!("  Error: {}", err), Styles::error()))
    } else if step == WizardStep::SchoolInfo && !state.can_advance() {
        Line::from(Span::styled(
            format!("  {} reference lists", UiText::LOADING),
            Styles::text_muted(),
        ))
    } else if step == WizardStep::Confirmation {
        Line::from(vec![
            Span::styled("  [Enter] ", Styles::key_hint()),
            Span::raw("Create administrator  "),
            Span::styled(" [Esc] ", Styles::key_hint()),
            Span::raw("Back"),
        ])
    } else if wizard.current_step_valid() {
        Line::from(Span::styled("  Ready to continue", Styles::success()))
    } else {
        Line::from(Span::styled("  * Required fields", Styles::text_secondary()))
    };

    f.render_widget(Paragraph::new(line), area);
}
