//! Help overlay component
//!
//! Displays context-sensitive help in a centered window.

use super::keybindings::{HelpSection, KeybindingContext};
use crate::app::AppMode;
use crate::theme::Colors;
use crate::ui::dialogs::centered_rect;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const FOOTER: &str = "Press F1 or Esc to close";

/// Help overlay component
pub struct HelpOverlay {
    content: Vec<Line<'static>>,
}

impl HelpOverlay {
    /// Create a new help overlay for the given mode
    pub fn new(mode: &AppMode, keybinding_ctx: &KeybindingContext) -> Self {
        let sections = keybinding_ctx.get_help_content(mode);
        Self {
            content: Self::build_content(&sections, mode),
        }
    }

    fn build_content(sections: &[HelpSection], mode: &AppMode) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        let mode_name = match mode {
            AppMode::Wizard => "School Creation Wizard",
            AppMode::SchoolsList => "Schools",
        };
        lines.push(Line::from(vec![
            Span::styled("Current: ", Style::default().fg(Colors::FG_MUTED)),
            Span::styled(mode_name, Style::default().fg(Colors::SECONDARY)),
        ]));
        lines.push(Line::from(""));

        for section in sections {
            lines.push(Line::from(vec![Span::styled(
                format!("  {}  ", section.title),
                Style::default()
                    .fg(Colors::SUCCESS)
                    .add_modifier(Modifier::BOLD),
            )]));

            for (key, description) in &section.items {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(
                        format!("{:<12}", key),
                        Style::default()
                            .fg(Colors::PRIMARY)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(description.clone(), Style::default().fg(Colors::FG_PRIMARY)),
                ]));
            }
            lines.push(Line::from(""));
        }

        if *mode == AppMode::Wizard {
            lines.push(Line::from(Span::styled(
                "Typing edits the focused field. Passwords are masked.",
                Style::default().fg(Colors::FG_SECONDARY),
            )));
        }

        lines
    }

    /// Render the help overlay
    pub fn render(&self, f: &mut Frame, parent: Rect) {
        let area = centered_rect(parent, 60, 70, 50, 15);
        f.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Colors::BORDER_ACTIVE))
            .title(" Help ")
            .title_bottom(Line::from(format!(" {} ", FOOTER)).alignment(Alignment::Center))
            .style(Style::default().bg(Colors::BG_PRIMARY));

        let paragraph = Paragraph::new(self.content.clone())
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(overlay: &HelpOverlay) -> String {
        overlay
            .content
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_schools_help_lists_keys() {
        let overlay = HelpOverlay::new(&AppMode::SchoolsList, &KeybindingContext::new());
        let text = text(&overlay);
        assert!(text.contains("New school"));
        assert!(text.contains("General"));
        assert!(!text.contains("Passwords are masked"));
    }

    #[test]
    fn test_wizard_help_mentions_masking() {
        let overlay = HelpOverlay::new(&AppMode::Wizard, &KeybindingContext::new());
        assert!(text(&overlay).contains("Passwords are masked"));
    }
}
