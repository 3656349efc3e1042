//! Schools listing, shown after the wizard finishes.

use crate::app::{AppState, LoadState};
use crate::theme::{Colors, Styles, UiText};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

pub fn render_schools_list(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .title(" Schools ")
        .title_style(Style::default().fg(Colors::SECONDARY));

    let schools = match &state.schools {
        LoadState::Idle | LoadState::Loading => {
            let loading = Paragraph::new(format!("  {}", UiText::LOADING))
                .style(Styles::text_secondary())
                .block(block);
            f.render_widget(loading, area);
            return;
        }
        LoadState::Failed(err) => {
            let lines = vec![
                Line::styled(format!("  Could not load schools: {}", err), Styles::error()),
                Line::styled("  Press R to retry.", Styles::text_muted()),
            ];
            f.render_widget(Paragraph::new(lines).block(block), area);
            return;
        }
        LoadState::Loaded(schools) => schools,
    };

    if schools.is_empty() {
        let empty = Paragraph::new("  No schools yet. Press N to create one.")
            .style(Styles::warning())
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(["Name", "City", "Email", "Id"].map(Cell::from)).style(
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD),
    );
    let rows = schools.iter().map(|school| {
        Row::new([
            Cell::from(school.name.clone()),
            Cell::from(school.city.clone()),
            Cell::from(school.email.clone()),
            Cell::from(school.id.clone()).style(Styles::text_muted()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(35),
            Constraint::Percentage(20),
            Constraint::Percentage(30),
            Constraint::Percentage(15),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(Styles::selected())
    .highlight_symbol("> ");

    let mut table_state = TableState::default();
    table_state.select(Some(state.schools_selection.min(schools.len() - 1)));
    f.render_stateful_widget(table, area, &mut table_state);
}
