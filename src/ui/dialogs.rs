//! Popup rendering: notifications and shared geometry.

use crate::notification::NotificationQueue;
use crate::theme::{Styles, Theme, UiText};
use crate::types::NotificationLevel;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// A rect centered in `area`, sized as a percentage of it with minimums.
///
/// The result never exceeds `area`.
pub fn centered_rect(
    area: Rect,
    width_percent: u16,
    height_percent: u16,
    min_width: u16,
    min_height: u16,
) -> Rect {
    let scale = |len: u16, percent: u16| (u32::from(len) * u32::from(percent) / 100) as u16;
    let width = scale(area.width, width_percent)
        .max(min_width)
        .min(area.width);
    let height = scale(area.height, height_percent)
        .max(min_height)
        .min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Render the front notification of the queue, if any.
///
/// Errors and warnings get a centered popup that waits for dismissal;
/// informational ones sit as a one-line toast at the top of `area`.
pub fn render_notification(f: &mut Frame, area: Rect, queue: &NotificationQueue) {
    let Some(notification) = queue.current() else {
        return;
    };

    if !notification.level.requires_dismissal() {
        let toast_area = Rect::new(area.x, area.y, area.width, 1.min(area.height));
        let toast = Paragraph::new(Line::from(vec![
            Span::styled(
                Theme::notification_title(notification.level),
                Theme::notification_style(notification.level),
            ),
            Span::styled(notification.message.clone(), Styles::text()),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(Clear, toast_area);
        f.render_widget(toast, toast_area);
        return;
    }

    let popup = centered_rect(area, 60, 30, 40, 7);
    f.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(notification.message.clone(), Styles::text())),
        Line::from(""),
    ];
    if notification.level == NotificationLevel::Warning {
        lines.push(Line::from(Span::styled(
            "The school was kept, but it has no administrator yet.",
            Styles::text_secondary(),
        )));
        lines.push(Line::from(""));
    }
    let more = queue.len().saturating_sub(1);
    let hint = if more > 0 {
        format!("{} ({} more)", UiText::DISMISS_HINT, more)
    } else {
        UiText::DISMISS_HINT.to_string()
    };
    lines.push(Line::from(Span::styled(hint, Styles::text_muted())));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            Theme::notification_title(notification.level),
            Theme::notification_style(notification.level),
        ))
        .border_style(Style::default().fg(Theme::notification_color(notification.level)))
        .style(Style::default().bg(Theme::notification_background(notification.level)));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, popup);
}
