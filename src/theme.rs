//! Centralized theme and styling for the TUI
//!
//! Single source of truth for colors and styles. Components reference these
//! constants instead of hardcoding colors.
//!
//! # Usage
//! ```rust
//! use schooladmin::theme::{Colors, Styles, Theme};
//! use schooladmin::types::NotificationLevel;
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::PRIMARY);
//! let title_style = Styles::title();
//! let warning_style = Theme::notification_style(NotificationLevel::Warning);
//! ```

use crate::types::NotificationLevel;
use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for the application
pub struct Colors;

impl Colors {
    // -------------------------------------------------------------------------
    // Base Colors
    // -------------------------------------------------------------------------

    /// Primary dark background - used for popups
    pub const BG_PRIMARY: Color = Color::Rgb(20, 20, 30);

    /// Warning/danger popup background
    pub const BG_DANGER: Color = Color::Rgb(30, 20, 20);

    pub const FG_PRIMARY: Color = Color::White;
    pub const FG_SECONDARY: Color = Color::Gray;
    pub const FG_MUTED: Color = Color::DarkGray;

    // -------------------------------------------------------------------------
    // Accent Colors
    // -------------------------------------------------------------------------

    /// Borders, titles, highlights
    pub const PRIMARY: Color = Color::Cyan;

    /// Selected items, emphasis
    pub const SECONDARY: Color = Color::Yellow;

    // -------------------------------------------------------------------------
    // Semantic Colors
    // -------------------------------------------------------------------------

    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;
    pub const INFO: Color = Color::Blue;

    // -------------------------------------------------------------------------
    // UI Element Colors
    // -------------------------------------------------------------------------

    pub const BORDER_ACTIVE: Color = Color::Cyan;
    pub const BORDER_INACTIVE: Color = Color::DarkGray;

    /// Selected item highlight
    pub const SELECTED_BG: Color = Color::Yellow;

    /// Selected item text (for contrast on yellow bg)
    pub const SELECTED_FG: Color = Color::Black;

    pub const NAV_HINT: Color = Color::DarkGray;

    // -------------------------------------------------------------------------
    // Step Progress Colors
    // -------------------------------------------------------------------------

    pub const STEP_ACTIVE: Color = Color::Yellow;
    pub const STEP_COMPLETE: Color = Color::Green;
    pub const STEP_PENDING: Color = Color::Gray;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for common UI patterns
pub struct Styles;

impl Styles {
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    pub fn text_secondary() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    /// Section and screen titles
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_ACTIVE)
    }

    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    /// Highlighted list row
    pub fn selected() -> Style {
        Style::default()
            .bg(Colors::SELECTED_BG)
            .fg(Colors::SELECTED_FG)
            .add_modifier(Modifier::BOLD)
    }

    /// Label of the focused form field
    pub fn focused() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Colors::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Colors::WARNING)
    }

    pub fn error() -> Style {
        Style::default().fg(Colors::ERROR)
    }

    pub fn key_hint() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }
}

// =============================================================================
// SEMANTIC STYLING
// =============================================================================

/// Styles derived from application state
pub struct Theme;

impl Theme {
    pub fn notification_color(level: NotificationLevel) -> Color {
        match level {
            NotificationLevel::Info => Colors::INFO,
            NotificationLevel::Success => Colors::SUCCESS,
            NotificationLevel::Warning => Colors::WARNING,
            NotificationLevel::Error => Colors::ERROR,
        }
    }

    pub fn notification_style(level: NotificationLevel) -> Style {
        Style::default()
            .fg(Self::notification_color(level))
            .add_modifier(Modifier::BOLD)
    }

    pub fn notification_background(level: NotificationLevel) -> Color {
        match level {
            NotificationLevel::Error => Colors::BG_DANGER,
            _ => Colors::BG_PRIMARY,
        }
    }

    pub fn notification_title(level: NotificationLevel) -> &'static str {
        match level {
            NotificationLevel::Info => " Info ",
            NotificationLevel::Success => " Done ",
            NotificationLevel::Warning => " Partially completed ",
            NotificationLevel::Error => " Error ",
        }
    }

    /// Style for a step in the progress header
    pub fn step_style(completed: bool, active: bool) -> Style {
        if active {
            Style::default()
                .fg(Colors::STEP_ACTIVE)
                .add_modifier(Modifier::BOLD)
        } else if completed {
            Style::default().fg(Colors::STEP_COMPLETE)
        } else {
            Style::default().fg(Colors::STEP_PENDING)
        }
    }
}

/// Fixed UI strings
pub struct UiText;

impl UiText {
    pub const LOADING: &'static str = "Loading...";
    pub const PROCESSING: &'static str = "Processing...";
    pub const DISMISS_HINT: &'static str = "Press Enter or Esc to dismiss";
    pub const DRY_RUN_BADGE: &'static str = " [DRY RUN] ";
}
