//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::config::ThemeSetting;
use crate::scoring::Classification;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Verdict colors (#10b981 / #CA0B00)
    pub good: Color,
    pub bad: Color,
    pub verdict_fg: Color,

    // Gauge
    pub gauge_empty: Color,

    // Form
    pub section_style: Style,
    pub label_color: Color,
    pub value_color: Color,
    pub field_selected: Style,
    pub stale_color: Color,

    // General colors
    pub muted: Color,
    pub title_color: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,
    pub flash_warning: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            good: Color::Rgb(16, 185, 129),
            bad: Color::Rgb(202, 11, 0),
            verdict_fg: Color::White,
            gauge_empty: Color::DarkGray,
            section_style: Style::new().fg(Color::Cyan).bold(),
            label_color: Color::Gray,
            value_color: Color::White,
            field_selected: Style::new().reversed(),
            stale_color: Color::Yellow,
            muted: Color::Gray,
            title_color: Color::Cyan,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            flash_warning: Color::Yellow,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
        }
    }

    pub fn light() -> Self {
        Self {
            good: Color::Rgb(16, 185, 129),
            bad: Color::Rgb(202, 11, 0),
            verdict_fg: Color::White,
            gauge_empty: Color::Indexed(250),
            section_style: Style::new().fg(Color::Blue).bold(),
            label_color: Color::Indexed(240),
            value_color: Color::Black,
            field_selected: Style::new().reversed(),
            stale_color: Color::Indexed(130),
            muted: Color::Indexed(242),
            title_color: Color::Blue,
            status_bar_bg: Color::Indexed(254),
            status_key_color: Color::Blue,
            flash_success: Color::Indexed(28),
            flash_error: Color::Indexed(160),
            flash_warning: Color::Indexed(130),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            popup_bg: Color::Indexed(255),
        }
    }

    /// Color for a verdict (gauge bar, status metric, message background)
    pub fn classification_color(&self, classification: Classification) -> Color {
        match classification {
            Classification::Good => self.good,
            Classification::Bad => self.bad,
        }
    }
}

/// Pick the palette for a configured theme. `Auto` asks the terminal for its
/// background luminance and falls back to dark when it cannot tell.
pub fn resolve_theme(setting: ThemeSetting) -> ThemeColors {
    match setting {
        ThemeSetting::Dark => ThemeColors::dark(),
        ThemeSetting::Light => ThemeColors::light(),
        ThemeSetting::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            _ => ThemeColors::dark(),
        },
    }
}
