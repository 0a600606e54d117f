//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::model::ComponentKind;

/// Availability at or above which a block is drawn as healthy.
pub const HEALTHY_AVAILABILITY: f64 = 0.9999;
/// Availability at or above which a block is drawn as a warning.
pub const WARNING_AVAILABILITY: f64 = 0.999;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for warning-level availability.
    pub warning: Color,
    /// Color for critical-level availability.
    pub critical: Color,
    /// Color for healthy availability.
    pub healthy: Color,
    /// Color for borders, separators and diagram connectors.
    pub border: Color,
    /// Outline color for diagram blocks.
    pub block: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::Gray,
            block: Color::White,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::DarkGray,
            block: Color::Black,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for an availability figure
    pub fn availability_style(&self, availability: f64) -> Style {
        if availability >= HEALTHY_AVAILABILITY {
            Style::default().fg(self.healthy)
        } else if availability >= WARNING_AVAILABILITY {
            Style::default().fg(self.warning)
        } else {
            Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
        }
    }

    /// Get the accent color used for a component kind
    pub fn kind_color(&self, kind: ComponentKind) -> Color {
        match kind {
            ComponentKind::Terminal => self.highlight,
            ComponentKind::Node => Color::Magenta,
            ComponentKind::Link => self.border,
            ComponentKind::Firewall => self.warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_bands() {
        let theme = Theme::dark();
        assert_eq!(theme.availability_style(0.99995).fg, Some(Color::Green));
        assert_eq!(theme.availability_style(0.9995).fg, Some(Color::Yellow));
        assert_eq!(theme.availability_style(0.99).fg, Some(Color::Red));
    }
}
