//! Terminal UI rendering using ratatui.
//!
//! This module contains all the view-specific rendering logic for the TUI.
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`components`]: Table of every block with rates, MTTF/MTTR and availability
//! - [`diagram`]: The reliability block diagram painted on a braille canvas
//! - [`downtime`]: Bar chart ranking blocks by their share of yearly downtime
//! - [`detail`]: Modal overlay explaining one block's availability
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! [`draw`] lays out one frame and dispatches on the current view:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (components/diagram/downtime)        │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - detail::render_overlay
//!    - common::render_help
//! ```

pub mod common;
pub mod components;
pub mod detail;
pub mod diagram;
pub mod downtime;
pub mod theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

pub use components::SortColumn;
pub use theme::Theme;

use crate::app::{App, View};

/// Minimum terminal width for a usable display.
pub const MIN_WIDTH: u16 = 60;
/// Minimum terminal height for a usable display.
pub const MIN_HEIGHT: u16 = 12;

/// Screen row of the table header; component rows start just below it.
pub const CONTENT_START_ROW: u16 = 3;

/// Render one full frame.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let top = (area.height / 2).saturating_sub(2);
        let centered = Rect::new(0, top, area.width, 5.min(area.height - top));
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(1), // Tabs
        Constraint::Min(8),    // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    common::render_tabs(frame, app, chunks[1]);

    match app.current_view {
        View::Components => components::render(frame, app, chunks[2]),
        View::Diagram => diagram::render(frame, app, chunks[2]),
        View::Downtime => downtime::render(frame, app, chunks[2]),
    }

    common::render_status_bar(frame, app, chunks[3]);

    if app.show_detail_overlay {
        detail::render_overlay(frame, app, area);
    }

    if app.show_help {
        common::render_help(frame, app, area);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::config::Settings;
    use crate::model::HopToken;
    use crate::source::ChannelSource;

    fn loaded_app() -> (tokio::sync::watch::Sender<Vec<HopToken>>, App) {
        let (tx, source) = ChannelSource::create("test");
        tx.send(
            ["192.168.0.1", "100.64.0.1", "*", "8.8.8.8", "200.17.1.1"]
                .into_iter()
                .map(HopToken::from)
                .collect(),
        )
        .unwrap();
        let mut app = App::with_theme(Box::new(source), Settings::default(), Theme::dark());
        app.reload_data();
        (tx, app)
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_every_view_renders() {
        let (_tx, mut app) = loaded_app();
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();

        for view in [View::Components, View::Diagram, View::Downtime] {
            app.set_view(view);
            terminal.draw(|frame| draw(frame, &mut app)).unwrap();
            let text = screen(&terminal);
            assert!(text.contains("TRACE RBD"));
            assert!(text.contains(view.label()));
        }
    }

    #[test]
    fn test_components_view_lists_blocks() {
        let (_tx, mut app) = loaded_app();
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("LocalDevice"));
        assert!(text.contains("RemoteServer"));
    }

    #[test]
    fn test_overlays_render() {
        let (_tx, mut app) = loaded_app();
        app.enter_detail();
        app.toggle_help();
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("Component Detail"));
        assert!(text.contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_detail_overlay_on_wide_terminal() {
        let (_tx, mut app) = loaded_app();
        app.enter_detail();
        let mut terminal = Terminal::new(TestBackend::new(1000, 300)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        assert!(screen(&terminal).contains("Component Detail"));
    }

    #[test]
    fn test_small_terminal_message() {
        let (_tx, mut app) = loaded_app();
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        assert!(screen(&terminal).contains("Terminal too small"));
    }
}
