//! Application state and navigation logic.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::{info, warn};

use crate::config::Settings;
use crate::error::LayoutError;
use crate::layout::{compute_layout, Layout, LayoutBlock};
use crate::model::{ChainReport, Component, HopToken};
use crate::report::ReportDocument;
use crate::source::TraceSource;
use crate::ui::components::{sort_components_by, SortColumn};
use crate::ui::Theme;

/// The current view/tab in the TUI.
///
/// Component detail is shown as an overlay (controlled by
/// `App::show_detail_overlay`) rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Table of every block with its rates and availability.
    Components,
    /// The reliability block diagram.
    Diagram,
    /// Downtime contribution chart.
    Downtime,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Components => View::Diagram,
            View::Diagram => View::Downtime,
            View::Downtime => View::Components,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Components => View::Downtime,
            View::Diagram => View::Components,
            View::Downtime => View::Diagram,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Components => "Components",
            View::Diagram => "Diagram",
            View::Downtime => "Downtime",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Data source
    source: Box<dyn TraceSource>,
    pub settings: Settings,
    pub hops: Vec<HopToken>,
    pub report: Option<ChainReport>,
    pub diagram: Option<Result<Layout, LayoutError>>,
    pub last_updated: Option<Instant>,
    pub load_error: Option<String>,

    // Navigation state
    /// Visual row in the (sorted, filtered) component table.
    pub selected_index: usize,
    /// Chain index of the block highlighted in the diagram.
    pub selected_block: usize,

    // Sorting (Components view)
    pub sort_column: SortColumn,
    pub sort_ascending: bool,

    // Search/filter
    pub filter_text: String,
    pub filter_active: bool,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App, picking a theme from the terminal background.
    pub fn new(source: Box<dyn TraceSource>, settings: Settings) -> Self {
        Self::with_theme(source, settings, Theme::auto_detect())
    }

    /// Create a new App with an explicit theme.
    pub fn with_theme(source: Box<dyn TraceSource>, settings: Settings, theme: Theme) -> Self {
        Self {
            running: true,
            current_view: View::Components,
            show_help: false,
            show_detail_overlay: false,
            source,
            settings,
            hops: Vec::new(),
            report: None,
            diagram: None,
            last_updated: None,
            load_error: None,
            selected_index: 0,
            selected_block: 0,
            sort_column: SortColumn::default(),
            sort_ascending: true,
            filter_text: String::new(),
            filter_active: false,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the source and recompute the report if new hops arrived.
    ///
    /// Returns true if the report changed.
    pub fn reload_data(&mut self) -> bool {
        let polled = self.source.poll();
        self.load_error = self.source.error().map(str::to_string);

        match polled {
            Some(hops) => {
                self.apply_hops(hops);
                true
            }
            None => false,
        }
    }

    /// Rebuild the chain, reliability report, and diagram for `hops`.
    pub fn apply_hops(&mut self, hops: Vec<HopToken>) {
        let report = ChainReport::from_hops(&hops, &self.settings.rates);
        let blocks: Vec<LayoutBlock> = report.components.iter().map(LayoutBlock::from).collect();
        let diagram = compute_layout(&blocks, &self.settings.layout);

        match &diagram {
            Ok(layout) if !layout.fits_canvas() => warn!(
                rows = layout.rows,
                "diagram rows overflow the canvas height"
            ),
            Err(e) => warn!(error = %e, "diagram layout failed"),
            _ => {}
        }
        info!(
            hops = hops.len(),
            availability = report.metrics.availability,
            "report updated"
        );

        let count = report.components.len();
        let visible = self.filtered_component_count(&report);
        self.hops = hops;
        self.report = Some(report);
        self.diagram = Some(diagram);
        self.last_updated = Some(Instant::now());

        // Clamp selection indices; the table row is bounded by the active filter
        self.selected_index = self.selected_index.min(visible.saturating_sub(1));
        self.selected_block = self.selected_block.min(count.saturating_sub(1));
    }

    /// Switch to the next view (cycles Components → Diagram → Downtime).
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down (or along the chain) by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let Some(ref report) = self.report else {
            return;
        };
        match self.current_view {
            View::Components => {
                let max = self.filtered_component_count(report).saturating_sub(1);
                self.selected_index = (self.selected_index + n).min(max);
            }
            View::Diagram => {
                let max = report.components.len().saturating_sub(1);
                self.selected_block = (self.selected_block + n).min(max);
            }
            View::Downtime => {}
        }
    }

    /// Move selection up (or back along the chain) by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        match self.current_view {
            View::Components => self.selected_index = self.selected_index.saturating_sub(n),
            View::Diagram => self.selected_block = self.selected_block.saturating_sub(n),
            View::Downtime => {}
        }
    }

    /// Jump to the first item.
    pub fn select_first(&mut self) {
        match self.current_view {
            View::Components => self.selected_index = 0,
            View::Diagram => self.selected_block = 0,
            View::Downtime => {}
        }
    }

    /// Jump to the last item.
    pub fn select_last(&mut self) {
        let Some(ref report) = self.report else {
            return;
        };
        match self.current_view {
            View::Components => {
                self.selected_index = self.filtered_component_count(report).saturating_sub(1);
            }
            View::Diagram => {
                self.selected_block = report.components.len().saturating_sub(1);
            }
            View::Downtime => {}
        }
    }

    /// Get count of components after applying filter.
    fn filtered_component_count(&self, report: &ChainReport) -> usize {
        report
            .components
            .iter()
            .filter(|c| self.matches_filter(&c.name))
            .count()
    }

    /// Components visible in the table, with their chain indices, in display order.
    pub fn visible_components(&self) -> Vec<(usize, &Component)> {
        let Some(ref report) = self.report else {
            return Vec::new();
        };
        let mut components: Vec<(usize, &Component)> = report
            .components
            .iter()
            .enumerate()
            .filter(|(_, c)| self.matches_filter(&c.name))
            .collect();
        sort_components_by(&mut components, self.sort_column, self.sort_ascending);
        components
    }

    /// Get the chain index of the currently selected component.
    ///
    /// The Components view applies sorting and filtering, so its visual row
    /// differs from the chain index; the Diagram view selects by chain index.
    pub fn get_selected_component_raw_index(&self) -> Option<usize> {
        let report = self.report.as_ref()?;
        match self.current_view {
            View::Components => self
                .visible_components()
                .get(self.selected_index)
                .map(|(idx, _)| *idx),
            View::Diagram => (self.selected_block < report.components.len())
                .then_some(self.selected_block),
            View::Downtime => None,
        }
    }

    /// Open the detail overlay for the selected component.
    pub fn enter_detail(&mut self) {
        if self.get_selected_component_raw_index().is_some() {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlay first, then return to the Components view.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
        } else if self.current_view != View::Components {
            self.current_view = View::Components;
        }
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Cycle to the next sort column.
    pub fn cycle_sort(&mut self) {
        if self.current_view == View::Components {
            self.sort_column = self.sort_column.next();
        }
    }

    /// Toggle sort direction between ascending and descending.
    pub fn toggle_sort_direction(&mut self) {
        if self.current_view == View::Components {
            self.sort_ascending = !self.sort_ascending;
        }
    }

    /// Enter filter input mode (starts capturing keystrokes for search).
    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    /// Clear the filter text and exit filter mode.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
    }

    /// Append a character to the filter text.
    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
        self.selected_index = 0;
    }

    /// Remove the last character from the filter text.
    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
    }

    /// Check if a component name matches the current filter.
    pub fn matches_filter(&self, name: &str) -> bool {
        if self.filter_text.is_empty() {
            return true;
        }
        name.to_lowercase().contains(&self.filter_text.to_lowercase())
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current report to a JSON file.
    pub fn export_report(&self, path: &Path) -> Result<()> {
        let Some(ref report) = self.report else {
            anyhow::bail!("No report to export");
        };
        ReportDocument::new(self.source_description(), report, self.diagram.as_ref())
            .write_to(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentKind;
    use crate::source::ChannelSource;
    use crate::ui::components::SortColumn;

    fn app_with(hops: Vec<HopToken>) -> (tokio::sync::watch::Sender<Vec<HopToken>>, App) {
        let (tx, source) = ChannelSource::create("test");
        tx.send(hops).unwrap();
        let mut app = App::with_theme(Box::new(source), Settings::default(), Theme::dark());
        app.reload_data();
        (tx, app)
    }

    fn sample_hops() -> Vec<HopToken> {
        ["192.168.1.1", "*", "8.8.8.8", "200.17.10.5"]
            .into_iter()
            .map(HopToken::from)
            .collect()
    }

    #[test]
    fn test_reload_builds_report_and_diagram() {
        let (_tx, app) = app_with(sample_hops());

        let report = app.report.as_ref().unwrap();
        assert_eq!(report.components.len(), 6);
        assert_eq!(report.components[2].kind, ComponentKind::Firewall);

        let layout = app.diagram.as_ref().unwrap().as_ref().unwrap();
        assert_eq!(layout.placements.len(), 6);
        assert!(app.last_updated.is_some());
    }

    #[test]
    fn test_reload_without_changes() {
        let (tx, mut app) = app_with(sample_hops());
        assert!(!app.reload_data());

        tx.send(vec![HopToken::address("10.0.0.1")]).unwrap();
        assert!(app.reload_data());
        assert_eq!(app.report.as_ref().unwrap().components.len(), 3);
    }

    #[test]
    fn test_selection_is_clamped_when_chain_shrinks() {
        let (tx, mut app) = app_with(sample_hops());
        app.select_last();
        assert_eq!(app.selected_index, 5);

        tx.send(Vec::new()).unwrap();
        app.reload_data();
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn test_selected_component_follows_sort() {
        let (_tx, mut app) = app_with(sample_hops());
        app.sort_column = SortColumn::Contribution;
        app.sort_ascending = false;

        // A node is the biggest contributor
        let idx = app.get_selected_component_raw_index().unwrap();
        assert_eq!(app.report.as_ref().unwrap().components[idx].kind, ComponentKind::Node);
    }

    #[test]
    fn test_filter_limits_selection() {
        let (_tx, mut app) = app_with(sample_hops());
        for c in "hop".chars() {
            app.filter_push(c);
        }
        app.select_last();
        assert_eq!(app.selected_index, 3);
        assert_eq!(app.visible_components().len(), 4);
    }

    #[test]
    fn test_reload_clamps_selection_to_filtered_rows() {
        let (tx, mut app) = app_with(sample_hops());
        for c in "hop".chars() {
            app.filter_push(c);
        }
        app.select_last();
        assert_eq!(app.selected_index, 3);

        tx.send(vec![HopToken::address("8.8.8.8")]).unwrap();
        app.reload_data();

        assert_eq!(app.visible_components().len(), 1);
        assert_eq!(app.selected_index, 0);
        let idx = app.get_selected_component_raw_index().unwrap();
        assert_eq!(app.report.as_ref().unwrap().components[idx].name, "Hop1_8.8.8.8");
    }

    #[test]
    fn test_diagram_selection_uses_chain_index() {
        let (_tx, mut app) = app_with(sample_hops());
        app.set_view(View::Diagram);
        app.select_next_n(2);
        assert_eq!(app.get_selected_component_raw_index(), Some(2));

        app.enter_detail();
        assert!(app.show_detail_overlay);
        app.go_back();
        assert!(!app.show_detail_overlay);
        app.go_back();
        assert_eq!(app.current_view, View::Components);
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Components.next(), View::Diagram);
        assert_eq!(View::Components.prev(), View::Downtime);
        assert_eq!(View::Downtime.next(), View::Components);
    }

    #[test]
    fn test_export_requires_report() {
        let (_tx, source) = ChannelSource::create("test");
        let app = App::with_theme(Box::new(source), Settings::default(), Theme::dark());
        let dir = tempfile::tempdir().unwrap();
        assert!(app.export_report(&dir.path().join("out.json")).is_err());
    }

    #[test]
    fn test_export_writes_report() {
        let (_tx, app) = app_with(sample_hops());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        app.export_report(&path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["source"], "channel: test");
        assert_eq!(json["components"].as_array().unwrap().len(), 6);
    }
}
