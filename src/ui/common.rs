//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};

/// Render the header bar with the aggregate chain figures.
///
/// Displays: availability indicator, A_total, yearly downtime, nines,
/// block count, and a warning when any kind fell back to node rates.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref report) = app.report else {
        let line = Line::from(vec![
            Span::styled(" TRACE RBD ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| Waiting for trace..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let metrics = &report.metrics;
    let status_style = app.theme.availability_style(metrics.availability);

    let nines = match metrics.nines() {
        Ok(n) => Span::styled(format!("{:.2}", n), Style::default().add_modifier(Modifier::BOLD)),
        Err(_) => Span::styled("undefined", Style::default().fg(app.theme.warning)),
    };

    let mut spans = vec![
        Span::styled(" ● ", status_style),
        Span::styled("TRACE RBD ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ A="),
        Span::styled(
            format!("{:.6}", metrics.availability),
            status_style.add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" ({:.4}%)", metrics.availability_pct())),
        Span::raw(" │ "),
        Span::raw(format!(
            "{:.2} h/yr ({:.2} d)",
            metrics.downtime_hours_per_year,
            metrics.downtime_days_per_year()
        )),
        Span::raw(" │ nines "),
        nines,
        Span::raw(" │ "),
        Span::styled(
            format!("{}", report.components.len()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" blocks"),
    ];

    if report.has_fallbacks() {
        let kinds: Vec<&str> = report.fallbacks.iter().map(|k| k.id()).collect();
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("⚠ node rates used for {}", kinds.join(", ")),
            Style::default().fg(app.theme.warning),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Components "),
        Line::from(" 2:Diagram "),
        Line::from(" 3:Downtime "),
    ];

    let selected = match app.current_view {
        View::Components => 0,
        View::Diagram => 1,
        View::Downtime => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: source, time since last update, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(updated) = app.last_updated {
        let controls = match app.current_view {
            View::Components if app.filter_active => "Type to search | Enter:apply Esc:cancel",
            View::Components => "/:search s:sort S:reverse Tab:switch Enter:detail ?:help q:quit",
            View::Diagram => "←/→:select Tab:switch Enter:detail e:export ?:help q:quit",
            View::Downtime => "Tab:switch e:export r:reload ?:help q:quit",
        };

        // A source error after a successful load keeps the last good report on screen
        let error = app
            .load_error
            .as_ref()
            .map(|e| format!(" | {}", e))
            .unwrap_or_default();

        format!(
            " {} | Updated {:.1}s ago{} | {}",
            app.source_description(),
            updated.elapsed().as_secs_f64(),
            error,
            controls,
        )
    } else if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit r:retry", err)
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  Tab, 1-3    Switch views"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  ←/→ h/l     Select block (diagram)"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       View detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" Components"),
        Line::from("  /         Start filter/search"),
        Line::from("  c         Clear filter"),
        Line::from("  s         Cycle sort column"),
        Line::from("  S         Toggle sort direction"),
        Line::from(""),
        section(" General"),
        Line::from("  r         Reload trace"),
        Line::from("  e         Export report to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 44u16.min(area.width.saturating_sub(4));
    let help_height = 25u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
