//! Detail overlay rendering.
//!
//! Displays a modal overlay with the derivation of one block's availability:
//! the hop it came from, the rule that classified it, and its rates.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::model::{matching_rule, ComponentKind, HopToken};

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 16;

/// Render the component detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(ref report) = app.report else {
        return;
    };
    let Some(raw_index) = app.get_selected_component_raw_index() else {
        return;
    };
    let Some(component) = report.components.get(raw_index) else {
        return;
    };

    let overlay_width = four_fifths(area.width).clamp(MIN_OVERLAY_WIDTH, 90);
    let overlay_height = four_fifths(area.height).clamp(MIN_OVERLAY_HEIGHT, 20);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Length(6), // Header with origin of the block
        Constraint::Min(8),    // Parameter table
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    // ===== HEADER SECTION =====
    // Hops sit between LocalDevice (0) and RemoteServer (n + 1)
    let hop = raw_index.checked_sub(1).and_then(|i| app.hops.get(i));
    let origin = describe_origin(hop, component.kind);

    let rank = report
        .downtime_ranking()
        .iter()
        .position(|c| std::ptr::eq(*c, component))
        .map(|r| r + 1)
        .unwrap_or(0);

    let mut header_lines = vec![
        Line::from(vec![Span::styled(
            format!(" {} ", component.name),
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::raw(" Kind: "),
            Span::styled(
                component.kind.label(),
                Style::default().fg(app.theme.kind_color(component.kind)),
            ),
            Span::raw(format!("    Position: {}/{}", raw_index + 1, report.components.len())),
            Span::raw(format!("    Downtime rank: #{}", rank)),
        ]),
        Line::from(format!(" {}", origin)),
    ];
    if component.rate_fallback {
        header_lines.push(Line::from(Span::styled(
            format!(" No rates configured for {}; using node rates", component.kind),
            Style::default().fg(app.theme.warning),
        )));
    }

    let header_block = Block::default()
        .title(" Component Detail ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(Paragraph::new(header_lines).block(header_block), chunks[0]);

    // ===== PARAMETERS =====
    let downtime_hours = (1.0 - component.availability) * crate::model::HOURS_PER_YEAR;
    let rows = vec![
        parameter_row("Failure rate λ", format!("{:.6e} /h", component.lambda)),
        parameter_row("Repair rate μ", format!("{:.6} /h", component.mu)),
        parameter_row("MTTF (1/λ)", format!("{:.1} h", component.mttf)),
        parameter_row("MTTR (1/μ)", format!("{:.3} h", component.mttr)),
        Row::new(vec![
            Cell::from("Availability μ/(λ+μ)"),
            Cell::from(format!("{:.8}", component.availability))
                .style(app.theme.availability_style(component.availability)),
        ]),
        parameter_row(
            "Downtime contribution",
            format!(
                "{:.4}% ({:.2} h/year)",
                component.downtime_contribution_pct(),
                downtime_hours
            ),
        ),
    ];

    let table = Table::new(rows, [Constraint::Length(24), Constraint::Fill(1)])
        .header(
            Row::new(vec![Cell::from("Parameter"), Cell::from("Value")]).style(app.theme.header),
        )
        .block(
            Block::default()
                .title(" Rates ")
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        );
    frame.render_widget(table, chunks[1]);

    // ===== FOOTER =====
    let footer = Paragraph::new(" ↑↓:navigate  Esc/Enter:close")
        .style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(footer, chunks[2]);
}

fn parameter_row(name: &'static str, value: String) -> Row<'static> {
    Row::new(vec![Cell::from(name), Cell::from(value)])
}

/// Explain where a block came from and why it has its kind.
/// 80% of a terminal dimension, computed wide enough not to overflow.
fn four_fifths(len: u16) -> u16 {
    u16::try_from(u32::from(len) * 80 / 100).unwrap_or(u16::MAX)
}

fn describe_origin(hop: Option<&HopToken>, kind: ComponentKind) -> String {
    match hop {
        Some(token) => {
            let rule = matching_rule(token)
                .map(|r| r.name)
                .unwrap_or("public transit (default)");
            format!("Hop token: {}    Classified by: {}", token, rule)
        }
        None => format!("Chain endpoint ({})", kind.label()),
    }
}
