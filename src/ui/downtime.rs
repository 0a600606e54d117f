//! Downtime view rendering.
//!
//! Ranks every block by its share of the chain's yearly downtime and shows
//! the ranking as a horizontal bar chart.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::model::Component;

/// Width reserved for bar labels.
const LABEL_WIDTH: usize = 24;
/// Bars carry integer values; contributions are scaled by this factor.
const VALUE_SCALE: f64 = 1_000_000.0;

/// Render the Downtime view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref report) = app.report else {
        return;
    };

    let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).split(area);

    let ranking = report.downtime_ranking();
    let total_unavailability: f64 = report.components.iter().map(|c| 1.0 - c.availability).sum();

    // ===== SUMMARY =====
    let summary = match ranking.first() {
        Some(worst) => {
            let share = share_of_total(worst, total_unavailability);
            Line::from(vec![
                Span::raw(" Largest contributor: "),
                Span::styled(
                    worst.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    " ({:.3}% of the year, {:.1}% of summed unavailability)",
                    worst.downtime_contribution_pct(),
                    share
                )),
            ])
        }
        None => Line::from(" No components"),
    };
    let summary_block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    frame.render_widget(Paragraph::new(summary).block(summary_block), chunks[0]);

    // ===== CHART =====
    let bars: Vec<Bar> = ranking
        .iter()
        .map(|c| {
            let pct = c.downtime_contribution_pct();
            Bar::default()
                .value((pct * VALUE_SCALE).round() as u64)
                .text_value(format!("{:.3}%", pct))
                .label(Line::from(truncate(&c.name, LABEL_WIDTH)))
                .style(Style::default().fg(app.theme.kind_color(c.kind)))
                .value_style(
                    app.theme
                        .availability_style(c.availability)
                        .add_modifier(Modifier::REVERSED),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(" Downtime contribution (% of year, worst first) ")
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, chunks[1]);
}

/// A component's share of the summed per-block unavailability, in percent.
fn share_of_total(component: &Component, total_unavailability: f64) -> f64 {
    if total_unavailability > 0.0 {
        (1.0 - component.availability) / total_unavailability * 100.0
    } else {
        0.0
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentKind, Rates};

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("LocalDevice", 24), "LocalDevice");
        assert_eq!(truncate("Hop12_203.0.113.250", 10), "Hop12_203…");
    }

    #[test]
    fn test_share_of_total_handles_zero() {
        let c = Component::from_rates("x", ComponentKind::Link, Rates::new(1e-4, 0.6));
        assert_eq!(share_of_total(&c, 0.0), 0.0);
        assert!((share_of_total(&c, 1.0 - c.availability) - 100.0).abs() < 1e-9);
    }
}
