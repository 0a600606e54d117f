//! Components view rendering.
//!
//! Displays a table of every block in the chain with its rates, derived
//! MTTF/MTTR, availability, and share of the yearly downtime.

use std::cmp::Ordering;

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::model::Component;

/// Column to sort by in the Components view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    /// Keep chain order (LocalDevice first, RemoteServer last).
    #[default]
    Position,
    /// Sort by component name alphabetically.
    Name,
    /// Sort by steady-state availability.
    Availability,
    /// Sort by share of downtime.
    Contribution,
}

impl SortColumn {
    /// Cycle to the next sort column.
    pub fn next(self) -> Self {
        match self {
            SortColumn::Position => SortColumn::Name,
            SortColumn::Name => SortColumn::Availability,
            SortColumn::Availability => SortColumn::Contribution,
            SortColumn::Contribution => SortColumn::Position,
        }
    }

    /// Short label shown in the table title.
    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Position => "position",
            SortColumn::Name => "name",
            SortColumn::Availability => "availability",
            SortColumn::Contribution => "downtime",
        }
    }
}

/// Render the Components view as a sortable table.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(total) = app.report.as_ref().map(|r| r.components.len()) else {
        return;
    };
    let components = app.visible_components();

    let header = Row::new(vec![
        Cell::from(format_header("#", SortColumn::Position, app)),
        Cell::from(format_header("Component", SortColumn::Name, app)),
        Cell::from("Kind"),
        Cell::from("λ (1/h)"),
        Cell::from("μ (1/h)"),
        Cell::from("MTTF (h)"),
        Cell::from("MTTR (h)"),
        Cell::from(format_header("Availability", SortColumn::Availability, app)),
        Cell::from(format_header("Downtime %", SortColumn::Contribution, app)),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = components
        .iter()
        .map(|(idx, c)| {
            // Fallback rates are flagged so borrowed node figures stand out
            let kind_cell = if c.rate_fallback {
                Cell::from(format!("{}*", c.kind)).style(Style::default().fg(app.theme.warning))
            } else {
                Cell::from(c.kind.id()).style(Style::default().fg(app.theme.kind_color(c.kind)))
            };

            Row::new(vec![
                Cell::from(format!("{}", idx + 1)),
                Cell::from(c.name.clone()),
                kind_cell,
                Cell::from(format!("{:.6e}", c.lambda)),
                Cell::from(format!("{:.3}", c.mu)),
                Cell::from(format!("{:.1}", c.mttf)),
                Cell::from(format!("{:.2}", c.mttr)),
                Cell::from(format!("{:.6}", c.availability))
                    .style(app.theme.availability_style(c.availability)),
                Cell::from(format!("{:.3}", c.downtime_contribution_pct())),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),  // #
        Constraint::Fill(3),    // Component
        Constraint::Length(9),  // Kind
        Constraint::Fill(1),    // λ
        Constraint::Fill(1),    // μ
        Constraint::Fill(1),    // MTTF
        Constraint::Fill(1),    // MTTR
        Constraint::Length(13), // Availability
        Constraint::Length(11), // Downtime %
    ];

    let selected_visual_index = app.selected_index.min(components.len().saturating_sub(1));

    let sort_dir = if app.sort_ascending { "↑" } else { "↓" };

    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    let position_info = if !components.is_empty() {
        format!(" [{}/{}]", selected_visual_index + 1, components.len())
    } else {
        String::new()
    };

    let title = format!(
        " Components ({}/{}) [s:sort {}{}]{}{} ",
        components.len(),
        total,
        app.sort_column.label(),
        sort_dir,
        filter_info,
        position_info
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected_visual_index));

    frame.render_stateful_widget(table, area, &mut state);
}

fn format_header(name: &str, col: SortColumn, app: &App) -> Span<'static> {
    if app.sort_column == col {
        let arrow = if app.sort_ascending { "↑" } else { "↓" };
        Span::raw(format!("{}{}", name, arrow))
    } else {
        Span::raw(name.to_string())
    }
}

/// Sort `(chain index, component)` pairs by the given column and direction.
pub fn sort_components_by(components: &mut [(usize, &Component)], column: SortColumn, ascending: bool) {
    components.sort_by(|a, b| {
        let primary = match column {
            SortColumn::Position => a.0.cmp(&b.0),
            SortColumn::Name => a.1.name.cmp(&b.1.name),
            SortColumn::Availability => a.1.availability.total_cmp(&b.1.availability),
            SortColumn::Contribution => a
                .1
                .downtime_contribution_pct()
                .total_cmp(&b.1.downtime_contribution_pct()),
        };

        let primary = if ascending { primary } else { primary.reverse() };

        // Chain order breaks ties
        if primary == Ordering::Equal {
            a.0.cmp(&b.0)
        } else {
            primary
        }
    });
}
