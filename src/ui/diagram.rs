//! Diagram view rendering.
//!
//! Paints the reliability block diagram on a braille canvas. The layout
//! engine works in a y-up point space, which is exactly the coordinate
//! system of ratatui's [`Canvas`], so placements are drawn unscaled and
//! the canvas bounds do the fitting.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Rectangle},
        Block, Borders, Paragraph, Wrap,
    },
    Frame,
};

use crate::app::App;
use crate::layout::Layout;
use crate::ui::Theme;

/// Render the Diagram view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    match &app.diagram {
        None => {
            let paragraph = Paragraph::new(" No trace loaded").block(block.title(" Diagram "));
            frame.render_widget(paragraph, area);
        }
        Some(Err(e)) => {
            let paragraph = Paragraph::new(format!(" Cannot lay out diagram: {}", e))
                .style(Style::default().fg(app.theme.critical))
                .wrap(Wrap { trim: true })
                .block(block.title(" Diagram "));
            frame.render_widget(paragraph, area);
        }
        Some(Ok(layout)) => {
            let overflow = if layout.fits_canvas() {
                ""
            } else {
                " [rows overflow canvas]"
            };
            block = block.title(format!(
                " Diagram ({} blocks, {} per row){} [←/→ select, Enter:detail] ",
                layout.placements.len(),
                layout.blocks_per_row,
                overflow
            ));

            let selected = app.selected_block;
            let theme = &app.theme;
            let availabilities: Vec<f64> = app
                .report
                .iter()
                .flat_map(|r| r.components.iter().map(|c| c.availability))
                .collect();
            let canvas = Canvas::default()
                .block(block)
                .marker(Marker::Braille)
                .x_bounds([0.0, layout.canvas_width])
                .y_bounds([layout.bottom(), layout.canvas_height])
                .paint(|ctx| paint_layout(ctx, layout, &availabilities, selected, theme));
            frame.render_widget(canvas, area);
        }
    }
}

/// Draw connectors first, then block outlines, then the labels on top.
fn paint_layout(
    ctx: &mut Context,
    layout: &Layout,
    availabilities: &[f64],
    selected: usize,
    theme: &Theme,
) {
    for connector in &layout.connectors {
        for segment in &connector.segments {
            ctx.draw(&CanvasLine {
                x1: segment.start.x,
                y1: segment.start.y,
                x2: segment.end.x,
                y2: segment.end.y,
                color: theme.border,
            });
        }
    }
    ctx.layer();

    for placement in &layout.placements {
        let color = if placement.index == selected {
            theme.highlight
        } else {
            theme.block
        };
        ctx.draw(&Rectangle {
            x: placement.x,
            y: placement.y,
            width: placement.width,
            height: placement.height,
            color,
        });
    }
    ctx.layer();

    for placement in &layout.placements {
        let lines: Vec<&str> = placement.label.lines().collect();
        let step = placement.height / (lines.len() + 2) as f64;
        let x = placement.x + placement.width * 0.05;

        let label_style = if placement.index == selected {
            Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        for (i, text) in lines.iter().enumerate() {
            let y = placement.top() - step * (i + 1) as f64;
            ctx.print(x, y, Span::styled(text.to_string(), label_style));
        }

        let caption_style = availabilities
            .get(placement.index)
            .map(|a| theme.availability_style(*a))
            .unwrap_or_default();
        ctx.print(
            x,
            placement.y + step * 0.5,
            Span::styled(placement.availability_label.clone(), caption_style),
        );
    }
}
