//! Property and boundary tests for the diagram layout engine.

use proptest::prelude::*;
use trace_rbd::layout::{compute_layout, LayoutBlock, LayoutConfig, Route};

/// 10 x 4 boxes with a gap of 2 on a canvas wide enough for exactly three.
fn three_per_row() -> LayoutConfig {
    LayoutConfig {
        canvas_width: 42.0,
        canvas_height: 60.0,
        box_width: 10.0,
        box_height: 4.0,
        horizontal_gap: 2.0,
        vertical_gap: 6.0,
        margin_x: 1.0,
        margin_y: 1.0,
    }
}

fn blocks(n: usize) -> Vec<LayoutBlock> {
    (0..n)
        .map(|i| LayoutBlock::new(format!("Hop{}_10.0.0.{}", i, i), 0.999))
        .collect()
}

#[test]
fn seven_blocks_three_per_row() {
    let layout = compute_layout(&blocks(7), &three_per_row()).unwrap();

    assert_eq!(layout.blocks_per_row, 3);
    assert_eq!(layout.rows, 3);
    assert_eq!(layout.connectors.len(), 6);

    let routes: Vec<Route> = layout.connectors.iter().map(|c| c.route).collect();
    assert_eq!(
        routes,
        vec![
            Route::Straight,
            Route::Straight,
            Route::Elbow,
            Route::Straight,
            Route::Straight,
            Route::Elbow,
        ]
    );

    // The row-closing connector drops exactly one row pitch
    let elbow = &layout.connectors[2];
    let drop = elbow.segments[1];
    assert!(drop.is_vertical());
    assert!((drop.length() - 10.0).abs() < 1e-9);

    // ...and enters the next row's first block on its left middle
    let last = elbow.segments.last().unwrap();
    assert_eq!(last.end, layout.placements[3].left_middle());
}

#[test]
fn straight_connectors_span_the_gap() {
    let config = three_per_row();
    let layout = compute_layout(&blocks(3), &config).unwrap();

    for connector in &layout.connectors {
        assert_eq!(connector.route, Route::Straight);
        assert_eq!(connector.segments.len(), 1);
        let segment = connector.segments[0];
        assert!(segment.is_horizontal());
        assert!((segment.length() - config.horizontal_gap).abs() < 1e-9);
        assert_eq!(segment.end, layout.placements[connector.to].left_middle());
    }
}

#[test]
fn default_dimensions_connect_exactly() {
    let layout = compute_layout(&blocks(40), &LayoutConfig::default()).unwrap();

    for connector in &layout.connectors {
        let to = &layout.placements[connector.to];
        assert_eq!(connector.segments.last().unwrap().end, to.left_middle());
        for pair in connector.segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }
}

#[test]
fn elbow_drop_avoids_block_interiors() {
    let layout = compute_layout(&blocks(9), &three_per_row()).unwrap();

    for connector in layout.connectors.iter().filter(|c| c.route == Route::Elbow) {
        let drop = connector.segments[1];
        for placement in &layout.placements {
            for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
                let y = drop.start.y + (drop.end.y - drop.start.y) * t;
                let point = trace_rbd::layout::Point::new(drop.start.x, y);
                assert!(!placement.contains_interior(point));
            }
        }
    }
}

proptest! {
    #[test]
    fn layout_is_idempotent(n in 0usize..40) {
        let config = LayoutConfig::default();
        let input = blocks(n);
        let first = compute_layout(&input, &config).unwrap();
        let second = compute_layout(&input, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn connector_segments_chain(
        n in 2usize..40,
        canvas_width in 30.0f64..200.0,
        canvas_height in 50.0f64..500.0,
        box_width in 5.0f64..12.0,
        box_height in 1.0f64..20.0,
        horizontal_gap in 0.1f64..3.0,
        vertical_gap in 0.1f64..30.0,
    ) {
        let config = LayoutConfig {
            canvas_width,
            canvas_height,
            box_width,
            box_height,
            horizontal_gap,
            vertical_gap,
            ..three_per_row()
        };
        let layout = compute_layout(&blocks(n), &config).unwrap();

        prop_assert_eq!(layout.connectors.len(), n - 1);
        for connector in &layout.connectors {
            prop_assert_eq!(connector.to, connector.from + 1);

            let from = &layout.placements[connector.from];
            let to = &layout.placements[connector.to];
            prop_assert_eq!(connector.segments[0].start, from.right_middle());
            prop_assert_eq!(connector.segments.last().unwrap().end, to.left_middle());

            for pair in connector.segments.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
            }
            for segment in &connector.segments {
                prop_assert!(segment.is_horizontal() || segment.is_vertical());
            }
            if connector.route == Route::Elbow {
                prop_assert!((connector.segments[1].length() - config.row_pitch()).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn rows_follow_blocks_per_row(n in 0usize..60) {
        let layout = compute_layout(&blocks(n), &three_per_row()).unwrap();
        prop_assert_eq!(layout.rows, n.div_ceil(3));
        for placement in &layout.placements {
            prop_assert_eq!(placement.row, placement.index / 3);
            prop_assert_eq!(placement.column, placement.index % 3);
        }
    }
}
