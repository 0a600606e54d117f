//! Trace text in, report and diagram out.

use std::fs;

use trace_rbd::layout::{compute_layout, LayoutBlock, LayoutConfig, Route};
use trace_rbd::model::{ChainReport, ComponentKind, RateTable, Rates};
use trace_rbd::source::{parse_trace, FileSource, TraceSource};
use trace_rbd::{LayoutError, ReportDocument, Settings};

const TRACE: &str = "\
Tracing route to www.ufs.br [200.17.10.5]
over a maximum of 30 hops:

  1    <1 ms    <1 ms    <1 ms  192.168.1.1
  2     *        *        *     Request timed out.
  3    14 ms    13 ms    13 ms  8.8.8.8
  4    20 ms    19 ms    21 ms  200.17.10.5

Trace complete.
";

#[test]
fn trace_to_report() {
    let hops = parse_trace(TRACE);
    assert_eq!(hops.len(), 4);

    let report = ChainReport::from_hops(&hops, &RateTable::default());
    let kinds: Vec<ComponentKind> = report.components.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ComponentKind::Terminal,
            ComponentKind::Node,
            ComponentKind::Firewall,
            ComponentKind::Link,
            ComponentKind::Node,
            ComponentKind::Node,
        ]
    );

    let a = report.metrics.availability;
    assert!(a > 0.0 && a < 1.0);
    let product: f64 = report.components.iter().map(|c| c.availability).product();
    assert!((a - product).abs() < 1e-15);
    assert!(!report.has_fallbacks());
    assert!(report.metrics.nines().unwrap() > 1.0);

    let blocks: Vec<LayoutBlock> = report.components.iter().map(LayoutBlock::from).collect();
    let layout = compute_layout(&blocks, &LayoutConfig::default()).unwrap();
    assert_eq!(layout.blocks_per_row, 5);
    assert_eq!(layout.rows, 2);
    assert_eq!(layout.connectors[4].route, Route::Elbow);
}

#[test]
fn empty_trace_is_two_endpoints() {
    let report = ChainReport::from_hops(&parse_trace(""), &RateTable::default());
    let kinds: Vec<ComponentKind> = report.components.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![ComponentKind::Terminal, ComponentKind::Node]);

    let expected = report.components[0].availability * report.components[1].availability;
    assert!((report.metrics.availability - expected).abs() < 1e-15);
}

#[test]
fn missing_firewall_rates_fall_back_to_node() {
    let rates = RateTable::new([
        (ComponentKind::Node, Rates::new(3.678e-3, 1.1367382)),
        (ComponentKind::Terminal, Rates::new(4.452e-5, 0.6)),
        (ComponentKind::Link, Rates::new(1e-4, 0.6)),
    ])
    .unwrap();

    let report = ChainReport::from_hops(&parse_trace(TRACE), &rates);
    assert_eq!(report.fallbacks, vec![ComponentKind::Firewall]);

    let firewall = &report.components[2];
    assert!(firewall.rate_fallback);
    assert_eq!(firewall.lambda, 3.678e-3);
}

#[test]
fn narrow_canvas_is_reported_in_export() {
    let report = ChainReport::from_hops(&parse_trace(TRACE), &RateTable::default());
    let config = LayoutConfig {
        canvas_width: 50.0,
        ..LayoutConfig::default()
    };
    let blocks: Vec<LayoutBlock> = report.components.iter().map(LayoutBlock::from).collect();
    let diagram = compute_layout(&blocks, &config);
    assert!(matches!(diagram, Err(LayoutError::CanvasTooNarrow { .. })));

    let doc = ReportDocument::new("test", &report, Some(&diagram));
    let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
    assert!(json.get("diagram").is_none());
    assert!(json["diagram_error"]
        .as_str()
        .unwrap()
        .starts_with("canvas too narrow"));
    assert_eq!(json["components"].as_array().unwrap().len(), 6);
}

#[test]
fn file_source_feeds_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tr.txt");
    fs::write(&path, TRACE).unwrap();

    let mut source = FileSource::new(&path);
    let hops = source.poll().expect("first poll reads the file");
    assert!(source.poll().is_none());

    let settings = Settings::default();
    let report = ChainReport::from_hops(&hops, &settings.rates);
    assert_eq!(report.components.len(), 6);
}
