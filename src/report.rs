//! Report export.
//!
//! Assembles everything the tool knows about one trace (the component
//! table, aggregate metrics, downtime ranking, and the diagram geometry)
//! into a serializable document and writes it as pretty JSON.

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::error::LayoutError;
use crate::layout::Layout;
use crate::model::{ChainReport, Component, ComponentKind};

/// One row of the component table.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentRow {
    pub name: String,
    pub kind: ComponentKind,
    pub lambda: f64,
    pub mu: f64,
    pub mttf_hours: f64,
    pub mttr_hours: f64,
    pub availability: f64,
    pub downtime_contribution_pct: f64,
    pub rate_fallback: bool,
}

impl From<&Component> for ComponentRow {
    fn from(c: &Component) -> Self {
        Self {
            name: c.name.clone(),
            kind: c.kind,
            lambda: c.lambda,
            mu: c.mu,
            mttf_hours: c.mttf,
            mttr_hours: c.mttr,
            availability: c.availability,
            downtime_contribution_pct: c.downtime_contribution_pct(),
            rate_fallback: c.rate_fallback,
        }
    }
}

/// Aggregate results. `nines` is `null` when undefined, with the reason in
/// `nines_error`.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub availability: f64,
    pub availability_pct: f64,
    pub downtime_hours_per_year: f64,
    pub downtime_days_per_year: f64,
    pub nines: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nines_error: Option<String>,
}

/// The complete exported report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub source: String,
    pub hop_count: usize,
    pub components: Vec<ComponentRow>,
    pub metrics: MetricsSummary,
    /// Component names by descending downtime contribution.
    pub ranking: Vec<String>,
    /// Kinds that used the `node` rates for lack of their own.
    pub fallbacks: Vec<ComponentKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagram: Option<Layout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagram_error: Option<String>,
}

impl ReportDocument {
    pub fn new(
        source: &str,
        report: &ChainReport,
        diagram: Option<&Result<Layout, LayoutError>>,
    ) -> Self {
        let metrics = &report.metrics;
        let (nines, nines_error) = match metrics.nines() {
            Ok(n) => (Some(n), None),
            Err(e) => (None, Some(e.to_string())),
        };
        let (diagram, diagram_error) = match diagram {
            Some(Ok(layout)) => (Some(layout.clone()), None),
            Some(Err(e)) => (None, Some(e.to_string())),
            None => (None, None),
        };

        Self {
            source: source.to_string(),
            hop_count: report.components.len().saturating_sub(2),
            components: report.components.iter().map(ComponentRow::from).collect(),
            metrics: MetricsSummary {
                availability: metrics.availability,
                availability_pct: metrics.availability_pct(),
                downtime_hours_per_year: metrics.downtime_hours_per_year,
                downtime_days_per_year: metrics.downtime_days_per_year(),
                nines,
                nines_error,
            },
            ranking: report
                .downtime_ranking()
                .into_iter()
                .map(|c| c.name.clone())
                .collect(),
            fallbacks: report.fallbacks.clone(),
            diagram,
            diagram_error,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report to `path` as pretty JSON.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Short human-readable summary for the terminal.
    pub fn summary(&self) -> String {
        let m = &self.metrics;
        let nines = m
            .nines
            .map_or_else(|| "undefined".to_string(), |n| format!("{:.3}", n));
        format!(
            "{} components ({} hops)\nTotal availability: {:.10} ({:.4}%)\nAnnual downtime: {:.2} hours (~{:.2} days)\nNines: {}",
            self.components.len(),
            self.hop_count,
            m.availability,
            m.availability_pct,
            m.downtime_hours_per_year,
            m.downtime_days_per_year,
            nines,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compute_layout, LayoutBlock, LayoutConfig};
    use crate::model::{HopToken, RateTable, Rates};

    fn sample() -> (ChainReport, Result<Layout, LayoutError>) {
        let hops = [HopToken::address("192.168.1.1"), HopToken::Hidden];
        let report = ChainReport::from_hops(&hops, &RateTable::default());
        let blocks: Vec<LayoutBlock> = report.components.iter().map(LayoutBlock::from).collect();
        let layout = compute_layout(&blocks, &LayoutConfig::default());
        (report, layout)
    }

    #[test]
    fn test_document_contents() {
        let (report, layout) = sample();
        let doc = ReportDocument::new("file: tr.txt", &report, Some(&layout));

        assert_eq!(doc.hop_count, 2);
        assert_eq!(doc.components.len(), 4);
        assert_eq!(doc.components[2].name, "Hop2_hidden");
        assert_eq!(doc.components[2].kind, ComponentKind::Firewall);
        assert!(doc.metrics.nines.is_some());
        assert_eq!(doc.ranking.len(), 4);
        assert_eq!(doc.diagram.as_ref().unwrap().placements.len(), 4);
        assert!(doc.diagram_error.is_none());
    }

    #[test]
    fn test_json_shape() {
        let (report, layout) = sample();
        let doc = ReportDocument::new("file: tr.txt", &report, Some(&layout));
        let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

        assert_eq!(json["components"][2]["kind"], "fw");
        assert_eq!(json["diagram"]["connectors"][0]["route"], "straight");
        assert!(json["metrics"]["downtime_hours_per_year"].as_f64().unwrap() > 0.0);
        assert!(json.get("nines_error").is_none());
    }

    #[test]
    fn test_undefined_nines_is_null_with_reason() {
        let rates = RateTable::new([(ComponentKind::Node, Rates::new(1e-300, 1.0))]).unwrap();
        let report = ChainReport::from_hops(&[], &rates);
        let doc = ReportDocument::new("test", &report, None);
        let json: serde_json::Value = serde_json::to_value(&doc).unwrap();

        assert!(json["metrics"]["nines"].is_null());
        assert!(json["metrics"]["nines_error"]
            .as_str()
            .unwrap()
            .contains("undefined"));
        assert!(doc.summary().contains("Nines: undefined"));
    }

    #[test]
    fn test_layout_error_is_reported() {
        let (report, _) = sample();
        let narrow = LayoutConfig {
            canvas_width: 10.0,
            ..LayoutConfig::default()
        };
        let blocks: Vec<LayoutBlock> = report.components.iter().map(LayoutBlock::from).collect();
        let layout = compute_layout(&blocks, &narrow);
        let doc = ReportDocument::new("test", &report, Some(&layout));

        assert!(doc.diagram.is_none());
        assert!(doc.diagram_error.unwrap().contains("too narrow"));
    }

    #[test]
    fn test_write_to_file() {
        let (report, layout) = sample();
        let doc = ReportDocument::new("test", &report, Some(&layout));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        doc.write_to(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"ranking\""));
    }
}
