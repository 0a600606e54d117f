//! Line-oriented traceroute scanner.
//!
//! Understands both `traceroute` (Unix) and `tracert` (Windows, including
//! localized banners) output. Each hop line yields either the first
//! dotted-quad address on it or, when every attempt timed out, the opacity
//! marker. Banner, trailer and blank lines are skipped.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::HopToken;

static IPV4_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+\.\d+\.\d+)").expect("valid IPv4 pattern"));

/// Lowercase prefixes of banner and trailer lines.
const SKIPPED_PREFIXES: &[&str] = &[
    "rastreando",
    "com ",
    "trace",
    "tracing",
    "over",
    "rastreamento conclu",
];

/// Scan a whole trace into hop tokens, in path order.
pub fn parse_trace(text: &str) -> Vec<HopToken> {
    text.lines().filter_map(parse_line).collect()
}

/// Scan one line. Returns `None` for lines that are not hops.
pub fn parse_line(line: &str) -> Option<HopToken> {
    let line = line.trim();
    if line.is_empty() || is_banner(line) {
        return None;
    }

    if let Some(m) = IPV4_LITERAL.find(line) {
        Some(HopToken::address(m.as_str()))
    } else if line.contains('*') {
        Some(HopToken::Hidden)
    } else {
        None
    }
}

fn is_banner(line: &str) -> bool {
    let lower = line.to_lowercase();
    SKIPPED_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}
