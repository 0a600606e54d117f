use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a block in the reliability chain.
///
/// Every kind carries a `(lambda, mu)` pair from the active
/// [`RateTable`](super::RateTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// End-user device at the head of the chain.
    Terminal,
    /// Router or server.
    Node,
    /// Access or transit link.
    Link,
    /// Opaque hop, modeled as a filtering midpoint.
    #[serde(rename = "fw")]
    Firewall,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 4] = [
        ComponentKind::Terminal,
        ComponentKind::Node,
        ComponentKind::Link,
        ComponentKind::Firewall,
    ];

    /// Short identifier used in configuration files and exports.
    pub fn id(&self) -> &'static str {
        match self {
            ComponentKind::Terminal => "terminal",
            ComponentKind::Node => "node",
            ComponentKind::Link => "link",
            ComponentKind::Firewall => "fw",
        }
    }

    /// Returns the display label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::Terminal => "Terminal",
            ComponentKind::Node => "Node",
            ComponentKind::Link => "Link",
            ComponentKind::Firewall => "Firewall",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
