//! Chain construction.
//!
//! A chain is always `[LocalDevice, Hop1 .. HopN, RemoteServer]`: the local
//! device and the destination server frame the classified hops, so even an
//! empty trace yields a valid two-block chain.

use tracing::debug;

use super::classify::{classify, matching_rule};
use super::{ComponentKind, HopToken};

/// Name of the fixed head block.
pub const LOCAL_DEVICE: &str = "LocalDevice";

/// Name of the fixed tail block.
pub const REMOTE_SERVER: &str = "RemoteServer";

/// An unannotated chain element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainEntry {
    pub name: String,
    pub kind: ComponentKind,
}

impl ChainEntry {
    pub fn new(name: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Ordered serial chain of blocks. Never shorter than two entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    entries: Vec<ChainEntry>,
}

impl Chain {
    /// Build the chain for a traced path.
    pub fn build(hops: &[HopToken]) -> Self {
        let mut entries = Vec::with_capacity(hops.len() + 2);
        entries.push(ChainEntry::new(LOCAL_DEVICE, ComponentKind::Terminal));

        for (i, hop) in hops.iter().enumerate() {
            let kind = classify(hop);
            debug!(
                position = i + 1,
                hop = %hop,
                kind = %kind,
                rule = matching_rule(hop).map_or("default", |r| r.name),
                "classified hop"
            );
            entries.push(ChainEntry::new(hop_name(i + 1, hop), kind));
        }

        entries.push(ChainEntry::new(REMOTE_SERVER, ComponentKind::Node));
        Self { entries }
    }

    pub fn entries(&self) -> &[ChainEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChainEntry> {
        self.entries.iter()
    }

    /// Number of blocks, head and tail included.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of blocks derived from traced hops.
    pub fn hop_count(&self) -> usize {
        self.entries.len() - 2
    }

    pub fn kinds(&self) -> Vec<ComponentKind> {
        self.entries.iter().map(|e| e.kind).collect()
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a ChainEntry;
    type IntoIter = std::slice::Iter<'a, ChainEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Display name for the hop at 1-based `position`.
fn hop_name(position: usize, hop: &HopToken) -> String {
    match hop.as_address() {
        Some(addr) => format!("Hop{}_{}", position, addr),
        None => format!("Hop{}_hidden", position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_trace_yields_head_and_tail() {
        let chain = Chain::build(&[]);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.hop_count(), 0);
        assert_eq!(chain.kinds(), vec![ComponentKind::Terminal, ComponentKind::Node]);
        assert_eq!(chain.entries()[0].name, LOCAL_DEVICE);
        assert_eq!(chain.entries()[1].name, REMOTE_SERVER);
    }

    #[test]
    fn test_hop_names_are_positional() {
        let hops = [HopToken::address("192.168.1.1"), HopToken::Hidden];
        let chain = Chain::build(&hops);

        let names: Vec<&str> = chain.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            ["LocalDevice", "Hop1_192.168.1.1", "Hop2_hidden", "RemoteServer"]
        );
    }

    #[test]
    fn test_mixed_trace_kinds() {
        let hops: Vec<HopToken> = ["192.168.1.1", "*", "8.8.8.8", "200.17.10.5"]
            .into_iter()
            .map(HopToken::from)
            .collect();
        let chain = Chain::build(&hops);

        assert_eq!(
            chain.kinds(),
            vec![
                ComponentKind::Terminal,
                ComponentKind::Node,
                ComponentKind::Firewall,
                ComponentKind::Link,
                ComponentKind::Node,
                ComponentKind::Node,
            ]
        );
        assert_eq!(chain.hop_count(), 4);
    }
}
