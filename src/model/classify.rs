//! Hop classification.
//!
//! A hop token is mapped to a [`ComponentKind`] by walking an ordered rule
//! table; the first matching rule wins. Address prefixes are not mutually
//! exclusive in general, so the order of [`CLASSIFICATION_RULES`] is part of
//! the contract. Tokens no rule matches fall through to [`DEFAULT_KIND`].

use super::{ComponentKind, HopToken};

/// Private-network prefixes (RFC 1918 ranges seen on home and campus LANs).
pub const PRIVATE_PREFIXES: &[&str] = &["192.168.", "10."];

/// Carrier-grade NAT prefix.
pub const CGNAT_PREFIX: &str = "100.";

/// Network of the destination server.
pub const DESTINATION_PREFIX: &str = "200.17.";

/// Kind assigned to public transit hops no rule matched.
pub const DEFAULT_KIND: ComponentKind = ComponentKind::Link;

/// One entry of the classification table.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    /// Short rule name, used in logs.
    pub name: &'static str,
    /// Kind assigned when the rule matches.
    pub kind: ComponentKind,
    matcher: fn(&HopToken) -> bool,
}

impl ClassificationRule {
    /// Check whether this rule applies to the token.
    pub fn matches(&self, token: &HopToken) -> bool {
        (self.matcher)(token)
    }
}

/// Classification rules in precedence order.
pub static CLASSIFICATION_RULES: [ClassificationRule; 4] = [
    ClassificationRule {
        name: "private-network",
        kind: ComponentKind::Node,
        matcher: is_private,
    },
    ClassificationRule {
        name: "carrier-grade-nat",
        kind: ComponentKind::Link,
        matcher: is_cgnat,
    },
    ClassificationRule {
        name: "opaque-hop",
        kind: ComponentKind::Firewall,
        matcher: HopToken::is_hidden,
    },
    ClassificationRule {
        name: "destination-network",
        kind: ComponentKind::Node,
        matcher: is_destination,
    },
];

fn has_prefix(token: &HopToken, prefix: &str) -> bool {
    token.as_address().is_some_and(|addr| addr.starts_with(prefix))
}

fn is_private(token: &HopToken) -> bool {
    PRIVATE_PREFIXES.iter().any(|prefix| has_prefix(token, prefix))
}

fn is_cgnat(token: &HopToken) -> bool {
    has_prefix(token, CGNAT_PREFIX)
}

fn is_destination(token: &HopToken) -> bool {
    has_prefix(token, DESTINATION_PREFIX)
}

/// Returns the first rule matching the token, or `None` for the default branch.
pub fn matching_rule(token: &HopToken) -> Option<&'static ClassificationRule> {
    CLASSIFICATION_RULES.iter().find(|rule| rule.matches(token))
}

/// Classify a hop token. Total over all tokens.
pub fn classify(token: &HopToken) -> ComponentKind {
    matching_rule(token).map_or(DEFAULT_KIND, |rule| rule.kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> HopToken {
        HopToken::address(s)
    }

    #[test]
    fn test_private_network_is_node() {
        assert_eq!(classify(&addr("192.168.1.1")), ComponentKind::Node);
        assert_eq!(classify(&addr("10.0.0.254")), ComponentKind::Node);
        assert_eq!(matching_rule(&addr("10.1.2.3")).unwrap().name, "private-network");
    }

    #[test]
    fn test_cgnat_is_link() {
        assert_eq!(classify(&addr("100.64.0.1")), ComponentKind::Link);
        assert_eq!(matching_rule(&addr("100.64.0.1")).unwrap().name, "carrier-grade-nat");
    }

    #[test]
    fn test_hidden_is_firewall() {
        assert_eq!(classify(&HopToken::Hidden), ComponentKind::Firewall);
        assert_eq!(matching_rule(&HopToken::Hidden).unwrap().name, "opaque-hop");
    }

    #[test]
    fn test_destination_network_is_node() {
        assert_eq!(classify(&addr("200.17.0.1")), ComponentKind::Node);
        assert_eq!(matching_rule(&addr("200.17.10.5")).unwrap().name, "destination-network");
    }

    #[test]
    fn test_public_transit_defaults_to_link() {
        assert_eq!(classify(&addr("8.8.8.8")), ComponentKind::Link);
        assert!(matching_rule(&addr("8.8.8.8")).is_none());
        // Looks like the destination network, but without the trailing dot
        assert!(matching_rule(&addr("200.170.1.1")).is_none());
    }

    #[test]
    fn test_ten_prefix_does_not_capture_cgnat() {
        // "100." must not be read as a "10." private address
        assert_eq!(matching_rule(&addr("100.100.1.1")).unwrap().name, "carrier-grade-nat");
    }

    #[test]
    fn test_rules_are_checked_in_order() {
        let names: Vec<&str> = CLASSIFICATION_RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            ["private-network", "carrier-grade-nat", "opaque-hop", "destination-network"]
        );
    }
}
