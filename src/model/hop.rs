//! Hop tokens produced by the trace scanner.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HopError;

/// Textual form of a hop that never answered (`*` in traceroute output).
pub const HIDDEN_MARKER: &str = "*";

/// One traced network hop, in path order.
///
/// A hop either resolved to an address or stayed opaque (timed out,
/// filtered). Tokens are immutable once scanned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum HopToken {
    /// The hop answered from this IPv4 literal.
    Address(String),
    /// The hop did not resolve to an address.
    Hidden,
}

impl HopToken {
    /// Create an address token.
    pub fn address(addr: impl Into<String>) -> Self {
        HopToken::Address(addr.into())
    }

    /// Returns the resolved address, if any.
    pub fn as_address(&self) -> Option<&str> {
        match self {
            HopToken::Address(addr) => Some(addr),
            HopToken::Hidden => None,
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, HopToken::Hidden)
    }

    /// The token as it appears in a trace: the address or the `*` marker.
    pub fn as_str(&self) -> &str {
        self.as_address().unwrap_or(HIDDEN_MARKER)
    }
}

impl fmt::Display for HopToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Only the `*` marker becomes [HopToken::Hidden]; any other text is kept as an address.
impl From<&str> for HopToken {
    fn from(s: &str) -> Self {
        let s = s.trim();
        if s == HIDDEN_MARKER {
            HopToken::Hidden
        } else {
            HopToken::Address(s.to_string())
        }
    }
}

impl TryFrom<String> for HopToken {
    type Error = HopError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<HopToken> for String {
    fn from(token: HopToken) -> Self {
        match token {
            HopToken::Address(addr) => addr,
            HopToken::Hidden => HIDDEN_MARKER.to_string(),
        }
    }
}

impl FromStr for HopToken {
    type Err = HopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(HopError::Empty);
        }
        Ok(HopToken::from(s))
    }
}
