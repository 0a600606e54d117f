//! Channel-based trace source.
//!
//! Receives hop sequences via a tokio watch channel. Useful when hops are
//! pushed by another component (an embedded tracer, a test harness) rather
//! than read from a file.

use tokio::sync::watch;

use super::TraceSource;
use crate::model::HopToken;

/// A source that receives hop sequences via a channel.
///
/// # Example
///
/// ```
/// use trace_rbd::{ChannelSource, HopToken};
///
/// let (tx, source) = ChannelSource::create("embedded tracer");
/// tx.send(vec![HopToken::address("192.168.0.1")]).unwrap();
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Vec<HopToken>>,
    description: String,
    /// Track if we've returned the initial value yet
    initial_returned: bool,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - A description of where hops come from
    pub fn new(receiver: watch::Receiver<Vec<HopToken>>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
            initial_returned: false,
        }
    }

    /// Create a channel pair for sending hops to a ChannelSource.
    ///
    /// Returns (sender, source); the source starts out with an empty trace.
    pub fn create(source_description: &str) -> (watch::Sender<Vec<HopToken>>, Self) {
        let (tx, rx) = watch::channel(Vec::new());
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl TraceSource for ChannelSource {
    fn poll(&mut self) -> Option<Vec<HopToken>> {
        // Return the initial value on first poll
        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        if self.receiver.has_changed().unwrap_or(false) {
            Some(self.receiver.borrow_and_update().clone())
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        None
    }
}
