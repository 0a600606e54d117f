//! Stream-based trace source.
//!
//! Reads raw trace output line by line from an async reader, e.g. the
//! stdout of a running `traceroute` piped into the process.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{parse_line, TraceSource};
use crate::model::HopToken;

/// A source that scans trace lines from an async stream.
///
/// A background task reads lines as they arrive; every line that turns out
/// to be a hop publishes the cumulative hop list so far, so the report grows
/// while the trace is still running.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use trace_rbd::StreamSource;
///
/// # tokio_test::block_on(async {
/// let trace = Cursor::new(b" 1  192.168.0.1  1 ms\n".to_vec());
/// let source = StreamSource::spawn(trace, "example");
/// # });
/// ```
#[derive(Debug)]
pub struct StreamSource {
    receiver: mpsc::Receiver<Vec<HopToken>>,
    description: String,
    last_error: Arc<Mutex<Option<String>>>,
    /// Copy of `last_error` taken at the last poll, so `error()` can lend it out.
    polled_error: Option<String>,
}

impl StreamSource {
    /// Spawn a background task that reads from the given async reader.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<R>(reader: R, description: &str) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(16);
        let last_error = Arc::new(Mutex::new(None));
        let error_handle = last_error.clone();

        tokio::spawn(async move {
            let mut reader = BufReader::new(reader);
            let mut line = String::new();
            let mut hops = Vec::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => {
                        debug!(hops = hops.len(), "trace stream ended");
                        set_error(&error_handle, "Stream closed".to_string());
                        break;
                    }
                    Ok(_) => {
                        let Some(hop) = parse_line(&line) else {
                            continue;
                        };
                        hops.push(hop);
                        if tx.send(hops.clone()).await.is_err() {
                            // Receiver dropped
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "trace stream read failed");
                        set_error(&error_handle, format!("Read error: {}", e));
                        break;
                    }
                }
            }
        });

        Self {
            receiver: rx,
            description: format!("stream: {}", description),
            last_error,
            polled_error: None,
        }
    }

    /// Get the last error message, if any.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().ok().and_then(|guard| guard.clone())
    }
}

fn set_error(slot: &Mutex<Option<String>>, message: String) {
    if let Ok(mut guard) = slot.lock() {
        *guard = Some(message);
    }
}

impl TraceSource for StreamSource {
    fn poll(&mut self) -> Option<Vec<HopToken>> {
        // Drain everything queued and keep only the most complete trace
        let mut latest = None;
        while let Ok(hops) = self.receiver.try_recv() {
            latest = Some(hops);
        }
        self.polled_error = self.last_error();
        latest
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.polled_error.as_deref()
    }
}
