//! File-based trace source.
//!
//! Polls a saved traceroute/tracert output file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use super::{parse_trace, TraceSource};
use crate::model::HopToken;

/// A source that reads hops from a trace file.
///
/// The source tracks the file's modification time and only returns
/// new hops when the file has been updated, so a trace that is being
/// rewritten is picked up on the next poll.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
        }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    fn read_file(&mut self) -> Option<Vec<HopToken>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                self.last_error = None;
                let hops = parse_trace(&content);
                debug!(path = %self.path.display(), hops = hops.len(), "read trace file");
                Some(hops)
            }
            Err(e) => {
                self.last_error = Some(format!("Read error: {}", e));
                None
            }
        }
    }
}

impl TraceSource for FileSource {
    fn poll(&mut self) -> Option<Vec<HopToken>> {
        let current_modified = self.get_modified_time();

        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,        // First poll, always read
            (Some(_), None) => false, // File disappeared, keep the last hops
            (Some(last), Some(current)) => current > last,
        };

        if file_changed {
            if let Some(hops) = self.read_file() {
                self.last_modified = current_modified;
                return Some(hops);
            }
        }

        None
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
