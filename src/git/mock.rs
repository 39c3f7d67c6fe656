use std::cell::RefCell;

use crate::domain::LogEntry;
use crate::error::Result;
use crate::git::{LogRange, LogSource};

/// Mock log source for testing without a repository
pub struct MockLogSource {
    entries: Vec<LogEntry>,
    requested: RefCell<Vec<LogRange>>,
}

impl MockLogSource {
    /// Create a new empty mock source
    pub fn new() -> Self {
        MockLogSource {
            entries: Vec::new(),
            requested: RefCell::new(Vec::new()),
        }
    }

    /// Create a mock source returning `entries` for any range
    pub fn with_entries(entries: Vec<LogEntry>) -> Self {
        MockLogSource {
            entries,
            requested: RefCell::new(Vec::new()),
        }
    }

    /// Append an entry (older than the ones already added)
    pub fn add_entry(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// Ranges passed to [`LogSource::log`] so far
    pub fn requested_ranges(&self) -> Vec<LogRange> {
        self.requested.borrow().clone()
    }
}

impl Default for MockLogSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSource for MockLogSource {
    fn log(&self, range: &LogRange) -> Result<Vec<LogEntry>> {
        self.requested.borrow_mut().push(range.clone());
        Ok(self.entries.clone())
    }
}
