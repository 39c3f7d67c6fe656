//! Version-history access
//!
//! The [LogSource] trait yields [LogEntry] values newest first, the same order
//! `git log` prints them. Implementations:
//!
//! - [repository::Git2LogSource]: reads a real repository through `git2`
//! - [text::TextLogSource]: records captured from `git log` output
//! - [mock::MockLogSource]: canned entries for tests
//!
//! Code that renders documents depends on the trait so it can be exercised
//! without a repository on disk.
//!
//! ```rust
//! # use tappr::git::{LogRange, LogSource};
//! # fn example<S: LogSource>(source: &S) -> tappr::Result<()> {
//! let entries = source.log(&LogRange::parse("v0.4.1..HEAD"))?;
//! println!("{} commits", entries.len());
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;
pub mod text;

pub use mock::MockLogSource;
pub use repository::Git2LogSource;
pub use text::TextLogSource;

use std::fmt;

use crate::domain::LogEntry;
use crate::error::Result;

/// Keyword that selects the whole history reachable from HEAD
pub const ALL_RANGE: &str = "all";

/// Keyword used as `since` version for a first release
pub const INITIAL_RELEASE: &str = "init";

/// Which commits to read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRange {
    /// Everything reachable from HEAD
    All,
    /// Everything reachable from one revision
    Rev(String),
    /// Reachable from `to` but not from `from`
    Between { from: String, to: String },
}

impl LogRange {
    /// Parse `all`, `<rev>` or `<from>..<to>`
    pub fn parse(range: &str) -> Self {
        let range = range.trim();
        if range.is_empty() || range == ALL_RANGE {
            return LogRange::All;
        }
        match range.split_once("..") {
            Some((from, to)) => LogRange::Between {
                from: from.to_string(),
                to: if to.is_empty() {
                    "HEAD".to_string()
                } else {
                    to.to_string()
                },
            },
            None => LogRange::Rev(range.to_string()),
        }
    }

    /// Range covered by release notes for `release_ver`.
    ///
    /// `since_ver == "init"` selects the full history of `release_ver`.
    pub fn for_release(since_ver: &str, release_ver: &str) -> Self {
        if since_ver == INITIAL_RELEASE {
            LogRange::Rev(release_ver.to_string())
        } else {
            LogRange::Between {
                from: since_ver.to_string(),
                to: release_ver.to_string(),
            }
        }
    }
}

impl fmt::Display for LogRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogRange::All => f.write_str(ALL_RANGE),
            LogRange::Rev(rev) => f.write_str(rev),
            LogRange::Between { from, to } => write!(f, "{}..{}", from, to),
        }
    }
}

/// Source of version-history entries
pub trait LogSource {
    /// Entries in `range`, newest first
    ///
    /// # Returns
    /// * `Ok(Vec<LogEntry>)` - Possibly empty list of entries
    /// * `Err` - If a revision cannot be resolved or history cannot be read
    fn log(&self, range: &LogRange) -> Result<Vec<LogEntry>>;
}
