use std::fs;
use std::io::{self, Read};

use tracing::debug;

use crate::domain::{parse_log, LogEntry};
use crate::error::{Result, TapprError};
use crate::git::{LogRange, LogSource};

/// Log records already produced by `git log --pretty=format:'%as|%s|%d|%an'`.
///
/// The text was captured for one range, so the requested range is ignored.
#[derive(Debug, Clone)]
pub struct TextLogSource {
    entries: Vec<LogEntry>,
}

impl TextLogSource {
    /// Parse pipe-delimited records
    pub fn parse(text: &str) -> Result<Self> {
        Ok(TextLogSource {
            entries: parse_log(text)?,
        })
    }

    /// Read records from a file, or from stdin when `path` is `-`
    pub fn read(path: &str) -> Result<Self> {
        let text = if path == "-" {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            fs::read_to_string(path).map_err(|e| {
                TapprError::malformed(format!("Cannot read log file {}: {}", path, e))
            })?
        };
        Self::parse(&text)
    }
}

impl LogSource for TextLogSource {
    fn log(&self, range: &LogRange) -> Result<Vec<LogEntry>> {
        debug!(range = %range, commits = self.entries.len(), "using captured log text");
        Ok(self.entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_log() {
        let source = TextLogSource::parse(
            "2023-05-02|fix: crash| (HEAD -> main)|Jane\n2023-05-01|feat: login| (tag: v1.0.0)|Bob\n",
        )
        .unwrap();
        let entries = source.log(&LogRange::All).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].tag_refs, vec!["v1.0.0".to_string()]);
    }

    #[test]
    fn test_missing_file_is_malformed() {
        let err = TextLogSource::read("/nonexistent/git.log").unwrap_err();
        assert!(matches!(err, TapprError::Malformed(_)));
    }
}
