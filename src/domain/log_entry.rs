use crate::error::{Result, TapprError};

/// Field separator of a raw log record (`date|subject|decoration|author`)
pub const RECORD_SEPARATOR: char = '|';

/// One commit as read from version history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub date: String,
    pub subject: String,
    pub tag_refs: Vec<String>,
    pub author: String,
}

impl LogEntry {
    /// Create an entry from already separated fields
    pub fn new(
        date: impl Into<String>,
        subject: impl Into<String>,
        tag_refs: Vec<String>,
        author: impl Into<String>,
    ) -> Self {
        LogEntry {
            date: date.into(),
            subject: subject.into(),
            tag_refs,
            author: author.into(),
        }
    }

    /// Parse one `date|subject|decoration|author` record.
    ///
    /// The subject is kept verbatim; classification trims it later.
    pub fn parse_record(record: &str) -> Result<Self> {
        let record = record.trim_end_matches(['\r', '\n']);
        let fields: Vec<&str> = record.split(RECORD_SEPARATOR).collect();
        if fields.len() != 4 {
            return Err(TapprError::malformed(format!(
                "log record '{}' has {} fields, expected 4 (date|subject|decoration|author)",
                record,
                fields.len()
            )));
        }

        Ok(LogEntry {
            date: fields[0].trim().to_string(),
            subject: fields[1].to_string(),
            tag_refs: parse_ref_decoration(fields[2]),
            author: fields[3].trim().to_string(),
        })
    }

    /// First tag attached to this commit, if any
    pub fn first_tag(&self) -> Option<&str> {
        self.tag_refs.first().map(String::as_str)
    }
}

/// Extract tag names from a ref decoration such as ` (HEAD -> main, tag: v1.0, origin/main)`.
///
/// Names come back sorted, the same order the git2 source uses, so the
/// group a commit opens does not depend on where the log came from.
pub fn parse_ref_decoration(decoration: &str) -> Vec<String> {
    let inner = decoration
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')');

    let mut tags: Vec<String> = inner
        .split(',')
        .filter_map(|part| part.trim().strip_prefix("tag:"))
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    tags.sort();
    tags
}

/// Parse a whole log, one record per line. Blank lines are skipped.
pub fn parse_log(text: &str) -> Result<Vec<LogEntry>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            LogEntry::parse_record(line).map_err(|e| match e {
                TapprError::Malformed(msg) => {
                    TapprError::malformed(format!("line {}: {}", idx + 1, msg))
                }
                other => other,
            })
        })
        .collect()
}
