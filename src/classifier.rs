//! Conventional-commit classification and tag grouping.
//!
//! Subjects are sorted into [`CommitBucket`]s by the token before their first
//! colon. Matching is a case-insensitive starts-with against a fixed table, so
//! `fixing: x` is a fix and `features: x` is an addition.

use tracing::{debug, trace};

use crate::domain::{Buckets, CommitBucket, LogEntry, TagGroup};

/// Text prepended to the body of a commit whose prefix carries `!`
pub const BREAKING_CHANGE_MARKER: &str = "BREAKING CHANGE - ";

/// Prefix lookup table; the first row with a matching prefix wins
const PREFIX_TABLE: &[(&[&str], CommitBucket)] = &[
    (&["feat", "feature"], CommitBucket::Added),
    (
        &["refactor", "perf", "build", "ci", "test", "chore"],
        CommitBucket::Changed,
    ),
    (&["deprecate"], CommitBucket::Deprecated),
    (&["removed"], CommitBucket::Removed),
    (&["fix"], CommitBucket::Fixed),
    (&["doc"], CommitBucket::Docs),
];

/// Outcome of classifying one log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub bucket: CommitBucket,
    pub text: String,
}

impl Classification {
    fn new(bucket: CommitBucket, text: impl Into<String>) -> Self {
        Classification {
            bucket,
            text: text.into(),
        }
    }
}

/// Classify a subject line on its own, ignoring authorship.
pub fn classify_subject(subject: &str) -> Classification {
    let subject = subject.trim();

    let Some((prefix, body)) = subject.split_once(':') else {
        return Classification::new(CommitBucket::Unknown, subject);
    };

    let body = body.trim();
    let text = if prefix.contains('!') {
        format!("{}{}", BREAKING_CHANGE_MARKER, body)
    } else {
        body.to_string()
    };

    // The `!` stays in the prefix used for lookup: `feat!` still starts with `feat`.
    let prefix = prefix.to_lowercase();
    let bucket = PREFIX_TABLE
        .iter()
        .find(|(prefixes, _)| prefixes.iter().any(|p| prefix.starts_with(p)))
        .map(|(_, bucket)| *bucket)
        .unwrap_or(CommitBucket::Unknown);

    Classification::new(bucket, text)
}

/// Sorts log entries into buckets and release groups
#[derive(Debug, Clone)]
pub struct Classifier {
    dependency_bot: String,
}

impl Classifier {
    /// Create a classifier that routes `dependency_bot` commits to the dependency bucket
    pub fn new(dependency_bot: impl Into<String>) -> Self {
        Classifier {
            dependency_bot: dependency_bot.into(),
        }
    }

    /// Classify one entry. Dependency-bot authorship wins over the subject.
    pub fn classify(&self, entry: &LogEntry) -> Classification {
        if entry.author == self.dependency_bot {
            return Classification::new(CommitBucket::DependencyUpdate, entry.subject.trim());
        }
        classify_subject(&entry.subject)
    }

    /// Classify every entry into a single bucket set, ignoring tags.
    pub fn classify_all(&self, entries: &[LogEntry]) -> Buckets {
        let mut buckets = Buckets::new();
        for entry in entries {
            let Classification { bucket, text } = self.classify(entry);
            trace!(%bucket, subject = %entry.subject, "classified commit");
            buckets.push(bucket, text);
        }
        buckets
    }

    /// Split entries (newest first) into release groups.
    ///
    /// Entries before the first tagged one land in an `untagged` group dated
    /// `today`. A tagged entry closes the open group and opens a new one that
    /// includes the tagged entry itself. Groups with no entries are dropped.
    pub fn group_by_tag(&self, entries: &[LogEntry], today: &str) -> Vec<TagGroup> {
        let mut groups = Vec::new();
        let mut current = TagGroup::untagged(today);

        for entry in entries {
            if let Some(tag) = entry.first_tag() {
                let finished = std::mem::replace(&mut current, TagGroup::new(tag, &entry.date));
                flush(&mut groups, finished);
            }

            let Classification { bucket, text } = self.classify(entry);
            current.push(bucket, text);
        }
        flush(&mut groups, current);

        debug!(
            entries = entries.len(),
            groups = groups.len(),
            "grouped log entries by tag"
        );
        groups
    }
}

fn flush(groups: &mut Vec<TagGroup>, group: TagGroup) {
    if group.is_empty() {
        trace!(tag = %group.tag_name, "skipping empty tag group");
        return;
    }
    groups.push(group);
}
