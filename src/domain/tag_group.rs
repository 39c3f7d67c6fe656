use crate::domain::bucket::{Buckets, CommitBucket};

/// Name of the group that collects commits newer than the most recent tag
pub const UNTAGGED: &str = "untagged";

/// A contiguous run of log entries sharing one release boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagGroup {
    pub tag_name: String,
    pub date: String,
    pub buckets: Buckets,
}

impl TagGroup {
    pub fn new(tag_name: impl Into<String>, date: impl Into<String>) -> Self {
        TagGroup {
            tag_name: tag_name.into(),
            date: date.into(),
            buckets: Buckets::new(),
        }
    }

    /// The implicit group opened before any tagged entry is seen
    pub fn untagged(date: impl Into<String>) -> Self {
        Self::new(UNTAGGED, date)
    }

    pub fn push(&mut self, bucket: CommitBucket, text: impl Into<String>) {
        self.buckets.push(bucket, text);
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
