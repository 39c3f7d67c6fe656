use std::fmt;

/// Category a commit subject is sorted into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitBucket {
    Added,
    Changed,
    Deprecated,
    Removed,
    Fixed,
    Docs,
    Unknown,
    DependencyUpdate,
}

impl CommitBucket {
    /// Every bucket, in rendering order
    pub const ALL: [CommitBucket; 8] = [
        CommitBucket::Added,
        CommitBucket::Changed,
        CommitBucket::Deprecated,
        CommitBucket::Removed,
        CommitBucket::Fixed,
        CommitBucket::DependencyUpdate,
        CommitBucket::Docs,
        CommitBucket::Unknown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CommitBucket::Added => "Added",
            CommitBucket::Changed => "Changed",
            CommitBucket::Deprecated => "Deprecated",
            CommitBucket::Removed => "Removed",
            CommitBucket::Fixed => "Fixed",
            CommitBucket::Docs => "Docs",
            CommitBucket::Unknown => "Unknown",
            CommitBucket::DependencyUpdate => "Dependency Update",
        }
    }
}

impl fmt::Display for CommitBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The eight ordered bucket lists accumulated for one tag group (or one release)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    added: Vec<String>,
    changed: Vec<String>,
    deprecated: Vec<String>,
    removed: Vec<String>,
    fixed: Vec<String>,
    docs: Vec<String>,
    unknown: Vec<String>,
    dependency_updates: Vec<String>,
}

impl Buckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; duplicates and log order are preserved
    pub fn push(&mut self, bucket: CommitBucket, text: impl Into<String>) {
        self.slot_mut(bucket).push(text.into());
    }

    pub fn get(&self, bucket: CommitBucket) -> &[String] {
        match bucket {
            CommitBucket::Added => &self.added,
            CommitBucket::Changed => &self.changed,
            CommitBucket::Deprecated => &self.deprecated,
            CommitBucket::Removed => &self.removed,
            CommitBucket::Fixed => &self.fixed,
            CommitBucket::Docs => &self.docs,
            CommitBucket::Unknown => &self.unknown,
            CommitBucket::DependencyUpdate => &self.dependency_updates,
        }
    }

    fn slot_mut(&mut self, bucket: CommitBucket) -> &mut Vec<String> {
        match bucket {
            CommitBucket::Added => &mut self.added,
            CommitBucket::Changed => &mut self.changed,
            CommitBucket::Deprecated => &mut self.deprecated,
            CommitBucket::Removed => &mut self.removed,
            CommitBucket::Fixed => &mut self.fixed,
            CommitBucket::Docs => &mut self.docs,
            CommitBucket::Unknown => &mut self.unknown,
            CommitBucket::DependencyUpdate => &mut self.dependency_updates,
        }
    }

    /// True when all eight buckets are empty
    pub fn is_empty(&self) -> bool {
        CommitBucket::ALL.iter().all(|b| self.get(*b).is_empty())
    }

    pub fn len(&self) -> usize {
        CommitBucket::ALL.iter().map(|b| self.get(*b).len()).sum()
    }
}
