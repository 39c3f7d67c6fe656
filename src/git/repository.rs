use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use git2::{Oid, Repository as Git2Repo, Sort};
use tracing::debug;

use crate::domain::LogEntry;
use crate::error::{Result, TapprError};
use crate::git::{LogRange, LogSource};

/// Reads commit history from a git repository through libgit2
pub struct Git2LogSource {
    repo: Git2Repo,
}

impl Git2LogSource {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2LogSource { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2LogSource { repo }
    }

    fn resolve_commit(&self, rev: &str) -> Result<Oid> {
        let object = self.repo.revparse_single(rev).map_err(|e| {
            TapprError::malformed(format!("Cannot resolve revision '{}': {}", rev, e))
        })?;
        Ok(object.peel_to_commit()?.id())
    }

    /// Map of commit id to the names of tags pointing at it
    fn tags_by_commit(&self) -> Result<HashMap<Oid, Vec<String>>> {
        let mut tags: HashMap<Oid, Vec<String>> = HashMap::new();

        for name in self.repo.tag_names(None)?.iter().flatten() {
            let Ok(reference) = self.repo.find_reference(&format!("refs/tags/{}", name)) else {
                continue;
            };
            // Annotated and lightweight tags both peel to their commit
            if let Ok(commit) = reference.peel_to_commit() {
                tags.entry(commit.id()).or_default().push(name.to_string());
            }
        }

        for names in tags.values_mut() {
            names.sort();
        }
        Ok(tags)
    }
}

/// Format a commit time as `YYYY-MM-DD` in the committer's own offset
fn format_commit_date(time: git2::Time) -> String {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60).unwrap_or_else(|| Utc.fix());
    DateTime::from_timestamp(time.seconds(), 0)
        .map(|dt| dt.with_timezone(&offset).format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

impl LogSource for Git2LogSource {
    fn log(&self, range: &LogRange) -> Result<Vec<LogEntry>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;

        match range {
            LogRange::All => revwalk.push_head()?,
            LogRange::Rev(rev) => revwalk.push(self.resolve_commit(rev)?)?,
            LogRange::Between { from, to } => {
                revwalk.push(self.resolve_commit(to)?)?;
                revwalk.hide(self.resolve_commit(from)?)?;
            }
        }

        let tags = self.tags_by_commit()?;
        let mut entries = Vec::new();

        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;

            let subject = commit.summary().unwrap_or("").to_string();
            let author = commit.author().name().unwrap_or("unknown").to_string();
            let date = format_commit_date(commit.committer().when());
            let tag_refs = tags.get(&oid).cloned().unwrap_or_default();

            entries.push(LogEntry {
                date,
                subject,
                tag_refs,
                author,
            });
        }

        debug!(range = %range, commits = entries.len(), "read git history");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Signature, Time};
    use tempfile::TempDir;

    fn commit(repo: &Git2Repo, message: &str, author: &str, seconds: i64) -> Oid {
        let sig = Signature::new(author, "dev@example.com", &Time::new(seconds, 0)).unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parents = match repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => vec![],
        };
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    fn tag(repo: &Git2Repo, name: &str, oid: Oid) {
        let object = repo.find_object(oid, None).unwrap();
        repo.tag_lightweight(name, &object, false).unwrap();
    }

    fn fixture() -> (TempDir, Git2LogSource) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        let first = commit(&repo, "feat: initial", "Jane", 1_672_531_200); // 2023-01-01
        tag(&repo, "v0.1.0", first);
        commit(&repo, "fix: crash (#3)\n\nlong body", "Bob", 1_675_209_600); // 2023-02-01
        let third = commit(&repo, "bump serde", "dependabot[bot]", 1_677_628_800); // 2023-03-01
        tag(&repo, "v0.2.0", third);
        commit(&repo, "docs: readme", "Jane", 1_680_307_200); // 2023-04-01
        (dir, Git2LogSource::from_git2(repo))
    }

    #[test]
    fn test_log_all_newest_first_with_tags() {
        let (_dir, source) = fixture();
        let entries = source.log(&LogRange::All).unwrap();

        let subjects: Vec<&str> = entries.iter().map(|e| e.subject.as_str()).collect();
        assert_eq!(
            subjects,
            ["docs: readme", "bump serde", "fix: crash (#3)", "feat: initial"]
        );
        assert_eq!(entries[1].tag_refs, vec!["v0.2.0".to_string()]);
        assert_eq!(entries[1].author, "dependabot[bot]");
        assert_eq!(entries[3].tag_refs, vec!["v0.1.0".to_string()]);
        assert_eq!(entries[3].date, "2023-01-01");
        assert!(entries[0].tag_refs.is_empty());
    }

    #[test]
    fn test_log_between_tags() {
        let (_dir, source) = fixture();
        let entries = source.log(&LogRange::parse("v0.1.0..v0.2.0")).unwrap();
        let subjects: Vec<&str> = entries.iter().map(|e| e.subject.as_str()).collect();
        assert_eq!(subjects, ["bump serde", "fix: crash (#3)"]);
    }

    #[test]
    fn test_log_single_rev() {
        let (_dir, source) = fixture();
        let entries = source.log(&LogRange::Rev("v0.1.0".to_string())).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].subject, "feat: initial");
    }

    #[test]
    fn test_unknown_revision_is_malformed() {
        let (_dir, source) = fixture();
        let err = source.log(&LogRange::Rev("v9.9.9".to_string())).unwrap_err();
        assert!(matches!(err, TapprError::Malformed(_)));
    }

    #[test]
    fn test_tag_order_matches_captured_log() {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        let only = commit(&repo, "feat: initial", "Jane", 1_672_531_200);
        tag(&repo, "v2", only);
        tag(&repo, "v10", only);
        let source = Git2LogSource::from_git2(repo);

        let entries = source.log(&LogRange::All).unwrap();
        let captured = crate::domain::parse_ref_decoration(" (HEAD -> main, tag: v2, tag: v10)");
        assert_eq!(entries[0].tag_refs, captured);
        assert_eq!(entries[0].first_tag(), Some("v10"));
    }

    #[test]
    fn test_format_commit_date_uses_offset() {
        // 2023-01-01T23:30:00Z is already 2023-01-02 at +01:00
        assert_eq!(format_commit_date(Time::new(1_672_615_800, 60)), "2023-01-02");
        assert_eq!(format_commit_date(Time::new(1_672_615_800, 0)), "2023-01-01");
    }
}
