use tracing::debug;

use crate::domain::{Buckets, CommitBucket};
use crate::render::{bullet_list, link_pr_references};
use crate::template::fill_document;

/// Template used when the caller does not supply one
pub const DEFAULT_TEMPLATE: &str = "## What's Changed\n\n$$features$$bugs$$docs$$deps\n**Full Changelog**: $$pre-semver...$$semver\n";

/// Placeholders a release-notes template may contain
pub const PLACEHOLDERS: [&str; 6] = ["semver", "pre-semver", "features", "bugs", "docs", "deps"];

/// Buckets rendered into `$$features`, in order
const FEATURE_BUCKETS: [CommitBucket; 5] = [
    CommitBucket::Added,
    CommitBucket::Changed,
    CommitBucket::Deprecated,
    CommitBucket::Removed,
    CommitBucket::Unknown,
];

/// Builds release notes for a single version range
#[derive(Debug, Clone)]
pub struct ReleaseNotesRenderer {
    template: String,
    pr_path: Option<String>,
    ignore_dependency_bot_commits: bool,
    ignore_docs_commits: bool,
}

impl ReleaseNotesRenderer {
    pub fn new(ignore_dependency_bot_commits: bool, ignore_docs_commits: bool) -> Self {
        ReleaseNotesRenderer {
            template: DEFAULT_TEMPLATE.to_string(),
            pr_path: None,
            ignore_dependency_bot_commits,
            ignore_docs_commits,
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Base path used to turn `(#12)` markers into links
    pub fn with_pr_path(mut self, pr_path: impl Into<String>) -> Self {
        self.pr_path = Some(pr_path.into());
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render notes for `since_ver..release_ver` from classified buckets.
    pub fn render(&self, since_ver: &str, release_ver: &str, buckets: &Buckets) -> String {
        let features: String = FEATURE_BUCKETS
            .iter()
            .map(|b| bullet_list(buckets.get(*b), Some(label(*b).as_str())))
            .collect();
        let bugs = bullet_list(
            buckets.get(CommitBucket::Fixed),
            Some(label(CommitBucket::Fixed).as_str()),
        );
        let docs = if self.ignore_docs_commits {
            String::new()
        } else {
            bullet_list(buckets.get(CommitBucket::Docs), Some(label(CommitBucket::Docs).as_str()))
        };
        let deps = if self.ignore_dependency_bot_commits {
            String::new()
        } else {
            bullet_list(
                buckets.get(CommitBucket::DependencyUpdate),
                Some(label(CommitBucket::DependencyUpdate).as_str()),
            )
        };

        let filled = fill_document(
            &self.template,
            &[
                ("semver", release_ver),
                ("pre-semver", since_ver),
                ("features", features.as_str()),
                ("bugs", bugs.as_str()),
                ("docs", docs.as_str()),
                ("deps", deps.as_str()),
            ],
        );

        let out = match &self.pr_path {
            Some(base) => link_pr_references(&filled, base),
            None => filled,
        };
        debug!(entries = buckets.len(), output_len = out.len(), "release notes rendered");
        out
    }
}

fn label(bucket: CommitBucket) -> String {
    let name = match bucket {
        CommitBucket::Docs => "Doc Update",
        other => other.name(),
    };
    format!("**[{}]**", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buckets() -> Buckets {
        let mut buckets = Buckets::new();
        buckets.push(CommitBucket::Unknown, "misc");
        buckets.push(CommitBucket::Added, "login (#7)");
        buckets.push(CommitBucket::Fixed, "crash");
        buckets.push(CommitBucket::Docs, "readme");
        buckets.push(CommitBucket::DependencyUpdate, "bump serde");
        buckets
    }

    #[test]
    fn test_features_are_ordered_by_bucket() {
        let renderer = ReleaseNotesRenderer::new(true, true).with_template("$$features");
        assert_eq!(
            renderer.render("v1.0.0", "v1.1.0", &buckets()),
            "- **[Added]** Login (#7)\n- **[Unknown]** Misc\n"
        );
    }

    #[test]
    fn test_versions_and_pr_links() {
        let renderer = ReleaseNotesRenderer::new(true, true)
            .with_template("# $$semver (since $$pre-semver)\n$$features$$bugs$$docs$$deps")
            .with_pr_path("https://github.com/acme/tool/pull/");
        let out = renderer.render("v1.0.0", "v1.1.0", &buckets());
        assert!(out.starts_with("# v1.1.0 (since v1.0.0)\n"));
        assert!(out.contains("- **[Added]** Login (https://github.com/acme/tool/pull/7)\n"));
        assert!(out.contains("- **[Fixed]** Crash\n"));
        assert!(!out.contains("Doc Update"));
        assert!(!out.contains("Dependency Update"));
    }

    #[test]
    fn test_docs_and_deps_when_not_ignored() {
        let renderer = ReleaseNotesRenderer::new(false, false).with_template("$$docs$$deps");
        assert_eq!(
            renderer.render("init", "v0.1.0", &buckets()),
            "- **[Doc Update]** Readme\n- **[Dependency Update]** Bump serde\n"
        );
    }

    #[test]
    fn test_default_template() {
        let renderer = ReleaseNotesRenderer::new(true, true);
        let out = renderer.render("v1.0.0", "v1.1.0", &buckets());
        assert!(out.starts_with("## What's Changed\n\n- **[Added]** Login (#7)\n"));
        assert!(out.ends_with("**Full Changelog**: v1.0.0...v1.1.0\n"));
    }
}
