use tracing::debug;

use crate::domain::{CommitBucket, TagGroup};
use crate::render::{bullet_list, strip_pr_references};
use crate::template::fill_document;

/// Per-tag template used when none is configured
pub const DEFAULT_TEMPLATE: &str = "## [$$tag] - $$date\n\n$$added_list$$changes_list$$deprecated_list$$removed_list$$fixes_list$$dependencies_list$$docs_list$$unknown_list\n";

/// Placeholders a changelog template may contain
pub const PLACEHOLDERS: [&str; 10] = [
    "tag",
    "date",
    "added_list",
    "changes_list",
    "deprecated_list",
    "removed_list",
    "fixes_list",
    "dependencies_list",
    "docs_list",
    "unknown_list",
];

/// Builds a Keep-a-Changelog style document from tag groups
#[derive(Debug, Clone)]
pub struct ChangelogRenderer {
    template: String,
    ignore_dependency_bot_commits: bool,
    ignore_docs_commits: bool,
}

impl ChangelogRenderer {
    pub fn new(ignore_dependency_bot_commits: bool, ignore_docs_commits: bool) -> Self {
        ChangelogRenderer {
            template: DEFAULT_TEMPLATE.to_string(),
            ignore_dependency_bot_commits,
            ignore_docs_commits,
        }
    }

    /// Use a custom per-tag template
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render every group and strip pull request markers.
    pub fn render(&self, groups: &[TagGroup]) -> String {
        let body: String = groups.iter().map(|g| self.render_group(g)).collect();
        let out = strip_pr_references(&body);
        debug!(groups = groups.len(), output_len = out.len(), "changelog rendered");
        out
    }

    /// Render one group; an all-empty group renders as nothing.
    pub fn render_group(&self, group: &TagGroup) -> String {
        if group.is_empty() {
            return String::new();
        }

        let section = |bucket: CommitBucket| {
            let items = group.buckets.get(bucket);
            if items.is_empty() {
                return String::new();
            }
            format!("### {}\n{}\n", heading(bucket), bullet_list(items, None))
        };

        let dependencies = if self.ignore_dependency_bot_commits {
            String::new()
        } else {
            section(CommitBucket::DependencyUpdate)
        };
        let docs = if self.ignore_docs_commits {
            String::new()
        } else {
            section(CommitBucket::Docs)
        };

        let added = section(CommitBucket::Added);
        let changed = section(CommitBucket::Changed);
        let deprecated = section(CommitBucket::Deprecated);
        let removed = section(CommitBucket::Removed);
        let fixed = section(CommitBucket::Fixed);
        let unknown = section(CommitBucket::Unknown);

        fill_document(
            &self.template,
            &[
                ("tag", group.tag_name.as_str()),
                ("date", group.date.as_str()),
                ("added_list", added.as_str()),
                ("changes_list", changed.as_str()),
                ("deprecated_list", deprecated.as_str()),
                ("removed_list", removed.as_str()),
                ("fixes_list", fixed.as_str()),
                ("dependencies_list", dependencies.as_str()),
                ("docs_list", docs.as_str()),
                ("unknown_list", unknown.as_str()),
            ],
        )
    }
}

fn heading(bucket: CommitBucket) -> &'static str {
    match bucket {
        CommitBucket::DependencyUpdate => "Dependency Changes",
        CommitBucket::Docs => "Documentation Changes",
        CommitBucket::Unknown => "Other Changes",
        other => other.name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> TagGroup {
        let mut group = TagGroup::new("v1.0.0", "2023-04-01");
        group.push(CommitBucket::Added, "add login (#12)");
        group.push(CommitBucket::Fixed, "fix crash");
        group.push(CommitBucket::Docs, "readme");
        group.push(CommitBucket::DependencyUpdate, "bump serde");
        group
    }

    #[test]
    fn test_render_group_skips_empty_and_ignored_sections() {
        let renderer = ChangelogRenderer::new(true, true);
        let out = renderer.render(&[group()]);
        assert_eq!(
            out,
            "## [v1.0.0] - 2023-04-01\n\n### Added\n- Add login \n\n### Fixed\n- Fix crash\n\n\n"
        );
        assert!(!out.contains("### Changed"));
        assert!(!out.contains("Documentation"));
        assert!(!out.contains("Dependency"));
    }

    #[test]
    fn test_render_group_includes_docs_and_deps_when_not_ignored() {
        let renderer = ChangelogRenderer::new(false, false);
        let out = renderer.render_group(&group());
        assert!(out.contains("### Dependency Changes\n- Bump serde\n"));
        assert!(out.contains("### Documentation Changes\n- Readme\n"));
    }

    #[test]
    fn test_empty_group_renders_nothing_every_time() {
        let renderer = ChangelogRenderer::new(false, false);
        let empty = TagGroup::untagged("2024-01-01");
        assert_eq!(renderer.render_group(&empty), "");
        assert_eq!(renderer.render_group(&empty), "");
        assert_eq!(renderer.render(&[empty]), "");
    }

    #[test]
    fn test_custom_template_without_some_placeholders() {
        let renderer = ChangelogRenderer::new(true, true).with_template("# $$tag\n$$fixes_list");
        assert_eq!(renderer.render_group(&group()), "# v1.0.0\n### Fixed\n- Fix crash\n\n");
    }
}
