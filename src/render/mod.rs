//! Document builders for changelogs and release notes

pub mod changelog;
pub mod release_notes;

use std::sync::OnceLock;

use regex::{Captures, Regex};

pub use changelog::ChangelogRenderer;
pub use release_notes::ReleaseNotesRenderer;

fn pr_reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(#(\d+)\)").expect("pull request regex is valid"))
}

/// Uppercase the first character, leaving the rest untouched
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render entries as a markdown bullet list, one line per entry.
///
/// `label` is inserted between the bullet and the text when present.
pub fn bullet_list(items: &[String], label: Option<&str>) -> String {
    let mut out = String::new();
    for item in items {
        let text = capitalize_first(item.trim());
        match label {
            Some(label) => out.push_str(&format!("- {} {}\n", label, text)),
            None => out.push_str(&format!("- {}\n", text)),
        }
    }
    out
}

/// Remove `(#123)` pull request markers
pub fn strip_pr_references(text: &str) -> String {
    pr_reference_regex().replace_all(text, "").into_owned()
}

/// Turn `(#123)` into `(<base>123)`
pub fn link_pr_references(text: &str, base: &str) -> String {
    pr_reference_regex()
        .replace_all(text, |caps: &Captures| format!("({}{})", base, &caps[1]))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_first_only_touches_first_letter() {
        assert_eq!(capitalize_first("add OAuth support"), "Add OAuth support");
        assert_eq!(capitalize_first("éclair"), "Éclair");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_bullet_list_trims_and_capitalizes() {
        let items = vec!["  fix crash ".to_string(), "BREAKING CHANGE - x".to_string()];
        assert_eq!(
            bullet_list(&items, None),
            "- Fix crash\n- BREAKING CHANGE - x\n"
        );
        assert_eq!(
            bullet_list(&items[..1], Some("**[Fixed]**")),
            "- **[Fixed]** Fix crash\n"
        );
        assert_eq!(bullet_list(&[], Some("**[Fixed]**")), "");
    }

    #[test]
    fn test_strip_pr_references() {
        assert_eq!(
            strip_pr_references("- Add login (#42)\n- Keep (#abc)\n"),
            "- Add login \n- Keep (#abc)\n"
        );
    }

    #[test]
    fn test_link_pr_references() {
        assert_eq!(
            link_pr_references("- Add login (#42)", "https://github.com/acme/tool/pull/"),
            "- Add login (https://github.com/acme/tool/pull/42)"
        );
    }
}
