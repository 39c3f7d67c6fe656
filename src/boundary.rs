use std::fmt;

use crate::git::INITIAL_RELEASE;

/// Non-fatal issues found while preparing a document.
/// These are reported to the user but never stop rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// A release version that is not a semantic version
    UnparsableVersion { version: String, reason: String },
    /// A template that never mentions a placeholder the renderer fills
    MissingPlaceholder { template: String, placeholder: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnparsableVersion { version, reason } => {
                write!(f, "Cannot parse version '{}': {}", version, reason)
            }
            BoundaryWarning::MissingPlaceholder {
                template,
                placeholder,
            } => {
                write!(
                    f,
                    "Template '{}' has no '$${}' placeholder; that section is dropped",
                    template, placeholder
                )
            }
        }
    }
}

/// Check that `version` is a semantic version, allowing a leading `v`.
///
/// The `init` keyword is accepted as-is.
pub fn check_version(version: &str) -> Option<BoundaryWarning> {
    if version == INITIAL_RELEASE {
        return None;
    }
    let bare = version.strip_prefix('v').unwrap_or(version);
    match semver::Version::parse(bare) {
        Ok(_) => None,
        Err(e) => Some(BoundaryWarning::UnparsableVersion {
            version: version.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// One warning per placeholder in `names` absent from `template`
pub fn check_template(label: &str, template: &str, names: &[&str]) -> Vec<BoundaryWarning> {
    crate::template::missing_placeholders(template, names)
        .into_iter()
        .map(|placeholder| BoundaryWarning::MissingPlaceholder {
            template: label.to_string(),
            placeholder: placeholder.to_string(),
        })
        .collect()
}
