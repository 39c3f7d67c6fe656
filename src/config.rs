use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, TapprError};

/// Represents the complete configuration for tappr.
///
/// Every section has defaults, so an empty file (or no file at all) is valid.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub runner: RunnerConfig,
}

/// Returns the identity used by the dependency update bot.
fn default_dependency_bot() -> String {
    "dependabot[bot]".to_string()
}

fn default_true() -> bool {
    true
}

fn default_shell() -> String {
    "sh".to_string()
}

fn default_random_token() -> String {
    "python.random".to_string()
}

fn default_random_length() -> usize {
    10
}

/// Configuration for commit classification.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Author name whose commits always land in the dependency bucket
    #[serde(default = "default_dependency_bot")]
    pub dependency_bot: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            dependency_bot: default_dependency_bot(),
        }
    }
}

/// Configuration for the `changelog` command.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default = "default_true")]
    pub ignore_dependency_bot_commits: bool,

    #[serde(default = "default_true")]
    pub ignore_docs_commits: bool,

    /// Per-tag template; the built-in one is used when unset
    #[serde(default)]
    pub template: Option<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            ignore_dependency_bot_commits: true,
            ignore_docs_commits: true,
            template: None,
        }
    }
}

/// Configuration for the `release` command.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_true")]
    pub ignore_dependency_bot_commits: bool,

    #[serde(default = "default_true")]
    pub ignore_docs_commits: bool,

    #[serde(default)]
    pub template: Option<String>,

    /// Base path for pull request links, e.g. `https://github.com/org/repo/pull/`
    #[serde(default)]
    pub pr_path: Option<String>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            ignore_dependency_bot_commits: true,
            ignore_docs_commits: true,
            template: None,
            pr_path: None,
        }
    }
}

/// Configuration for the scenario runner.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RunnerConfig {
    /// Shell used as `<shell> -c <command>`
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Placeholder name that resolves to a fresh random value on every use
    #[serde(default = "default_random_token")]
    pub random_token: String,

    #[serde(default = "default_random_length")]
    pub random_length: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            shell: default_shell(),
            random_token: default_random_token(),
            random_length: default_random_length(),
        }
    }
}

impl Config {
    /// Checks values that serde cannot express as types.
    pub fn validate(&self) -> Result<()> {
        if self.classifier.dependency_bot.trim().is_empty() {
            return Err(TapprError::config("classifier.dependency_bot must not be empty"));
        }
        if self.runner.shell.trim().is_empty() {
            return Err(TapprError::config("runner.shell must not be empty"));
        }
        if self.runner.random_token.trim().is_empty() {
            return Err(TapprError::config("runner.random_token must not be empty"));
        }
        if self.runner.random_length == 0 {
            return Err(TapprError::config("runner.random_length must be greater than 0"));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `tappr.toml` in current directory
/// 3. `.tappr.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded (and validated) or default configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)
            .map_err(|e| TapprError::config(format!("Cannot read '{}': {}", path, e)))?
    } else if Path::new("./tappr.toml").exists() {
        fs::read_to_string("./tappr.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".tappr.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| TapprError::config(format!("Invalid configuration: {}", e)))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_behavior() {
        let config = Config::default();
        assert_eq!(config.classifier.dependency_bot, "dependabot[bot]");
        assert!(config.changelog.ignore_dependency_bot_commits);
        assert!(config.changelog.ignore_docs_commits);
        assert_eq!(config.runner.random_token, "python.random");
        assert_eq!(config.runner.random_length, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str("[runner]\nshell = \"bash\"\n").unwrap();
        assert_eq!(config.runner.shell, "bash");
        assert_eq!(config.runner.random_length, 10);
        assert!(config.release.pr_path.is_none());
    }

    #[test]
    fn test_zero_random_length_is_rejected() {
        let mut config = Config::default();
        config.runner.random_length = 0;
        assert!(matches!(config.validate(), Err(TapprError::Config(_))));
    }
}
