// tests/config_test.rs
use std::io::Write;

use tappr::config::{load_config, Config};
use tappr::TapprError;
use tempfile::NamedTempFile;

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.classifier.dependency_bot, "dependabot[bot]");
    assert!(config.release.ignore_dependency_bot_commits);
    assert!(config.release.ignore_docs_commits);
    assert_eq!(config.runner.shell, "sh");
    assert!(config.changelog.template.is_none());
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[classifier]
dependency_bot = "renovate[bot]"

[release]
ignore_docs_commits = false
pr_path = "https://github.com/acme/tool/pull/"

[runner]
shell = "bash"
random_length = 6
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.classifier.dependency_bot, "renovate[bot]");
    assert!(!config.release.ignore_docs_commits);
    assert!(config.release.ignore_dependency_bot_commits);
    assert_eq!(
        config.release.pr_path.as_deref(),
        Some("https://github.com/acme/tool/pull/")
    );
    assert_eq!(config.runner.shell, "bash");
    assert_eq!(config.runner.random_length, 6);
    assert_eq!(config.runner.random_token, "python.random");
}

#[test]
fn test_empty_file_uses_defaults() {
    let temp_file = NamedTempFile::new().unwrap();
    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_missing_explicit_path_is_an_error() {
    let result = load_config(Some("/nonexistent/tappr.toml"));
    assert!(matches!(result, Err(TapprError::Config(_))));
}

#[test]
fn test_invalid_toml_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[runner\nshell = ").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().contains("Invalid configuration"));
}

#[test]
fn test_validation_runs_on_load() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[classifier]\ndependency_bot = \"  \"\n")
        .unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().contains("dependency_bot"));
}
