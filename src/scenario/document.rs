use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, TapprError};

/// Keyword that starts a context assignment inside a `run` list
pub const SET_DIRECTIVE: &str = "SET context";

/// A scenario document: the tests to run and the context they share
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioDocument {
    pub tests: Vec<TestScenario>,
    pub context: BTreeMap<String, String>,
}

/// One named test as declared in the document
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestScenario {
    pub name: String,

    #[serde(default)]
    pub run: Vec<String>,

    /// Exit codes accepted for every command; only `0` when absent
    #[serde(default)]
    pub acceptable_exit_code: Option<Vec<i32>>,

    #[serde(default = "default_fail_on_stderr")]
    pub fail_on_stderr: bool,

    #[serde(default)]
    pub assert_in_output: Vec<String>,
}

fn default_fail_on_stderr() -> bool {
    true
}

impl TestScenario {
    /// Exit codes this scenario accepts
    pub fn accepted_exit_codes(&self) -> Vec<i32> {
        match &self.acceptable_exit_code {
            Some(codes) if !codes.is_empty() => codes.clone(),
            _ => vec![0],
        }
    }

    /// Parse the `run` list into operations
    pub fn operations(&self) -> Result<Vec<Operation>> {
        self.run.iter().map(|line| Operation::parse(line)).collect()
    }
}

/// One line of a scenario's `run` list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// `SET context {$$name} <value>`
    Set { name: String, value: String },
    /// Command template resolved and executed through the shell
    Command(String),
}

impl Operation {
    pub fn parse(line: &str) -> Result<Self> {
        let Some(rest) = line.strip_prefix(SET_DIRECTIVE) else {
            return Ok(Operation::Command(line.to_string()));
        };

        let rest = rest.trim_start();
        let (token, value) = rest.split_once(' ').unwrap_or((rest, ""));
        let name = token
            .strip_prefix("{$$")
            .and_then(|t| t.strip_suffix('}'))
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                TapprError::malformed(format!(
                    "'{}' should look like 'SET context {{$$name}} <value>'",
                    line
                ))
            })?;

        Ok(Operation::Set {
            name: name.to_string(),
            value: value.trim().to_string(),
        })
    }
}

impl ScenarioDocument {
    /// Parse a JSON document
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| TapprError::malformed(shape_hint(e)))
    }

    /// Parse a YAML document
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| TapprError::malformed(shape_hint(e)))
    }

    /// Load a document, choosing YAML for `.yaml`/`.yml` files and JSON otherwise.
    ///
    /// Every `run` line is parsed here, so a bad `SET` line fails before anything executes.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            TapprError::malformed(format!("Cannot read test file {}: {}", path.display(), e))
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let document = if is_yaml {
            Self::from_yaml(&text)?
        } else {
            Self::from_json(&text)?
        };

        for test in &document.tests {
            test.operations()?;
        }
        Ok(document)
    }
}

fn shape_hint(err: impl std::fmt::Display) -> String {
    format!(
        "Invalid test file structure ({}). Expected {{\"tests\": [], \"context\": {{}}}}",
        err
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_with_defaults() {
        let doc = ScenarioDocument::from_json(
            r#"{"tests": [{"name": "t", "run": ["echo hi"]}], "context": {"name": "world"}}"#,
        )
        .unwrap();
        let test = &doc.tests[0];
        assert!(test.fail_on_stderr);
        assert_eq!(test.accepted_exit_codes(), vec![0]);
        assert!(test.assert_in_output.is_empty());
        assert_eq!(doc.context.get("name").map(String::as_str), Some("world"));
    }

    #[test]
    fn test_missing_member_is_malformed() {
        let err = ScenarioDocument::from_json(r#"{"tests": []}"#).unwrap_err();
        assert!(matches!(err, TapprError::Malformed(_)));
        assert!(err.to_string().contains("\"context\""));
    }

    #[test]
    fn test_extra_member_is_malformed() {
        let err =
            ScenarioDocument::from_json(r#"{"tests": [], "context": {}, "extra": 1}"#).unwrap_err();
        assert!(matches!(err, TapprError::Malformed(_)));
    }

    #[test]
    fn test_from_yaml() {
        let doc = ScenarioDocument::from_yaml(
            "tests:\n  - name: t\n    run: [\"true\"]\n    acceptable_exit_code: [0, 1]\n    fail_on_stderr: false\ncontext: {}\n",
        )
        .unwrap();
        assert_eq!(doc.tests[0].accepted_exit_codes(), vec![0, 1]);
        assert!(!doc.tests[0].fail_on_stderr);
    }

    #[test]
    fn test_parse_set_directive() {
        assert_eq!(
            Operation::parse("SET context {$$ns} tap-{$$python.random}").unwrap(),
            Operation::Set {
                name: "ns".to_string(),
                value: "tap-{$$python.random}".to_string()
            }
        );
        assert_eq!(
            Operation::parse("kubectl get pods").unwrap(),
            Operation::Command("kubectl get pods".to_string())
        );
    }

    #[test]
    fn test_parse_bad_set_directive() {
        assert!(Operation::parse("SET context ns value").is_err());
        assert!(Operation::parse("SET context {$$} value").is_err());
    }

    #[test]
    fn test_empty_exit_code_list_means_zero() {
        let scenario = TestScenario {
            name: "t".to_string(),
            run: vec![],
            acceptable_exit_code: Some(vec![]),
            fail_on_stderr: true,
            assert_in_output: vec![],
        };
        assert_eq!(scenario.accepted_exit_codes(), vec![0]);
    }
}
