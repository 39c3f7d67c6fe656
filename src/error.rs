use thiserror::Error;

/// Unified error type for tappr operations
#[derive(Error, Debug)]
pub enum TapprError {
    #[error("Malformed input: {0}")]
    Malformed(String),

    #[error("Environment variable '{0}' not found")]
    MissingEnvVar(String),

    #[error("Command '{command}' returned exit code {code} which is not in the allowed list {allowed:?}")]
    UnexpectedExitCode {
        command: String,
        code: i32,
        allowed: Vec<i32>,
    },

    #[error("Command '{command}' wrote to stderr: {stderr}")]
    UnwantedStderr { command: String, stderr: String },

    #[error("Test '{scenario}' failed: '{expected}' not found in the stdout")]
    MissingOutput { scenario: String, expected: String },

    #[error("Failed to execute '{command}': {reason}")]
    CommandSpawn { command: String, reason: String },

    #[error("No git log found for range '{0}'")]
    EmptyLog(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in tappr
pub type Result<T> = std::result::Result<T, TapprError>;

impl TapprError {
    /// Create a malformed-input error with context
    pub fn malformed(msg: impl Into<String>) -> Self {
        TapprError::Malformed(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TapprError::Config(msg.into())
    }

    /// Create a missing environment variable error
    pub fn missing_env(name: impl Into<String>) -> Self {
        TapprError::MissingEnvVar(name.into())
    }

    /// Create an empty log error for the given range
    pub fn empty_log(range: impl Into<String>) -> Self {
        TapprError::EmptyLog(range.into())
    }
}
