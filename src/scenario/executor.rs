use std::collections::VecDeque;
use std::process::Command;

use tracing::debug;

use crate::error::{Result, TapprError};

/// What one command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `-1` when the process was killed by a signal
    pub code: i32,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, code: i32) -> Self {
        CommandOutput {
            stdout: stdout.into(),
            stderr: stderr.into(),
            code,
        }
    }
}

/// Runs a fully resolved command string
pub trait CommandExecutor {
    fn execute(&mut self, command: &str) -> Result<CommandOutput>;
}

/// Executes commands as `<shell> -c <command>`
pub struct ShellExecutor {
    shell: String,
}

impl ShellExecutor {
    pub fn new(shell: impl Into<String>) -> Self {
        ShellExecutor {
            shell: shell.into(),
        }
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new("sh")
    }
}

impl CommandExecutor for ShellExecutor {
    /// Waits for the command to finish. There is no timeout.
    fn execute(&mut self, command: &str) -> Result<CommandOutput> {
        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .output()
            .map_err(|e| TapprError::CommandSpawn {
                command: command.to_string(),
                reason: e.to_string(),
            })?;

        let code = output.status.code().unwrap_or(-1);
        debug!(shell = %self.shell, code, "command finished");

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code,
        })
    }
}

/// Replays canned outputs and records the commands it was asked to run
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    outputs: VecDeque<CommandOutput>,
    executed: Vec<String>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outputs(outputs: impl IntoIterator<Item = CommandOutput>) -> Self {
        ScriptedExecutor {
            outputs: outputs.into_iter().collect(),
            executed: Vec::new(),
        }
    }

    pub fn executed(&self) -> &[String] {
        &self.executed
    }
}

impl CommandExecutor for ScriptedExecutor {
    /// Returns the next queued output, or empty success once the queue is drained
    fn execute(&mut self, command: &str) -> Result<CommandOutput> {
        self.executed.push(command.to_string());
        Ok(self
            .outputs
            .pop_front()
            .unwrap_or_else(|| CommandOutput::new("", "", 0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_captures_stdout_and_code() {
        let mut executor = ShellExecutor::default();
        let output = executor.execute("echo hello world").unwrap();
        assert_eq!(output.stdout, "hello world\n");
        assert!(output.stderr.is_empty());
        assert_eq!(output.code, 0);
    }

    #[test]
    fn test_shell_captures_stderr_and_failure() {
        let mut executor = ShellExecutor::default();
        let output = executor.execute("echo oops 1>&2; exit 3").unwrap();
        assert_eq!(output.stderr, "oops\n");
        assert_eq!(output.code, 3);
    }

    #[test]
    fn test_missing_shell_is_spawn_error() {
        let mut executor = ShellExecutor::new("/nonexistent/shell");
        let err = executor.execute("true").unwrap_err();
        assert!(matches!(err, TapprError::CommandSpawn { .. }));
        assert!(err.to_string().contains("'true'"));
    }

    #[test]
    fn test_scripted_executor_replays_in_order() {
        let mut executor = ScriptedExecutor::with_outputs([
            CommandOutput::new("first\n", "", 0),
            CommandOutput::new("", "boom", 2),
        ]);
        assert_eq!(executor.execute("a").unwrap().stdout, "first\n");
        assert_eq!(executor.execute("b").unwrap().code, 2);
        assert_eq!(executor.execute("c").unwrap(), CommandOutput::new("", "", 0));
        assert_eq!(executor.executed(), ["a", "b", "c"]);
    }
}
