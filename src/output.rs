use std::fs;
use std::io::{self, Write};

use crate::error::{Result, TapprError};

/// Destination keyword that prints to standard output
pub const STDOUT: &str = "stdout";

/// Where a rendered document goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(String),
}

impl OutputTarget {
    /// `stdout` selects standard output, any other value is a file path
    pub fn parse(destination: &str) -> Self {
        if destination == STDOUT {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(destination.to_string())
        }
    }

    /// Write `content` verbatim
    pub fn write(&self, content: &str) -> Result<()> {
        match self {
            OutputTarget::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                stdout.flush()?;
            }
            OutputTarget::File(path) => {
                fs::write(path, content).map_err(|e| {
                    TapprError::Io(io::Error::new(
                        e.kind(),
                        format!("cannot write {}: {}", path, e),
                    ))
                })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_destination() {
        assert_eq!(OutputTarget::parse("stdout"), OutputTarget::Stdout);
        assert_eq!(
            OutputTarget::parse("CHANGELOG.md"),
            OutputTarget::File("CHANGELOG.md".to_string())
        );
    }

    #[test]
    fn test_write_file_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.md");
        let target = OutputTarget::parse(path.to_str().unwrap());
        target.write("## v1\n- x\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "## v1\n- x\n");
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let target = OutputTarget::parse("/nonexistent/dir/out.md");
        assert!(matches!(target.write("x"), Err(TapprError::Io(_))));
    }
}
