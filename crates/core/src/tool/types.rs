//! Types shared by tool implementations.

use std::fmt;
use std::process::ExitStatus;

/// Result of an external command that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Exit code, `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Whether the command reported success.
    pub success: bool,
    /// Captured stdout followed by stderr. Empty when output went elsewhere.
    pub output: String,
}

impl CommandOutcome {
    /// Outcome for a command that exited with code 0.
    pub fn succeeded(output: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            success: true,
            output: output.into(),
        }
    }

    /// Outcome for a command that exited with the given non-zero code.
    pub fn failed(exit_code: i32, output: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            success: false,
            output: output.into(),
        }
    }

    pub(crate) fn from_status(status: ExitStatus, output: String) -> Self {
        Self {
            exit_code: status.code(),
            success: status.success(),
            output,
        }
    }

    /// Exit status rendered as text for log lines.
    pub fn status_text(&self) -> ExitText {
        ExitText(self.exit_code)
    }
}

/// Display adapter for an optional exit code.
#[derive(Debug, Clone, Copy)]
pub struct ExitText(Option<i32>);

impl fmt::Display for ExitText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(code) => write!(f, "exit code {}", code),
            None => f.write_str("terminated by signal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_with_code() {
        let outcome = CommandOutcome::failed(1, "");
        assert_eq!(outcome.status_text().to_string(), "exit code 1");
    }

    #[test]
    fn test_status_text_without_code() {
        let outcome = CommandOutcome {
            exit_code: None,
            success: false,
            output: String::new(),
        };
        assert_eq!(outcome.status_text().to_string(), "terminated by signal");
    }

    #[test]
    fn test_succeeded() {
        let outcome = CommandOutcome::succeeded("done");
        assert!(outcome.success);
        assert_eq!(outcome.exit_code, Some(0));
        assert_eq!(outcome.output, "done");
    }
}
