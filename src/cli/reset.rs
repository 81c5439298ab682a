//! Reset command for Dojo.
//!
//! Deletes the whole answer log. Refuses to run without explicit
//! confirmation.

use serde::{Deserialize, Serialize};

use crate::error::FailOpen;
use crate::storage::AnswerLog;

/// Options for the reset command.
#[derive(Debug, Clone, Default)]
pub struct ResetOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Confirm deletion.
    pub yes: bool,
}

/// Output format for the reset command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetOutput {
    /// Whether the command was successful.
    pub success: bool,
    /// Number of answers removed.
    pub cleared: usize,
    /// Error message if command failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResetOutput {
    /// Create a successful output.
    pub fn success(cleared: usize) -> Self {
        Self {
            success: true,
            cleared,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            cleared: 0,
            error: Some(error.into()),
        }
    }
}

/// The reset command implementation.
pub struct ResetCommand<L: AnswerLog> {
    log: L,
}

impl<L: AnswerLog> ResetCommand<L> {
    pub fn new(log: L) -> Self {
        Self { log }
    }

    /// Run the reset command.
    pub fn run(&self, options: &ResetOptions) -> ResetOutput {
        if !options.yes {
            return ResetOutput::failure("refusing to delete all results without --yes");
        }

        let cleared = self.log.count().fail_open_default("Counting answers before reset");
        match self.log.clear() {
            Ok(()) => {
                tracing::debug!(cleared, "Answer log cleared");
                ResetOutput::success(cleared)
            }
            Err(e) => ResetOutput::failure(format!("Failed to clear results: {}", e)),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &ResetOutput, options: &ResetOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            return serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string());
        }

        if output.success {
            format!("Cleared {} answer(s).\n", output.cleared)
        } else {
            format!(
                "Reset failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileAnswerLog, MemoryAnswerLog};
    use tempfile::TempDir;

    #[test]
    fn test_reset_requires_confirmation() {
        let log = MemoryAnswerLog::new();
        log.append(1, false).unwrap();
        let cmd = ResetCommand::new(&log);

        let output = cmd.run(&ResetOptions::default());
        assert!(!output.success);
        assert!(output.error.unwrap().contains("--yes"));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_reset_clears_log() {
        let log = MemoryAnswerLog::new();
        log.append(1, false).unwrap();
        log.append(2, true).unwrap();
        let cmd = ResetCommand::new(&log);
        let options = ResetOptions {
            yes: true,
            ..Default::default()
        };

        let output = cmd.run(&options);
        assert!(output.success);
        assert_eq!(output.cleared, 2);
        assert!(log.is_empty());
        assert_eq!(cmd.format_output(&output, &options), "Cleared 2 answer(s).\n");
    }

    #[test]
    fn test_reset_file_log() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.json");
        let log = FileAnswerLog::with_path(&path);
        log.append(3, true).unwrap();
        assert!(path.exists());

        let cmd = ResetCommand::new(&log);
        let output = cmd.run(&ResetOptions {
            yes: true,
            ..Default::default()
        });
        assert!(output.success);
        assert!(!path.exists());
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_reset_missing_file_is_ok() {
        let dir = TempDir::new().unwrap();
        let cmd = ResetCommand::new(FileAnswerLog::with_path(dir.path().join("none.json")));
        let output = cmd.run(&ResetOptions {
            yes: true,
            ..Default::default()
        });
        assert!(output.success);
        assert_eq!(output.cleared, 0);
    }

    #[test]
    fn test_format_failure_and_json() {
        let cmd = ResetCommand::new(MemoryAnswerLog::new());
        let output = ResetOutput::failure("nope");

        assert_eq!(
            cmd.format_output(&output, &ResetOptions::default()),
            "Reset failed: nope\n"
        );
        let json = cmd.format_output(
            &output,
            &ResetOptions {
                json: true,
                ..Default::default()
            },
        );
        assert!(json.contains("\"success\": false"));
    }
}
