//! File-based answer log for Dojo.
//!
//! The whole log is one JSON array stored at `~/.dojo/results.json`.
//! Atomic writes are achieved via temp file + rename pattern.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::core::WordId;
use crate::error::{DojoError, FailOpen, Result};
use crate::stats::AnswerEvent;
use crate::storage::AnswerLog;

/// File-based answer log.
///
/// A missing or corrupt file reads as an empty log. Appending to a corrupt
/// log starts a fresh one.
#[derive(Debug, Clone)]
pub struct FileAnswerLog {
    /// Path of the JSON results file.
    path: PathBuf,
}

impl FileAnswerLog {
    /// Create a log at the location named by `config`.
    ///
    /// Defaults to `~/.dojo/results.json` or `$DOJO_HOME/results.json`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let path = config.results_log_path().ok_or_else(|| {
            DojoError::config("Could not determine results log path (no home directory)")
        })?;
        Ok(Self::with_path(path))
    }

    /// Create a log stored at a custom path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the path for the temp file used during atomic writes.
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "results.json".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    /// Read and parse the file, surfacing every failure.
    fn load(&self) -> Result<Vec<AnswerEvent>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| DojoError::storage(&self.path, e))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            DojoError::serde(format!(
                "Failed to parse results log {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Write the full log atomically using temp file + rename.
    fn atomic_write(&self, events: &[AnswerEvent]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| DojoError::storage(parent, e))?;
            }
        }

        let json = serde_json::to_string(events)?;
        let temp_path = self.temp_path();

        {
            let mut file =
                fs::File::create(&temp_path).map_err(|e| DojoError::storage(&temp_path, e))?;
            file.write_all(json.as_bytes())
                .map_err(|e| DojoError::storage(&temp_path, e))?;
            file.sync_all()
                .map_err(|e| DojoError::storage(&temp_path, e))?;
        }

        // Rename temp file to final path (atomic on POSIX)
        fs::rename(&temp_path, &self.path).map_err(|e| DojoError::storage(&self.path, e))?;

        Ok(())
    }
}

impl AnswerLog for FileAnswerLog {
    fn append(&self, word_id: WordId, is_correct: bool) -> Result<AnswerEvent> {
        let mut events = self.load().fail_open_default("Reading results log before append");
        let event = AnswerEvent::next_after(&events, word_id, is_correct);
        events.push(event);
        self.atomic_write(&events)?;
        Ok(event)
    }

    fn read_all(&self) -> Result<Vec<AnswerEvent>> {
        Ok(self.load().fail_open_default("Reading results log"))
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| DojoError::storage(&self.path, e))?;
        }

        // Also clean up any temp file
        let temp_path = self.temp_path();
        if temp_path.exists() {
            let _ = fs::remove_file(&temp_path);
        }

        Ok(())
    }
}
