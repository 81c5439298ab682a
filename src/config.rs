//! Configuration loading for Dojo.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. User config (`~/.dojo/config.toml`)
//! 3. Defaults (lowest priority)
//!
//! All configuration is optional. The system runs with the built-in word
//! tables and `~/.dojo/results.json` when no config exists.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DojoError, Result};

/// Main configuration struct for Dojo.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Quiz length settings.
    pub quiz: QuizConfig,
    /// External word and grammar tables.
    pub data: DataConfig,
    /// Results log location.
    pub storage: StorageConfig,
}

/// Quiz length settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuizConfig {
    /// Question count used when none is given.
    pub default_count: u32,
    /// Preset question counts offered at the start screen.
    pub presets: Vec<u32>,
}

impl QuizConfig {
    /// Check if a question count is usable (must be >= 1).
    pub fn is_valid_count(value: u32) -> bool {
        value >= 1
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            default_count: 30,
            presets: vec![30, 100],
        }
    }
}

/// External dataset files. Unset paths use the built-in tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    /// JSON array of words.
    pub words_path: Option<PathBuf>,
    /// JSON array of grammar entries.
    pub grammar_path: Option<PathBuf>,
}

/// Results log location.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Override for `<dojo_home>/results.json`.
    pub log_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration with full precedence chain.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables
    /// 2. User config (`~/.dojo/config.toml`)
    /// 3. Defaults
    pub fn load() -> Self {
        let mut config = Self::load_user_config().unwrap_or_default();
        config.apply_env_overrides();
        config
    }

    /// Load user config from `~/.dojo/config.toml`.
    ///
    /// A missing file is silent; an unreadable or invalid one is logged.
    fn load_user_config() -> Option<Config> {
        let path = user_config_path()?;
        if !path.exists() {
            return None;
        }
        match Self::load_from_file(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Ignoring user config {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Load config from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| DojoError::storage(path, e))?;
        toml::from_str(&content).map_err(|e| DojoError::config(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // DOJO_QUIZ_COUNT
        if let Ok(val) = env::var("DOJO_QUIZ_COUNT") {
            match val.parse::<u32>() {
                Ok(n) if QuizConfig::is_valid_count(n) => self.quiz.default_count = n,
                _ => tracing::warn!(
                    "Invalid DOJO_QUIZ_COUNT value '{}'. Expected a positive integer. Using '{}'.",
                    val,
                    self.quiz.default_count
                ),
            }
        }

        // DOJO_WORDS / DOJO_GRAMMAR
        if let Some(path) = non_empty_env("DOJO_WORDS") {
            self.data.words_path = Some(PathBuf::from(path));
        }
        if let Some(path) = non_empty_env("DOJO_GRAMMAR") {
            self.data.grammar_path = Some(PathBuf::from(path));
        }

        // DOJO_LOG_PATH
        if let Some(path) = non_empty_env("DOJO_LOG_PATH") {
            self.storage.log_path = Some(PathBuf::from(path));
        }
    }

    /// Where the results log lives for this configuration.
    pub fn results_log_path(&self) -> Option<PathBuf> {
        self.storage.log_path.clone().or_else(results_log_path)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get the Dojo home directory.
///
/// Returns `$DOJO_HOME` if set and non-empty, otherwise `~/.dojo`.
pub fn dojo_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("DOJO_HOME") {
        if home.is_empty() {
            tracing::warn!("DOJO_HOME is empty, using default");
        } else {
            return Some(PathBuf::from(home));
        }
    }

    dirs::home_dir().map(|home| home.join(".dojo"))
}

/// Get the user config path.
///
/// Returns `<dojo_home>/config.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    dojo_home().map(|h| h.join("config.toml"))
}

/// Get the default results log path.
///
/// Returns `<dojo_home>/results.json`.
pub fn results_log_path() -> Option<PathBuf> {
    dojo_home().map(|h| h.join("results.json"))
}
