//! Static content types: vocabulary words and grammar entries.

use serde::{Deserialize, Serialize};

/// Identifier of a [`Word`], unique within a dataset.
pub type WordId = u32;

/// A vocabulary entry: an English word with its Japanese meaning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: WordId,
    pub english: String,
    pub japanese: String,
    /// English example sentence.
    pub example: String,
    /// Japanese translation of the example, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_ja: Option<String>,
}

impl Word {
    /// Create a word without a translated example.
    pub fn new(
        id: WordId,
        english: impl Into<String>,
        japanese: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        Self {
            id,
            english: english.into(),
            japanese: japanese.into(),
            example: example.into(),
            example_ja: None,
        }
    }

    /// Attach a Japanese translation of the example sentence.
    pub fn with_example_ja(mut self, example_ja: impl Into<String>) -> Self {
        self.example_ja = Some(example_ja.into());
        self
    }
}

/// One example sentence of a grammar entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GrammarExample {
    pub en: String,
    pub ja: String,
}

/// A grammar point for the browsing view. Unrelated to quiz logic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GrammarEntry {
    pub id: u32,
    pub category: String,
    pub title: String,
    pub explanation: String,
    /// Sentence pattern, e.g. `S + have/has + 過去分詞`.
    pub structure: String,
    #[serde(default)]
    pub examples: Vec<GrammarExample>,
}
