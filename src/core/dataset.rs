//! The read-only word and grammar tables.
//!
//! The built-in tables are embedded at compile time from `data/`. External
//! JSON files with the same shape can replace either table.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::config::DataConfig;
use crate::core::{GrammarEntry, Word};
use crate::error::{DojoError, Result};

/// Smallest word table that can produce a question: one answer plus three
/// distractors.
pub const MIN_DATASET_WORDS: usize = 4;

const BUILTIN_WORDS: &str = include_str!("../../data/words.json");
const BUILTIN_GRAMMAR: &str = include_str!("../../data/grammar.json");

/// Validated word and grammar tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    words: Vec<Word>,
    grammar: Vec<GrammarEntry>,
}

impl Dataset {
    /// Build a dataset, checking that the word table can drive a quiz.
    pub fn new(words: Vec<Word>, grammar: Vec<GrammarEntry>) -> Result<Self> {
        if words.len() < MIN_DATASET_WORDS {
            return Err(DojoError::dataset(format!(
                "need at least {} words, found {}",
                MIN_DATASET_WORDS,
                words.len()
            )));
        }

        let mut seen = HashSet::with_capacity(words.len());
        for word in &words {
            if !seen.insert(word.id) {
                return Err(DojoError::dataset(format!(
                    "duplicate word id {} ({})",
                    word.id, word.english
                )));
            }
        }

        Ok(Self { words, grammar })
    }

    /// The tables shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_WORDS, BUILTIN_GRAMMAR)
    }

    /// Parse both tables from JSON arrays.
    pub fn from_json(words_json: &str, grammar_json: &str) -> Result<Self> {
        let words = parse_table(words_json, "words")?;
        let grammar = parse_table(grammar_json, "grammar")?;
        Self::new(words, grammar)
    }

    /// Load tables from files, falling back to the built-in table for any
    /// path that is not given.
    pub fn load(words_path: Option<&Path>, grammar_path: Option<&Path>) -> Result<Self> {
        let words_json = match words_path {
            Some(path) => read_table(path)?,
            None => BUILTIN_WORDS.to_string(),
        };
        let grammar_json = match grammar_path {
            Some(path) => read_table(path)?,
            None => BUILTIN_GRAMMAR.to_string(),
        };
        Self::from_json(&words_json, &grammar_json)
    }

    /// Load the tables named by the `[data]` config section.
    pub fn from_config(config: &DataConfig) -> Result<Self> {
        Self::load(config.words_path.as_deref(), config.grammar_path.as_deref())
    }

    /// All words, in table order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// All grammar entries, in table order.
    pub fn grammar(&self) -> &[GrammarEntry] {
        &self.grammar
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false: a dataset holds at least [`MIN_DATASET_WORDS`] words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words whose English contains `query` (ignoring case) or whose
    /// Japanese contains it. An empty query matches everything.
    pub fn search_words(&self, query: &str) -> Vec<&Word> {
        let needle = query.to_lowercase();
        self.words
            .iter()
            .filter(|w| w.english.to_lowercase().contains(&needle) || w.japanese.contains(query))
            .collect()
    }

    /// Distinct grammar categories in order of first appearance.
    pub fn grammar_categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for entry in &self.grammar {
            if !categories.contains(&entry.category.as_str()) {
                categories.push(&entry.category);
            }
        }
        categories
    }

    /// Grammar entries in `category` (all when `None`) that match `query`.
    ///
    /// The query matches the title ignoring case, or the explanation or
    /// category verbatim.
    pub fn filter_grammar(&self, category: Option<&str>, query: &str) -> Vec<&GrammarEntry> {
        let needle = query.to_lowercase();
        self.grammar
            .iter()
            .filter(|g| category.map_or(true, |c| g.category == c))
            .filter(|g| {
                query.is_empty()
                    || g.title.to_lowercase().contains(&needle)
                    || g.explanation.contains(query)
                    || g.category.contains(query)
            })
            .collect()
    }
}

fn parse_table<T: serde::de::DeserializeOwned>(json: &str, table: &str) -> Result<Vec<T>> {
    serde_json::from_str(json)
        .map_err(|e| DojoError::dataset(format!("invalid {} table: {}", table, e)))
}

fn read_table(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| DojoError::storage(path, e))
}
