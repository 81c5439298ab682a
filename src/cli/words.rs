//! Words command for Dojo.
//!
//! Lists the word table, optionally filtered by a search query.

use serde::{Deserialize, Serialize};

use crate::core::{Dataset, Word};

/// Options for the words command.
#[derive(Debug, Clone, Default)]
pub struct WordsOptions {
    /// Output as JSON.
    pub json: bool,
}

/// Output format for the words command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordsOutput {
    pub query: String,
    /// Matching words, in table order.
    pub words: Vec<Word>,
    /// Size of the whole table.
    pub total: usize,
}

/// The words command implementation.
pub struct WordsCommand<'a> {
    dataset: &'a Dataset,
}

impl<'a> WordsCommand<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    pub fn run(&self, query: &str) -> WordsOutput {
        WordsOutput {
            query: query.to_string(),
            words: self
                .dataset
                .search_words(query)
                .into_iter()
                .cloned()
                .collect(),
            total: self.dataset.len(),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &WordsOutput, options: &WordsOptions) -> String {
        if options.json {
            return serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string());
        }

        if output.words.is_empty() {
            return format!("No words match '{}'.\n", output.query);
        }

        let mut lines = Vec::new();
        for word in &output.words {
            lines.push(format!("{}  {}", word.english, word.japanese));
            lines.push(format!("    {}", word.example));
            if let Some(example_ja) = &word.example_ja {
                lines.push(format!("    {}", example_ja));
            }
        }
        lines.push(String::new());
        lines.push(format!("{} of {} words", output.words.len(), output.total));
        lines.join("\n") + "\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::fixtures;

    #[test]
    fn test_words_empty_query_lists_all() {
        let dataset = fixtures::dataset(6);
        let cmd = WordsCommand::new(&dataset);
        let output = cmd.run("");
        assert_eq!(output.words.len(), 6);
        assert_eq!(output.total, 6);

        let text = cmd.format_output(&output, &WordsOptions::default());
        assert!(text.starts_with("word1  意味1\n"));
        assert!(text.ends_with("6 of 6 words\n"));
    }

    #[test]
    fn test_words_search() {
        let dataset = fixtures::dataset(12);
        let cmd = WordsCommand::new(&dataset);

        let output = cmd.run("WORD1");
        let ids: Vec<u32> = output.words.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![1, 10, 11, 12]);

        let output = cmd.run("意味3");
        assert_eq!(output.words.len(), 1);
    }

    #[test]
    fn test_words_no_match_and_json() {
        let dataset = fixtures::dataset(4);
        let cmd = WordsCommand::new(&dataset);
        let output = cmd.run("zebra");
        assert_eq!(
            cmd.format_output(&output, &WordsOptions::default()),
            "No words match 'zebra'.\n"
        );

        let json = cmd.format_output(&cmd.run("word2"), &WordsOptions { json: true });
        let parsed: WordsOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.words[0].english, "word2");
    }
}
