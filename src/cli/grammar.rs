//! Grammar command for Dojo.
//!
//! Browses the grammar reference by category and search query.

use serde::{Deserialize, Serialize};

use crate::core::{Dataset, GrammarEntry};

/// Options for the grammar command.
#[derive(Debug, Clone, Default)]
pub struct GrammarOptions {
    /// Output as JSON.
    pub json: bool,
    /// Restrict to one category.
    pub category: Option<String>,
}

/// Output format for the grammar command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarOutput {
    /// Whether the command was successful.
    pub success: bool,
    /// Every category in the table.
    pub categories: Vec<String>,
    pub entries: Vec<GrammarEntry>,
    /// Error message if command failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The grammar command implementation.
pub struct GrammarCommand<'a> {
    dataset: &'a Dataset,
}

impl<'a> GrammarCommand<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// Run the grammar command. An unknown category is an error.
    pub fn run(&self, query: &str, options: &GrammarOptions) -> GrammarOutput {
        let categories: Vec<String> = self
            .dataset
            .grammar_categories()
            .into_iter()
            .map(str::to_string)
            .collect();

        if let Some(category) = &options.category {
            if !categories.contains(category) {
                return GrammarOutput {
                    success: false,
                    error: Some(format!(
                        "unknown category '{}' (available: {})",
                        category,
                        categories.join(", ")
                    )),
                    categories,
                    entries: Vec::new(),
                };
            }
        }

        let entries = self
            .dataset
            .filter_grammar(options.category.as_deref(), query)
            .into_iter()
            .cloned()
            .collect();
        GrammarOutput {
            success: true,
            categories,
            entries,
            error: None,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &GrammarOutput, options: &GrammarOptions) -> String {
        if options.json {
            return serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string());
        }

        if !output.success {
            return format!(
                "Grammar failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        if output.entries.is_empty() {
            return "No grammar entries match.\n".to_string();
        }

        let mut lines = Vec::new();
        for entry in &output.entries {
            lines.push(format!("[{}] {}", entry.category, entry.title));
            lines.push(format!("  {}", entry.explanation));
            if !entry.structure.is_empty() {
                lines.push(format!("  Structure: {}", entry.structure));
            }
            for example in &entry.examples {
                lines.push(format!("    {}", example.en));
                lines.push(format!("    {}", example.ja));
            }
            lines.push(String::new());
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(category: Option<&str>) -> GrammarOptions {
        GrammarOptions {
            json: false,
            category: category.map(str::to_string),
        }
    }

    #[test]
    fn test_grammar_lists_everything() {
        let dataset = Dataset::builtin().unwrap();
        let cmd = GrammarCommand::new(&dataset);
        let output = cmd.run("", &options(None));

        assert!(output.success);
        assert_eq!(output.entries.len(), dataset.grammar().len());
        assert_eq!(output.categories[0], "時制");
    }

    #[test]
    fn test_grammar_category_and_query() {
        let dataset = Dataset::builtin().unwrap();
        let cmd = GrammarCommand::new(&dataset);

        let output = cmd.run("", &options(Some("時制")));
        assert_eq!(output.entries.len(), 2);

        let output = cmd.run("perfect", &options(Some("時制")));
        assert_eq!(output.entries.len(), 1);
        assert_eq!(output.entries[0].title, "Present Perfect");

        let text = cmd.format_output(&output, &options(None));
        assert!(text.starts_with("[時制] Present Perfect\n"));
    }

    #[test]
    fn test_grammar_unknown_category() {
        let dataset = Dataset::builtin().unwrap();
        let cmd = GrammarCommand::new(&dataset);
        let output = cmd.run("", &options(Some("cooking")));

        assert!(!output.success);
        assert!(output.entries.is_empty());
        let text = cmd.format_output(&output, &options(None));
        assert!(text.starts_with("Grammar failed: unknown category 'cooking'"));
    }

    #[test]
    fn test_grammar_no_match() {
        let dataset = Dataset::builtin().unwrap();
        let cmd = GrammarCommand::new(&dataset);
        let output = cmd.run("zzz-no-such-thing", &options(None));
        assert!(output.success);
        assert_eq!(
            cmd.format_output(&output, &options(None)),
            "No grammar entries match.\n"
        );
    }
}
