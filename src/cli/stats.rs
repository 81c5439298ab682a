//! Stats command for Dojo.
//!
//! Displays aggregate results, the per-word breakdown (most-missed first),
//! and every word missed at least once with its example sentences.

use serde::{Deserialize, Serialize};

use crate::core::{Dataset, WordId};
use crate::stats::{compute_stats, Mastery, StudyStats};
use crate::storage::AnswerLog;

/// Options for the stats command.
#[derive(Debug, Clone, Default)]
pub struct StatsOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// One answered word in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordReport {
    pub id: WordId,
    pub english: String,
    pub japanese: String,
    pub correct: u32,
    pub incorrect: u32,
    pub streak: u32,
    pub mastery: Mastery,
    pub example: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_ja: Option<String>,
}

/// Output format for the stats command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    pub total: u32,
    pub correct: u32,
    pub incorrect: u32,
    /// Rounded success percentage.
    pub rate: u32,
    /// Words currently in the mistake queue.
    pub mistakes: usize,
    /// Answered words, most-missed first.
    pub words: Vec<WordReport>,
}

impl StatsOutput {
    /// Build the report from derived statistics.
    pub fn from_stats(stats: &StudyStats, dataset: &Dataset) -> Self {
        let words = stats
            .answered_words(dataset)
            .into_iter()
            .map(|answered| WordReport {
                id: answered.word.id,
                english: answered.word.english.clone(),
                japanese: answered.word.japanese.clone(),
                correct: answered.stat.correct,
                incorrect: answered.stat.incorrect,
                streak: answered.stat.streak,
                mastery: answered.stat.mastery(),
                example: answered.word.example.clone(),
                example_ja: answered.word.example_ja.clone(),
            })
            .collect();
        Self {
            total: stats.total,
            correct: stats.correct,
            incorrect: stats.incorrect,
            rate: stats.rate,
            mistakes: stats.mistake_word_ids().len(),
            words,
        }
    }
}

/// The stats command implementation.
pub struct StatsCommand<'a, L: AnswerLog> {
    log: L,
    dataset: &'a Dataset,
}

impl<'a, L: AnswerLog> StatsCommand<'a, L> {
    pub fn new(log: L, dataset: &'a Dataset) -> Self {
        Self { log, dataset }
    }

    /// Run the stats command. An unreadable log reports as empty.
    pub fn run(&self, _options: &StatsOptions) -> StatsOutput {
        let stats = compute_stats(&self.log);
        StatsOutput::from_stats(&stats, self.dataset)
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &StatsOutput, options: &StatsOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    /// Format output as human-readable text.
    fn format_human_readable(&self, output: &StatsOutput) -> String {
        if output.total == 0 {
            return "No answers recorded yet.\n".to_string();
        }

        let mut lines = Vec::new();
        lines.push("=== Dojo Study Stats ===\n".to_string());
        lines.push(format!(
            "Answers: {} | Correct: {} | Incorrect: {} | Rate: {}%",
            output.total, output.correct, output.incorrect, output.rate
        ));
        lines.push(format!("Mistakes to review: {}", output.mistakes));
        lines.push(String::new());

        let width = output
            .words
            .iter()
            .map(|w| w.english.chars().count())
            .max()
            .unwrap_or(0);
        for word in &output.words {
            let status = match word.mastery {
                Mastery::NeedsReview => "needs review".to_string(),
                Mastery::Streak(n) => format!("streak {}", n),
            };
            lines.push(format!(
                "  {:<width$}  {}  ok {} / miss {}  ({})",
                word.english,
                word.japanese,
                word.correct,
                word.incorrect,
                status,
                width = width
            ));
        }

        let missed: Vec<&WordReport> = output.words.iter().filter(|w| w.incorrect > 0).collect();
        if !missed.is_empty() {
            lines.push(String::new());
            lines.push("Missed words:".to_string());
            for word in missed {
                lines.push(format!(
                    "  {}  {}  (missed {})",
                    word.english, word.japanese, word.incorrect
                ));
                lines.push(format!("    {}", word.example));
                if let Some(example_ja) = &word.example_ja {
                    lines.push(format!("    {}", example_ja));
                }
            }
        }

        lines.join("\n") + "\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::fixtures;
    use crate::stats::AnswerEvent;
    use crate::storage::MemoryAnswerLog;

    fn log(answers: &[(WordId, bool)]) -> MemoryAnswerLog {
        MemoryAnswerLog::with_events(
            answers
                .iter()
                .enumerate()
                .map(|(i, (id, ok))| AnswerEvent::with_timestamp(*id, *ok, i as i64))
                .collect(),
        )
    }

    #[test]
    fn test_stats_empty_log() {
        let dataset = fixtures::dataset(5);
        let cmd = StatsCommand::new(MemoryAnswerLog::new(), &dataset);
        let options = StatsOptions::default();

        let output = cmd.run(&options);
        assert_eq!(output.total, 0);
        assert_eq!(output.rate, 0);
        assert!(output.words.is_empty());
        assert_eq!(cmd.format_output(&output, &options), "No answers recorded yet.\n");
    }

    #[test]
    fn test_stats_report() {
        let dataset = fixtures::dataset(5);
        let cmd = StatsCommand::new(
            log(&[(1, true), (2, false), (2, false), (3, false), (3, true)]),
            &dataset,
        );
        let output = cmd.run(&StatsOptions::default());

        assert_eq!(output.total, 5);
        assert_eq!(output.correct, 2);
        assert_eq!(output.rate, 40);
        assert_eq!(output.mistakes, 1);
        let ids: Vec<WordId> = output.words.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(output.words[0].mastery, Mastery::NeedsReview);
        assert_eq!(output.words[1].mastery, Mastery::Streak(1));
        assert_eq!(output.words[2].streak, 1);
    }

    #[test]
    fn test_format_human_readable() {
        let dataset = fixtures::dataset(5);
        let cmd = StatsCommand::new(log(&[(2, false), (4, true)]), &dataset);
        let options = StatsOptions::default();
        let text = cmd.format_output(&cmd.run(&options), &options);

        assert!(text.contains("=== Dojo Study Stats ==="));
        assert!(text.contains("Answers: 2 | Correct: 1 | Incorrect: 1 | Rate: 50%"));
        assert!(text.contains("Mistakes to review: 1"));
        assert!(text.contains("word2  意味2  ok 0 / miss 1  (needs review)"));
        assert!(text.contains("word4  意味4  ok 1 / miss 0  (streak 1)"));
    }

    #[test]
    fn test_missed_words_show_examples() {
        let mut words = fixtures::words(5);
        words[2].example_ja = Some("例文3".to_string());
        let dataset = Dataset::new(words, Vec::new()).unwrap();
        let cmd = StatsCommand::new(
            log(&[(1, true), (2, false), (3, false), (3, true)]),
            &dataset,
        );
        let options = StatsOptions::default();
        let text = cmd.format_output(&cmd.run(&options), &options);

        let missed = &text[text.find("Missed words:").unwrap()..];
        assert!(missed.contains("  word2  意味2  (missed 1)\n    Example 2.\n"));
        assert!(missed.contains("  word3  意味3  (missed 1)\n    Example 3.\n    例文3\n"));
        // Never-missed words stay out of the section
        assert!(!missed.contains("word1"));
    }

    #[test]
    fn test_no_missed_section_without_mistakes() {
        let dataset = fixtures::dataset(5);
        let cmd = StatsCommand::new(log(&[(1, true), (2, true)]), &dataset);
        let options = StatsOptions::default();
        let text = cmd.format_output(&cmd.run(&options), &options);
        assert!(!text.contains("Missed words:"));
    }

    #[test]
    fn test_format_json_and_quiet() {
        let dataset = fixtures::dataset(5);
        let cmd = StatsCommand::new(log(&[(1, true)]), &dataset);
        let output = cmd.run(&StatsOptions::default());

        let json = cmd.format_output(
            &output,
            &StatsOptions {
                json: true,
                quiet: false,
            },
        );
        let parsed: StatsOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.total, 1);
        assert_eq!(parsed.rate, 100);
        assert_eq!(parsed.words[0].example, "Example 1.");
        assert!(!json.contains("example_ja"));

        let quiet = cmd.format_output(
            &output,
            &StatsOptions {
                json: false,
                quiet: true,
            },
        );
        assert!(quiet.is_empty());
    }
}
