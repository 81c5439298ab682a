//! Quiz command for Dojo.
//!
//! Runs a quiz over stdin/stdout. The start screen offers the configured
//! presets; the end screen offers a retry, a drill of the words missed in
//! the run, or a way back to the start screen.

use std::io::{BufRead, Write};

use rand::Rng;
use serde::Serialize;

use crate::cli::terminal::{prompt, read_choice, render_feedback, render_question, Reply};
use crate::config::QuizConfig;
use crate::core::{QuestionCount, QuizSession, QuizStatus, QuizSummary};
use crate::error::Result;
use crate::stats::RateBand;
use crate::storage::AnswerLog;

/// Options for the quiz command.
#[derive(Debug, Clone, Default)]
pub struct QuizOptions {
    /// Explicit question count.
    pub count: Option<u32>,
    /// Ask every word in the table.
    pub all: bool,
}

impl QuizOptions {
    /// The count given on the command line, if any.
    ///
    /// `None` means the learner picks one on the start screen.
    pub fn question_count(&self, config: &QuizConfig) -> Option<QuestionCount> {
        if self.all {
            return Some(QuestionCount::All);
        }
        self.count.map(|n| preset_or_custom(n, config))
    }
}

fn preset_or_custom(n: u32, config: &QuizConfig) -> QuestionCount {
    if config.presets.contains(&n) {
        QuestionCount::Preset(n)
    } else {
        QuestionCount::Custom(n)
    }
}

/// A reply typed at the start screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartChoice {
    Count(QuestionCount),
    Quit,
}

impl StartChoice {
    /// Parse a start screen reply. An empty line takes the default count.
    pub fn parse(line: &str, config: &QuizConfig) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Some(Self::Count(preset_or_custom(config.default_count, config)));
        }
        match line.to_ascii_lowercase().as_str() {
            "q" => Some(Self::Quit),
            "a" | "all" => Some(Self::Count(QuestionCount::All)),
            other => match other.parse::<u32>() {
                Ok(n) if QuizConfig::is_valid_count(n) => {
                    Some(Self::Count(preset_or_custom(n, config)))
                }
                _ => None,
            },
        }
    }
}

/// Output of an interactive quiz.
#[derive(Debug, Clone, Serialize)]
pub struct QuizOutput {
    /// One summary per finished run, in order.
    pub rounds: Vec<QuizSummary>,
    /// Whether the learner quit in the middle of a question.
    pub quit_early: bool,
}

/// The quiz command implementation.
pub struct QuizCommand<'a, L: AnswerLog, R: Rng> {
    session: QuizSession<'a, L, R>,
    config: QuizConfig,
}

impl<'a, L: AnswerLog, R: Rng> QuizCommand<'a, L, R> {
    pub fn new(session: QuizSession<'a, L, R>, config: QuizConfig) -> Self {
        Self { session, config }
    }

    /// Drive the session until the learner quits or input runs out.
    ///
    /// With no `count` the learner starts on the start screen.
    pub fn run<I: BufRead, O: Write>(
        &mut self,
        input: &mut I,
        output: &mut O,
        count: Option<QuestionCount>,
    ) -> Result<QuizOutput> {
        if let Some(count) = count {
            self.session.start(count)?;
        }
        let mut result = QuizOutput {
            rounds: Vec::new(),
            quit_early: false,
        };

        loop {
            match self.session.status() {
                QuizStatus::Start => match self.start_menu(input, output)? {
                    Some(count) => self.session.start(count)?,
                    None => break,
                },
                QuizStatus::Playing | QuizStatus::ReviewingMistakes => {
                    if !self.ask(input, output)? {
                        result.quit_early = true;
                        break;
                    }
                }
                QuizStatus::End => {
                    if let Some(summary) = self.session.summary() {
                        render_summary(output, &summary)?;
                        result.rounds.push(summary);
                    }
                    if !self.end_menu(input, output)? {
                        break;
                    }
                }
                QuizStatus::ReviewComplete => {
                    writeln!(output, "\nEvery missed word answered correctly.")?;
                    if !self.end_menu(input, output)? {
                        break;
                    }
                }
            }
        }
        Ok(result)
    }

    /// Offer the preset counts, every word, or a typed count.
    /// Returns `None` when the learner quits.
    fn start_menu<I: BufRead, O: Write>(
        &mut self,
        input: &mut I,
        output: &mut O,
    ) -> Result<Option<QuestionCount>> {
        let presets: Vec<String> = self.config.presets.iter().map(u32::to_string).collect();
        writeln!(output, "\n=== Dojo Quiz ===")?;
        writeln!(
            output,
            "Presets: {}  [a] all words  [q] quit, or type any count",
            presets.join(", ")
        )?;
        let menu = format!("Questions [{}]: ", self.config.default_count);
        loop {
            let Some(line) = prompt(input, output, &menu)? else {
                return Ok(None);
            };
            match StartChoice::parse(&line, &self.config) {
                Some(StartChoice::Count(count)) => return Ok(Some(count)),
                Some(StartChoice::Quit) => return Ok(None),
                None => writeln!(output, "Unknown option '{}'.", line)?,
            }
        }
    }

    /// Ask the question on screen. Returns false when the learner quits.
    fn ask<I: BufRead, O: Write>(&mut self, input: &mut I, output: &mut O) -> Result<bool> {
        let Some(card) = self.session.current() else {
            return Ok(false);
        };
        let question = card.question().clone();
        let header = match self.session.drill() {
            Some(drill) if self.session.status() == QuizStatus::ReviewingMistakes => {
                format!("[review, {} left]", drill.remaining().len())
            }
            _ => format!(
                "[{}/{}]",
                self.session.position(),
                self.session.total_count()
            ),
        };
        render_question(output, &header, &question)?;

        match read_choice(input, output, &question)? {
            Reply::Quit => Ok(false),
            Reply::Choice(id) => {
                if let Some(outcome) = self.session.answer(id)? {
                    render_feedback(output, &question, &outcome)?;
                }
                self.session.next()?;
                Ok(true)
            }
        }
    }

    /// Offer retry, mistake review, the start screen, or quit.
    /// Returns false on quit.
    fn end_menu<I: BufRead, O: Write>(&mut self, input: &mut I, output: &mut O) -> Result<bool> {
        let can_review = self.session.can_review_mistakes();
        let menu = if can_review {
            "[r] retry  [m] review mistakes  [s] start  [q] quit: "
        } else {
            "[r] retry  [s] start  [q] quit: "
        };
        loop {
            let Some(line) = prompt(input, output, menu)? else {
                return Ok(false);
            };
            match line.to_ascii_lowercase().as_str() {
                "r" => {
                    self.session.retry()?;
                    return Ok(true);
                }
                "m" if can_review => {
                    self.session.review_mistakes()?;
                    return Ok(true);
                }
                "s" => {
                    self.session.back_to_start();
                    return Ok(true);
                }
                "q" => return Ok(false),
                _ => writeln!(output, "Unknown option '{}'.", line)?,
            }
        }
    }

    /// Give the session back.
    pub fn into_session(self) -> QuizSession<'a, L, R> {
        self.session
    }
}

fn render_summary<O: Write>(output: &mut O, summary: &QuizSummary) -> std::io::Result<()> {
    let verdict = match summary.band {
        RateBand::High => "Excellent!",
        RateBand::Mid => "Good effort.",
        RateBand::Low => "Keep practicing.",
    };
    writeln!(output, "\n=== Results ===")?;
    writeln!(
        output,
        "Questions: {} | Correct: {} | Incorrect: {} | Rate: {}%",
        summary.total, summary.correct, summary.incorrect, summary.rate
    )?;
    writeln!(output, "{}", verdict)?;
    if !summary.mistakes.is_empty() {
        writeln!(output, "\nMissed words:")?;
        for word in &summary.mistakes {
            writeln!(output, "  {}  {}", word.english, word.japanese)?;
            writeln!(output, "    {}", word.example)?;
            if let Some(example_ja) = &word.example_ja {
                writeln!(output, "    {}", example_ja)?;
            }
        }
    }
    Ok(())
}
