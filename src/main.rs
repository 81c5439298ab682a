//! Dojo - vocabulary flashcard quiz
//!
//! CLI entry point with global panic handler.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vocab_dojo::cli::grammar::{GrammarCommand, GrammarOptions};
use vocab_dojo::cli::quiz::{QuizCommand, QuizOptions};
use vocab_dojo::cli::reset::{ResetCommand, ResetOptions};
use vocab_dojo::cli::review::ReviewCommand;
use vocab_dojo::cli::stats::{StatsCommand, StatsOptions};
use vocab_dojo::cli::words::{WordsCommand, WordsOptions};
use vocab_dojo::config::{dojo_home, Config};
use vocab_dojo::core::{Dataset, QuizSession, ReviewSession};
use vocab_dojo::error::{exit_codes, DojoError};
use vocab_dojo::storage::FileAnswerLog;

// =============================================================================
// CLI Definition
// =============================================================================

/// Dojo - English to Japanese vocabulary quiz
#[derive(Parser)]
#[command(name = "dojo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a four-choice vocabulary quiz
    Quiz {
        /// Number of questions
        #[arg(long, short)]
        count: Option<u32>,
        /// Ask every word once
        #[arg(long, short, conflicts_with = "count")]
        all: bool,
    },

    /// Review every word you have missed and not yet answered correctly
    Review,

    /// Show answer statistics
    Stats {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Delete all recorded answers
    Reset {
        /// Confirm deletion
        #[arg(long, short)]
        yes: bool,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// List or search the word table
    Words {
        /// Match English (ignoring case) or Japanese
        query: Option<String>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
    },

    /// Browse the grammar reference
    Grammar {
        /// Match title (ignoring case), explanation, or category
        query: Option<String>,
        /// Restrict to one category
        #[arg(long, short)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
    },
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    setup_panic_handler();
    init_logging();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("dojo error: {}", e);
            ExitCode::from(exit_codes::ERROR as u8)
        }
    }
}

/// Log to stderr, filtered by `DOJO_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("DOJO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Set up the global panic handler.
///
/// On panic, logs to ~/.dojo/crash.log and exits with code 3.
fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("dojo panic: {}", info);

        if let Some(home) = dojo_home() {
            let crash_log = home.join("crash.log");
            if let Ok(mut file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&crash_log)
            {
                let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
                let _ = writeln!(file, "[{}] {}", timestamp, info);
            }
        }

        std::process::exit(exit_codes::CRASH);
    }));
}

/// Run the CLI and return the exit code.
fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load();

    match cli.command {
        Commands::Quiz { count, all } => run_quiz(&config, QuizOptions { count, all }),
        Commands::Review => run_review(&config),
        Commands::Stats { json, quiet } => run_stats(&config, StatsOptions { json, quiet }),
        Commands::Reset { yes, json, quiet } => {
            run_reset(&config, ResetOptions { json, quiet, yes })
        }
        Commands::Words { query, json } => {
            run_words(&config, query.as_deref().unwrap_or(""), WordsOptions { json })
        }
        Commands::Grammar {
            query,
            category,
            json,
        } => run_grammar(
            &config,
            query.as_deref().unwrap_or(""),
            GrammarOptions { json, category },
        ),
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

fn open_log(config: &Config) -> Result<FileAnswerLog, DojoError> {
    let log = FileAnswerLog::from_config(config)?;
    tracing::debug!(path = %log.path().display(), "Using results log");
    Ok(log)
}

/// Convert a success boolean to an exit code.
fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::from(exit_codes::SUCCESS as u8)
    } else {
        ExitCode::from(exit_codes::ERROR as u8)
    }
}

fn print_formatted(formatted: &str) {
    if !formatted.is_empty() {
        print!("{}", formatted);
    }
}

fn run_quiz(config: &Config, options: QuizOptions) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let dataset = Dataset::from_config(&config.data)?;
    let log = open_log(config)?;

    let mut cmd = QuizCommand::new(
        QuizSession::with_thread_rng(&dataset, log),
        config.quiz.clone(),
    );
    let stdin = io::stdin();
    let stdout = io::stdout();
    cmd.run(
        &mut stdin.lock(),
        &mut stdout.lock(),
        options.question_count(&config.quiz),
    )?;

    Ok(success_to_exit_code(true))
}

fn run_review(config: &Config) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let dataset = Dataset::from_config(&config.data)?;
    let log = open_log(config)?;

    let mut cmd = ReviewCommand::new(ReviewSession::with_thread_rng(&dataset, log));
    let stdin = io::stdin();
    let stdout = io::stdout();
    cmd.run(&mut stdin.lock(), &mut stdout.lock())?;

    Ok(success_to_exit_code(true))
}

fn run_stats(config: &Config, options: StatsOptions) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let dataset = Dataset::from_config(&config.data)?;
    let cmd = StatsCommand::new(open_log(config)?, &dataset);

    let output = cmd.run(&options);
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(true))
}

fn run_reset(config: &Config, options: ResetOptions) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cmd = ResetCommand::new(open_log(config)?);

    let output = cmd.run(&options);
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_words(
    config: &Config,
    query: &str,
    options: WordsOptions,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let dataset = Dataset::from_config(&config.data)?;
    let cmd = WordsCommand::new(&dataset);

    let output = cmd.run(query);
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(true))
}

fn run_grammar(
    config: &Config,
    query: &str,
    options: GrammarOptions,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let dataset = Dataset::from_config(&config.data)?;
    let cmd = GrammarCommand::new(&dataset);

    let output = cmd.run(query, &options);
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}
