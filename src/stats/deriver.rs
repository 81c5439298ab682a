//! Statistics derived from the answer log.
//!
//! Nothing here is cached: every call folds the full log from the oldest
//! event forward, so the numbers can never drift from the log.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::{Dataset, Word, WordId};
use crate::error::{FailOpen, Result};
use crate::stats::AnswerEvent;
use crate::storage::AnswerLog;

/// Lifetime counters and current streak for one word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WordStat {
    pub correct: u32,
    pub incorrect: u32,
    /// Correct answers since the most recent incorrect one.
    pub streak: u32,
}

impl WordStat {
    /// Fold one answer into the counters.
    pub fn record(&mut self, is_correct: bool) {
        if is_correct {
            self.correct += 1;
            self.streak += 1;
        } else {
            self.incorrect += 1;
            self.streak = 0;
        }
    }

    /// Missed at least once and not answered correctly since.
    pub fn is_mistake(&self) -> bool {
        self.incorrect > 0 && self.streak == 0
    }

    pub fn mastery(&self) -> Mastery {
        if self.streak == 0 {
            Mastery::NeedsReview
        } else {
            Mastery::Streak(self.streak)
        }
    }
}

/// How a word currently stands for the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mastery {
    NeedsReview,
    /// Answered correctly this many times in a row.
    Streak(u32),
}

/// Coarse grading of a success rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateBand {
    /// 80% and above.
    High,
    /// 50% to 79%.
    Mid,
    Low,
}

impl RateBand {
    pub fn of(rate: u32) -> Self {
        if rate >= 80 {
            Self::High
        } else if rate >= 50 {
            Self::Mid
        } else {
            Self::Low
        }
    }
}

/// Percentage of `correct` in `total`, rounded half up; 0 when `total` is 0.
pub fn success_rate(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (correct, total) = (u64::from(correct), u64::from(total));
    ((200 * correct + total) / (2 * total)) as u32
}

/// Aggregate and per-word statistics over the whole log.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StudyStats {
    pub total: u32,
    pub correct: u32,
    pub incorrect: u32,
    /// Rounded success percentage.
    pub rate: u32,
    pub per_word: BTreeMap<WordId, WordStat>,
}

/// A word from the table joined with its statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnsweredWord<'a> {
    pub word: &'a Word,
    pub stat: WordStat,
}

impl StudyStats {
    /// Single forward pass over events in chronological order.
    pub fn from_events(events: &[AnswerEvent]) -> Self {
        let mut stats = Self::default();
        for event in events {
            stats.total += 1;
            if event.is_correct {
                stats.correct += 1;
            } else {
                stats.incorrect += 1;
            }
            stats
                .per_word
                .entry(event.word_id)
                .or_default()
                .record(event.is_correct);
        }
        stats.rate = success_rate(stats.correct, stats.total);
        stats
    }

    /// Ids of words currently in the mistake queue.
    pub fn mistake_word_ids(&self) -> BTreeSet<WordId> {
        self.per_word
            .iter()
            .filter(|(_, stat)| stat.is_mistake())
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn word(&self, id: WordId) -> Option<WordStat> {
        self.per_word.get(&id).copied()
    }

    /// Answered words, most-missed first.
    ///
    /// Ids missing from the dataset are skipped. Ties keep table order.
    pub fn answered_words<'a>(&self, dataset: &'a Dataset) -> Vec<AnsweredWord<'a>> {
        let mut answered: Vec<AnsweredWord<'a>> = dataset
            .words()
            .iter()
            .filter_map(|word| {
                self.per_word
                    .get(&word.id)
                    .map(|stat| AnsweredWord { word, stat: *stat })
            })
            .collect();
        answered.sort_by(|a, b| b.stat.incorrect.cmp(&a.stat.incorrect));
        answered
    }
}

/// Read the log and derive statistics. An unreadable log counts as empty.
pub fn compute_stats<L: AnswerLog + ?Sized>(log: &L) -> StudyStats {
    let events: Result<Vec<AnswerEvent>> = log.read_all();
    StudyStats::from_events(&events.fail_open_default("Reading answer log for stats"))
}

/// Words that have been missed and not yet answered correctly since.
pub fn mistake_word_ids<L: AnswerLog + ?Sized>(log: &L) -> BTreeSet<WordId> {
    compute_stats(log).mistake_word_ids()
}
