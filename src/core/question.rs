//! Multiple-choice question generation.
//!
//! Every random decision goes through a caller-supplied [`Rng`], so tests
//! can pin the sequence with a seeded generator.

use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;

use crate::core::{Dataset, Word, WordId};
use crate::error::{DojoError, Result};

/// Number of choices shown per question.
pub const CHOICE_COUNT: usize = 4;

/// One question: an English word and four Japanese meanings to choose from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    /// The word being asked.
    pub correct: Word,
    /// Display order of the choices; contains `correct` exactly once.
    pub choices: Vec<Word>,
}

impl Question {
    /// Whether `choice` is the right answer.
    pub fn is_correct(&self, choice: WordId) -> bool {
        self.correct.id == choice
    }

    /// Whether `choice` is one of the presented choices.
    pub fn offers(&self, choice: WordId) -> bool {
        self.choices.iter().any(|w| w.id == choice)
    }
}

/// Uniform in-place Fisher-Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Pick one element uniformly, or `None` from an empty slice.
pub fn pick<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        Some(&items[rng.gen_range(0..items.len())])
    }
}

/// Draws questions against the full word table.
///
/// The answer comes from a caller-chosen pool; distractors always come from
/// the whole table, so they can repeat across questions and need not be in
/// the pool.
#[derive(Debug, Clone, Copy)]
pub struct Sampler<'a> {
    words: &'a [Word],
}

impl<'a> Sampler<'a> {
    /// Create a sampler over a validated dataset.
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            words: dataset.words(),
        }
    }

    /// Draw a question whose answer is in `pool` but not in `exclude`.
    ///
    /// Returns `None` when every pool word is excluded.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        pool: &[Word],
        exclude: &HashSet<WordId>,
        rng: &mut R,
    ) -> Option<Question> {
        let available: Vec<&Word> = pool.iter().filter(|w| !exclude.contains(&w.id)).collect();
        let correct = (*pick(&available, rng)?).clone();

        let mut others: Vec<&Word> = self.words.iter().filter(|w| w.id != correct.id).collect();
        if others.len() < CHOICE_COUNT - 1 {
            tracing::warn!(
                "Word table has {} words, cannot build {} choices",
                self.words.len(),
                CHOICE_COUNT
            );
            return None;
        }
        shuffle(&mut others, rng);

        let mut choices = Vec::with_capacity(CHOICE_COUNT);
        choices.push(correct.clone());
        choices.extend(others.into_iter().take(CHOICE_COUNT - 1).cloned());
        shuffle(&mut choices, rng);

        Some(Question { correct, choices })
    }
}

/// Result of answering a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    /// The word that was asked.
    pub word_id: WordId,
    /// The choice the learner picked.
    pub selected_id: WordId,
    pub is_correct: bool,
}

/// A question on screen together with the learner's selection, if any.
///
/// Only the first selection counts.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionCard {
    question: Question,
    selected: Option<WordId>,
}

impl QuestionCard {
    pub fn new(question: Question) -> Self {
        Self {
            question,
            selected: None,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn is_answered(&self) -> bool {
        self.selected.is_some()
    }

    /// The recorded outcome, once answered.
    pub fn outcome(&self) -> Option<AnswerOutcome> {
        self.selected.map(|selected_id| AnswerOutcome {
            word_id: self.question.correct.id,
            selected_id,
            is_correct: self.question.is_correct(selected_id),
        })
    }

    /// Record a selection.
    ///
    /// Returns `Ok(None)` when the card was already answered, and an error
    /// when `choice` is not one of the presented choices.
    pub fn select(&mut self, choice: WordId) -> Result<Option<AnswerOutcome>> {
        if self.is_answered() {
            return Ok(None);
        }
        if !self.question.offers(choice) {
            return Err(DojoError::invalid_state(format!(
                "word {} is not a choice for '{}'",
                choice, self.question.correct.english
            )));
        }
        self.selected = Some(choice);
        Ok(self.outcome())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::fixtures;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ids(words: &[Word]) -> Vec<WordId> {
        words.iter().map(|w| w.id).collect()
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut items, &mut rng);

        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_handles_tiny_slices() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut empty: Vec<u32> = Vec::new();
        shuffle(&mut empty, &mut rng);
        let mut one = vec![9];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, vec![9]);
    }

    #[test]
    fn test_shuffle_is_roughly_uniform() {
        // Each of the 6 orderings of 3 items should turn up about 1/6 of the time.
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut counts = std::collections::HashMap::new();
        let trials = 6000;
        for _ in 0..trials {
            let mut items = [0, 1, 2];
            shuffle(&mut items, &mut rng);
            *counts.entry(items).or_insert(0u32) += 1;
        }
        assert_eq!(counts.len(), 6);
        for count in counts.values() {
            assert!((800..1200).contains(count), "skewed count {}", count);
        }
    }

    #[test]
    fn test_pick() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let empty: [u32; 0] = [];
        assert!(pick(&empty, &mut rng).is_none());
        assert_eq!(pick(&[5], &mut rng), Some(&5));
    }

    #[test]
    fn test_sample_same_seed_same_question() {
        let dataset = fixtures::dataset(20);
        let sampler = Sampler::new(&dataset);
        let none = HashSet::new();

        let a = sampler.sample(dataset.words(), &none, &mut ChaCha8Rng::seed_from_u64(11));
        let b = sampler.sample(dataset.words(), &none, &mut ChaCha8Rng::seed_from_u64(11));
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_exhausted_pool() {
        let dataset = fixtures::dataset(6);
        let sampler = Sampler::new(&dataset);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let exclude: HashSet<WordId> = ids(dataset.words()).into_iter().collect();
        assert!(sampler.sample(dataset.words(), &exclude, &mut rng).is_none());
        assert!(sampler.sample(&[], &HashSet::new(), &mut rng).is_none());
    }

    #[test]
    fn test_distractors_come_from_whole_table() {
        // Pool of one word: the other three choices must come from outside it.
        let dataset = fixtures::dataset(4);
        let sampler = Sampler::new(&dataset);
        let pool = vec![dataset.words()[2].clone()];
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let question = sampler.sample(&pool, &HashSet::new(), &mut rng).unwrap();
        assert_eq!(question.correct.id, 3);
        let mut choice_ids = ids(&question.choices);
        choice_ids.sort();
        assert_eq!(choice_ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_every_available_word_gets_asked() {
        let dataset = fixtures::dataset(8);
        let sampler = Sampler::new(&dataset);
        let exclude: HashSet<WordId> = [1, 2, 3].into_iter().collect();
        let mut rng = ChaCha8Rng::seed_from_u64(99);

        let mut seen = HashSet::new();
        for _ in 0..500 {
            let q = sampler.sample(dataset.words(), &exclude, &mut rng).unwrap();
            seen.insert(q.correct.id);
        }
        assert_eq!(seen, [4, 5, 6, 7, 8].into_iter().collect());
    }

    #[test]
    fn test_card_first_selection_wins() {
        let dataset = fixtures::dataset(10);
        let sampler = Sampler::new(&dataset);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let question = sampler
            .sample(dataset.words(), &HashSet::new(), &mut rng)
            .unwrap();
        let correct = question.correct.id;
        let wrong = question.choices.iter().find(|w| w.id != correct).unwrap().id;

        let mut card = QuestionCard::new(question);
        assert!(!card.is_answered());
        assert!(card.outcome().is_none());

        let outcome = card.select(wrong).unwrap().unwrap();
        assert!(!outcome.is_correct);
        assert_eq!(outcome.word_id, correct);
        assert_eq!(outcome.selected_id, wrong);

        // Later clicks are ignored
        assert!(card.select(correct).unwrap().is_none());
        assert_eq!(card.outcome(), Some(outcome));
    }

    #[test]
    fn test_card_rejects_unknown_choice() {
        let dataset = fixtures::dataset(10);
        let sampler = Sampler::new(&dataset);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let question = sampler
            .sample(dataset.words(), &HashSet::new(), &mut rng)
            .unwrap();
        let outsider = dataset
            .words()
            .iter()
            .find(|w| !question.offers(w.id))
            .unwrap()
            .id;

        let mut card = QuestionCard::new(question);
        assert!(card.select(outsider).is_err());
        assert!(!card.is_answered());
    }

    proptest! {
        #[test]
        fn prop_sample_structure(
            size in 4u32..40,
            mask in any::<u64>(),
            pool_mask in any::<u64>(),
            seed in any::<u64>(),
        ) {
            let dataset = fixtures::dataset(size);
            let sampler = Sampler::new(&dataset);
            let pool: Vec<Word> = dataset
                .words()
                .iter()
                .filter(|w| pool_mask & (1u64 << (w.id % 64)) != 0)
                .cloned()
                .collect();
            let exclude: HashSet<WordId> = (1..=size).filter(|id| mask & (1u64 << (*id % 64)) != 0).collect();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);

            let available: HashSet<WordId> =
                pool.iter().map(|w| w.id).filter(|id| !exclude.contains(id)).collect();

            match sampler.sample(&pool, &exclude, &mut rng) {
                None => prop_assert!(available.is_empty()),
                Some(q) => {
                    prop_assert!(available.contains(&q.correct.id));
                    prop_assert_eq!(q.choices.len(), CHOICE_COUNT);
                    let distinct: HashSet<WordId> = q.choices.iter().map(|w| w.id).collect();
                    prop_assert_eq!(distinct.len(), CHOICE_COUNT);
                    prop_assert_eq!(q.choices.iter().filter(|w| w.id == q.correct.id).count(), 1);
                }
            }
        }
    }
}
