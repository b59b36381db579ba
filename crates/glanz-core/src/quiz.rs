use glanz_enricher::DISTRACTOR_COUNT;
use glanz_types::{QuizOption, WordRecord};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The options on screen for one word; rebuilt whenever the word changes
#[derive(Debug, Clone)]
pub struct QuizSession {
    word_id: String,
    options: Vec<QuizOption>,
}

impl QuizSession {
    pub fn new<R: Rng + ?Sized>(record: &WordRecord, rng: &mut R) -> Self {
        Self {
            word_id: record.id.clone(),
            options: build_options(record, rng),
        }
    }

    pub fn word_id(&self) -> &str {
        &self.word_id
    }

    pub fn options(&self) -> &[QuizOption] {
        &self.options
    }

    /// Correctness of the chosen option, None when out of range
    pub fn select(&self, choice: usize) -> Option<bool> {
        self.options.get(choice).map(|o| o.correct)
    }
}

/// Correct meaning plus up to three distractors, in random order
pub fn build_options<R: Rng + ?Sized>(record: &WordRecord, rng: &mut R) -> Vec<QuizOption> {
    let mut options = Vec::with_capacity(DISTRACTOR_COUNT + 1);
    options.push(QuizOption {
        meaning: record.meaning.clone(),
        image_keyword: record.correct_image_keyword.clone(),
        correct: true,
    });
    options.extend(
        record
            .distractors
            .iter()
            .take(DISTRACTOR_COUNT)
            .map(|d| QuizOption {
                meaning: d.wrong_meaning.clone(),
                image_keyword: d.image_keyword.clone(),
                correct: false,
            }),
    );

    options.shuffle(rng);
    options
}

/// Deterministic shuffle for reproducible runs
pub fn shuffled_seeded<T>(mut items: Vec<T>, seed: u64) -> Vec<T> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    items.shuffle(&mut rng);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::word;

    #[test]
    fn four_options_with_one_correct() {
        let record = word("w1", "Haus");

        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let options = build_options(&record, &mut rng);

            assert_eq!(options.len(), 4);
            assert_eq!(options.iter().filter(|o| o.correct).count(), 1);
            let correct = options.iter().find(|o| o.correct).unwrap();
            assert_eq!(correct.meaning, record.meaning);
            assert_eq!(correct.image_keyword, "haus");
        }
    }

    #[test]
    fn same_seed_same_order() {
        let record = word("w1", "Haus");
        let a = build_options(&record, &mut ChaCha8Rng::seed_from_u64(42));
        let b = build_options(&record, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn correct_answer_moves_around() {
        let record = word("w1", "Haus");
        let positions: std::collections::HashSet<usize> = (0..64)
            .map(|seed| {
                let options = build_options(&record, &mut ChaCha8Rng::seed_from_u64(seed));
                options.iter().position(|o| o.correct).unwrap()
            })
            .collect();

        assert!(positions.len() > 1);
    }

    #[test]
    fn short_distractor_list_yields_fewer_options() {
        let mut record = word("w1", "Haus");
        record.distractors.truncate(1);

        let options = build_options(&record, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn select_reports_correctness() {
        let record = word("w1", "Haus");
        let quiz = QuizSession::new(&record, &mut ChaCha8Rng::seed_from_u64(3));
        let correct_at = quiz.options().iter().position(|o| o.correct).unwrap();

        assert_eq!(quiz.word_id(), "w1");
        assert_eq!(quiz.select(correct_at), Some(true));
        assert_eq!(quiz.select((correct_at + 1) % 4), Some(false));
        assert_eq!(quiz.select(9), None);
    }

    #[test]
    fn seeded_shuffle_is_a_permutation() {
        let shuffled = shuffled_seeded((0..10).collect::<Vec<_>>(), 9);
        let mut sorted = shuffled.clone();
        sorted.sort();

        assert_eq!(sorted, (0..10).collect::<Vec<_>>());
        assert_eq!(shuffled, shuffled_seeded((0..10).collect::<Vec<_>>(), 9));
    }
}
