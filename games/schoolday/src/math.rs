//! Apple counting — the math game.
//!
//! Each round puts 1-10 apples on the tree and offers four number buttons,
//! exactly one of them right. Eight rounds per run; like everything in
//! kindergarten, finishing the run is what completes the subject.

use chalk_engine::Rng;

pub const TOTAL_ROUNDS: usize = 8;
pub const OPTION_COUNT: usize = 4;
pub const MAX_APPLES: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountingPhase {
    Intro,
    Question,
    Results,
}

/// One run of the apple counting game.
pub struct CountingGame {
    phase: CountingPhase,
    round: usize,
    score: u32,
    apple_count: u32,
    options: Vec<u32>,
}

impl CountingGame {
    pub fn new() -> Self {
        Self {
            phase: CountingPhase::Intro,
            round: 0,
            score: 0,
            apple_count: 0,
            options: Vec::new(),
        }
    }

    pub fn start(&mut self, rng: &mut Rng) {
        self.round = 0;
        self.score = 0;
        self.phase = CountingPhase::Question;
        self.setup_round(rng);
    }

    /// Roll the apple count and build four distinct shuffled options that
    /// always include the right answer.
    fn setup_round(&mut self, rng: &mut Rng) {
        self.apple_count = rng.next_int(MAX_APPLES) + 1;

        self.options.clear();
        self.options.push(self.apple_count);
        while self.options.len() < OPTION_COUNT {
            let candidate = rng.next_int(MAX_APPLES) + 1;
            if !self.options.contains(&candidate) {
                self.options.push(candidate);
            }
        }
        rng.shuffle(&mut self.options);
    }

    pub fn phase(&self) -> CountingPhase {
        self.phase
    }

    /// Zero-based round number.
    pub fn round_number(&self) -> usize {
        self.round
    }

    /// Apples on the tree this round.
    pub fn apple_count(&self) -> u32 {
        self.apple_count
    }

    /// The four number buttons in display order.
    pub fn options(&self) -> &[u32] {
        &self.options
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Tap a number. Returns whether it matched the apple count, then moves
    /// to the next round or the results.
    pub fn answer(&mut self, value: u32, rng: &mut Rng) -> bool {
        if self.phase != CountingPhase::Question {
            return false;
        }
        let correct = value == self.apple_count;
        if correct {
            self.score += 1;
        }

        if self.round + 1 >= TOTAL_ROUNDS {
            self.phase = CountingPhase::Results;
        } else {
            self.round += 1;
            self.setup_round(rng);
        }
        correct
    }
}

impl Default for CountingGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_setup_is_well_formed() {
        let mut rng = Rng::new(11);
        let mut game = CountingGame::new();
        game.start(&mut rng);

        for _ in 0..TOTAL_ROUNDS {
            let count = game.apple_count();
            assert!((1..=MAX_APPLES).contains(&count));
            let options = game.options().to_vec();
            assert_eq!(options.len(), OPTION_COUNT);
            assert!(options.contains(&count), "options must include the answer");
            let mut dedup = options.clone();
            dedup.sort_unstable();
            dedup.dedup();
            assert_eq!(dedup.len(), OPTION_COUNT, "options must be distinct");
            game.answer(count, &mut rng);
        }
        assert_eq!(game.phase(), CountingPhase::Results);
        assert_eq!(game.score(), TOTAL_ROUNDS as u32);
    }

    #[test]
    fn wrong_answers_advance_without_scoring() {
        let mut rng = Rng::new(5);
        let mut game = CountingGame::new();
        game.start(&mut rng);

        for _ in 0..TOTAL_ROUNDS {
            let wrong = *game
                .options()
                .iter()
                .find(|&&v| v != game.apple_count())
                .unwrap();
            assert!(!game.answer(wrong, &mut rng));
        }
        assert_eq!(game.score(), 0);
        assert_eq!(game.phase(), CountingPhase::Results);
    }

    #[test]
    fn answers_after_results_are_ignored() {
        let mut rng = Rng::new(5);
        let mut game = CountingGame::new();
        game.start(&mut rng);
        for _ in 0..TOTAL_ROUNDS {
            let count = game.apple_count();
            game.answer(count, &mut rng);
        }
        let score = game.score();
        assert!(!game.answer(3, &mut rng));
        assert_eq!(game.score(), score);
    }
}
