//! Getting dressed — the life-skills game.
//!
//! Each scenario lays out clothes, some right for the occasion and some
//! not. The child toggles items on and taps "done"; the pick scores when it
//! is exactly the right set — nothing missing, nothing extra.

use chalk_engine::Rng;

/// A dressing scenario.
#[derive(Debug, Clone)]
pub struct Outfit {
    pub name: &'static str,
    pub correct: &'static [&'static str],
    pub wrong: &'static [&'static str],
}

pub fn outfits() -> Vec<Outfit> {
    vec![
        Outfit {
            name: "School Day",
            correct: &["👕", "👖", "👟"],
            wrong: &["🩱", "🎩"],
        },
        Outfit {
            name: "Bedtime",
            correct: &["👔", "🩳"],
            wrong: &["🥾", "👗", "🎩"],
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutfitPhase {
    Intro,
    Picking,
    Results,
}

/// One run through the dressing scenarios.
pub struct OutfitGame {
    outfits: Vec<Outfit>,
    phase: OutfitPhase,
    current: usize,
    /// All items of the current scenario in display order.
    items: Vec<&'static str>,
    selected: Vec<bool>,
    score: u32,
}

impl OutfitGame {
    pub fn new() -> Self {
        Self {
            outfits: outfits(),
            phase: OutfitPhase::Intro,
            current: 0,
            items: Vec::new(),
            selected: Vec::new(),
            score: 0,
        }
    }

    pub fn start(&mut self, rng: &mut Rng) {
        self.phase = OutfitPhase::Picking;
        self.current = 0;
        self.score = 0;
        self.lay_out_items(rng);
    }

    /// Mix the right and wrong clothes into one shuffled rail.
    fn lay_out_items(&mut self, rng: &mut Rng) {
        let outfit = &self.outfits[self.current];
        self.items = outfit
            .correct
            .iter()
            .chain(outfit.wrong.iter())
            .copied()
            .collect();
        rng.shuffle(&mut self.items);
        self.selected = vec![false; self.items.len()];
    }

    pub fn phase(&self) -> OutfitPhase {
        self.phase
    }

    pub fn outfit(&self) -> &Outfit {
        &self.outfits[self.current]
    }

    pub fn outfit_number(&self) -> usize {
        self.current
    }

    pub fn total_outfits(&self) -> usize {
        self.outfits.len()
    }

    /// The clothes rail in display order.
    pub fn items(&self) -> &[&'static str] {
        &self.items
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Tap an item to put it on or take it off.
    pub fn toggle(&mut self, index: usize) {
        if self.phase == OutfitPhase::Picking {
            if let Some(slot) = self.selected.get_mut(index) {
                *slot = !*slot;
            }
        }
    }

    /// Finish dressing. Scores when the selection is exactly the correct
    /// set, then moves to the next scenario or the results.
    pub fn done(&mut self, rng: &mut Rng) -> bool {
        if self.phase != OutfitPhase::Picking {
            return false;
        }

        let outfit = &self.outfits[self.current];
        let picked: Vec<&str> = self
            .items
            .iter()
            .zip(&self.selected)
            .filter(|(_, &sel)| sel)
            .map(|(&item, _)| item)
            .collect();
        let correct = picked.len() == outfit.correct.len()
            && outfit.correct.iter().all(|c| picked.contains(c));

        if correct {
            self.score += 1;
        }

        if self.current + 1 >= self.outfits.len() {
            self.phase = OutfitPhase::Results;
        } else {
            self.current += 1;
            self.lay_out_items(rng);
        }
        correct
    }
}

impl Default for OutfitGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select_exactly(game: &mut OutfitGame, wanted: &[&str]) {
        let items = game.items().to_vec();
        for (i, item) in items.iter().enumerate() {
            let should = wanted.contains(item);
            if game.is_selected(i) != should {
                game.toggle(i);
            }
        }
    }

    #[test]
    fn exact_pick_scores() {
        let mut rng = Rng::new(21);
        let mut game = OutfitGame::new();
        game.start(&mut rng);

        for _ in 0..game.total_outfits() {
            let correct = game.outfit().correct.to_vec();
            select_exactly(&mut game, &correct);
            assert!(game.done(&mut rng));
        }
        assert_eq!(game.score(), 2);
        assert_eq!(game.phase(), OutfitPhase::Results);
    }

    #[test]
    fn extra_item_spoils_the_outfit() {
        let mut rng = Rng::new(21);
        let mut game = OutfitGame::new();
        game.start(&mut rng);

        // Everything on the rail, including the wrong pieces.
        let all = game.items().to_vec();
        select_exactly(&mut game, &all);
        assert!(!game.done(&mut rng));
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn missing_item_spoils_the_outfit() {
        let mut rng = Rng::new(4);
        let mut game = OutfitGame::new();
        game.start(&mut rng);

        let partial = &game.outfit().correct[..1].to_vec();
        select_exactly(&mut game, partial);
        assert!(!game.done(&mut rng));
    }

    #[test]
    fn rail_mixes_all_items_shuffled() {
        let mut rng = Rng::new(8);
        let mut game = OutfitGame::new();
        game.start(&mut rng);
        let outfit = game.outfit();
        assert_eq!(
            game.items().len(),
            outfit.correct.len() + outfit.wrong.len()
        );
        for item in outfit.correct.iter().chain(outfit.wrong.iter()) {
            assert!(game.items().contains(item));
        }
    }
}
