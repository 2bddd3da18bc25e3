//! Choice-round mini-games: reading, science, social studies, feelings,
//! shapes, health and the study-hall review.
//!
//! Every one of these games is the same machine — show a prompt, offer
//! options, compare the tap against the correct answer, tally a score —
//! so they share one `QuizGame` over per-subject round lists. Content ships
//! as a built-in curriculum and can be replaced by the host with the same
//! JSON document it uses to render the text.

use chalk_engine::Rng;
use serde::Deserialize;

use crate::progress::Subject;

/// One question: a prompt (word, face, food...), a display hint the shell
/// renders (emoji), the options offered, and the correct answer string.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceRound {
    pub prompt: String,
    #[serde(default)]
    pub display: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl ChoiceRound {
    fn new(prompt: &str, display: &str, options: &[&str], answer: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            display: display.to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            answer: answer.to_string(),
        }
    }
}

/// The full choice-game curriculum, one round list per quiz subject.
/// The host passes the identical JSON to its renderer, so widget indices
/// always resolve to the same strings on both sides.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct QuizBank {
    pub reading: Vec<ChoiceRound>,
    pub science: Vec<ChoiceRound>,
    pub social_studies: Vec<ChoiceRound>,
    pub feelings: Vec<ChoiceRound>,
    pub shapes: Vec<ChoiceRound>,
    pub health: Vec<ChoiceRound>,
    pub study_hall: Vec<ChoiceRound>,
}

impl QuizBank {
    /// Parse a curriculum JSON document supplied by the host.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The round list for a quiz subject; None for non-quiz subjects.
    pub fn rounds_for(&self, subject: Subject) -> Option<&[ChoiceRound]> {
        match subject {
            Subject::Reading => Some(&self.reading),
            Subject::Science => Some(&self.science),
            Subject::SocialStudies => Some(&self.social_studies),
            Subject::Feelings => Some(&self.feelings),
            Subject::Shapes => Some(&self.shapes),
            Subject::Health => Some(&self.health),
            Subject::StudyHall => Some(&self.study_hall),
            _ => None,
        }
    }

    /// The built-in kindergarten curriculum.
    pub fn standard() -> Self {
        let r = ChoiceRound::new;
        Self {
            reading: vec![
                r("CAT", "🐱", &["CAT", "DOG", "BAT", "RAT"], "CAT"),
                r("SUN", "☀️", &["SUN", "FUN", "RUN", "BUN"], "SUN"),
                r("TREE", "🌲", &["TREE", "FREE", "FLEE", "KNEE"], "TREE"),
                r("STAR", "⭐", &["STAR", "SCAR", "STIR", "STAY"], "STAR"),
                r("FISH", "🐟", &["FISH", "DISH", "WISH", "FIST"], "FISH"),
            ],
            science: vec![
                r(
                    "What do plants need to grow?",
                    "🌱",
                    &["Sunlight & Water", "Pizza", "Ice Cream", "Video Games"],
                    "Sunlight & Water",
                ),
                r("How many legs does a spider have?", "🕷️", &["8", "6", "4", "10"], "8"),
                r(
                    "What color is the sky on a sunny day?",
                    "☀️",
                    &["Blue", "Green", "Red", "Purple"],
                    "Blue",
                ),
                r("What do bees make?", "🐝", &["Honey", "Milk", "Butter", "Juice"], "Honey"),
                r(
                    "Which animal lives in water?",
                    "🌊",
                    &["Fish", "Cat", "Dog", "Bird"],
                    "Fish",
                ),
            ],
            social_studies: vec![
                r(
                    "Teacher",
                    "👨‍🏫",
                    &["Teaches students", "Fixes teeth", "Delivers mail", "Grows food"],
                    "Teaches students",
                ),
                r(
                    "Doctor",
                    "👨‍⚕️",
                    &["Helps sick people", "Cooks food", "Drives bus", "Teaches students"],
                    "Helps sick people",
                ),
                r(
                    "Police Officer",
                    "👮",
                    &["Keeps us safe", "Delivers mail", "Fixes cars", "Cooks food"],
                    "Keeps us safe",
                ),
                r(
                    "Firefighter",
                    "👨‍🚒",
                    &["Puts out fires", "Fixes teeth", "Grows food", "Drives bus"],
                    "Puts out fires",
                ),
                r(
                    "Chef",
                    "👨‍🍳",
                    &["Cooks food", "Keeps us safe", "Teaches students", "Delivers mail"],
                    "Cooks food",
                ),
                r(
                    "Mail Carrier",
                    "📬",
                    &["Delivers mail", "Puts out fires", "Helps sick people", "Fixes cars"],
                    "Delivers mail",
                ),
            ],
            feelings: vec![
                r("Happy", "😊", &["Happy", "Sad", "Angry", "Scared"], "Happy"),
                r("Sad", "😢", &["Sad", "Happy", "Silly", "Surprised"], "Sad"),
                r("Angry", "😠", &["Angry", "Happy", "Tired", "Calm"], "Angry"),
                r("Scared", "😱", &["Scared", "Brave", "Happy", "Calm"], "Scared"),
                r("Tired", "😴", &["Tired", "Excited", "Happy", "Angry"], "Tired"),
                r("Loved", "🤗", &["Loved", "Lonely", "Angry", "Scared"], "Loved"),
            ],
            shapes: vec![
                r("Circle", "⚪", &["Circle", "Square", "Triangle"], "Circle"),
                r("Square", "⬜", &["Circle", "Square", "Triangle"], "Square"),
                r("Triangle", "🔺", &["Circle", "Square", "Triangle"], "Triangle"),
            ],
            health: vec![
                r("Salad", "🥗", &["Healthy", "Not Healthy"], "Healthy"),
                r("Apple", "🍎", &["Healthy", "Not Healthy"], "Healthy"),
                r("Pizza", "🍕", &["Healthy", "Not Healthy"], "Not Healthy"),
                r("Broccoli", "🥦", &["Healthy", "Not Healthy"], "Healthy"),
                r("Candy", "🍭", &["Healthy", "Not Healthy"], "Not Healthy"),
                r("Carrot", "🥕", &["Healthy", "Not Healthy"], "Healthy"),
                r("Burger", "🍔", &["Healthy", "Not Healthy"], "Not Healthy"),
                r("Banana", "🍌", &["Healthy", "Not Healthy"], "Healthy"),
            ],
            study_hall: vec![
                r("What letter is this: A", "🎈", &["A", "B", "C", "D"], "A"),
                r("2 + 1 = ?", "🍎", &["2", "3", "4", "5"], "3"),
                r(
                    "What sound does a dog make?",
                    "🔊",
                    &["Woof!", "Meow!", "Moo!", "Quack!"],
                    "Woof!",
                ),
                r(
                    "Who teaches students?",
                    "👥",
                    &["Teacher", "Doctor", "Chef", "Police"],
                    "Teacher",
                ),
                r("This face is:", "😊", &["Happy", "Sad", "Angry", "Scared"], "Happy"),
                r(
                    "We use this to write:",
                    "✏️",
                    &["Pencil", "Spoon", "Ball", "Shoe"],
                    "Pencil",
                ),
                r(
                    "What color is the sky?",
                    "🎨",
                    &["Blue", "Red", "Green", "Yellow"],
                    "Blue",
                ),
                r(
                    "We play drums by:",
                    "🎵",
                    &["Tapping", "Throwing", "Eating", "Sitting"],
                    "Tapping",
                ),
                r("A ball is a:", "⬜", &["Circle", "Square", "Triangle", "Star"], "Circle"),
                r(
                    "Which is healthy?",
                    "🥗",
                    &["Apple", "Candy", "Soda", "Cake"],
                    "Apple",
                ),
                r(
                    "Running is good for:",
                    "🏃",
                    &["Exercise", "Sleeping", "Reading", "Eating"],
                    "Exercise",
                ),
                r(
                    "We wear these on our feet:",
                    "👕",
                    &["Shoes", "Hats", "Gloves", "Pants"],
                    "Shoes",
                ),
            ],
        }
    }
}

/// Quiz lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Intro,
    Question,
    Results,
}

/// One run of a choice game. Rounds and options may be shuffled, but every
/// index the game reports refers to the ORIGINAL curriculum order, so the
/// host's text lookup never depends on the shuffle.
pub struct QuizGame {
    rounds: Vec<ChoiceRound>,
    round_order: Vec<usize>,
    option_orders: Vec<Vec<usize>>,
    current: usize,
    score: u32,
    phase: QuizPhase,
    last_correct: Option<bool>,
}

impl QuizGame {
    pub fn new(rounds: &[ChoiceRound]) -> Self {
        Self {
            rounds: rounds.to_vec(),
            round_order: (0..rounds.len()).collect(),
            option_orders: rounds
                .iter()
                .map(|r| (0..r.options.len()).collect())
                .collect(),
            current: 0,
            score: 0,
            phase: QuizPhase::Intro,
            last_correct: None,
        }
    }

    /// Leave the intro, optionally shuffling round order, option order, or
    /// both, and optionally capping the number of rounds played.
    pub fn start(
        &mut self,
        rng: &mut Rng,
        shuffle_rounds: bool,
        shuffle_options: bool,
        round_cap: Option<usize>,
    ) {
        self.round_order = (0..self.rounds.len()).collect();
        if shuffle_rounds {
            rng.shuffle(&mut self.round_order);
        }
        if let Some(cap) = round_cap {
            self.round_order.truncate(cap);
        }
        self.option_orders = self
            .rounds
            .iter()
            .map(|r| {
                let mut order: Vec<usize> = (0..r.options.len()).collect();
                if shuffle_options {
                    rng.shuffle(&mut order);
                }
                order
            })
            .collect();
        self.current = 0;
        self.score = 0;
        self.last_correct = None;
        self.phase = if self.round_order.is_empty() {
            QuizPhase::Results
        } else {
            QuizPhase::Question
        };
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// Number of rounds in this run.
    pub fn total_rounds(&self) -> usize {
        self.round_order.len()
    }

    /// Zero-based position of the current round within the run.
    pub fn round_number(&self) -> usize {
        self.current
    }

    /// Index of the current round in the original curriculum.
    pub fn original_round_index(&self) -> usize {
        self.round_order[self.current]
    }

    /// The current round's content.
    pub fn round(&self) -> Option<&ChoiceRound> {
        if self.phase != QuizPhase::Question {
            return None;
        }
        self.rounds.get(self.round_order[self.current])
    }

    /// Options in display order as (original option index, text).
    pub fn options(&self) -> Vec<(usize, &str)> {
        match self.round() {
            Some(round) => {
                let order = &self.option_orders[self.round_order[self.current]];
                order
                    .iter()
                    .map(|&oi| (oi, round.options[oi].as_str()))
                    .collect()
            }
            None => Vec::new(),
        }
    }

    /// Answer with an ORIGINAL option index. Returns whether it was correct
    /// and advances to the next round (or the results).
    pub fn answer(&mut self, original_option: usize) -> bool {
        let round = match self.round() {
            Some(r) => r,
            None => return false,
        };
        let correct = round
            .options
            .get(original_option)
            .map(|o| *o == round.answer)
            .unwrap_or(false);

        if correct {
            self.score += 1;
        }
        self.last_correct = Some(correct);

        if self.current + 1 >= self.round_order.len() {
            self.phase = QuizPhase::Results;
        } else {
            self.current += 1;
        }
        correct
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Whether the previous answer was correct (feedback display).
    pub fn last_correct(&self) -> Option<bool> {
        self.last_correct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_bank_covers_all_quiz_subjects() {
        let bank = QuizBank::standard();
        assert_eq!(bank.reading.len(), 5);
        assert_eq!(bank.science.len(), 5);
        assert_eq!(bank.social_studies.len(), 6);
        assert_eq!(bank.feelings.len(), 6);
        assert_eq!(bank.shapes.len(), 3);
        assert_eq!(bank.health.len(), 8);
        assert_eq!(bank.study_hall.len(), 12);
        for subject in [
            Subject::Reading,
            Subject::Science,
            Subject::SocialStudies,
            Subject::Feelings,
            Subject::Shapes,
            Subject::Health,
            Subject::StudyHall,
        ] {
            assert!(bank.rounds_for(subject).is_some(), "{subject:?}");
        }
        assert!(bank.rounds_for(Subject::Writing).is_none());
    }

    #[test]
    fn every_round_contains_its_answer() {
        let bank = QuizBank::standard();
        for subject in Subject::ALL {
            let Some(rounds) = bank.rounds_for(subject) else {
                continue;
            };
            for round in rounds {
                assert!(
                    round.options.iter().any(|o| *o == round.answer),
                    "{subject:?}: answer {:?} missing from options",
                    round.answer
                );
            }
        }
    }

    #[test]
    fn parse_curriculum_json() {
        let json = r#"{
            "reading": [
                { "prompt": "CAT", "display": "🐱", "options": ["CAT", "DOG"], "answer": "CAT" }
            ],
            "science": [],
            "social-studies": [],
            "feelings": [],
            "shapes": [],
            "health": [],
            "study-hall": []
        }"#;
        let bank = QuizBank::from_json(json).unwrap();
        assert_eq!(bank.reading.len(), 1);
        assert_eq!(bank.reading[0].answer, "CAT");
    }

    #[test]
    fn malformed_curriculum_is_an_error() {
        assert!(QuizBank::from_json("{\"reading\": 5}").is_err());
    }

    #[test]
    fn correct_answers_score_and_advance() {
        let bank = QuizBank::standard();
        let mut game = QuizGame::new(&bank.science);
        let mut rng = Rng::new(3);
        game.start(&mut rng, false, false, None);

        assert_eq!(game.phase(), QuizPhase::Question);
        for _ in 0..5 {
            let round = game.round().unwrap();
            let answer_idx = round
                .options
                .iter()
                .position(|o| *o == round.answer)
                .unwrap();
            assert!(game.answer(answer_idx));
        }
        assert_eq!(game.phase(), QuizPhase::Results);
        assert_eq!(game.score(), 5);
    }

    #[test]
    fn wrong_answer_does_not_score() {
        let bank = QuizBank::standard();
        let mut game = QuizGame::new(&bank.feelings);
        let mut rng = Rng::new(3);
        game.start(&mut rng, false, false, None);

        let round = game.round().unwrap();
        let wrong_idx = round
            .options
            .iter()
            .position(|o| *o != round.answer)
            .unwrap();
        assert!(!game.answer(wrong_idx));
        assert_eq!(game.score(), 0);
        assert_eq!(game.last_correct(), Some(false));
        assert_eq!(game.round_number(), 1);
    }

    #[test]
    fn shuffled_options_keep_original_indices() {
        let bank = QuizBank::standard();
        let mut game = QuizGame::new(&bank.reading);
        let mut rng = Rng::new(1234);
        game.start(&mut rng, true, true, None);

        for _ in 0..game.total_rounds() {
            let round = game.round().unwrap().clone();
            let options = game.options();
            assert_eq!(options.len(), round.options.len());
            // Display order may differ, but each entry maps back to the
            // original text, and answering by original index is exact.
            for (original, text) in &options {
                assert_eq!(round.options[*original], *text);
            }
            let (answer_original, _) = *options
                .iter()
                .find(|(oi, _)| round.options[*oi] == round.answer)
                .unwrap();
            assert!(game.answer(answer_original));
        }
        assert_eq!(game.score() as usize, game.total_rounds());
    }

    #[test]
    fn round_cap_limits_the_run() {
        let bank = QuizBank::standard();
        let mut game = QuizGame::new(&bank.study_hall);
        let mut rng = Rng::new(9);
        game.start(&mut rng, true, true, Some(4));
        assert_eq!(game.total_rounds(), 4);
    }
}
