//! Letter tracing — the writing game.
//!
//! Ten shuffled letters per run. Each letter is one tracing session; a
//! completed trace shows a preview of the child's letter before moving on,
//! a skipped letter counts against the pass mark. Eight of ten passes the
//! subject.

use chalk_engine::Rng;
use glam::Vec2;

use crate::letters::{LetterBank, LetterTemplate};
use crate::trace::{TraceConfig, TraceSession, TraceTick};

pub const LETTERS_PER_GAME: usize = 10;
/// 80% — 8 of 10 letters.
pub const PASS_THRESHOLD: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritingPhase {
    Intro,
    /// Actively tracing the current letter.
    Tracing,
    /// Showing the finished drawing before the next letter.
    Preview,
    Results,
}

/// One run of the writing game.
pub struct WritingGame {
    phase: WritingPhase,
    letters: Vec<LetterTemplate>,
    index: usize,
    passed: Vec<bool>,
    session: TraceSession,
}

impl WritingGame {
    pub fn new(canvas_size: f32, config: TraceConfig) -> Self {
        // Placeholder session until start() draws the letters.
        let bank = LetterBank::standard();
        let first = bank.iter().next().expect("bank is never empty").clone();
        Self {
            phase: WritingPhase::Intro,
            letters: Vec::new(),
            index: 0,
            passed: Vec::new(),
            session: TraceSession::new(first, canvas_size, config),
        }
    }

    /// Draw ten letters and begin tracing the first.
    pub fn start(&mut self, bank: &LetterBank, rng: &mut Rng) {
        self.letters = bank.shuffled_draw(LETTERS_PER_GAME, rng);
        self.passed = vec![false; self.letters.len()];
        self.index = 0;
        self.session.reset(self.letters[0].clone());
        self.phase = WritingPhase::Tracing;
    }

    pub fn phase(&self) -> WritingPhase {
        self.phase
    }

    /// The session for the letter being traced (rendering reads it).
    pub fn session(&self) -> &TraceSession {
        &self.session
    }

    /// Zero-based letter number within the run.
    pub fn letter_number(&self) -> usize {
        self.index
    }

    pub fn total_letters(&self) -> usize {
        self.letters.len()
    }

    /// The letter currently on the easel.
    pub fn current_letter(&self) -> char {
        self.session.template().letter
    }

    pub fn passed_count(&self) -> usize {
        self.passed.iter().filter(|&&p| p).count()
    }

    /// Whether the run met the pass mark.
    pub fn passed_game(&self) -> bool {
        self.passed_count() as f32 >= self.letters.len() as f32 * PASS_THRESHOLD
    }

    // ---- Touch routing (canvas-local coordinates) ----

    pub fn pointer_down(&mut self, pos: Vec2) {
        if self.phase == WritingPhase::Tracing {
            self.session.pointer_down(pos);
        }
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        if self.phase == WritingPhase::Tracing {
            self.session.pointer_move(pos);
        }
    }

    /// Returns whether the lift armed the "try again" display.
    pub fn pointer_up(&mut self) -> bool {
        if self.phase == WritingPhase::Tracing {
            self.session.pointer_up()
        } else {
            false
        }
    }

    pub fn pointer_cancel(&mut self) -> bool {
        if self.phase == WritingPhase::Tracing {
            self.session.pointer_cancel()
        } else {
            false
        }
    }

    /// Advance the session clock. On letter completion the current letter
    /// is marked passed and the preview appears.
    pub fn tick(&mut self, dt: f32) -> TraceTick {
        if self.phase != WritingPhase::Tracing {
            return TraceTick::default();
        }
        let tick = self.session.tick(dt);
        if tick.completed {
            self.passed[self.index] = true;
            self.phase = WritingPhase::Preview;
        }
        tick
    }

    /// Leave the preview for the next letter, or the results after the last.
    pub fn next_letter(&mut self) {
        if self.phase != WritingPhase::Preview {
            return;
        }
        self.advance();
    }

    /// Give up on the current letter. It stays failed; the run moves on.
    pub fn skip_letter(&mut self) {
        if self.phase != WritingPhase::Tracing {
            return;
        }
        self.passed[self.index] = false;
        self.advance();
    }

    fn advance(&mut self) {
        if self.index + 1 >= self.letters.len() {
            self.phase = WritingPhase::Results;
        } else {
            self.index += 1;
            self.session.reset(self.letters[self.index].clone());
            self.phase = WritingPhase::Tracing;
        }
    }

    /// Start the whole run over (the results screen's "try again").
    pub fn try_again(&mut self, bank: &LetterBank, rng: &mut Rng) {
        self.start(bank, rng);
    }
}
