use wasm_bindgen::prelude::*;

mod art;
mod game;
mod letters;
mod life_skills;
mod math;
mod music;
mod pe;
mod progress;
mod quiz;
mod trace;
mod writing;

use chalk_engine::InputEvent;
use game::SchoolDay;

pub use game::{action, custom, event, sound, widget_kind};
pub use letters::{LetterBank, LetterTemplate, Stroke};
pub use progress::{DayProgress, DayStamp, Subject};
pub use quiz::QuizBank;
pub use trace::{TraceConfig, TraceSession, TraceTick};

chalk_web::export_game!(SchoolDay, "schoolday", vectors);

/// Replace the built-in quiz curriculum with the host's JSON document (the
/// same document the shell uses to render prompt and option text).
#[wasm_bindgen]
pub fn game_load_curriculum(json: &str) {
    with_runner(|r| r.game_mut().load_curriculum(json));
}
