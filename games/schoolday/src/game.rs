use chalk_engine::api::game::GameConfig;
use chalk_engine::input::queue::{InputEvent, InputQueue};
use chalk_engine::{
    widget_state, DelayTimer, Easing, EngineContext, Entity, EntityId, Game, GameEvent, InkColor,
    Rng, SoundEvent, Tween, WidgetComponent,
};
use glam::Vec2;

use crate::art::{palette_rgb, ColoringGame, ColoringPhase, GRID, PALETTE};
use crate::letters::LetterBank;
use crate::life_skills::{OutfitGame, OutfitPhase};
use crate::math::{CountingGame, CountingPhase};
use crate::music::{RhythmGame, RhythmPhase};
use crate::pe::{ExerciseGame, ExercisePhase};
use crate::progress::{DayProgress, DayStamp, Subject};
use crate::quiz::{QuizBank, QuizGame, QuizPhase};
use crate::trace::TraceConfig;
use crate::writing::{WritingGame, WritingPhase};

/// Square app canvas side in pixels.
pub const WORLD: f32 = 480.0;
/// Square tracing easel side, positioned inside the app canvas.
pub const EASEL_SIZE: f32 = 400.0;
/// Top-left corner of the tracing easel.
pub const EASEL_ORIGIN: Vec2 = Vec2::new(40.0, 56.0);

const FIXED_DT: f32 = 1.0 / 60.0;

/// Widget kind codes shared with the TypeScript renderer.
pub mod widget_kind {
    pub const DOOR: u32 = 1;
    pub const BOOK: u32 = 2;
    pub const BUTTON: u32 = 3;
    pub const BANNER: u32 = 4;
    pub const OPTION: u32 = 5;
    pub const EASEL: u32 = 6;
    pub const STICKER: u32 = 7;
    pub const PROGRESS: u32 = 8;
    pub const DRUM: u32 = 9;
    pub const ITEM: u32 = 10;
    pub const SWATCH: u32 = 11;
    pub const PICTURE: u32 = 12;
    pub const MOVE: u32 = 13;
}

/// Button action codes (BUTTON widget `value`).
pub mod action {
    pub const START: u32 = 1;
    pub const NEXT: u32 = 2;
    pub const SKIP: u32 = 3;
    pub const COMPLETE: u32 = 4;
    pub const TRY_AGAIN: u32 = 5;
    pub const BACK: u32 = 6;
    pub const DONE: u32 = 7;
    pub const MOVE_DONE: u32 = 8;
    pub const PICK_STICKER: u32 = 9;
    pub const FINISH_PAINTING: u32 = 10;
}

/// Sound cue ids mapped by the TypeScript SoundManager.
pub mod sound {
    pub const TAP: u32 = 1;
    pub const CORRECT: u32 = 2;
    pub const WRONG: u32 = 3;
    pub const CHEER: u32 = 4;
    pub const STICKER: u32 = 5;
    pub const DRUM: u32 = 6;
}

/// Outbound game event kinds.
pub mod event {
    pub const SCREEN: u32 = 1;
    pub const PROGRESS: u32 = 2;
    pub const LETTER_DONE: u32 = 3;
    pub const TRACE_MISS: u32 = 4;
    pub const SUBJECT_DONE: u32 = 5;
    pub const DAY_DONE: u32 = 6;
    pub const SPEAK: u32 = 7;
    pub const ANSWER: u32 = 8;
}

/// Inbound custom event kinds (host UI layer).
pub mod custom {
    pub const SET_DATE: u32 = 1;
    pub const SET_SEED: u32 = 2;
    pub const RESET_PROGRESS: u32 = 3;
}

/// End-of-day sticker choices, indexed on the wire.
pub const DAY_STICKERS: [&str; 8] = ["🌟", "⭐", "🏆", "🎉", "🌈", "🦄", "🚀", "🍦"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Entrance,
    Locker,
    Subject(Subject),
    StickerPick,
}

impl Screen {
    fn wire_id(self) -> f32 {
        match self {
            Screen::Entrance => 0.0,
            Screen::Locker => 1.0,
            Screen::Subject(s) => 2.0 + s.index() as f32,
            Screen::StickerPick => 15.0,
        }
    }
}

/// The mini-game currently hosted by a subject screen.
enum Activity {
    Writing(WritingGame),
    Quiz(QuizGame),
    Counting(CountingGame),
    Coloring(ColoringGame),
    Rhythm(RhythmGame),
    Exercise(ExerciseGame),
    Outfit(OutfitGame),
}

/// The school-day simulator: entrance, locker, thirteen subject games, and
/// the end-of-day sticker.
pub struct SchoolDay {
    screen: Screen,
    progress: DayProgress,
    letter_bank: LetterBank,
    quiz_bank: QuizBank,
    rng: Rng,
    activity: Option<Activity>,
    /// Whether the current touch is being routed to the tracing easel.
    easel_touch: bool,
    /// Deferred navigation (door bounce plays out first).
    pending_nav: Option<Screen>,
    nav_timer: DelayTimer,
    scene_dirty: bool,
}

impl SchoolDay {
    pub fn new() -> Self {
        Self {
            screen: Screen::Entrance,
            progress: DayProgress::new(),
            letter_bank: LetterBank::standard(),
            quiz_bank: QuizBank::standard(),
            rng: Rng::new(0x5eed),
            activity: None,
            easel_touch: false,
            pending_nav: None,
            nav_timer: DelayTimer::new(),
            scene_dirty: true,
        }
    }

    /// Replace the built-in quiz curriculum with host-supplied JSON.
    /// Malformed documents are logged and ignored.
    pub fn load_curriculum(&mut self, json: &str) {
        match QuizBank::from_json(json) {
            Ok(bank) => {
                self.quiz_bank = bank;
                log::info!("curriculum loaded");
            }
            Err(err) => log::warn!("curriculum rejected: {err}"),
        }
    }

    /// Today's progress (exposed for the persistence hooks and tests).
    pub fn progress(&self) -> &DayProgress {
        &self.progress
    }

    // ---- Navigation ----

    fn go_to(&mut self, ctx: &mut EngineContext, screen: Screen) {
        self.screen = screen;
        self.activity = match screen {
            Screen::Subject(subject) => Some(self.make_activity(subject)),
            _ => None,
        };
        self.easel_touch = false;
        ctx.clear_screen();
        self.scene_dirty = true;
        ctx.emit_event(GameEvent::new(event::SCREEN, screen.wire_id(), 0.0, 0.0));
    }

    fn make_activity(&mut self, subject: Subject) -> Activity {
        match subject {
            Subject::Writing => Activity::Writing(WritingGame::new(
                EASEL_SIZE,
                TraceConfig::default(),
            )),
            Subject::Math => Activity::Counting(CountingGame::new()),
            Subject::Art => Activity::Coloring(ColoringGame::new()),
            Subject::Music => Activity::Rhythm(RhythmGame::new()),
            Subject::Pe => Activity::Exercise(ExerciseGame::new()),
            Subject::LifeSkills => Activity::Outfit(OutfitGame::new()),
            quiz_subject => {
                let rounds = self
                    .quiz_bank
                    .rounds_for(quiz_subject)
                    .expect("non-quiz subjects handled above");
                Activity::Quiz(QuizGame::new(rounds))
            }
        }
    }

    fn complete_current_subject(&mut self, ctx: &mut EngineContext) {
        if let Screen::Subject(subject) = self.screen {
            self.progress.complete_subject(subject);
            ctx.emit_sound(SoundEvent(sound::CHEER));
            ctx.emit_event(GameEvent::new(
                event::SUBJECT_DONE,
                subject.index() as f32,
                0.0,
                0.0,
            ));
            self.go_to(ctx, Screen::Locker);
            ctx.effects.burst([WORLD * 0.5, WORLD * 0.4], 36);
        }
    }

    // ---- Input routing ----

    fn handle_custom(&mut self, ctx: &mut EngineContext, kind: u32, a: f32, b: f32, c: f32) {
        match kind {
            custom::SET_DATE => {
                self.progress
                    .set_today(DayStamp::new(a as u16, b as u8, c as u8));
                self.scene_dirty = true;
            }
            custom::SET_SEED => {
                let seed = (a as u32 as u64) | ((b as u32 as u64) << 32);
                self.rng = Rng::new(seed);
            }
            custom::RESET_PROGRESS => {
                self.progress.reset();
                self.scene_dirty = true;
            }
            _ => log::warn!("unknown custom event kind {kind}"),
        }
    }

    fn handle_pointer_down(&mut self, ctx: &mut EngineContext, pos: Vec2) {
        // Tracing easel steals touches while a letter is on it.
        if let (Screen::Subject(Subject::Writing), Some(Activity::Writing(writing))) =
            (self.screen, self.activity.as_mut())
        {
            if writing.phase() == WritingPhase::Tracing && easel_contains(pos) {
                self.easel_touch = true;
                writing.pointer_down(pos - EASEL_ORIGIN);
                return;
            }
        }

        // Art grid paints without widgets.
        if let (Screen::Subject(Subject::Art), Some(Activity::Coloring(coloring))) =
            (self.screen, self.activity.as_mut())
        {
            if coloring.phase() == ColoringPhase::Painting {
                if let Some((row, col)) = art_cell_at(pos) {
                    coloring.paint(row, col);
                    ctx.emit_sound(SoundEvent(sound::TAP));
                    return;
                }
            }
        }

        if let Some(id) = ctx.scene.hit_test(pos) {
            self.handle_widget_tap(ctx, id);
        }
    }

    fn handle_pointer_move(&mut self, pos: Vec2) {
        if !self.easel_touch {
            return;
        }
        if let Some(Activity::Writing(writing)) = self.activity.as_mut() {
            writing.pointer_move(pos - EASEL_ORIGIN);
        }
    }

    fn handle_pointer_up(&mut self, ctx: &mut EngineContext, cancelled: bool) {
        if !self.easel_touch {
            return;
        }
        self.easel_touch = false;
        if let Some(Activity::Writing(writing)) = self.activity.as_mut() {
            let missed = if cancelled {
                writing.pointer_cancel()
            } else {
                writing.pointer_up()
            };
            if missed {
                ctx.emit_sound(SoundEvent(sound::WRONG));
                ctx.emit_event(GameEvent::new(event::TRACE_MISS, 0.0, 0.0, 0.0));
            }
        }
    }

    fn handle_widget_tap(&mut self, ctx: &mut EngineContext, id: EntityId) {
        let widget = match ctx.scene.get(id).and_then(|e| e.widget.as_ref()) {
            Some(w) => (w.kind, w.value),
            None => return,
        };
        let (kind, value) = widget;

        match kind {
            widget_kind::DOOR => {
                ctx.emit_sound(SoundEvent(sound::TAP));
                if let Some(door) = ctx.scene.get(id) {
                    let size = door.size;
                    ctx.tweens.add(
                        id,
                        Tween::size(size * 0.95, size, 0.2, Easing::BackOut),
                    );
                }
                self.pending_nav = Some(Screen::Locker);
                self.nav_timer.start(0.2);
            }
            widget_kind::BOOK => {
                ctx.emit_sound(SoundEvent(sound::TAP));
                if let Some(subject) = Subject::from_index(value as usize) {
                    self.go_to(ctx, Screen::Subject(subject));
                }
            }
            widget_kind::BUTTON => self.handle_button(ctx, value as u32),
            widget_kind::OPTION => self.handle_option(ctx, value as usize),
            widget_kind::DRUM => {
                if let Some(Activity::Rhythm(rhythm)) = self.activity.as_mut() {
                    ctx.emit_sound(SoundEvent(sound::DRUM));
                    if rhythm.tap() {
                        ctx.emit_sound(SoundEvent(sound::CORRECT));
                    }
                    self.scene_dirty = true;
                }
            }
            widget_kind::ITEM => {
                if let Some(Activity::Outfit(outfit)) = self.activity.as_mut() {
                    ctx.emit_sound(SoundEvent(sound::TAP));
                    outfit.toggle(value as usize);
                    self.scene_dirty = true;
                }
            }
            widget_kind::SWATCH => {
                if let Some(Activity::Coloring(coloring)) = self.activity.as_mut() {
                    ctx.emit_sound(SoundEvent(sound::TAP));
                    coloring.select_color(value as u8);
                    self.scene_dirty = true;
                }
            }
            widget_kind::PICTURE => {
                if let Some(Activity::Coloring(coloring)) = self.activity.as_mut() {
                    ctx.emit_sound(SoundEvent(sound::TAP));
                    coloring.start(value as usize);
                    self.scene_dirty = true;
                }
            }
            widget_kind::STICKER => {
                let index = value as usize;
                if let Some(&sticker) = DAY_STICKERS.get(index) {
                    self.progress.complete_day_with_sticker(sticker);
                    ctx.emit_sound(SoundEvent(sound::STICKER));
                    ctx.emit_event(GameEvent::new(event::DAY_DONE, index as f32, 0.0, 0.0));
                    self.go_to(ctx, Screen::Locker);
                    ctx.effects.burst([WORLD * 0.5, WORLD * 0.35], 48);
                }
            }
            _ => {}
        }
    }

    fn handle_button(&mut self, ctx: &mut EngineContext, act: u32) {
        ctx.emit_sound(SoundEvent(sound::TAP));
        match act {
            action::START => self.start_activity(ctx),
            action::NEXT => {
                if let Some(Activity::Writing(writing)) = self.activity.as_mut() {
                    writing.next_letter();
                    if writing.phase() == WritingPhase::Tracing {
                        self.speak_current_letter(ctx);
                    }
                    self.scene_dirty = true;
                }
            }
            action::SKIP => {
                if let Some(Activity::Writing(writing)) = self.activity.as_mut() {
                    writing.skip_letter();
                    if writing.phase() == WritingPhase::Tracing {
                        self.speak_current_letter(ctx);
                    }
                    self.scene_dirty = true;
                }
            }
            action::COMPLETE => self.complete_current_subject(ctx),
            action::TRY_AGAIN => {
                if let Some(Activity::Writing(writing)) = self.activity.as_mut() {
                    writing.try_again(&self.letter_bank, &mut self.rng);
                    self.speak_current_letter(ctx);
                    self.scene_dirty = true;
                }
            }
            action::BACK => {
                let target = match self.screen {
                    Screen::Locker => Screen::Entrance,
                    _ => Screen::Locker,
                };
                self.go_to(ctx, target);
            }
            action::DONE => {
                if let Some(Activity::Outfit(outfit)) = self.activity.as_mut() {
                    let correct = outfit.done(&mut self.rng);
                    ctx.emit_sound(SoundEvent(if correct {
                        sound::CORRECT
                    } else {
                        sound::WRONG
                    }));
                    self.scene_dirty = true;
                }
            }
            action::MOVE_DONE => {
                if let Some(Activity::Exercise(exercise)) = self.activity.as_mut() {
                    if exercise.move_done() {
                        ctx.emit_sound(SoundEvent(sound::CORRECT));
                    }
                    self.scene_dirty = true;
                }
            }
            action::PICK_STICKER => self.go_to(ctx, Screen::StickerPick),
            action::FINISH_PAINTING => {
                if let Some(Activity::Coloring(coloring)) = self.activity.as_mut() {
                    coloring.finish();
                    self.scene_dirty = true;
                }
            }
            _ => log::warn!("unknown button action {act}"),
        }
    }

    fn start_activity(&mut self, ctx: &mut EngineContext) {
        match self.activity.as_mut() {
            Some(Activity::Writing(writing)) => {
                writing.start(&self.letter_bank, &mut self.rng);
                self.speak_current_letter(ctx);
            }
            Some(Activity::Quiz(quiz)) => {
                let (shuffle_rounds, cap) = match self.screen {
                    Screen::Subject(Subject::Feelings) => (true, None),
                    Screen::Subject(Subject::StudyHall) => (true, Some(12)),
                    _ => (false, None),
                };
                quiz.start(&mut self.rng, shuffle_rounds, true, cap);
                self.speak_quiz_prompt(ctx);
            }
            Some(Activity::Counting(counting)) => counting.start(&mut self.rng),
            Some(Activity::Rhythm(rhythm)) => rhythm.start(),
            Some(Activity::Exercise(exercise)) => exercise.start(),
            Some(Activity::Outfit(outfit)) => outfit.start(&mut self.rng),
            // Art starts from the picture picker, not a start button.
            Some(Activity::Coloring(_)) | None => {}
        }
        self.scene_dirty = true;
    }

    fn handle_option(&mut self, ctx: &mut EngineContext, value: usize) {
        match self.activity.as_mut() {
            Some(Activity::Quiz(quiz)) => {
                let correct = quiz.answer(value);
                ctx.emit_sound(SoundEvent(if correct { sound::CORRECT } else { sound::WRONG }));
                ctx.emit_event(GameEvent::new(
                    event::ANSWER,
                    if correct { 1.0 } else { 0.0 },
                    value as f32,
                    0.0,
                ));
                if quiz.phase() == QuizPhase::Question {
                    self.speak_quiz_prompt(ctx);
                }
                self.scene_dirty = true;
            }
            Some(Activity::Counting(counting)) => {
                let correct = counting.answer(value as u32, &mut self.rng);
                ctx.emit_sound(SoundEvent(if correct { sound::CORRECT } else { sound::WRONG }));
                ctx.emit_event(GameEvent::new(
                    event::ANSWER,
                    if correct { 1.0 } else { 0.0 },
                    value as f32,
                    0.0,
                ));
                self.scene_dirty = true;
            }
            _ => {}
        }
    }

    /// Ask the shell's speech synthesis to say the current letter.
    fn speak_current_letter(&mut self, ctx: &mut EngineContext) {
        if let Some(Activity::Writing(writing)) = self.activity.as_ref() {
            let letter = writing.current_letter();
            ctx.emit_event(GameEvent::new(event::SPEAK, letter as u32 as f32, 0.0, 0.0));
        }
    }

    /// Ask the shell to read the current quiz prompt (reading game says the
    /// word out loud; payload is (subject, original round index)).
    fn speak_quiz_prompt(&mut self, ctx: &mut EngineContext) {
        if let (Screen::Subject(subject), Some(Activity::Quiz(quiz))) =
            (self.screen, self.activity.as_ref())
        {
            if subject == Subject::Reading && quiz.phase() == QuizPhase::Question {
                ctx.emit_event(GameEvent::new(
                    event::SPEAK,
                    0.0,
                    subject.index() as f32,
                    quiz.original_round_index() as f32,
                ));
            }
        }
    }

    // ---- Per-tick work ----

    fn tick_writing(&mut self, ctx: &mut EngineContext) {
        let Some(Activity::Writing(writing)) = self.activity.as_mut() else {
            return;
        };

        let tick = writing.tick(FIXED_DT);
        if let Some(progress) = tick.progress {
            ctx.emit_event(GameEvent::new(event::PROGRESS, progress, 0.0, 0.0));
        }
        if tick.completed {
            let letter = writing.current_letter();
            ctx.emit_sound(SoundEvent(sound::CHEER));
            ctx.emit_event(GameEvent::new(
                event::LETTER_DONE,
                letter as u32 as f32,
                0.0,
                0.0,
            ));
            ctx.effects
                .burst([EASEL_ORIGIN.x + EASEL_SIZE * 0.5, EASEL_ORIGIN.y + EASEL_SIZE * 0.4], 24);
            self.scene_dirty = true;
        }
    }

    fn tick_navigation(&mut self, ctx: &mut EngineContext) {
        if self.nav_timer.tick(FIXED_DT) {
            if let Some(target) = self.pending_nav.take() {
                self.go_to(ctx, target);
            }
        }
    }
}

impl Default for SchoolDay {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SchoolDay {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: FIXED_DT,
            canvas_size: WORLD,
            max_widgets: 64,
            max_ink_vertices: 16384,
            max_effects_vertices: 4096,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        log::info!("schoolday initialized");
        self.go_to(ctx, Screen::Entrance);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter().copied().collect::<Vec<_>>() {
            match event {
                InputEvent::Custom { kind, a, b, c } => self.handle_custom(ctx, kind, a, b, c),
                InputEvent::PointerDown { x, y } => {
                    self.handle_pointer_down(ctx, Vec2::new(x, y));
                }
                InputEvent::PointerMove { x, y } => self.handle_pointer_move(Vec2::new(x, y)),
                InputEvent::PointerUp { .. } => self.handle_pointer_up(ctx, false),
                InputEvent::PointerCancel => self.handle_pointer_up(ctx, true),
            }
        }

        self.tick_writing(ctx);
        self.tick_navigation(ctx);

        if self.scene_dirty {
            self.scene_dirty = false;
            self.rebuild_scene(ctx);
        }

        self.draw_ink(ctx);
    }

    fn save_state(&self) -> Option<String> {
        match self.progress.to_json() {
            Ok(blob) => Some(blob),
            Err(err) => {
                log::warn!("progress serialization failed: {err}");
                None
            }
        }
    }

    fn load_state(&mut self, blob: &str) {
        match DayProgress::from_json(blob, self.progress.today()) {
            Ok(progress) => {
                self.progress = progress;
                self.scene_dirty = true;
            }
            Err(err) => log::warn!("saved progress rejected: {err}"),
        }
    }
}

/// Whether a point falls on the tracing easel.
fn easel_contains(pos: Vec2) -> bool {
    pos.x >= EASEL_ORIGIN.x
        && pos.y >= EASEL_ORIGIN.y
        && pos.x <= EASEL_ORIGIN.x + EASEL_SIZE
        && pos.y <= EASEL_ORIGIN.y + EASEL_SIZE
}

// ---- Art grid layout ----

const ART_CELL: f32 = 40.0;
const ART_ORIGIN: Vec2 = Vec2::new(80.0, 90.0);

/// Map a canvas point to an art-grid cell.
fn art_cell_at(pos: Vec2) -> Option<(usize, usize)> {
    let local = pos - ART_ORIGIN;
    if local.x < 0.0 || local.y < 0.0 {
        return None;
    }
    let col = (local.x / ART_CELL) as usize;
    let row = (local.y / ART_CELL) as usize;
    if row < GRID && col < GRID {
        Some((row, col))
    } else {
        None
    }
}

// ---- Scene construction & ink drawing ----

impl SchoolDay {
    fn spawn(
        ctx: &mut EngineContext,
        tag: &str,
        pos: Vec2,
        size: Vec2,
        widget: WidgetComponent,
    ) -> EntityId {
        let id = ctx.next_id();
        ctx.scene
            .spawn(Entity::new(id).with_tag(tag).with_pos(pos).with_size(size).with_widget(widget));
        id
    }

    fn spawn_banner(ctx: &mut EngineContext, tag: &str, y: f32, value: f32) {
        Self::spawn(
            ctx,
            tag,
            Vec2::new(WORLD * 0.5, y),
            Vec2::new(WORLD, 48.0),
            WidgetComponent::new(widget_kind::BANNER)
                .with_value(value)
                .with_state(widget_state::DISABLED),
        );
    }

    fn spawn_button(ctx: &mut EngineContext, tag: &str, pos: Vec2, size: Vec2, act: u32) {
        Self::spawn(
            ctx,
            tag,
            pos,
            size,
            WidgetComponent::new(widget_kind::BUTTON).with_value(act as f32),
        );
    }

    fn rebuild_scene(&mut self, ctx: &mut EngineContext) {
        ctx.scene.clear();
        ctx.tweens.clear();
        match self.screen {
            Screen::Entrance => self.build_entrance(ctx),
            Screen::Locker => self.build_locker(ctx),
            Screen::StickerPick => self.build_sticker_pick(ctx),
            Screen::Subject(subject) => self.build_subject(ctx, subject),
        }
    }

    fn build_entrance(&mut self, ctx: &mut EngineContext) {
        Self::spawn_banner(ctx, "title", 60.0, 0.0);
        Self::spawn(
            ctx,
            "door",
            Vec2::new(WORLD * 0.5, WORLD * 0.62),
            Vec2::new(150.0, 200.0),
            WidgetComponent::new(widget_kind::DOOR),
        );
    }

    fn build_locker(&mut self, ctx: &mut EngineContext) {
        let completed = self.progress.completed_today().len();
        Self::spawn_banner(ctx, "header", 28.0, completed as f32);

        // Books grid: 4 columns.
        let cols = 4;
        let cell = Vec2::new(104.0, 86.0);
        let origin = Vec2::new(72.0, 96.0);
        for (i, &subject) in Subject::ALL.iter().enumerate() {
            let col = i % cols;
            let row = i / cols;
            let pos = origin + Vec2::new(col as f32 * cell.x, row as f32 * cell.y);
            let mut widget =
                WidgetComponent::new(widget_kind::BOOK).with_value(subject.index() as f32);
            if self.progress.is_completed_today(subject) {
                widget.set(widget_state::DONE);
            }
            Self::spawn(ctx, "book", pos, Vec2::new(92.0, 74.0), widget);
        }

        if self.progress.is_all_complete() && self.progress.todays_sticker().is_none() {
            Self::spawn_button(
                ctx,
                "pick-sticker",
                Vec2::new(WORLD * 0.5, WORLD - 88.0),
                Vec2::new(280.0, 48.0),
                action::PICK_STICKER,
            );
        }

        if let Some(sticker) = self.progress.todays_sticker() {
            let index = DAY_STICKERS
                .iter()
                .position(|&s| s == sticker)
                .unwrap_or_default();
            Self::spawn(
                ctx,
                "day-sticker",
                Vec2::new(WORLD * 0.5, WORLD - 88.0),
                Vec2::new(64.0, 64.0),
                WidgetComponent::new(widget_kind::STICKER)
                    .with_value(index as f32)
                    .with_state(widget_state::DISABLED | widget_state::DONE),
            );
        }

        Self::spawn_button(
            ctx,
            "back",
            Vec2::new(WORLD * 0.5, WORLD - 32.0),
            Vec2::new(220.0, 40.0),
            action::BACK,
        );
    }

    fn build_sticker_pick(&mut self, ctx: &mut EngineContext) {
        Self::spawn_banner(ctx, "header", 60.0, 0.0);
        let cols = 4;
        let origin = Vec2::new(108.0, 200.0);
        let cell = Vec2::new(88.0, 96.0);
        for (i, _) in DAY_STICKERS.iter().enumerate() {
            let col = i % cols;
            let row = i / cols;
            Self::spawn(
                ctx,
                "sticker",
                origin + Vec2::new(col as f32 * cell.x, row as f32 * cell.y),
                Vec2::new(72.0, 72.0),
                WidgetComponent::new(widget_kind::STICKER).with_value(i as f32),
            );
        }
    }

    fn build_subject(&mut self, ctx: &mut EngineContext, subject: Subject) {
        Self::spawn_banner(ctx, "header", 28.0, subject.index() as f32);
        Self::spawn_button(
            ctx,
            "back",
            Vec2::new(64.0, WORLD - 28.0),
            Vec2::new(100.0, 36.0),
            action::BACK,
        );

        match self.activity.as_ref() {
            Some(Activity::Writing(writing)) => self.build_writing(ctx, writing.phase()),
            Some(Activity::Quiz(quiz)) => {
                let phase = quiz.phase();
                self.build_quiz(ctx, phase);
            }
            Some(Activity::Counting(counting)) => {
                let phase = counting.phase();
                self.build_counting(ctx, phase);
            }
            Some(Activity::Coloring(coloring)) => {
                let phase = coloring.phase();
                self.build_coloring(ctx, phase);
            }
            Some(Activity::Rhythm(rhythm)) => {
                let phase = rhythm.phase();
                self.build_rhythm(ctx, phase);
            }
            Some(Activity::Exercise(exercise)) => {
                let phase = exercise.phase();
                self.build_exercise(ctx, phase);
            }
            Some(Activity::Outfit(outfit)) => {
                let phase = outfit.phase();
                self.build_outfit(ctx, phase);
            }
            None => {}
        }
    }

    fn spawn_intro(ctx: &mut EngineContext) {
        Self::spawn_banner(ctx, "intro", WORLD * 0.4, 0.0);
        Self::spawn_button(
            ctx,
            "start",
            Vec2::new(WORLD * 0.5, WORLD * 0.62),
            Vec2::new(220.0, 56.0),
            action::START,
        );
    }

    fn spawn_results(ctx: &mut EngineContext, score: f32) {
        Self::spawn_banner(ctx, "results", WORLD * 0.35, score);
        Self::spawn_button(
            ctx,
            "complete",
            Vec2::new(WORLD * 0.5, WORLD * 0.58),
            Vec2::new(260.0, 56.0),
            action::COMPLETE,
        );
    }

    fn build_writing(&self, ctx: &mut EngineContext, phase: WritingPhase) {
        let Some(Activity::Writing(writing)) = self.activity.as_ref() else {
            return;
        };
        match phase {
            WritingPhase::Intro => Self::spawn_intro(ctx),
            WritingPhase::Tracing => {
                // Letter banner carries the character code for the shell.
                Self::spawn(
                    ctx,
                    "letter",
                    Vec2::new(WORLD * 0.5, 40.0),
                    Vec2::new(120.0, 56.0),
                    WidgetComponent::new(widget_kind::BANNER)
                        .with_value(writing.current_letter() as u32 as f32)
                        .with_state(widget_state::DISABLED),
                );
                Self::spawn(
                    ctx,
                    "easel",
                    EASEL_ORIGIN + Vec2::splat(EASEL_SIZE * 0.5),
                    Vec2::splat(EASEL_SIZE),
                    WidgetComponent::new(widget_kind::EASEL).with_state(widget_state::DISABLED),
                );
                Self::spawn(
                    ctx,
                    "trace-progress",
                    Vec2::new(WORLD * 0.5, WORLD - 56.0),
                    Vec2::new(EASEL_SIZE, 18.0),
                    WidgetComponent::new(widget_kind::PROGRESS)
                        .with_value(writing.session().progress())
                        .with_state(widget_state::DISABLED),
                );
                Self::spawn_button(
                    ctx,
                    "skip",
                    Vec2::new(WORLD - 84.0, WORLD - 28.0),
                    Vec2::new(130.0, 36.0),
                    action::SKIP,
                );
            }
            WritingPhase::Preview => {
                Self::spawn(
                    ctx,
                    "preview",
                    Vec2::new(WORLD * 0.5, 40.0),
                    Vec2::new(WORLD, 56.0),
                    WidgetComponent::new(widget_kind::BANNER)
                        .with_value(writing.current_letter() as u32 as f32)
                        .with_state(widget_state::DISABLED | widget_state::DONE),
                );
                Self::spawn_button(
                    ctx,
                    "next",
                    Vec2::new(WORLD * 0.5, WORLD - 48.0),
                    Vec2::new(220.0, 52.0),
                    action::NEXT,
                );
            }
            WritingPhase::Results => {
                Self::spawn_banner(ctx, "results", WORLD * 0.3, writing.passed_count() as f32);
                if writing.passed_game() {
                    Self::spawn_button(
                        ctx,
                        "complete",
                        Vec2::new(WORLD * 0.5, WORLD * 0.55),
                        Vec2::new(260.0, 56.0),
                        action::COMPLETE,
                    );
                } else {
                    Self::spawn_button(
                        ctx,
                        "try-again",
                        Vec2::new(WORLD * 0.5, WORLD * 0.55),
                        Vec2::new(220.0, 52.0),
                        action::TRY_AGAIN,
                    );
                }
            }
        }
    }

    fn build_quiz(&self, ctx: &mut EngineContext, phase: QuizPhase) {
        let Some(Activity::Quiz(quiz)) = self.activity.as_ref() else {
            return;
        };
        match phase {
            QuizPhase::Intro => Self::spawn_intro(ctx),
            QuizPhase::Question => {
                Self::spawn(
                    ctx,
                    "prompt",
                    Vec2::new(WORLD * 0.5, 120.0),
                    Vec2::new(WORLD - 64.0, 96.0),
                    WidgetComponent::new(widget_kind::BANNER)
                        .with_value(quiz.original_round_index() as f32)
                        .with_state(widget_state::DISABLED),
                );
                Self::spawn(
                    ctx,
                    "round-progress",
                    Vec2::new(WORLD * 0.5, 60.0),
                    Vec2::new(WORLD - 120.0, 14.0),
                    WidgetComponent::new(widget_kind::PROGRESS)
                        .with_value(quiz.round_number() as f32 / quiz.total_rounds() as f32)
                        .with_state(widget_state::DISABLED),
                );

                let options = quiz.options();
                let two_column = options.len() > 2;
                for (slot, (original, _)) in options.iter().enumerate() {
                    let pos = if two_column {
                        Vec2::new(
                            if slot % 2 == 0 { WORLD * 0.3 } else { WORLD * 0.7 },
                            230.0 + (slot / 2) as f32 * 78.0,
                        )
                    } else {
                        Vec2::new(WORLD * 0.5, 230.0 + slot as f32 * 78.0)
                    };
                    Self::spawn(
                        ctx,
                        "option",
                        pos,
                        Vec2::new(if two_column { 170.0 } else { 280.0 }, 62.0),
                        WidgetComponent::new(widget_kind::OPTION).with_value(*original as f32),
                    );
                }
            }
            QuizPhase::Results => Self::spawn_results(ctx, quiz.score() as f32),
        }
    }

    fn build_counting(&self, ctx: &mut EngineContext, phase: CountingPhase) {
        let Some(Activity::Counting(counting)) = self.activity.as_ref() else {
            return;
        };
        match phase {
            CountingPhase::Intro => Self::spawn_intro(ctx),
            CountingPhase::Question => {
                Self::spawn(
                    ctx,
                    "round-progress",
                    Vec2::new(WORLD * 0.5, 60.0),
                    Vec2::new(WORLD - 120.0, 14.0),
                    WidgetComponent::new(widget_kind::PROGRESS)
                        .with_value(
                            counting.round_number() as f32 / crate::math::TOTAL_ROUNDS as f32,
                        )
                        .with_state(widget_state::DISABLED),
                );
                // The tree and apples are drawn in ink; only the answer
                // buttons need hit rectangles.
                for (slot, &value) in counting.options().iter().enumerate() {
                    Self::spawn(
                        ctx,
                        "option",
                        Vec2::new(72.0 + slot as f32 * 112.0, WORLD - 84.0),
                        Vec2::new(88.0, 62.0),
                        WidgetComponent::new(widget_kind::OPTION).with_value(value as f32),
                    );
                }
            }
            CountingPhase::Results => Self::spawn_results(ctx, counting.score() as f32),
        }
    }

    fn build_coloring(&self, ctx: &mut EngineContext, phase: ColoringPhase) {
        let Some(Activity::Coloring(coloring)) = self.activity.as_ref() else {
            return;
        };
        match phase {
            ColoringPhase::TemplateSelect => {
                Self::spawn_banner(ctx, "pick-picture", 70.0, 0.0);
                for (i, _) in coloring.templates().iter().enumerate() {
                    let col = i % 3;
                    let row = i / 3;
                    Self::spawn(
                        ctx,
                        "picture",
                        Vec2::new(110.0 + col as f32 * 130.0, 170.0 + row as f32 * 140.0),
                        Vec2::new(110.0, 110.0),
                        WidgetComponent::new(widget_kind::PICTURE).with_value(i as f32),
                    );
                }
            }
            ColoringPhase::Painting => {
                for (i, (number, _, _)) in PALETTE.iter().enumerate() {
                    let mut widget =
                        WidgetComponent::new(widget_kind::SWATCH).with_value(*number as f32);
                    if coloring.selected_color() == *number {
                        widget.set(widget_state::SELECTED);
                    }
                    Self::spawn(
                        ctx,
                        "swatch",
                        Vec2::new(48.0 + i as f32 * 56.0, WORLD - 60.0),
                        Vec2::new(44.0, 44.0),
                        widget,
                    );
                }
                Self::spawn_button(
                    ctx,
                    "finish",
                    Vec2::new(WORLD - 92.0, WORLD - 24.0),
                    Vec2::new(150.0, 36.0),
                    action::FINISH_PAINTING,
                );
            }
            ColoringPhase::Results => Self::spawn_results(ctx, coloring.score_percent() as f32),
        }
    }

    fn build_rhythm(&self, ctx: &mut EngineContext, phase: RhythmPhase) {
        let Some(Activity::Rhythm(rhythm)) = self.activity.as_ref() else {
            return;
        };
        match phase {
            RhythmPhase::Intro => Self::spawn_intro(ctx),
            RhythmPhase::Playing => {
                Self::spawn(
                    ctx,
                    "song",
                    Vec2::new(WORLD * 0.5, 110.0),
                    Vec2::new(WORLD - 64.0, 72.0),
                    WidgetComponent::new(widget_kind::BANNER)
                        .with_value(rhythm.song_number() as f32)
                        .with_state(widget_state::DISABLED),
                );
                Self::spawn(
                    ctx,
                    "beat-progress",
                    Vec2::new(WORLD * 0.5, 170.0),
                    Vec2::new(WORLD - 140.0, 16.0),
                    WidgetComponent::new(widget_kind::PROGRESS)
                        .with_value(rhythm.taps() as f32 / rhythm.song().pattern.len() as f32)
                        .with_state(widget_state::DISABLED),
                );
                Self::spawn(
                    ctx,
                    "drum",
                    Vec2::new(WORLD * 0.5, WORLD * 0.62),
                    Vec2::splat(180.0),
                    WidgetComponent::new(widget_kind::DRUM),
                );
            }
            RhythmPhase::Results => Self::spawn_results(ctx, rhythm.score() as f32),
        }
    }

    fn build_exercise(&self, ctx: &mut EngineContext, phase: ExercisePhase) {
        let Some(Activity::Exercise(exercise)) = self.activity.as_ref() else {
            return;
        };
        match phase {
            ExercisePhase::Intro => Self::spawn_intro(ctx),
            ExercisePhase::Moving => {
                Self::spawn(
                    ctx,
                    "routine",
                    Vec2::new(WORLD * 0.5, 110.0),
                    Vec2::new(WORLD - 64.0, 60.0),
                    WidgetComponent::new(widget_kind::BANNER)
                        .with_value(exercise.routine_number() as f32)
                        .with_state(widget_state::DISABLED),
                );
                Self::spawn(
                    ctx,
                    "move",
                    Vec2::new(WORLD * 0.5, WORLD * 0.45),
                    Vec2::new(WORLD - 96.0, 110.0),
                    WidgetComponent::new(widget_kind::MOVE)
                        .with_value(exercise.move_number() as f32)
                        .with_state(widget_state::DISABLED),
                );
                Self::spawn_button(
                    ctx,
                    "move-done",
                    Vec2::new(WORLD * 0.5, WORLD * 0.7),
                    Vec2::new(220.0, 56.0),
                    action::MOVE_DONE,
                );
            }
            ExercisePhase::Results => Self::spawn_results(ctx, exercise.score() as f32),
        }
    }

    fn build_outfit(&self, ctx: &mut EngineContext, phase: OutfitPhase) {
        let Some(Activity::Outfit(outfit)) = self.activity.as_ref() else {
            return;
        };
        match phase {
            OutfitPhase::Intro => Self::spawn_intro(ctx),
            OutfitPhase::Picking => {
                Self::spawn(
                    ctx,
                    "outfit",
                    Vec2::new(WORLD * 0.5, 110.0),
                    Vec2::new(WORLD - 64.0, 60.0),
                    WidgetComponent::new(widget_kind::BANNER)
                        .with_value(outfit.outfit_number() as f32)
                        .with_state(widget_state::DISABLED),
                );
                for (i, _) in outfit.items().iter().enumerate() {
                    let mut widget =
                        WidgetComponent::new(widget_kind::ITEM).with_value(i as f32);
                    if outfit.is_selected(i) {
                        widget.set(widget_state::SELECTED);
                    }
                    Self::spawn(
                        ctx,
                        "item",
                        Vec2::new(80.0 + i as f32 * 82.0, WORLD * 0.48),
                        Vec2::new(70.0, 70.0),
                        widget,
                    );
                }
                Self::spawn_button(
                    ctx,
                    "done",
                    Vec2::new(WORLD * 0.5, WORLD * 0.72),
                    Vec2::new(200.0, 52.0),
                    action::DONE,
                );
            }
            OutfitPhase::Results => Self::spawn_results(ctx, outfit.score() as f32),
        }
    }

    // ---- Ink ----

    fn draw_ink(&self, ctx: &mut EngineContext) {
        match (self.screen, self.activity.as_ref()) {
            (Screen::Subject(Subject::Writing), Some(Activity::Writing(writing))) => {
                draw_writing_ink(ctx, writing);
            }
            (Screen::Subject(Subject::Art), Some(Activity::Coloring(coloring))) => {
                draw_coloring_ink(ctx, coloring);
            }
            (Screen::Subject(Subject::Math), Some(Activity::Counting(counting))) => {
                draw_counting_ink(ctx, counting);
            }
            _ => {}
        }
    }
}

/// Guide strokes, coverage dots, drawn ink and the miss border.
fn draw_writing_ink(ctx: &mut EngineContext, writing: &WritingGame) {
    if !matches!(writing.phase(), WritingPhase::Tracing | WritingPhase::Preview) {
        return;
    }
    let session = writing.session();

    if writing.phase() == WritingPhase::Tracing {
        // Guide strokes: the hinted stroke gets the bold purple treatment.
        for (si, stroke) in session.template().strokes.iter().enumerate() {
            let scaled: Vec<Vec2> = stroke
                .points
                .iter()
                .map(|&p| session.scale_point(p) + EASEL_ORIGIN)
                .collect();
            let (width, color) = if si == session.active_stroke() {
                (16.0, InkColor::rgb8(0xA2, 0x9B, 0xFE).with_alpha(0.6))
            } else {
                (12.0, InkColor::rgb8(0xE0, 0xE0, 0xE0).with_alpha(0.3))
            };
            ctx.ink.stroke_polyline(&scaled, width, color);
        }

        // Covered-point dots, thinned to every 5th to avoid clutter.
        for (si, stroke) in session.template().strokes.iter().enumerate() {
            for (pi, &p) in stroke.points.iter().enumerate() {
                if pi % 5 == 0 && session.is_covered(si, pi) {
                    ctx.ink.fill_circle(
                        session.scale_point(p) + EASEL_ORIGIN,
                        3.0,
                        InkColor::rgb8(0x4C, 0xAF, 0x50).with_alpha(0.7),
                    );
                }
            }
        }
    }

    // The child's ink, finished strokes then the live one.
    let ink_blue = InkColor::rgb8(0x21, 0x96, 0xF3);
    for stroke in session.user_strokes() {
        let shifted: Vec<Vec2> = stroke.iter().map(|&p| p + EASEL_ORIGIN).collect();
        ctx.ink.stroke_polyline(&shifted, 6.0, ink_blue);
    }
    let current: Vec<Vec2> = session
        .current_stroke()
        .iter()
        .map(|&p| p + EASEL_ORIGIN)
        .collect();
    ctx.ink.stroke_polyline(&current, 6.0, ink_blue);

    // Transient "try again" border.
    if session.miss_active() {
        ctx.ink.stroke_rect(
            EASEL_ORIGIN + Vec2::splat(EASEL_SIZE * 0.5),
            Vec2::splat(EASEL_SIZE - 6.0),
            6.0,
            InkColor::rgb8(0xFF, 0x57, 0x22),
        );
    }
}

/// The color-by-number grid: painted cells in their colors, paintable cells
/// in light gray.
fn draw_coloring_ink(ctx: &mut EngineContext, coloring: &ColoringGame) {
    if !matches!(
        coloring.phase(),
        ColoringPhase::Painting | ColoringPhase::Results
    ) {
        return;
    }
    let grid = coloring.template().grid;
    for row in 0..GRID {
        for col in 0..GRID {
            let target = grid[row][col];
            if target == 0 {
                continue;
            }
            let center = ART_ORIGIN
                + Vec2::new(col as f32 * ART_CELL, row as f32 * ART_CELL)
                + Vec2::splat(ART_CELL * 0.5);
            let color = match coloring.painted_cell(row, col).and_then(palette_rgb) {
                Some([r, g, b]) => InkColor::rgb8(r, g, b),
                None => InkColor::LIGHT_GRAY,
            };
            ctx.ink
                .fill_rect(center, Vec2::splat(ART_CELL - 2.0), color);
        }
    }
}

/// The apple tree: trunk, canopy, and one apple per count.
fn draw_counting_ink(ctx: &mut EngineContext, counting: &CountingGame) {
    if counting.phase() != CountingPhase::Question {
        return;
    }
    let trunk = InkColor::rgb8(0x8B, 0x45, 0x13);
    let canopy = InkColor::rgb8(0x7C, 0xB3, 0x42);
    let apple = InkColor::rgb8(0xE7, 0x4C, 0x3C);

    ctx.ink
        .fill_rect(Vec2::new(WORLD * 0.5, 250.0), Vec2::new(36.0, 110.0), trunk);
    ctx.ink.fill_circle(Vec2::new(WORLD * 0.5, 160.0), 95.0, canopy);

    for i in 0..counting.apple_count() {
        let col = (i % 4) as f32;
        let row = (i / 4) as f32;
        ctx.ink.fill_circle(
            Vec2::new(WORLD * 0.5 - 54.0 + col * 36.0, 125.0 + row * 36.0),
            13.0,
            apple,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chalk_engine::InputQueue;

    // Mirrors the GameRunner frame order: clear, update, animate, drain.
    fn ticked(game: &mut SchoolDay, ctx: &mut EngineContext, input: &mut InputQueue) {
        ctx.clear_frame_data();
        game.update(ctx, input);
        ctx.tick_systems(FIXED_DT);
        input.drain();
    }

    fn tap(
        game: &mut SchoolDay,
        ctx: &mut EngineContext,
        input: &mut InputQueue,
        pos: Vec2,
    ) {
        input.push(InputEvent::PointerDown { x: pos.x, y: pos.y });
        input.push(InputEvent::PointerUp { x: pos.x, y: pos.y });
        ticked(game, ctx, input);
    }

    fn tap_tag(
        game: &mut SchoolDay,
        ctx: &mut EngineContext,
        input: &mut InputQueue,
        tag: &str,
    ) {
        let pos = ctx
            .scene
            .find_by_tag(tag)
            .unwrap_or_else(|| panic!("no widget tagged {tag}"))
            .pos;
        tap(game, ctx, input, pos);
    }

    fn fresh() -> (SchoolDay, EngineContext, InputQueue) {
        let mut game = SchoolDay::new();
        let mut ctx = EngineContext::new();
        let mut input = InputQueue::new();
        game.init(&mut ctx);
        input.push(InputEvent::Custom {
            kind: custom::SET_DATE,
            a: 2026.0,
            b: 3.0,
            c: 9.0,
        });
        ticked(&mut game, &mut ctx, &mut input);
        (game, ctx, input)
    }

    #[test]
    fn door_leads_to_locker() {
        let (mut game, mut ctx, mut input) = fresh();
        assert!(ctx.scene.find_by_tag("door").is_some());

        tap_tag(&mut game, &mut ctx, &mut input, "door");
        // The bounce plays before navigation.
        for _ in 0..30 {
            ticked(&mut game, &mut ctx, &mut input);
        }
        assert!(ctx.scene.find_by_tag("book").is_some(), "locker should show books");
        assert_eq!(
            ctx.scene.iter().filter(|e| e.tag == "book").count(),
            Subject::ALL.len()
        );
    }

    fn open_subject(
        game: &mut SchoolDay,
        ctx: &mut EngineContext,
        input: &mut InputQueue,
        subject: Subject,
    ) {
        tap_tag(game, ctx, input, "door");
        for _ in 0..30 {
            ticked(game, ctx, input);
        }
        let book_pos = ctx
            .scene
            .iter()
            .find(|e| {
                e.tag == "book"
                    && e.widget.as_ref().map(|w| w.value) == Some(subject.index() as f32)
            })
            .expect("book present")
            .pos;
        tap(game, ctx, input, book_pos);
    }

    #[test]
    fn science_quiz_completes_the_subject() {
        let (mut game, mut ctx, mut input) = fresh();
        open_subject(&mut game, &mut ctx, &mut input, Subject::Science);
        tap_tag(&mut game, &mut ctx, &mut input, "start");

        // Answer all five rounds by always picking the correct option.
        for _ in 0..5 {
            let Some(Activity::Quiz(quiz)) = game.activity.as_ref() else {
                panic!("science should host a quiz");
            };
            let round = quiz.round().expect("question up").clone();
            let correct_original = round
                .options
                .iter()
                .position(|o| *o == round.answer)
                .unwrap();
            let pos = ctx
                .scene
                .iter()
                .find(|e| {
                    e.tag == "option"
                        && e.widget.as_ref().map(|w| w.value)
                            == Some(correct_original as f32)
                })
                .expect("option widget")
                .pos;
            tap(&mut game, &mut ctx, &mut input, pos);
        }

        tap_tag(&mut game, &mut ctx, &mut input, "complete");
        assert!(game.progress().is_completed_today(Subject::Science));
        // Back on the locker, the science book wears its checkmark.
        let science_book = ctx
            .scene
            .iter()
            .find(|e| {
                e.tag == "book"
                    && e.widget.as_ref().map(|w| w.value)
                        == Some(Subject::Science.index() as f32)
            })
            .unwrap();
        assert!(science_book
            .widget
            .as_ref()
            .unwrap()
            .has(widget_state::DONE));
    }

    #[test]
    fn writing_easel_draws_ink_and_reports_progress() {
        let (mut game, mut ctx, mut input) = fresh();
        open_subject(&mut game, &mut ctx, &mut input, Subject::Writing);
        tap_tag(&mut game, &mut ctx, &mut input, "start");
        assert!(ctx.scene.find_by_tag("easel").is_some());

        // Swipe across the easel.
        let start = EASEL_ORIGIN + Vec2::new(160.0, 40.0);
        input.push(InputEvent::PointerDown { x: start.x, y: start.y });
        for i in 1..20 {
            let p = start + Vec2::new(0.0, i as f32 * 16.0);
            input.push(InputEvent::PointerMove { x: p.x, y: p.y });
        }
        ticked(&mut game, &mut ctx, &mut input);

        let Some(Activity::Writing(writing)) = game.activity.as_ref() else {
            panic!("writing activity")
        };
        assert!(!writing.session().current_stroke().is_empty());
        assert!(ctx.ink.vertex_count() > 0, "guides + ink must tessellate");
    }

    #[test]
    fn custom_date_event_rolls_the_day() {
        let (mut game, mut ctx, mut input) = fresh();
        game.progress.complete_subject(Subject::Math);
        assert!(game.progress().is_completed_today(Subject::Math));

        input.push(InputEvent::Custom {
            kind: custom::SET_DATE,
            a: 2026.0,
            b: 3.0,
            c: 10.0,
        });
        ticked(&mut game, &mut ctx, &mut input);
        assert!(!game.progress().is_completed_today(Subject::Math));
    }

    #[test]
    fn save_and_load_round_trip() {
        let (mut game, _, _) = fresh();
        game.progress.complete_subject(Subject::Pe);
        let blob = game.save_state().expect("progress serializes");

        let (mut other, mut other_ctx, mut other_input) = fresh();
        other.load_state(&blob);
        ticked(&mut other, &mut other_ctx, &mut other_input);
        assert!(other.progress().is_completed_today(Subject::Pe));
    }

    #[test]
    fn all_subjects_open_their_screens() {
        for subject in Subject::ALL {
            let (mut game, mut ctx, mut input) = fresh();
            open_subject(&mut game, &mut ctx, &mut input, subject);
            assert!(
                game.activity.is_some(),
                "{subject:?} must host an activity"
            );
            assert!(
                ctx.scene.find_by_tag("back").is_some(),
                "{subject:?} must offer a way back"
            );
        }
    }

    #[test]
    fn sticker_flow_after_all_subjects() {
        let (mut game, mut ctx, mut input) = fresh();
        for subject in Subject::ALL {
            game.progress.complete_subject(subject);
        }
        game.scene_dirty = true;
        // Walk to the locker to see the sticker invitation.
        tap_tag(&mut game, &mut ctx, &mut input, "door");
        for _ in 0..30 {
            ticked(&mut game, &mut ctx, &mut input);
        }
        assert!(ctx.scene.find_by_tag("pick-sticker").is_some());

        tap_tag(&mut game, &mut ctx, &mut input, "pick-sticker");
        assert!(ctx.scene.find_by_tag("sticker").is_some());
        tap_tag(&mut game, &mut ctx, &mut input, "sticker");

        assert!(game.progress().todays_sticker().is_some());
        assert!(ctx.scene.find_by_tag("day-sticker").is_some());
    }

    #[test]
    fn malformed_saved_state_is_ignored() {
        let (mut game, _ctx, _input) = fresh();
        game.progress.complete_subject(Subject::Art);
        game.load_state(""/* empty blob */);
        game.load_state("{\"weird\": true}");
        // Still standing, progress either kept or cleanly replaced.
        let _ = game.progress();
    }
}
