//! Tracing coverage engine.
//!
//! Converts a raw touch stream into coverage of a letter template: which
//! template points the finger has reached, a live progress fraction, and a
//! single "letter done" decision. Coverage is stroke-order agnostic — any
//! template point can be reached from any touch, which keeps the task
//! approachable for young children. Completion combines a per-stroke
//! threshold path with an effort-based fallback so a close-but-imperfect
//! tracer is never stuck.

use chalk_engine::{DelayTimer, FrameFlag};
use glam::Vec2;
use std::collections::HashSet;

use crate::letters::LetterTemplate;

/// Tuning knobs for coverage and completion. All distances are canvas
/// pixels. The defaults were tuned on-device with small testers; treat them
/// as configuration, not constants.
#[derive(Debug, Clone)]
pub struct TraceConfig {
    /// How close a touch must come to a template point to cover it.
    pub coverage_radius: f32,
    /// Maximum gap between consecutive coverage-checked points; longer
    /// touch-move segments are subdivided to this spacing.
    pub interpolation_step: f32,
    /// Active-stroke coverage ratio that advances the guidance highlight.
    pub hint_advance: f32,
    /// Minimum per-stroke coverage ratio for the threshold completion path.
    pub per_stroke_pass: f32,
    /// Minimum whole-letter progress for the threshold completion path.
    pub letter_pass: f32,
    /// Whole-letter progress floor below which no fallback applies.
    pub fallback_floor: f32,
    /// Drawn distance that alone proves effort (with the floor met).
    pub fallback_distance: f32,
    /// Elapsed seconds since first touch for the timed fallback arm.
    pub fallback_secs: f32,
    /// Minimum drawn distance accompanying the timed fallback arm.
    pub fallback_min_distance: f32,
    /// Delay between deciding completion and reporting it, so the final
    /// stroke renders before the celebration takes over.
    pub complete_delay: f32,
    /// How long the "try again" display stays up before self-clearing.
    pub miss_display_secs: f32,
    /// Minimum drawn distance for a lifted finger to count as an attempt.
    pub miss_min_distance: f32,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            coverage_radius: 24.0,
            interpolation_step: 8.0,
            hint_advance: 0.75,
            per_stroke_pass: 0.5,
            letter_pass: 0.65,
            fallback_floor: 0.6,
            fallback_distance: 2200.0,
            fallback_secs: 4.0,
            fallback_min_distance: 260.0,
            complete_delay: 0.3,
            miss_display_secs: 1.2,
            miss_min_distance: 60.0,
        }
    }
}

/// Outcome of one fixed tick: the coalesced progress update, if any, and
/// whether the deferred completion report fired this tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceTick {
    pub progress: Option<f32>,
    pub completed: bool,
}

/// One attempt at tracing one letter.
///
/// Owns every piece of per-attempt state and is updated synchronously in
/// place per event — no snapshots, no stale closures. Discarding the session
/// discards its pending timers with it. Switching letters goes through
/// [`TraceSession::reset`], which reinitializes everything.
pub struct TraceSession {
    template: LetterTemplate,
    canvas_size: f32,
    config: TraceConfig,

    /// (stroke index, point index) pairs reached by the finger. Grows
    /// monotonically within a session.
    covered: HashSet<(usize, usize)>,
    /// Covered count per template stroke, kept in sync with `covered`.
    covered_per_stroke: Vec<usize>,
    total_points: usize,

    /// Finished user strokes in canvas pixels.
    strokes: Vec<Vec<Vec2>>,
    /// The stroke currently being drawn.
    current: Vec<Vec2>,

    /// Guidance emphasis index. Biases which stroke renders highlighted;
    /// never gates coverage or completion.
    active_stroke: usize,

    /// Cumulative path length of all touch movement.
    drawn_distance: f32,
    /// Whether the first touch of the session has landed.
    started: bool,
    /// Seconds since the first touch.
    elapsed: f32,

    completed: bool,
    complete_timer: DelayTimer,
    miss_timer: DelayTimer,
    progress_flag: FrameFlag,
}

impl TraceSession {
    pub fn new(template: LetterTemplate, canvas_size: f32, config: TraceConfig) -> Self {
        let covered_per_stroke = vec![0; template.strokes.len()];
        let total_points = template.total_points();
        Self {
            template,
            canvas_size,
            config,
            covered: HashSet::new(),
            covered_per_stroke,
            total_points,
            strokes: Vec::new(),
            current: Vec::new(),
            active_stroke: 0,
            drawn_distance: 0.0,
            started: false,
            elapsed: 0.0,
            completed: false,
            complete_timer: DelayTimer::new(),
            miss_timer: DelayTimer::new(),
            progress_flag: FrameFlag::new(),
        }
    }

    /// Replace the letter and reinitialize every piece of session state.
    /// Nothing carries over: coverage, strokes, distance, timers, flags.
    pub fn reset(&mut self, template: LetterTemplate) {
        let config = self.config.clone();
        let canvas_size = self.canvas_size;
        *self = Self::new(template, canvas_size, config);
    }

    // ---- Touch input ----

    /// First event of a user stroke. Starts recording and, on the first
    /// touch of the session, the effort clock.
    pub fn pointer_down(&mut self, pos: Vec2) {
        self.finish_current_stroke();
        self.started = true;
        self.current.push(pos);
        self.check_coverage(pos);
    }

    /// Continuation of the current stroke. Fast finger movement gets
    /// subdivided so no checked gap exceeds the interpolation step, and
    /// every generated point lands in the recorded stroke so the rendered
    /// ink follows the drawn line.
    pub fn pointer_move(&mut self, pos: Vec2) {
        let last = match self.current.last() {
            Some(&p) => p,
            // Move without a preceding down (host hiccup): treat as a start.
            None => {
                self.pointer_down(pos);
                return;
            }
        };

        let dist = last.distance(pos);
        if dist <= f32::EPSILON {
            return;
        }
        self.drawn_distance += dist;

        if dist > self.config.interpolation_step {
            let steps = (dist / self.config.interpolation_step).ceil() as usize;
            for i in 1..=steps {
                let t = i as f32 / steps as f32;
                let p = last.lerp(pos, t);
                self.current.push(p);
                self.check_coverage(p);
            }
        } else {
            self.current.push(pos);
            self.check_coverage(pos);
        }

        // Movement alone can mature the distance fallback.
        self.check_completion();
    }

    /// Finger lifted. Finalizes the stroke; a real but unfinished attempt
    /// arms the transient "try again" display. Coverage is retained — the
    /// child just keeps drawing. Returns whether the display was armed.
    pub fn pointer_up(&mut self) -> bool {
        self.finish_current_stroke();
        if !self.completed && self.drawn_distance > self.config.miss_min_distance {
            self.miss_timer.start(self.config.miss_display_secs);
            return true;
        }
        false
    }

    /// Platform took the touch away. Same handling as a lift.
    pub fn pointer_cancel(&mut self) -> bool {
        self.pointer_up()
    }

    /// Advance the effort clock and deferred notifications by one fixed
    /// tick. Returns the coalesced progress update (at most one per tick)
    /// and whether the completion report fired — which happens exactly once
    /// per session.
    pub fn tick(&mut self, dt: f32) -> TraceTick {
        if self.started && !self.completed {
            self.elapsed += dt;
            // The timed fallback arm matures between touches too.
            self.check_completion();
        }
        self.miss_timer.tick(dt);
        let completed = self.complete_timer.tick(dt);
        let progress = if self.progress_flag.take() {
            Some(self.progress())
        } else {
            None
        };
        TraceTick { progress, completed }
    }

    // ---- Read-only state for rendering ----

    /// Whole-letter progress: covered points over total points, in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.total_points == 0 {
            return 0.0;
        }
        self.covered.len() as f32 / self.total_points as f32
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    /// The letter being traced.
    pub fn template(&self) -> &LetterTemplate {
        &self.template
    }

    /// Finished user strokes, for rendering the drawn ink.
    pub fn user_strokes(&self) -> &[Vec<Vec2>] {
        &self.strokes
    }

    /// The stroke currently under the finger.
    pub fn current_stroke(&self) -> &[Vec2] {
        &self.current
    }

    /// Whether a specific template point has been covered.
    pub fn is_covered(&self, stroke: usize, point: usize) -> bool {
        self.covered.contains(&(stroke, point))
    }

    pub fn covered_count(&self) -> usize {
        self.covered.len()
    }

    /// Guidance emphasis index (monotone, bounded by the stroke count).
    pub fn active_stroke(&self) -> usize {
        self.active_stroke
    }

    /// Whether the "try again" display is currently showing.
    pub fn miss_active(&self) -> bool {
        self.miss_timer.active()
    }

    pub fn drawn_distance(&self) -> f32 {
        self.drawn_distance
    }

    /// Scale a normalized template point to canvas pixels.
    pub fn scale_point(&self, p: Vec2) -> Vec2 {
        p * self.canvas_size
    }

    // ---- Internals ----

    fn finish_current_stroke(&mut self) {
        if !self.current.is_empty() {
            self.strokes.push(std::mem::take(&mut self.current));
        }
    }

    /// Mark every template point within the coverage radius of `pos`,
    /// across all strokes. A covered point stays covered for the session.
    fn check_coverage(&mut self, pos: Vec2) {
        let radius = self.config.coverage_radius;
        let mut changed = false;

        for (si, stroke) in self.template.strokes.iter().enumerate() {
            for (pi, &target) in stroke.points.iter().enumerate() {
                let scaled = target * self.canvas_size;
                if scaled.distance(pos) < radius && self.covered.insert((si, pi)) {
                    self.covered_per_stroke[si] += 1;
                    changed = true;
                }
            }
        }

        if changed {
            self.progress_flag.mark();
            self.advance_hint();
            self.check_completion();
        }
    }

    /// Move the guidance highlight forward once its stroke is mostly drawn.
    fn advance_hint(&mut self) {
        if self.active_stroke + 1 >= self.template.strokes.len() {
            return;
        }
        let len = self.template.strokes[self.active_stroke].points.len();
        if len == 0 {
            return;
        }
        let ratio = self.covered_per_stroke[self.active_stroke] as f32 / len as f32;
        if ratio >= self.config.hint_advance {
            self.active_stroke += 1;
        }
    }

    /// Evaluate the completion policy. Short-circuits once complete; the
    /// `completed` flag transitions false→true at most once per session.
    fn check_completion(&mut self) {
        if self.completed {
            return;
        }

        let progress = self.progress();

        // Path 1: every stroke individually passed, and the whole letter too.
        let per_stroke_ok = self
            .template
            .strokes
            .iter()
            .enumerate()
            .all(|(si, stroke)| {
                let len = stroke.points.len();
                len == 0
                    || self.covered_per_stroke[si] as f32 / len as f32
                        >= self.config.per_stroke_pass
            });
        let threshold_path = per_stroke_ok && progress >= self.config.letter_pass;

        // Path 2: enough of the letter plus demonstrated effort.
        let effort = self.drawn_distance > self.config.fallback_distance
            || (self.elapsed > self.config.fallback_secs
                && self.drawn_distance > self.config.fallback_min_distance);
        let fallback_path = progress >= self.config.fallback_floor && effort;

        if threshold_path || fallback_path {
            self.completed = true;
            self.miss_timer.cancel();
            self.complete_timer.start(self.config.complete_delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letters::{line_points, LetterBank, Stroke};

    const CANVAS: f32 = 400.0;

    /// A template whose points are far enough apart (on a big canvas with a
    /// tiny radius) that one touch covers exactly one point.
    fn sparse_template(counts: &[usize]) -> LetterTemplate {
        let strokes = counts
            .iter()
            .enumerate()
            .map(|(i, &n)| Stroke {
                points: line_points(0.05, 0.1 + i as f32 * 0.3, 0.95, 0.1 + i as f32 * 0.3, n),
            })
            .collect();
        LetterTemplate {
            letter: 'T',
            strokes,
        }
    }

    fn precise_config() -> TraceConfig {
        TraceConfig {
            coverage_radius: 2.0,
            interpolation_step: 1.0,
            ..TraceConfig::default()
        }
    }

    fn precise_session(counts: &[usize], canvas: f32) -> TraceSession {
        TraceSession::new(sparse_template(counts), canvas, precise_config())
    }

    /// Tap exactly `count` template points of stroke `si`.
    fn tap_points(session: &mut TraceSession, si: usize, count: usize) {
        let points: Vec<Vec2> = session.template().strokes[si]
            .points
            .iter()
            .take(count)
            .map(|&p| session.scale_point(p))
            .collect();
        for p in points {
            session.pointer_down(p);
            session.pointer_up();
        }
    }

    fn drain_until_complete(session: &mut TraceSession, max_ticks: usize) -> usize {
        let mut fired = 0;
        for _ in 0..max_ticks {
            if session.tick(1.0 / 60.0).completed {
                fired += 1;
            }
        }
        fired
    }

    #[test]
    fn coverage_grows_monotonically() {
        let bank = LetterBank::standard();
        let mut session = TraceSession::new(
            bank.get('A').unwrap().clone(),
            CANVAS,
            TraceConfig::default(),
        );

        let mut last = 0;
        let path: Vec<Vec2> = line_points(0.5, 0.1, 0.1, 0.9, 40)
            .into_iter()
            .map(|p| p * CANVAS)
            .collect();
        session.pointer_down(path[0]);
        for &p in &path[1..] {
            session.pointer_move(p);
            let now = session.covered_count();
            assert!(now >= last, "coverage must never shrink");
            last = now;
        }
        assert!(last > 0, "tracing along a stroke must cover points");
    }

    #[test]
    fn progress_is_exact_ratio_and_bounded() {
        let mut session = precise_session(&[10, 10], 2000.0);
        assert_eq!(session.progress(), 0.0);
        tap_points(&mut session, 0, 5);
        assert_eq!(session.covered_count(), 5);
        assert!((session.progress() - 0.25).abs() < 1e-6);
        assert!((0.0..=1.0).contains(&session.progress()));
    }

    #[test]
    fn interpolation_fills_gaps() {
        let config = TraceConfig::default();
        let step = config.interpolation_step;
        let bank = LetterBank::standard();
        let mut session =
            TraceSession::new(bank.get('I').unwrap().clone(), CANVAS, config);

        // One fast swipe down the vertical stroke: only two move events.
        session.pointer_down(Vec2::new(0.5 * CANVAS, 0.1 * CANVAS));
        session.pointer_move(Vec2::new(0.5 * CANVAS, 0.9 * CANVAS));

        // Every recorded gap must respect the step, and the swipe must have
        // covered the stroke it passed through, not just its endpoints.
        let stroke = session.current_stroke();
        assert!(stroke.len() > 2, "interpolation must emit midpoints");
        for pair in stroke.windows(2) {
            assert!(
                pair[0].distance(pair[1]) <= step + 1e-3,
                "gap {} exceeds step",
                pair[0].distance(pair[1])
            );
        }
        let vertical = 1; // stroke index of the vertical bar of 'I'
        let covered_in_vertical = (0..100)
            .filter(|&pi| session.is_covered(vertical, pi))
            .count();
        assert_eq!(covered_in_vertical, 100, "swipe must cover the whole bar");
    }

    #[test]
    fn letter_i_scenario_completes_via_threshold_path() {
        // Strokes of 60/100/60 points; cover 36/75/36 = 147/220 ≈ 0.668.
        let mut session = precise_session(&[60, 100, 60], 2000.0);
        tap_points(&mut session, 0, 36);
        tap_points(&mut session, 1, 75);
        assert!(!session.completed(), "two strokes alone must not complete");
        tap_points(&mut session, 2, 36);
        assert!(session.completed(), "147/220 with all strokes ≥ 60% passes");

        let fired = drain_until_complete(&mut session, 120);
        assert_eq!(fired, 1, "completion reports exactly once");
    }

    #[test]
    fn completion_reports_at_most_once_despite_more_input() {
        let mut session = precise_session(&[10], 2000.0);
        tap_points(&mut session, 0, 10);
        assert!(session.completed());

        let mut fired = drain_until_complete(&mut session, 60);

        // Keep scribbling — recorded for continuity, but never re-fires.
        session.pointer_down(Vec2::new(100.0, 100.0));
        session.pointer_move(Vec2::new(900.0, 900.0));
        session.pointer_up();
        fired += drain_until_complete(&mut session, 300);

        assert_eq!(fired, 1);
        assert!(session.completed());
        assert!(!session.user_strokes().is_empty(), "ink still recorded");
    }

    #[test]
    fn fallback_fires_at_floor_with_large_distance() {
        let mut config = precise_config();
        config.fallback_distance = 500.0;
        let template = sparse_template(&[50, 50]);
        let mut session = TraceSession::new(template, 2000.0, config);

        // Pin progress at exactly the floor: 30 + 30 of 100 points = 0.6,
        // below the 0.65 letter threshold so path 1 stays unsatisfied...
        tap_points(&mut session, 0, 30);
        tap_points(&mut session, 1, 30);
        assert!(!session.completed());
        assert!((session.progress() - 0.6).abs() < 1e-6);

        // ...then scrub far from every template point to rack up distance.
        session.pointer_down(Vec2::new(100.0, 1800.0));
        for i in 0..40 {
            let x = if i % 2 == 0 { 1900.0 } else { 100.0 };
            session.pointer_move(Vec2::new(x, 1800.0));
        }
        assert!(session.drawn_distance() > 500.0);
        assert!(session.completed(), "floor + distance effort must complete");
    }

    #[test]
    fn fallback_blocked_below_floor() {
        let mut config = precise_config();
        config.fallback_secs = 0.5;
        config.fallback_min_distance = 10.0;
        let mut session = TraceSession::new(sparse_template(&[100]), 2000.0, config);

        // Cover 20% of the letter, then hold well past the timed fallback.
        tap_points(&mut session, 0, 20);
        session.pointer_down(Vec2::new(500.0, 1800.0));
        session.pointer_move(Vec2::new(700.0, 1800.0));
        let fired = drain_until_complete(&mut session, 600); // 10 seconds
        assert_eq!(fired, 0, "floor gate must block the fallback");
        assert!(!session.completed());
    }

    #[test]
    fn timed_fallback_fires_between_touches() {
        let mut config = precise_config();
        config.fallback_secs = 0.5;
        config.fallback_min_distance = 50.0;
        let mut session = TraceSession::new(sparse_template(&[10]), 2000.0, config);

        // Over the floor (7/10), modest distance, then just wait.
        tap_points(&mut session, 0, 7);
        session.pointer_down(Vec2::new(300.0, 1800.0));
        session.pointer_move(Vec2::new(400.0, 1800.0));
        assert!(!session.completed());
        let fired = drain_until_complete(&mut session, 120); // 2 seconds
        assert_eq!(fired, 1, "elapsed time must mature without new touches");
    }

    #[test]
    fn reset_carries_nothing_over() {
        let bank = LetterBank::standard();
        let mut session = TraceSession::new(
            bank.get('E').unwrap().clone(),
            CANVAS,
            TraceConfig::default(),
        );
        session.pointer_down(Vec2::new(0.2 * CANVAS, 0.1 * CANVAS));
        session.pointer_move(Vec2::new(0.2 * CANVAS, 0.9 * CANVAS));
        session.pointer_up();
        assert!(session.progress() > 0.0);

        session.reset(bank.get('H').unwrap().clone());
        assert_eq!(session.progress(), 0.0);
        assert_eq!(session.covered_count(), 0);
        assert!(!session.completed());
        assert!(session.user_strokes().is_empty());
        assert_eq!(session.active_stroke(), 0);
        assert_eq!(session.drawn_distance(), 0.0);
        assert!(!session.miss_active());
        assert_eq!(session.template().letter, 'H');

        // A pending completion timer must not fire into the new session.
        let fired = drain_until_complete(&mut session, 120);
        assert_eq!(fired, 0);
    }

    #[test]
    fn hint_advances_without_gating_coverage() {
        let mut session = precise_session(&[20, 20], 2000.0);
        assert_eq!(session.active_stroke(), 0);

        // Cover the second stroke first — allowed, hint stays put.
        tap_points(&mut session, 1, 20);
        assert_eq!(session.active_stroke(), 0);
        assert_eq!(session.covered_count(), 20);

        // Now fill the first stroke past the hint threshold.
        tap_points(&mut session, 0, 16);
        assert_eq!(session.active_stroke(), 1);
    }

    #[test]
    fn miss_display_arms_and_self_clears() {
        let mut session = precise_session(&[100], 2000.0);

        // A tap with almost no movement is not an attempt.
        session.pointer_down(Vec2::new(50.0, 50.0));
        session.pointer_up();
        assert!(!session.miss_active());

        // A real attempt that falls short arms the display.
        session.pointer_down(Vec2::new(50.0, 50.0));
        session.pointer_move(Vec2::new(400.0, 50.0));
        session.pointer_up();
        assert!(session.miss_active());

        for _ in 0..120 {
            session.tick(1.0 / 60.0);
        }
        assert!(!session.miss_active(), "display must self-clear");
    }

    #[test]
    fn progress_updates_coalesce_per_tick() {
        let bank = LetterBank::standard();
        let mut session = TraceSession::new(
            bank.get('I').unwrap().clone(),
            CANVAS,
            TraceConfig::default(),
        );

        // A burst of moves within one tick...
        session.pointer_down(Vec2::new(0.5 * CANVAS, 0.1 * CANVAS));
        for i in 1..20 {
            session.pointer_move(Vec2::new(0.5 * CANVAS, (0.1 + i as f32 * 0.02) * CANVAS));
        }
        // ...yields a single progress update.
        let tick = session.tick(1.0 / 60.0);
        assert!(tick.progress.is_some());
        let tick = session.tick(1.0 / 60.0);
        assert!(tick.progress.is_none(), "no change → no repeat update");
    }

    #[test]
    fn out_of_canvas_touches_are_harmless() {
        let mut session = precise_session(&[10], 2000.0);
        session.pointer_down(Vec2::new(-500.0, -500.0));
        session.pointer_move(Vec2::new(5000.0, 5000.0));
        session.pointer_up();
        assert_eq!(session.covered_count(), 0);
        assert!(!session.completed());
    }
}
