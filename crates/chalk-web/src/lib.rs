pub mod runner;

pub use runner::GameRunner;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// This macro eliminates the per-game boilerplate by generating:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, pointer handlers,
///   state save/load, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use chalk_engine::*;
/// use chalk_web::GameRunner;
///
/// mod game;
/// use game::MyGame;
///
/// chalk_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `chalk_engine::Game`
/// - `$game_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_cancel() {
            with_runner(|r| r.push_input(InputEvent::PointerCancel));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Persistence (the host owns storage; we own the format) ----

        #[wasm_bindgen]
        pub fn game_save_state() -> Option<String> {
            with_runner(|r| r.save_state())
        }

        #[wasm_bindgen]
        pub fn game_load_state(blob: &str) {
            with_runner(|r| r.load_state(blob));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_widgets_ptr() -> *const f32 {
            with_runner(|r| r.widgets_ptr())
        }

        #[wasm_bindgen]
        pub fn get_widget_count() -> u32 {
            with_runner(|r| r.widget_count())
        }

        #[wasm_bindgen]
        pub fn get_effects_ptr() -> *const f32 {
            with_runner(|r| r.effects_ptr())
        }

        #[wasm_bindgen]
        pub fn get_effects_vertex_count() -> u32 {
            with_runner(|r| r.effects_vertex_count())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_ptr() -> *const u8 {
            with_runner(|r| r.sound_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_len() -> u32 {
            with_runner(|r| r.sound_events_len())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_canvas_size() -> f32 {
            with_runner(|r| r.canvas_size())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_widgets() -> u32 {
            with_runner(|r| r.max_widgets())
        }

        #[wasm_bindgen]
        pub fn get_max_ink_vertices() -> u32 {
            with_runner(|r| r.max_ink_vertices())
        }

        #[wasm_bindgen]
        pub fn get_max_effects_vertices() -> u32 {
            with_runner(|r| r.max_effects_vertices())
        }

        #[wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_runner(|r| r.max_sounds())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };

    // Variant with vectors feature
    ($game_type:ty, $game_name:literal, vectors) => {
        $crate::export_game!($game_type, $game_name);

        // ---- Ink accessors (only when vectors feature is enabled) ----

        #[wasm_bindgen]
        pub fn get_ink_ptr() -> *const f32 {
            with_runner(|r| r.ink_ptr())
        }

        #[wasm_bindgen]
        pub fn get_ink_vertex_count() -> u32 {
            with_runner(|r| r.ink_vertex_count())
        }
    };
}
