//! Neon Barrage entry point
//!
//! On the web this wires a canvas to the game loop. Natively it runs a headless,
//! seeded session with a scripted pointer and prints a JSON summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, MouseEvent,
        TouchEvent,
    };

    use neon_barrage::audio::{AudioManager, Volume};
    use neon_barrage::renderer::CanvasSurface;
    use neon_barrage::sim::GamePhase;
    use neon_barrage::{Game, GameListener, Settings};

    /// The ship is drawn from its top-left corner; keep it under the finger
    const POINTER_OFFSET: Vec2 = Vec2::new(-20.0, -60.0);

    /// Mirrors run notifications into the page HUD
    #[derive(Clone)]
    struct Hud {
        document: Document,
    }

    impl Hud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
            }
        }
    }

    impl GameListener for Hud {
        fn on_score_update(&mut self, score: u64) {
            self.set_text("hud-score", &score.to_string());
        }

        fn on_level_up(&mut self, level: u32) {
            self.set_text("hud-level", &level.to_string());
        }

        fn on_game_over(&mut self, final_score: u64) {
            self.set_text("final-score", &final_score.to_string());
            self.set_hidden("game-over", false);
        }
    }

    struct WebGame {
        game: Game,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
        hud: Hud,
    }

    impl WebGame {
        fn start(&mut self) {
            if self.game.phase() == GamePhase::Playing {
                return;
            }
            let seed = js_sys::Date::now() as u64;
            self.game.start(seed);
            self.hud.set_text("hud-score", "0");
            self.hud.set_text("hud-level", "1");
            self.hud.set_hidden("game-over", true);
            self.hud.set_hidden("start-prompt", true);
        }

        fn toggle_mute(&mut self) {
            let mut settings = self.game.settings().clone();
            settings.muted = !settings.muted;
            settings.save();
            log::info!("Sound {}", if settings.muted { "muted" } else { "on" });
            self.game.set_settings(settings);
        }

        fn fit_canvas(&mut self) {
            let size = Vec2::new(
                self.canvas.client_width() as f32,
                self.canvas.client_height() as f32,
            );
            self.canvas.set_width(size.x as u32);
            self.canvas.set_height(size.y as u32);
            self.surface.resize(size);
            self.game.resize(size);
        }

        /// Client coordinates to canvas-space pointer target
        fn point(&mut self, client_x: i32, client_y: i32) {
            let rect = self.canvas.get_bounding_client_rect();
            let pos = Vec2::new(
                client_x as f32 - rect.left() as f32,
                client_y as f32 - rect.top() as f32,
            );
            self.game.set_pointer(pos + POINTER_OFFSET);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Neon Barrage starting...");

        let Some(window) = web_sys::window() else {
            log::error!("no window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("no document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("no canvas element");
            return;
        };
        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("2d context unavailable");
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let settings = Settings::load();
        let size = Vec2::new(canvas.client_width() as f32, canvas.client_height() as f32);
        let hud = Hud {
            document: document.clone(),
        };
        let game = Game::new(size, settings.clone())
            .with_listener(Box::new(hud.clone()))
            .with_audio(Box::new(AudioManager::new(Volume::from_settings(&settings))));

        let web_game = Rc::new(RefCell::new(WebGame {
            game,
            surface: CanvasSurface::new(ctx, size),
            canvas: canvas.clone(),
            hud,
        }));
        web_game.borrow_mut().fit_canvas();

        setup_input_handlers(&canvas, web_game.clone());
        request_animation_frame(web_game);
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, web_game: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Mouse move
        {
            let web_game = web_game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                web_game
                    .borrow_mut()
                    .point(event.client_x(), event.client_y());
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click starts a run
        {
            let web_game = web_game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                web_game.borrow_mut().start();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        for kind in ["touchstart", "touchmove"] {
            let web_game = web_game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = web_game.borrow_mut();
                if kind == "touchstart" {
                    g.start();
                }
                if let Some(touch) = event.touches().get(0) {
                    g.point(touch.client_x(), touch.client_y());
                }
            });
            let _ = canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let web_game = web_game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.key().as_str() {
                    " " | "Enter" => web_game.borrow_mut().start(),
                    "m" | "M" => web_game.borrow_mut().toggle_mute(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                web_game.borrow_mut().fit_canvas();
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(web_game: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(web_game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(web_game: Rc<RefCell<WebGame>>, time: f64) {
        {
            let mut g = web_game.borrow_mut();
            let WebGame { game, surface, .. } = &mut *g;
            game.frame(surface, time);
        }

        request_animation_frame(web_game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;

    use glam::Vec2;

    use neon_barrage::audio::{LogAudio, Volume};
    use neon_barrage::renderer::CommandRecorder;
    use neon_barrage::sim::GamePhase;
    use neon_barrage::{Game, GameListener, QualityPreset, Settings};

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);
    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[derive(Default)]
    struct RunLog {
        level_ups: u32,
        final_score: Option<u64>,
    }

    struct Reporter(Rc<RefCell<RunLog>>);

    impl GameListener for Reporter {
        fn on_score_update(&mut self, score: u64) {
            log::debug!("score {score}");
        }

        fn on_level_up(&mut self, level: u32) {
            log::info!("reached level {level}");
            self.0.borrow_mut().level_ups += 1;
        }

        fn on_game_over(&mut self, final_score: u64) {
            self.0.borrow_mut().final_score = Some(final_score);
        }
    }

    /// Pointer sweeping left and right near the bottom of the screen
    fn scripted_pointer(frame: u64) -> Vec2 {
        let t = frame as f32 * 0.03;
        Vec2::new(
            BOUNDS.x / 2.0 + t.sin() * BOUNDS.x * 0.4 - 20.0,
            BOUNDS.y - 80.0 + (t * 0.7).cos() * 40.0,
        )
    }

    pub fn run() {
        env_logger::init();

        let mut args = std::env::args().skip(1);
        let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);
        let frames: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3600);
        let mut settings = match args.next() {
            Some(path) => Settings::load_from(Path::new(&path)),
            None => Settings::default(),
        };
        if let Ok(name) = std::env::var("NEON_BARRAGE_QUALITY") {
            match QualityPreset::from_str(&name) {
                Some(preset) => settings.quality = preset,
                None => log::warn!("Unknown quality preset {name:?}, keeping {}", settings.quality.as_str()),
            }
        }

        log::info!(
            "Neon Barrage (headless) seed={seed} frames={frames} quality={}",
            settings.quality.as_str()
        );

        let run_log = Rc::new(RefCell::new(RunLog::default()));
        let mut game = Game::new(BOUNDS, settings.clone())
            .with_listener(Box::new(Reporter(run_log.clone())))
            .with_audio(Box::new(LogAudio::new(Volume::from_settings(&settings))));
        game.start(seed);

        let mut surface = CommandRecorder::new(BOUNDS);
        let mut played = 0;
        for frame in 0..frames {
            if game.phase() != GamePhase::Playing {
                break;
            }
            surface.reset();
            game.set_pointer(scripted_pointer(frame));
            game.frame(&mut surface, frame as f64 * FRAME_MS);
            played += 1;
        }

        let state = game.state();
        let run = run_log.borrow();
        let summary = serde_json::json!({
            "seed": seed,
            "frames": played,
            "phase": state.phase,
            "level": state.level,
            "score": state.player.score,
            "health": state.player.health,
            "level_ups": run.level_ups,
            "final_score": run.final_score,
            "enemies": state.enemies.len(),
            "boss": state.boss.as_ref().map(|b| b.body.health),
            "draw_commands": surface.commands().len(),
        });
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Could not encode summary: {e}"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}
