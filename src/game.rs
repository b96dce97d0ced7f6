//! Game loop controller
//!
//! Owns the run state and sits between the platform shell and the simulation:
//! input arrives whenever the platform delivers it, the simulation only sees it
//! at the start of the next frame.

use glam::Vec2;

use crate::audio::{AudioSink, Silent, Volume};
use crate::renderer::{self, Surface};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Receives run notifications. Every method defaults to doing nothing.
pub trait GameListener {
    fn on_score_update(&mut self, _score: u64) {}
    fn on_level_up(&mut self, _level: u32) {}
    fn on_game_over(&mut self, _final_score: u64) {}
}

/// Listener that ignores everything
pub struct NoListener;

impl GameListener for NoListener {}

pub struct Game {
    state: GameState,
    settings: Settings,
    /// Latest pointer position not yet seen by the simulation
    pointer: Option<Vec2>,
    /// Latest surface size not yet seen by the simulation
    bounds: Option<Vec2>,
    listener: Box<dyn GameListener>,
    audio: Box<dyn AudioSink>,
}

impl Game {
    /// A controller waiting on the menu; call [`Game::start`] to begin a run
    pub fn new(bounds: Vec2, settings: Settings) -> Self {
        let mut state = GameState::new(0, bounds);
        state.phase = GamePhase::NotStarted;
        Self {
            state,
            settings,
            pointer: None,
            bounds: None,
            listener: Box::new(NoListener),
            audio: Box::new(Silent),
        }
    }

    pub fn with_listener(mut self, listener: Box<dyn GameListener>) -> Self {
        self.listener = listener;
        self
    }

    pub fn with_audio(mut self, audio: Box<dyn AudioSink>) -> Self {
        self.audio = audio;
        self
    }

    /// Begin a fresh run. Anything left from the previous run, queued boss
    /// shots included, is dropped with the old state.
    pub fn start(&mut self, seed: u64) {
        let bounds = self.bounds.take().unwrap_or(self.state.bounds);
        self.state = GameState::new(seed, bounds);
        if let Some(pointer) = self.pointer.take() {
            self.state.pointer = pointer;
        }
        log::info!("Run started (seed {seed}, {}x{})", bounds.x, bounds.y);
    }

    /// Record the pointer position; only the last one before a frame counts
    pub fn set_pointer(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
    }

    /// Record a new playfield size; only the last one before a frame counts
    pub fn resize(&mut self, size: Vec2) {
        self.bounds = Some(size);
    }

    /// Advance the simulation by one frame and deliver its notifications.
    /// Does nothing unless a run is in progress.
    pub fn advance(&mut self, now_ms: f64) {
        if self.state.phase != GamePhase::Playing {
            return;
        }

        let input = TickInput {
            now_ms,
            pointer: self.pointer.take(),
            bounds: self.bounds.take(),
        };
        tick(&mut self.state, &input);
        self.dispatch();
    }

    /// Advance, then draw the result
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, now_ms: f64) {
        self.advance(now_ms);
        renderer::render(&self.state, &self.settings, surface, now_ms);
    }

    fn dispatch(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::ScoreChanged(score) => self.listener.on_score_update(score),
                GameEvent::LevelUp(level) => self.listener.on_level_up(level),
                GameEvent::GameOver { final_score } => self.listener.on_game_over(final_score),
                GameEvent::Sound(cue) => self.audio.play(cue),
            }
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Swap preferences mid-run; volume changes reach the audio sink at once
    pub fn set_settings(&mut self, settings: Settings) {
        self.audio.set_volume(Volume::from_settings(&settings));
        self.settings = settings;
    }
}
