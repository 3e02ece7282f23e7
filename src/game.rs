//! Frame loop driver
//!
//! `Game` owns the run state, the input latch and the RNG. The platform
//! calls `frame` once per display refresh with a millisecond timestamp;
//! everything else (commands, timing, HUD pushes) is handled here so the
//! browser and headless entry points share one loop.

use rand_pcg::Pcg32;

use crate::consts::MAX_FRAME_DT;
use crate::hud::{HudDisplay, HudSnapshot};
use crate::input::{Command, InputState};
use crate::layout::Viewport;
use crate::renderer::{RenderSurface, draw_scene};
use crate::settings::Settings;
use crate::sim::{GameState, RandomSource, TickOutcome, seeded, tick};
use crate::tuning::Tuning;

pub struct Game<R: RandomSource = Pcg32> {
    pub state: GameState,
    pub input: InputState,
    rng: R,
    /// Timestamp of the previous frame (ms)
    last_time: Option<f64>,
    /// Step applied on the previous frame (s)
    last_dt: f32,
    last_hud: Option<HudSnapshot>,
}

impl Game<Pcg32> {
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport, settings: &Settings) -> Self {
        log::info!("New game with seed {}", seed);
        Self::with_rng(seeded(seed), tuning, viewport, settings)
    }
}

impl<R: RandomSource> Game<R> {
    pub fn with_rng(mut rng: R, tuning: Tuning, viewport: Viewport, settings: &Settings) -> Self {
        let state = GameState::new(tuning, viewport, settings, &mut rng);
        Self {
            state,
            input: InputState::new(),
            rng,
            last_time: None,
            last_dt: 0.0,
            last_hud: None,
        }
    }

    pub fn last_dt(&self) -> f32 {
        self.last_dt
    }

    pub fn apply_command(&mut self, command: Command) {
        match command {
            Command::Start => {
                if self.state.start() {
                    self.last_hud = None;
                }
            }
            Command::TogglePause => self.state.toggle_pause(),
            Command::Pause => {
                if self.state.is_running() {
                    self.state.toggle_pause();
                }
            }
            Command::Reset => {
                self.state.stop_and_reset();
                self.input.release_all();
                self.last_hud = None;
            }
        }
    }

    /// New playfield size (window resize)
    pub fn resize(&mut self, viewport: Viewport) {
        self.state.resize(viewport, &mut self.rng);
    }

    /// Switch quality settings mid-run
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.state.apply_settings(settings, &mut self.rng);
        log::info!("Quality set to {}", settings.quality.as_str());
    }

    /// Apply queued commands and simulate one frame ending at `now_ms`.
    /// Idle and paused frames only move the timestamp forward, so resuming
    /// never replays the time spent stopped.
    pub fn update(&mut self, now_ms: f64) -> TickOutcome {
        for command in self.input.take_commands() {
            self.apply_command(command);
        }

        let elapsed = match self.last_time {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(now_ms);

        if !self.state.is_running() {
            self.last_dt = 0.0;
            return TickOutcome::default();
        }

        let dt = elapsed.max(0.0).min(MAX_FRAME_DT);
        self.last_dt = dt;
        let input = self.input.tick_input();
        let outcome = tick(&mut self.state, &input, dt, &mut self.rng);
        if outcome.wave_advanced {
            log::debug!("Wave {} at score {}", self.state.wave, self.state.score);
        }
        outcome
    }

    /// One display refresh: update, draw, then refresh the HUD
    pub fn frame(
        &mut self,
        now_ms: f64,
        surface: &mut impl RenderSurface,
        hud: &mut impl HudDisplay,
    ) -> TickOutcome {
        let outcome = self.update(now_ms);
        draw_scene(&self.state, surface);
        self.push_hud(hud, outcome.simulated);
        outcome
    }

    /// Push HUD values after every simulated tick, and whenever they
    /// changed while stopped (start, reset, game over)
    fn push_hud(&mut self, hud: &mut impl HudDisplay, force: bool) {
        let snapshot = HudSnapshot::of(&self.state);
        if force || self.last_hud != Some(snapshot) {
            hud.show(&snapshot);
            self.last_hud = Some(snapshot);
        }
    }
}
