//! Game state and core simulation types
//!
//! Everything a run needs lives in `GameState`, which is passed by reference
//! into each step function. Several games can exist side by side.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::rng::RandomSource;
use super::wave::spawn_wave;
use crate::consts::STAR_RESPAWN_Y;
use crate::layout::Viewport;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Run phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not running: waiting for start, or the run has ended
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Frozen mid-run
    Paused,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Shorter fire cooldown
    Rapid,
    /// Larger projectiles
    Big,
    /// Three projectiles per shot
    Triple,
    /// Faster projectiles
    Fast,
    /// Projectiles survive extra hits
    Pierce,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Rapid,
        PowerUpKind::Big,
        PowerUpKind::Triple,
        PowerUpKind::Fast,
        PowerUpKind::Pierce,
    ];

    /// Single-character label drawn on the pickup
    pub fn glyph(&self) -> &'static str {
        match self {
            PowerUpKind::Rapid => "R",
            PowerUpKind::Big => "B",
            PowerUpKind::Triple => "3",
            PowerUpKind::Fast => "F",
            PowerUpKind::Pierce => "P",
        }
    }
}

/// Remaining duration (seconds) of each power-up
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerUpTimers {
    pub rapid: f32,
    pub big: f32,
    pub triple: f32,
    pub fast: f32,
    pub pierce: f32,
}

impl PowerUpTimers {
    pub fn get(&self, kind: PowerUpKind) -> f32 {
        match kind {
            PowerUpKind::Rapid => self.rapid,
            PowerUpKind::Big => self.big,
            PowerUpKind::Triple => self.triple,
            PowerUpKind::Fast => self.fast,
            PowerUpKind::Pierce => self.pierce,
        }
    }

    fn slot(&mut self, kind: PowerUpKind) -> &mut f32 {
        match kind {
            PowerUpKind::Rapid => &mut self.rapid,
            PowerUpKind::Big => &mut self.big,
            PowerUpKind::Triple => &mut self.triple,
            PowerUpKind::Fast => &mut self.fast,
            PowerUpKind::Pierce => &mut self.pierce,
        }
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.get(kind) > 0.0
    }

    /// Set a power-up's remaining time (overwrites, never stacks)
    pub fn grant(&mut self, kind: PowerUpKind, duration: f32) {
        *self.slot(kind) = duration.max(0.0);
    }

    /// Count every timer down, flooring at zero
    pub fn tick(&mut self, dt: f32) {
        for kind in PowerUpKind::ALL {
            let slot = self.slot(kind);
            *slot = (*slot - dt).max(0.0);
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed (pixels/sec)
    pub speed: f32,
}

impl Player {
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.pos, self.size)
    }

    /// Horizontal range the ship's center may occupy
    pub fn x_limits(&self, viewport: &Viewport, edge_margin: f32) -> (f32, f32) {
        let half = self.size.x / 2.0;
        (half + edge_margin, viewport.width - half - edge_margin)
    }

    /// Keep the ship inside the playfield margins
    pub fn clamp_x(&mut self, viewport: &Viewport, edge_margin: f32) {
        let (lo, hi) = self.x_limits(viewport, edge_margin);
        self.pos.x = self.pos.x.min(hi).max(lo);
    }
}

/// A projectile, fired by the player (upward) or an enemy (downward)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
    /// Travel speed (pixels/sec)
    pub speed: f32,
    /// Hits left before the projectile is consumed
    pub pierce: u32,
}

/// An enemy in the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub alive: bool,
}

impl Enemy {
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.pos, self.size)
    }
}

/// What produced an explosion (selects the particle color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Burst {
    EnemyDestroyed,
    PlayerHit,
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left
    pub life: f32,
    pub burst: Burst,
}

/// A falling power-up pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    /// Fall speed (pixels/sec)
    pub speed: f32,
    /// Diameter
    pub size: f32,
    pub kind: PowerUpKind,
}

/// A decorative background star
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub alpha: f32,
}

/// Complete run state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Gameplay constants
    pub tuning: Tuning,
    /// Playfield size and resolution scale
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub score: u64,
    /// Current wave (1-based)
    pub wave: u32,
    pub lives: u32,
    /// Seconds until the player fires again
    pub fire_cooldown: f32,
    /// Seconds until an enemy fires again
    pub enemy_fire_timer: f32,
    /// Base horizontal enemy speed (grows per cleared wave)
    pub enemy_speed: f32,
    /// Grid movement direction: 1.0 right, -1.0 left
    pub enemy_direction: f32,
    pub powerups: PowerUpTimers,
    pub player: Player,
    pub bullets: Vec<Projectile>,
    pub enemy_bullets: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub pickups: Vec<PowerUp>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Background star field
    #[serde(skip)]
    pub stars: Vec<Star>,
    /// Particle cap from the quality settings
    pub max_particles: usize,
    /// Star count from the quality settings
    pub star_count: usize,
}

impl GameState {
    /// Create an idle game with a fresh first wave
    pub fn new(
        tuning: Tuning,
        viewport: Viewport,
        settings: &Settings,
        rng: &mut impl RandomSource,
    ) -> Self {
        let player = Player {
            pos: Vec2::new(viewport.width / 2.0, 0.0),
            size: Vec2::splat(tuning.player_size * viewport.scale),
            speed: tuning.player_speed * viewport.scale,
        };
        let max_particles = settings.max_particles();
        let mut state = Self {
            viewport,
            phase: GamePhase::Idle,
            score: 0,
            wave: 1,
            lives: tuning.starting_lives,
            fire_cooldown: 0.0,
            enemy_fire_timer: 0.0,
            enemy_speed: tuning.enemy_base_speed,
            enemy_direction: 1.0,
            powerups: PowerUpTimers::default(),
            player,
            bullets: Vec::with_capacity(64),
            enemy_bullets: Vec::with_capacity(32),
            enemies: Vec::new(),
            pickups: Vec::new(),
            particles: Vec::with_capacity(max_particles),
            stars: Vec::new(),
            max_particles,
            star_count: settings.star_count(),
            tuning,
        };

        state.regenerate_stars(rng);
        state.reset();
        state
    }

    /// Resolution scale shorthand
    #[inline]
    pub fn scale(&self) -> f32 {
        self.viewport.scale
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Return every run value to its initial state and spawn wave 1.
    /// The phase is left untouched.
    pub fn reset(&mut self) {
        let scale = self.scale();
        self.score = 0;
        self.wave = 1;
        self.lives = self.tuning.starting_lives;
        self.enemy_speed = self.tuning.enemy_base_speed;
        self.enemy_direction = 1.0;
        self.enemy_fire_timer = 0.0;
        self.fire_cooldown = 0.0;
        self.powerups = PowerUpTimers::default();

        self.player.pos = Vec2::new(
            self.viewport.width / 2.0,
            self.viewport.height - self.tuning.player_bottom_offset * scale,
        );

        self.bullets.clear();
        self.enemy_bullets.clear();
        self.particles.clear();
        self.pickups.clear();
        spawn_wave(self);
    }

    /// Idle -> Running. Returns true if the run started.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        if self.lives == 0 {
            self.reset();
        }
        self.phase = GamePhase::Running;
        if self.enemies.is_empty() {
            spawn_wave(self);
        }
        log::info!("Run started (wave {}, lives {})", self.wave, self.lives);
        true
    }

    /// Running <-> Paused; ignored while idle
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::Idle => return,
        };
        log::info!("Run {:?}", self.phase);
    }

    /// Stop the run and restore the initial state
    pub fn stop_and_reset(&mut self) {
        self.phase = GamePhase::Idle;
        self.reset();
        log::info!("Run reset");
    }

    /// Lose a life; the run ends at zero
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.end_run();
        }
    }

    /// Terminal state: zero lives, back to idle
    pub fn end_run(&mut self) {
        self.lives = 0;
        if self.phase != GamePhase::Idle {
            log::info!("Game over: score {} on wave {}", self.score, self.wave);
        }
        self.phase = GamePhase::Idle;
    }

    /// Apply a new viewport: rescale the ship and rebuild the star field
    pub fn resize(&mut self, viewport: Viewport, rng: &mut impl RandomSource) {
        self.viewport = viewport;
        let scale = viewport.scale;
        self.player.size = Vec2::splat(self.tuning.player_size * scale);
        self.player.speed = self.tuning.player_speed * scale;
        self.player.pos.x = self
            .player
            .pos
            .x
            .min(viewport.width - self.player.size.x / 2.0 - self.tuning.player_edge_margin);
        self.player.pos.y = viewport.height - self.tuning.player_bottom_offset * scale;
        self.regenerate_stars(rng);
    }

    /// Apply new quality settings: star count and particle cap
    pub fn apply_settings(&mut self, settings: &Settings, rng: &mut impl RandomSource) {
        self.max_particles = settings.max_particles();
        self.star_count = settings.star_count();
        self.particles.truncate(self.max_particles);
        self.regenerate_stars(rng);
    }

    /// Scatter a fresh star field over the playfield
    pub fn regenerate_stars(&mut self, rng: &mut impl RandomSource) {
        let t = &self.tuning;
        let (width, height) = (self.viewport.width, self.viewport.height);
        self.stars.clear();
        self.stars.extend((0..self.star_count).map(|_| Star {
            pos: Vec2::new(rng.next_f32() * width, rng.next_f32() * height),
            radius: rng.range(t.star_min_radius, t.star_radius_range),
            speed: rng.range(t.star_min_speed, t.star_speed_range),
            alpha: rng.range(t.star_min_alpha, t.star_alpha_range),
        }));
    }

    /// Move a star that fell off the bottom back above the top edge
    pub fn respawn_star(star: &mut Star, width: f32, rng: &mut impl RandomSource) {
        star.pos = Vec2::new(rng.next_f32() * width, STAR_RESPAWN_Y);
    }

    /// Spray particles from a point, respecting the particle cap
    pub fn spawn_explosion(&mut self, pos: Vec2, burst: Burst, rng: &mut impl RandomSource) {
        let spread = self.tuning.particle_spread_speed;
        let room = self.max_particles.saturating_sub(self.particles.len());
        let count = (self.tuning.explosion_particles as usize).min(room);
        for _ in 0..count {
            let vel = Vec2::new(
                (rng.next_f32() - 0.5) * spread,
                (rng.next_f32() - 0.5) * spread,
            );
            let life = rng.range(self.tuning.particle_min_life, self.tuning.particle_life_range);
            self.particles.push(Particle {
                pos,
                vel,
                life,
                burst,
            });
        }
    }

    pub fn alive_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.alive)
    }

    pub fn any_enemy_alive(&self) -> bool {
        self.enemies.iter().any(|e| e.alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedRandom;

    fn new_state() -> GameState {
        let mut rng = ScriptedRandom::constant(0.5);
        GameState::new(
            Tuning::default(),
            Viewport::reference(),
            &Settings::default(),
            &mut rng,
        )
    }

    #[test]
    fn test_new_state_is_idle_with_full_grid() {
        let state = new_state();
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.lives, 3);
        assert_eq!(state.wave, 1);
        assert_eq!(state.enemies.len(), 3 * 8);
        assert!(state.enemies.iter().all(|e| e.alive));
        assert_eq!(state.stars.len(), 120);
        assert_eq!(state.player.pos, Vec2::new(480.0, 530.0));
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = new_state();

        // Pause is ignored while idle
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Idle);

        assert!(state.start());
        assert_eq!(state.phase, GamePhase::Running);
        assert!(!state.start());

        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Paused);
        // Start does not unpause
        assert!(!state.start());
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Running);

        state.stop_and_reset();
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_start_after_game_over_resets() {
        let mut state = new_state();
        state.start();
        state.score = 999;
        state.wave = 4;
        state.end_run();
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.lives, 0);

        state.start();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.wave, 1);
    }

    #[test]
    fn test_reset_clears_transient_collections() {
        let mut state = new_state();
        let mut rng = ScriptedRandom::constant(0.5);
        state.start();
        state.spawn_explosion(Vec2::new(10.0, 10.0), Burst::PlayerHit, &mut rng);
        state.bullets.push(Projectile {
            pos: Vec2::ZERO,
            size: Vec2::ONE,
            speed: 1.0,
            pierce: 0,
        });
        state.powerups.grant(PowerUpKind::Triple, 10.0);
        state.enemies[0].alive = false;

        state.stop_and_reset();
        assert!(state.particles.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.powerups, PowerUpTimers::default());
        assert!(state.enemies.iter().all(|e| e.alive));
    }

    #[test]
    fn test_lose_life_ends_run_at_zero() {
        let mut state = new_state();
        state.start();
        state.lose_life();
        state.lose_life();
        assert!(state.is_running());
        state.lose_life();
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::Idle);
        // Never goes negative
        state.lose_life();
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_powerup_grant_overwrites() {
        let mut timers = PowerUpTimers::default();
        timers.grant(PowerUpKind::Rapid, 10.0);
        timers.tick(3.0);
        assert!((timers.rapid - 7.0).abs() < 1e-5);
        timers.grant(PowerUpKind::Rapid, 10.0);
        assert_eq!(timers.rapid, 10.0);
        timers.tick(20.0);
        assert_eq!(timers.rapid, 0.0);
        assert!(!timers.is_active(PowerUpKind::Rapid));
    }

    #[test]
    fn test_explosion_respects_particle_cap() {
        let mut rng = ScriptedRandom::constant(0.5);
        let settings = Settings {
            particles: true,
            quality: crate::settings::QualityPreset::Low,
        };
        let mut state = GameState::new(Tuning::default(), Viewport::reference(), &settings, &mut rng);
        for _ in 0..20 {
            state.spawn_explosion(Vec2::ZERO, Burst::EnemyDestroyed, &mut rng);
        }
        assert_eq!(state.particles.len(), 128);
    }

    #[test]
    fn test_resize_rescales_player_and_stars() {
        let mut state = new_state();
        let mut rng = ScriptedRandom::constant(0.25);
        state.player.pos.x = 950.0;
        state.resize(Viewport::new(480.0, 360.0), &mut rng);
        assert_eq!(state.viewport.scale, 0.5);
        assert_eq!(state.player.size, Vec2::splat(32.0));
        assert_eq!(state.player.speed, 160.0);
        assert_eq!(state.player.pos.x, 480.0 - 16.0 - 16.0);
        assert_eq!(state.player.pos.y, 360.0 - 35.0);
        assert!(state.stars.iter().all(|s| s.pos.x == 120.0 && s.pos.y == 90.0));
    }
}
