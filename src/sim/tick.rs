//! Frame tick
//!
//! One simulated frame: step every collection, resolve at most one
//! collision, then advance the wave if the grid is clear.

use super::collision::{CollisionEvent, resolve_collisions};
use super::rng::RandomSource;
use super::state::{GamePhase, GameState};
use super::step::step;
use super::wave::advance_wave_if_needed;

/// Latched movement flags sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// Whether the simulation ran at all (false while idle or paused)
    pub simulated: bool,
    pub collision: CollisionEvent,
    pub wave_advanced: bool,
}

impl Default for TickOutcome {
    fn default() -> Self {
        Self {
            simulated: false,
            collision: CollisionEvent::None,
            wave_advanced: false,
        }
    }
}

/// Advance a running game by `dt` seconds. Idle and paused games are
/// left untouched.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    rng: &mut impl RandomSource,
) -> TickOutcome {
    if state.phase != GamePhase::Running {
        return TickOutcome::default();
    }

    step(state, input, dt, rng);
    let collision = resolve_collisions(state, rng);
    let wave_advanced = advance_wave_if_needed(state);

    TickOutcome {
        simulated: true,
        collision,
        wave_advanced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Viewport;
    use crate::settings::Settings;
    use crate::sim::rng::{ScriptedRandom, seeded};
    use crate::tuning::Tuning;

    const DT: f32 = 1.0 / 60.0;

    fn new_state(seed: u64) -> GameState {
        let mut rng = seeded(seed);
        GameState::new(
            Tuning::default(),
            Viewport::reference(),
            &Settings::default(),
            &mut rng,
        )
    }

    #[test]
    fn test_idle_and_paused_do_not_simulate() {
        let mut state = new_state(1);
        let mut rng = seeded(1);
        let positions: Vec<_> = state.enemies.iter().map(|e| e.pos).collect();

        let outcome = tick(&mut state, &TickInput::default(), DT, &mut rng);
        assert!(!outcome.simulated);
        assert!(state.bullets.is_empty());

        state.start();
        state.toggle_pause();
        let outcome = tick(&mut state, &TickInput::default(), DT, &mut rng);
        assert!(!outcome.simulated);
        assert_eq!(positions, state.enemies.iter().map(|e| e.pos).collect::<Vec<_>>());

        state.toggle_pause();
        let outcome = tick(&mut state, &TickInput::default(), DT, &mut rng);
        assert!(outcome.simulated);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_clearing_the_grid_advances_the_wave() {
        let mut state = new_state(2);
        let mut rng = ScriptedRandom::constant(0.9);
        state.start();
        for enemy in state.enemies.iter_mut().skip(1) {
            enemy.alive = false;
        }
        // Park the last enemy right above the ship's muzzle
        state.enemies[0].pos.x = state.player.pos.x;
        state.enemies[0].pos.y = state.player.pos.y - 50.0;

        let outcome = tick(&mut state, &TickInput::default(), DT, &mut rng);
        assert!(matches!(
            outcome.collision,
            CollisionEvent::PlayerHitEnemy { enemy: 0, .. }
        ));
        assert!(outcome.wave_advanced);
        assert_eq!(state.wave, 2);
        assert!(state.enemies.iter().all(|e| e.alive));
    }

    #[test]
    fn test_breach_ends_the_run_on_that_tick() {
        let mut state = new_state(3);
        let mut rng = ScriptedRandom::constant(0.9);
        state.start();
        let lowest = state.enemies.len() - 1;
        state.enemies[lowest].pos.y = state.player.pos.y;

        let outcome = tick(&mut state, &TickInput::default(), DT, &mut rng);
        assert_eq!(outcome.collision, CollisionEvent::FrontLineBreach);
        assert_eq!(state.lives, 0);
        assert!(!state.is_running());

        // The ended run no longer simulates
        let outcome = tick(&mut state, &TickInput::default(), DT, &mut rng);
        assert!(!outcome.simulated);
    }

    #[test]
    fn test_determinism() {
        let mut a = new_state(99);
        let mut b = new_state(99);
        let mut rng_a = seeded(1234);
        let mut rng_b = seeded(1234);
        a.start();
        b.start();

        for frame in 0..600 {
            let input = TickInput {
                left: frame % 90 < 40,
                right: frame % 90 >= 50,
            };
            tick(&mut a, &input, DT, &mut rng_a);
            tick(&mut b, &input, DT, &mut rng_b);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.wave, b.wave);
        assert_eq!(a.bullets.len(), b.bullets.len());
        assert_eq!(a.player.pos, b.player.pos);
    }
}
