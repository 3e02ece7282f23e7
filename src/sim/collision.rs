//! Collision detection and response
//!
//! Categories are checked in a fixed priority order and at most one event
//! is resolved per frame: the first match wins and the lower-priority
//! categories wait for the next frame.
//!
//! 1. Player projectile vs live enemy
//! 2. Enemy projectile vs player
//! 3. Pickup vs player
//! 4. Front-line breach (an enemy reached the player's row)

use glam::Vec2;

use super::rng::RandomSource;
use super::state::{Burst, GameState, PowerUp, PowerUpKind};

/// The event resolved this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionEvent {
    None,
    /// A player projectile destroyed the enemy at `enemy` (grid index)
    PlayerHitEnemy {
        enemy: usize,
        /// The projectile survived by spending a pierce
        pierced: bool,
        /// Power-up dropped by the kill
        drop: Option<PowerUpKind>,
    },
    /// An enemy projectile hit the ship
    EnemyHitPlayer { lives_left: u32 },
    /// The ship collected a power-up
    PickupCollected(PowerUpKind),
    /// An enemy reached the player's row: the run is over
    FrontLineBreach,
}

/// Resolve at most one collision for this frame
pub fn resolve_collisions(state: &mut GameState, rng: &mut impl RandomSource) -> CollisionEvent {
    resolve_player_fire(state, rng)
        .or_else(|| resolve_enemy_fire(state, rng))
        .or_else(|| resolve_pickups(state))
        .or_else(|| resolve_front_line(state))
        .unwrap_or(CollisionEvent::None)
}

/// Newest projectile first, enemies in grid order
fn resolve_player_fire(
    state: &mut GameState,
    rng: &mut impl RandomSource,
) -> Option<CollisionEvent> {
    let (bullet_idx, enemy_idx) = (0..state.bullets.len()).rev().find_map(|i| {
        let tip = state.bullets[i].pos;
        state
            .enemies
            .iter()
            .position(|e| e.alive && e.bounds().contains_point(tip))
            .map(|j| (i, j))
    })?;

    let enemy_pos = state.enemies[enemy_idx].pos;
    state.enemies[enemy_idx].alive = false;

    let bullet = &mut state.bullets[bullet_idx];
    let pierced = bullet.pierce > 0;
    if pierced {
        bullet.pierce -= 1;
    } else {
        state.bullets.remove(bullet_idx);
    }

    state.score += state.tuning.kill_score;
    state.spawn_explosion(enemy_pos, Burst::EnemyDestroyed, rng);
    let drop = maybe_drop_powerup(state, enemy_pos, rng);

    Some(CollisionEvent::PlayerHitEnemy {
        enemy: enemy_idx,
        pierced,
        drop,
    })
}

/// Roll for a power-up drop where an enemy died
fn maybe_drop_powerup(
    state: &mut GameState,
    pos: Vec2,
    rng: &mut impl RandomSource,
) -> Option<PowerUpKind> {
    if rng.next_f32() > state.tuning.powerup_drop_chance {
        return None;
    }
    let kind = PowerUpKind::ALL[rng.index(PowerUpKind::ALL.len())];
    let s = state.viewport.scale;
    state.pickups.push(PowerUp {
        pos,
        speed: state.tuning.pickup_fall_speed * s,
        size: state.tuning.pickup_size * s,
        kind,
    });
    Some(kind)
}

fn resolve_enemy_fire(state: &mut GameState, rng: &mut impl RandomSource) -> Option<CollisionEvent> {
    let ship = state.player.bounds();
    let idx = state
        .enemy_bullets
        .iter()
        .rposition(|b| ship.contains_point(b.pos))?;

    state.enemy_bullets.remove(idx);
    state.lose_life();
    state.spawn_explosion(state.player.pos, Burst::PlayerHit, rng);

    Some(CollisionEvent::EnemyHitPlayer {
        lives_left: state.lives,
    })
}

fn resolve_pickups(state: &mut GameState) -> Option<CollisionEvent> {
    let ship = state.player.bounds();
    let idx = state
        .pickups
        .iter()
        .rposition(|p| ship.contains_point(p.pos))?;

    let pickup = state.pickups.remove(idx);
    state
        .powerups
        .grant(pickup.kind, state.tuning.powerup_duration);
    log::debug!("Picked up {:?}", pickup.kind);

    Some(CollisionEvent::PickupCollected(pickup.kind))
}

fn resolve_front_line(state: &mut GameState) -> Option<CollisionEvent> {
    let lowest = state
        .alive_enemies()
        .map(|e| e.pos.y)
        .fold(0.0f32, f32::max);
    let threshold = state.player.pos.y - state.tuning.breach_margin * state.viewport.scale;
    if lowest <= threshold {
        return None;
    }

    state.end_run();
    Some(CollisionEvent::FrontLineBreach)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Viewport;
    use crate::settings::Settings;
    use crate::sim::rng::ScriptedRandom;
    use crate::sim::state::{GamePhase, Projectile};
    use crate::tuning::Tuning;

    fn running_state() -> GameState {
        let mut rng = ScriptedRandom::constant(0.5);
        let mut state = GameState::new(
            Tuning::default(),
            Viewport::reference(),
            &Settings::default(),
            &mut rng,
        );
        state.start();
        state
    }

    fn projectile_at(pos: Vec2, pierce: u32) -> Projectile {
        Projectile {
            pos,
            size: Vec2::new(6.0, 16.0),
            speed: 420.0,
            pierce,
        }
    }

    /// Never drops a power-up
    fn no_drop_rng() -> ScriptedRandom {
        ScriptedRandom::constant(0.9)
    }

    #[test]
    fn test_kill_scenario() {
        let mut state = running_state();
        let mut rng = no_drop_rng();
        let target = state.enemies[5].pos;
        state.bullets.push(projectile_at(target, 0));

        let event = resolve_collisions(&mut state, &mut rng);

        assert_eq!(
            event,
            CollisionEvent::PlayerHitEnemy {
                enemy: 5,
                pierced: false,
                drop: None
            }
        );
        assert!(!state.enemies[5].alive);
        assert_eq!(state.score, 120);
        assert!(state.bullets.is_empty());
        assert_eq!(state.particles.len(), 16);
        assert!(state.particles.iter().all(|p| p.pos == target));
        assert!(state.pickups.is_empty());
    }

    #[test]
    fn test_resolver_is_idempotent_without_movement() {
        let mut state = running_state();
        let mut rng = no_drop_rng();
        state.bullets.push(projectile_at(state.enemies[3].pos, 0));

        assert_ne!(resolve_collisions(&mut state, &mut rng), CollisionEvent::None);
        let score = state.score;
        let particles = state.particles.len();

        assert_eq!(resolve_collisions(&mut state, &mut rng), CollisionEvent::None);
        assert_eq!(state.score, score);
        assert_eq!(state.particles.len(), particles);
    }

    #[test]
    fn test_pierce_keeps_projectile() {
        let mut state = running_state();
        let mut rng = no_drop_rng();
        state.bullets.push(projectile_at(state.enemies[0].pos, 2));

        let event = resolve_collisions(&mut state, &mut rng);
        assert!(matches!(
            event,
            CollisionEvent::PlayerHitEnemy { pierced: true, .. }
        ));
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pierce, 1);

        // Move the survivor onto the next enemy
        state.bullets[0].pos = state.enemies[1].pos;
        resolve_collisions(&mut state, &mut rng);
        assert_eq!(state.bullets[0].pierce, 0);

        state.bullets[0].pos = state.enemies[2].pos;
        resolve_collisions(&mut state, &mut rng);
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, 360);
    }

    #[test]
    fn test_one_event_per_frame() {
        let mut state = running_state();
        let mut rng = no_drop_rng();
        state.bullets.push(projectile_at(state.enemies[0].pos, 0));
        state.bullets.push(projectile_at(state.enemies[1].pos, 0));
        state
            .enemy_bullets
            .push(projectile_at(state.player.pos, 0));

        // Newest projectile resolves first; the rest waits
        let event = resolve_collisions(&mut state, &mut rng);
        assert!(matches!(
            event,
            CollisionEvent::PlayerHitEnemy { enemy: 1, .. }
        ));
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 120);

        let event = resolve_collisions(&mut state, &mut rng);
        assert!(matches!(
            event,
            CollisionEvent::PlayerHitEnemy { enemy: 0, .. }
        ));

        let event = resolve_collisions(&mut state, &mut rng);
        assert_eq!(event, CollisionEvent::EnemyHitPlayer { lives_left: 2 });
    }

    #[test]
    fn test_power_up_drop() {
        let mut state = running_state();
        // Drop roll 0.05 (< 0.08), kind roll 0.5 -> Triple
        let mut rng = ScriptedRandom::new(vec![
            0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5,
            0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5,
            0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5,
            0.05, 0.5,
        ]);
        let target = state.enemies[2].pos;
        state.bullets.push(projectile_at(target, 0));

        let event = resolve_collisions(&mut state, &mut rng);
        assert!(matches!(
            event,
            CollisionEvent::PlayerHitEnemy {
                drop: Some(PowerUpKind::Triple),
                ..
            }
        ));
        assert_eq!(state.pickups.len(), 1);
        assert_eq!(state.pickups[0].pos, target);
        assert_eq!(state.pickups[0].size, 22.0);
        assert_eq!(state.pickups[0].speed, 90.0);
    }

    #[test]
    fn test_three_hits_end_the_run() {
        let mut state = running_state();
        let mut rng = no_drop_rng();

        for expected in [2, 1] {
            state
                .enemy_bullets
                .push(projectile_at(state.player.pos, 0));
            let event = resolve_collisions(&mut state, &mut rng);
            assert_eq!(event, CollisionEvent::EnemyHitPlayer { lives_left: expected });
            assert_eq!(state.phase, GamePhase::Running);
        }

        state
            .enemy_bullets
            .push(projectile_at(state.player.pos, 0));
        let event = resolve_collisions(&mut state, &mut rng);
        assert_eq!(event, CollisionEvent::EnemyHitPlayer { lives_left: 0 });
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.particles.len(), 48);
    }

    #[test]
    fn test_pickup_overwrites_timer() {
        let mut state = running_state();
        let mut rng = no_drop_rng();
        let pickup = PowerUp {
            pos: state.player.pos,
            speed: 90.0,
            size: 22.0,
            kind: PowerUpKind::Rapid,
        };

        state.pickups.push(pickup.clone());
        assert_eq!(
            resolve_collisions(&mut state, &mut rng),
            CollisionEvent::PickupCollected(PowerUpKind::Rapid)
        );
        state.powerups.tick(0.5);

        state.pickups.push(pickup);
        resolve_collisions(&mut state, &mut rng);
        assert_eq!(state.powerups.rapid, 10.0);
        assert!(state.pickups.is_empty());
    }

    #[test]
    fn test_front_line_breach() {
        let mut state = running_state();
        let mut rng = no_drop_rng();
        assert_eq!(state.lives, 3);

        // Threshold is player.y - 20 = 510
        state.enemies[4].pos.y = 510.0;
        assert_eq!(resolve_collisions(&mut state, &mut rng), CollisionEvent::None);

        state.enemies[4].pos.y = 511.0;
        assert_eq!(
            resolve_collisions(&mut state, &mut rng),
            CollisionEvent::FrontLineBreach
        );
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_dead_enemies_do_not_breach() {
        let mut state = running_state();
        let mut rng = no_drop_rng();
        state.enemies[4].pos.y = 590.0;
        state.enemies[4].alive = false;
        assert_eq!(resolve_collisions(&mut state, &mut rng), CollisionEvent::None);
        assert!(state.is_running());
    }
}
