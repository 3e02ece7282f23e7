//! Per-frame simulation step
//!
//! Moves every entity collection forward by `dt` seconds: stars, power-up
//! timers, the player and its fire, projectiles, pickups, the enemy grid,
//! enemy fire and particles. Collisions are resolved separately.

use glam::Vec2;

use super::rng::RandomSource;
use super::state::{GameState, PowerUpKind, Projectile};
use super::tick::TickInput;

/// Advance every collection by `dt` seconds
pub fn step(state: &mut GameState, input: &TickInput, dt: f32, rng: &mut impl RandomSource) {
    update_stars(state, dt, rng);
    state.powerups.tick(dt);
    update_player(state, input, dt);
    update_bullets(state, dt);
    update_enemy_bullets(state, dt);
    update_pickups(state, dt);
    update_enemies(state, dt);
    update_enemy_fire(state, dt, rng);
    update_particles(state, dt);
}

/// Stars drift down and wrap to the top at a new column
pub fn update_stars(state: &mut GameState, dt: f32, rng: &mut impl RandomSource) {
    let (width, height) = (state.viewport.width, state.viewport.height);
    for star in &mut state.stars {
        star.pos.y += star.speed * dt;
        if star.pos.y > height {
            GameState::respawn_star(star, width, rng);
        }
    }
}

/// Move the ship from the latched input and fire when the cooldown allows
pub fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let player = &mut state.player;
    if input.left {
        player.pos.x -= player.speed * dt;
    }
    if input.right {
        player.pos.x += player.speed * dt;
    }
    player.clamp_x(&state.viewport, state.tuning.player_edge_margin);

    state.fire_cooldown -= dt;
    if state.fire_cooldown <= 0.0 {
        fire_player(state);
        state.fire_cooldown = if state.powerups.is_active(PowerUpKind::Rapid) {
            state.tuning.rapid_fire_cooldown
        } else {
            state.tuning.fire_cooldown
        };
    }
}

/// Spawn the player's shot(s) from the nose of the ship
pub fn fire_player(state: &mut GameState) {
    let t = &state.tuning;
    let s = state.viewport.scale;
    let powerups = &state.powerups;

    let size_scale = if powerups.is_active(PowerUpKind::Big) {
        t.big_bullet_scale
    } else {
        1.0
    };
    let speed = if powerups.is_active(PowerUpKind::Fast) {
        t.fast_bullet_speed
    } else {
        t.bullet_speed
    } * s;
    let pierce = if powerups.is_active(PowerUpKind::Pierce) {
        t.pierce_count
    } else {
        0
    };
    let triple = powerups.is_active(PowerUpKind::Triple);
    let spread = t.triple_spread * s;
    let size = Vec2::new(t.bullet_width, t.bullet_height) * size_scale * s;
    let nose = state.player.pos - Vec2::new(0.0, state.player.size.y / 2.0);

    let shots = if triple { 3 } else { 1 };
    for i in 0..shots {
        let offset = if triple { (i as f32 - 1.0) * spread } else { 0.0 };
        state.bullets.push(Projectile {
            pos: nose + Vec2::new(offset, 0.0),
            size,
            speed,
            pierce,
        });
    }
}

/// Player projectiles fly up and are dropped above the top edge
pub fn update_bullets(state: &mut GameState, dt: f32) {
    let top = -state.tuning.bullet_despawn_margin;
    for bullet in &mut state.bullets {
        bullet.pos.y -= bullet.speed * dt;
    }
    state.bullets.retain(|b| b.pos.y >= top);
}

/// Enemy projectiles fall and are dropped below the bottom edge
pub fn update_enemy_bullets(state: &mut GameState, dt: f32) {
    let bottom = state.viewport.height + state.tuning.enemy_bullet_despawn_margin;
    for bullet in &mut state.enemy_bullets {
        bullet.pos.y += bullet.speed * dt;
    }
    state.enemy_bullets.retain(|b| b.pos.y <= bottom);
}

/// Pickups fall and are dropped below the bottom edge
pub fn update_pickups(state: &mut GameState, dt: f32) {
    let bottom = state.viewport.height + state.tuning.pickup_despawn_margin;
    for pickup in &mut state.pickups {
        pickup.pos.y += pickup.speed * dt;
    }
    state.pickups.retain(|p| p.pos.y <= bottom);
}

/// Horizontal grid speed for the current wave
pub fn enemy_speed(state: &GameState) -> f32 {
    (state.enemy_speed + state.wave as f32 * state.tuning.enemy_speed_per_wave)
        * state.viewport.scale
}

/// Move the grid sideways; when any live enemy passes the margin in its
/// direction of travel the whole grid reverses and steps down together.
pub fn update_enemies(state: &mut GameState, dt: f32) {
    if dt <= 0.0 {
        return;
    }

    let s = state.viewport.scale;
    let width = state.viewport.width;
    let edge_margin = state.tuning.enemy_edge_margin * s;
    let direction = state.enemy_direction;
    let dx = direction * enemy_speed(state) * dt;

    let mut hit_edge = false;
    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        enemy.pos.x += dx;
        let margin = edge_margin.max(enemy.size.x / 2.0);
        let past_right = direction > 0.0 && enemy.pos.x > width - margin;
        let past_left = direction < 0.0 && enemy.pos.x < margin;
        hit_edge |= past_right || past_left;
    }

    if hit_edge {
        state.enemy_direction = -direction;
        let step_down = state.tuning.enemy_step_down * s;
        for enemy in &mut state.enemies {
            enemy.pos.y += step_down;
        }
    }
}

/// Count down the enemy fire timer; on expiry a random live enemy shoots
pub fn update_enemy_fire(state: &mut GameState, dt: f32, rng: &mut impl RandomSource) {
    state.enemy_fire_timer -= dt;
    if state.enemy_fire_timer > 0.0 {
        return;
    }

    let t = &state.tuning;
    state.enemy_fire_timer = rng.range(t.enemy_fire_min_delay, t.enemy_fire_delay_range);

    let alive = state.alive_enemies().count();
    if alive == 0 {
        return;
    }
    let pick = rng.index(alive);
    let Some(shooter) = state.alive_enemies().nth(pick) else {
        return;
    };

    let s = state.viewport.scale;
    let t = &state.tuning;
    let projectile = Projectile {
        pos: shooter.pos + Vec2::new(0.0, shooter.size.y / 2.0),
        size: Vec2::new(t.enemy_bullet_width, t.enemy_bullet_height) * s,
        speed: (t.enemy_bullet_speed + state.wave as f32 * t.enemy_bullet_speed_per_wave) * s,
        pierce: 0,
    };
    state.enemy_bullets.push(projectile);
}

/// Particles drift and fade out
pub fn update_particles(state: &mut GameState, dt: f32) {
    for particle in &mut state.particles {
        particle.life -= dt;
        particle.pos += particle.vel * dt;
    }
    state.particles.retain(|p| p.life > 0.0);
}
