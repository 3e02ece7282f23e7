//! Scene drawing
//!
//! Paints one frame from a `GameState` without mutating it. Draw order is
//! back to front: background and stars, enemies, player, projectiles,
//! pickups, particles, then the idle/paused overlay.

use glam::Vec2;

use super::{Color, RenderSurface, colors};
use crate::assets::ImageId;
use crate::sim::{Burst, GamePhase, GameState, PowerUpKind};

/// Side length of a particle square
const PARTICLE_SIZE: f32 = 3.0;
/// Glow radii around the player, before scaling
const PLAYER_GLOW_INNER: f32 = 10.0;
const PLAYER_GLOW_OUTER: f32 = 70.0;
/// Gap between an avatar's edge and its ring
const PLAYER_RING_GAP: f32 = 6.0;
const ENEMY_RING_GAP: f32 = 4.0;
const PICKUP_RING_GAP: f32 = 4.0;
const RING_WIDTH: f32 = 2.0;
const GLYPH_SIZE: f32 = 12.0;
const OVERLAY_TEXT_SIZE: f32 = 28.0;

/// Fill color of a pickup
pub fn pickup_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::Rapid => colors::PICKUP_RAPID,
        PowerUpKind::Big => colors::PICKUP_BIG,
        PowerUpKind::Triple => colors::PICKUP_TRIPLE,
        PowerUpKind::Fast => colors::PICKUP_FAST,
        PowerUpKind::Pierce => colors::PICKUP_PIERCE,
    }
}

fn particle_color(burst: Burst) -> Color {
    match burst {
        Burst::EnemyDestroyed => colors::ENEMY_EXPLOSION,
        Burst::PlayerHit => colors::PLAYER_EXPLOSION,
    }
}

/// Message shown over the playfield, if any
pub fn overlay_text(phase: GamePhase) -> Option<&'static str> {
    match phase {
        GamePhase::Running => None,
        GamePhase::Idle => Some("Press Start"),
        GamePhase::Paused => Some("Paused"),
    }
}

/// Draw a full frame
pub fn draw_scene(state: &GameState, surface: &mut impl RenderSurface) {
    draw_background(state, surface);
    draw_enemies(state, surface);
    draw_player(state, surface);
    draw_projectiles(state, surface);
    draw_pickups(state, surface);
    draw_particles(state, surface);
    draw_overlay(state, surface);
}

fn draw_background(state: &GameState, surface: &mut impl RenderSurface) {
    let (w, h) = (state.viewport.width, state.viewport.height);
    surface.clear(w, h);
    surface.fill_rect(0.0, 0.0, w, h, colors::BACKGROUND);
    for star in &state.stars {
        surface.fill_circle(star.pos, star.radius, colors::STAR.with_alpha(star.alpha));
    }
}

/// Image clipped to a circle inscribed in the entity's box
fn draw_avatar(surface: &mut impl RenderSurface, image: ImageId, center: Vec2, size: Vec2) {
    surface.push_circle_clip(center, size.x / 2.0);
    surface.draw_image(
        image,
        center.x - size.x / 2.0,
        center.y - size.y / 2.0,
        size.x,
        size.y,
    );
    surface.pop_clip();
}

fn draw_enemies(state: &GameState, surface: &mut impl RenderSurface) {
    let gap = ENEMY_RING_GAP * state.scale();
    for enemy in state.alive_enemies() {
        draw_avatar(surface, ImageId::Enemy, enemy.pos, enemy.size);
        surface.stroke_circle(
            enemy.pos,
            enemy.size.x / 2.0 + gap,
            RING_WIDTH,
            colors::ENEMY_RING,
        );
    }
}

fn draw_player(state: &GameState, surface: &mut impl RenderSurface) {
    let s = state.scale();
    let player = &state.player;
    surface.fill_glow(
        player.pos,
        PLAYER_GLOW_INNER * s,
        PLAYER_GLOW_OUTER * s,
        colors::PLAYER_GLOW,
    );
    draw_avatar(surface, ImageId::Player, player.pos, player.size);
    surface.stroke_circle(
        player.pos,
        player.size.x / 2.0 + PLAYER_RING_GAP * s,
        RING_WIDTH,
        colors::PLAYER_RING,
    );
}

fn draw_projectiles(state: &GameState, surface: &mut impl RenderSurface) {
    // Player shots extend upward from their anchor, enemy shots downward
    for b in &state.bullets {
        surface.fill_rect(
            b.pos.x - b.size.x / 2.0,
            b.pos.y - b.size.y,
            b.size.x,
            b.size.y,
            colors::PLAYER_BULLET,
        );
    }
    for b in &state.enemy_bullets {
        surface.fill_rect(
            b.pos.x - b.size.x / 2.0,
            b.pos.y,
            b.size.x,
            b.size.y,
            colors::ENEMY_BULLET,
        );
    }
}

fn draw_pickups(state: &GameState, surface: &mut impl RenderSurface) {
    let gap = PICKUP_RING_GAP * state.scale();
    for p in &state.pickups {
        let radius = p.size / 2.0;
        surface.fill_circle(p.pos, radius, pickup_color(p.kind));
        surface.stroke_circle(p.pos, radius + gap, RING_WIDTH, colors::PICKUP_RING);
        surface.fill_text(
            p.kind.glyph(),
            p.pos + Vec2::new(0.0, 0.5),
            GLYPH_SIZE,
            colors::PICKUP_GLYPH,
        );
    }
}

fn draw_particles(state: &GameState, surface: &mut impl RenderSurface) {
    for p in &state.particles {
        surface.fill_rect(
            p.pos.x,
            p.pos.y,
            PARTICLE_SIZE,
            PARTICLE_SIZE,
            particle_color(p.burst),
        );
    }
}

fn draw_overlay(state: &GameState, surface: &mut impl RenderSurface) {
    let Some(text) = overlay_text(state.phase) else {
        return;
    };
    let (w, h) = (state.viewport.width, state.viewport.height);
    surface.fill_rect(0.0, 0.0, w, h, colors::OVERLAY);
    surface.fill_text(
        text,
        Vec2::new(w / 2.0, h / 2.0),
        OVERLAY_TEXT_SIZE * state.scale(),
        colors::OVERLAY_TEXT,
    );
}
