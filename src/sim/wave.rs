//! Wave progression and enemy grid layout

use glam::Vec2;

use super::state::{Enemy, GameState};
use crate::layout::Viewport;
use crate::tuning::Tuning;

/// Placement of an enemy grid inside the playfield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub rows: u32,
    pub columns: u32,
    pub spacing: Vec2,
    /// Center of the top-left enemy
    pub origin: Vec2,
    pub enemy_size: f32,
}

/// Rows for a wave: one extra row every two waves, up to the cap
pub fn rows_for_wave(tuning: &Tuning, wave: u32) -> u32 {
    let extra = (wave.saturating_sub(1) / 2).min(tuning.grid_max_extra_rows);
    tuning.grid_base_rows + extra
}

/// Lay the grid out for the current playfield, centered horizontally
pub fn grid_layout(tuning: &Tuning, viewport: &Viewport, wave: u32) -> GridLayout {
    let s = viewport.scale;
    let columns = tuning.grid_columns;
    let gaps = columns.saturating_sub(1).max(1) as f32;

    let desired = tuning.grid_spacing_x * s;
    let minimum = tuning.grid_min_spacing_x * s;
    let fit = (viewport.width - tuning.grid_side_padding * s) / gaps;
    // The minimum wins when the playfield is too narrow for it
    let spacing_x = desired.min(fit).max(minimum);

    let span = (columns.saturating_sub(1)) as f32 * spacing_x;
    let offset_x = (tuning.grid_min_offset_x * s).max((viewport.width - span) / 2.0);

    GridLayout {
        rows: rows_for_wave(tuning, wave),
        columns,
        spacing: Vec2::new(spacing_x, tuning.grid_spacing_y * s),
        origin: Vec2::new(offset_x, tuning.grid_offset_y * s),
        enemy_size: tuning.enemy_size * s,
    }
}

/// Replace the enemy collection with a full grid for the current wave
pub fn spawn_wave(state: &mut GameState) {
    let layout = grid_layout(&state.tuning, &state.viewport, state.wave);
    state.enemies.clear();
    state
        .enemies
        .reserve((layout.rows * layout.columns) as usize);

    for row in 0..layout.rows {
        for col in 0..layout.columns {
            let pos = layout.origin + layout.spacing * Vec2::new(col as f32, row as f32);
            state.enemies.push(Enemy {
                pos,
                size: Vec2::splat(layout.enemy_size),
                alive: true,
            });
        }
    }
}

/// Start the next wave once every enemy is down. Returns true on advance.
pub fn advance_wave_if_needed(state: &mut GameState) -> bool {
    if state.any_enemy_alive() {
        return false;
    }

    state.wave += 1;
    state.enemy_speed += state.tuning.enemy_speed_step;
    spawn_wave(state);
    log::info!(
        "Wave {}: {} enemies, base speed {}",
        state.wave,
        state.enemies.len(),
        state.enemy_speed
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::rng::ScriptedRandom;

    fn new_state(viewport: Viewport) -> GameState {
        let mut rng = ScriptedRandom::constant(0.5);
        GameState::new(Tuning::default(), viewport, &Settings::default(), &mut rng)
    }

    #[test]
    fn test_rows_grow_every_two_waves_up_to_cap() {
        let tuning = Tuning::default();
        let rows: Vec<u32> = (1..=10).map(|w| rows_for_wave(&tuning, w)).collect();
        assert_eq!(rows, vec![3, 3, 4, 4, 5, 5, 6, 6, 6, 6]);
    }

    #[test]
    fn test_reference_layout_is_centered() {
        let layout = grid_layout(&Tuning::default(), &Viewport::reference(), 1);
        assert_eq!(layout.spacing, Vec2::new(80.0, 54.0));
        // (960 - 7 * 80) / 2
        assert_eq!(layout.origin, Vec2::new(200.0, 40.0));
        assert_eq!(layout.enemy_size, 42.0);
    }

    #[test]
    fn test_narrow_layout_uses_minimum_spacing() {
        // scale 0.4: desired 32 fits within (300 - 32) / 7
        let vp = Viewport::new(300.0, 360.0);
        let layout = grid_layout(&Tuning::default(), &vp, 1);
        assert!((layout.spacing.x - 32.0).abs() < 1e-4);

        // Playfield too narrow to fit even the minimum
        let vp = Viewport {
            width: 200.0,
            height: 600.0,
            scale: 1.0,
        };
        let layout = grid_layout(&Tuning::default(), &vp, 1);
        assert_eq!(layout.spacing.x, 48.0);
        assert_eq!(layout.origin.x, 20.0);
    }

    #[test]
    fn test_wave_transition() {
        let mut state = new_state(Viewport::reference());
        assert!(!advance_wave_if_needed(&mut state));

        for enemy in &mut state.enemies {
            enemy.alive = false;
        }
        let speed = state.enemy_speed;

        assert!(advance_wave_if_needed(&mut state));
        assert_eq!(state.wave, 2);
        assert_eq!(state.enemy_speed, speed + 3.0);
        assert_eq!(state.enemies.len(), 3 * 8);
        assert!(state.enemies.iter().all(|e| e.alive));

        for enemy in &mut state.enemies {
            enemy.alive = false;
        }
        assert!(advance_wave_if_needed(&mut state));
        assert_eq!(state.wave, 3);
        assert_eq!(state.enemies.len(), 4 * 8);
    }
}
