//! Data-driven game balance
//!
//! Every gameplay constant lives here, authored at the 960x600 reference
//! resolution. Sizes, spacings and speeds are multiplied by the viewport
//! scale at the point of use. Overrides can be loaded from JSON; missing
//! fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: f32,
    },
}

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Run ===
    pub starting_lives: u32,
    pub kill_score: u64,

    // === Player ===
    pub player_size: f32,
    /// Distance from the bottom edge to the player's center
    pub player_bottom_offset: f32,
    pub player_speed: f32,
    /// Unscaled pixel margin kept between the ship and the side edges
    pub player_edge_margin: f32,

    // === Player fire ===
    pub fire_cooldown: f32,
    pub rapid_fire_cooldown: f32,
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    pub fast_bullet_speed: f32,
    /// Size multiplier while Big is active
    pub big_bullet_scale: f32,
    pub triple_spread: f32,
    pub pierce_count: u32,
    /// Projectiles are dropped once this far above the top edge
    pub bullet_despawn_margin: f32,

    // === Enemies ===
    pub enemy_size: f32,
    pub enemy_base_speed: f32,
    /// Added to the base speed every time a wave is cleared
    pub enemy_speed_step: f32,
    /// Added to the horizontal speed per wave number
    pub enemy_speed_per_wave: f32,
    pub enemy_step_down: f32,
    pub enemy_edge_margin: f32,
    pub grid_columns: u32,
    pub grid_base_rows: u32,
    pub grid_max_extra_rows: u32,
    pub grid_spacing_x: f32,
    pub grid_min_spacing_x: f32,
    /// Horizontal room reserved when fitting the grid into the playfield
    pub grid_side_padding: f32,
    pub grid_spacing_y: f32,
    pub grid_min_offset_x: f32,
    pub grid_offset_y: f32,
    /// Front-line breach triggers when an enemy passes `player.y - margin`
    pub breach_margin: f32,

    // === Enemy fire ===
    pub enemy_fire_min_delay: f32,
    pub enemy_fire_delay_range: f32,
    pub enemy_bullet_width: f32,
    pub enemy_bullet_height: f32,
    pub enemy_bullet_speed: f32,
    pub enemy_bullet_speed_per_wave: f32,
    pub enemy_bullet_despawn_margin: f32,

    // === Power-ups ===
    pub powerup_drop_chance: f32,
    pub powerup_duration: f32,
    pub pickup_size: f32,
    pub pickup_fall_speed: f32,
    pub pickup_despawn_margin: f32,

    // === Effects ===
    pub explosion_particles: u32,
    pub particle_spread_speed: f32,
    pub particle_min_life: f32,
    pub particle_life_range: f32,

    // === Background ===
    pub star_min_radius: f32,
    pub star_radius_range: f32,
    pub star_min_speed: f32,
    pub star_speed_range: f32,
    pub star_min_alpha: f32,
    pub star_alpha_range: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            kill_score: 120,

            player_size: 64.0,
            player_bottom_offset: 70.0,
            player_speed: 320.0,
            player_edge_margin: 16.0,

            fire_cooldown: 0.35,
            rapid_fire_cooldown: 0.18,
            bullet_width: 6.0,
            bullet_height: 16.0,
            bullet_speed: 420.0,
            fast_bullet_speed: 560.0,
            big_bullet_scale: 1.8,
            triple_spread: 16.0,
            pierce_count: 2,
            bullet_despawn_margin: 20.0,

            enemy_size: 42.0,
            enemy_base_speed: 22.0,
            enemy_speed_step: 3.0,
            enemy_speed_per_wave: 3.0,
            enemy_step_down: 16.0,
            enemy_edge_margin: 24.0,
            grid_columns: 8,
            grid_base_rows: 3,
            grid_max_extra_rows: 3,
            grid_spacing_x: 80.0,
            grid_min_spacing_x: 48.0,
            grid_side_padding: 80.0,
            grid_spacing_y: 54.0,
            grid_min_offset_x: 20.0,
            grid_offset_y: 40.0,
            breach_margin: 20.0,

            enemy_fire_min_delay: 0.7,
            enemy_fire_delay_range: 1.4,
            enemy_bullet_width: 6.0,
            enemy_bullet_height: 16.0,
            enemy_bullet_speed: 220.0,
            enemy_bullet_speed_per_wave: 10.0,
            enemy_bullet_despawn_margin: 20.0,

            powerup_drop_chance: 0.08,
            powerup_duration: 10.0,
            pickup_size: 22.0,
            pickup_fall_speed: 90.0,
            pickup_despawn_margin: 40.0,

            explosion_particles: 16,
            particle_spread_speed: 140.0,
            particle_min_life: 0.6,
            particle_life_range: 0.4,

            star_min_radius: 0.5,
            star_radius_range: 1.6,
            star_min_speed: 10.0,
            star_speed_range: 25.0,
            star_min_alpha: 0.4,
            star_alpha_range: 0.6,
        }
    }
}

impl Tuning {
    /// Parse a (partial) tuning override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("player_size", self.player_size),
            ("player_speed", self.player_speed),
            ("fire_cooldown", self.fire_cooldown),
            ("rapid_fire_cooldown", self.rapid_fire_cooldown),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("bullet_speed", self.bullet_speed),
            ("fast_bullet_speed", self.fast_bullet_speed),
            ("enemy_size", self.enemy_size),
            ("grid_spacing_x", self.grid_spacing_x),
            ("grid_min_spacing_x", self.grid_min_spacing_x),
            ("grid_spacing_y", self.grid_spacing_y),
            ("enemy_bullet_speed", self.enemy_bullet_speed),
            ("pickup_size", self.pickup_size),
            ("powerup_duration", self.powerup_duration),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::OutOfRange {
                    field,
                    expected: "a positive number",
                    value,
                });
            }
        }

        if !(0.0..=1.0).contains(&self.powerup_drop_chance) {
            return Err(TuningError::OutOfRange {
                field: "powerup_drop_chance",
                expected: "between 0 and 1",
                value: self.powerup_drop_chance,
            });
        }

        if self.grid_columns == 0 {
            return Err(TuningError::OutOfRange {
                field: "grid_columns",
                expected: "at least 1",
                value: 0.0,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "kill_score": 250, "starting_lives": 5 }"#).unwrap();
        assert_eq!(tuning.kill_score, 250);
        assert_eq!(tuning.starting_lives, 5);
        assert_eq!(tuning.fire_cooldown, Tuning::default().fire_cooldown);
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_values() {
        let err = Tuning::from_json(r#"{ "fire_cooldown": 0.0 }"#).unwrap_err();
        match err {
            TuningError::OutOfRange { field, .. } => assert_eq!(field, "fire_cooldown"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_drop_chance_above_one() {
        assert!(Tuning::from_json(r#"{ "powerup_drop_chance": 1.5 }"#).is_err());
    }

    #[test]
    fn test_default_round_trips_through_json() {
        let json = serde_json::to_string(&Tuning::default()).unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }
}
