//! Neon Invaders - A single-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (movement, firing, collisions, waves, game state)
//! - `game`: Frame loop driver tying input, simulation, rendering and HUD together
//! - `renderer`: Render surface abstraction and scene drawing
//! - `input`: Latched movement flags and discrete commands
//! - `layout`: Viewport sizing and resolution scale
//! - `tuning`: Data-driven game balance
//! - `platform`: Browser lookups and their errors

pub mod assets;
pub mod game;
pub mod hud;
pub mod input;
pub mod layout;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Largest simulated step per frame (seconds); longer gaps are clamped
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Reference playfield the tuning values are authored against
    pub const REFERENCE_WIDTH: f32 = 960.0;
    pub const REFERENCE_HEIGHT: f32 = 600.0;

    /// Lower bound for the resolution scale
    pub const MIN_LAYOUT_SCALE: f32 = 0.4;

    /// Where stars re-enter after falling off the bottom
    pub const STAR_RESPAWN_Y: f32 = -4.0;
}
