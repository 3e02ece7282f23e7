//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Time advances only through the `dt` handed to `tick`
//! - Randomness comes from an injected `RandomSource`
//! - Entity collections keep a stable order

pub mod collision;
pub mod geom;
pub mod rng;
pub mod state;
pub mod step;
pub mod tick;
pub mod wave;

pub use collision::{CollisionEvent, resolve_collisions};
pub use geom::Rect;
pub use rng::{RandomSource, ScriptedRandom, seeded};
pub use state::{
    Burst, Enemy, GamePhase, GameState, Particle, Player, PowerUp, PowerUpKind, PowerUpTimers,
    Projectile, Star,
};
pub use step::step;
pub use tick::{TickInput, TickOutcome, tick};
pub use wave::{GridLayout, advance_wave_if_needed, grid_layout, spawn_wave};
