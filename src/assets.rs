//! Image assets
//!
//! The two avatars load asynchronously. The game starts once both have
//! settled, whether they loaded or failed; a missing image only affects
//! what the surface draws.

/// Images drawn by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageId {
    Player,
    Enemy,
}

impl ImageId {
    pub const ALL: [ImageId; 2] = [ImageId::Player, ImageId::Enemy];

    pub fn path(&self) -> &'static str {
        match self {
            ImageId::Player => "images/august.png",
            ImageId::Enemy => "images/fredrik.png",
        }
    }

    fn slot(&self) -> usize {
        match self {
            ImageId::Player => 0,
            ImageId::Enemy => 1,
        }
    }
}

/// Load state of a single image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Loaded,
    Failed,
}

/// Tracks image loads and fires the ready signal exactly once
#[derive(Debug, Default)]
pub struct AssetTracker {
    states: [LoadState; 2],
    ready_fired: bool,
}

impl AssetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful load. Returns true when the game should start now.
    pub fn mark_loaded(&mut self, id: ImageId) -> bool {
        self.states[id.slot()] = LoadState::Loaded;
        log::info!("Loaded {}", id.path());
        self.take_ready()
    }

    /// Record a failed load. Returns true when the game should start now.
    pub fn mark_failed(&mut self, id: ImageId) -> bool {
        self.states[id.slot()] = LoadState::Failed;
        log::warn!("Failed to load {}; continuing without it", id.path());
        self.take_ready()
    }

    fn all_settled(&self) -> bool {
        self.states.iter().all(|s| *s != LoadState::Pending)
    }

    fn take_ready(&mut self) -> bool {
        if self.ready_fired || !self.all_settled() {
            return false;
        }
        self.ready_fired = true;
        true
    }
}
