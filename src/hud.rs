//! HUD display
//!
//! Three numbers shown outside the canvas: score, wave and lives. The loop
//! pushes a snapshot whenever one of them changes.

use crate::sim::GameState;

/// Receives HUD values
pub trait HudDisplay {
    fn show(&mut self, hud: &HudSnapshot);
}

/// Values shown on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudSnapshot {
    pub score: u64,
    pub wave: u32,
    pub lives: u32,
}

impl HudSnapshot {
    pub fn of(state: &GameState) -> Self {
        Self {
            score: state.score,
            wave: state.wave,
            lives: state.lives,
        }
    }
}

/// Discards HUD updates (headless runs)
#[derive(Debug, Default)]
pub struct NullHud;

impl HudDisplay for NullHud {
    fn show(&mut self, _hud: &HudSnapshot) {}
}

/// Writes the HUD into `#score`, `#wave` and `#lives`
#[cfg(target_arch = "wasm32")]
pub struct DomHud {
    score: Option<web_sys::Element>,
    wave: Option<web_sys::Element>,
    lives: Option<web_sys::Element>,
}

#[cfg(target_arch = "wasm32")]
impl DomHud {
    pub fn new(document: &web_sys::Document) -> Self {
        let lookup = |id: &str| {
            let el = document.get_element_by_id(id);
            if el.is_none() {
                log::warn!("HUD element #{} not found", id);
            }
            el
        };
        Self {
            score: lookup("score"),
            wave: lookup("wave"),
            lives: lookup("lives"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl HudDisplay for DomHud {
    fn show(&mut self, hud: &HudSnapshot) {
        if let Some(el) = &self.score {
            el.set_text_content(Some(&hud.score.to_string()));
        }
        if let Some(el) = &self.wave {
            el.set_text_content(Some(&hud.wave.to_string()));
        }
        if let Some(el) = &self.lives {
            el.set_text_content(Some(&hud.lives.to_string()));
        }
    }
}
