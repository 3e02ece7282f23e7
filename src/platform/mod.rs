//! Platform abstraction layer
//!
//! Browser lookups that can fail at startup: window, document, canvas,
//! 2D context and page chrome. Each returns a `PlatformError` instead of
//! panicking so the entry point can log one clear message.

use thiserror::Error;

/// Failures reaching the page the game is embedded in
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlatformError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("element #{0} is not a {1}")]
    WrongElementType(String, &'static str),
    #[error("canvas 2d context unavailable")]
    NoContext,
    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, Window};

    use super::PlatformError;

    impl From<JsValue> for PlatformError {
        fn from(value: JsValue) -> Self {
            PlatformError::Js(format!("{:?}", value))
        }
    }

    pub fn window() -> Result<Window, PlatformError> {
        web_sys::window().ok_or(PlatformError::NoWindow)
    }

    pub fn document() -> Result<Document, PlatformError> {
        window()?.document().ok_or(PlatformError::NoDocument)
    }

    pub fn canvas(document: &Document, id: &str) -> Result<HtmlCanvasElement, PlatformError> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| PlatformError::MissingElement(id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| PlatformError::WrongElementType(id.to_string(), "canvas"))
    }

    pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, PlatformError> {
        canvas
            .get_context("2d")?
            .ok_or(PlatformError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| PlatformError::NoContext)
    }

    /// Rendered height of the first element matching `selector`, 0 if absent
    pub fn offset_height(document: &Document, selector: &str) -> f32 {
        document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map(|el| el.offset_height() as f32)
            .unwrap_or(0.0)
    }

    /// Inner window size in CSS pixels
    pub fn window_size(window: &Window) -> (f32, f32) {
        let dim = |v: Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        (dim(window.inner_width()), dim(window.inner_height()))
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PlatformError::MissingElement("game".into()).to_string(),
            "element #game not found"
        );
        assert_eq!(
            PlatformError::WrongElementType("game".into(), "canvas").to_string(),
            "element #game is not a canvas"
        );
    }
}
