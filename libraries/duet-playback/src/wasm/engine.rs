//! `<audio>` element engine

use crate::{
    engine::MediaEngine,
    error::{PlaybackError, Result},
};
use wasm_bindgen::JsValue;
use web_sys::HtmlAudioElement;

/// Media engine backed by an `HtmlAudioElement`
///
/// Holds a JS reference to an element owned by the page.
#[derive(Debug, Clone)]
pub struct HtmlAudioEngine {
    element: HtmlAudioElement,
}

impl HtmlAudioEngine {
    /// Wrap an element
    pub fn new(element: HtmlAudioElement) -> Self {
        Self { element }
    }

    /// Underlying element
    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }
}

impl MediaEngine for HtmlAudioEngine {
    fn play(&mut self) -> Result<()> {
        // The returned promise is dropped, so a rejected play (e.g. blocked
        // autoplay) is not observed here.
        self.element.play().map(|_promise| ()).map_err(js_error)
    }

    fn pause(&mut self) -> Result<()> {
        self.element.pause().map_err(js_error)
    }

    fn is_playing(&self) -> bool {
        !self.element.paused()
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn duration(&self) -> Option<f64> {
        // NaN before metadata loads; filtered by the controller
        Some(self.element.duration())
    }
}

pub(crate) fn js_error(value: JsValue) -> PlaybackError {
    PlaybackError::Engine(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
