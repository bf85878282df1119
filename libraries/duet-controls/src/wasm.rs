//! WASM bindings for duet-controls
//!
//! Exposes one player (controller, `<audio>` bridge and control surface) to
//! JavaScript. Create one `WasmPlayer` per audio element; instances share
//! nothing.

use crate::{
    binding::ControlId,
    progress::TrackGeometry,
    surface::{ControlSurface, SurfaceView},
};
use duet_playback::{
    wasm::{EngineBridge, HtmlAudioEngine},
    PlaybackConfig, PlaybackController, PlaybackError, PlayerCommands, PlayerContext,
    DEFAULT_JUMP_SECONDS,
};
use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

/// JS-facing player
#[wasm_bindgen]
pub struct WasmPlayer {
    surface: ControlSurface<PlayerContext<HtmlAudioEngine>>,
    bridge: Option<EngineBridge>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Mount a player on an audio element
    ///
    /// `controls` names the controls to lay out (e.g. `["play", "pause",
    /// "progress"]`); all of them when omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(
        element: HtmlAudioElement,
        jump_seconds: Option<f64>,
        controls: Option<Vec<String>>,
    ) -> Result<WasmPlayer, JsValue> {
        console_error_panic_hook::set_once();

        let config = PlaybackConfig {
            jump_seconds: jump_seconds.unwrap_or(DEFAULT_JUMP_SECONDS),
        };
        config.validate().map_err(to_js)?;

        let layout = match controls {
            Some(names) => names
                .iter()
                .map(String::as_str)
                .map(parse_control)
                .collect::<Result<Vec<_>, _>>()?,
            None => ControlId::ALL.to_vec(),
        };

        let controller = PlaybackController::with_engine(HtmlAudioEngine::new(element.clone()), config);
        let context = PlayerContext::new(controller);
        let bridge = EngineBridge::attach(&element, &context).map_err(to_js)?;

        Ok(Self {
            surface: ControlSurface::with_layout(context, &layout),
            bridge: Some(bridge),
        })
    }

    // ===== Playback Control =====

    pub fn play(&self) -> Result<(), JsValue> {
        self.surface.player().play().map_err(to_js)
    }

    pub fn pause(&self) -> Result<(), JsValue> {
        self.surface.player().pause().map_err(to_js)
    }

    #[wasm_bindgen(js_name = jumpForward)]
    pub fn jump_forward(&self, seconds: Option<f64>) -> Result<(), JsValue> {
        let player = self.surface.player();
        player
            .jump_forward(seconds.unwrap_or_else(|| player.jump_seconds()))
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = jumpBackward)]
    pub fn jump_backward(&self, seconds: Option<f64>) -> Result<(), JsValue> {
        let player = self.surface.player();
        player
            .jump_backward(seconds.unwrap_or_else(|| player.jump_seconds()))
            .map_err(to_js)
    }

    /// Seek to a fraction (0.0 - 1.0) of the track
    #[wasm_bindgen(js_name = seekTo)]
    pub fn seek_to(&self, fraction: f64) -> Result<(), JsValue> {
        self.surface.player().seek_to(fraction).map_err(to_js)
    }

    /// Seek from a pointer event on the progress bar
    ///
    /// `left` and `width` must describe the outer track
    /// (`getBoundingClientRect()` of the track, not of the event target).
    /// Returns `undefined` when this player has no progress bar.
    #[wasm_bindgen(js_name = seekFromPointer)]
    pub fn seek_from_pointer(&self, client_x: f64, left: f64, width: f64) -> Result<Option<f64>, JsValue> {
        self.surface
            .press_progress_in(client_x, TrackGeometry::new(left, width))
            .map_err(to_js)
    }

    /// Activate a control by name ("play", "pause", "toggle", "forward", "back")
    pub fn activate(&self, control: &str) -> Result<bool, JsValue> {
        let id = parse_control(control)?;
        if !self.surface.has_control(id) {
            return Err(JsValue::from_str(&format!("Player has no '{}' control", id)));
        }
        self.surface.activate(id).map_err(to_js)
    }

    // ===== State Queries =====

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.surface.player().state().is_playing
    }

    pub fn progress(&self) -> f64 {
        self.surface.player().state().progress
    }

    /// Current control view as a plain JS object
    pub fn render(&self) -> JsValue {
        view_to_js(&self.surface.render())
    }

    // ===== Event Listeners =====

    /// Register a callback receiving the rendered view after every change
    #[wasm_bindgen(js_name = onStateChange)]
    pub fn on_state_change(&self, callback: Function) {
        self.surface.on_render(move |view| {
            callback.call1(&JsValue::NULL, &view_to_js(&view)).ok();
        });
    }

    /// Detach from the audio element
    ///
    /// Listeners are removed and further commands fail.
    pub fn unmount(&mut self) {
        if let Some(mut bridge) = self.bridge.take() {
            bridge.detach();
        }
        self.surface.player().unmount();
    }
}

impl Drop for WasmPlayer {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn parse_control(name: &str) -> Result<ControlId, JsValue> {
    ControlId::from_name(name).ok_or_else(|| JsValue::from_str(&format!("Unknown control '{}'", name)))
}

fn view_to_js(view: &SurfaceView) -> JsValue {
    serde_wasm_bindgen::to_value(view).unwrap_or(JsValue::NULL)
}

fn to_js(error: PlaybackError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
