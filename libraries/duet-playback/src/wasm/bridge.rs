//! DOM event forwarding

use super::engine::{js_error, HtmlAudioEngine};
use crate::{context::PlayerContext, engine::MediaEvent, error::Result};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Event, HtmlAudioElement};

type DomListener = Closure<dyn FnMut(Event)>;

/// Forwards `timeupdate`, `ended` and `loadeddata` from an element to a
/// player context
///
/// Listeners are removed by [`EngineBridge::detach`] or on drop, so no
/// callback outlives the player.
pub struct EngineBridge {
    element: HtmlAudioElement,
    listeners: Vec<(MediaEvent, DomListener)>,
}

impl EngineBridge {
    /// Register listeners on `element` that dispatch into `context`
    pub fn attach(element: &HtmlAudioElement, context: &PlayerContext<HtmlAudioEngine>) -> Result<Self> {
        let mut bridge = Self {
            element: element.clone(),
            listeners: Vec::with_capacity(MediaEvent::ALL.len()),
        };

        for event in MediaEvent::ALL {
            let ctx = context.clone();
            let listener = DomListener::new(move |_: Event| ctx.dispatch(event));
            // On failure, drop detaches whatever was registered so far
            element
                .add_event_listener_with_callback(event.dom_name(), listener.as_ref().unchecked_ref())
                .map_err(js_error)?;
            bridge.listeners.push((event, listener));
        }

        tracing::debug!(player = %context.id(), "engine bridge attached");
        Ok(bridge)
    }

    /// Remove all listeners
    pub fn detach(&mut self) {
        for (event, listener) in self.listeners.drain(..) {
            // Removal only fails for non-function callbacks, which these are not
            let _ = self
                .element
                .remove_event_listener_with_callback(event.dom_name(), listener.as_ref().unchecked_ref());
        }
    }

    /// Whether listeners are still registered
    pub fn is_attached(&self) -> bool {
        !self.listeners.is_empty()
    }
}

impl Drop for EngineBridge {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for EngineBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineBridge")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
