//! WASM bindings for duet-playback
//!
//! Adapts the browser's `<audio>` element to [`MediaEngine`](crate::MediaEngine)
//! and forwards its DOM events into a player context.

#[cfg(feature = "wasm")]
pub mod engine;

#[cfg(feature = "wasm")]
pub mod bridge;

#[cfg(feature = "wasm")]
pub use bridge::EngineBridge;

#[cfg(feature = "wasm")]
pub use engine::HtmlAudioEngine;
