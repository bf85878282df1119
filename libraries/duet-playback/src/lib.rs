//! Duet Player - Playback Control
//!
//! Platform-agnostic playback state for a reusable audio player component.
//!
//! This crate provides:
//! - A playback controller that owns `is_playing` and progress (0-100%)
//! - Play, pause, relative jumps and fractional seeking
//! - Handling of engine notifications (time update, ended, loaded data)
//! - A shared context that publishes state changes to control bindings
//! - A simulated engine for tests and headless hosts
//!
//! # Architecture
//!
//! `duet-playback` does not decode or output audio. The native playback
//! primitive is supplied through the [`MediaEngine`] trait; in the browser
//! that is the `<audio>` element (feature `wasm`). Each controller owns its
//! state exclusively, so any number of players can live on one page.
//!
//! # Example
//!
//! ```rust
//! use duet_playback::{
//!     PlaybackConfig, PlaybackController, PlayerCommands, PlayerContext, SimulatedEngine,
//! };
//!
//! let engine = SimulatedEngine::loaded(200.0);
//! let controller = PlaybackController::with_engine(engine.clone(), PlaybackConfig::default());
//! let player = PlayerContext::new(controller);
//!
//! player.subscribe(|state| println!("playing={} progress={:.1}", state.is_playing, state.progress));
//!
//! player.play().unwrap();
//! for event in engine.advance(50.0) {
//!     player.dispatch(event);
//! }
//! assert_eq!(player.state().progress, 25.0);
//! ```

mod context;
mod controller;
mod engine;
mod error;
pub mod events;
mod sim;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use context::{PlayerCommands, PlayerContext, SubscriptionId};
pub use controller::PlaybackController;
pub use engine::{MediaEngine, MediaEvent};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use sim::SimulatedEngine;
pub use types::{PlaybackConfig, PlaybackState, PlaybackStatus, PlayerId, DEFAULT_JUMP_SECONDS};
