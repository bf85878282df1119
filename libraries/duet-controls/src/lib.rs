//! Duet Player - Control Bindings
//!
//! Stateless presentation bindings over a player's shared handle:
//!
//! | Binding | Action | Enabled when |
//! |---|---|---|
//! | [`PlayControl`] | play | paused |
//! | [`PauseControl`] | pause | playing |
//! | [`PlayPauseToggle`] | shows pause while playing, play otherwise | delegates |
//! | [`JumpForwardControl`] | jump forward | playing |
//! | [`JumpBackControl`] | jump back | playing |
//! | [`ProgressBar`] | seek to clicked point | always |
//!
//! [`ControlSurface`] lays out a chosen set of them for one player and
//! renders a [`SurfaceView`] for the host to draw.
//!
//! # Example
//!
//! ```rust
//! use duet_controls::{ControlId, ControlSurface, TrackGeometry};
//! use duet_playback::{PlaybackConfig, PlaybackController, PlayerContext, SimulatedEngine};
//!
//! let engine = SimulatedEngine::loaded(200.0);
//! let player = PlayerContext::new(PlaybackController::with_engine(
//!     engine.clone(),
//!     PlaybackConfig::default(),
//! ));
//! let mut surface = ControlSurface::new(player);
//! surface.set_track(TrackGeometry::new(0.0, 400.0));
//!
//! surface.activate(ControlId::Play).unwrap();
//! surface.press_progress(100.0).unwrap();
//!
//! assert_eq!(engine.position(), 50.0);
//! assert_eq!(surface.render().fill_percent(), Some(25.0));
//! ```

mod binding;
mod buttons;
mod progress;
mod surface;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use binding::{ControlBinding, ControlId};
pub use buttons::{
    JumpBackControl, JumpForwardControl, PauseControl, PlayControl, PlayPauseToggle, ToggleVariant,
};
pub use progress::{ProgressBar, TrackGeometry};
pub use surface::{ButtonView, ControlSurface, ProgressView, SurfaceView, ToggleView};
