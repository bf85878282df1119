//! Platform-agnostic media engine trait
//!
//! Abstracts the native playback primitive (an HTML audio element in the
//! browser, a simulated clock in tests).

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Native playback primitive
///
/// The controller holds a handle to the engine but never owns the media
/// behind it. Implementors clamp position writes to `[0, duration]`.
pub trait MediaEngine {
    /// Start or resume audio output
    fn play(&mut self) -> Result<()>;

    /// Pause audio output
    fn pause(&mut self) -> Result<()>;

    /// Whether audio is being produced right now
    fn is_playing(&self) -> bool;

    /// Current position in seconds
    fn current_time(&self) -> f64;

    /// Move to a position in seconds
    ///
    /// Out-of-range values are clamped by the engine, not the caller.
    fn set_current_time(&mut self, seconds: f64);

    /// Total length in seconds
    ///
    /// `None` (or a non-finite value) until the media has loaded.
    fn duration(&self) -> Option<f64>;
}

/// Lifecycle notifications emitted by an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Playback position changed
    TimeUpdate,

    /// Playback reached the end of the media
    Ended,

    /// Media data loaded, duration is now known
    LoadedData,
}

impl MediaEvent {
    /// DOM event name for this notification
    pub fn dom_name(self) -> &'static str {
        match self {
            MediaEvent::TimeUpdate => "timeupdate",
            MediaEvent::Ended => "ended",
            MediaEvent::LoadedData => "loadeddata",
        }
    }

    /// All notifications a controller listens to
    pub const ALL: [MediaEvent; 3] = [
        MediaEvent::TimeUpdate,
        MediaEvent::Ended,
        MediaEvent::LoadedData,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_names_match_media_element_events() {
        let names: Vec<_> = MediaEvent::ALL.iter().map(|e| e.dom_name()).collect();
        assert_eq!(names, ["timeupdate", "ended", "loadeddata"]);
    }
}
