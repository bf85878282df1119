//! Playback Events
//!
//! Event-based communication for UI synchronization. The controller queues
//! events as its state changes; the context layer drains and forwards them
//! to subscribed bindings.

use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};

/// Events emitted by a playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Published state changed (play/pause, progress, duration readiness)
    StateChanged {
        /// Snapshot after the change
        state: PlaybackState,
    },

    /// The engine rejected a command; state was left untouched
    Error {
        /// Error message
        message: String,
    },
}

impl PlaybackEvent {
    /// State carried by this event, if any
    pub fn state(&self) -> Option<&PlaybackState> {
        match self {
            PlaybackEvent::StateChanged { state } => Some(state),
            PlaybackEvent::Error { .. } => None,
        }
    }
}
