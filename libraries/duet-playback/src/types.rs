//! Core types for playback control

use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default distance for jump forward / jump back, in seconds
pub const DEFAULT_JUMP_SECONDS: f64 = 10.0;

static NEXT_PLAYER_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of a single player instance
///
/// Each controller gets its own id so logs and events from several players
/// on the same page can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(u64);

impl PlayerId {
    /// Allocate the next unused id
    pub fn next() -> Self {
        Self(NEXT_PLAYER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player-{}", self.0)
    }
}

/// Playback state published to control bindings
///
/// Owned by exactly one controller; bindings only ever see copies.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaybackState {
    /// True while the engine is producing audio
    pub is_playing: bool,

    /// Elapsed share of the track, 0-100
    pub progress: f64,

    /// Whether the engine has reported a usable duration yet
    pub duration_ready: bool,
}

impl PlaybackState {
    /// Two-state view used for toggle dispatch
    pub fn status(&self) -> PlaybackStatus {
        if self.is_playing {
            PlaybackStatus::Playing
        } else {
            PlaybackStatus::Paused
        }
    }
}

/// Playing / paused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    /// Engine is producing audio
    Playing,

    /// Engine is idle (never started, paused, or ended)
    Paused,
}

/// Configuration for a playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Seconds moved by jump forward / jump back (default: 10)
    #[serde(default = "default_jump_seconds")]
    pub jump_seconds: f64,
}

fn default_jump_seconds() -> f64 {
    DEFAULT_JUMP_SECONDS
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            jump_seconds: DEFAULT_JUMP_SECONDS,
        }
    }
}

impl PlaybackConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !self.jump_seconds.is_finite() || self.jump_seconds <= 0.0 {
            return Err(PlaybackError::InvalidConfig(format!(
                "jump_seconds must be a positive number, got {}",
                self.jump_seconds
            )));
        }
        Ok(())
    }
}

/// The duration, if it is usable for progress math
///
/// Engines report NaN or nothing before metadata loads, and infinity for
/// live streams.
pub fn usable_duration(duration: Option<f64>) -> Option<f64> {
    duration.filter(|d| d.is_finite() && *d > 0.0)
}

/// Progress percentage for a position within a track
///
/// Returns 0 whenever the duration is unknown or the ratio is not finite.
pub fn progress_percent(current_time: f64, duration: Option<f64>) -> f64 {
    let Some(duration) = usable_duration(duration) else {
        return 0.0;
    };
    let ratio = current_time / duration * 100.0;
    if ratio.is_finite() {
        ratio.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
