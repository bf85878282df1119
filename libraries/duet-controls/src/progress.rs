//! Progress bar binding
//!
//! Renders the elapsed share of the track as a fill width and turns a click
//! on the bar into a seek.
//!
//! Position is always measured against the outer track's bounding box. A
//! click landing on the inner fill element reports that element as its
//! target, but the fill is narrower than the track, so measuring against it
//! would overshoot; hosts pass the track geometry regardless of which element
//! received the pointer event.

use crate::binding::ControlId;
use duet_playback::{PlaybackState, PlayerCommands, Result};
use serde::{Deserialize, Serialize};

/// Horizontal extent of the outer track, in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackGeometry {
    pub left: f64,
    pub width: f64,
}

impl TrackGeometry {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Fraction of the track at `pointer_x`, clamped to [0, 1]
    ///
    /// A collapsed or unmeasured track (zero, negative or non-finite width)
    /// maps every point to 0.
    pub fn fraction_at(&self, pointer_x: f64) -> f64 {
        if !self.width.is_finite() || self.width <= 0.0 {
            return 0.0;
        }
        let fraction = (pointer_x - self.left) / self.width;
        if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        }
    }
}

/// Click-to-seek progress bar; always enabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressBar;

impl ProgressBar {
    pub fn id(&self) -> ControlId {
        ControlId::Progress
    }

    pub fn is_enabled(&self, _state: &PlaybackState) -> bool {
        true
    }

    /// Fill width as a percentage of the track
    pub fn fill_percent(&self, state: &PlaybackState) -> f64 {
        if state.progress.is_finite() {
            state.progress.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    /// Seek to the point under the pointer
    ///
    /// Returns the fraction that was requested.
    pub fn press<P: PlayerCommands + ?Sized>(
        &self,
        player: &P,
        pointer_x: f64,
        track: TrackGeometry,
    ) -> Result<f64> {
        let fraction = track.fraction_at(pointer_x);
        tracing::debug!(pointer_x, fraction, "progress bar pressed");
        player.seek_to(fraction)?;
        Ok(fraction)
    }
}
