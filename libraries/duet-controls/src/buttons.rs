//! Button bindings: play, pause, toggle, jump forward, jump back

use crate::binding::{ControlBinding, ControlId};
use duet_playback::{PlaybackState, PlaybackStatus, PlayerCommands, Result};
use serde::{Deserialize, Serialize};

/// Starts playback; enabled while paused
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayControl;

impl ControlBinding for PlayControl {
    fn id(&self) -> ControlId {
        ControlId::Play
    }

    fn is_enabled(&self, state: &PlaybackState) -> bool {
        !state.is_playing
    }

    fn trigger<P: PlayerCommands + ?Sized>(&self, player: &P) -> Result<()> {
        player.play()
    }
}

/// Pauses playback; enabled while playing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PauseControl;

impl ControlBinding for PauseControl {
    fn id(&self) -> ControlId {
        ControlId::Pause
    }

    fn is_enabled(&self, state: &PlaybackState) -> bool {
        state.is_playing
    }

    fn trigger<P: PlayerCommands + ?Sized>(&self, player: &P) -> Result<()> {
        player.pause()
    }
}

/// Moves forward; enabled while playing
///
/// Without an explicit distance the player's configured jump is used.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JumpForwardControl {
    pub seconds: Option<f64>,
}

impl JumpForwardControl {
    pub fn by(seconds: f64) -> Self {
        Self {
            seconds: Some(seconds),
        }
    }
}

impl ControlBinding for JumpForwardControl {
    fn id(&self) -> ControlId {
        ControlId::JumpForward
    }

    fn is_enabled(&self, state: &PlaybackState) -> bool {
        state.is_playing
    }

    fn trigger<P: PlayerCommands + ?Sized>(&self, player: &P) -> Result<()> {
        player.jump_forward(self.seconds.unwrap_or_else(|| player.jump_seconds()))
    }
}

/// Moves back; enabled while playing
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JumpBackControl {
    pub seconds: Option<f64>,
}

impl JumpBackControl {
    pub fn by(seconds: f64) -> Self {
        Self {
            seconds: Some(seconds),
        }
    }
}

impl ControlBinding for JumpBackControl {
    fn id(&self) -> ControlId {
        ControlId::JumpBack
    }

    fn is_enabled(&self, state: &PlaybackState) -> bool {
        state.is_playing
    }

    fn trigger<P: PlayerCommands + ?Sized>(&self, player: &P) -> Result<()> {
        player.jump_backward(self.seconds.unwrap_or_else(|| player.jump_seconds()))
    }
}

/// The control a toggle currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleVariant {
    Play,
    Pause,
}

/// Shows pause while playing and play otherwise
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayPauseToggle;

impl PlayPauseToggle {
    /// Variant to render for `state`
    pub fn variant(&self, state: &PlaybackState) -> ToggleVariant {
        match state.status() {
            PlaybackStatus::Playing => ToggleVariant::Pause,
            PlaybackStatus::Paused => ToggleVariant::Play,
        }
    }
}

impl ControlBinding for PlayPauseToggle {
    fn id(&self) -> ControlId {
        ControlId::PlayPause
    }

    // Whichever variant is shown is enabled in the state that shows it
    fn is_enabled(&self, state: &PlaybackState) -> bool {
        match self.variant(state) {
            ToggleVariant::Play => PlayControl.is_enabled(state),
            ToggleVariant::Pause => PauseControl.is_enabled(state),
        }
    }

    fn trigger<P: PlayerCommands + ?Sized>(&self, player: &P) -> Result<()> {
        match self.variant(&player.state()) {
            ToggleVariant::Play => PlayControl.trigger(player),
            ToggleVariant::Pause => PauseControl.trigger(player),
        }
    }
}
