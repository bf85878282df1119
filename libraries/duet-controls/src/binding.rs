//! Control binding trait

use duet_playback::{PlaybackState, PlayerCommands, Result};
use serde::{Deserialize, Serialize};

/// Identifies a control on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlId {
    Play,
    Pause,
    PlayPause,
    JumpForward,
    JumpBack,
    Progress,
}

impl ControlId {
    /// Every control a surface renders
    pub const ALL: [ControlId; 6] = [
        ControlId::Play,
        ControlId::Pause,
        ControlId::PlayPause,
        ControlId::JumpForward,
        ControlId::JumpBack,
        ControlId::Progress,
    ];

    /// Parse the snake_case name used in views and scripts
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "play" => Some(ControlId::Play),
            "pause" => Some(ControlId::Pause),
            "play_pause" | "toggle" => Some(ControlId::PlayPause),
            "jump_forward" | "forward" => Some(ControlId::JumpForward),
            "jump_back" | "back" => Some(ControlId::JumpBack),
            "progress" => Some(ControlId::Progress),
            _ => None,
        }
    }

    /// Canonical snake_case name
    pub fn name(self) -> &'static str {
        match self {
            ControlId::Play => "play",
            ControlId::Pause => "pause",
            ControlId::PlayPause => "play_pause",
            ControlId::JumpForward => "jump_forward",
            ControlId::JumpBack => "jump_back",
            ControlId::Progress => "progress",
        }
    }
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A UI element that reads published state and dispatches one command
///
/// Bindings hold no state of their own. A disabled binding swallows
/// activation the way a disabled button swallows clicks.
pub trait ControlBinding {
    /// Which control this is
    fn id(&self) -> ControlId;

    /// Whether the control accepts activation in `state`
    fn is_enabled(&self, state: &PlaybackState) -> bool;

    /// Issue the command unconditionally
    fn trigger<P: PlayerCommands + ?Sized>(&self, player: &P) -> Result<()>;

    /// Issue the command if enabled
    ///
    /// Returns whether the command was dispatched.
    fn activate<P: PlayerCommands + ?Sized>(&self, player: &P) -> Result<bool> {
        if !self.is_enabled(&player.state()) {
            tracing::debug!(control = ?self.id(), "activation ignored, control disabled");
            return Ok(false);
        }
        self.trigger(player)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_serde() {
        for id in ControlId::ALL {
            let name = serde_json::to_value(id).unwrap();
            let parsed = ControlId::from_name(name.as_str().unwrap());
            assert_eq!(parsed, Some(id));
        }
    }

    #[test]
    fn display_uses_canonical_name() {
        for id in ControlId::ALL {
            assert_eq!(ControlId::from_name(&id.to_string()), Some(id));
        }
        assert_eq!(ControlId::PlayPause.to_string(), "play_pause");
    }

    #[test]
    fn short_aliases() {
        assert_eq!(ControlId::from_name("toggle"), Some(ControlId::PlayPause));
        assert_eq!(ControlId::from_name("forward"), Some(ControlId::JumpForward));
        assert_eq!(ControlId::from_name("back"), Some(ControlId::JumpBack));
        assert_eq!(ControlId::from_name("rewind"), None);
    }
}
