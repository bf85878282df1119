/// Demo error types
use duet_controls::ControlId;
use duet_playback::PlaybackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid script step '{step}': {reason}")]
    Script { step: String, reason: String },

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Player '{player}' has no {control} control")]
    MissingControl { player: String, control: ControlId },

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),
}

impl DemoError {
    pub(crate) fn script(step: &str, reason: impl Into<String>) -> Self {
        DemoError::Script {
            step: step.to_string(),
            reason: reason.into(),
        }
    }
}
