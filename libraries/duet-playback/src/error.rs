//! Error types for playback control

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No engine is attached to the controller
    #[error("No media engine mounted")]
    NotMounted,

    /// The engine rejected a command
    #[error("Media engine error: {0}")]
    Engine(String),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
