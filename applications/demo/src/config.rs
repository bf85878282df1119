/// Page configuration
use crate::error::{DemoError, Result};
use duet_controls::ControlId;
use duet_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default = "default_players")]
    pub players: Vec<PlayerSettings>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerSettings {
    pub name: String,

    /// Caption shown next to the controls
    #[serde(default)]
    pub title: String,

    pub source: PathBuf,

    /// Controls laid out for this player
    #[serde(default = "default_controls")]
    pub controls: Vec<ControlId>,

    /// Length the simulated media reports once loaded
    pub duration_secs: f64,

    /// Rendered width of the progress track in pixels
    #[serde(default = "default_track_width")]
    pub track_width_px: f64,

    /// Load media as soon as the player mounts
    #[serde(default = "default_autoload")]
    pub autoload: bool,
}

fn default_players() -> Vec<PlayerSettings> {
    vec![
        PlayerSettings {
            name: "first".to_string(),
            title: "Mario Bros. Remix".to_string(),
            source: PathBuf::from("assets/mariobros.mp3"),
            controls: vec![ControlId::Play, ControlId::Pause, ControlId::Progress],
            duration_secs: 200.0,
            track_width_px: default_track_width(),
            autoload: true,
        },
        PlayerSettings {
            name: "second".to_string(),
            title: "React30 Episode 010: React Virtualized".to_string(),
            source: PathBuf::from("assets/podcast.mp3"),
            controls: vec![
                ControlId::PlayPause,
                ControlId::JumpBack,
                ControlId::JumpForward,
                ControlId::Progress,
            ],
            duration_secs: 95.0,
            track_width_px: default_track_width(),
            autoload: true,
        },
    ]
}

fn default_controls() -> Vec<ControlId> {
    ControlId::ALL.to_vec()
}

fn default_track_width() -> f64 {
    400.0
}

fn default_autoload() -> bool {
    true
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            players: default_players(),
        }
    }
}

impl PageConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// Environment variables use the `DUET_` prefix and `__` between
    /// levels, e.g. `DUET_PLAYBACK__JUMP_SECONDS=15`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(DemoError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            settings = settings.add_source(config::File::from(path));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("DUET")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: PageConfig = settings
            .build()
            .map_err(|e| DemoError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DemoError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.playback
            .validate()
            .map_err(|e| DemoError::Config(e.to_string()))?;

        if self.players.is_empty() {
            return Err(DemoError::Config("at least one player is required".to_string()));
        }

        for (index, player) in self.players.iter().enumerate() {
            if player.name.is_empty() || player.name == "tick" || player.name.contains(':') {
                return Err(DemoError::Config(format!(
                    "player name '{}' is not usable in scripts",
                    player.name
                )));
            }
            if self.players[..index].iter().any(|p| p.name == player.name) {
                return Err(DemoError::Config(format!(
                    "duplicate player name '{}'",
                    player.name
                )));
            }
            if player.controls.is_empty() {
                return Err(DemoError::Config(format!(
                    "player '{}' needs at least one control",
                    player.name
                )));
            }
            if !player.duration_secs.is_finite() || player.duration_secs <= 0.0 {
                return Err(DemoError::Config(format!(
                    "player '{}' needs a positive duration",
                    player.name
                )));
            }
            if !player.track_width_px.is_finite() || player.track_width_px <= 0.0 {
                return Err(DemoError::Config(format!(
                    "player '{}' needs a positive track width",
                    player.name
                )));
            }
        }

        Ok(())
    }
}
