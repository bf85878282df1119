/// Headless page hosting several players
use crate::{
    config::{PageConfig, PlayerSettings},
    error::{DemoError, Result},
    script::Step,
};
use duet_controls::{ControlId, ControlSurface, SurfaceView, TrackGeometry};
use duet_playback::{MediaEngine, PlaybackController, PlayerCommands, PlayerContext, SimulatedEngine};
use serde::Serialize;
use std::path::PathBuf;

/// One mounted player: its media, its controller handle and its controls
pub struct PagePlayer {
    settings: PlayerSettings,
    engine: SimulatedEngine,
    surface: ControlSurface<PlayerContext<SimulatedEngine>>,
}

/// What the page shows for one player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub title: String,
    pub source: PathBuf,
    pub position_secs: f64,
    pub view: SurfaceView,
}

pub struct Page {
    players: Vec<PagePlayer>,
}

impl Page {
    /// Mount one player per configured source
    pub fn mount(config: &PageConfig) -> Self {
        let players = config
            .players
            .iter()
            .map(|settings| {
                let engine = SimulatedEngine::new();
                let controller =
                    PlaybackController::with_engine(engine.clone(), config.playback.clone());
                let context = PlayerContext::new(controller);

                let mut surface = ControlSurface::with_layout(context, &settings.controls);
                surface.set_track(TrackGeometry::new(0.0, settings.track_width_px));

                tracing::info!(
                    player = %surface.player().id(),
                    name = %settings.name,
                    source = %settings.source.display(),
                    controls = settings.controls.len(),
                    "player mounted"
                );

                let player = PagePlayer {
                    settings: settings.clone(),
                    engine,
                    surface,
                };
                if settings.autoload {
                    player.load();
                }
                player
            })
            .collect();

        Self { players }
    }

    /// Run one script step
    pub fn apply(&mut self, step: &Step) -> Result<()> {
        tracing::debug!(?step, "applying step");
        match step {
            Step::Activate { player, control } => {
                let dispatched = self.control(player, *control)?.surface.activate(*control)?;
                if !dispatched {
                    tracing::info!(player = %player, ?control, "control disabled, nothing dispatched");
                }
            }
            Step::Seek { player, fraction } => {
                self.player(player)?.surface.player().seek_to(*fraction)?;
            }
            Step::Click { player, x } => {
                self.control(player, ControlId::Progress)?
                    .surface
                    .press_progress(*x)?;
            }
            Step::Load { player } => self.player(player)?.load(),
            Step::Tick { seconds } => {
                for player in &self.players {
                    player.advance(*seconds);
                }
            }
        }
        Ok(())
    }

    /// Run every step in order, stopping at the first failure
    pub fn run(&mut self, steps: &[Step]) -> Result<()> {
        for step in steps {
            self.apply(step)?;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> Vec<PlayerSnapshot> {
        self.players.iter().map(PagePlayer::snapshot).collect()
    }

    /// Detach every player from its media
    pub fn unmount(&mut self) {
        for player in &self.players {
            player.surface.player().unmount();
        }
    }

    fn player(&self, name: &str) -> Result<&PagePlayer> {
        self.players
            .iter()
            .find(|p| p.settings.name == name)
            .ok_or_else(|| DemoError::UnknownPlayer(name.to_string()))
    }

    // A player that has `control` in its layout
    fn control(&self, name: &str, control: ControlId) -> Result<&PagePlayer> {
        let player = self.player(name)?;
        if !player.surface.has_control(control) {
            return Err(DemoError::MissingControl {
                player: name.to_string(),
                control,
            });
        }
        Ok(player)
    }
}

impl PagePlayer {
    fn load(&self) {
        let event = self.engine.load(self.settings.duration_secs);
        self.surface.player().dispatch(event);
    }

    fn advance(&self, seconds: f64) {
        for event in self.engine.advance(seconds) {
            self.surface.player().dispatch(event);
        }
    }

    fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            name: self.settings.name.clone(),
            title: self.settings.title.clone(),
            source: self.settings.source.clone(),
            position_secs: self.engine.current_time(),
            view: self.surface.render(),
        }
    }
}
