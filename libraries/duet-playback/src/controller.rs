//! Playback controller - core orchestration
//!
//! Owns the published playback state for one media source and mediates every
//! command against the engine. Engine notifications flow back in through the
//! `on_*` handlers, and every state change is queued as a [`PlaybackEvent`]
//! for the context layer to forward to bindings.

use crate::{
    engine::{MediaEngine, MediaEvent},
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    types::{progress_percent, usable_duration, PlaybackConfig, PlaybackState, PlayerId},
};
use tracing::{debug, warn};

/// Playback controller for a single player instance
pub struct PlaybackController<E: MediaEngine> {
    id: PlayerId,
    config: PlaybackConfig,

    // Attached between mount and unmount
    engine: Option<E>,

    state: PlaybackState,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<E: MediaEngine> PlaybackController<E> {
    /// Create an unmounted controller
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            id: PlayerId::next(),
            config,
            engine: None,
            state: PlaybackState::default(),
            pending_events: Vec::new(),
        }
    }

    /// Create a controller already mounted on `engine`
    pub fn with_engine(engine: E, config: PlaybackConfig) -> Self {
        let mut controller = Self::new(config);
        controller.mount(engine);
        controller
    }

    /// Instance identifier
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Controller configuration
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    // ===== Lifecycle =====

    /// Attach an engine
    ///
    /// Any previously mounted engine is detached and returned. State is
    /// re-derived from the new engine, including whether it is already
    /// producing audio.
    pub fn mount(&mut self, engine: E) -> Option<E> {
        let duration = usable_duration(engine.duration());
        let next = PlaybackState {
            is_playing: engine.is_playing(),
            progress: progress_percent(engine.current_time(), duration),
            duration_ready: duration.is_some(),
        };

        let previous = self.engine.replace(engine);
        debug!(player = %self.id, replaced = previous.is_some(), "engine mounted");
        self.update(next);
        previous
    }

    /// Detach and return the engine
    ///
    /// Afterwards commands fail with [`PlaybackError::NotMounted`] and engine
    /// notifications are ignored.
    pub fn unmount(&mut self) -> Option<E> {
        let engine = self.engine.take();
        if engine.is_some() {
            debug!(player = %self.id, "engine unmounted");
            self.update(PlaybackState::default());
        }
        engine
    }

    /// Whether an engine is attached
    pub fn is_mounted(&self) -> bool {
        self.engine.is_some()
    }

    /// Attached engine, if any
    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    // ===== Commands =====

    /// Start playback
    ///
    /// Does nothing if already playing.
    pub fn play(&mut self) -> Result<()> {
        if self.state.is_playing {
            return Ok(());
        }

        let result = self.engine_mut()?.play();
        self.check(result)?;

        debug!(player = %self.id, "play");
        self.update(PlaybackState {
            is_playing: true,
            ..self.state
        });
        Ok(())
    }

    /// Pause playback
    pub fn pause(&mut self) -> Result<()> {
        let result = self.engine_mut()?.pause();
        self.check(result)?;

        debug!(player = %self.id, "pause");
        self.update(PlaybackState {
            is_playing: false,
            ..self.state
        });
        Ok(())
    }

    /// Move the position forward by `seconds`
    ///
    /// The engine clamps at the end of the track. Progress catches up on the
    /// next time update.
    pub fn jump_forward(&mut self, seconds: f64) -> Result<()> {
        self.jump_by(seconds)
    }

    /// Move the position back by `seconds`
    pub fn jump_backward(&mut self, seconds: f64) -> Result<()> {
        self.jump_by(-seconds)
    }

    /// Jump forward by the configured distance
    pub fn jump_forward_default(&mut self) -> Result<()> {
        self.jump_forward(self.config.jump_seconds)
    }

    /// Jump back by the configured distance
    pub fn jump_backward_default(&mut self) -> Result<()> {
        self.jump_backward(self.config.jump_seconds)
    }

    fn jump_by(&mut self, delta: f64) -> Result<()> {
        let id = self.id;
        let engine = self.engine_mut()?;
        let target = engine.current_time() + delta;
        engine.set_current_time(target);
        debug!(player = %id, delta, target, "jump");
        Ok(())
    }

    /// Seek to a fraction of the track (0.0 - 1.0)
    ///
    /// Progress is updated immediately rather than on the next time update.
    /// Before the engine knows the duration there is nothing to seek into and
    /// the call is ignored.
    pub fn seek_to(&mut self, fraction: f64) -> Result<()> {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };

        let id = self.id;
        let engine = self.engine_mut()?;
        let Some(duration) = usable_duration(engine.duration()) else {
            debug!(player = %id, fraction, "seek ignored, duration unknown");
            return Ok(());
        };

        let target = fraction * duration;
        engine.set_current_time(target);
        debug!(player = %id, fraction, target, "seek");

        self.update(PlaybackState {
            progress: fraction * 100.0,
            duration_ready: true,
            ..self.state
        });
        Ok(())
    }

    // ===== Engine notifications =====

    /// Route an engine notification to its handler
    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate => self.on_time_update(),
            MediaEvent::Ended => self.on_ended(),
            MediaEvent::LoadedData => self.on_loaded_data(),
        }
    }

    /// Recompute progress from the engine position
    pub fn on_time_update(&mut self) {
        let Some(engine) = self.engine.as_ref() else {
            self.ignored(MediaEvent::TimeUpdate);
            return;
        };

        let duration = usable_duration(engine.duration());
        let progress = progress_percent(engine.current_time(), duration);
        self.update(PlaybackState {
            progress,
            duration_ready: self.state.duration_ready || duration.is_some(),
            ..self.state
        });
    }

    /// Track finished: stop and rewind the published progress
    pub fn on_ended(&mut self) {
        if self.engine.is_none() {
            self.ignored(MediaEvent::Ended);
            return;
        }

        debug!(player = %self.id, "ended");
        self.update(PlaybackState {
            is_playing: false,
            progress: 0.0,
            ..self.state
        });
    }

    /// Media loaded; duration becomes available
    pub fn on_loaded_data(&mut self) {
        let Some(engine) = self.engine.as_ref() else {
            self.ignored(MediaEvent::LoadedData);
            return;
        };

        let duration = usable_duration(engine.duration());
        debug!(player = %self.id, ?duration, "loaded data");
        self.update(PlaybackState {
            duration_ready: duration.is_some(),
            ..self.state
        });
    }

    // ===== State Queries =====

    /// Current published state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether the engine is producing audio
    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    /// Elapsed share of the track, 0-100
    pub fn progress(&self) -> f64 {
        self.state.progress
    }

    // ===== Events =====

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn engine_mut(&mut self) -> Result<&mut E> {
        self.engine.as_mut().ok_or(PlaybackError::NotMounted)
    }

    fn update(&mut self, next: PlaybackState) {
        if next != self.state {
            self.state = next;
            self.pending_events
                .push(PlaybackEvent::StateChanged { state: next });
        }
    }

    fn check(&mut self, result: Result<()>) -> Result<()> {
        if let Err(ref e) = result {
            warn!(player = %self.id, error = %e, "engine rejected command");
            self.pending_events.push(PlaybackEvent::Error {
                message: e.to_string(),
            });
        }
        result
    }

    fn ignored(&self, event: MediaEvent) {
        warn!(player = %self.id, ?event, "engine event after unmount ignored");
    }
}

impl<E: MediaEngine> std::fmt::Debug for PlaybackController<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("mounted", &self.engine.is_some())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
