//! Control surface
//!
//! Lays out a chosen set of bindings for one player behind the player's
//! shared handle, renders them to a plain view description, and routes
//! activations.

use crate::{
    binding::{ControlBinding, ControlId},
    buttons::{
        JumpBackControl, JumpForwardControl, PauseControl, PlayControl, PlayPauseToggle,
        ToggleVariant,
    },
    progress::{ProgressBar, TrackGeometry},
};
use duet_playback::{
    MediaEngine, PlaybackState, PlayerCommands, PlayerContext, Result, SubscriptionId,
};
use serde::{Deserialize, Serialize};

/// Rendered button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonView {
    pub enabled: bool,
}

/// Rendered play/pause toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleView {
    pub variant: ToggleVariant,
    pub enabled: bool,
}

/// Rendered progress bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressView {
    pub enabled: bool,
    pub fill_percent: f64,
}

/// Everything a host needs to draw one player's controls
///
/// Controls missing from the surface's layout are `None` and left out of the
/// serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceView {
    pub is_playing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play: Option<ButtonView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause: Option<ButtonView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toggle: Option<ToggleView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jump_forward: Option<ButtonView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jump_back: Option<ButtonView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressView>,
}

impl SurfaceView {
    /// Whether `id` is rendered in this view
    pub fn has(&self, id: ControlId) -> bool {
        match id {
            ControlId::Play => self.play.is_some(),
            ControlId::Pause => self.pause.is_some(),
            ControlId::PlayPause => self.toggle.is_some(),
            ControlId::JumpForward => self.jump_forward.is_some(),
            ControlId::JumpBack => self.jump_back.is_some(),
            ControlId::Progress => self.progress.is_some(),
        }
    }

    /// Whether `id` is rendered and enabled in this view
    pub fn is_enabled(&self, id: ControlId) -> bool {
        match id {
            ControlId::Play => self.play.is_some_and(|b| b.enabled),
            ControlId::Pause => self.pause.is_some_and(|b| b.enabled),
            ControlId::PlayPause => self.toggle.is_some_and(|t| t.enabled),
            ControlId::JumpForward => self.jump_forward.is_some_and(|b| b.enabled),
            ControlId::JumpBack => self.jump_back.is_some_and(|b| b.enabled),
            ControlId::Progress => self.progress.is_some_and(|p| p.enabled),
        }
    }

    /// Fill width of the progress bar, if rendered
    pub fn fill_percent(&self) -> Option<f64> {
        self.progress.map(|p| p.fill_percent)
    }
}

/// The control bindings laid out for one player
#[derive(Debug, Clone)]
pub struct ControlSurface<P: PlayerCommands> {
    player: P,
    controls: Controls,
    track: TrackGeometry,
}

// Bindings only; rendering them needs nothing but a state
#[derive(Debug, Clone, Copy, Default)]
struct Controls {
    play: Option<PlayControl>,
    pause: Option<PauseControl>,
    toggle: Option<PlayPauseToggle>,
    jump_forward: Option<JumpForwardControl>,
    jump_back: Option<JumpBackControl>,
    progress: Option<ProgressBar>,
}

impl Controls {
    fn from_layout(layout: &[ControlId]) -> Self {
        let mut controls = Self::default();
        for id in layout {
            match id {
                ControlId::Play => controls.play = Some(PlayControl),
                ControlId::Pause => controls.pause = Some(PauseControl),
                ControlId::PlayPause => controls.toggle = Some(PlayPauseToggle),
                ControlId::JumpForward => controls.jump_forward = Some(JumpForwardControl::default()),
                ControlId::JumpBack => controls.jump_back = Some(JumpBackControl::default()),
                ControlId::Progress => controls.progress = Some(ProgressBar),
            }
        }
        controls
    }

    fn view(&self, state: &PlaybackState) -> SurfaceView {
        let button = |enabled| ButtonView { enabled };
        SurfaceView {
            is_playing: state.is_playing,
            play: self.play.map(|c| button(c.is_enabled(state))),
            pause: self.pause.map(|c| button(c.is_enabled(state))),
            toggle: self.toggle.map(|c| ToggleView {
                variant: c.variant(state),
                enabled: c.is_enabled(state),
            }),
            jump_forward: self.jump_forward.map(|c| button(c.is_enabled(state))),
            jump_back: self.jump_back.map(|c| button(c.is_enabled(state))),
            progress: self.progress.map(|c| ProgressView {
                enabled: c.is_enabled(state),
                fill_percent: c.fill_percent(state),
            }),
        }
    }
}

impl<P: PlayerCommands> ControlSurface<P> {
    /// Bind every control to `player`
    ///
    /// Jump controls use the player's configured distance.
    pub fn new(player: P) -> Self {
        Self::with_layout(player, &ControlId::ALL)
    }

    /// Bind only the controls in `layout` to `player`
    pub fn with_layout(player: P, layout: &[ControlId]) -> Self {
        Self {
            player,
            controls: Controls::from_layout(layout),
            track: TrackGeometry::default(),
        }
    }

    /// Override the jump distance of whichever jump controls are laid out
    pub fn with_jump_seconds(mut self, seconds: f64) -> Self {
        if self.controls.jump_forward.is_some() {
            self.controls.jump_forward = Some(JumpForwardControl::by(seconds));
        }
        if self.controls.jump_back.is_some() {
            self.controls.jump_back = Some(JumpBackControl::by(seconds));
        }
        self
    }

    /// Bound player handle
    pub fn player(&self) -> &P {
        &self.player
    }

    /// Whether `id` is part of this surface
    pub fn has_control(&self, id: ControlId) -> bool {
        self.layout().contains(&id)
    }

    /// Controls on this surface, in [`ControlId::ALL`] order
    pub fn layout(&self) -> Vec<ControlId> {
        let c = &self.controls;
        let present = [
            c.play.is_some(),
            c.pause.is_some(),
            c.toggle.is_some(),
            c.jump_forward.is_some(),
            c.jump_back.is_some(),
            c.progress.is_some(),
        ];
        ControlId::ALL
            .into_iter()
            .zip(present)
            .filter_map(|(id, present)| present.then_some(id))
            .collect()
    }

    /// Record the progress track's measured geometry
    pub fn set_track(&mut self, track: TrackGeometry) {
        self.track = track;
    }

    /// Last recorded track geometry
    pub fn track(&self) -> TrackGeometry {
        self.track
    }

    /// Describe every laid-out control for the current state
    pub fn render(&self) -> SurfaceView {
        self.controls.view(&self.player.state())
    }

    /// Activate a button
    ///
    /// Returns whether a command was dispatched. Disabled buttons, controls
    /// missing from the layout and the progress bar (which needs a pointer
    /// position) dispatch nothing.
    pub fn activate(&self, id: ControlId) -> Result<bool> {
        let c = &self.controls;
        let player = &self.player;
        let dispatched = match id {
            ControlId::Play => c.play.map(|b| b.activate(player)),
            ControlId::Pause => c.pause.map(|b| b.activate(player)),
            ControlId::PlayPause => c.toggle.map(|b| b.activate(player)),
            ControlId::JumpForward => c.jump_forward.map(|b| b.activate(player)),
            ControlId::JumpBack => c.jump_back.map(|b| b.activate(player)),
            ControlId::Progress => {
                tracing::debug!("progress bar activated without a pointer position");
                return Ok(false);
            }
        };

        match dispatched {
            Some(result) => result,
            None => {
                tracing::debug!(control = %id, "control not on this surface");
                Ok(false)
            }
        }
    }

    /// Click the progress bar at `pointer_x` using the recorded geometry
    ///
    /// Returns the fraction seeked to, or `None` without a progress bar.
    pub fn press_progress(&self, pointer_x: f64) -> Result<Option<f64>> {
        self.press_progress_in(pointer_x, self.track)
    }

    /// Click the progress bar at `pointer_x` within `track`
    pub fn press_progress_in(&self, pointer_x: f64, track: TrackGeometry) -> Result<Option<f64>> {
        self.controls
            .progress
            .map(|bar| bar.press(&self.player, pointer_x, track))
            .transpose()
    }
}

impl<E: MediaEngine + 'static> ControlSurface<PlayerContext<E>> {
    /// Re-render after every state change
    pub fn on_render(&self, mut render: impl FnMut(SurfaceView) + 'static) -> SubscriptionId {
        let controls = self.controls;
        self.player.subscribe(move |state| render(controls.view(state)))
    }
}
