//! In-memory media engine
//!
//! Behaves like a media element without producing sound: a clock that moves
//! only while playing and when [`SimulatedEngine::advance`] is called. Clones
//! share the same media, so a test or host can drive the clock while the
//! controller holds its own handle.

use crate::{
    engine::{MediaEngine, MediaEvent},
    error::{PlaybackError, Result},
    types::usable_duration,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct SimMedia {
    duration: Option<f64>,
    position: f64,
    playing: bool,
    rejected_play: Option<String>,
    play_calls: usize,
    pause_calls: usize,
}

/// Simulated engine handle
#[derive(Debug, Clone, Default)]
pub struct SimulatedEngine {
    media: Rc<RefCell<SimMedia>>,
}

impl SimulatedEngine {
    /// Engine whose media has not loaded yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with media of `duration` seconds already loaded
    pub fn loaded(duration: f64) -> Self {
        let engine = Self::new();
        engine.media.borrow_mut().duration = Some(duration);
        engine
    }

    /// Finish loading media of `duration` seconds
    pub fn load(&self, duration: f64) -> MediaEvent {
        let mut media = self.media.borrow_mut();
        media.duration = Some(duration);
        media.position = media.position.min(duration);
        MediaEvent::LoadedData
    }

    /// Move the clock forward by `seconds` of playback
    ///
    /// Returns the notifications a media element would fire: a time update
    /// while playing, followed by `Ended` once the end is reached.
    pub fn advance(&self, seconds: f64) -> Vec<MediaEvent> {
        let mut media = self.media.borrow_mut();
        if !media.playing || seconds <= 0.0 {
            return Vec::new();
        }

        media.position += seconds;
        match usable_duration(media.duration) {
            Some(duration) if media.position >= duration => {
                media.position = duration;
                media.playing = false;
                vec![MediaEvent::TimeUpdate, MediaEvent::Ended]
            }
            _ => vec![MediaEvent::TimeUpdate],
        }
    }

    /// Make the next `play()` calls fail with `reason`
    pub fn reject_play(&self, reason: &str) {
        self.media.borrow_mut().rejected_play = Some(reason.to_string());
    }

    /// Accept `play()` calls again
    pub fn allow_play(&self) {
        self.media.borrow_mut().rejected_play = None;
    }

    /// Current position in seconds
    pub fn position(&self) -> f64 {
        self.media.borrow().position
    }

    /// Whether the clock is running
    pub fn is_playing(&self) -> bool {
        self.media.borrow().playing
    }

    /// Number of accepted `play()` calls
    pub fn play_calls(&self) -> usize {
        self.media.borrow().play_calls
    }

    /// Number of `pause()` calls
    pub fn pause_calls(&self) -> usize {
        self.media.borrow().pause_calls
    }
}

impl MediaEngine for SimulatedEngine {
    fn play(&mut self) -> Result<()> {
        let mut media = self.media.borrow_mut();
        if let Some(reason) = media.rejected_play.clone() {
            return Err(PlaybackError::Engine(reason));
        }

        // Playing again after the end starts over, like a media element
        if let Some(duration) = usable_duration(media.duration) {
            if media.position >= duration {
                media.position = 0.0;
            }
        }
        media.playing = true;
        media.play_calls += 1;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        let mut media = self.media.borrow_mut();
        media.playing = false;
        media.pause_calls += 1;
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.media.borrow().playing
    }

    fn current_time(&self) -> f64 {
        self.media.borrow().position
    }

    fn set_current_time(&mut self, seconds: f64) {
        let mut media = self.media.borrow_mut();
        let upper = usable_duration(media.duration).unwrap_or(f64::MAX);
        media.position = if seconds.is_nan() {
            0.0
        } else {
            seconds.clamp(0.0, upper)
        };
    }

    fn duration(&self) -> Option<f64> {
        self.media.borrow().duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_only_moves_while_playing() {
        let mut engine = SimulatedEngine::loaded(60.0);
        assert!(engine.advance(5.0).is_empty());
        assert_eq!(engine.position(), 0.0);

        engine.play().unwrap();
        assert_eq!(engine.advance(5.0), vec![MediaEvent::TimeUpdate]);
        assert_eq!(engine.position(), 5.0);
    }

    #[test]
    fn reaching_the_end_fires_ended_once() {
        let mut engine = SimulatedEngine::loaded(10.0);
        engine.play().unwrap();

        assert_eq!(
            engine.advance(15.0),
            vec![MediaEvent::TimeUpdate, MediaEvent::Ended]
        );
        assert_eq!(engine.position(), 10.0);
        assert!(!engine.is_playing());
        assert!(engine.advance(1.0).is_empty());
    }

    #[test]
    fn position_writes_are_clamped() {
        let mut engine = SimulatedEngine::loaded(30.0);
        engine.set_current_time(45.0);
        assert_eq!(engine.position(), 30.0);
        engine.set_current_time(-4.0);
        assert_eq!(engine.position(), 0.0);
    }

    #[test]
    fn replay_after_end_restarts() {
        let mut engine = SimulatedEngine::loaded(10.0);
        engine.play().unwrap();
        engine.advance(10.0);
        engine.play().unwrap();
        assert_eq!(engine.position(), 0.0);
    }

    #[test]
    fn clones_share_media() {
        let engine = SimulatedEngine::new();
        let mut handle = engine.clone();
        assert_eq!(engine.load(20.0), MediaEvent::LoadedData);
        assert_eq!(handle.duration(), Some(20.0));

        handle.set_current_time(7.0);
        assert_eq!(engine.position(), 7.0);
    }

    #[test]
    fn rejected_play_keeps_clock_stopped() {
        let mut engine = SimulatedEngine::loaded(10.0);
        engine.reject_play("not allowed");
        assert!(engine.play().is_err());
        assert!(!engine.is_playing());

        engine.allow_play();
        assert!(engine.play().is_ok());
        assert_eq!(engine.play_calls(), 1);
    }
}
