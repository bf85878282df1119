//! Shared player context
//!
//! A cloneable handle passed down the view tree so every control binding can
//! read the published state and issue commands against the same controller.
//! Observers subscribe for change notifications.
//!
//! Notifications are delivered with no borrow of the controller held, so an
//! observer may read the context or issue further commands from inside its
//! callback. Events caused by such nested commands are delivered after the
//! current batch, in order.

use crate::{
    controller::PlaybackController,
    engine::{MediaEngine, MediaEvent},
    error::Result,
    events::PlaybackEvent,
    types::{PlaybackState, PlayerId},
};
use std::cell::RefCell;
use std::rc::Rc;

/// Handle returned by [`PlayerContext::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&PlaybackEvent)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
    // Set while callbacks run; entries are moved out for the duration and
    // their ids kept in `notified`
    notifying: bool,
    notified: Vec<SubscriptionId>,
    removed: Vec<SubscriptionId>,
}

/// Commands and state a control binding needs from its player
///
/// Implemented by [`PlayerContext`]; bindings depend on this trait rather
/// than on a concrete engine type.
pub trait PlayerCommands {
    /// Current published state
    fn state(&self) -> PlaybackState;

    /// Configured jump distance in seconds
    fn jump_seconds(&self) -> f64;

    /// Start playback
    fn play(&self) -> Result<()>;

    /// Pause playback
    fn pause(&self) -> Result<()>;

    /// Move forward by `seconds`
    fn jump_forward(&self, seconds: f64) -> Result<()>;

    /// Move back by `seconds`
    fn jump_backward(&self, seconds: f64) -> Result<()>;

    /// Seek to a fraction (0.0 - 1.0) of the track
    fn seek_to(&self, fraction: f64) -> Result<()>;
}

/// Shared handle onto one playback controller
pub struct PlayerContext<E: MediaEngine> {
    controller: Rc<RefCell<PlaybackController<E>>>,
    listeners: Rc<RefCell<Listeners>>,
}

impl<E: MediaEngine> Clone for PlayerContext<E> {
    fn clone(&self) -> Self {
        Self {
            controller: Rc::clone(&self.controller),
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<E: MediaEngine> PlayerContext<E> {
    /// Wrap a controller
    ///
    /// Events already queued on the controller are discarded; subscribers
    /// read the initial state through [`PlayerCommands::state`].
    pub fn new(mut controller: PlaybackController<E>) -> Self {
        controller.drain_events();
        Self {
            controller: Rc::new(RefCell::new(controller)),
            listeners: Rc::new(RefCell::new(Listeners::default())),
        }
    }

    /// Instance identifier of the underlying controller
    pub fn id(&self) -> PlayerId {
        self.controller.borrow().id()
    }

    /// Whether an engine is attached
    pub fn is_mounted(&self) -> bool {
        self.controller.borrow().is_mounted()
    }

    /// Run `f` against the controller, then publish whatever it queued
    pub fn with_controller<R>(&self, f: impl FnOnce(&mut PlaybackController<E>) -> R) -> R {
        let result = f(&mut self.controller.borrow_mut());
        self.flush();
        result
    }

    /// Attach an engine, returning the one it replaces
    pub fn mount(&self, engine: E) -> Option<E> {
        self.with_controller(|c| c.mount(engine))
    }

    /// Detach the engine
    pub fn unmount(&self) -> Option<E> {
        self.with_controller(PlaybackController::unmount)
    }

    /// Deliver an engine notification
    pub fn dispatch(&self, event: MediaEvent) {
        self.with_controller(|c| c.handle_event(event));
    }

    /// Observe every event (state changes and engine errors)
    pub fn subscribe_events(&self, listener: impl FnMut(&PlaybackEvent) + 'static) -> SubscriptionId {
        let mut listeners = self.listeners.borrow_mut();
        let id = SubscriptionId(listeners.next_id);
        listeners.next_id += 1;
        listeners.entries.push((id, Box::new(listener)));
        id
    }

    /// Observe state changes
    pub fn subscribe(&self, mut listener: impl FnMut(&PlaybackState) + 'static) -> SubscriptionId {
        self.subscribe_events(move |event| {
            if let Some(state) = event.state() {
                listener(state);
            }
        })
    }

    /// Stop observing
    ///
    /// Safe to call from inside a callback; the removed observer receives no
    /// further events from the batch in progress.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry, _)| *entry != id);
        if listeners.entries.len() != before {
            return true;
        }
        let in_batch = listeners.notifying && listeners.notified.contains(&id);
        if in_batch && !listeners.removed.contains(&id) {
            listeners.removed.push(id);
            return true;
        }
        false
    }

    /// Number of active subscriptions
    ///
    /// Only meaningful outside of a notification callback.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    fn flush(&self) {
        {
            let mut listeners = self.listeners.borrow_mut();
            if listeners.notifying {
                // The outer flush picks these events up
                return;
            }
            listeners.notifying = true;
        }

        let mut active = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.notified = listeners.entries.iter().map(|(id, _)| *id).collect();
            std::mem::take(&mut listeners.entries)
        };
        loop {
            let events = self.controller.borrow_mut().drain_events();
            if events.is_empty() {
                break;
            }
            for event in &events {
                for (id, listener) in &mut active {
                    if self.listeners.borrow().removed.contains(id) {
                        continue;
                    }
                    listener(event);
                }
            }
        }

        let mut listeners = self.listeners.borrow_mut();
        let removed = std::mem::take(&mut listeners.removed);
        listeners.notified.clear();
        active.retain(|(id, _)| !removed.contains(id));
        // Keep observers that subscribed during notification
        active.append(&mut listeners.entries);
        listeners.entries = active;
        listeners.notifying = false;
    }
}

impl<E: MediaEngine> PlayerCommands for PlayerContext<E> {
    fn state(&self) -> PlaybackState {
        self.controller.borrow().state()
    }

    fn jump_seconds(&self) -> f64 {
        self.controller.borrow().config().jump_seconds
    }

    fn play(&self) -> Result<()> {
        self.with_controller(PlaybackController::play)
    }

    fn pause(&self) -> Result<()> {
        self.with_controller(PlaybackController::pause)
    }

    fn jump_forward(&self, seconds: f64) -> Result<()> {
        self.with_controller(|c| c.jump_forward(seconds))
    }

    fn jump_backward(&self, seconds: f64) -> Result<()> {
        self.with_controller(|c| c.jump_backward(seconds))
    }

    fn seek_to(&self, fraction: f64) -> Result<()> {
        self.with_controller(|c| c.seek_to(fraction))
    }
}

impl<E: MediaEngine> std::fmt::Debug for PlayerContext<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerContext")
            .field("controller", &self.controller.try_borrow().ok())
            .finish_non_exhaustive()
    }
}
