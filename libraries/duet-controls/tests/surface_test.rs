//! Control surface tests
//!
//! Exercises bindings end to end: surface → player context → simulated
//! engine → engine events → re-rendered view.

use duet_controls::{ControlId, ControlSurface, SurfaceView, ToggleVariant, TrackGeometry};
use duet_playback::{PlaybackConfig, PlaybackController, PlayerContext, SimulatedEngine};
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

// ===== Helpers =====

type Surface = ControlSurface<PlayerContext<SimulatedEngine>>;

fn surface(duration: f64) -> (Surface, SimulatedEngine) {
    let engine = SimulatedEngine::loaded(duration);
    let ctx = PlayerContext::new(PlaybackController::with_engine(
        engine.clone(),
        PlaybackConfig::default(),
    ));
    (ControlSurface::new(ctx), engine)
}

fn run(surface: &Surface, engine: &SimulatedEngine, seconds: f64) {
    for event in engine.advance(seconds) {
        surface.player().dispatch(event);
    }
}

fn assert_consistent(view: &SurfaceView) {
    assert_eq!(view.is_enabled(ControlId::Play), !view.is_playing);
    assert_eq!(view.is_enabled(ControlId::Pause), view.is_playing);
    assert_eq!(view.is_enabled(ControlId::JumpForward), view.is_playing);
    assert_eq!(view.is_enabled(ControlId::JumpBack), view.is_playing);
    let expected = if view.is_playing {
        ToggleVariant::Pause
    } else {
        ToggleVariant::Play
    };
    assert_eq!(view.toggle.map(|t| t.variant), Some(expected));
    assert!(view.is_enabled(ControlId::Progress));
}

// ===== Scenarios =====

#[test]
fn click_quarter_of_track_on_two_hundred_seconds() {
    let (mut surface, engine) = surface(200.0);
    surface.set_track(TrackGeometry::new(40.0, 600.0));

    let fraction = surface.press_progress(40.0 + 150.0).unwrap().unwrap();

    assert_eq!(fraction, 0.25);
    assert_eq!(engine.position(), 50.0);
    assert_eq!(surface.render().fill_percent(), Some(25.0));
}

#[test]
fn click_on_inner_fill_measures_outer_track() {
    let (mut surface, engine) = surface(200.0);
    let track = TrackGeometry::new(0.0, 400.0);
    surface.set_track(track);
    surface.press_progress(200.0).unwrap();

    // The fill now spans 0..200; a click at x=150 lands on it but still
    // means 150/400 of the track.
    let fraction = surface.press_progress(150.0).unwrap().unwrap();
    assert_eq!(fraction, 0.375);
    assert_eq!(engine.position(), 75.0);
}

#[test]
fn clicks_outside_track_clamp() {
    let (mut surface, engine) = surface(120.0);
    surface.set_track(TrackGeometry::new(100.0, 300.0));

    surface.press_progress(20.0).unwrap();
    assert_eq!(engine.position(), 0.0);

    surface.press_progress(1000.0).unwrap();
    assert_eq!(engine.position(), 120.0);
    assert_eq!(surface.render().fill_percent(), Some(100.0));
}

#[test]
fn controls_follow_a_full_session() {
    let (surface, engine) = surface(30.0);
    let views = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&views);
    surface.on_render(move |view| sink.borrow_mut().push(view));

    assert_consistent(&surface.render());

    surface.activate(ControlId::PlayPause).unwrap();
    run(&surface, &engine, 10.0);
    surface.activate(ControlId::JumpForward).unwrap();
    run(&surface, &engine, 5.0);
    surface.activate(ControlId::JumpBack).unwrap();
    surface.activate(ControlId::Pause).unwrap();
    surface.activate(ControlId::Play).unwrap();
    run(&surface, &engine, 60.0);

    let views = views.borrow();
    assert!(!views.is_empty());
    for view in views.iter() {
        assert_consistent(view);
    }

    let last = views.last().unwrap();
    assert!(!last.is_playing);
    assert_eq!(last.fill_percent(), Some(0.0));
}

#[test]
fn two_surfaces_do_not_interact() {
    let (a, engine_a) = surface(100.0);
    let (b, engine_b) = surface(100.0);
    let b_views = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&b_views);
    b.on_render(move |_| *sink.borrow_mut() += 1);

    a.activate(ControlId::Play).unwrap();
    run(&a, &engine_a, 40.0);

    assert!(a.render().is_playing);
    assert_eq!(a.render().fill_percent(), Some(40.0));

    let view_b = b.render();
    assert!(!view_b.is_playing);
    assert!(view_b.is_enabled(ControlId::Play));
    assert_eq!(view_b.fill_percent(), Some(0.0));
    assert_eq!(engine_b.position(), 0.0);
    assert_eq!(*b_views.borrow(), 0);
}

#[test]
fn remounted_running_engine_can_be_paused() {
    let (surface, engine) = surface(100.0);
    surface.activate(ControlId::Play).unwrap();
    run(&surface, &engine, 10.0);

    let detached = surface.player().unmount().unwrap();
    surface.player().mount(detached);

    let view = surface.render();
    assert!(view.is_playing);
    assert!(view.is_enabled(ControlId::Pause));
    assert!(view.is_enabled(ControlId::JumpBack));

    assert!(surface.activate(ControlId::Pause).unwrap());
    assert!(!engine.is_playing());
    assert!(surface.render().is_enabled(ControlId::Play));
}

#[test]
fn view_serializes_for_hosts() {
    let (surface, _engine) = surface(100.0);
    surface.activate(ControlId::Play).unwrap();

    let json = serde_json::to_value(surface.render()).unwrap();
    assert_eq!(json["toggle"]["variant"], "pause");
    assert_eq!(json["play"]["enabled"], false);
    assert_eq!(json["pause"]["enabled"], true);
}

// ===== Property Tests =====

#[derive(Debug, Clone)]
enum Action {
    Activate(ControlId),
    Press(f64),
    Advance(f64),
}

fn arbitrary_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        prop::sample::select(ControlId::ALL.to_vec()).prop_map(Action::Activate),
        (-50.0f64..450.0).prop_map(Action::Press),
        (0.0f64..40.0).prop_map(Action::Advance),
    ]
}

proptest! {
    /// Property: enabled flags match is_playing after every transition
    #[test]
    fn enabled_flags_always_consistent(actions in prop::collection::vec(arbitrary_action(), 1..40)) {
        let (mut surface, engine) = surface(90.0);
        surface.set_track(TrackGeometry::new(0.0, 400.0));

        for action in &actions {
            match action {
                Action::Activate(id) => {
                    surface.activate(*id).unwrap();
                }
                Action::Press(x) => {
                    surface.press_progress(*x).unwrap();
                }
                Action::Advance(seconds) => run(&surface, &engine, *seconds),
            }

            let view = surface.render();
            prop_assert_eq!(view.is_enabled(ControlId::Play), !view.is_playing);
            prop_assert_eq!(view.is_enabled(ControlId::Pause), view.is_playing);
            prop_assert_eq!(view.is_enabled(ControlId::JumpForward), view.is_playing);
            prop_assert_eq!(view.is_enabled(ControlId::JumpBack), view.is_playing);
            prop_assert!(view.fill_percent().is_some_and(|fill| (0.0..=100.0).contains(&fill)));
        }
    }

    /// Property: any click inside the track seeks to its relative position
    #[test]
    fn press_maps_to_relative_position(left in -500.0f64..500.0, width in 1.0f64..2000.0, t in 0.0f64..=1.0) {
        let (mut surface, engine) = surface(200.0);
        surface.set_track(TrackGeometry::new(left, width));

        let fraction = surface.press_progress(left + t * width).unwrap().unwrap();

        prop_assert!((fraction - t).abs() < 1e-9);
        prop_assert!((engine.position() - t * 200.0).abs() < 1e-6);
    }
}
