//! Property-based tests for playback control
//!
//! Uses proptest to verify state invariants across many random inputs.

use duet_playback::{
    MediaEngine, MediaEvent, PlaybackConfig, PlaybackController, PlayerCommands, PlayerContext,
    SimulatedEngine,
};
use proptest::prelude::*;

// ===== Helpers =====

#[derive(Debug, Clone)]
enum Op {
    Play,
    Pause,
    Forward,
    Back,
    Seek(f64),
    Advance(f64),
    Ended,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Play),
        Just(Op::Pause),
        Just(Op::Forward),
        Just(Op::Back),
        (-0.5f64..1.5).prop_map(Op::Seek),
        (0.0f64..90.0).prop_map(Op::Advance),
        Just(Op::Ended),
    ]
}

fn player(duration: f64) -> (PlayerContext<SimulatedEngine>, SimulatedEngine) {
    let engine = SimulatedEngine::loaded(duration);
    let controller = PlaybackController::with_engine(engine.clone(), PlaybackConfig::default());
    (PlayerContext::new(controller), engine)
}

fn apply(ctx: &PlayerContext<SimulatedEngine>, engine: &SimulatedEngine, op: &Op) {
    match op {
        Op::Play => ctx.play().unwrap(),
        Op::Pause => ctx.pause().unwrap(),
        Op::Forward => ctx.jump_forward(10.0).unwrap(),
        Op::Back => ctx.jump_backward(10.0).unwrap(),
        Op::Seek(fraction) => ctx.seek_to(*fraction).unwrap(),
        Op::Advance(seconds) => {
            for event in engine.advance(*seconds) {
                ctx.dispatch(event);
            }
        }
        Op::Ended => ctx.dispatch(MediaEvent::Ended),
    }
}

// ===== Property Tests =====

proptest! {
    /// Property: is_playing reflects the last play/pause command
    #[test]
    fn is_playing_follows_last_command(commands in prop::collection::vec(any::<bool>(), 1..40)) {
        let (ctx, _engine) = player(100.0);

        for &play in &commands {
            if play {
                ctx.play().unwrap();
            } else {
                ctx.pause().unwrap();
            }
        }

        prop_assert_eq!(ctx.state().is_playing, *commands.last().unwrap());
    }

    /// Property: progress equals t/d*100 after a time update
    #[test]
    fn progress_matches_position(duration in 1.0f64..10_000.0, fraction in 0.0f64..=1.0) {
        let engine = SimulatedEngine::loaded(duration);
        let mut controller = PlaybackController::with_engine(engine.clone(), PlaybackConfig::default());

        let t = fraction * duration;
        let mut handle = engine.clone();
        handle.set_current_time(t);
        controller.handle_event(MediaEvent::TimeUpdate);

        let expected = t / duration * 100.0;
        prop_assert!((controller.progress() - expected).abs() < 1e-9);
    }

    /// Property: after ended, the player is stopped at zero whatever came before
    #[test]
    fn ended_always_resets(ops in prop::collection::vec(arbitrary_op(), 0..30)) {
        let (ctx, engine) = player(180.0);
        for op in &ops {
            apply(&ctx, &engine, op);
        }

        ctx.dispatch(MediaEvent::Ended);

        let state = ctx.state();
        prop_assert!(!state.is_playing);
        prop_assert_eq!(state.progress, 0.0);
    }

    /// Property: progress stays finite and within 0-100
    #[test]
    fn progress_stays_in_range(ops in prop::collection::vec(arbitrary_op(), 1..50)) {
        let (ctx, engine) = player(120.0);
        for op in &ops {
            apply(&ctx, &engine, op);
            let progress = ctx.state().progress;
            prop_assert!(progress.is_finite());
            prop_assert!((0.0..=100.0).contains(&progress), "progress out of range: {}", progress);
        }
    }

    /// Property: one player's commands never leak into another
    #[test]
    fn players_never_share_state(ops in prop::collection::vec(arbitrary_op(), 1..40)) {
        let (a, engine_a) = player(90.0);
        let (b, engine_b) = player(90.0);
        let before = b.state();

        for op in &ops {
            apply(&a, &engine_a, op);
        }

        prop_assert_eq!(b.state(), before);
        prop_assert_eq!(engine_b.position(), 0.0);
        prop_assert!(!engine_b.is_playing());
    }

    /// Property: seeking lands on fraction * duration, clamped
    #[test]
    fn seek_lands_on_fraction(duration in 1.0f64..3600.0, fraction in -1.0f64..2.0) {
        let (ctx, engine) = player(duration);
        ctx.seek_to(fraction).unwrap();

        let clamped = fraction.clamp(0.0, 1.0);
        prop_assert!((engine.position() - clamped * duration).abs() < 1e-6);
        prop_assert!((ctx.state().progress - clamped * 100.0).abs() < 1e-9);
    }
}
