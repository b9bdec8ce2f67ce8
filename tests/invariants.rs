//! Property tests over whole runs

use std::collections::HashSet;

use glam::Vec2;
use proptest::prelude::*;

use sky_hop::highscores::{HighScoreStore, HighScores};
use sky_hop::sim::generate::prune;
use sky_hop::sim::{GameEvent, GameState, PlatformKind, TickInput, TickOutcome, tick};
use sky_hop::tuning::Tuning;

fn arb_input() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), proptest::option::weighted(0.05, (0.0f32..400.0, 0.0f32..600.0)))
        .prop_map(|(left, right, shot)| TickInput {
            left,
            right,
            shoot: shot.map(|(x, y)| Vec2::new(x, y)),
        })
}

fn arb_dt() -> impl Strategy<Value = f32> {
    (1.0f32 / 144.0)..(1.0f32 / 20.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn score_never_decreases(
        seed in any::<u64>(),
        steps in proptest::collection::vec((arb_input(), arb_dt()), 1..400),
    ) {
        let mut state = GameState::new(seed, Tuning::default());
        let mut last = state.score;
        for (input, dt) in &steps {
            let outcome = tick(&mut state, input, *dt);
            prop_assert!(state.score >= last);
            last = state.score;
            if let TickOutcome::GameOver { score, .. } = outcome {
                prop_assert_eq!(score, state.score);
                break;
            }
        }
    }

    #[test]
    fn jump_offset_stays_in_profile(
        seed in any::<u64>(),
        steps in proptest::collection::vec((arb_input(), arb_dt()), 1..400),
    ) {
        let mut state = GameState::new(seed, Tuning::default());
        let len = state.tuning.jumper.jump_profile.len();
        for (input, dt) in &steps {
            let outcome = tick(&mut state, input, *dt);
            prop_assert!(state.jumper.jump_offset < len);
            if !state.jumper.jumping {
                prop_assert_eq!(state.jumper.jump_offset, 0);
            }
            if outcome != TickOutcome::Running {
                break;
            }
        }
    }

    #[test]
    fn breakable_platforms_break_at_most_once(
        seed in any::<u64>(),
        steps in proptest::collection::vec((arb_input(), arb_dt()), 1..400),
    ) {
        let mut tuning = Tuning::default();
        tuning.platform.weights.breakable = 20;
        let mut state = GameState::new(seed, tuning);
        let mut broken = HashSet::new();
        for (input, dt) in &steps {
            let outcome = tick(&mut state, input, *dt);
            for event in state.drain_events() {
                if let GameEvent::PlatformBroke { id } = event {
                    prop_assert!(broken.insert(id), "platform {} broke twice", id);
                }
            }
            for p in &state.platforms {
                if let PlatformKind::Breakable { broken: true } = p.kind {
                    prop_assert!(!p.bouncable);
                    prop_assert!(broken.contains(&p.id));
                }
            }
            if outcome != TickOutcome::Running {
                break;
            }
        }
    }

    #[test]
    fn pruning_twice_is_a_no_op(seed in any::<u64>(), drop in 0.0f32..1500.0) {
        let mut state = GameState::new(seed, Tuning::default());
        state.shift_all(drop);
        prune(&mut state);
        let after_first = state.snapshot();
        prop_assert_eq!(prune(&mut state), 0);
        prop_assert_eq!(state.snapshot(), after_first);
        let bottom = state.tuning.screen.height;
        prop_assert!(state.platforms.iter().all(|p| p.pos.y <= bottom));
        prop_assert!(state.monsters.iter().all(|m| m.pos.y <= bottom));
    }

    #[test]
    fn leaderboard_stays_sorted_and_bounded(
        scores in proptest::collection::vec(0.0f32..10_000.0, 0..30),
        max in 1usize..12,
    ) {
        let mut board = HighScores::new(max);
        for s in &scores {
            board.add_score(*s);
            prop_assert!(board.entries().len() <= max);
            prop_assert!(board.entries().windows(2).all(|w| w[0] >= w[1]));
        }
        let best = scores.iter().copied().fold(0.0f32, f32::max);
        prop_assert_eq!(board.best(), best);
    }

    #[test]
    fn written_score_reads_back(
        existing in proptest::collection::vec(0.0f32..1_000.0, 0..8),
        score in 0.0f32..1_000.0,
        case in any::<u32>(),
    ) {
        let path = std::env::temp_dir().join(format!(
            "sky_hop_prop_{}_{}.json",
            std::process::id(),
            case
        ));
        let store = HighScoreStore::new(&path, 5);
        store.save(&HighScores::from_scores(existing, 5)).unwrap();

        let (board, saved) = store.submit(score);
        prop_assert!(saved.is_ok());
        let loaded = store.load();
        prop_assert_eq!(loaded.entries().len(), board.entries().len());
        for (a, b) in loaded.entries().iter().zip(board.entries()) {
            prop_assert!((a - b).abs() < 1e-3);
        }

        let floor = board.entries().last().copied().unwrap_or(0.0);
        if board.entries().len() < 5 || score > floor {
            prop_assert!(loaded.entries().iter().any(|e| (e - score).abs() < 1e-3));
        }
        let _ = std::fs::remove_file(&path);
    }
}
