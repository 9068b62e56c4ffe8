//! Randomized invariant checks over whole runs

use std::collections::HashSet;

use proptest::prelude::*;

use super::*;

fn direction() -> impl Strategy<Value = Option<Direction>> {
    prop_oneof![
        3 => Just(None),
        1 => prop::sample::select(Direction::ALL.to_vec()).prop_map(Some),
    ]
}

fn check_board(state: &GameState) {
    let snake = state.snake();
    assert!(snake.is_consistent(), "snake cells repeat");
    assert_eq!(state.score() as usize, snake.len());
    assert!(state.high_score() >= state.score());
    for cell in snake.iter() {
        assert!(!state.beans().contains(cell), "bean under snake at {cell}");
    }
    let [green, orange, red] = [BeanKind::Green, BeanKind::Orange, BeanKind::Red]
        .map(|kind| state.beans().iter(kind).collect::<HashSet<_>>());
    assert!(green.is_disjoint(&orange), "green and orange share a cell");
    assert!(green.is_disjoint(&red), "green and red share a cell");
    assert!(orange.is_disjoint(&red), "orange and red share a cell");
    for (kind, cells) in [
        (BeanKind::Green, &green),
        (BeanKind::Orange, &orange),
        (BeanKind::Red, &red),
    ] {
        for &cell in cells {
            assert_eq!(state.beans().kind_at(cell), Some(kind));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_random_play_keeps_invariants(
        seed in any::<u64>(),
        moves in prop::collection::vec((direction(), 0.0f32..0.25), 1..200),
    ) {
        let mut state = GameState::new(seed);
        for (dir, dt) in moves {
            if let Some(dir) = dir {
                state.handle_direction_input(dir);
            }
            state.update(dt);
            check_board(&state);
            prop_assert!(state.beans().total() <= state.max_beans());
        }
    }

    #[test]
    fn prop_spawning_respects_capacity(seed in any::<u64>(), ticks in 1usize..400) {
        let mut state = GameState::new(seed);
        for _ in 0..ticks {
            state.spawn_batch();
            prop_assert!(state.beans().total() <= state.max_beans());
            prop_assert!(state.beans().total() <= crate::consts::MAX_BEANS_HARD_CAP);
        }
        prop_assert_eq!(state.beans().count(BeanKind::Red), 96);
    }

    #[test]
    fn prop_reverse_never_applies(seed in any::<u64>(), steps in 1usize..40) {
        let mut state = GameState::new(seed);
        for _ in 0..steps {
            if state.status() != RunStatus::Running {
                break;
            }
            let before = state.direction();
            prop_assert!(!state.handle_direction_input(before.opposite()));
            state.update(state.tuning().move_interval);
            if state.status() == RunStatus::Running {
                prop_assert_eq!(state.direction(), before);
            }
        }
    }
}
