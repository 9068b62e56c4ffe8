//! Idle/demo mode steering
//!
//! Greedy and deterministic: no lookahead beyond the next cell.

use std::cmp::Reverse;

use super::beans::BeanKind;
use super::grid::{Cell, Direction, manhattan};
use super::state::GameState;

/// Pick the next direction for the snake, or `None` if every move is fatal.
///
/// Safe moves are ranked by: avoid red, avoid orange, closest green bean,
/// most open neighbours. Ties go to the earlier entry of [`Direction::ALL`].
pub fn choose_direction(state: &GameState) -> Option<Direction> {
    let head = state.snake().head()?;
    let reverse = state.direction().opposite();

    Direction::ALL
        .into_iter()
        .filter(|&d| d != reverse)
        .map(|d| (d, head + d.delta()))
        .filter(|&(_, next)| !state.is_lethal(next))
        .min_by_key(|&(_, next)| {
            let bean = state.beans().kind_at(next);
            (
                bean == Some(BeanKind::Red),
                bean == Some(BeanKind::Orange),
                nearest_green(state, next),
                Reverse(open_neighbours(state, next)),
            )
        })
        .map(|(d, _)| d)
}

fn nearest_green(state: &GameState, from: Cell) -> i32 {
    state
        .beans()
        .iter(BeanKind::Green)
        .map(|bean| manhattan(from, bean))
        .min()
        .unwrap_or(i32::MAX)
}

fn open_neighbours(state: &GameState, cell: Cell) -> usize {
    Direction::ALL
        .into_iter()
        .map(|d| cell + d.delta())
        .filter(|&n| !state.is_lethal(n))
        .count()
}
