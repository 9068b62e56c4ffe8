//! Game state and core simulation types
//!
//! `GameState` owns the grid, snake, beans, timers and transition flags of
//! one run. It is created once and recycled with [`GameState::reset`].

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::beans::{BeanField, BeanKind, random_free_cell};
use super::curves::{Phase, orange_weight};
use super::grid::{Cell, Direction, in_bounds, manhattan};
use super::snake::Snake;
use crate::tuning::{Tuning, TuningError};

/// Run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Snake moving, beans spawning
    Running,
    /// Hit a wall, itself, or shrank to nothing
    Dead,
    /// Perfect 1024 run
    Won,
}

impl RunStatus {
    /// Dead and Won only accept restart/exit
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunStatus::Running)
    }
}

/// Why a run ended in `Dead`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Wall,
    SelfCollision,
    /// Forced shrinks emptied the snake
    Starved,
}

/// Notable things that happened during an update, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BeanEaten(BeanKind),
    Died(DeathCause),
    Won,
    Reset,
}

/// Undrained events beyond this are dropped
pub const MAX_PENDING_EVENTS: usize = 256;

/// How a finished run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Dead,
    Perfect,
}

/// Result of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Length when the run ended
    pub score: u32,
    /// Longest length reached during the run
    pub peak_score: u32,
    pub outcome: RunOutcome,
    /// Grid steps taken
    pub steps: u64,
}

/// Read-only view handed to renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Head first
    pub snake: Vec<Cell>,
    /// Row-major order
    pub green: Vec<Cell>,
    pub orange: Vec<Cell>,
    pub red: Vec<Cell>,
    pub score: u32,
    pub high_score: u32,
    pub phase: Phase,
    pub status: RunStatus,
    pub direction: Direction,
    pub grow_pending: u32,
    pub steps: u64,
    pub grid_size: i32,
}

/// Explicit board description for [`GameState::from_layout`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Head first, each cell adjacent to the previous one
    pub snake: Vec<Cell>,
    pub direction: Direction,
    #[serde(default)]
    pub grow_pending: u32,
    #[serde(default)]
    pub green: Vec<Cell>,
    #[serde(default)]
    pub orange: Vec<Cell>,
    #[serde(default)]
    pub red: Vec<Cell>,
}

/// Reasons a [`Layout`] cannot become a running game
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error(transparent)]
    Tuning(#[from] TuningError),
    #[error("snake must have at least one cell")]
    EmptySnake,
    #[error("cell {0} is outside the board")]
    OutOfBounds(Cell),
    #[error("snake visits cell {0} twice")]
    DuplicateCell(Cell),
    #[error("snake segment {index} is not adjacent to the previous one")]
    Disconnected { index: usize },
    #[error("cell {0} holds more than one thing")]
    Overlap(Cell),
    #[error("direction points back into the snake's neck")]
    ReversesIntoNeck,
}

/// Complete state of one simulation instance
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG stream started from
    pub seed: u64,
    pub(crate) tuning: Tuning,
    pub(crate) rng: Pcg32,
    pub(crate) snake: Snake,
    pub(crate) beans: BeanField,
    /// Direction used by the last grid step
    pub(crate) direction: Direction,
    /// Direction the next grid step will commit
    pub(crate) pending_direction: Direction,
    /// Set once a direction change is accepted; released after each step
    pub(crate) direction_locked: bool,
    pub(crate) grow_pending: u32,
    pub(crate) move_timer: f32,
    pub(crate) spawn_timer: f32,
    pub(crate) status: RunStatus,
    pub(crate) high_score: u32,
    pub(crate) peak_score: u32,
    pub(crate) steps: u64,
    pub(crate) exit_requested: bool,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a new game with custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self::blank(seed, tuning);
        state.reset();
        state
    }

    fn blank(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            snake: Snake::default(),
            beans: BeanField::default(),
            direction: Direction::Right,
            pending_direction: Direction::Right,
            direction_locked: false,
            grow_pending: 0,
            move_timer: 0.0,
            spawn_timer: 0.0,
            status: RunStatus::Running,
            high_score: 0,
            peak_score: 0,
            steps: 0,
            exit_requested: false,
            events: Vec::new(),
        }
    }

    /// Build a running game from an explicit board, without seeding beans
    pub fn from_layout(seed: u64, tuning: Tuning, layout: Layout) -> Result<Self, LayoutError> {
        tuning.validate()?;
        let size = tuning.grid_size;

        if layout.snake.is_empty() {
            return Err(LayoutError::EmptySnake);
        }
        let mut snake = Snake::default();
        for (index, &cell) in layout.snake.iter().enumerate() {
            if !in_bounds(cell, size) {
                return Err(LayoutError::OutOfBounds(cell));
            }
            if snake.contains(cell) {
                return Err(LayoutError::DuplicateCell(cell));
            }
            if index > 0 && manhattan(cell, layout.snake[index - 1]) != 1 {
                return Err(LayoutError::Disconnected { index });
            }
            snake.push_tail(cell);
        }
        if let (Some(head), Some(neck)) = (snake.head(), snake.neck()) {
            if Direction::from_delta(neck - head) == Some(layout.direction) {
                return Err(LayoutError::ReversesIntoNeck);
            }
        }

        let mut beans = BeanField::default();
        let colored = [
            (BeanKind::Green, &layout.green),
            (BeanKind::Orange, &layout.orange),
            (BeanKind::Red, &layout.red),
        ];
        for (kind, cells) in colored {
            for &cell in cells {
                if !in_bounds(cell, size) {
                    return Err(LayoutError::OutOfBounds(cell));
                }
                if snake.contains(cell) || !beans.insert(kind, cell) {
                    return Err(LayoutError::Overlap(cell));
                }
            }
        }

        let mut state = Self::blank(seed, tuning);
        state.snake = snake;
        state.beans = beans;
        state.direction = layout.direction;
        state.pending_direction = layout.direction;
        state.grow_pending = layout.grow_pending;
        state.high_score = state.score();
        state.peak_score = state.score();
        Ok(state)
    }

    /// Start a fresh run in place. Only the high score (and the RNG stream)
    /// carry over.
    pub fn reset(&mut self) {
        let center = self.tuning.grid_size / 2;
        let head_x = center + 3;
        self.snake = Snake::from_cells(
            (0..self.tuning.initial_snake_len).map(|i| Cell::new(head_x - i, center)),
        );
        self.beans.clear();
        self.direction = Direction::Right;
        self.pending_direction = Direction::Right;
        self.direction_locked = false;
        self.grow_pending = 0;
        self.move_timer = 0.0;
        self.spawn_timer = 0.0;
        self.status = RunStatus::Running;
        self.steps = 0;
        self.exit_requested = false;

        let score = self.score();
        self.peak_score = score;
        self.high_score = self.high_score.max(score);

        self.seed_initial_beans();
        self.seed_initial_red_beans();

        log::info!(
            "New run: length {}, beans G/O/R {}/{}/{}",
            score,
            self.beans.count(BeanKind::Green),
            self.beans.count(BeanKind::Orange),
            self.beans.count(BeanKind::Red)
        );
        self.push_event(GameEvent::Reset);
    }

    /// Fill up to the configured share of the current capacity, about one
    /// orange for every two greens
    fn seed_initial_beans(&mut self) {
        let score = self.score();
        let target = (self.max_beans() as f64 * self.tuning.initial_fill_ratio) as usize;
        let need = target.saturating_sub(self.beans.total());

        for _ in 0..need {
            let mut kind = if self.rng.random::<f64>() < 2.0 / 3.0 {
                BeanKind::Green
            } else {
                BeanKind::Orange
            };
            if kind == BeanKind::Orange && orange_weight(score) <= 0.0 {
                kind = BeanKind::Green;
            }
            let Some(cell) = self.random_free_cell() else {
                break;
            };
            self.beans.insert(kind, cell);
        }
    }

    /// Red beans exist only from here on; nothing replenishes them
    fn seed_initial_red_beans(&mut self) {
        let target = self.tuning.initial_red_beans.min(self.tuning.max_red_beans);
        for _ in 0..target {
            if self.beans.count(BeanKind::Red) >= self.tuning.max_red_beans {
                break;
            }
            let Some(cell) = self.random_free_cell() else {
                break;
            };
            self.beans.insert(BeanKind::Red, cell);
        }
    }

    pub(crate) fn random_free_cell(&mut self) -> Option<Cell> {
        random_free_cell(
            &mut self.rng,
            self.tuning.grid_size,
            self.tuning.free_cell_attempts,
            &self.snake,
            &self.beans,
        )
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        if self.events.len() < MAX_PENDING_EVENTS {
            self.events.push(event);
        }
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Score is the snake's length
    #[inline]
    pub fn score(&self) -> u32 {
        self.snake.len() as u32
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn phase(&self) -> Phase {
        Phase::from_score(self.score())
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn direction_locked(&self) -> bool {
        self.direction_locked
    }

    pub fn grow_pending(&self) -> u32 {
        self.grow_pending
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn beans(&self) -> &BeanField {
        &self.beans
    }

    /// Capacity ceiling at the current score
    pub fn max_beans(&self) -> usize {
        self.tuning.max_beans(self.score())
    }

    /// Whether the caller asked to leave from a terminal state
    pub fn wants_exit(&self) -> bool {
        self.exit_requested
    }

    /// Summary of the run, once it has ended
    pub fn run_summary(&self) -> Option<RunSummary> {
        let outcome = match self.status {
            RunStatus::Running => return None,
            RunStatus::Dead => RunOutcome::Dead,
            RunStatus::Won => RunOutcome::Perfect,
        };
        Some(RunSummary {
            score: self.score(),
            peak_score: self.peak_score,
            outcome,
            steps: self.steps,
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.iter().collect(),
            green: self.beans.sorted(BeanKind::Green),
            orange: self.beans.sorted(BeanKind::Orange),
            red: self.beans.sorted(BeanKind::Red),
            score: self.score(),
            high_score: self.high_score,
            phase: self.phase(),
            status: self.status,
            direction: self.direction,
            grow_pending: self.grow_pending,
            steps: self.steps,
            grid_size: self.tuning.grid_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    #[test]
    fn test_new_run_layout() {
        let state = GameState::new(12345);
        assert_eq!(state.status(), RunStatus::Running);
        assert_eq!(state.score(), 8);
        assert_eq!(state.high_score(), 8);
        assert_eq!(state.snake().head(), Some(IVec2::new(35, 32)));
        assert_eq!(state.snake().tail(), Some(IVec2::new(28, 32)));
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.phase(), Phase::Early);
    }

    #[test]
    fn test_initial_seeding_counts() {
        let state = GameState::new(12345);
        let beans = state.beans();
        // 60% of the EARLY ceiling (1228) on an almost empty board
        assert_eq!(
            beans.count(BeanKind::Green) + beans.count(BeanKind::Orange),
            736
        );
        assert_eq!(beans.count(BeanKind::Red), 96);
        assert!(beans.count(BeanKind::Orange) > 150);
        assert!(beans.count(BeanKind::Green) > beans.count(BeanKind::Orange));
        assert!(beans.total() <= state.max_beans());
    }

    #[test]
    fn test_initial_beans_avoid_snake() {
        let state = GameState::new(7);
        for cell in state.snake().iter() {
            assert!(!state.beans().contains(cell));
        }
    }

    #[test]
    fn test_reset_keeps_high_score_only() {
        let mut state = GameState::new(1);
        state.high_score = 500;
        state.grow_pending = 4;
        state.status = RunStatus::Dead;
        state.steps = 99;
        state.reset();
        assert_eq!(state.high_score(), 500);
        assert_eq!(state.grow_pending(), 0);
        assert_eq!(state.status(), RunStatus::Running);
        assert_eq!(state.steps(), 0);
        assert_eq!(state.score(), 8);
    }

    #[test]
    fn test_reset_twice_matches_except_beans() {
        let mut state = GameState::new(42);
        state.reset();
        let a = state.snapshot();
        state.reset();
        let b = state.snapshot();
        assert_eq!(a.snake, b.snake);
        assert_eq!(a.score, 8);
        assert_eq!(a.score, b.score);
        assert_eq!(a.high_score, b.high_score);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.status, b.status);
        assert_eq!(a.direction, b.direction);
        assert_eq!(a.grow_pending, b.grow_pending);
        assert_eq!(a.red.len(), b.red.len());
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = GameState::new(2024).snapshot();
        let b = GameState::new(2024).snapshot();
        assert_eq!(a, b);
        let c = GameState::new(2025).snapshot();
        assert_ne!(a.green, c.green);
    }

    #[test]
    fn test_small_grid_seeding() {
        let tuning = Tuning {
            grid_size: 16,
            ..Tuning::default()
        };
        let state = GameState::with_tuning(3, tuning).expect("valid tuning");
        // 256 cells: ceiling 76, seed 45 colored, then red beans until the
        // random search starts giving up or 96 are placed
        assert_eq!(
            state.beans().count(BeanKind::Green) + state.beans().count(BeanKind::Orange),
            45
        );
        assert!(state.beans().count(BeanKind::Red) <= 96);
        assert!(state.beans().total() + state.score() as usize <= 256);
    }

    #[test]
    fn test_from_layout_rejects_bad_boards() {
        let tuning = Tuning::default();
        let layout = |snake: Vec<IVec2>| Layout {
            snake,
            direction: Direction::Right,
            grow_pending: 0,
            green: vec![],
            orange: vec![],
            red: vec![],
        };

        assert!(matches!(
            GameState::from_layout(0, tuning.clone(), layout(vec![])),
            Err(LayoutError::EmptySnake)
        ));
        assert!(matches!(
            GameState::from_layout(0, tuning.clone(), layout(vec![IVec2::new(-1, 0)])),
            Err(LayoutError::OutOfBounds(_))
        ));
        assert!(matches!(
            GameState::from_layout(
                0,
                tuning.clone(),
                layout(vec![IVec2::new(1, 0), IVec2::new(3, 0)])
            ),
            Err(LayoutError::Disconnected { index: 1 })
        ));
        assert!(matches!(
            GameState::from_layout(
                0,
                tuning.clone(),
                layout(vec![IVec2::new(1, 0), IVec2::new(2, 0)])
            ),
            Err(LayoutError::ReversesIntoNeck)
        ));

        let mut overlapping = layout(vec![IVec2::new(2, 0), IVec2::new(1, 0)]);
        overlapping.green = vec![IVec2::new(5, 5)];
        overlapping.red = vec![IVec2::new(5, 5)];
        assert!(matches!(
            GameState::from_layout(0, tuning, overlapping),
            Err(LayoutError::Overlap(_))
        ));
    }

    #[test]
    fn test_from_layout_builds_running_state() {
        let layout = Layout {
            snake: vec![IVec2::new(2, 0), IVec2::new(1, 0), IVec2::new(0, 0)],
            direction: Direction::Right,
            grow_pending: 1,
            green: vec![IVec2::new(5, 0)],
            orange: vec![IVec2::new(6, 0)],
            red: vec![],
        };
        let mut state = GameState::from_layout(9, Tuning::default(), layout).expect("valid layout");
        assert_eq!(state.score(), 3);
        assert_eq!(state.high_score(), 3);
        assert_eq!(state.grow_pending(), 1);
        assert_eq!(state.beans().total(), 2);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(5);
        let json = serde_json::to_string(&state.snapshot()).expect("serialize snapshot");
        let back: Snapshot = serde_json::from_str(&json).expect("deserialize snapshot");
        assert_eq!(back.score, 8);
        assert_eq!(back.snake.len(), 8);
    }
}
