//! Fixed timestep simulation tick
//!
//! Movement and bean spawning each drain their own accumulator in whole
//! steps, so the snake's speed never depends on the render frame rate.

use super::autopilot;
use super::beans::BeanKind;
use super::curves::{batch_size, green_weight, orange_weight};
use super::grid::{Cell, Direction, in_bounds};
use super::state::{DeathCause, GameEvent, GameState, RunStatus};
use crate::consts::*;
use crate::weighted::WeightedTable;

/// A discrete input sampled during one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Direction(Direction),
    Restart,
    Exit,
}

/// Inputs for a single frame (applied in order before the fixed-step drain)
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub events: Vec<InputEvent>,
    /// Idle/demo mode - autopilot steers the snake
    pub idle_mode: bool,
}

/// Apply one frame's input, then advance the simulation by `dt` seconds
pub fn frame(state: &mut GameState, input: &FrameInput, dt: f32) {
    for event in &input.events {
        match *event {
            InputEvent::Direction(direction) => {
                state.handle_direction_input(direction);
            }
            InputEvent::Restart => {
                state.handle_restart_request();
            }
            InputEvent::Exit => {
                state.handle_exit_request();
            }
        }
    }

    if input.idle_mode && state.status() == RunStatus::Running && !state.direction_locked() {
        if let Some(direction) = autopilot::choose_direction(state) {
            state.handle_direction_input(direction);
        }
    }

    state.update(dt);
}

impl GameState {
    /// Queue a direction for the next grid step.
    ///
    /// Rejected while not running, when a change was already accepted since
    /// the last step, or when it reverses the active direction.
    pub fn handle_direction_input(&mut self, direction: Direction) -> bool {
        if self.status != RunStatus::Running || self.direction_locked {
            return false;
        }
        if direction == self.direction.opposite() {
            return false;
        }
        self.pending_direction = direction;
        self.direction_locked = true;
        true
    }

    /// Start over from Dead or Won. Ignored while running.
    pub fn handle_restart_request(&mut self) -> bool {
        if !self.status.is_terminal() {
            return false;
        }
        self.reset();
        true
    }

    /// Flag that the player wants to leave. Only honored from Dead or Won.
    pub fn handle_exit_request(&mut self) -> bool {
        if !self.status.is_terminal() {
            return false;
        }
        self.exit_requested = true;
        true
    }

    /// Advance timers by `dt` seconds, running every grid step and spawn
    /// batch that came due, then check for a perfect run.
    pub fn update(&mut self, dt: f32) {
        if self.status != RunStatus::Running {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.move_timer += dt;
        while self.move_timer >= self.tuning.move_interval {
            self.move_timer -= self.tuning.move_interval;
            self.step();
            self.direction_locked = false;
            if self.status != RunStatus::Running {
                return;
            }
        }

        self.spawn_timer += dt;
        while self.spawn_timer >= self.tuning.spawn_interval {
            self.spawn_timer -= self.tuning.spawn_interval;
            self.spawn_batch();
        }

        self.check_win();
    }

    /// Whether moving the head onto `cell` this step would kill the snake.
    ///
    /// The tail is safe only if it vacates this step, i.e. no growth credit
    /// is banked. Collision uses the body before any removal.
    pub fn is_lethal(&self, cell: Cell) -> bool {
        if !in_bounds(cell, self.tuning.grid_size) {
            return true;
        }
        let tail_vacates = self.grow_pending == 0 && self.snake.tail() == Some(cell);
        self.snake.contains(cell) && !tail_vacates
    }

    /// Perform exactly one grid step
    pub fn step(&mut self) {
        if self.status != RunStatus::Running {
            return;
        }

        self.direction = self.pending_direction;
        let Some(head) = self.snake.head() else {
            self.die(DeathCause::Starved);
            return;
        };
        let new_head = head + self.direction.delta();

        if !in_bounds(new_head, self.tuning.grid_size) {
            self.die(DeathCause::Wall);
            return;
        }
        if self.is_lethal(new_head) {
            self.die(DeathCause::SelfCollision);
            return;
        }

        self.snake.push_head(new_head);

        let mut forced_shrinks = 0;
        if let Some(kind) = self.beans.take(new_head) {
            match kind {
                BeanKind::Green => self.grow_pending += GREEN_GROWTH,
                BeanKind::Orange => forced_shrinks += ORANGE_SHRINK,
                BeanKind::Red => forced_shrinks += RED_SHRINK,
            }
            self.push_event(GameEvent::BeanEaten(kind));
        }

        // Base step: banked growth keeps the tail in place
        if self.grow_pending > 0 {
            self.grow_pending -= 1;
        } else {
            self.snake.pop_tail();
        }

        // Orange/red: growth credit absorbs shrinks before the tail does
        for _ in 0..forced_shrinks {
            if self.grow_pending > 0 {
                self.grow_pending -= 1;
                continue;
            }
            self.snake.pop_tail();
            if self.snake.is_empty() {
                self.die(DeathCause::Starved);
                return;
            }
        }

        self.steps += 1;
        let score = self.score();
        self.peak_score = self.peak_score.max(score);
        if score > self.high_score {
            self.high_score = score;
        }
    }

    fn die(&mut self, cause: DeathCause) {
        self.status = RunStatus::Dead;
        log::info!(
            "Run over ({:?}) at length {} after {} steps",
            cause,
            self.score(),
            self.steps
        );
        self.push_event(GameEvent::Died(cause));
    }

    /// Spawn one batch of green/orange beans. Returns how many were placed.
    pub fn spawn_batch(&mut self) -> usize {
        let score = self.score();
        let headroom = self.max_beans().saturating_sub(self.beans.total());
        if headroom == 0 {
            return 0;
        }
        let want = headroom.min(batch_size(score));

        let table = WeightedTable::new()
            .with(green_weight(score), BeanKind::Green)
            .with(orange_weight(score), BeanKind::Orange);
        if table.total() <= 0.0 {
            return 0;
        }

        let mut placed = 0;
        for _ in 0..want {
            let mut kind = table.pick(&mut self.rng).copied().unwrap_or(BeanKind::Green);
            if kind == BeanKind::Orange && score >= ORANGE_CUTOFF_SCORE {
                kind = BeanKind::Green;
            }
            let Some(cell) = self.random_free_cell() else {
                break;
            };
            self.beans.insert(kind, cell);
            placed += 1;
        }

        log::debug!(
            "Spawned {}/{} beans at score {} (total {})",
            placed,
            want,
            score,
            self.beans.total()
        );
        placed
    }

    /// Per-frame perfect-run check. Returns true once the run is won.
    pub fn check_win(&mut self) -> bool {
        match self.status {
            RunStatus::Won => return true,
            RunStatus::Dead => return false,
            RunStatus::Running => {}
        }
        if self.score() >= self.tuning.win_score
            && self.beans.count(BeanKind::Red) == 0
            && self.beans.count(BeanKind::Orange) <= self.tuning.win_max_orange
        {
            self.status = RunStatus::Won;
            log::info!("PERFECT {} after {} steps", self.score(), self.steps);
            self.push_event(GameEvent::Won);
            return true;
        }
        false
    }
}
