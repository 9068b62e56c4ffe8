//! Data-driven game balance
//!
//! Every number the simulation uses for cadence, capacity and seeding lives
//! here, defaulting to the values in [`crate::consts`]. A tuning file is plain
//! JSON; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::curves::Phase;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

/// Simulation balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Board side length in cells
    pub grid_size: i32,
    /// Seconds per grid step
    pub move_interval: f32,
    /// Seconds between bean batches
    pub spawn_interval: f32,
    pub cap_early: f64,
    pub cap_peak: f64,
    pub cap_late: f64,
    pub max_beans_hard_cap: usize,
    pub initial_fill_ratio: f64,
    pub initial_red_beans: usize,
    pub max_red_beans: usize,
    pub free_cell_attempts: u32,
    pub initial_snake_len: i32,
    pub win_score: u32,
    pub win_max_orange: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            move_interval: 1.0 / MOVE_FPS,
            spawn_interval: SPAWN_BATCH_INTERVAL,
            cap_early: CAP_EARLY,
            cap_peak: CAP_PEAK,
            cap_late: CAP_LATE,
            max_beans_hard_cap: MAX_BEANS_HARD_CAP,
            initial_fill_ratio: INITIAL_FILL_RATIO,
            initial_red_beans: INITIAL_RED_BEANS,
            max_red_beans: MAX_RED_BEAN_COUNT,
            free_cell_attempts: FREE_CELL_ATTEMPTS,
            initial_snake_len: INITIAL_SNAKE_LEN,
            win_score: WIN_SCORE,
            win_max_orange: WIN_MAX_ORANGE,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.grid_size <= 0 {
            return Err(TuningError::Invalid("grid_size must be positive"));
        }
        if !(self.move_interval.is_finite() && self.move_interval > 0.0) {
            return Err(TuningError::Invalid("move_interval must be positive"));
        }
        if !(self.spawn_interval.is_finite() && self.spawn_interval > 0.0) {
            return Err(TuningError::Invalid("spawn_interval must be positive"));
        }
        for ratio in [
            self.cap_early,
            self.cap_peak,
            self.cap_late,
            self.initial_fill_ratio,
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(TuningError::Invalid("ratios must lie in 0.0..=1.0"));
            }
        }
        if self.initial_snake_len < 1 {
            return Err(TuningError::Invalid("initial_snake_len must be at least 1"));
        }
        // The starting snake is laid out on the middle row: head at center + 3.
        let center = self.grid_size / 2;
        let head_x = center + 3;
        let tail_x = head_x - (self.initial_snake_len - 1);
        if head_x >= self.grid_size || tail_x < 0 {
            return Err(TuningError::Invalid("initial snake does not fit the grid"));
        }
        Ok(())
    }

    /// Total number of cells on the board
    pub fn total_cells(&self) -> usize {
        let side = self.grid_size.max(0) as usize;
        side * side
    }

    /// Capacity ratio for a phase (LATE and SPRINT share one ceiling)
    pub fn cap_ratio(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Early => self.cap_early,
            Phase::Peak => self.cap_peak,
            Phase::Late | Phase::Sprint => self.cap_late,
        }
    }

    /// Maximum simultaneous beans permitted at `score`
    pub fn max_beans(&self, score: u32) -> usize {
        let ratio = self.cap_ratio(Phase::from_score(score));
        let by_ratio = (self.total_cells() as f64 * ratio) as usize;
        by_ratio.min(self.max_beans_hard_cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity_curve() {
        let tuning = Tuning::default();
        assert_eq!(tuning.total_cells(), TOTAL_CELLS);
        assert_eq!(tuning.max_beans(0), 1228);
        assert_eq!(tuning.max_beans(299), 1228);
        assert_eq!(tuning.max_beans(300), 1600); // 2048 clamped
        assert_eq!(tuning.max_beans(800), 1600);
        assert_eq!(tuning.max_beans(5000), 1600);
    }

    #[test]
    fn test_small_grid_capacity_uses_ratio() {
        let tuning = Tuning {
            grid_size: 16,
            ..Tuning::default()
        };
        assert_eq!(tuning.max_beans(0), 76); // 256 * 0.3
        assert_eq!(tuning.max_beans(400), 128);
        assert_eq!(tuning.max_beans(900), 204);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let tuning = Tuning::from_json(r#"{ "grid_size": 32, "initial_red_beans": 10 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.grid_size, 32);
        assert_eq!(tuning.initial_red_beans, 10);
        assert_eq!(tuning.free_cell_attempts, FREE_CELL_ATTEMPTS);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "grid_size": 0 }"#),
            Err(TuningError::Invalid(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "cap_peak": 1.5 }"#),
            Err(TuningError::Invalid(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "grid_size": 6 }"#),
            Err(TuningError::Invalid(_))
        ));
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
