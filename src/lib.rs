//! VibeSnake 1024 - A grid-filling snake arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, beans, scoring, win/loss)
//! - `overlay`: Code-rain decoration state driven by the current score
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences (shader variant, overlay)
//! - `highscores`: Session leaderboard of finished runs
//! - `session`: Platform-neutral game session wrapped by the front ends

pub mod highscores;
pub mod overlay;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod weighted;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::HighScores;
pub use session::Session;
pub use settings::{Settings, ShaderVariant};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Side length of the square board, in cells
    pub const GRID_SIZE: i32 = 64;
    /// Total number of cells on the board (64 x 64 = 4096)
    pub const TOTAL_CELLS: usize = (GRID_SIZE * GRID_SIZE) as usize;

    /// Board cell size in unscaled pixels
    pub const CELL_PIXELS: u32 = 16;
    /// Screen band above the board kept for the HUD
    pub const HUD_RESERVED_HEIGHT: u32 = 64;
    /// Gap kept below the board
    pub const BOARD_BOTTOM_MARGIN: u32 = 24;

    /// Grid steps per second
    pub const MOVE_FPS: f32 = 10.0;
    /// Presentation frame rate used by the headless runner
    pub const RENDER_FPS: f32 = 60.0;
    /// Seconds between bean batches
    pub const SPAWN_BATCH_INTERVAL: f32 = 0.5;

    /// Capacity ceilings as a fraction of all cells, per phase
    pub const CAP_EARLY: f64 = 0.30;
    pub const CAP_PEAK: f64 = 0.50;
    /// LATE and SPRINT share this ceiling
    pub const CAP_LATE: f64 = 0.80;
    /// Absolute bean ceiling regardless of grid size
    pub const MAX_BEANS_HARD_CAP: usize = 1600;
    /// Fraction of the capacity ceiling filled on reset
    pub const INITIAL_FILL_RATIO: f64 = 0.6;

    pub const INITIAL_RED_BEANS: usize = 96;
    pub const MAX_RED_BEAN_COUNT: usize = 200;

    /// Free-cell search gives up after this many random draws
    pub const FREE_CELL_ATTEMPTS: u32 = 500;

    /// Starting snake length (head at center + 3, tail at center - 4)
    pub const INITIAL_SNAKE_LEN: i32 = 8;

    /// Growth credit banked by a green bean
    pub const GREEN_GROWTH: u32 = 2;
    /// Forced tail removals caused by an orange bean
    pub const ORANGE_SHRINK: u32 = 1;
    /// Forced tail removals caused by a red bean
    pub const RED_SHRINK: u32 = 5;

    /// Perfect run: length needed with the board clear of red beans
    pub const WIN_SCORE: u32 = 1024;
    /// Perfect run: orange beans allowed to remain on the board
    pub const WIN_MAX_ORANGE: usize = 256;

    /// Orange beans stop spawning at this score
    pub const ORANGE_CUTOFF_SCORE: u32 = 512;
}
