//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Membership-only use of hash sets (never iteration order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod beans;
pub mod curves;
pub mod grid;
pub mod snake;
pub mod state;
pub mod tick;

pub use autopilot::choose_direction;
pub use beans::{BeanField, BeanKind};
pub use curves::{Phase, batch_size, green_weight, orange_weight};
pub use grid::{Cell, Direction};
pub use snake::Snake;
pub use state::{
    DeathCause, GameEvent, GameState, Layout, LayoutError, RunOutcome, RunStatus, RunSummary,
    Snapshot,
};
pub use tick::{FrameInput, InputEvent, frame};

#[cfg(test)]
mod invariants;
