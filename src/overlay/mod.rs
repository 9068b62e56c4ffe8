//! Screen decorations that sit outside the simulation
//!
//! Overlay state is advanced per rendered frame, has its own RNG, and never
//! feeds back into the game.

pub mod code_rain;

pub use code_rain::{Bounds, CodeRain, CodeRainConfig, Glyph, TokenGroup, success_weight};
