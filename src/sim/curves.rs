//! Score-driven difficulty curves
//!
//! Phase classification, batch sizes and the green/orange spawn weights.
//! All functions are total over `u32` scores and never return negative
//! weights.

use serde::{Deserialize, Serialize};

/// Score-derived classification driving the spawn curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// score < 300
    Early,
    /// 300 <= score < 800
    Peak,
    /// 800 <= score < 1000
    Late,
    /// score >= 1000
    Sprint,
}

impl Phase {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..300 => Phase::Early,
            300..800 => Phase::Peak,
            800..1000 => Phase::Late,
            _ => Phase::Sprint,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Early => "EARLY",
            Phase::Peak => "PEAK",
            Phase::Late => "LATE",
            Phase::Sprint => "SPRINT",
        }
    }
}

/// Beans attempted per spawn tick: 3 / 5 / 4 / 3
pub fn batch_size(score: u32) -> usize {
    match Phase::from_score(score) {
        Phase::Early => 3,
        Phase::Peak => 5,
        Phase::Late => 4,
        Phase::Sprint => 3,
    }
}

/// Relative chance of a green bean in a batch
pub fn green_weight(score: u32) -> f64 {
    let s = score as f64;
    let weight = if score < 300 {
        5.0 + s / 120.0
    } else if score < 800 {
        (7.0 - (s - 300.0) / 180.0).max(3.0)
    } else {
        4.5 + (s - 800.0) / 80.0
    };
    weight.max(0.0)
}

/// Relative chance of an orange bean; zero from 512 on
pub fn orange_weight(score: u32) -> f64 {
    let s = score as f64;
    let weight = if score < 150 {
        1.2 + s / 200.0
    } else if score < 300 {
        1.8 + (s - 150.0) / 180.0
    } else if score < 512 {
        (1.0 - (s - 300.0) / 90.0).max(0.2)
    } else {
        0.0
    };
    weight.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_phase_thresholds() {
        assert_eq!(Phase::from_score(0), Phase::Early);
        assert_eq!(Phase::from_score(299), Phase::Early);
        assert_eq!(Phase::from_score(300), Phase::Peak);
        assert_eq!(Phase::from_score(799), Phase::Peak);
        assert_eq!(Phase::from_score(800), Phase::Late);
        assert_eq!(Phase::from_score(999), Phase::Late);
        assert_eq!(Phase::from_score(1000), Phase::Sprint);
        assert_eq!(Phase::from_score(u32::MAX).as_str(), "SPRINT");
    }

    #[test]
    fn test_batch_sizes() {
        assert_eq!(batch_size(8), 3);
        assert_eq!(batch_size(300), 5);
        assert_eq!(batch_size(800), 4);
        assert_eq!(batch_size(1024), 3);
    }

    #[test]
    fn test_green_weight_segments() {
        assert!(approx(green_weight(0), 5.0));
        assert!(approx(green_weight(240), 7.0));
        assert!(approx(green_weight(300), 7.0));
        assert!(approx(green_weight(480), 6.0));
        assert!(approx(green_weight(799), 7.0 - 499.0 / 180.0));
        assert!(green_weight(799) > 3.0);
        assert!(approx(green_weight(800), 4.5));
        assert!(approx(green_weight(880), 5.5));
    }

    #[test]
    fn test_orange_weight_segments() {
        assert!(approx(orange_weight(0), 1.2));
        assert!(approx(orange_weight(100), 1.7));
        assert!(approx(orange_weight(150), 1.8));
        assert!(approx(orange_weight(240), 2.3));
        assert!(approx(orange_weight(300), 1.0));
        assert!(approx(orange_weight(345), 0.5));
        assert!(approx(orange_weight(511), 0.2));
        assert_eq!(orange_weight(512), 0.0);
        assert_eq!(orange_weight(u32::MAX), 0.0);
    }

    #[test]
    fn test_weights_never_negative() {
        for score in (0..5000).step_by(7) {
            assert!(green_weight(score) >= 0.0);
            assert!(orange_weight(score) >= 0.0);
        }
    }
}
