//! High score leaderboard system
//!
//! Tracks the top 10 finished runs of this process. Nothing is written to
//! disk.

use serde::{Deserialize, Serialize};

use crate::sim::{RunOutcome, RunSummary};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Length when the run ended
    pub score: u32,
    /// Longest length reached during the run
    pub peak_score: u32,
    pub outcome: RunOutcome,
    /// Grid steps taken
    pub steps: u64,
}

impl From<RunSummary> for HighScoreEntry {
    fn from(run: RunSummary) -> Self {
        Self {
            score: run.score,
            peak_score: run.peak_score,
            outcome: run.outcome,
            steps: run.steps,
        }
    }
}

/// High score leaderboard, sorted by score descending
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record a finished run. Returns the rank achieved (1-indexed) or None
    /// if it didn't qualify.
    pub fn add_run(&mut self, run: RunSummary) -> Option<usize> {
        if !self.qualifies(run.score) {
            return None;
        }

        let pos = self.entries.iter().position(|e| run.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, run.into());
                i + 1
            }
            None => {
                self.entries.push(run.into());
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Run ranked #{} with length {}", rank, run.score);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Number of perfect runs on the board
    pub fn perfect_runs(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == RunOutcome::Perfect)
            .count()
    }
}
