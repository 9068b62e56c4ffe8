//! Weighted choice over a small table of candidates
//!
//! Used for bean colors and code-rain token groups. One uniform draw is
//! scaled to the total weight and matched against a cumulative scan.

use rand::Rng;

/// A (weight, candidate) table
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    entries: Vec<(f64, T)>,
    total: f64,
}

impl<T> Default for WeightedTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> WeightedTable<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            total: 0.0,
        }
    }

    /// Add a candidate. Negative and non-finite weights count as zero.
    pub fn push(&mut self, weight: f64, candidate: T) {
        let weight = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
        self.total += weight;
        self.entries.push((weight, candidate));
    }

    pub fn with(mut self, weight: f64, candidate: T) -> Self {
        self.push(weight, candidate);
        self
    }

    /// Sum of all (clamped) weights
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pick using a point already scaled to `[0, total)`.
    ///
    /// A point lands in the first entry whose cumulative weight exceeds it.
    /// Rounding past the end falls back to the last positive entry.
    pub fn pick_at(&self, point: f64) -> Option<&T> {
        if self.total <= 0.0 {
            return None;
        }
        let mut cumulative = 0.0;
        for (weight, candidate) in &self.entries {
            cumulative += *weight;
            if *weight > 0.0 && point < cumulative {
                return Some(candidate);
            }
        }
        self.entries
            .iter()
            .rev()
            .find(|(w, _)| *w > 0.0)
            .map(|(_, c)| c)
    }

    /// Draw one candidate. Returns `None` when the total weight is zero.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        if self.total <= 0.0 {
            return None;
        }
        let point = rng.random::<f64>() * self.total;
        self.pick_at(point)
    }
}
