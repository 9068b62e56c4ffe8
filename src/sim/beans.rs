//! Bean sets and free-cell search

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, sort_cells};
use super::snake::Snake;

/// Bean colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeanKind {
    /// +2 length, banked as growth credit
    Green,
    /// One forced tail removal
    Orange,
    /// Five forced tail removals; only placed when a run starts
    Red,
}

/// Three disjoint bean sets
#[derive(Debug, Clone, Default)]
pub struct BeanField {
    green: HashSet<Cell>,
    orange: HashSet<Cell>,
    red: HashSet<Cell>,
}

impl BeanField {
    fn set(&self, kind: BeanKind) -> &HashSet<Cell> {
        match kind {
            BeanKind::Green => &self.green,
            BeanKind::Orange => &self.orange,
            BeanKind::Red => &self.red,
        }
    }

    fn set_mut(&mut self, kind: BeanKind) -> &mut HashSet<Cell> {
        match kind {
            BeanKind::Green => &mut self.green,
            BeanKind::Orange => &mut self.orange,
            BeanKind::Red => &mut self.red,
        }
    }

    /// Which bean, if any, sits on `cell`
    pub fn kind_at(&self, cell: Cell) -> Option<BeanKind> {
        [BeanKind::Green, BeanKind::Orange, BeanKind::Red]
            .into_iter()
            .find(|&kind| self.set(kind).contains(&cell))
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.kind_at(cell).is_some()
    }

    /// Add a bean. Returns false if the cell already holds one.
    pub fn insert(&mut self, kind: BeanKind, cell: Cell) -> bool {
        if self.contains(cell) {
            return false;
        }
        self.set_mut(kind).insert(cell)
    }

    /// Eat whatever bean sits on `cell`
    pub fn take(&mut self, cell: Cell) -> Option<BeanKind> {
        let kind = self.kind_at(cell)?;
        self.set_mut(kind).remove(&cell);
        Some(kind)
    }

    pub fn count(&self, kind: BeanKind) -> usize {
        self.set(kind).len()
    }

    /// Beans of every color
    pub fn total(&self) -> usize {
        self.green.len() + self.orange.len() + self.red.len()
    }

    pub fn clear(&mut self) {
        self.green.clear();
        self.orange.clear();
        self.red.clear();
    }

    /// Cells of one color in row-major order
    pub fn sorted(&self, kind: BeanKind) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.set(kind).iter().copied().collect();
        sort_cells(&mut cells);
        cells
    }

    pub fn iter(&self, kind: BeanKind) -> impl Iterator<Item = Cell> + '_ {
        self.set(kind).iter().copied()
    }
}

/// Draw random cells until one is free of snake and beans.
///
/// Gives up after `attempts` draws so a crowded board never stalls a frame.
pub fn random_free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    grid_size: i32,
    attempts: u32,
    snake: &Snake,
    beans: &BeanField,
) -> Option<Cell> {
    if grid_size <= 0 {
        return None;
    }
    for _ in 0..attempts {
        let x = rng.random_range(0..grid_size);
        let y = rng.random_range(0..grid_size);
        let cell = Cell::new(x, y);
        if !snake.contains(cell) && !beans.contains(cell) {
            return Some(cell);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_sets_stay_disjoint() {
        let mut beans = BeanField::default();
        let cell = IVec2::new(2, 3);
        assert!(beans.insert(BeanKind::Green, cell));
        assert!(!beans.insert(BeanKind::Red, cell));
        assert_eq!(beans.kind_at(cell), Some(BeanKind::Green));
        assert_eq!(beans.total(), 1);
    }

    #[test]
    fn test_take_removes() {
        let mut beans = BeanField::default();
        beans.insert(BeanKind::Orange, IVec2::new(1, 1));
        assert_eq!(beans.take(IVec2::new(1, 1)), Some(BeanKind::Orange));
        assert_eq!(beans.take(IVec2::new(1, 1)), None);
        assert_eq!(beans.count(BeanKind::Orange), 0);
    }

    #[test]
    fn test_free_cell_avoids_occupied() {
        let mut rng = Pcg32::seed_from_u64(3);
        let snake = Snake::from_cells([IVec2::new(0, 0), IVec2::new(1, 0)]);
        let mut beans = BeanField::default();
        beans.insert(BeanKind::Red, IVec2::new(0, 1));
        // 2x2 board: only (1, 1) is free
        for _ in 0..20 {
            let cell = random_free_cell(&mut rng, 2, 500, &snake, &beans);
            assert_eq!(cell, Some(IVec2::new(1, 1)));
        }
    }

    #[test]
    fn test_free_cell_gives_up_on_full_board() {
        let mut rng = Pcg32::seed_from_u64(3);
        let snake = Snake::from_cells([IVec2::new(0, 0)]);
        assert_eq!(random_free_cell(&mut rng, 1, 500, &snake, &BeanField::default()), None);
        assert_eq!(random_free_cell(&mut rng, 0, 500, &snake, &BeanField::default()), None);
    }
}
