//! Snake body: a ring buffer of cells plus an occupancy index
//!
//! Head is the front of the deque. The set mirrors the deque and is updated
//! incrementally on every push/pop, never rebuilt.

use std::collections::{HashSet, VecDeque};

use super::grid::Cell;

#[derive(Debug, Clone, Default)]
pub struct Snake {
    body: VecDeque<Cell>,
    occupied: HashSet<Cell>,
}

impl Snake {
    /// Build from head-first cells. Duplicates are dropped.
    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Self {
        let mut snake = Self::default();
        for cell in cells {
            if snake.occupied.insert(cell) {
                snake.body.push_back(cell);
            }
        }
        snake
    }

    #[inline]
    pub fn head(&self) -> Option<Cell> {
        self.body.front().copied()
    }

    #[inline]
    pub fn tail(&self) -> Option<Cell> {
        self.body.back().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.occupied.contains(&cell)
    }

    /// Place a new head.
    ///
    /// The only legal overlap is the current tail when it is about to be
    /// popped in the same step; the index keeps a single entry for it.
    pub fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
        self.occupied.insert(cell);
    }

    /// Append behind the current tail (layout construction only)
    pub(crate) fn push_tail(&mut self, cell: Cell) {
        if self.occupied.insert(cell) {
            self.body.push_back(cell);
        }
    }

    /// Remove and return the tail cell.
    pub fn pop_tail(&mut self) -> Option<Cell> {
        let cell = self.body.pop_back()?;
        // Head re-entered the vacating tail cell: it is still occupied.
        if self.body.front() != Some(&cell) {
            self.occupied.remove(&cell);
        }
        Some(cell)
    }

    /// Head-first iteration
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Cell right behind the head, if any
    pub fn neck(&self) -> Option<Cell> {
        self.body.get(1).copied()
    }

    pub fn clear(&mut self) {
        self.body.clear();
        self.occupied.clear();
    }

    /// Both views agree and no cell repeats
    pub fn is_consistent(&self) -> bool {
        self.body.len() == self.occupied.len() && self.body.iter().all(|c| self.occupied.contains(c))
    }
}
