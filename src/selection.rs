//! Keyboard selection over the flat result list.
//!
//! The index is positional across `exact_matches ++ recommendations` (or the
//! recent items); it is reset whenever a new list arrives and never wraps.

/// Where the selection currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// Nothing to select
    Idle,
    /// `0 <= index < total`
    Active(usize),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionModel {
    index: usize,
    total: usize,
}

impl SelectionModel {
    pub fn new(total: usize) -> Self {
        Self { index: 0, total }
    }

    /// A new list arrived.
    pub fn reset(&mut self, total: usize) {
        self.total = total;
        self.index = 0;
    }

    pub fn move_down(&mut self) {
        if self.total > 0 {
            self.index = (self.index + 1).min(self.total - 1);
        }
    }

    pub fn move_up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Point at `index`, clamped into range (mouse hover/click).
    pub fn select(&mut self, index: usize) {
        if self.total > 0 {
            self.index = index.min(self.total - 1);
        }
    }

    pub fn state(&self) -> SelectionState {
        if self.total == 0 {
            SelectionState::Idle
        } else {
            SelectionState::Active(self.index)
        }
    }

    pub fn selected(&self) -> Option<usize> {
        match self.state() {
            SelectionState::Idle => None,
            SelectionState::Active(index) => Some(index),
        }
    }

    /// Raw index; 0 while idle.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }
}
