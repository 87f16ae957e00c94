//! Slide index state.
//!
//! Out-of-range and redundant requests are silent no-ops, never errors and
//! never clamped: asking for slide 40 of 20 leaves the deck where it is.

use serde::{Deserialize, Serialize};

/// A successful move between two slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
}

/// Current slide index bounded by the slide count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current: usize,
    total: usize,
}

impl Navigator {
    /// Create a navigator positioned on the first slide.
    pub fn new(total: usize) -> Self {
        Self { current: 0, total }
    }

    /// Get the current slide index.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Get the number of slides.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn first_index(&self) -> usize {
        0
    }

    pub fn last_index(&self) -> usize {
        self.total.saturating_sub(1)
    }

    pub fn is_first(&self) -> bool {
        self.current == self.first_index()
    }

    pub fn is_last(&self) -> bool {
        self.current == self.last_index()
    }

    /// Whether `index` names a slide in this deck.
    pub fn contains(&self, index: usize) -> bool {
        index < self.total
    }

    /// Move to a slide.
    ///
    /// Returns `None` when `index` is out of range or already current.
    pub fn go_to(&mut self, index: usize) -> Option<Transition> {
        if !self.contains(index) || index == self.current {
            return None;
        }
        let from = self.current;
        self.current = index;
        Some(Transition { from, to: index })
    }

    /// Step forward one slide.
    pub fn next(&mut self) -> Option<Transition> {
        if self.current + 1 < self.total {
            self.go_to(self.current + 1)
        } else {
            None
        }
    }

    /// Step backward one slide.
    pub fn previous(&mut self) -> Option<Transition> {
        if self.current > 0 {
            self.go_to(self.current - 1)
        } else {
            None
        }
    }

    /// Progress through the deck (0.0 - 1.0).
    pub fn progress(&self) -> f64 {
        if self.total <= 1 {
            1.0
        } else {
            self.current as f64 / self.last_index() as f64
        }
    }
}
