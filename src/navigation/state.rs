//! Navigator mode and stuck detection.
//!
//! The navigator alternates between two modes: `Normal` follows the field
//! downhill, `Recovery` takes a bounded number of random steps after a trap
//! has been detected.

use std::collections::VecDeque;
use std::fmt;

use glam::UVec2;

use crate::field::PotentialField;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Recovery {
        remaining: usize,
    },
}

impl Mode {
    /// Enter recovery for `steps` random steps (at least one).
    pub fn recovery(steps: usize) -> Self {
        Self::Recovery {
            remaining: steps.max(1),
        }
    }

    pub fn is_recovering(&self) -> bool {
        matches!(self, Self::Recovery { .. })
    }

    /// Mode after one recovery step has been taken.
    pub fn after_recovery_step(self) -> Self {
        match self {
            Self::Recovery { remaining } if remaining > 1 => Self::Recovery {
                remaining: remaining - 1,
            },
            _ => Self::Normal,
        }
    }
}

/// Why gradient descent could not make progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StuckReason {
    /// No neighbour is strictly lower than the current cell.
    LocalMinimum,
    /// The best neighbour is an obstacle.
    BoxedIn,
    /// The best neighbour was visited within the last few moves.
    Oscillation,
}

impl fmt::Display for StuckReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocalMinimum => f.write_str("local minimum"),
            Self::BoxedIn => f.write_str("boxed in"),
            Self::Oscillation => f.write_str("oscillation"),
        }
    }
}

/// Bounded FIFO of the most recently visited cells.
#[derive(Debug, Clone)]
pub struct RecentHistory {
    positions: VecDeque<UVec2>,
    capacity: usize,
}

impl RecentHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            positions: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, pos: UVec2) {
        self.positions.push_back(pos);
        while self.positions.len() > self.capacity {
            self.positions.pop_front();
        }
    }

    pub fn contains(&self, pos: UVec2) -> bool {
        self.positions.contains(&pos)
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = UVec2> + '_ {
        self.positions.iter().copied()
    }
}

/// Decide whether moving from `current` to `best` would leave descent stuck.
pub fn detect_stuck(
    field: &PotentialField,
    current: UVec2,
    best: UVec2,
    history: &RecentHistory,
) -> Option<StuckReason> {
    if best == current {
        Some(StuckReason::LocalMinimum)
    } else if field.is_blocked(best) {
        Some(StuckReason::BoxedIn)
    } else if history.contains(best) {
        Some(StuckReason::Oscillation)
    } else {
        None
    }
}
