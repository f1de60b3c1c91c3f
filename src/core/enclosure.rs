//! Geometry of the two-chamber box: outer walls and the central partition.

use serde::{Deserialize, Serialize};

/// One of the two halves of the enclosure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chamber {
    Left,
    Right,
}

/// State of the central partition. `Open` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Partition {
    #[default]
    Closed,
    Open,
}

impl Partition {
    /// Whether particles may cross `x = size / 2`.
    #[inline]
    pub fn is_passable(self) -> bool {
        matches!(self, Partition::Open)
    }
}

/// Square box `[0, size] × [0, size]` split by a vertical partition at `size / 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enclosure {
    size: f64,
}

impl Enclosure {
    /// `size` must be finite and positive; checked by `SimulationConfig::validate`.
    pub fn new(size: f64) -> Self {
        Self { size }
    }

    #[inline]
    pub fn size(&self) -> f64 {
        self.size
    }

    /// x-coordinate of the partition plane.
    #[inline]
    pub fn partition_x(&self) -> f64 {
        0.5 * self.size
    }

    /// Chamber containing `x`. The partition plane itself belongs to the right half.
    #[inline]
    pub fn chamber_of(&self, x: f64) -> Chamber {
        if x < self.partition_x() {
            Chamber::Left
        } else {
            Chamber::Right
        }
    }

    /// Largest coordinate a left-chamber particle may hold while the partition is closed:
    /// the float immediately below the partition plane, never negative.
    #[inline]
    pub fn left_limit(&self) -> f64 {
        let mid = self.partition_x();
        if mid > 0.0 {
            // Positive finite floats are ordered like their bit patterns.
            f64::from_bits(mid.to_bits() - 1)
        } else {
            0.0
        }
    }

    /// Whether a position lies inside the closed box.
    pub fn contains(&self, r: &[f64; 2]) -> bool {
        r.iter().all(|&c| (0.0..=self.size).contains(&c))
    }
}
