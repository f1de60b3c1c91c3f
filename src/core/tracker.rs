//! Two-bin occupancy statistics: binary Shannon entropy and the histogram of
//! `(left, right)` splits observed after the partition opens.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary Shannon entropy (base 2) of the left/right split.
///
/// Returns 0 for the degenerate cases `total == 0`, `left == 0` and `left >= total`,
/// otherwise `-(p log2 p + (1-p) log2 (1-p))` with `p = left / total`. The result is
/// in `[0, 1]` and equals 1 exactly at an even split.
pub fn entropy(left: usize, total: usize) -> f64 {
    if total == 0 || left == 0 || left >= total {
        return 0.0;
    }
    let p = left as f64 / total as f64;
    let q = 1.0 - p;
    -(p * p.log2() + q * q.log2())
}

/// One histogram bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub left: usize,
    pub right: usize,
    pub count: u64,
}

impl HistogramBin {
    /// Human-readable key, e.g. `"2 left - 4 right"`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HistogramBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} left - {} right", self.left, self.right)
    }
}

/// Observation counts for every split of N particles.
///
/// All N+1 buckets exist from construction; `counts[left]` holds the bucket for
/// `(left, N - left)`. Deserialization rejects documents that break this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHistogram")]
pub struct DistributionHistogram {
    num_particles: usize,
    counts: Vec<u64>,
}

/// Unchecked wire form of [`DistributionHistogram`].
#[derive(Deserialize)]
struct RawHistogram {
    num_particles: usize,
    counts: Vec<u64>,
}

impl TryFrom<RawHistogram> for DistributionHistogram {
    type Error = Error;

    fn try_from(raw: RawHistogram) -> Result<Self> {
        if raw.num_particles.checked_add(1) != Some(raw.counts.len()) {
            return Err(Error::InvalidParam(format!(
                "histogram for {} particles needs {} buckets, got {}",
                raw.num_particles,
                raw.num_particles.saturating_add(1),
                raw.counts.len()
            )));
        }
        Ok(Self {
            num_particles: raw.num_particles,
            counts: raw.counts,
        })
    }
}

impl DistributionHistogram {
    pub fn new(num_particles: usize) -> Self {
        Self {
            num_particles,
            counts: vec![0; num_particles + 1],
        }
    }

    /// N, the particle count the buckets are keyed on.
    pub fn num_particles(&self) -> usize {
        self.num_particles
    }

    /// Number of buckets (always N + 1).
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Increment the bucket for `(left, right)`.
    ///
    /// Errors: `Error::InvalidParam` if `left + right != N`; the histogram is left untouched.
    pub fn record_sample(&mut self, left: usize, right: usize) -> Result<()> {
        if left.checked_add(right) != Some(self.num_particles) {
            return Err(Error::InvalidParam(format!(
                "sample ({left}, {right}) does not sum to {} particles",
                self.num_particles
            )));
        }
        let bucket = self.counts.get_mut(left).ok_or_else(|| {
            Error::InvalidParam(format!("no bucket for {left} left particles"))
        })?;
        *bucket = bucket.saturating_add(1);
        Ok(())
    }

    /// Count for `(left, right)`; zero for pairs outside the support.
    pub fn count(&self, left: usize, right: usize) -> u64 {
        if left.checked_add(right) != Some(self.num_particles) {
            return 0;
        }
        self.counts.get(left).copied().unwrap_or(0)
    }

    /// Raw counts indexed by left-chamber occupancy.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Total number of recorded samples.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = HistogramBin> + '_ {
        let n = self.num_particles;
        self.counts
            .iter()
            .enumerate()
            .map(move |(left, &count)| HistogramBin {
                left,
                right: n.saturating_sub(left),
                count,
            })
    }

    /// Bucket with the highest count, ties resolved towards fewer left particles.
    /// `None` until something has been recorded.
    pub fn most_frequent(&self) -> Option<HistogramBin> {
        self.iter()
            .filter(|b| b.count > 0)
            .fold(None, |best: Option<HistogramBin>, b| match best {
                Some(cur) if cur.count >= b.count => Some(cur),
                _ => Some(b),
            })
    }

    /// Count-weighted mean entropy of the recorded splits.
    pub fn mean_entropy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let weighted: f64 = self
            .iter()
            .map(|b| b.count as f64 * entropy(b.left, self.num_particles))
            .sum();
        weighted / total as f64
    }

    /// Serialize as JSON for offline analysis.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
