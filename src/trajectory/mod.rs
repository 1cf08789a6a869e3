//! Trajectory container.
//!
//! An ordered, append-only sequence of positions produced by one command.
//! Serializes as a plain sequence of integers for persistence collaborators.

use alloc::vec::Vec;
use core::ops::Index;

use serde::Serialize;

use crate::error::Result;
use crate::motion::SampleSink;

/// Ordered position samples of one command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Trajectory {
    samples: Vec<i64>,
}

impl Trajectory {
    /// Create an empty trajectory.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if there are no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// First sample, if any.
    #[inline]
    pub fn first(&self) -> Option<i64> {
        self.samples.first().copied()
    }

    /// Last sample, i.e. where the motor ended up.
    #[inline]
    pub fn last(&self) -> Option<i64> {
        self.samples.last().copied()
    }

    /// Samples as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[i64] {
        &self.samples
    }

    /// Append another trajectory's samples.
    pub fn append(&mut self, other: Trajectory) {
        self.samples.extend(other.samples);
    }

    /// Step length between consecutive samples.
    pub fn deltas(&self) -> impl Iterator<Item = i64> + '_ {
        self.samples.windows(2).map(|w| w[1] - w[0])
    }

    /// Check that the motor never moved backwards.
    pub fn is_non_decreasing(&self) -> bool {
        self.samples.windows(2).all(|w| w[0] <= w[1])
    }
}

impl From<Vec<i64>> for Trajectory {
    fn from(samples: Vec<i64>) -> Self {
        Self { samples }
    }
}

impl FromIterator<i64> for Trajectory {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl Extend<i64> for Trajectory {
    fn extend<I: IntoIterator<Item = i64>>(&mut self, iter: I) {
        self.samples.extend(iter);
    }
}

impl Index<usize> for Trajectory {
    type Output = i64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.samples[index]
    }
}

impl SampleSink for Trajectory {
    #[inline]
    fn push(&mut self, position: i64) -> Result<()> {
        self.samples.push(position);
        Ok(())
    }
}
