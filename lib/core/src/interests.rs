use serde::{Deserialize, Serialize};
use crate::vector::Vector;

/// Binary interest selections over a [`Vocabulary`](crate::Vocabulary)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct InterestVector {
    bits: Vec<bool>,
}

impl InterestVector {
    #[inline]
    #[must_use]
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Build from 0/1 integers. Any non-zero value counts as selected.
    #[must_use]
    pub fn from_flags(flags: &[u8]) -> Self {
        Self {
            bits: flags.iter().map(|&f| f != 0).collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.bits.get(index).copied().unwrap_or(false)
    }

    /// Number of selected interests
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// True when nothing is selected
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        !self.bits.iter().any(|&b| b)
    }

    /// Indices of selected interests
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| if b { Some(i) } else { None })
    }

    /// Shared interest count (dot product of the 0/1 vectors)
    #[inline]
    pub fn affinity(&self, other: &InterestVector) -> u32 {
        self.bits
            .iter()
            .zip(other.bits.iter())
            .filter(|&(&a, &b)| a && b)
            .count() as u32
    }

    /// Dot product against a dense vector such as a group mean
    #[inline]
    pub fn dot(&self, other: &Vector) -> f32 {
        self.bits
            .iter()
            .zip(other.as_slice())
            .filter(|&(&b, _)| b)
            .map(|(_, &x)| x)
            .sum()
    }

    /// In-place union with another selection
    pub fn union_with(&mut self, other: &InterestVector) {
        for (a, &b) in self.bits.iter_mut().zip(other.bits.iter()) {
            *a |= b;
        }
    }

    /// True when both vectors select at least one common interest
    #[inline]
    pub fn intersects(&self, other: &InterestVector) -> bool {
        self.affinity(other) > 0
    }

    /// Dense 0.0/1.0 copy for centroid arithmetic
    #[must_use]
    pub fn to_dense(&self) -> Vector {
        Vector::new(self.bits.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect())
    }
}
