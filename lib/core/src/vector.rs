use serde::{Deserialize, Serialize};
use std::ops::{AddAssign, Mul};

/// A dense vector of floating point numbers
///
/// Used for centroids and group means; participant selections are
/// [`InterestVector`](crate::InterestVector)s.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: vec![0.0; dim],
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Squared L2 distance. Infinite on dimension mismatch.
    #[inline]
    pub fn squared_l2(&self, other: &Vector) -> f32 {
        if self.dim() != other.dim() {
            return f32::INFINITY;
        }
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| {
                let d = a - b;
                d * d
            })
            .sum()
    }

    /// Arithmetic mean of `vectors`, or the zero vector of `dim` when empty
    #[must_use]
    pub fn mean<'a, I>(vectors: I, dim: usize) -> Self
    where
        I: IntoIterator<Item = &'a Vector>,
    {
        let mut sum = Vector::zeros(dim);
        let mut count = 0usize;
        for v in vectors {
            sum += v;
            count += 1;
        }
        if count == 0 {
            return sum;
        }
        &sum * (1.0 / count as f32)
    }
}

impl AddAssign<&Vector> for Vector {
    fn add_assign(&mut self, other: &Vector) {
        assert_eq!(self.dim(), other.dim());
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += b;
        }
    }
}

impl Mul<f32> for &Vector {
    type Output = Vector;

    fn mul(self, scalar: f32) -> Vector {
        Vector::new(self.data.iter().map(|x| x * scalar).collect())
    }
}
