//! Seeded k-means for the initial table split.
//!
//! k-means++ seeding followed by Lloyd iterations under squared Euclidean
//! distance. The whole procedure is driven by one seeded [`StdRng`], so the
//! same input, `k` and seed always yield the same labels.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::{Error, Result, Vector};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_MAX_ITERATIONS: usize = 300;
pub const DEFAULT_N_INIT: usize = 10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct KMeansConfig {
    pub k: usize,
    pub seed: u64,
    pub max_iterations: usize,
    /// Number of independent restarts; the lowest-inertia run wins
    pub n_init: usize,
}

impl KMeansConfig {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            seed: DEFAULT_SEED,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            n_init: DEFAULT_N_INIT,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Result of a k-means fit
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// Cluster label per input point, in `[0, k)`
    pub labels: Vec<usize>,
    pub centroids: Vec<Vector>,
    /// Within-cluster sum of squared distances
    pub inertia: f32,
    pub iterations: usize,
}

impl Clustering {
    /// Points per label. Labels with no points report 0.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }
}

pub struct KMeans {
    config: KMeansConfig,
}

impl KMeans {
    pub fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    pub fn fit(&self, points: &[Vector]) -> Result<Clustering> {
        let n = points.len();
        let k = self.config.k;
        if k == 0 || k > n {
            return Err(Error::InvalidTableCount {
                tables: k,
                participants: n,
            });
        }
        let dim = points[0].dim();
        if let Some(bad) = points.iter().find(|p| p.dim() != dim) {
            return Err(Error::InvalidDimension {
                expected: dim,
                actual: bad.dim(),
            });
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut best: Option<Clustering> = None;

        for run in 0..self.config.n_init.max(1) {
            let centroids = plus_plus_init(points, k, &mut rng);
            let candidate = lloyd(points, centroids, self.config.max_iterations);
            debug!(
                "k-means run {}: inertia={:.4} iterations={}",
                run, candidate.inertia, candidate.iterations
            );

            let better = match &best {
                Some(b) => candidate.inertia < b.inertia,
                None => true,
            };
            if better {
                best = Some(candidate);
            }
        }

        best.ok_or_else(|| Error::InvalidConfig("k-means produced no run".to_string()))
    }
}

/// k-means++ seeding: each further centroid is drawn with probability
/// proportional to its squared distance from the nearest chosen one.
fn plus_plus_init(points: &[Vector], k: usize, rng: &mut StdRng) -> Vec<Vector> {
    let n = points.len();
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.random_range(0..n)].clone());

    let mut min_distances = vec![f32::INFINITY; n];

    while centroids.len() < k {
        let last = &centroids[centroids.len() - 1];
        for (i, point) in points.iter().enumerate() {
            let d = point.squared_l2(last);
            if d < min_distances[i] {
                min_distances[i] = d;
            }
        }

        let total: f32 = min_distances.iter().sum();
        let next = if total <= 0.0 {
            // Fewer distinct points than k; duplicates leave empty clusters.
            rng.random_range(0..n)
        } else {
            let target = rng.random::<f32>() * total;
            let mut cumulative = 0.0;
            let mut chosen = None;
            for (i, &d) in min_distances.iter().enumerate() {
                if d <= 0.0 {
                    continue;
                }
                cumulative += d;
                chosen = Some(i);
                if cumulative >= target {
                    break;
                }
            }
            chosen.unwrap_or(0)
        };
        centroids.push(points[next].clone());
    }

    centroids
}

fn nearest(point: &Vector, centroids: &[Vector]) -> (usize, f32) {
    let mut best = (0, f32::INFINITY);
    for (label, centroid) in centroids.iter().enumerate() {
        let d = point.squared_l2(centroid);
        // strict: equidistant points stay with the lowest label
        if d < best.1 {
            best = (label, d);
        }
    }
    best
}

fn lloyd(points: &[Vector], mut centroids: Vec<Vector>, max_iterations: usize) -> Clustering {
    let k = centroids.len();
    let dim = points[0].dim();
    let mut labels = vec![usize::MAX; points.len()];
    let mut iterations = 0;

    for _ in 0..max_iterations.max(1) {
        iterations += 1;
        let mut changed = false;
        for (i, point) in points.iter().enumerate() {
            let (label, _) = nearest(point, &centroids);
            if labels[i] != label {
                labels[i] = label;
                changed = true;
            }
        }
        if !changed {
            break;
        }

        for (label, centroid) in centroids.iter_mut().enumerate() {
            let members: Vec<&Vector> = points
                .iter()
                .zip(labels.iter())
                .filter(|&(_, &l)| l == label)
                .map(|(p, _)| p)
                .collect();
            // An emptied cluster keeps its last position.
            if !members.is_empty() {
                *centroid = Vector::mean(members, dim);
            }
        }
    }

    let inertia = points
        .iter()
        .zip(labels.iter())
        .map(|(p, &l)| p.squared_l2(&centroids[l]))
        .sum();

    debug_assert!(labels.iter().all(|&l| l < k));
    Clustering {
        labels,
        centroids,
        inertia,
        iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(rows: &[&[f32]]) -> Vec<Vector> {
        rows.iter().map(|r| Vector::new(r.to_vec())).collect()
    }

    #[test]
    fn test_separates_obvious_clusters() {
        let data = points(&[
            &[1.0, 1.0, 0.0, 0.0],
            &[1.0, 1.0, 0.0, 0.0],
            &[0.0, 0.0, 1.0, 1.0],
            &[0.0, 0.0, 1.0, 1.0],
        ]);
        let clustering = KMeans::new(KMeansConfig::new(2)).fit(&data).unwrap();
        assert_eq!(clustering.labels[0], clustering.labels[1]);
        assert_eq!(clustering.labels[2], clustering.labels[3]);
        assert_ne!(clustering.labels[0], clustering.labels[2]);
        assert!(clustering.inertia.abs() < 1e-6);
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let data = points(&[
            &[1.0, 0.0, 1.0, 0.0, 1.0],
            &[1.0, 1.0, 0.0, 0.0, 1.0],
            &[0.0, 1.0, 1.0, 1.0, 0.0],
            &[0.0, 0.0, 1.0, 1.0, 1.0],
            &[1.0, 1.0, 1.0, 0.0, 0.0],
            &[0.0, 1.0, 0.0, 1.0, 1.0],
        ]);
        let config = KMeansConfig::new(3).with_seed(7);
        let a = KMeans::new(config).fit(&data).unwrap();
        let b = KMeans::new(config).fit(&data).unwrap();
        assert_eq!(a.labels, b.labels);
        assert_eq!(a.centroids, b.centroids);
    }

    #[test]
    fn test_identical_points_leave_empty_cluster() {
        let data = points(&[&[1.0, 0.0], &[1.0, 0.0], &[1.0, 0.0]]);
        let clustering = KMeans::new(KMeansConfig::new(2)).fit(&data).unwrap();
        assert_eq!(clustering.labels, vec![0, 0, 0]);
        assert_eq!(clustering.sizes(), vec![3, 0]);
    }

    #[test]
    fn test_k_larger_than_n_rejected() {
        let data = points(&[&[1.0], &[0.0]]);
        assert!(matches!(
            KMeans::new(KMeansConfig::new(3)).fit(&data),
            Err(Error::InvalidTableCount { tables: 3, participants: 2 })
        ));
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let data = points(&[&[1.0, 0.0], &[0.0]]);
        assert!(matches!(
            KMeans::new(KMeansConfig::new(2)).fit(&data),
            Err(Error::InvalidDimension { .. })
        ));
    }
}
