#[cfg(test)]
mod tests;

use crate::point::Point2D;
use crate::utils::LibData;
use anyhow::{ensure, Result};
use ndarray::{Array2, ArrayView1};
use rand::Rng;
use rayon::prelude::*;

/// Default termination threshold of the fixed-point loops.
pub const DEFAULT_EPSILON: f64 = 1.0e-7;

/// Euclidean distance norm exponent (fuzzifier), fixed at 2.
pub(crate) const M: i32 = 2;

/// Partition matrix initialization policy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Initialization {
    /// Every membership value is drawn uniformly from `[0, 1]`, without row
    /// normalization.
    Random,
    /// Object `i` is assigned crisply to cluster `i mod c`. Reproducible,
    /// recommended for tests.
    RoundRobin,
}

/// State and update steps shared by the FCM and PCM engines.
pub(crate) struct CMeansBase<A: LibData> {
    /// Input objects, one `(x, y)` row per object. Never mutated.
    pub objects: Array2<A>,
    pub cluster_count: usize,
    /// Termination threshold for the Frobenius norm of partition changes.
    pub epsilon: A,
    /// Optional ceiling per fixed-point loop. Unlimited when `None`.
    pub iteration_limit: Option<usize>,
    /// Cluster centers, one `(x, y)` row per cluster.
    pub centers: Array2<A>,
    /// Partition matrix; cell `[i, k]` holds the membership (FCM) or
    /// typicality (PCM) of object `i` in cluster `k`.
    pub partition: Array2<A>,
    /// Chronological record of all intermediate cluster centers.
    pub path: Vec<Point2D<A>>,
    /// Convergence metric of every completed iteration, in order. A
    /// diagnostic counterpart of the search path.
    pub deltas: Vec<A>,
}

impl<A: LibData> CMeansBase<A> {
    pub fn new(objects: Array2<A>, cluster_count: usize, epsilon: A) -> Result<Self> {
        ensure!(objects.nrows() > 0, "object set must not be empty");
        ensure!(
            objects.ncols() == 2,
            "objects must be 2-dimensional, got {} coordinates",
            objects.ncols()
        );
        ensure!(cluster_count > 0, "cluster count must be positive");
        ensure!(
            epsilon > A::zero(),
            "termination threshold must be positive, got {}",
            epsilon
        );
        let centers = Array2::zeros((cluster_count, 2));
        let partition = Array2::zeros((objects.nrows(), cluster_count));
        Ok(Self {
            objects,
            cluster_count,
            epsilon,
            iteration_limit: None,
            centers,
            partition,
            path: Vec::new(),
            deltas: Vec::new(),
        })
    }

    /// Overwrites the full partition matrix according to `init`.
    pub fn init_partition(&mut self, init: Initialization) {
        match init {
            Initialization::Random => {
                let mut rng = rand::thread_rng();
                for cell in self.partition.iter_mut() {
                    *cell = A::from_f64(rng.gen::<f64>()).unwrap();
                }
            }
            Initialization::RoundRobin => {
                let cluster_count = self.cluster_count;
                for (i, mut memberships) in self.partition.rows_mut().into_iter().enumerate() {
                    for (k, cell) in memberships.iter_mut().enumerate() {
                        *cell = if k == i % cluster_count {
                            A::one()
                        } else {
                            A::zero()
                        };
                    }
                }
            }
        }
    }

    /// Recomputes every cluster center as the weighted mean of the object
    /// set, weighted by the squared partition values. Clusters are
    /// independent, so they are evaluated in parallel; the ordered collect
    /// keeps results identical for any worker count. A cluster with zero
    /// total weight yields a NaN center, which the next partition update
    /// clamps.
    pub fn update_centers(&mut self) {
        let objects = &self.objects;
        let partition = &self.partition;
        let updated: Vec<[A; 2]> = (0..self.cluster_count)
            .into_par_iter()
            .map(|k| {
                let mut sum_x = A::zero();
                let mut sum_y = A::zero();
                let mut weight = A::zero();
                for (i, object) in objects.rows().into_iter().enumerate() {
                    let w = partition[[i, k]].powi(M);
                    sum_x = sum_x + w * object[0];
                    sum_y = sum_y + w * object[1];
                    weight = weight + w;
                }
                [sum_x / weight, sum_y / weight]
            })
            .collect();
        for (k, center) in updated.into_iter().enumerate() {
            self.centers[[k, 0]] = center[0];
            self.centers[[k, 1]] = center[1];
        }
    }

    /// Appends the current centers, in cluster order, to the search path.
    pub fn record_path(&mut self) {
        for center in self.centers.rows() {
            self.path.push(Point2D::new(center[0], center[1]));
        }
    }

    pub fn ensure_within_limit(&self, iterations: usize) -> Result<()> {
        if let Some(limit) = self.iteration_limit {
            ensure!(
                iterations < limit,
                "did not converge within {} iterations",
                limit
            );
        }
        Ok(())
    }
}

/// Frobenius norm of the elementwise difference between two partition
/// matrices, the convergence metric of both engines.
pub(crate) fn partition_delta<A: LibData>(current: &Array2<A>, before: &Array2<A>) -> A {
    current
        .iter()
        .zip(before.iter())
        .map(|(a, b)| (*a - *b).powi(2))
        .sum::<A>()
        .sqrt()
}

/// Euclidean distance between a 2-d object and a cluster center.
pub(crate) fn euclidean<A: LibData>(a: ArrayView1<A>, b: ArrayView1<A>) -> A {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
}
