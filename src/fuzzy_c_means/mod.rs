
use crate::c_means_base::{euclidean, partition_delta, CMeansBase, Initialization, DEFAULT_EPSILON};
use crate::interface::CMeansInterface;
use crate::point::Point2D;
use crate::utils::LibData;
use anyhow::Result;
use log::debug;
use ndarray::{Array2, ArrayView2, Zip};

/// Fuzzy-C-Means (FCM) cluster analysis.
///
/// Alternates between recomputing cluster centers from the partition matrix
/// and recomputing memberships from the centers until the Frobenius norm of
/// the partition change falls below the termination threshold. Memberships
/// of one object are normalized across all clusters, so each row of the
/// partition matrix sums to 1 at convergence.
pub struct FuzzyCMeans<A: LibData> {
    base: CMeansBase<A>,
}

impl<A: LibData> FuzzyCMeans<A> {
    /// Creates an FCM engine with the default termination threshold.
    pub fn new(objects: Array2<A>, cluster_count: usize) -> Result<Self> {
        Self::with_epsilon(
            objects,
            cluster_count,
            A::from_f64(DEFAULT_EPSILON).unwrap(),
        )
    }

    pub fn with_epsilon(objects: Array2<A>, cluster_count: usize, epsilon: A) -> Result<Self> {
        Ok(Self {
            base: CMeansBase::new(objects, cluster_count, epsilon)?,
        })
    }

    /// Aborts with an error instead of looping forever once a fixed-point
    /// loop passes `limit` iterations without converging. Unlimited by
    /// default.
    pub fn with_iteration_limit(mut self, limit: usize) -> Self {
        self.base.iteration_limit = Some(limit);
        self
    }

    /// Runs the fixed-point iteration to convergence and returns the cluster
    /// centers. Re-running resets the partition matrix and the search path.
    pub fn determine_cluster_centers(
        &mut self,
        init: Initialization,
        record_path: bool,
    ) -> Result<Array2<A>> {
        self.base.path.clear();
        self.base.deltas.clear();
        self.base.init_partition(init);
        let mut iterations = 0_usize;
        loop {
            self.base.update_centers();
            if record_path {
                self.base.record_path();
            }
            let before = self.base.partition.clone();
            self.update_partition();
            let delta = partition_delta(&self.base.partition, &before);
            self.base.deltas.push(delta);
            iterations += 1;
            if delta < self.base.epsilon {
                debug!("fcm converged after {} iterations (delta {})", iterations, delta);
                break;
            }
            self.base.ensure_within_limit(iterations)?;
        }
        Ok(self.base.centers.clone())
    }

    /// Inverse-distance membership update, normalized per object across all
    /// clusters. With exponent m = 2 the weighting power 1/(m-1) is 1. Every
    /// cell reads only the current centers and writes its own row, so rows
    /// are evaluated in parallel. An object coinciding with a center
    /// produces NaN, which reads as full membership.
    fn update_partition(&mut self) {
        let centers = &self.base.centers;
        Zip::from(self.base.partition.rows_mut())
            .and(self.base.objects.rows())
            .par_for_each(|mut memberships, object| {
                let normalizer: A = centers
                    .rows()
                    .into_iter()
                    .map(|center| A::one() / euclidean(object, center))
                    .sum();
                for (cell, center) in memberships.iter_mut().zip(centers.rows()) {
                    let membership = (A::one() / euclidean(object, center)) / normalizer;
                    *cell = if membership.is_nan() {
                        A::one()
                    } else {
                        membership
                    };
                }
            });
    }

    /// Final cluster centers.
    pub fn cluster_centers(&self) -> ArrayView2<A> {
        self.base.centers.view()
    }

    /// Final partition matrix.
    pub fn partition_matrix(&self) -> ArrayView2<A> {
        self.base.partition.view()
    }

    /// All intermediate cluster centers, empty unless recording was
    /// requested.
    pub fn search_path(&self) -> &[Point2D<A>] {
        &self.base.path
    }
}

impl<A: LibData> CMeansInterface<A> for FuzzyCMeans<A> {
    fn determine_cluster_centers(
        &mut self,
        init: Initialization,
        record_path: bool,
    ) -> Result<Array2<A>> {
        FuzzyCMeans::determine_cluster_centers(self, init, record_path)
    }

    fn cluster_centers(&self) -> ArrayView2<A> {
        FuzzyCMeans::cluster_centers(self)
    }

    fn partition_matrix(&self) -> ArrayView2<A> {
        FuzzyCMeans::partition_matrix(self)
    }

    fn search_path(&self) -> &[Point2D<A>] {
        FuzzyCMeans::search_path(self)
    }
}
