
use crate::c_means_base::{euclidean, partition_delta, CMeansBase, Initialization, DEFAULT_EPSILON};
use crate::fuzzy_c_means::FuzzyCMeans;
use crate::interface::CMeansInterface;
use crate::point::Point2D;
use crate::utils::LibData;
use anyhow::{ensure, Result};
use log::debug;
use ndarray::{Array1, Array2, ArrayView2, Zip};
use rayon::prelude::*;

/// Possibilistic-C-Means (PCM) cluster analysis.
///
/// Bootstraps from a full FCM solution, then alternates per-cluster scale
/// estimation with a possibilistic refinement of the partition matrix.
/// Typicalities are not normalized across clusters, which makes the result
/// robust against noise and outliers. The scale vector is re-estimated once
/// per outer pass, so extra passes let the scale adapt as the centers move.
pub struct PossibilisticCMeans<A: LibData> {
    base: CMeansBase<A>,
    /// Per-cluster scale: the squared distance at which typicality falls
    /// to 0.5.
    scale: Array1<A>,
    repeat: usize,
}

impl<A: LibData> PossibilisticCMeans<A> {
    /// Creates a PCM engine with the default termination threshold.
    /// `repeat` is the number of outer passes.
    pub fn new(objects: Array2<A>, cluster_count: usize, repeat: usize) -> Result<Self> {
        Self::with_epsilon(
            objects,
            cluster_count,
            repeat,
            A::from_f64(DEFAULT_EPSILON).unwrap(),
        )
    }

    pub fn with_epsilon(
        objects: Array2<A>,
        cluster_count: usize,
        repeat: usize,
        epsilon: A,
    ) -> Result<Self> {
        ensure!(repeat > 0, "repeat count must be positive");
        let base = CMeansBase::new(objects, cluster_count, epsilon)?;
        let scale = Array1::zeros(cluster_count);
        Ok(Self { base, scale, repeat })
    }

    /// Aborts with an error instead of looping forever once a fixed-point
    /// loop passes `limit` iterations without converging. The limit also
    /// applies to the FCM bootstrap. Unlimited by default.
    pub fn with_iteration_limit(mut self, limit: usize) -> Self {
        self.base.iteration_limit = Some(limit);
        self
    }

    /// Runs the FCM bootstrap followed by `repeat` possibilistic passes and
    /// returns the cluster centers. Re-running resets the partition matrix
    /// and the search path; the repeat count is not consumed.
    pub fn determine_cluster_centers(
        &mut self,
        init: Initialization,
        record_path: bool,
    ) -> Result<Array2<A>> {
        self.base.path.clear();
        self.base.deltas.clear();
        let mut fcm = FuzzyCMeans::with_epsilon(
            self.base.objects.clone(),
            self.base.cluster_count,
            self.base.epsilon,
        )?;
        if let Some(limit) = self.base.iteration_limit {
            fcm = fcm.with_iteration_limit(limit);
        }
        fcm.determine_cluster_centers(init, true)?;
        if record_path {
            self.base.path.extend_from_slice(fcm.search_path());
        }
        self.base.centers.assign(&fcm.cluster_centers());
        self.base.partition.assign(&fcm.partition_matrix());

        for pass in 0..self.repeat {
            // The scale is estimated once per pass, against the centers
            // produced by the pass's first center update.
            let mut scale_pending = true;
            let mut iterations = 0_usize;
            loop {
                self.base.update_centers();
                if record_path {
                    self.base.record_path();
                }
                let before = self.base.partition.clone();
                if scale_pending {
                    self.estimate_scale();
                    scale_pending = false;
                }
                self.update_partition();
                let delta = partition_delta(&self.base.partition, &before);
                self.base.deltas.push(delta);
                iterations += 1;
                if delta < self.base.epsilon {
                    debug!(
                        "pcm pass {} converged after {} iterations (delta {})",
                        pass + 1,
                        iterations,
                        delta
                    );
                    break;
                }
                self.base.ensure_within_limit(iterations)?;
            }
        }
        Ok(self.base.centers.clone())
    }

    /// Estimates the per-cluster scale as the average squared distance to
    /// the current center, weighted by the squared-squared typicality and
    /// normalized by the sum of squared typicalities. Per-object
    /// contributions are evaluated in parallel and accumulated in object
    /// order afterwards, keeping the result independent of scheduling.
    fn estimate_scale(&mut self) {
        let objects = &self.base.objects;
        let centers = &self.base.centers;
        let partition = &self.base.partition;
        let cluster_count = self.base.cluster_count;
        let contributions: Vec<(Vec<A>, Vec<A>)> = (0..objects.nrows())
            .into_par_iter()
            .map(|i| {
                let object = objects.row(i);
                let mut weighted_distances = vec![A::zero(); cluster_count];
                let mut weights = vec![A::zero(); cluster_count];
                for k in 0..cluster_count {
                    let dik = euclidean(object, centers.row(k));
                    let weight = partition[[i, k]].powi(2);
                    weighted_distances[k] = weight.powi(2) * dik.powi(2);
                    weights[k] = weight;
                }
                (weighted_distances, weights)
            })
            .collect();
        let mut numerators = vec![A::zero(); cluster_count];
        let mut denominators = vec![A::zero(); cluster_count];
        for (weighted_distances, weights) in contributions {
            for k in 0..cluster_count {
                numerators[k] = numerators[k] + weighted_distances[k];
                denominators[k] = denominators[k] + weights[k];
            }
        }
        for k in 0..cluster_count {
            self.scale[k] = numerators[k] / denominators[k];
        }
    }

    /// Possibilistic typicality update: `1 / (1 + dik² / ni)`. Unlike FCM
    /// the values are not normalized across clusters. NaN reads as full
    /// typicality, matching the FCM fallback.
    fn update_partition(&mut self) {
        let centers = &self.base.centers;
        let scale = &self.scale;
        Zip::from(self.base.partition.rows_mut())
            .and(self.base.objects.rows())
            .par_for_each(|mut typicalities, object| {
                for ((cell, center), &ni) in
                    typicalities.iter_mut().zip(centers.rows()).zip(scale.iter())
                {
                    let dik = euclidean(object, center);
                    let typicality = A::one() / (A::one() + dik.powi(2) / ni);
                    *cell = if typicality.is_nan() {
                        A::one()
                    } else {
                        typicality
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

    /// All intermediate cluster centers including the FCM bootstrap path,
    /// empty unless recording was requested.
    pub fn search_path(&self) -> &[Point2D<A>] {
        &self.base.path
    }
}

impl<A: LibData> CMeansInterface<A> for PossibilisticCMeans<A> {
    fn determine_cluster_centers(
        &mut self,
        init: Initialization,
        record_path: bool,
    ) -> Result<Array2<A>> {
        PossibilisticCMeans::determine_cluster_centers(self, init, record_path)
    }

    fn cluster_centers(&self) -> ArrayView2<A> {
        PossibilisticCMeans::cluster_centers(self)
    }

    fn partition_matrix(&self) -> ArrayView2<A> {
        PossibilisticCMeans::partition_matrix(self)
    }

    fn search_path(&self) -> &[Point2D<A>] {
        PossibilisticCMeans::search_path(self)
    }
}
