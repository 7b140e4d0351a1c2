
use crate::c_means_base::Initialization;
use crate::point::Point2D;
use crate::utils::LibData;
use anyhow::Result;
use ndarray::{Array2, ArrayView2};

/// Common entry point shared by the FCM and PCM engines.
pub trait CMeansInterface<A: LibData> {
    /// Runs the analysis to convergence and returns the cluster centers.
    fn determine_cluster_centers(
        &mut self,
        init: Initialization,
        record_path: bool,
    ) -> Result<Array2<A>>;

    /// Final partition matrix.
    fn partition_matrix(&self) -> ArrayView2<A>;

    /// Final cluster centers.
    fn cluster_centers(&self) -> ArrayView2<A>;

    /// Recorded search path, empty when recording was not requested.
    fn search_path(&self) -> &[Point2D<A>];
}
