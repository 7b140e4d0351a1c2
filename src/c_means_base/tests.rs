use super::*;
use ndarray::arr2;

fn new_base(objects: Array2<f64>, cluster_count: usize) -> CMeansBase<f64> {
    CMeansBase::new(objects, cluster_count, 1.0e-7).unwrap()
}

#[test]
fn round_robin_cycles_cluster_assignment() {
    let mut base = new_base(
        arr2(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0], [4.0, 0.0]]),
        2,
    );
    base.init_partition(Initialization::RoundRobin);
    let expected = arr2(&[
        [1.0, 0.0],
        [0.0, 1.0],
        [1.0, 0.0],
        [0.0, 1.0],
        [1.0, 0.0],
    ]);
    assert_eq!(base.partition, expected);
}

#[test]
fn random_initialization_stays_within_unit_interval() {
    let mut base = new_base(arr2(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]), 3);
    base.init_partition(Initialization::Random);
    assert!(base
        .partition
        .iter()
        .all(|&cell| (0.0..=1.0).contains(&cell)));
}

#[test]
fn crisp_partition_yields_cluster_means() {
    let mut base = new_base(arr2(&[[0.0, 0.0], [2.0, 0.0], [4.0, 6.0]]), 2);
    base.partition = arr2(&[[1.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
    base.update_centers();
    assert_eq!(base.centers, arr2(&[[1.0, 0.0], [4.0, 6.0]]));
}

#[test]
fn empty_cluster_produces_nan_center() {
    let mut base = new_base(arr2(&[[0.0, 0.0], [2.0, 0.0]]), 2);
    base.partition = arr2(&[[1.0, 0.0], [1.0, 0.0]]);
    base.update_centers();
    assert!(base.centers[[1, 0]].is_nan());
    assert!(base.centers[[1, 1]].is_nan());
}

#[test]
fn partition_delta_is_frobenius_norm() {
    let before: Array2<f64> = arr2(&[[0.0, 0.0], [0.0, 0.0]]);
    let current: Array2<f64> = arr2(&[[3.0, 0.0], [0.0, 4.0]]);
    assert!((partition_delta(&current, &before) - 5.0).abs() < 1.0e-12);
}

#[test]
fn euclidean_distance_in_the_plane() {
    let a: Array2<f64> = arr2(&[[0.0, 0.0]]);
    let b: Array2<f64> = arr2(&[[3.0, 4.0]]);
    assert!((euclidean(a.row(0), b.row(0)) - 5.0).abs() < 1.0e-12);
}

#[test]
fn rejects_empty_object_set() {
    assert!(CMeansBase::<f64>::new(Array2::zeros((0, 2)), 2, 1.0e-7).is_err());
}

#[test]
fn rejects_zero_cluster_count() {
    assert!(CMeansBase::new(arr2(&[[0.0, 0.0]]), 0, 1.0e-7).is_err());
}

#[test]
fn rejects_non_planar_objects() {
    assert!(CMeansBase::new(arr2(&[[0.0, 0.0, 0.0]]), 1, 1.0e-7).is_err());
}

#[test]
fn rejects_non_positive_threshold() {
    assert!(CMeansBase::new(arr2(&[[0.0, 0.0]]), 1, 0.0).is_err());
}
