use ndarray::{arr2, Array2, ArrayView2};

pub fn close_l1(a: f64, b: f64, delta: f64) {
    assert!((a - b).abs() < delta, "{} and {} differ by more than {}", a, b, delta);
}

/// The 7-point object set used by the engine self tests.
pub fn reference_objects() -> Array2<f64> {
    arr2(&[
        [0.1, 0.3],
        [0.1, 0.5],
        [0.1, 0.7],
        [0.7, 0.3],
        [0.7, 0.7],
        [0.8, 0.5],
        [0.9, 0.5],
    ])
}

/// Matches computed centers against reference centers regardless of cluster
/// order: every computed center must lie within `delta` per coordinate of a
/// distinct reference center.
pub fn assert_centers_match(centers: ArrayView2<f64>, reference: &[[f64; 2]], delta: f64) {
    assert_eq!(centers.nrows(), reference.len());
    let mut taken = vec![false; reference.len()];
    for center in centers.rows() {
        let (nearest, _) = reference
            .iter()
            .enumerate()
            .map(|(j, r)| (j, (center[0] - r[0]).powi(2) + (center[1] - r[1]).powi(2)))
            .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .unwrap();
        assert!(
            !taken[nearest],
            "two centers matched reference {:?}",
            reference[nearest]
        );
        taken[nearest] = true;
        close_l1(center[0], reference[nearest][0], delta);
        close_l1(center[1], reference[nearest][1], delta);
    }
}
