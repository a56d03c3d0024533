//! Integration tests for the correlation spanning tree library.

use approx::assert_abs_diff_eq;
use correlation_spanning_tree::{
    data::{observations_from_dyn, observations_from_rows, read_observations, Layout},
    graph::{correlation_matrix, distance_matrix, minimum_spanning_forest},
    reconstruct,
    reconstruction::CORRELATION_MATRIX,
    CorrelationSpanningTree, CorrelationSpanningTreeConfig, DistanceKind, ReconstructionError,
    Reconstructor, DISTANCE_MATRIX,
};
use ndarray::{Array2, ArrayD, IxDyn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Helper to create independent Gaussian series
fn random_series(n: usize, l: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    Array2::from_shape_fn((n, l), |_| normal.sample(&mut rng))
}

/// Create series sharing a common factor so correlations are mostly positive
fn factor_series(n: usize, l: usize, seed: u64) -> Array2<f64> {
    let mut ts = random_series(n, l, seed);
    let common = random_series(1, l, seed + 1000);
    for mut row in ts.rows_mut() {
        row.zip_mut_with(&common.row(0), |x, c| *x += 0.8 * c);
    }
    ts
}

fn find(parent: &mut [usize], i: usize) -> usize {
    if parent[i] != i {
        parent[i] = find(parent, parent[i]);
    }
    parent[i]
}

fn is_acyclic(n: usize, edges: &[(usize, usize)]) -> bool {
    let mut parent: Vec<usize> = (0..n).collect();
    edges.iter().all(|&(a, b)| {
        let pa = find(&mut parent, a);
        let pb = find(&mut parent, b);
        parent[pa] = pb;
        pa != pb
    })
}

/// Minimum spanning tree weight over all (n-1)-edge subsets
fn exhaustive_mst_weight(d: &Array2<f64>) -> f64 {
    let n = d.nrows();
    let all: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();
    let k = n - 1;

    let mut best = f64::INFINITY;
    // Bitmask enumeration; at most 15 candidate edges for n = 6
    for mask in 0u32..(1 << all.len()) {
        if mask.count_ones() as usize != k {
            continue;
        }
        let subset: Vec<(usize, usize)> = all
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, &e)| e)
            .collect();
        if is_acyclic(n, &subset) {
            let weight: f64 = subset.iter().map(|&(a, b)| d[[a, b]]).sum();
            best = best.min(weight);
        }
    }
    best
}

#[test]
fn test_correlation_matrix_properties() {
    for seed in 0..5 {
        let ts = factor_series(8, 40, seed);
        let c = correlation_matrix(ts.view());

        for i in 0..8 {
            assert_eq!(c[[i, i]], 1.0);
            for j in 0..8 {
                assert_abs_diff_eq!(c[[i, j]], c[[j, i]], epsilon = 1e-12);
                assert!((-1.0..=1.0).contains(&c[[i, j]]));
            }
        }
    }
}

#[test]
fn test_distance_matrix_properties() {
    let ts = random_series(10, 30, 11);
    let c = correlation_matrix(ts.view());

    for kind in DistanceKind::ALL {
        let d = distance_matrix(c.view(), kind);

        for i in 0..10 {
            assert_eq!(d[[i, i]], 0.0);
            for j in 0..10 {
                assert_eq!(d[[i, j]], d[[j, i]]);
                assert!(d[[i, j]] >= 0.0);
                assert!(d[[i, j]] <= kind.upper_bound());
            }
        }
    }
}

#[test]
fn test_tree_is_minimal_for_small_inputs() {
    for n in 2..=6 {
        for seed in 0..4 {
            let ts = factor_series(n, 25, seed * 10 + n as u64);

            for kind in DistanceKind::ALL {
                let result = CorrelationSpanningTree::new()
                    .with_distance(kind)
                    .reconstruct(ts.view())
                    .unwrap();

                let edges: Vec<(usize, usize)> =
                    result.graph.edges().iter().map(|e| e.endpoints()).collect();

                assert_eq!(edges.len(), n - 1);
                assert!(is_acyclic(n, &edges));
                assert!(result.graph.is_tree());
                assert_abs_diff_eq!(
                    result.graph.total_weight(),
                    exhaustive_mst_weight(result.distance_matrix()),
                    epsilon = 1e-9
                );
            }
        }
    }
}

#[test]
fn test_edge_weights_come_from_distance_matrix() {
    let ts = factor_series(12, 60, 3);
    let result = CorrelationSpanningTree::new().reconstruct(ts.view()).unwrap();
    let d = result.distance_matrix();

    for edge in result.graph.edges() {
        assert_ne!(edge.source, edge.target);
        assert_eq!(edge.weight, d[[edge.source, edge.target]]);
    }
}

#[test]
fn test_identical_rows_scenario() {
    let mut ts = random_series(3, 50, 99);
    let copy = ts.row(0).to_owned();
    ts.row_mut(1).assign(&copy);

    for kind in DistanceKind::ALL {
        let config = CorrelationSpanningTreeConfig::default().with_distance(kind);
        let result = reconstruct(ts.view(), &config).unwrap();
        let d = result.distance_matrix();

        assert_eq!(result.graph.node_count(), 3);
        assert_eq!(result.graph.edge_count(), 2);
        assert_eq!(result.graph.edge_weight(0, 1), Some(0.0));
        assert_eq!(d[[0, 1]], 0.0);
        for i in 0..3 {
            assert_eq!(d[[i, i]], 0.0);
        }

        let c = result.artifact(CORRELATION_MATRIX).unwrap();
        assert_eq!(c[[0, 1]], 1.0);
    }
}

#[test]
fn test_constant_row_scenario() {
    let mut ts = random_series(3, 20, 5);
    ts.row_mut(1).fill(3.0);

    let result = CorrelationSpanningTree::new().reconstruct(ts.view()).unwrap();
    let c = result.artifact(CORRELATION_MATRIX).unwrap();
    let d = result.distance_matrix();

    assert!(c[[0, 1]].is_nan());
    assert!(c[[1, 2]].is_nan());
    assert!(d[[0, 1]].is_nan());
    assert!(d[[2, 1]].is_nan());
    assert!(d[[0, 2]].is_finite());

    assert_eq!(result.graph.node_count(), 3);
    assert_eq!(result.graph.edge_count(), 1);
    assert_eq!(result.graph.degree(1), 0);
    assert!(result.graph.edge_weight(0, 2).is_some());
    assert_eq!(result.graph.connected_components(), 2);

    let summary = result.summary();
    assert_eq!(summary.components, 2);
}

#[test]
fn test_deterministic_results() {
    let ts = factor_series(30, 80, 21);
    let config =
        CorrelationSpanningTreeConfig::from_options(&[("distance", "inv_square")]).unwrap();

    let first = reconstruct(ts.view(), &config).unwrap();
    let second = reconstruct(ts.view(), &config).unwrap();

    assert_eq!(first.graph.edges(), second.graph.edges());
    assert_eq!(first.graph.total_weight(), second.graph.total_weight());
}

#[test]
fn test_reconstruct_matches_pipeline() {
    let ts = factor_series(9, 45, 8);
    let result = CorrelationSpanningTree::new().reconstruct(ts.view()).unwrap();

    let c = correlation_matrix(ts.view());
    let d = distance_matrix(c.view(), DistanceKind::RootInv);
    let forest = minimum_spanning_forest(d.view()).unwrap();

    assert_eq!(result.graph.edges(), forest.edges().to_vec());
    assert_eq!(result.artifact(DISTANCE_MATRIX), Some(&d));
}

#[test]
fn test_shape_errors_fail_fast() {
    let empty = Array2::<f64>::zeros((0, 10));
    assert!(matches!(
        CorrelationSpanningTree::new().reconstruct(empty.view()),
        Err(ReconstructionError::Shape(_))
    ));

    let three_d = ArrayD::<f64>::zeros(IxDyn(&[2, 2, 2]));
    assert!(matches!(
        observations_from_dyn(three_d),
        Err(ReconstructionError::Shape(_))
    ));

    assert!(matches!(
        observations_from_rows(&[vec![1.0, 2.0], vec![1.0]]),
        Err(ReconstructionError::Shape(_))
    ));
}

#[test]
fn test_configuration_errors_fail_fast() {
    let err =
        CorrelationSpanningTreeConfig::from_options(&[("distance", "manhattan")]).unwrap_err();
    assert!(matches!(err, ReconstructionError::Configuration(_)));
    assert!(err.to_string().contains("manhattan"));
}

#[test]
fn test_csv_to_tree() {
    let csv = "A,B,C,D\n\
               1.0,2.0,9.0,3.0\n\
               2.0,4.1,7.0,3.5\n\
               3.0,6.2,8.0,2.0\n\
               4.0,7.9,5.0,4.0\n\
               5.0,10.0,6.0,1.0\n";
    let obs = read_observations(csv.as_bytes(), Layout::Columns).unwrap();
    let result = CorrelationSpanningTree::new().reconstruct(obs.values.view()).unwrap();

    assert_eq!(obs.labels.len(), 4);
    assert_eq!(result.graph.node_count(), 4);
    assert_eq!(result.graph.edge_count(), 3);
    // A and B are almost perfectly correlated
    assert!(result.graph.edge_weight(0, 1).is_some());
}
