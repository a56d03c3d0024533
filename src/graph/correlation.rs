//! Pearson correlation between the rows of an observation matrix.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Calculate Pearson correlation coefficient between two series
///
/// Returns NaN when either series has zero variance, since the coefficient is
/// undefined there (as opposed to zero, which means no linear relationship).
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return f64::NAN;
    }

    let x = ArrayView1::from(&x[..n]);
    let y = ArrayView1::from(&y[..n]);
    if is_constant(x) || is_constant(y) {
        return f64::NAN;
    }

    let dx = centered(x);
    let dy = centered(y);
    let denom = (dx.dot(&dx) * dy.dot(&dy)).sqrt();

    (dx.dot(&dy) / denom).clamp(-1.0, 1.0)
}

/// Calculate the N x N Pearson correlation matrix of the rows of `ts`
///
/// The diagonal is exactly 1. Off-diagonal entries involving a zero-variance
/// row are NaN. Finite entries are clipped to [-1, 1] to absorb round-off.
pub fn correlation_matrix(ts: ArrayView2<'_, f64>) -> Array2<f64> {
    let n = ts.nrows();

    // Centered rows and their norms; None marks a degenerate row
    let rows: Vec<Option<(Array1<f64>, f64)>> = ts
        .axis_iter(Axis(0))
        .map(|row| {
            if is_constant(row) {
                return None;
            }
            let c = centered(row);
            let norm = c.dot(&c).sqrt();
            Some((c, norm))
        })
        .collect();

    let mut corr = Array2::<f64>::from_elem((n, n), f64::NAN);

    for i in 0..n {
        corr[[i, i]] = 1.0;

        for j in (i + 1)..n {
            let r = match (&rows[i], &rows[j]) {
                // Identical rows are pinned to 1 so their distance is exactly 0
                (Some((ci, _)), Some((cj, _))) if ci == cj => 1.0,
                (Some((ci, ni)), Some((cj, nj))) => (ci.dot(cj) / (ni * nj)).clamp(-1.0, 1.0),
                _ => f64::NAN,
            };

            corr[[i, j]] = r;
            corr[[j, i]] = r;
        }
    }

    corr
}

/// Indices of rows whose samples are all equal (zero variance)
pub fn degenerate_rows(ts: ArrayView2<'_, f64>) -> Vec<usize> {
    ts.axis_iter(Axis(0))
        .enumerate()
        .filter(|(_, row)| is_constant(*row))
        .map(|(i, _)| i)
        .collect()
}

// Compared exactly: the mean of a constant row is not always bit-equal to its
// samples, so a variance test would leave round-off noise behind.
fn is_constant(row: ArrayView1<'_, f64>) -> bool {
    match row.iter().next() {
        Some(&first) => row.iter().all(|&v| v == first),
        None => true,
    }
}

fn centered(row: ArrayView1<'_, f64>) -> Array1<f64> {
    let mean = row.mean().unwrap_or(0.0);
    row.mapv(|v| v - mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_pearson_perfect_positive() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![2.0, 4.0, 6.0, 8.0, 10.0];

        assert_abs_diff_eq!(pearson_correlation(&x, &y), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_perfect_negative() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![10.0, 8.0, 6.0, 4.0, 2.0];

        assert_abs_diff_eq!(pearson_correlation(&x, &y), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_constant_is_nan() {
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![0.1; 4];

        assert!(pearson_correlation(&x, &y).is_nan());
    }

    #[test]
    fn test_pearson_known_value() {
        // Sums of centered products: cov = 2.5, var_x = 5.0, var_y = 2.75
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![1.0, 3.0, 2.0, 3.0];

        let expected = 2.5 / (5.0_f64 * 2.75).sqrt();
        assert_abs_diff_eq!(pearson_correlation(&x, &y), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_correlation_matrix_shape_and_symmetry() {
        let ts = array![
            [0.01, 0.02, -0.01, 0.015],
            [0.012, 0.018, -0.008, 0.014],
            [-0.005, 0.03, 0.01, -0.02],
        ];

        let c = correlation_matrix(ts.view());
        assert_eq!(c.dim(), (3, 3));

        for i in 0..3 {
            assert_eq!(c[[i, i]], 1.0);
            for j in 0..3 {
                assert_eq!(c[[i, j]], c[[j, i]]);
                assert!(c[[i, j]] >= -1.0 && c[[i, j]] <= 1.0);
            }
        }
    }

    #[test]
    fn test_correlation_matrix_matches_pairwise() {
        let ts = array![[1.0, 2.0, 3.0, 4.0], [1.0, 3.0, 2.0, 3.0]];
        let c = correlation_matrix(ts.view());

        let pair = pearson_correlation(&[1.0, 2.0, 3.0, 4.0], &[1.0, 3.0, 2.0, 3.0]);
        assert_abs_diff_eq!(c[[0, 1]], pair, epsilon = 1e-12);
    }

    #[test]
    fn test_identical_rows_correlate_exactly() {
        let ts = array![[0.3, -1.2, 4.4, 0.0, 2.5], [0.3, -1.2, 4.4, 0.0, 2.5]];
        let c = correlation_matrix(ts.view());

        assert_eq!(c[[0, 1]], 1.0);
    }

    #[test]
    fn test_constant_row_propagates_nan() {
        let ts = array![[1.0, 2.0, 3.0], [3.0, 3.0, 3.0], [2.0, 1.0, 4.0]];
        let c = correlation_matrix(ts.view());

        assert!(c[[0, 1]].is_nan());
        assert!(c[[1, 2]].is_nan());
        assert!(c[[2, 1]].is_nan());
        assert_eq!(c[[1, 1]], 1.0);
        assert!(c[[0, 2]].is_finite());
        assert_eq!(degenerate_rows(ts.view()), vec![1]);
    }
}
