//! Observation matrices: shape validation and loading.
//!
//! Observations are laid out as an N x L matrix, one row per entity and one
//! column per sample.

mod loader;

pub use loader::{load_observations, read_observations, Layout, Observations};

use crate::error::{ReconstructionError, Result};
use ndarray::{Array2, ArrayD, ArrayView2, Ix2};

/// Minimum number of samples per entity
pub const MIN_SAMPLES: usize = 2;

/// Check that an observation matrix has at least one row and two samples
pub fn validate_shape(ts: ArrayView2<'_, f64>) -> Result<()> {
    let (rows, cols) = ts.dim();

    if rows < 1 {
        return Err(ReconstructionError::Shape(
            "observation matrix has no rows".to_string(),
        ));
    }
    if cols < MIN_SAMPLES {
        return Err(ReconstructionError::Shape(format!(
            "need at least {} samples per row, got {}",
            MIN_SAMPLES, cols
        )));
    }

    Ok(())
}

/// Build an observation matrix from per-entity series
///
/// Fails if the rows have different lengths.
pub fn observations_from_rows(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let n = rows.len();
    let len = rows.first().map(|r| r.len()).unwrap_or(0);

    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != len) {
        return Err(ReconstructionError::Shape(format!(
            "ragged rows: row 0 has {} samples, row {} has {}",
            len,
            i,
            row.len()
        )));
    }

    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((n, len), flat)
        .map_err(|e| ReconstructionError::Shape(e.to_string()))
}

/// Convert an arbitrary-dimensional array into an observation matrix
pub fn observations_from_dyn(ts: ArrayD<f64>) -> Result<Array2<f64>> {
    let ndim = ts.ndim();
    ts.into_dimensionality::<Ix2>().map_err(|_| {
        ReconstructionError::Shape(format!(
            "observations must be two-dimensional, got {} dimension(s)",
            ndim
        ))
    })
}
