//! Correlation to distance transforms.

use crate::error::ReconstructionError;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Formula used to turn a correlation into a distance
///
/// Both are monotonically decreasing in the correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceKind {
    /// `sqrt(2 * (1 - c))`, a Euclidean metric with range [0, 2] (Bonanno et al. 2003)
    #[default]
    RootInv,
    /// `1 - c^2`, a ranking transform with range [0, 1] (Mantegna 1999).
    /// It does not satisfy the triangle inequality.
    InvSquare,
}

impl DistanceKind {
    /// All supported transforms
    pub const ALL: [DistanceKind; 2] = [DistanceKind::RootInv, DistanceKind::InvSquare];

    /// Option value naming this transform
    pub fn name(&self) -> &'static str {
        match self {
            Self::RootInv => "root_inv",
            Self::InvSquare => "inv_square",
        }
    }

    /// Map a single correlation value to a distance. NaN stays NaN.
    pub fn apply(&self, corr: f64) -> f64 {
        match self {
            Self::RootInv => {
                let radicand = 2.0 * (1.0 - corr);
                // Round-off at c == 1 can go slightly negative; NaN falls through
                if radicand < 0.0 {
                    0.0
                } else {
                    radicand.sqrt()
                }
            }
            Self::InvSquare => {
                let d = 1.0 - corr * corr;
                if d < 0.0 {
                    0.0
                } else {
                    d
                }
            }
        }
    }

    /// Largest distance the transform produces for correlations in [-1, 1]
    pub fn upper_bound(&self) -> f64 {
        match self {
            Self::RootInv => 2.0,
            Self::InvSquare => 1.0,
        }
    }

    /// Whether the transform yields a true metric
    pub fn is_metric(&self) -> bool {
        matches!(self, Self::RootInv)
    }
}

impl fmt::Display for DistanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceKind {
    type Err = ReconstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                ReconstructionError::Configuration(format!(
                    "unknown distance '{}', expected one of: root_inv, inv_square",
                    s
                ))
            })
    }
}

/// Transform a correlation matrix into a distance matrix
///
/// The diagonal is set to exactly 0. Off-diagonal NaN correlations give NaN
/// distances; they are never replaced by a fabricated value.
pub fn distance_matrix(correlations: ArrayView2<'_, f64>, kind: DistanceKind) -> Array2<f64> {
    let mut distances = correlations.mapv(|c| kind.apply(c));
    distances.diag_mut().fill(0.0);
    distances
}
