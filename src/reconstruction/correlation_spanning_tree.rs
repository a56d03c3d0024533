//! Correlation spanning tree reconstruction.
//!
//! Pearson correlations between the entity series are turned into distances
//! and the minimum spanning tree of the distance matrix is returned as the
//! graph (Mantegna 1999, "Hierarchical structure in financial markets").
//!
//! Rows with zero variance have undefined correlation. They are not an
//! error: their correlation and distance entries are NaN, the tree builder
//! treats NaN as "no edge", and those rows end up in their own components.
//! Check `graph.connected_components()` or the distance matrix when a single
//! tree is required.

use super::{ReconstructionResult, Reconstructor, CORRELATION_MATRIX};
use crate::data::validate_shape;
use crate::error::{ReconstructionError, Result};
use crate::graph::{
    correlation_matrix, degenerate_rows, distance_matrix, minimum_spanning_forest, DistanceKind,
    ReconstructedGraph,
};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Configuration of the correlation spanning tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorrelationSpanningTreeConfig {
    /// Correlation to distance formula
    pub distance: DistanceKind,
}

impl CorrelationSpanningTreeConfig {
    /// Set the distance formula
    pub fn with_distance(mut self, distance: DistanceKind) -> Self {
        self.distance = distance;
        self
    }

    /// Build a config from `key=value` style options
    ///
    /// The only recognized key is `distance`.
    pub fn from_options<K, V>(options: &[(K, V)]) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();

        for (key, value) in options {
            match key.as_ref() {
                "distance" => config.distance = value.as_ref().parse()?,
                other => {
                    return Err(ReconstructionError::Configuration(format!(
                        "unknown option '{}'",
                        other
                    )))
                }
            }
        }

        Ok(config)
    }
}

/// Minimum spanning tree of the correlation distance matrix
#[derive(Debug, Clone, Default)]
pub struct CorrelationSpanningTree {
    config: CorrelationSpanningTreeConfig,
}

impl CorrelationSpanningTree {
    /// Create a reconstructor with the default `root_inv` distance
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reconstructor with the given configuration
    pub fn with_config(config: CorrelationSpanningTreeConfig) -> Self {
        Self { config }
    }

    /// Set the distance formula
    pub fn with_distance(mut self, distance: DistanceKind) -> Self {
        self.config.distance = distance;
        self
    }

    /// Current configuration
    pub fn config(&self) -> &CorrelationSpanningTreeConfig {
        &self.config
    }
}

impl Reconstructor for CorrelationSpanningTree {
    fn name(&self) -> &'static str {
        "correlation_spanning_tree"
    }

    fn reconstruct(&self, ts: ArrayView2<'_, f64>) -> Result<ReconstructionResult> {
        validate_shape(ts)?;

        let (n, l) = ts.dim();
        debug!(entities = n, samples = l, distance = %self.config.distance, "reconstructing");

        let degenerate = degenerate_rows(ts);
        if !degenerate.is_empty() {
            warn!(
                rows = ?degenerate,
                "zero-variance rows have undefined correlation and will be isolated"
            );
        }

        let correlations = correlation_matrix(ts);
        let distances = distance_matrix(correlations.view(), self.config.distance);
        let forest = minimum_spanning_forest(distances.view())?;

        if !forest.is_spanning_tree() {
            warn!(
                components = forest.component_count(),
                "distance matrix is disconnected, returning a spanning forest"
            );
        }

        let graph = ReconstructedGraph::from_forest(&forest);
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            total_weight = graph.total_weight(),
            "correlation spanning tree built"
        );

        Ok(ReconstructionResult::new(self.name(), graph, distances)
            .with_distance_kind(self.config.distance)
            .with_artifact(CORRELATION_MATRIX, correlations))
    }
}

/// Run the correlation spanning tree on `ts` with the given configuration
pub fn reconstruct(
    ts: ArrayView2<'_, f64>,
    config: &CorrelationSpanningTreeConfig,
) -> Result<ReconstructionResult> {
    CorrelationSpanningTree::with_config(*config).reconstruct(ts)
}
