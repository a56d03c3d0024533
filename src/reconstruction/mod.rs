//! Graph reconstruction from time series.
//!
//! A reconstruction method takes an N x L observation matrix and returns a
//! [`ReconstructionResult`]: the graph plus side artifacts. Every method
//! stores at least the distance matrix, under [`DISTANCE_MATRIX`].

mod correlation_spanning_tree;

pub use correlation_spanning_tree::{
    reconstruct, CorrelationSpanningTree, CorrelationSpanningTreeConfig,
};

use crate::error::Result;
use crate::graph::{DistanceKind, ReconstructedGraph, TreeEdge};
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Key of the distance matrix artifact
pub const DISTANCE_MATRIX: &str = "distance_matrix";

/// Key of the correlation matrix artifact
pub const CORRELATION_MATRIX: &str = "correlation_matrix";

/// Shared interface of reconstruction methods
pub trait Reconstructor {
    /// Short method name used in summaries and logs
    fn name(&self) -> &'static str;

    /// Reconstruct a graph from an N x L observation matrix
    fn reconstruct(&self, ts: ArrayView2<'_, f64>) -> Result<ReconstructionResult>;
}

/// Output of one reconstruction call
///
/// Built fresh on every call; reconstructors keep no results of their own.
#[derive(Debug, Clone)]
pub struct ReconstructionResult {
    /// Name of the method that produced this result
    pub method: &'static str,
    /// The reconstructed graph
    pub graph: ReconstructedGraph,
    distance: Option<DistanceKind>,
    distance_matrix: Array2<f64>,
    extra: BTreeMap<String, Array2<f64>>,
}

impl ReconstructionResult {
    /// Create a result from a graph and its distance matrix
    pub fn new(
        method: &'static str,
        graph: ReconstructedGraph,
        distance_matrix: Array2<f64>,
    ) -> Self {
        Self {
            method,
            graph,
            distance: None,
            distance_matrix,
            extra: BTreeMap::new(),
        }
    }

    /// Record the distance formula the matrix was built with
    pub fn with_distance_kind(mut self, distance: DistanceKind) -> Self {
        self.distance = Some(distance);
        self
    }

    /// Attach an additional matrix artifact
    ///
    /// The distance matrix is fixed at construction; a value passed under
    /// [`DISTANCE_MATRIX`] is dropped.
    pub fn with_artifact(mut self, key: impl Into<String>, value: Array2<f64>) -> Self {
        let key = key.into();
        if key == DISTANCE_MATRIX {
            warn!("ignoring extra artifact under reserved key '{}'", DISTANCE_MATRIX);
            return self;
        }
        self.extra.insert(key, value);
        self
    }

    /// Distance formula, when the method uses one
    pub fn distance_kind(&self) -> Option<DistanceKind> {
        self.distance
    }

    /// The N x N distance matrix the graph was built from
    pub fn distance_matrix(&self) -> &Array2<f64> {
        &self.distance_matrix
    }

    /// Look up an artifact by key
    pub fn artifact(&self, key: &str) -> Option<&Array2<f64>> {
        if key == DISTANCE_MATRIX {
            Some(&self.distance_matrix)
        } else {
            self.extra.get(key)
        }
    }

    /// Keys of all stored artifacts, sorted
    pub fn artifact_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.extra.keys().map(String::as_str).collect();
        keys.push(DISTANCE_MATRIX);
        keys.sort_unstable();
        keys
    }

    /// Split into the graph and the distance matrix
    pub fn into_parts(self) -> (ReconstructedGraph, Array2<f64>) {
        (self.graph, self.distance_matrix)
    }

    /// Serializable overview of the graph
    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            method: self.method.to_string(),
            distance: self.distance,
            nodes: self.graph.node_count(),
            components: self.graph.connected_components(),
            total_weight: self.graph.total_weight(),
            edges: self.graph.edges(),
        }
    }
}

/// Serializable graph overview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSummary {
    pub method: String,
    pub distance: Option<DistanceKind>,
    pub nodes: usize,
    pub components: usize,
    pub total_weight: f64,
    pub edges: Vec<TreeEdge>,
}
