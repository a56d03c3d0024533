//! Graph construction from observation data.
//!
//! This module provides the stages of the correlation spanning tree pipeline:
//! - Pearson correlation matrices
//! - Correlation to distance transforms
//! - Minimum spanning forests over dense distance matrices
//! - The materialized output graph

mod correlation;
mod distance;
mod spanning_tree;

pub use correlation::{correlation_matrix, degenerate_rows, pearson_correlation};
pub use distance::{distance_matrix, DistanceKind};
pub use spanning_tree::{minimum_spanning_forest, SpanningForest, TreeEdge};

use ndarray::Array2;
use petgraph::graph::{NodeIndex, UnGraph};

/// Reconstructed graph over integer-labelled nodes `0..N`
///
/// Node weights are the node labels and edge weights are distances. Built
/// only from a [`SpanningForest`], so it never holds self-loops or parallel
/// edges and has at most `N - 1` edges.
#[derive(Debug, Clone)]
pub struct ReconstructedGraph {
    /// The underlying petgraph structure
    pub graph: UnGraph<usize, f64>,
}

impl ReconstructedGraph {
    /// Create a graph with `n` isolated nodes
    pub fn with_nodes(n: usize) -> Self {
        let mut graph = UnGraph::with_capacity(n, n.saturating_sub(1));
        for label in 0..n {
            graph.add_node(label);
        }
        Self { graph }
    }

    /// Materialize a spanning forest: every node, plus the forest's edges
    pub fn from_forest(forest: &SpanningForest) -> Self {
        let mut graph = Self::with_nodes(forest.node_count());
        for edge in forest.edges() {
            graph.graph.add_edge(
                NodeIndex::new(edge.source),
                NodeIndex::new(edge.target),
                edge.weight,
            );
        }
        graph
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Get edges in insertion order, endpoints normalized to `source < target`
    pub fn edges(&self) -> Vec<TreeEdge> {
        self.graph
            .edge_indices()
            .filter_map(|edge| {
                let (a, b) = self.graph.edge_endpoints(edge)?;
                let weight = self.graph.edge_weight(edge)?;
                Some(TreeEdge::new(a.index(), b.index(), *weight))
            })
            .collect()
    }

    /// Get edge weight between two nodes
    pub fn edge_weight(&self, a: usize, b: usize) -> Option<f64> {
        if a >= self.node_count() || b >= self.node_count() {
            return None;
        }

        self.graph
            .find_edge(NodeIndex::new(a), NodeIndex::new(b))
            .and_then(|edge| self.graph.edge_weight(edge).copied())
    }

    /// Get all neighbors of a node, ascending
    pub fn neighbors(&self, node: usize) -> Vec<usize> {
        if node >= self.node_count() {
            return Vec::new();
        }

        let mut neighbors: Vec<usize> = self
            .graph
            .neighbors(NodeIndex::new(node))
            .map(|n| n.index())
            .collect();
        neighbors.sort_unstable();
        neighbors
    }

    /// Get degree of a node
    pub fn degree(&self, node: usize) -> usize {
        if node >= self.node_count() {
            return 0;
        }
        self.graph.neighbors(NodeIndex::new(node)).count()
    }

    /// Sum of all edge weights
    pub fn total_weight(&self) -> f64 {
        self.graph.edge_weights().sum()
    }

    /// Number of connected components, isolated nodes included
    pub fn connected_components(&self) -> usize {
        petgraph::algo::connected_components(&self.graph)
    }

    /// Whether the graph is a single tree over all nodes
    pub fn is_tree(&self) -> bool {
        let n = self.node_count();
        n == 0 || (self.edge_count() == n - 1 && self.connected_components() == 1)
    }

    /// Dense weighted adjacency matrix; absent edges are 0
    pub fn adjacency_matrix(&self) -> Array2<f64> {
        let n = self.node_count();
        let mut matrix = Array2::<f64>::zeros((n, n));

        for edge in self.edges() {
            matrix[[edge.source, edge.target]] = edge.weight;
            matrix[[edge.target, edge.source]] = edge.weight;
        }

        matrix
    }
}
