//! Minimum spanning tree over a dense distance matrix.
//!
//! The matrix is treated as a complete graph. NaN and infinite entries mean
//! "no edge", so the result is a spanning forest when the usable edges do not
//! connect every node. Only the upper triangle (`i < j`) is read.
//!
//! Prim's algorithm directly on the dense matrix, O(N^2). Ties are broken
//! deterministically:
//!
//! - among unvisited nodes with equal connecting weight, the lowest index wins;
//! - among equal-weight edges into the tree, the lowest-indexed tree node wins.

use crate::error::{ReconstructionError, Result};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An undirected tree edge, stored with `source < target`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeEdge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

impl TreeEdge {
    /// Create an edge, normalizing the endpoint order
    pub fn new(a: usize, b: usize, weight: f64) -> Self {
        Self {
            source: a.min(b),
            target: a.max(b),
            weight,
        }
    }

    /// Endpoints as a `(low, high)` pair
    pub fn endpoints(&self) -> (usize, usize) {
        (self.source, self.target)
    }
}

/// Minimum spanning forest: one minimum spanning tree per component
#[derive(Debug, Clone)]
pub struct SpanningForest {
    /// Edges in the order they were added
    edges: Vec<TreeEdge>,
    /// Component id of each node, numbered in order of discovery
    component_of: Vec<usize>,
    /// Number of components
    component_count: usize,
}

impl SpanningForest {
    /// Selected edges in insertion order
    pub fn edges(&self) -> &[TreeEdge] {
        &self.edges
    }

    /// Consume the forest, returning its edges
    pub fn into_edges(self) -> Vec<TreeEdge> {
        self.edges
    }

    /// Number of nodes covered
    pub fn node_count(&self) -> usize {
        self.component_of.len()
    }

    /// Number of edges selected
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of trees in the forest (0 for an empty input)
    pub fn component_count(&self) -> usize {
        self.component_count
    }

    /// Component id of a node. Component 0 always contains node 0.
    pub fn component_of(&self, node: usize) -> Option<usize> {
        self.component_of.get(node).copied()
    }

    /// Nodes grouped by component, each group in ascending order
    pub fn components(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.component_count];
        for (node, &component) in self.component_of.iter().enumerate() {
            groups[component].push(node);
        }
        groups
    }

    /// Sum of edge weights
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// Whether the forest is a single tree covering every node
    pub fn is_spanning_tree(&self) -> bool {
        self.component_count <= 1
    }
}

/// Compute the minimum spanning forest of a dense, square weight matrix
pub fn minimum_spanning_forest(distances: ArrayView2<'_, f64>) -> Result<SpanningForest> {
    let (n, m) = distances.dim();
    if n != m {
        return Err(ReconstructionError::Shape(format!(
            "distance matrix must be square, got {}x{}",
            n, m
        )));
    }

    let weight = |a: usize, b: usize| distances[[a.min(b), a.max(b)]];

    let mut in_tree = vec![false; n];
    // Cheapest known edge from each outside node into the tree
    let mut best = vec![f64::INFINITY; n];
    let mut via: Vec<Option<usize>> = vec![None; n];

    let mut component_of = vec![0; n];
    let mut component_count = 0;
    let mut edges = Vec::with_capacity(n.saturating_sub(1));

    for _ in 0..n {
        let node = match closest_outside(&in_tree, &best, &via) {
            Some(node) => node,
            None => {
                // Current component exhausted; restart at the lowest unvisited node
                let Some(root) = in_tree.iter().position(|&visited| !visited) else {
                    break;
                };
                component_count += 1;
                root
            }
        };

        in_tree[node] = true;
        component_of[node] = component_count - 1;

        if let Some(parent) = via[node] {
            edges.push(TreeEdge::new(parent, node, best[node]));
        }

        for other in 0..n {
            if in_tree[other] {
                continue;
            }

            let w = weight(node, other);
            if !w.is_finite() {
                continue;
            }

            let better = w < best[other]
                || (w == best[other] && via[other].map_or(true, |current| node < current));
            if better {
                best[other] = w;
                via[other] = Some(node);
            }
        }
    }

    debug!(
        nodes = n,
        edges = edges.len(),
        components = component_count,
        "built minimum spanning forest"
    );

    Ok(SpanningForest {
        edges,
        component_of,
        component_count,
    })
}

/// Reachable outside node with the smallest connecting weight, lowest index on ties
fn closest_outside(in_tree: &[bool], best: &[f64], via: &[Option<usize>]) -> Option<usize> {
    let mut chosen: Option<usize> = None;

    for node in 0..in_tree.len() {
        if in_tree[node] || via[node].is_none() {
            continue;
        }
        match chosen {
            Some(current) if best[node] >= best[current] => {}
            _ => chosen = Some(node),
        }
    }

    chosen
}
