//! # Correlation Spanning Tree
//!
//! Reconstructs a sparse graph over N entities from L observations per entity.
//! Pairwise Pearson correlations are converted into distances and the minimum
//! spanning tree of the distance matrix connects the entities, exposing the
//! hierarchical structure of e.g. a stock market (Mantegna 1999).
//!
//! ## Modules
//!
//! - **Data Module**: observation matrices, shape checks and CSV loading
//! - **Graph Module**: correlation, distance transforms, spanning forests, output graph
//! - **Reconstruction Module**: the `Reconstructor` interface and the correlation spanning tree
//!
//! ## Quick Start
//!
//! ```rust
//! use correlation_spanning_tree::{
//!     graph::DistanceKind,
//!     reconstruction::{CorrelationSpanningTree, Reconstructor},
//! };
//! use ndarray::array;
//!
//! let ts = array![
//!     [0.01, 0.02, -0.01, 0.015, 0.003],
//!     [0.012, 0.018, -0.008, 0.014, 0.001],
//!     [-0.005, 0.03, 0.01, -0.02, 0.007],
//! ];
//!
//! let result = CorrelationSpanningTree::new()
//!     .with_distance(DistanceKind::RootInv)
//!     .reconstruct(ts.view())?;
//!
//! assert_eq!(result.graph.node_count(), 3);
//! assert_eq!(result.graph.edge_count(), 2);
//! assert_eq!(result.distance_matrix().dim(), (3, 3));
//! # Ok::<(), correlation_spanning_tree::ReconstructionError>(())
//! ```

pub mod data;
pub mod error;
pub mod graph;
pub mod reconstruction;

// Re-export commonly used types
pub use error::{ReconstructionError, Result};
pub use graph::{DistanceKind, ReconstructedGraph, SpanningForest, TreeEdge};
pub use reconstruction::{
    reconstruct, CorrelationSpanningTree, CorrelationSpanningTreeConfig, ReconstructionResult,
    Reconstructor, DISTANCE_MATRIX,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
