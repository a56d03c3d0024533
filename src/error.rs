//! Error types for graph reconstruction.
//!
//! Only structural problems are errors. Numerical degeneracy (a row with zero
//! variance) is not reported here: it shows up as NaN entries in the
//! correlation and distance matrices and as extra components in the forest.

use thiserror::Error;

/// Errors raised by the reconstruction pipeline
#[derive(Error, Debug)]
pub enum ReconstructionError {
    /// Input has the wrong shape (not 2-D, ragged, too few rows or samples)
    #[error("Invalid input shape: {0}")]
    Shape(String),

    /// Unknown option key or value
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A field in an input file is not a number
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ReconstructionError>;
