//! Error types for streamnet

use thiserror::Error;

/// Main error type for streamnet operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Array length mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unknown {kind} selector: {value:?}")]
    InvalidSelector { kind: &'static str, value: String },

    #[error("No reference points to snap to ({0})")]
    EmptyReferenceSet(&'static str),

    #[error("Degenerate regression window: {points} points share the same distance")]
    DegenerateRegression { points: usize },

    #[error("Invalid flow graph: {0}")]
    InvalidFlowGraph(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidParameter`]
    pub fn invalid_parameter(
        name: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for streamnet operations
pub type Result<T> = std::result::Result<T, Error>;
