//! Error types for building and querying a k-d tree.

use thiserror::Error;

/// Errors reported by the checked entry points (`try_build`, `try_create_grouping`,
/// `GroupingParams::validate`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KdTreeError {
    /// Points without coordinates cannot be split along any axis.
    #[error("points must have at least one coordinate")]
    ZeroDimensional,

    /// A training point does not match the dimensionality of the first point.
    #[error("point {index} has {found} coordinates, expected {expected}")]
    InconsistentDimensions {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// Coordinates must be ordered along every axis.
    #[error("point {index} has a NaN coordinate")]
    NanCoordinate { index: usize },

    /// A query point does not match the dimensionality of the index.
    #[error("query has {found} coordinates but the index has {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, KdTreeError>;
