//! Error types.
//!
//! Degenerate containers are not errors (layout returns nothing) and duplicate
//! ids are an undefended caller precondition, so neither appears here.

use thiserror::Error;

use crate::layout::OracleNode;

/// Failures reported by a layout oracle. Passed through to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutOracleError {
    /// The underlying engine refused an operation.
    #[error("layout engine error: {0}")]
    Engine(String),

    /// A style descriptor the oracle cannot use.
    #[error("invalid style descriptor {descriptor:?}: {reason}")]
    InvalidStyle { descriptor: String, reason: String },

    /// A handle that was never staged (or was staged before the last clear).
    #[error("unknown oracle node {0:?}")]
    UnknownNode(OracleNode),

    /// A rectangle was requested before the measurement barrier.
    #[error("oracle node {0:?} read before measurement")]
    NotMeasured(OracleNode),
}

impl LayoutOracleError {
    pub(crate) fn invalid_style(descriptor: &str, reason: impl Into<String>) -> Self {
        Self::InvalidStyle {
            descriptor: descriptor.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors from the layout pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error(transparent)]
    Oracle(#[from] LayoutOracleError),

    /// A `fixed` box without both width and height.
    #[error("box {id:?} is fixed but does not declare both width and height")]
    MissingFixedSize { id: String },

    /// The measurement map has no rectangle for a staged id.
    ///
    /// Indicates a bug upstream of normalization, not a runtime condition.
    #[error("no measurement recorded for box {id:?}")]
    MissingMeasurement { id: String },
}

/// Errors loading or validating a [`PaginationConfig`](crate::PaginationConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid pagination config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("maxPageHeight must be positive, got {0}")]
    InvalidPageHeight(f32),

    #[error("rowEpsilon must be non-negative, got {0}")]
    InvalidEpsilon(f32),
}
