//! Error types for drawing operations.

use crate::edge::EdgeId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a user action was refused. The session state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("drawing can only continue from an open endpoint")]
    NotDrawablePoint,
    #[error("edge overlaps an existing edge")]
    Overlapping,
    #[error("edges can only be edited once the outline is closed")]
    NotClosed,
    #[error("edge has no length")]
    ZeroLength,
    #[error("invalid edge length: {0}")]
    InvalidLength(f64),
}

/// Drawing errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DrawError {
    #[error("Rejected: {0}")]
    Rejected(#[from] Rejection),
    #[error("Edge set is marked closed but does not form a single cycle")]
    CycleNotFound,
    #[error("Edge not found: {0}")]
    UnknownEdge(EdgeId),
    #[error("Cannot import an outline of {0} points")]
    InvalidImport(usize),
}

impl DrawError {
    /// Whether this error is a recoverable user-facing rejection.
    pub fn is_rejection(&self) -> bool {
        matches!(self, DrawError::Rejected(_))
    }
}

/// Result type for drawing operations.
pub type DrawResult<T> = Result<T, DrawError>;
