//! Cavity Core Library
//!
//! Platform-agnostic drawing logic for cavity bottom outlines: snapping,
//! edge collision, closure detection and undo/redo.

pub mod annotation;
pub mod config;
pub mod drawing;
pub mod edge;
pub mod error;
pub mod geometry;
pub mod group;
pub mod history;
pub mod snap;

pub use annotation::{
    AngleGuide, AnnotationLabel, AnnotationStyle, ArcAnnotation, EdgeAnnotation, annotate_arc,
    annotate_edge, annotate_polygon,
};
pub use config::DrawConfig;
pub use drawing::{ClickOutcome, DrawEvent, DrawState, Drawing};
pub use edge::{Edge, EdgeId, EdgeState, EdgeUiState};
pub use error::{DrawError, DrawResult, Rejection};
pub use geometry::{DirectionLabel, VertexKey};
pub use group::EdgeGroup;
pub use history::{History, HistoryStatus, Snapshot};
pub use snap::{SnapKind, SnapResult, Snapper};
