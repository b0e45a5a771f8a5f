//! Session script format.

use std::fs;
use std::path::Path;

use cavity_core::DrawConfig;
use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::AppResult;

/// One recorded user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Pointer moved to a canvas position.
    Move { x: f64, y: f64 },
    /// Pointer clicked at a canvas position.
    Click { x: f64, y: f64 },
    /// Cancel the edge being drawn (right click).
    Abort,
    Undo,
    Redo,
    Reset,
    /// Length typed for the edge being drawn.
    SetLength { length: f64 },
    /// Length typed for an edge of the closed outline, addressed by its
    /// position in the outline.
    ModifyEdge { index: usize, length: f64 },
    /// Load an outline from its ordered vertices.
    Import { points: Vec<Point> },
    /// Record the current outline in the report.
    Export,
    ToggleOrthogonal,
    ToggleShowAngle,
}

/// A replayable drawing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub config: DrawConfig,
    pub events: Vec<SessionEvent>,
}

impl Script {
    /// Parse a script from JSON.
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a script file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
