//! Drawing configuration.

use serde::{Deserialize, Serialize};

/// Default distance (world units) within which the cursor snaps.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 10.0;

/// Default view zoom the canvas starts at.
pub const DEFAULT_ZOOM_SCALE: f64 = 0.125;

/// Default stroke width of a drawn edge, in screen pixels.
pub const DEFAULT_LINE_WIDTH: f64 = 10.0;

/// Settings shared by every component of a drawing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    /// Snap distance per axis, in world units.
    pub snap_threshold: f64,
    /// View zoom used to convert screen sizes into world sizes.
    pub zoom_scale: f64,
    /// Edge stroke width in screen pixels.
    pub line_width: f64,
    /// Lock in-progress edges to the nearest axis.
    pub orthogonal: bool,
    /// Compute the angle guide while drawing.
    pub show_angle: bool,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            zoom_scale: DEFAULT_ZOOM_SCALE,
            line_width: DEFAULT_LINE_WIDTH,
            orthogonal: false,
            show_angle: true,
        }
    }
}

impl DrawConfig {
    /// Convert a size in screen pixels to world units at the configured zoom.
    pub fn convert_size(&self, size: f64) -> f64 {
        if self.zoom_scale > 0.0 {
            size / self.zoom_scale
        } else {
            size
        }
    }
}
