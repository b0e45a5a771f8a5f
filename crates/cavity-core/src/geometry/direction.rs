//! Compass-like labels for segment rotation.

use serde::{Deserialize, Serialize};

/// Direction of a segment, bucketed from its rotation in degrees.
///
/// Rotations follow screen coordinates (y grows downward), so 90 degrees
/// points to the bottom. The bucket edges are deliberately asymmetric:
/// 180 is `Left` while -180 falls into `LeftTop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectionLabel {
    Right,
    RightBottom,
    BottomRight,
    Bottom,
    BottomLeft,
    LeftBottom,
    Left,
    LeftTop,
    TopLeft,
    Top,
    TopRight,
    RightTop,
    Unknown,
}

impl DirectionLabel {
    /// Bucket a rotation in degrees. Values outside [-180, 180] (and NaN)
    /// are `Unknown`.
    pub fn of(angle: f64) -> Self {
        use DirectionLabel::*;

        if angle == 0.0 {
            Right
        } else if angle > 0.0 && angle < 45.0 {
            RightBottom
        } else if (45.0..90.0).contains(&angle) {
            BottomRight
        } else if angle == 90.0 {
            Bottom
        } else if (90.0..135.0).contains(&angle) {
            BottomLeft
        } else if (135.0..180.0).contains(&angle) {
            LeftBottom
        } else if angle == 180.0 {
            Left
        } else if (-180.0..-135.0).contains(&angle) {
            LeftTop
        } else if (-135.0..-90.0).contains(&angle) {
            TopLeft
        } else if angle == -90.0 {
            Top
        } else if (-90.0..-45.0).contains(&angle) {
            TopRight
        } else if (-45.0..0.0).contains(&angle) {
            RightTop
        } else {
            Unknown
        }
    }

    /// Kebab-case name, as shown to the UI layer.
    pub fn as_str(self) -> &'static str {
        match self {
            DirectionLabel::Right => "right",
            DirectionLabel::RightBottom => "right-bottom",
            DirectionLabel::BottomRight => "bottom-right",
            DirectionLabel::Bottom => "bottom",
            DirectionLabel::BottomLeft => "bottom-left",
            DirectionLabel::LeftBottom => "left-bottom",
            DirectionLabel::Left => "left",
            DirectionLabel::LeftTop => "left-top",
            DirectionLabel::TopLeft => "top-left",
            DirectionLabel::Top => "top",
            DirectionLabel::TopRight => "top-right",
            DirectionLabel::RightTop => "right-top",
            DirectionLabel::Unknown => "unknown",
        }
    }

    /// Whether the label mentions the right side.
    pub fn has_right(self) -> bool {
        matches!(
            self,
            DirectionLabel::Right
                | DirectionLabel::RightBottom
                | DirectionLabel::BottomRight
                | DirectionLabel::TopRight
                | DirectionLabel::RightTop
        )
    }

    /// Whether the label mentions the left side.
    pub fn has_left(self) -> bool {
        matches!(
            self,
            DirectionLabel::BottomLeft
                | DirectionLabel::LeftBottom
                | DirectionLabel::Left
                | DirectionLabel::LeftTop
                | DirectionLabel::TopLeft
        )
    }

    /// Axis rotation used by orthogonal drawing.
    pub fn orthogonal_rotation(self) -> f64 {
        match self {
            DirectionLabel::Right
            | DirectionLabel::RightBottom
            | DirectionLabel::RightTop
            | DirectionLabel::Unknown => 0.0,
            DirectionLabel::BottomRight | DirectionLabel::Bottom | DirectionLabel::BottomLeft => {
                90.0
            }
            DirectionLabel::LeftBottom | DirectionLabel::Left | DirectionLabel::LeftTop => 180.0,
            DirectionLabel::TopLeft | DirectionLabel::Top | DirectionLabel::TopRight => -90.0,
        }
    }

    /// Extra text rotation so edge labels never render upside down.
    pub fn label_rotation(self) -> f64 {
        match self {
            DirectionLabel::Top
            | DirectionLabel::TopRight
            | DirectionLabel::TopLeft
            | DirectionLabel::Left
            | DirectionLabel::LeftTop
            | DirectionLabel::LeftBottom
            | DirectionLabel::Bottom
            | DirectionLabel::BottomLeft => 180.0,
            DirectionLabel::Right
            | DirectionLabel::RightBottom
            | DirectionLabel::BottomRight
            | DirectionLabel::RightTop
            | DirectionLabel::Unknown => 0.0,
        }
    }

    /// Curvature sign of the angle guide arc.
    pub fn arc_curvature(self) -> f64 {
        match self {
            DirectionLabel::LeftBottom
            | DirectionLabel::BottomLeft
            | DirectionLabel::RightTop
            | DirectionLabel::TopRight => -0.3,
            _ => 0.3,
        }
    }
}

impl std::fmt::Display for DirectionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
