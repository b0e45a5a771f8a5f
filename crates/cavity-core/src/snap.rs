//! Snap functionality for aligning the cursor to existing vertices.

use crate::config::DEFAULT_SNAP_THRESHOLD;
use crate::geometry::round_point;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Which rule produced a snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapKind {
    /// The cursor sits on a target point.
    Overlap,
    /// The cursor sits where a horizontal and a vertical guide cross.
    Intersection,
    /// The cursor is level with a target point.
    Horizontal,
    /// The cursor is plumb with a target point.
    Vertical,
    /// No snapping.
    #[default]
    None,
}

/// Result of a snap operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SnapResult {
    /// The snapped point, if any rule matched.
    pub point: Option<Point>,
    /// Target points that justify the snap (for guide rendering).
    pub targets: Vec<Point>,
    /// Rule that matched.
    pub kind: SnapKind,
}

impl SnapResult {
    /// A result with no snapping.
    pub fn none() -> Self {
        Self::default()
    }

    fn new(point: Point, targets: Vec<Point>, kind: SnapKind) -> Self {
        Self {
            point: Some(point),
            targets,
            kind,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.point.is_some()
    }

    /// The snapped point, or `cursor` when nothing snapped.
    pub fn point_or(&self, cursor: Point) -> Point {
        self.point.unwrap_or(cursor)
    }
}

fn within(a: f64, b: f64, threshold: f64) -> bool {
    (a - b).abs() <= threshold
}

/// Resolve a cursor position against candidate target points.
///
/// Rules are tried in priority order: overlap with a target (nearest wins),
/// intersection of a horizontal and a vertical guide, a horizontal guide,
/// a vertical guide. The first rule that matches decides the result.
pub fn snap_to_points(cursor: Point, targets: &[Point], threshold: f64) -> SnapResult {
    let mut best_overlap: Option<(Point, f64)> = None;
    let mut horizontal = Vec::new();
    let mut vertical = Vec::new();

    for &target in targets {
        let near_x = within(target.x, cursor.x, threshold);
        let near_y = within(target.y, cursor.y, threshold);

        if near_x && near_y {
            let dist_sq = (target - cursor).hypot2();
            if best_overlap.is_none_or(|(_, best)| dist_sq < best) {
                best_overlap = Some((target, dist_sq));
            }
            continue;
        }
        if near_y {
            horizontal.push(target);
        }
        if near_x {
            vertical.push(target);
        }
    }

    if let Some((target, _)) = best_overlap {
        return SnapResult::new(target, vec![target], SnapKind::Overlap);
    }

    for &h in &horizontal {
        for &v in &vertical {
            let crossing = Point::new(v.x, h.y);
            if within(crossing.x, cursor.x, threshold) && within(crossing.y, cursor.y, threshold) {
                return SnapResult::new(crossing, vec![h, v], SnapKind::Intersection);
            }
        }
    }

    if let Some(&h) = horizontal.first() {
        return SnapResult::new(Point::new(cursor.x, h.y), vec![h], SnapKind::Horizontal);
    }

    if let Some(&v) = vertical.first() {
        return SnapResult::new(Point::new(v.x, cursor.y), vec![v], SnapKind::Vertical);
    }

    SnapResult::none()
}

/// Snap resolver owning the target points of the current drawing session.
#[derive(Debug, Clone)]
pub struct Snapper {
    targets: Vec<Point>,
    threshold: f64,
}

impl Default for Snapper {
    fn default() -> Self {
        Self::new(DEFAULT_SNAP_THRESHOLD)
    }
}

impl Snapper {
    /// Create a resolver with no targets.
    pub fn new(threshold: f64) -> Self {
        Self {
            targets: Vec::new(),
            threshold,
        }
    }

    /// Register a target point. Duplicates are ignored.
    pub fn add_target_point(&mut self, point: Point) {
        let point = round_point(point);
        if !self.targets.contains(&point) {
            self.targets.push(point);
        }
    }

    /// Drop every target point.
    pub fn clear_target_points(&mut self) {
        self.targets.clear();
    }

    /// Current target points.
    pub fn target_points(&self) -> &[Point] {
        &self.targets
    }

    /// Snap distance per axis.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Resolve `cursor` against the registered targets.
    pub fn resolve(&self, cursor: Point) -> SnapResult {
        snap_to_points(cursor, &self.targets, self.threshold)
    }

    /// Resolved cursor position at comparison precision.
    pub fn cursor_point(&self, cursor: Point) -> Point {
        round_point(self.resolve(cursor).point_or(cursor))
    }
}
