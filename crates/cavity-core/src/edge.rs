//! A single drawn edge of the cavity bottom outline.

use crate::geometry::{
    DirectionLabel, endpoint_of, rotation_of, round_point, same_point, segment_intersection,
};
use kurbo::{Line, Point};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an edge.
pub type EdgeId = Uuid;

/// Drawing lifecycle of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EdgeState {
    /// Just created; start and end coincide.
    #[default]
    Idle,
    /// The end follows the pointer.
    Drawing,
    /// Frozen and part of the outline.
    Finished,
}

/// Display state of a finished edge once the outline is closed.
/// Has no effect on geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EdgeUiState {
    #[default]
    Normal,
    Hover,
    Selected,
}

/// A straight edge between two vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: EdgeId,
    start: Point,
    end: Point,
    state: EdgeState,
    ui_state: EdgeUiState,
    hit: bool,
}

impl Edge {
    /// Start a new zero-length edge at `start`.
    pub fn new(start: Point) -> Self {
        let start = round_point(start);
        Self {
            id: Uuid::new_v4(),
            start,
            end: start,
            state: EdgeState::Idle,
            ui_state: EdgeUiState::Normal,
            hit: false,
        }
    }

    /// Create an already finished edge (import and history reload).
    pub fn finished(start: Point, end: Point) -> Self {
        let mut edge = Self::new(start);
        edge.end = round_point(end);
        edge.state = EdgeState::Finished;
        edge
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Start and end as a segment.
    pub fn as_line(&self) -> Line {
        Line::new(self.start, self.end)
    }

    pub fn state(&self) -> EdgeState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == EdgeState::Finished
    }

    pub fn ui_state(&self) -> EdgeUiState {
        self.ui_state
    }

    pub(crate) fn set_ui_state(&mut self, ui_state: EdgeUiState) {
        self.ui_state = ui_state;
    }

    /// Collision flag from the last [`Edge::update_hit`].
    pub fn is_hit(&self) -> bool {
        self.hit
    }

    /// Get the length of the edge.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Rotation in degrees, in (-180, 180].
    pub fn rotation(&self) -> f64 {
        rotation_of(self.start, self.end)
    }

    pub fn direction(&self) -> DirectionLabel {
        DirectionLabel::of(self.rotation())
    }

    /// Length shown in the numeric input, rounded up.
    pub fn display_length(&self) -> i64 {
        self.length().ceil() as i64
    }

    /// Whether `point` is one of this edge's endpoints.
    pub fn has_vertex(&self, point: Point) -> bool {
        same_point(self.start, point) || same_point(self.end, point)
    }

    /// Move the end to follow the pointer.
    ///
    /// With `orthogonal` set, the length is kept and the rotation is locked
    /// to the nearest axis of the edge's direction bucket.
    pub fn drawing(&mut self, point: Point, orthogonal: bool) {
        if self.is_finished() {
            return;
        }
        self.state = EdgeState::Drawing;
        self.end = round_point(point);

        if orthogonal {
            let rotation = self.direction().orthogonal_rotation();
            self.end = endpoint_of(self.start, rotation, self.length());
        }
    }

    /// Set the length along the current rotation, keeping the start.
    pub fn set_length(&mut self, length: f64) {
        if self.is_finished() {
            return;
        }
        self.state = EdgeState::Drawing;
        self.end = endpoint_of(self.start, self.rotation(), length);
    }

    /// Replace both endpoints.
    pub(crate) fn set_points(&mut self, start: Point, end: Point) {
        self.start = round_point(start);
        self.end = round_point(end);
    }

    /// Freeze the edge. A zero-length edge stays unfinished and `false` is
    /// returned; it needs a length before it can join the outline.
    pub fn finish(&mut self) -> bool {
        if same_point(self.start, self.end) {
            return false;
        }
        self.state = EdgeState::Finished;
        self.hit = false;
        log::debug!(
            "Edge finished: length {:.1}, rotation {:.1}, start ({}, {}), end ({}, {})",
            self.length(),
            self.rotation(),
            self.start.x,
            self.start.y,
            self.end.x,
            self.end.y
        );
        true
    }

    /// Check this edge against `siblings`.
    ///
    /// Every intersection point counts as a collision unless it is one of
    /// the `drawable` (open) vertices, so continuing the chain from an open
    /// endpoint never collides but any other touch, crossing or overlap does.
    /// A shared stretch always collides, even one bounded by open vertices.
    pub fn hits(&self, siblings: &[Edge], drawable: &[Point]) -> bool {
        siblings
            .iter()
            .filter(|other| other.id != self.id)
            .any(|other| {
                let points = segment_intersection(self.as_line(), other.as_line());
                points.len() > 1
                    || points
                        .iter()
                        .any(|&point| !drawable.iter().any(|&d| same_point(d, point)))
            })
    }

    /// Recompute and store the collision flag.
    pub fn update_hit(&mut self, siblings: &[Edge], drawable: &[Point]) -> bool {
        self.hit = self.hits(siblings, drawable);
        self.hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(x0: f64, y0: f64, x1: f64, y1: f64) -> Edge {
        Edge::finished(Point::new(x0, y0), Point::new(x1, y1))
    }

    #[test]
    fn test_edge_lifecycle() {
        let mut e = Edge::new(Point::new(0.4, 0.0));
        assert_eq!(e.state(), EdgeState::Idle);
        assert_eq!(e.start(), Point::ZERO);
        assert_eq!(e.length(), 0.0);

        e.drawing(Point::new(100.2, 0.0), false);
        assert_eq!(e.state(), EdgeState::Drawing);
        assert_eq!(e.end(), Point::new(100.0, 0.0));

        assert!(e.finish());
        assert!(e.is_finished());

        // Finished edges ignore pointer updates.
        e.drawing(Point::new(50.0, 50.0), false);
        assert_eq!(e.end(), Point::new(100.0, 0.0));
    }

    #[test]
    fn test_zero_length_does_not_finish() {
        let mut e = Edge::new(Point::new(10.0, 10.0));
        assert!(!e.finish());
        assert_eq!(e.state(), EdgeState::Idle);
    }

    #[test]
    fn test_orthogonal_drawing() {
        let mut e = Edge::new(Point::ZERO);
        e.drawing(Point::new(30.0, 40.0), true);
        // 53 degrees is bottom-right, locked to 90 with the length kept.
        assert_eq!(e.end(), Point::new(0.0, 50.0));

        e.drawing(Point::new(-40.0, -30.0), true);
        assert_eq!(e.end(), Point::new(-50.0, 0.0));
    }

    #[test]
    fn test_set_length_keeps_start_and_rotation() {
        let mut e = Edge::new(Point::new(10.0, 10.0));
        e.drawing(Point::new(10.0, 30.0), false);
        e.set_length(100.0);
        assert_eq!(e.start(), Point::new(10.0, 10.0));
        assert_eq!(e.end(), Point::new(10.0, 110.0));
    }

    #[test]
    fn test_derived_attributes() {
        let e = edge(0.0, 0.0, 0.0, -20.5);
        assert_eq!(e.end(), Point::new(0.0, -21.0));
        assert_eq!(e.direction(), DirectionLabel::Top);
        assert_eq!(e.display_length(), 21);

        let e = edge(0.0, 0.0, 3.0, 4.0);
        assert!((e.length() - 5.0).abs() < f64::EPSILON);
        assert!(e.has_vertex(Point::new(3.0, 4.0)));
        assert!(!e.has_vertex(Point::new(3.0, 3.0)));
    }

    #[test]
    fn test_touching_open_endpoint_is_not_hit() {
        let a = edge(0.0, 0.0, 100.0, 0.0);
        let b = edge(100.0, 0.0, 100.0, 100.0);
        let drawable = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
        assert!(!b.hits(std::slice::from_ref(&a), &drawable));
    }

    #[test]
    fn test_crossing_is_hit_both_ways() {
        let a = edge(0.0, 0.0, 100.0, 0.0);
        let c = edge(50.0, -10.0, 50.0, 10.0);
        let drawable = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
        assert!(c.hits(std::slice::from_ref(&a), &drawable));
        assert!(a.hits(std::slice::from_ref(&c), &drawable));
    }

    #[test]
    fn test_touching_link_vertex_is_hit() {
        let a = edge(0.0, 0.0, 100.0, 0.0);
        let b = edge(100.0, 0.0, 100.0, 100.0);
        // (100, 0) joins two edges, so only the outer ends are open.
        let drawable = [Point::new(0.0, 0.0), Point::new(100.0, 100.0)];
        let mut probe = Edge::new(Point::new(50.0, 50.0));
        probe.drawing(Point::new(100.0, 0.0), false);
        assert!(probe.update_hit(&[a, b], &drawable));
        assert!(probe.is_hit());
    }

    #[test]
    fn test_collinear_backtrack_is_hit() {
        let a = edge(0.0, 0.0, 100.0, 0.0);
        let drawable = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
        let mut probe = Edge::new(Point::new(100.0, 0.0));
        probe.drawing(Point::new(60.0, 0.0), false);
        assert!(probe.update_hit(std::slice::from_ref(&a), &drawable));
    }

    #[test]
    fn test_retracing_between_open_ends_is_hit() {
        let a = edge(0.0, 0.0, 100.0, 0.0);
        let drawable = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
        let mut back = Edge::new(Point::new(100.0, 0.0));
        back.drawing(Point::new(0.0, 0.0), false);
        assert!(back.update_hit(std::slice::from_ref(&a), &drawable));

        // Carrying straight on from an open end only shares that end.
        let mut ahead = Edge::new(Point::new(100.0, 0.0));
        ahead.drawing(Point::new(200.0, 0.0), false);
        assert!(!ahead.update_hit(std::slice::from_ref(&a), &drawable));
    }

    #[test]
    fn test_self_is_skipped() {
        let a = edge(0.0, 0.0, 100.0, 0.0);
        assert!(!a.hits(std::slice::from_ref(&a), &[]));
    }
}
