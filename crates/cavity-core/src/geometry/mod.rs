//! Point and segment math shared by snapping, edges and the polygon graph.
//!
//! Every coordinate that has to agree between two edges (shared vertices,
//! intersection points, graph keys) is rounded to whole units first, so
//! equality checks here are exact.

mod direction;
mod intersect;

pub use direction::DirectionLabel;
pub use intersect::segment_intersection;

use kurbo::{Line, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Hashable vertex key at comparison precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexKey(pub i64, pub i64);

impl VertexKey {
    /// Key for a point after rounding it to comparison precision.
    pub fn of(point: Point) -> Self {
        let p = round_point(point);
        Self(p.x as i64, p.y as i64)
    }

    /// The vertex this key stands for.
    pub fn to_point(self) -> Point {
        Point::new(self.0 as f64, self.1 as f64)
    }
}

/// Round a point to comparison precision.
pub fn round_point(point: Point) -> Point {
    Point::new(point.x.round(), point.y.round())
}

/// Check two points for equality at comparison precision.
pub fn same_point(a: Point, b: Point) -> bool {
    VertexKey::of(a) == VertexKey::of(b)
}

/// Point reached by walking `length` from `origin` at `angle_degrees`.
/// The result is rounded to comparison precision.
pub fn endpoint_of(origin: Point, angle_degrees: f64, length: f64) -> Point {
    let radians = angle_degrees.to_radians();
    round_point(Point::new(
        origin.x + length * radians.cos(),
        origin.y + length * radians.sin(),
    ))
}

/// Rotation of the segment `start -> end` in degrees, in (-180, 180].
pub fn rotation_of(start: Point, end: Point) -> f64 {
    let dy = end.y - start.y;
    let dx = end.x - start.x;
    dy.atan2(dx).to_degrees()
}

/// Twice the signed area of a polygon (shoelace sum).
///
/// Positive means counter-clockwise winding in a y-up frame. Fewer than
/// three vertices yield zero.
pub fn signed_area(vertices: &[Point]) -> f64 {
    let n = vertices.len();
    let mut area = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        area += a.x * b.y - b.x * a.y;
    }
    area
}

/// Resize a segment to `new_length`, keeping its midpoint and direction.
///
/// A zero-length input has no direction; the new length is then split
/// evenly to the left and right of the point along the x axis.
pub fn resize_from_center(start: Point, end: Point, new_length: f64) -> (Point, Point) {
    let mid = start.midpoint(end);
    let half = new_length / 2.0;
    let delta = end - start;
    let length = delta.hypot();

    let dir = if length < f64::EPSILON {
        Vec2::new(1.0, 0.0)
    } else {
        delta / length
    };

    (mid - dir * half, mid + dir * half)
}

/// Angle between two segments in degrees, in [0, 180].
/// Degenerate segments have no direction and give 0.
pub fn angle_between(a: Line, b: Line) -> f64 {
    let v1 = a.p1 - a.p0;
    let v2 = b.p1 - b.p0;
    let m1 = v1.hypot();
    let m2 = v2.hypot();
    if m1 < f64::EPSILON || m2 < f64::EPSILON {
        return 0.0;
    }
    let cos_theta = (v1.dot(v2) / (m1 * m2)).clamp(-1.0, 1.0);
    cos_theta.acos().to_degrees()
}

/// Sample a quadratic arc from `start` to `end` bulging sideways by
/// `curvature` times the chord.
pub fn line_arc(start: Point, end: Point, num_points: usize, curvature: f64) -> Vec<Point> {
    let num_points = num_points.max(2);
    let mid = start.midpoint(end);
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let peak = Point::new(mid.x - dy * curvature, mid.y + dx * curvature);

    (0..num_points)
        .map(|i| {
            let t = i as f64 / (num_points - 1) as f64;
            let u = 1.0 - t;
            Point::new(
                u * u * start.x + 2.0 * u * t * peak.x + t * t * end.x,
                u * u * start.y + 2.0 * u * t * peak.y + t * t * end.y,
            )
        })
        .collect()
}
