//! Segment-segment intersection via orientation tests.

use super::{VertexKey, round_point};
use kurbo::{Line, Point};

/// Orientation of `pk` relative to the directed segment `pi -> pj`.
fn direction(pi: Point, pj: Point, pk: Point) -> f64 {
    (pk - pi).cross(pj - pi)
}

/// Whether `pk`, known to be collinear with `pi -> pj`, lies within the
/// segment's bounding box.
fn on_segment(pi: Point, pj: Point, pk: Point) -> bool {
    pi.x.min(pj.x) <= pk.x
        && pk.x <= pi.x.max(pj.x)
        && pi.y.min(pj.y) <= pk.y
        && pk.y <= pi.y.max(pj.y)
}

fn sorted_unique(points: Vec<Point>) -> Vec<Point> {
    let mut keys: Vec<VertexKey> = points.into_iter().map(VertexKey::of).collect();
    keys.sort();
    keys.dedup();
    keys.into_iter().map(VertexKey::to_point).collect()
}

/// Intersect two segments.
///
/// Returns the crossing point for a proper crossing, the shared point when
/// the segments only touch (endpoints included), the two ends of the shared
/// stretch for collinear overlapping segments, and nothing otherwise. All
/// points are rounded to comparison precision.
pub fn segment_intersection(a: Line, b: Line) -> Vec<Point> {
    let (p1, p2) = (a.p0, a.p1);
    let (p3, p4) = (b.p0, b.p1);

    let d1 = direction(p3, p4, p1);
    let d2 = direction(p3, p4, p2);
    let d3 = direction(p1, p2, p3);
    let d4 = direction(p1, p2, p4);

    let straddles_b = (d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0);
    let straddles_a = (d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0);

    if straddles_a && straddles_b {
        let r = p2 - p1;
        let s = p4 - p3;
        let t = (p3 - p1).cross(s) / r.cross(s);
        return vec![round_point(p1 + r * t)];
    }

    if d1 == 0.0 && d2 == 0.0 && d3 == 0.0 && d4 == 0.0 {
        // Collinear (or degenerate): the overlap is bridged by whichever
        // endpoints lie on both segments.
        let shared: Vec<Point> = [p1, p2, p3, p4]
            .into_iter()
            .filter(|&p| on_segment(p1, p2, p) && on_segment(p3, p4, p))
            .collect();
        let unique = sorted_unique(shared);
        return match unique.as_slice() {
            [] => Vec::new(),
            [only] => vec![*only],
            [first, .., last] => vec![*first, *last],
        };
    }

    let mut touches = Vec::new();
    if d1 == 0.0 && on_segment(p3, p4, p1) {
        touches.push(p1);
    }
    if d2 == 0.0 && on_segment(p3, p4, p2) {
        touches.push(p2);
    }
    if d3 == 0.0 && on_segment(p1, p2, p3) {
        touches.push(p3);
    }
    if d4 == 0.0 && on_segment(p1, p2, p4) {
        touches.push(p4);
    }
    sorted_unique(touches)
}
