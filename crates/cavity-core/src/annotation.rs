//! Dimension annotations and angle guides.
//!
//! These are pure outputs for the rendering layer: offset dimension lines
//! with end ticks and length labels for a closed outline or an arc, and the
//! angle guide shown next to the edge being drawn.

use crate::config::DrawConfig;
use crate::geometry::{
    DirectionLabel, angle_between, endpoint_of, line_arc, rotation_of, signed_area,
};
use kurbo::{Line, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Sample count of the angle guide arc.
const GUIDE_ARC_POINTS: usize = 50;

/// Horizontal nudge of the angle label, in screen pixels.
const GUIDE_LABEL_OFFSET: f64 = 40.0;

/// Sizes used to lay out annotations, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotationStyle {
    /// Gap between an edge and its dimension line.
    pub offset: f64,
    /// Stroke width of the edge itself.
    pub stroke_width: f64,
    /// Extra gap between the dimension line and its label.
    pub label_gap: f64,
    /// Half length of the ticks at both ends of a dimension line.
    pub tick_half_length: f64,
}

impl AnnotationStyle {
    pub fn from_config(config: &DrawConfig) -> Self {
        Self {
            offset: config.convert_size(6.0),
            stroke_width: config.convert_size(config.line_width),
            label_gap: config.convert_size(10.0),
            tick_half_length: config.convert_size(6.0),
        }
    }

    fn effective_offset(&self) -> f64 {
        self.offset + self.stroke_width / 2.0
    }
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self::from_config(&DrawConfig::default())
    }
}

/// Length label of one dimension line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationLabel {
    /// Label center.
    pub position: Point,
    /// Length of the annotated edge.
    pub length: f64,
    /// Direction of the dimension line.
    pub direction: DirectionLabel,
    /// Rotation of the annotated edge in degrees.
    pub angle: f64,
    /// Additional text rotation that keeps the label upright.
    pub label_angle: f64,
}

/// Dimension annotation of a straight edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeAnnotation {
    /// The edge shifted outward.
    pub line: Line,
    /// Tick across the start of `line`.
    pub start_tick: Line,
    /// Tick across the end of `line`.
    pub end_tick: Line,
    pub label: AnnotationLabel,
}

/// Dimension annotation of an arc given as a polyline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArcAnnotation {
    /// Offset sub-segment endpoints, two per non-degenerate sub-segment.
    pub points: Vec<Point>,
    /// Total length label at the arc-length midpoint.
    pub label: Option<AnnotationLabel>,
}

/// Ticks perpendicular to `start -> end` at both ends.
fn perpendicular_ticks(start: Point, end: Point, half_length: f64) -> (Line, Line) {
    let delta = end - start;
    let length = delta.hypot();
    if length == 0.0 {
        return (Line::new(start, start), Line::new(end, end));
    }
    let normal = Vec2::new(-delta.y, delta.x) / length * half_length;
    (
        Line::new(start - normal, start + normal),
        Line::new(end - normal, end + normal),
    )
}

/// Annotate the edge `a -> b` of an outline with the given winding.
pub fn annotate_edge(a: Point, b: Point, is_ccw: bool, style: &AnnotationStyle) -> EdgeAnnotation {
    let delta = b - a;
    let length = delta.hypot();

    let normal = if length == 0.0 {
        Vec2::ZERO
    } else if is_ccw {
        Vec2::new(delta.y, -delta.x) / length
    } else {
        Vec2::new(-delta.y, delta.x) / length
    };

    let shift = normal * style.effective_offset();
    let line = Line::new(a + shift, b + shift);

    let label_shift = normal * (style.effective_offset() + style.label_gap);
    let position = (a + label_shift).midpoint(b + label_shift);

    let direction = DirectionLabel::of(rotation_of(line.p0, line.p1));
    let (start_tick, end_tick) = perpendicular_ticks(line.p0, line.p1, style.tick_half_length);

    EdgeAnnotation {
        line,
        start_tick,
        end_tick,
        label: AnnotationLabel {
            position,
            length,
            direction,
            angle: delta.y.atan2(delta.x).to_degrees(),
            label_angle: direction.label_rotation(),
        },
    }
}

/// Annotate every edge of a closed outline given by its ordered vertices.
/// The winding picks the outward side.
pub fn annotate_polygon(vertices: &[Point], style: &AnnotationStyle) -> Vec<EdgeAnnotation> {
    let is_ccw = signed_area(vertices) > 0.0;
    let n = vertices.len();
    (0..n)
        .map(|i| annotate_edge(vertices[i], vertices[(i + 1) % n], is_ccw, style))
        .collect()
}

/// Annotate an arc sampled as a polyline.
pub fn annotate_arc(points: &[Point], style: &AnnotationStyle) -> ArcAnnotation {
    if points.len() < 2 {
        return ArcAnnotation::default();
    }

    let offset = style.effective_offset();
    let segments: Vec<(Point, Point, f64)> = points
        .windows(2)
        .map(|w| (w[0], w[1], w[0].distance(w[1])))
        .filter(|&(_, _, len)| len > 0.0)
        .collect();

    let mut annotation = ArcAnnotation::default();
    for &(a, b, len) in &segments {
        let normal = Vec2::new(b.y - a.y, -(b.x - a.x)) / len * offset;
        annotation.points.push(a + normal);
        annotation.points.push(b + normal);
    }

    let total: f64 = segments.iter().map(|s| s.2).sum();
    let mut remaining = total / 2.0;
    let mut index = 0;
    while index < segments.len() && remaining > segments[index].2 {
        remaining -= segments[index].2;
        index += 1;
    }
    let Some(&(a, b, len)) = segments.get(index.min(segments.len().saturating_sub(1))) else {
        return annotation;
    };

    let position = a.lerp(b, (remaining / len).min(1.0));
    let angle = (b.y - a.y).atan2(b.x - a.x).to_degrees();
    annotation.label = Some(AnnotationLabel {
        position,
        length: total,
        direction: DirectionLabel::of(angle),
        angle,
        label_angle: 0.0,
    });
    annotation
}

/// Guide comparing the edge being drawn with its nearest axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleGuide {
    /// Axis-aligned reference segment from the edge start, same length.
    pub reference: Line,
    /// Whether the edge lies exactly on the reference axis.
    pub parallel: bool,
    /// Angle between edge and reference in degrees.
    pub angle: f64,
    /// Arc from the edge end to the reference end.
    pub arc: Vec<Point>,
    /// Screen offset of the angle label.
    pub label_offset: Vec2,
}

/// Reference axis for a rotation and whether the rotation lies on it.
fn reference_axis(rotation: f64) -> (f64, bool) {
    if rotation == 0.0 {
        (0.0, true)
    } else if rotation > 0.0 && rotation < 90.0 {
        (0.0, false)
    } else if rotation == 90.0 {
        (90.0, true)
    } else if rotation > 90.0 && rotation < 180.0 {
        (180.0, false)
    } else if rotation == 180.0 {
        (180.0, true)
    } else if rotation < 0.0 && rotation > -90.0 {
        (0.0, false)
    } else if rotation == -90.0 {
        (-90.0, true)
    } else if rotation < -90.0 && rotation > -180.0 {
        (180.0, false)
    } else {
        (0.0, false)
    }
}

impl AngleGuide {
    /// Build the guide for the segment `start -> end`.
    pub fn for_segment(start: Point, end: Point) -> Self {
        let rotation = rotation_of(start, end);
        let length = start.distance(end);
        let (axis, parallel) = reference_axis(rotation);

        let reference = Line::new(start, endpoint_of(start, axis, length));
        let edge = Line::new(start, end);
        let direction = DirectionLabel::of(rotation);

        let label_offset = if direction.has_right() {
            Vec2::new(GUIDE_LABEL_OFFSET, 0.0)
        } else if direction.has_left() {
            Vec2::new(-GUIDE_LABEL_OFFSET, 0.0)
        } else {
            Vec2::ZERO
        };

        Self {
            reference,
            parallel,
            angle: angle_between(edge, reference),
            arc: line_arc(end, reference.p1, GUIDE_ARC_POINTS, direction.arc_curvature()),
            label_offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn unit_style() -> AnnotationStyle {
        AnnotationStyle {
            offset: 4.0,
            stroke_width: 2.0,
            label_gap: 5.0,
            tick_half_length: 1.0,
        }
    }

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ]
    }

    #[test]
    fn test_style_from_config() {
        let style = AnnotationStyle::default();
        assert!((style.offset - 48.0).abs() < EPS);
        assert!((style.stroke_width - 80.0).abs() < EPS);
        assert!((style.label_gap - 80.0).abs() < EPS);
    }

    #[test]
    fn test_polygon_annotations_point_outward() {
        let vertices = square();
        assert!(signed_area(&vertices) > 0.0);
        let annotations = annotate_polygon(&vertices, &unit_style());
        assert_eq!(annotations.len(), 4);

        // First edge runs along y = 0; outward for this winding is -y.
        let first = &annotations[0];
        assert!((first.line.p0.y + 5.0).abs() < EPS);
        assert!((first.line.p1.y + 5.0).abs() < EPS);
        assert!((first.label.position.y + 10.0).abs() < EPS);
        assert!((first.label.position.x - 50.0).abs() < EPS);
        assert!((first.label.length - 100.0).abs() < EPS);
        assert_eq!(first.label.direction, DirectionLabel::Right);
        assert_eq!(first.label.label_angle, 0.0);
    }

    #[test]
    fn test_reversed_winding_flips_side() {
        let mut vertices = square();
        vertices.reverse();
        let annotations = annotate_polygon(&vertices, &unit_style());
        // Edge (0,100) -> (100,100) now comes first; outward is +y.
        let bottom = &annotations[0];
        assert_eq!(bottom.line.p0.x, 0.0);
        assert!((bottom.line.p0.y - 105.0).abs() < EPS);
        assert!((bottom.label.position.y - 110.0).abs() < EPS);
        assert_eq!(bottom.label.direction, DirectionLabel::Right);

        // Edge (100,0) -> (0,0) runs leftward and its label is flipped.
        let top = &annotations[2];
        assert!((top.line.p0.y + 5.0).abs() < EPS);
        assert_eq!(top.label.direction, DirectionLabel::Left);
        assert_eq!(top.label.label_angle, 180.0);
    }

    #[test]
    fn test_ticks_are_perpendicular() {
        let a = annotate_edge(Point::ZERO, Point::new(10.0, 0.0), true, &unit_style());
        assert!((a.start_tick.p0.x - a.line.p0.x).abs() < EPS);
        assert!(((a.start_tick.p0.y - a.start_tick.p1.y).abs() - 2.0).abs() < EPS);
        assert!((a.start_tick.p0.x - a.start_tick.p1.x).abs() < EPS);
        assert!((a.end_tick.p0.x - 10.0).abs() < EPS);
    }

    #[test]
    fn test_degenerate_edge_annotation() {
        let p = Point::new(5.0, 5.0);
        let a = annotate_edge(p, p, true, &unit_style());
        assert_eq!(a.line, Line::new(p, p));
        assert_eq!(a.start_tick, Line::new(p, p));
        assert_eq!(a.label.length, 0.0);
    }

    #[test]
    fn test_arc_annotation() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 30.0),
        ];
        let arc = annotate_arc(&points, &unit_style());
        assert_eq!(arc.points.len(), 4);
        let label = arc.label.unwrap();
        assert!((label.length - 40.0).abs() < EPS);
        // Midpoint at arc length 20 lies 10 into the vertical stretch.
        assert!((label.position.x - 10.0).abs() < EPS);
        assert!((label.position.y - 10.0).abs() < EPS);
        assert!((label.angle - 90.0).abs() < EPS);
    }

    #[test]
    fn test_arc_annotation_too_short() {
        assert_eq!(annotate_arc(&[Point::ZERO], &unit_style()), ArcAnnotation::default());
        let flat = annotate_arc(&[Point::ZERO, Point::ZERO], &unit_style());
        assert!(flat.points.is_empty());
        assert!(flat.label.is_none());
    }

    #[test]
    fn test_angle_guide_axis_aligned() {
        let guide = AngleGuide::for_segment(Point::ZERO, Point::new(0.0, 50.0));
        assert!(guide.parallel);
        assert_eq!(guide.reference.p1, Point::new(0.0, 50.0));
        assert!(guide.angle.abs() < EPS);
        assert_eq!(guide.label_offset, Vec2::ZERO);
    }

    #[test]
    fn test_angle_guide_oblique() {
        let guide = AngleGuide::for_segment(Point::ZERO, Point::new(30.0, 40.0));
        assert!(!guide.parallel);
        assert_eq!(guide.reference.p1, Point::new(50.0, 0.0));
        assert!((guide.angle - 53.130_102_354_155_98).abs() < 1e-6);
        assert_eq!(guide.arc.len(), GUIDE_ARC_POINTS);
        assert_eq!(guide.arc[0], Point::new(30.0, 40.0));
        assert_eq!(guide.label_offset, Vec2::new(GUIDE_LABEL_OFFSET, 0.0));

        let guide = AngleGuide::for_segment(Point::ZERO, Point::new(-30.0, -40.0));
        assert_eq!(guide.reference.p1, Point::new(-50.0, 0.0));
        assert_eq!(guide.label_offset, Vec2::new(-GUIDE_LABEL_OFFSET, 0.0));
    }
}
