//! End-to-end drawing sessions through the public API.

use cavity_core::geometry::{same_point, segment_intersection, signed_area};
use cavity_core::{
    ClickOutcome, DirectionLabel, DrawConfig, DrawError, DrawEvent, DrawState, Drawing, Edge,
    Rejection, SnapKind, Snapper,
};
use kurbo::{Line, Point};

const EPS: f64 = 1e-9;

/// An L-shaped outline, listed clockwise on screen.
fn l_shape() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(400.0, 0.0),
        Point::new(400.0, 200.0),
        Point::new(200.0, 200.0),
        Point::new(200.0, 400.0),
        Point::new(0.0, 400.0),
    ]
}

fn draw(drawing: &mut Drawing, points: &[Point]) -> Vec<ClickOutcome> {
    points
        .iter()
        .chain(points.first())
        .map(|&p| {
            drawing.on_pointer_move(p);
            drawing.on_pointer_click(p).unwrap()
        })
        .collect()
}

#[test]
fn test_draw_l_shape() {
    let mut drawing = Drawing::default();
    let outcomes = draw(&mut drawing, &l_shape());

    assert_eq!(outcomes[0], ClickOutcome::Started);
    assert!(outcomes[1..6].iter().all(|&o| o == ClickOutcome::Continued));
    assert_eq!(outcomes[6], ClickOutcome::Closed);
    assert_eq!(drawing.state(), DrawState::Done);

    let group = drawing.group();
    assert_eq!(group.len(), 6);
    assert!(group.drawable_points().is_empty());
    assert_eq!(group.link_points().len(), 6);
    assert_eq!(drawing.export_data().unwrap(), l_shape());

    let events = drawing.poll_events();
    assert_eq!(events.iter().filter(|e| **e == DrawEvent::Closed).count(), 1);
}

#[test]
fn test_annotations_sit_outside() {
    let mut drawing = Drawing::default();
    drawing.import_data(&l_shape()).unwrap();

    let polygon = drawing.group().polygon().to_vec();
    let annotations = drawing.group().annotations();
    assert_eq!(annotations.len(), polygon.len());
    assert!(signed_area(&polygon) > 0.0);

    // The top edge runs along y = 0 and the outline lies below it.
    let top = &annotations[0];
    assert!(top.line.p0.y < 0.0);
    assert!(top.label.position.y < top.line.p0.y);
    assert!((top.label.length - 400.0).abs() < EPS);
    assert_eq!(top.label.direction, DirectionLabel::Right);

    // The inner corner edge (400,200) -> (200,200) is labelled upright.
    let inner = &annotations[2];
    assert!(inner.line.p0.y > 200.0);
    assert_eq!(inner.label.direction, DirectionLabel::Left);
    assert_eq!(inner.label.label_angle, 180.0);
}

#[test]
fn test_export_import_roundtrip_keeps_degrees() {
    let mut first = Drawing::default();
    draw(&mut first, &l_shape());
    let exported = first.export_data().unwrap();

    let mut second = Drawing::new(DrawConfig::default());
    second.import_data(&exported).unwrap();
    assert!(second.group().is_closed());
    assert_eq!(second.state(), DrawState::Done);

    for &p in &exported {
        assert_eq!(first.group().degree_of(p), second.group().degree_of(p));
    }
    assert_eq!(second.export_data().unwrap(), exported);
}

#[test]
fn test_import_mid_session_resets() {
    let mut drawing = Drawing::default();
    drawing.on_pointer_click(Point::new(0.0, 0.0)).unwrap();
    drawing.on_pointer_click(Point::new(50.0, 0.0)).unwrap();
    drawing.poll_events();

    drawing.import_data(&l_shape()).unwrap();
    assert!(drawing.current_edge().is_none());
    assert_eq!(drawing.group().len(), 6);

    // Undo goes back to the empty pre-import state, not the old chain.
    assert_eq!(drawing.undo(), Ok(true));
    assert!(drawing.group().is_empty());
    assert_eq!(drawing.state(), DrawState::Init);
}

#[test]
fn test_undo_undo_redo() {
    let mut drawing = Drawing::default();
    for p in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)] {
        drawing.on_pointer_click(Point::new(p.0, p.1)).unwrap();
    }
    assert_eq!(drawing.group().len(), 3);

    drawing.undo().unwrap();
    drawing.undo().unwrap();
    drawing.redo().unwrap();

    let edges: Vec<Line> = drawing.group().snapshot();
    assert_eq!(
        edges,
        vec![
            Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0)),
            Line::new(Point::new(100.0, 0.0), Point::new(100.0, 100.0)),
        ]
    );
    assert_eq!(drawing.state(), DrawState::Idle);

    // Continuing from the open end drops the redo branch.
    drawing.on_pointer_click(Point::new(100.0, 100.0)).unwrap();
    drawing.on_pointer_click(Point::new(0.0, 100.0)).unwrap();
    assert!(!drawing.history_status().can_redo);
}

#[test]
fn test_modify_edge_keeps_outline_connected() {
    let mut drawing = Drawing::default();
    drawing.import_data(&l_shape()).unwrap();
    let edge = drawing.group().edges()[1].clone();
    assert_eq!(
        edge.as_line(),
        Line::new(Point::new(400.0, 0.0), Point::new(400.0, 200.0))
    );

    drawing.select_edge(Some(edge.id())).unwrap();
    drawing.modify_edge(edge.id(), 300.0).unwrap();

    let group = drawing.group();
    assert!(group.is_closed());
    assert_eq!(drawing.state(), DrawState::Done);
    assert_eq!(group.selected(), None);
    let resized = group.edge(edge.id()).unwrap();
    assert!((resized.length() - 300.0).abs() < EPS);
    assert!(group.vertices().contains(&Point::new(400.0, -50.0)));
    assert!(group.vertices().contains(&Point::new(400.0, 250.0)));
    for &v in group.vertices() {
        assert_eq!(group.degree_of(v), 2);
    }

    drawing.undo().unwrap();
    assert_eq!(drawing.export_data().unwrap(), l_shape());
}

#[test]
fn test_rejections_leave_state_untouched() {
    let mut drawing = Drawing::default();
    for p in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)] {
        drawing.on_pointer_click(Point::new(p.0, p.1)).unwrap();
    }
    let before = drawing.group().snapshot();

    // Backtracking over the previous edge.
    drawing.on_pointer_move(Point::new(100.0, 40.0));
    assert_eq!(
        drawing.on_pointer_click(Point::new(100.0, 40.0)),
        Err(DrawError::Rejected(Rejection::Overlapping))
    );
    assert_eq!(drawing.group().snapshot(), before);
    assert_eq!(drawing.state(), DrawState::Drawing);

    assert_eq!(
        drawing.export_data(),
        Err(DrawError::Rejected(Rejection::NotClosed))
    );
    assert!(
        drawing
            .poll_events()
            .contains(&DrawEvent::Rejected(Rejection::Overlapping))
    );
}

#[test]
fn test_snap_overlap_beats_guides() {
    let mut snapper = Snapper::new(10.0);
    for p in [(300.0, 104.0), (95.0, 400.0), (102.0, 101.0)] {
        snapper.add_target_point(Point::new(p.0, p.1));
    }
    let result = snapper.resolve(Point::new(100.0, 100.0));
    assert_eq!(result.kind, SnapKind::Overlap);
    assert_eq!(result.point, Some(Point::new(102.0, 101.0)));
}

#[test]
fn test_shared_drawable_endpoint_is_not_a_collision() {
    let a = Edge::finished(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
    let b = Edge::finished(Point::new(100.0, 0.0), Point::new(100.0, 100.0));
    let c = Edge::finished(Point::new(50.0, -10.0), Point::new(50.0, 10.0));
    let drawable = [
        Point::new(0.0, 0.0),
        Point::new(100.0, 100.0),
        Point::new(100.0, 0.0),
    ];

    assert!(!b.hits(std::slice::from_ref(&a), &drawable));
    assert!(c.hits(std::slice::from_ref(&a), &drawable));
    assert!(a.hits(std::slice::from_ref(&c), &drawable));

    let crossing = segment_intersection(a.as_line(), c.as_line());
    assert_eq!(crossing.len(), 1);
    assert!(same_point(crossing[0], Point::new(50.0, 0.0)));
}
