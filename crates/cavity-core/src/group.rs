//! The set of finished edges and the outline graph derived from it.
//!
//! After every structural change the group recounts vertex degrees from
//! scratch. Degree-1 vertices are open ends a new edge may start from. Once
//! no open end remains the outline is closed: the edges are walked into one
//! cycle, reordered and oriented along it, and annotated.

use std::collections::HashMap;

use crate::annotation::{AnnotationStyle, EdgeAnnotation, annotate_polygon};
use crate::config::DrawConfig;
use crate::edge::{Edge, EdgeId, EdgeUiState};
use crate::error::{DrawError, DrawResult, Rejection};
use crate::geometry::{VertexKey, resize_from_center, same_point};
use crate::history::{History, HistoryStatus, Snapshot};
use kurbo::{Line, Point};

/// Finished edges plus the derived outline graph and its history.
#[derive(Debug, Clone)]
pub struct EdgeGroup {
    edges: Vec<Edge>,
    /// Every distinct vertex, in first-seen order.
    vertices: Vec<Point>,
    /// Vertices of degree 1.
    drawable_points: Vec<Point>,
    /// Vertices of degree 2 or more.
    link_points: Vec<Point>,
    closed: bool,
    /// Ordered outline vertices while closed.
    polygon: Vec<Point>,
    annotations: Vec<EdgeAnnotation>,
    hovered: Option<EdgeId>,
    selected: Option<EdgeId>,
    history: History,
    style: AnnotationStyle,
}

impl Default for EdgeGroup {
    fn default() -> Self {
        Self::new(&DrawConfig::default())
    }
}

impl EdgeGroup {
    pub fn new(config: &DrawConfig) -> Self {
        Self {
            edges: Vec::new(),
            vertices: Vec::new(),
            drawable_points: Vec::new(),
            link_points: Vec::new(),
            closed: false,
            polygon: Vec::new(),
            annotations: Vec::new(),
            hovered: None,
            selected: None,
            history: History::new(),
            style: AnnotationStyle::from_config(config),
        }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Get an edge by ID.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id() == id)
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn drawable_points(&self) -> &[Point] {
        &self.drawable_points
    }

    pub fn link_points(&self) -> &[Point] {
        &self.link_points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Ordered outline vertices; empty while open.
    pub fn polygon(&self) -> &[Point] {
        &self.polygon
    }

    /// One annotation per edge, in edge order; empty while open.
    pub fn annotations(&self) -> &[EdgeAnnotation] {
        &self.annotations
    }

    pub fn hovered(&self) -> Option<EdgeId> {
        self.hovered
    }

    pub fn selected(&self) -> Option<EdgeId> {
        self.selected
    }

    pub fn history_status(&self) -> HistoryStatus {
        self.history.status()
    }

    /// Number of edges touching `point`.
    pub fn degree_of(&self, point: Point) -> usize {
        self.edges
            .iter()
            .map(|e| {
                usize::from(same_point(e.start(), point)) + usize::from(same_point(e.end(), point))
            })
            .sum()
    }

    /// Whether a new edge may start at `point`. Any point qualifies while
    /// there are no open ends yet.
    pub fn is_drawable_point(&self, point: Point) -> bool {
        self.drawable_points.is_empty()
            || self.drawable_points.iter().any(|&p| same_point(p, point))
    }

    /// Current edges as endpoint pairs.
    pub fn snapshot(&self) -> Snapshot {
        self.edges.iter().map(Edge::as_line).collect()
    }

    fn record(&mut self, previous: &[Edge]) {
        self.history.save(previous.iter().map(Edge::as_line).collect());
    }

    /// Swap in `edges` and rebuild the graph, returning the edges they
    /// replaced.
    ///
    /// If the new edges close without forming one cycle, the previous edges
    /// are put back together with hover, selection and closure, and the
    /// error is returned.
    fn replace_edges(&mut self, edges: Vec<Edge>) -> DrawResult<Vec<Edge>> {
        let (hovered, selected, closed) = (self.hovered, self.selected, self.closed);
        let previous = std::mem::replace(&mut self.edges, edges);
        match self.rebuild() {
            Ok(()) => Ok(previous),
            Err(err) => {
                self.edges = previous;
                self.hovered = hovered;
                self.selected = selected;
                self.closed = closed;
                self.rebuild()?;
                Err(err)
            }
        }
    }

    /// Append a finished edge. Nothing changes if the result has no open
    /// ends but is not a single cycle.
    pub fn push(&mut self, edge: Edge) -> DrawResult<()> {
        let mut edges = self.edges.clone();
        edges.push(edge);
        let previous = self.replace_edges(edges)?;
        self.record(&previous);
        Ok(())
    }

    /// Remove the most recently added edge.
    pub fn pop(&mut self) -> DrawResult<Option<Edge>> {
        let mut edges = self.edges.clone();
        let Some(edge) = edges.pop() else {
            return Ok(None);
        };
        let previous = self.replace_edges(edges)?;
        self.record(&previous);
        Ok(Some(edge))
    }

    /// Drop every edge. History is left alone.
    pub fn clear(&mut self) {
        self.edges.clear();
        self.vertices.clear();
        self.drawable_points.clear();
        self.link_points.clear();
        self.open();
    }

    /// Drop the undo and redo stacks.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Replace all edges with finished edges built from `snapshot`. The
    /// group is left as it was if `snapshot` is not a valid outline.
    pub fn load(&mut self, snapshot: &[Line]) -> DrawResult<()> {
        let edges = snapshot
            .iter()
            .map(|line| Edge::finished(line.p0, line.p1))
            .collect();
        self.replace_edges(edges)?;
        self.hovered = None;
        self.selected = None;
        self.apply_ui_states();
        Ok(())
    }

    /// Restore the previous snapshot. Returns `false` if there was none.
    pub fn undo(&mut self) -> DrawResult<bool> {
        let Some(previous) = self.history.undo(self.snapshot()) else {
            return Ok(false);
        };
        if let Err(err) = self.load(&previous) {
            // Stepping forward again puts both stacks back.
            self.history.redo(previous);
            return Err(err);
        }
        Ok(true)
    }

    /// Re-apply the last undone snapshot. Returns `false` if there was none.
    pub fn redo(&mut self) -> DrawResult<bool> {
        let Some(next) = self.history.redo(self.snapshot()) else {
            return Ok(false);
        };
        if let Err(err) = self.load(&next) {
            self.history.undo(next);
            return Err(err);
        }
        Ok(true)
    }

    /// Replace the outline with the closed polygon through `points`.
    ///
    /// Consecutive points (wrapping last to first) become edges. History is
    /// restarted with the pre-import state as its only undo entry. An empty
    /// list empties the group. A failed import changes nothing.
    pub fn import_data(&mut self, points: &[Point]) -> DrawResult<()> {
        Self::check_import(points)?;
        let n = points.len();

        if n == 0 {
            self.history.clear();
            self.clear();
            return Ok(());
        }

        let before = self.snapshot();
        let lines: Snapshot = (0..n)
            .map(|i| Line::new(points[i], points[(i + 1) % n]))
            .collect();
        self.load(&lines)?;
        self.history.clear();
        self.history.save(before);
        log::info!("Imported outline with {} vertices", n);
        Ok(())
    }

    /// Check that `points` describe an importable outline: empty, or at
    /// least three points with no two consecutive ones coinciding.
    pub fn check_import(points: &[Point]) -> DrawResult<()> {
        let n = points.len();
        if n == 1 || n == 2 {
            return Err(DrawError::InvalidImport(n));
        }
        if (0..n).any(|i| same_point(points[i], points[(i + 1) % n])) {
            return Err(Rejection::ZeroLength.into());
        }
        Ok(())
    }

    /// Ordered vertices of the closed outline, without a closing duplicate.
    pub fn export_data(&self) -> DrawResult<Vec<Point>> {
        if self.edges.is_empty() {
            return Ok(Vec::new());
        }
        if !self.closed {
            return Err(Rejection::NotClosed.into());
        }
        self.sort_polygon_points()
    }

    /// Walk the edge graph from the first edge's start until it returns.
    ///
    /// Fails with [`DrawError::CycleNotFound`] unless the edges form exactly
    /// one simple cycle that uses every edge.
    pub fn sort_polygon_points(&self) -> DrawResult<Vec<Point>> {
        let Some(first) = self.edges.first() else {
            return Ok(Vec::new());
        };

        let mut adjacency: HashMap<VertexKey, Vec<VertexKey>> = HashMap::new();
        for edge in &self.edges {
            let a = VertexKey::of(edge.start());
            let b = VertexKey::of(edge.end());
            adjacency.entry(a).or_default().push(b);
            adjacency.entry(b).or_default().push(a);
        }

        let start = VertexKey::of(first.start());
        let mut path = vec![start];
        let mut previous: Option<VertexKey> = None;
        let mut current = start;

        for _ in 0..self.edges.len() {
            let next = adjacency
                .get(&current)
                .and_then(|neighbors| neighbors.iter().copied().find(|&p| Some(p) != previous))
                .ok_or(DrawError::CycleNotFound)?;

            previous = Some(current);
            current = next;

            if current == start {
                if path.len() != self.edges.len() {
                    return Err(DrawError::CycleNotFound);
                }
                return Ok(path.into_iter().map(VertexKey::to_point).collect());
            }
            path.push(next);
        }

        Err(DrawError::CycleNotFound)
    }

    /// Resize a closed outline's edge around its midpoint and reconnect the
    /// neighbors that shared its old endpoints.
    ///
    /// A length that collapses any edge once rounded is rejected with
    /// [`Rejection::ZeroLength`] and leaves the outline untouched.
    pub fn modify_edge(&mut self, id: EdgeId, length: f64) -> DrawResult<()> {
        if !self.closed {
            return Err(Rejection::NotClosed.into());
        }
        if !length.is_finite() || length <= 0.0 {
            return Err(Rejection::InvalidLength(length).into());
        }
        let index = self
            .edges
            .iter()
            .position(|e| e.id() == id)
            .ok_or(DrawError::UnknownEdge(id))?;

        let mut edges = self.edges.clone();
        let (old_start, old_end) = (edges[index].start(), edges[index].end());
        let (new_start, new_end) = resize_from_center(old_start, old_end, length);
        edges[index].set_points(new_start, new_end);
        let (new_start, new_end) = (edges[index].start(), edges[index].end());

        for (i, edge) in edges.iter_mut().enumerate() {
            if i == index {
                continue;
            }
            let (start, end) = (edge.start(), edge.end());
            if same_point(start, old_start) {
                edge.set_points(new_start, end);
            } else if same_point(start, old_end) {
                edge.set_points(new_end, end);
            } else if same_point(end, old_start) {
                edge.set_points(start, new_start);
            } else if same_point(end, old_end) {
                edge.set_points(start, new_end);
            }
        }

        if edges.iter().any(|e| same_point(e.start(), e.end())) {
            return Err(Rejection::ZeroLength.into());
        }

        let previous = self.replace_edges(edges)?;
        self.record(&previous);
        log::debug!("Edge {} resized to {:.1}", id, length);
        self.hovered = None;
        self.selected = None;
        self.apply_ui_states();
        Ok(())
    }

    /// Mark an edge as hovered. Ignored while the outline is open.
    pub fn set_hovered(&mut self, id: Option<EdgeId>) -> DrawResult<()> {
        if !self.closed {
            return Ok(());
        }
        self.check_known(id)?;
        self.hovered = id;
        self.apply_ui_states();
        Ok(())
    }

    /// Mark an edge as selected. Ignored while the outline is open.
    pub fn set_selected(&mut self, id: Option<EdgeId>) -> DrawResult<()> {
        if !self.closed {
            return Ok(());
        }
        self.check_known(id)?;
        self.selected = id;
        self.apply_ui_states();
        Ok(())
    }

    fn check_known(&self, id: Option<EdgeId>) -> DrawResult<()> {
        match id {
            Some(id) if self.edge(id).is_none() => Err(DrawError::UnknownEdge(id)),
            _ => Ok(()),
        }
    }

    fn apply_ui_states(&mut self) {
        for edge in &mut self.edges {
            let ui_state = if Some(edge.id()) == self.selected {
                EdgeUiState::Selected
            } else if Some(edge.id()) == self.hovered {
                EdgeUiState::Hover
            } else {
                EdgeUiState::Normal
            };
            edge.set_ui_state(ui_state);
        }
    }

    /// Recount degrees and recompute open ends and closure.
    fn rebuild(&mut self) -> DrawResult<()> {
        let mut degrees: Vec<(VertexKey, usize)> = Vec::new();
        let mut slots: HashMap<VertexKey, usize> = HashMap::new();

        for edge in &self.edges {
            for key in [VertexKey::of(edge.start()), VertexKey::of(edge.end())] {
                match slots.get(&key) {
                    Some(&slot) => degrees[slot].1 += 1,
                    None => {
                        slots.insert(key, degrees.len());
                        degrees.push((key, 1));
                    }
                }
            }
        }

        self.vertices = degrees.iter().map(|(key, _)| key.to_point()).collect();
        self.drawable_points = degrees
            .iter()
            .filter(|(_, degree)| *degree == 1)
            .map(|(key, _)| key.to_point())
            .collect();
        self.link_points = degrees
            .iter()
            .filter(|(_, degree)| *degree >= 2)
            .map(|(key, _)| key.to_point())
            .collect();

        if !self.edges.is_empty() && self.drawable_points.is_empty() {
            self.close()
        } else {
            self.open();
            Ok(())
        }
    }

    fn close(&mut self) -> DrawResult<()> {
        let found = self
            .sort_polygon_points()
            .and_then(|polygon| self.traversal_order(&polygon).map(|order| (polygon, order)));
        let (polygon, order) = match found {
            Ok(found) => found,
            Err(err) => {
                log::error!(
                    "Outline has no open ends but {} edges do not form one cycle",
                    self.edges.len()
                );
                self.open();
                return Err(err);
            }
        };

        let n = polygon.len();
        let mut slots: Vec<Option<Edge>> =
            std::mem::take(&mut self.edges).into_iter().map(Some).collect();
        self.edges = order
            .into_iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                slots[slot].take().map(|mut edge| {
                    edge.set_points(polygon[i], polygon[(i + 1) % n]);
                    edge
                })
            })
            .collect();

        self.annotations = annotate_polygon(&polygon, &self.style);
        self.polygon = polygon;

        if !self.closed {
            log::info!("Outline closed with {} edges", n);
        }
        self.closed = true;
        self.apply_ui_states();
        Ok(())
    }

    /// For each consecutive pair of `polygon`, the index of the edge joining
    /// them.
    fn traversal_order(&self, polygon: &[Point]) -> DrawResult<Vec<usize>> {
        let n = polygon.len();
        let mut used = vec![false; self.edges.len()];
        let mut order = Vec::with_capacity(n);

        for i in 0..n {
            let (a, b) = (polygon[i], polygon[(i + 1) % n]);
            let slot = self
                .edges
                .iter()
                .enumerate()
                .position(|(j, edge)| {
                    !used[j]
                        && ((same_point(edge.start(), a) && same_point(edge.end(), b))
                            || (same_point(edge.start(), b) && same_point(edge.end(), a)))
                })
                .ok_or(DrawError::CycleNotFound)?;
            used[slot] = true;
            order.push(slot);
        }
        Ok(order)
    }

    fn open(&mut self) {
        self.closed = false;
        self.polygon.clear();
        self.annotations.clear();
        self.hovered = None;
        self.selected = None;
        self.apply_ui_states();
    }
}
