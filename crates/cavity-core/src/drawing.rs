//! Drawing state machine: turns pointer input into edges.

use crate::annotation::AngleGuide;
use crate::config::DrawConfig;
use crate::edge::{Edge, EdgeId};
use crate::error::{DrawError, DrawResult, Rejection};
use crate::group::EdgeGroup;
use crate::history::HistoryStatus;
use crate::snap::{SnapResult, Snapper};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Phase of the drawing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawState {
    /// Nothing drawn yet; the first click may land anywhere.
    #[default]
    Init,
    /// Waiting for a click on an open end.
    Idle,
    /// An edge follows the pointer.
    Drawing,
    /// The outline is closed.
    Done,
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A new chain was started.
    Started,
    /// The current edge was finished and the next one started at its end.
    Continued,
    /// The current edge closed the outline.
    Closed,
    /// Nothing happened.
    Ignored,
}

/// Notifications for the UI layer, drained with [`Drawing::poll_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    HistoryChanged { can_undo: bool, can_redo: bool },
    Closed,
    Rejected(Rejection),
    OrthogonalChanged(bool),
    ShowAngleChanged(bool),
}

/// A cavity bottom drawing session.
#[derive(Debug, Clone)]
pub struct Drawing {
    config: DrawConfig,
    state: DrawState,
    snapper: Snapper,
    group: EdgeGroup,
    /// The edge following the pointer, if any.
    current: Option<Edge>,
    angle_guide: Option<AngleGuide>,
    events: Vec<DrawEvent>,
    /// Last history status reported through events.
    last_history: HistoryStatus,
}

impl Default for Drawing {
    fn default() -> Self {
        Self::new(DrawConfig::default())
    }
}

impl Drawing {
    pub fn new(config: DrawConfig) -> Self {
        Self {
            snapper: Snapper::new(config.snap_threshold),
            group: EdgeGroup::new(&config),
            config,
            state: DrawState::Init,
            current: None,
            angle_guide: None,
            events: Vec::new(),
            last_history: HistoryStatus::default(),
        }
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    pub fn group(&self) -> &EdgeGroup {
        &self.group
    }

    pub fn snapper(&self) -> &Snapper {
        &self.snapper
    }

    /// The edge currently following the pointer.
    pub fn current_edge(&self) -> Option<&Edge> {
        self.current.as_ref()
    }

    /// Angle guide of the current edge, while it has a length and angles
    /// are shown.
    pub fn angle_guide(&self) -> Option<&AngleGuide> {
        self.angle_guide.as_ref()
    }

    pub fn is_orthogonal(&self) -> bool {
        self.config.orthogonal
    }

    pub fn show_angle(&self) -> bool {
        self.config.show_angle
    }

    pub fn history_status(&self) -> HistoryStatus {
        self.group.history_status()
    }

    /// Drain pending events.
    pub fn poll_events(&mut self) -> Vec<DrawEvent> {
        std::mem::take(&mut self.events)
    }

    /// Resolve the pointer and let the current edge follow it.
    pub fn on_pointer_move(&mut self, point: Point) -> SnapResult {
        let snap = self.snapper.resolve(point);
        if self.state == DrawState::Drawing {
            let cursor = self.snapper.cursor_point(point);
            self.follow(cursor);
        }
        snap
    }

    /// Handle a click: start a chain, continue it, or close the outline.
    pub fn on_pointer_click(&mut self, point: Point) -> DrawResult<ClickOutcome> {
        let cursor = self.snapper.cursor_point(point);

        if self.group.is_empty() {
            self.snapper.clear_target_points();
        }

        match self.state {
            DrawState::Done => Ok(ClickOutcome::Ignored),
            DrawState::Init => {
                self.snapper.add_target_point(cursor);
                self.start_edge(cursor);
                Ok(ClickOutcome::Started)
            }
            DrawState::Idle => {
                if !self.group.is_drawable_point(cursor) {
                    return self.reject(Rejection::NotDrawablePoint);
                }
                self.start_edge(cursor);
                Ok(ClickOutcome::Started)
            }
            DrawState::Drawing => {
                self.follow(cursor);
                self.finish_current()
            }
        }
    }

    /// Set the length of the current edge along its rotation and finish it
    /// as a click would.
    pub fn set_current_length(&mut self, length: f64) -> DrawResult<ClickOutcome> {
        if !length.is_finite() || length <= 0.0 {
            return self.reject(Rejection::InvalidLength(length));
        }
        if self.state != DrawState::Drawing {
            return Ok(ClickOutcome::Ignored);
        }
        let Some(edge) = self.current.as_mut() else {
            return Ok(ClickOutcome::Ignored);
        };
        edge.set_length(length);
        self.finish_current()
    }

    /// Discard the edge being drawn.
    pub fn on_abort(&mut self) {
        if self.state != DrawState::Drawing {
            return;
        }
        self.discard_current();
        self.state = if self.group.is_empty() {
            DrawState::Init
        } else {
            DrawState::Idle
        };
        self.sync_snapper();
        log::debug!("Drawing aborted, {} edges kept", self.group.len());
    }

    /// Step back one snapshot. Returns `false` if there was nothing to undo.
    ///
    /// Undoing the first edge goes back to `Init` but keeps the redo stack,
    /// so the edge can be brought back. Only [`Drawing::reset`] drops history.
    pub fn undo(&mut self) -> DrawResult<bool> {
        self.discard_current();
        let was_closed = self.group.is_closed();
        let result = self.group.undo();
        self.settle(was_closed);
        result
    }

    /// Step forward one snapshot. Returns `false` if there was nothing to
    /// redo.
    pub fn redo(&mut self) -> DrawResult<bool> {
        self.discard_current();
        let was_closed = self.group.is_closed();
        let result = self.group.redo();
        self.settle(was_closed);
        result
    }

    /// Drop everything, including history.
    pub fn reset(&mut self) {
        self.discard_current();
        self.group.clear_history();
        self.group.clear();
        self.snapper.clear_target_points();
        self.state = DrawState::Init;
        self.emit_history();
        log::info!("Drawing reset");
    }

    /// Replace the session with the closed outline through `points`.
    ///
    /// The outline is built on a fresh group whose only undo entry is the
    /// empty drawing. The current session is kept if the import fails.
    pub fn import_data(&mut self, points: &[Point]) -> DrawResult<()> {
        let mut group = EdgeGroup::new(&self.config);
        if let Err(err) = group.import_data(points) {
            return self.fail(err);
        }
        self.discard_current();
        self.group = group;
        self.settle(false);
        Ok(())
    }

    /// Ordered vertices of the closed outline.
    pub fn export_data(&self) -> DrawResult<Vec<Point>> {
        self.group.export_data()
    }

    /// Change the length of an edge of the closed outline.
    pub fn modify_edge(&mut self, id: EdgeId, length: f64) -> DrawResult<()> {
        if self.state != DrawState::Done {
            return self.fail(Rejection::NotClosed.into());
        }
        if let Err(err) = self.group.modify_edge(id, length) {
            return self.fail(err);
        }
        self.settle(true);
        Ok(())
    }

    /// Hover an edge of the closed outline, or clear the hover.
    pub fn hover_edge(&mut self, id: Option<EdgeId>) -> DrawResult<()> {
        self.group.set_hovered(id)
    }

    /// Select an edge of the closed outline, or clear the selection.
    pub fn select_edge(&mut self, id: Option<EdgeId>) -> DrawResult<()> {
        self.group.set_selected(id)
    }

    pub fn toggle_orthogonal(&mut self) -> bool {
        self.config.orthogonal = !self.config.orthogonal;
        self.events.push(DrawEvent::OrthogonalChanged(self.config.orthogonal));
        self.config.orthogonal
    }

    pub fn toggle_show_angle(&mut self) -> bool {
        self.config.show_angle = !self.config.show_angle;
        self.refresh_angle_guide();
        self.events.push(DrawEvent::ShowAngleChanged(self.config.show_angle));
        self.config.show_angle
    }

    fn start_edge(&mut self, start: Point) {
        self.current = Some(Edge::new(start));
        self.angle_guide = None;
        self.state = DrawState::Drawing;
    }

    fn follow(&mut self, cursor: Point) {
        if let Some(edge) = self.current.as_mut() {
            edge.drawing(cursor, self.config.orthogonal);
            edge.update_hit(self.group.edges(), self.group.drawable_points());
        }
        self.refresh_angle_guide();
    }

    fn finish_current(&mut self) -> DrawResult<ClickOutcome> {
        let Some(edge) = self.current.as_mut() else {
            return Ok(ClickOutcome::Ignored);
        };
        if edge.update_hit(self.group.edges(), self.group.drawable_points()) {
            return self.reject(Rejection::Overlapping);
        }
        if !edge.finish() {
            return Ok(ClickOutcome::Ignored);
        }

        let Some(edge) = self.current.take() else {
            return Ok(ClickOutcome::Ignored);
        };
        let (start, end) = (edge.start(), edge.end());
        self.angle_guide = None;

        if let Err(err) = self.group.push(edge) {
            // The group is unchanged; keep drawing the same edge.
            self.start_edge(start);
            self.follow(end);
            return self.fail(err);
        }
        self.settle(false);

        if self.state == DrawState::Done {
            Ok(ClickOutcome::Closed)
        } else {
            self.start_edge(end);
            Ok(ClickOutcome::Continued)
        }
    }

    fn discard_current(&mut self) {
        self.current = None;
        self.angle_guide = None;
    }

    /// Bring state, snap targets and events in line with the group after a
    /// structural change.
    fn settle(&mut self, was_closed: bool) {
        self.state = if self.group.is_empty() {
            DrawState::Init
        } else if self.group.is_closed() {
            DrawState::Done
        } else {
            DrawState::Idle
        };
        if self.group.is_closed() && !was_closed {
            self.events.push(DrawEvent::Closed);
        }
        self.sync_snapper();
        self.emit_history();
    }

    fn sync_snapper(&mut self) {
        self.snapper.clear_target_points();
        if self.group.is_closed() {
            return;
        }
        for &vertex in self.group.vertices() {
            self.snapper.add_target_point(vertex);
        }
    }

    fn emit_history(&mut self) {
        let status = self.group.history_status();
        if status != self.last_history {
            self.last_history = status;
            self.events.push(DrawEvent::HistoryChanged {
                can_undo: status.can_undo,
                can_redo: status.can_redo,
            });
        }
    }

    fn refresh_angle_guide(&mut self) {
        self.angle_guide = match &self.current {
            Some(edge) if self.config.show_angle && edge.length() > 0.0 => {
                Some(AngleGuide::for_segment(edge.start(), edge.end()))
            }
            _ => None,
        };
    }

    fn reject<T>(&mut self, rejection: Rejection) -> DrawResult<T> {
        self.fail(rejection.into())
    }

    /// Report an error, queueing an event for user-facing rejections.
    fn fail<T>(&mut self, err: DrawError) -> DrawResult<T> {
        if let DrawError::Rejected(rejection) = err {
            log::warn!("Rejected: {}", rejection);
            self.events.push(DrawEvent::Rejected(rejection));
        }
        Err(err)
    }
}
