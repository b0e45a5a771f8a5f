//! Replays a script against a drawing session.

use cavity_core::{DrawError, DrawState, Drawing};
use kurbo::{Line, Point};
use serde::{Deserialize, Serialize};

use crate::script::{Script, SessionEvent};
use crate::{AppError, AppResult};

/// A refused step of the script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedStep {
    /// Index of the event in the script.
    pub step: usize,
    pub message: String,
}

/// Outcome of a replayed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub state: DrawState,
    pub closed: bool,
    /// Ordered outline vertices; empty unless closed.
    pub points: Vec<Point>,
    /// Every edge, open or closed, as an endpoint pair.
    pub edges: Vec<Line>,
    /// Outlines captured by `export` events, in order.
    pub exports: Vec<Vec<Point>>,
    pub rejections: Vec<RejectedStep>,
}

/// Replay every event of `script` on a fresh session.
///
/// Refused actions are recorded and the replay carries on. A broken outline
/// graph stops the replay.
pub fn replay(script: &Script) -> AppResult<Report> {
    let mut drawing = Drawing::new(script.config.clone());
    let mut exports = Vec::new();
    let mut rejections = Vec::new();

    for (step, event) in script.events.iter().enumerate() {
        match apply(&mut drawing, event, &mut exports) {
            Ok(()) => {}
            Err(AppError::Draw(DrawError::CycleNotFound)) => {
                return Err(AppError::Draw(DrawError::CycleNotFound));
            }
            Err(err @ (AppError::Draw(_) | AppError::NoSuchEdge(_))) => {
                log::debug!("Step {} refused: {}", step, err);
                rejections.push(RejectedStep {
                    step,
                    message: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }

        for event in drawing.poll_events() {
            log::debug!("Step {}: {:?}", step, event);
        }
    }

    let closed = drawing.group().is_closed();
    let points = if closed {
        drawing.export_data()?
    } else {
        Vec::new()
    };
    log::info!(
        "Replayed {} events: {} edges, closed: {}",
        script.events.len(),
        drawing.group().len(),
        closed
    );

    Ok(Report {
        state: drawing.state(),
        closed,
        points,
        edges: drawing.group().snapshot(),
        exports,
        rejections,
    })
}

fn apply(
    drawing: &mut Drawing,
    event: &SessionEvent,
    exports: &mut Vec<Vec<Point>>,
) -> AppResult<()> {
    match event {
        SessionEvent::Move { x, y } => {
            drawing.on_pointer_move(Point::new(*x, *y));
        }
        SessionEvent::Click { x, y } => {
            drawing.on_pointer_click(Point::new(*x, *y))?;
        }
        SessionEvent::Abort => drawing.on_abort(),
        SessionEvent::Undo => {
            drawing.undo()?;
        }
        SessionEvent::Redo => {
            drawing.redo()?;
        }
        SessionEvent::Reset => drawing.reset(),
        SessionEvent::SetLength { length } => {
            drawing.set_current_length(*length)?;
        }
        SessionEvent::ModifyEdge { index, length } => {
            let id = drawing
                .group()
                .edges()
                .get(*index)
                .map(|edge| edge.id())
                .ok_or(AppError::NoSuchEdge(*index))?;
            drawing.modify_edge(id, *length)?;
        }
        SessionEvent::Import { points } => drawing.import_data(points)?,
        SessionEvent::Export => exports.push(drawing.export_data()?),
        SessionEvent::ToggleOrthogonal => {
            drawing.toggle_orthogonal();
        }
        SessionEvent::ToggleShowAngle => {
            drawing.toggle_show_angle();
        }
    }
    Ok(())
}
