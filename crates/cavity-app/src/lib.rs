//! Cavity application shell.
//!
//! Drives a drawing session from a JSON script instead of a pointer and
//! reports the resulting outline.

pub mod script;
pub mod session;

use std::path::Path;

use cavity_core::DrawError;
use thiserror::Error;

pub use script::{Script, SessionEvent};
pub use session::{RejectedStep, Report, replay};

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid script: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Draw(#[from] DrawError),
    #[error("No edge at index {0}")]
    NoSuchEdge(usize),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Load a script file, replay it and render the report as JSON.
pub fn run(path: &Path) -> AppResult<String> {
    let script = Script::load(path)?;
    log::info!("Loaded {} events from {}", script.events.len(), path.display());
    let report = replay(&script)?;
    Ok(serde_json::to_string_pretty(&report)?)
}
