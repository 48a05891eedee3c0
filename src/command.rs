use egui::Color32;
use thiserror::Error;

use crate::element::{ShapeKind, StrokeElement};

/// Every user-triggered editor operation, routed through
/// [`Editor::handle`](crate::Editor::handle) so behavior is testable without
/// simulating UI events.
#[derive(Clone, Debug)]
pub enum EditorAction {
    /// Empty the canvas and repaint the background white
    Clear,
    /// Restore the user's original profile picture as the sole anchor
    ResetToOriginal,
    /// Restore the site's default picture as the sole anchor
    ResetToDefault,
    /// Serialize the composition and submit it through the host form
    Save,
    /// Flip between draw and select mode
    ToggleDraw,
    /// Rotate the composition a quarter turn clockwise
    Rotate,
    /// Stamp a centered shape filled with the current brush color
    AddShape(ShapeKind),
    /// Remove the selected object, if any
    RemoveSelected,
    /// Change the freehand brush color
    SetBrushColor(Color32),
    /// Change the freehand line width from raw control input
    SetLineWidth(String),
    /// Commit a finished freehand stroke to the canvas
    CommitStroke(StrokeElement),
}

/// Result type for editor actions
pub type ActionResult = Result<(), EditorError>;

/// Errors surfaced by editor operations.
///
/// Missing *optional* collaborators (no profile picture wired, nothing
/// selected on remove) are not errors: those paths are silent no-ops or are
/// simply never offered. Errors are reserved for contract violations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Reset-to-original was requested but no profile picture exists
    #[error("no original profile picture is available")]
    NoProfileImage,

    /// A source picture could not be decoded
    #[error("could not decode source picture: {0}")]
    InvalidImage(#[from] image::ImageError),

    /// The canvas snapshot could not be encoded for export
    #[error("could not encode canvas export: {0}")]
    ExportFailed(#[source] image::ImageError),
}
