#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod baseline;
pub mod brush;
pub mod command;
pub mod editor;
pub mod element;
pub mod export;
pub mod rotation;
pub mod surface;

pub use app::EditorApp;
pub use baseline::BaselineImage;
pub use brush::BrushSettings;
pub use command::{EditorAction, EditorError};
pub use editor::Editor;
pub use element::{Element, ElementType, ShapeKind};
pub use export::HostForm;
pub use rotation::Orientation;
pub use surface::{CanvasSurface, Mode};
