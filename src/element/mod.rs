use std::sync::atomic::{AtomicUsize, Ordering};

use egui::{Painter, Pos2, Rect, Vec2};

pub(crate) mod common;
pub mod image;
pub mod shape;
pub mod stroke;

pub use self::image::ImageElement;
pub use self::shape::{ShapeElement, ShapeKind};
pub use self::stroke::{StrokeBuilder, StrokeElement};

/// Identifier shared by every drawable object on the canvas.
pub type ElementId = usize;

// Single static counter for all elements
static NEXT_ELEMENT_ID: AtomicUsize = AtomicUsize::new(1);

pub(crate) fn next_element_id() -> ElementId {
    NEXT_ELEMENT_ID.fetch_add(1, Ordering::SeqCst)
}

/// Common trait that all drawable canvas objects must implement
pub trait Element {
    /// Get the unique identifier for this element
    fn id(&self) -> ElementId;

    /// Get the element type as a string
    fn kind(&self) -> &'static str;

    /// Get the axis-aligned footprint of the element at its current angle
    fn rect(&self) -> Rect;

    /// Get the element's rotation in degrees, always a multiple of 90
    fn angle(&self) -> f32;

    /// Get the element's origin point (the fabric-style left/top anchor)
    fn position(&self) -> Pos2;

    /// Move the element's origin point
    fn set_position(&mut self, pos: Pos2);

    /// Translate the element by the given delta
    fn translate(&mut self, delta: Vec2);

    /// Rotate the element's own angle, wrapping into `[0, 360)`
    fn rotate_by(&mut self, degrees: f32);

    /// Draw the element using the provided painter. `origin` is the screen
    /// position of the canvas top-left corner.
    fn draw(&self, painter: &Painter, origin: Vec2);

    /// Test if the element contains the given canvas-space position
    fn hit_test(&self, pos: Pos2) -> bool;
}

/// Enumeration of all drawable object types on the canvas
#[derive(Clone, Debug)]
pub enum ElementType {
    Image(ImageElement),
    Shape(ShapeElement),
    Stroke(StrokeElement),
}

impl Element for ElementType {
    fn id(&self) -> ElementId {
        match self {
            ElementType::Image(i) => i.id(),
            ElementType::Shape(s) => s.id(),
            ElementType::Stroke(s) => s.id(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ElementType::Image(_) => "image",
            ElementType::Shape(s) => s.kind(),
            ElementType::Stroke(_) => "stroke",
        }
    }

    fn rect(&self) -> Rect {
        match self {
            ElementType::Image(i) => i.rect(),
            ElementType::Shape(s) => s.rect(),
            ElementType::Stroke(s) => s.rect(),
        }
    }

    fn angle(&self) -> f32 {
        match self {
            ElementType::Image(i) => i.angle(),
            ElementType::Shape(s) => s.angle(),
            ElementType::Stroke(s) => s.angle(),
        }
    }

    fn position(&self) -> Pos2 {
        match self {
            ElementType::Image(i) => i.position(),
            ElementType::Shape(s) => s.position(),
            ElementType::Stroke(s) => s.position(),
        }
    }

    fn set_position(&mut self, pos: Pos2) {
        match self {
            ElementType::Image(i) => i.set_position(pos),
            ElementType::Shape(s) => s.set_position(pos),
            ElementType::Stroke(s) => s.set_position(pos),
        }
    }

    fn translate(&mut self, delta: Vec2) {
        match self {
            ElementType::Image(i) => i.translate(delta),
            ElementType::Shape(s) => s.translate(delta),
            ElementType::Stroke(s) => s.translate(delta),
        }
    }

    fn rotate_by(&mut self, degrees: f32) {
        match self {
            ElementType::Image(i) => i.rotate_by(degrees),
            ElementType::Shape(s) => s.rotate_by(degrees),
            ElementType::Stroke(s) => s.rotate_by(degrees),
        }
    }

    fn draw(&self, painter: &Painter, origin: Vec2) {
        match self {
            ElementType::Image(i) => i.draw(painter, origin),
            ElementType::Shape(s) => s.draw(painter, origin),
            ElementType::Stroke(s) => s.draw(painter, origin),
        }
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        match self {
            ElementType::Image(i) => i.hit_test(pos),
            ElementType::Shape(s) => s.hit_test(pos),
            ElementType::Stroke(s) => s.hit_test(pos),
        }
    }
}

/// Factory functions for creating drawable objects
pub mod factory {
    use super::*;
    use egui::Color32;

    /// Create a stamped shape of `kind`, centered on a surface of
    /// `surface_size`, filled with the current brush color. Factory shapes
    /// always start at angle 0.
    pub fn shape(kind: ShapeKind, fill: Color32, surface_size: Vec2) -> ShapeElement {
        let center = Pos2::new(surface_size.x / 2.0, surface_size.y / 2.0);
        ShapeElement::new(next_element_id(), kind, fill, center)
    }

    /// Create an image element from encoded bytes with a known natural size,
    /// anchored at the canvas top-left.
    pub fn image(data: Vec<u8>, size: Vec2) -> ImageElement {
        ImageElement::new(next_element_id(), data, size, Pos2::ZERO)
    }

    /// Create a freehand stroke element from accumulated points.
    pub fn stroke(points: Vec<Pos2>, width: f32, color: Color32) -> StrokeElement {
        StrokeElement::new(next_element_id(), points, width, color)
    }
}
