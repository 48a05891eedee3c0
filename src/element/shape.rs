use egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use super::{common, Element, ElementId};

/// Default radius of a stamped circle
pub const CIRCLE_RADIUS: f32 = 25.0;
/// Default edge length of a stamped square
pub const SQUARE_SIZE: f32 = 40.0;
/// Default width and height of a stamped triangle
pub const TRIANGLE_SIZE: f32 = 43.0;

/// The stamped vector primitives a user can add to the canvas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
}

impl ShapeKind {
    /// Default footprint for a freshly stamped shape of this kind
    pub fn default_size(self) -> Vec2 {
        match self {
            ShapeKind::Circle => Vec2::splat(CIRCLE_RADIUS * 2.0),
            ShapeKind::Square => Vec2::splat(SQUARE_SIZE),
            ShapeKind::Triangle => Vec2::splat(TRIANGLE_SIZE),
        }
    }
}

/// A stamped primitive: filled circle, square or triangle with a center origin
#[derive(Clone, Debug)]
pub struct ShapeElement {
    id: ElementId,
    shape_kind: ShapeKind,
    fill: Color32,
    center: Pos2,
    size: Vec2,
    angle: f32,
}

impl ShapeElement {
    pub(crate) fn new(id: ElementId, kind: ShapeKind, fill: Color32, center: Pos2) -> Self {
        Self {
            id,
            shape_kind: kind,
            fill,
            center,
            size: kind.default_size(),
            angle: 0.0,
        }
    }

    pub fn shape_kind(&self) -> ShapeKind {
        self.shape_kind
    }

    pub fn fill(&self) -> Color32 {
        self.fill
    }

    pub fn center(&self) -> Pos2 {
        self.center
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Triangle corners: apex top-center, base along the bottom edge
    pub(crate) fn triangle_points(&self) -> [Pos2; 3] {
        let (w, h) = (self.size.x, self.size.y);
        [
            Pos2::new(self.center.x, self.center.y - h / 2.0),
            Pos2::new(self.center.x - w / 2.0, self.center.y + h / 2.0),
            Pos2::new(self.center.x + w / 2.0, self.center.y + h / 2.0),
        ]
    }
}

impl Element for ShapeElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn kind(&self) -> &'static str {
        match self.shape_kind {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
        }
    }

    fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }

    fn angle(&self) -> f32 {
        self.angle
    }

    fn position(&self) -> Pos2 {
        self.center
    }

    fn set_position(&mut self, pos: Pos2) {
        self.center = pos;
    }

    fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    // Only the canvas anchor is ever rotated by the editor; the angle is
    // tracked here so the object model stays uniform.
    fn rotate_by(&mut self, degrees: f32) {
        self.angle = (self.angle + degrees).rem_euclid(360.0);
    }

    fn draw(&self, painter: &Painter, origin: Vec2) {
        match self.shape_kind {
            ShapeKind::Circle => {
                painter.circle_filled(self.center + origin, self.size.x / 2.0, self.fill);
            }
            ShapeKind::Square => {
                painter.rect_filled(self.rect().translate(origin), 0.0, self.fill);
            }
            ShapeKind::Triangle => {
                let points = self.triangle_points().map(|p| p + origin).to_vec();
                painter.add(egui::Shape::convex_polygon(points, self.fill, Stroke::NONE));
            }
        }
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        match self.shape_kind {
            ShapeKind::Circle => (pos - self.center).length() <= self.size.x / 2.0,
            ShapeKind::Square => self.rect().contains(pos),
            ShapeKind::Triangle => {
                let [a, b, c] = self.triangle_points();
                common::point_in_triangle(pos, a, b, c)
            }
        }
    }
}
