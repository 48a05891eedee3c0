use egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use super::{common, Element, ElementId};

// Extra slack around a stroke when hit testing thin lines
const HIT_TOLERANCE: f32 = 3.0;

/// A committed freehand stroke: an immutable polyline with color and width
#[derive(Clone, Debug)]
pub struct StrokeElement {
    id: ElementId,
    points: Vec<Pos2>,
    width: f32,
    color: Color32,
    angle: f32,
}

impl StrokeElement {
    pub(crate) fn new(id: ElementId, points: Vec<Pos2>, width: f32, color: Color32) -> Self {
        Self {
            id,
            points,
            width,
            color,
            angle: 0.0,
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn color(&self) -> Color32 {
        self.color
    }
}

impl Element for StrokeElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn kind(&self) -> &'static str {
        "stroke"
    }

    fn rect(&self) -> Rect {
        common::calculate_bounds(&self.points).expand(self.width / 2.0)
    }

    fn angle(&self) -> f32 {
        self.angle
    }

    fn position(&self) -> Pos2 {
        self.rect().min
    }

    fn set_position(&mut self, pos: Pos2) {
        let delta = pos - self.rect().min;
        self.translate(delta);
    }

    fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }

    fn rotate_by(&mut self, degrees: f32) {
        self.angle = (self.angle + degrees).rem_euclid(360.0);
    }

    fn draw(&self, painter: &Painter, origin: Vec2) {
        let stroke = Stroke::new(self.width, self.color);
        for pair in self.points.windows(2) {
            painter.line_segment([pair[0] + origin, pair[1] + origin], stroke);
        }
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        let reach = self.width / 2.0 + HIT_TOLERANCE;
        self.points
            .windows(2)
            .any(|pair| common::distance_to_line_segment(pos, pair[0], pair[1]) <= reach)
    }
}

/// Accumulates pointer positions while the user is dragging in draw mode,
/// then converts into an immutable [`StrokeElement`]
#[derive(Debug)]
pub struct StrokeBuilder {
    points: Vec<Pos2>,
    width: f32,
    color: Color32,
}

impl StrokeBuilder {
    pub fn new(color: Color32, width: f32) -> Self {
        Self {
            points: Vec::new(),
            width,
            color,
        }
    }

    /// Add a point, skipping exact duplicates from repeated pointer events
    pub fn add_point(&mut self, point: Pos2) {
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Finish the stroke. Returns `None` for degenerate strokes (a click
    /// without any drag produces no drawable line).
    pub fn finish(self) -> Option<StrokeElement> {
        if self.points.len() < 2 {
            return None;
        }
        Some(StrokeElement::new(
            super::next_element_id(),
            self.points,
            self.width,
            self.color,
        ))
    }
}
