use egui::Color32;
use log::debug;

use crate::element::{Element, ElementId, ElementType, ImageElement, StrokeElement};

/// The two mutually exclusive interaction modes of the canvas
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Freehand stroke input
    #[default]
    Draw,
    /// Object pointer interaction (select, move, remove)
    Select,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Draw => Mode::Select,
            Mode::Select => Mode::Draw,
        }
    }
}

/// The in-memory composition: dimensions, background, interaction mode and
/// the ordered list of drawable objects.
///
/// When non-empty, `objects[0]` is the *anchor* — the loaded profile or
/// default picture. Shape and selection operations never remove it; only
/// [`rebuild`](CanvasSurface::rebuild) replaces it.
#[derive(Debug)]
pub struct CanvasSurface {
    width: f32,
    height: f32,
    background: Color32,
    mode: Mode,
    objects: Vec<ElementType>,
    selected: Option<ElementId>,
}

impl CanvasSurface {
    /// Create a surface sized to the anchor picture's natural dimensions,
    /// with the anchor inserted at the top-left in draw mode.
    pub fn new(anchor: ImageElement) -> Self {
        let mut surface = Self {
            width: 0.0,
            height: 0.0,
            background: Color32::WHITE,
            mode: Mode::Draw,
            objects: Vec::new(),
            selected: None,
        };
        surface.rebuild(anchor);
        surface
    }

    /// Discard every object and start over from a fresh anchor: dimensions
    /// come from the anchor's natural size, the anchor lands at `(0, 0)` with
    /// angle 0 as `objects[0]`. The interaction mode is left as-is.
    pub fn rebuild(&mut self, anchor: ImageElement) {
        let size = anchor.size();
        self.width = size.x;
        self.height = size.y;
        self.objects.clear();
        self.objects.push(ElementType::Image(anchor));
        self.selected = None;
        debug!("surface rebuilt at {}x{}", self.width, self.height);
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Idempotent; redundant calls are fine
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!("mode -> {mode:?}");
        }
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn swap_dimensions(&mut self) {
        std::mem::swap(&mut self.width, &mut self.height);
    }

    pub fn objects(&self) -> &[ElementType] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [ElementType] {
        &mut self.objects
    }

    /// The anchor picture, if the surface is not empty
    pub fn anchor(&self) -> Option<&ElementType> {
        self.objects.first()
    }

    pub fn anchor_mut(&mut self) -> Option<&mut ElementType> {
        self.objects.first_mut()
    }

    /// Append an object and switch to select mode so the next pointer
    /// interaction manipulates it instead of scribbling over it.
    pub fn add_object(&mut self, object: ElementType) {
        debug!("add {} object {}", object.kind(), object.id());
        self.objects.push(object);
        self.set_mode(Mode::Select);
    }

    /// Append a committed freehand stroke. Unlike [`add_object`] this keeps
    /// the surface in draw mode so the user can keep drawing.
    pub fn append_stroke(&mut self, stroke: StrokeElement) {
        self.objects.push(ElementType::Stroke(stroke));
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn selected_object(&self) -> Option<&ElementType> {
        let id = self.selected?;
        self.objects.iter().find(|o| o.id() == id)
    }

    /// Select the object with `id`, if it exists on the surface
    pub fn select(&mut self, id: ElementId) {
        if self.objects.iter().any(|o| o.id() == id) {
            self.selected = Some(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Topmost object under `pos`, searching back to front
    pub fn object_at(&self, pos: egui::Pos2) -> Option<&ElementType> {
        self.objects.iter().rev().find(|o| o.hit_test(pos))
    }

    /// Remove the currently selected object. A silent no-op when nothing is
    /// selected. The anchor is privileged: selecting it and asking for
    /// removal does nothing, only a rebuild replaces it.
    pub fn remove_selected(&mut self) -> Option<ElementType> {
        let id = self.selected?;
        if self.objects.first().is_some_and(|a| a.id() == id) {
            debug!("refusing to remove anchor object {id}");
            return None;
        }
        let index = self.objects.iter().position(|o| o.id() == id)?;
        self.selected = None;
        debug!("remove object {id}");
        Some(self.objects.remove(index))
    }

    /// Empty the surface, optionally repainting the background
    pub fn clear(&mut self, background: Option<Color32>) {
        self.objects.clear();
        self.selected = None;
        if let Some(color) = background {
            self.background = color;
        }
    }
}
