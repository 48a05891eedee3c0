use egui::{Color32, Vec2};
use log::info;

use crate::baseline::BaselineImage;
use crate::brush::BrushSettings;
use crate::command::{ActionResult, EditorAction, EditorError};
use crate::element::{factory, Element, ElementType, ShapeKind, StrokeElement};
use crate::export::{self, HostForm};
use crate::rotation;
use crate::surface::{CanvasSurface, Mode};

/// The whole editor state in one owned value: canvas surface, brush settings,
/// the two baseline pictures and the hosting form.
///
/// All mutation goes through [`handle`](Editor::handle), one synchronous
/// operation per user action. Required collaborators (the default picture and
/// the host form) are constructor arguments, so a partially wired editor is
/// unrepresentable; the profile picture is optional and its absence simply
/// leaves reset-to-original unavailable.
pub struct Editor {
    surface: CanvasSurface,
    brush: BrushSettings,
    profile: Option<BaselineImage>,
    default_image: BaselineImage,
    form: Box<dyn HostForm>,
}

impl Editor {
    /// Build the editor from its collaborators. The canvas starts from the
    /// profile picture when one exists, otherwise from the site default.
    pub fn new(
        profile: Option<BaselineImage>,
        default_image: BaselineImage,
        form: Box<dyn HostForm>,
    ) -> Self {
        let baseline = profile.as_ref().unwrap_or(&default_image);
        let surface = CanvasSurface::new(baseline.to_anchor());
        info!(
            "editor initialized from {} picture at {}x{}",
            if profile.is_some() { "profile" } else { "default" },
            surface.width(),
            surface.height(),
        );
        Self {
            surface,
            brush: BrushSettings::default(),
            profile,
            default_image,
            form,
        }
    }

    pub fn surface(&self) -> &CanvasSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut CanvasSurface {
        &mut self.surface
    }

    pub fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    pub fn brush_mut(&mut self) -> &mut BrushSettings {
        &mut self.brush
    }

    /// Whether reset-to-original can be offered at all
    pub fn has_profile(&self) -> bool {
        self.profile.is_some()
    }

    /// Single dispatch entry point for every user-triggered operation
    pub fn handle(&mut self, action: EditorAction) -> ActionResult {
        match action {
            EditorAction::Clear => {
                self.clear();
                Ok(())
            }
            EditorAction::ResetToOriginal => self.reset_to_original(),
            EditorAction::ResetToDefault => {
                self.reset_to_default();
                Ok(())
            }
            EditorAction::Save => self.save(),
            EditorAction::ToggleDraw => {
                self.surface.toggle_mode();
                Ok(())
            }
            EditorAction::Rotate => {
                rotation::rotate_quarter(&mut self.surface);
                Ok(())
            }
            EditorAction::AddShape(kind) => {
                self.add_shape(kind);
                Ok(())
            }
            EditorAction::RemoveSelected => {
                self.surface.remove_selected();
                Ok(())
            }
            EditorAction::SetBrushColor(color) => {
                self.brush.color = color;
                Ok(())
            }
            EditorAction::SetLineWidth(raw) => {
                self.brush.set_line_width_input(&raw);
                // Touching the width control turns drawing back on
                self.surface.set_mode(Mode::Draw);
                Ok(())
            }
            EditorAction::CommitStroke(stroke) => {
                self.commit_stroke(stroke);
                Ok(())
            }
        }
    }

    /// Stamp a centered shape. Select mode is forced *before* insertion so a
    /// stray pointer event can't land a freehand stroke on top of the fresh
    /// shape.
    fn add_shape(&mut self, kind: ShapeKind) {
        self.surface.set_mode(Mode::Select);
        let surface_size = Vec2::new(self.surface.width(), self.surface.height());
        let shape = factory::shape(kind, self.brush.color, surface_size);
        info!("stamp {} {} at {:?}", shape.kind(), shape.id(), shape.center());
        self.surface.add_object(ElementType::Shape(shape));
    }

    /// Drop everything and leave a blank white canvas at the default size
    fn clear(&mut self) {
        let size = self.default_image.size();
        self.surface.resize(size.x, size.y);
        self.surface.clear(Some(Color32::WHITE));
        info!("canvas cleared");
    }

    /// Restore the original profile picture as the sole anchor. Errors when
    /// the user has no profile picture.
    fn reset_to_original(&mut self) -> ActionResult {
        let baseline = self.profile.as_ref().ok_or(EditorError::NoProfileImage)?;
        self.surface.rebuild(baseline.to_anchor());
        info!("canvas reset to original picture");
        Ok(())
    }

    /// Restore the site default picture as the sole anchor. Always valid.
    fn reset_to_default(&mut self) {
        self.surface.rebuild(self.default_image.to_anchor());
        info!("canvas reset to default picture");
    }

    /// Freehand strokes only land while the canvas is in draw mode; a stroke
    /// finished after the user toggled away is dropped, not rolled back.
    fn commit_stroke(&mut self, stroke: StrokeElement) {
        if self.surface.mode() == Mode::Draw {
            self.surface.append_stroke(stroke);
        }
    }

    /// Export the composition and hand it to the hosting form
    fn save(&mut self) -> ActionResult {
        let data_url = export::to_data_url(&self.surface)?;
        info!("exporting composition ({} bytes)", data_url.len());
        self.form.set_image_field(&data_url);
        self.form.submit();
        Ok(())
    }

    /// Serialize the current composition without submitting it
    pub fn export(&self) -> Result<String, EditorError> {
        export::to_data_url(&self.surface)
    }
}
