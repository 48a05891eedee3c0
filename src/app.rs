use eframe::egui::{self, Color32, Rect, Stroke, Vec2};

use crate::brush::BrushSettings;
use crate::command::EditorAction;
use crate::editor::Editor;
use crate::element::{Element, ElementType, ShapeKind, StrokeBuilder};
use crate::surface::Mode;

const BRUSH_STORAGE_KEY: &str = "brush_settings";

/// eframe wrapper around the [`Editor`]: turns UI events into
/// [`EditorAction`]s and paints the canvas surface.
pub struct EditorApp {
    editor: Editor,
    pending_stroke: Option<StrokeBuilder>,
    width_input: String,
    last_error: Option<String>,
}

impl EditorApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, mut editor: Editor) -> Self {
        // Restore the brush settings from the previous session
        if let Some(storage) = cc.storage {
            if let Some(brush) = eframe::get_value::<BrushSettings>(storage, BRUSH_STORAGE_KEY) {
                *editor.brush_mut() = brush;
            }
        }
        let width_input = editor.brush().line_width.to_string();
        Self {
            editor,
            pending_stroke: None,
            width_input,
            last_error: None,
        }
    }

    fn dispatch(&mut self, action: EditorAction) {
        if let Err(err) = self.editor.handle(action) {
            log::error!("editor action failed: {err}");
            self.last_error = Some(err.to_string());
        }
    }

    fn controls_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("controls_panel")
            .resizable(false)
            .default_width(190.0)
            .show(ctx, |ui| {
                ui.heading("Profile picture");
                ui.separator();

                let mut color = self.editor.brush().color;
                ui.horizontal(|ui| {
                    ui.label("Color");
                    if ui.color_edit_button_srgba(&mut color).changed() {
                        self.dispatch(EditorAction::SetBrushColor(color));
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("Line width");
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.width_input).desired_width(48.0),
                    );
                    if response.lost_focus() {
                        self.dispatch(EditorAction::SetLineWidth(self.width_input.clone()));
                        self.width_input = self.editor.brush().line_width.to_string();
                    }
                });

                let mut select_mode = self.editor.surface().mode() == Mode::Select;
                if ui.checkbox(&mut select_mode, "Move / select mode").changed() {
                    self.dispatch(EditorAction::ToggleDraw);
                }

                ui.separator();

                if ui.button("Rotate 90°").clicked() {
                    self.dispatch(EditorAction::Rotate);
                }
                if ui.button("Add circle").clicked() {
                    self.dispatch(EditorAction::AddShape(ShapeKind::Circle));
                }
                if ui.button("Add square").clicked() {
                    self.dispatch(EditorAction::AddShape(ShapeKind::Square));
                }
                if ui.button("Add triangle").clicked() {
                    self.dispatch(EditorAction::AddShape(ShapeKind::Triangle));
                }
                if ui.button("Remove selected").clicked() {
                    self.dispatch(EditorAction::RemoveSelected);
                }

                ui.separator();

                if ui.button("Clear canvas").clicked() {
                    self.dispatch(EditorAction::Clear);
                }
                let has_profile = self.editor.has_profile();
                if ui
                    .add_enabled(has_profile, egui::Button::new("Restore original picture"))
                    .clicked()
                {
                    self.dispatch(EditorAction::ResetToOriginal);
                }
                if ui.button("Use default picture").clicked() {
                    self.dispatch(EditorAction::ResetToDefault);
                }

                ui.separator();

                if ui.button("Save picture").clicked() {
                    self.dispatch(EditorAction::Save);
                }

                if let Some(error) = self.last_error.clone() {
                    ui.separator();
                    ui.colored_label(Color32::RED, error);
                    if ui.small_button("Dismiss").clicked() {
                        self.last_error = None;
                    }
                }
            });
    }

    fn canvas_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                let size = Vec2::new(
                    self.editor.surface().width(),
                    self.editor.surface().height(),
                );
                let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
                let origin = response.rect.min.to_vec2();

                painter.rect_filled(
                    Rect::from_min_size(response.rect.min, size),
                    0.0,
                    self.editor.surface().background(),
                );

                // Upload textures for any image objects that still need one
                for object in self.editor.surface_mut().objects_mut() {
                    if let ElementType::Image(image) = object {
                        image.ensure_texture(ctx);
                    }
                }

                for object in self.editor.surface().objects() {
                    object.draw(&painter, origin);
                }

                // Preview of the stroke being drawn right now
                if let Some(builder) = &self.pending_stroke {
                    let stroke = Stroke::new(builder.width(), builder.color());
                    for pair in builder.points().windows(2) {
                        painter.line_segment([pair[0] + origin, pair[1] + origin], stroke);
                    }
                }

                if let Some(selected) = self.editor.surface().selected_object() {
                    painter.rect_stroke(
                        selected.rect().translate(origin).expand(2.0),
                        0.0,
                        Stroke::new(1.0, Color32::LIGHT_BLUE),
                    );
                }

                self.handle_pointer(&response, origin);
            });
        });
    }

    fn handle_pointer(&mut self, response: &egui::Response, origin: Vec2) {
        match self.editor.surface().mode() {
            Mode::Draw => {
                if response.drag_started() {
                    let brush = self.editor.brush();
                    self.pending_stroke = Some(StrokeBuilder::new(brush.color, brush.width_px()));
                }
                if let (Some(builder), Some(pos)) =
                    (self.pending_stroke.as_mut(), response.interact_pointer_pos())
                {
                    builder.add_point(pos - origin);
                }
                if response.drag_stopped() {
                    if let Some(stroke) = self.pending_stroke.take().and_then(StrokeBuilder::finish)
                    {
                        self.dispatch(EditorAction::CommitStroke(stroke));
                    }
                }
            }
            Mode::Select => {
                // A mode toggle mid-stroke just stops accepting input
                self.pending_stroke = None;

                if response.clicked() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        let canvas_pos = pos - origin;
                        let hit = self.editor.surface().object_at(canvas_pos).map(|o| o.id());
                        match hit {
                            Some(id) => self.editor.surface_mut().select(id),
                            None => self.editor.surface_mut().clear_selection(),
                        }
                    }
                }

                if response.dragged() {
                    let delta = response.drag_delta();
                    if delta != Vec2::ZERO {
                        if let Some(id) = self.editor.surface().selected() {
                            for object in self.editor.surface_mut().objects_mut() {
                                if object.id() == id {
                                    object.translate(delta);
                                    break;
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

impl eframe::App for EditorApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, BRUSH_STORAGE_KEY, self.editor.brush());
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controls_panel(ctx);
        self.canvas_panel(ctx);
    }
}
