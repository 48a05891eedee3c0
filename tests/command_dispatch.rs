use std::cell::RefCell;
use std::rc::Rc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use egui::{Color32, Pos2};
use profile_paint::element::{factory, Element};
use profile_paint::{BaselineImage, Editor, EditorAction, EditorError, HostForm, Mode, ShapeKind};

#[derive(Default)]
struct FormState {
    field: Option<String>,
    submissions: usize,
}

/// Host form double that records what the editor hands it
struct MockForm(Rc<RefCell<FormState>>);

impl HostForm for MockForm {
    fn set_image_field(&mut self, data_url: &str) {
        self.0.borrow_mut().field = Some(data_url.to_owned());
    }

    fn submit(&mut self) {
        self.0.borrow_mut().submissions += 1;
    }
}

fn editor_with_form(profile: Option<(u32, u32)>) -> (Editor, Rc<RefCell<FormState>>) {
    let state = Rc::new(RefCell::new(FormState::default()));
    let form = MockForm(Rc::clone(&state));
    let default_image = BaselineImage::placeholder(240, 240).unwrap();
    let profile = profile.map(|(w, h)| BaselineImage::placeholder(w, h).unwrap());
    (Editor::new(profile, default_image, Box::new(form)), state)
}

#[test]
fn editor_prefers_the_profile_picture() {
    let (editor, _) = editor_with_form(Some((200, 300)));
    assert_eq!(editor.surface().width(), 200.0);
    assert_eq!(editor.surface().height(), 300.0);
    assert!(editor.has_profile());
}

#[test]
fn editor_falls_back_to_the_default_picture() {
    let (editor, _) = editor_with_form(None);
    assert_eq!(editor.surface().width(), 240.0);
    assert!(!editor.has_profile());
}

#[test]
fn reset_to_default_yields_a_single_fresh_anchor() {
    let (mut editor, _) = editor_with_form(Some((200, 300)));

    editor.handle(EditorAction::AddShape(ShapeKind::Square)).unwrap();
    editor.handle(EditorAction::Rotate).unwrap();
    editor.handle(EditorAction::Rotate).unwrap();

    editor.handle(EditorAction::ResetToDefault).unwrap();

    assert_eq!(editor.surface().objects().len(), 1);
    let anchor = editor.surface().anchor().unwrap();
    assert_eq!(anchor.angle(), 0.0);
    assert_eq!(anchor.position(), Pos2::ZERO);
    assert_eq!(editor.surface().width(), 240.0);
    assert_eq!(editor.surface().height(), 240.0);
}

#[test]
fn reset_to_original_requires_a_profile_picture() {
    let (mut editor, _) = editor_with_form(None);
    let result = editor.handle(EditorAction::ResetToOriginal);
    assert!(matches!(result, Err(EditorError::NoProfileImage)));
}

#[test]
fn reset_to_original_restores_profile_dimensions() {
    let (mut editor, _) = editor_with_form(Some((200, 300)));

    editor.handle(EditorAction::Rotate).unwrap();
    assert_eq!(editor.surface().width(), 300.0);

    editor.handle(EditorAction::ResetToOriginal).unwrap();
    assert_eq!(editor.surface().width(), 200.0);
    assert_eq!(editor.surface().height(), 300.0);
    assert_eq!(editor.surface().objects().len(), 1);
    assert_eq!(editor.surface().anchor().unwrap().angle(), 0.0);
}

#[test]
fn clear_leaves_a_blank_white_canvas_at_default_size() {
    let (mut editor, _) = editor_with_form(Some((200, 300)));
    editor.handle(EditorAction::AddShape(ShapeKind::Triangle)).unwrap();

    editor.handle(EditorAction::Clear).unwrap();

    assert!(editor.surface().objects().is_empty());
    assert_eq!(editor.surface().background(), Color32::WHITE);
    assert_eq!(editor.surface().width(), 240.0);
    assert_eq!(editor.surface().height(), 240.0);
}

#[test]
fn invalid_line_width_input_falls_back_to_one() {
    let (mut editor, _) = editor_with_form(None);

    editor.handle(EditorAction::SetLineWidth("abc".into())).unwrap();
    assert_eq!(editor.brush().line_width, 1);

    editor.handle(EditorAction::SetLineWidth("12".into())).unwrap();
    assert_eq!(editor.brush().line_width, 12);
}

#[test]
fn changing_the_line_width_turns_drawing_back_on() {
    let (mut editor, _) = editor_with_form(None);
    editor.handle(EditorAction::AddShape(ShapeKind::Circle)).unwrap();
    assert_eq!(editor.surface().mode(), Mode::Select);

    editor.handle(EditorAction::SetLineWidth("3".into())).unwrap();
    assert_eq!(editor.surface().mode(), Mode::Draw);
}

#[test]
fn toggle_draw_flips_the_mode_both_ways() {
    let (mut editor, _) = editor_with_form(None);
    editor.handle(EditorAction::ToggleDraw).unwrap();
    assert_eq!(editor.surface().mode(), Mode::Select);
    editor.handle(EditorAction::ToggleDraw).unwrap();
    assert_eq!(editor.surface().mode(), Mode::Draw);
}

#[test]
fn committed_strokes_land_only_in_draw_mode() {
    let (mut editor, _) = editor_with_form(None);
    let stroke = || {
        factory::stroke(
            vec![Pos2::new(10.0, 10.0), Pos2::new(60.0, 60.0)],
            2.0,
            Color32::BLUE,
        )
    };

    editor.handle(EditorAction::CommitStroke(stroke())).unwrap();
    assert_eq!(editor.surface().objects().len(), 2);

    editor.handle(EditorAction::ToggleDraw).unwrap();
    editor.handle(EditorAction::CommitStroke(stroke())).unwrap();
    assert_eq!(editor.surface().objects().len(), 2);
}

#[test]
fn save_writes_the_field_and_submits_the_form() {
    let (mut editor, form) = editor_with_form(None);

    editor.handle(EditorAction::Save).unwrap();

    let state = form.borrow();
    assert_eq!(state.submissions, 1);
    let payload = state.field.as_deref().unwrap();
    assert!(payload.starts_with("data:image/png;base64,"));
}

#[test]
fn exported_payload_decodes_to_the_surface_raster() {
    let (mut editor, form) = editor_with_form(None);

    // Blank white canvas with one red circle stamped in the middle
    editor.handle(EditorAction::Clear).unwrap();
    editor
        .handle(EditorAction::SetBrushColor(Color32::from_rgb(255, 0, 0)))
        .unwrap();
    editor.handle(EditorAction::AddShape(ShapeKind::Circle)).unwrap();
    editor.handle(EditorAction::Save).unwrap();

    let state = form.borrow();
    let payload = state.field.as_deref().unwrap();
    let encoded = payload.strip_prefix("data:image/png;base64,").unwrap();
    let png = STANDARD.decode(encoded).unwrap();
    let raster = image::load_from_memory(&png).unwrap().to_rgba8();

    assert_eq!((raster.width(), raster.height()), (240, 240));
    // Corner stays background white, center carries the circle fill
    assert_eq!(raster.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert_eq!(raster.get_pixel(120, 120).0, [255, 0, 0, 255]);
}

#[test]
fn export_tracks_the_rotated_dimensions() {
    let (mut editor, _) = editor_with_form(Some((200, 300)));
    editor.handle(EditorAction::Rotate).unwrap();

    let payload = editor.export().unwrap();
    let encoded = payload.strip_prefix("data:image/png;base64,").unwrap();
    let png = STANDARD.decode(encoded).unwrap();
    let raster = image::load_from_memory(&png).unwrap();

    assert_eq!((raster.width(), raster.height()), (300, 200));
}
