use egui::{Color32, Pos2, Vec2};
use profile_paint::element::{factory, Element, ElementType, ShapeKind};
use profile_paint::{BaselineImage, CanvasSurface, Mode};

fn test_surface(width: u32, height: u32) -> CanvasSurface {
    let baseline = BaselineImage::placeholder(width, height).unwrap();
    CanvasSurface::new(baseline.to_anchor())
}

fn test_shape(surface: &CanvasSurface) -> ElementType {
    let size = Vec2::new(surface.width(), surface.height());
    ElementType::Shape(factory::shape(ShapeKind::Square, Color32::RED, size))
}

#[test]
fn surface_starts_from_anchor_dimensions() {
    let surface = test_surface(200, 300);

    assert_eq!(surface.width(), 200.0);
    assert_eq!(surface.height(), 300.0);
    assert_eq!(surface.mode(), Mode::Draw);
    assert_eq!(surface.objects().len(), 1);

    let anchor = surface.anchor().unwrap();
    assert_eq!(anchor.kind(), "image");
    assert_eq!(anchor.position(), Pos2::ZERO);
    assert_eq!(anchor.angle(), 0.0);
}

#[test]
fn add_object_never_mutates_the_anchor() {
    let mut surface = test_surface(120, 120);
    let anchor_id = surface.anchor().unwrap().id();
    let anchor_pos = surface.anchor().unwrap().position();

    for _ in 0..3 {
        let shape = test_shape(&surface);
        surface.add_object(shape);
    }

    assert_eq!(surface.objects().len(), 4);
    let anchor = surface.anchor().unwrap();
    assert_eq!(anchor.id(), anchor_id);
    assert_eq!(anchor.position(), anchor_pos);
    assert_eq!(anchor.kind(), "image");
}

#[test]
fn add_object_forces_select_mode() {
    let mut surface = test_surface(120, 120);
    assert_eq!(surface.mode(), Mode::Draw);

    let shape = test_shape(&surface);
    surface.add_object(shape);
    assert_eq!(surface.mode(), Mode::Select);
}

#[test]
fn toggle_mode_is_an_involution() {
    let mut surface = test_surface(120, 120);
    let before = surface.mode();

    surface.toggle_mode();
    assert_ne!(surface.mode(), before);
    surface.toggle_mode();
    assert_eq!(surface.mode(), before);
}

#[test]
fn set_mode_is_idempotent() {
    let mut surface = test_surface(120, 120);
    surface.set_mode(Mode::Select);
    surface.set_mode(Mode::Select);
    assert_eq!(surface.mode(), Mode::Select);
}

#[test]
fn remove_without_selection_is_a_noop() {
    let mut surface = test_surface(120, 120);
    let shape = test_shape(&surface);
    surface.add_object(shape);

    assert_eq!(surface.selected(), None);
    assert!(surface.remove_selected().is_none());
    assert_eq!(surface.objects().len(), 2);
}

#[test]
fn remove_selected_refuses_the_anchor() {
    let mut surface = test_surface(120, 120);
    let anchor_id = surface.anchor().unwrap().id();

    surface.select(anchor_id);
    assert!(surface.remove_selected().is_none());
    assert_eq!(surface.objects().len(), 1);
    assert_eq!(surface.anchor().unwrap().id(), anchor_id);
}

#[test]
fn remove_selected_removes_a_selected_shape() {
    let mut surface = test_surface(120, 120);
    let shape = test_shape(&surface);
    let shape_id = shape.id();
    surface.add_object(shape);

    surface.select(shape_id);
    let removed = surface.remove_selected().unwrap();
    assert_eq!(removed.id(), shape_id);
    assert_eq!(surface.objects().len(), 1);
    assert_eq!(surface.selected(), None);
}

#[test]
fn selecting_an_unknown_id_does_nothing() {
    let mut surface = test_surface(120, 120);
    surface.select(987_654);
    assert_eq!(surface.selected(), None);
}

#[test]
fn clear_empties_objects_and_repaints_background() {
    let mut surface = test_surface(120, 120);
    surface.add_object(test_shape(&surface));

    surface.clear(Some(Color32::WHITE));
    assert!(surface.objects().is_empty());
    assert_eq!(surface.selected(), None);
    assert_eq!(surface.background(), Color32::WHITE);
}

#[test]
fn append_stroke_keeps_draw_mode() {
    let mut surface = test_surface(120, 120);
    let stroke = factory::stroke(
        vec![Pos2::new(5.0, 5.0), Pos2::new(40.0, 40.0)],
        2.0,
        Color32::BLUE,
    );

    surface.append_stroke(stroke);
    assert_eq!(surface.mode(), Mode::Draw);
    assert_eq!(surface.objects().len(), 2);
}

#[test]
fn object_at_finds_the_topmost_hit() {
    let mut surface = test_surface(120, 120);
    let first = test_shape(&surface);
    let second = test_shape(&surface);
    let second_id = second.id();
    surface.add_object(first);
    surface.add_object(second);

    // Both squares are centered; the later one wins
    let hit = surface.object_at(Pos2::new(60.0, 60.0)).unwrap();
    assert_eq!(hit.id(), second_id);
}
