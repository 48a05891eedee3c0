use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use egui::{Color32, Pos2, Rect};
use image::{imageops, ImageFormat, Rgba, RgbaImage};
use log::warn;

use crate::command::EditorError;
use crate::element::{Element, ElementType, ImageElement, ShapeElement, ShapeKind, StrokeElement};
use crate::surface::CanvasSurface;

/// Capability handle onto the hosting form that receives the exported
/// composition: one hidden image field plus a submit trigger.
///
/// Supplying an implementation is part of editor construction, so a missing
/// form is a wiring error caught at initialization, never at save time.
pub trait HostForm {
    /// Write the embedded-image string into the form's hidden field
    fn set_image_field(&mut self, data_url: &str);

    /// Submit the form. Fire-and-forget: the editor does not await a response.
    fn submit(&mut self);
}

/// Host form that lands the exported payload in a file, for running the
/// editor outside a real hosting page.
#[derive(Debug)]
pub struct FileHostForm {
    path: std::path::PathBuf,
    payload: Option<String>,
}

impl FileHostForm {
    pub fn new(path: std::path::PathBuf) -> Self {
        Self {
            path,
            payload: None,
        }
    }
}

impl HostForm for FileHostForm {
    fn set_image_field(&mut self, data_url: &str) {
        self.payload = Some(data_url.to_owned());
    }

    fn submit(&mut self) {
        let Some(payload) = self.payload.take() else {
            warn!("form submitted with an empty image field");
            return;
        };
        match std::fs::write(&self.path, &payload) {
            Ok(()) => log::info!("exported composition to {}", self.path.display()),
            Err(err) => log::error!("failed to write {}: {err}", self.path.display()),
        }
    }
}

/// Serialize the surface into an embedded-image string: a base64 PNG data URL
pub fn to_data_url(surface: &CanvasSurface) -> Result<String, EditorError> {
    let raster = render_surface(surface);
    let png = encode_png(&raster).map_err(EditorError::ExportFailed)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
}

/// Software-render the surface: background first, then every object in
/// insertion order. This is the serialize half of the canvas host capability,
/// so the editor never needs a real rendering surface.
pub fn render_surface(surface: &CanvasSurface) -> RgbaImage {
    let width = surface.width().round().max(1.0) as u32;
    let height = surface.height().round().max(1.0) as u32;
    let mut raster = RgbaImage::from_pixel(width, height, rgba(surface.background()));

    for object in surface.objects() {
        match object {
            ElementType::Image(element) => blit_image(&mut raster, element),
            ElementType::Shape(element) => rasterize_shape(&mut raster, element),
            ElementType::Stroke(element) => rasterize_stroke(&mut raster, element),
        }
    }
    raster
}

pub(crate) fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

fn rgba(color: Color32) -> Rgba<u8> {
    Rgba([color.r(), color.g(), color.b(), color.a()])
}

fn blit_image(raster: &mut RgbaImage, element: &ImageElement) {
    let footprint = element.rect();
    let Ok(decoded) = image::load_from_memory(element.data()) else {
        // Mirror the on-screen placeholder for undecodable bytes
        warn!("export: could not decode image element {}", element.id());
        fill_rect(raster, footprint, Color32::from_gray(200));
        return;
    };

    let mut pixels = decoded.to_rgba8();
    let target = (element.size().x.round() as u32, element.size().y.round() as u32);
    if (pixels.width(), pixels.height()) != target && target.0 > 0 && target.1 > 0 {
        pixels = imageops::resize(&pixels, target.0, target.1, imageops::FilterType::Triangle);
    }

    let turns = ((element.angle() / 90.0).round() as i32).rem_euclid(4);
    let rotated = match turns {
        1 => imageops::rotate90(&pixels),
        2 => imageops::rotate180(&pixels),
        3 => imageops::rotate270(&pixels),
        _ => pixels,
    };

    imageops::overlay(
        raster,
        &rotated,
        footprint.min.x.round() as i64,
        footprint.min.y.round() as i64,
    );
}

fn rasterize_shape(raster: &mut RgbaImage, element: &ShapeElement) {
    match element.shape_kind() {
        ShapeKind::Circle => {
            fill_circle(raster, element.center(), element.size().x / 2.0, element.fill());
        }
        ShapeKind::Square => fill_rect(raster, element.rect(), element.fill()),
        ShapeKind::Triangle => {
            let [a, b, c] = element.triangle_points();
            fill_triangle(raster, a, b, c, element.fill());
        }
    }
}

fn rasterize_stroke(raster: &mut RgbaImage, element: &StrokeElement) {
    let half_width = (element.width() / 2.0).max(0.5);
    for pair in element.points().windows(2) {
        stamp_segment(raster, pair[0], pair[1], half_width, element.color());
    }
}

/// Clamped integer pixel range covering `rect`
fn pixel_span(raster: &RgbaImage, rect: Rect) -> (u32, u32, u32, u32) {
    let x0 = rect.min.x.floor().max(0.0) as u32;
    let y0 = rect.min.y.floor().max(0.0) as u32;
    let x1 = (rect.max.x.ceil().max(0.0) as u32).min(raster.width());
    let y1 = (rect.max.y.ceil().max(0.0) as u32).min(raster.height());
    (x0, y0, x1, y1)
}

fn fill_rect(raster: &mut RgbaImage, rect: Rect, color: Color32) {
    let pixel = rgba(color);
    let (x0, y0, x1, y1) = pixel_span(raster, rect);
    for y in y0..y1 {
        for x in x0..x1 {
            raster.put_pixel(x, y, pixel);
        }
    }
}

fn fill_circle(raster: &mut RgbaImage, center: Pos2, radius: f32, color: Color32) {
    let pixel = rgba(color);
    let bounds = Rect::from_center_size(center, egui::Vec2::splat(radius * 2.0));
    let (x0, y0, x1, y1) = pixel_span(raster, bounds);
    for y in y0..y1 {
        for x in x0..x1 {
            let p = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            if (p - center).length() <= radius {
                raster.put_pixel(x, y, pixel);
            }
        }
    }
}

fn fill_triangle(raster: &mut RgbaImage, a: Pos2, b: Pos2, c: Pos2, color: Color32) {
    let pixel = rgba(color);
    let bounds = crate::element::common::calculate_bounds(&[a, b, c]);
    let (x0, y0, x1, y1) = pixel_span(raster, bounds);
    for y in y0..y1 {
        for x in x0..x1 {
            let p = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            if crate::element::common::point_in_triangle(p, a, b, c) {
                raster.put_pixel(x, y, pixel);
            }
        }
    }
}

fn stamp_segment(raster: &mut RgbaImage, start: Pos2, end: Pos2, half_width: f32, color: Color32) {
    let pixel = rgba(color);
    let bounds = crate::element::common::calculate_bounds(&[start, end]).expand(half_width + 1.0);
    let (x0, y0, x1, y1) = pixel_span(raster, bounds);
    for y in y0..y1 {
        for x in x0..x1 {
            let p = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            if crate::element::common::distance_to_line_segment(p, start, end) <= half_width {
                raster.put_pixel(x, y, pixel);
            }
        }
    }
}
