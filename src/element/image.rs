use egui::epaint::Vertex;
use egui::{Color32, ColorImage, Context, Mesh, Painter, Pos2, Rect, TextureHandle, TextureOptions, Vec2};
use log::warn;

use super::{Element, ElementId};

/// Image element holding the encoded bytes of a source picture.
///
/// The position is the fabric-style left/top anchor point: the point the
/// picture rotates around. At right angles the visual footprint extends from
/// that point in a direction that depends on the current angle.
#[derive(Clone)]
pub struct ImageElement {
    id: ElementId,
    data: Vec<u8>,
    size: Vec2,
    position: Pos2,
    angle: f32,

    // Texture caching for on-screen drawing
    texture: Option<TextureHandle>,
    texture_failed: bool,
}

// Custom Debug implementation since TextureHandle doesn't implement Debug
impl std::fmt::Debug for ImageElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageElement")
            .field("id", &self.id)
            .field("data_len", &self.data.len())
            .field("size", &self.size)
            .field("position", &self.position)
            .field("angle", &self.angle)
            .finish()
    }
}

impl ImageElement {
    pub(crate) fn new(id: ElementId, data: Vec<u8>, size: Vec2, position: Pos2) -> Self {
        Self {
            id,
            data,
            size,
            position,
            angle: 0.0,
            texture: None,
            texture_failed: false,
        }
    }

    /// Get the encoded image bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the natural (unrotated) size
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Decode the bytes and upload a texture if we don't have one yet.
    /// A decode failure is remembered so we don't retry every frame.
    pub fn ensure_texture(&mut self, ctx: &Context) {
        if self.texture.is_some() || self.texture_failed {
            return;
        }
        match image::load_from_memory(&self.data) {
            Ok(decoded) => {
                let rgba = decoded.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let pixels = rgba.as_flat_samples();
                let color_image = ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
                self.texture = Some(ctx.load_texture(
                    format!("canvas-image-{}", self.id),
                    color_image,
                    TextureOptions::LINEAR,
                ));
            }
            Err(err) => {
                warn!("failed to decode image element {}: {err}", self.id);
                self.texture_failed = true;
            }
        }
    }

    /// UV corners (screen TL, TR, BR, BL) for the current right-angle rotation.
    fn corner_uvs(&self) -> [Pos2; 4] {
        const BASE: [Pos2; 4] = [
            Pos2::new(0.0, 0.0),
            Pos2::new(1.0, 0.0),
            Pos2::new(1.0, 1.0),
            Pos2::new(0.0, 1.0),
        ];
        let k = ((self.angle / 90.0).round() as usize) % 4;
        std::array::from_fn(|i| BASE[(i + 4 - k) % 4])
    }
}

impl Element for ImageElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn kind(&self) -> &'static str {
        "image"
    }

    fn rect(&self) -> Rect {
        let (w, h) = (self.size.x, self.size.y);
        let p = self.position;
        // The footprint extends away from the rotation origin
        match (self.angle / 90.0).round() as i32 % 4 {
            1 => Rect::from_min_size(Pos2::new(p.x - h, p.y), Vec2::new(h, w)),
            2 => Rect::from_min_size(Pos2::new(p.x - w, p.y - h), Vec2::new(w, h)),
            3 => Rect::from_min_size(Pos2::new(p.x, p.y - w), Vec2::new(h, w)),
            _ => Rect::from_min_size(p, self.size),
        }
    }

    fn angle(&self) -> f32 {
        self.angle
    }

    fn position(&self) -> Pos2 {
        self.position
    }

    fn set_position(&mut self, pos: Pos2) {
        self.position = pos;
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    fn rotate_by(&mut self, degrees: f32) {
        self.angle = (self.angle + degrees).rem_euclid(360.0);
    }

    fn draw(&self, painter: &Painter, origin: Vec2) {
        let rect = self.rect().translate(origin);
        if let Some(texture) = &self.texture {
            let mut mesh = Mesh::with_texture(texture.id());
            let corners = [
                rect.left_top(),
                rect.right_top(),
                rect.right_bottom(),
                rect.left_bottom(),
            ];
            let uvs = self.corner_uvs();
            for (pos, uv) in corners.into_iter().zip(uvs) {
                mesh.vertices.push(Vertex {
                    pos,
                    uv,
                    color: Color32::WHITE,
                });
            }
            mesh.indices.extend([0, 1, 2, 0, 2, 3]);
            painter.add(egui::Shape::mesh(mesh));
        } else {
            // Draw a placeholder rectangle until the texture is ready
            painter.rect_filled(rect, 0.0, Color32::from_gray(200));
            painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, Color32::from_gray(100)));
        }
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        self.rect().contains(pos)
    }
}
