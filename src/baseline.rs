use egui::Vec2;
use image::RgbaImage;

use crate::command::EditorError;
use crate::element::{factory, ImageElement};

/// A decoded source picture the canvas can be (re)built from: either the
/// user's profile picture or the site-wide default.
///
/// Holds the encoded bytes plus the natural dimensions probed at load time,
/// so resets and surface initialization can size the canvas without decoding
/// again.
#[derive(Clone)]
pub struct BaselineImage {
    data: Vec<u8>,
    size: Vec2,
}

impl std::fmt::Debug for BaselineImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaselineImage")
            .field("data_len", &self.data.len())
            .field("size", &self.size)
            .finish()
    }
}

impl BaselineImage {
    /// Decode `data` to learn its natural size. Fails fast on undecodable
    /// input so a broken required picture aborts initialization instead of
    /// surfacing at export time.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, EditorError> {
        let decoded = image::load_from_memory(&data)?;
        let size = Vec2::new(decoded.width() as f32, decoded.height() as f32);
        Ok(Self { data, size })
    }

    /// Wrap an in-memory raster, encoding it as PNG bytes. Used for the
    /// built-in placeholder default picture.
    pub fn from_rgba(image: RgbaImage) -> Result<Self, EditorError> {
        let size = Vec2::new(image.width() as f32, image.height() as f32);
        let data = crate::export::encode_png(&image).map_err(EditorError::ExportFailed)?;
        Ok(Self { data, size })
    }

    /// Flat placeholder avatar used as the site default when no asset is
    /// provided: a light panel with a simple head-and-shoulders silhouette.
    pub fn placeholder(width: u32, height: u32) -> Result<Self, EditorError> {
        let background = image::Rgba([225u8, 228, 232, 255]);
        let silhouette = image::Rgba([160u8, 166, 175, 255]);

        let (w, h) = (width as f32, height as f32);
        let head_center = (w / 2.0, h * 0.38);
        let head_radius = w.min(h) * 0.18;
        let body_center = (w / 2.0, h * 1.05);
        let body_radius = w.min(h) * 0.45;

        let image = RgbaImage::from_fn(width, height, |x, y| {
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
            let in_head = (px - head_center.0).hypot(py - head_center.1) <= head_radius;
            let in_body = (px - body_center.0).hypot(py - body_center.1) <= body_radius;
            if in_head || in_body {
                silhouette
            } else {
                background
            }
        });
        Self::from_rgba(image)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Natural (unrotated) dimensions
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// A fresh anchor element at the canvas top-left, angle 0. Resets must
    /// build a new element rather than reuse the old one, which would carry
    /// stale position and rotation state.
    pub fn to_anchor(&self) -> ImageElement {
        factory::image(self.data.clone(), self.size)
    }
}
