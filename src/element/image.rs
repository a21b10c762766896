use std::sync::Arc;

use egui::{Color32, Painter, Pos2, Rect, TextureId, Vec2};
use image::RgbaImage;
use log::{debug, info};

use crate::error::{EditorError, EditorResult};

/// Decoded RGBA pixels shared between the document, the renderer and the exporter
#[derive(Clone)]
pub struct Bitmap {
    pixels: Arc<RgbaImage>,
}

// Custom Debug implementation so the pixel buffer is never dumped
impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

impl Bitmap {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    /// Decode an encoded image (png, jpeg, ...) into RGBA pixels
    pub fn decode(bytes: &[u8]) -> EditorResult<Self> {
        let image = image::load_from_memory(bytes).map_err(|err| EditorError::ImageDecode(err.to_string()))?;
        debug!("Decoded image: {}x{}", image.width(), image.height());
        Ok(Self::new(image.to_rgba8()))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// The loaded image every annotation sits on
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundImage {
    bitmap: Bitmap,
    center: Pos2,
    scale: f32,
}

impl BackgroundImage {
    /// Scale the bitmap to fit `canvas_size` minus `margin`, keeping its aspect
    /// ratio, and center it on the canvas.
    pub fn fit_to_canvas(bitmap: Bitmap, canvas_size: Vec2, margin: f32) -> Self {
        let scale = fit_scale(bitmap.size(), canvas_size, margin);
        let center = Pos2::new(canvas_size.x / 2.0, canvas_size.y / 2.0);
        info!(
            "🖼️ Fitting {}x{} image into {}x{} canvas at scale {:.4}",
            bitmap.width(),
            bitmap.height(),
            canvas_size.x,
            canvas_size.y,
            scale
        );
        Self { bitmap, center, scale }
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn center(&self) -> Pos2 {
        self.center
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn element_type(&self) -> &'static str {
        "image"
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, self.bitmap.size() * self.scale)
    }

    pub fn hit_test(&self, pos: Pos2) -> bool {
        self.rect().contains(pos)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Paint the uploaded bitmap texture with the canvas origin at `origin`
    pub fn paint(&self, painter: &Painter, texture: TextureId, origin: Vec2, opacity: f32) {
        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
        painter.image(
            texture,
            self.rect().translate(origin),
            uv,
            Color32::WHITE.gamma_multiply(opacity),
        );
    }
}

/// `min((canvas_w - margin) / w, (canvas_h - margin) / h)`
pub fn fit_scale(bitmap_size: Vec2, canvas_size: Vec2, margin: f32) -> f32 {
    if bitmap_size.x <= 0.0 || bitmap_size.y <= 0.0 {
        return 1.0;
    }
    ((canvas_size.x - margin) / bitmap_size.x).min((canvas_size.y - margin) / bitmap_size.y)
}
