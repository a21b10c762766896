use std::io::Cursor;

use ab_glyph::{Font, FontArc, FontVec, PxScale, ScaleFont, point};
use egui::{Color32, FontFamily, Pos2};
use image::imageops::{self, FilterType};
use image::{ImageFormat, Pixel, Rgba, RgbaImage};
use log::{debug, info};

use crate::document::Document;
use crate::element::{
    BackgroundImage, DrawableObject, Element, ObjectKind, TEXT_LINE_HEIGHT, Text, distance_to_line_segment,
};
use crate::error::{EditorError, EditorResult};

/// Segments used to approximate a circle outline
const CIRCLE_SEGMENTS: usize = 96;

/// Flatten the document into a PNG covering the whole canvas
pub fn export_png(document: &Document, canvas_background: Color32) -> EditorResult<Vec<u8>> {
    let canvas = flatten(document, canvas_background)?;
    let mut bytes = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|err| EditorError::ExportFailed(err.to_string()))?;
    info!("🖼️ Exported {}x{} canvas ({} bytes)", canvas.width(), canvas.height(), bytes.len());
    Ok(bytes)
}

/// Paint every visible object onto an image the size of the canvas, back to front
pub fn flatten(document: &Document, canvas_background: Color32) -> EditorResult<RgbaImage> {
    if !document.has_background() {
        return Err(EditorError::NoBackgroundLoaded);
    }

    let size = document.canvas_size();
    let (width, height) = (size.x.round() as u32, size.y.round() as u32);
    if width == 0 || height == 0 {
        return Err(EditorError::ExportFailed(format!("empty canvas ({}x{})", width, height)));
    }

    let visible: Vec<&DrawableObject> = document.objects().iter().filter(|obj| obj.visible()).collect();
    let fonts = if visible.iter().any(|obj| obj.kind().is_text()) {
        Some(BundledFonts::load()?)
    } else {
        None
    };

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba(rgba(canvas_background, 1.0)));
    for object in visible {
        paint_object(&mut canvas, object, fonts.as_ref());
    }
    Ok(canvas)
}

fn paint_object(canvas: &mut RgbaImage, object: &DrawableObject, fonts: Option<&BundledFonts>) {
    let opacity = object.opacity();
    match object.kind() {
        ObjectKind::BackgroundImage(background) => paint_background(canvas, background, opacity),
        ObjectKind::Rectangle(rect) => {
            let b = rect.bounds();
            let corners = [b.left_top(), b.right_top(), b.right_bottom(), b.left_bottom(), b.left_top()];
            let color = rgba(rect.stroke_color(), opacity);
            paint_polyline(canvas, &corners, rect.stroke_width() as f32, color);
        }
        ObjectKind::Circle(circle) => {
            let points: Vec<Pos2> = (0..=CIRCLE_SEGMENTS)
                .map(|i| {
                    let angle = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
                    circle.center() + egui::Vec2::angled(angle) * circle.radius()
                })
                .collect();
            let color = rgba(circle.stroke_color(), opacity);
            paint_polyline(canvas, &points, circle.stroke_width() as f32, color);
        }
        ObjectKind::FreehandPath(path) => {
            let color = rgba(path.stroke_color(), opacity);
            paint_polyline(canvas, path.points(), path.stroke_width() as f32, color);
        }
        ObjectKind::Text(text) => {
            if let Some(fonts) = fonts {
                paint_text(canvas, text, opacity, fonts);
            }
        }
    }
}

fn paint_background(canvas: &mut RgbaImage, background: &BackgroundImage, opacity: f32) {
    let bitmap = background.bitmap();
    let scale = background.scale();
    let width = ((bitmap.width() as f32 * scale).round() as u32).max(1);
    let height = ((bitmap.height() as f32 * scale).round() as u32).max(1);

    let mut scaled = imageops::resize(bitmap.pixels(), width, height, FilterType::Triangle);
    if opacity < 1.0 {
        for pixel in scaled.pixels_mut() {
            pixel[3] = (pixel[3] as f32 * opacity).round() as u8;
        }
    }

    let left = (background.center().x - width as f32 / 2.0).round() as i64;
    let top = (background.center().y - height as f32 / 2.0).round() as i64;
    imageops::overlay(canvas, &scaled, left, top);
}

fn rgba(color: Color32, opacity: f32) -> [u8; 4] {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    [r, g, b, (a as f32 * opacity.clamp(0.0, 1.0)).round() as u8]
}

fn paint_polyline(canvas: &mut RgbaImage, points: &[Pos2], thickness: f32, color: [u8; 4]) {
    let mut mask = CoverageMask::for_canvas(canvas);
    let half_width = (thickness / 2.0).max(0.5);
    for segment in points.windows(2) {
        mask.stroke_segment(segment[0], segment[1], half_width);
    }
    mask.composite(canvas, color);
}

fn paint_text(canvas: &mut RgbaImage, text: &Text, opacity: f32, fonts: &BundledFonts) {
    let font = fonts.for_family(&text.family());
    let size = text.font_size() as f32;
    let scale = PxScale::from(size);
    let scaled = font.as_scaled(scale);
    let origin = text.rect().min;

    let mut mask = CoverageMask::for_canvas(canvas);
    for (row, line) in text.content().lines().enumerate() {
        let baseline = origin.y + row as f32 * size * TEXT_LINE_HEIGHT + scaled.ascent();
        let mut caret = origin.x;
        let mut previous = None;
        for ch in line.chars() {
            let id = font.glyph_id(ch);
            if let Some(previous) = previous {
                caret += scaled.kern(previous, id);
            }
            if let Some(outlined) = font.outline_glyph(id.with_scale_and_position(scale, point(caret, baseline))) {
                let bounds = outlined.px_bounds();
                let (left, top) = (bounds.min.x as i64, bounds.min.y as i64);
                outlined.draw(|x, y, coverage| mask.cover(left + x as i64, top + y as i64, coverage));
            }
            caret += scaled.h_advance(id);
            previous = Some(id);
        }
    }
    mask.composite(canvas, rgba(text.fill_color(), opacity));
}

/// How much of each canvas pixel one object covers.
///
/// Overlapping stamps keep the larger coverage, and the object's color is
/// blended once per pixel at the end.
struct CoverageMask {
    width: u32,
    height: u32,
    coverage: Vec<f32>,
}

impl CoverageMask {
    fn for_canvas(canvas: &RgbaImage) -> Self {
        let (width, height) = canvas.dimensions();
        Self {
            width,
            height,
            coverage: vec![0.0; width as usize * height as usize],
        }
    }

    fn cover(&mut self, x: i64, y: i64, amount: f32) {
        if amount <= 0.0 || x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let cell = &mut self.coverage[y as usize * self.width as usize + x as usize];
        *cell = cell.max(amount.min(1.0));
    }

    /// Anti-aliased coverage of a segment with round caps
    fn stroke_segment(&mut self, from: Pos2, to: Pos2, half_width: f32) {
        let reach = half_width + 1.0;
        let min_x = (from.x.min(to.x) - reach).floor() as i64;
        let max_x = (from.x.max(to.x) + reach).ceil() as i64;
        let min_y = (from.y.min(to.y) - reach).floor() as i64;
        let max_y = (from.y.max(to.y) + reach).ceil() as i64;

        for y in min_y.max(0)..=max_y.min(self.height as i64 - 1) {
            for x in min_x.max(0)..=max_x.min(self.width as i64 - 1) {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                let distance = distance_to_line_segment(center, from, to);
                self.cover(x, y, (half_width + 0.5 - distance).clamp(0.0, 1.0));
            }
        }
    }

    fn composite(&self, canvas: &mut RgbaImage, color: [u8; 4]) {
        let [r, g, b, a] = color;
        for (index, &coverage) in self.coverage.iter().enumerate() {
            let alpha = (a as f32 * coverage).round() as u8;
            if alpha == 0 {
                continue;
            }
            let x = (index % self.width as usize) as u32;
            let y = (index / self.width as usize) as u32;
            canvas.get_pixel_mut(x, y).blend(&Rgba([r, g, b, alpha]));
        }
    }
}

/// egui's bundled fonts, so exports never depend on system fonts
struct BundledFonts {
    proportional: FontArc,
    monospace: FontArc,
}

impl BundledFonts {
    fn load() -> EditorResult<Self> {
        let definitions = egui::FontDefinitions::default();
        Ok(Self {
            proportional: first_font(&definitions, &FontFamily::Proportional)?,
            monospace: first_font(&definitions, &FontFamily::Monospace)?,
        })
    }

    fn for_family(&self, family: &FontFamily) -> &FontArc {
        match family {
            FontFamily::Monospace => &self.monospace,
            _ => &self.proportional,
        }
    }
}

fn first_font(definitions: &egui::FontDefinitions, family: &FontFamily) -> EditorResult<FontArc> {
    let missing = || EditorError::ExportFailed(format!("no bundled font for {:?}", family));
    let name = definitions
        .families
        .get(family)
        .and_then(|names| names.first())
        .ok_or_else(missing)?;
    let data = definitions.font_data.get(name).ok_or_else(missing)?;
    let font = FontVec::try_from_vec_and_index(data.font.to_vec(), data.index)
        .map_err(|err| EditorError::ExportFailed(format!("bundled font {}: {}", name, err)))?;
    debug!("Loaded {} for export", name);
    Ok(FontArc::new(font))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{AttrPatch, Bitmap, factory};
    use crate::id_generator::{BACKGROUND_ID, ObjectId};
    use egui::Vec2;

    fn document_with_background() -> Document {
        let mut document = Document::new(Vec2::new(200.0, 100.0), 40.0);
        document.load_background(Bitmap::new(RgbaImage::from_pixel(16, 6, Rgba([255, 0, 0, 255]))));
        document
    }

    /// A loaded document whose background is hidden, so the canvas stays white
    fn blank_document() -> Document {
        let mut document = document_with_background();
        crate::layer::toggle_visibility(&mut document, BACKGROUND_ID).unwrap();
        document
    }

    fn add_path(document: &mut Document, points: &[(f32, f32)], color: Color32, width: u32) -> ObjectId {
        let points = points.iter().map(|&(x, y)| Pos2::new(x, y)).collect();
        document.add_object(factory::create_path(points, color, width)).unwrap()
    }

    fn dark_pixels(canvas: &RgbaImage) -> usize {
        canvas.pixels().filter(|p| p.0[0] < 128).count()
    }

    #[test]
    fn test_flatten_requires_background() {
        let document = Document::new(Vec2::new(200.0, 100.0), 40.0);
        assert_eq!(flatten(&document, Color32::WHITE), Err(EditorError::NoBackgroundLoaded));
    }

    #[test]
    fn test_flatten_paints_background_and_shapes() {
        let mut document = document_with_background();
        let rect = factory::create_rectangle(Pos2::new(20.0, 20.0), Vec2::new(10.0, 10.0), Color32::BLUE, 2);
        document.add_object(rect).unwrap();

        let canvas = flatten(&document, Color32::WHITE).unwrap();
        assert_eq!(canvas.dimensions(), (200, 100));
        // Scale is min(160/16, 60/6) = 10, so the background covers the center
        let [r, g, b, a] = canvas.get_pixel(100, 50).0;
        assert!(r > 250 && g < 5 && b < 5 && a > 250);
        // Corners stay canvas colored
        assert_eq!(canvas.get_pixel(0, 0).0, [255, 255, 255, 255]);
        // Rectangle outline
        assert_eq!(canvas.get_pixel(15, 20).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_hidden_objects_are_not_exported() {
        let mut document = document_with_background();
        let rect = factory::create_rectangle(Pos2::new(20.0, 20.0), Vec2::new(10.0, 10.0), Color32::BLUE, 2);
        let id = document.add_object(rect).unwrap();
        crate::layer::toggle_visibility(&mut document, id).unwrap();

        let canvas = flatten(&document, Color32::WHITE).unwrap();
        assert_eq!(canvas.get_pixel(15, 20).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_export_png_decodes() {
        let bytes = export_png(&document_with_background(), Color32::WHITE).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (200, 100));
    }

    #[test]
    fn test_circle_outline_is_painted() {
        let mut document = blank_document();
        let circle = factory::create_circle(Pos2::new(100.0, 50.0), 30.0, Color32::BLUE, 4);
        document.add_object(circle).unwrap();

        let canvas = flatten(&document, Color32::WHITE).unwrap();
        assert_eq!(canvas.get_pixel(130, 50).0, [0, 0, 255, 255]);
        assert_eq!(canvas.get_pixel(70, 50).0, [0, 0, 255, 255]);
        assert_eq!(canvas.get_pixel(100, 50).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_half_opacity_stroke_blends_once() {
        let mut document = blank_document();
        let id = add_path(&mut document, &[(20.0, 50.0), (100.0, 50.0), (180.0, 50.0)], Color32::BLACK, 10);
        document.mutate_object(id, &AttrPatch::opacity(0.5)).unwrap();

        let canvas = flatten(&document, Color32::WHITE).unwrap();
        for x in [60, 100, 140] {
            let [r, g, b, a] = canvas.get_pixel(x, 50).0;
            assert!((125..=130).contains(&r), "x {}: {:?}", x, [r, g, b, a]);
            assert_eq!((r, g, b, a), (r, r, r, 255));
        }
    }

    #[test]
    fn test_higher_layer_paints_over_lower() {
        let mut document = blank_document();
        add_path(&mut document, &[(20.0, 50.0), (180.0, 50.0)], Color32::RED, 6);
        let vertical = add_path(&mut document, &[(100.0, 10.0), (100.0, 90.0)], Color32::BLUE, 6);

        let canvas = flatten(&document, Color32::WHITE).unwrap();
        assert_eq!(canvas.get_pixel(100, 50).0, [0, 0, 255, 255]);

        let index = document.index_of(vertical).unwrap();
        crate::layer::move_down(&mut document, index).unwrap();
        let canvas = flatten(&document, Color32::WHITE).unwrap();
        assert_eq!(canvas.get_pixel(100, 50).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_text_is_rasterized_inside_its_box() {
        let mut document = blank_document();
        let text = factory::create_text("HELLO", "Arial", 40, Color32::BLACK, Pos2::new(100.0, 50.0));
        let id = document.add_object(text).unwrap();
        let bounds = document.get(id).unwrap().rect();

        let canvas = flatten(&document, Color32::WHITE).unwrap();
        assert!(dark_pixels(&canvas) > 50);
        // Glyph widths differ from the layout estimate, so only the rows and the left edge are exact
        for (x, y, pixel) in canvas.enumerate_pixels() {
            if pixel.0[0] < 128 {
                assert!(x as f32 >= bounds.min.x - 2.0, "ink left of the box at {},{}", x, y);
                assert!(y as f32 >= bounds.min.y - 2.0 && y as f32 <= bounds.max.y + 2.0, "ink at {},{}", x, y);
            }
        }
    }

    #[test]
    fn test_monospace_text_is_rasterized() {
        let mut document = blank_document();
        let text = factory::create_text("code", "Courier New", 30, Color32::BLACK, Pos2::new(100.0, 50.0));
        document.add_object(text).unwrap();

        let canvas = flatten(&document, Color32::WHITE).unwrap();
        assert!(dark_pixels(&canvas) > 20);
    }

    #[test]
    fn test_transparent_text_leaves_no_ink() {
        let mut document = blank_document();
        let text = factory::create_text("HELLO", "Arial", 40, Color32::BLACK, Pos2::new(100.0, 50.0));
        let id = document.add_object(text).unwrap();
        document.mutate_object(id, &AttrPatch::opacity(0.0)).unwrap();

        let canvas = flatten(&document, Color32::WHITE).unwrap();
        assert_eq!(dark_pixels(&canvas), 0);
    }
}
