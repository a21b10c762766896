use egui::{Color32, ColorImage, Pos2, Rect, Stroke, TextureHandle, TextureOptions, Vec2};
use log::debug;

use crate::element::{BackgroundImage, Element, ObjectKind};
use crate::id_generator::DocumentId;
use crate::state::EditorContext;

const SELECTION_COLOR: Color32 = Color32::from_rgb(0, 120, 215);
const SELECTION_PADDING: f32 = 3.0;
const HANDLE_SIZE: f32 = 7.0;

/// Paints the document onto the central canvas.
///
/// The background bitmap is uploaded once per loaded document and reused
/// until another image is opened.
#[derive(Default)]
pub struct CanvasRenderer {
    background: Option<(DocumentId, TextureHandle)>,
}

impl std::fmt::Debug for CanvasRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasRenderer")
            .field("background", &self.background.as_ref().map(|(id, _)| id))
            .finish()
    }
}

impl CanvasRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the whole canvas into `canvas_rect`
    pub fn render(&mut self, ctx: &egui::Context, painter: &egui::Painter, canvas_rect: Rect, editor: &EditorContext) {
        let origin = canvas_rect.min.to_vec2();
        let document = editor.document();

        painter.rect_filled(canvas_rect, 0.0, editor.config().canvas_background);

        for object in document.objects() {
            if !object.visible() {
                continue;
            }
            match object.kind() {
                ObjectKind::BackgroundImage(background) => {
                    let texture = self.background_texture(ctx, document.id(), background);
                    background.paint(painter, texture, origin, object.opacity());
                }
                _ => object.draw(painter, origin, 1.0),
            }
        }

        if let Some(points) = editor.state().stroke_points() {
            if points.len() >= 2 {
                let screen: Vec<Pos2> = points.iter().map(|p| *p + origin).collect();
                painter.add(egui::Shape::line(
                    screen,
                    Stroke::new(editor.brush_size() as f32, editor.color()),
                ));
            }
        }

        if let Some(object) = editor.selection().selected_id().and_then(|id| document.get(id)) {
            draw_selection_outline(painter, object.rect().translate(origin));
        }
    }

    fn background_texture(
        &mut self,
        ctx: &egui::Context,
        document: DocumentId,
        background: &BackgroundImage,
    ) -> egui::TextureId {
        match &self.background {
            Some((id, handle)) if *id == document => handle.id(),
            _ => {
                let pixels = background.bitmap().pixels();
                let size = [pixels.width() as usize, pixels.height() as usize];
                let image = ColorImage::from_rgba_unmultiplied(size, pixels.as_raw());
                let handle = ctx.load_texture(format!("background_{}", document), image, TextureOptions::LINEAR);
                debug!("Uploaded background texture {}x{}", size[0], size[1]);
                let texture = handle.id();
                self.background = Some((document, handle));
                texture
            }
        }
    }
}

fn draw_selection_outline(painter: &egui::Painter, rect: Rect) {
    let rect = rect.expand(SELECTION_PADDING);
    painter.rect_stroke(rect, 0.0, Stroke::new(1.0, SELECTION_COLOR));

    for corner in [rect.left_top(), rect.right_top(), rect.left_bottom(), rect.right_bottom()] {
        let handle = Rect::from_center_size(corner, Vec2::splat(HANDLE_SIZE));
        painter.rect_filled(handle, 0.0, Color32::WHITE);
        painter.rect_stroke(handle, 0.0, Stroke::new(1.0, SELECTION_COLOR));
    }
}
