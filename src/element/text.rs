use egui::{Align2, Color32, FontFamily, FontId, Painter, Pos2, Rect, Vec2};

use super::Element;
use super::common::{TEXT_CHAR_WIDTH, TEXT_LINE_HEIGHT};

/// Editable text element
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    content: String,
    font_family: String,
    font_size: u32,
    fill_color: Color32,
    // Layout box; follows the content unless set explicitly
    rect: Rect,
}

impl Text {
    /// Create a text element centered on `center`
    pub fn centered(content: String, font_family: String, font_size: u32, fill_color: Color32, center: Pos2) -> Self {
        let size = estimate_size(&content, font_size);
        Self {
            content,
            font_family,
            font_size,
            fill_color,
            rect: Rect::from_center_size(center, size),
        }
    }

    /// Create a text element occupying exactly `rect`
    pub fn in_rect(content: String, font_family: String, font_size: u32, fill_color: Color32, rect: Rect) -> Self {
        Self {
            content,
            font_family,
            font_size,
            fill_color,
            rect,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn fill_color(&self) -> Color32 {
        self.fill_color
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.content = content;
        self.relayout();
    }

    pub(crate) fn set_font_size(&mut self, font_size: u32) {
        self.font_size = font_size;
        self.relayout();
    }

    pub(crate) fn set_font_family(&mut self, font_family: String) {
        self.font_family = font_family;
    }

    pub(crate) fn set_fill_color(&mut self, color: Color32) {
        self.fill_color = color;
    }

    fn relayout(&mut self) {
        self.rect = Rect::from_min_size(self.rect.min, estimate_size(&self.content, self.font_size));
    }

    /// The bundled egui family the named font is rendered with
    pub fn family(&self) -> FontFamily {
        match self.font_family.as_str() {
            "Courier New" => FontFamily::Monospace,
            _ => FontFamily::Proportional,
        }
    }

    fn font_id(&self) -> FontId {
        FontId::new(self.font_size as f32, self.family())
    }
}

fn estimate_size(content: &str, font_size: u32) -> Vec2 {
    let size = font_size as f32;
    let lines = content.lines().count().max(1);
    let longest = content.lines().map(|l| l.chars().count()).max().unwrap_or(0).max(1);
    Vec2::new(longest as f32 * size * TEXT_CHAR_WIDTH, lines as f32 * size * TEXT_LINE_HEIGHT)
}

impl Element for Text {
    fn element_type(&self) -> &'static str {
        "text"
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        self.rect.contains(pos)
    }

    fn translate(&mut self, delta: Vec2) {
        self.rect = self.rect.translate(delta);
    }

    fn draw(&self, painter: &Painter, origin: Vec2, opacity: f32) {
        painter.text(
            self.rect.min + origin,
            Align2::LEFT_TOP,
            &self.content,
            self.font_id(),
            self.fill_color.gamma_multiply(opacity),
        );
    }
}
