use egui::{Color32, Painter, Pos2, Rect, Vec2};

mod common;
pub(crate) mod image;
pub(crate) mod path;
pub(crate) mod shape;
pub(crate) mod text;

pub use common::{CONVERTED_FONT_SCALE, FONT_SIZE_RANGE, OPACITY_RANGE, STROKE_WIDTH_RANGE};
pub(crate) use common::{TEXT_LINE_HEIGHT, distance_to_line_segment};
pub use self::image::{BackgroundImage, Bitmap, fit_scale};
pub use path::FreehandPath;
pub use shape::{Circle, Rectangle};
pub use text::Text;

use crate::error::{EditorError, EditorResult};
use crate::id_generator::ObjectId;

/// Common trait that all drawable kinds implement
pub trait Element {
    /// Get the element type as a string
    fn element_type(&self) -> &'static str;

    /// Get the bounding rectangle for this element, stroke included
    fn rect(&self) -> Rect;

    /// Test if the element contains the given position
    fn hit_test(&self, pos: Pos2) -> bool;

    /// Translate the element by the given delta
    fn translate(&mut self, delta: Vec2);

    /// Draw the element with the canvas origin at `origin` in screen space
    fn draw(&self, painter: &Painter, origin: Vec2, opacity: f32);
}

/// Kind-specific part of a drawable object
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Text(Text),
    Rectangle(Rectangle),
    Circle(Circle),
    FreehandPath(FreehandPath),
    BackgroundImage(BackgroundImage),
}

impl ObjectKind {
    pub fn is_text(&self) -> bool {
        matches!(self, ObjectKind::Text(_))
    }

    pub fn is_background(&self) -> bool {
        matches!(self, ObjectKind::BackgroundImage(_))
    }

    /// Stroke width of stroked kinds
    pub fn stroke_width(&self) -> Option<u32> {
        match self {
            ObjectKind::Rectangle(r) => Some(r.stroke_width()),
            ObjectKind::Circle(c) => Some(c.stroke_width()),
            ObjectKind::FreehandPath(p) => Some(p.stroke_width()),
            ObjectKind::Text(_) | ObjectKind::BackgroundImage(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            ObjectKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_background(&self) -> Option<&BackgroundImage> {
        match self {
            ObjectKind::BackgroundImage(b) => Some(b),
            _ => None,
        }
    }
}

impl Element for ObjectKind {
    fn element_type(&self) -> &'static str {
        match self {
            ObjectKind::Text(t) => t.element_type(),
            ObjectKind::Rectangle(r) => r.element_type(),
            ObjectKind::Circle(c) => c.element_type(),
            ObjectKind::FreehandPath(p) => p.element_type(),
            ObjectKind::BackgroundImage(b) => b.element_type(),
        }
    }

    fn rect(&self) -> Rect {
        match self {
            ObjectKind::Text(t) => t.rect(),
            ObjectKind::Rectangle(r) => r.rect(),
            ObjectKind::Circle(c) => c.rect(),
            ObjectKind::FreehandPath(p) => p.rect(),
            ObjectKind::BackgroundImage(b) => b.rect(),
        }
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        match self {
            ObjectKind::Text(t) => t.hit_test(pos),
            ObjectKind::Rectangle(r) => r.hit_test(pos),
            ObjectKind::Circle(c) => c.hit_test(pos),
            ObjectKind::FreehandPath(p) => p.hit_test(pos),
            ObjectKind::BackgroundImage(b) => b.hit_test(pos),
        }
    }

    fn translate(&mut self, delta: Vec2) {
        match self {
            ObjectKind::Text(t) => t.translate(delta),
            ObjectKind::Rectangle(r) => r.translate(delta),
            ObjectKind::Circle(c) => c.translate(delta),
            ObjectKind::FreehandPath(p) => p.translate(delta),
            ObjectKind::BackgroundImage(b) => b.translate(delta),
        }
    }

    fn draw(&self, painter: &Painter, origin: Vec2, opacity: f32) {
        match self {
            ObjectKind::Text(t) => t.draw(painter, origin, opacity),
            ObjectKind::Rectangle(r) => r.draw(painter, origin, opacity),
            ObjectKind::Circle(c) => c.draw(painter, origin, opacity),
            ObjectKind::FreehandPath(p) => p.draw(painter, origin, opacity),
            // Needs its uploaded texture, painted by `CanvasRenderer`
            ObjectKind::BackgroundImage(_) => {}
        }
    }
}

/// An object on the canvas: common attributes plus its kind.
///
/// The z-index is not stored; it is the object's position in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawableObject {
    id: ObjectId,
    visible: bool,
    opacity: f32,
    kind: ObjectKind,
}

impl DrawableObject {
    pub(crate) fn new(id: ObjectId, kind: ObjectKind) -> Self {
        Self {
            id,
            visible: true,
            opacity: 1.0,
            kind,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut ObjectKind {
        &mut self.kind
    }

    pub(crate) fn set_visibility(&mut self, visible: bool, opacity: f32) {
        self.visible = visible;
        self.opacity = opacity;
    }

    /// Apply a partial update. Either every field of the patch is applied or none.
    pub(crate) fn apply_patch(&mut self, patch: &AttrPatch) -> EditorResult<()> {
        self.validate_patch(patch)?;

        if let Some(opacity) = patch.opacity {
            self.opacity = opacity;
        }

        match &mut self.kind {
            ObjectKind::Text(text) => {
                if let Some(content) = &patch.content {
                    text.set_content(content.clone());
                }
                if let Some(size) = patch.font_size {
                    text.set_font_size(size);
                }
                if let Some(family) = &patch.font_family {
                    text.set_font_family(family.clone());
                }
                if let Some(color) = patch.fill_color {
                    text.set_fill_color(color);
                }
            }
            ObjectKind::Rectangle(rect) => {
                if let Some(width) = patch.stroke_width {
                    rect.set_stroke_width(width);
                }
                if let Some(color) = patch.stroke_color {
                    rect.set_stroke_color(color);
                }
            }
            ObjectKind::Circle(circle) => {
                if let Some(width) = patch.stroke_width {
                    circle.set_stroke_width(width);
                }
                if let Some(color) = patch.stroke_color {
                    circle.set_stroke_color(color);
                }
            }
            ObjectKind::FreehandPath(path) => {
                if let Some(width) = patch.stroke_width {
                    path.set_stroke_width(width);
                }
                if let Some(color) = patch.stroke_color {
                    path.set_stroke_color(color);
                }
            }
            ObjectKind::BackgroundImage(_) => {}
        }

        Ok(())
    }

    fn validate_patch(&self, patch: &AttrPatch) -> EditorResult<()> {
        let kind = self.kind.element_type();
        let wrong_kind = |attribute: &'static str| EditorError::InvalidAttributeForKind { attribute, kind };

        if let Some(opacity) = patch.opacity {
            common::validate_opacity(opacity)?;
        }

        let is_text = self.kind.is_text();
        let is_stroked = self.kind.stroke_width().is_some();

        if !is_text {
            if patch.font_size.is_some() {
                return Err(wrong_kind("fontSize"));
            }
            if patch.font_family.is_some() {
                return Err(wrong_kind("fontFamily"));
            }
            if patch.fill_color.is_some() {
                return Err(wrong_kind("fillColor"));
            }
            if patch.content.is_some() {
                return Err(wrong_kind("content"));
            }
        }
        if !is_stroked {
            if patch.stroke_width.is_some() {
                return Err(wrong_kind("strokeWidth"));
            }
            if patch.stroke_color.is_some() {
                return Err(wrong_kind("strokeColor"));
            }
        }

        if let Some(size) = patch.font_size {
            common::validate_positive("fontSize", size)?;
        }
        if let Some(width) = patch.stroke_width {
            common::validate_positive("strokeWidth", width)?;
        }
        if let Some(family) = &patch.font_family {
            if family.trim().is_empty() {
                return Err(EditorError::InvalidAttributeValue {
                    attribute: "fontFamily",
                    reason: "must not be empty".to_owned(),
                });
            }
        }

        Ok(())
    }
}

impl Element for DrawableObject {
    fn element_type(&self) -> &'static str {
        self.kind.element_type()
    }

    fn rect(&self) -> Rect {
        self.kind.rect()
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        self.visible && self.kind.hit_test(pos)
    }

    fn translate(&mut self, delta: Vec2) {
        self.kind.translate(delta);
    }

    fn draw(&self, painter: &Painter, origin: Vec2, opacity: f32) {
        if self.visible {
            self.kind.draw(painter, origin, self.opacity * opacity);
        }
    }
}

/// Partial attribute update for `Document::mutate_object`.
///
/// Visibility is not patchable; it only changes through `layer::toggle_visibility`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrPatch {
    pub opacity: Option<f32>,
    pub stroke_width: Option<u32>,
    pub stroke_color: Option<Color32>,
    pub font_size: Option<u32>,
    pub font_family: Option<String>,
    pub fill_color: Option<Color32>,
    pub content: Option<String>,
}

impl AttrPatch {
    pub fn opacity(opacity: f32) -> Self {
        Self {
            opacity: Some(opacity),
            ..Default::default()
        }
    }

    pub fn stroke_width(width: u32) -> Self {
        Self {
            stroke_width: Some(width),
            ..Default::default()
        }
    }

    pub fn stroke_color(color: Color32) -> Self {
        Self {
            stroke_color: Some(color),
            ..Default::default()
        }
    }

    pub fn font_size(size: u32) -> Self {
        Self {
            font_size: Some(size),
            ..Default::default()
        }
    }

    pub fn font_family(family: impl Into<String>) -> Self {
        Self {
            font_family: Some(family.into()),
            ..Default::default()
        }
    }

    pub fn fill_color(color: Color32) -> Self {
        Self {
            fill_color: Some(color),
            ..Default::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Factory functions for creating object kinds
pub mod factory {
    use super::*;

    /// Create a text element centered on `center`
    pub fn create_text(content: &str, font_family: &str, font_size: u32, fill: Color32, center: Pos2) -> ObjectKind {
        ObjectKind::Text(Text::centered(
            content.to_owned(),
            font_family.to_owned(),
            font_size,
            fill,
            center,
        ))
    }

    /// Create a rectangle centered on `center`
    pub fn create_rectangle(center: Pos2, size: Vec2, stroke: Color32, stroke_width: u32) -> ObjectKind {
        ObjectKind::Rectangle(Rectangle::new(
            Rect::from_center_size(center, size),
            stroke,
            stroke_width,
        ))
    }

    /// Create a circle
    pub fn create_circle(center: Pos2, radius: f32, stroke: Color32, stroke_width: u32) -> ObjectKind {
        ObjectKind::Circle(Circle::new(center, radius, stroke, stroke_width))
    }

    /// Create a freehand path
    pub fn create_path(points: Vec<Pos2>, stroke: Color32, stroke_width: u32) -> ObjectKind {
        ObjectKind::FreehandPath(FreehandPath::new(points, stroke, stroke_width))
    }
}
