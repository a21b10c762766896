use egui::{Color32, Painter, Pos2, Rect, Stroke as EguiStroke, Vec2};

use super::Element;

/// Outlined rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    // Geometry without the stroke
    bounds: Rect,
    stroke_color: Color32,
    stroke_width: u32,
}

impl Rectangle {
    pub fn new(bounds: Rect, stroke_color: Color32, stroke_width: u32) -> Self {
        Self {
            bounds,
            stroke_color,
            stroke_width,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn stroke_color(&self) -> Color32 {
        self.stroke_color
    }

    pub fn stroke_width(&self) -> u32 {
        self.stroke_width
    }

    pub(crate) fn set_stroke_color(&mut self, color: Color32) {
        self.stroke_color = color;
    }

    pub(crate) fn set_stroke_width(&mut self, width: u32) {
        self.stroke_width = width;
    }
}

impl Element for Rectangle {
    fn element_type(&self) -> &'static str {
        "rectangle"
    }

    fn rect(&self) -> Rect {
        self.bounds.expand(self.stroke_width as f32 / 2.0)
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        self.rect().contains(pos)
    }

    fn translate(&mut self, delta: Vec2) {
        self.bounds = self.bounds.translate(delta);
    }

    fn draw(&self, painter: &Painter, origin: Vec2, opacity: f32) {
        painter.rect_stroke(
            self.bounds.translate(origin),
            0.0,
            EguiStroke::new(self.stroke_width as f32, self.stroke_color.gamma_multiply(opacity)),
        );
    }
}

/// Outlined circle
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    center: Pos2,
    radius: f32,
    stroke_color: Color32,
    stroke_width: u32,
}

impl Circle {
    pub fn new(center: Pos2, radius: f32, stroke_color: Color32, stroke_width: u32) -> Self {
        Self {
            center,
            radius,
            stroke_color,
            stroke_width,
        }
    }

    pub fn center(&self) -> Pos2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn stroke_color(&self) -> Color32 {
        self.stroke_color
    }

    pub fn stroke_width(&self) -> u32 {
        self.stroke_width
    }

    pub(crate) fn set_stroke_color(&mut self, color: Color32) {
        self.stroke_color = color;
    }

    pub(crate) fn set_stroke_width(&mut self, width: u32) {
        self.stroke_width = width;
    }
}

impl Element for Circle {
    fn element_type(&self) -> &'static str {
        "circle"
    }

    fn rect(&self) -> Rect {
        let extent = 2.0 * self.radius + self.stroke_width as f32;
        Rect::from_center_size(self.center, Vec2::splat(extent))
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        self.rect().contains(pos)
    }

    fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    fn draw(&self, painter: &Painter, origin: Vec2, opacity: f32) {
        painter.circle_stroke(
            self.center + origin,
            self.radius,
            EguiStroke::new(self.stroke_width as f32, self.stroke_color.gamma_multiply(opacity)),
        );
    }
}
