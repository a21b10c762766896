use egui::{Color32, Painter, Pos2, Rect, Stroke as EguiStroke, Vec2};

use super::Element;
use crate::element::common;

/// Freehand path drawn with the brush
#[derive(Debug, Clone, PartialEq)]
pub struct FreehandPath {
    points: Vec<Pos2>,
    stroke_color: Color32,
    stroke_width: u32,
}

impl FreehandPath {
    pub fn new(points: Vec<Pos2>, stroke_color: Color32, stroke_width: u32) -> Self {
        Self {
            points,
            stroke_color,
            stroke_width,
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
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

impl Element for FreehandPath {
    fn element_type(&self) -> &'static str {
        "path"
    }

    fn rect(&self) -> Rect {
        common::calculate_bounds(&self.points, self.stroke_width as f32 / 2.0)
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        if self.points.len() < 2 {
            return false;
        }

        let tolerance = (self.stroke_width as f32 / 2.0).max(common::PATH_HIT_TOLERANCE);
        self.points
            .windows(2)
            .any(|segment| common::distance_to_line_segment(pos, segment[0], segment[1]) <= tolerance)
    }

    fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }

    fn draw(&self, painter: &Painter, origin: Vec2, opacity: f32) {
        if self.points.len() < 2 {
            return;
        }

        painter.add(egui::Shape::line(
            self.points.iter().map(|p| *p + origin).collect::<Vec<_>>(),
            EguiStroke::new(self.stroke_width as f32, self.stroke_color.gamma_multiply(opacity)),
        ));
    }
}
