use egui::{Color32, Vec2};
use serde::{Deserialize, Serialize};

/// Font families offered by the property panel
pub const FONT_FAMILIES: [&str; 6] = [
    "Arial",
    "Times New Roman",
    "Courier New",
    "Georgia",
    "Verdana",
    "Helvetica",
];

/// Editor defaults. Persisted between sessions through eframe storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old settings
pub struct EditorConfig {
    /// Space kept free around a freshly loaded background image
    pub canvas_margin: f32,
    /// Canvas size used until the UI reports the real one
    pub initial_canvas_size: Vec2,
    pub canvas_background: Color32,
    pub default_color: Color32,
    pub brush_size: u32,
    pub rectangle_size: Vec2,
    pub circle_radius: f32,
    pub shape_stroke_width: u32,
    pub text_content: String,
    pub converted_text_content: String,
    pub font_family: String,
    pub font_size: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_margin: 40.0,
            initial_canvas_size: Vec2::new(1000.0, 800.0),
            canvas_background: Color32::WHITE,
            default_color: Color32::BLACK,
            brush_size: 2,
            rectangle_size: Vec2::new(100.0, 70.0),
            circle_radius: 50.0,
            shape_stroke_width: 2,
            text_content: "Click to edit text".to_owned(),
            converted_text_content: "Edit this text".to_owned(),
            font_family: FONT_FAMILIES[0].to_owned(),
            font_size: 20,
        }
    }
}
