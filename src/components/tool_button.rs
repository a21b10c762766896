use egui::{Align2, Color32, FontId, Sense, Stroke, Vec2};

const BUTTON_SIZE: Vec2 = Vec2::new(72.0, 52.0);
const ACTIVE_FILL: Color32 = Color32::from_rgb(219, 234, 254);
const ACTIVE_BORDER: Color32 = Color32::from_rgb(59, 130, 246);

/// Toolbox button: an icon above a caption, optionally highlighted
pub struct ToolButton {
    icon: &'static str,
    caption: &'static str,
    active: bool,
    enabled: bool,
}

impl ToolButton {
    pub fn new(icon: &'static str, caption: &'static str) -> Self {
        Self {
            icon,
            caption,
            active: false,
            enabled: true,
        }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let sense = if self.enabled { Sense::click() } else { Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(BUTTON_SIZE, sense);

        if ui.is_rect_visible(rect) {
            let visuals = ui.style().visuals.clone();
            let fill = if self.active {
                ACTIVE_FILL
            } else if self.enabled && response.hovered() {
                visuals.widgets.hovered.weak_bg_fill
            } else {
                Color32::TRANSPARENT
            };
            ui.painter().rect_filled(rect, 6.0, fill);
            if self.active {
                ui.painter().rect_stroke(rect, 6.0, Stroke::new(1.5, ACTIVE_BORDER));
            }

            let mut text_color = visuals.text_color();
            if !self.enabled {
                text_color = text_color.gamma_multiply(0.4);
            }
            ui.painter().text(
                rect.center() - Vec2::new(0.0, 8.0),
                Align2::CENTER_CENTER,
                self.icon,
                FontId::proportional(20.0),
                text_color,
            );
            ui.painter().text(
                rect.center() + Vec2::new(0.0, 14.0),
                Align2::CENTER_CENTER,
                self.caption,
                FontId::proportional(11.0),
                text_color,
            );
        }

        // Disabled buttons only sense hover, so they can never report a click
        response
    }
}
