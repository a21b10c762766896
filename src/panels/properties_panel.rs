use egui::color_picker::{self, Alpha};

use crate::command::Command;
use crate::config::FONT_FAMILIES;
use crate::element::{FONT_SIZE_RANGE, OPACITY_RANGE, STROKE_WIDTH_RANGE};
use crate::panels::PanelAction;
use crate::properties::{PropertyEdit, PropertyField, PropertyView};

/// Editors for the attributes exposed by the selected object
pub fn properties_panel(ui: &mut egui::Ui, properties: &PropertyView, actions: &mut Vec<PanelAction>) {
    ui.strong("Object Properties");

    let mut edit = |change: PropertyEdit| actions.push(Command::SetProperty(change).into());

    for field in properties.fields {
        match field {
            PropertyField::Opacity => {
                let mut opacity = properties.opacity;
                let slider = egui::Slider::new(&mut opacity, OPACITY_RANGE).step_by(0.01).text("Opacity");
                if ui.add(slider).changed() {
                    edit(PropertyEdit::Opacity(opacity));
                }
            }
            PropertyField::StrokeWidth => {
                if let Some(mut width) = properties.stroke_width {
                    let slider = egui::Slider::new(&mut width, STROKE_WIDTH_RANGE).text("Line Width");
                    if ui.add(slider).changed() {
                        edit(PropertyEdit::StrokeWidth(width));
                    }
                }
            }
            PropertyField::FontSize => {
                if let Some(mut size) = properties.font_size {
                    let slider = egui::Slider::new(&mut size, FONT_SIZE_RANGE).text("Font Size");
                    if ui.add(slider).changed() {
                        edit(PropertyEdit::FontSize(size));
                    }
                }
            }
            PropertyField::FontFamily => {
                if let Some(current) = &properties.font_family {
                    let mut family = current.clone();
                    egui::ComboBox::from_label("Font Family")
                        .selected_text(family.as_str())
                        .show_ui(ui, |ui| {
                            for option in FONT_FAMILIES {
                                ui.selectable_value(&mut family, option.to_owned(), option);
                            }
                        });
                    if &family != current {
                        edit(PropertyEdit::FontFamily(family));
                    }
                }
            }
            PropertyField::FillColor => {
                if let Some(mut color) = properties.fill_color {
                    ui.horizontal(|ui| {
                        if color_picker::color_edit_button_srgba(ui, &mut color, Alpha::Opaque).changed() {
                            edit(PropertyEdit::FillColor(color));
                        }
                        ui.label("Text Color");
                    });
                }
            }
        }
    }
}
