use egui::color_picker::{self, Alpha};

use crate::command::Command;
use crate::components::ToolButton;
use crate::element::STROKE_WIDTH_RANGE;
use crate::panels::{LayersPanel, PanelAction, properties_panel};
use crate::state::{EditorContext, Tool};

const INSTRUCTIONS: [&str; 6] = [
    "1. Open an image using the \"Open Image\" button",
    "2. Add text or shapes using the toolbar",
    "3. Select any element to edit its properties",
    "4. When an element is selected, use the floating buttons to edit or delete it",
    "5. Double-click on text to edit it directly",
    "6. Save your edited image using the \"Save Image\" button",
];

/// The toolbox on the right: tools, color, properties and layers
pub fn tools_panel(
    ctx: &egui::Context,
    editor: &EditorContext,
    layers: &mut LayersPanel,
    actions: &mut Vec<PanelAction>,
) {
    egui::SidePanel::right("tools_panel")
        .resizable(false)
        .exact_width(260.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                tool_grid(ui, editor, actions);

                if editor.state().is_drawing() {
                    ui.separator();
                    ui.strong("Brush Settings");
                    let mut size = editor.brush_size();
                    let slider = egui::Slider::new(&mut size, STROKE_WIDTH_RANGE).suffix("px").text("Brush Size");
                    if ui.add(slider).changed() {
                        actions.push(Command::SetBrushSize(size).into());
                    }
                }

                ui.separator();
                ui.strong("Color");
                ui.horizontal(|ui| {
                    let mut color = editor.color();
                    if color_picker::color_edit_button_srgba(ui, &mut color, Alpha::Opaque).changed() {
                        actions.push(Command::SetColor(color).into());
                    }
                    ui.label(format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b()));
                });

                if let Some(properties) = editor.selected_properties() {
                    ui.separator();
                    properties_panel(ui, &properties, actions);
                }

                if editor.image_loaded() {
                    ui.separator();
                    layers.show(ui, editor, actions);
                }

                ui.separator();
                ui.strong("Instructions");
                for line in INSTRUCTIONS {
                    ui.small(line);
                }
            });
        });
}

fn tool_grid(ui: &mut egui::Ui, editor: &EditorContext, actions: &mut Vec<PanelAction>) {
    let loaded = editor.image_loaded();
    let tool = editor.state().tool();
    let deletable = editor.selection().selected_id().is_some_and(|id| !id.is_background());

    ui.strong("Tools");
    egui::Grid::new("tool_grid").num_columns(3).spacing([4.0, 4.0]).show(ui, |ui| {
        if ToolButton::new("✏", "Draw")
            .active(tool == Some(Tool::Draw))
            .enabled(loaded)
            .show(ui)
            .clicked()
        {
            actions.push(Command::ToggleDrawing.into());
        }
        if ToolButton::new("T", "Add Text").enabled(loaded).show(ui).clicked() {
            actions.push(Command::AddText.into());
        }
        if ToolButton::new("✥", "Select")
            .active(tool == Some(Tool::Select))
            .enabled(loaded)
            .show(ui)
            .clicked()
        {
            actions.push(Command::SetTool(Tool::Select).into());
        }
        ui.end_row();

        if ToolButton::new("☐", "Rectangle").enabled(loaded).show(ui).clicked() {
            actions.push(Command::AddRectangle.into());
        }
        if ToolButton::new("○", "Circle").enabled(loaded).show(ui).clicked() {
            actions.push(Command::AddCircle.into());
        }
        if ToolButton::new("🗑", "Delete").enabled(loaded && deletable).show(ui).clicked() {
            actions.push(Command::DeleteSelected.into());
        }
        ui.end_row();
    });
}
