use crate::panels::PanelAction;
use crate::state::EditorContext;

/// Title bar with the file actions
pub fn header_panel(ctx: &egui::Context, editor: &EditorContext, actions: &mut Vec<PanelAction>) {
    egui::TopBottomPanel::top("header_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Image Annotator");
            if let Some(file) = editor.current_file() {
                ui.weak(&file.name);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(editor.image_loaded(), egui::Button::new("💾 Save Image"))
                    .clicked()
                {
                    actions.push(PanelAction::SaveFile);
                }
                if ui.button("📂 Open Image").clicked() {
                    actions.push(PanelAction::OpenFile);
                }
            });
        });
    });
}
