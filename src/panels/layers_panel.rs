use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use crate::command::Command;
use crate::event::LayerPanelSync;
use crate::layer::{self, LayerEntry};
use crate::panels::PanelAction;
use crate::state::EditorContext;

/// Layer list, rebuilt from the document whenever a canvas event flags it stale
#[derive(Debug)]
pub struct LayersPanel {
    entries: Vec<LayerEntry>,
    stale: Arc<AtomicBool>,
}

impl LayersPanel {
    /// Create the panel and subscribe it to the editor's canvas events
    pub fn new(editor: &EditorContext) -> Self {
        let (sync, stale) = LayerPanelSync::new();
        editor.event_bus().subscribe(Box::new(sync));
        Self {
            entries: Vec::new(),
            stale,
        }
    }

    /// Current rows, front-most first
    pub fn entries(&self) -> &[LayerEntry] {
        &self.entries
    }

    /// Rebuild the rows if anything changed since the last call
    pub fn refresh(&mut self, editor: &EditorContext) -> bool {
        if !self.stale.swap(false, Ordering::AcqRel) {
            return false;
        }
        self.entries = layer::layer_entries(editor.document(), editor.selection());
        debug!("Layer list rebuilt ({} rows)", self.entries.len());
        true
    }

    pub fn show(&mut self, ui: &mut egui::Ui, editor: &EditorContext, actions: &mut Vec<PanelAction>) {
        self.refresh(editor);

        ui.strong("Layers");
        if self.entries.is_empty() {
            ui.weak("No layers available");
            return;
        }

        for entry in &self.entries {
            ui.horizontal(|ui| {
                let eye = if entry.visible { "👁" } else { "⊘" };
                if ui.small_button(eye).on_hover_text("Toggle visibility").clicked() {
                    actions.push(Command::ToggleVisibility(entry.id).into());
                }

                if ui.selectable_label(entry.selected, entry.label.to_string()).clicked() {
                    actions.push(Command::Select(entry.id).into());
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let down = ui.add_enabled(entry.can_move_down, egui::Button::new("⬇").small());
                    if down.on_hover_text("Move down").clicked() {
                        actions.push(Command::MoveLayerDown(entry.index).into());
                    }
                    let up = ui.add_enabled(entry.can_move_up, egui::Button::new("⬆").small());
                    if up.on_hover_text("Move up").clicked() {
                        actions.push(Command::MoveLayerUp(entry.index).into());
                    }
                });
            });
        }
    }
}
