use egui::{Align2, Pos2, Rect, Sense, Vec2};

use crate::command::Command;
use crate::element::{Element, ObjectKind};
use crate::panels::PanelAction;
use crate::renderer::CanvasRenderer;
use crate::state::EditorContext;

/// The canvas, its pointer handling and the overlays drawn on top of it
pub fn central_panel(
    ctx: &egui::Context,
    editor: &EditorContext,
    renderer: &mut CanvasRenderer,
    actions: &mut Vec<PanelAction>,
) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let canvas_rect = response.rect;

        if canvas_rect.size() != editor.document().canvas_size() {
            actions.push(Command::ResizeCanvas(canvas_rect.size()).into());
        }

        if !editor.image_loaded() {
            painter.rect_filled(canvas_rect, 0.0, ui.visuals().extreme_bg_color);
            empty_canvas_prompt(ui, canvas_rect, actions);
            return;
        }

        renderer.render(ctx, &painter, canvas_rect, editor);
        handle_pointer(ctx, &response, canvas_rect, editor, actions);
        floating_actions(ctx, editor, canvas_rect, actions);
        text_editor(ctx, editor, canvas_rect, actions);
    });
}

fn empty_canvas_prompt(ui: &mut egui::Ui, canvas_rect: Rect, actions: &mut Vec<PanelAction>) {
    let prompt = Rect::from_center_size(canvas_rect.center(), Vec2::new(320.0, 120.0));
    ui.put(prompt, |ui: &mut egui::Ui| {
        ui.vertical_centered(|ui| {
            ui.heading("No Image Loaded");
            ui.label("Open an image file to start editing");
            ui.add_space(8.0);
            if ui.button("Open Image").clicked() {
                actions.push(PanelAction::OpenFile);
            }
        })
        .response
    });
}

/// Pointer input of one frame, in canvas coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct PointerFrame {
    pos: Option<Pos2>,
    press_origin: Option<Pos2>,
    delta: Vec2,
    clicked: bool,
    double_clicked: bool,
    drag_started: bool,
    dragged: bool,
    drag_stopped: bool,
}

impl PointerFrame {
    fn read(ctx: &egui::Context, response: &egui::Response, canvas_rect: Rect) -> Self {
        let to_canvas = |pos: Pos2| pos - canvas_rect.min.to_vec2();
        Self {
            pos: response.interact_pointer_pos().map(to_canvas),
            press_origin: ctx.input(|i| i.pointer.press_origin()).map(to_canvas),
            delta: response.drag_delta(),
            clicked: response.clicked(),
            double_clicked: response.double_clicked(),
            drag_started: response.drag_started(),
            dragged: response.dragged(),
            drag_stopped: response.drag_stopped(),
        }
    }
}

fn handle_pointer(
    ctx: &egui::Context,
    response: &egui::Response,
    canvas_rect: Rect,
    editor: &EditorContext,
    actions: &mut Vec<PanelAction>,
) {
    let frame = PointerFrame::read(ctx, response, canvas_rect);
    let commands = pointer_commands(&frame, editor.state().is_drawing());
    actions.extend(commands.into_iter().map(PanelAction::from));
}

/// Commands for one frame of pointer input.
///
/// A drag only starts once the pointer has left the press position, so the
/// first drag frame catches up from the press origin.
fn pointer_commands(frame: &PointerFrame, drawing: bool) -> Vec<Command> {
    let mut commands = Vec::new();

    if drawing {
        if frame.drag_started {
            commands.extend(frame.press_origin.map(Command::StrokePoint));
        }
        if frame.dragged {
            commands.extend(frame.pos.map(Command::StrokePoint));
        }
        if frame.drag_stopped {
            commands.push(Command::FinishStroke);
        }
        return commands;
    }

    if let Some(pos) = frame.pos {
        if frame.double_clicked {
            commands.push(Command::Pick(pos));
            commands.push(Command::BeginTextEdit);
        } else if frame.clicked {
            commands.push(Command::Pick(pos));
        }
    }

    if frame.drag_started {
        // Grab whatever is under the press, not where the pointer is now
        if let Some(origin) = frame.press_origin {
            commands.push(Command::Pick(origin));
            let moved = frame.pos.map_or(Vec2::ZERO, |pos| pos - origin);
            if moved != Vec2::ZERO {
                commands.push(Command::MoveSelected(moved));
            }
        }
    } else if frame.dragged && frame.delta != Vec2::ZERO {
        commands.push(Command::MoveSelected(frame.delta));
    }

    commands
}

/// Edit / convert / delete buttons for the selected object
fn floating_actions(ctx: &egui::Context, editor: &EditorContext, canvas_rect: Rect, actions: &mut Vec<PanelAction>) {
    let Some(object) = editor.selection().selected_id().and_then(|id| editor.document().get(id)) else {
        return;
    };
    if object.kind().is_background() {
        return;
    }
    let is_text = object.kind().is_text();

    egui::Area::new(egui::Id::new("floating_actions"))
        .fixed_pos(canvas_rect.right_top() + Vec2::new(-16.0, 16.0))
        .pivot(Align2::RIGHT_TOP)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    if is_text && ui.button("✏ Edit Text").clicked() {
                        actions.push(Command::BeginTextEdit.into());
                    }
                    if !is_text && ui.button("T Convert to Text").clicked() {
                        actions.push(Command::ConvertSelectedToText.into());
                    }
                    if ui.button("🗑 Delete").clicked() {
                        actions.push(Command::DeleteSelected.into());
                    }
                });
            });
        });
}

/// Inline editor below the selected text while text-edit mode is on
fn text_editor(ctx: &egui::Context, editor: &EditorContext, canvas_rect: Rect, actions: &mut Vec<PanelAction>) {
    if !editor.selection().is_text_editing() {
        return;
    }
    let Some(object) = editor.selection().selected_id().and_then(|id| editor.document().get(id)) else {
        return;
    };
    let ObjectKind::Text(text) = object.kind() else {
        return;
    };
    let id = object.id();
    let anchor = object.rect().left_bottom() + canvas_rect.min.to_vec2() + Vec2::new(0.0, 6.0);

    egui::Area::new(egui::Id::new("text_editor"))
        .fixed_pos(anchor)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                let mut content = text.content().to_owned();
                let edit = egui::TextEdit::multiline(&mut content).desired_rows(2).desired_width(240.0);
                if ui.add(edit).changed() {
                    actions.push(Command::EditText { id, content }.into());
                }
                if ui.small_button("Done").clicked() {
                    actions.push(Command::ClearSelection.into());
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag_start(origin: Pos2, pos: Pos2) -> PointerFrame {
        PointerFrame {
            pos: Some(pos),
            press_origin: Some(origin),
            delta: Vec2::new(1.0, 0.0),
            drag_started: true,
            dragged: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_drag_start_catches_up_from_press() {
        let frame = drag_start(Pos2::new(100.0, 100.0), Pos2::new(106.0, 103.0));
        assert_eq!(
            pointer_commands(&frame, false),
            vec![
                Command::Pick(Pos2::new(100.0, 100.0)),
                Command::MoveSelected(Vec2::new(6.0, 3.0)),
            ]
        );
    }

    #[test]
    fn test_drag_moves_by_frame_delta() {
        let frame = PointerFrame {
            pos: Some(Pos2::new(120.0, 100.0)),
            press_origin: Some(Pos2::new(100.0, 100.0)),
            delta: Vec2::new(2.0, -1.0),
            dragged: true,
            ..Default::default()
        };
        assert_eq!(pointer_commands(&frame, false), vec![Command::MoveSelected(Vec2::new(2.0, -1.0))]);
    }

    #[test]
    fn test_stroke_starts_at_press_origin() {
        let frame = drag_start(Pos2::new(10.0, 10.0), Pos2::new(14.0, 12.0));
        assert_eq!(
            pointer_commands(&frame, true),
            vec![
                Command::StrokePoint(Pos2::new(10.0, 10.0)),
                Command::StrokePoint(Pos2::new(14.0, 12.0)),
            ]
        );

        let release = PointerFrame {
            drag_stopped: true,
            ..Default::default()
        };
        assert_eq!(pointer_commands(&release, true), vec![Command::FinishStroke]);
    }

    #[test]
    fn test_double_click_picks_and_edits() {
        let frame = PointerFrame {
            pos: Some(Pos2::new(50.0, 40.0)),
            clicked: true,
            double_clicked: true,
            ..Default::default()
        };
        assert_eq!(
            pointer_commands(&frame, false),
            vec![Command::Pick(Pos2::new(50.0, 40.0)), Command::BeginTextEdit]
        );
    }
}
