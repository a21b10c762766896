use egui::{Color32, Pos2, Vec2};
use log::debug;

use crate::error::EditorResult;
use crate::file_handler::OpenedFile;
use crate::id_generator::ObjectId;
use crate::properties::PropertyEdit;
use crate::state::{EditorContext, Tool};

/// Every user gesture the panels can produce.
///
/// Commands are applied immediately; there is no history to undo them.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace the document with an opened image
    OpenImage(OpenedFile),

    /// The central area changed size
    ResizeCanvas(Vec2),

    AddText,
    AddRectangle,
    AddCircle,

    /// Add a finished freehand stroke
    AddPath(Vec<Pos2>),

    DeleteSelected,
    ConvertSelectedToText,

    Select(ObjectId),
    ClearSelection,

    /// Select whatever is on top at a canvas position
    Pick(Pos2),

    BeginTextEdit,
    EditText {
        id: ObjectId,
        content: String,
    },
    /// Drag the selected object
    MoveSelected(Vec2),

    MoveLayerUp(usize),
    MoveLayerDown(usize),
    ToggleVisibility(ObjectId),

    SetProperty(PropertyEdit),
    SetColor(Color32),
    SetBrushSize(u32),

    SetTool(Tool),
    ToggleDrawing,
    StrokePoint(Pos2),
    FinishStroke,
}

impl Command {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::OpenImage(_) => "OpenImage",
            Command::ResizeCanvas(_) => "ResizeCanvas",
            Command::AddText => "AddText",
            Command::AddRectangle => "AddRectangle",
            Command::AddCircle => "AddCircle",
            Command::AddPath(_) => "AddPath",
            Command::DeleteSelected => "DeleteSelected",
            Command::ConvertSelectedToText => "ConvertSelectedToText",
            Command::Select(_) => "Select",
            Command::ClearSelection => "ClearSelection",
            Command::Pick(_) => "Pick",
            Command::BeginTextEdit => "BeginTextEdit",
            Command::EditText { .. } => "EditText",
            Command::MoveSelected(_) => "MoveSelected",
            Command::MoveLayerUp(_) => "MoveLayerUp",
            Command::MoveLayerDown(_) => "MoveLayerDown",
            Command::ToggleVisibility(_) => "ToggleVisibility",
            Command::SetProperty(_) => "SetProperty",
            Command::SetColor(_) => "SetColor",
            Command::SetBrushSize(_) => "SetBrushSize",
            Command::SetTool(_) => "SetTool",
            Command::ToggleDrawing => "ToggleDrawing",
            Command::StrokePoint(_) => "StrokePoint",
            Command::FinishStroke => "FinishStroke",
        }
    }

    /// Whether this command fires continuously during a drag
    fn is_high_frequency(&self) -> bool {
        matches!(
            self,
            Command::StrokePoint(_) | Command::MoveSelected(_) | Command::ResizeCanvas(_)
        )
    }

    /// Execute the command against the editor
    pub fn execute(self, ctx: &mut EditorContext) -> EditorResult<()> {
        if !self.is_high_frequency() {
            debug!("Executing {}", self.name());
        }

        match self {
            Command::OpenImage(file) => ctx.open_image(file).map(drop),
            Command::ResizeCanvas(size) => {
                ctx.set_canvas_size(size);
                Ok(())
            }
            Command::AddText => ctx.add_text().map(drop),
            Command::AddRectangle => ctx.add_rectangle().map(drop),
            Command::AddCircle => ctx.add_circle().map(drop),
            Command::AddPath(points) => ctx.add_path(points).map(drop),
            Command::DeleteSelected => ctx.delete_selected().map(drop),
            Command::ConvertSelectedToText => ctx.convert_selected_to_text().map(drop),
            Command::Select(id) => ctx.select(id),
            Command::ClearSelection => {
                ctx.clear_selection();
                Ok(())
            }
            Command::Pick(pos) => ctx.pick(pos).map(drop),
            Command::BeginTextEdit => {
                ctx.begin_text_edit();
                Ok(())
            }
            Command::EditText { id, content } => ctx.edit_text(id, &content),
            Command::MoveSelected(delta) => ctx.move_selected(delta),
            Command::MoveLayerUp(index) => ctx.move_layer_up(index).map(drop),
            Command::MoveLayerDown(index) => ctx.move_layer_down(index).map(drop),
            Command::ToggleVisibility(id) => ctx.toggle_visibility(id).map(drop),
            Command::SetProperty(edit) => ctx.apply_property(edit),
            Command::SetColor(color) => ctx.set_color(color),
            Command::SetBrushSize(size) => ctx.set_brush_size(size),
            Command::SetTool(tool) => ctx.set_tool(tool),
            Command::ToggleDrawing => ctx.toggle_drawing(),
            Command::StrokePoint(pos) => {
                ctx.stroke_point(pos);
                Ok(())
            }
            Command::FinishStroke => ctx.finish_stroke().map(drop),
        }
    }
}
