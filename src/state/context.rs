//! The single explicit store behind the UI.
//!
//! `EditorContext` owns the document, the selection and the tool mode. Every
//! mutation goes through one of its methods, which keep the selection valid,
//! emit the matching [`CanvasEvent`]s and fire the [`RenderTrigger`].

use std::path::PathBuf;

use egui::{Color32, Pos2, Vec2};
use log::{debug, info, warn};

use super::{EditorState, Tool};
use crate::config::EditorConfig;
use crate::document::Document;
use crate::element::{AttrPatch, ObjectKind, STROKE_WIDTH_RANGE, factory};
use crate::error::{EditorError, EditorResult};
use crate::event::{CanvasEvent, EventBus, RenderTrigger};
use crate::export;
use crate::file_handler::{OpenedFile, SaveRequest};
use crate::id_generator::{BACKGROUND_ID, DocumentId, ObjectId};
use crate::layer::{self, LayerMove};
use crate::properties::{self, PropertyEdit, PropertyView};
use crate::selection::{SelectionChange, SelectionController};

/// Name and location of the image the document was loaded from
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentFile {
    pub name: String,
    pub path: Option<PathBuf>,
}

/// The main context for the annotation editor.
#[derive(Debug)]
pub struct EditorContext {
    document: Document,
    selection: SelectionController,
    state: EditorState,
    event_bus: EventBus,
    render: RenderTrigger,
    config: EditorConfig,
    color: Color32,
    brush_size: u32,
    current_file: Option<CurrentFile>,
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorContext {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            document: Document::from_config(&config),
            selection: SelectionController::new(),
            state: EditorState::Idle,
            event_bus: EventBus::new(),
            render: RenderTrigger::new(),
            color: config.default_color,
            brush_size: config.brush_size,
            current_file: None,
            config,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn render_trigger(&self) -> &RenderTrigger {
        &self.render
    }

    /// Consume a pending redraw request
    pub fn take_render_request(&mut self) -> bool {
        self.render.take_dirty()
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    pub fn current_file(&self) -> Option<&CurrentFile> {
        self.current_file.as_ref()
    }

    pub fn image_loaded(&self) -> bool {
        self.document.has_background()
    }

    /// Config to persist: the stored defaults with the current color and brush
    pub fn settings_snapshot(&self) -> EditorConfig {
        EditorConfig {
            default_color: self.color,
            brush_size: self.brush_size,
            ..self.config.clone()
        }
    }

    pub fn selected_properties(&self) -> Option<PropertyView> {
        properties::selected_properties(&self.document, &self.selection)
    }

    /// Keep the canvas size in step with the area the UI gives it
    pub fn set_canvas_size(&mut self, size: Vec2) {
        if size != self.document.canvas_size() {
            self.document.set_canvas_size(size);
            self.render.mark_dirty();
        }
    }

    fn emit(&mut self, event: CanvasEvent) {
        self.render.mark_dirty();
        self.event_bus.emit(event);
    }

    fn emit_selection(&mut self, change: SelectionChange) {
        if let Some(event) = CanvasEvent::from_selection(change) {
            self.emit(event);
        }
    }

    // ---- Document ----

    /// Replace the document with the opened image and select it
    pub fn open_image(&mut self, file: OpenedFile) -> EditorResult<DocumentId> {
        let document_id = self.document.load_background_bytes(&file.data)?;
        info!("📂 Opened {} as document {}", file.name, document_id);

        let cleared = self.selection.clear();
        self.emit_selection(cleared);
        self.emit(CanvasEvent::DocumentLoaded(document_id));
        self.emit(CanvasEvent::ObjectAdded {
            id: BACKGROUND_ID,
            index: 0,
        });

        self.current_file = Some(CurrentFile {
            name: file.name,
            path: file.path,
        });
        self.select(BACKGROUND_ID)?;
        Ok(document_id)
    }

    /// Add a default object, select it and switch to the select tool
    fn add_and_select(&mut self, kind: ObjectKind) -> EditorResult<ObjectId> {
        let id = self.add(kind)?;
        self.select(id)?;
        if self.state.tool() != Some(Tool::Select) {
            self.transition_to(EditorState::Selecting)?;
        }
        Ok(id)
    }

    fn add(&mut self, kind: ObjectKind) -> EditorResult<ObjectId> {
        let id = self.document.add_object(kind)?;
        let index = self.document.len() - 1;
        self.emit(CanvasEvent::ObjectAdded { id, index });
        Ok(id)
    }

    /// Add the default text at the canvas center, selected for editing
    pub fn add_text(&mut self) -> EditorResult<ObjectId> {
        let kind = factory::create_text(
            &self.config.text_content,
            &self.config.font_family,
            self.config.font_size,
            self.color,
            self.document.canvas_center(),
        );
        self.add_and_select(kind)
    }

    pub fn add_rectangle(&mut self) -> EditorResult<ObjectId> {
        let kind = factory::create_rectangle(
            self.document.canvas_center(),
            self.config.rectangle_size,
            self.color,
            self.config.shape_stroke_width,
        );
        self.add_and_select(kind)
    }

    pub fn add_circle(&mut self) -> EditorResult<ObjectId> {
        let kind = factory::create_circle(
            self.document.canvas_center(),
            self.config.circle_radius,
            self.color,
            self.config.shape_stroke_width,
        );
        self.add_and_select(kind)
    }

    /// Add a finished freehand stroke. Strokes shorter than two points are dropped.
    pub fn add_path(&mut self, points: Vec<Pos2>) -> EditorResult<Option<ObjectId>> {
        if points.len() < 2 {
            debug!("Discarding stroke with {} point(s)", points.len());
            return Ok(None);
        }
        let kind = factory::create_path(points, self.color, self.brush_size);
        self.add(kind).map(Some)
    }

    /// Remove an object, dropping the selection if it pointed at it
    pub fn delete_object(&mut self, id: ObjectId) -> EditorResult<()> {
        let index = self.document.index_of(id);
        if let Err(err) = self.document.remove_object(id) {
            warn!("Delete of {} rejected: {}", id, err);
            return Err(err);
        }

        self.emit(CanvasEvent::ObjectRemoved {
            id,
            index: index.unwrap_or_default(),
        });
        let change = self.selection.object_removed(id);
        self.emit_selection(change);
        Ok(())
    }

    /// Delete the selected object. Returns the deleted id.
    pub fn delete_selected(&mut self) -> EditorResult<Option<ObjectId>> {
        let Some(id) = self.selection.selected_id() else {
            return Ok(None);
        };
        self.delete_object(id)?;
        Ok(Some(id))
    }

    /// Replace the selected object by a text in the same place and select it
    pub fn convert_selected_to_text(&mut self) -> EditorResult<Option<ObjectId>> {
        let Some(id) = self.selection.selected_id() else {
            return Ok(None);
        };
        let index = self.document.index_of(id).ok_or(EditorError::ObjectNotFound(id))?;

        let new_id = match self.document.convert_to_text(
            id,
            &self.config.converted_text_content,
            &self.config.font_family,
            self.color,
        ) {
            Ok(new_id) => new_id,
            Err(err) => {
                warn!("Convert of {} rejected: {}", id, err);
                return Err(err);
            }
        };

        self.emit(CanvasEvent::ObjectRemoved { id, index });
        self.emit(CanvasEvent::ObjectAdded { id: new_id, index });
        self.select(new_id)?;
        Ok(Some(new_id))
    }

    /// Replace the content of a text object
    pub fn edit_text(&mut self, id: ObjectId, content: &str) -> EditorResult<()> {
        self.document.mutate_object(id, &AttrPatch::content(content))?;
        self.emit(CanvasEvent::ObjectModified { id });
        Ok(())
    }

    pub fn move_object(&mut self, id: ObjectId, delta: Vec2) -> EditorResult<()> {
        if delta == Vec2::ZERO {
            return Ok(());
        }
        self.document.translate_object(id, delta)?;
        self.emit(CanvasEvent::ObjectModified { id });
        Ok(())
    }

    /// Move the selected object, if any
    pub fn move_selected(&mut self, delta: Vec2) -> EditorResult<()> {
        match self.selection.selected_id() {
            Some(id) => self.move_object(id, delta),
            None => Ok(()),
        }
    }

    // ---- Selection ----

    pub fn select(&mut self, id: ObjectId) -> EditorResult<()> {
        let change = self.selection.select(&self.document, id)?;
        self.emit_selection(change);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        let change = self.selection.clear();
        self.emit_selection(change);
    }

    /// Select the topmost object under `pos`, or clear the selection on empty canvas
    pub fn pick(&mut self, pos: Pos2) -> EditorResult<Option<ObjectId>> {
        match self.document.pick(pos) {
            Some(id) => {
                self.select(id)?;
                Ok(Some(id))
            }
            None => {
                self.clear_selection();
                Ok(None)
            }
        }
    }

    /// Enter text-edit sub-mode on the selected text
    pub fn begin_text_edit(&mut self) -> bool {
        let entered = self.selection.enter_text_editing(&self.document);
        if entered {
            self.render.mark_dirty();
        }
        entered
    }

    // ---- Layers ----

    fn reordered(&mut self, moved: LayerMove) {
        if let LayerMove::Moved { from, to } = moved {
            if let Some(object) = self.document.objects().get(to) {
                let id = object.id();
                self.emit(CanvasEvent::LayerReordered {
                    id,
                    old_index: from,
                    new_index: to,
                });
            }
        }
    }

    pub fn move_layer_up(&mut self, index: usize) -> EditorResult<LayerMove> {
        let moved = layer::move_up(&mut self.document, index)?;
        self.reordered(moved);
        Ok(moved)
    }

    pub fn move_layer_down(&mut self, index: usize) -> EditorResult<LayerMove> {
        let moved = layer::move_down(&mut self.document, index)?;
        self.reordered(moved);
        Ok(moved)
    }

    pub fn toggle_visibility(&mut self, id: ObjectId) -> EditorResult<bool> {
        let visible = layer::toggle_visibility(&mut self.document, id)?;
        self.emit(CanvasEvent::ObjectModified { id });
        Ok(visible)
    }

    // ---- Properties and tools ----

    pub fn apply_property(&mut self, edit: PropertyEdit) -> EditorResult<()> {
        if let Some(id) = properties::apply_edit(&mut self.document, &self.selection, edit)? {
            self.emit(CanvasEvent::ObjectModified { id });
        }
        Ok(())
    }

    /// Change the drawing color and recolor the selection to match
    pub fn set_color(&mut self, color: Color32) -> EditorResult<()> {
        self.color = color;
        self.render.mark_dirty();

        let Some(id) = self.selection.selected_id() else {
            return Ok(());
        };
        let patch = match self.document.get(id).map(|obj| obj.kind()) {
            Some(ObjectKind::Text(_)) => AttrPatch::fill_color(color),
            Some(kind) if kind.stroke_width().is_some() => AttrPatch::stroke_color(color),
            _ => return Ok(()),
        };
        self.document.mutate_object(id, &patch)?;
        self.emit(CanvasEvent::ObjectModified { id });
        Ok(())
    }

    pub fn set_brush_size(&mut self, size: u32) -> EditorResult<()> {
        if !STROKE_WIDTH_RANGE.contains(&size) {
            return Err(EditorError::InvalidAttributeValue {
                attribute: "brushSize",
                reason: format!("{} is outside {:?}", size, STROKE_WIDTH_RANGE),
            });
        }
        self.brush_size = size;
        Ok(())
    }

    /// Validate and perform a tool mode transition
    pub fn transition_to(&mut self, new_state: EditorState) -> EditorResult<()> {
        if !self.state.can_transition_to(&new_state) {
            return Err(EditorError::InvalidTransition {
                from: self.state.name(),
                to: new_state.name(),
            });
        }

        let old = std::mem::replace(&mut self.state, new_state);
        debug!("Tool mode {} -> {}", old.name(), self.state.name());
        let new = self.state.clone();
        self.emit(CanvasEvent::StateChanged { old, new });
        Ok(())
    }

    /// Switch tools. Picking the active tool again is a no-op.
    pub fn set_tool(&mut self, tool: Tool) -> EditorResult<()> {
        if self.state.tool() == Some(tool) {
            return Ok(());
        }
        if tool == Tool::Draw && !self.image_loaded() {
            return Err(EditorError::NoBackgroundLoaded);
        }
        self.transition_to(EditorState::for_tool(tool))
    }

    /// The Draw button: enter drawing mode, or leave it for selection
    pub fn toggle_drawing(&mut self) -> EditorResult<()> {
        if self.state.is_drawing() {
            self.set_tool(Tool::Select)
        } else {
            self.set_tool(Tool::Draw)
        }
    }

    /// Append a point to the stroke in progress
    pub fn stroke_point(&mut self, pos: Pos2) {
        if let Some(points) = self.state.stroke_points_mut() {
            if points.last() != Some(&pos) {
                points.push(pos);
                self.render.mark_dirty();
            }
        }
    }

    /// Finish the stroke in progress and add it to the document
    pub fn finish_stroke(&mut self) -> EditorResult<Option<ObjectId>> {
        let Some(points) = self.state.stroke_points_mut().map(std::mem::take) else {
            return Ok(None);
        };
        self.add_path(points)
    }

    // ---- Files ----

    /// Flatten the canvas into a save request for the host
    pub fn prepare_save(&self) -> EditorResult<SaveRequest> {
        let Some(file) = &self.current_file else {
            return Err(EditorError::NoBackgroundLoaded);
        };
        let data = export::export_png(&self.document, self.config.canvas_background)?;
        Ok(SaveRequest {
            default_path: file.name.clone(),
            data,
        })
    }
}
