use log::debug;

use crate::document::Document;
use crate::error::{EditorError, EditorResult};
use crate::id_generator::ObjectId;

/// Zero-or-one reference to an object of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Selected {
        id: ObjectId,
        /// Text-edit sub-mode was requested for this selection
        text_editing: bool,
    },
}

/// What a selection transition did, mirroring the canvas selection events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Created(ObjectId),
    Updated { from: ObjectId, to: ObjectId },
    Cleared(ObjectId),
    Unchanged,
}

/// Tracks the active selection. Never owns the selected object.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: Selection,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Selection {
        self.state
    }

    pub fn selected_id(&self) -> Option<ObjectId> {
        match self.state {
            Selection::Selected { id, .. } => Some(id),
            Selection::None => None,
        }
    }

    pub fn is_selected(&self, id: ObjectId) -> bool {
        self.selected_id() == Some(id)
    }

    pub fn is_text_editing(&self) -> bool {
        matches!(self.state, Selection::Selected { text_editing: true, .. })
    }

    /// Select an object of `document`. Text objects enter text-edit sub-mode.
    pub fn select(&mut self, document: &Document, id: ObjectId) -> EditorResult<SelectionChange> {
        let object = document.get(id).ok_or(EditorError::ObjectNotFound(id))?;
        let text_editing = object.kind().is_text();
        let previous = self.selected_id();

        self.state = Selection::Selected { id, text_editing };
        debug!("Selected {} (text editing: {})", id, text_editing);

        Ok(match previous {
            None => SelectionChange::Created(id),
            Some(from) if from == id => SelectionChange::Unchanged,
            Some(from) => SelectionChange::Updated { from, to: id },
        })
    }

    pub fn clear(&mut self) -> SelectionChange {
        match std::mem::take(&mut self.state) {
            Selection::Selected { id, .. } => SelectionChange::Cleared(id),
            Selection::None => SelectionChange::Unchanged,
        }
    }

    /// Request text-edit sub-mode on the current selection, if it is a text
    pub fn enter_text_editing(&mut self, document: &Document) -> bool {
        if let Selection::Selected { id, text_editing } = &mut self.state {
            if document.get(*id).is_some_and(|obj| obj.kind().is_text()) {
                *text_editing = true;
                return true;
            }
        }
        false
    }

    /// Forced transition when an object leaves the document
    pub fn object_removed(&mut self, id: ObjectId) -> SelectionChange {
        if self.is_selected(id) {
            self.clear()
        } else {
            SelectionChange::Unchanged
        }
    }
}
