use crate::id_generator::{DocumentId, ObjectId};
use crate::selection::SelectionChange;
use crate::state::EditorState;

/// Notifications emitted after every change to the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    ObjectAdded {
        id: ObjectId,
        index: usize,
    },
    ObjectRemoved {
        id: ObjectId,
        index: usize,
    },
    ObjectModified {
        id: ObjectId,
    },
    LayerReordered {
        id: ObjectId,
        old_index: usize,
        new_index: usize,
    },
    SelectionCreated(ObjectId),
    SelectionUpdated {
        from: ObjectId,
        to: ObjectId,
    },
    SelectionCleared(ObjectId),
    DocumentLoaded(DocumentId),
    StateChanged {
        old: EditorState,
        new: EditorState,
    },
}

impl CanvasEvent {
    /// The event matching a selection transition, if anything changed
    pub fn from_selection(change: SelectionChange) -> Option<Self> {
        match change {
            SelectionChange::Created(id) => Some(Self::SelectionCreated(id)),
            SelectionChange::Updated { from, to } => Some(Self::SelectionUpdated { from, to }),
            SelectionChange::Cleared(id) => Some(Self::SelectionCleared(id)),
            SelectionChange::Unchanged => None,
        }
    }

    /// Whether the layer list has to be rebuilt after this event
    pub fn affects_layers(&self) -> bool {
        !matches!(self, Self::StateChanged { .. })
    }
}
