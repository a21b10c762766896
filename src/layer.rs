use std::fmt;

use log::debug;

use crate::document::Document;
use crate::element::ObjectKind;
use crate::error::{EditorError, EditorResult};
use crate::id_generator::ObjectId;
use crate::selection::SelectionController;

/// Longest text excerpt shown in a layer row
const LABEL_EXCERPT_CHARS: usize = 15;

/// Result of a reorder request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerMove {
    Moved { from: usize, to: usize },
    /// Already at the boundary
    Unchanged,
}

fn check_index(document: &Document, index: usize) -> EditorResult<()> {
    if index < document.len() {
        Ok(())
    } else {
        Err(EditorError::LayerIndexOutOfRange {
            index,
            len: document.len(),
        })
    }
}

/// Swap the object at `index` with the one in front of it (index 0 is backmost)
pub fn move_up(document: &mut Document, index: usize) -> EditorResult<LayerMove> {
    check_index(document, index)?;
    if index + 1 == document.len() {
        return Ok(LayerMove::Unchanged);
    }

    document.swap(index, index + 1);
    debug!("Layer {} moved up", index);
    Ok(LayerMove::Moved {
        from: index,
        to: index + 1,
    })
}

/// Swap the object at `index` with the one behind it
pub fn move_down(document: &mut Document, index: usize) -> EditorResult<LayerMove> {
    check_index(document, index)?;
    if index == 0 {
        return Ok(LayerMove::Unchanged);
    }

    document.swap(index, index - 1);
    debug!("Layer {} moved down", index);
    Ok(LayerMove::Moved {
        from: index,
        to: index - 1,
    })
}

/// Flip an object's visibility. Hiding also zeroes its opacity and showing
/// resets it to fully opaque. Returns the new visibility.
pub fn toggle_visibility(document: &mut Document, id: ObjectId) -> EditorResult<bool> {
    let object = document.get_mut(id).ok_or(EditorError::ObjectNotFound(id))?;
    let visible = !object.visible();
    object.set_visibility(visible, if visible { 1.0 } else { 0.0 });
    debug!("Object {} visible: {}", id, visible);
    Ok(visible)
}

/// One row of the layer panel
#[derive(Debug, Clone, PartialEq)]
pub struct LayerEntry {
    /// Position in the draw order (0 = backmost)
    pub index: usize,
    pub id: ObjectId,
    pub label: LayerLabel,
    pub visible: bool,
    pub selected: bool,
    pub can_move_up: bool,
    pub can_move_down: bool,
}

/// Display name of a layer row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerLabel {
    Text(String),
    Rectangle,
    Circle,
    Drawing,
    BackgroundImage,
}

impl LayerLabel {
    pub fn for_kind(kind: &ObjectKind) -> Self {
        match kind {
            ObjectKind::Text(text) => LayerLabel::Text(text.content().to_owned()),
            ObjectKind::Rectangle(_) => LayerLabel::Rectangle,
            ObjectKind::Circle(_) => LayerLabel::Circle,
            ObjectKind::FreehandPath(_) => LayerLabel::Drawing,
            ObjectKind::BackgroundImage(_) => LayerLabel::BackgroundImage,
        }
    }
}

impl fmt::Display for LayerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerLabel::Text(content) => {
                let excerpt: String = content.chars().take(LABEL_EXCERPT_CHARS).collect();
                let ellipsis = if content.chars().count() > LABEL_EXCERPT_CHARS { "..." } else { "" };
                write!(f, "Text: {}{}", excerpt, ellipsis)
            }
            LayerLabel::Rectangle => write!(f, "Rectangle"),
            LayerLabel::Circle => write!(f, "Circle"),
            LayerLabel::Drawing => write!(f, "Drawing"),
            LayerLabel::BackgroundImage => write!(f, "Background Image"),
        }
    }
}

/// Rows for the layer panel, front-most object first.
///
/// Always built from the document's current order, never cached.
pub fn layer_entries(document: &Document, selection: &SelectionController) -> Vec<LayerEntry> {
    let len = document.len();
    document
        .objects()
        .iter()
        .enumerate()
        .rev()
        .map(|(index, object)| LayerEntry {
            index,
            id: object.id(),
            label: LayerLabel::for_kind(object.kind()),
            visible: object.visible(),
            selected: selection.is_selected(object.id()),
            can_move_up: index + 1 < len,
            can_move_down: index > 0,
        })
        .collect()
}
