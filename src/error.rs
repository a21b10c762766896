use thiserror::Error;

use crate::id_generator::ObjectId;

/// Errors that can occur while editing a document
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    /// Shapes and text can only be placed on top of a loaded image
    #[error("No background image loaded")]
    NoBackgroundLoaded,

    /// The background image cannot be deleted or converted
    #[error("Object {0} is protected and cannot be changed this way")]
    ProtectedObject(ObjectId),

    #[error("Attribute '{attribute}' does not apply to {kind} objects")]
    InvalidAttributeForKind {
        attribute: &'static str,
        kind: &'static str,
    },

    #[error("Invalid value for '{attribute}': {reason}")]
    InvalidAttributeValue {
        attribute: &'static str,
        reason: String,
    },

    #[error("Object {0} not found")]
    ObjectNotFound(ObjectId),

    #[error("Layer index {index} out of range (layer count: {len})")]
    LayerIndexOutOfRange { index: usize, len: usize },

    #[error("Failed to decode image: {0}")]
    ImageDecode(String),

    #[error("Failed to read file: {0}")]
    FileReadFailure(String),

    #[error("Failed to write file: {0}")]
    FileWriteFailure(String),

    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("Failed to export canvas: {0}")]
    ExportFailed(String),
}

impl EditorError {
    /// Errors the user has to acknowledge, as opposed to ones that are only logged
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            Self::ProtectedObject(_)
                | Self::FileReadFailure(_)
                | Self::FileWriteFailure(_)
                | Self::ExportFailed(_)
        )
    }
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;
