//! Tool mode of the editor.
//!
//! Valid transitions:
//! ```text
//! Idle ──► Selecting ──► Drawing
//!   ▲  ◄──           ◄──   │
//!   └──────────────────────┘
//! ```
//! Every mode can return to `Idle`. A mode never transitions to itself;
//! freehand points are appended in place while drawing.

use egui::Pos2;

/// The user-facing tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Select,
    Draw,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorState {
    /// No tool picked yet
    #[default]
    Idle,
    /// Picking and moving objects
    Selecting,
    /// Freehand drawing; `points` holds the stroke in progress
    Drawing { points: Vec<Pos2> },
}

impl EditorState {
    /// State a tool switches to
    pub fn for_tool(tool: Tool) -> Self {
        match tool {
            Tool::Select => EditorState::Selecting,
            Tool::Draw => EditorState::Drawing { points: Vec::new() },
        }
    }

    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: &EditorState) -> bool {
        match (self, new_state) {
            (EditorState::Idle, EditorState::Idle) => false,
            (EditorState::Idle, _) => true,

            (EditorState::Selecting, EditorState::Idle) => true,
            (EditorState::Selecting, EditorState::Drawing { .. }) => true,

            (EditorState::Drawing { .. }, EditorState::Idle) => true,
            (EditorState::Drawing { .. }, EditorState::Selecting) => true,

            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "Idle",
            EditorState::Selecting => "Selecting",
            EditorState::Drawing { .. } => "Drawing",
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, EditorState::Drawing { .. })
    }

    /// The tool this state belongs to
    pub fn tool(&self) -> Option<Tool> {
        match self {
            EditorState::Idle => None,
            EditorState::Selecting => Some(Tool::Select),
            EditorState::Drawing { .. } => Some(Tool::Draw),
        }
    }

    /// Points of the stroke in progress
    pub fn stroke_points(&self) -> Option<&[Pos2]> {
        match self {
            EditorState::Drawing { points } => Some(points),
            _ => None,
        }
    }

    pub(crate) fn stroke_points_mut(&mut self) -> Option<&mut Vec<Pos2>> {
        match self {
            EditorState::Drawing { points } => Some(points),
            _ => None,
        }
    }
}
