mod editor_state;
pub mod context;

pub use context::{CurrentFile, EditorContext};
pub use editor_state::{EditorState, Tool};
