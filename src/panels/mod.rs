mod central_panel;
mod header_panel;
mod layers_panel;
mod properties_panel;
mod tools_panel;

pub use central_panel::central_panel;
pub use header_panel::header_panel;
pub use layers_panel::LayersPanel;
pub use properties_panel::properties_panel;
pub use tools_panel::tools_panel;

use crate::command::Command;

/// What a panel asks the app to do this frame
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    /// Apply a command to the editor
    Command(Command),
    /// Start the host open dialog
    OpenFile,
    /// Flatten the canvas and start the host save dialog
    SaveFile,
}

impl From<Command> for PanelAction {
    fn from(command: Command) -> Self {
        PanelAction::Command(command)
    }
}
