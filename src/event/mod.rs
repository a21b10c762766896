mod bus;
mod events;
mod handlers;
mod render;

pub use bus::EventBus;
pub use events::CanvasEvent;
pub use handlers::{EventLogger, LayerPanelSync};
pub use render::RenderTrigger;

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &CanvasEvent);
}
