use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use crate::event::{CanvasEvent, EventHandler};

/// Writes every canvas event to the debug log
#[derive(Debug, Default)]
pub struct EventLogger;

impl EventHandler for EventLogger {
    fn handle_event(&mut self, event: &CanvasEvent) {
        debug!("📣 {:?}", event);
    }
}

/// Flags the layer panel for a rebuild whenever the object list changes
#[derive(Debug, Clone)]
pub struct LayerPanelSync {
    stale: Arc<AtomicBool>,
}

impl LayerPanelSync {
    /// Create the handler and the flag the panel polls
    pub fn new() -> (Self, Arc<AtomicBool>) {
        // Starts stale so the first frame builds the list
        let stale = Arc::new(AtomicBool::new(true));
        (
            Self {
                stale: Arc::clone(&stale),
            },
            stale,
        )
    }
}

impl EventHandler for LayerPanelSync {
    fn handle_event(&mut self, event: &CanvasEvent) {
        if event.affects_layers() {
            self.stale.store(true, Ordering::Release);
        }
    }
}
