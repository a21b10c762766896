/// Pull-based "mark dirty, redraw" signal.
///
/// Mutators mark it; the display surface takes the flag once per frame and
/// repaints when it was set.
#[derive(Debug, Clone, Default)]
pub struct RenderTrigger {
    dirty: bool,
    generation: u64,
}

impl RenderTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and reset the flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Number of times the trigger fired so far
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
