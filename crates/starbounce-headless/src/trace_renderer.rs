use starbounce_core::render::{DrawCall, Renderer};

/// Renderer that writes each draw call to the trace log.
#[derive(Debug, Default)]
pub struct TraceRenderer {
    calls: u64,
}

impl TraceRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total draw calls received.
    pub fn calls(&self) -> u64 {
        self.calls
    }
}

impl Renderer for TraceRenderer {
    fn draw(&mut self, call: &DrawCall) {
        self.calls += 1;
        tracing::trace!(
            kind = ?call.kind,
            x = call.position.x,
            y = call.position.y,
            w = call.size.x,
            h = call.size.y,
            orientation = call.orientation,
            "draw"
        );
    }
}
