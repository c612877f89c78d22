use std::time::Instant;

/// Clamp a frame delta to a usable value: negatives and non-finite become 0.
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

/// Frames-per-second sampled over one-second windows of accumulated dt.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames: u32,
    window: f32,
    last_sample: Option<f32>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame. Returns a fresh sample when a window closes.
    pub fn record(&mut self, dt: f32) -> Option<f32> {
        self.frames += 1;
        self.window += sanitize_dt(dt);
        if self.window < 1.0 {
            return None;
        }
        let fps = self.frames as f32 / self.window;
        self.frames = 0;
        self.window = 0.0;
        self.last_sample = Some(fps);
        Some(fps)
    }

    /// Most recent completed sample.
    pub fn last_sample(&self) -> Option<f32> {
        self.last_sample
    }
}

/// Monotonic frame timer producing the `dt` fed to the simulation.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self { last: start }
    }

    /// Seconds elapsed since the previous call (or construction).
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Like [`FrameClock::tick`] with an explicit timestamp. A timestamp earlier
    /// than the previous one yields 0.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = now.saturating_duration_since(self.last).as_secs_f32();
        if now > self.last {
            self.last = now;
        } else {
            tracing::trace!("Frame clock saw a non-increasing timestamp");
        }
        sanitize_dt(dt)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
