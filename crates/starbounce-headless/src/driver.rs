use std::time::Duration;

use serde::Serialize;

use starbounce_core::sim::{DrivenInput, SimEvent, Simulation};
use starbounce_core::time::{FpsCounter, FrameClock};
use starbounce_sandbox::{Sandbox, SandboxState};

use crate::autopilot;
use crate::config::HeadlessConfig;
use crate::trace_renderer::TraceRenderer;

/// Totals reported at the end of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub platform_bounces: u64,
    pub wall_bounces: u64,
    pub resets: u64,
    pub draw_calls: u64,
    /// Last completed wall-clock FPS sample, if the run lasted a second.
    pub fps: Option<f32>,
    pub final_state: SandboxState,
}

/// Whether frame `frame` (0-based) should carry a reset input.
pub fn is_reset_frame(frame: u64, reset_every: Option<u64>) -> bool {
    match reset_every {
        Some(n) if n > 0 => frame > 0 && frame % n == 0,
        _ => false,
    }
}

/// Drive `sandbox` for `config.frames` frames.
pub fn run(sandbox: &mut Sandbox, config: &HeadlessConfig) -> RunSummary {
    let mut clock = FrameClock::new();
    let mut fps = FpsCounter::new();
    let mut renderer = TraceRenderer::new();
    let frame_budget = Duration::try_from_secs_f32(config.frame_dt).unwrap_or_default();

    let mut platform_bounces = 0;
    let mut wall_bounces = 0;
    let mut resets = 0;

    tracing::info!(
        frames = config.frames,
        frame_dt = config.frame_dt,
        realtime = config.realtime,
        "Starting frame loop"
    );

    for frame in 0..config.frames {
        if config.realtime {
            std::thread::sleep(frame_budget);
        }
        let measured = clock.tick();
        let dt = if config.realtime {
            measured
        } else {
            config.frame_dt
        };

        let input = if is_reset_frame(frame, config.reset_every) {
            DrivenInput::reset()
        } else {
            autopilot::steer(sandbox, config.platform_speed, dt)
        };

        for event in sandbox.tick(dt, &input) {
            match event {
                SimEvent::PlatformBounce { .. } => platform_bounces += 1,
                SimEvent::WallBounce { .. } => wall_bounces += 1,
                SimEvent::Reset => resets += 1,
            }
            tracing::debug!(frame, ?event, "Sim event");
        }
        sandbox.draw(&mut renderer);

        if let Some(sample) = fps.record(measured) {
            tracing::info!(frame, fps = sample, "Frame rate");
        }
    }

    RunSummary {
        frames: config.frames,
        platform_bounces,
        wall_bounces,
        resets,
        draw_calls: renderer.calls(),
        fps: fps.last_sample(),
        final_state: sandbox.state().clone(),
    }
}
