pub mod config;
pub mod obstacle;
pub mod star;

use serde::{Deserialize, Serialize};

use starbounce_core::geometry::Vec2;
use starbounce_core::render::{DrawCall, Renderer, SpriteKind};
use starbounce_core::sim::{DrivenInput, SimEvent, Simulation};
use starbounce_core::time::sanitize_dt;

use config::SandboxConfig;
use obstacle::{Platform, Wall};
use star::Star;

/// Serializable scene state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SandboxState {
    pub star: Star,
    pub platform: Platform,
    pub walls: Vec<Wall>,
    pub tick: u64,
    pub elapsed: f32,
}

/// The bounce scene: one star, one driven platform, and static walls.
pub struct Sandbox {
    state: SandboxState,
    spin_rate: f32,
}

impl Sandbox {
    pub fn new() -> Self {
        Self::from_config(&SandboxConfig::default())
    }

    pub fn from_config(config: &SandboxConfig) -> Self {
        let physics = &config.physics;
        let star = Star::new(
            config.star.position,
            config.star.velocity,
            config.star.size,
            physics.gravity,
        )
        .with_reset_state(config.star.position, config.star.velocity)
        .with_tuning(physics.tuning());

        let platform = Platform::new(config.platform.position, config.platform.size)
            .with_reset_position(config.platform.position);

        let walls = config
            .walls
            .iter()
            .map(|w| Wall::new(w.position, w.size))
            .collect();

        Self {
            state: SandboxState {
                star,
                platform,
                walls,
                tick: 0,
                elapsed: 0.0,
            },
            spin_rate: config.spin_rate,
        }
    }

    pub fn state(&self) -> &SandboxState {
        &self.state
    }

    pub fn star(&self) -> &Star {
        &self.state.star
    }

    pub fn star_mut(&mut self) -> &mut Star {
        &mut self.state.star
    }

    pub fn platform(&self) -> &Platform {
        &self.state.platform
    }

    pub fn walls(&self) -> &[Wall] {
        &self.state.walls
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for Sandbox {
    fn tick(&mut self, dt: f32, input: &DrivenInput) -> Vec<SimEvent> {
        let dt = sanitize_dt(dt);
        let input = input.sanitized();

        if input.reset {
            self.reset();
            return vec![SimEvent::Reset];
        }

        let SandboxState {
            star,
            platform,
            walls,
            tick,
            elapsed,
        } = &mut self.state;
        *tick += 1;
        *elapsed += dt;

        // Platform first so the star collides with this tick's surface
        if input.platform_offset != Vec2::ZERO {
            platform.nudge(input.platform_offset);
        }

        star.advance(dt);

        let mut events = Vec::new();
        if let Some(bounce) = star.resolve_platform_collision(platform.position(), platform.size())
        {
            events.push(SimEvent::PlatformBounce {
                velocity_y: bounce.velocity_y,
            });
        }
        for (i, wall) in walls.iter().enumerate() {
            if let Some(bounce) = star.resolve_wall_collision(wall.position(), wall.size()) {
                events.push(SimEvent::WallBounce {
                    wall: i,
                    side: bounce.side,
                    velocity_x: bounce.velocity_x,
                });
            }
        }
        events
    }

    fn reset(&mut self) {
        self.state.star.reset();
        self.state.platform.reset();
        self.state.tick = 0;
        self.state.elapsed = 0.0;
        tracing::info!("Sandbox reset");
    }

    fn draw(&self, renderer: &mut dyn Renderer) {
        for wall in &self.state.walls {
            renderer.draw(&DrawCall::axis_aligned(
                SpriteKind::Wall,
                wall.position(),
                wall.size(),
            ));
        }
        let platform = &self.state.platform;
        renderer.draw(&DrawCall::axis_aligned(
            SpriteKind::Platform,
            platform.position(),
            platform.size(),
        ));
        let star = &self.state.star;
        renderer.draw(&DrawCall {
            kind: SpriteKind::Star,
            position: star.position,
            size: star.size(),
            orientation: self.state.elapsed * self.spin_rate,
            scale: 1.0,
        });
    }

    fn serialize_state(&self) -> Vec<u8> {
        match rmp_serde::to_vec(&self.state) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("Failed to serialize sandbox state: {e}");
                Vec::new()
            },
        }
    }

    fn apply_state(&mut self, state: &[u8]) {
        match rmp_serde::from_slice::<SandboxState>(state) {
            Ok(s) => self.state = s,
            Err(e) => tracing::warn!("Ignoring undecodable sandbox state: {e}"),
        }
    }

    fn tick_count(&self) -> u64 {
        self.state.tick
    }
}
