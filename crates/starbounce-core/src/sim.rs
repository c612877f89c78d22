use serde::{Deserialize, Serialize};

use crate::collision::HitSide;
use crate::geometry::Vec2;
use crate::render::Renderer;

/// A scene advanced one frame at a time by an external frame loop.
///
/// The frame driver owns the simulation and the loop; the simulation only
/// handles physics state and describes itself to a [`Renderer`].
pub trait Simulation: Send + Sync {
    /// Advance by one frame of `dt` seconds. Returns what happened this tick.
    fn tick(&mut self, dt: f32, input: &DrivenInput) -> Vec<SimEvent>;

    /// Return every movable object to its canonical start state.
    fn reset(&mut self);

    /// Emit one draw call per visible object.
    fn draw(&self, renderer: &mut dyn Renderer);

    /// Serialize the full scene state.
    fn serialize_state(&self) -> Vec<u8>;

    /// Replace the scene state with previously serialized bytes.
    /// Undecodable input leaves the current state untouched.
    fn apply_state(&mut self, state: &[u8]);

    /// Number of ticks run since construction or the last reset.
    fn tick_count(&self) -> u64;
}

/// Externally produced per-tick input.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct DrivenInput {
    /// Displacement to apply to the kinematic platform this tick.
    pub platform_offset: Vec2,
    /// Discrete reset trigger.
    pub reset: bool,
}

impl DrivenInput {
    /// Build an input from analog axes in `[-1, 1]` moving at `speed` units/s.
    pub fn from_axes(axis_x: f32, axis_y: f32, speed: f32, dt: f32) -> Self {
        let axis = Vec2::new(axis_x, axis_y).finite_or_zero();
        let axis = Vec2::new(axis.x.clamp(-1.0, 1.0), axis.y.clamp(-1.0, 1.0));
        Self {
            platform_offset: (axis * speed * dt).finite_or_zero(),
            reset: false,
        }
    }

    pub fn reset() -> Self {
        Self {
            reset: true,
            ..Self::default()
        }
    }

    /// Copy with non-finite offset components replaced by zero.
    pub fn sanitized(&self) -> Self {
        Self {
            platform_offset: self.platform_offset.finite_or_zero(),
            reset: self.reset,
        }
    }
}

/// Something noteworthy that happened during a tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum SimEvent {
    /// The body bounced off the top of the platform.
    PlatformBounce { velocity_y: f32 },
    /// The body crossed into a wall and was pushed back out.
    WallBounce {
        wall: usize,
        side: HitSide,
        velocity_x: f32,
    },
    /// The scene returned to its canonical state.
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_scale_by_speed_and_dt() {
        let input = DrivenInput::from_axes(1.0, -0.5, 2.0, 0.25);
        assert_eq!(input.platform_offset, Vec2::new(0.5, -0.25));
        assert!(!input.reset);
    }

    #[test]
    fn axes_are_clamped() {
        let input = DrivenInput::from_axes(5.0, -3.0, 1.0, 1.0);
        assert_eq!(input.platform_offset, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn nan_axes_treated_as_zero() {
        let input = DrivenInput::from_axes(f32::NAN, 1.0, 1.0, 0.5);
        assert_eq!(input.platform_offset, Vec2::new(0.0, 0.5));
    }

    #[test]
    fn sanitized_keeps_reset_flag() {
        let input = DrivenInput {
            platform_offset: Vec2::new(f32::INFINITY, 0.25),
            reset: true,
        };
        let clean = input.sanitized();
        assert_eq!(clean.platform_offset, Vec2::new(0.0, 0.25));
        assert!(clean.reset);
    }
}
