use serde::{Deserialize, Serialize};

use starbounce_core::collision::{self, HitSide};
use starbounce_core::geometry::{Aabb, Vec2};

/// Downward acceleration magnitude (units/s^2).
pub const GRAVITY: f32 = 2.0;
/// Star width and height.
pub const STAR_SIZE: Vec2 = Vec2::new(0.2, 0.2);
/// Canonical position restored by a reset.
pub const STAR_RESET_POSITION: Vec2 = Vec2::new(0.0, 1.0);
/// Canonical velocity restored by a reset.
pub const STAR_RESET_VELOCITY: Vec2 = Vec2::new(0.1, -0.1);
/// Vertical speed below which a platform bounce ends in rest.
pub const PLATFORM_REST_SPEED: f32 = 1.0;
/// Horizontal speed kept after a wall bounce.
pub const WALL_RESTITUTION: f32 = 0.8;
/// Clearance left between the star and the wall it bounced off.
pub const WALL_SEPARATION: f32 = 0.001;
/// Horizontal speed below which a wall bounce ends in rest.
pub const WALL_REST_SPEED: f32 = 0.001;

/// Collision-response parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BounceTuning {
    pub platform_rest_speed: f32,
    pub wall_restitution: f32,
    pub wall_separation: f32,
    pub wall_rest_speed: f32,
    pub swept_platform: bool,
}

impl Default for BounceTuning {
    fn default() -> Self {
        Self {
            platform_rest_speed: PLATFORM_REST_SPEED,
            wall_restitution: WALL_RESTITUTION,
            wall_separation: WALL_SEPARATION,
            wall_rest_speed: WALL_REST_SPEED,
            swept_platform: false,
        }
    }
}

/// Vertical motion state, derived from the sign of `velocity.y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalState {
    Falling,
    Rising,
    Resting,
}

/// Outcome of a platform bounce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformBounce {
    /// Vertical velocity after the bounce (0 when clamped to rest).
    pub velocity_y: f32,
    /// How far below the platform top the star had sunk before the snap.
    pub penetration: f32,
}

/// Outcome of a wall bounce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallBounce {
    pub side: HitSide,
    /// Horizontal velocity after the bounce (0 when clamped to rest).
    pub velocity_x: f32,
}

/// The gravity-driven projectile.
///
/// `size` and `gravity` are fixed at construction. `previous_position` is the
/// position at the start of the current tick and must be captured before
/// [`Star::integrate`]; [`Star::advance`] does both in the right order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Star {
    pub position: Vec2,
    pub velocity: Vec2,
    pub previous_position: Vec2,
    size: Vec2,
    gravity: f32,
    reset_position: Vec2,
    reset_velocity: Vec2,
    tuning: BounceTuning,
}

impl Star {
    /// Negative or non-finite gravity is treated as zero.
    pub fn new(position: Vec2, velocity: Vec2, size: Vec2, gravity: f32) -> Self {
        let gravity = if gravity.is_finite() {
            gravity.max(0.0)
        } else {
            0.0
        };
        Self {
            position,
            velocity,
            previous_position: position,
            size,
            gravity,
            reset_position: STAR_RESET_POSITION,
            reset_velocity: STAR_RESET_VELOCITY,
            tuning: BounceTuning::default(),
        }
    }

    /// Override the canonical state restored by [`Star::reset`].
    pub fn with_reset_state(mut self, position: Vec2, velocity: Vec2) -> Self {
        self.reset_position = position;
        self.reset_velocity = velocity;
        self
    }

    pub fn with_tuning(mut self, tuning: BounceTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn tuning(&self) -> &BounceTuning {
        &self.tuning
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }

    pub fn vertical_state(&self) -> VerticalState {
        if self.velocity.y < 0.0 {
            VerticalState::Falling
        } else if self.velocity.y > 0.0 {
            VerticalState::Rising
        } else {
            VerticalState::Resting
        }
    }

    /// Record the start-of-tick position used by the swept checks.
    pub fn snapshot_previous(&mut self) {
        self.previous_position = self.position;
    }

    /// Semi-implicit Euler step: velocity first, then position with the new velocity.
    pub fn integrate(&mut self, dt: f32) {
        self.velocity.y -= self.gravity * dt;
        self.position += self.velocity * dt;
    }

    /// Snapshot the previous position, then integrate.
    pub fn advance(&mut self, dt: f32) {
        self.snapshot_previous();
        self.integrate(dt);
    }

    /// Bounce off the top of a platform.
    ///
    /// Fires only while falling, horizontally aligned, and vertically overlapping
    /// the platform (or, with `swept_platform`, having fallen through its top this
    /// tick). The star is snapped onto the platform top, so a discrete step that
    /// sank into it never accumulates.
    pub fn resolve_platform_collision(
        &mut self,
        platform_pos: Vec2,
        platform_size: Vec2,
    ) -> Option<PlatformBounce> {
        if self.velocity.y >= 0.0 {
            return None;
        }
        let aligned =
            collision::horizontal_overlap(self.position, self.size, platform_pos, platform_size);
        if !aligned {
            return None;
        }
        let overlapping =
            collision::vertical_overlap(self.position, self.size, platform_pos, platform_size);
        let crossed = self.tuning.swept_platform
            && collision::downward_sweep(
                self.position,
                self.size,
                platform_pos,
                platform_size,
                self.previous_position,
            );
        if !overlapping && !crossed {
            return None;
        }

        let top = Aabb::new(platform_pos, platform_size).top();
        let penetration = top - self.position.y;

        self.velocity.y = -self.velocity.y;
        self.position.y = top;

        if self.velocity.y.abs() < self.tuning.platform_rest_speed {
            self.velocity.y = 0.0;
        }

        tracing::debug!(
            x = self.position.x,
            y = self.position.y,
            vy = self.velocity.y,
            penetration,
            swept = !overlapping,
            "Platform bounce"
        );

        Some(PlatformBounce {
            velocity_y: self.velocity.y,
            penetration,
        })
    }

    /// Bounce off a wall the star crossed into during this tick.
    ///
    /// Detection compares the stored previous position with the current one, so
    /// a star moving faster than the wall is thick still bounces. After the hit
    /// the star sits just clear of the face it approached from.
    pub fn resolve_wall_collision(&mut self, wall_pos: Vec2, wall_size: Vec2) -> Option<WallBounce> {
        let side = collision::horizontal_sweep(
            self.position,
            self.size,
            wall_pos,
            wall_size,
            self.previous_position,
        )?;

        let wall = Aabb::new(wall_pos, wall_size);
        self.velocity.x *= -self.tuning.wall_restitution;
        self.position.x = match side {
            HitSide::Right => wall.left() - self.size.x - self.tuning.wall_separation,
            HitSide::Left => wall.right() + self.tuning.wall_separation,
        };

        tracing::debug!(
            ?side,
            x = self.position.x,
            y = self.position.y,
            vx = self.velocity.x,
            "Wall bounce"
        );

        if self.velocity.x.abs() < self.tuning.wall_rest_speed {
            self.velocity.x = 0.0;
            tracing::debug!("Horizontal velocity clamped to rest");
        }

        Some(WallBounce {
            side,
            velocity_x: self.velocity.x,
        })
    }

    /// Restore the canonical position and velocity. Size and gravity are untouched.
    pub fn reset(&mut self) {
        self.position = self.reset_position;
        self.velocity = self.reset_velocity;
        self.previous_position = self.position;
    }
}
