use serde::{Deserialize, Serialize};

use starbounce_core::geometry::{Aabb, Vec2};

/// Canonical platform position restored by a reset.
pub const PLATFORM_RESET_POSITION: Vec2 = Vec2::new(0.0, 0.9);

/// Kinematic platform: moved by external input, never by the integrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Platform {
    position: Vec2,
    size: Vec2,
    reset_position: Vec2,
}

impl Platform {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            reset_position: PLATFORM_RESET_POSITION,
        }
    }

    /// Override the canonical position restored by [`Platform::reset`].
    pub fn with_reset_position(mut self, position: Vec2) -> Self {
        self.reset_position = position;
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }

    /// Move the platform. Non-finite positions are ignored.
    pub fn set_position(&mut self, position: Vec2) {
        if !position.is_finite() {
            tracing::debug!(?position, "Ignoring non-finite platform position");
            return;
        }
        self.position = position;
    }

    /// Move the platform by `offset`.
    pub fn nudge(&mut self, offset: Vec2) {
        self.set_position(self.position + offset);
    }

    pub fn reset(&mut self) {
        self.position = self.reset_position;
    }
}

/// A static wall. Position and size never change after construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wall {
    position: Vec2,
    size: Vec2,
}

impl Wall {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }
}
