use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

/// What kind of object a draw call represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Star,
    Platform,
    Wall,
}

/// Geometry and transform for one object, in world units.
///
/// `position` is the bottom-left corner, matching the physics boxes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawCall {
    pub kind: SpriteKind,
    pub position: Vec2,
    pub size: Vec2,
    /// Rotation in radians. Purely visual.
    pub orientation: f32,
    pub scale: f32,
}

impl DrawCall {
    /// An unrotated, unscaled call.
    pub fn axis_aligned(kind: SpriteKind, position: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            position,
            size,
            orientation: 0.0,
            scale: 1.0,
        }
    }
}

/// Consumer of per-frame draw calls. Implemented by whatever owns the GPU.
pub trait Renderer {
    fn draw(&mut self, call: &DrawCall);
}

/// Collects calls in order; handy for tools and tests.
impl Renderer for Vec<DrawCall> {
    fn draw(&mut self, call: &DrawCall) {
        self.push(*call);
    }
}
