//! Position, velocity and size.

use glam::Vec2;

use crate::geometry::Rect;

/// Position, velocity and size of an entity in world pixels.
///
/// `width`/`height` are the unscaled frame size; on-screen and collision
/// size is multiplied by `scale`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    /// Pixels per second.
    pub velocity: Vec2,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

impl Transform {
    pub fn new(position: Vec2, velocity: Vec2, width: f32, height: f32, scale: f32) -> Self {
        Self {
            position,
            velocity,
            width,
            height,
            scale,
        }
    }

    /// Stationary, unscaled transform.
    pub fn at(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::ZERO, width, height, 1.0)
    }

    /// World-space box covered by the entity.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.width * self.scale,
            self.height * self.scale,
        )
    }

    /// Centre of [`bounds`](Self::bounds).
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::new(self.width, self.height) * self.scale * 0.5
    }

    pub(crate) fn update(&mut self, delta_time: f32) {
        self.position += self.velocity * delta_time;
    }
}
