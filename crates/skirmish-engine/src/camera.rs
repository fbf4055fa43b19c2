//! Viewport that follows the player across the map.

use glam::Vec2;
use skirmish_ecs::geometry::Rect;

/// The visible world region.
///
/// Not an entity: each frame it is recomputed from the player's position,
/// centred on it and clamped so it never shows anything outside the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    view: Rect,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            view: Rect::new(0.0, 0.0, width, height),
        }
    }

    /// Centre on `target`, then clamp to `[0, map - view]` on each axis.
    /// A map smaller than the view pins the camera at the origin.
    pub fn follow(&mut self, target: Vec2, map_size: Vec2) {
        let max_x = (map_size.x - self.view.width).max(0.0);
        let max_y = (map_size.y - self.view.height).max(0.0);
        self.view.x = (target.x - self.view.width * 0.5).clamp(0.0, max_x);
        self.view.y = (target.y - self.view.height * 0.5).clamp(0.0, max_y);
    }

    pub fn reset(&mut self) {
        self.view.x = 0.0;
        self.view.y = 0.0;
    }

    pub fn view(&self) -> Rect {
        self.view
    }

    pub fn position(&self) -> Vec2 {
        self.view.position()
    }
}
