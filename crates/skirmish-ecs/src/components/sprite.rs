//! Textured sprites and strip animations.
//!
//! Directional animations use one texture row per [`Facing`]. Fixed
//! sprites are drawn in screen space and ignore the camera.

use crate::component::{ComponentKind, RenderContext, UpdateContext};
use crate::components::Transform;
use crate::entity::Entity;
use crate::geometry::Rect;
use crate::gfx::{Flip, TextureHandle};
use crate::EcsError;

/// Direction an entity faces; selects the sprite-sheet row of a
/// directional animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Down = 0,
    Right = 1,
    Left = 2,
    Up = 3,
}

impl Facing {
    /// Sheet row for directional animations.
    pub fn row(self) -> u32 {
        self as u32
    }

    /// Heading in degrees, screen coordinates (y grows downwards).
    pub fn angle_degrees(self) -> f32 {
        match self {
            Facing::Right => 0.0,
            Facing::Down => 90.0,
            Facing::Left => 180.0,
            Facing::Up => 270.0,
        }
    }
}

/// Frame-strip animation: `frames` columns shown for `speed_ms` each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteAnimation {
    pub frames: u32,
    pub speed_ms: u32,
    /// One row per [`Facing`] instead of a single row.
    pub directional: bool,
}

impl SpriteAnimation {
    /// Column shown at `elapsed_ms`.
    pub fn frame_at(&self, elapsed_ms: u64) -> u32 {
        let speed = u64::from(self.speed_ms.max(1));
        let frames = u64::from(self.frames.max(1));
        ((elapsed_ms / speed) % frames) as u32
    }
}

/// Textured quad that follows the owner's [`Transform`].
///
/// Attaching a sprite to an entity without a transform fails with
/// [`EcsError::MissingDependency`].
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    texture: TextureHandle,
    animation: Option<SpriteAnimation>,
    facing: Facing,
    /// Drawn in screen space, ignoring the camera (HUD elements).
    fixed: bool,
    pub flip: Flip,
    source: Rect,
    destination: Rect,
}

impl Sprite {
    /// Single static frame.
    pub fn new(texture: TextureHandle) -> Self {
        Self {
            texture,
            animation: None,
            facing: Facing::default(),
            fixed: false,
            flip: Flip::None,
            source: Rect::default(),
            destination: Rect::default(),
        }
    }

    pub fn animated(texture: TextureHandle, animation: SpriteAnimation) -> Self {
        Self {
            animation: Some(animation),
            ..Self::new(texture)
        }
    }

    /// Draw in screen space.
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn with_flip(mut self, flip: Flip) -> Self {
        self.flip = flip;
        self
    }

    /// Switch to the row for `facing`. Has no effect unless the animation
    /// is directional.
    pub fn play(&mut self, facing: Facing) {
        if self.animation.is_some_and(|a| a.directional) {
            self.facing = facing;
        }
    }

    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Region of the texture drawn this frame.
    pub fn source(&self) -> Rect {
        self.source
    }

    /// World-space (screen-space if fixed) target region.
    pub fn destination(&self) -> Rect {
        self.destination
    }

    fn row(&self) -> u32 {
        match self.animation {
            Some(animation) if animation.directional => self.facing.row(),
            _ => 0,
        }
    }

    pub(crate) fn initialize(&mut self, owner: &Entity) -> Result<(), EcsError> {
        let transform = owner.require_component::<Transform>(ComponentKind::Sprite)?;
        self.source = Rect::new(0.0, 0.0, transform.width, transform.height);
        self.destination = transform.bounds();
        Ok(())
    }

    pub(crate) fn update(&mut self, owner: &Entity, ctx: &UpdateContext<'_>) {
        let Some(transform) = owner.component::<Transform>() else {
            return;
        };
        self.source.width = transform.width;
        self.source.height = transform.height;
        if let Some(animation) = self.animation {
            self.source.x = self.source.width * animation.frame_at(ctx.elapsed_ms) as f32;
        }
        self.source.y = self.row() as f32 * transform.height;
        self.destination = transform.bounds();
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext<'_>) {
        let destination = if self.fixed {
            self.destination
        } else {
            self.destination.relative_to(ctx.camera.position())
        };
        ctx.graphics
            .draw(self.texture, self.source, destination, self.flip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::SpawnQueue;
    use crate::input::KeyState;
    use crate::layer::Layer;
    use crate::registry::EntityRegistry;

    fn chopper_sheet() -> SpriteAnimation {
        SpriteAnimation {
            frames: 2,
            speed_ms: 90,
            directional: true,
        }
    }

    #[test]
    fn frame_cycles_with_time() {
        let anim = chopper_sheet();
        assert_eq!(anim.frame_at(0), 0);
        assert_eq!(anim.frame_at(89), 0);
        assert_eq!(anim.frame_at(90), 1);
        assert_eq!(anim.frame_at(180), 0);
    }

    #[test]
    fn zero_speed_and_frames_do_not_divide_by_zero() {
        let anim = SpriteAnimation {
            frames: 0,
            speed_ms: 0,
            directional: false,
        };
        assert_eq!(anim.frame_at(12345), 0);
    }

    #[test]
    fn source_follows_animation_and_facing() {
        let mut registry = EntityRegistry::new();
        let e = registry.create_entity("chopper", Layer::Player);
        e.add_component(Transform::at(0.0, 0.0, 32.0, 32.0)).unwrap();
        e.add_component(Sprite::animated(TextureHandle(0), chopper_sheet()))
            .unwrap()
            .play(Facing::Left);

        let keys = KeyState::default();
        let mut spawns = SpawnQueue::new();
        let mut ctx = UpdateContext {
            delta_time: 0.016,
            elapsed_ms: 95,
            keys: &keys,
            spawns: &mut spawns,
        };
        e.update(&mut ctx);

        let sprite = e.component::<Sprite>().unwrap();
        assert_eq!(sprite.source(), Rect::new(32.0, 64.0, 32.0, 32.0));
    }

    #[test]
    fn play_ignored_for_single_row_sprites() {
        let mut sprite = Sprite::animated(
            TextureHandle(0),
            SpriteAnimation {
                frames: 8,
                speed_ms: 150,
                directional: false,
            },
        );
        sprite.play(Facing::Up);
        assert_eq!(sprite.facing(), Facing::Down);
        assert_eq!(sprite.row(), 0);
    }
}
