//! Collision boxes.
//!
//! A [`Collider`] follows its owner's [`Transform`] and carries the
//! [`ColliderTag`] that the collision scan classifies pairs by. Outlines
//! are drawn only while collider display is switched on.

use crate::collision::ColliderTag;
use crate::component::RenderContext;
use crate::components::Transform;
use crate::entity::Entity;
use crate::geometry::Rect;
use crate::gfx::Color;

/// Axis-aligned collision box plus the tag used to classify collisions.
///
/// When the owner has a [`Transform`] the box tracks it every update;
/// otherwise it keeps the bounds it was created with.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    tag: ColliderTag,
    bounds: Rect,
}

impl Collider {
    pub fn new(tag: ColliderTag) -> Self {
        Self::with_bounds(tag, Rect::default())
    }

    pub fn with_bounds(tag: ColliderTag, bounds: Rect) -> Self {
        Self { tag, bounds }
    }

    pub fn tag(&self) -> ColliderTag {
        self.tag
    }

    /// World-space box as of the last update.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub(crate) fn initialize(&mut self, owner: &Entity) {
        self.sync(owner);
    }

    pub(crate) fn update(&mut self, owner: &Entity) {
        self.sync(owner);
    }

    fn sync(&mut self, owner: &Entity) {
        if let Some(transform) = owner.component::<Transform>() {
            self.bounds = transform.bounds();
        }
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext<'_>) {
        if ctx.show_colliders {
            let outline = self.bounds.relative_to(ctx.camera.position());
            ctx.graphics.draw_outline(outline, Color::COLLIDER);
        }
    }
}
