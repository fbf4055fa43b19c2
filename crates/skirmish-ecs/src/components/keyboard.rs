//! Player steering and shooting from the polled key state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::ColliderTag;
use crate::command::EntityTemplate;
use crate::component::UpdateContext;
use crate::components::{Collider, Facing, ProjectileEmitter, Sprite, Transform};
use crate::entity::Entity;
use crate::gfx::TextureHandle;
use crate::input::Key;
use crate::layer::Layer;

/// Which keys drive the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub up: Key,
    pub right: Key,
    pub down: Key,
    pub left: Key,
    pub shoot: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: Key::Up,
            right: Key::Right,
            down: Key::Down,
            left: Key::Left,
            shoot: Key::Space,
        }
    }
}

/// What a keyboard-controlled entity fires.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileTemplate {
    pub texture: Option<TextureHandle>,
    pub speed: f32,
    pub range: f32,
    /// Edge length of the (square) projectile.
    pub size: f32,
}

/// Moves the owner from the polled key state.
///
/// Holding a direction sets the sibling [`Transform`] velocity to `speed`
/// along that axis and turns a directional [`Sprite`]; with no direction
/// held the entity stops. Up wins over right, right over down, down over
/// left. Pressing shoot queues one friendly projectile per key press.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardControl {
    bindings: KeyBindings,
    speed: f32,
    projectile: Option<ProjectileTemplate>,
    facing: Facing,
    shoot_held: bool,
}

impl KeyboardControl {
    pub fn new(bindings: KeyBindings, speed: f32) -> Self {
        Self {
            bindings,
            speed,
            projectile: None,
            facing: Facing::default(),
            shoot_held: false,
        }
    }

    pub fn with_projectile(mut self, projectile: ProjectileTemplate) -> Self {
        self.projectile = Some(projectile);
        self
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    fn steer(&self, ctx: &UpdateContext<'_>) -> Option<(Vec2, Facing)> {
        let b = &self.bindings;
        let s = self.speed;
        [
            (b.up, Vec2::new(0.0, -s), Facing::Up),
            (b.right, Vec2::new(s, 0.0), Facing::Right),
            (b.down, Vec2::new(0.0, s), Facing::Down),
            (b.left, Vec2::new(-s, 0.0), Facing::Left),
        ]
        .into_iter()
        .find(|(key, _, _)| ctx.keys.is_pressed(*key))
        .map(|(_, velocity, facing)| (velocity, facing))
    }

    pub(crate) fn update(&mut self, owner: &mut Entity, ctx: &mut UpdateContext<'_>) {
        let steering = self.steer(ctx);
        if let Some((_, facing)) = steering {
            self.facing = facing;
            if let Some(sprite) = owner.component_mut::<Sprite>() {
                sprite.play(facing);
            }
        }
        if let Some(transform) = owner.component_mut::<Transform>() {
            transform.velocity = steering.map_or(Vec2::ZERO, |(velocity, _)| velocity);
        }

        let shoot = ctx.keys.is_pressed(self.bindings.shoot);
        if shoot && !self.shoot_held {
            self.fire(owner, ctx);
        }
        self.shoot_held = shoot;
    }

    fn fire(&self, owner: &Entity, ctx: &mut UpdateContext<'_>) {
        let (Some(projectile), Some(transform)) =
            (&self.projectile, owner.component::<Transform>())
        else {
            return;
        };
        let half = projectile.size * 0.5;
        let start = transform.center() - Vec2::splat(half);
        let name = format!("{}-projectile", owner.name());
        let mut template = EntityTemplate::new(name, Layer::Projectile)
            .with(Transform::at(start.x, start.y, projectile.size, projectile.size))
            .with(ProjectileEmitter::new(
                projectile.speed,
                self.facing.angle_degrees(),
                projectile.range,
                false,
            ))
            .with(Collider::new(ColliderTag::FriendlyProjectile));
        if let Some(texture) = projectile.texture {
            template = template.with(Sprite::new(texture));
        }
        ctx.spawns.spawn(template);
    }
}
