//! Straight-line projectiles with a limited range.
//!
//! The emitter sets its owner's velocity once, at attach time, and checks
//! the travelled distance every update: past the range a looping
//! projectile jumps back to its origin and a one-shot projectile destroys
//! its owner.

use glam::Vec2;

use crate::component::ComponentKind;
use crate::components::Transform;
use crate::entity::Entity;
use crate::EcsError;

/// Launches its owner in a straight line and retires it after `range`
/// pixels, either by destroying it or, when looping, by sending it back to
/// where it started.
///
/// Requires a [`Transform`]; initialization overwrites its velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileEmitter {
    speed: f32,
    angle_degrees: f32,
    range: f32,
    looping: bool,
    origin: Vec2,
}

impl ProjectileEmitter {
    pub fn new(speed: f32, angle_degrees: f32, range: f32, looping: bool) -> Self {
        Self {
            speed,
            angle_degrees,
            range,
            looping,
            origin: Vec2::ZERO,
        }
    }

    /// Velocity implied by speed and heading (y grows downwards).
    pub fn velocity(&self) -> Vec2 {
        Vec2::from_angle(self.angle_degrees.to_radians()) * self.speed
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn range(&self) -> f32 {
        self.range
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub(crate) fn initialize(&mut self, owner: &mut Entity) -> Result<(), EcsError> {
        let velocity = self.velocity();
        let entity = owner.id();
        let transform = owner
            .component_mut::<Transform>()
            .ok_or(EcsError::MissingDependency {
                entity,
                component: ComponentKind::ProjectileEmitter,
                requires: ComponentKind::Transform,
            })?;
        self.origin = transform.position;
        transform.velocity = velocity;
        Ok(())
    }

    pub(crate) fn update(&mut self, owner: &mut Entity) {
        let expired = owner
            .component::<Transform>()
            .is_some_and(|t| t.position.distance(self.origin) > self.range);
        if !expired {
            return;
        }
        if self.looping {
            if let Some(transform) = owner.component_mut::<Transform>() {
                transform.position = self.origin;
            }
        } else {
            owner.destroy();
        }
    }
}
