//! Deferred entity creation.
//!
//! Components cannot create entities while the registry is being traversed.
//! Instead they push an [`EntityTemplate`] into the frame's [`SpawnQueue`];
//! the registry drains the queue in FIFO order after every entity has been
//! updated and before inactive entities are pruned.
//!
//! # Example
//!
//! ```
//! use skirmish_ecs::prelude::*;
//!
//! let mut queue = SpawnQueue::new();
//! queue.spawn(
//!     EntityTemplate::new("bullet", Layer::Projectile)
//!         .with(Transform::at(10.0, 10.0, 4.0, 4.0))
//!         .with(Collider::new(ColliderTag::FriendlyProjectile)),
//! );
//! assert_eq!(queue.len(), 1);
//! ```

use crate::component::Component;
use crate::layer::Layer;

// ---------------------------------------------------------------------------
// EntityTemplate
// ---------------------------------------------------------------------------

/// An entity waiting to be created. Components are attached in the order
/// given, so dependencies (usually the transform) go first.
#[derive(Debug, Clone)]
pub struct EntityTemplate {
    pub name: String,
    pub layer: Layer,
    pub components: Vec<Component>,
}

impl EntityTemplate {
    pub fn new(name: impl Into<String>, layer: Layer) -> Self {
        Self {
            name: name.into(),
            layer,
            components: Vec::new(),
        }
    }

    /// Builder-style append.
    pub fn with(mut self, component: impl Into<Component>) -> Self {
        self.components.push(component.into());
        self
    }
}

// ---------------------------------------------------------------------------
// SpawnQueue
// ---------------------------------------------------------------------------

/// FIFO queue of entities to create at the end of the update pass.
#[derive(Debug, Default)]
pub struct SpawnQueue {
    pending: Vec<EntityTemplate>,
}

impl SpawnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, template: EntityTemplate) {
        self.pending.push(template);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Queued templates, oldest first.
    pub fn pending(&self) -> &[EntityTemplate] {
        &self.pending
    }

    /// Remove and return every queued template, oldest first.
    pub fn drain(&mut self) -> std::vec::Drain<'_, EntityTemplate> {
        self.pending.drain(..)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
