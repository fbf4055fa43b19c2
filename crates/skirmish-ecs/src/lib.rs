//! Skirmish ECS -- entity/component runtime for tile-based 2D games.
//!
//! Game objects are [`Entity`](entity::Entity) values that own at most one
//! component of each [`ComponentKind`](component::ComponentKind). The
//! [`EntityRegistry`](registry::EntityRegistry) owns every entity, drives the
//! per-frame update and render traversals, and delegates pairwise collision
//! detection to the [`collision`] module.
//!
//! # Quick Start
//!
//! ```
//! use skirmish_ecs::prelude::*;
//!
//! let mut registry = EntityRegistry::new();
//!
//! let player = registry.create_entity("player", Layer::Player);
//! player.add_component(Transform::at(0.0, 0.0, 32.0, 32.0)).unwrap();
//! player.add_component(Collider::new(ColliderTag::Player)).unwrap();
//!
//! let enemy = registry.create_entity("tank", Layer::Enemy);
//! enemy.add_component(Transform::at(16.0, 16.0, 32.0, 32.0)).unwrap();
//! enemy.add_component(Collider::new(ColliderTag::Enemy)).unwrap();
//!
//! registry.update(0.016, 16, &KeyState::default());
//! assert_eq!(registry.check_collisions().kind, CollisionKind::PlayerEnemy);
//! ```

#![deny(unsafe_code)]

pub mod collision;
pub mod command;
pub mod component;
pub mod components;
pub mod entity;
pub mod geometry;
pub mod gfx;
pub mod input;
pub mod layer;
pub mod registry;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by entity and component operations.
#[derive(Debug, thiserror::Error)]
pub enum EcsError {
    /// A component's initialization needs a sibling component that the
    /// entity does not carry (e.g. a sprite attached before its transform).
    #[error("{component} on entity {entity} requires a {requires} component")]
    MissingDependency {
        entity: entity::EntityId,
        component: component::ComponentKind,
        requires: component::ComponentKind,
    },

    /// The entity does not exist (never created or already pruned).
    #[error("entity {entity} does not exist")]
    UnknownEntity { entity: entity::EntityId },

    /// The entity exists but has no component of the requested kind.
    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        entity: entity::EntityId,
        component: component::ComponentKind,
    },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::collision::{classify, ColliderTag, CollisionKind, CollisionOutcome};
    pub use crate::command::{EntityTemplate, SpawnQueue};
    pub use crate::component::{
        Component, ComponentData, ComponentKind, RenderContext, UpdateContext,
    };
    pub use crate::components::{
        Collider, Facing, KeyBindings, KeyboardControl, ProjectileEmitter, ProjectileTemplate,
        Sprite, SpriteAnimation, TextLabel, Tile, Transform,
    };
    pub use crate::entity::{Entity, EntityId};
    pub use crate::geometry::Rect;
    pub use crate::gfx::{Color, Flip, FontHandle, Graphics, GraphicsError, TextureHandle};
    pub use crate::input::{Key, KeyState};
    pub use crate::layer::{Layer, NUM_LAYERS};
    pub use crate::registry::{EntityRegistry, UpdateReport};
    pub use crate::EcsError;
    pub use glam::Vec2;
}

// ---------------------------------------------------------------------------
// Integration Tests
// ---------------------------------------------------------------------------
