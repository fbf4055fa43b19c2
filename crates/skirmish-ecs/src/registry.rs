//! The entity registry: owns every entity and drives the frame traversals.
//!
//! Entities live in a single `Vec` in creation order. A frame's update runs
//! in three phases:
//!
//! 1. every active entity updates its components, pushing new entities into
//!    the frame's [`SpawnQueue`] instead of creating them directly;
//! 2. queued entities are created, in FIFO order;
//! 3. inactive entities are pruned.
//!
//! Destruction during phase 1 only clears the active flag, so no traversal
//! ever observes a removed element.

use tracing::{debug, warn};

use crate::collision::{self, CollisionOutcome};
use crate::command::{EntityTemplate, SpawnQueue};
use crate::component::{RenderContext, UpdateContext};
use crate::entity::{Entity, EntityId, EntityIdAllocator};
use crate::input::KeyState;
use crate::layer::Layer;
use crate::EcsError;

/// Counters for one [`EntityRegistry::update`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateReport {
    /// Active entities whose components were updated.
    pub updated: usize,
    /// Entities created from the spawn queue.
    pub spawned: usize,
    /// Inactive entities removed at the end of the frame.
    pub pruned: usize,
}

/// Owner of all entities in the current level.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    ids: EntityIdAllocator,
    spawns: SpawnQueue,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // -- entity lifecycle ---------------------------------------------------

    /// Create an active entity with no components and return it for
    /// configuration.
    pub fn create_entity(&mut self, name: impl Into<String>, layer: Layer) -> &mut Entity {
        let id = self.ids.allocate();
        let name = name.into();
        debug!(entity = %id, %name, %layer, "entity created");
        let index = self.entities.len();
        self.entities.push(Entity::new(id, name, layer));
        &mut self.entities[index]
    }

    /// Create an entity from a template, attaching its components in order.
    ///
    /// # Errors
    ///
    /// Fails if a component cannot initialize. The entity has already been
    /// created by then; it is destroyed so the next prune removes it.
    pub fn spawn(&mut self, template: EntityTemplate) -> Result<EntityId, EcsError> {
        let EntityTemplate {
            name,
            layer,
            components,
        } = template;
        let entity = self.create_entity(name, layer);
        for component in components {
            if let Err(err) = entity.insert_component(component) {
                entity.destroy();
                return Err(err);
            }
        }
        Ok(entity.id())
    }

    /// Mark the entity inactive. Returns `false` if no such entity exists.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        match self.entity_mut(id) {
            Some(entity) => {
                entity.destroy();
                true
            }
            None => false,
        }
    }

    /// Remove every entity and discard pending spawns. Ids keep counting up.
    pub fn clear(&mut self) {
        debug!(count = self.entities.len(), "registry cleared");
        self.entities.clear();
        self.spawns.clear();
    }

    // -- per-frame ----------------------------------------------------------

    /// Run one frame: update, apply spawns, prune.
    pub fn update(&mut self, delta_time: f32, elapsed_ms: u64, keys: &KeyState) -> UpdateReport {
        let updated = self.update_entities(delta_time, elapsed_ms, keys);
        let spawned = self.apply_spawns();
        let pruned = self.prune_inactive();
        UpdateReport {
            updated,
            spawned,
            pruned,
        }
    }

    /// Update every active entity in creation order. Entities destroyed
    /// earlier in the pass are skipped. Returns how many were updated.
    pub fn update_entities(&mut self, delta_time: f32, elapsed_ms: u64, keys: &KeyState) -> usize {
        let mut ctx = UpdateContext {
            delta_time,
            elapsed_ms,
            keys,
            spawns: &mut self.spawns,
        };
        let mut updated = 0;
        for entity in self.entities.iter_mut().filter(|e| e.is_active()) {
            entity.update(&mut ctx);
            updated += 1;
        }
        updated
    }

    /// Create every queued entity. A template that fails to initialize is
    /// logged and its half-built entity destroyed; the rest still spawn.
    pub fn apply_spawns(&mut self) -> usize {
        let pending: Vec<EntityTemplate> = self.spawns.drain().collect();
        let mut spawned = 0;
        for template in pending {
            let name = template.name.clone();
            match self.spawn(template) {
                Ok(_) => spawned += 1,
                Err(err) => warn!(%name, error = %err, "queued spawn failed"),
            }
        }
        spawned
    }

    /// Remove inactive entities, keeping the order of the survivors.
    pub fn prune_inactive(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(Entity::is_active);
        let pruned = before - self.entities.len();
        if pruned > 0 {
            debug!(pruned, remaining = self.entities.len(), "pruned inactive entities");
        }
        pruned
    }

    /// Draw active entities layer by layer, lowest layer first. Within a
    /// layer entities draw in creation order.
    pub fn render(&self, ctx: &mut RenderContext<'_>) {
        for layer in Layer::ALL {
            for entity in self.entities_by_layer(layer) {
                entity.render(ctx);
            }
        }
    }

    /// First classified collision among active entities; see
    /// [`collision::scan`].
    pub fn check_collisions(&self) -> CollisionOutcome {
        collision::scan(&self.entities)
    }

    // -- queries ------------------------------------------------------------

    /// Active entities on `layer`, in creation order.
    pub fn entities_by_layer(&self, layer: Layer) -> impl Iterator<Item = &Entity> + '_ {
        self.entities
            .iter()
            .filter(move |e| e.is_active() && e.layer() == layer)
    }

    /// First active entity called `name`.
    pub fn entity_by_name(&self, name: &str) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|e| e.is_active() && e.name() == name)
    }

    pub fn entity_by_name_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.entities
            .iter_mut()
            .find(|e| e.is_active() && e.name() == name)
    }

    /// Entity with `id`, active or not, until it is pruned.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    /// Like [`entity`](Self::entity), for callers that treat a missing
    /// entity as an error.
    pub fn require_entity(&self, id: EntityId) -> Result<&Entity, EcsError> {
        self.entity(id).ok_or(EcsError::UnknownEntity { entity: id })
    }

    /// All stored entities, including ones destroyed this frame.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Entities waiting in the spawn queue.
    pub fn pending_spawns(&self) -> &SpawnQueue {
        &self.spawns
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of stored entities, active or not.
    pub fn len(&self) -> usize {
        self.entities.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::collision::ColliderTag;
    use crate::components::{Collider, ProjectileEmitter, Sprite, Transform};
    use crate::gfx::TextureHandle;

    #[test]
    fn require_entity_fails_after_prune() {
        let mut registry = EntityRegistry::new();
        let id = registry.create_entity("tank", Layer::Enemy).id();
        assert_eq!(registry.require_entity(id).unwrap().name(), "tank");

        registry.destroy(id);
        assert!(registry.require_entity(id).is_ok());
        registry.prune_inactive();
        assert!(matches!(
            registry.require_entity(id),
            Err(EcsError::UnknownEntity { entity }) if entity == id
        ));
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = EntityRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn create_entity_is_active_and_counted() {
        let mut registry = EntityRegistry::new();
        let e = registry.create_entity("player", Layer::Player);
        assert!(e.is_active());
        assert_eq!(e.name(), "player");
        assert_eq!(e.layer(), Layer::Player);
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }

    #[test]
    fn ids_are_unique_even_with_same_name() {
        let mut registry = EntityRegistry::new();
        let a = registry.create_entity("tile", Layer::Tilemap).id();
        let b = registry.create_entity("tile", Layer::Tilemap).id();
        assert_ne!(a, b);
    }

    #[test]
    fn destroyed_entity_is_pruned_after_update() {
        let mut registry = EntityRegistry::new();
        let keep = registry.create_entity("keep", Layer::Enemy).id();
        let gone = registry.create_entity("gone", Layer::Enemy).id();
        assert!(registry.destroy(gone));
        // Still stored until the prune phase.
        assert_eq!(registry.len(), 2);

        let report = registry.update(0.016, 16, &KeyState::default());
        assert_eq!(report.updated, 1);
        assert_eq!(report.pruned, 1);
        assert_eq!(registry.len(), 1);
        assert!(registry.entity(keep).is_some());
        assert!(registry.entity(gone).is_none());
        assert!(!registry.destroy(gone));
    }

    #[test]
    fn prune_keeps_survivor_order() {
        let mut registry = EntityRegistry::new();
        for name in ["a", "b", "c", "d"] {
            registry.create_entity(name, Layer::Enemy);
        }
        let b = registry.entity_by_name("b").unwrap().id();
        registry.destroy(b);
        assert_eq!(registry.prune_inactive(), 1);
        let names: Vec<&str> = registry.entities().iter().map(Entity::name).collect();
        assert_eq!(names, vec!["a", "c", "d"]);
    }

    #[test]
    fn entities_by_layer_filters_and_skips_inactive() {
        let mut registry = EntityRegistry::new();
        registry.create_entity("tile", Layer::Tilemap);
        let t1 = registry.create_entity("tank-1", Layer::Enemy).id();
        let t2 = registry.create_entity("tank-2", Layer::Enemy).id();
        registry.destroy(t1);
        let enemies: Vec<EntityId> = registry
            .entities_by_layer(Layer::Enemy)
            .map(Entity::id)
            .collect();
        assert_eq!(enemies, vec![t2]);
        assert_eq!(registry.entities_by_layer(Layer::Ui).count(), 0);
    }

    #[test]
    fn entity_by_name_finds_first_active() {
        let mut registry = EntityRegistry::new();
        let first = registry.create_entity("tank", Layer::Enemy).id();
        let second = registry.create_entity("tank", Layer::Enemy).id();
        assert_eq!(registry.entity_by_name("tank").unwrap().id(), first);
        registry.destroy(first);
        assert_eq!(registry.entity_by_name("tank").unwrap().id(), second);
        assert!(registry.entity_by_name("player").is_none());
    }

    #[test]
    fn update_moves_transforms() {
        let mut registry = EntityRegistry::new();
        let e = registry.create_entity("truck", Layer::Enemy);
        e.add_component(Transform::new(Vec2::ZERO, Vec2::new(20.0, -10.0), 32.0, 32.0, 1.0))
            .unwrap();
        let id = e.id();
        registry.update(0.5, 500, &KeyState::default());
        let t = registry.entity(id).unwrap().component::<Transform>().unwrap();
        assert_eq!(t.position, Vec2::new(10.0, -5.0));
    }

    #[test]
    fn inactive_entities_are_not_updated() {
        let mut registry = EntityRegistry::new();
        let e = registry.create_entity("truck", Layer::Enemy);
        e.add_component(Transform::new(Vec2::ZERO, Vec2::new(20.0, 0.0), 32.0, 32.0, 1.0))
            .unwrap();
        e.destroy();
        let report = registry.update_entities(1.0, 1000, &KeyState::default());
        assert_eq!(report, 0);
        let t = registry.entities()[0].component::<Transform>().unwrap();
        assert_eq!(t.position, Vec2::ZERO);
    }

    #[test]
    fn spawn_attaches_components_in_order() {
        let mut registry = EntityRegistry::new();
        let id = registry
            .spawn(
                EntityTemplate::new("bullet", Layer::Projectile)
                    .with(Transform::at(0.0, 0.0, 4.0, 4.0))
                    .with(ProjectileEmitter::new(100.0, 0.0, 50.0, false))
                    .with(Collider::new(ColliderTag::FriendlyProjectile)),
            )
            .unwrap();
        let e = registry.entity(id).unwrap();
        assert_eq!(e.component::<Transform>().unwrap().velocity, Vec2::new(100.0, 0.0));
        assert!(e.has_component::<Collider>());
    }

    #[test]
    fn failed_spawn_is_destroyed_and_pruned() {
        let mut registry = EntityRegistry::new();
        // Sprite before transform cannot initialize.
        let err = registry
            .spawn(
                EntityTemplate::new("broken", Layer::Enemy)
                    .with(Sprite::new(TextureHandle(0)))
                    .with(Transform::at(0.0, 0.0, 4.0, 4.0)),
            )
            .unwrap_err();
        assert!(matches!(err, EcsError::MissingDependency { .. }));
        assert_eq!(registry.len(), 1);
        assert!(registry.entity_by_name("broken").is_none());
        assert_eq!(registry.prune_inactive(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn clear_removes_everything() {
        let mut registry = EntityRegistry::new();
        let old = registry.create_entity("a", Layer::Enemy).id();
        registry.create_entity("b", Layer::Enemy);
        registry.clear();
        assert!(registry.is_empty());
        let fresh = registry.create_entity("c", Layer::Enemy).id();
        assert_ne!(old, fresh);
    }

    #[test]
    fn expired_projectile_is_removed_in_same_update() {
        let mut registry = EntityRegistry::new();
        let e = registry.create_entity("bullet", Layer::Projectile);
        e.add_component(Transform::at(0.0, 0.0, 4.0, 4.0)).unwrap();
        e.add_component(ProjectileEmitter::new(100.0, 0.0, 50.0, false))
            .unwrap();
        // 100 px/s * 1 s = 100 px > 50 px range.
        let report = registry.update(1.0, 1000, &KeyState::default());
        assert_eq!(report.pruned, 1);
        assert!(registry.is_empty());
    }
}
