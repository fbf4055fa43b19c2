//! Entities: identity, layer, liveness and an owned component table.
//!
//! An [`Entity`] owns at most one component per [`ComponentKind`], stored in
//! a fixed-size table indexed by the kind. Components reach their siblings
//! through the owner passed into each call; nothing holds a pointer back to
//! its entity.

use std::fmt;

use tracing::debug;

use crate::component::{Component, ComponentData, ComponentKind, RenderContext, UpdateContext};
use crate::layer::Layer;
use crate::EcsError;

// ---------------------------------------------------------------------------
// EntityId
// ---------------------------------------------------------------------------

/// Identity of an entity within one registry.
///
/// Ids are handed out in creation order and never reused, so two entities
/// that share a name are still told apart.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    /// Raw `u64` representation.
    #[inline]
    pub fn to_raw(self) -> u64 {
        self.0
    }

    /// Reconstruct from a raw `u64`.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// EntityIdAllocator
// ---------------------------------------------------------------------------

/// Monotonic id source owned by the registry.
#[derive(Debug, Default)]
pub(crate) struct EntityIdAllocator {
    next: u64,
}

impl EntityIdAllocator {
    pub(crate) fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A game object: a name, a layer, a liveness flag and its components.
///
/// Entities are created through
/// [`EntityRegistry::create_entity`](crate::registry::EntityRegistry::create_entity)
/// and destroyed by [`destroy`](Self::destroy), which only marks them
/// inactive. Storage is released when the registry prunes them.
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    name: String,
    layer: Layer,
    active: bool,
    components: [Option<Component>; ComponentKind::COUNT],
}

impl Entity {
    pub(crate) fn new(id: EntityId, name: String, layer: Layer) -> Self {
        Self {
            id,
            name,
            layer,
            active: true,
            components: Default::default(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Display name. Not required to be unique.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mark the entity inactive. It stays in the registry, skipped by
    /// traversals, until the next prune.
    pub fn destroy(&mut self) {
        if self.active {
            debug!(entity = %self.id, name = %self.name, "entity destroyed");
        }
        self.active = false;
    }

    // -- components ----------------------------------------------------------

    /// Attach `component`, replacing any existing component of the same
    /// kind, and run its initialization.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::MissingDependency`] if the component needs a
    /// sibling the entity lacks (a [`Sprite`](crate::components::Sprite) or
    /// [`ProjectileEmitter`](crate::components::ProjectileEmitter) needs a
    /// [`Transform`](crate::components::Transform) attached first). The
    /// component is not attached in that case.
    pub fn add_component<C: ComponentData>(&mut self, component: C) -> Result<&mut C, EcsError> {
        let entity = self.id;
        self.insert_component(component.into())?;
        self.component_mut::<C>().ok_or(EcsError::MissingComponent {
            entity,
            component: C::KIND,
        })
    }

    /// Untyped form of [`add_component`](Self::add_component), used when
    /// applying queued spawns. On error the previous component, if any, is
    /// left in place.
    pub fn insert_component(&mut self, mut component: Component) -> Result<(), EcsError> {
        let kind = component.kind();
        // Out of the table while initializing so it can borrow the entity.
        let previous = self.components[kind.index()].take();
        if let Err(err) = component.initialize(self) {
            self.components[kind.index()] = previous;
            return Err(err);
        }
        if previous.is_some() {
            debug!(entity = %self.id, %kind, "replacing component");
        }
        self.components[kind.index()] = Some(component);
        Ok(())
    }

    /// Detach and return the component of kind `C`, if any.
    pub fn remove_component<C: ComponentData>(&mut self) -> Option<C> {
        let slot = &mut self.components[C::KIND.index()];
        match slot.take() {
            Some(component) => C::from_component(component),
            None => None,
        }
    }

    pub fn component<C: ComponentData>(&self) -> Option<&C> {
        self.components[C::KIND.index()]
            .as_ref()
            .and_then(C::downcast_ref)
    }

    pub fn component_mut<C: ComponentData>(&mut self) -> Option<&mut C> {
        self.components[C::KIND.index()]
            .as_mut()
            .and_then(C::downcast_mut)
    }

    /// Fallible lookup for initialization code: names `dependent` as the
    /// component whose precondition failed.
    pub fn require_component<C: ComponentData>(
        &self,
        dependent: ComponentKind,
    ) -> Result<&C, EcsError> {
        self.component::<C>().ok_or(EcsError::MissingDependency {
            entity: self.id,
            component: dependent,
            requires: C::KIND,
        })
    }

    /// Lookup for callers that already established presence with
    /// [`has_component`](Self::has_component).
    ///
    /// # Panics
    ///
    /// Panics if the entity has no component of kind `C`.
    pub fn expect_component<C: ComponentData>(&self) -> &C {
        match self.component::<C>() {
            Some(component) => component,
            None => panic!("entity {} ({}) has no {} component", self.id, self.name, C::KIND),
        }
    }

    pub fn has_component<C: ComponentData>(&self) -> bool {
        self.components[C::KIND.index()].is_some()
    }

    /// Kinds currently attached, in update order.
    pub fn component_kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        ComponentKind::ALL
            .into_iter()
            .filter(|kind| self.components[kind.index()].is_some())
    }

    // -- per-frame ------------------------------------------------------------

    /// Forward `update` to every attached component in kind order.
    pub fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        for kind in ComponentKind::ALL {
            let Some(mut component) = self.components[kind.index()].take() else {
                continue;
            };
            component.update(self, ctx);
            self.components[kind.index()] = Some(component);
        }
    }

    /// Forward `render` to every attached component in kind order.
    pub fn render(&self, ctx: &mut RenderContext<'_>) {
        for component in self.components.iter().flatten() {
            component.render(self, ctx);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
