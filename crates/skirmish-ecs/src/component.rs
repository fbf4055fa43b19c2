//! The component capability contract.
//!
//! Components form a closed set of variants ([`Component`]), each identified
//! by a compact [`ComponentKind`]. Every variant may implement any subset of
//! three capabilities:
//!
//! - **initialize** -- runs once when attached; resolves and validates
//!   sibling components.
//! - **update** -- advances state by `delta_time` seconds.
//! - **render** -- emits draw calls; never mutates simulation state.
//!
//! Missing capabilities are no-ops. Typed access goes through the
//! [`ComponentData`] trait, implemented for every variant's payload type.

use std::fmt;

use crate::command::SpawnQueue;
use crate::components::{
    Collider, KeyboardControl, ProjectileEmitter, Sprite, TextLabel, Tile, Transform,
};
use crate::entity::Entity;
use crate::geometry::Rect;
use crate::gfx::Graphics;
use crate::input::KeyState;
use crate::EcsError;

// ---------------------------------------------------------------------------
// ComponentKind
// ---------------------------------------------------------------------------

/// Compact component discriminant; the index into an entity's component
/// table.
///
/// Declaration order is the order in which an entity updates and renders
/// its components: input before movement, movement before the components
/// that follow the transform, labels last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    KeyboardControl = 0,
    Transform = 1,
    ProjectileEmitter = 2,
    Tile = 3,
    Sprite = 4,
    Collider = 5,
    TextLabel = 6,
}

impl ComponentKind {
    pub const COUNT: usize = 7;

    pub const ALL: [ComponentKind; Self::COUNT] = [
        ComponentKind::KeyboardControl,
        ComponentKind::Transform,
        ComponentKind::ProjectileEmitter,
        ComponentKind::Tile,
        ComponentKind::Sprite,
        ComponentKind::Collider,
        ComponentKind::TextLabel,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::KeyboardControl => "keyboard control",
            ComponentKind::Transform => "transform",
            ComponentKind::ProjectileEmitter => "projectile emitter",
            ComponentKind::Tile => "tile",
            ComponentKind::Sprite => "sprite",
            ComponentKind::Collider => "collider",
            ComponentKind::TextLabel => "text label",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Contexts
// ---------------------------------------------------------------------------

/// Per-frame inputs handed to every component update.
pub struct UpdateContext<'a> {
    /// Seconds since the previous frame, already clamped by the frame clock.
    pub delta_time: f32,
    /// Milliseconds since the session started; drives sprite animation.
    pub elapsed_ms: u64,
    /// Keys held during this frame.
    pub keys: &'a KeyState,
    /// Entities to create once the update pass is over.
    pub spawns: &'a mut SpawnQueue,
}

/// Everything a component needs to draw itself.
pub struct RenderContext<'a> {
    pub graphics: &'a mut dyn Graphics,
    /// Visible world region; world-space draws are shifted by its origin.
    pub camera: Rect,
    /// Draw collider outlines.
    pub show_colliders: bool,
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// A component instance. One variant per [`ComponentKind`].
#[derive(Debug, Clone)]
pub enum Component {
    KeyboardControl(KeyboardControl),
    Transform(Transform),
    ProjectileEmitter(ProjectileEmitter),
    Tile(Tile),
    Sprite(Sprite),
    Collider(Collider),
    TextLabel(TextLabel),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::KeyboardControl(_) => ComponentKind::KeyboardControl,
            Component::Transform(_) => ComponentKind::Transform,
            Component::ProjectileEmitter(_) => ComponentKind::ProjectileEmitter,
            Component::Tile(_) => ComponentKind::Tile,
            Component::Sprite(_) => ComponentKind::Sprite,
            Component::Collider(_) => ComponentKind::Collider,
            Component::TextLabel(_) => ComponentKind::TextLabel,
        }
    }

    /// Called once by [`Entity::insert_component`] while `self` is detached
    /// from `owner`'s table.
    pub(crate) fn initialize(&mut self, owner: &mut Entity) -> Result<(), EcsError> {
        match self {
            Component::Sprite(sprite) => sprite.initialize(owner),
            Component::ProjectileEmitter(emitter) => emitter.initialize(owner),
            Component::Collider(collider) => {
                collider.initialize(owner);
                Ok(())
            }
            Component::KeyboardControl(_)
            | Component::Transform(_)
            | Component::Tile(_)
            | Component::TextLabel(_) => Ok(()),
        }
    }

    /// Called by [`Entity::update`] while `self` is detached from `owner`'s
    /// table, so siblings are reachable through `owner`.
    pub(crate) fn update(&mut self, owner: &mut Entity, ctx: &mut UpdateContext<'_>) {
        match self {
            Component::KeyboardControl(control) => control.update(owner, ctx),
            Component::Transform(transform) => transform.update(ctx.delta_time),
            Component::ProjectileEmitter(emitter) => emitter.update(owner),
            Component::Sprite(sprite) => sprite.update(owner, ctx),
            Component::Collider(collider) => collider.update(owner),
            Component::Tile(_) | Component::TextLabel(_) => {}
        }
    }

    pub(crate) fn render(&self, _owner: &Entity, ctx: &mut RenderContext<'_>) {
        match self {
            Component::Tile(tile) => tile.render(ctx),
            Component::Sprite(sprite) => sprite.render(ctx),
            Component::Collider(collider) => collider.render(ctx),
            Component::TextLabel(label) => label.render(ctx),
            Component::KeyboardControl(_)
            | Component::Transform(_)
            | Component::ProjectileEmitter(_) => {}
        }
    }
}

// ---------------------------------------------------------------------------
// ComponentData
// ---------------------------------------------------------------------------

/// Typed view of one [`Component`] variant.
pub trait ComponentData: Into<Component> + Sized + 'static {
    const KIND: ComponentKind;

    fn downcast_ref(component: &Component) -> Option<&Self>;

    fn downcast_mut(component: &mut Component) -> Option<&mut Self>;

    fn from_component(component: Component) -> Option<Self>;
}

macro_rules! component_data {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Component {
                fn from(value: $variant) -> Self {
                    Component::$variant(value)
                }
            }

            impl ComponentData for $variant {
                const KIND: ComponentKind = ComponentKind::$variant;

                fn downcast_ref(component: &Component) -> Option<&Self> {
                    match component {
                        Component::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn downcast_mut(component: &mut Component) -> Option<&mut Self> {
                    match component {
                        Component::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn from_component(component: Component) -> Option<Self> {
                    match component {
                        Component::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )*
    };
}

component_data!(
    KeyboardControl,
    Transform,
    ProjectileEmitter,
    Tile,
    Sprite,
    Collider,
    TextLabel,
);

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
