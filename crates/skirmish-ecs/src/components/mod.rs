//! Component payload types.

mod collider;
mod keyboard;
mod projectile;
mod sprite;
mod text_label;
mod tile;
mod transform;

pub use collider::Collider;
pub use keyboard::{KeyBindings, KeyboardControl, ProjectileTemplate};
pub use projectile::ProjectileEmitter;
pub use sprite::{Facing, Sprite, SpriteAnimation};
pub use text_label::TextLabel;
pub use tile::Tile;
pub use transform::Transform;
