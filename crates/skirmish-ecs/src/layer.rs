//! Draw/update layers.
//!
//! The layer is the only z-order mechanism: lower layers are rendered first
//! (behind), higher layers later (in front).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of layers; every [`Layer`] index is in `0..NUM_LAYERS`.
pub const NUM_LAYERS: usize = 7;

/// Fixed layer set, ordered from background to foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Tilemap = 0,
    Vegetation = 1,
    Enemy = 2,
    Obstacle = 3,
    Player = 4,
    Projectile = 5,
    Ui = 6,
}

impl Layer {
    /// All layers in render order.
    pub const ALL: [Layer; NUM_LAYERS] = [
        Layer::Tilemap,
        Layer::Vegetation,
        Layer::Enemy,
        Layer::Obstacle,
        Layer::Player,
        Layer::Projectile,
        Layer::Ui,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`index`](Self::index).
    pub fn from_index(index: usize) -> Option<Layer> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layer::Tilemap => "tilemap",
            Layer::Vegetation => "vegetation",
            Layer::Enemy => "enemy",
            Layer::Obstacle => "obstacle",
            Layer::Player => "player",
            Layer::Projectile => "projectile",
            Layer::Ui => "ui",
        };
        f.write_str(name)
    }
}
