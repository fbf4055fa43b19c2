//! Static background tiles spawned from a tile map.

use glam::Vec2;

use crate::component::RenderContext;
use crate::geometry::Rect;
use crate::gfx::{Flip, TextureHandle};

/// Static background tile cut from a tilemap texture.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    texture: TextureHandle,
    source: Rect,
    position: Vec2,
    /// On-screen edge length (`tile_size * scale`).
    size: f32,
}

impl Tile {
    /// `source_x`/`source_y` are the pixel origin of the tile inside the
    /// texture; `x`/`y` its world position.
    pub fn new(
        texture: TextureHandle,
        source_x: f32,
        source_y: f32,
        x: f32,
        y: f32,
        tile_size: f32,
        scale: f32,
    ) -> Self {
        Self {
            texture,
            source: Rect::new(source_x, source_y, tile_size, tile_size),
            position: Vec2::new(x, y),
            size: tile_size * scale,
        }
    }

    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    pub fn source(&self) -> Rect {
        self.source
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// World-space box covered by the tile.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size, self.size)
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext<'_>) {
        let destination = self.bounds().relative_to(ctx.camera.position());
        ctx.graphics
            .draw(self.texture, self.source, destination, Flip::None);
    }
}
