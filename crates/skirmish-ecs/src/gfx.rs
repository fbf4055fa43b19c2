//! Graphics collaborator interface.
//!
//! The runtime decides *what* to draw and *when*; a [`Graphics`] backend
//! decides how pixels are produced. Textures and fonts are opaque handles
//! issued by the backend, so nothing here touches image data.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Opaque texture handle issued by [`Graphics::load_texture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// Opaque font handle issued by [`Graphics::load_font`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontHandle(pub u32);

/// Mirroring applied when drawing a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BACKGROUND: Color = Color::rgb(21, 21, 21);
    pub const COLLIDER: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Failure reported by a graphics backend.
#[derive(Debug, thiserror::Error)]
pub enum GraphicsError {
    /// Context/window creation failed.
    #[error("graphics context setup failed: {0}")]
    Context(String),
    /// A texture or font could not be loaded.
    #[error("failed to load '{path}': {reason}")]
    Load { path: String, reason: String },
}

/// Backend that the runtime draws through.
///
/// `draw`, `draw_text` and `draw_outline` are only called between `clear`
/// and `present` within a frame.
pub trait Graphics {
    /// Create the drawing surface. Called once before the first frame.
    fn initialize(&mut self, width: u32, height: u32) -> Result<(), GraphicsError>;

    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, GraphicsError>;

    fn load_font(&mut self, path: &Path, point_size: u16) -> Result<FontHandle, GraphicsError>;

    fn clear(&mut self, color: Color);

    /// Copy `source` from `texture` to `destination` on screen.
    fn draw(&mut self, texture: TextureHandle, source: Rect, destination: Rect, flip: Flip);

    /// Render `text` with its top-left corner at `(x, y)` in screen space.
    fn draw_text(&mut self, font: FontHandle, text: &str, color: Color, x: f32, y: f32);

    /// Draw a rectangle outline in screen space.
    fn draw_outline(&mut self, rect: Rect, color: Color);

    fn present(&mut self);
}

impl fmt::Display for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "texture:{}", self.0)
    }
}

impl fmt::Display for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font:{}", self.0)
    }
}
