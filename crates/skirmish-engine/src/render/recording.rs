//! Headless graphics backend that records draw calls.
//!
//! Each frame's calls are collected between `clear` and `present`; after
//! `present` they become [`RecordingGraphics::last_frame`]. Texture and font
//! loads never touch the disk: every path gets a fresh handle unless it was
//! marked as missing with [`RecordingGraphics::reject_path`].

use std::path::{Path, PathBuf};

use tracing::debug;

use skirmish_ecs::geometry::Rect;
use skirmish_ecs::gfx::{Color, Flip, FontHandle, Graphics, GraphicsError, TextureHandle};

// ---------------------------------------------------------------------------
// DrawCommand
// ---------------------------------------------------------------------------

/// One recorded graphics call. Coordinates are in screen space, exactly as
/// the runtime issued them.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Sprite {
        texture: TextureHandle,
        source: Rect,
        destination: Rect,
        flip: Flip,
    },
    Text {
        font: FontHandle,
        text: String,
        color: Color,
        x: f32,
        y: f32,
    },
    Outline {
        rect: Rect,
        color: Color,
    },
}

// ---------------------------------------------------------------------------
// RecordingGraphics
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RecordingGraphics {
    size: Option<(u32, u32)>,
    init_failure: Option<String>,
    rejected: Vec<PathBuf>,
    textures: Vec<PathBuf>,
    fonts: Vec<(PathBuf, u16)>,
    current: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    frames_presented: u64,
}

impl RecordingGraphics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose `initialize` fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            init_failure: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Make loads of `path` fail as if the file did not exist.
    pub fn reject_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.rejected.push(path.into());
        self
    }

    /// Surface size passed to `initialize`, if it succeeded.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }

    /// Calls recorded since the last `present`.
    pub fn current_frame(&self) -> &[DrawCommand] {
        &self.current
    }

    /// Calls of the most recently presented frame.
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Texture paths in load order; a handle is its index here.
    pub fn loaded_textures(&self) -> &[PathBuf] {
        &self.textures
    }

    pub fn loaded_fonts(&self) -> &[(PathBuf, u16)] {
        &self.fonts
    }

    /// Sprite draws of the last frame, in order.
    pub fn sprites(&self) -> impl Iterator<Item = (TextureHandle, Rect)> + '_ {
        self.last_frame.iter().filter_map(|command| match command {
            DrawCommand::Sprite {
                texture,
                destination,
                ..
            } => Some((*texture, *destination)),
            _ => None,
        })
    }

    fn check_path(&self, path: &Path) -> Result<(), GraphicsError> {
        if self.rejected.iter().any(|p| p == path) {
            return Err(GraphicsError::Load {
                path: path.display().to_string(),
                reason: "file not found".to_owned(),
            });
        }
        Ok(())
    }
}

impl Graphics for RecordingGraphics {
    fn initialize(&mut self, width: u32, height: u32) -> Result<(), GraphicsError> {
        if let Some(reason) = &self.init_failure {
            return Err(GraphicsError::Context(reason.clone()));
        }
        debug!(width, height, "recording backend initialized");
        self.size = Some((width, height));
        Ok(())
    }

    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, GraphicsError> {
        self.check_path(path)?;
        self.textures.push(path.to_path_buf());
        Ok(TextureHandle(self.textures.len() as u32 - 1))
    }

    fn load_font(&mut self, path: &Path, point_size: u16) -> Result<FontHandle, GraphicsError> {
        self.check_path(path)?;
        self.fonts.push((path.to_path_buf(), point_size));
        Ok(FontHandle(self.fonts.len() as u32 - 1))
    }

    fn clear(&mut self, color: Color) {
        self.current.clear();
        self.current.push(DrawCommand::Clear(color));
    }

    fn draw(&mut self, texture: TextureHandle, source: Rect, destination: Rect, flip: Flip) {
        self.current.push(DrawCommand::Sprite {
            texture,
            source,
            destination,
            flip,
        });
    }

    fn draw_text(&mut self, font: FontHandle, text: &str, color: Color, x: f32, y: f32) {
        self.current.push(DrawCommand::Text {
            font,
            text: text.to_owned(),
            color,
            x,
            y,
        });
    }

    fn draw_outline(&mut self, rect: Rect, color: Color) {
        self.current.push(DrawCommand::Outline { rect, color });
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.current);
        self.frames_presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_moves_current_to_last() {
        let mut gfx = RecordingGraphics::new();
        gfx.clear(Color::BACKGROUND);
        gfx.draw_outline(Rect::new(1.0, 2.0, 3.0, 4.0), Color::COLLIDER);
        assert_eq!(gfx.current_frame().len(), 2);
        gfx.present();
        assert!(gfx.current_frame().is_empty());
        assert_eq!(
            gfx.last_frame(),
            &[
                DrawCommand::Clear(Color::BACKGROUND),
                DrawCommand::Outline {
                    rect: Rect::new(1.0, 2.0, 3.0, 4.0),
                    color: Color::COLLIDER,
                },
            ]
        );
        assert_eq!(gfx.frames_presented(), 1);
    }

    #[test]
    fn handles_are_sequential_per_kind() {
        let mut gfx = RecordingGraphics::new();
        assert_eq!(gfx.load_texture(Path::new("a.png")).unwrap(), TextureHandle(0));
        assert_eq!(gfx.load_texture(Path::new("b.png")).unwrap(), TextureHandle(1));
        assert_eq!(gfx.load_font(Path::new("f.ttf"), 12).unwrap(), FontHandle(0));
        assert_eq!(gfx.loaded_textures().len(), 2);
    }

    #[test]
    fn failing_backend_reports_context_error() {
        let mut gfx = RecordingGraphics::failing("no display");
        let err = gfx.initialize(800, 600).unwrap_err();
        assert_eq!(err.to_string(), "graphics context setup failed: no display");
        assert_eq!(gfx.size(), None);
    }
}
