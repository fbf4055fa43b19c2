//! Screen-space text.

use glam::Vec2;

use crate::component::RenderContext;
use crate::gfx::{Color, FontHandle};

/// Screen-space text, e.g. a level title or HUD line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    position: Vec2,
    text: String,
    font: FontHandle,
    color: Color,
}

impl TextLabel {
    pub fn new(x: f32, y: f32, text: impl Into<String>, font: FontHandle, color: Color) -> Self {
        Self {
            position: Vec2::new(x, y),
            text: text.into(),
            font,
            color,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext<'_>) {
        ctx.graphics.draw_text(
            self.font,
            &self.text,
            self.color,
            self.position.x,
            self.position.y,
        );
    }
}
