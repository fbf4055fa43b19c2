//! Asset id to handle lookup.
//!
//! Levels refer to textures and fonts by string id. The [`AssetTable`] asks
//! the graphics backend to load each declared file once and remembers the
//! handle it got back; nothing here decodes image or font data.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use skirmish_ecs::gfx::{FontHandle, Graphics, TextureHandle};

use crate::EngineError;

/// What kind of asset an id names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Texture,
    Font,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssetKind::Texture => "texture",
            AssetKind::Font => "font",
        })
    }
}

/// Loaded assets by id. Redeclaring an id replaces its handle.
#[derive(Debug, Default)]
pub struct AssetTable {
    textures: HashMap<String, TextureHandle>,
    fonts: HashMap<String, FontHandle>,
}

impl AssetTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_texture(
        &mut self,
        graphics: &mut dyn Graphics,
        id: &str,
        path: &Path,
    ) -> Result<TextureHandle, EngineError> {
        let handle = graphics.load_texture(path)?;
        debug!(id, path = %path.display(), %handle, "texture loaded");
        self.textures.insert(id.to_owned(), handle);
        Ok(handle)
    }

    pub fn add_font(
        &mut self,
        graphics: &mut dyn Graphics,
        id: &str,
        path: &Path,
        point_size: u16,
    ) -> Result<FontHandle, EngineError> {
        let handle = graphics.load_font(path, point_size)?;
        debug!(id, path = %path.display(), point_size, %handle, "font loaded");
        self.fonts.insert(id.to_owned(), handle);
        Ok(handle)
    }

    /// Handle for texture `id`.
    pub fn texture(&self, id: &str) -> Result<TextureHandle, EngineError> {
        self.textures
            .get(id)
            .copied()
            .ok_or_else(|| EngineError::UnknownAsset {
                kind: AssetKind::Texture,
                id: id.to_owned(),
            })
    }

    /// Handle for font `id`.
    pub fn font(&self, id: &str) -> Result<FontHandle, EngineError> {
        self.fonts
            .get(id)
            .copied()
            .ok_or_else(|| EngineError::UnknownAsset {
                kind: AssetKind::Font,
                id: id.to_owned(),
            })
    }

    pub fn contains(&self, kind: AssetKind, id: &str) -> bool {
        match kind {
            AssetKind::Texture => self.textures.contains_key(id),
            AssetKind::Font => self.fonts.contains_key(id),
        }
    }

    /// Total number of textures and fonts.
    pub fn len(&self) -> usize {
        self.textures.len() + self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
