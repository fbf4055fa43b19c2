//! Tile-map files.
//!
//! A map file is a text grid, one line per row. Each cell is two ASCII
//! digits: the first selects the source row in the tilemap texture, the
//! second the source column. Cells may be packed (`0012`) or separated by
//! commas (`00,12`). Every cell becomes one entity on the
//! [`Layer::Tilemap`] layer carrying a [`Tile`] at
//! `(column * scale * tile_size, row * scale * tile_size)`.
//!
//! Cells past the declared width and rows past the declared height are
//! ignored; a map that is too small, or has a non-digit where a cell is
//! expected, is rejected with [`EngineError::MalformedMap`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use skirmish_ecs::prelude::*;

use crate::EngineError;

/// Declared geometry of a map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapLayout {
    /// Edge length of one tile inside the texture, in pixels.
    pub tile_size: f32,
    /// World pixels per texture pixel.
    pub scale: f32,
    /// Cells per row.
    pub columns: usize,
    /// Number of rows.
    pub rows: usize,
}

impl MapLayout {
    /// World-space edge length of one tile.
    pub fn tile_extent(&self) -> f32 {
        self.tile_size * self.scale
    }

    /// World-space size of the whole map.
    pub fn size(&self) -> Vec2 {
        Vec2::new(
            self.columns as f32 * self.tile_extent(),
            self.rows as f32 * self.tile_extent(),
        )
    }
}

/// One cell's source tile coordinates inside the texture grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRef {
    pub source_row: u32,
    pub source_column: u32,
}

/// A parsed map, ready to be turned into tile entities.
#[derive(Debug, Clone)]
pub struct TileMap {
    texture: TextureHandle,
    layout: MapLayout,
    /// Row-major, exactly `columns * rows` entries.
    cells: Vec<TileRef>,
}

impl TileMap {
    /// Parse map text. `name` only labels errors.
    pub fn parse(
        name: &str,
        text: &str,
        texture: TextureHandle,
        layout: MapLayout,
    ) -> Result<Self, EngineError> {
        let malformed = |row: usize, reason: String| EngineError::MalformedMap {
            map: name.to_owned(),
            row,
            reason,
        };

        let (Some(_), Some(row_digits)) = (
            layout.columns.checked_mul(layout.rows),
            layout.columns.checked_mul(2),
        ) else {
            return Err(malformed(
                0,
                format!("{} x {} cells is too large", layout.columns, layout.rows),
            ));
        };

        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() < layout.rows {
            return Err(malformed(
                lines.len(),
                format!("expected {} rows, found {}", layout.rows, lines.len()),
            ));
        }
        if lines.len() > layout.rows {
            warn!(map = name, extra = lines.len() - layout.rows, "ignoring extra map rows");
        }

        let mut cells = Vec::new();
        for (row, line) in lines.iter().take(layout.rows).enumerate() {
            let digits = line
                .chars()
                .filter(|c| *c != ',' && !c.is_whitespace())
                .map(|c| {
                    c.to_digit(10)
                        .ok_or_else(|| malformed(row, format!("unexpected character {c:?}")))
                })
                .collect::<Result<Vec<u32>, _>>()?;
            if digits.len() < row_digits {
                return Err(malformed(
                    row,
                    format!(
                        "expected {} cells, found {}",
                        layout.columns,
                        digits.len() / 2
                    ),
                ));
            }
            cells.extend(
                digits
                    .chunks_exact(2)
                    .take(layout.columns)
                    .map(|pair| TileRef {
                        source_row: pair[0],
                        source_column: pair[1],
                    }),
            );
        }

        debug!(map = name, columns = layout.columns, rows = layout.rows, "map parsed");
        Ok(Self {
            texture,
            layout,
            cells,
        })
    }

    /// Read and parse a map file.
    pub fn load(
        path: impl AsRef<Path>,
        texture: TextureHandle,
        layout: MapLayout,
    ) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&path.display().to_string(), &text, texture, layout)
    }

    pub fn layout(&self) -> MapLayout {
        self.layout
    }

    /// Source tile of the cell at `(column, row)`.
    pub fn cell(&self, column: usize, row: usize) -> Option<TileRef> {
        if column >= self.layout.columns {
            return None;
        }
        self.cells.get(row * self.layout.columns + column).copied()
    }

    /// Create one tile entity per cell. Returns how many were created.
    pub fn spawn_tiles(&self, registry: &mut EntityRegistry) -> usize {
        let MapLayout {
            tile_size,
            scale,
            columns,
            ..
        } = self.layout;
        let extent = self.layout.tile_extent();
        for (index, cell) in self.cells.iter().enumerate() {
            let x = (index % columns) as f32 * extent;
            let y = (index / columns) as f32 * extent;
            let tile = Tile::new(
                self.texture,
                cell.source_column as f32 * tile_size,
                cell.source_row as f32 * tile_size,
                x,
                y,
                tile_size,
                scale,
            );
            if let Err(err) = registry.create_entity("tile", Layer::Tilemap).add_component(tile) {
                warn!(error = %err, "tile not attached");
            }
        }
        self.cells.len()
    }
}
