//! Level descriptions and level loading.
//!
//! A level is a JSON document with three parts, loaded in this order:
//!
//! 1. `assets`: textures and fonts, each with an id and a file;
//! 2. `map` (optional): the tile-map texture id, geometry and map file;
//! 3. `entities`: named, layered entities with per-component data.
//!
//! ```json
//! {
//!   "name": "jungle",
//!   "assets": [
//!     { "kind": "texture", "id": "chopper-image", "file": "images/chopper.png" }
//!   ],
//!   "map": { "texture": "jungle-tiletexture", "tile_size": 32, "scale": 2,
//!            "columns": 25, "rows": 20, "file": "tilemaps/jungle.map" },
//!   "entities": [
//!     { "name": "player", "layer": "player", "components": {
//!         "transform": { "x": 240, "y": 106, "width": 32, "height": 32 },
//!         "sprite": { "texture": "chopper-image", "frames": 2, "speed_ms": 90,
//!                     "directional": true },
//!         "keyboard": {},
//!         "collider": { "tag": "PLAYER" } } }
//!   ]
//! }
//! ```
//!
//! Components are attached in dependency order (transform first), whatever
//! order the document lists them in.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::info;

use skirmish_ecs::prelude::*;

use crate::assets::{AssetKind, AssetTable};
use crate::config::EngineConfig;
use crate::map::{MapLayout, TileMap};
use crate::EngineError;

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

/// A whole level as read from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescription {
    pub name: String,
    #[serde(default)]
    pub assets: Vec<AssetDecl>,
    #[serde(default)]
    pub map: Option<MapDecl>,
    #[serde(default)]
    pub entities: Vec<EntityDecl>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDecl {
    pub kind: AssetKind,
    pub id: String,
    /// Relative to the level's base directory.
    pub file: PathBuf,
    /// Point size; fonts only.
    #[serde(default)]
    pub size: Option<u16>,
}

/// Tile map declaration. Exactly one of `file` and `data` must be set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDecl {
    pub texture: String,
    #[serde(flatten)]
    pub layout: MapLayout,
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Inline map text, in the map file format.
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDecl {
    pub name: String,
    pub layer: Layer,
    #[serde(default)]
    pub components: ComponentsDecl,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentsDecl {
    #[serde(default)]
    pub transform: Option<TransformDecl>,
    #[serde(default)]
    pub keyboard: Option<KeyboardDecl>,
    #[serde(default)]
    pub projectile_emitter: Option<ProjectileEmitterDecl>,
    #[serde(default)]
    pub sprite: Option<SpriteDecl>,
    #[serde(default)]
    pub collider: Option<ColliderDecl>,
    #[serde(default)]
    pub text_label: Option<TextLabelDecl>,
}

fn one() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformDecl {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub velocity_x: f32,
    #[serde(default)]
    pub velocity_y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default = "one")]
    pub scale: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyboardDecl {
    #[serde(default)]
    pub bindings: KeyBindings,
    /// Falls back to [`EngineConfig::player_speed`].
    #[serde(default)]
    pub speed: Option<f32>,
    #[serde(default)]
    pub projectile: Option<ProjectileDecl>,
}

/// What a keyboard-controlled entity fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileDecl {
    #[serde(default)]
    pub texture: Option<String>,
    /// Falls back to [`EngineConfig::projectile_speed`].
    #[serde(default)]
    pub speed: Option<f32>,
    pub range: f32,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileEmitterDecl {
    pub speed: f32,
    /// Heading in degrees; 0 is right, 90 is down.
    pub angle: f32,
    pub range: f32,
    #[serde(default)]
    pub looping: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteDecl {
    pub texture: String,
    /// Animation frame count; absent means a static sprite.
    #[serde(default)]
    pub frames: Option<u32>,
    #[serde(default)]
    pub speed_ms: u32,
    #[serde(default)]
    pub directional: bool,
    /// Screen-space (HUD) sprite.
    #[serde(default)]
    pub fixed: bool,
    #[serde(default)]
    pub flip: Flip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderDecl {
    pub tag: ColliderTag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabelDecl {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font: String,
    #[serde(default)]
    pub color: Color,
}

impl LevelDescription {
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// What [`load_level`] produced.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelInfo {
    pub name: String,
    /// World size of the map; `None` for map-less levels.
    pub map_size: Option<Vec2>,
    pub tiles: usize,
    pub entities: usize,
}

/// Everything a level load writes into.
pub struct LevelTarget<'a> {
    pub graphics: &'a mut dyn Graphics,
    pub assets: &'a mut AssetTable,
    pub registry: &'a mut EntityRegistry,
}

/// Load `level` into `target`. Files are resolved against `base_dir`.
///
/// The registry is not cleared first. On error the level may be partly
/// loaded; callers clear the registry before retrying.
pub fn load_level(
    level: &LevelDescription,
    base_dir: &Path,
    config: &EngineConfig,
    target: LevelTarget<'_>,
) -> Result<LevelInfo, EngineError> {
    let LevelTarget {
        graphics,
        assets,
        registry,
    } = target;

    for asset in &level.assets {
        let path = base_dir.join(&asset.file);
        match asset.kind {
            AssetKind::Texture => {
                assets.add_texture(graphics, &asset.id, &path)?;
            }
            AssetKind::Font => {
                let size = asset.size.ok_or_else(|| {
                    EngineError::MalformedLevel(format!("font '{}' has no size", asset.id))
                })?;
                assets.add_font(graphics, &asset.id, &path, size)?;
            }
        }
    }

    let (map_size, tiles) = match &level.map {
        Some(decl) => {
            let map = load_map(decl, base_dir, assets)?;
            (Some(map.layout().size()), map.spawn_tiles(registry))
        }
        None => (None, 0),
    };

    for decl in &level.entities {
        let template = entity_template(decl, assets, config)?;
        registry.spawn(template)?;
    }

    let info = LevelInfo {
        name: level.name.clone(),
        map_size,
        tiles,
        entities: level.entities.len(),
    };
    info!(
        level = %info.name,
        tiles = info.tiles,
        entities = info.entities,
        assets = assets.len(),
        "level loaded"
    );
    Ok(info)
}

fn load_map(decl: &MapDecl, base_dir: &Path, assets: &AssetTable) -> Result<TileMap, EngineError> {
    let texture = assets.texture(&decl.texture)?;
    match (&decl.file, &decl.data) {
        (Some(file), None) => TileMap::load(base_dir.join(file), texture, decl.layout),
        (None, Some(data)) => TileMap::parse("inline", data, texture, decl.layout),
        _ => Err(EngineError::MalformedLevel(
            "map needs exactly one of 'file' and 'data'".to_owned(),
        )),
    }
}

/// Resolve asset ids and build the entity's components in dependency order.
pub fn entity_template(
    decl: &EntityDecl,
    assets: &AssetTable,
    config: &EngineConfig,
) -> Result<EntityTemplate, EngineError> {
    let c = &decl.components;
    let mut template = EntityTemplate::new(decl.name.clone(), decl.layer);

    if let Some(t) = &c.transform {
        template = template.with(Transform::new(
            Vec2::new(t.x, t.y),
            Vec2::new(t.velocity_x, t.velocity_y),
            t.width,
            t.height,
            t.scale,
        ));
    }
    if let Some(k) = &c.keyboard {
        let mut control = KeyboardControl::new(k.bindings, k.speed.unwrap_or(config.player_speed));
        if let Some(p) = &k.projectile {
            let texture = p.texture.as_deref().map(|id| assets.texture(id)).transpose()?;
            control = control.with_projectile(ProjectileTemplate {
                texture,
                speed: p.speed.unwrap_or(config.projectile_speed),
                range: p.range,
                size: p.size,
            });
        }
        template = template.with(control);
    }
    if let Some(p) = &c.projectile_emitter {
        template = template.with(ProjectileEmitter::new(p.speed, p.angle, p.range, p.looping));
    }
    if let Some(s) = &c.sprite {
        let texture = assets.texture(&s.texture)?;
        let mut sprite = match s.frames {
            Some(frames) => Sprite::animated(
                texture,
                SpriteAnimation {
                    frames,
                    speed_ms: s.speed_ms,
                    directional: s.directional,
                },
            ),
            None => Sprite::new(texture),
        };
        if s.fixed {
            sprite = sprite.fixed();
        }
        template = template.with(sprite.with_flip(s.flip));
    }
    if let Some(col) = &c.collider {
        template = template.with(Collider::new(col.tag));
    }
    if let Some(l) = &c.text_label {
        let font = assets.font(&l.font)?;
        template = template.with(TextLabel::new(l.x, l.y, l.text.clone(), font, l.color));
    }
    Ok(template)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
