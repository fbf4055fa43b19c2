//! Skirmish Engine -- frame driver, level loading and headless backends.
//!
//! This crate builds on [`skirmish_ecs`] to run a game session: it loads
//! levels (assets, a tile map and entity declarations) into an
//! [`EntityRegistry`](skirmish_ecs::registry::EntityRegistry), paces frames
//! against a fixed budget with a clamped delta-time, and reacts to the
//! collision event each frame produces.
//!
//! # Quick Start
//!
//! ```
//! use skirmish_engine::prelude::*;
//!
//! let level = LevelDescription::from_json_str(r#"{
//!     "name": "field",
//!     "entities": [
//!         { "name": "player", "layer": "player", "components": {
//!             "transform": { "x": 0, "y": 0, "width": 32, "height": 32 },
//!             "collider": { "tag": "PLAYER" } } },
//!         { "name": "tank", "layer": "enemy", "components": {
//!             "transform": { "x": 16, "y": 16, "width": 32, "height": 32 },
//!             "collider": { "tag": "ENEMY" } } }
//!     ]
//! }"#).unwrap();
//!
//! let mut game = Game::new(
//!     EngineConfig::default(),
//!     RecordingGraphics::new(),
//!     ScriptedInput::new(),
//!     ManualClock::new(),
//! ).unwrap();
//! game.add_level(level, ".");
//!
//! let summary = game.run().unwrap();
//! assert_eq!(summary.state, SessionState::GameOver);
//! assert_eq!(summary.frames, 1);
//! ```

#![deny(unsafe_code)]

use std::path::PathBuf;

pub mod assets;
pub mod camera;
pub mod config;
pub mod game;
pub mod input;
pub mod level;
pub mod map;
pub mod render;
pub mod tick;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

/// Re-export the ECS crate for convenience.
pub use skirmish_ecs;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced while starting a session or loading a level.
///
/// The per-frame path never fails except when a completed level hands over
/// to the next one and that level cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Graphics context setup failed or the configuration is unusable.
    #[error("initialization failed: {0}")]
    Initialization(String),

    /// A tile map is shorter than, or shaped differently from, its
    /// declared dimensions.
    #[error("malformed map '{map}' at row {row}: {reason}")]
    MalformedMap {
        map: String,
        row: usize,
        reason: String,
    },

    /// A level description is structurally invalid.
    #[error("malformed level: {0}")]
    MalformedLevel(String),

    /// A level refers to an asset id that was never declared.
    #[error("unknown {kind} asset '{id}'")]
    UnknownAsset {
        kind: assets::AssetKind,
        id: String,
    },

    /// Reading a file failed.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document (configuration or level) could not be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The graphics backend refused to load an asset.
    #[error(transparent)]
    Graphics(#[from] skirmish_ecs::gfx::GraphicsError),

    /// An entity declaration could not be built.
    #[error(transparent)]
    Ecs(#[from] skirmish_ecs::EcsError),
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common engine usage.
pub mod prelude {
    // Re-export everything from the ECS prelude.
    pub use skirmish_ecs::prelude::*;

    // Engine-specific exports.
    pub use crate::assets::{AssetKind, AssetTable};
    pub use crate::camera::Camera;
    pub use crate::config::EngineConfig;
    pub use crate::game::{FrameDiagnostics, Game, SessionState, SessionSummary};
    pub use crate::input::{InputFrame, InputSource, ScriptedInput};
    pub use crate::level::{
        load_level, AssetDecl, EntityDecl, LevelDescription, LevelInfo, LevelTarget, MapDecl,
    };
    pub use crate::map::{MapLayout, TileMap};
    pub use crate::render::{DrawCommand, RecordingGraphics};
    pub use crate::tick::{Clock, FrameClock, FrameTime, ManualClock, SystemClock};
    pub use crate::EngineError;
}
