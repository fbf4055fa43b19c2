//! Play the shipped campaign without a window.
//!
//! Flies the helicopter right for a few seconds of real time, then quits
//! and prints how the session ended. Set `RUST_LOG=skirmish_engine=debug`
//! to watch levels load and frames tick.

use std::path::PathBuf;

use anyhow::Context;
use skirmish_engine::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let assets = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets");
    let input = ScriptedInput::new()
        .idle(30)
        .hold([Key::Right], 120)
        .hold([Key::Right, Key::Space], 1)
        .hold([Key::Down], 60)
        .then_quit();

    let mut game = Game::new(
        EngineConfig::default(),
        RecordingGraphics::new(),
        input,
        SystemClock::new(),
    )
    .context("failed to start the engine")?;

    for file in ["level1.json", "level2.json"] {
        let path = assets.join("levels").join(file);
        let level = LevelDescription::from_json_file(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        game.add_level(level, &assets);
    }

    let summary = game.run()?;
    let last = game.diagnostics();
    tracing::info!(
        frames = summary.frames,
        state = ?summary.state,
        levels_completed = summary.levels_completed,
        entities = last.entity_count,
        presented = game.graphics().frames_presented(),
        "session finished"
    );
    println!("{summary:?}");
    Ok(())
}
