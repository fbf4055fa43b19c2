//! The frame driver.
//!
//! A [`Game`] owns the entity registry, the asset table and the three
//! collaborators (graphics, input, clock). Each frame runs strictly in this
//! order:
//!
//! 1. **input** -- poll one [`InputFrame`]; Escape or a quit signal ends
//!    the session, F1 toggles collider outlines;
//! 2. **update** -- pace the frame, update every entity with the clamped
//!    delta-time, apply spawns, prune, move the camera;
//! 3. **collision** -- scan for the frame's single collision event and
//!    react to it;
//! 4. **render** -- clear, draw layers back to front, present.
//!
//! Render only reads the registry; all mutation happens before it.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use glam::Vec2;
use tracing::{debug, error, info};

use skirmish_ecs::prelude::*;

use crate::assets::AssetTable;
use crate::camera::Camera;
use crate::config::EngineConfig;
use crate::input::{InputFrame, InputSource};
use crate::level::{self, LevelDescription, LevelTarget};
use crate::tick::{Clock, FrameClock};
use crate::EngineError;

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Constructed; no level loaded yet.
    #[default]
    Ready,
    Running,
    /// The player was hit.
    GameOver,
    /// The last level was completed.
    Victory,
    /// Escape was pressed or the platform asked to quit.
    Quit,
    /// The next level failed to load after a level was completed.
    Aborted,
}

impl SessionState {
    pub fn is_running(self) -> bool {
        self == SessionState::Running
    }

    /// The session has ended and will not run more frames.
    pub fn is_finished(self) -> bool {
        matches!(
            self,
            SessionState::GameOver
                | SessionState::Victory
                | SessionState::Quit
                | SessionState::Aborted
        )
    }
}

// ---------------------------------------------------------------------------
// FrameDiagnostics / SessionSummary
// ---------------------------------------------------------------------------

/// Timing and counters for the last frame.
#[derive(Debug, Clone, Default)]
pub struct FrameDiagnostics {
    /// 1-based frame number.
    pub frame: u64,
    /// Delta-time handed to updates (after clamping).
    pub delta_secs: f32,
    /// Unclamped time since the previous frame.
    pub measured: Duration,
    pub update_time: Duration,
    pub collision_time: Duration,
    pub render_time: Duration,
    /// Entities stored after the update.
    pub entity_count: usize,
    pub spawned: usize,
    pub pruned: usize,
    pub collision: CollisionKind,
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Frames updated.
    pub frames: u64,
    pub state: SessionState,
    /// Index of the level being played when the session ended.
    pub level: Option<usize>,
    pub levels_completed: usize,
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct LevelSource {
    description: LevelDescription,
    base_dir: PathBuf,
}

/// One game session.
pub struct Game<G: Graphics, I: InputSource, C: Clock> {
    config: EngineConfig,
    graphics: G,
    input: I,
    clock: C,
    frame_clock: FrameClock,
    registry: EntityRegistry,
    assets: AssetTable,
    camera: Camera,
    levels: Vec<LevelSource>,
    current_level: Option<usize>,
    levels_completed: usize,
    /// World size of the current map; the window size when there is none.
    map_size: Vec2,
    state: SessionState,
    show_colliders: bool,
    keys: KeyState,
    frames: u64,
    last_collision: CollisionOutcome,
    diagnostics: FrameDiagnostics,
}

impl<G: Graphics, I: InputSource, C: Clock> Game<G, I, C> {
    /// Validate `config` and initialize the graphics backend.
    ///
    /// # Errors
    ///
    /// [`EngineError::Initialization`] if the configuration is unusable or
    /// the backend cannot create its surface. No frame runs in that case.
    pub fn new(
        config: EngineConfig,
        mut graphics: G,
        input: I,
        clock: C,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        graphics
            .initialize(config.window_width, config.window_height)
            .map_err(|err| EngineError::Initialization(err.to_string()))?;
        info!(
            width = config.window_width,
            height = config.window_height,
            fps = config.target_fps,
            "engine initialized"
        );

        let window = Vec2::new(config.window_width as f32, config.window_height as f32);
        Ok(Self {
            frame_clock: FrameClock::from_config(&config),
            camera: Camera::new(window.x, window.y),
            map_size: window,
            show_colliders: config.show_colliders,
            config,
            graphics,
            input,
            clock,
            registry: EntityRegistry::new(),
            assets: AssetTable::new(),
            levels: Vec::new(),
            current_level: None,
            levels_completed: 0,
            state: SessionState::Ready,
            keys: KeyState::default(),
            frames: 0,
            last_collision: CollisionOutcome::NONE,
            diagnostics: FrameDiagnostics::default(),
        })
    }

    /// Append a level to the play order. Its files resolve against
    /// `base_dir`. Returns the level's index.
    pub fn add_level(
        &mut self,
        description: LevelDescription,
        base_dir: impl Into<PathBuf>,
    ) -> usize {
        self.levels.push(LevelSource {
            description,
            base_dir: base_dir.into(),
        });
        self.levels.len() - 1
    }

    /// Load the first level and start the session.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.levels.is_empty() {
            return Err(EngineError::Initialization(
                "no levels registered".to_owned(),
            ));
        }
        self.load_level(0)?;
        self.state = SessionState::Running;
        self.frame_clock.reset(self.clock.now());
        Ok(())
    }

    /// Replace the registry contents with level `index`. Assets from
    /// earlier levels stay loaded.
    ///
    /// The level is built into a fresh registry that replaces the current
    /// one only once loading succeeds; on error the previous level is left
    /// untouched.
    pub fn load_level(&mut self, index: usize) -> Result<(), EngineError> {
        let source = self.levels.get(index).ok_or_else(|| {
            EngineError::MalformedLevel(format!(
                "level {index} does not exist ({} registered)",
                self.levels.len()
            ))
        })?;
        let mut registry = EntityRegistry::new();
        let info = level::load_level(
            &source.description,
            &source.base_dir,
            &self.config,
            LevelTarget {
                graphics: &mut self.graphics,
                assets: &mut self.assets,
                registry: &mut registry,
            },
        )?;
        self.registry = registry;
        self.map_size = info.map_size.unwrap_or(Vec2::new(
            self.config.window_width as f32,
            self.config.window_height as f32,
        ));
        self.current_level = Some(index);
        self.camera.reset();
        self.follow_player();
        Ok(())
    }

    // -- per-frame ----------------------------------------------------------

    /// Run one full frame. Does nothing unless the session is running.
    pub fn run_frame(&mut self) -> Result<(), EngineError> {
        if !self.state.is_running() {
            return Ok(());
        }
        self.process_input();
        if !self.state.is_running() {
            return Ok(());
        }
        self.update()?;
        self.render();
        Ok(())
    }

    /// Poll input for this frame.
    pub fn process_input(&mut self) {
        let InputFrame { keys, quit } = self.input.poll();
        let previous = std::mem::replace(&mut self.keys, keys);
        if quit || keys.is_pressed(Key::Escape) {
            info!(frame = self.frames, "quit requested");
            self.state = SessionState::Quit;
            return;
        }
        if keys.is_pressed(Key::F1) && !previous.is_pressed(Key::F1) {
            self.show_colliders = !self.show_colliders;
            debug!(show_colliders = self.show_colliders, "collider display toggled");
        }
    }

    /// Advance the simulation one frame and react to its collision event.
    ///
    /// # Errors
    ///
    /// Fails only if completing a level triggers a load that fails. The
    /// session is then [`SessionState::Aborted`] and the completed level
    /// stays in the registry.
    pub fn update(&mut self) -> Result<CollisionOutcome, EngineError> {
        let time = self.frame_clock.tick(&mut self.clock);
        self.frames += 1;

        let update_start = Instant::now();
        let report = self
            .registry
            .update(time.delta_secs, time.elapsed_ms, &self.keys);
        self.follow_player();
        let update_time = update_start.elapsed();

        let collision_start = Instant::now();
        let outcome = self.registry.check_collisions();
        let collision_time = collision_start.elapsed();
        self.last_collision = outcome;

        self.diagnostics = FrameDiagnostics {
            frame: self.frames,
            delta_secs: time.delta_secs,
            measured: time.measured,
            update_time,
            collision_time,
            render_time: Duration::ZERO,
            entity_count: self.registry.len(),
            spawned: report.spawned,
            pruned: report.pruned,
            collision: outcome.kind,
        };

        self.react(outcome)?;
        Ok(outcome)
    }

    /// Draw the current frame.
    pub fn render(&mut self) {
        let start = Instant::now();
        self.graphics.clear(Color::BACKGROUND);
        let mut ctx = RenderContext {
            graphics: &mut self.graphics,
            camera: self.camera.view(),
            show_colliders: self.show_colliders,
        };
        self.registry.render(&mut ctx);
        self.graphics.present();
        self.diagnostics.render_time = start.elapsed();
    }

    fn follow_player(&mut self) {
        let target = self
            .registry
            .entity_by_name(&self.config.player_entity)
            .and_then(|player| player.component::<Transform>())
            .map(Transform::center);
        if let Some(target) = target {
            self.camera.follow(target, self.map_size);
        }
    }

    fn react(&mut self, outcome: CollisionOutcome) -> Result<(), EngineError> {
        match outcome.kind {
            CollisionKind::None => {}
            CollisionKind::PlayerEnemy | CollisionKind::PlayerProjectile => {
                info!(kind = ?outcome.kind, frame = self.frames, "player hit; game over");
                self.state = SessionState::GameOver;
            }
            CollisionKind::EnemyProjectile => {
                if let Some((enemy, projectile)) = outcome.pair {
                    info!(%enemy, %projectile, "enemy destroyed");
                    self.registry.destroy(enemy);
                    self.registry.destroy(projectile);
                }
            }
            CollisionKind::PlayerLevelComplete => self.complete_level()?,
        }
        Ok(())
    }

    fn complete_level(&mut self) -> Result<(), EngineError> {
        self.levels_completed += 1;
        let next = self.current_level.map_or(0, |i| i + 1);
        if next < self.levels.len() {
            info!(completed = next - 1, next, "level complete");
            if let Err(err) = self.load_level(next) {
                error!(level = next, error = %err, "next level failed to load; aborting");
                self.state = SessionState::Aborted;
                return Err(err);
            }
            Ok(())
        } else {
            info!(levels = self.levels_completed, "final level complete");
            self.state = SessionState::Victory;
            Ok(())
        }
    }

    /// Start if needed, then run frames until the session ends.
    pub fn run(&mut self) -> Result<SessionSummary, EngineError> {
        if self.state == SessionState::Ready {
            self.start()?;
        }
        while self.state.is_running() {
            self.run_frame()?;
        }
        let summary = self.summary();
        info!(
            frames = summary.frames,
            state = ?summary.state,
            levels_completed = summary.levels_completed,
            "session ended"
        );
        Ok(summary)
    }

    /// Like [`run`](Self::run) but stops after at most `max_frames` frames.
    pub fn run_frames(&mut self, max_frames: u64) -> Result<SessionSummary, EngineError> {
        if self.state == SessionState::Ready {
            self.start()?;
        }
        for _ in 0..max_frames {
            if !self.state.is_running() {
                break;
            }
            self.run_frame()?;
        }
        Ok(self.summary())
    }

    // -- accessors ----------------------------------------------------------

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            frames: self.frames,
            state: self.state,
            level: self.current_level,
            levels_completed: self.levels_completed,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Mutable access to the registry, for setup and tests.
    pub fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }

    pub fn graphics(&self) -> &G {
        &self.graphics
    }

    pub fn assets(&self) -> &AssetTable {
        &self.assets
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn diagnostics(&self) -> &FrameDiagnostics {
        &self.diagnostics
    }

    /// Collision event of the last update.
    pub fn last_collision(&self) -> CollisionOutcome {
        self.last_collision
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn current_level(&self) -> Option<usize> {
        self.current_level
    }

    pub fn show_colliders(&self) -> bool {
        self.show_colliders
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
