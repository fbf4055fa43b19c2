//! Graphics backends.
//!
//! Windowed backends implement [`Graphics`](skirmish_ecs::gfx::Graphics)
//! outside this crate. [`RecordingGraphics`] draws nothing and records every
//! call instead, so sessions can run headless and be inspected afterwards.

pub mod recording;

pub use recording::{DrawCommand, RecordingGraphics};
