//! Input collaborator.
//!
//! The frame driver polls an [`InputSource`] once per frame. Windowed
//! backends translate device events into an [`InputFrame`];
//! [`ScriptedInput`] replays a prepared sequence for tests and headless
//! runs.

use std::collections::VecDeque;

use skirmish_ecs::input::{Key, KeyState};

/// Input polled for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    /// Keys held this frame.
    pub keys: KeyState,
    /// The window was closed or the platform asked the session to end.
    pub quit: bool,
}

impl InputFrame {
    pub fn keys(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: KeyState::from_keys(keys),
            quit: false,
        }
    }

    pub fn quit() -> Self {
        Self {
            keys: KeyState::default(),
            quit: true,
        }
    }
}

/// Source of per-frame input.
pub trait InputSource {
    fn poll(&mut self) -> InputFrame;
}

/// Replays a fixed list of frames, then reports no keys held.
///
/// ```
/// use skirmish_engine::input::{InputSource, ScriptedInput};
/// use skirmish_ecs::input::Key;
///
/// let mut input = ScriptedInput::new().hold([Key::Right], 2).then_quit();
/// assert!(input.poll().keys.is_pressed(Key::Right));
/// assert!(input.poll().keys.is_pressed(Key::Right));
/// assert!(input.poll().quit);
/// assert_eq!(input.remaining(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_frames(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Append `frames` frames with `keys` held.
    pub fn hold(mut self, keys: impl IntoIterator<Item = Key>, frames: usize) -> Self {
        let frame = InputFrame::keys(keys);
        self.frames.extend(std::iter::repeat(frame).take(frames));
        self
    }

    /// Append `frames` frames with nothing held.
    pub fn idle(mut self, frames: usize) -> Self {
        self.frames
            .extend(std::iter::repeat(InputFrame::default()).take(frames));
        self
    }

    /// Append a frame that ends the session.
    pub fn then_quit(mut self) -> Self {
        self.frames.push_back(InputFrame::quit());
        self
    }

    pub fn push(&mut self, frame: InputFrame) {
        self.frames.push_back(frame);
    }

    /// Frames not yet polled.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputFrame {
        self.frames.pop_front().unwrap_or_default()
    }
}
