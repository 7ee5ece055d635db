use std::collections::HashSet;

/// Key codes as reported by browser `KeyboardEvent.keyCode`.
pub mod keys {
    pub const W: u32 = 87;
    pub const A: u32 = 65;
    pub const S: u32 = 83;
    pub const D: u32 = 68;
    pub const UP: u32 = 38;
    pub const DOWN: u32 = 40;
    pub const LEFT: u32 = 37;
    pub const RIGHT: u32 = 39;
    pub const SPACE: u32 = 32;
    pub const ENTER: u32 = 13;
    pub const ESCAPE: u32 = 27;
}

/// Input event types the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
}

/// A queue of input events.
/// The host pushes events; the runner folds them into `KeyboardState` each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Keys currently held, plus keys that went down this frame.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    down: HashSet<u32>,
    pressed: HashSet<u32>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a batch of events into the state. Call once per frame.
    pub fn apply(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            match event {
                InputEvent::KeyDown { key_code } => {
                    // Key repeat does not count as a fresh press.
                    if self.down.insert(key_code) {
                        self.pressed.insert(key_code);
                    }
                }
                InputEvent::KeyUp { key_code } => {
                    self.down.remove(&key_code);
                }
            }
        }
    }

    /// Forget this frame's presses; held keys stay down.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }

    pub fn is_key_down(&self, key_code: u32) -> bool {
        self.down.contains(&key_code)
    }

    pub fn was_pressed(&self, key_code: u32) -> bool {
        self.pressed.contains(&key_code)
    }

    /// Release every key.
    pub fn reset(&mut self) {
        self.down.clear();
        self.pressed.clear();
    }
}
