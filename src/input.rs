//! Input events and the input collaborator
//!
//! The platform layer turns device activity into discrete `InputEvent`s and
//! queues them; the frame driver drains the queue once per frame in arrival
//! order. An empty queue just means nothing to dispatch.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    Escape,
    Backspace,
    Shift,
    A,
    C,
    D,
    R,
    S,
    V,
    W,
}

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Window close button or OS quit
    CloseRequested,
    KeyDown(Key),
    /// Primary pointer press in field coordinates
    PointerPressed(Vec2),
}

/// Source of pending input events
pub trait InputSource {
    /// Next pending event, or `None` when the queue is empty
    fn poll(&mut self) -> Option<InputEvent>;

    /// Take every pending event, preserving order
    fn drain(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.poll() {
            events.push(event);
        }
        events
    }
}

/// FIFO queue fed by the platform layer (or a script)
#[derive(Debug, Clone, Default)]
pub struct QueuedInput {
    pending: VecDeque<InputEvent>,
}

impl QueuedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    pub fn press(&mut self, key: Key) {
        self.push(InputEvent::KeyDown(key));
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Extend<InputEvent> for QueuedInput {
    fn extend<T: IntoIterator<Item = InputEvent>>(&mut self, iter: T) {
        self.pending.extend(iter);
    }
}

impl InputSource for QueuedInput {
    fn poll(&mut self) -> Option<InputEvent> {
        self.pending.pop_front()
    }
}
