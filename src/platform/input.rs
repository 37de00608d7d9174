//! Normalized input events
//!
//! Browser events are reduced to these before they reach the world, so the
//! input mapper never sees DOM types.

use glam::Vec2;

/// Logical movement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Up,
    Right,
    Down,
}

impl Key {
    /// Map a `KeyboardEvent.key` value; anything else is ignored
    pub fn from_browser_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowUp" | "w" | "W" => Some(Key::Up),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            _ => None,
        }
    }

    /// Map a legacy `keyCode`
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 | 65 => Some(Key::Left),
            38 | 87 => Some(Key::Up),
            39 | 68 => Some(Key::Right),
            40 | 83 => Some(Key::Down),
            _ => None,
        }
    }

    /// Map a keyboard event, falling back to `keyCode` when `key` is
    /// unrecognized (older browsers report "Unidentified" or "Left")
    pub fn from_keyboard(key: &str, code: u32) -> Option<Self> {
        Self::from_browser_key(key).or_else(|| Self::from_key_code(code))
    }
}

/// A pointer (mouse or touch) event relative to the drawing surface
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointerEvent {
    /// Mouse position, or the touch that changed
    pub primary: Vec2,
    /// All touch points still active (empty for mouse)
    pub touches: Vec<Vec2>,
}

impl PointerEvent {
    pub fn mouse(x: f32, y: f32) -> Self {
        Self {
            primary: Vec2::new(x, y),
            touches: Vec::new(),
        }
    }

    pub fn touch(primary: Vec2, touches: Vec<Vec2>) -> Self {
        Self { primary, touches }
    }

    /// Distance between the first two touch points, if there are two
    pub fn pinch_distance(&self) -> Option<f32> {
        match self.touches.as_slice() {
            [a, b, ..] => Some(a.distance(*b)),
            _ => None,
        }
    }
}
