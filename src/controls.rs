//! Input mapper: key flags and drag gestures to movement intent
//!
//! Keyboard and drag steering are mutually exclusive. Pressing a movement
//! key drops the drag arrow; a committed drag arrow overrides the keys.

use glam::Vec2;

use crate::consts::{GESTURE_DEADZONE_DIVISOR, GESTURE_MAX_DEVIATION, GESTURE_MIN_DRAG_DIVISOR};
use crate::platform::input::{Key, PointerEvent};
use crate::sim::vector::normalize;
use crate::sim::{Camera, Viewport};

/// Held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl KeyFlags {
    pub fn set(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Up => self.up = pressed,
            Key::Down => self.down = pressed,
            Key::Left => self.left = pressed,
            Key::Right => self.right = pressed,
        }
    }

    /// -1 turns left (decreasing direction), +1 right; opposing keys cancel
    pub fn turn(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// +1 walks forward, -1 backs up; opposing keys cancel
    pub fn walk(&self) -> f32 {
        match (self.up, self.down) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

/// Player control state, sampled once per tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Controls {
    pub keys: KeyFlags,
    /// Unit direction from a committed drag; takes precedence over `keys`
    pub arrow: Option<Vec2>,
}

impl Controls {
    pub fn key_down(&mut self, key: Key) {
        self.keys.set(key, true);
        self.arrow = None;
    }

    pub fn key_up(&mut self, key: Key) {
        self.keys.set(key, false);
    }
}

/// Direction of the drag in progress
#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum DragArrow {
    #[default]
    Unset,
    Consistent(Vec2),
    /// Direction swung too far between samples; dead for this gesture
    Inconsistent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pinch {
    start_distance: f32,
    start_zoom: f32,
}

/// Pointer gesture tracking between down and up
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gesture {
    tap: Option<Vec2>,
    /// Drag delta since the tap
    mmove: Vec2,
    arrow: DragArrow,
    pinch: Option<Pinch>,
}

impl Gesture {
    /// Where the current drag started, if one is in progress
    pub fn tap(&self) -> Option<Vec2> {
        self.tap
    }

    /// Current drag direction, `None` if unset or inconsistent
    pub fn arrow(&self) -> Option<Vec2> {
        match self.arrow {
            DragArrow::Consistent(arrow) => Some(arrow),
            _ => None,
        }
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    pub fn pointer_down(&mut self, event: &PointerEvent, camera: &Camera) {
        if let Some(distance) = event.pinch_distance() {
            self.start_pinch(distance, camera);
            return;
        }
        if self.pinch.is_some() {
            return;
        }
        self.tap = Some(event.primary);
        self.mmove = Vec2::ZERO;
        self.arrow = DragArrow::Unset;
    }

    pub fn pointer_move(&mut self, event: &PointerEvent, camera: &mut Camera) {
        if let Some(distance) = event.pinch_distance() {
            match self.pinch {
                Some(pinch) if pinch.start_distance > 0.0 => {
                    camera.set_zoom(pinch.start_zoom * distance / pinch.start_distance);
                }
                Some(_) => {}
                None => self.start_pinch(distance, camera),
            }
            return;
        }

        let Some(tap) = self.tap else {
            return;
        };
        self.mmove = event.primary - tap;
        let Some(sample) = normalize(self.mmove) else {
            return;
        };
        self.arrow = match self.arrow {
            DragArrow::Unset => DragArrow::Consistent(sample.dir),
            DragArrow::Consistent(prev) if prev.dot(sample.dir) > GESTURE_MAX_DEVIATION.cos() => {
                DragArrow::Consistent(sample.dir)
            }
            _ => DragArrow::Inconsistent,
        };
    }

    /// Pointer released or left: commit or clear the control arrow
    pub fn pointer_up(&mut self, event: &PointerEvent, viewport: Viewport, controls: &mut Controls) {
        if self.pinch.is_some() {
            if event.pinch_distance().is_none() {
                self.pinch = None;
            }
            return;
        }
        let Some(tap) = self.tap.take() else {
            return;
        };

        let min_side = viewport.min_side();
        let near_center = tap.distance(viewport.center()) <= min_side / GESTURE_DEADZONE_DIVISOR;
        let long_enough = self.mmove.length() > min_side / GESTURE_MIN_DRAG_DIVISOR;

        controls.arrow = match self.arrow {
            DragArrow::Consistent(arrow) if near_center && long_enough => {
                log::debug!("Drag committed: ({:.2}, {:.2})", arrow.x, arrow.y);
                Some(arrow)
            }
            _ => None,
        };
        self.mmove = Vec2::ZERO;
        self.arrow = DragArrow::Unset;
    }

    fn start_pinch(&mut self, distance: f32, camera: &Camera) {
        self.pinch = Some(Pinch {
            start_distance: distance,
            start_zoom: camera.zoom(),
        });
        self.tap = None;
        self.mmove = Vec2::ZERO;
        self.arrow = DragArrow::Unset;
    }
}
