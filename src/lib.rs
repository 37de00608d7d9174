//! Whiplash - a top-down prison escape prototype
//!
//! Core modules:
//! - `sim`: Characters, guard steering, and the per-frame simulation step
//! - `controls`: Keyboard flags and drag gestures mapped to movement intent
//! - `renderer`: Drawing surface abstraction, camera, and the three-pass scene render
//! - `driver`: Animation-frame scheduling and heartbeat
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Data-driven tuning

pub mod controls;
pub mod driver;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::World;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Frames further apart than this (ms) are not simulated (tab was hidden)
    pub const STALE_FRAME_MS: f64 = 1000.0;
    /// Heartbeat log interval (ms)
    pub const HEARTBEAT_MS: f64 = 2000.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 10.0;
    pub const PLAYER_SPEED: f32 = 0.25; // distance per ms
    pub const PLAYER_ROTATION: f32 = 0.005; // radians per ms
    /// Backing up is slower than walking forward
    pub const PLAYER_REVERSE_FACTOR: f32 = 0.75;
    /// Half-angle within which the player walks toward the control arrow
    pub const PLAYER_ARROW_CONE: f32 = PI / 10.0;

    /// Guard defaults
    pub const GUARD_SIZE: f32 = 10.0;
    pub const GUARD_SPEED: f32 = 0.1;
    pub const GUARD_ROTATION: f32 = 0.002;
    /// Vision range as a multiple of guard size
    pub const GUARD_VISION_RANGE: f32 = 8.0;
    /// Vision half-angle (radians)
    pub const GUARD_VISION_ARC: f32 = PI / 6.0;
    /// Speed of guards that patrol without vision, per axis
    pub const WANDER_SPEED: f32 = 0.05;

    /// Camera zoom (pixels per world unit)
    pub const ZOOM_DEFAULT: f32 = 1.0;
    pub const ZOOM_MIN: f32 = 0.25;
    pub const ZOOM_MAX: f32 = 8.0;
    /// Multiplier applied per wheel notch
    pub const ZOOM_WHEEL_STEP: f32 = 1.1;

    /// Drag directions further apart than this between samples cancel the gesture
    pub const GESTURE_MAX_DEVIATION: f32 = PI / 3.0;
    /// Tap must land within min(w, h) / GESTURE_DEADZONE_DIVISOR of center
    pub const GESTURE_DEADZONE_DIVISOR: f32 = 2.0;
    /// Drag must travel further than min(w, h) / GESTURE_MIN_DRAG_DIVISOR
    pub const GESTURE_MIN_DRAG_DIVISOR: f32 = 12.0;
}
