//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time
//! - Input events
//! - The 2D canvas drawing surface (web only)

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod input;

/// Current time in milliseconds
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the first call in this process
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}
