//! 2D rendering module
//!
//! Draws through the `Surface` trait so the same code paints the browser
//! canvas and the headless recorder.

pub mod camera;
pub mod draw;
pub mod scene;
pub mod surface;

pub use draw::Paint;
pub use scene::render;
pub use surface::{Op, Recorder, Surface};
