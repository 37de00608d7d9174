//! Simulation module
//!
//! All gameplay logic lives here:
//! - Continuous time: every update integrates over elapsed milliseconds
//! - Stable iteration order (character list order)
//! - No rendering or platform dependencies

pub mod character;
pub mod state;
pub mod steering;
pub mod tick;
pub mod vector;

pub use character::{Appearance, Blink, Character, Role, UpdateView, Vision};
pub use state::{Camera, Viewport, World};
pub use steering::{Decision, Steer, guard_decision};
pub use tick::tick;
pub use vector::{Unit, heading, normalize, turn_term};
