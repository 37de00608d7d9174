//! Cone-test steering shared by guards and the arrow-controlled player
//!
//! Every tick the decision is recomputed from geometry alone:
//! - target outside the forward cone: rotate toward it, the short way
//! - inside the cone but further than `reach`: advance along facing
//! - inside the cone and within `reach`: hold
//!
//! There is no hysteresis, so a target sitting on the cone edge can make
//! the turn direction flip between frames.

use glam::Vec2;

use super::character::Vision;
use super::vector::{Unit, heading, normalize, turn_term};

/// Outcome of one steering decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// Rotate; `sign` is +1.0 (increase direction) or -1.0 (decrease)
    Rotate { sign: f32 },
    /// Move forward along the current facing
    Advance,
    /// Target in sight and in reach
    Hold,
}

/// Steering thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steer {
    /// Half-angle of the forward cone (radians)
    pub cone: f32,
    /// Distance within which a sighted target stops the approach
    pub reach: f32,
}

impl Steer {
    pub fn new(cone: f32, reach: f32) -> Self {
        Self { cone, reach }
    }

    /// Decide how a character facing `direction` reacts to `target`
    pub fn decide(&self, direction: f32, target: Unit) -> Decision {
        let facing = heading(direction);
        if target.dir.dot(facing) < self.cone.cos() {
            let sign = if turn_term(direction, target.dir) < 0.0 {
                1.0
            } else {
                -1.0
            };
            Decision::Rotate { sign }
        } else if target.length > self.reach {
            Decision::Advance
        } else {
            Decision::Hold
        }
    }
}

/// Guard reaction to the player.
///
/// Returns `None` when the guard stands exactly on the player, since there
/// is no direction to look in.
pub fn guard_decision(
    pos: Vec2,
    direction: f32,
    size: f32,
    vision: &Vision,
    player: Vec2,
) -> Option<Decision> {
    let target = normalize(player - pos)?;
    Some(Steer::new(vision.arc, size * vision.range).decide(direction, target))
}
