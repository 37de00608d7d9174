//! Character drawing
//!
//! Every character paints in its own local frame: origin at its position,
//! +x along its facing.

use std::f32::consts::TAU;

use super::surface::Surface;
use crate::sim::Character;

/// The three render passes a scene entity takes part in
pub trait Paint {
    /// Under every body (vision cones)
    fn draw_pre(&self, _surface: &mut dyn Surface, _now: f64) {}
    fn draw(&self, surface: &mut dyn Surface, now: f64);
    /// Over every body
    fn draw_post(&self, _surface: &mut dyn Surface, _now: f64) {}
}

impl Paint for Character {
    fn draw_pre(&self, surface: &mut dyn Surface, _now: f64) {
        let Some(vision) = &self.vision else {
            return;
        };
        surface.save();
        surface.translate(self.pos.x, self.pos.y);
        surface.rotate(self.direction);
        surface.begin_path();
        surface.move_to(0.0, 0.0);
        surface.arc(0.0, 0.0, self.size * vision.range, -vision.arc, vision.arc);
        surface.fill(&vision.color);
        surface.restore();
    }

    fn draw(&self, surface: &mut dyn Surface, now: f64) {
        let size = self.size;
        let look = &self.appearance;

        surface.save();
        surface.translate(self.pos.x, self.pos.y);
        surface.rotate(self.direction);

        // Shoulders: squashed front to back
        surface.begin_path();
        surface.scale(0.8, 1.0);
        surface.move_to(size, 0.0);
        surface.arc(0.0, 0.0, size, 0.0, TAU);
        surface.fill(&look.body);

        surface.scale(1.25, 1.0);
        surface.begin_path();
        surface.arc(0.0, 0.0, size * 0.75, 0.0, TAU);
        surface.fill(&look.head);

        if look.eyes_open(now) {
            for side in [-1.0, 1.0] {
                surface.begin_path();
                surface.arc(size * 0.2, side * size * 0.2, size * 0.1, 0.0, TAU);
                surface.fill(&look.eyes);
            }
        }

        surface.restore();
    }
}
