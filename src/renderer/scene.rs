//! Scene render: background, then three full passes over the cast
//!
//! Passes are never interleaved, so no vision cone is painted over a body
//! drawn earlier in the list.

use super::camera;
use super::draw::Paint;
use super::surface::Surface;
use crate::sim::World;

/// Floor color inside the patrol bounds
pub const FLOOR_COLOR: &str = "#ddd";

/// Draw one frame of `world` at time `now` (ms)
pub fn render(surface: &mut dyn Surface, world: &World, now: f64) {
    let viewport = world.viewport;

    surface.clear_rect(0.0, 0.0, viewport.width, viewport.height);
    surface.save();
    surface.set_line_width(viewport.width.max(viewport.height) / 50.0);
    camera::apply(surface, world.player().pos, world.camera.zoom(), viewport);

    // Floor covers the bounds wandering guards bounce within
    surface.fill_rect(0.0, 0.0, viewport.width, viewport.height, FLOOR_COLOR);

    for character in &world.characters {
        character.draw_pre(surface, now);
    }
    for character in &world.characters {
        character.draw(surface, now);
    }
    for character in &world.characters {
        character.draw_post(surface, now);
    }

    surface.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::renderer::{Op, Recorder};
    use crate::sim::Viewport;

    #[test]
    fn test_cones_before_bodies() {
        let world = World::new(Viewport::new(320.0, 320.0), &Settings::default(), 0.0);
        let mut rec = Recorder::new();
        render(&mut rec, &world, 1000.0);

        let fills: Vec<&str> = rec.fills().collect();
        let last_cone = fills.iter().rposition(|c| c.starts_with("rgba")).unwrap();
        let first_body = fills
            .iter()
            .position(|c| *c == "darkgray" || *c == "orange")
            .unwrap();
        assert!(last_cone < first_body);
        assert_eq!(fills.iter().filter(|c| c.starts_with("rgba")).count(), 2);
    }

    #[test]
    fn test_frame_starts_clear_and_balances_stack() {
        let world = World::new(Viewport::new(320.0, 240.0), &Settings::default(), 0.0);
        let mut rec = Recorder::new();
        render(&mut rec, &world, 0.0);

        assert_eq!(rec.ops[0], Op::Clear);
        assert_eq!(rec.ops[1], Op::LineWidth(320.0 / 50.0));
        assert_eq!(rec.depth(), 0);
    }

    #[test]
    fn test_player_drawn_at_center() {
        let mut world = World::new(Viewport::new(320.0, 320.0), &Settings::default(), 0.0);
        world.player_mut().pos = glam::Vec2::new(-40.0, 90.0);
        world.camera.set_zoom(2.0);
        let mut rec = Recorder::new();
        render(&mut rec, &world, 0.0);

        // The player's body is the last "orange" fill; its arc precedes it
        let body = rec
            .ops
            .iter()
            .position(|op| *op == Op::Fill("orange".to_string()))
            .unwrap();
        let Op::Arc { center, .. } = &rec.ops[body - 1] else {
            panic!("expected arc before body fill");
        };
        assert!((*center - glam::Vec2::new(160.0, 160.0)).length() < 1e-3);
    }
}
