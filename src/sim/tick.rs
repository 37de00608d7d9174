//! Per-frame simulation step
//!
//! Advances every character by the real time elapsed since its last update.

use super::character::UpdateView;
use super::state::World;

/// Advance the world to `now` (ms).
///
/// Frames arriving `stale_frame_ms` or more after the previous one (a
/// backgrounded tab) are not simulated; the characters' clocks jump to
/// `now` instead so the gap is never integrated. Returns whether the
/// characters were updated.
pub fn tick(world: &mut World, now: f64) -> bool {
    let gap = now - world.last_simulated;
    world.last_simulated = now;

    if gap >= world.stale_frame_ms {
        log::debug!("Skipping stale frame after {:.0}ms gap", gap);
        for character in &mut world.characters {
            character.resync(now);
        }
        return false;
    }

    let bounds = world.viewport.size();
    for i in 0..world.characters.len() {
        // Guards later in the list see where the player moved this frame
        let view = UpdateView {
            bounds,
            player: world.characters[world.player].pos,
            controls: &world.controls,
        };
        world.characters[i].update(&view, now);
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::platform::input::Key;
    use crate::sim::{Character, Viewport};
    use glam::Vec2;

    fn world_with(cast: Vec<Character>) -> World {
        World::with_characters(Viewport::new(320.0, 320.0), &Settings::default(), cast, 0.0).unwrap()
    }

    #[test]
    fn test_tick_moves_player() {
        let settings = Settings::default();
        let mut world = world_with(vec![Character::player(Vec2::ZERO, 10.0, &settings, 0.0)]);
        world.key_down(Key::Up);

        assert!(tick(&mut world, 16.0));
        assert!((world.player().pos.x - settings.player_speed * 16.0).abs() < 1e-4);
        assert_eq!(world.last_simulated, 16.0);
    }

    #[test]
    fn test_stale_gap_is_skipped_and_not_carried_over() {
        let settings = Settings::default();
        let mut world = world_with(vec![Character::player(Vec2::ZERO, 10.0, &settings, 0.0)]);
        world.key_down(Key::Up);

        assert!(!tick(&mut world, 5000.0));
        assert_eq!(world.player().pos, Vec2::ZERO);
        assert_eq!(world.last_simulated, 5000.0);

        // Next frame integrates only its own 16ms
        assert!(tick(&mut world, 5016.0));
        assert!((world.player().pos.x - settings.player_speed * 16.0).abs() < 1e-4);
    }

    #[test]
    fn test_resize_then_same_time_tick_leaves_wanderer_alone() {
        let settings = Settings::default();
        let mut world = world_with(vec![
            Character::wanderer(Vec2::new(300.0, 100.0), 10.0, Vec2::new(0.05, 0.0), 0.0, 0.0),
            Character::player(Vec2::new(160.0, 160.0), 10.0, &settings, 0.0),
        ]);
        world.resize(200.0, 200.0);

        assert!(tick(&mut world, 0.0));
        assert_eq!(world.characters[0].pos, Vec2::new(300.0, 100.0));
        assert_eq!(world.characters[0].direction, 0.0);

        assert!(tick(&mut world, 16.0));
        assert_eq!(world.characters[0].pos.x, 200.0);
    }

    #[test]
    fn test_guard_sees_player_moved_earlier_in_frame() {
        let settings = Settings::default();
        // Player first in list, guard facing it far away
        let cast = vec![
            Character::player(Vec2::new(200.0, 0.0), 10.0, &settings, 0.0),
            Character::guard(Vec2::ZERO, 10.0, 0.0, 0.0, &settings, 0.0),
        ];
        let mut world = world_with(cast);
        world.key_down(Key::Up);

        tick(&mut world, 100.0);
        let guard = &world.characters[1];
        assert!((guard.pos.x - settings.guard_speed * 100.0).abs() < 1e-4);
        assert!((world.player().pos.x - (200.0 + settings.player_speed * 100.0)).abs() < 1e-3);
    }

    #[test]
    fn test_zero_dt_tick_is_idempotent() {
        let mut world = World::new(Viewport::new(320.0, 320.0), &Settings::default(), 0.0);
        world.key_down(Key::Left);
        let before = world.characters.clone();
        tick(&mut world, 0.0);
        assert_eq!(before, world.characters);
    }
}
