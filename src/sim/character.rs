//! Characters: the player and the guards
//!
//! A character integrates its own motion over the milliseconds elapsed
//! since its last update. `direction` is an unbounded angle in radians;
//! it only ever goes through `sin`/`cos`, so it is never wrapped.

use glam::Vec2;

use super::steering::{Decision, Steer, guard_decision};
use super::vector::{Unit, heading};
use crate::Settings;
use crate::consts::PLAYER_ARROW_CONE;
use crate::controls::Controls;

/// Eye blink timing (all in ms)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blink {
    pub freq: f64,
    pub length: f64,
    pub phase: f64,
}

/// Colors and blink timing
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub body: String,
    pub head: String,
    pub eyes: String,
    pub blink: Option<Blink>,
}

impl Appearance {
    /// Eyes are open unless `(now + phase) mod freq` falls at or below `length`.
    /// Without blink timing (or with a zero frequency/length) they never close.
    pub fn eyes_open(&self, now: f64) -> bool {
        match self.blink {
            Some(blink) if blink.freq > 0.0 && blink.length > 0.0 => {
                (now + blink.phase).rem_euclid(blink.freq) > blink.length
            }
            _ => true,
        }
    }
}

/// Vision cone
#[derive(Debug, Clone, PartialEq)]
pub struct Vision {
    /// Reach as a multiple of the character's size
    pub range: f32,
    /// Half-angle (radians)
    pub arc: f32,
    pub color: String,
}

/// What drives a character each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Role {
    /// Follows the control state
    Player { reverse_factor: f32 },
    /// Chases the player when it has vision, bounces around with `velocity` otherwise
    Guard { velocity: Vec2 },
}

/// Read-only view of the world handed to each update
#[derive(Debug, Clone, Copy)]
pub struct UpdateView<'a> {
    /// Bounds for characters that bounce: [0, width] x [0, height]
    pub bounds: Vec2,
    pub player: Vec2,
    pub controls: &'a Controls,
}

/// A moving, drawable entity
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub pos: Vec2,
    /// Facing (radians, unbounded)
    pub direction: f32,
    /// Radius of the body disc
    pub size: f32,
    /// Distance per ms
    pub speed: f32,
    /// Radians per ms
    pub rotation_rate: f32,
    pub appearance: Appearance,
    pub vision: Option<Vision>,
    pub role: Role,
    /// Timestamp (ms) of the last update
    pub last: f64,
}

impl Character {
    pub fn player(pos: Vec2, size: f32, settings: &Settings, now: f64) -> Self {
        Self {
            pos,
            direction: 0.0,
            size,
            speed: settings.player_speed,
            rotation_rate: settings.player_rotation,
            appearance: Appearance {
                body: "orange".to_string(),
                head: "orangered".to_string(),
                eyes: "black".to_string(),
                blink: Some(Blink {
                    freq: 4000.0,
                    length: 150.0,
                    phase: 0.0,
                }),
            },
            vision: None,
            role: Role::Player {
                reverse_factor: settings.reverse_factor,
            },
            last: now,
        }
    }

    /// A guard with a vision cone that turns toward and approaches the player
    pub fn guard(
        pos: Vec2,
        size: f32,
        direction: f32,
        blink_phase: f64,
        settings: &Settings,
        now: f64,
    ) -> Self {
        Self {
            pos,
            direction,
            size,
            speed: settings.guard_speed,
            rotation_rate: settings.guard_rotation,
            appearance: Self::guard_appearance(blink_phase),
            vision: Some(Vision {
                range: settings.vision_range,
                arc: settings.vision_arc,
                color: "rgba(255, 255, 160, 0.35)".to_string(),
            }),
            role: Role::Guard {
                velocity: Vec2::ZERO,
            },
            last: now,
        }
    }

    /// A guard without vision that patrols in straight lines, bouncing off the bounds
    pub fn wanderer(pos: Vec2, size: f32, velocity: Vec2, blink_phase: f64, now: f64) -> Self {
        Self {
            pos,
            direction: facing_of(velocity, 0.0),
            size,
            speed: velocity.length(),
            rotation_rate: 0.0,
            appearance: Self::guard_appearance(blink_phase),
            vision: None,
            role: Role::Guard { velocity },
            last: now,
        }
    }

    fn guard_appearance(blink_phase: f64) -> Appearance {
        Appearance {
            body: "darkgray".to_string(),
            head: "blue".to_string(),
            eyes: "black".to_string(),
            blink: Some(Blink {
                freq: 3000.0,
                length: 120.0,
                phase: blink_phase,
            }),
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.role, Role::Player { .. })
    }

    /// Advance by the time elapsed since the last update
    pub fn update(&mut self, view: &UpdateView<'_>, now: f64) {
        let dt = ((now - self.last) as f32).max(0.0);
        self.last = now;
        // No elapsed time, no motion: not even a clamp back into shrunk bounds
        if dt == 0.0 {
            return;
        }
        match self.role {
            Role::Player { reverse_factor } => self.update_player(view.controls, reverse_factor, dt),
            Role::Guard { .. } => self.update_guard(view, dt),
        }
    }

    /// Forget elapsed time without moving
    pub fn resync(&mut self, now: f64) {
        self.last = now;
    }

    fn update_player(&mut self, controls: &Controls, reverse_factor: f32, dt: f32) {
        if let Some(arrow) = controls.arrow {
            let target = Unit {
                dir: arrow,
                length: 1.0,
            };
            let decision = Steer::new(PLAYER_ARROW_CONE, 0.0).decide(self.direction, target);
            self.apply(decision, dt);
            return;
        }

        self.direction += controls.keys.turn() * self.rotation_rate * dt;
        let walk = controls.keys.walk();
        let step = if walk > 0.0 {
            self.speed * dt
        } else if walk < 0.0 {
            -self.speed * dt * reverse_factor
        } else {
            0.0
        };
        if step != 0.0 {
            self.pos += heading(self.direction) * step;
        }
    }

    fn update_guard(&mut self, view: &UpdateView<'_>, dt: f32) {
        if let Some(vision) = &self.vision {
            let decision = guard_decision(self.pos, self.direction, self.size, vision, view.player);
            if let Some(decision) = decision {
                self.apply(decision, dt);
            }
        } else if let Role::Guard { velocity } = &mut self.role {
            if reflect(&mut self.pos, velocity, dt, view.bounds) {
                self.direction = facing_of(*velocity, self.direction);
            }
        }
    }

    fn apply(&mut self, decision: Decision, dt: f32) {
        match decision {
            Decision::Rotate { sign } => self.direction += sign * self.rotation_rate * dt,
            Decision::Advance => self.pos += heading(self.direction) * self.speed * dt,
            Decision::Hold => {}
        }
    }
}

fn facing_of(velocity: Vec2, fallback: f32) -> f32 {
    if velocity == Vec2::ZERO {
        fallback
    } else {
        velocity.y.atan2(velocity.x)
    }
}

/// Move `pos` by `velocity * dt`, bouncing off [0, bounds.x] x [0, bounds.y].
///
/// A component that leaves the bounds is clamped to the edge and its
/// velocity inverted. Returns true if anything bounced.
pub fn reflect(pos: &mut Vec2, velocity: &mut Vec2, dt: f32, bounds: Vec2) -> bool {
    let mut bounced = false;

    pos.x += velocity.x * dt;
    if pos.x < 0.0 || pos.x > bounds.x {
        pos.x = pos.x.clamp(0.0, bounds.x);
        velocity.x = -velocity.x;
        bounced = true;
    }

    pos.y += velocity.y * dt;
    if pos.y < 0.0 || pos.y > bounds.y {
        pos.y = pos.y.clamp(0.0, bounds.y);
        velocity.y = -velocity.y;
        bounced = true;
    }

    bounced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::input::Key;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn view<'a>(player: Vec2, controls: &'a Controls) -> UpdateView<'a> {
        UpdateView {
            bounds: Vec2::new(320.0, 320.0),
            player,
            controls,
        }
    }

    fn guard_at(pos: Vec2, direction: f32) -> Character {
        Character::guard(pos, 10.0, direction, 0.0, &Settings::default(), 0.0)
    }

    #[test]
    fn test_guard_advances_toward_player_ahead() {
        let controls = Controls::default();
        let mut guard = guard_at(Vec2::ZERO, 0.0);
        guard.update(&view(Vec2::new(300.0, 0.0), &controls), 100.0);

        let expected = guard.speed * 100.0;
        assert!((guard.pos.x - expected).abs() < 1e-4);
        assert!(guard.pos.y.abs() < 1e-4);
        assert_eq!(guard.direction, 0.0);
        assert_eq!(guard.last, 100.0);
    }

    #[test]
    fn test_guard_rotates_toward_player_behind() {
        let controls = Controls::default();
        let mut guard = guard_at(Vec2::new(50.0, 50.0), 0.0);
        guard.update(&view(Vec2::new(0.0, 50.0), &controls), 100.0);

        // turn term is zero for a target straight behind: decrease
        let expected = -guard.rotation_rate * 100.0;
        assert!((guard.direction - expected).abs() < 1e-6);
        assert_eq!(guard.pos, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_guard_holds_when_player_spotted() {
        let controls = Controls::default();
        let mut guard = guard_at(Vec2::ZERO, FRAC_PI_2);
        guard.update(&view(Vec2::new(0.0, 30.0), &controls), 500.0);
        assert_eq!(guard.pos, Vec2::ZERO);
        assert_eq!(guard.direction, FRAC_PI_2);
    }

    #[test]
    fn test_guard_on_player_does_nothing() {
        let controls = Controls::default();
        let mut guard = guard_at(Vec2::new(7.0, 7.0), 1.0);
        guard.update(&view(Vec2::new(7.0, 7.0), &controls), 250.0);
        assert_eq!(guard.pos, Vec2::new(7.0, 7.0));
        assert_eq!(guard.direction, 1.0);
        assert_eq!(guard.last, 250.0);
    }

    #[test]
    fn test_wanderer_bounces_off_right_edge() {
        let controls = Controls::default();
        let mut guard = Character::wanderer(Vec2::new(315.0, 100.0), 10.0, Vec2::new(0.1, 0.0), 0.0, 0.0);
        guard.update(&view(Vec2::ZERO, &controls), 100.0);

        assert_eq!(guard.pos.x, 320.0);
        assert_eq!(guard.role, Role::Guard { velocity: Vec2::new(-0.1, 0.0) });
        assert!((guard.direction - PI).abs() < 1e-6);

        // Heads back inside on the next tick
        guard.update(&view(Vec2::ZERO, &controls), 200.0);
        assert!((guard.pos.x - 310.0).abs() < 1e-4);
    }

    #[test]
    fn test_wanderer_outside_shrunk_bounds_holds_at_zero_dt() {
        let controls = Controls::default();
        let mut guard = Character::wanderer(Vec2::new(300.0, 100.0), 10.0, Vec2::new(0.05, 0.0), 0.0, 0.0);
        let shrunk = UpdateView {
            bounds: Vec2::new(200.0, 200.0),
            player: Vec2::ZERO,
            controls: &controls,
        };
        guard.update(&shrunk, 0.0);
        assert_eq!(guard.pos, Vec2::new(300.0, 100.0));
        assert_eq!(guard.direction, 0.0);
        assert_eq!(guard.role, Role::Guard { velocity: Vec2::new(0.05, 0.0) });

        // Once time passes it bounces back inside
        guard.update(&shrunk, 10.0);
        assert_eq!(guard.pos.x, 200.0);
        assert_eq!(guard.role, Role::Guard { velocity: Vec2::new(-0.05, 0.0) });
    }

    #[test]
    fn test_reflect_clamps_both_axes() {
        let mut pos = Vec2::new(1.0, 2.0);
        let mut vel = Vec2::new(-0.1, -0.1);
        assert!(reflect(&mut pos, &mut vel, 50.0, Vec2::new(100.0, 100.0)));
        assert_eq!(pos, Vec2::ZERO);
        assert_eq!(vel, Vec2::new(0.1, 0.1));
    }

    #[test]
    fn test_player_keyboard_walk_and_turn() {
        let mut controls = Controls::default();
        controls.key_down(Key::Up);
        let mut player = Character::player(Vec2::ZERO, 10.0, &Settings::default(), 0.0);
        player.update(&view(Vec2::ZERO, &controls), 100.0);
        assert!((player.pos.x - 25.0).abs() < 1e-4);

        controls.key_up(Key::Up);
        controls.key_down(Key::Down);
        player.update(&view(Vec2::ZERO, &controls), 200.0);
        assert!((player.pos.x - (25.0 - 25.0 * 0.75)).abs() < 1e-4);

        controls.key_up(Key::Down);
        controls.key_down(Key::Right);
        player.update(&view(Vec2::ZERO, &controls), 300.0);
        assert!((player.direction - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_player_opposing_keys_cancel() {
        let mut controls = Controls::default();
        for key in [Key::Up, Key::Down, Key::Left, Key::Right] {
            controls.key_down(key);
        }
        let mut player = Character::player(Vec2::new(3.0, 4.0), 10.0, &Settings::default(), 0.0);
        player.update(&view(Vec2::ZERO, &controls), 1000.0);
        assert_eq!(player.pos, Vec2::new(3.0, 4.0));
        assert_eq!(player.direction, 0.0);
    }

    #[test]
    fn test_player_follows_arrow() {
        let mut controls = Controls::default();
        controls.arrow = Some(Vec2::X);
        let mut player = Character::player(Vec2::ZERO, 10.0, &Settings::default(), 0.0);
        player.update(&view(Vec2::ZERO, &controls), 40.0);
        assert!((player.pos.x - 10.0).abs() < 1e-4);

        // Arrow pointing up: turn first, stay put
        controls.arrow = Some(Vec2::Y);
        player.update(&view(Vec2::ZERO, &controls), 80.0);
        assert!((player.pos.x - 10.0).abs() < 1e-4);
        assert!(player.direction > 0.0);
    }

    #[test]
    fn test_blink_window() {
        let appearance = Appearance {
            body: String::new(),
            head: String::new(),
            eyes: String::new(),
            blink: Some(Blink {
                freq: 1000.0,
                length: 100.0,
                phase: 0.0,
            }),
        };
        assert!(!appearance.eyes_open(0.0));
        assert!(!appearance.eyes_open(50.0));
        assert!(!appearance.eyes_open(1100.0));
        assert!(appearance.eyes_open(101.0));
        assert!(appearance.eyes_open(999.0));
    }

    #[test]
    fn test_no_blink_keeps_eyes_open() {
        let mut appearance = Appearance {
            body: String::new(),
            head: String::new(),
            eyes: String::new(),
            blink: None,
        };
        assert!(appearance.eyes_open(0.0));
        appearance.blink = Some(Blink {
            freq: 0.0,
            length: 100.0,
            phase: 0.0,
        });
        assert!(appearance.eyes_open(50.0));
    }

    proptest! {
        #[test]
        fn zero_dt_changes_nothing(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            direction in -20.0f32..20.0,
            px in -500.0f32..500.0,
            py in -500.0f32..500.0,
            keys in proptest::collection::vec(0usize..4, 0..4),
        ) {
            let mut controls = Controls::default();
            for k in keys {
                controls.key_down([Key::Left, Key::Up, Key::Right, Key::Down][k]);
            }
            let settings = Settings::default();
            let cast = [
                Character::player(Vec2::new(x, y), 10.0, &settings, 42.0),
                Character::guard(Vec2::new(x, y), 10.0, direction, 0.0, &settings, 42.0),
                Character::wanderer(
                    Vec2::new(x.abs() % 320.0, y.abs() % 320.0),
                    10.0,
                    Vec2::new(0.05, -0.05),
                    0.0,
                    42.0,
                ),
            ];
            for mut c in cast {
                let before = (c.pos, c.direction);
                c.update(&view(Vec2::new(px, py), &controls), 42.0);
                prop_assert_eq!(before, (c.pos, c.direction));
            }
        }
    }
}
