//! World state: the cast, camera, and input state for one session
//!
//! Created once per game session and passed explicitly to the simulation
//! step and the renderer.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::character::Character;
use crate::Settings;
use crate::consts::{GUARD_SIZE, PLAYER_SIZE, ZOOM_MAX, ZOOM_MIN};
use crate::controls::{Controls, Gesture};
use crate::platform::input::{Key, PointerEvent};

/// Size of the drawing surface in display pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.size() / 2.0
    }

    #[inline]
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }
}

/// Camera zoom (pixels per world unit), always within [zoom_min, zoom_max]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    zoom: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    /// Multiplier per wheel notch
    pub wheel_step: f32,
}

impl Camera {
    pub fn new(zoom: f32, zoom_min: f32, zoom_max: f32, wheel_step: f32) -> Self {
        // clamp() panics on inverted or NaN bounds
        let (zoom_min, zoom_max) = match (zoom_min.is_finite(), zoom_max.is_finite()) {
            (true, true) if zoom_min <= zoom_max => (zoom_min, zoom_max),
            (true, true) => (zoom_max, zoom_min),
            _ => (ZOOM_MIN, ZOOM_MAX),
        };
        let mut camera = Self {
            zoom: zoom_min,
            zoom_min,
            zoom_max,
            wheel_step,
        };
        camera.set_zoom(zoom);
        camera
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.zoom_min, self.zoom_max);
        }
    }

    /// Zoom in for negative wheel deltas, out for positive ones
    pub fn wheel(&mut self, delta_y: f32) {
        if delta_y < 0.0 {
            self.set_zoom(self.zoom * self.wheel_step);
        } else if delta_y > 0.0 {
            self.set_zoom(self.zoom / self.wheel_step);
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct World {
    pub viewport: Viewport,
    pub camera: Camera,
    /// Draw and update order
    pub characters: Vec<Character>,
    /// Index of the player in `characters`
    pub(super) player: usize,
    pub controls: Controls,
    pub gesture: Gesture,
    /// Timestamp (ms) of the previous simulated frame
    pub last_simulated: f64,
    /// Gaps at least this long (ms) are not simulated
    pub stale_frame_ms: f64,
}

impl World {
    /// Set up the scene: guards first, the player last so it draws on top
    pub fn new(viewport: Viewport, settings: &Settings, now: f64) -> Self {
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let mut characters = Vec::with_capacity(4);

        characters.push(Character::guard(
            Vec2::new(25.0, 25.0),
            GUARD_SIZE,
            0.0,
            rng.random_range(0.0..3000.0),
            settings,
            now,
        ));
        characters.push(Character::guard(
            Vec2::new(225.0, 225.0),
            GUARD_SIZE,
            std::f32::consts::PI,
            rng.random_range(0.0..3000.0),
            settings,
            now,
        ));

        let dx = if rng.random_bool(0.5) {
            settings.wander_speed
        } else {
            -settings.wander_speed
        };
        characters.push(Character::wanderer(
            Vec2::new(viewport.width * 0.75, viewport.height * 0.25),
            GUARD_SIZE,
            Vec2::new(dx, 0.0),
            rng.random_range(0.0..3000.0),
            now,
        ));

        characters.push(Character::player(
            viewport.center(),
            PLAYER_SIZE,
            settings,
            now,
        ));

        log::info!(
            "Scene ready: {} characters, seed {}",
            characters.len(),
            settings.seed
        );

        let player = characters.len() - 1;
        Self::assemble(viewport, settings, characters, player, now)
    }

    /// Build a world around an explicit cast; the first player in the
    /// list is the one the camera follows and the controls steer.
    ///
    /// Without a player the camera follows the first character. Returns
    /// `None` for an empty cast.
    pub fn with_characters(
        viewport: Viewport,
        settings: &Settings,
        characters: Vec<Character>,
        now: f64,
    ) -> Option<Self> {
        if characters.is_empty() {
            log::warn!("Refusing to build a world with no characters");
            return None;
        }
        let player = characters.iter().position(Character::is_player).unwrap_or(0);
        Some(Self::assemble(viewport, settings, characters, player, now))
    }

    fn assemble(
        viewport: Viewport,
        settings: &Settings,
        characters: Vec<Character>,
        player: usize,
        now: f64,
    ) -> Self {
        Self {
            viewport,
            camera: Camera::new(
                settings.zoom,
                settings.zoom_min,
                settings.zoom_max,
                settings.wheel_step,
            ),
            characters,
            player,
            controls: Controls::default(),
            gesture: Gesture::default(),
            last_simulated: now,
            stale_frame_ms: settings.stale_frame_ms,
        }
    }

    pub fn player(&self) -> &Character {
        &self.characters[self.player]
    }

    pub fn player_mut(&mut self) -> &mut Character {
        &mut self.characters[self.player]
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        log::debug!("Viewport resized to {}x{}", width, height);
    }

    pub fn key_down(&mut self, key: Key) {
        self.controls.key_down(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.controls.key_up(key);
    }

    pub fn pointer_down(&mut self, event: &PointerEvent) {
        self.gesture.pointer_down(event, &self.camera);
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) {
        self.gesture.pointer_move(event, &mut self.camera);
    }

    /// Pointer released or left the surface
    pub fn pointer_up(&mut self, event: &PointerEvent) {
        self.gesture
            .pointer_up(event, self.viewport, &mut self.controls);
    }

    pub fn wheel(&mut self, delta_y: f32) {
        self.camera.wheel(delta_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_setup() {
        let world = World::new(Viewport::new(320.0, 320.0), &Settings::default(), 0.0);
        assert_eq!(world.characters.len(), 4);
        assert!(world.player().is_player());
        assert_eq!(world.player().pos, Vec2::new(160.0, 160.0));
        assert_eq!(world.characters.iter().filter(|c| c.vision.is_some()).count(), 2);
        assert!(world.characters.iter().all(|c| c.last == 0.0));
    }

    #[test]
    fn test_scene_is_reproducible_from_seed() {
        let settings = Settings::default();
        let a = World::new(Viewport::new(320.0, 320.0), &settings, 0.0);
        let b = World::new(Viewport::new(320.0, 320.0), &settings, 0.0);
        assert_eq!(a.characters, b.characters);
    }

    #[test]
    fn test_cast_must_not_be_empty() {
        let viewport = Viewport::new(320.0, 320.0);
        let settings = Settings::default();
        assert!(World::with_characters(viewport, &settings, Vec::new(), 0.0).is_none());

        // A cast of guards only still has someone for the camera to follow
        let guard = Character::guard(Vec2::new(25.0, 25.0), 10.0, 0.0, 0.0, &settings, 0.0);
        let world = World::with_characters(viewport, &settings, vec![guard], 0.0).unwrap();
        assert_eq!(world.player().pos, Vec2::new(25.0, 25.0));
    }

    #[test]
    fn test_camera_clamps_zoom() {
        let mut camera = Camera::new(100.0, 0.5, 4.0, 2.0);
        assert_eq!(camera.zoom(), 4.0);
        camera.wheel(1.0);
        assert_eq!(camera.zoom(), 2.0);
        camera.wheel(1.0);
        camera.wheel(1.0);
        camera.wheel(1.0);
        assert_eq!(camera.zoom(), 0.5);
        camera.wheel(0.0);
        assert_eq!(camera.zoom(), 0.5);
        camera.wheel(-3.0);
        assert_eq!(camera.zoom(), 1.0);
        camera.set_zoom(f32::NAN);
        assert_eq!(camera.zoom(), 1.0);
    }

    #[test]
    fn test_wheel_goes_through_world() {
        let mut world = World::new(Viewport::new(320.0, 320.0), &Settings::default(), 0.0);
        let before = world.camera.zoom();
        world.wheel(-1.0);
        assert!(world.camera.zoom() > before);
    }
}
