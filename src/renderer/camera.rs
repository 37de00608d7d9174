//! Camera transform: the player stays at the viewport center
//!
//! `screen = zoom * (world - player) + viewport / 2`

use glam::Vec2;

use super::surface::Surface;
use crate::sim::Viewport;

/// Where a world point lands on screen
#[inline]
pub fn world_to_screen(world: Vec2, player: Vec2, zoom: f32, viewport: Viewport) -> Vec2 {
    zoom * (world - player) + viewport.center()
}

/// Push the camera transform onto `surface`
pub fn apply(surface: &mut dyn Surface, player: Vec2, zoom: f32, viewport: Viewport) {
    let center = viewport.center();
    surface.translate(center.x, center.y);
    surface.scale(zoom, zoom);
    surface.translate(-player.x, -player.y);
}
