//! Game settings and tuning
//!
//! Read at startup from a JSON object in LocalStorage; URL query parameters
//! override single fields for quick experiments (`?zoom=2&guard_speed=0.2`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::*;

/// Tuning values for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Player ===
    /// Walking speed (distance per ms)
    pub player_speed: f32,
    /// Turn rate (radians per ms)
    pub player_rotation: f32,
    /// Backing-up speed as a fraction of walking speed
    pub reverse_factor: f32,

    // === Guards ===
    pub guard_speed: f32,
    pub guard_rotation: f32,
    /// Vision reach as a multiple of guard size
    pub vision_range: f32,
    /// Vision half-angle (radians)
    pub vision_arc: f32,
    /// Per-axis speed of guards without vision
    pub wander_speed: f32,

    // === Camera ===
    pub zoom: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub wheel_step: f32,

    // === Loop ===
    pub stale_frame_ms: f64,
    pub heartbeat_ms: f64,

    /// Scene RNG seed
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            player_rotation: PLAYER_ROTATION,
            reverse_factor: PLAYER_REVERSE_FACTOR,

            guard_speed: GUARD_SPEED,
            guard_rotation: GUARD_ROTATION,
            vision_range: GUARD_VISION_RANGE,
            vision_arc: GUARD_VISION_ARC,
            wander_speed: WANDER_SPEED,

            zoom: ZOOM_DEFAULT,
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            wheel_step: ZOOM_WHEEL_STEP,

            stale_frame_ms: STALE_FRAME_MS,
            heartbeat_ms: HEARTBEAT_MS,

            seed: 2016,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "whiplash_settings";

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                None
            }
        }
    }

    /// Override fields from a URL query string (`?key=value&...`).
    ///
    /// Each pair is checked on its own: unknown keys, values of the wrong
    /// type and values out of range for their field (`seed=-1`) are skipped
    /// without touching the other overrides.
    pub fn apply_query(&mut self, query: &str) {
        let Ok(Value::Object(mut fields)) = serde_json::to_value(&*self) else {
            return;
        };

        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, raw)) = pair.split_once('=') else {
                continue;
            };
            let Some(slot) = fields.get_mut(key) else {
                log::debug!("Unknown query parameter: {}", key);
                continue;
            };
            let value = match serde_json::from_str::<Value>(raw) {
                Ok(value)
                    if matches!(
                        (&*slot, &value),
                        (Value::Number(_), Value::Number(_)) | (Value::Bool(_), Value::Bool(_))
                    ) =>
                {
                    value
                }
                _ => {
                    log::warn!("Ignoring malformed query parameter {}={}", key, raw);
                    continue;
                }
            };

            let previous = std::mem::replace(slot, value);
            match serde_json::from_value::<Self>(Value::Object(fields.clone())) {
                Ok(settings) => *self = settings,
                Err(e) => {
                    log::warn!("Ignoring query parameter {}={}: {}", key, raw, e);
                    fields.insert(key.to_string(), previous);
                }
            }
        }
    }

    /// Load settings from LocalStorage, then apply the page's query string (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let window = web_sys::window();
        let storage = window
            .as_ref()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let mut settings = storage
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten())
            .and_then(|json| Self::from_json(&json))
            .unwrap_or_else(|| {
                log::info!("Using default settings");
                Self::default()
            });

        if let Some(query) = window.and_then(|w| w.location().search().ok()) {
            settings.apply_query(&query);
        }
        settings
    }

    /// Native builds have no storage or query string
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
