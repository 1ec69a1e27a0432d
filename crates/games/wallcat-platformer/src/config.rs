use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Edge length of a map cell in pixels.
pub const CELL_SIZE: i32 = 50;
/// Added to vertical velocity every tick (px/tick^2, downward).
pub const GRAVITY: i32 = 1;
/// Vertical velocity set by a jump (negative is up).
pub const JUMP_IMPULSE: i32 = -23;
/// Horizontal kick magnitude imparted by a wall-jump.
pub const WALL_KICK: i32 = 12;
/// Distance moved per vertical unit step. Probes still test a full pixel.
pub const VERTICAL_STEP: f32 = 0.75;
/// Distance moved per unit of kick velocity.
pub const KICK_STEP: f32 = 2.0;
/// Half width of the collision footprint.
pub const PROBE_HALF_WIDTH: f32 = 10.0;
/// Height of the collision footprint above the feet.
pub const PROBE_HEIGHT: f32 = 45.0;
/// Horizontal speed for a held direction key (px/tick).
pub const MOVE_SPEED: i32 = 7;
/// Dust puffs spawned per wall contact.
pub const DUST_PER_CONTACT: usize = 4;
/// Axis-aligned reach of the gem pickup check.
pub const PICKUP_REACH: f32 = 50.0;
/// One in this many pickups plays the rare cue.
pub const RARE_PICKUP_ODDS: u32 = 6;
/// Ticks on the wall before the scrape cue may fire again.
pub const SCRAPE_COOLDOWN: u32 = 26;
/// Cooldown value restored while off the wall, so the first contact fires at once.
pub const SCRAPE_COOLDOWN_RESET: u32 = 32;
/// Simulated milliseconds per tick (~60 Hz).
pub const TICK_MILLIS: u64 = 16;

/// Player motion and collision tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: i32,
    /// Optional cap on downward velocity. Unset keeps uncapped acceleration.
    pub max_fall_speed: Option<i32>,
    pub jump_impulse: i32,
    pub wall_kick: i32,
    pub vertical_step: f32,
    pub kick_step: f32,
    pub probe_half_width: f32,
    pub probe_height: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            max_fall_speed: None,
            jump_impulse: JUMP_IMPULSE,
            wall_kick: WALL_KICK,
            vertical_step: VERTICAL_STEP,
            kick_step: KICK_STEP,
            probe_half_width: PROBE_HALF_WIDTH,
            probe_height: PROBE_HEIGHT,
        }
    }
}

/// Wall-contact dust tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DustConfig {
    pub per_contact: usize,
    pub min_life: i32,
    pub max_life: i32,
}

impl Default for DustConfig {
    fn default() -> Self {
        Self {
            per_contact: DUST_PER_CONTACT,
            min_life: 1,
            max_life: 100,
        }
    }
}

impl DustConfig {
    /// Initial life range, repaired so it is never empty and never below 1.
    pub fn life_range(&self) -> RangeInclusive<i32> {
        let lo = self.min_life.max(1);
        lo..=self.max_life.max(lo)
    }
}

/// Viewport the camera scrolls across the map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            viewport_width: 640.0,
            viewport_height: 480.0,
        }
    }
}

/// Top-level platformer configuration, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlatformerConfig {
    pub physics: PhysicsConfig,
    pub dust: DustConfig,
    pub camera: CameraConfig,
    pub cell_size: i32,
    /// Speed of a held walk key. Hosts turn direction keys into `move_x` with it.
    pub move_speed: i32,
    pub pickup_reach: f32,
    pub rare_pickup_odds: u32,
    pub scrape_cooldown: u32,
    pub scrape_cooldown_reset: u32,
    pub tick_millis: u64,
    pub spawn_x: f32,
    pub spawn_y: f32,
    /// Seed for the session's random generator (dust, gem phases, pickup cues).
    pub seed: u64,
}

impl Default for PlatformerConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            dust: DustConfig::default(),
            camera: CameraConfig::default(),
            cell_size: CELL_SIZE,
            move_speed: MOVE_SPEED,
            pickup_reach: PICKUP_REACH,
            rare_pickup_odds: RARE_PICKUP_ODDS,
            scrape_cooldown: SCRAPE_COOLDOWN,
            scrape_cooldown_reset: SCRAPE_COOLDOWN_RESET,
            tick_millis: TICK_MILLIS,
            spawn_x: 100.0,
            spawn_y: 100.0,
            seed: 42,
        }
    }
}

impl PlatformerConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path =
            std::env::var("WALLCAT_CONFIG").unwrap_or_else(|_| "config/wallcat.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    PlatformerConfig::default()
                },
            },
            Err(_) => PlatformerConfig::default(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
