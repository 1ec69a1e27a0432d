use serde::{Deserialize, Serialize};

/// Brownish dust tint matching the earth tiles.
pub const DUST_COLOR: [u8; 3] = [175, 124, 60];

/// A puff of wall-scrape dust. Its alpha tracks the remaining life so it
/// fades out as it expires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DustParticle {
    pub x: f32,
    pub y: f32,
    life: i32,
    alpha: u8,
}

impl DustParticle {
    pub fn new(x: f32, y: f32, life: i32) -> Self {
        Self {
            x,
            y,
            life,
            alpha: fade_alpha(life),
        }
    }

    pub fn update(&mut self) {
        self.life -= 1;
        self.alpha = fade_alpha(self.life);
    }

    pub fn is_expired(&self) -> bool {
        self.life < 1
    }

    /// Remaining life in ticks.
    pub fn life(&self) -> i32 {
        self.life
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Whether the renderer should draw it at all.
    pub fn is_visible(&self) -> bool {
        self.life > 1
    }
}

fn fade_alpha(life: i32) -> u8 {
    life.clamp(0, u8::MAX as i32) as u8
}
