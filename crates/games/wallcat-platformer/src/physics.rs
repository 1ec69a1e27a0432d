use rand::Rng;
use serde::{Deserialize, Serialize};

use wallcat_core::events::AudioCue;

use crate::config::{DustConfig, PhysicsConfig, PlatformerConfig};
use crate::particles::DustParticle;
use crate::tilemap::TileMap;

/// Horizontal jitter range for dust spawned on wall contact.
const DUST_JITTER: u32 = 10;
/// Dust offset from the player for a wall on the right.
const RIGHT_WALL_DUST: (f32, f32) = (-15.0, -10.0);
/// Dust offset from the player for a wall on the left.
const LEFT_WALL_DUST: (f32, f32) = (-5.0, -14.0);
/// Blink frame shows once per this many 175 ms slots.
const BLINK_FRAME_MS: u64 = 175;
const BLINK_CYCLE: u64 = 8;
const WALK_FRAME_MS: u64 = 140;

/// Which side the player is clinging to, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSide {
    #[default]
    None,
    Left,
    Right,
}

impl WallSide {
    /// -1 for left, +1 for right, 0 when off the wall.
    pub fn sign(self) -> i32 {
        match self {
            WallSide::None => 0,
            WallSide::Left => -1,
            WallSide::Right => 1,
        }
    }

    pub fn is_touching(self) -> bool {
        self != WallSide::None
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

/// Sprite the renderer should show this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimState {
    Standing,
    Blink,
    Walk1,
    Walk2,
    Jump,
    WallClimb,
}

/// What the wall-jump kick did during a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KickStatus {
    /// No kick was active.
    #[default]
    Idle,
    /// Every kick step moved the player.
    Moving,
    /// At least one kick step was refused by a solid tile.
    Blocked,
    /// The kick decayed to zero this tick.
    Settled,
}

/// Side effects of one player tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub cues: Vec<AudioCue>,
    pub kick: KickStatus,
    pub dust_spawned: usize,
}

/// State of the player character.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerState {
    /// Feet position, horizontally centred.
    pub x: f32,
    pub y: f32,
    /// Vertical velocity in px/tick, positive is down.
    pub vy: i32,
    /// Residual horizontal velocity from a wall-jump.
    pub kick: i32,
    pub wall: WallSide,
    pub facing: Facing,
    pub anim: AnimState,
    pub particles: Vec<DustParticle>,
    next_jump_cue: AudioCue,
    scrape_cooldown: u32,
    anim_clock_ms: u64,
}

impl PlayerState {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            vy: 0,
            kick: 0,
            wall: WallSide::None,
            facing: Facing::Left,
            anim: AnimState::Standing,
            particles: Vec::new(),
            next_jump_cue: AudioCue::JumpA,
            scrape_cooldown: crate::config::SCRAPE_COOLDOWN_RESET,
            anim_clock_ms: 0,
        }
    }

    /// Cue the next successful jump will emit.
    pub fn next_jump_cue(&self) -> AudioCue {
        self.next_jump_cue
    }

    /// Could the player be placed at (x + dx, y + dy) without being stuck?
    ///
    /// Probes the four corners of the footprint: both sides at foot level and
    /// at head level.
    pub fn would_fit(&self, map: &TileMap, phys: &PhysicsConfig, dx: f32, dy: f32) -> bool {
        let left = self.x + dx - phys.probe_half_width;
        let right = self.x + dx + phys.probe_half_width;
        let feet = self.y + dy;
        let head = feet - phys.probe_height;
        !map.is_solid(left, feet)
            && !map.is_solid(right, feet)
            && !map.is_solid(left, head)
            && !map.is_solid(right, head)
    }

    /// Something solid directly below the feet.
    pub fn is_grounded(&self, map: &TileMap, phys: &PhysicsConfig) -> bool {
        !self.would_fit(map, phys, 0.0, 1.0)
    }

    /// Jump from the ground, or wall-jump away from the wall being clung to.
    ///
    /// Returns the jump cue when the jump happened.
    pub fn try_jump(&mut self, map: &TileMap, phys: &PhysicsConfig) -> Option<AudioCue> {
        if self.is_grounded(map, phys) {
            self.vy = phys.jump_impulse;
            self.wall = WallSide::None;
        } else if self.wall.is_touching() {
            self.vy = phys.jump_impulse;
            self.kick = phys.wall_kick * self.wall.sign();
            self.wall = WallSide::None;
        } else {
            return None;
        }
        let cue = self.next_jump_cue;
        self.next_jump_cue = cue.next_jump();
        Some(cue)
    }

    /// Advance the player one tick with the given horizontal intent.
    ///
    /// Gravity and vertical motion resolve before horizontal motion, since wall
    /// contact depends on this tick's vertical speed.
    pub fn update<R: Rng>(
        &mut self,
        move_x: i32,
        map: &TileMap,
        config: &PlatformerConfig,
        rng: &mut R,
    ) -> TickReport {
        let phys = &config.physics;
        let mut report = TickReport::default();

        self.vy += phys.gravity;
        if let Some(cap) = phys.max_fall_speed {
            self.vy = self.vy.min(cap);
        }

        self.integrate_vertical(map, phys);
        report.dust_spawned = self.integrate_horizontal(move_x, map, phys, &config.dust, rng);
        report.kick = self.decay_kick(map, phys);

        for p in &mut self.particles {
            p.update();
        }
        self.particles.retain(|p| !p.is_expired());

        self.anim_clock_ms += config.tick_millis;
        self.select_animation(move_x, map, phys);
        if let Some(cue) = self.tick_scrape_cooldown(config) {
            report.cues.push(cue);
        }

        report
    }

    fn integrate_vertical(&mut self, map: &TileMap, phys: &PhysicsConfig) {
        if self.vy > 0 {
            for _ in 0..self.vy {
                // Falling peels the player off any wall.
                self.wall = WallSide::None;
                if self.would_fit(map, phys, 0.0, 1.0) {
                    self.y += phys.vertical_step;
                } else {
                    self.vy = 0;
                    break;
                }
            }
        } else if self.vy < 0 {
            for _ in 0..self.vy.unsigned_abs() {
                if self.would_fit(map, phys, 0.0, -1.0) {
                    self.y -= phys.vertical_step;
                } else {
                    self.vy = 0;
                    break;
                }
            }
            self.wall = WallSide::None;
        }
    }

    /// Step sideways one pixel at a time. Returns the number of dust puffs
    /// spawned by a wall contact.
    fn integrate_horizontal<R: Rng>(
        &mut self,
        move_x: i32,
        map: &TileMap,
        phys: &PhysicsConfig,
        dust: &DustConfig,
        rng: &mut R,
    ) -> usize {
        // Clinging needs a fresh blocked step every tick.
        self.wall = WallSide::None;
        let (side, dx) = match move_x.signum() {
            1 => (WallSide::Right, 1.0),
            -1 => (WallSide::Left, -1.0),
            _ => return 0,
        };
        self.facing = if side == WallSide::Right {
            Facing::Right
        } else {
            Facing::Left
        };

        for _ in 0..move_x.unsigned_abs() {
            if self.would_fit(map, phys, dx, 0.0) {
                self.x += dx;
                continue;
            }
            if self.vy.abs() > 1 {
                self.vy /= 2;
                self.wall = side;
                return self.spawn_dust(side, dust, rng);
            }
            break;
        }
        0
    }

    fn spawn_dust<R: Rng>(&mut self, side: WallSide, dust: &DustConfig, rng: &mut R) -> usize {
        let life_range = dust.life_range();
        for _ in 0..dust.per_contact {
            let jitter = rng.random_range(0..DUST_JITTER) as f32;
            let life = rng.random_range(life_range.clone());
            let (x, y) = match side {
                WallSide::Left => (self.x + LEFT_WALL_DUST.0 - jitter, self.y + LEFT_WALL_DUST.1),
                _ => (
                    self.x + RIGHT_WALL_DUST.0 + jitter,
                    self.y + RIGHT_WALL_DUST.1,
                ),
            };
            self.particles.push(DustParticle::new(x, y, life));
        }
        dust.per_contact
    }

    /// Decay the wall-jump kick by one and push the player away from the wall
    /// with what remains.
    fn decay_kick(&mut self, map: &TileMap, phys: &PhysicsConfig) -> KickStatus {
        if self.kick == 0 {
            return KickStatus::Idle;
        }
        self.kick -= self.kick.signum();
        if self.kick == 0 {
            return KickStatus::Settled;
        }

        let dx = -(self.kick.signum() as f32) * phys.kick_step;
        for _ in 0..self.kick.unsigned_abs() {
            if !self.would_fit(map, phys, dx, 0.0) {
                return KickStatus::Blocked;
            }
            self.x += dx;
        }
        KickStatus::Moving
    }

    fn select_animation(&mut self, move_x: i32, map: &TileMap, phys: &PhysicsConfig) {
        let clock = self.anim_clock_ms;
        self.anim = if move_x == 0 {
            if (clock / BLINK_FRAME_MS) % BLINK_CYCLE == 0 {
                AnimState::Blink
            } else {
                AnimState::Standing
            }
        } else if (clock / WALK_FRAME_MS) % 2 == 0 {
            AnimState::Walk1
        } else {
            AnimState::Walk2
        };

        if self.vy != 0 || !self.is_grounded(map, phys) {
            self.anim = AnimState::Jump;
        }
        if self.wall.is_touching() {
            self.anim = AnimState::WallClimb;
        }
    }

    /// Rate-limit the wall-scrape cue while clinging to a wall.
    fn tick_scrape_cooldown(&mut self, config: &PlatformerConfig) -> Option<AudioCue> {
        if !self.wall.is_touching() {
            self.scrape_cooldown = config.scrape_cooldown_reset;
            return None;
        }
        if self.scrape_cooldown >= config.scrape_cooldown {
            self.scrape_cooldown = 0;
            Some(AudioCue::WallScrape)
        } else {
            self.scrape_cooldown += 1;
            None
        }
    }
}
