pub mod camera;
pub mod config;
pub mod gems;
pub mod level;
pub mod particles;
pub mod physics;
pub mod tilemap;

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use wallcat_core::events::GameEvent;
use wallcat_core::game_trait::{FrameInput, Simulation};
use wallcat_core::simulation_boilerplate;

use camera::{Scroll, clamp_scroll};
use config::PlatformerConfig;
use gems::{Gem, collect_gems};
use level::{LevelData, LevelError, load_level_file, parse_level};
use physics::{AnimState, Facing, KickStatus, PlayerState};
use tilemap::TileMap;

/// What the renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub player: PlayerView,
    pub particles: Vec<ParticleView>,
    pub gems: Vec<GemView>,
    pub scroll: Scroll,
    pub clock_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub facing: Facing,
    pub anim: AnimState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub alpha: u8,
    pub color: [u8; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GemView {
    pub x: f32,
    pub y: f32,
    /// Degrees.
    pub rotation: f32,
}

/// One playable level: the map, the player, the remaining gems and the
/// session's random generator.
pub struct Level {
    config: PlatformerConfig,
    map: TileMap,
    player: PlayerState,
    gems: Vec<Gem>,
    rng: StdRng,
    scroll: Scroll,
    clock_ms: u64,
    paused: bool,
    /// Set once the last gem is collected. The session keeps running after.
    complete: bool,
    fell_out: bool,
}

impl Level {
    pub fn new(map: TileMap, gems: Vec<Gem>, config: PlatformerConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(LevelData { map, gems }, config, rng)
    }

    /// Parse a level from its text grid.
    pub fn from_text(text: &str, config: PlatformerConfig) -> Result<Self, LevelError> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let data = parse_level(text, config.cell_size, 0, &mut rng)?;
        Ok(Self::with_rng(data, config, rng))
    }

    /// Load a level file from disk.
    pub fn load(path: impl AsRef<Path>, config: PlatformerConfig) -> Result<Self, LevelError> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let data = load_level_file(path, config.cell_size, 0, &mut rng)?;
        Ok(Self::with_rng(data, config, rng))
    }

    fn with_rng(data: LevelData, config: PlatformerConfig, rng: StdRng) -> Self {
        let player = PlayerState::new(config.spawn_x, config.spawn_y);
        let scroll = clamp_scroll(player.x, player.y, &data.map, &config.camera);
        tracing::debug!(
            width = data.map.width,
            height = data.map.height,
            gems = data.gems.len(),
            "Level ready"
        );
        Self {
            config,
            map: data.map,
            player,
            gems: data.gems,
            rng,
            scroll,
            clock_ms: 0,
            paused: false,
            complete: false,
            fell_out: false,
        }
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn gems(&self) -> &[Gem] {
        &self.gems
    }

    pub fn scroll(&self) -> Scroll {
        self.scroll
    }

    pub fn config(&self) -> &PlatformerConfig {
        &self.config
    }

    /// Run one tick: jump edge, player physics, gem pickup, camera.
    pub fn step(&mut self, input: FrameInput) -> Vec<GameEvent> {
        if self.paused {
            return Vec::new();
        }
        let mut events = Vec::new();

        // A single tick never moves more than one cell sideways.
        let max_step = self.map.cell_size;
        let move_x = input.move_x.clamp(-max_step, max_step);

        if input.jump
            && let Some(cue) = self.player.try_jump(&self.map, &self.config.physics)
        {
            events.push(GameEvent::Cue(cue));
        }

        let report = self
            .player
            .update(move_x, &self.map, &self.config, &mut self.rng);
        events.extend(report.cues.into_iter().map(GameEvent::Cue));
        if report.kick == KickStatus::Blocked {
            tracing::trace!(x = self.player.x, "Wall-jump kick blocked");
        }

        let cues = collect_gems(
            &mut self.gems,
            self.player.x,
            self.player.y,
            self.config.pickup_reach,
            self.config.rare_pickup_odds,
            &mut self.rng,
        );
        let mut remaining = self.gems.len() + cues.len();
        let collected_any = !cues.is_empty();
        for cue in cues {
            remaining -= 1;
            events.push(GameEvent::Cue(cue));
            events.push(GameEvent::GemCollected { remaining });
        }
        if collected_any && self.gems.is_empty() {
            self.complete = true;
            tracing::info!(clock_ms = self.clock_ms, "All gems collected");
            events.push(GameEvent::LevelCleared);
        }

        let below_map =
            self.player.y - self.config.physics.probe_height > self.map.pixel_height();
        if below_map && !self.fell_out {
            self.fell_out = true;
            tracing::warn!(x = self.player.x, y = self.player.y, "Player fell out of the map");
            events.push(GameEvent::FellOut);
        }

        self.scroll = clamp_scroll(
            self.player.x,
            self.player.y,
            &self.map,
            &self.config.camera,
        );
        self.clock_ms += self.config.tick_millis;

        events
    }
}

impl Simulation for Level {
    type Frame = FrameView;

    fn tick_rate(&self) -> f32 {
        1000.0 / self.config.tick_millis.max(1) as f32
    }

    fn update(&mut self, input: FrameInput) -> Vec<GameEvent> {
        self.step(input)
    }

    fn frame(&self) -> FrameView {
        FrameView {
            player: PlayerView {
                x: self.player.x,
                y: self.player.y,
                facing: self.player.facing,
                anim: self.player.anim,
            },
            particles: self
                .player
                .particles
                .iter()
                .filter(|p| p.is_visible())
                .map(|p| ParticleView {
                    x: p.x,
                    y: p.y,
                    alpha: p.alpha(),
                    color: particles::DUST_COLOR,
                })
                .collect(),
            gems: self
                .gems
                .iter()
                .map(|g| GemView {
                    x: g.x,
                    y: g.y,
                    rotation: g.rotation(self.clock_ms),
                })
                .collect(),
            scroll: self.scroll,
            clock_ms: self.clock_ms,
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.clock_ms
    }

    simulation_boilerplate!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use physics::WallSide;
    use wallcat_core::events::AudioCue;
    use wallcat_core::test_helpers::{run_idle, run_ticks};

    /// 16x8 level: floor on the bottom row, a tall wall at column 6 and two
    /// gems far from the spawn point.
    const LEVEL: &str = "\
................
...........x....
......B.........
......B.........
......B.........
......B.........
......B......x..
################
";

    fn level() -> Level {
        Level::from_text(LEVEL, PlatformerConfig::default()).unwrap()
    }

    fn right() -> FrameInput {
        FrameInput {
            move_x: 7,
            jump: false,
        }
    }

    fn jump() -> FrameInput {
        FrameInput {
            move_x: 0,
            jump: true,
        }
    }

    #[test]
    fn spawns_at_configured_point() {
        let level = level();
        assert_eq!((level.player().x, level.player().y), (100.0, 100.0));
        assert_eq!(level.gems().len(), 2);
        assert_eq!(level.scroll(), Scroll::default());
    }

    #[test]
    fn prebuilt_map_and_gems() {
        let mut map = TileMap::new(8, 4, 50);
        for x in 0..8 {
            map.set_tile(x, 3, tilemap::Tile::Grass);
        }
        let gems = vec![Gem {
            x: 325.0,
            y: 125.0,
            spawn_ms: 0,
            phase_delay: 3,
        }];
        let mut level = Level::new(map, gems, PlatformerConfig::default());
        let events = run_ticks(&mut level, 40, right());
        assert!(events.contains(&GameEvent::LevelCleared));
        assert!(level.is_complete());
    }

    #[test]
    fn player_lands_on_floor() {
        let mut level = level();
        run_idle(&mut level, 200);
        let player = level.player();
        assert_eq!(player.vy, 0);
        assert_eq!(player.x, 100.0);
        assert!(player.is_grounded(level.map(), &level.config().physics));
        assert!(player.y < 350.0 && player.y >= 349.0);
    }

    #[test]
    fn jump_emits_alternating_cues() {
        let mut level = level();
        run_idle(&mut level, 200);

        let first = level.step(jump());
        assert!(first.contains(&GameEvent::Cue(AudioCue::JumpA)));
        run_idle(&mut level, 200);
        let second = level.step(jump());
        assert!(second.contains(&GameEvent::Cue(AudioCue::JumpB)));
    }

    #[test]
    fn jump_in_mid_air_does_nothing() {
        let mut level = level();
        let events = level.step(jump());
        assert!(events.is_empty());
    }

    #[test]
    fn running_into_wall_while_falling_clings() {
        let mut level = level();
        run_idle(&mut level, 200);

        // Jump, then hold right into the wall at column 6 (x 300..350).
        level.step(FrameInput {
            move_x: 7,
            jump: true,
        });
        let mut clung = false;
        let mut scrape = false;
        for _ in 0..60 {
            let events = level.step(right());
            scrape |= events.contains(&GameEvent::Cue(AudioCue::WallScrape));
            if level.player().wall == WallSide::Right {
                clung = true;
                break;
            }
        }
        assert!(clung, "player should catch the wall");
        assert!(scrape, "first wall contact plays the scrape cue");
        assert!(level.player().x + 10.0 < 300.0);
    }

    #[test]
    fn wall_jump_pushes_back() {
        let mut level = level();
        run_idle(&mut level, 200);
        level.step(FrameInput {
            move_x: 7,
            jump: true,
        });
        for _ in 0..60 {
            level.step(right());
            if level.player().wall == WallSide::Right {
                break;
            }
        }
        assert_eq!(level.player().wall, WallSide::Right);
        let x_at_wall = level.player().x;

        let events = level.step(jump());
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::Cue(AudioCue::JumpA | AudioCue::JumpB)))
        );
        assert_eq!(level.player().kick, 11);
        assert!(level.player().x < x_at_wall);
    }

    #[test]
    fn collecting_every_gem_clears_level() {
        let mut level = level();
        // Teleport next to each gem; pickup is a pure proximity test.
        level.player.x = 560.0;
        level.player.y = 80.0;
        let events = level.step(FrameInput::default());
        assert!(events.contains(&GameEvent::GemCollected { remaining: 1 }));
        assert!(!level.is_complete());

        level.player.x = 670.0;
        level.player.y = 340.0;
        let events = level.step(FrameInput::default());
        assert!(events.contains(&GameEvent::GemCollected { remaining: 0 }));
        assert!(events.contains(&GameEvent::LevelCleared));
        let pickups = events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    GameEvent::Cue(AudioCue::PickupCommon | AudioCue::PickupRare)
                )
            })
            .count();
        assert_eq!(pickups, 1);
        assert!(level.is_complete());

        // A cleared level keeps running; it only stops reporting the clear.
        let clock = level.elapsed_ms();
        let x = level.player().x;
        let events = level.step(right());
        assert!(!events.contains(&GameEvent::LevelCleared));
        assert!(level.is_complete());
        assert_eq!(level.elapsed_ms(), clock + 16);
        assert!(level.player().x > x);
    }

    #[test]
    fn falling_out_reported_once() {
        let mut level = Level::from_text("x...\n....\n....", PlatformerConfig::default()).unwrap();
        let events = run_idle(&mut level, 400);
        let falls = events
            .iter()
            .filter(|e| matches!(e, GameEvent::FellOut))
            .count();
        assert_eq!(falls, 1);
    }

    #[test]
    fn oversized_input_is_clamped() {
        let mut level = level();
        run_idle(&mut level, 200);
        let x = level.player().x;
        level.step(FrameInput {
            move_x: i32::MAX,
            jump: false,
        });
        assert_eq!(level.player().x, x + 50.0);
    }

    #[test]
    fn same_seed_same_run() {
        let script: Vec<FrameInput> = (0..300)
            .map(|i| FrameInput {
                move_x: if i % 90 < 60 { 7 } else { -7 },
                jump: i % 25 == 0,
            })
            .collect();

        let mut a = level();
        let mut b = level();
        for &input in &script {
            assert_eq!(a.step(input), b.step(input));
        }
        assert_eq!(a.frame(), b.frame());
    }

    #[test]
    fn frame_reports_visible_dust_and_gems() {
        let mut level = level();
        level.player.particles.push(particles::DustParticle::new(1.0, 2.0, 40));
        level.player.particles.push(particles::DustParticle::new(1.0, 2.0, 2));
        let frame = level.frame();
        assert_eq!(frame.gems.len(), 2);
        assert_eq!(frame.particles.len(), 2);
        assert_eq!(frame.particles[0].alpha, 40);
        assert_eq!(frame.particles[0].color, particles::DUST_COLOR);

        level.step(FrameInput::default());
        let frame = level.frame();
        assert_eq!(frame.particles.len(), 1, "life 1 dust is not drawn");
    }

    #[test]
    fn frame_serializes_for_renderers() {
        let level = level();
        let json = serde_json::to_value(level.frame()).unwrap();
        assert_eq!(json["player"]["facing"], "Left");
        assert_eq!(json["scroll"]["x"], 0.0);
        assert!(json["gems"].as_array().is_some_and(|g| g.len() == 2));
    }

    #[test]
    fn walking_runs_clock_and_scroll() {
        let mut level = Level::from_text(
            &format!("{0}\n{0}\n{1}", ".".repeat(40), "#".repeat(40)),
            PlatformerConfig {
                spawn_y: 60.0,
                ..PlatformerConfig::default()
            },
        )
        .unwrap();
        run_ticks(&mut level, 100, right());
        assert_eq!(level.elapsed_ms(), 1600);
        assert!(level.scroll().x > 0.0);
        assert_eq!(level.scroll().y, 0.0);
    }

    // ================================================================
    // Simulation Contract Tests
    // ================================================================

    #[test]
    fn contract_update_advances_clock() {
        let mut level = level();
        wallcat_core::test_helpers::contract_update_advances_clock(&mut level);
    }

    #[test]
    fn contract_pause_stops_updates() {
        let mut level = level();
        wallcat_core::test_helpers::contract_pause_stops_updates(&mut level);
    }

    #[test]
    fn contract_clock_monotonic() {
        let mut level = level();
        wallcat_core::test_helpers::contract_clock_monotonic(&mut level);
    }

    #[test]
    fn tick_rate_is_about_60() {
        let level = level();
        assert_eq!(level.tick_rate(), 62.5);
    }
}
