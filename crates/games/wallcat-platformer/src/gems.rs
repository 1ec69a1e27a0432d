use rand::Rng;
use serde::{Deserialize, Serialize};

use wallcat_core::events::AudioCue;

/// Upper bound for the randomized phase divisor.
const MAX_PHASE_DELAY: u32 = 100;
/// Peak rotation of the idle wobble, in degrees.
const WOBBLE_DEGREES: f32 = 25.0;
/// Milliseconds per radian of the wobble.
const WOBBLE_PERIOD_MS: f64 = 133.7;

/// A collectible gem resting at a fixed spot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gem {
    pub x: f32,
    pub y: f32,
    /// Session time the gem was placed.
    pub spawn_ms: u64,
    /// Divisor in `[1, 100]` that shifts each gem's wobble phase.
    pub phase_delay: u32,
}

impl Gem {
    pub fn new<R: Rng>(x: f32, y: f32, spawn_ms: u64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            spawn_ms,
            phase_delay: rng.random_range(1..=MAX_PHASE_DELAY),
        }
    }

    /// Draw rotation in degrees at the given session time.
    pub fn rotation(&self, now_ms: u64) -> f32 {
        let phase = self.spawn_ms / u64::from(self.phase_delay.max(1));
        let t = now_ms as f64 - phase as f64;
        WOBBLE_DEGREES * (t / WOBBLE_PERIOD_MS).sin() as f32
    }

    /// Axis-aligned proximity test, not a circular radius.
    pub fn in_reach(&self, px: f32, py: f32, reach: f32) -> bool {
        (self.x - px).abs() < reach && (self.y - py).abs() < reach
    }
}

/// Remove every gem within reach of the player, returning one pickup cue per
/// collected gem in collection order.
pub fn collect_gems<R: Rng>(
    gems: &mut Vec<Gem>,
    px: f32,
    py: f32,
    reach: f32,
    rare_odds: u32,
    rng: &mut R,
) -> Vec<AudioCue> {
    let mut cues = Vec::new();
    gems.retain(|gem| {
        if gem.in_reach(px, py, reach) {
            cues.push(pickup_cue(rare_odds, rng));
            false
        } else {
            true
        }
    });
    cues
}

/// One in `rare_odds` pickups plays the rare cue.
fn pickup_cue<R: Rng>(rare_odds: u32, rng: &mut R) -> AudioCue {
    if rng.random_range(0..rare_odds.max(1)) == 0 {
        AudioCue::PickupRare
    } else {
        AudioCue::PickupCommon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn gem_at(x: f32, y: f32) -> Gem {
        Gem {
            x,
            y,
            spawn_ms: 0,
            phase_delay: 1,
        }
    }

    #[test]
    fn pickup_within_reach() {
        let mut gems = vec![gem_at(100.0, 100.0)];
        let mut rng = StdRng::seed_from_u64(1);

        let cues = collect_gems(&mut gems, 120.0, 130.0, 50.0, 6, &mut rng);

        assert!(gems.is_empty());
        assert_eq!(cues.len(), 1);
        assert!(matches!(
            cues[0],
            AudioCue::PickupCommon | AudioCue::PickupRare
        ));
    }

    #[test]
    fn reach_is_a_box_not_a_circle() {
        let gem = gem_at(100.0, 100.0);
        // Corner of the box: distance ~69 but both deltas < 50.
        assert!(gem.in_reach(149.0, 149.0, 50.0));
        assert!(!gem.in_reach(150.0, 100.0, 50.0));
        assert!(!gem.in_reach(100.0, 50.0, 50.0));
    }

    #[test]
    fn far_gems_stay() {
        let mut gems = vec![gem_at(100.0, 100.0), gem_at(400.0, 100.0)];
        let mut rng = StdRng::seed_from_u64(1);
        let cues = collect_gems(&mut gems, 390.0, 90.0, 50.0, 6, &mut rng);
        assert_eq!(cues.len(), 1);
        assert_eq!(gems, vec![gem_at(100.0, 100.0)]);
    }

    #[test]
    fn rare_cue_frequency_is_about_one_in_six() {
        let mut rng = StdRng::seed_from_u64(99);
        let rare = (0..6000)
            .filter(|_| pickup_cue(6, &mut rng) == AudioCue::PickupRare)
            .count();
        assert!((700..1300).contains(&rare), "rare picks: {rare}");
    }

    #[test]
    fn degenerate_odds_always_rare() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(pickup_cue(0, &mut rng), AudioCue::PickupRare);
        assert_eq!(pickup_cue(1, &mut rng), AudioCue::PickupRare);
    }

    #[test]
    fn phase_delay_in_range_and_seeded() {
        let mut a = StdRng::seed_from_u64(5);
        let mut b = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let ga = Gem::new(0.0, 0.0, 1000, &mut a);
            let gb = Gem::new(0.0, 0.0, 1000, &mut b);
            assert!((1..=100).contains(&ga.phase_delay));
            assert_eq!(ga, gb);
        }
    }

    #[test]
    fn rotation_stays_within_wobble() {
        let gem = Gem {
            x: 0.0,
            y: 0.0,
            spawn_ms: 5000,
            phase_delay: 7,
        };
        for now in (0..20_000).step_by(37) {
            let r = gem.rotation(now);
            assert!(r.abs() <= 25.0 + f32::EPSILON);
        }
        assert_eq!(gem_at(0.0, 0.0).rotation(0), 0.0);
    }
}
