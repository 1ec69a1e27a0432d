use serde::{Deserialize, Serialize};

/// Named sound cues the simulation asks an external audio player to render.
///
/// The core only selects cues; loading and playback live outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AudioCue {
    JumpA,
    JumpB,
    WallScrape,
    PickupCommon,
    PickupRare,
}

impl AudioCue {
    /// Stable cue name used by asset tables and logs.
    pub fn name(&self) -> &'static str {
        match self {
            AudioCue::JumpA => "jump-a",
            AudioCue::JumpB => "jump-b",
            AudioCue::WallScrape => "wall-scrape",
            AudioCue::PickupCommon => "pickup-common",
            AudioCue::PickupRare => "pickup-rare",
        }
    }

    /// The other half of the alternating jump pair.
    pub fn next_jump(&self) -> AudioCue {
        match self {
            AudioCue::JumpA => AudioCue::JumpB,
            _ => AudioCue::JumpA,
        }
    }
}

impl std::fmt::Display for AudioCue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Events emitted by a simulation during one update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Cue(AudioCue),
    GemCollected { remaining: usize },
    LevelCleared,
    /// The player dropped below the bottom row of the map.
    FellOut,
}
