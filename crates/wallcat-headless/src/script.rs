use std::path::Path;

use serde::Deserialize;

use wallcat_core::game_trait::FrameInput;

use crate::error::RunError;

/// Scripted input: consecutive segments of held keys.
///
/// ```toml
/// [[segment]]
/// ticks = 30
/// walk = "right"  # held arrow key, moves at the configured walk speed
/// jump = true     # pressed on the first tick of the segment only
///
/// [[segment]]
/// ticks = 10
/// move_x = -3     # raw px/tick, overrides `walk`
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InputScript {
    #[serde(default, rename = "segment")]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Segment {
    pub ticks: u32,
    #[serde(default)]
    pub walk: Walk,
    #[serde(default)]
    pub move_x: Option<i32>,
    #[serde(default)]
    pub jump: bool,
}

/// Direction key held during a segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Walk {
    #[default]
    None,
    Left,
    Right,
}

impl Walk {
    fn sign(self) -> i32 {
        match self {
            Walk::None => 0,
            Walk::Left => -1,
            Walk::Right => 1,
        }
    }
}

impl Segment {
    /// Horizontal intent for this segment at the given walk speed.
    pub fn intent(&self, move_speed: i32) -> i32 {
        self.move_x.unwrap_or(self.walk.sign() * move_speed)
    }
}

impl InputScript {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load(path: &Path) -> Result<Self, RunError> {
        let content = std::fs::read_to_string(path).map_err(|source| RunError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| RunError::Script {
            path: path.display().to_string(),
            source,
        })
    }

    /// A script that stands still for `ticks` ticks.
    pub fn idle(ticks: u32) -> Self {
        Self {
            segments: vec![Segment {
                ticks,
                walk: Walk::None,
                move_x: None,
                jump: false,
            }],
        }
    }

    pub fn total_ticks(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.ticks)).sum()
    }

    /// Expand the segments into one input per tick. Jump is an edge, so it is
    /// only set on a segment's first tick.
    pub fn inputs(&self, move_speed: i32) -> impl Iterator<Item = FrameInput> + '_ {
        self.segments.iter().flat_map(move |s| {
            let move_x = s.intent(move_speed);
            (0..s.ticks).map(move |i| FrameInput {
                move_x,
                jump: s.jump && i == 0,
            })
        })
    }
}
