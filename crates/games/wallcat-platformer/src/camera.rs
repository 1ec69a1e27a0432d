use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;
use crate::tilemap::TileMap;

/// Top-left corner of the visible area in map pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Scroll {
    pub x: f32,
    pub y: f32,
}

/// Centre the viewport on the player without showing anything past the map
/// edges.
pub fn clamp_scroll(player_x: f32, player_y: f32, map: &TileMap, view: &CameraConfig) -> Scroll {
    Scroll {
        x: clamp_axis(player_x, map.pixel_width(), view.viewport_width),
        y: clamp_axis(player_y, map.pixel_height(), view.viewport_height),
    }
}

/// Clamp one axis to `[0, map_extent - view_extent]`.
///
/// A map narrower than the viewport leaves an empty range; the lower bound
/// wins and the axis pins to 0.
pub fn clamp_axis(pos: f32, map_extent: f32, view_extent: f32) -> f32 {
    let max = map_extent - view_extent;
    (pos - view_extent / 2.0).min(max).max(0.0)
}
