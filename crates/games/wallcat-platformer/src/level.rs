use std::path::Path;

use rand::Rng;

use crate::gems::Gem;
use crate::tilemap::{Tile, TileMap};

/// Errors raised while loading a level. All of them are fatal at load time.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("level has no rows")]
    Empty,
    #[error("line {line} has {found} columns, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown marker {marker:?} at line {line}, column {column}")]
    UnknownMarker {
        marker: char,
        line: usize,
        column: usize,
    },
    #[error("failed to read level {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// What a level cell holds once parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Tile(Tile),
    Gem,
}

fn classify(marker: char) -> Option<Cell> {
    let tile = match marker {
        '"' => Tile::Grass,
        '#' => Tile::Earth,
        '-' => Tile::Growth,
        'B' => Tile::Brick,
        'w' => Tile::Wood,
        'l' => Tile::Leaves,
        'g' => Tile::Grey,
        'p' => Tile::Peach,
        'b' => Tile::Blue,
        'W' => Tile::White,
        '.' | ' ' => Tile::Empty,
        'x' => return Some(Cell::Gem),
        _ => return None,
    };
    Some(Cell::Tile(tile))
}

/// A parsed level: the collision grid plus the gems pulled out of it.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelData {
    pub map: TileMap,
    pub gems: Vec<Gem>,
}

/// Parse a rectangular character grid into a map and its gems.
///
/// Gems sit in the centre of their cell and leave the cell empty. Trailing
/// blank lines are ignored; any other row must match the first row's width.
pub fn parse_level<R: Rng>(
    text: &str,
    cell_size: i32,
    spawn_ms: u64,
    rng: &mut R,
) -> Result<LevelData, LevelError> {
    let mut rows: Vec<&str> = text
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }
    let Some(first) = rows.first() else {
        return Err(LevelError::Empty);
    };
    let width = first.chars().count();
    if width == 0 {
        return Err(LevelError::Empty);
    }

    let mut map = TileMap::new(width as u32, rows.len() as u32, cell_size);
    let mut gems = Vec::new();
    let cell = map.cell_size as f32;

    for (y, row) in rows.iter().enumerate() {
        let found = row.chars().count();
        if found != width {
            return Err(LevelError::RaggedRow {
                line: y + 1,
                expected: width,
                found,
            });
        }
        for (x, marker) in row.chars().enumerate() {
            match classify(marker) {
                Some(Cell::Tile(tile)) => map.set_tile(x as u32, y as u32, tile),
                Some(Cell::Gem) => {
                    let gx = x as f32 * cell + cell / 2.0;
                    let gy = y as f32 * cell + cell / 2.0;
                    gems.push(Gem::new(gx, gy, spawn_ms, rng));
                },
                None => {
                    return Err(LevelError::UnknownMarker {
                        marker,
                        line: y + 1,
                        column: x + 1,
                    });
                },
            }
        }
    }

    tracing::debug!(
        width = map.width,
        height = map.height,
        gems = gems.len(),
        "Parsed level"
    );
    Ok(LevelData { map, gems })
}

/// Read and parse a level file.
pub fn load_level_file<R: Rng>(
    path: impl AsRef<Path>,
    cell_size: i32,
    spawn_ms: u64,
    rng: &mut R,
) -> Result<LevelData, LevelError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_level(&text, cell_size, spawn_ms, rng)
}
