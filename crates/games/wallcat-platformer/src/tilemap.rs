use serde::{Deserialize, Serialize};

/// Tile art for a map cell. Every kind except `Empty` blocks movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Empty,
    Grass,
    Earth,
    Growth,
    Brick,
    Wood,
    Leaves,
    Grey,
    Peach,
    Blue,
    White,
}

impl Tile {
    pub fn is_solid(self) -> bool {
        !matches!(self, Tile::Empty)
    }
}

/// Fixed-size grid of tiles, queried per pixel for collision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    /// Cell edge length in pixels.
    pub cell_size: i32,
    /// Tile data stored row-major (y * width + x).
    tiles: Vec<Tile>,
}

impl TileMap {
    /// An all-empty map.
    pub fn new(width: u32, height: u32, cell_size: i32) -> Self {
        Self {
            width,
            height,
            cell_size: cell_size.max(1),
            tiles: vec![Tile::Empty; width as usize * height as usize],
        }
    }

    pub fn get_tile(&self, x: i32, y: i32) -> Tile {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return Tile::Empty;
        }
        self.tiles[y as usize * self.width as usize + x as usize]
    }

    pub fn set_tile(&mut self, x: u32, y: u32, tile: Tile) {
        if x < self.width && y < self.height {
            self.tiles[y as usize * self.width as usize + x as usize] = tile;
        }
    }

    /// Solid at a given pixel position?
    ///
    /// Anything above the top edge is solid so the player cannot leave through
    /// the ceiling. Columns beside the grid and rows below it are open.
    pub fn is_solid(&self, px: f32, py: f32) -> bool {
        if py < 0.0 {
            return true;
        }
        if !px.is_finite() || !py.is_finite() {
            return false;
        }
        let cell = self.cell_size as f32;
        let tx = (px / cell).floor() as i32;
        let ty = (py / cell).floor() as i32;
        self.get_tile(tx, ty).is_solid()
    }

    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * self.cell_size as f32
    }

    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * self.cell_size as f32
    }

    /// Iterate `(x, y, tile)` over every non-empty cell, row by row.
    pub fn solid_cells(&self) -> impl Iterator<Item = (u32, u32, Tile)> + '_ {
        let width = self.width.max(1);
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_solid())
            .map(move |(i, &tile)| (i as u32 % width, i as u32 / width, tile))
    }
}
