//! Map data structure
//!
//! The 2D tile grid of a single level.

use serde::{Deserialize, Serialize};

use super::position::Position;
use super::tile::{Tile, TileKind};

/// A level's tile grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Map {
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<Tile>,
}

impl Map {
    /// Create a new map filled with walls
    pub fn new(width: i32, height: i32) -> Self {
        let tiles = vec![Tile::default(); (width.max(0) * height.max(0)) as usize];
        Self { width, height, tiles }
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Convert 1D index to 2D coordinates
    #[inline]
    pub fn idx_to_xy(&self, idx: usize) -> (i32, i32) {
        let idx = idx as i32;
        (idx % self.width, idx / self.width)
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Inside the map but off the outer border ring
    #[inline]
    pub fn in_interior(&self, x: i32, y: i32) -> bool {
        x >= 1 && x < self.width - 1 && y >= 1 && y < self.height - 1
    }

    /// Get tile at position
    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        if self.in_bounds(x, y) {
            Some(&self.tiles[self.xy_to_idx(x, y)])
        } else {
            None
        }
    }

    /// Get mutable tile at position
    pub fn get_tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            Some(&mut self.tiles[idx])
        } else {
            None
        }
    }

    /// Tile kind at position, if in bounds
    pub fn kind_at(&self, x: i32, y: i32) -> Option<TileKind> {
        self.get_tile(x, y).map(|t| t.kind)
    }

    /// Set tile kind at position
    pub fn set_kind(&mut self, x: i32, y: i32, kind: TileKind) {
        if let Some(tile) = self.get_tile_mut(x, y) {
            tile.kind = kind;
        }
    }

    /// Check if a position is walkable
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).is_some_and(|t| !t.is_blocked())
    }

    /// Mark a tile as explored
    pub fn mark_explored(&mut self, x: i32, y: i32) {
        if let Some(tile) = self.get_tile_mut(x, y) {
            tile.explored = true;
        }
    }

    /// Set tile visibility
    pub fn set_visible(&mut self, x: i32, y: i32, visible: bool) {
        if let Some(tile) = self.get_tile_mut(x, y) {
            tile.visible = visible;
            if visible {
                tile.explored = true;
            }
        }
    }

    /// Clear all visibility (before recalculating FOV)
    pub fn clear_visibility(&mut self) {
        for tile in &mut self.tiles {
            tile.visible = false;
        }
    }

    /// All positions whose tile satisfies `pred`
    pub fn positions_where(&self, pred: impl Fn(&Tile) -> bool) -> Vec<Position> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| pred(tile))
            .map(|(idx, _)| {
                let (x, y) = self.idx_to_xy(idx);
                Position::new(x, y)
            })
            .collect()
    }

    /// Count tiles satisfying `pred`
    pub fn count_where(&self, pred: impl Fn(&Tile) -> bool) -> usize {
        self.tiles.iter().filter(|t| pred(t)).count()
    }

    /// One line per row of glyphs
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.tiles.len() + self.height.max(0) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.tiles[self.xy_to_idx(x, y)].glyph());
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_map_is_solid() {
        let map = Map::new(10, 6);
        assert_eq!(map.tiles.len(), 60);
        assert!(map.tiles.iter().all(|t| t.kind == TileKind::Wall));
        assert!(!map.is_walkable(3, 3));
    }

    #[test]
    fn test_bounds() {
        let mut map = Map::new(10, 6);
        assert!(map.get_tile(-1, 0).is_none());
        assert!(map.get_tile(10, 0).is_none());
        assert!(map.get_tile(9, 5).is_some());
        assert!(!map.in_interior(0, 3));
        assert!(map.in_interior(1, 1));

        map.set_kind(42, 42, TileKind::Floor);
        assert_eq!(map.count_where(|t| t.kind == TileKind::Floor), 0);
    }

    #[test]
    fn test_idx_roundtrip() {
        let map = Map::new(7, 5);
        let idx = map.xy_to_idx(3, 4);
        assert_eq!(map.idx_to_xy(idx), (3, 4));
    }

    #[test]
    fn test_visibility_marks_explored() {
        let mut map = Map::new(5, 5);
        map.set_visible(2, 2, true);
        map.clear_visibility();
        let tile = map.get_tile(2, 2).unwrap();
        assert!(!tile.visible);
        assert!(tile.explored);
    }

    #[test]
    fn test_ascii_shape() {
        let mut map = Map::new(3, 2);
        map.set_kind(1, 0, TileKind::Floor);
        assert_eq!(map.to_ascii(), "#.#\n###\n");
    }
}
