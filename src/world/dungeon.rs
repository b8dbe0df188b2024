//! The generated level
//!
//! `Dungeon` is a plain value: the grid, the rooms and everything placed in
//! them, plus read-only navigation queries. Only visibility flags are meant to
//! change after generation, and those belong to whoever renders the level.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::map::Map;
use super::position::Position;
use super::room::Room;
use super::theme::Theme;
use super::tile::{Tile, TrapKind};
use crate::data::ItemCategory;

/// Used by `entrance()` when a level has none recorded
pub const FALLBACK_ENTRANCE: Position = Position { x: 5, y: 5 };

/// A placed trap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trap {
    pub position: Position,
    pub kind: TrapKind,
    #[serde(default)]
    pub revealed: bool,
}

/// Stair locations; `down` is absent on the final level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stairs {
    pub up: Position,
    #[serde(default)]
    pub down: Option<Position>,
}

/// Flavor text scrawled on a floor tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graffiti {
    pub position: Position,
    pub text: String,
}

/// Where a monster starts and which catalog entry it is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterPlacement {
    pub position: Position,
    pub id: String,
    #[serde(default)]
    pub asleep: bool,
}

/// Lock and trap state of a container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerState {
    pub locked: bool,
    pub trapped: bool,
}

/// Where an item starts and which catalog entry it is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPlacement {
    pub position: Position,
    pub id: String,
    pub category: ItemCategory,
    /// Stack size, or the amount for gold
    pub quantity: u32,
    #[serde(default)]
    pub container: Option<ContainerState>,
}

/// A fully generated level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dungeon {
    pub level: u32,
    /// Seed that reproduces this level (procedural parts only for boss layouts)
    pub seed: u64,
    pub map: Map,
    /// Rooms in traversal order
    pub rooms: Vec<Room>,
    pub traps: Vec<Trap>,
    pub stairs: Stairs,
    pub entrance: Option<Position>,
    pub exit: Option<Position>,
    /// Room holding the up-stairs and entrance
    pub entrance_room: Option<usize>,
    /// Room holding the down-stairs
    pub exit_room: Option<usize>,
    pub theme: Theme,
    pub monsters: Vec<MonsterPlacement>,
    pub items: Vec<ItemPlacement>,
    pub graffiti: Vec<Graffiti>,
    /// Boss identifier for hand-authored levels
    pub boss: Option<String>,
}

impl Dungeon {
    pub fn width(&self) -> i32 {
        self.map.width
    }

    pub fn height(&self) -> i32 {
        self.map.height
    }

    /// Tile at a position, `None` outside the grid
    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.map.get_tile(x, y)
    }

    /// In bounds and not blocked
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.map.is_walkable(x, y)
    }

    /// Where the player arrives
    pub fn entrance(&self) -> Position {
        self.entrance.unwrap_or(FALLBACK_ENTRANCE)
    }

    pub fn random_room(&self, rng: &mut impl Rng) -> Option<&Room> {
        self.rooms.choose(rng)
    }

    /// The room covering a position
    pub fn room_at(&self, x: i32, y: i32) -> Option<&Room> {
        self.tile(x, y)
            .and_then(|t| t.room)
            .and_then(|idx| self.rooms.get(idx))
    }

    pub fn is_boss_level(&self) -> bool {
        self.boss.is_some()
    }

    pub fn trap_at(&self, pos: Position) -> Option<&Trap> {
        self.traps.iter().find(|t| t.position == pos)
    }

    pub fn monsters_at(&self, pos: Position) -> impl Iterator<Item = &MonsterPlacement> {
        self.monsters.iter().filter(move |m| m.position == pos)
    }

    pub fn items_at(&self, pos: Position) -> impl Iterator<Item = &ItemPlacement> {
        self.items.iter().filter(move |i| i.position == pos)
    }

    /// Set tile visibility (renderer-owned)
    pub fn set_visible(&mut self, x: i32, y: i32, visible: bool) {
        self.map.set_visible(x, y, visible);
    }

    /// Mark a tile as explored (renderer-owned)
    pub fn mark_explored(&mut self, x: i32, y: i32) {
        self.map.mark_explored(x, y);
    }

    /// Clear all visibility (renderer-owned)
    pub fn clear_visibility(&mut self) {
        self.map.clear_visibility();
    }

    /// Glyph preview with monsters and items drawn over the terrain
    pub fn to_ascii(&self) -> String {
        let mut rows: Vec<Vec<char>> = self
            .map
            .to_ascii()
            .lines()
            .map(|line| line.chars().collect())
            .collect();

        let mut stamp = |pos: Position, glyph: char| {
            if let Some(cell) = rows
                .get_mut(pos.y as usize)
                .and_then(|row| row.get_mut(pos.x as usize))
            {
                *cell = glyph;
            }
        };
        for item in &self.items {
            stamp(item.position, item_glyph(item.category));
        }
        for monster in &self.monsters {
            stamp(monster.position, if monster.asleep { 'z' } else { 'M' });
        }
        if let Some(entrance) = self.entrance {
            stamp(entrance, '@');
        }

        let mut out = String::new();
        for row in rows {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

fn item_glyph(category: ItemCategory) -> char {
    match category {
        ItemCategory::Gold => '$',
        ItemCategory::Container => '=',
        ItemCategory::Weapon => ')',
        ItemCategory::Armor => '[',
        ItemCategory::Scroll => '?',
        ItemCategory::Potion => '!',
        ItemCategory::Any => '*',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::TileKind;

    fn tiny() -> Dungeon {
        let mut map = Map::new(12, 10);
        let room = Room::new(2, 2, 5, 4);
        for pos in room.cells() {
            map.set_kind(pos.x, pos.y, TileKind::Floor);
            if let Some(tile) = map.get_tile_mut(pos.x, pos.y) {
                tile.room = Some(0);
            }
        }
        Dungeon {
            level: 1,
            seed: 0,
            map,
            rooms: vec![room],
            traps: Vec::new(),
            stairs: Stairs { up: Position::new(3, 3), down: None },
            entrance: None,
            exit: None,
            entrance_room: Some(0),
            exit_room: Some(0),
            theme: Theme::Dungeon,
            monsters: vec![MonsterPlacement {
                position: Position::new(4, 4),
                id: "kobold".into(),
                asleep: true,
            }],
            items: Vec::new(),
            graffiti: Vec::new(),
            boss: None,
        }
    }

    #[test]
    fn test_tile_is_bounds_checked() {
        let dungeon = tiny();
        assert!(dungeon.tile(-1, 0).is_none());
        assert!(dungeon.tile(12, 0).is_none());
        assert!(dungeon.tile(11, 9).is_some());
    }

    #[test]
    fn test_walkability() {
        let dungeon = tiny();
        assert!(dungeon.is_walkable(3, 3));
        assert!(!dungeon.is_walkable(0, 0));
        assert!(!dungeon.is_walkable(100, 100));
    }

    #[test]
    fn test_entrance_fallback() {
        let mut dungeon = tiny();
        assert_eq!(dungeon.entrance(), FALLBACK_ENTRANCE);
        dungeon.entrance = Some(Position::new(3, 4));
        assert_eq!(dungeon.entrance(), Position::new(3, 4));
    }

    #[test]
    fn test_room_queries() {
        use rand::SeedableRng;
        let dungeon = tiny();
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        assert_eq!(dungeon.random_room(&mut rng), dungeon.rooms.first());
        assert!(dungeon.room_at(3, 3).is_some());
        assert!(dungeon.room_at(0, 0).is_none());
    }

    #[test]
    fn test_visibility_passthrough() {
        let mut dungeon = tiny();
        dungeon.set_visible(3, 3, true);
        assert!(dungeon.tile(3, 3).unwrap().explored);
        dungeon.clear_visibility();
        assert!(!dungeon.tile(3, 3).unwrap().visible);
    }

    #[test]
    fn test_lookups_by_position() {
        let mut dungeon = tiny();
        dungeon.traps.push(Trap {
            position: Position::new(5, 3),
            kind: TrapKind::Dart,
            revealed: false,
        });
        dungeon.items.push(ItemPlacement {
            position: Position::new(4, 4),
            id: "dagger".into(),
            category: ItemCategory::Weapon,
            quantity: 1,
            container: None,
        });

        assert_eq!(dungeon.trap_at(Position::new(5, 3)).map(|t| t.kind), Some(TrapKind::Dart));
        assert!(dungeon.trap_at(Position::new(4, 4)).is_none());
        assert_eq!(dungeon.monsters_at(Position::new(4, 4)).count(), 1);
        assert_eq!(dungeon.monsters_at(Position::new(3, 3)).count(), 0);
        assert_eq!(dungeon.items_at(Position::new(4, 4)).next().map(|i| i.id.as_str()), Some("dagger"));
    }

    #[test]
    fn test_ascii_overlays() {
        let dungeon = tiny();
        let ascii = dungeon.to_ascii();
        let row: Vec<char> = ascii.lines().nth(4).unwrap().chars().collect();
        assert_eq!(row[4], 'z');
        assert_eq!(ascii.lines().count(), 10);
    }
}
