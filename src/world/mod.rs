//! World module
//!
//! Level data (tiles, map, rooms, the finished dungeon) and procedural generation.

pub mod dungeon;
pub mod generation;
pub mod map;
pub mod position;
pub mod room;
pub mod theme;
pub mod tile;

pub use dungeon::{
    ContainerState, Dungeon, Graffiti, ItemPlacement, MonsterPlacement, Stairs, Trap, FALLBACK_ENTRANCE,
};
pub use map::Map;
pub use position::Position;
pub use room::{Door, Room, RoomKind};
pub use theme::{Theme, ThemeConfig};
pub use tile::{Tile, TileFlags, TileKind, TileType, TrapKind};
