//! Quizcrawl - dungeon levels for a quiz roguelike
//!
//! Builds seeded, fully connected levels: rooms, corridors, doors, stairs,
//! traps, themed dressing, monsters and loot, with hand-authored layouts on
//! boss floors.

pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod world;

// Re-export commonly used types
pub use config::GeneratorConfig;
pub use error::{BossLevelError, ConfigError, TileError};
pub use events::{EventLog, LevelEvent, LevelObserver, LogObserver};
pub use world::generation::{generate, generate_seeded, DungeonGenerator};
pub use world::{Dungeon, Map, Position, Room, Theme, Tile, TileKind};
