//! Hand-authored boss layouts
//!
//! Boss levels try a JSON layout first. Anything that goes wrong while fetching
//! or validating it is reported to the caller as an error, and the generator
//! falls back to a procedural level.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::ItemCategory;
use crate::error::BossLevelError;
use crate::world::{
    ItemPlacement, Map, MonsterPlacement, Position, Room, RoomKind, Stairs, Theme, TileFlags, TileKind,
    TileType, Trap, TrapKind,
};

/// Supplies boss layouts by level number
pub trait BossLevelSource: Send + Sync {
    fn fetch(&self, level: u32) -> Result<BossLayout, BossLevelError>;
}

/// Reads `boss_<level>.json` files from a directory
#[derive(Debug, Clone)]
pub struct FileBossSource {
    dir: PathBuf,
}

impl FileBossSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, level: u32) -> PathBuf {
        self.dir.join(format!("boss_{}.json", level))
    }
}

impl BossLevelSource for FileBossSource {
    fn fetch(&self, level: u32) -> Result<BossLayout, BossLevelError> {
        let path = self.path_for(level);
        if !path.exists() {
            return Err(BossLevelError::NotFound(level));
        }
        let content = fs::read_to_string(&path).map_err(|source| BossLevelError::Io { path, source })?;
        BossLayout::from_json(&content)
    }
}

/// Layouts kept in memory, keyed by level
#[derive(Debug, Clone, Default)]
pub struct InMemoryBossSource {
    layouts: HashMap<u32, String>,
}

impl InMemoryBossSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register raw JSON for a level; it is parsed on fetch
    pub fn with_json(mut self, level: u32, json: impl Into<String>) -> Self {
        self.layouts.insert(level, json.into());
        self
    }
}

impl BossLevelSource for InMemoryBossSource {
    fn fetch(&self, level: u32) -> Result<BossLayout, BossLevelError> {
        let json = self.layouts.get(&level).ok_or(BossLevelError::NotFound(level))?;
        BossLayout::from_json(json)
    }
}

/// The authored document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossLayout {
    pub tiles: Vec<BossRow>,
    #[serde(default)]
    pub rooms: Vec<BossRoom>,
    #[serde(default)]
    pub monsters: Vec<BossMonster>,
    #[serde(default)]
    pub items: Vec<BossItem>,
    #[serde(default)]
    pub traps: Vec<BossTrap>,
    pub stairs: Stairs,
    #[serde(default)]
    pub theme: Option<Theme>,
    #[serde(default)]
    pub entrance: Option<Position>,
    #[serde(default)]
    pub exit: Option<Position>,
    #[serde(default)]
    pub boss: Option<String>,
}

/// A row of tiles: either glyphs (`"#..+..#"`) or explicit tile objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BossRow {
    Glyphs(String),
    Tiles(Vec<BossTile>),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossTile {
    #[serde(rename = "type")]
    pub tile_type: TileType,
    #[serde(flatten)]
    pub flags: TileFlags,
    #[serde(default)]
    pub trap: Option<TrapKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossRoom {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    #[serde(rename = "type", default)]
    pub kind: RoomKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossMonster {
    pub x: i32,
    pub y: i32,
    pub id: String,
    #[serde(default)]
    pub asleep: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossItem {
    pub x: i32,
    pub y: i32,
    pub id: String,
    #[serde(default = "default_item_category")]
    pub category: ItemCategory,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_item_category() -> ItemCategory {
    ItemCategory::Any
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossTrap {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type")]
    pub kind: TrapKind,
    #[serde(default)]
    pub revealed: bool,
}

/// A validated layout ready to become a level
#[derive(Debug, Clone, PartialEq)]
pub struct AdoptedLayout {
    pub map: Map,
    pub rooms: Vec<Room>,
    pub monsters: Vec<MonsterPlacement>,
    pub items: Vec<ItemPlacement>,
    pub traps: Vec<Trap>,
    pub stairs: Stairs,
    pub theme: Option<Theme>,
    pub entrance: Option<Position>,
    pub exit: Option<Position>,
    pub boss: Option<String>,
}

impl BossLayout {
    pub fn from_json(json: &str) -> Result<Self, BossLevelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check everything against the grid and build the level pieces
    pub fn adopt(self) -> Result<AdoptedLayout, BossLevelError> {
        let map = self.build_map()?;
        let in_map = |what: &str, p: Position| {
            if map.in_bounds(p.x, p.y) {
                Ok(p)
            } else {
                Err(BossLevelError::Invalid(format!("{} at ({}, {}) is off the map", what, p.x, p.y)))
            }
        };

        let mut rooms = Vec::with_capacity(self.rooms.len());
        for r in &self.rooms {
            if r.width < 1 || r.height < 1 {
                return Err(BossLevelError::Invalid(format!("room at ({}, {}) has no area", r.x, r.y)));
            }
            let mut room = Room::new(r.x, r.y, r.width, r.height);
            room.kind = r.kind;
            in_map("room corner", Position::new(room.x, room.y))?;
            in_map("room corner", Position::new(room.x2(), room.y2()))?;
            rooms.push(room);
        }

        in_map("up-stairs", self.stairs.up)?;
        if let Some(down) = self.stairs.down {
            in_map("down-stairs", down)?;
        }
        let entrance = self.entrance.map(|p| in_map("entrance", p)).transpose()?;
        let exit = self.exit.or(self.stairs.down).map(|p| in_map("exit", p)).transpose()?;

        let monsters = self
            .monsters
            .into_iter()
            .map(|m| {
                Ok(MonsterPlacement {
                    position: in_map("monster", Position::new(m.x, m.y))?,
                    id: m.id,
                    asleep: m.asleep,
                })
            })
            .collect::<Result<Vec<_>, BossLevelError>>()?;

        let items = self
            .items
            .into_iter()
            .map(|i| {
                Ok(ItemPlacement {
                    position: in_map("item", Position::new(i.x, i.y))?,
                    id: i.id,
                    category: i.category,
                    quantity: i.quantity,
                    container: None,
                })
            })
            .collect::<Result<Vec<_>, BossLevelError>>()?;

        let traps = self
            .traps
            .iter()
            .map(|t| {
                Ok(Trap {
                    position: in_map("trap", Position::new(t.x, t.y))?,
                    kind: t.kind,
                    revealed: t.revealed,
                })
            })
            .collect::<Result<Vec<_>, BossLevelError>>()?;

        let mut map = map;
        for (index, room) in rooms.iter().enumerate() {
            for pos in room.cells() {
                if let Some(tile) = map.get_tile_mut(pos.x, pos.y) {
                    tile.room = Some(index);
                    tile.special = room.is_special();
                }
            }
        }
        for trap in &traps {
            map.set_kind(trap.position.x, trap.position.y, TileKind::Trap { trap: trap.kind });
        }

        Ok(AdoptedLayout {
            map,
            rooms,
            monsters,
            items,
            traps,
            stairs: self.stairs,
            theme: self.theme,
            entrance,
            exit,
            boss: self.boss,
        })
    }

    fn build_map(&self) -> Result<Map, BossLevelError> {
        let rows: Vec<Vec<TileKind>> = self
            .tiles
            .iter()
            .map(|row| -> Result<Vec<TileKind>, BossLevelError> {
                match row {
                    BossRow::Glyphs(glyphs) => glyphs.chars().map(kind_for_glyph).collect(),
                    BossRow::Tiles(tiles) => tiles
                        .iter()
                        .map(|t| TileKind::from_parts(t.tile_type, t.flags, t.trap).map_err(BossLevelError::from))
                        .collect(),
                }
            })
            .collect::<Result<_, _>>()?;

        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(BossLevelError::Invalid("layout has no tiles".to_string()));
        }
        if let Some(bad) = rows.iter().position(|r| r.len() != width) {
            return Err(BossLevelError::Invalid(format!(
                "row {} has {} tiles, expected {}",
                bad,
                rows[bad].len(),
                width
            )));
        }

        let mut map = Map::new(width as i32, height as i32);
        for (y, row) in rows.into_iter().enumerate() {
            for (x, kind) in row.into_iter().enumerate() {
                map.set_kind(x as i32, y as i32, kind);
            }
        }
        Ok(map)
    }
}

fn kind_for_glyph(glyph: char) -> Result<TileKind, BossLevelError> {
    Ok(match glyph {
        '#' | ' ' => TileKind::Wall,
        '.' => TileKind::Floor,
        ',' => TileKind::Corridor { secret: false },
        ';' => TileKind::Corridor { secret: true },
        '+' => TileKind::Door { open: false, locked: false, secret: false },
        '/' => TileKind::Door { open: true, locked: false, secret: false },
        'L' => TileKind::Door { open: false, locked: true, secret: false },
        'S' => TileKind::Door { open: false, locked: false, secret: true },
        '<' => TileKind::StairsUp,
        '>' => TileKind::StairsDown,
        '~' => TileKind::Water,
        '=' | '≈' => TileKind::Lava,
        '^' => TileKind::Trap { trap: TrapKind::Pit },
        other => {
            return Err(BossLevelError::Invalid(format!("unknown tile glyph {:?}", other)));
        }
    })
}
