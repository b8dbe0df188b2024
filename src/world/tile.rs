//! Tile definitions
//!
//! Each tile carries only the fields that make sense for its kind: secrecy
//! lives on corridors and doors, locks only on doors, trap kinds only on traps.

use serde::{Deserialize, Serialize};

use crate::error::TileError;

/// A single cell of the level grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub visible: bool,
    pub explored: bool,
    /// Index of the room this tile belongs to, if any
    pub room: Option<usize>,
    /// Part of a special-archetype room
    pub special: bool,
}

impl Tile {
    pub fn new(kind: TileKind) -> Self {
        Self {
            kind,
            visible: false,
            explored: false,
            room: None,
            special: false,
        }
    }

    pub fn tile_type(&self) -> TileType {
        self.kind.tile_type()
    }

    pub fn is_blocked(&self) -> bool {
        self.kind.is_blocked()
    }

    pub fn glyph(&self) -> char {
        self.kind.glyph()
    }

    pub fn fg_color(&self, lit: bool) -> (u8, u8, u8) {
        let (r, g, b) = self.kind.fg_color();
        if lit {
            (r, g, b)
        } else {
            (r / 3, g / 3, b / 3)
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(TileKind::Wall)
    }
}

/// What occupies a tile, with the per-kind flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TileKind {
    Wall,
    Floor,
    Corridor { secret: bool },
    Door { open: bool, locked: bool, secret: bool },
    StairsUp,
    StairsDown,
    Water,
    Lava,
    Trap { trap: TrapKind },
}

/// Optional flags accompanying a flat tile type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileFlags {
    #[serde(default)]
    pub open: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub secret: bool,
}

impl TileKind {
    /// Build a kind from a flat type plus flags, rejecting flags the type can't carry
    pub fn from_parts(
        tile_type: TileType,
        flags: TileFlags,
        trap: Option<TrapKind>,
    ) -> Result<Self, TileError> {
        let reject = |flag: &'static str| Err(TileError::InvalidFlag { tile_type, flag });

        if flags.locked && tile_type != TileType::Door {
            return reject("locked");
        }
        if flags.open && tile_type != TileType::Door {
            return reject("open");
        }
        if flags.secret && !matches!(tile_type, TileType::Door | TileType::Corridor) {
            return reject("secret");
        }
        if trap.is_some() && tile_type != TileType::Trap {
            return reject("trap");
        }

        Ok(match tile_type {
            TileType::Wall => TileKind::Wall,
            TileType::Floor => TileKind::Floor,
            TileType::Corridor => TileKind::Corridor { secret: flags.secret },
            TileType::Door => TileKind::Door {
                open: flags.open,
                locked: flags.locked,
                secret: flags.secret,
            },
            TileType::StairsUp => TileKind::StairsUp,
            TileType::StairsDown => TileKind::StairsDown,
            TileType::Water => TileKind::Water,
            TileType::Lava => TileKind::Lava,
            TileType::Trap => TileKind::Trap {
                trap: trap.ok_or(TileError::MissingTrapKind)?,
            },
        })
    }

    pub fn tile_type(&self) -> TileType {
        match self {
            TileKind::Wall => TileType::Wall,
            TileKind::Floor => TileType::Floor,
            TileKind::Corridor { .. } => TileType::Corridor,
            TileKind::Door { .. } => TileType::Door,
            TileKind::StairsUp => TileType::StairsUp,
            TileKind::StairsDown => TileType::StairsDown,
            TileKind::Water => TileType::Water,
            TileKind::Lava => TileType::Lava,
            TileKind::Trap { .. } => TileType::Trap,
        }
    }

    /// Only solid rock stops movement; hazards and locks are resolved by gameplay
    pub fn is_blocked(&self) -> bool {
        matches!(self, TileKind::Wall)
    }

    pub fn is_secret(&self) -> bool {
        matches!(
            self,
            TileKind::Corridor { secret: true } | TileKind::Door { secret: true, .. }
        )
    }

    pub fn glyph(&self) -> char {
        match self {
            TileKind::Wall => '#',
            TileKind::Floor => '.',
            TileKind::Corridor { secret: false } => ',',
            TileKind::Corridor { secret: true } => ';',
            TileKind::Door { secret: true, .. } => 'S',
            TileKind::Door { open: true, .. } => '/',
            TileKind::Door { .. } => '+',
            TileKind::StairsUp => '<',
            TileKind::StairsDown => '>',
            TileKind::Water => '~',
            TileKind::Lava => '≈',
            TileKind::Trap { .. } => '^',
        }
    }

    pub fn fg_color(&self) -> (u8, u8, u8) {
        match self {
            TileKind::Wall => (130, 110, 90),
            TileKind::Floor => (80, 80, 80),
            TileKind::Corridor { .. } => (70, 70, 70),
            TileKind::Door { locked: true, .. } => (180, 60, 40),
            TileKind::Door { .. } => (139, 90, 43),
            TileKind::StairsUp | TileKind::StairsDown => (200, 200, 200),
            TileKind::Water => (60, 110, 220),
            TileKind::Lava => (255, 100, 0),
            TileKind::Trap { .. } => (200, 50, 200),
        }
    }
}

/// Flat tile discriminant used by authored layouts and renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileType {
    Wall,
    Floor,
    Corridor,
    Door,
    StairsUp,
    StairsDown,
    Water,
    Lava,
    Trap,
}

/// Trap varieties, ordered by the depth at which they start appearing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrapKind {
    Pit,
    Arrow,
    Dart,
    Alarm,
    Boulder,
    Teleport,
    Poison,
    Polymorph,
}

impl TrapKind {
    pub const ALL: [TrapKind; 8] = [
        TrapKind::Pit,
        TrapKind::Arrow,
        TrapKind::Dart,
        TrapKind::Alarm,
        TrapKind::Boulder,
        TrapKind::Teleport,
        TrapKind::Poison,
        TrapKind::Polymorph,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TrapKind::Pit => "pit",
            TrapKind::Arrow => "arrow trap",
            TrapKind::Dart => "dart trap",
            TrapKind::Alarm => "alarm",
            TrapKind::Boulder => "rolling boulder",
            TrapKind::Teleport => "teleportation trap",
            TrapKind::Poison => "poison needle",
            TrapKind::Polymorph => "polymorph trap",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_walls_block() {
        assert!(TileKind::Wall.is_blocked());
        assert!(!TileKind::Floor.is_blocked());
        assert!(!TileKind::Lava.is_blocked());
        assert!(!TileKind::Door { open: false, locked: true, secret: true }.is_blocked());
    }

    #[test]
    fn test_secret_tiles() {
        assert!(TileKind::Corridor { secret: true }.is_secret());
        assert!(TileKind::Door { open: false, locked: false, secret: true }.is_secret());
        assert!(!TileKind::Corridor { secret: false }.is_secret());
        assert!(!TileKind::Floor.is_secret());
    }

    #[test]
    fn test_trap_names_are_distinct() {
        let names: std::collections::HashSet<_> = TrapKind::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(names.len(), TrapKind::ALL.len());
    }

    #[test]
    fn test_from_parts_rejects_misplaced_flags() {
        let locked = TileFlags { locked: true, ..Default::default() };
        assert_eq!(
            TileKind::from_parts(TileType::Floor, locked, None),
            Err(TileError::InvalidFlag { tile_type: TileType::Floor, flag: "locked" })
        );

        let secret = TileFlags { secret: true, ..Default::default() };
        assert!(TileKind::from_parts(TileType::Lava, secret, None).is_err());
        assert_eq!(
            TileKind::from_parts(TileType::Corridor, secret, None),
            Ok(TileKind::Corridor { secret: true })
        );
    }

    #[test]
    fn test_from_parts_trap_needs_kind() {
        assert_eq!(
            TileKind::from_parts(TileType::Trap, TileFlags::default(), None),
            Err(TileError::MissingTrapKind)
        );
        assert_eq!(
            TileKind::from_parts(TileType::Trap, TileFlags::default(), Some(TrapKind::Pit)),
            Ok(TileKind::Trap { trap: TrapKind::Pit })
        );
        assert!(TileKind::from_parts(TileType::Floor, TileFlags::default(), Some(TrapKind::Pit)).is_err());
    }

    #[test]
    fn test_kind_roundtrips_through_type() {
        let door = TileKind::Door { open: true, locked: false, secret: false };
        assert_eq!(door.tile_type(), TileType::Door);
        assert_eq!(door.glyph(), '/');
    }

    #[test]
    fn test_kind_serializes_with_type_tag() {
        let json = serde_json::to_string(&TileKind::Trap { trap: TrapKind::Dart }).unwrap();
        assert_eq!(json, r#"{"type":"trap","trap":"dart"}"#);
    }
}
