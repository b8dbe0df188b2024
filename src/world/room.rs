//! Rooms and the doors on their boundaries

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::position::Position;

/// A rectangular room; `x`/`y` is the top-left floor tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub kind: RoomKind,
    /// Indices of rooms this one has a corridor to
    #[serde(default)]
    pub connections: BTreeSet<usize>,
    #[serde(default)]
    pub doors: Vec<Door>,
}

impl Room {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind: RoomKind::Normal,
            connections: BTreeSet::new(),
            doors: Vec::new(),
        }
    }

    /// Rightmost floor column
    pub fn x2(&self) -> i32 {
        self.x + self.width - 1
    }

    /// Bottom floor row
    pub fn y2(&self) -> i32 {
        self.y + self.height - 1
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x && pos.x <= self.x2() && pos.y >= self.y && pos.y <= self.y2()
    }

    /// Does this room, grown by `buffer` tiles on every side, touch `other`?
    pub fn intersects(&self, other: &Room, buffer: i32) -> bool {
        self.x - buffer <= other.x2()
            && self.x2() + buffer >= other.x
            && self.y - buffer <= other.y2()
            && self.y2() + buffer >= other.y
    }

    /// Every tile of the room's floor area
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (self.y..=self.y2()).flat_map(move |y| (self.x..=self.x2()).map(move |x| Position::new(x, y)))
    }

    pub fn random_cell(&self, rng: &mut impl Rng) -> Position {
        Position::new(
            rng.gen_range(self.x..=self.x2()),
            rng.gen_range(self.y..=self.y2()),
        )
    }

    pub fn is_connected_to(&self, other: usize) -> bool {
        self.connections.contains(&other)
    }

    pub fn is_special(&self) -> bool {
        self.kind != RoomKind::Normal
    }
}

/// Room archetypes; anything other than `Normal` is a special room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    #[default]
    Normal,
    Shop,
    Library,
    Armory,
    Treasury,
    Temple,
}

impl RoomKind {
    pub const SPECIAL: [RoomKind; 5] = [
        RoomKind::Shop,
        RoomKind::Library,
        RoomKind::Armory,
        RoomKind::Treasury,
        RoomKind::Temple,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RoomKind::Normal => "room",
            RoomKind::Shop => "shop",
            RoomKind::Library => "library",
            RoomKind::Armory => "armory",
            RoomKind::Treasury => "treasury",
            RoomKind::Temple => "temple",
        }
    }
}

/// A door on a room's boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub position: Position,
    pub open: bool,
    pub locked: bool,
    pub secret: bool,
}
