//! Corridor shapes
//!
//! A corridor is a path between two points with a routing strategy. Only its
//! carved tiles outlive generation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::world::{Map, Position, TileKind};

/// Routing strategy for a corridor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorridorShape {
    /// One straight run when the ends line up, otherwise a horizontal-first L
    Straight,
    /// Two legs meeting at an elbow
    LShaped { horizontal_first: bool },
    /// Horizontal, vertical, horizontal, turning at the x midpoint
    ZShaped,
    /// Wandering walk that drifts toward the target
    Maze,
    /// L path two tiles wide
    Wide,
    /// L path whose tiles are hidden
    Secret,
}

/// A corridor between two points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corridor {
    pub from: Position,
    pub to: Position,
    pub shape: CorridorShape,
}

impl Corridor {
    pub fn new(from: Position, to: Position, shape: CorridorShape) -> Self {
        Self { from, to, shape }
    }

    pub fn l_shaped(from: Position, to: Position, horizontal_first: bool) -> Self {
        Self::new(from, to, CorridorShape::LShaped { horizontal_first })
    }

    /// Ordered, 4-connected tiles from `from` to `to`, both ends included
    pub fn path(&self, rng: &mut impl Rng) -> Vec<Position> {
        let mut path = vec![self.from];
        let (from, to) = (self.from, self.to);

        match self.shape {
            CorridorShape::Straight if from.x == to.x || from.y == to.y => walk_to(&mut path, to),
            CorridorShape::LShaped { horizontal_first: false } => {
                walk_to(&mut path, Position::new(from.x, to.y));
                walk_to(&mut path, to);
            }
            CorridorShape::Straight
            | CorridorShape::LShaped { horizontal_first: true }
            | CorridorShape::Wide
            | CorridorShape::Secret => {
                walk_to(&mut path, Position::new(to.x, from.y));
                walk_to(&mut path, to);
            }
            CorridorShape::ZShaped => {
                let mid = (from.x + to.x) / 2;
                walk_to(&mut path, Position::new(mid, from.y));
                walk_to(&mut path, Position::new(mid, to.y));
                walk_to(&mut path, to);
            }
            CorridorShape::Maze => wander_to(&mut path, to, rng),
        }

        path
    }

    /// Every tile the corridor occupies (the path plus any extra lane)
    pub fn footprint(&self, rng: &mut impl Rng) -> Vec<Position> {
        let path = self.path(rng);
        if self.shape != CorridorShape::Wide {
            return path;
        }

        let mut tiles = path.clone();
        for pair in path.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.y == b.y {
                tiles.push(Position::new(a.x, a.y + 1));
                tiles.push(Position::new(b.x, b.y + 1));
            } else {
                tiles.push(Position::new(a.x + 1, a.y));
                tiles.push(Position::new(b.x + 1, b.y));
            }
        }
        tiles.sort();
        tiles.dedup();
        tiles
    }

    /// Turn wall tiles under the corridor into corridor; returns tiles changed.
    /// The outer border ring is never touched.
    pub fn carve(&self, map: &mut Map, rng: &mut impl Rng) -> usize {
        let secret = self.shape == CorridorShape::Secret;
        let mut carved = 0;
        for pos in self.footprint(rng) {
            if !map.in_interior(pos.x, pos.y) {
                continue;
            }
            if map.kind_at(pos.x, pos.y) == Some(TileKind::Wall) {
                map.set_kind(pos.x, pos.y, TileKind::Corridor { secret });
                carved += 1;
            }
        }
        carved
    }
}

/// Step along x, then y, until reaching `target`
fn walk_to(path: &mut Vec<Position>, target: Position) {
    let mut cur = *path.last().unwrap_or(&target);
    while cur.x != target.x {
        cur.x += (target.x - cur.x).signum();
        path.push(cur);
    }
    while cur.y != target.y {
        cur.y += (target.y - cur.y).signum();
        path.push(cur);
    }
}

/// Biased random walk toward `target`; finishes straight if the budget runs out
fn wander_to(path: &mut Vec<Position>, target: Position, rng: &mut impl Rng) {
    let mut cur = *path.last().unwrap_or(&target);
    let budget = 4 * cur.distance(&target) + 20;

    for _ in 0..budget {
        if cur == target {
            return;
        }
        let dx = target.x - cur.x;
        let dy = target.y - cur.y;

        // Mostly close the larger gap, sometimes the other one, rarely sidestep
        let step = match rng.gen_range(0..10) {
            0 if dx == 0 => (if rng.gen_bool(0.5) { 1 } else { -1 }, 0),
            0 if dy == 0 => (0, if rng.gen_bool(0.5) { 1 } else { -1 }),
            0..=2 if dx != 0 && dy != 0 => {
                if dx.abs() > dy.abs() {
                    (0, dy.signum())
                } else {
                    (dx.signum(), 0)
                }
            }
            _ => {
                if dx.abs() >= dy.abs() {
                    (dx.signum(), 0)
                } else {
                    (0, dy.signum())
                }
            }
        };

        cur = Position::new(cur.x + step.0, cur.y + step.1);
        path.push(cur);
    }

    walk_to(path, target);
}
