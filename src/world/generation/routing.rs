//! Corridor routing and door placement
//!
//! Rooms are chained in traversal order, then loosely cross-linked:
//! 1. join room i to room i+1, with a small chance of stopping the chain early
//! 2. join room i to room i+2 about half the time
//! 3. turn corridor tiles that touch room floor into doors

use rand::rngs::StdRng;
use rand::Rng;

use super::corridor::{Corridor, CorridorShape};
use crate::config::GeneratorConfig;
use crate::world::{Door, Map, Position, Room, TileKind};

/// Run the primary chain and the redundant pass; returns corridors dug
pub fn connect_rooms(map: &mut Map, rooms: &mut [Room], config: &GeneratorConfig, rng: &mut StdRng) -> usize {
    if rooms.len() < 2 {
        return 0;
    }

    let mut joined = 0;

    for i in 0..rooms.len() - 1 {
        let horizontal_first = rng.gen_bool(0.5);
        if join_rooms(map, rooms, i, i + 1, CorridorShape::LShaped { horizontal_first }, rng) {
            joined += 1;
        }
        if rng.gen_bool(config.early_stop_chance) {
            log::debug!("Room chain stopped early after room {}", i);
            break;
        }
    }

    for i in 0..rooms.len().saturating_sub(2) {
        if rng.gen_bool(config.redundant_connection_chance) {
            let horizontal_first = rng.gen_bool(0.5);
            if join_rooms(map, rooms, i, i + 2, CorridorShape::LShaped { horizontal_first }, rng) {
                joined += 1;
            }
        }
    }

    joined
}

/// Dig a corridor between two room centers and record the link.
/// Already-connected pairs are left alone.
pub fn join_rooms(
    map: &mut Map,
    rooms: &mut [Room],
    a: usize,
    b: usize,
    shape: CorridorShape,
    rng: &mut StdRng,
) -> bool {
    if a == b || a >= rooms.len() || b >= rooms.len() || rooms[a].is_connected_to(b) {
        return false;
    }

    Corridor::new(rooms[a].center(), rooms[b].center(), shape).carve(map, rng);

    rooms[a].connections.insert(b);
    rooms[b].connections.insert(a);
    true
}

/// Convert corridor tiles bordering room floor into doors; returns doors made.
/// Running it again changes nothing.
pub fn place_doors(map: &mut Map, rooms: &mut [Room], config: &GeneratorConfig, rng: &mut StdRng) -> usize {
    let mut candidates: Vec<(Position, Option<usize>, bool)> = Vec::new();

    for y in 1..map.height - 1 {
        for x in 1..map.width - 1 {
            let hidden_corridor = match map.kind_at(x, y) {
                Some(kind @ TileKind::Corridor { .. }) => kind.is_secret(),
                _ => continue,
            };
            let pos = Position::new(x, y);
            let bordering_room = pos
                .cardinal_neighbors()
                .iter()
                .filter_map(|n| map.get_tile(n.x, n.y))
                .find(|t| t.kind == TileKind::Floor)
                .map(|t| t.room);
            if let Some(room) = bordering_room {
                candidates.push((pos, room, hidden_corridor));
            }
        }
    }

    for &(pos, room, hidden_corridor) in &candidates {
        let door = Door {
            position: pos,
            open: false,
            locked: rng.gen_bool(config.locked_door_chance),
            secret: hidden_corridor || rng.gen_bool(config.secret_door_chance),
        };
        map.set_kind(
            pos.x,
            pos.y,
            TileKind::Door {
                open: door.open,
                locked: door.locked,
                secret: door.secret,
            },
        );
        if let Some(room) = room.and_then(|idx| rooms.get_mut(idx)) {
            room.doors.push(door);
        }
    }

    candidates.len()
}
