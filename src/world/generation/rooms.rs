//! Room placement
//!
//! Rejection sampling of rectangular rooms. Running out of trials is fine:
//! the level just has fewer rooms.

use rand::rngs::StdRng;
use rand::Rng;

use crate::config::GeneratorConfig;
use crate::world::{Map, Room, TileKind};

/// Tiles kept clear between a room and the map edge
const MAP_BORDER: i32 = 2;
/// Wall tiles required between two rooms
const ROOM_BUFFER: i32 = 1;

/// Place and carve rooms; returns them in placement order
pub fn place_rooms(map: &mut Map, config: &GeneratorConfig, rng: &mut StdRng) -> Vec<Room> {
    let target = rng.gen_range(config.min_rooms..config.max_rooms);

    // Exclusive size bounds, shrunk so a room always fits inside the border
    let max_w = config.max_room_size.min(map.width - 2 * MAP_BORDER + 1);
    let max_h = config.max_room_size.min(map.height - 2 * MAP_BORDER + 1);
    if max_w <= config.min_room_size || max_h <= config.min_room_size {
        log::warn!("Map {}x{} too small for any room", map.width, map.height);
        return Vec::new();
    }

    let mut rooms: Vec<Room> = Vec::with_capacity(target);

    for _ in 0..config.placement_trials {
        if rooms.len() >= target {
            break;
        }

        let w = rng.gen_range(config.min_room_size..max_w);
        let h = rng.gen_range(config.min_room_size..max_h);
        let x = rng.gen_range(MAP_BORDER..=map.width - w - MAP_BORDER);
        let y = rng.gen_range(MAP_BORDER..=map.height - h - MAP_BORDER);

        let candidate = Room::new(x, y, w, h);
        if !fits_in_bounds(map, &candidate) {
            continue;
        }
        if rooms.iter().any(|r| candidate.intersects(r, ROOM_BUFFER)) {
            continue;
        }

        carve_room(map, &candidate, rooms.len());
        rooms.push(candidate);
    }

    if rooms.len() < target {
        log::debug!(
            "Placed {} of {} rooms after {} trials",
            rooms.len(),
            target,
            config.placement_trials
        );
    }

    rooms
}

/// Room lies inside the map minus its 1-tile border ring
pub fn fits_in_bounds(map: &Map, room: &Room) -> bool {
    room.x >= 1 && room.y >= 1 && room.x2() <= map.width - 2 && room.y2() <= map.height - 2
}

/// Carve out a room and tag its tiles
pub fn carve_room(map: &mut Map, room: &Room, index: usize) {
    for pos in room.cells() {
        if let Some(tile) = map.get_tile_mut(pos.x, pos.y) {
            tile.kind = TileKind::Floor;
            tile.room = Some(index);
        }
    }
}

/// Re-stamp room indices after the rooms have been reordered
pub fn retag_rooms(map: &mut Map, rooms: &[Room]) {
    for (index, room) in rooms.iter().enumerate() {
        for pos in room.cells() {
            if let Some(tile) = map.get_tile_mut(pos.x, pos.y) {
                tile.room = Some(index);
            }
        }
    }
}
