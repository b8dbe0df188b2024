//! Reachability checks and repair
//!
//! The room chain can stop early and the redundant links are random, so some
//! rooms may end up cut off. Every room must be reachable from the entrance
//! room; unreached rooms get a forced corridor to the nearest reached one.

use std::collections::VecDeque;

use rand::rngs::StdRng;

use super::corridor::CorridorShape;
use super::routing::join_rooms;
use crate::world::{Map, Position, Room};

/// Which rooms the connection graph reaches from `start`
pub fn reachable_rooms(rooms: &[Room], start: usize) -> Vec<bool> {
    let mut seen = vec![false; rooms.len()];
    if start >= rooms.len() {
        return seen;
    }

    let mut queue = VecDeque::from([start]);
    seen[start] = true;
    while let Some(current) = queue.pop_front() {
        for &next in &rooms[current].connections {
            if next < seen.len() && !seen[next] {
                seen[next] = true;
                queue.push_back(next);
            }
        }
    }
    seen
}

/// Force-connect every room the graph can't reach from `start`; returns corridors added
pub fn ensure_connected(map: &mut Map, rooms: &mut [Room], start: usize, rng: &mut StdRng) -> usize {
    let mut forced = 0;

    for _ in 0..rooms.len() {
        let reached = reachable_rooms(rooms, start);
        if reached.iter().all(|&r| r) {
            break;
        }

        let closest = (0..rooms.len())
            .filter(|&u| !reached[u])
            .flat_map(|u| (0..rooms.len()).filter(|&r| reached[r]).map(move |r| (u, r)))
            .min_by_key(|&(u, r)| rooms[u].center().distance(&rooms[r].center()));

        let Some((lost, anchor)) = closest else {
            break;
        };

        log::debug!("Room {} unreachable, linking it to room {}", lost, anchor);
        if join_rooms(map, rooms, anchor, lost, CorridorShape::ZShaped, rng) {
            forced += 1;
        }
    }

    forced
}

/// Flood fill over non-blocking tiles; indexed like `map.tiles`
pub fn reachable_from(map: &Map, start: Position) -> Vec<bool> {
    let mut seen = vec![false; map.tiles.len()];
    if !map.is_walkable(start.x, start.y) {
        return seen;
    }

    let mut queue = VecDeque::from([start]);
    seen[map.xy_to_idx(start.x, start.y)] = true;
    while let Some(pos) = queue.pop_front() {
        for next in pos.cardinal_neighbors() {
            if !map.is_walkable(next.x, next.y) {
                continue;
            }
            let idx = map.xy_to_idx(next.x, next.y);
            if !seen[idx] {
                seen[idx] = true;
                queue.push_back(next);
            }
        }
    }
    seen
}

/// Rooms with no tile reachable on foot from `start`
pub fn unreachable_rooms(map: &Map, rooms: &[Room], start: Position) -> Vec<usize> {
    let seen = reachable_from(map, start);
    rooms
        .iter()
        .enumerate()
        .filter(|(_, room)| {
            !room
                .cells()
                .any(|p| map.in_bounds(p.x, p.y) && seen[map.xy_to_idx(p.x, p.y)])
        })
        .map(|(i, _)| i)
        .collect()
}
