//! Level features: stairs, the special room, traps and theme dressing

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::world::{Graffiti, Map, Position, Room, RoomKind, Stairs, Theme, TileKind, Trap, TrapKind};

/// Which rooms hold the up- and down-stairs.
///
/// Chosen once, right after sequencing, and stored on the level so later
/// stages never have to assume "first" and "last".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StairRooms {
    pub entrance: usize,
    pub exit: usize,
}

impl StairRooms {
    /// First room in traversal order holds the entrance, last holds the exit
    pub fn select(rooms: &[Room]) -> Option<Self> {
        if rooms.is_empty() {
            return None;
        }
        Some(Self {
            entrance: 0,
            exit: rooms.len() - 1,
        })
    }
}

/// Result of stair placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StairPlacement {
    pub stairs: Stairs,
    pub entrance: Position,
    pub exit: Option<Position>,
}

impl StairPlacement {
    /// Tiles later features must leave alone
    pub fn protected(&self) -> Vec<Position> {
        let mut tiles = vec![self.stairs.up, self.entrance];
        tiles.extend(self.stairs.down);
        tiles
    }
}

/// Floor tiles of a room not in `protected`
pub fn free_floor_cells(map: &Map, room: &Room, protected: &[Position]) -> Vec<Position> {
    room.cells()
        .filter(|p| map.kind_at(p.x, p.y) == Some(TileKind::Floor))
        .filter(|p| !protected.contains(p))
        .collect()
}

/// Put up-stairs and the entrance in the entrance room, down-stairs in the exit room
pub fn place_stairs(
    map: &mut Map,
    rooms: &[Room],
    stair_rooms: StairRooms,
    final_level: bool,
    rng: &mut StdRng,
) -> StairPlacement {
    let entrance_room = &rooms[stair_rooms.entrance];
    let up = free_floor_cells(map, entrance_room, &[])
        .choose(rng)
        .copied()
        .unwrap_or_else(|| entrance_room.center());
    map.set_kind(up.x, up.y, TileKind::StairsUp);

    let entrance = free_floor_cells(map, entrance_room, &[])
        .choose(rng)
        .copied()
        .unwrap_or(up);

    let down = if final_level {
        None
    } else {
        let exit_room = &rooms[stair_rooms.exit];
        let down = free_floor_cells(map, exit_room, &[entrance]).choose(rng).copied();
        if let Some(pos) = down {
            map.set_kind(pos.x, pos.y, TileKind::StairsDown);
        }
        down
    };

    StairPlacement {
        stairs: Stairs { up, down },
        entrance,
        exit: down,
    }
}

/// Give one non-stair room a special archetype (level 2+, three or more rooms)
pub fn assign_special_room(
    map: &mut Map,
    rooms: &mut [Room],
    stair_rooms: StairRooms,
    level: u32,
    rng: &mut StdRng,
) -> Option<usize> {
    if level < 2 || rooms.len() < 3 {
        return None;
    }

    let candidates: Vec<usize> = (0..rooms.len())
        .filter(|&i| i != stair_rooms.entrance && i != stair_rooms.exit)
        .collect();
    let index = *candidates.choose(rng)?;
    let kind = *RoomKind::SPECIAL.choose(rng)?;

    rooms[index].kind = kind;
    for pos in rooms[index].cells() {
        if let Some(tile) = map.get_tile_mut(pos.x, pos.y) {
            tile.special = true;
        }
    }
    log::debug!("Room {} is a {}", index, kind.name());
    Some(index)
}

/// Trap kinds available at a level; the pool grows every ten levels
pub fn trap_pool(level: u32) -> &'static [TrapKind] {
    let size = (3 + level.saturating_sub(1) as usize / 10).min(TrapKind::ALL.len());
    &TrapKind::ALL[..size]
}

/// Each room independently rolls for one hidden trap
pub fn place_traps(
    map: &mut Map,
    rooms: &[Room],
    level: u32,
    trap_chance: f64,
    protected: &[Position],
    rng: &mut StdRng,
) -> Vec<Trap> {
    let pool = trap_pool(level);
    let mut traps = Vec::new();

    for room in rooms {
        if !rng.gen_bool(trap_chance) {
            continue;
        }
        let Some(&pos) = free_floor_cells(map, room, protected).choose(rng) else {
            continue;
        };
        let Some(&kind) = pool.choose(rng) else {
            continue;
        };
        map.set_kind(pos.x, pos.y, TileKind::Trap { trap: kind });
        log::debug!("Hidden {} at ({}, {})", kind.name(), pos.x, pos.y);
        traps.push(Trap {
            position: pos,
            kind,
            revealed: false,
        });
    }

    traps
}

/// Theme flavor: graffiti anywhere, lava where the theme allows it
pub fn dress_theme(
    map: &mut Map,
    rooms: &[Room],
    theme: Theme,
    protected: &[Position],
    rng: &mut StdRng,
) -> Vec<Graffiti> {
    let config = theme.config();
    let mut graffiti = Vec::new();

    if !rooms.is_empty() && rng.gen_bool(config.graffiti_chance) {
        let count = rng.gen_range(1..=2);
        for _ in 0..count {
            let Some(room) = rooms.choose(rng) else {
                break;
            };
            let spot = free_floor_cells(map, room, protected).choose(rng).copied();
            let text = config.graffiti.choose(rng);
            if let (Some(position), Some(text)) = (spot, text) {
                graffiti.push(Graffiti {
                    position,
                    text: text.to_string(),
                });
            }
        }
    }

    if config.lava_chance > 0.0 {
        for room in rooms {
            if rng.gen_bool(config.lava_chance) {
                if let Some(&pos) = free_floor_cells(map, room, protected).choose(rng) {
                    map.set_kind(pos.x, pos.y, TileKind::Lava);
                }
            }
        }
    }

    graffiti
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::generation::rooms::carve_room;
    use rand::SeedableRng;

    fn three_rooms() -> (Map, Vec<Room>) {
        let mut map = Map::new(50, 20);
        let rooms = vec![
            Room::new(2, 2, 5, 5),
            Room::new(15, 3, 6, 5),
            Room::new(30, 4, 7, 6),
        ];
        for (i, r) in rooms.iter().enumerate() {
            carve_room(&mut map, r, i);
        }
        (map, rooms)
    }

    #[test]
    fn test_stair_rooms_selection() {
        let (_, rooms) = three_rooms();
        assert_eq!(StairRooms::select(&rooms), Some(StairRooms { entrance: 0, exit: 2 }));
        assert_eq!(StairRooms::select(&rooms[..1]), Some(StairRooms { entrance: 0, exit: 0 }));
        assert_eq!(StairRooms::select(&[]), None);
    }

    #[test]
    fn test_stairs_and_entrance() {
        let (mut map, rooms) = three_rooms();
        let mut rng = StdRng::seed_from_u64(2);
        let stair_rooms = StairRooms::select(&rooms).unwrap();
        let placed = place_stairs(&mut map, &rooms, stair_rooms, false, &mut rng);

        assert!(rooms[0].contains(placed.stairs.up));
        assert_eq!(map.kind_at(placed.stairs.up.x, placed.stairs.up.y), Some(TileKind::StairsUp));
        assert!(rooms[0].contains(placed.entrance));
        assert_eq!(map.kind_at(placed.entrance.x, placed.entrance.y), Some(TileKind::Floor));

        let down = placed.stairs.down.unwrap();
        assert!(rooms[2].contains(down));
        assert_eq!(placed.exit, Some(down));
        assert_eq!(map.kind_at(down.x, down.y), Some(TileKind::StairsDown));
    }

    #[test]
    fn test_final_level_has_no_way_down() {
        let (mut map, rooms) = three_rooms();
        let mut rng = StdRng::seed_from_u64(2);
        let placed = place_stairs(&mut map, &rooms, StairRooms::select(&rooms).unwrap(), true, &mut rng);
        assert!(placed.stairs.down.is_none());
        assert!(placed.exit.is_none());
        assert_eq!(map.count_where(|t| t.kind == TileKind::StairsDown), 0);
    }

    #[test]
    fn test_single_room_holds_both_stairs() {
        let (mut map, rooms) = three_rooms();
        let rooms = &rooms[..1];
        let mut rng = StdRng::seed_from_u64(8);
        let placed = place_stairs(&mut map, rooms, StairRooms::select(rooms).unwrap(), false, &mut rng);
        let down = placed.stairs.down.unwrap();
        assert!(rooms[0].contains(placed.stairs.up));
        assert!(rooms[0].contains(down));
        assert_ne!(down, placed.stairs.up);
        assert_ne!(down, placed.entrance);
    }

    #[test]
    fn test_special_room_skips_stair_rooms() {
        for seed in 0..20 {
            let (mut map, mut rooms) = three_rooms();
            let mut rng = StdRng::seed_from_u64(seed);
            let stair_rooms = StairRooms::select(&rooms).unwrap();
            let special = assign_special_room(&mut map, &mut rooms, stair_rooms, 3, &mut rng);

            assert_eq!(special, Some(1));
            assert!(rooms[1].is_special());
            let c = rooms[1].center();
            assert!(map.get_tile(c.x, c.y).unwrap().special);
            assert!(!rooms[0].is_special());
        }
    }

    #[test]
    fn test_no_special_room_on_level_one() {
        let (mut map, mut rooms) = three_rooms();
        let mut rng = StdRng::seed_from_u64(0);
        let stair_rooms = StairRooms::select(&rooms).unwrap();
        assert_eq!(assign_special_room(&mut map, &mut rooms, stair_rooms, 1, &mut rng), None);
        assert!(rooms.iter().all(|r| !r.is_special()));
    }

    #[test]
    fn test_trap_pool_widens() {
        assert_eq!(trap_pool(1).len(), 3);
        assert_eq!(trap_pool(10).len(), 3);
        assert_eq!(trap_pool(11).len(), 4);
        assert_eq!(trap_pool(51).len(), 8);
        assert_eq!(trap_pool(100).len(), 8);
    }

    #[test]
    fn test_traps_avoid_protected_tiles() {
        let (mut map, rooms) = three_rooms();
        let mut rng = StdRng::seed_from_u64(4);
        let protected: Vec<Position> = rooms[0].cells().skip(1).collect();
        let traps = place_traps(&mut map, &rooms, 60, 1.0, &protected, &mut rng);

        assert_eq!(traps.len(), 3);
        assert_eq!(traps[0].position, Position::new(2, 2));
        for trap in &traps {
            assert!(!trap.revealed);
            assert_eq!(map.kind_at(trap.position.x, trap.position.y), Some(TileKind::Trap { trap: trap.kind }));
        }
    }

    #[test]
    fn test_volcano_can_pour_lava_and_others_cannot() {
        let (mut map, rooms) = three_rooms();
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..10 {
            dress_theme(&mut map, &rooms, Theme::Dungeon, &[], &mut rng);
        }
        assert_eq!(map.count_where(|t| t.kind == TileKind::Lava), 0);

        for _ in 0..20 {
            dress_theme(&mut map, &rooms, Theme::Volcano, &[], &mut rng);
        }
        assert!(map.count_where(|t| t.kind == TileKind::Lava) > 0);
    }

    #[test]
    fn test_graffiti_lands_on_floor_with_theme_text() {
        let (mut map, rooms) = three_rooms();
        let mut rng = StdRng::seed_from_u64(1);
        let mut all = Vec::new();
        for _ in 0..40 {
            all.extend(dress_theme(&mut map, &rooms, Theme::Crypt, &[], &mut rng));
        }
        assert!(!all.is_empty());
        let lines = Theme::Crypt.config().graffiti;
        for g in &all {
            assert!(lines.contains(&g.text.as_str()));
            assert!(rooms.iter().any(|r| r.contains(g.position)));
        }
    }
}
