//! Initial monster and item placement
//!
//! Decides where things go and how many, scaled by depth. Which monster or
//! which item is left to the catalogs.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use super::features::free_floor_cells;
use crate::data::{ItemCatalog, ItemCategory, MonsterCatalog};
use crate::world::{ContainerState, ItemPlacement, Map, MonsterPlacement, Position, Room, RoomKind, TileKind};

/// Gold on level 0; grows by half each level up to level 10
pub const GOLD_BASE: f64 = 10.0;
/// Linear gold bonus per level past 10
pub const GOLD_TAIL_PER_LEVEL: u32 = 50;
/// Most regular items stacked on one tile
pub const MAX_STACK: u32 = 5;
/// Chance each stacked item is followed by another
pub const STACK_CONTINUE_CHANCE: f64 = 0.35;
pub const CONTAINER_LOCKED_CHANCE: f64 = 0.3;
pub const CONTAINER_TRAPPED_CHANCE: f64 = 0.15;
pub const MONSTER_ASLEEP_CHANCE: f64 = 0.3;

/// Gold amount found on a level: `GOLD_BASE * 1.5^min(level, 10)` rounded
/// down to whole coins, plus `GOLD_TAIL_PER_LEVEL` for every level past 10.
/// Level 10 yields 576 (576.65 before rounding).
pub fn gold_amount(level: u32) -> u32 {
    let curve = GOLD_BASE * 1.5f64.powi(level.min(10) as i32);
    curve.floor() as u32 + GOLD_TAIL_PER_LEVEL * level.saturating_sub(10)
}

/// Monsters placed on a level: floor(3 + level / 2)
pub fn monster_count(level: u32) -> usize {
    3 + (level / 2) as usize
}

/// Per-room chance of a chest or box
pub fn container_chance(level: u32) -> f64 {
    (0.10 + 0.01 * level as f64).min(0.35)
}

/// Per-room chance of a stack of regular items
pub fn item_chance(level: u32) -> f64 {
    (0.30 + 0.01 * level as f64).min(0.60)
}

/// Per-room chance of a gold pile
pub fn gold_chance(level: u32) -> f64 {
    (0.20 + 0.005 * level as f64).min(0.40)
}

/// What the population pass placed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Population {
    pub monsters: Vec<MonsterPlacement>,
    pub items: Vec<ItemPlacement>,
}

/// Places monsters and items for one level
pub struct Populator<'a> {
    pub level: u32,
    pub monsters: &'a dyn MonsterCatalog,
    pub items: &'a dyn ItemCatalog,
}

impl<'a> Populator<'a> {
    pub fn new(level: u32, monsters: &'a dyn MonsterCatalog, items: &'a dyn ItemCatalog) -> Self {
        Self { level, monsters, items }
    }

    /// Run the whole pass; `protected` tiles (stairs, entrance) stay empty
    pub fn populate(&self, map: &Map, rooms: &[Room], protected: &[Position], rng: &mut StdRng) -> Population {
        let mut population = Population::default();

        for room in rooms {
            let cells = free_floor_cells(map, room, protected);
            if cells.is_empty() {
                continue;
            }
            self.populate_room(room, &cells, &mut population.items, rng);
        }

        population.monsters = self.place_monsters(map, rooms, protected, rng);
        log::debug!(
            "Level {}: placed {} monsters and {} items",
            self.level,
            population.monsters.len(),
            population.items.len()
        );
        population
    }

    /// Independent draws for one room: container, item stack, gold, archetype extras
    fn populate_room(&self, room: &Room, cells: &[Position], items: &mut Vec<ItemPlacement>, rng: &mut StdRng) {
        if rng.gen_bool(container_chance(self.level)) {
            if let Some(&pos) = cells.choose(rng) {
                let state = ContainerState {
                    locked: rng.gen_bool(CONTAINER_LOCKED_CHANCE),
                    trapped: rng.gen_bool(CONTAINER_TRAPPED_CHANCE),
                };
                let mut chest = self.item(pos, ItemCategory::Container, 1, rng);
                chest.container = Some(state);
                items.push(chest);
            }
        }

        if rng.gen_bool(item_chance(self.level)) {
            if let Some(&pos) = cells.choose(rng) {
                self.push_stack(pos, ItemCategory::Any, items, rng);
            }
        }

        if rng.gen_bool(gold_chance(self.level)) {
            if let Some(&pos) = cells.choose(rng) {
                items.push(self.gold(pos, rng));
            }
        }

        self.stock_special_room(room.kind, cells, items, rng);
    }

    /// Archetype-specific stock for special rooms
    fn stock_special_room(&self, kind: RoomKind, cells: &[Position], items: &mut Vec<ItemPlacement>, rng: &mut StdRng) {
        let picks: Vec<ItemCategory> = match kind {
            RoomKind::Normal => return,
            RoomKind::Shop => {
                let count = rng.gen_range(3..=5);
                (0..count).map(|_| ItemCategory::Any).collect()
            }
            RoomKind::Library => vec![ItemCategory::Scroll; rng.gen_range(2..=4)],
            RoomKind::Armory => vec![ItemCategory::Weapon, ItemCategory::Armor, ItemCategory::Weapon],
            RoomKind::Treasury => {
                for _ in 0..2 {
                    if let Some(&pos) = cells.choose(rng) {
                        items.push(self.gold(pos, rng));
                    }
                }
                return;
            }
            RoomKind::Temple => vec![ItemCategory::Potion; rng.gen_range(1..=3)],
        };

        for category in picks {
            if let Some(&pos) = cells.choose(rng) {
                items.push(self.item(pos, category, 1, rng));
            }
        }
    }

    /// One item, then more on the same tile while the continuation roll holds
    fn push_stack(&self, pos: Position, category: ItemCategory, items: &mut Vec<ItemPlacement>, rng: &mut StdRng) {
        let mut stacked = 0;
        loop {
            items.push(self.item(pos, category, 1, rng));
            stacked += 1;
            if stacked >= MAX_STACK || !rng.gen_bool(STACK_CONTINUE_CHANCE) {
                break;
            }
        }
    }

    fn item(&self, position: Position, category: ItemCategory, quantity: u32, rng: &mut StdRng) -> ItemPlacement {
        ItemPlacement {
            position,
            id: self.items.pick_item(self.level, category, rng),
            category,
            quantity,
            container: None,
        }
    }

    fn gold(&self, position: Position, rng: &mut StdRng) -> ItemPlacement {
        self.item(position, ItemCategory::Gold, gold_amount(self.level), rng)
    }

    /// Exactly `monster_count(level)` monsters on uniformly random room tiles.
    /// Tiles are only reused once every candidate holds a monster.
    fn place_monsters(&self, map: &Map, rooms: &[Room], protected: &[Position], rng: &mut StdRng) -> Vec<MonsterPlacement> {
        let mut candidates: Vec<Position> = if rooms.is_empty() {
            map.positions_where(|t| t.kind == TileKind::Floor)
                .into_iter()
                .filter(|p| !protected.contains(p))
                .collect()
        } else {
            rooms
                .iter()
                .flat_map(|room| free_floor_cells(map, room, protected))
                .collect()
        };
        if candidates.is_empty() {
            log::warn!("Level {}: nowhere to place monsters", self.level);
            return Vec::new();
        }
        candidates.shuffle(rng);

        (0..monster_count(self.level))
            .map(|i| MonsterPlacement {
                position: candidates[i % candidates.len()],
                id: self.monsters.pick_monster(self.level, rng),
                asleep: rng.gen_bool(MONSTER_ASLEEP_CHANCE),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StaticCatalog;
    use crate::world::generation::rooms::carve_room;
    use rand::SeedableRng;

    fn level_map() -> (Map, Vec<Room>) {
        let mut map = Map::new(60, 24);
        let mut rooms = vec![
            Room::new(2, 2, 8, 6),
            Room::new(20, 3, 9, 7),
            Room::new(40, 10, 10, 8),
        ];
        rooms[1].kind = RoomKind::Shop;
        for (i, r) in rooms.iter().enumerate() {
            carve_room(&mut map, r, i);
        }
        (map, rooms)
    }

    #[test]
    fn test_gold_formula() {
        let at_ten = (GOLD_BASE * 1.5f64.powi(10)).floor() as u32;
        assert_eq!(gold_amount(10), at_ten);
        assert_eq!(gold_amount(10), 576);
        assert_eq!(gold_amount(15), at_ten + 5 * 50);
        assert_eq!(gold_amount(1), 15);
        assert!(gold_amount(5) < gold_amount(6));
    }

    #[test]
    fn test_monster_count_formula() {
        assert_eq!(monster_count(1), 3);
        assert_eq!(monster_count(2), 4);
        assert_eq!(monster_count(7), 6);
        assert_eq!(monster_count(100), 53);
        for level in 1..=100u32 {
            assert_eq!(monster_count(level), (3.0 + 0.5 * level as f64).floor() as usize);
        }
    }

    #[test]
    fn test_chances_scale_and_cap() {
        assert!(container_chance(1) < container_chance(20));
        assert_eq!(container_chance(100), 0.35);
        assert_eq!(item_chance(100), 0.60);
        assert_eq!(gold_chance(100), 0.40);
    }

    #[test]
    fn test_monsters_exact_count_on_room_tiles() {
        let (map, rooms) = level_map();
        let catalog = StaticCatalog::default();
        for level in [1, 9, 40] {
            let mut rng = StdRng::seed_from_u64(level as u64);
            let protected = [Position::new(3, 3)];
            let pop = Populator::new(level, &catalog, &catalog).populate(&map, &rooms, &protected, &mut rng);

            assert_eq!(pop.monsters.len(), monster_count(level));
            for m in &pop.monsters {
                assert!(rooms.iter().any(|r| r.contains(m.position)));
                assert_ne!(m.position, Position::new(3, 3));
            }
        }
    }

    #[test]
    fn test_monsters_do_not_stack_while_space_remains() {
        let (map, rooms) = level_map();
        let catalog = StaticCatalog::default();
        let mut rng = StdRng::seed_from_u64(3);
        let pop = Populator::new(30, &catalog, &catalog).populate(&map, &rooms, &[], &mut rng);

        let mut spots: Vec<Position> = pop.monsters.iter().map(|m| m.position).collect();
        spots.sort();
        spots.dedup();
        assert_eq!(spots.len(), pop.monsters.len());
    }

    #[test]
    fn test_crowded_level_still_gets_every_monster() {
        let mut map = Map::new(10, 10);
        let rooms = vec![Room::new(2, 2, 4, 4)];
        carve_room(&mut map, &rooms[0], 0);
        let catalog = StaticCatalog::default();
        let mut rng = StdRng::seed_from_u64(0);

        let pop = Populator::new(60, &catalog, &catalog).populate(&map, &rooms, &[], &mut rng);
        assert_eq!(pop.monsters.len(), monster_count(60));
    }

    #[test]
    fn test_items_stay_in_rooms_and_stacks_are_bounded() {
        let (map, rooms) = level_map();
        let catalog = StaticCatalog::default();
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pop = Populator::new(12, &catalog, &catalog).populate(&map, &rooms, &[], &mut rng);
            for item in &pop.items {
                assert!(rooms.iter().any(|r| r.contains(item.position)));
                match item.category {
                    ItemCategory::Gold => assert_eq!(item.quantity, gold_amount(12)),
                    ItemCategory::Container => assert!(item.container.is_some()),
                    _ => assert!(item.container.is_none()),
                }
            }
            let regular_on_tile = |p: Position| {
                pop.items
                    .iter()
                    .filter(|i| i.position == p && i.category == ItemCategory::Any)
                    .count()
            };
            // The shop adds loose items, so only count the normal rooms
            for room in [&rooms[0], &rooms[2]] {
                for p in room.cells() {
                    assert!(regular_on_tile(p) <= MAX_STACK as usize);
                }
            }
        }
    }

    #[test]
    fn test_shop_is_stocked() {
        let (map, rooms) = level_map();
        let catalog = StaticCatalog::default();
        let mut rng = StdRng::seed_from_u64(21);
        let pop = Populator::new(5, &catalog, &catalog).populate(&map, &rooms, &[], &mut rng);
        let in_shop = pop.items.iter().filter(|i| rooms[1].contains(i.position)).count();
        assert!(in_shop >= 3);
    }

    #[test]
    fn test_roomless_layout_uses_floor_tiles() {
        let mut map = Map::new(12, 12);
        for y in 3..8 {
            for x in 3..8 {
                map.set_kind(x, y, TileKind::Floor);
            }
        }
        let catalog = StaticCatalog::default();
        let mut rng = StdRng::seed_from_u64(0);
        let pop = Populator::new(4, &catalog, &catalog).populate(&map, &[], &[], &mut rng);
        assert_eq!(pop.monsters.len(), monster_count(4));
        assert!(pop.items.is_empty());
    }
}
