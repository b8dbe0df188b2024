//! Procedural level generation
//!
//! One call builds one level: boss layout check, room placement, traversal
//! order, corridors, connectivity repair, doors, stairs, the special room,
//! traps, theme dressing and finally population.

pub mod boss;
pub mod connectivity;
pub mod corridor;
pub mod features;
pub mod population;
pub mod rooms;
pub mod routing;
pub mod sequence;

pub use boss::{BossLayout, BossLevelSource, FileBossSource, InMemoryBossSource};
pub use corridor::{Corridor, CorridorShape};
pub use features::StairRooms;
pub use population::{Population, Populator};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{GeneratorConfig, MIN_ROOM_SIZE};
use crate::data::{default_catalog, ItemCatalog, MonsterCatalog};
use crate::events::{LevelEvent, LevelObserver};
use crate::world::{Dungeon, Map, Position, Stairs, Theme, TileKind};

use boss::AdoptedLayout;
use connectivity::ensure_connected;
use features::{assign_special_room, dress_theme, place_stairs, place_traps};
use rooms::{place_rooms, retag_rooms};
use routing::{connect_rooms, place_doors};
use sequence::sequence_rooms;

/// Smallest map edge the generator accepts
pub const MIN_MAP_SIZE: i32 = MIN_ROOM_SIZE + 4;
/// Largest map edge the generator accepts
pub const MAX_MAP_SIZE: i32 = 512;

/// Builds levels. Holds only shared, read-only collaborators, so one instance
/// can serve several threads.
pub struct DungeonGenerator {
    config: GeneratorConfig,
    monsters: Box<dyn MonsterCatalog>,
    items: Box<dyn ItemCatalog>,
    boss_source: Box<dyn BossLevelSource>,
    observers: Vec<Box<dyn LevelObserver>>,
}

impl Default for DungeonGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl DungeonGenerator {
    /// Generator with the built-in catalog and boss layouts from `config.boss_dir()`.
    /// Out-of-range tunables are repaired first.
    pub fn new(config: GeneratorConfig) -> Self {
        let config = config.sanitized();
        let boss_source = FileBossSource::new(config.boss_dir());
        Self {
            config,
            monsters: Box::new(default_catalog()),
            items: Box::new(default_catalog()),
            boss_source: Box::new(boss_source),
            observers: Vec::new(),
        }
    }

    pub fn with_monsters(mut self, catalog: impl MonsterCatalog + 'static) -> Self {
        self.monsters = Box::new(catalog);
        self
    }

    pub fn with_items(mut self, catalog: impl ItemCatalog + 'static) -> Self {
        self.items = Box::new(catalog);
        self
    }

    pub fn with_boss_source(mut self, source: impl BossLevelSource + 'static) -> Self {
        self.boss_source = Box::new(source);
        self
    }

    pub fn with_observer(mut self, observer: impl LevelObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn emit(&self, event: LevelEvent) {
        for observer in &self.observers {
            observer.on_event(&event);
        }
    }

    /// Build a level. Without a seed one is drawn from entropy and recorded on
    /// the result, so any level can be reproduced.
    pub fn generate(&self, level: u32, width: i32, height: i32, seed: Option<u64>) -> Dungeon {
        let (level, width, height) = self.clamp_inputs(level, width, height);
        let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
        self.emit(LevelEvent::GenerationStarted { level, seed });

        let mut rng = StdRng::seed_from_u64(seed);

        let dungeon = if self.config.is_boss_level(level) {
            match self.boss_source.fetch(level).and_then(BossLayout::adopt) {
                Ok(adopted) => {
                    self.emit(LevelEvent::BossLayoutAdopted {
                        level,
                        boss: adopted.boss.clone(),
                    });
                    self.build_boss(level, seed, adopted, &mut rng)
                }
                Err(e) => {
                    log::warn!("Boss layout for level {} unusable: {}", level, e);
                    self.emit(LevelEvent::BossLayoutFallback {
                        level,
                        reason: e.to_string(),
                    });
                    self.build_procedural(level, seed, width, height, &mut rng)
                }
            }
        } else {
            self.build_procedural(level, seed, width, height, &mut rng)
        };

        self.emit(LevelEvent::LevelGenerated {
            level,
            theme: dungeon.theme,
            rooms: dungeon.rooms.len(),
            monsters: dungeon.monsters.len(),
            items: dungeon.items.len(),
        });
        dungeon
    }

    fn clamp_inputs(&self, level: u32, width: i32, height: i32) -> (u32, i32, i32) {
        let max_level = self.config.max_level;
        let clamped_level = level.clamp(1, max_level);
        if clamped_level != level {
            log::warn!("Level {} out of range, using {}", level, clamped_level);
        }

        let clamp_edge = |name: &str, value: i32| {
            if value < MIN_MAP_SIZE {
                log::warn!("Map {} {} too small, using {}", name, value, MIN_MAP_SIZE);
                MIN_MAP_SIZE
            } else if value > MAX_MAP_SIZE {
                log::warn!("Map {} {} too large, using {}", name, value, MAX_MAP_SIZE);
                MAX_MAP_SIZE
            } else {
                value
            }
        };

        (clamped_level, clamp_edge("width", width), clamp_edge("height", height))
    }

    fn build_procedural(&self, level: u32, seed: u64, width: i32, height: i32, rng: &mut StdRng) -> Dungeon {
        let theme = Theme::for_level(level);
        let mut map = Map::new(width, height);

        let placed = place_rooms(&mut map, &self.config, rng);
        let mut rooms = sequence_rooms(placed, self.config.row_tolerance);
        retag_rooms(&mut map, &rooms);
        log::debug!("Level {}: {} rooms placed", level, rooms.len());

        let Some(stair_rooms) = StairRooms::select(&rooms) else {
            log::warn!("Level {}: no room fits a {}x{} map", level, width, height);
            return Self::roomless(level, seed, map, theme);
        };

        let corridors = connect_rooms(&mut map, &mut rooms, &self.config, rng);
        let forced = ensure_connected(&mut map, &mut rooms, stair_rooms.entrance, rng);
        if forced > 0 {
            self.emit(LevelEvent::ConnectivityRepaired {
                level,
                forced_connections: forced,
            });
        }
        let doors = place_doors(&mut map, &mut rooms, &self.config, rng);
        log::debug!(
            "Level {}: {} corridors, {} forced, {} doors",
            level,
            corridors,
            forced,
            doors
        );

        let placement = place_stairs(&mut map, &rooms, stair_rooms, self.config.is_final_level(level), rng);
        assign_special_room(&mut map, &mut rooms, stair_rooms, level, rng);

        let protected = placement.protected();
        let traps = place_traps(&mut map, &rooms, level, self.config.trap_chance, &protected, rng);
        let graffiti = dress_theme(&mut map, &rooms, theme, &protected, rng);

        let population =
            Populator::new(level, self.monsters.as_ref(), self.items.as_ref()).populate(&map, &rooms, &protected, rng);

        Dungeon {
            level,
            seed,
            map,
            rooms,
            traps,
            stairs: placement.stairs,
            entrance: Some(placement.entrance),
            exit: placement.exit,
            entrance_room: Some(stair_rooms.entrance),
            exit_room: placement.exit.map(|_| stair_rooms.exit),
            theme,
            monsters: population.monsters,
            items: population.items,
            graffiti,
            boss: None,
        }
    }

    /// Map too small for a room: a lone up-stair tile in the middle, which is
    /// also where the player arrives
    fn roomless(level: u32, seed: u64, mut map: Map, theme: Theme) -> Dungeon {
        let up = Position::new(map.width / 2, map.height / 2);
        map.set_kind(up.x, up.y, TileKind::StairsUp);
        Dungeon {
            level,
            seed,
            map,
            rooms: Vec::new(),
            traps: Vec::new(),
            stairs: Stairs { up, down: None },
            entrance: Some(up),
            exit: None,
            entrance_room: None,
            exit_room: None,
            theme,
            monsters: Vec::new(),
            items: Vec::new(),
            graffiti: Vec::new(),
            boss: None,
        }
    }

    fn build_boss(&self, level: u32, seed: u64, layout: AdoptedLayout, rng: &mut StdRng) -> Dungeon {
        let AdoptedLayout {
            map,
            rooms,
            mut monsters,
            mut items,
            traps,
            stairs,
            theme,
            entrance,
            exit,
            boss,
        } = layout;

        let mut protected = vec![stairs.up];
        protected.extend(stairs.down);
        protected.extend(entrance);
        protected.extend(monsters.iter().map(|m| m.position));
        protected.extend(items.iter().map(|i| i.position));

        let population =
            Populator::new(level, self.monsters.as_ref(), self.items.as_ref()).populate(&map, &rooms, &protected, rng);
        monsters.extend(population.monsters);
        items.extend(population.items);

        let room_holding = |pos: Option<Position>| pos.and_then(|p| rooms.iter().position(|r| r.contains(p)));
        let entrance_room = room_holding(entrance.or(Some(stairs.up)));
        let exit_room = room_holding(exit);

        Dungeon {
            level,
            seed,
            map,
            rooms,
            traps,
            stairs,
            entrance,
            exit,
            entrance_room,
            exit_room,
            theme: theme.unwrap_or_else(|| Theme::for_level(level)),
            monsters,
            items,
            graffiti: Vec::new(),
            boss,
        }
    }
}

/// Generate a level with default settings and a fresh seed
pub fn generate(level: u32, width: i32, height: i32) -> Dungeon {
    DungeonGenerator::default().generate(level, width, height, None)
}

/// Generate a reproducible level with default settings
pub fn generate_seeded(level: u32, width: i32, height: i32, seed: u64) -> Dungeon {
    DungeonGenerator::default().generate(level, width, height, Some(seed))
}
