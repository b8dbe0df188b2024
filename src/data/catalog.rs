//! Monster and item catalogs
//!
//! The generator only decides where things go and what coarse category to
//! ask for; which species or which item is answered by a catalog.

use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Coarse item categories the generator can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Any regular item
    Any,
    Weapon,
    Armor,
    Scroll,
    Potion,
    Container,
    Gold,
}

/// Picks a monster identifier appropriate for a level
pub trait MonsterCatalog: Send + Sync {
    fn pick_monster(&self, level: u32, rng: &mut dyn RngCore) -> String;
}

/// Picks an item identifier appropriate for a level and category
pub trait ItemCatalog: Send + Sync {
    fn pick_item(&self, level: u32, category: ItemCategory, rng: &mut dyn RngCore) -> String;
}

/// A catalog row: an identifier and the depth band it appears in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub min_level: u32,
    pub max_level: u32,
    pub category: ItemCategory,
}

impl CatalogEntry {
    fn new(id: &str, min_level: u32, max_level: u32, category: ItemCategory) -> Self {
        Self {
            id: id.to_string(),
            min_level,
            max_level,
            category,
        }
    }

    fn fits(&self, level: u32) -> bool {
        level >= self.min_level && level <= self.max_level
    }
}

/// In-memory depth-banded tables
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    pub monsters: Vec<CatalogEntry>,
    pub items: Vec<CatalogEntry>,
}

impl StaticCatalog {
    pub fn new(monsters: Vec<CatalogEntry>, items: Vec<CatalogEntry>) -> Self {
        Self { monsters, items }
    }

    /// Uniform pick among rows whose band covers `level`, else the shallowest row
    fn pick<'a>(
        rows: impl Iterator<Item = &'a CatalogEntry> + Clone,
        level: u32,
        rng: &mut dyn RngCore,
    ) -> Option<&'a CatalogEntry> {
        let eligible: Vec<&CatalogEntry> = rows.clone().filter(|e| e.fits(level)).collect();
        if let Some(entry) = eligible.choose(rng) {
            return Some(*entry);
        }
        rows.min_by_key(|e| e.min_level)
    }
}

impl MonsterCatalog for StaticCatalog {
    fn pick_monster(&self, level: u32, rng: &mut dyn RngCore) -> String {
        Self::pick(self.monsters.iter(), level, rng)
            .map(|e| e.id.clone())
            .unwrap_or_else(|| "monster".to_string())
    }
}

impl ItemCatalog for StaticCatalog {
    fn pick_item(&self, level: u32, category: ItemCategory, rng: &mut dyn RngCore) -> String {
        if category == ItemCategory::Gold {
            return "gold".to_string();
        }
        let rows = self.items.iter().filter(move |e| match category {
            ItemCategory::Any => !matches!(e.category, ItemCategory::Container | ItemCategory::Gold),
            other => e.category == other,
        });
        Self::pick(rows, level, rng)
            .map(|e| e.id.clone())
            .unwrap_or_else(|| "item".to_string())
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        default_catalog()
    }
}

/// Built-in tables
pub fn default_catalog() -> StaticCatalog {
    use ItemCategory::*;

    let monster = |id, min, max| CatalogEntry::new(id, min, max, Any);

    StaticCatalog {
        monsters: vec![
            // === Dungeon (1-15) ===
            monster("giant_rat", 1, 10),
            monster("kobold", 1, 12),
            monster("goblin", 2, 15),
            monster("jackal", 1, 8),
            monster("cave_spider", 4, 18),
            // === Labyrinth (16-30) ===
            monster("minotaur_calf", 16, 30),
            monster("hill_orc", 12, 30),
            monster("gnome_lord", 10, 25),
            // === Sewers (31-45) ===
            monster("sewer_crocodile", 31, 45),
            monster("gelatinous_cube", 28, 50),
            // === Crypt (46-60) ===
            monster("wraith", 46, 70),
            monster("mummy", 44, 60),
            monster("vampire", 50, 75),
            // === Forge (61-75) ===
            monster("fire_elemental", 61, 80),
            monster("salamander", 60, 75),
            // === Abyss and beyond ===
            monster("mind_flayer", 76, 100),
            monster("lich", 80, 100),
            monster("archon", 91, 100),
        ],
        items: vec![
            CatalogEntry::new("dagger", 1, 20, Weapon),
            CatalogEntry::new("short_sword", 1, 30, Weapon),
            CatalogEntry::new("mace", 5, 40, Weapon),
            CatalogEntry::new("long_sword", 15, 70, Weapon),
            CatalogEntry::new("silver_saber", 50, 100, Weapon),
            CatalogEntry::new("leather_armor", 1, 25, Armor),
            CatalogEntry::new("chain_mail", 10, 60, Armor),
            CatalogEntry::new("plate_mail", 40, 100, Armor),
            CatalogEntry::new("scroll_of_identify", 1, 100, Scroll),
            CatalogEntry::new("scroll_of_mapping", 5, 100, Scroll),
            CatalogEntry::new("scroll_of_teleport", 20, 100, Scroll),
            CatalogEntry::new("potion_of_healing", 1, 100, Potion),
            CatalogEntry::new("potion_of_insight", 10, 100, Potion),
            CatalogEntry::new("potion_of_full_healing", 40, 100, Potion),
            CatalogEntry::new("large_box", 1, 40, Container),
            CatalogEntry::new("chest", 1, 100, Container),
            CatalogEntry::new("ice_box", 30, 100, Container),
        ],
    }
}
