//! Generator configuration
//!
//! Tunables for room placement, routing and features, loaded from a RON file
//! with fallback to built-in defaults.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Smallest room edge; maps are never smaller than this plus a 2-tile border on each side
pub const MIN_ROOM_SIZE: i32 = 4;

/// Generation tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Lower bound on the target room count
    pub min_rooms: usize,
    /// Exclusive upper bound on the target room count
    pub max_rooms: usize,
    pub min_room_size: i32,
    /// Exclusive upper bound on room width/height
    pub max_room_size: i32,
    /// Placement attempts before settling for fewer rooms
    pub placement_trials: usize,
    /// Rooms within this many rows share a row in the traversal order
    pub row_tolerance: i32,
    /// Chance to stop the primary room chain after each join
    pub early_stop_chance: f64,
    /// Chance to join room `i` to room `i + 2`
    pub redundant_connection_chance: f64,
    pub secret_door_chance: f64,
    pub locked_door_chance: f64,
    /// Per-room chance of a trap
    pub trap_chance: f64,
    /// Deepest level; it has no down-stairs
    pub max_level: u32,
    /// Levels that try a hand-authored layout first
    pub boss_levels: BTreeSet<u32>,
    /// Where boss layouts live; platform data dir when unset
    pub boss_level_dir: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_rooms: 5,
            max_rooms: 11,
            min_room_size: MIN_ROOM_SIZE,
            max_room_size: 10,
            placement_trials: 500,
            row_tolerance: 5,
            early_stop_chance: 0.02,
            redundant_connection_chance: 0.5,
            secret_door_chance: 0.2,
            locked_door_chance: 0.1,
            trap_chance: 0.1,
            max_level: 100,
            boss_levels: [15, 30, 45, 60, 75, 90, 100].into_iter().collect(),
            boss_level_dir: None,
        }
    }
}

impl GeneratorConfig {
    /// Load config from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GeneratorConfig = ron::from_str(&content)?;
        Ok(config.sanitized())
    }

    /// Load config, falling back to defaults if the file is missing or broken
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No generator config at {}, using defaults", path.display());
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Failed to load generator config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Write config as pretty RON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let ron = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, ron).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn is_boss_level(&self, level: u32) -> bool {
        self.boss_levels.contains(&level)
    }

    pub fn is_final_level(&self, level: u32) -> bool {
        level >= self.max_level
    }

    /// Directory boss layouts are read from
    pub fn boss_dir(&self) -> PathBuf {
        self.boss_level_dir.clone().unwrap_or_else(default_boss_dir)
    }

    /// Repair ranges a hand-edited file or struct literal could have broken
    pub(crate) fn sanitized(mut self) -> Self {
        self.min_room_size = self.min_room_size.max(MIN_ROOM_SIZE);
        self.max_room_size = self.max_room_size.max(self.min_room_size + 1);
        self.min_rooms = self.min_rooms.max(1);
        self.max_rooms = self.max_rooms.max(self.min_rooms + 1);
        self.max_level = self.max_level.max(1);
        for chance in [
            &mut self.early_stop_chance,
            &mut self.redundant_connection_chance,
            &mut self.secret_door_chance,
            &mut self.locked_door_chance,
            &mut self.trap_chance,
        ] {
            *chance = if chance.is_nan() { 0.0 } else { chance.clamp(0.0, 1.0) };
        }
        self
    }
}

/// Platform data directory for boss layouts, or `assets/boss_levels`
pub fn default_boss_dir() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "quizcrawl", "Quizcrawl") {
        let path = proj_dirs.data_dir().join("boss_levels");
        if path.exists() {
            return path;
        }
    }
    PathBuf::from("assets/boss_levels")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert!(config.is_boss_level(15));
        assert!(!config.is_boss_level(16));
        assert!(config.is_final_level(100));
        assert!(!config.is_final_level(99));
        assert!(config.min_rooms < config.max_rooms);
    }

    #[test]
    fn test_ron_roundtrip() {
        let mut config = GeneratorConfig::default();
        config.trap_chance = 0.25;
        config.boss_levels = [7].into_iter().collect();

        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        let back: GeneratorConfig = ron::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_file_uses_defaults_for_missing_fields() {
        let config: GeneratorConfig = ron::from_str("(max_level: 40)").unwrap();
        assert_eq!(config.max_level, 40);
        assert_eq!(config.placement_trials, 500);
    }

    #[test]
    fn test_sanitize_repairs_ranges() {
        let config: GeneratorConfig =
            ron::from_str("(min_rooms: 8, max_rooms: 3, min_room_size: 1, trap_chance: 4.0)").unwrap();
        let config = config.sanitized();
        assert_eq!(config.min_room_size, MIN_ROOM_SIZE);
        assert!(config.max_rooms > config.min_rooms);
        assert_eq!(config.trap_chance, 1.0);
    }

    #[test]
    fn test_sanitize_repairs_code_built_config() {
        let config = GeneratorConfig {
            min_rooms: 5,
            max_rooms: 5,
            max_level: 0,
            secret_door_chance: f64::NAN,
            early_stop_chance: -0.5,
            ..GeneratorConfig::default()
        }
        .sanitized();
        assert_eq!(config.max_rooms, 6);
        assert_eq!(config.max_level, 1);
        assert_eq!(config.secret_door_chance, 0.0);
        assert_eq!(config.early_stop_chance, 0.0);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = GeneratorConfig::load_or_default(Path::new("does/not/exist.ron"));
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("quizcrawl-config-{}.ron", std::process::id()));
        let mut config = GeneratorConfig::default();
        config.max_level = 12;
        config.save(&path).unwrap();

        let loaded = GeneratorConfig::load(&path).unwrap();
        assert_eq!(loaded.max_level, 12);
        let _ = fs::remove_file(&path);
    }
}
