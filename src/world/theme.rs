//! Level themes
//!
//! Depth bands with their own dressing: graffiti, hazards and render palette.

use serde::{Deserialize, Serialize};

/// Flavor profile for a band of levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Dungeon,
    Minotaur,
    Sewer,
    Crypt,
    Volcano,
    Abyss,
    Celestial,
}

/// Configuration for a specific theme
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    /// Display name
    pub name: &'static str,
    /// Chance per level of scrawled graffiti
    pub graffiti_chance: f64,
    /// Lines the graffiti is drawn from
    pub graffiti: &'static [&'static str],
    /// Chance per room of a lava tile
    pub lava_chance: f64,
    /// Ambient tint for renderers (RGB)
    pub ambient_color: (u8, u8, u8),
}

impl Theme {
    pub const ALL: [Theme; 7] = [
        Theme::Dungeon,
        Theme::Minotaur,
        Theme::Sewer,
        Theme::Crypt,
        Theme::Volcano,
        Theme::Abyss,
        Theme::Celestial,
    ];

    /// Resolve the theme for a level; bands end at 15, 30, 45, 60, 75 and 90
    pub fn for_level(level: u32) -> Theme {
        match level {
            0..=15 => Theme::Dungeon,
            16..=30 => Theme::Minotaur,
            31..=45 => Theme::Sewer,
            46..=60 => Theme::Crypt,
            61..=75 => Theme::Volcano,
            76..=90 => Theme::Abyss,
            _ => Theme::Celestial,
        }
    }

    /// Get the configuration for this theme
    pub fn config(&self) -> ThemeConfig {
        match self {
            Theme::Dungeon => ThemeConfig {
                name: "The Dungeon",
                graffiti_chance: 0.15,
                graffiti: &[
                    "Study hard, adventurer.",
                    "The answer was C. It's always C.",
                    "Knowledge is the sharpest blade.",
                ],
                lava_chance: 0.0,
                ambient_color: (50, 45, 35),
            },
            Theme::Minotaur => ThemeConfig {
                name: "The Labyrinth",
                graffiti_chance: 0.2,
                graffiti: &[
                    "Left, left, right... or was it right?",
                    "Ariadne's thread ends here.",
                    "It can hear you counting.",
                ],
                lava_chance: 0.0,
                ambient_color: (60, 40, 30),
            },
            Theme::Sewer => ThemeConfig {
                name: "The Sewers",
                graffiti_chance: 0.2,
                graffiti: &[
                    "Don't drink the water.",
                    "The rats know the way out.",
                ],
                lava_chance: 0.0,
                ambient_color: (35, 50, 35),
            },
            Theme::Crypt => ThemeConfig {
                name: "The Crypt",
                graffiti_chance: 0.25,
                graffiti: &[
                    "Here lies one who guessed.",
                    "The dead remember every wrong answer.",
                    "Rest is for those who studied.",
                ],
                lava_chance: 0.0,
                ambient_color: (40, 40, 55),
            },
            Theme::Volcano => ThemeConfig {
                name: "The Forge",
                graffiti_chance: 0.15,
                graffiti: &[
                    "Mind the floor. It bites.",
                    "Hot enough to melt a theorem.",
                ],
                lava_chance: 0.25,
                ambient_color: (80, 30, 10),
            },
            Theme::Abyss => ThemeConfig {
                name: "The Abyss",
                graffiti_chance: 0.1,
                graffiti: &[
                    "There is no bottom.",
                    "It asked me a question I could not answer.",
                ],
                lava_chance: 0.0,
                ambient_color: (20, 15, 40),
            },
            Theme::Celestial => ThemeConfig {
                name: "The Celestial Archive",
                graffiti_chance: 0.1,
                graffiti: &[
                    "All answers are written here.",
                    "Nearly there. Keep reading.",
                ],
                lava_chance: 0.0,
                ambient_color: (70, 70, 100),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }
}
