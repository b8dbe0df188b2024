//! Error types
//!
//! Generation itself never fails; these cover the fallible edges around it
//! (boss layout resources, tile validation, config files).

use std::path::PathBuf;

use thiserror::Error;

use crate::world::TileType;

/// A tile description whose flags don't fit its type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileError {
    #[error("`{flag}` is not valid on a {tile_type:?} tile")]
    InvalidFlag {
        tile_type: TileType,
        flag: &'static str,
    },
    #[error("trap tile is missing its trap kind")]
    MissingTrapKind,
}

/// Failure to obtain a hand-authored boss layout
#[derive(Debug, Error)]
pub enum BossLevelError {
    #[error("no boss layout for level {0}")]
    NotFound(u32),
    #[error("failed to read boss layout {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse boss layout: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid boss layout: {0}")]
    Invalid(String),
}

impl From<TileError> for BossLevelError {
    fn from(e: TileError) -> Self {
        BossLevelError::Invalid(e.to_string())
    }
}

/// Failure to load or write a generator config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
}
