//! Content catalogs
//!
//! The generator decides where monsters and items go; catalogs decide what
//! they are.

pub mod catalog;

pub use catalog::{default_catalog, CatalogEntry, ItemCatalog, ItemCategory, MonsterCatalog, StaticCatalog};
