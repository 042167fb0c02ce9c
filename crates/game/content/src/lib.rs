//! Data-driven content definitions and loaders.
//!
//! This crate houses the static game content and provides loaders for
//! JSON/TOML data files:
//! - Enemy templates, card definitions and boss scripts (JSON)
//! - Per-level encounter tables (JSON)
//! - Equipment and ally templates (JSON)
//! - Game configuration (TOML)
//!
//! Content is consumed through the oracle traits of `crawl-core` and never
//! appears in game state except as copied snapshots.

pub mod validate;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use validate::{ContentIssue, validate_content};

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, ConfigLoader, ContentFactory, LoadResult};
