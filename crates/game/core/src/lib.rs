//! Deterministic rules for a seeded grid crawler.
//!
//! `crawl-core` defines the canonical rules (level generation, fog of war,
//! combat, cards, party succession, boss phases) and exposes pure APIs that
//! can be reused by content loaders, harnesses and replay tooling. All state
//! mutation flows through [`engine::GameEngine`], and supporting crates depend
//! on the types re-exported here.
pub mod action;
pub mod boss;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod grid;
pub mod rng;
pub mod state;

pub use action::{Action, ActionResult, ActionTransition};
#[cfg(feature = "serde")]
pub use action::{compute_actions_root, compute_state_root};
pub use config::{GameConfig, LeaderConfig, OverflowPolicy};
pub use engine::{ExecuteError, ExecutionOutcome, GameEngine, TransitionPhase, TransitionPhaseError};
pub use env::{
    AllyOracle, AllyTemplate, BossDefinition, BossOracle, BossPhase, CardDefinition, CardEffect,
    CardKind, CardOracle, Catalog, EnemyOracle, EnemyTemplate, Env, EquipSlot, GameEnv,
    ItemDefinition, ItemOracle, LevelOracle, LevelTable, OracleError, StatBonus,
};
pub use error::{ErrorSeverity, GameError};
pub use rng::RngStream;
pub use state::{
    Board, Card, CardId, CardPiles, CombatState, GameLog, GameState, InitializationError, LogKind,
    MemberId, Party, PartyMember, Position, Tile, TileKind,
};
