//! Oracle access errors.
//!
//! Errors related to content availability and keyed lookups.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when accessing content oracles.
///
/// A missing oracle is fatal for the operation that needs it; a missing
/// record is a configuration error surfaced to the caller instead of a panic.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("EnemyOracle not available")]
    EnemiesNotAvailable,

    #[error("CardOracle not available")]
    CardsNotAvailable,

    #[error("BossOracle not available")]
    BossesNotAvailable,

    #[error("ItemOracle not available")]
    ItemsNotAvailable,

    #[error("AllyOracle not available")]
    AlliesNotAvailable,

    #[error("enemy template '{0}' not found")]
    EnemyNotFound(String),

    #[error("card definition '{0}' not found")]
    CardNotFound(String),

    #[error("boss definition '{0}' not found")]
    BossNotFound(String),

    #[error("item definition '{0}' not found")]
    ItemNotFound(String),

    #[error("ally template '{0}' not found")]
    AllyNotFound(String),

    #[error("no enemies available for level {0}")]
    EmptyEnemyPool(u32),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            EnemiesNotAvailable | CardsNotAvailable | BossesNotAvailable | ItemsNotAvailable
            | AlliesNotAvailable => ErrorSeverity::Fatal,

            EnemyNotFound(_) | CardNotFound(_) | BossNotFound(_) | ItemNotFound(_)
            | AllyNotFound(_) | EmptyEnemyPool(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            EnemiesNotAvailable => "ORACLE_ENEMIES_NOT_AVAILABLE",
            CardsNotAvailable => "ORACLE_CARDS_NOT_AVAILABLE",
            BossesNotAvailable => "ORACLE_BOSSES_NOT_AVAILABLE",
            ItemsNotAvailable => "ORACLE_ITEMS_NOT_AVAILABLE",
            AlliesNotAvailable => "ORACLE_ALLIES_NOT_AVAILABLE",
            EnemyNotFound(_) => "ORACLE_ENEMY_NOT_FOUND",
            CardNotFound(_) => "ORACLE_CARD_NOT_FOUND",
            BossNotFound(_) => "ORACLE_BOSS_NOT_FOUND",
            ItemNotFound(_) => "ORACLE_ITEM_NOT_FOUND",
            AllyNotFound(_) => "ORACLE_ALLY_NOT_FOUND",
            EmptyEnemyPool(_) => "ORACLE_EMPTY_ENEMY_POOL",
        }
    }
}
