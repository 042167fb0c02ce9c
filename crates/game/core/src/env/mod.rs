//! Traits describing read-only content.
//!
//! Oracles expose enemy templates, card definitions, boss scripts, level
//! tables, equipment and ally templates. The [`Env`] aggregate bundles them so
//! the engine can access everything it needs without hard coupling to
//! concrete implementations.
mod allies;
mod bosses;
mod cards;
mod catalog;
mod enemies;
mod error;
mod items;
mod levels;

pub use allies::{AllyOracle, AllyTemplate};
pub use bosses::{BossDefinition, BossOracle, BossPhase, VictoryRewards};
pub use cards::{CardDefinition, CardEffect, CardKind, CardOracle};
pub use catalog::Catalog;
pub use enemies::{EnemyOracle, EnemyTemplate};
pub use error::OracleError;
pub use items::{EquipSlot, ItemDefinition, ItemOracle, StatBonus};
pub use levels::{EncounterWeights, EnemyPools, LevelOracle, LevelTable};

/// Aggregates read-only oracles required by the engine and action pipeline.
#[derive(Debug)]
pub struct Env<'a, E, C, B, L, I, A>
where
    E: EnemyOracle + ?Sized,
    C: CardOracle + ?Sized,
    B: BossOracle + ?Sized,
    L: LevelOracle + ?Sized,
    I: ItemOracle + ?Sized,
    A: AllyOracle + ?Sized,
{
    enemies: Option<&'a E>,
    cards: Option<&'a C>,
    bosses: Option<&'a B>,
    levels: Option<&'a L>,
    items: Option<&'a I>,
    allies: Option<&'a A>,
}

pub type GameEnv<'a> = Env<
    'a,
    dyn EnemyOracle + 'a,
    dyn CardOracle + 'a,
    dyn BossOracle + 'a,
    dyn LevelOracle + 'a,
    dyn ItemOracle + 'a,
    dyn AllyOracle + 'a,
>;

// Only references are held, so copying never needs the oracles themselves
// to be `Clone`.
impl<E, C, B, L, I, A> Clone for Env<'_, E, C, B, L, I, A>
where
    E: EnemyOracle + ?Sized,
    C: CardOracle + ?Sized,
    B: BossOracle + ?Sized,
    L: LevelOracle + ?Sized,
    I: ItemOracle + ?Sized,
    A: AllyOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, C, B, L, I, A> Copy for Env<'_, E, C, B, L, I, A>
where
    E: EnemyOracle + ?Sized,
    C: CardOracle + ?Sized,
    B: BossOracle + ?Sized,
    L: LevelOracle + ?Sized,
    I: ItemOracle + ?Sized,
    A: AllyOracle + ?Sized,
{
}

impl<'a, E, C, B, L, I, A> Env<'a, E, C, B, L, I, A>
where
    E: EnemyOracle + ?Sized,
    C: CardOracle + ?Sized,
    B: BossOracle + ?Sized,
    L: LevelOracle + ?Sized,
    I: ItemOracle + ?Sized,
    A: AllyOracle + ?Sized,
{
    pub fn new(
        enemies: Option<&'a E>,
        cards: Option<&'a C>,
        bosses: Option<&'a B>,
        levels: Option<&'a L>,
        items: Option<&'a I>,
        allies: Option<&'a A>,
    ) -> Self {
        Self {
            enemies,
            cards,
            bosses,
            levels,
            items,
            allies,
        }
    }

    pub fn with_all(
        enemies: &'a E,
        cards: &'a C,
        bosses: &'a B,
        levels: &'a L,
        items: &'a I,
        allies: &'a A,
    ) -> Self {
        Self::new(
            Some(enemies),
            Some(cards),
            Some(bosses),
            Some(levels),
            Some(items),
            Some(allies),
        )
    }

    pub fn empty() -> Self {
        Self {
            enemies: None,
            cards: None,
            bosses: None,
            levels: None,
            items: None,
            allies: None,
        }
    }

    /// Returns the EnemyOracle, or an error if not available.
    pub fn enemies(&self) -> Result<&'a E, OracleError> {
        self.enemies.ok_or(OracleError::EnemiesNotAvailable)
    }

    /// Returns the CardOracle, or an error if not available.
    pub fn cards(&self) -> Result<&'a C, OracleError> {
        self.cards.ok_or(OracleError::CardsNotAvailable)
    }

    /// Returns the BossOracle, or an error if not available.
    pub fn bosses(&self) -> Result<&'a B, OracleError> {
        self.bosses.ok_or(OracleError::BossesNotAvailable)
    }

    /// Returns the LevelOracle when one was supplied.
    ///
    /// Level tables are optional; generation falls back to built-in defaults.
    pub fn levels(&self) -> Option<&'a L> {
        self.levels
    }

    /// Returns the ItemOracle, or an error if not available.
    pub fn items(&self) -> Result<&'a I, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    /// Returns the AllyOracle, or an error if not available.
    pub fn allies(&self) -> Result<&'a A, OracleError> {
        self.allies.ok_or(OracleError::AlliesNotAvailable)
    }

    /// Table for `level`, or the built-in default table.
    pub fn level_table(&self, level: u32) -> LevelTable {
        self.levels
            .and_then(|levels| levels.level_table(level))
            .unwrap_or_default()
    }

    /// Looks up an enemy template, surfacing a missing record as an error.
    pub fn enemy(&self, id: &str) -> Result<EnemyTemplate, OracleError> {
        self.enemies()?
            .enemy(id)
            .ok_or_else(|| OracleError::EnemyNotFound(id.to_string()))
    }

    /// Looks up a card definition, surfacing a missing record as an error.
    pub fn card(&self, id: &str) -> Result<CardDefinition, OracleError> {
        self.cards()?
            .card(id)
            .ok_or_else(|| OracleError::CardNotFound(id.to_string()))
    }

    /// Looks up a boss definition, surfacing a missing record as an error.
    pub fn boss(&self, id: &str) -> Result<BossDefinition, OracleError> {
        self.bosses()?
            .boss(id)
            .ok_or_else(|| OracleError::BossNotFound(id.to_string()))
    }

    /// Boss guarding `level`. A missing boss oracle means no boss levels.
    pub fn boss_for_level(&self, level: u32) -> Option<String> {
        self.bosses
            .and_then(|bosses| bosses.boss_for_level(level))
    }

    /// Looks up an item definition, surfacing a missing record as an error.
    pub fn item(&self, id: &str) -> Result<ItemDefinition, OracleError> {
        self.items()?
            .item(id)
            .ok_or_else(|| OracleError::ItemNotFound(id.to_string()))
    }

    /// Looks up an ally template, surfacing a missing record as an error.
    pub fn ally(&self, id: &str) -> Result<AllyTemplate, OracleError> {
        self.allies()?
            .ally(id)
            .ok_or_else(|| OracleError::AllyNotFound(id.to_string()))
    }
}

impl<'a, E, C, B, L, I, A> Env<'a, E, C, B, L, I, A>
where
    E: EnemyOracle + 'a,
    C: CardOracle + 'a,
    B: BossOracle + 'a,
    L: LevelOracle + 'a,
    I: ItemOracle + 'a,
    A: AllyOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv` (consumes self).
    pub fn into_game_env(self) -> GameEnv<'a> {
        let enemies: Option<&'a dyn EnemyOracle> = self.enemies.map(|enemies| enemies as _);
        let cards: Option<&'a dyn CardOracle> = self.cards.map(|cards| cards as _);
        let bosses: Option<&'a dyn BossOracle> = self.bosses.map(|bosses| bosses as _);
        let levels: Option<&'a dyn LevelOracle> = self.levels.map(|levels| levels as _);
        let items: Option<&'a dyn ItemOracle> = self.items.map(|items| items as _);
        let allies: Option<&'a dyn AllyOracle> = self.allies.map(|allies| allies as _);
        Env::new(enemies, cards, bosses, levels, items, allies)
    }
}
