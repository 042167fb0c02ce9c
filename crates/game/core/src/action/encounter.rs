//! Non-combat tile encounters: hazards, keys, loot and allies.

use tracing::info;

use crate::action::ActionTransition;
use crate::combat::{CHECK_DIE, SkillCheck, skill_check};
use crate::env::{GameEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{BaseStats, CardId, CardReceipt, GameState, LogKind, MemberId, PartyMember, TileKind};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterError {
    #[error("no living leader can act")]
    NoLivingLeader,

    #[error("cannot do that during combat")]
    InCombat,

    #[error("expected a {expected} tile, standing on {actual}")]
    WrongTile { expected: TileKind, actual: TileKind },

    #[error("this tile is already resolved")]
    AlreadyResolved,

    #[error("the party is full")]
    PartyFull,

    #[error("no ally is available to recruit")]
    NoAllyAvailable,

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for EncounterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InCombat => ErrorSeverity::Recoverable,
            Self::NoLivingLeader
            | Self::WrongTile { .. }
            | Self::AlreadyResolved
            | Self::PartyFull
            | Self::NoAllyAvailable => ErrorSeverity::Validation,
            Self::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoLivingLeader => "ENCOUNTER_NO_LIVING_LEADER",
            Self::InCombat => "ENCOUNTER_IN_COMBAT",
            Self::WrongTile { .. } => "ENCOUNTER_WRONG_TILE",
            Self::AlreadyResolved => "ENCOUNTER_ALREADY_RESOLVED",
            Self::PartyFull => "ENCOUNTER_PARTY_FULL",
            Self::NoAllyAvailable => "ENCOUNTER_NO_ALLY_AVAILABLE",
            Self::Oracle(error) => error.error_code(),
        }
    }
}

/// The player stands on an unresolved tile of `expected` kind, outside
/// combat, with a living leader.
fn require_tile(state: &GameState, expected: TileKind) -> Result<(), EncounterError> {
    if !state.has_living_leader() {
        return Err(EncounterError::NoLivingLeader);
    }
    if state.combat_active() {
        return Err(EncounterError::InCombat);
    }
    let tile = state.current_tile();
    if tile.kind != expected {
        return Err(EncounterError::WrongTile {
            expected,
            actual: tile.kind,
        });
    }
    if tile.consumed() {
        return Err(EncounterError::AlreadyResolved);
    }
    Ok(())
}

// ============================================================================
// ResolveHazard
// ============================================================================

/// d20 + leader atk vs `hazard_base_difficulty + level`.
///
/// Success clears the hazard. Failure hurts the leader and leaves the hazard
/// in place for another attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolveHazardAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardOutcome {
    pub check: SkillCheck,
    pub damage: u32,
    pub new_leader: Option<MemberId>,
    pub wiped: bool,
}

impl ActionTransition for ResolveHazardAction {
    type Error = EncounterError;
    type Result = HazardOutcome;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        require_tile(state, TileKind::Hazard)
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let atk = state.leader().map_or(0, |leader| leader.atk);
        let difficulty = state.config.hazard_base_difficulty + state.level;
        let roll = state.rng.roll_die(CHECK_DIE);
        let check = skill_check(roll, atk, difficulty);

        let mut outcome = HazardOutcome {
            check,
            damage: 0,
            new_leader: None,
            wiped: false,
        };

        if check.passed {
            state.board.current_tile_mut().consume();
            state.record(
                LogKind::Info,
                format!("You get past the hazard ({} vs {difficulty}).", check.total),
            );
            return Ok(outcome);
        }

        let damage = state.rng.roll_die(state.config.hazard_damage_die);
        state.record(
            LogKind::Info,
            format!("The hazard hurts you for {damage} ({} vs {difficulty}).", check.total),
        );
        let report = state.damage_leader(damage);
        outcome.damage = report.dealt;
        outcome.new_leader = report.new_leader;
        outcome.wiped = report.wiped;
        Ok(outcome)
    }
}

// ============================================================================
// TakeKey
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TakeKeyAction;

impl ActionTransition for TakeKeyAction {
    type Error = EncounterError;
    type Result = ();

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        require_tile(state, TileKind::Key)
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        state.key_found = true;
        state.board.current_tile_mut().consume();
        state.record(LogKind::Info, "You take the key.");
        Ok(())
    }
}

// ============================================================================
// Loot
// ============================================================================

/// Search an item tile: a card, a piece of equipment, or gold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootAction;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LootOutcome {
    Card { card: CardId, receipt: CardReceipt },
    Item { item: String },
    Gold { amount: u32 },
}

impl ActionTransition for LootAction {
    type Error = EncounterError;
    type Result = LootOutcome;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        require_tile(state, TileKind::Item)
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        state.board.current_tile_mut().consume();

        let drawn = if state.rng.chance(state.config.item_card_chance) {
            state.cards.draw(&mut state.rng)
        } else {
            None
        };
        if let Some(card) = drawn {
            let id = card.id;
            let receipt = state.receive_card(card);
            return Ok(LootOutcome::Card { card: id, receipt });
        }

        let table = env.level_table(state.level);
        let pool = if table.items.is_empty() {
            env.items()
                .map(|items| items.item_ids())
                .unwrap_or_default()
        } else {
            table.items
        };
        if let Some(item) = state.rng.pick(&pool).cloned() {
            let name = env.item(&item)?.name;
            state.inventory.push(item.clone());
            state.record(LogKind::Info, format!("You find {name}."));
            return Ok(LootOutcome::Item { item });
        }

        let amount = state.rng.next_int(3, 8) + 2 * state.level;
        state.gold += amount;
        state.record(LogKind::Info, format!("You find {amount} gold."));
        Ok(LootOutcome::Gold { amount })
    }
}

// ============================================================================
// RecruitAlly / DeclineAlly
// ============================================================================

/// Recruit the ally on this tile into the party.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecruitAllyAction;

impl ActionTransition for RecruitAllyAction {
    type Error = EncounterError;
    type Result = MemberId;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        require_tile(state, TileKind::Ally)?;
        if state.party.is_full() {
            return Err(EncounterError::PartyFull);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let table = env.level_table(state.level);
        let pool = if table.allies.is_empty() {
            env.allies()?.ally_ids()
        } else {
            table.allies
        };
        let ally_id = state
            .rng
            .pick(&pool)
            .cloned()
            .ok_or(EncounterError::NoAllyAvailable)?;
        let template = env.ally(&ally_id)?;

        let id = state.allocate_member_id();
        let member = PartyMember::new(
            id,
            template.name.clone(),
            BaseStats::new(template.hp, template.atk, template.mag),
        )
        .with_tags(template.tags.iter().cloned());
        if state.party.push(member).is_err() {
            return Err(EncounterError::PartyFull);
        }
        state.board.current_tile_mut().consume();
        state.record(LogKind::Party, format!("{} joins the party.", template.name));
        info!(ally = %ally_id, member = %id, "ally recruited");

        if let Some(card_id) = &template.card {
            let definition = env.card(card_id)?;
            let card = state.create_card(card_id, &definition);
            state.receive_card(card);
        }
        Ok(id)
    }
}

/// Leave the ally behind. The tile is resolved either way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeclineAllyAction;

impl ActionTransition for DeclineAllyAction {
    type Error = EncounterError;
    type Result = ();

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        require_tile(state, TileKind::Ally)
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        state.board.current_tile_mut().consume();
        state.record(LogKind::Party, "You part ways with the stranger.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{AllyTemplate, CardDefinition, CardEffect, CardKind, Catalog};
    use crate::state::{Board, Position};

    fn state_on(kind: TileKind, catalog: &Catalog) -> GameState {
        let config = GameConfig {
            starting_deck: Vec::new(),
            ..GameConfig::default()
        };
        let mut state = GameState::new_run(11, config, &catalog.as_env()).unwrap();
        let mut kinds = [TileKind::Empty; GameConfig::TILE_COUNT];
        kinds[4] = kind;
        state.board = Board::from_kinds(1, Position::new(1, 0), kinds);
        state
    }

    #[test]
    fn key_tile_sets_key_found() {
        let catalog = Catalog::default();
        let env = catalog.as_env();
        let mut state = state_on(TileKind::Key, &catalog);
        TakeKeyAction.pre_validate(&state, &env).unwrap();
        TakeKeyAction.apply(&mut state, &env).unwrap();
        assert!(state.key_found);
        assert!(state.current_tile().consumed());
        assert_eq!(TakeKeyAction.pre_validate(&state, &env), Err(EncounterError::AlreadyResolved));
    }

    #[test]
    fn hazard_failure_keeps_tile() {
        let catalog = Catalog::default();
        let env = catalog.as_env();
        let mut state = state_on(TileKind::Hazard, &catalog);
        // Unreachable difficulty forces a failure.
        state.config.hazard_base_difficulty = 100;
        let hp = state.leader().unwrap().hp;

        let outcome = ResolveHazardAction.apply(&mut state, &env).unwrap();
        assert!(!outcome.check.passed);
        assert!((1..=state.config.hazard_damage_die).contains(&outcome.damage));
        assert_eq!(state.leader().unwrap().hp, hp - outcome.damage);
        assert!(!state.current_tile().consumed());
    }

    #[test]
    fn hazard_success_consumes_tile() {
        let catalog = Catalog::default();
        let env = catalog.as_env();
        let mut state = state_on(TileKind::Hazard, &catalog);
        state.config.hazard_base_difficulty = 0;
        let outcome = ResolveHazardAction.apply(&mut state, &env).unwrap();
        assert!(outcome.check.passed);
        assert!(state.current_tile().consumed());
    }

    #[test]
    fn recruit_appends_member_and_grants_card() {
        let catalog = Catalog::default()
            .with_ally("squire", AllyTemplate::new("Squire", 12, 2, 0).with_card("guard"))
            .with_card("guard", CardDefinition::new("Guard", CardKind::Defense, CardEffect::Defend));
        let env = catalog.as_env();
        let mut state = state_on(TileKind::Ally, &catalog);

        let id = RecruitAllyAction.apply(&mut state, &env).unwrap();
        assert_eq!(state.party.len(), 2);
        assert_eq!(state.party.members()[1].id, id);
        assert_eq!(state.cards.hand.cards()[0].effect, CardEffect::Defend);
        assert!(state.current_tile().consumed());
    }

    #[test]
    fn recruit_rejected_when_party_full() {
        let catalog = Catalog::default().with_ally("squire", AllyTemplate::new("Squire", 12, 2, 0));
        let env = catalog.as_env();
        let mut state = state_on(TileKind::Ally, &catalog);
        while !state.party.is_full() {
            let id = state.allocate_member_id();
            let _ = state.party.push(PartyMember::new(id, "extra", BaseStats::new(5, 1, 0)));
        }
        assert_eq!(RecruitAllyAction.pre_validate(&state, &env), Err(EncounterError::PartyFull));
        DeclineAllyAction.apply(&mut state, &env).unwrap();
        assert!(state.current_tile().consumed());
    }

    #[test]
    fn loot_without_cards_or_items_yields_gold() {
        let catalog = Catalog::default();
        let env = catalog.as_env();
        let mut state = state_on(TileKind::Item, &catalog);
        match LootAction.apply(&mut state, &env).unwrap() {
            LootOutcome::Gold { amount } => assert_eq!(state.gold, amount),
            other => panic!("unexpected loot {other:?}"),
        }
        assert!(state.current_tile().consumed());
    }
}
