//! Card actions.
//!
//! Playing a card removes it from the hand, dispatches its effect and moves
//! it to the discard pile whether or not the effect found a target. Card
//! play never passes the combat turn.

use tracing::debug;

use crate::action::ActionTransition;
use crate::action::combat::leave_combat;
use crate::combat::{self, CombatResolution, DAMAGE_DIE, attack_damage};
use crate::env::{CardEffect, GameEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::grid;
use crate::state::{CardId, GameState, LogKind, StatusFlags, Turn};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardError {
    #[error("no living leader can act")]
    NoLivingLeader,

    #[error("{0} is not in the hand")]
    NotInHand(CardId),

    #[error("cards can only be played on the player's turn")]
    NotPlayerTurn,

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for CardError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotPlayerTurn => ErrorSeverity::Recoverable,
            Self::NoLivingLeader | Self::NotInHand(_) => ErrorSeverity::Validation,
            Self::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoLivingLeader => "CARD_NO_LIVING_LEADER",
            Self::NotInHand(_) => "CARD_NOT_IN_HAND",
            Self::NotPlayerTurn => "CARD_NOT_PLAYER_TURN",
            Self::Oracle(error) => error.error_code(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverflowError {
    #[error("no card is waiting for a hand slot")]
    NothingPending,

    #[error("{0} is neither in the hand nor pending")]
    UnknownCard(CardId),
}

impl GameError for OverflowError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NothingPending => "OVERFLOW_NOTHING_PENDING",
            Self::UnknownCard(_) => "OVERFLOW_UNKNOWN_CARD",
        }
    }
}

// ============================================================================
// PlayCard
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayCardAction {
    pub card: CardId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardOutcome {
    pub card: CardId,
    /// Whether the effect found something to act on.
    pub fired: bool,
    /// Set when an attack card ended the combat.
    pub resolution: Option<CombatResolution>,
}

impl PlayCardAction {
    pub fn new(card: CardId) -> Self {
        Self { card }
    }

    /// Hits the current enemy with `stat + bonus + d6 - 3`.
    fn strike(
        state: &mut GameState,
        env: &GameEnv<'_>,
        stat: u32,
        bonus: u32,
    ) -> Result<(bool, Option<CombatResolution>), CardError> {
        if !state.combat_active() {
            return Ok((false, None));
        }
        let roll = state.rng.roll_die(DAMAGE_DIE);
        let damage = attack_damage(stat + bonus, roll);
        let Some(combat) = state.combat.as_mut() else {
            return Ok((false, None));
        };
        combat.enemy.hp = combat.enemy.hp.saturating_sub(damage);
        let enemy_hp = combat.enemy.hp;
        let name = combat.enemy.name.clone();
        debug!(roll, damage, enemy_hp, "card strike");
        state.record(LogKind::Combat, format!("The card hits {name} for {damage}."));

        if enemy_hp == 0 {
            Ok((true, Some(combat::resolve_victory(state, env)?)))
        } else {
            Ok((true, None))
        }
    }

    fn set_status(state: &mut GameState, flag: StatusFlags) -> bool {
        match state.combat.as_mut() {
            Some(combat) => {
                combat.status.flags.insert(flag);
                true
            }
            None => false,
        }
    }
}

impl ActionTransition for PlayCardAction {
    type Error = CardError;
    type Result = CardOutcome;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if !state.has_living_leader() {
            return Err(CardError::NoLivingLeader);
        }
        if !state.cards.hand.contains(self.card) {
            return Err(CardError::NotInHand(self.card));
        }
        if state
            .combat
            .as_ref()
            .is_some_and(|combat| combat.turn != Turn::Player)
        {
            return Err(CardError::NotPlayerTurn);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let card = state
            .cards
            .hand
            .remove(self.card)
            .ok_or(CardError::NotInHand(self.card))?;
        let (atk, mag) = state
            .leader()
            .map_or((0, 0), |leader| (leader.atk, leader.mag));

        let mut resolution = None;
        let fired = if card.effect.requires_combat() && state.combat.is_none() {
            false
        } else {
            match &card.effect {
                CardEffect::Strike { bonus } => {
                    let (fired, outcome) = Self::strike(state, env, atk, *bonus)?;
                    resolution = outcome;
                    fired
                }
                CardEffect::Spell { bonus } => {
                    let (fired, outcome) = Self::strike(state, env, mag, *bonus)?;
                    resolution = outcome;
                    fired
                }
                CardEffect::Heal { amount } => {
                    let healed = state
                        .party
                        .leader_mut()
                        .map_or(0, |leader| leader.heal(*amount));
                    state.sync_player_hp();
                    healed > 0
                }
                CardEffect::Rally { amount } => {
                    let healed: u32 = state
                        .party
                        .members_mut()
                        .filter(|member| member.is_alive())
                        .map(|member| member.heal(*amount))
                        .sum();
                    state.sync_player_hp();
                    healed > 0
                }
                CardEffect::Stun => Self::set_status(state, StatusFlags::STUNNED),
                CardEffect::Dodge => Self::set_status(state, StatusFlags::DODGE_NEXT),
                CardEffect::Defend => Self::set_status(state, StatusFlags::DEFENDING),
                CardEffect::Shield { amount } => match state.combat.as_mut() {
                    Some(combat) => {
                        combat.status.damage_reduction += *amount;
                        true
                    }
                    None => false,
                },
                CardEffect::Scout { count } => {
                    !grid::reveal_hidden(&mut state.board, &mut state.rng, *count).is_empty()
                }
                CardEffect::Escape => {
                    let escapable = state
                        .combat
                        .as_ref()
                        .is_some_and(|combat| !combat.is_boss_combat());
                    if escapable {
                        leave_combat(state);
                    }
                    escapable
                }
                CardEffect::Inert => false,
            }
        };

        let message = if fired {
            format!("You play {}.", card.name)
        } else {
            format!("{} fizzles.", card.name)
        };
        state.record(LogKind::Card, message);
        let id = card.id;
        state.cards.discard.push(card);

        Ok(CardOutcome {
            card: id,
            fired,
            resolution,
        })
    }
}

// ============================================================================
// ResolveOverflow
// ============================================================================

/// Choose which card to drop when a card is waiting for a full hand.
///
/// Dropping the pending card discards it; dropping a hand card discards
/// that card and moves the pending card into the hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolveOverflowAction {
    pub discard: CardId,
}

impl ResolveOverflowAction {
    pub fn new(discard: CardId) -> Self {
        Self { discard }
    }
}

impl ActionTransition for ResolveOverflowAction {
    type Error = OverflowError;
    type Result = ();

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let pending = state
            .cards
            .pending_overflow
            .as_ref()
            .ok_or(OverflowError::NothingPending)?;
        if pending.id != self.discard && !state.cards.hand.contains(self.discard) {
            return Err(OverflowError::UnknownCard(self.discard));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let pending = state
            .cards
            .pending_overflow
            .take()
            .ok_or(OverflowError::NothingPending)?;

        if pending.id == self.discard {
            state.record(LogKind::Card, format!("{} is discarded.", pending.name));
            state.cards.discard.push(pending);
            return Ok(());
        }

        let dropped = state
            .cards
            .hand
            .remove(self.discard)
            .ok_or(OverflowError::UnknownCard(self.discard))?;
        state.record(
            LogKind::Card,
            format!("{} is discarded for {}.", dropped.name, pending.name),
        );
        state.cards.discard.push(dropped);
        state.cards.hand.add(pending);
        Ok(())
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.cards.has_pending_overflow() {
            Err(OverflowError::UnknownCard(self.discard))
        } else {
            Ok(())
        }
    }
}
