//! Party management: equipment and dismissal.
//!
//! Unequipped items live in the run inventory. None of these actions are
//! available during combat.

use crate::action::ActionTransition;
use crate::env::{EquipSlot, GameEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EquippedItem, GameState, LogKind, MemberId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PartyError {
    #[error("party changes are not allowed during combat")]
    InCombat,

    #[error("member {0} not found")]
    MemberNotFound(MemberId),

    #[error("member {0} is down")]
    MemberDown(MemberId),

    #[error("item '{0}' is not in the inventory")]
    ItemNotInInventory(String),

    #[error("member {member} has nothing in the {slot} slot")]
    SlotEmpty { member: MemberId, slot: EquipSlot },

    #[error("the leader cannot be dismissed")]
    CannotDismissLeader,

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for PartyError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InCombat => ErrorSeverity::Recoverable,
            Self::Oracle(error) => error.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InCombat => "PARTY_IN_COMBAT",
            Self::MemberNotFound(_) => "PARTY_MEMBER_NOT_FOUND",
            Self::MemberDown(_) => "PARTY_MEMBER_DOWN",
            Self::ItemNotInInventory(_) => "PARTY_ITEM_NOT_IN_INVENTORY",
            Self::SlotEmpty { .. } => "PARTY_SLOT_EMPTY",
            Self::CannotDismissLeader => "PARTY_CANNOT_DISMISS_LEADER",
            Self::Oracle(error) => error.error_code(),
        }
    }
}

fn require_member(state: &GameState, member: MemberId) -> Result<(), PartyError> {
    if state.combat_active() {
        return Err(PartyError::InCombat);
    }
    let found = state
        .party
        .member(member)
        .ok_or(PartyError::MemberNotFound(member))?;
    if !found.is_alive() {
        return Err(PartyError::MemberDown(member));
    }
    Ok(())
}

// ============================================================================
// Equip
// ============================================================================

/// Equip an inventory item; whatever occupied the slot returns to the
/// inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipAction {
    pub member: MemberId,
    pub item: String,
}

impl EquipAction {
    pub fn new(member: MemberId, item: impl Into<String>) -> Self {
        Self {
            member,
            item: item.into(),
        }
    }
}

impl ActionTransition for EquipAction {
    type Error = PartyError;
    type Result = ();

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        require_member(state, self.member)?;
        if !state.inventory.contains(&self.item) {
            return Err(PartyError::ItemNotInInventory(self.item.clone()));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let definition = env.item(&self.item)?;
        let index = state
            .inventory
            .iter()
            .position(|item| *item == self.item)
            .ok_or_else(|| PartyError::ItemNotInInventory(self.item.clone()))?;
        state.inventory.remove(index);

        let member = state
            .party
            .member_mut(self.member)
            .ok_or(PartyError::MemberNotFound(self.member))?;
        let previous = member.equip(
            definition.slot,
            EquippedItem::new(self.item.clone(), definition.bonus),
        );
        let name = member.name.clone();
        state.sync_player_hp();

        if let Some(previous) = previous {
            state.inventory.push(previous.item);
        }
        state.record(
            LogKind::Party,
            format!("{name} equips {} ({}).", definition.name, definition.slot),
        );
        Ok(())
    }
}

// ============================================================================
// Unequip
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnequipAction {
    pub member: MemberId,
    pub slot: EquipSlot,
}

impl UnequipAction {
    pub fn new(member: MemberId, slot: EquipSlot) -> Self {
        Self { member, slot }
    }
}

impl ActionTransition for UnequipAction {
    type Error = PartyError;
    type Result = ();

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        require_member(state, self.member)?;
        let occupied = state
            .party
            .member(self.member)
            .is_some_and(|member| member.equipment.get(self.slot).is_some());
        if !occupied {
            return Err(PartyError::SlotEmpty {
                member: self.member,
                slot: self.slot,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let member = state
            .party
            .member_mut(self.member)
            .ok_or(PartyError::MemberNotFound(self.member))?;
        let removed = member.unequip(self.slot).ok_or(PartyError::SlotEmpty {
            member: self.member,
            slot: self.slot,
        })?;
        let name = member.name.clone();
        state.sync_player_hp();

        state.record(
            LogKind::Party,
            format!("{name} takes off {} ({}).", removed.item, self.slot),
        );
        state.inventory.push(removed.item);
        Ok(())
    }
}

// ============================================================================
// Dismiss
// ============================================================================

/// Send a member away. Their equipment returns to the inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DismissAction {
    pub member: MemberId,
}

impl DismissAction {
    pub fn new(member: MemberId) -> Self {
        Self { member }
    }
}

impl ActionTransition for DismissAction {
    type Error = PartyError;
    type Result = ();

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.combat_active() {
            return Err(PartyError::InCombat);
        }
        if state.party.member(self.member).is_none() {
            return Err(PartyError::MemberNotFound(self.member));
        }
        if state.leader().is_some_and(|leader| leader.id == self.member) {
            return Err(PartyError::CannotDismissLeader);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let mut member = state
            .party
            .remove(self.member)
            .ok_or(PartyError::MemberNotFound(self.member))?;
        state
            .inventory
            .extend(member.equipment.drain().into_iter().map(|item| item.item));
        state.record(LogKind::Party, format!("{} leaves the party.", member.name));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{Catalog, ItemDefinition, StatBonus};
    use crate::state::{BaseStats, PartyMember};

    fn setup() -> (Catalog, GameState) {
        let catalog = Catalog::default()
            .with_item("sword", ItemDefinition::new("Sword", EquipSlot::Weapon, StatBonus::new(0, 2, 0)))
            .with_item("axe", ItemDefinition::new("Axe", EquipSlot::Weapon, StatBonus::new(0, 3, 0)))
            .with_item("mail", ItemDefinition::new("Mail", EquipSlot::Armor, StatBonus::new(8, 0, 0)));
        let config = GameConfig {
            starting_deck: Vec::new(),
            ..GameConfig::default()
        };
        let state = GameState::new_run(5, config, &catalog.as_env()).unwrap();
        (catalog, state)
    }

    #[test]
    fn equipping_swaps_previous_item_into_inventory() {
        let (catalog, mut state) = setup();
        let env = catalog.as_env();
        state.inventory = vec!["sword".into(), "axe".into()];
        let base_atk = state.leader().unwrap().atk;

        EquipAction::new(MemberId::FOUNDER, "sword").apply(&mut state, &env).unwrap();
        EquipAction::new(MemberId::FOUNDER, "axe").apply(&mut state, &env).unwrap();

        assert_eq!(state.leader().unwrap().atk, base_atk + 3);
        assert_eq!(state.inventory, vec!["sword".to_string()]);
    }

    #[test]
    fn unequip_clamps_hp_to_new_max() {
        let (catalog, mut state) = setup();
        let env = catalog.as_env();
        state.inventory = vec!["mail".into()];
        EquipAction::new(MemberId::FOUNDER, "mail").apply(&mut state, &env).unwrap();
        state.party.leader_mut().unwrap().heal_full();

        UnequipAction::new(MemberId::FOUNDER, EquipSlot::Armor)
            .apply(&mut state, &env)
            .unwrap();
        let leader = state.leader().unwrap();
        assert_eq!(leader.hp, leader.max_hp);
        assert_eq!(leader.max_hp, leader.base.max_hp);
        assert_eq!(state.inventory, vec!["mail".to_string()]);
    }

    #[test]
    fn leader_cannot_be_dismissed() {
        let (catalog, mut state) = setup();
        let env = catalog.as_env();
        assert_eq!(
            DismissAction::new(MemberId::FOUNDER).pre_validate(&state, &env),
            Err(PartyError::CannotDismissLeader)
        );

        let id = state.allocate_member_id();
        let mut ally = PartyMember::new(id, "Archer", BaseStats::new(8, 2, 0));
        ally.equip(EquipSlot::Armor, EquippedItem::new("mail", StatBonus::new(8, 0, 0)));
        state.party.push(ally).unwrap();

        DismissAction::new(id).apply(&mut state, &env).unwrap();
        assert_eq!(state.party.len(), 1);
        assert_eq!(state.inventory, vec!["mail".to_string()]);
    }
}
