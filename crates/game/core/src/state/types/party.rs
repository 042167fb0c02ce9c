//! Party members and leadership succession.

use std::collections::BTreeSet;

use arrayvec::ArrayVec;

use super::{Equipment, EquippedItem, MemberId};
use crate::config::GameConfig;
use crate::env::EquipSlot;

/// Stats before equipment, cached so derived stats can be recomputed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub max_hp: u32,
    pub atk: u32,
    pub mag: u32,
}

impl BaseStats {
    pub const fn new(max_hp: u32, atk: u32, mag: u32) -> Self {
        Self { max_hp, atk, mag }
    }
}

/// A member of the party. Invariant: `hp <= max_hp`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartyMember {
    pub id: MemberId,
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub atk: u32,
    pub mag: u32,
    pub tags: BTreeSet<String>,
    pub base: BaseStats,
    pub equipment: Equipment,
}

impl PartyMember {
    /// Creates a member at full health with no equipment.
    pub fn new(id: MemberId, name: impl Into<String>, base: BaseStats) -> Self {
        Self {
            id,
            name: name.into(),
            hp: base.max_hp,
            max_hp: base.max_hp,
            atk: base.atk,
            mag: base.mag,
            tags: BTreeSet::new(),
            base,
            equipment: Equipment::empty(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Recomputes derived stats from base stats and equipment.
    ///
    /// Current HP is clamped to the new maximum.
    pub fn recompute(&mut self) {
        let bonus = self.equipment.total_bonus();
        self.max_hp = self.base.max_hp + bonus.hp;
        self.atk = self.base.atk + bonus.atk;
        self.mag = self.base.mag + bonus.mag;
        self.hp = self.hp.min(self.max_hp);
    }

    /// Equips an item and recomputes stats. Returns the displaced item.
    pub fn equip(&mut self, slot: EquipSlot, item: EquippedItem) -> Option<EquippedItem> {
        let previous = self.equipment.equip(slot, item);
        self.recompute();
        previous
    }

    /// Unequips a slot and recomputes stats.
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<EquippedItem> {
        let removed = self.equipment.unequip(slot);
        self.recompute();
        removed
    }

    /// Applies damage, returning the HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Heals up to `max_hp`, returning the HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_hp - self.hp);
        self.hp += restored;
        restored
    }

    pub fn heal_full(&mut self) -> u32 {
        self.heal(self.max_hp)
    }
}

/// Leadership handoff after the leader fell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Succession {
    /// The fallen leader, already removed from the party.
    pub fallen: PartyMember,
    pub new_leader: MemberId,
}

/// Ordered party. Index 0 is the acting leader.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Party {
    members: ArrayVec<PartyMember, { GameConfig::MAX_PARTY_SIZE }>,
}

impl Party {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leader(&self) -> Option<&PartyMember> {
        self.members.first()
    }

    pub fn leader_mut(&mut self) -> Option<&mut PartyMember> {
        self.members.first_mut()
    }

    /// The leader if it is still standing.
    pub fn living_leader(&self) -> Option<&PartyMember> {
        self.leader().filter(|leader| leader.is_alive())
    }

    pub fn members(&self) -> &[PartyMember] {
        &self.members
    }

    pub fn members_mut(&mut self) -> impl Iterator<Item = &mut PartyMember> {
        self.members.iter_mut()
    }

    pub fn member(&self, id: MemberId) -> Option<&PartyMember> {
        self.members.iter().find(|member| member.id == id)
    }

    pub fn member_mut(&mut self, id: MemberId) -> Option<&mut PartyMember> {
        self.members.iter_mut().find(|member| member.id == id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.is_full()
    }

    /// Appends a member, handing it back when the party is full.
    pub fn push(&mut self, member: PartyMember) -> Result<(), PartyMember> {
        self.members
            .try_push(member)
            .map_err(|err| err.element())
    }

    pub fn any_alive(&self) -> bool {
        self.members.iter().any(PartyMember::is_alive)
    }

    /// Removes a member by id.
    pub fn remove(&mut self, id: MemberId) -> Option<PartyMember> {
        let index = self.members.iter().position(|member| member.id == id)?;
        Some(self.members.remove(index))
    }

    /// Promotes the first living member to leader after the leader fell.
    ///
    /// The fallen leader is removed from the party. Returns `None` (and leaves
    /// the party untouched) when the leader is alive or nobody else is.
    pub fn succeed(&mut self) -> Option<Succession> {
        if self.leader()?.is_alive() {
            return None;
        }
        let successor = self
            .members
            .iter()
            .skip(1)
            .position(PartyMember::is_alive)?
            + 1;

        let promoted = self.members.remove(successor);
        let new_leader = promoted.id;
        self.members.insert(0, promoted);
        let fallen = self.members.remove(1);

        Some(Succession { fallen, new_leader })
    }
}
