//! Equipment held by a party member.
//!
//! Equipment provides stat bonuses; a member's derived stats are the base
//! stats plus the sum of every equipped bonus.

use crate::env::{EquipSlot, StatBonus};

/// An item occupying an equipment slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquippedItem {
    /// Item definition id.
    pub item: String,
    pub bonus: StatBonus,
}

impl EquippedItem {
    pub fn new(item: impl Into<String>, bonus: StatBonus) -> Self {
        Self {
            item: item.into(),
            bonus,
        }
    }
}

/// One optional item per slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub weapon: Option<EquippedItem>,
    pub armor: Option<EquippedItem>,
    pub accessory: Option<EquippedItem>,
}

impl Equipment {
    /// Creates empty equipment.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipSlot) -> Option<&EquippedItem> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_ref(),
            EquipSlot::Armor => self.armor.as_ref(),
            EquipSlot::Accessory => self.accessory.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<EquippedItem> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
            EquipSlot::Accessory => &mut self.accessory,
        }
    }

    /// Equips an item, returning the previously equipped item if any.
    pub fn equip(&mut self, slot: EquipSlot, item: EquippedItem) -> Option<EquippedItem> {
        self.slot_mut(slot).replace(item)
    }

    /// Unequips a slot, returning its item if any was equipped.
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<EquippedItem> {
        self.slot_mut(slot).take()
    }

    /// Removes and returns every equipped item.
    pub fn drain(&mut self) -> Vec<EquippedItem> {
        [self.weapon.take(), self.armor.take(), self.accessory.take()]
            .into_iter()
            .flatten()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EquippedItem> {
        [&self.weapon, &self.armor, &self.accessory]
            .into_iter()
            .filter_map(Option::as_ref)
    }

    /// Sum of all equipped bonuses.
    pub fn total_bonus(&self) -> StatBonus {
        self.iter()
            .fold(StatBonus::default(), |total, item| total + item.bonus)
    }
}
