use std::ops::Add;

/// Read-only lookup of equipment definitions.
pub trait ItemOracle: Send + Sync {
    fn item(&self, id: &str) -> Option<ItemDefinition>;

    /// All item ids in a stable (sorted) order.
    fn item_ids(&self) -> Vec<String>;
}

/// Equipment slot. A member holds at most one item per slot.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EquipSlot {
    Weapon,
    Armor,
    Accessory,
}

/// Additive stat modifier granted by equipment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatBonus {
    pub hp: u32,
    pub atk: u32,
    pub mag: u32,
}

impl StatBonus {
    pub const fn new(hp: u32, atk: u32, mag: u32) -> Self {
        Self { hp, atk, mag }
    }
}

impl Add for StatBonus {
    type Output = StatBonus;

    fn add(self, rhs: StatBonus) -> StatBonus {
        StatBonus {
            hp: self.hp + rhs.hp,
            atk: self.atk + rhs.atk,
            mag: self.mag + rhs.mag,
        }
    }
}

/// Static equipment record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub name: String,
    pub slot: EquipSlot,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus: StatBonus,
}

impl ItemDefinition {
    pub fn new(name: impl Into<String>, slot: EquipSlot, bonus: StatBonus) -> Self {
        Self {
            name: name.into(),
            slot,
            bonus,
        }
    }
}
