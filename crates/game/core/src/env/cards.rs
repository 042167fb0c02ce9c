/// Read-only lookup of card definitions by id.
pub trait CardOracle: Send + Sync {
    fn card(&self, id: &str) -> Option<CardDefinition>;
}

/// Broad category of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CardKind {
    Attack,
    Defense,
    Utility,
}

/// Effect carried by a card, dispatched exhaustively when the card is played.
///
/// Content files name the effect in a `kind` tag; unrecognised tags load as
/// [`CardEffect::Inert`], which plays as a no-op.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum CardEffect {
    /// Physical hit: `max(1, atk + bonus + d6 - 3)`.
    Strike {
        #[cfg_attr(feature = "serde", serde(default))]
        bonus: u32,
    },
    /// Magic hit: `max(1, mag + bonus + d6 - 3)`.
    Spell {
        #[cfg_attr(feature = "serde", serde(default))]
        bonus: u32,
    },
    /// Heal the leader.
    Heal { amount: u32 },
    /// Heal every living member.
    Rally { amount: u32 },
    /// The enemy skips its next turn.
    Stun,
    /// The next enemy attack misses.
    Dodge,
    /// The next enemy hit is halved (rounded up).
    Defend,
    /// Flat reduction of the next enemy hit.
    Shield { amount: u32 },
    /// Discover hidden tiles.
    Scout { count: u32 },
    /// Leave a non-boss combat without a roll.
    Escape,
    #[cfg_attr(feature = "serde", serde(other))]
    Inert,
}

impl CardEffect {
    /// Effects that only make sense against an active enemy.
    pub fn requires_combat(&self) -> bool {
        matches!(
            self,
            Self::Strike { .. }
                | Self::Spell { .. }
                | Self::Stun
                | Self::Dodge
                | Self::Defend
                | Self::Shield { .. }
                | Self::Escape
        )
    }
}

/// Static card record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardDefinition {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: CardKind,
    pub effect: CardEffect,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl CardDefinition {
    pub fn new(name: impl Into<String>, kind: CardKind, effect: CardEffect) -> Self {
        Self {
            name: name.into(),
            kind,
            effect,
            description: String::new(),
        }
    }
}
