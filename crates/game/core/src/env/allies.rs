use std::collections::BTreeSet;

/// Read-only lookup of recruitable ally templates.
pub trait AllyOracle: Send + Sync {
    fn ally(&self, id: &str) -> Option<AllyTemplate>;

    /// All ally ids in a stable (sorted) order.
    fn ally_ids(&self) -> Vec<String>;
}

/// Static ally record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllyTemplate {
    pub name: String,
    pub hp: u32,
    pub atk: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mag: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: BTreeSet<String>,
    /// Card definition granted to the hand on recruitment.
    #[cfg_attr(feature = "serde", serde(default))]
    pub card: Option<String>,
}

impl AllyTemplate {
    pub fn new(name: impl Into<String>, hp: u32, atk: u32, mag: u32) -> Self {
        Self {
            name: name.into(),
            hp,
            atk,
            mag,
            tags: BTreeSet::new(),
            card: None,
        }
    }

    pub fn with_card(mut self, card: impl Into<String>) -> Self {
        self.card = Some(card.into());
        self
    }
}
