/// Read-only lookup of enemy templates by id.
pub trait EnemyOracle: Send + Sync {
    fn enemy(&self, id: &str) -> Option<EnemyTemplate>;

    /// All enemy ids in a stable (sorted) order.
    fn enemy_ids(&self) -> Vec<String>;
}

/// Static enemy record consumed by the combat resolver.
///
/// Boss enemies referenced by `BossFight` phases are ordinary templates.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub name: String,
    pub hp: u32,
    pub atk: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mag: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub experience: u32,
}

impl EnemyTemplate {
    pub fn new(name: impl Into<String>, hp: u32, atk: u32) -> Self {
        Self {
            name: name.into(),
            hp,
            atk,
            mag: 0,
            gold: 0,
            experience: 0,
        }
    }

    pub fn with_rewards(mut self, gold: u32, experience: u32) -> Self {
        self.gold = gold;
        self.experience = experience;
        self
    }
}
