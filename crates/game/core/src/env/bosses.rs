use crate::state::Stat;

/// Read-only lookup of boss definitions.
pub trait BossOracle: Send + Sync {
    fn boss(&self, id: &str) -> Option<BossDefinition>;

    /// Id of the boss guarding the given level, if any.
    fn boss_for_level(&self, level: u32) -> Option<String>;
}

/// One stage of a multi-stage boss encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum BossPhase {
    /// Minion fight. Sequential phases require re-entering the boss tile
    /// between enemies.
    Fight {
        enemies: Vec<String>,
        #[cfg_attr(feature = "serde", serde(default))]
        sequential: bool,
    },
    /// Skill check: d20 + stat vs difficulty. Failure still advances.
    Hazard {
        difficulty: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        stat: Stat,
        #[cfg_attr(feature = "serde", serde(default = "default_hazard_damage"))]
        damage: u32,
    },
    /// The boss itself, a named enemy record.
    BossFight { enemy: String },
    /// Reserved for branching rewards; completes immediately.
    Choice,
}

#[cfg(feature = "serde")]
fn default_hazard_damage() -> u32 {
    BossPhase::DEFAULT_HAZARD_DAMAGE
}

impl BossPhase {
    pub const DEFAULT_HAZARD_DAMAGE: u32 = 3;

    pub fn label(&self) -> &'static str {
        match self {
            Self::Fight { .. } => "fight",
            Self::Hazard { .. } => "hazard",
            Self::BossFight { .. } => "boss-fight",
            Self::Choice => "choice",
        }
    }
}

/// Rewards granted when the final phase completes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VictoryRewards {
    pub gold: u32,
    pub experience: u32,
    /// Terminal boss: defeating it wins the run.
    pub game_complete: bool,
    pub completion_message: String,
}

/// Static boss record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossDefinition {
    pub name: String,
    pub unlock_level: u32,
    pub phases: Vec<BossPhase>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub victory_rewards: VictoryRewards,
}

impl BossDefinition {
    pub fn new(name: impl Into<String>, unlock_level: u32, phases: Vec<BossPhase>) -> Self {
        Self {
            name: name.into(),
            unlock_level,
            phases,
            victory_rewards: VictoryRewards::default(),
        }
    }

    pub fn with_rewards(mut self, rewards: VictoryRewards) -> Self {
        self.victory_rewards = rewards;
        self
    }
}
