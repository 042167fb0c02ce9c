use crate::state::Position;

/// How the hand reacts when a card arrives while it is already full.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OverflowPolicy {
    /// Move the oldest hand card to the discard pile and keep the new one.
    #[default]
    DiscardOldest,
    /// Park the incoming card until the player picks what to drop.
    Prompt,
}

/// Stats of the party leader created at the start of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeaderConfig {
    pub name: String,
    pub hp: u32,
    pub atk: u32,
    pub mag: u32,
}

impl Default for LeaderConfig {
    fn default() -> Self {
        Self {
            name: "Wanderer".to_string(),
            hp: 30,
            atk: 3,
            mag: 2,
        }
    }
}

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Entrance of the first level.
    pub entry: Position,
    /// Reserved tile index of the boss encounter on boss levels.
    pub boss_tile_index: usize,
    /// Cards dealt from the starting deck when a run begins.
    pub opening_hand: usize,
    pub overflow_policy: OverflowPolicy,
    pub flee_base_difficulty: u32,
    /// Hazard difficulty is this value plus the current level.
    pub hazard_base_difficulty: u32,
    pub hazard_damage_die: u32,
    /// Percent chance that a fight draws from the rare pool.
    pub rare_enemy_chance: u32,
    /// Percent chance that an item tile yields a card instead of equipment.
    pub item_card_chance: u32,
    pub boss_reward_atk: u32,
    pub boss_reward_max_hp: u32,
    /// Maximum retained log entries.
    pub log_capacity: usize,
    pub leader: LeaderConfig,
    /// Card definition ids shuffled into the deck at run start.
    pub starting_deck: Vec<String>,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const GRID_SIZE: usize = 4;
    pub const TILE_COUNT: usize = Self::GRID_SIZE * Self::GRID_SIZE;
    pub const HAND_CAP: usize = 5;
    pub const MAX_PARTY_SIZE: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BOSS_TILE_INDEX: usize = Self::TILE_COUNT - 1;
    pub const DEFAULT_FLEE_BASE_DIFFICULTY: u32 = 12;
    pub const DEFAULT_HAZARD_BASE_DIFFICULTY: u32 = 10;
    pub const DEFAULT_LOG_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self {
            entry: Position::new(1, 0),
            boss_tile_index: Self::DEFAULT_BOSS_TILE_INDEX,
            opening_hand: 3,
            overflow_policy: OverflowPolicy::DiscardOldest,
            flee_base_difficulty: Self::DEFAULT_FLEE_BASE_DIFFICULTY,
            hazard_base_difficulty: Self::DEFAULT_HAZARD_BASE_DIFFICULTY,
            hazard_damage_die: 4,
            rare_enemy_chance: 20,
            item_card_chance: 50,
            boss_reward_atk: 1,
            boss_reward_max_hp: 5,
            log_capacity: Self::DEFAULT_LOG_CAPACITY,
            leader: LeaderConfig::default(),
            starting_deck: [
                "strike", "strike", "heal", "defend", "dodge", "stun", "scout",
            ]
            .iter()
            .map(|id| id.to_string())
            .collect(),
        }
    }

    pub fn with_overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
