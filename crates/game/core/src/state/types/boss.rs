/// Progress through a boss encounter.
///
/// `current_phase` only increases; once it reaches the phase count the boss
/// is defeated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossState {
    pub active: bool,
    pub boss_id: String,
    pub current_phase: usize,
    /// Set when a phase finishes, cleared when the next one starts.
    pub phase_complete: bool,
    pub defeated: bool,
    /// Next enemy within the current fight phase.
    pub enemy_index: usize,
}

impl BossState {
    pub fn new(boss_id: impl Into<String>) -> Self {
        Self {
            active: true,
            boss_id: boss_id.into(),
            current_phase: 0,
            phase_complete: false,
            defeated: false,
            enemy_index: 0,
        }
    }
}
