//! Authoritative game state representation.
//!
//! [`GameState`] is the explicit context object of a run: the board, the
//! party, cards, combat and boss progress, and the RNG stream all live here.
//! Callers read it freely but mutate it exclusively through the engine, so
//! several independent runs can coexist in one process.
mod error;
pub mod types;

pub use error::InitializationError;
pub use types::{
    AddOutcome, BaseStats, Board, BossPhaseRef, BossState, Card, CardId, CardPiles, CombatState,
    CombatStatus, EnemySnapshot, Engagement, Equipment, EquippedItem, GameLog, Hand, LogEntry,
    LogKind, MemberId, Party, PartyMember, Position, Stat, StatusFlags, Succession, Tile, TileFlags,
    TileKind, Turn,
};

use tracing::{debug, info};

use crate::action::MoveAction;
use crate::config::{GameConfig, OverflowPolicy};
use crate::env::{CardDefinition, GameEnv};
use crate::grid;
use crate::rng::RngStream;

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Run seed. Set once at initialization and never modified.
    pub seed: u64,
    pub rng: RngStream,
    /// Count of successfully executed actions.
    pub nonce: u64,
    pub config: GameConfig,
    pub level: u32,
    pub board: Board,
    pub party: Party,
    /// Active combat, if any.
    pub combat: Option<CombatState>,
    pub cards: CardPiles,
    /// Boss progress on the current level.
    pub boss: Option<BossState>,
    pub key_found: bool,
    pub gold: u32,
    pub experience: u32,
    /// Unequipped item ids owned by the party.
    pub inventory: Vec<String>,
    log: GameLog,
    pub over: bool,
    pub victory: bool,

    /// Never reused. 0 is the founding leader.
    next_member_id: u32,
    /// Never reused.
    next_card_id: u32,
}

/// Where a received card ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardReceipt {
    Added,
    /// The hand was full; the oldest card went to the discard pile.
    ReplacedOldest { discarded: CardId },
    /// The hand was full; the card waits in `pending_overflow`.
    Pending,
}

/// Consequences of damage dealt to the leader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageReport {
    pub dealt: u32,
    /// Member promoted after the leader fell.
    pub new_leader: Option<MemberId>,
    /// No living member remains; the run is over.
    pub wiped: bool,
}

impl GameState {
    /// Starts a new run.
    ///
    /// Everything random derives from `seed`: the first level layout, then
    /// the opening hand drawn from the shuffled starting deck. Missing
    /// starting-deck cards halt initialization.
    pub fn new_run(seed: u64, config: GameConfig, env: &GameEnv<'_>) -> Result<Self, InitializationError> {
        if !config.entry.in_bounds() {
            return Err(InitializationError::InvalidEntry(config.entry));
        }
        if config.opening_hand > GameConfig::HAND_CAP {
            return Err(InitializationError::OpeningHandTooLarge {
                requested: config.opening_hand,
                capacity: GameConfig::HAND_CAP,
            });
        }
        if config.leader.hp == 0 {
            return Err(InitializationError::LeaderWithoutHealth);
        }

        let leader_config = &config.leader;
        let leader = PartyMember::new(
            MemberId::FOUNDER,
            leader_config.name.clone(),
            BaseStats::new(leader_config.hp, leader_config.atk, leader_config.mag),
        )
        .with_tags(["leader"]);
        let mut party = Party::new();
        // An empty party always has room.
        let _ = party.push(leader);

        let mut state = Self {
            seed,
            rng: RngStream::new(seed),
            nonce: 0,
            level: 1,
            board: Board::from_kinds(1, config.entry, [TileKind::Empty; GameConfig::TILE_COUNT]),
            party,
            combat: None,
            cards: CardPiles::default(),
            boss: None,
            key_found: false,
            gold: 0,
            experience: 0,
            inventory: Vec::new(),
            log: GameLog::new(config.log_capacity),
            over: false,
            victory: false,
            next_member_id: MemberId::FOUNDER.0 + 1,
            next_card_id: 0,
            config,
        };

        state.enter_level(1, state.config.entry, env);

        let deck_ids = state.config.starting_deck.clone();
        for id in &deck_ids {
            let definition = env.card(id)?;
            let card = state.create_card(id, &definition);
            state.cards.deck.push(card);
        }
        for _ in 0..state.config.opening_hand {
            let Some(card) = state.cards.draw(&mut state.rng) else {
                break;
            };
            state.cards.hand.add(card);
        }

        state.record(LogKind::Info, format!("A new run begins (seed {seed})."));
        info!(seed, deck = state.cards.deck.len(), "run initialized");
        Ok(state)
    }

    /// Replaces the board with a freshly generated level entered at `entry`.
    ///
    /// Levels with a boss get the boss layout; everything else is drawn from
    /// the level table.
    pub(crate) fn enter_level(&mut self, level: u32, entry: Position, env: &GameEnv<'_>) {
        self.level = level;
        self.key_found = false;
        self.boss = None;
        self.combat = None;
        self.board = match env.boss_for_level(level) {
            Some(boss_id) => {
                let index = grid::boss_tile_index(&self.config, entry);
                debug!(level, %boss_id, index, "boss level");
                grid::generate_boss_level(level, entry, &boss_id, index)
            }
            None => {
                let table = env.level_table(level);
                grid::generate_level(&mut self.rng, level, entry, &table)
            }
        };
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    /// Allocates a fresh member id.
    pub fn allocate_member_id(&mut self) -> MemberId {
        let id = MemberId(self.next_member_id);
        self.next_member_id += 1;
        id
    }

    /// Creates a card instance with a fresh id.
    pub fn create_card(&mut self, definition_id: &str, definition: &CardDefinition) -> Card {
        let id = CardId(self.next_card_id);
        self.next_card_id += 1;
        Card::from_definition(id, definition_id, definition)
    }

    // ========================================================================
    // Cards
    // ========================================================================

    /// Puts a card into the hand, applying the configured overflow policy.
    pub fn receive_card(&mut self, card: Card) -> CardReceipt {
        let name = card.name.clone();
        match self.cards.hand.add(card) {
            AddOutcome::Added => {
                self.record(LogKind::Card, format!("{name} joins the hand."));
                CardReceipt::Added
            }
            AddOutcome::Overflow(card) => match self.config.overflow_policy {
                OverflowPolicy::DiscardOldest => {
                    // The hand is full, so there is always an oldest card.
                    let oldest = self.cards.hand.remove_oldest();
                    let discarded = oldest.as_ref().map_or(card.id, |oldest| oldest.id);
                    if let Some(oldest) = oldest {
                        self.record(
                            LogKind::Card,
                            format!("Hand full: {} is discarded for {name}.", oldest.name),
                        );
                        self.cards.discard.push(oldest);
                    }
                    self.cards.hand.add(card);
                    CardReceipt::ReplacedOldest { discarded }
                }
                OverflowPolicy::Prompt => {
                    self.record(
                        LogKind::Card,
                        format!("Hand full: choose a card to drop for {name}."),
                    );
                    self.cards.pending_overflow = Some(card);
                    CardReceipt::Pending
                }
            },
        }
    }

    // ========================================================================
    // Party
    // ========================================================================

    pub fn leader(&self) -> Option<&PartyMember> {
        self.party.leader()
    }

    pub fn has_living_leader(&self) -> bool {
        self.party.living_leader().is_some()
    }

    /// Damages the leader, handling succession and party wipe.
    ///
    /// A fallen leader with a living member behind it is removed and its
    /// equipment returns to the inventory. With nobody left standing the run
    /// ends and any combat is closed.
    pub fn damage_leader(&mut self, amount: u32) -> DamageReport {
        let Some(leader) = self.party.leader_mut() else {
            return DamageReport::default();
        };
        let dealt = leader.take_damage(amount);
        let fallen = !leader.is_alive();
        let name = leader.name.clone();
        let mut report = DamageReport {
            dealt,
            ..DamageReport::default()
        };

        if fallen {
            match self.party.succeed() {
                Some(Succession {
                    mut fallen,
                    new_leader,
                }) => {
                    self.inventory
                        .extend(fallen.equipment.drain().into_iter().map(|item| item.item));
                    let successor = self
                        .party
                        .leader()
                        .map(|leader| leader.name.clone())
                        .unwrap_or_default();
                    self.record(
                        LogKind::Party,
                        format!("{name} falls! {successor} takes the lead."),
                    );
                    info!(fallen = %fallen.id, leader = %new_leader, "leadership succession");
                    report.new_leader = Some(new_leader);
                }
                None => {
                    self.over = true;
                    self.victory = false;
                    self.combat = None;
                    self.record(LogKind::Party, format!("{name} falls. The party is lost."));
                    info!("party wiped");
                    report.wiped = true;
                }
            }
        }

        self.sync_player_hp();
        report
    }

    /// Mirrors the leader's HP into the active combat.
    pub(crate) fn sync_player_hp(&mut self) {
        let hp = self.party.leader().map_or(0, |leader| leader.hp);
        if let Some(combat) = self.combat.as_mut() {
            combat.player_hp = hp;
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn combat_active(&self) -> bool {
        self.combat.is_some()
    }

    pub fn current_tile(&self) -> &Tile {
        self.board.current_tile()
    }

    /// Whether the player's tile allows moving away.
    pub fn is_tile_completed(&self) -> bool {
        self.current_tile().is_completed(self.combat_active())
    }

    /// Whether a move to `target` would be accepted.
    pub fn can_move_to(&self, target: Position) -> bool {
        MoveAction::new(target).check(self).is_ok()
    }

    /// Why the current tile blocks movement, or `None` when it does not.
    pub fn requirement_text(&self) -> Option<&'static str> {
        if self.is_tile_completed() {
            return None;
        }
        let text = match self.current_tile().kind {
            TileKind::Fight if self.combat_active() => "Finish the fight first.",
            TileKind::Fight => "Defeat the enemy guarding this room.",
            TileKind::Hazard => "Overcome the hazard first.",
            TileKind::Item => "Collect the item first.",
            TileKind::Ally => "Recruit or decline the stranger first.",
            TileKind::Key => "Take the key first.",
            TileKind::BossEncounter => "Defeat the boss first.",
            TileKind::Start | TileKind::Empty | TileKind::Door => return None,
        };
        Some(text)
    }

    pub fn log(&self) -> &GameLog {
        &self.log
    }

    /// Appends a log entry and mirrors it to tracing.
    pub fn record(&mut self, kind: LogKind, message: impl Into<String>) {
        let message = message.into();
        debug!(nonce = self.nonce, %kind, "{message}");
        self.log.push(self.nonce, kind, message);
    }
}
