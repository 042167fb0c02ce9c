mod board;
mod boss;
mod combat;
mod common;
mod equipment;
mod hand;
mod log;
mod party;
mod tile;

pub use board::Board;
pub use boss::BossState;
pub use combat::{BossPhaseRef, CombatState, CombatStatus, EnemySnapshot, StatusFlags, Turn};
pub use common::{CardId, MemberId, Position, Stat};
pub use equipment::{Equipment, EquippedItem};
pub use hand::{AddOutcome, Card, CardPiles, Hand};
pub use log::{GameLog, LogEntry, LogKind};
pub use party::{BaseStats, Party, PartyMember, Succession};
pub use tile::{Engagement, Tile, TileFlags, TileKind};
