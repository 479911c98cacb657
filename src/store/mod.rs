//! Storage collaborators the tournament logic works through, plus in-memory implementations.
//!
//! A persistent backend implements these four traits; every mutating tournament operation
//! validates first and then writes, so a backend only needs to group the writes of one call.

mod memory;

pub use memory::{Ledger, PendingMatches, PlayerRegistry, RoundCounter};

use crate::models::{MatchRecord, PendingMatch, Player, PlayerId};

/// Player lookup and mutation.
pub trait PlayerRepository {
    /// Active players in registration order.
    fn list_active(&self) -> Vec<Player>;
    /// All players, withdrawn included, in registration order.
    fn list_all(&self) -> Vec<Player>;
    fn get(&self, id: PlayerId) -> Option<Player>;
    fn find_by_name(&self, name: &str) -> Option<Player>;
    fn create(&mut self, name: &str, display_order: u32, has_received_bye: bool) -> Player;
    /// Overwrite the stored player with the same id. Unknown ids are ignored.
    fn update(&mut self, player: Player);
    fn count(&self) -> usize;
    fn clear(&mut self);
}

/// Append-only log of completed matches.
pub trait MatchLedger {
    fn append(&mut self, winner_id: PlayerId, loser_id: PlayerId) -> MatchRecord;
    fn find_by_unordered_pair(&self, a: PlayerId, b: PlayerId) -> Option<MatchRecord>;
    fn all(&self) -> Vec<MatchRecord>;
    fn clear(&mut self);
}

/// The current round's unresolved matches.
pub trait PendingMatchStore {
    fn get_all(&self) -> Vec<PendingMatch>;
    fn replace_all(&mut self, matches: Vec<PendingMatch>);
    fn is_empty(&self) -> bool;
}

/// Round number of the tournament (0 before the first round).
pub trait TournamentCounter {
    fn get_round(&self) -> u32;
    fn increment_round(&mut self);
    fn reset(&mut self);
}
