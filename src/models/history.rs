//! Opponent history derived from the match ledger.

use crate::models::game::MatchRecord;
use crate::models::player::PlayerId;
use std::collections::HashMap;

/// Who beat whom, computed from ledger records. Nothing here is stored.
#[derive(Clone, Debug, Default)]
pub struct MatchHistory {
    wins: HashMap<PlayerId, Vec<PlayerId>>,
    losses: HashMap<PlayerId, Vec<PlayerId>>,
}

impl MatchHistory {
    pub fn from_records(records: &[MatchRecord]) -> Self {
        let mut history = Self::default();
        for r in records {
            history.wins.entry(r.winner_id).or_default().push(r.loser_id);
            history.losses.entry(r.loser_id).or_default().push(r.winner_id);
        }
        history
    }

    /// Opponents `player_id` has beaten, in ledger order.
    pub fn wins_against(&self, player_id: PlayerId) -> &[PlayerId] {
        self.wins.get(&player_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Opponents `player_id` has lost to, in ledger order.
    pub fn losses_against(&self, player_id: PlayerId) -> &[PlayerId] {
        self.losses.get(&player_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_played(&self, a: PlayerId, b: PlayerId) -> bool {
        self.wins_against(a).contains(&b) || self.losses_against(a).contains(&b)
    }
}
