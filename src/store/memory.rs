//! In-memory stores (used by the web app and tests).

use super::{MatchLedger, PendingMatchStore, PlayerRepository, TournamentCounter};
use crate::models::{MatchRecord, PendingMatch, Player, PlayerId};

/// Players in registration order.
#[derive(Clone, Debug, Default)]
pub struct PlayerRegistry {
    players: Vec<Player>,
}

impl PlayerRepository for PlayerRegistry {
    fn list_active(&self) -> Vec<Player> {
        self.players.iter().filter(|p| p.is_active).cloned().collect()
    }

    fn list_all(&self) -> Vec<Player> {
        self.players.clone()
    }

    fn get(&self, id: PlayerId) -> Option<Player> {
        self.players.iter().find(|p| p.id == id).cloned()
    }

    fn find_by_name(&self, name: &str) -> Option<Player> {
        self.players.iter().find(|p| p.name == name).cloned()
    }

    fn create(&mut self, name: &str, display_order: u32, has_received_bye: bool) -> Player {
        let player = Player::new(name, display_order, has_received_bye);
        self.players.push(player.clone());
        player
    }

    fn update(&mut self, player: Player) {
        if let Some(p) = self.players.iter_mut().find(|p| p.id == player.id) {
            *p = player;
        }
    }

    fn count(&self) -> usize {
        self.players.len()
    }

    fn clear(&mut self) {
        self.players.clear();
    }
}

#[derive(Clone, Debug, Default)]
pub struct Ledger {
    records: Vec<MatchRecord>,
}

impl MatchLedger for Ledger {
    fn append(&mut self, winner_id: PlayerId, loser_id: PlayerId) -> MatchRecord {
        let record = MatchRecord::new(winner_id, loser_id);
        self.records.push(record.clone());
        record
    }

    fn find_by_unordered_pair(&self, a: PlayerId, b: PlayerId) -> Option<MatchRecord> {
        self.records.iter().find(|r| r.involves_pair(a, b)).cloned()
    }

    fn all(&self) -> Vec<MatchRecord> {
        self.records.clone()
    }

    fn clear(&mut self) {
        self.records.clear();
    }
}

#[derive(Clone, Debug, Default)]
pub struct PendingMatches {
    matches: Vec<PendingMatch>,
}

impl PendingMatchStore for PendingMatches {
    fn get_all(&self) -> Vec<PendingMatch> {
        self.matches.clone()
    }

    fn replace_all(&mut self, matches: Vec<PendingMatch>) {
        self.matches = matches;
    }

    fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RoundCounter {
    round: u32,
}

impl TournamentCounter for RoundCounter {
    fn get_round(&self) -> u32 {
        self.round
    }

    fn increment_round(&mut self) {
        self.round += 1;
    }

    fn reset(&mut self) {
        self.round = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lists_active_in_registration_order() {
        let mut reg = PlayerRegistry::default();
        let a = reg.create("A", 0, false);
        let mut b = reg.create("B", 1, false);
        let c = reg.create("C", 2, false);
        b.withdraw();
        reg.update(b);

        let active: Vec<_> = reg.list_active().into_iter().map(|p| p.id).collect();
        assert_eq!(active, vec![a.id, c.id]);
        assert_eq!(reg.count(), 3);
        assert_eq!(reg.list_all().len(), 3);
        assert_eq!(reg.find_by_name("C").map(|p| p.id), Some(c.id));
        assert!(reg.find_by_name("c").is_none());
    }

    #[test]
    fn update_of_unknown_player_is_ignored() {
        let mut reg = PlayerRegistry::default();
        reg.create("A", 0, false);
        reg.update(Player::new("Ghost", 9, false));
        assert_eq!(reg.count(), 1);
        assert!(reg.find_by_name("Ghost").is_none());
    }

    #[test]
    fn ledger_finds_pair_in_either_order() {
        let mut ledger = Ledger::default();
        let a = PlayerId::new_v4();
        let b = PlayerId::new_v4();
        ledger.append(a, b);
        assert!(ledger.find_by_unordered_pair(b, a).is_some());
        assert!(ledger.find_by_unordered_pair(a, PlayerId::new_v4()).is_none());
        ledger.clear();
        assert!(ledger.all().is_empty());
    }

    #[test]
    fn counter_increments_and_resets() {
        let mut c = RoundCounter::default();
        c.increment_round();
        c.increment_round();
        assert_eq!(c.get_round(), 2);
        c.reset();
        assert_eq!(c.get_round(), 0);
    }
}
