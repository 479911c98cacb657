//! Pending matches (the current round's work queue) and completed match records.

use crate::models::player::{Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A generated pairing awaiting a result. Holds player snapshots taken at generation time.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingMatch {
    Regular { player1: Player, player2: Player },
    /// Unpaired player; the point was already awarded when the round was generated.
    Bye { player: Player },
}

impl PendingMatch {
    pub fn is_bye(&self) -> bool {
        matches!(self, PendingMatch::Bye { .. })
    }

    /// True if this is the bye entry for `player_id`.
    pub fn is_bye_for(&self, player_id: PlayerId) -> bool {
        matches!(self, PendingMatch::Bye { player } if player.id == player_id)
    }

    /// True if this is a regular match between `a` and `b`, in either order.
    pub fn is_between(&self, a: PlayerId, b: PlayerId) -> bool {
        match self {
            PendingMatch::Regular { player1, player2 } => {
                (player1.id == a && player2.id == b) || (player1.id == b && player2.id == a)
            }
            PendingMatch::Bye { .. } => false,
        }
    }

    /// First (or only) player of the match.
    pub fn player1(&self) -> &Player {
        match self {
            PendingMatch::Regular { player1, .. } => player1,
            PendingMatch::Bye { player } => player,
        }
    }

    /// Opponent of `player1`, `None` for a bye.
    pub fn player2(&self) -> Option<&Player> {
        match self {
            PendingMatch::Regular { player2, .. } => Some(player2),
            PendingMatch::Bye { .. } => None,
        }
    }
}

/// Immutable fact: `winner_id` beat `loser_id`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub winner_id: PlayerId,
    pub loser_id: PlayerId,
    pub recorded_at: DateTime<Utc>,
}

impl MatchRecord {
    pub fn new(winner_id: PlayerId, loser_id: PlayerId) -> Self {
        Self {
            winner_id,
            loser_id,
            recorded_at: Utc::now(),
        }
    }

    /// True if this record is between `a` and `b`, regardless of who won.
    pub fn involves_pair(&self, a: PlayerId, b: PlayerId) -> bool {
        (self.winner_id == a && self.loser_id == b) || (self.winner_id == b && self.loser_id == a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_match_is_tagged() {
        let bye = PendingMatch::Bye {
            player: Player::new("Alice", 0, false),
        };
        let json = serde_json::to_value(&bye).unwrap();
        assert_eq!(json["kind"], "bye");
        assert_eq!(json["player"]["name"], "Alice");
    }

    #[test]
    fn regular_match_matches_either_order() {
        let a = Player::new("A", 0, false);
        let b = Player::new("B", 1, false);
        let m = PendingMatch::Regular {
            player1: a.clone(),
            player2: b.clone(),
        };
        assert!(m.is_between(a.id, b.id));
        assert!(m.is_between(b.id, a.id));
        assert!(!m.is_bye_for(a.id));
        assert_eq!(m.player2().map(|p| p.id), Some(b.id));
    }

    #[test]
    fn record_pair_is_unordered() {
        let a = PlayerId::new_v4();
        let b = PlayerId::new_v4();
        let r = MatchRecord::new(a, b);
        assert!(r.involves_pair(b, a));
        assert!(!r.involves_pair(a, PlayerId::new_v4()));
    }
}
