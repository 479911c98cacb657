//! Player and PlayerStanding data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches, results and lookups).
pub type PlayerId = Uuid;

/// A registered player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Points from wins and byes. Never decremented.
    pub score: u32,
    pub has_received_bye: bool,
    /// False once the player has withdrawn; history is kept.
    pub is_active: bool,
    /// Registration / shuffle order, used to seed round 1.
    pub display_order: u32,
}

impl Player {
    /// Create a new active player with zero points.
    pub fn new(name: impl Into<String>, display_order: u32, has_received_bye: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            score: 0,
            has_received_bye,
            is_active: true,
            display_order,
        }
    }

    /// Record a won match.
    pub fn add_win(&mut self) {
        self.score += 1;
    }

    /// Award a bye: one point, and the player is no longer eligible for another.
    pub fn award_bye(&mut self) {
        self.score += 1;
        self.has_received_bye = true;
    }

    pub fn withdraw(&mut self) {
        self.is_active = false;
    }
}

/// A player together with the opponents they beat and lost to (for API / display).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStanding {
    #[serde(flatten)]
    pub player: Player,
    pub wins_against: Vec<PlayerId>,
    pub losses_against: Vec<PlayerId>,
}
