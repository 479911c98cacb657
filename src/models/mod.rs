//! Data structures for the Swiss tournament: players, matches, history, tournament state.

mod game;
mod history;
mod player;
mod tournament;

pub use game::{MatchRecord, PendingMatch};
pub use history::MatchHistory;
pub use player::{Player, PlayerId, PlayerStanding};
pub use tournament::{RoundPhase, Tournament, TournamentError, TournamentId, TournamentSnapshot};
