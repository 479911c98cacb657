//! Tournament business logic: round pairing, result recording, roster import.

mod pairing;
mod results;
mod roster;

pub use pairing::{generate_round, pair_players, scheduled_player_ids, RoundPairing};
pub use results::{record_result, ResultOutcome};
pub use roster::parse_roster_csv;
