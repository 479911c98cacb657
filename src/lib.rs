//! Swiss tournament web app: library with models, storage traits and business logic.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use config::ServerConfig;
pub use logic::{
    generate_round, pair_players, parse_roster_csv, record_result, scheduled_player_ids,
    ResultOutcome, RoundPairing,
};
pub use models::{
    MatchHistory, MatchRecord, PendingMatch, Player, PlayerId, PlayerStanding, RoundPhase,
    Tournament, TournamentError, TournamentId, TournamentSnapshot,
};
