//! Tournament, TournamentError and RoundPhase.

use crate::models::game::PendingMatch;
use crate::models::history::MatchHistory;
use crate::models::player::{Player, PlayerId, PlayerStanding};
use crate::store::{
    Ledger, MatchLedger, PendingMatchStore, PendingMatches, PlayerRegistry, PlayerRepository,
    RoundCounter, TournamentCounter,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A player with this name is already registered.
    DuplicatePlayer(String),
    /// A round cannot be generated while matches are still pending.
    RoundInProgress,
    /// Unknown player id, or `None` when a regular result has no loser.
    PlayerNotFound(Option<PlayerId>),
    /// Malformed input (empty name, empty or unreadable roster).
    InvalidInput(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::DuplicatePlayer(_) => write!(f, "Player with this name already exists"),
            TournamentError::RoundInProgress => write!(
                f,
                "All matches must be completed before generating a new round."
            ),
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::InvalidInput(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Whether the current round still has matches waiting for results.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    /// No pending matches; a new round may be generated.
    #[default]
    Idle,
    RoundActive,
}

/// Everything a client needs to render a tournament.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    pub id: TournamentId,
    pub current_round: u32,
    pub phase: RoundPhase,
    pub players: Vec<PlayerStanding>,
    pub pending_matches: Vec<PendingMatch>,
}

/// One tournament: its players, match ledger, pending matches and round counter.
///
/// Defaults to the in-memory stores; any backend implementing the store traits can be used.
#[derive(Clone, Debug)]
pub struct Tournament<
    P = PlayerRegistry,
    L = Ledger,
    Q = PendingMatches,
    C = RoundCounter,
> {
    pub id: TournamentId,
    pub players: P,
    pub ledger: L,
    pub pending: Q,
    pub rounds: C,
}

impl Tournament {
    /// Create an empty in-memory tournament at round 0.
    pub fn new() -> Self {
        Self::with_stores(
            PlayerRegistry::default(),
            Ledger::default(),
            PendingMatches::default(),
            RoundCounter::default(),
        )
    }
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, L, Q, C> Tournament<P, L, Q, C>
where
    P: PlayerRepository,
    L: MatchLedger,
    Q: PendingMatchStore,
    C: TournamentCounter,
{
    pub fn with_stores(players: P, ledger: L, pending: Q, rounds: C) -> Self {
        Self {
            id: Uuid::new_v4(),
            players,
            ledger,
            pending,
            rounds,
        }
    }

    pub fn current_round(&self) -> u32 {
        self.rounds.get_round()
    }

    pub fn phase(&self) -> RoundPhase {
        if self.pending.is_empty() {
            RoundPhase::Idle
        } else {
            RoundPhase::RoundActive
        }
    }

    pub fn get_pending_matches(&self) -> Vec<PendingMatch> {
        self.pending.get_all()
    }

    /// Register a player. Names are trimmed and must be unique.
    /// Players joining after round 1 has been generated are not eligible for a bye.
    pub fn create_player(&mut self, name: &str) -> Result<Player, TournamentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidInput("Player name must not be empty".into()));
        }
        if self.players.find_by_name(name).is_some() {
            return Err(TournamentError::DuplicatePlayer(name.to_string()));
        }
        let display_order = self.players.count() as u32;
        let late_join = self.rounds.get_round() > 0;
        let player = self.players.create(name, display_order, late_join);
        log::info!("Registered player {} ({})", player.name, player.id);
        Ok(player)
    }

    /// Register many players at once. Blank names are dropped; names already registered are
    /// skipped. Fails without creating anyone if no valid name is given.
    pub fn import_players<I, S>(&mut self, names: I) -> Result<Vec<Player>, TournamentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        if names.is_empty() {
            return Err(TournamentError::InvalidInput("No valid player names given.".into()));
        }
        let mut created = Vec::new();
        for name in names {
            if self.players.find_by_name(&name).is_some() {
                log::debug!("Skipping already registered player {}", name);
                continue;
            }
            created.push(self.create_player(&name)?);
        }
        Ok(created)
    }

    /// Withdraw a player from future rounds. Their match history is kept.
    pub fn withdraw_player(&mut self, player_id: PlayerId) -> Result<PlayerStanding, TournamentError> {
        let mut player = self
            .players
            .get(player_id)
            .ok_or(TournamentError::PlayerNotFound(Some(player_id)))?;
        player.withdraw();
        self.players.update(player.clone());
        log::info!("Player {} withdrew", player.name);
        let history = self.history();
        Ok(standing(player, &history))
    }

    /// Shuffle the active players and renumber their display order. Withdrawn players keep theirs.
    /// Returns all players in display order.
    pub fn shuffle_players<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<PlayerStanding> {
        let mut active = self.players.list_active();
        active.shuffle(rng);
        for (i, mut p) in active.into_iter().enumerate() {
            p.display_order = i as u32;
            self.players.update(p);
        }
        self.players_by_display_order()
    }

    /// All players (withdrawn included) in display order, with their win/loss opponents.
    pub fn players_by_display_order(&self) -> Vec<PlayerStanding> {
        let mut players = self.players.list_all();
        players.sort_by_key(|p| p.display_order);
        let history = self.history();
        players.into_iter().map(|p| standing(p, &history)).collect()
    }

    /// All players ordered by score (highest first), ties kept in display order.
    pub fn get_standings(&self) -> Vec<PlayerStanding> {
        let mut standings = self.players_by_display_order();
        standings.sort_by(|a, b| b.player.score.cmp(&a.player.score));
        standings
    }

    pub fn snapshot(&self) -> TournamentSnapshot {
        TournamentSnapshot {
            id: self.id,
            current_round: self.current_round(),
            phase: self.phase(),
            players: self.players_by_display_order(),
            pending_matches: self.get_pending_matches(),
        }
    }

    /// Clear everything: no players, no history, no pending matches, round 0.
    pub fn reset(&mut self) {
        self.players.clear();
        self.ledger.clear();
        self.pending.replace_all(Vec::new());
        self.rounds.reset();
        log::info!("Tournament {} reset", self.id);
    }

    pub(crate) fn history(&self) -> MatchHistory {
        MatchHistory::from_records(&self.ledger.all())
    }
}

fn standing(player: Player, history: &MatchHistory) -> PlayerStanding {
    PlayerStanding {
        wins_against: history.wins_against(player.id).to_vec(),
        losses_against: history.losses_against(player.id).to_vec(),
        player,
    }
}
