//! Recording match results and retiring pending matches.

use crate::models::{PendingMatch, PlayerId, Tournament, TournamentError};
use crate::store::{MatchLedger, PendingMatchStore, PlayerRepository, TournamentCounter};
use serde::{Deserialize, Serialize};

/// What `record_result` did.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultOutcome {
    /// A pending bye was retired. Its point was awarded at generation time.
    ByeAcknowledged,
    /// New result: winner scored and the match was added to the ledger.
    Recorded,
    /// The pair already has a ledger record; nothing was scored again.
    AlreadyRecorded,
}

/// Record a result for the current round.
///
/// If `winner_id` has a pending bye, the bye is retired and `loser_id` is ignored.
/// Otherwise both players must exist. A pair that already has a ledger record (in either
/// order) is not scored again, so resubmitting a result is harmless. The matching pending
/// match is removed either way.
///
/// When only bye entries are left pending afterwards, they are cleared and the round counts
/// as complete.
pub fn record_result<P, L, Q, C>(
    tournament: &mut Tournament<P, L, Q, C>,
    winner_id: PlayerId,
    loser_id: Option<PlayerId>,
) -> Result<ResultOutcome, TournamentError>
where
    P: PlayerRepository,
    L: MatchLedger,
    Q: PendingMatchStore,
    C: TournamentCounter,
{
    let mut winner = tournament
        .players
        .get(winner_id)
        .ok_or(TournamentError::PlayerNotFound(Some(winner_id)))?;
    let mut pending = tournament.pending.get_all();

    let outcome = if let Some(idx) = pending.iter().position(|m| m.is_bye_for(winner_id)) {
        pending.remove(idx);
        log::debug!("Bye for {} acknowledged", winner.name);
        ResultOutcome::ByeAcknowledged
    } else {
        let loser_id = loser_id.ok_or(TournamentError::PlayerNotFound(None))?;
        let loser = tournament
            .players
            .get(loser_id)
            .ok_or(TournamentError::PlayerNotFound(Some(loser_id)))?;

        let outcome = if tournament
            .ledger
            .find_by_unordered_pair(winner.id, loser.id)
            .is_some()
        {
            log::debug!(
                "Result {} vs {} already recorded; not scoring again",
                winner.name,
                loser.name
            );
            ResultOutcome::AlreadyRecorded
        } else {
            winner.add_win();
            tournament.players.update(winner.clone());
            tournament.ledger.append(winner.id, loser.id);
            log::debug!("{} beat {}", winner.name, loser.name);
            ResultOutcome::Recorded
        };

        if let Some(idx) = pending.iter().position(|m| m.is_between(winner.id, loser.id)) {
            pending.remove(idx);
        }
        outcome
    };

    // TODO: confirm with organisers whether a leftover bye should need explicit acknowledgment.
    if !pending.is_empty() && pending.iter().all(PendingMatch::is_bye) {
        log::warn!(
            "Clearing {} unacknowledged bye(s); round {} complete",
            pending.len(),
            tournament.rounds.get_round()
        );
        pending.clear();
    }
    tournament.pending.replace_all(pending);

    Ok(outcome)
}
