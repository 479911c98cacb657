//! Round generation: bye selection and score-proximity pairing that avoids rematches.

use crate::models::{MatchHistory, PendingMatch, Player, PlayerId, Tournament, TournamentError};
use crate::store::{MatchLedger, PendingMatchStore, PlayerRepository, TournamentCounter};

/// Pairings for one round, before anything is written back.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RoundPairing {
    /// Player receiving the bye (odd player counts only).
    pub bye: Option<Player>,
    /// Matches in pairing order.
    pub pairs: Vec<(Player, Player)>,
}

/// Pair `players` for round `round_number`. Pure: scores and bye flags are not touched.
///
/// 1. Round 1 is ordered by `display_order`, later rounds by score (highest first).
///    Both sorts are stable, so ties keep their incoming order.
/// 2. With an odd count, the lowest-scored player who has not had a bye sits out
///    (lowest-scored overall if everyone has had one).
/// 3. The first player in the pool is matched with the lowest-scored remaining player
///    they have not yet played, or the lowest-scored remaining player if they have played
///    everyone left. Repeat until fewer than two remain.
pub fn pair_players(mut players: Vec<Player>, history: &MatchHistory, round_number: u32) -> RoundPairing {
    if round_number == 1 {
        players.sort_by_key(|p| p.display_order);
    } else {
        players.sort_by(|a, b| b.score.cmp(&a.score));
    }

    let mut pool = players;
    let mut pairing = RoundPairing::default();

    if pool.len() % 2 != 0 {
        if let Some(idx) = select_bye(&pool) {
            pairing.bye = Some(pool.remove(idx));
        }
    }

    while pool.len() >= 2 {
        let p1 = pool.remove(0);
        let idx = select_opponent(&p1, &pool, history);
        let p2 = pool.remove(idx);
        log::debug!("Paired {} vs {}", p1.name, p2.name);
        pairing.pairs.push((p1, p2));
    }

    pairing
}

/// Index of the bye recipient within `pool`.
fn select_bye(pool: &[Player]) -> Option<usize> {
    let eligible = pool
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.has_received_bye)
        .min_by_key(|(_, p)| p.score);
    eligible
        .or_else(|| pool.iter().enumerate().min_by_key(|(_, p)| p.score))
        .map(|(i, _)| i)
}

/// Index of `p1`'s opponent within a non-empty `pool`. `min_by_key` keeps the first of equal scores.
fn select_opponent(p1: &Player, pool: &[Player], history: &MatchHistory) -> usize {
    let fresh = pool
        .iter()
        .enumerate()
        .filter(|(_, p)| !history.has_played(p1.id, p.id))
        .min_by_key(|(_, p)| p.score);
    match fresh {
        Some((i, _)) => i,
        None => {
            log::debug!("{} has played everyone left; allowing a rematch", p1.name);
            pool.iter()
                .enumerate()
                .min_by_key(|(_, p)| p.score)
                .map(|(i, _)| i)
                .unwrap_or(0)
        }
    }
}

/// Generate the next round from the active players and store it as the pending match set.
///
/// Fails with `RoundInProgress` (and changes nothing) while any match is still pending.
/// The bye recipient is awarded their point immediately. Returns the new pending matches,
/// bye first.
pub fn generate_round<P, L, Q, C>(tournament: &mut Tournament<P, L, Q, C>) -> Result<Vec<PendingMatch>, TournamentError>
where
    P: PlayerRepository,
    L: MatchLedger,
    Q: PendingMatchStore,
    C: TournamentCounter,
{
    if !tournament.pending.is_empty() {
        return Err(TournamentError::RoundInProgress);
    }

    let round_number = tournament.rounds.get_round() + 1;
    let history = tournament.history();
    let pairing = pair_players(tournament.players.list_active(), &history, round_number);

    let mut matches = Vec::with_capacity(pairing.pairs.len() + 1);
    if let Some(mut bye) = pairing.bye {
        bye.award_bye();
        tournament.players.update(bye.clone());
        log::info!("Round {}: {} receives a bye", round_number, bye.name);
        matches.push(PendingMatch::Bye { player: bye });
    }
    matches.extend(
        pairing
            .pairs
            .into_iter()
            .map(|(player1, player2)| PendingMatch::Regular { player1, player2 }),
    );

    tournament.pending.replace_all(matches.clone());
    tournament.rounds.increment_round();
    log::info!("Generated round {} with {} match(es)", round_number, matches.len());
    Ok(matches)
}

/// Ids of every player appearing in `matches`, in order.
pub fn scheduled_player_ids(matches: &[PendingMatch]) -> Vec<PlayerId> {
    matches
        .iter()
        .flat_map(|m| std::iter::once(m.player1().id).chain(m.player2().map(|p| p.id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchRecord;

    fn player(name: &str, order: u32, score: u32, had_bye: bool) -> Player {
        let mut p = Player::new(name, order, had_bye);
        p.score = score;
        p
    }

    fn names(pairing: &RoundPairing) -> Vec<(String, String)> {
        pairing
            .pairs
            .iter()
            .map(|(a, b)| (a.name.clone(), b.name.clone()))
            .collect()
    }

    #[test]
    fn round_one_uses_display_order() {
        let players = vec![
            player("C", 2, 0, false),
            player("A", 0, 0, false),
            player("D", 3, 0, false),
            player("B", 1, 0, false),
        ];
        let pairing = pair_players(players, &MatchHistory::default(), 1);
        assert!(pairing.bye.is_none());
        assert_eq!(
            names(&pairing),
            vec![("A".into(), "B".into()), ("C".into(), "D".into())]
        );
    }

    #[test]
    fn later_rounds_sort_by_score_and_pick_lowest_opponent() {
        let players = vec![
            player("A", 0, 1, false),
            player("B", 1, 3, false),
            player("C", 2, 2, false),
            player("D", 3, 0, false),
        ];
        // Pool order: B(3), C(2), A(1), D(0). B takes the lowest score, D.
        let pairing = pair_players(players, &MatchHistory::default(), 2);
        assert_eq!(
            names(&pairing),
            vec![("B".into(), "D".into()), ("C".into(), "A".into())]
        );
    }

    #[test]
    fn avoids_rematch_when_possible() {
        let a = player("A", 0, 2, false);
        let b = player("B", 1, 1, false);
        let c = player("C", 2, 1, false);
        let d = player("D", 3, 0, false);
        let history = MatchHistory::from_records(&[MatchRecord::new(a.id, d.id)]);
        let pairing = pair_players(vec![a, b, c, d], &history, 2);
        // A already beat D, so A takes the first lowest unplayed: B.
        assert_eq!(
            names(&pairing),
            vec![("A".into(), "B".into()), ("C".into(), "D".into())]
        );
    }

    #[test]
    fn allows_rematch_when_unavoidable() {
        let a = player("A", 0, 1, false);
        let b = player("B", 1, 0, false);
        let history = MatchHistory::from_records(&[MatchRecord::new(a.id, b.id)]);
        let pairing = pair_players(vec![a, b], &history, 2);
        assert_eq!(names(&pairing), vec![("A".into(), "B".into())]);
    }

    #[test]
    fn bye_goes_to_lowest_eligible_player() {
        let players = vec![
            player("A", 0, 2, false),
            player("B", 1, 0, true),
            player("C", 2, 1, false),
        ];
        let pairing = pair_players(players, &MatchHistory::default(), 3);
        assert_eq!(pairing.bye.as_ref().map(|p| p.name.as_str()), Some("C"));
        assert_eq!(names(&pairing), vec![("A".into(), "B".into())]);
    }

    #[test]
    fn bye_falls_back_to_lowest_score_when_all_had_one() {
        let players = vec![
            player("A", 0, 2, true),
            player("B", 1, 1, true),
            player("C", 2, 1, true),
        ];
        // Sorted: A(2), B(1), C(1); B is the first minimum.
        let pairing = pair_players(players, &MatchHistory::default(), 4);
        assert_eq!(pairing.bye.as_ref().map(|p| p.name.as_str()), Some("B"));
    }

    #[test]
    fn single_player_gets_bye_and_empty_pool_pairs_nothing() {
        let pairing = pair_players(vec![player("Solo", 0, 0, false)], &MatchHistory::default(), 1);
        assert_eq!(pairing.bye.as_ref().map(|p| p.name.as_str()), Some("Solo"));
        assert!(pairing.pairs.is_empty());

        let empty = pair_players(Vec::new(), &MatchHistory::default(), 1);
        assert_eq!(empty, RoundPairing::default());
    }
}
