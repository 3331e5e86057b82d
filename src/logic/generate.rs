//! Bracket generation: seeding snapshot, match tree, walkover resolution.

use chrono::{DateTime, Utc};

use crate::logic::advance::place_winner;
use crate::logic::seeding::{matches_in_round, seed_order, slot_count, total_rounds};
use crate::models::{
    BracketMatch, Participant, Tournament, TournamentError, TournamentStatus, MIN_PARTICIPANTS,
};

/// Whether a bracket can be generated: not yet generated, registrations
/// closed (explicitly, by deadline, or at capacity), and at least the
/// minimum of paid registrations. Evaluated from persisted fields only.
pub fn can_generate(tournament: &Tournament, now: DateTime<Utc>) -> bool {
    !tournament.bracket_generated
        && tournament.registrations_are_closed(now)
        && tournament.paid_count() >= MIN_PARTICIPANTS
}

/// Build the full match tree for the given seeding order. Pure: no
/// tournament record, no clock.
///
/// Round 1 match k pairs seed positions 2(k-1) and 2(k-1)+1; positions past
/// the end of the list are byes. Later rounds start with empty slots.
/// Round-1 matches with exactly one player complete immediately as
/// walkovers and their winners are placed into round 2; matches with zero
/// or two players stay pending.
pub fn compute_bracket(participants: &[Participant]) -> Vec<BracketMatch> {
    let slots = slot_count(participants.len());
    let rounds = total_rounds(slots);

    let mut matches = Vec::with_capacity(slots.saturating_sub(1));
    for round in 1..=rounds {
        for number in 1..=matches_in_round(slots, round) {
            let (player1, player2) = if round == 1 {
                let base = (number as usize - 1) * 2;
                (
                    participants.get(base).map(|p| p.id),
                    participants.get(base + 1).map(|p| p.id),
                )
            } else {
                (None, None)
            };
            matches.push(BracketMatch::new(round, number, player1, player2));
        }
    }

    resolve_walkovers(&mut matches, slots);
    matches
}

/// Complete every single-player round-1 match as a walkover and place its
/// winner in round 2. Walkover resolution is the same advancement rule as a
/// reported result, applied automatically.
fn resolve_walkovers(matches: &mut [BracketMatch], slots: usize) {
    for number in 1..=matches_in_round(slots, 1) {
        let idx = (number - 1) as usize;
        let winner = match (matches[idx].player1, matches[idx].player2) {
            (Some(w), None) | (None, Some(w)) => w,
            _ => continue,
        };
        matches[idx].complete_walkover(winner);
        // A bye implies more than two slots, so round 2 exists.
        let _ = place_winner(matches, 1, number, winner);
    }
}

/// Generate the bracket for a tournament: snapshot the paid registrations
/// in seed order, build the match tree, and freeze the generated flag.
///
/// At most one generation ever succeeds per tournament. The caller must
/// hold the tournament exclusively for the whole call so the gate check,
/// the match insert, and the flag set cannot interleave with a concurrent
/// generation; the loser of such a race sees `AlreadyGenerated`.
pub fn generate_bracket(
    tournament: &mut Tournament,
    now: DateTime<Utc>,
) -> Result<(), TournamentError> {
    if tournament.bracket_generated {
        return Err(TournamentError::AlreadyGenerated);
    }
    if !tournament.registrations_are_closed(now) {
        return Err(TournamentError::RegistrationsStillOpen);
    }
    let participants = seed_order(&tournament.registrations);
    if participants.len() < MIN_PARTICIPANTS {
        return Err(TournamentError::NotEnoughParticipants {
            confirmed: participants.len(),
        });
    }
    tournament.matches = compute_bracket(&participants);
    tournament.bracket_generated = true;
    tournament.status = TournamentStatus::Ongoing;
    log::info!(
        "generated bracket for tournament {}: {} participants, {} matches",
        tournament.id,
        participants.len(),
        tournament.matches.len()
    );
    Ok(())
}
