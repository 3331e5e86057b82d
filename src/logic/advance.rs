//! Result reporting and winner advancement through the bracket.

use crate::logic::seeding::{advances_to_player1, next_match_number};
use crate::models::{
    BracketMatch, MatchStatus, ParticipantId, Tournament, TournamentError, TournamentStatus,
};

/// What happened to the winner of a completed match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AdvanceOutcome {
    /// Winner was written into the given next-round match.
    Advanced { round: u32, match_number: u32 },
    /// The final match completed; the winner is the tournament champion.
    Champion(ParticipantId),
}

/// Write `winner` into the slot of the next-round match fed by
/// (round, match_number): match `ceil(match_number / 2)` of round + 1,
/// player1 slot for odd match numbers, player2 for even. The target always
/// exists in a well-formed bracket.
pub(crate) fn place_winner(
    matches: &mut [BracketMatch],
    round: u32,
    match_number: u32,
    winner: ParticipantId,
) -> Result<(u32, u32), TournamentError> {
    let next_round = round + 1;
    let next_number = next_match_number(match_number);
    let target = matches
        .iter_mut()
        .find(|m| m.round == next_round && m.match_number == next_number)
        .ok_or(TournamentError::MatchNotFound {
            round: next_round,
            match_number: next_number,
        })?;
    if advances_to_player1(match_number) {
        target.player1 = Some(winner);
    } else {
        target.player2 = Some(winner);
    }
    Ok((next_round, next_number))
}

/// Apply a reported result to a match list: complete the target match and,
/// unless it was the final, advance the winner into the next round. Pure
/// over the slice; the match update and the slot write happen together or
/// not at all.
///
/// A match that is already completed is never overwritten; a match with an
/// empty slot should have been resolved as a walkover at generation time,
/// so reporting against it is an error.
pub fn apply_result(
    matches: &mut [BracketMatch],
    round: u32,
    match_number: u32,
    winner: ParticipantId,
    player1_score: Option<String>,
    player2_score: Option<String>,
) -> Result<AdvanceOutcome, TournamentError> {
    let final_round = matches.iter().map(|m| m.round).max().unwrap_or(0);
    let idx = matches
        .iter()
        .position(|m| m.round == round && m.match_number == match_number)
        .ok_or(TournamentError::MatchNotFound {
            round,
            match_number,
        })?;

    let m = &matches[idx];
    if m.status != MatchStatus::Pending {
        return Err(TournamentError::AlreadyCompleted {
            round,
            match_number,
        });
    }
    if m.player1.is_none() || m.player2.is_none() {
        return Err(TournamentError::MissingOpponent {
            round,
            match_number,
        });
    }
    if !m.holds(winner) {
        return Err(TournamentError::WinnerNotInMatch {
            round,
            match_number,
            winner,
        });
    }

    matches[idx].complete_with_result(winner, player1_score, player2_score);

    if round == final_round {
        Ok(AdvanceOutcome::Champion(winner))
    } else {
        let (next_round, next_number) = place_winner(matches, round, match_number, winner)?;
        Ok(AdvanceOutcome::Advanced {
            round: next_round,
            match_number: next_number,
        })
    }
}

/// Record a match result for a tournament and advance the winner. This is
/// the only mutation path once the bracket exists; completed matches are
/// never reopened. Completing the final marks the tournament completed.
pub fn report_match_result(
    tournament: &mut Tournament,
    round: u32,
    match_number: u32,
    winner: ParticipantId,
    player1_score: Option<String>,
    player2_score: Option<String>,
) -> Result<AdvanceOutcome, TournamentError> {
    let outcome = apply_result(
        &mut tournament.matches,
        round,
        match_number,
        winner,
        player1_score,
        player2_score,
    )?;
    if let AdvanceOutcome::Champion(champion) = outcome {
        tournament.status = TournamentStatus::Completed;
        log::info!(
            "tournament {} completed, champion {}",
            tournament.id,
            champion
        );
    }
    Ok(outcome)
}
