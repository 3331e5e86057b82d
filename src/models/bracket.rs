//! Bracket match records: one per (round, match_number) slot in the single-elimination tree.

use crate::models::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// Score marker written on the present side of a walkover.
pub const WALKOVER_SCORE: &str = "W.O.";
/// Score marker written on the absent side of a walkover.
pub const ABSENT_SCORE: &str = "-";

/// Lifecycle of a single match. Only transition is pending → completed,
/// by walkover resolution at generation time or by an explicit result report.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Completed,
}

/// A single bracket match. Player slots are `None` until filled by seeding
/// (round 1) or by advancement from the previous round. A `None` slot in a
/// round-1 match is a bye.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    /// 1-based round number; the final is the highest round.
    pub round: u32,
    /// 1-based match number within the round.
    pub match_number: u32,
    pub player1: Option<ParticipantId>,
    pub player2: Option<ParticipantId>,
    pub status: MatchStatus,
    pub winner: Option<ParticipantId>,
    pub player1_score: Option<String>,
    pub player2_score: Option<String>,
}

impl BracketMatch {
    pub fn new(
        round: u32,
        match_number: u32,
        player1: Option<ParticipantId>,
        player2: Option<ParticipantId>,
    ) -> Self {
        Self {
            round,
            match_number,
            player1,
            player2,
            status: MatchStatus::Pending,
            winner: None,
            player1_score: None,
            player2_score: None,
        }
    }

    /// Whether the given participant occupies one of this match's slots.
    pub fn holds(&self, id: ParticipantId) -> bool {
        self.player1 == Some(id) || self.player2 == Some(id)
    }

    /// Complete this match as a walkover in favor of `winner`, who must be
    /// the only filled slot. The present side scores "W.O.", the absent "-".
    pub(crate) fn complete_walkover(&mut self, winner: ParticipantId) {
        let (winner_score, loser_score) = (
            Some(WALKOVER_SCORE.to_string()),
            Some(ABSENT_SCORE.to_string()),
        );
        if self.player1 == Some(winner) {
            self.player1_score = winner_score;
            self.player2_score = loser_score;
        } else {
            self.player1_score = loser_score;
            self.player2_score = winner_score;
        }
        self.winner = Some(winner);
        self.status = MatchStatus::Completed;
    }

    /// Complete this match with a reported result. Slot validation is the
    /// caller's job; this only records the outcome.
    pub(crate) fn complete_with_result(
        &mut self,
        winner: ParticipantId,
        player1_score: Option<String>,
        player2_score: Option<String>,
    ) {
        self.winner = Some(winner);
        self.player1_score = player1_score;
        self.player2_score = player2_score;
        self.status = MatchStatus::Completed;
    }
}
