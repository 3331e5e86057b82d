//! Tournament record: registrations, bracket matches, and lifecycle flags.

use crate::models::bracket::{BracketMatch, MatchStatus};
use crate::models::participant::{ParticipantId, Registration};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Minimum number of paid registrations required to generate a bracket.
pub const MIN_PARTICIPANTS: usize = 4;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// Bracket generation attempted a second time.
    #[error("bracket has already been generated for this tournament")]
    AlreadyGenerated,
    /// Bracket generation attempted while registrations can still change.
    #[error("registrations are still open")]
    RegistrationsStillOpen,
    /// Fewer paid registrations than the minimum bracket size.
    #[error("need at least 4 paid registrations to generate a bracket (have {confirmed})")]
    NotEnoughParticipants { confirmed: usize },
    /// Registration or withdrawal attempted after registrations closed.
    #[error("registrations are closed")]
    RegistrationsClosed,
    /// The participant already holds a registration for this tournament.
    #[error("participant {0} is already registered")]
    DuplicateRegistration(ParticipantId),
    /// The tournament has reached its participant capacity.
    #[error("tournament is full ({max_participants} participants)")]
    TournamentFull { max_participants: u32 },
    /// No registration exists for the participant.
    #[error("participant {0} is not registered")]
    RegistrationNotFound(ParticipantId),
    /// No match exists at (round, match_number).
    #[error("no match {match_number} in round {round}")]
    MatchNotFound { round: u32, match_number: u32 },
    /// A result was already recorded for the match; reports are never overwritten.
    #[error("match {match_number} in round {round} has already been completed")]
    AlreadyCompleted { round: u32, match_number: u32 },
    /// The match still has an empty player slot; no result can be reported.
    #[error("match {match_number} in round {round} is missing an opponent")]
    MissingOpponent { round: u32, match_number: u32 },
    /// The reported winner occupies neither slot of the match.
    #[error("winner {winner} is not a player in match {match_number} of round {round}")]
    WinnerNotInMatch {
        round: u32,
        match_number: u32,
        winner: ParticipantId,
    },
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Lifecycle phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Taking registrations; no bracket yet.
    #[default]
    Upcoming,
    /// Bracket generated; matches being played.
    Ongoing,
    /// Final match completed; champion decided.
    Completed,
}

/// Full tournament state: registrations, bracket, and lifecycle flags.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub status: TournamentStatus,
    /// Flips false → true exactly once, at bracket generation.
    pub bracket_generated: bool,
    pub max_participants: u32,
    /// Registrations close automatically once this passes.
    pub registration_deadline: Option<DateTime<Utc>>,
    /// Set by the organizer's explicit close action.
    pub registrations_closed: bool,
    pub registrations: Vec<Registration>,
    /// The full bracket, empty until generation. Matches are mutated in
    /// place as results arrive and are never deleted.
    pub matches: Vec<BracketMatch>,
}

impl Tournament {
    /// Create a new tournament taking registrations.
    pub fn new(
        name: impl Into<String>,
        max_participants: u32,
        registration_deadline: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: TournamentStatus::Upcoming,
            bracket_generated: false,
            max_participants,
            registration_deadline,
            registrations_closed: false,
            registrations: Vec::new(),
            matches: Vec::new(),
        }
    }

    /// Whether registrations can no longer change: explicitly closed,
    /// deadline passed, or capacity reached.
    pub fn registrations_are_closed(&self, now: DateTime<Utc>) -> bool {
        self.registrations_closed
            || self
                .registration_deadline
                .map(|deadline| now >= deadline)
                .unwrap_or(false)
            || self.registrations.len() >= self.max_participants as usize
    }

    /// Number of paid registrations (the bracket snapshot size).
    pub fn paid_count(&self) -> usize {
        self.registrations.iter().filter(|r| r.paid).count()
    }

    /// Register a participant. Rejected once registrations are closed, when
    /// the participant already registered, or at capacity.
    pub fn register(
        &mut self,
        participant_id: ParticipantId,
        name: impl Into<String>,
        ranking_points: u32,
        now: DateTime<Utc>,
    ) -> Result<(), TournamentError> {
        if self.registrations.len() >= self.max_participants as usize {
            return Err(TournamentError::TournamentFull {
                max_participants: self.max_participants,
            });
        }
        if self.registrations_are_closed(now) {
            return Err(TournamentError::RegistrationsClosed);
        }
        if self
            .registrations
            .iter()
            .any(|r| r.participant_id == participant_id)
        {
            return Err(TournamentError::DuplicateRegistration(participant_id));
        }
        self.registrations
            .push(Registration::new(participant_id, name, ranking_points));
        Ok(())
    }

    /// Mark a registration as paid. Idempotent: confirming twice is fine.
    pub fn confirm_payment(&mut self, participant_id: ParticipantId) -> Result<(), TournamentError> {
        let r = self
            .registrations
            .iter_mut()
            .find(|r| r.participant_id == participant_id)
            .ok_or(TournamentError::RegistrationNotFound(participant_id))?;
        r.paid = true;
        Ok(())
    }

    /// Withdraw a registration. Only while registrations are open and no
    /// bracket exists; after that the seeding snapshot is frozen.
    pub fn withdraw(
        &mut self,
        participant_id: ParticipantId,
        now: DateTime<Utc>,
    ) -> Result<(), TournamentError> {
        if self.bracket_generated {
            return Err(TournamentError::AlreadyGenerated);
        }
        if self.registrations_are_closed(now) {
            return Err(TournamentError::RegistrationsClosed);
        }
        let idx = self
            .registrations
            .iter()
            .position(|r| r.participant_id == participant_id)
            .ok_or(TournamentError::RegistrationNotFound(participant_id))?;
        self.registrations.remove(idx);
        Ok(())
    }

    /// Organizer action: close registrations. Idempotent.
    pub fn close_registrations(&mut self) {
        self.registrations_closed = true;
    }

    /// The match at (round, match_number), if the bracket has one.
    pub fn find_match(&self, round: u32, match_number: u32) -> Option<&BracketMatch> {
        self.matches
            .iter()
            .find(|m| m.round == round && m.match_number == match_number)
    }

    /// Highest round number in the bracket (the final), `None` before generation.
    pub fn final_round(&self) -> Option<u32> {
        self.matches.iter().map(|m| m.round).max()
    }

    /// The champion: winner of the final match once it has completed.
    pub fn champion(&self) -> Option<ParticipantId> {
        let final_round = self.final_round()?;
        self.matches
            .iter()
            .find(|m| m.round == final_round && m.status == MatchStatus::Completed)
            .and_then(|m| m.winner)
    }
}
