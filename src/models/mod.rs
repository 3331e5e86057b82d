//! Data structures for tournaments: registrations, participants, bracket matches.

mod bracket;
mod participant;
mod tournament;

pub use bracket::{BracketMatch, MatchStatus, ABSENT_SCORE, WALKOVER_SCORE};
pub use participant::{Participant, ParticipantId, Registration};
pub use tournament::{
    Tournament, TournamentError, TournamentId, TournamentStatus, MIN_PARTICIPANTS,
};
