//! Court tournament web app: library with models and bracket logic.

pub mod logic;
pub mod models;

pub use logic::{
    apply_result, can_generate, compute_bracket, generate_bracket, report_match_result,
    AdvanceOutcome,
};
pub use models::{
    BracketMatch, MatchStatus, Participant, ParticipantId, Registration, Tournament,
    TournamentError, TournamentId, TournamentStatus, ABSENT_SCORE, MIN_PARTICIPANTS,
    WALKOVER_SCORE,
};
