//! Seeding order and bracket geometry: slot counts, rounds, advancement targets.

use crate::models::{Participant, Registration};

/// Smallest power of two >= the participant count: the bracket's slot count.
pub fn slot_count(participant_count: usize) -> usize {
    participant_count.next_power_of_two()
}

/// Number of rounds in a bracket with the given slot count (final = last round).
pub fn total_rounds(slot_count: usize) -> u32 {
    slot_count.trailing_zeros()
}

/// Number of matches in the given 1-based round: slot_count / 2^round.
pub fn matches_in_round(slot_count: usize, round: u32) -> u32 {
    (slot_count >> round) as u32
}

/// The next-round match a winner advances into: ceil(match_number / 2).
pub fn next_match_number(match_number: u32) -> u32 {
    match_number.div_ceil(2)
}

/// Odd match numbers feed the next match's player1 slot, even feed player2.
pub fn advances_to_player1(match_number: u32) -> bool {
    match_number % 2 == 1
}

/// Snapshot the seeding order from a registration list: paid registrations
/// only, sorted descending by ranking points. The sort is stable, so equal
/// seeds keep registration order; seeding is reproducible for a given
/// snapshot, never randomized.
pub fn seed_order(registrations: &[Registration]) -> Vec<Participant> {
    let mut participants: Vec<Participant> = registrations
        .iter()
        .filter(|r| r.paid)
        .map(Participant::from_registration)
        .collect();
    participants.sort_by(|a, b| b.seed_value.cmp(&a.seed_value));
    participants
}
