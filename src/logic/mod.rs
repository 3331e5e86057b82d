//! Tournament business logic: seeding, bracket generation, advancement.

mod advance;
mod generate;
mod seeding;

pub use advance::{apply_result, report_match_result, AdvanceOutcome};
pub use generate::{can_generate, compute_bracket, generate_bracket};
pub use seeding::{
    advances_to_player1, matches_in_round, next_match_number, seed_order, slot_count, total_rounds,
};
