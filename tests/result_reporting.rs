//! Integration tests for result reporting and winner advancement.

use chrono::Utc;
use court_tournament_web::{
    generate_bracket, report_match_result, AdvanceOutcome, MatchStatus, Tournament,
    TournamentError, TournamentStatus,
};
use uuid::Uuid;

/// Tournament with a generated bracket over one paid registration per seed.
fn generated_bracket(seeds: &[u32]) -> (Tournament, Vec<Uuid>) {
    let mut t = Tournament::new("Beach Tennis Cup", 64, None);
    let mut ids = Vec::new();
    for (i, &seed) in seeds.iter().enumerate() {
        let pid = Uuid::new_v4();
        t.register(pid, format!("P{i}"), seed, Utc::now()).unwrap();
        t.confirm_payment(pid).unwrap();
        ids.push(pid);
    }
    t.close_registrations();
    generate_bracket(&mut t, Utc::now()).unwrap();
    (t, ids)
}

fn scores() -> (Option<String>, Option<String>) {
    (Some("6-4 6-3".to_string()), Some("4-6 3-6".to_string()))
}

#[test]
fn odd_match_winner_fills_player1_slot() {
    let (mut t, ids) = generated_bracket(&[100, 80, 60, 40]);
    let (s1, s2) = scores();
    let outcome = report_match_result(&mut t, 1, 1, ids[0], s1, s2).unwrap();
    assert_eq!(
        outcome,
        AdvanceOutcome::Advanced {
            round: 2,
            match_number: 1
        }
    );

    let m1 = t.find_match(1, 1).unwrap();
    assert_eq!(m1.status, MatchStatus::Completed);
    assert_eq!(m1.winner, Some(ids[0]));
    assert_eq!(m1.player1_score.as_deref(), Some("6-4 6-3"));

    let final_match = t.find_match(2, 1).unwrap();
    assert_eq!(final_match.player1, Some(ids[0]));
    assert_eq!(final_match.player2, None);
}

#[test]
fn even_match_winner_fills_player2_slot() {
    let (mut t, ids) = generated_bracket(&[100, 80, 60, 40]);
    let (s1, s2) = scores();
    report_match_result(&mut t, 1, 2, ids[3], s1, s2).unwrap();

    let final_match = t.find_match(2, 1).unwrap();
    assert_eq!(final_match.player1, None);
    assert_eq!(final_match.player2, Some(ids[3]));
}

#[test]
fn final_result_completes_the_tournament() {
    let (mut t, ids) = generated_bracket(&[100, 80, 60, 40]);
    let (s1, s2) = scores();
    report_match_result(&mut t, 1, 1, ids[0], s1.clone(), s2.clone()).unwrap();
    report_match_result(&mut t, 1, 2, ids[2], s1.clone(), s2.clone()).unwrap();

    let outcome = report_match_result(&mut t, 2, 1, ids[2], s1, s2).unwrap();
    assert_eq!(outcome, AdvanceOutcome::Champion(ids[2]));
    assert_eq!(t.status, TournamentStatus::Completed);
    assert_eq!(t.champion(), Some(ids[2]));
}

#[test]
fn second_report_for_same_match_is_rejected() {
    let (mut t, ids) = generated_bracket(&[100, 80, 60, 40]);
    let (s1, s2) = scores();
    report_match_result(&mut t, 1, 1, ids[0], s1, s2).unwrap();

    let retry = report_match_result(&mut t, 1, 1, ids[1], None, None);
    assert_eq!(
        retry,
        Err(TournamentError::AlreadyCompleted {
            round: 1,
            match_number: 1
        })
    );
    // the first report stands, both in the match and in the next round slot
    assert_eq!(t.find_match(1, 1).unwrap().winner, Some(ids[0]));
    assert_eq!(t.find_match(2, 1).unwrap().player1, Some(ids[0]));
}

#[test]
fn winner_must_be_one_of_the_match_players() {
    let (mut t, ids) = generated_bracket(&[100, 80, 60, 40]);
    let result = report_match_result(&mut t, 1, 1, ids[2], None, None);
    assert_eq!(
        result,
        Err(TournamentError::WinnerNotInMatch {
            round: 1,
            match_number: 1,
            winner: ids[2]
        })
    );
    assert_eq!(t.find_match(1, 1).unwrap().status, MatchStatus::Pending);
}

#[test]
fn report_against_empty_slot_is_rejected() {
    // 5 participants: round 2 match 2 holds only the walkover winner
    let (mut t, ids) = generated_bracket(&[100, 90, 80, 70, 60]);
    let result = report_match_result(&mut t, 2, 2, ids[4], None, None);
    assert_eq!(
        result,
        Err(TournamentError::MissingOpponent {
            round: 2,
            match_number: 2
        })
    );

    // round 1 match 4 has no players at all
    let result = report_match_result(&mut t, 1, 4, ids[4], None, None);
    assert_eq!(
        result,
        Err(TournamentError::MissingOpponent {
            round: 1,
            match_number: 4
        })
    );
}

#[test]
fn walkover_match_cannot_be_reported_again() {
    let (mut t, ids) = generated_bracket(&[100, 90, 80, 70, 60]);
    let result = report_match_result(&mut t, 1, 3, ids[4], None, None);
    assert_eq!(
        result,
        Err(TournamentError::AlreadyCompleted {
            round: 1,
            match_number: 3
        })
    );
}

#[test]
fn unknown_match_is_rejected() {
    let (mut t, ids) = generated_bracket(&[100, 80, 60, 40]);
    let result = report_match_result(&mut t, 3, 1, ids[0], None, None);
    assert_eq!(
        result,
        Err(TournamentError::MatchNotFound {
            round: 3,
            match_number: 1
        })
    );
}

#[test]
fn eight_players_play_through_to_a_champion() {
    let seeds = [800, 700, 600, 500, 400, 300, 200, 100];
    let (mut t, ids) = generated_bracket(&seeds);
    assert_eq!(t.matches.len(), 7);
    assert_eq!(t.final_round(), Some(3));

    // every round-1 match is fully seeded, no walkovers
    for number in 1..=4 {
        let m = t.find_match(1, number).unwrap();
        assert_eq!(m.status, MatchStatus::Pending);
        assert!(m.player1.is_some() && m.player2.is_some());
    }

    // favorites win round 1
    for number in 1..=4u32 {
        let winner = t.find_match(1, number).unwrap().player1.unwrap();
        report_match_result(&mut t, 1, number, winner, None, None).unwrap();
    }
    // adjacent pairing: winners ids[0], ids[2], ids[4], ids[6] land in
    // round 2 at ceil(n/2), odd match numbers on the player1 side
    let r2m1 = t.find_match(2, 1).unwrap();
    assert_eq!(r2m1.player1, Some(ids[0]));
    assert_eq!(r2m1.player2, Some(ids[2]));
    let r2m2 = t.find_match(2, 2).unwrap();
    assert_eq!(r2m2.player1, Some(ids[4]));
    assert_eq!(r2m2.player2, Some(ids[6]));

    report_match_result(&mut t, 2, 1, ids[0], None, None).unwrap();
    report_match_result(&mut t, 2, 2, ids[4], None, None).unwrap();

    let final_match = t.find_match(3, 1).unwrap();
    assert_eq!(final_match.player1, Some(ids[0]));
    assert_eq!(final_match.player2, Some(ids[4]));

    let outcome = report_match_result(&mut t, 3, 1, ids[4], None, None).unwrap();
    assert_eq!(outcome, AdvanceOutcome::Champion(ids[4]));
    assert_eq!(t.champion(), Some(ids[4]));
    assert_eq!(t.status, TournamentStatus::Completed);

    // every completed non-final winner appears in exactly one later-round slot
    let final_round = t.final_round().unwrap();
    for m in t.matches.iter().filter(|m| m.round < final_round) {
        let w = m.winner.unwrap();
        let appearances = t
            .matches
            .iter()
            .filter(|next| next.round == m.round + 1 && next.holds(w))
            .count();
        assert_eq!(appearances, 1, "winner of round {} match {}", m.round, m.match_number);
    }
}
