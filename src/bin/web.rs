//! Single binary web server: organizer/player-facing JSON API for tournament
//! brackets. Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use court_tournament_web::{
    can_generate, generate_bracket, report_match_result, BracketMatch, Tournament,
    TournamentError, TournamentId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Entries are removed after 12h
/// inactivity. The write lock is also the mutual exclusion for bracket
/// generation and result reporting: gate checks and mutations run under one
/// guard, so concurrent organizer actions cannot both succeed.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default = "default_max_participants")]
    max_participants: u32,
    #[serde(default)]
    registration_deadline: Option<DateTime<Utc>>,
}

fn default_max_participants() -> u32 {
    32
}

#[derive(Deserialize)]
struct RegisterBody {
    participant_id: Uuid,
    name: String,
    /// Ranking points from the player's profile; unranked players send
    /// nothing and seed last.
    #[serde(default)]
    ranking_points: u32,
}

#[derive(Deserialize)]
struct ReportResultBody {
    round: u32,
    match_number: u32,
    winner_id: Uuid,
    player1_score: Option<String>,
    player2_score: Option<String>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and participant id.
#[derive(Deserialize)]
struct TournamentParticipantPath {
    id: TournamentId,
    participant_id: Uuid,
}

/// One round of the bracket, for display grouping.
#[derive(Serialize)]
struct RoundView<'a> {
    round: u32,
    matches: Vec<&'a BracketMatch>,
}

#[derive(Serialize)]
struct BracketResponse<'a> {
    total_rounds: u32,
    rounds: Vec<RoundView<'a>>,
}

/// Map a domain error to an HTTP response: lost races and repeat attempts
/// are conflicts, missing targets 404, everything else a bad request.
fn error_response(e: TournamentError) -> HttpResponse {
    use TournamentError::*;
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        AlreadyGenerated | AlreadyCompleted { .. } => HttpResponse::Conflict().json(body),
        MatchNotFound { .. } | RegistrationNotFound(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "court-tournament-web",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let tournament = Tournament::new(
        body.name.trim(),
        body.max_participants,
        body.registration_deadline,
    );
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(&g.get(&id).unwrap().tournament)
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.tournament)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Register a participant (registrations must still be open).
#[post("/api/tournaments/{id}/registrations")]
async fn api_register(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RegisterBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match t.register(
        body.participant_id,
        body.name.trim(),
        body.ranking_points,
        Utc::now(),
    ) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Confirm a registration's payment (set by the payment gateway's webhook glue).
#[put("/api/tournaments/{id}/registrations/{participant_id}/confirm")]
async fn api_confirm_payment(
    state: AppState,
    path: Path<TournamentParticipantPath>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match t.confirm_payment(path.participant_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Withdraw a registration (only while registrations are open).
#[delete("/api/tournaments/{id}/registrations/{participant_id}")]
async fn api_withdraw(state: AppState, path: Path<TournamentParticipantPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match t.withdraw(path.participant_id, Utc::now()) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Organizer action: close registrations ahead of the deadline.
#[post("/api/tournaments/{id}/close-registrations")]
async fn api_close_registrations(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    entry.tournament.close_registrations();
    HttpResponse::Ok().json(&entry.tournament)
}

/// Generate the bracket (registrations closed, at least 4 paid). One-shot:
/// a second call gets a conflict.
#[post("/api/tournaments/{id}/bracket")]
async fn api_generate_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match generate_bracket(t, Utc::now()) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Get the bracket grouped by round, plus whether generation is currently allowed.
#[get("/api/tournaments/{id}/bracket")]
async fn api_get_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &entry.tournament;
    if !t.bracket_generated {
        return HttpResponse::Ok().json(serde_json::json!({
            "generated": false,
            "can_generate": can_generate(t, Utc::now()),
        }));
    }
    let total_rounds = t.final_round().unwrap_or(0);
    let rounds = (1..=total_rounds)
        .map(|round| RoundView {
            round,
            matches: t.matches.iter().filter(|m| m.round == round).collect(),
        })
        .collect();
    HttpResponse::Ok().json(BracketResponse {
        total_rounds,
        rounds,
    })
}

/// Report a match result and advance the winner.
#[put("/api/tournaments/{id}/matches/result")]
async fn api_report_result(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ReportResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    let body = body.into_inner();
    match report_match_result(
        t,
        body.round,
        body.match_number,
        body.winner_id,
        body.player1_score,
        body.player2_score,
    ) {
        Ok(_) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_register)
            .service(api_confirm_payment)
            .service(api_withdraw)
            .service(api_close_registrations)
            .service(api_generate_bracket)
            .service(api_get_bracket)
            .service(api_report_result)
    })
    .bind(bind)?
    .run()
    .await
}
