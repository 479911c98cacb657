//! Single binary web server: REST API over in-memory Swiss tournaments.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT,
//! TOURNAMENT_TTL_HOURS, CLEANUP_INTERVAL_MINUTES.

use actix_web::{
    get, post,
    web::{Bytes, Data, Json, Path},
    App, HttpMessage, HttpRequest, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Instant;
use swiss_tournament_web::{
    generate_round, parse_roster_csv, record_result, PlayerId, RoundPhase, ServerConfig,
    Tournament, TournamentError, TournamentId,
};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. The write lock serialises every mutation.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Content types accepted for roster upload.
const CSV_CONTENT_TYPES: &[&str] = &["text/csv", "application/vnd.ms-excel"];

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct StateResponse {
    current_round: u32,
    phase: RoundPhase,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct MatchResultBody {
    winner_id: PlayerId,
    #[serde(default)]
    loser_id: Option<PlayerId>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and player id (e.g. /api/tournaments/{id}/players/{player_id})
#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: TournamentId,
    player_id: PlayerId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::PlayerNotFound(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Run `f` on the tournament under the write lock, refreshing its last activity.
/// 404 if the tournament does not exist.
fn with_tournament<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.tournament)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "swiss-tournament-web",
    })
}

/// Create a new tournament (returns its snapshot; client stores the id for later requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState) -> HttpResponse {
    let tournament = Tournament::new();
    let id = tournament.id;
    let snapshot = tournament.snapshot();
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
    log::info!("Created tournament {}", id);
    HttpResponse::Ok().json(snapshot)
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(t.snapshot()))
}

#[get("/api/tournaments/{id}/state")]
async fn api_get_state(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        HttpResponse::Ok().json(StateResponse {
            current_round: t.current_round(),
            phase: t.phase(),
        })
    })
}

/// All players in display order.
#[get("/api/tournaments/{id}/players")]
async fn api_get_players(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        HttpResponse::Ok().json(t.players_by_display_order())
    })
}

#[post("/api/tournaments/{id}/players")]
async fn api_add_player(state: AppState, path: Path<TournamentPath>, body: Json<AddPlayerBody>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match t.create_player(&body.name) {
        Ok(player) => HttpResponse::Ok().json(player),
        Err(e) => error_response(&e),
    })
}

/// Bulk registration from a CSV body (one name per row, first column).
#[post("/api/tournaments/{id}/players/upload")]
async fn api_upload_players(
    state: AppState,
    path: Path<TournamentPath>,
    req: HttpRequest,
    body: Bytes,
) -> HttpResponse {
    if !CSV_CONTENT_TYPES.contains(&req.content_type()) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Invalid file type. Please upload a CSV file."
        }));
    }
    with_tournament(&state, path.id, |t| {
        match parse_roster_csv(&body).and_then(|names| t.import_players(names)) {
            Ok(created) => HttpResponse::Ok().json(created),
            Err(e) => error_response(&e),
        }
    })
}

#[post("/api/tournaments/{id}/players/shuffle")]
async fn api_shuffle_players(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        HttpResponse::Ok().json(t.shuffle_players(&mut rand::thread_rng()))
    })
}

#[post("/api/tournaments/{id}/players/{player_id}/withdraw")]
async fn api_withdraw_player(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match t.withdraw_player(path.player_id) {
        Ok(player) => HttpResponse::Ok().json(player),
        Err(e) => error_response(&e),
    })
}

/// Generate the next round (rejected while matches are pending).
#[post("/api/tournaments/{id}/matches/generate")]
async fn api_generate_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match generate_round(t) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(&e),
    })
}

#[get("/api/tournaments/{id}/matches")]
async fn api_get_matches(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        HttpResponse::Ok().json(t.get_pending_matches())
    })
}

#[post("/api/tournaments/{id}/matches/result")]
async fn api_record_result(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<MatchResultBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        match record_result(t, body.winner_id, body.loser_id) {
            Ok(outcome) => HttpResponse::Ok().json(serde_json::json!({
                "message": "Match result recorded successfully",
                "outcome": outcome,
            })),
            Err(e) => error_response(&e),
        }
    })
}

#[get("/api/tournaments/{id}/standings")]
async fn api_get_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(t.get_standings()))
}

/// Reset: no players, no history, round 0. The tournament id is kept.
#[post("/api/tournaments/{id}/reset")]
async fn api_reset_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        t.reset();
        HttpResponse::Ok().json(serde_json::json!({ "message": "Tournament has been reset" }))
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state: AppState = Data::new(RwLock::new(HashMap::new()));

    // Background task: periodically remove tournaments that have been idle past the TTL
    let state_cleanup = state.clone();
    let cleanup_interval = config.cleanup_interval;
    let inactivity_timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(cleanup_interval);
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_get_state)
            .service(api_get_players)
            .service(api_add_player)
            .service(api_upload_players)
            .service(api_shuffle_players)
            .service(api_withdraw_player)
            .service(api_generate_round)
            .service(api_get_matches)
            .service(api_record_result)
            .service(api_get_standings)
            .service(api_reset_tournament)
    })
    .bind(bind)?
    .run()
    .await
}
