use ntex::web;
use ntex_cors::Cors;
use puzzle_club_server::handlers;
use puzzle_club_server::services::solver::{BinarySolver, PuzzleSolver};
use puzzle_club_server::store::Store;
use std::sync::Arc;

#[ntex::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".into());
    let solver_bin = std::env::var("SOLVER_BIN").unwrap_or_else(|_| "./puzzle-solver".into());
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let store = Arc::new(Store::open(&data_dir).expect("Failed to open data directory"));
    let solver: Arc<dyn PuzzleSolver> = Arc::new(BinarySolver::new(&solver_bin));

    log::info!("Puzzle club server starting on {}:{}", host, port);

    web::HttpServer::new(move || {
        web::App::new()
            .state(store.clone())
            .state(solver.clone())
            .wrap(
                Cors::new()
                    .allowed_origin("*")
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec!["Content-Type"])
                    .max_age(3600)
                    .finish(),
            )
            // Health check
            .route("/api/health", web::get().to(health))
            // Leaderboard rankings
            .route("/ranks/calculate", web::post().to(handlers::rankings::calculate))
            .route("/ranks/data", web::get().to(handlers::rankings::get_rankings_data))
            .route("/ranks/custom-range", web::get().to(handlers::rankings::get_custom_range))
            .route("/ranks/players", web::get().to(handlers::rankings::get_players))
            .route("/ranks/game-kings", web::get().to(handlers::rankings::get_game_kings))
            .route("/ranks/weeks", web::get().to(handlers::rankings::get_recent_weeks))
            .route("/ranks/months", web::get().to(handlers::rankings::get_recent_months))
            .route("/ranks/immunity-pass", web::post().to(handlers::rankings::submit_immunity_pass))
            // Puzzle of the day
            .route("/puzzle", web::get().to(handlers::solver::get_puzzle))
            .route("/puzzle/solve", web::post().to(handlers::solver::solve))
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}

async fn health() -> web::HttpResponse {
    web::HttpResponse::Ok().json(&serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
