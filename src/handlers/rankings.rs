use crate::dates;
use crate::error::AppError;
use crate::models::rankings::*;
use crate::services::rankings as service;
use crate::store::Store;
use crate::validation;
use ntex::web::{self, HttpResponse};
use serde_json::json;
use std::sync::Arc;

pub async fn calculate(
    store: web::types::State<Arc<Store>>,
    body: String,
) -> Result<HttpResponse, AppError> {
    let outcome = service::calculate_from_text(&store, &body)?;
    Ok(HttpResponse::Ok().json(&json!({
        "success": true,
        "days_processed": outcome.days_processed,
        "total_players": outcome.total_players,
        "rankings": outcome.rankings,
    })))
}

pub async fn get_rankings_data(
    store: web::types::State<Arc<Store>>,
) -> Result<HttpResponse, AppError> {
    let document = store.all_rankings()?;
    Ok(HttpResponse::Ok().json(&json!({
        "success": true,
        "data": document,
    })))
}

pub async fn get_custom_range(
    store: web::types::State<Arc<Store>>,
    query: web::types::Query<RangeQuery>,
) -> Result<HttpResponse, AppError> {
    let (start, end) = validation::validate_range(query.start.as_deref(), query.end.as_deref())?;
    let game = validation::validate_game_filter(query.game.as_deref());
    let rankings = service::range_table(&store, &start, &end, game.as_deref())?;
    Ok(HttpResponse::Ok().json(&json!({
        "success": true,
        "data": rankings,
        "date_range": { "start": start, "end": end, "game": game },
    })))
}

pub async fn get_players(
    store: web::types::State<Arc<Store>>,
) -> Result<HttpResponse, AppError> {
    let players = store.all_players()?;
    Ok(HttpResponse::Ok().json(&json!({
        "success": true,
        "data": players,
    })))
}

pub async fn get_game_kings(
    store: web::types::State<Arc<Store>>,
    query: web::types::Query<GameQuery>,
) -> Result<HttpResponse, AppError> {
    let game = validation::require_game(query.game.as_deref())?;
    let weeks = service::kings_for_game(&store, &game)?;
    Ok(HttpResponse::Ok().json(&json!({
        "success": true,
        "game": game,
        "data": weeks,
    })))
}

pub async fn get_recent_weeks() -> HttpResponse {
    HttpResponse::Ok().json(&json!({
        "success": true,
        "data": dates::recent_weeks(dates::today()),
    }))
}

pub async fn get_recent_months() -> HttpResponse {
    HttpResponse::Ok().json(&json!({
        "success": true,
        "data": dates::recent_months(dates::today()),
    }))
}

pub async fn submit_immunity_pass(
    store: web::types::State<Arc<Store>>,
    body: web::types::Json<ImmunitySubmission>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let outcome = service::submit_immunity_sheet(&store, &req.data)?;
    for line in &outcome.skipped {
        log::warn!("Skipped immunity pass line: {}", line);
    }
    Ok(HttpResponse::Ok().json(&json!({
        "success": true,
        "date": outcome.date,
        "entries_processed": outcome.entries_processed,
        "skipped": outcome.skipped,
    })))
}
