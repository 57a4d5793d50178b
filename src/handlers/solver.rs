use crate::error::AppError;
use crate::models::solver::SolveRequest;
use crate::services::solver::{self as service, PuzzleSolver};
use crate::validation;
use ntex::web::{self, HttpResponse};
use serde_json::json;
use std::sync::Arc;

pub async fn get_puzzle() -> HttpResponse {
    HttpResponse::Ok().json(&json!({
        "success": true,
        "data": service::default_puzzle(),
    }))
}

pub async fn solve(
    solver: web::types::State<Arc<dyn PuzzleSolver>>,
    body: web::types::Json<SolveRequest>,
) -> Result<HttpResponse, AppError> {
    let grid_line = validation::validate_grid_line(&body.input)?;
    let solution = solver.solve(&grid_line).await?;
    Ok(HttpResponse::Ok().json(&json!({
        "success": true,
        "data": solution,
    })))
}
