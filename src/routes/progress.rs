use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::db::models::Progress;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/progress", get(list).post(create))
        .route("/progress/{id}", get(get_by_id).put(update).delete(delete))
}

/// GET /progress
async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Progress>>> {
    Ok(Json(state.progress.list()?))
}

/// GET /progress/{id}
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Progress>> {
    state
        .progress
        .get(&id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Progress not found: {id}")))
}

/// POST /progress
async fn create(
    State(state): State<AppState>,
    Json(input): Json<Progress>,
) -> AppResult<(StatusCode, Json<Progress>)> {
    let progress = state.progress.create(input).await?;
    Ok((StatusCode::CREATED, Json(progress)))
}

/// PUT /progress/{id}
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<Progress>,
) -> AppResult<Json<Progress>> {
    Ok(Json(state.progress.update(&id, input).await?))
}

/// DELETE /progress/{id}
async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    state.progress.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
