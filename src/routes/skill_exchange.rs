use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::db::models::SkillExchange;
use crate::error::AppResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/skillExchange", get(list).post(create))
        .route(
            "/skillExchange/{id}",
            get(get_by_id).put(update).delete(delete),
        )
}

async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<SkillExchange>>> {
    Ok(Json(state.skill_exchange.list()?))
}

async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<SkillExchange>> {
    Ok(Json(state.skill_exchange.get(&id)?))
}

async fn create(
    State(state): State<AppState>,
    Json(input): Json<SkillExchange>,
) -> AppResult<(StatusCode, Json<SkillExchange>)> {
    let listing = state.skill_exchange.create(input)?;
    Ok((StatusCode::CREATED, Json(listing)))
}

/// Partial update, see `SkillExchangeService::update`.
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<SkillExchange>,
) -> AppResult<Json<SkillExchange>> {
    Ok(Json(state.skill_exchange.update(&id, input)?))
}

async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    state.skill_exchange.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
