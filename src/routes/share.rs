use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::db::models::{ShareDto, SharePost};
use crate::error::AppResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/share", get(list_all).post(create))
        // GET lists by user id, DELETE removes by share id
        .route("/share/{id}", get(list_by_user).delete(delete))
}

/// GET /share
async fn list_all(State(state): State<AppState>) -> AppResult<Json<Vec<SharePost>>> {
    Ok(Json(state.share_posts.list_all()?))
}

/// POST /share
async fn create(
    State(state): State<AppState>,
    Json(input): Json<ShareDto>,
) -> AppResult<(StatusCode, Json<SharePost>)> {
    let post = state.share_posts.create(input).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /share/{userId}
async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<SharePost>>> {
    Ok(Json(state.share_posts.list_by_user(&user_id)?))
}

/// DELETE /share/{id}
async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    state.share_posts.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
