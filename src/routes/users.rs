use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::db::models::UserDto;
use crate::error::AppResult;
use crate::services::users::{RegisterUser, UpdateProfile};
use crate::state::AppState;

// -- Request types --

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct FollowParams {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "FollowedUserId", alias = "followedUserId")]
    pub followed_user_id: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list))
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/users/follow", post(follow))
        .route("/users/{user_id}", get(get_by_id).put(update_profile))
}

/// POST /users/register
async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterUser>,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    let user = state.users.register(input)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users
async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<UserDto>>> {
    Ok(Json(state.users.list()?))
}

/// GET /users/{user_id}
async fn get_by_id(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<UserDto>> {
    Ok(Json(state.users.get(&user_id)?))
}

/// PUT /users/{user_id}
async fn update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(edit): Json<UpdateProfile>,
) -> AppResult<Json<UserDto>> {
    Ok(Json(state.users.update_profile(&user_id, edit)?))
}

/// POST /users/follow?userId=..&FollowedUserId=..
async fn follow(
    State(state): State<AppState>,
    Query(params): Query<FollowParams>,
) -> AppResult<Json<UserDto>> {
    Ok(Json(
        state.users.follow(&params.user_id, &params.followed_user_id)?,
    ))
}

/// POST /users/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<UserDto>> {
    Ok(Json(state.users.login(&req.email, &req.password)?))
}
