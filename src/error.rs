use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::db::StoreError;
use crate::services::progress::ProgressError;
use crate::services::share_posts::SharePostError;
use crate::services::skill_exchange::SkillExchangeError;
use crate::services::users::UserError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Store(e) => {
                tracing::error!("Store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => AppError::NotFound("User not found".into()),
            UserError::EmailTaken(_) => AppError::Conflict("Email already exists".into()),
            UserError::InvalidCredentials => AppError::Unauthorized,
            UserError::SelfFollow | UserError::Validation(_) => {
                AppError::BadRequest(err.to_string())
            }
            UserError::Hash(e) => AppError::Internal(e.to_string()),
            UserError::Store(e) => AppError::Store(e),
        }
    }
}

impl From<ProgressError> for AppError {
    fn from(err: ProgressError) -> Self {
        match err {
            ProgressError::NotFound(_) | ProgressError::UserNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            ProgressError::MissingUserId => AppError::BadRequest(err.to_string()),
            ProgressError::Store(e) => AppError::Store(e),
        }
    }
}

impl From<SkillExchangeError> for AppError {
    fn from(err: SkillExchangeError) -> Self {
        match err {
            SkillExchangeError::NotFound(_) => AppError::NotFound(err.to_string()),
            SkillExchangeError::Store(e) => AppError::Store(e),
        }
    }
}

impl From<SharePostError> for AppError {
    fn from(err: SharePostError) -> Self {
        match err {
            SharePostError::UserNotFound(_) => AppError::NotFound(err.to_string()),
            SharePostError::MissingUserId => AppError::BadRequest(err.to_string()),
            SharePostError::Store(e) => AppError::Store(e),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn response_status(err: impl Into<AppError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn not_found_returns_404() {
        assert_eq!(
            response_status(AppError::NotFound("gone".into())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn both_progress_lookup_failures_map_to_404() {
        assert_eq!(
            response_status(ProgressError::NotFound("p1".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            response_status(ProgressError::UserNotFound("u1".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            response_status(ProgressError::MissingUserId),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn user_errors_map_to_distinct_statuses() {
        assert_eq!(
            response_status(UserError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            response_status(UserError::EmailTaken("a@example.com".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            response_status(UserError::SelfFollow),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn store_failures_return_500() {
        let err = StoreError::InvalidField("bad".into());
        assert_eq!(response_status(err), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response_status(AppError::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
