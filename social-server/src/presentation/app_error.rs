use crate::domain::error::DomainError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("unauthorized")]
    Unauthorized,
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

fn domain_status(err: &DomainError) -> StatusCode {
    match err {
        err if err.is_bad_input() => StatusCode::BAD_REQUEST,
        DomainError::NotFound(_) | DomainError::DeleteFailed(_) => StatusCode::NOT_FOUND,
        DomainError::AlreadyExists(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg, code) = match self {
            AppError::Domain(err) => {
                let status = domain_status(&err);
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    error!(error = %err, "request failed");
                    (status, "internal error".to_string(), err.code())
                } else {
                    (status, err.to_string(), err.code())
                }
            }
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string(), "validation"),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized".to_string(),
                "unauthorized",
            ),
        };

        (status, Json(ErrorBody { error: msg, code })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::AppError;
    use crate::domain::error::DomainError;

    fn status_of(err: DomainError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn bad_input_kinds_are_400() {
        assert_eq!(status_of(DomainError::InvalidPage), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(DomainError::PageOutOfRange {
                page: 5,
                end_page: 3
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(DomainError::InvalidPhotoReference), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(DomainError::SelfFollow), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn lookup_and_auth_kinds_map_to_their_classes() {
        assert_eq!(status_of(DomainError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(DomainError::DeleteFailed("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(DomainError::AlreadyExists("x".into())), StatusCode::CONFLICT);
        assert_eq!(status_of(DomainError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(DomainError::Unexpected("db down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
