use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No updatable fields supplied")]
    NoUpdatableFields,
    #[error("Invalid value for field: {0}")]
    InvalidField(String),
    #[error("Invalid sort column: {0}")]
    InvalidSort(String),
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
    #[error("Invalid path parameter: {0}")]
    InvalidPath(#[from] PathRejection),
    #[error("Invalid query string: {0}")]
    InvalidQuery(#[from] QueryRejection),
    #[error("{0}")]
    NotFound(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // The one validation failure that answers with a bare status.
            AppError::NoUpdatableFields => return StatusCode::BAD_REQUEST.into_response(),
            AppError::InvalidField(_) | AppError::InvalidSort(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            // Extractor detail stays in the logs.
            AppError::InvalidBody(rejection) => {
                tracing::debug!(error = %rejection, "Rejected request body");
                (rejection.status(), "Invalid request body".to_string())
            }
            AppError::InvalidPath(rejection) => {
                tracing::debug!(error = %rejection, "Rejected path parameter");
                (rejection.status(), "Invalid path parameter".to_string())
            }
            AppError::InvalidQuery(rejection) => {
                tracing::debug!(error = %rejection, "Rejected query string");
                (rejection.status(), "Invalid query string".to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Config(_) | AppError::Database(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NoUpdatableFields.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidSort("menu".to_string()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("Area not found".to_string())
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Database(DbErr::Custom("relation does not exist".to_string()))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
