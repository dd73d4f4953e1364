//! Application error type and its HTTP rendering.
//!
//! Every failure reaching a handler is converted into a JSON body of the form
//! `{ "error": "<message>" }` with a matching status code. The `details`
//! payload carried by each variant is logged but never sent to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or missing input, rejected before touching the store.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The requested record does not exist. Terminal, never retried.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// The record store could not be reached or rejected a read/write.
    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status code this error is rendered with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self {
            AppError::StoreUnavailable { message, details } => {
                tracing::error!(%details, "Record store unavailable: {}", message);
                "Share service is temporarily unavailable".to_string()
            }
            AppError::Internal { message, details } => {
                tracing::error!(%details, "Internal error: {}", message);
                "An internal server error occurred".to_string()
            }
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details } => {
                tracing::debug!(%details, status = status.as_u16(), "{}", message);
                message
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request parameters".to_string());

        AppError::bad_request(message, json!(errors))
    }
}

/// Maps SQLx failures onto the application error taxonomy.
///
/// Constraint violations are caller errors; anything else means the store
/// could not serve the request.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }
        if db.is_foreign_key_violation() {
            return AppError::not_found(
                "Referenced record not found",
                json!({ "constraint": db.constraint() }),
            );
        }
    }

    AppError::store_unavailable("Database error", json!({ "reason": e.to_string() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
    }

    async fn body_json(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_renders_message() {
        let (status, body) =
            body_json(AppError::not_found("Invalid or expired share link", json!({}))).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Invalid or expired share link" }));
    }

    #[tokio::test]
    async fn test_store_unavailable_hides_details() {
        let (status, body) = body_json(AppError::store_unavailable(
            "Database error",
            json!({ "reason": "connection refused at 10.0.0.5" }),
        ))
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "Share service is temporarily unavailable");
        assert!(!body.to_string().contains("10.0.0.5"));
    }

    #[test]
    fn test_validation_errors_use_field_message() {
        let errors = Probe {
            name: String::new(),
        }
        .validate()
        .unwrap_err();

        let err = AppError::from(errors);

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn test_sqlx_row_not_found_is_store_error() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
