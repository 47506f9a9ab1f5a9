use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use database::DbError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// The caller can fix the request and retry.
    #[error("{message}")]
    Rejected { message: String },

    /// An unexpected failure. `message` is the generic text shown to the
    /// caller; some endpoints send none.
    #[error("Database error: {source}")]
    Failed {
        message: Option<&'static str>,
        source: DbError,
    },

    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),
}

impl AppError {
    pub fn rejected(message: impl Into<String>) -> Self {
        AppError::Rejected {
            message: message.into(),
        }
    }

    /// Maps a database failure for one endpoint. A unique-index violation
    /// means a concurrent request inserted the same value after our
    /// pre-check, so it gets the endpoint's duplicate message instead of a 500.
    pub fn from_db(
        err: DbError,
        duplicate_message: &'static str,
        failure_message: Option<&'static str>,
    ) -> Self {
        if err.is_unique_violation() {
            tracing::warn!(error = %err, "Unique constraint rejected a concurrent duplicate.");
            AppError::rejected(duplicate_message)
        } else {
            AppError::Failed {
                message: failure_message,
                source: err,
            }
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Rejected { message } => (StatusCode::BAD_REQUEST, Some(message)),
            AppError::Failed { message, source } => {
                tracing::error!(error = ?source, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    message.map(str::to_string),
                )
            }
            AppError::MalformedBody(rejection) => {
                tracing::debug!(error = %rejection, "Rejected request body.");
                (StatusCode::BAD_REQUEST, Some(rejection.body_text()))
            }
        };

        let body = match message {
            Some(message) => json!({ "success": false, "message": message }),
            None => json!({ "success": false }),
        };
        (status, Json(body)).into_response()
    }
}
