use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Malformed document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Flattens validator output into `field: message` pairs, messages first,
    /// codes when a rule carries no message.
    fn validation_message(errors: &validator::ValidationErrors) -> String {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let msgs: Vec<&str> = errors
                    .iter()
                    .filter_map(|err| err.message.as_ref().map(|m| m.as_ref()))
                    .collect();
                if msgs.is_empty() {
                    let codes: Vec<&str> = errors.iter().map(|err| err.code.as_ref()).collect();
                    format!("{}: {}", field, codes.join(", "))
                } else {
                    format!("{}: {}", field, msgs.join(", "))
                }
            })
            .collect();
        // field_errors() is a HashMap; keep the output stable
        messages.sort();
        messages.join("; ")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => {
                tracing::debug!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, msg.clone())
            }
            AppError::BadRequest(msg) => {
                tracing::debug!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".into())
            }
            AppError::Validation(e) => {
                let message = Self::validation_message(e);
                tracing::warn!("Validation failed: {}", message);
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Document(e) => {
                tracing::error!("Malformed document: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                let message = e.to_string();
                if message.is_empty() {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An unexpected error occurred".into(),
                    )
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, message)
                }
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
