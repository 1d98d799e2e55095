// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid user: {0}")]
    InvalidUser(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Event publish failed: {0}")]
    Publish(String),

    #[error("User service error: {0}")]
    UserService(String),

    #[error("AI gateway error: {0}")]
    AiTransport(String),

    #[error("Malformed AI response: {0}")]
    MalformedAiResponse(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::InvalidUser(user_id) => (
                StatusCode::BAD_REQUEST,
                "invalid_user",
                Some(format!("Invalid user: {}", user_id)),
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::Publish(msg) => {
                tracing::error!(error = %msg, "Event publish error surfaced to caller");
                (StatusCode::BAD_GATEWAY, "publish_error", None)
            }
            AppError::UserService(msg) => {
                tracing::error!(error = %msg, "User validation service error");
                (StatusCode::BAD_GATEWAY, "user_service_error", None)
            }
            // The recommendation worker converts these into the fallback
            // recommendation; they only reach HTTP via misuse.
            AppError::AiTransport(msg) => {
                tracing::error!(error = %msg, "AI gateway error");
                (StatusCode::BAD_GATEWAY, "ai_gateway_error", None)
            }
            AppError::MalformedAiResponse(msg) => {
                tracing::error!(error = %msg, "Malformed AI response");
                (StatusCode::BAD_GATEWAY, "ai_response_error", None)
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
