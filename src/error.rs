// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP error responses.
//!
//! Operation failures map to fixed statuses:
//!
//! | Outcome | Status | Body |
//! |---------|--------|------|
//! | `NotFoundOrForeign` | 404 | `{"error": "Not found"}` |
//! | `ValidationFailed` | 422 | field → messages object |
//! | `Internal` | 500 | `{"error": "Internal server error"}` |
//!
//! Authentication failures are answered by [`crate::auth::AuthError`] (401).
//! Ownership mismatches are never reported as 403.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::articles::OperationError;
use crate::validation::FieldErrors;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub field_errors: Option<FieldErrors>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            field_errors: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn not_acceptable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_ACCEPTABLE, message)
    }

    pub fn unprocessable(errors: FieldErrors) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "Validation failed".to_string(),
            field_errors: Some(errors),
        }
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl From<OperationError> for ApiError {
    fn from(err: OperationError) -> Self {
        match err {
            OperationError::NotFoundOrForeign => ApiError::not_found("Not found"),
            OperationError::ValidationFailed(errors) => ApiError::unprocessable(errors),
            OperationError::Internal(e) => {
                tracing::error!(error = %e, "Article storage failure");
                ApiError::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.field_errors {
            Some(errors) => (self.status, Json(errors)).into_response(),
            None => {
                let body = Json(ErrorBody {
                    error: self.message,
                });
                (self.status, body).into_response()
            }
        }
    }
}
