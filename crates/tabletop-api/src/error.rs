// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping of domain errors onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tabletop_core::{BookingError, OutcomeKind, TabletopError};

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable reason.
    pub error: String,
    /// Gateway outcome for rejected bookings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<OutcomeKind>,
}

/// Errors returned by API handlers.
#[derive(Debug)]
pub enum ApiError {
    Booking(BookingError),
    BadRequest(String),
    Conflict(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Booking(err) => match err {
                BookingError::NotFound { .. } => StatusCode::NOT_FOUND,
                BookingError::Validation(_) => StatusCode::BAD_REQUEST,
                BookingError::SlotUnavailable { .. } => StatusCode::CONFLICT,
                BookingError::Rejected { kind, .. } => match kind {
                    OutcomeKind::Unavailable | OutcomeKind::Unreachable => StatusCode::BAD_GATEWAY,
                    _ => StatusCode::UNPROCESSABLE_ENTITY,
                },
                BookingError::Storage(_) | BookingError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        ApiError::Booking(err)
    }
}

impl From<TabletopError> for ApiError {
    fn from(err: TabletopError) -> Self {
        match err {
            TabletopError::Conflict(message) => ApiError::Conflict(message),
            other => ApiError::Booking(other.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, kind) = match self {
            ApiError::BadRequest(message) | ApiError::Conflict(message) => (message, None),
            ApiError::Booking(BookingError::Rejected { kind, message }) => (message, Some(kind)),
            ApiError::Booking(err) if status.is_server_error() => {
                tracing::error!(error = %err, "request failed");
                ("internal server error".to_string(), None)
            }
            ApiError::Booking(err) => (err.to_string(), None),
        };
        (status, Json(ErrorResponse { error, kind })).into_response()
    }
}
