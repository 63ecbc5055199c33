// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Tabletop booking backend.

use thiserror::Error;

use crate::types::{OutcomeKind, RestaurantId};

/// The primary error type used across collaborator traits and infrastructure.
#[derive(Debug, Error)]
pub enum TabletopError {
    /// Configuration errors (invalid TOML, bad endpoint definitions).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, migrations).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A referenced record does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// A write collided with an existing record (e.g. a duplicate email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Failure modes of a booking attempt, as seen by callers of the orchestrator.
///
/// Every variant other than `Storage` and `Internal` is reached before or
/// instead of a write, so no booking row exists when one of them is returned.
#[derive(Debug, Error)]
pub enum BookingError {
    /// The user or restaurant referenced by the request does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// The request itself is malformed (party size, date in the past).
    #[error("{0}")]
    Validation(String),

    /// Another active booking already occupies the conflict window.
    #[error("time slot is not available for restaurant {restaurant_id}")]
    SlotUnavailable { restaurant_id: RestaurantId },

    /// The external booking gateway did not confirm the booking.
    ///
    /// `message` is the gateway outcome message, surfaced verbatim.
    #[error("{message}")]
    Rejected { kind: OutcomeKind, message: String },

    /// The booking was confirmed externally but could not be stored locally.
    #[error("storage error: {0}")]
    Storage(#[source] TabletopError),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<TabletopError> for BookingError {
    fn from(err: TabletopError) -> Self {
        match err {
            TabletopError::NotFound { entity, id } => BookingError::NotFound { entity, id },
            TabletopError::Internal(msg) => BookingError::Internal(msg),
            other => BookingError::Storage(other),
        }
    }
}
