// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the directory, gateway, orchestrator, and API.
//!
//! Wire representations use camelCase field names, matching what the web
//! frontend and restaurant systems exchange.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::time;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(
    /// Unique identifier for a restaurant.
    RestaurantId
);
id_type!(
    /// Unique identifier for a user.
    UserId
);
id_type!(
    /// Unique identifier for a stored booking.
    BookingId
);

/// Health status reported by component health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Component is fully operational.
    Healthy,
    /// Component is operational but experiencing issues.
    Degraded(String),
    /// Component is not operational.
    Unhealthy(String),
}

// --- Restaurant directory ---

/// A restaurant listed in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub cuisine: String,
    /// Average rating, 0.0 to 5.0.
    pub rating: f64,
    /// Price band, 1 to 4.
    pub price_range: u8,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub is_active: bool,
}

/// Optional filters for listing restaurants. All set filters must match.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantFilter {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub min_rating: Option<f64>,
}

/// Connection details for a restaurant's external reservation API.
///
/// At most one per restaurant. A restaurant without an endpoint has no
/// external integration and cannot be booked.
#[derive(Clone, PartialEq, Eq)]
pub struct RestaurantBookingEndpoint {
    pub restaurant_id: RestaurantId,
    pub url: String,
    /// HTTP verb to use, e.g. `POST`. Chosen per restaurant.
    pub http_method: String,
    /// Shared secret used to sign outbound payloads.
    pub secret_key: Option<String>,
}

impl fmt::Debug for RestaurantBookingEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestaurantBookingEndpoint")
            .field("restaurant_id", &self.restaurant_id)
            .field("url", &self.url)
            .field("http_method", &self.http_method)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

// --- Users ---

/// A registered user who can hold bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Input for registering a user.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

// --- Bookings ---

/// Lifecycle status of a stored booking.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Whether a booking in this status occupies its time slot.
    pub fn holds_slot(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

/// A client's request to book a table. Never persisted in this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub restaurant_id: RestaurantId,
    pub user_id: UserId,
    #[serde(with = "time::serde_flexible")]
    pub booking_date_time: DateTime<Utc>,
    pub number_of_people: u32,
    #[serde(default)]
    pub special_requests: Option<String>,
}

/// A stored booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub restaurant_id: RestaurantId,
    #[serde(with = "time::serde_flexible")]
    pub booking_date_time: DateTime<Utc>,
    pub number_of_people: u32,
    pub special_requests: Option<String>,
    pub status: BookingStatus,
    #[serde(with = "time::serde_flexible")]
    pub created_at: DateTime<Utc>,
}

/// A booking row about to be written; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub user_id: UserId,
    pub restaurant_id: RestaurantId,
    pub booking_date_time: DateTime<Utc>,
    pub number_of_people: u32,
    pub special_requests: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl NewBooking {
    /// Build a CONFIRMED row for a request the restaurant has accepted.
    pub fn confirmed(request: &BookingRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id: request.user_id,
            restaurant_id: request.restaurant_id,
            booking_date_time: request.booking_date_time,
            number_of_people: request.number_of_people,
            special_requests: request.special_requests.clone(),
            status: BookingStatus::Confirmed,
            created_at,
        }
    }
}

// --- External booking outcome ---

/// Message returned when a restaurant has no external integration.
pub const NOT_CONFIGURED_MESSAGE: &str = "Restaurant API not configured";
/// Prefix for messages built from 4xx responses.
pub const CLIENT_REJECTED_PREFIX: &str = "Restaurant booking not available: ";
/// Message returned for 5xx responses.
pub const UNAVAILABLE_MESSAGE: &str = "Restaurant system temporarily unavailable";
/// Message returned for transport failures and unclassifiable responses.
pub const UNREACHABLE_MESSAGE: &str = "Unable to connect to restaurant booking system";
/// Default confirmation when a 2xx body carries no `message`.
pub const DEFAULT_CONFIRMATION_MESSAGE: &str = "Booking confirmed with restaurant";

/// Classification of a single external booking call.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// 2xx: the restaurant accepted the booking.
    Confirmed,
    /// No endpoint configured; no call was made.
    NotConfigured,
    /// 4xx: the restaurant refused the request.
    ClientRejected,
    /// 5xx: the restaurant system is failing.
    Unavailable,
    /// Transport failure, timeout, or an unclassifiable response.
    Unreachable,
}

/// Uniform result of one external booking call.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalBookingOutcome {
    pub kind: OutcomeKind,
    pub message: String,
    /// The restaurant's response body, kept only for confirmed bookings.
    pub raw_response: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ExternalBookingOutcome {
    pub fn confirmed(
        message: impl Into<String>,
        raw_response: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> Self {
        Self {
            kind: OutcomeKind::Confirmed,
            message: message.into(),
            raw_response,
        }
    }

    pub fn not_configured() -> Self {
        Self::failure(OutcomeKind::NotConfigured, NOT_CONFIGURED_MESSAGE.to_string())
    }

    /// 4xx outcome carrying the restaurant's raw response text.
    pub fn client_rejected(body: &str) -> Self {
        Self::failure(
            OutcomeKind::ClientRejected,
            format!("{CLIENT_REJECTED_PREFIX}{body}"),
        )
    }

    pub fn unavailable() -> Self {
        Self::failure(OutcomeKind::Unavailable, UNAVAILABLE_MESSAGE.to_string())
    }

    pub fn unreachable() -> Self {
        Self::failure(OutcomeKind::Unreachable, UNREACHABLE_MESSAGE.to_string())
    }

    fn failure(kind: OutcomeKind, message: String) -> Self {
        Self {
            kind,
            message,
            raw_response: None,
        }
    }

    /// True only for [`OutcomeKind::Confirmed`].
    pub fn success(&self) -> bool {
        self.kind == OutcomeKind::Confirmed
    }
}

/// A booking that the restaurant confirmed and that is now stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedBooking {
    pub booking: Booking,
    /// Confirmation text from the restaurant (or the default message).
    pub confirmation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_response: Option<serde_json::Map<String, serde_json::Value>>,
}
