// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Tabletop restaurant booking backend.
//!
//! This crate provides the domain types, error types, and the trait seams
//! (directories, booking store, external booking gateway) that the booking
//! orchestrator is written against. Storage, HTTP, and configuration crates
//! implement or consume these traits.

pub mod endpoints;
pub mod error;
pub mod time;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use endpoints::EndpointRegistry;
pub use error::{BookingError, TabletopError};
pub use types::{
    Booking, BookingId, BookingRequest, BookingStatus, ConfirmedBooking, ExternalBookingOutcome,
    HealthStatus, NewBooking, NewUser, OutcomeKind, Restaurant, RestaurantBookingEndpoint,
    RestaurantFilter, RestaurantId, User, UserId,
};

pub use traits::{BookingGateway, BookingStore, Component, RestaurantDirectory, UserDirectory};
