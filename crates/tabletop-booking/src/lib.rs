// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Booking orchestrator for the Tabletop booking backend.
//!
//! [`BookingService`] validates a booking request, checks the time slot,
//! asks the restaurant's own system to confirm through the
//! [`BookingGateway`](tabletop_core::BookingGateway), and stores the booking
//! only once the restaurant has accepted it.

pub mod policy;
pub mod service;

pub use policy::BookingPolicy;
pub use service::{BookingService, CONFLICT_WINDOW_MINUTES, MAX_BOOKING_YEAR};
