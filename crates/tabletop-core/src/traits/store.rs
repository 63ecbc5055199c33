// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Booking persistence trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::TabletopError;
use crate::types::{Booking, BookingId, BookingStatus, NewBooking, RestaurantId, UserId};

/// Persistence for booking rows.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Writes one booking row and returns it with its assigned id.
    async fn insert_booking(&self, booking: &NewBooking) -> Result<Booking, TabletopError>;

    async fn get_booking(&self, id: BookingId) -> Result<Option<Booking>, TabletopError>;

    async fn list_bookings(&self) -> Result<Vec<Booking>, TabletopError>;

    async fn list_bookings_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, TabletopError>;

    async fn list_bookings_for_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Booking>, TabletopError>;

    /// Sets a booking's status. Returns `None` when the booking does not exist.
    async fn update_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, TabletopError>;

    /// Bookings for `restaurant_id` in PENDING or CONFIRMED status whose
    /// date-time lies within `[start, end]` (inclusive).
    async fn find_conflicting_bookings(
        &self,
        restaurant_id: RestaurantId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Booking>, TabletopError>;
}
