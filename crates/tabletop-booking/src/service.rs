// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The booking orchestrator.
//!
//! Each attempt moves through validation, one external call, and at most one
//! local write:
//!
//! ```text
//! VALIDATING -> CALLING_EXTERNAL -> CONFIRMED (1 row) | REJECTED (0 rows)
//! ```
//!
//! Validation failures never reach the restaurant. The restaurant is asked
//! exactly once; there is no retry loop.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, SubsecRound, Utc};
use tabletop_core::{
    Booking, BookingError, BookingGateway, BookingId, BookingRequest, BookingStatus,
    BookingStore, ConfirmedBooking, NewBooking, RestaurantDirectory, RestaurantId, User,
    UserDirectory, UserId,
};
use tracing::{debug, info, warn};

use crate::policy::BookingPolicy;

/// Half-width of the conflict window around a requested time.
pub const CONFLICT_WINDOW_MINUTES: i64 = 60;

/// Latest year a booking may fall in. Stored timestamps compare as strings,
/// which only orders four-digit years correctly.
pub const MAX_BOOKING_YEAR: i32 = 9999;

/// Coordinates directories, the booking store, and the external gateway.
#[derive(Clone)]
pub struct BookingService {
    restaurants: Arc<dyn RestaurantDirectory>,
    users: Arc<dyn UserDirectory>,
    bookings: Arc<dyn BookingStore>,
    gateway: Arc<dyn BookingGateway>,
    policy: BookingPolicy,
}

impl BookingService {
    pub fn new(
        restaurants: Arc<dyn RestaurantDirectory>,
        users: Arc<dyn UserDirectory>,
        bookings: Arc<dyn BookingStore>,
        gateway: Arc<dyn BookingGateway>,
        policy: BookingPolicy,
    ) -> Self {
        Self {
            restaurants,
            users,
            bookings,
            gateway,
            policy,
        }
    }

    pub fn policy(&self) -> &BookingPolicy {
        &self.policy
    }

    /// Create a booking that the restaurant has confirmed.
    ///
    /// On success exactly one CONFIRMED row has been written. Every error
    /// except `Storage`/`Internal` means nothing was written.
    pub async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<ConfirmedBooking, BookingError> {
        validate_request(request, Utc::now())?;

        let user = self
            .users
            .get_user(request.user_id)
            .await?
            .ok_or_else(|| not_found("user", request.user_id))?;
        self.restaurants
            .get_restaurant(request.restaurant_id)
            .await?
            .ok_or_else(|| not_found("restaurant", request.restaurant_id))?;

        if self.policy.enforce_availability
            && !self
                .slot_is_free(request.restaurant_id, request.booking_date_time)
                .await?
        {
            debug!(
                restaurant_id = %request.restaurant_id,
                booking_date_time = %request.booking_date_time,
                "requested slot already held"
            );
            return Err(BookingError::SlotUnavailable {
                restaurant_id: request.restaurant_id,
            });
        }

        let customer_name = self.customer_name(&user);
        let outcome = self
            .gateway
            .book(request.restaurant_id, request, customer_name)
            .await;

        if !outcome.success() {
            warn!(
                restaurant_id = %request.restaurant_id,
                user_id = %request.user_id,
                kind = %outcome.kind,
                message = %outcome.message,
                "booking rejected"
            );
            return Err(BookingError::Rejected {
                kind: outcome.kind,
                message: outcome.message,
            });
        }

        let row = NewBooking::confirmed(request, Utc::now().trunc_subsecs(3));
        let booking = self
            .bookings
            .insert_booking(&row)
            .await
            .map_err(BookingError::Storage)?;

        info!(
            booking_id = %booking.id,
            restaurant_id = %booking.restaurant_id,
            user_id = %booking.user_id,
            "booking confirmed"
        );

        Ok(ConfirmedBooking {
            booking,
            confirmation: outcome.message,
            external_response: outcome.raw_response,
        })
    }

    /// Whether no PENDING or CONFIRMED booking for the restaurant falls within
    /// one hour either side of `date_time` (inclusive).
    pub async fn is_time_slot_available(
        &self,
        restaurant_id: RestaurantId,
        date_time: DateTime<Utc>,
    ) -> Result<bool, BookingError> {
        self.restaurants
            .get_restaurant(restaurant_id)
            .await?
            .ok_or_else(|| not_found("restaurant", restaurant_id))?;
        self.slot_is_free(restaurant_id, date_time).await
    }

    async fn slot_is_free(
        &self,
        restaurant_id: RestaurantId,
        date_time: DateTime<Utc>,
    ) -> Result<bool, BookingError> {
        let (from, to) = conflict_window(date_time)?;
        let conflicts = self
            .bookings
            .find_conflicting_bookings(restaurant_id, from, to)
            .await?;
        Ok(conflicts.is_empty())
    }

    pub async fn get_booking(&self, id: BookingId) -> Result<Booking, BookingError> {
        self.bookings
            .get_booking(id)
            .await?
            .ok_or_else(|| not_found("booking", id))
    }

    pub async fn list_bookings(&self) -> Result<Vec<Booking>, BookingError> {
        Ok(self.bookings.list_bookings().await?)
    }

    pub async fn list_user_bookings(&self, user_id: UserId) -> Result<Vec<Booking>, BookingError> {
        self.users
            .get_user(user_id)
            .await?
            .ok_or_else(|| not_found("user", user_id))?;
        Ok(self.bookings.list_bookings_for_user(user_id).await?)
    }

    pub async fn list_restaurant_bookings(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Booking>, BookingError> {
        self.restaurants
            .get_restaurant(restaurant_id)
            .await?
            .ok_or_else(|| not_found("restaurant", restaurant_id))?;
        Ok(self.bookings.list_bookings_for_restaurant(restaurant_id).await?)
    }

    /// Administrative status change. Any status may be set.
    pub async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Booking, BookingError> {
        let booking = self
            .bookings
            .update_booking_status(id, status)
            .await?
            .ok_or_else(|| not_found("booking", id))?;
        info!(booking_id = %id, status = %status, "booking status updated");
        Ok(booking)
    }

    /// Mark a booking CANCELLED, freeing its slot.
    pub async fn cancel_booking(&self, id: BookingId) -> Result<Booking, BookingError> {
        self.update_status(id, BookingStatus::Cancelled).await
    }

    fn customer_name<'a>(&'a self, user: &'a User) -> &'a str {
        resolve_customer_name(user, &self.policy.default_customer_name)
    }
}

/// Reject requests that can never be booked, before touching any collaborator.
fn validate_request(request: &BookingRequest, now: DateTime<Utc>) -> Result<(), BookingError> {
    if request.number_of_people < 1 {
        return Err(BookingError::Validation(
            "number of people must be at least 1".to_string(),
        ));
    }
    if request.booking_date_time <= now {
        return Err(BookingError::Validation(
            "booking date must be in the future".to_string(),
        ));
    }
    if request.booking_date_time.year() > MAX_BOOKING_YEAR {
        return Err(out_of_range());
    }
    Ok(())
}

/// The inclusive `[t - 1h, t + 1h]` window, or `Validation` when either end
/// leaves the storable year range.
fn conflict_window(
    date_time: DateTime<Utc>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), BookingError> {
    let window = Duration::minutes(CONFLICT_WINDOW_MINUTES);
    date_time
        .checked_sub_signed(window)
        .zip(date_time.checked_add_signed(window))
        .filter(|(from, to)| from.year() >= 0 && to.year() <= MAX_BOOKING_YEAR)
        .ok_or_else(out_of_range)
}

fn out_of_range() -> BookingError {
    BookingError::Validation("booking date is out of range".to_string())
}

fn resolve_customer_name<'a>(user: &'a User, fallback: &'a str) -> &'a str {
    let name = user.name.trim();
    if name.is_empty() { fallback } else { name }
}

fn not_found(entity: &'static str, id: impl ToString) -> BookingError {
    BookingError::NotFound {
        entity,
        id: id.to_string(),
    }
}
