// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! External booking gateway trait.

use async_trait::async_trait;

use crate::types::{BookingRequest, ExternalBookingOutcome, RestaurantId};

/// Forwards a booking to a restaurant's own reservation system.
///
/// Implementations make at most one outbound call per invocation and never
/// fail: every transport or protocol problem is folded into the returned
/// [`ExternalBookingOutcome`].
#[async_trait]
pub trait BookingGateway: Send + Sync {
    async fn book(
        &self,
        restaurant_id: RestaurantId,
        request: &BookingRequest,
        customer_name: &str,
    ) -> ExternalBookingOutcome;
}
