// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock booking gateway for deterministic testing.
//!
//! `MockBookingGateway` implements `BookingGateway` with pre-configured
//! outcomes and records every call, so tests can assert how many times the
//! restaurant would have been contacted.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tabletop_core::{BookingGateway, BookingRequest, ExternalBookingOutcome, RestaurantId};

/// One invocation of [`MockBookingGateway::book`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub restaurant_id: RestaurantId,
    pub request: BookingRequest,
    pub customer_name: String,
}

/// A gateway that returns queued outcomes.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty, a
/// confirmation with the default message is returned.
#[derive(Clone, Default)]
pub struct MockBookingGateway {
    outcomes: Arc<Mutex<VecDeque<ExternalBookingOutcome>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockBookingGateway {
    /// Create a gateway that confirms everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gateway pre-loaded with the given outcomes.
    pub fn with_outcomes(outcomes: Vec<ExternalBookingOutcome>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::from(outcomes))),
            calls: Arc::default(),
        }
    }

    /// Queue an outcome for a later call.
    pub async fn push_outcome(&self, outcome: ExternalBookingOutcome) {
        self.outcomes.lock().await.push_back(outcome);
    }

    /// Number of `book` calls so far.
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    /// Every call made so far, oldest first.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl BookingGateway for MockBookingGateway {
    async fn book(
        &self,
        restaurant_id: RestaurantId,
        request: &BookingRequest,
        customer_name: &str,
    ) -> ExternalBookingOutcome {
        self.calls.lock().await.push(RecordedCall {
            restaurant_id,
            request: request.clone(),
            customer_name: customer_name.to_string(),
        });
        self.outcomes.lock().await.pop_front().unwrap_or_else(|| {
            ExternalBookingOutcome::confirmed(
                tabletop_core::types::DEFAULT_CONFIRMATION_MESSAGE,
                None,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use tabletop_core::{OutcomeKind, UserId};

    use super::*;

    fn request() -> BookingRequest {
        BookingRequest {
            restaurant_id: RestaurantId(1),
            user_id: UserId(1),
            booking_date_time: Utc.with_ymd_and_hms(2030, 1, 1, 19, 0, 0).unwrap(),
            number_of_people: 2,
            special_requests: None,
        }
    }

    #[tokio::test]
    async fn returns_queued_outcomes_then_confirms() {
        let gateway = MockBookingGateway::with_outcomes(vec![ExternalBookingOutcome::unavailable()]);

        let first = gateway.book(RestaurantId(1), &request(), "Amara").await;
        let second = gateway.book(RestaurantId(1), &request(), "Amara").await;

        assert_eq!(first.kind, OutcomeKind::Unavailable);
        assert_eq!(second.kind, OutcomeKind::Confirmed);
        assert_eq!(gateway.call_count().await, 2);
        assert_eq!(gateway.calls().await[0].customer_name, "Amara");
    }
}
