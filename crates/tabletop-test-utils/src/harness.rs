// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for orchestrator and API integration testing.
//!
//! `TestHarness` assembles real SQLite storage in a temp directory, seeds a
//! few restaurants and a user, and wires them to a [`BookingService`] whose
//! gateway is a [`MockBookingGateway`].

use std::sync::Arc;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use tabletop_booking::{BookingPolicy, BookingService};
use tabletop_config::model::StorageConfig;
use tabletop_core::{
    BookingRequest, BookingStore, ExternalBookingOutcome, Restaurant, RestaurantId, TabletopError,
    User, UserId,
};
use tabletop_storage::SqliteStorage;

use crate::mock_gateway::MockBookingGateway;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    outcomes: Vec<ExternalBookingOutcome>,
    policy: BookingPolicy,
    restaurants: Vec<Restaurant>,
    users: Vec<User>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            outcomes: Vec::new(),
            policy: BookingPolicy::default(),
            restaurants: vec![
                TestHarness::restaurant(1, "Colombo Spice House", "Colombo", "Sri Lankan"),
                TestHarness::restaurant(2, "Kandy Royal Palace", "Kandy", "Fine Dining"),
            ],
            users: vec![User {
                id: UserId(1),
                name: "Amara Perera".to_string(),
                email: "amara@example.com".to_string(),
            }],
        }
    }

    /// Queue gateway outcomes, returned in order.
    pub fn with_outcomes(mut self, outcomes: Vec<ExternalBookingOutcome>) -> Self {
        self.outcomes = outcomes;
        self
    }

    /// Set the booking policy.
    pub fn with_policy(mut self, policy: BookingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Add a user to the seed set.
    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    /// Add a restaurant to the seed set.
    pub fn with_restaurant(mut self, restaurant: Restaurant) -> Self {
        self.restaurants.push(restaurant);
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, TabletopError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| TabletopError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let storage = SqliteStorage::new(StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        });
        storage.initialize().await?;
        storage.seed(&self.restaurants, &self.users).await?;
        let storage = Arc::new(storage);

        let gateway = MockBookingGateway::with_outcomes(self.outcomes);
        let service = BookingService::new(
            storage.clone(),
            storage.clone(),
            storage.clone(),
            Arc::new(gateway.clone()),
            self.policy,
        );

        Ok(TestHarness {
            storage,
            gateway,
            service,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with a mock gateway and temp storage.
pub struct TestHarness {
    /// Real SQLite storage backing every directory and the booking store.
    pub storage: Arc<SqliteStorage>,
    /// The mock gateway; inspect it for call counts.
    pub gateway: MockBookingGateway,
    /// Orchestrator wired to `storage` and `gateway`.
    pub service: BookingService,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test environment.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// A harness with default seeds that confirms every booking.
    pub async fn new() -> Result<Self, TabletopError> {
        Self::builder().build().await
    }

    /// An active restaurant record with plausible defaults.
    pub fn restaurant(id: i64, name: &str, city: &str, cuisine: &str) -> Restaurant {
        Restaurant {
            id: RestaurantId(id),
            name: name.to_string(),
            description: format!("{name} in {city}"),
            address: format!("{id} Main Street, {city}"),
            city: city.to_string(),
            cuisine: cuisine.to_string(),
            rating: 4.5,
            price_range: 2,
            phone_number: None,
            website: None,
            image_url: None,
            is_active: true,
        }
    }

    /// A time `hours` from now, at millisecond precision.
    pub fn hours_from_now(hours: i64) -> DateTime<Utc> {
        (Utc::now() + Duration::hours(hours)).trunc_subsecs(3)
    }

    /// A request from user 1 for a party of two.
    pub fn booking_request(restaurant_id: i64, when: DateTime<Utc>) -> BookingRequest {
        BookingRequest {
            restaurant_id: RestaurantId(restaurant_id),
            user_id: UserId(1),
            booking_date_time: when,
            number_of_people: 2,
            special_requests: None,
        }
    }

    /// Number of stored bookings across all restaurants.
    pub async fn booking_count(&self) -> Result<usize, TabletopError> {
        Ok(self.storage.list_bookings().await?.len())
    }
}
