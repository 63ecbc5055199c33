// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only registry of restaurant booking endpoints.
//!
//! Built once at startup from configuration and handed to the gateway at
//! construction. Lookups are plain in-memory map reads.

use std::collections::HashMap;

use crate::types::{RestaurantBookingEndpoint, RestaurantId};

/// Maps restaurants to their external reservation API.
#[derive(Debug, Clone, Default)]
pub struct EndpointRegistry {
    endpoints: HashMap<RestaurantId, RestaurantBookingEndpoint>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the endpoint for `endpoint.restaurant_id`.
    pub fn with_endpoint(mut self, endpoint: RestaurantBookingEndpoint) -> Self {
        self.endpoints.insert(endpoint.restaurant_id, endpoint);
        self
    }

    /// Returns the endpoint for a restaurant, or `None` when the restaurant
    /// has no external integration.
    pub fn lookup_endpoint(&self, restaurant_id: RestaurantId) -> Option<&RestaurantBookingEndpoint> {
        self.endpoints.get(&restaurant_id)
    }

    pub fn contains(&self, restaurant_id: RestaurantId) -> bool {
        self.endpoints.contains_key(&restaurant_id)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl FromIterator<RestaurantBookingEndpoint> for EndpointRegistry {
    fn from_iter<I: IntoIterator<Item = RestaurantBookingEndpoint>>(iter: I) -> Self {
        Self {
            endpoints: iter
                .into_iter()
                .map(|endpoint| (endpoint.restaurant_id, endpoint))
                .collect(),
        }
    }
}
