// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tunables for booking attempts.

use tabletop_config::model::BookingConfig;

/// Behavior switches applied to every booking attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingPolicy {
    /// Reject requests whose slot is already held before calling the restaurant.
    pub enforce_availability: bool,
    /// Name sent to the restaurant when the user record has none.
    pub default_customer_name: String,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self::from(&BookingConfig::default())
    }
}

impl From<&BookingConfig> for BookingPolicy {
    fn from(config: &BookingConfig) -> Self {
        Self {
            enforce_availability: config.enforce_availability,
            default_customer_name: config.default_customer_name.clone(),
        }
    }
}
