// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that serde attributes cannot express:
//! bind address shape, unique seed ids, rating and price bounds, and
//! well-formed booking endpoints.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::TabletopConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// every collected validation error (does not fail fast).
pub fn validate_config(config: &TabletopConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.server.api_token.as_deref().is_some_and(|t| t.trim().is_empty()) {
        fail("server.api_token must not be blank when set".to_string());
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    if config.booking.request_timeout_secs == 0 {
        fail("booking.request_timeout_secs must be greater than 0".to_string());
    }

    let mut restaurant_ids = HashSet::new();
    for (i, restaurant) in config.restaurants.iter().enumerate() {
        if !restaurant_ids.insert(restaurant.id) {
            fail(format!(
                "duplicate restaurant id {} in [[restaurants]] array",
                restaurant.id
            ));
        }
        if restaurant.name.trim().is_empty() {
            fail(format!("restaurants[{i}].name must not be empty"));
        }
        if !(0.0..=5.0).contains(&restaurant.rating) {
            fail(format!(
                "restaurants[{i}].rating must be between 0.0 and 5.0, got {}",
                restaurant.rating
            ));
        }
        if !(1..=4).contains(&restaurant.price_range) {
            fail(format!(
                "restaurants[{i}].price_range must be between 1 and 4, got {}",
                restaurant.price_range
            ));
        }

        if let Some(api) = &restaurant.booking_api {
            match url::Url::parse(&api.url) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                Ok(parsed) => fail(format!(
                    "restaurants[{i}].booking_api.url must use http or https, got `{}`",
                    parsed.scheme()
                )),
                Err(e) => fail(format!(
                    "restaurants[{i}].booking_api.url `{}` is not a valid URL: {e}",
                    api.url
                )),
            }
            if !is_http_token(&api.method) {
                fail(format!(
                    "restaurants[{i}].booking_api.method `{}` is not a valid HTTP method",
                    api.method
                ));
            }
        }
    }

    let mut user_ids = HashSet::new();
    for (i, user) in config.users.iter().enumerate() {
        if !user_ids.insert(user.id) {
            fail(format!("duplicate user id {} in [[users]] array", user.id));
        }
        if !user.email.contains('@') {
            fail(format!("users[{i}].email `{}` is not an email address", user.email));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// RFC 9110 method token: one or more visible ASCII "tchar"s.
fn is_http_token(method: &str) -> bool {
    !method.is_empty()
        && method
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
}
