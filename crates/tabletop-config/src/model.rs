// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Tabletop booking backend.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

use tabletop_core::types::{
    DEFAULT_CONFIRMATION_MESSAGE, Restaurant, RestaurantBookingEndpoint, RestaurantId, User,
    UserId,
};
use tabletop_core::EndpointRegistry;

/// Top-level Tabletop configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TabletopConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Booking workflow and external gateway settings.
    #[serde(default)]
    pub booking: BookingConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Restaurants seeded into the directory at startup.
    #[serde(default)]
    pub restaurants: Vec<RestaurantSeed>,

    /// Users seeded into the directory at startup.
    #[serde(default)]
    pub users: Vec<UserSeed>,
}

impl TabletopConfig {
    /// Build the read-only endpoint registry from the restaurant seeds.
    ///
    /// Restaurants without a `booking_api` table are left out, which the
    /// gateway reports as "not configured".
    pub fn endpoint_registry(&self) -> EndpointRegistry {
        self.restaurants
            .iter()
            .filter_map(RestaurantSeed::endpoint)
            .collect()
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bearer token required on `/api/*` routes. `None` disables auth.
    #[serde(default)]
    pub api_token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_token: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("tabletop").join("tabletop.db"))
        .unwrap_or_else(|| "tabletop.db".into())
        .display()
        .to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Booking workflow configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BookingConfig {
    /// Upper bound on one external booking call, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Reject requests that overlap an active booking before calling out.
    #[serde(default = "default_enforce_availability")]
    pub enforce_availability: bool,

    /// Customer name sent when the user record has no usable name.
    #[serde(default = "default_customer_name")]
    pub default_customer_name: String,

    /// Confirmation text used when a restaurant's 2xx body has no `message`.
    #[serde(default = "default_confirmation_message")]
    pub confirmation_message: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            enforce_availability: default_enforce_availability(),
            default_customer_name: default_customer_name(),
            confirmation_message: default_confirmation_message(),
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_enforce_availability() -> bool {
    true
}

fn default_customer_name() -> String {
    "Customer".to_string()
}

fn default_confirmation_message() -> String {
    DEFAULT_CONFIRMATION_MESSAGE.to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// A restaurant record seeded at startup (`[[restaurants]]`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RestaurantSeed {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    pub city: String,
    pub cuisine: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default = "default_price_range")]
    pub price_range: u8,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,

    /// External reservation API. Absent means the restaurant cannot be booked.
    #[serde(default)]
    pub booking_api: Option<BookingApiConfig>,
}

fn default_price_range() -> u8 {
    2
}

fn default_active() -> bool {
    true
}

impl RestaurantSeed {
    /// The directory record for this seed.
    pub fn to_restaurant(&self) -> Restaurant {
        Restaurant {
            id: RestaurantId(self.id),
            name: self.name.clone(),
            description: self.description.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            cuisine: self.cuisine.clone(),
            rating: self.rating,
            price_range: self.price_range,
            phone_number: self.phone_number.clone(),
            website: self.website.clone(),
            image_url: self.image_url.clone(),
            is_active: self.active,
        }
    }

    /// The booking endpoint for this seed, if one is configured.
    pub fn endpoint(&self) -> Option<RestaurantBookingEndpoint> {
        self.booking_api.as_ref().map(|api| RestaurantBookingEndpoint {
            restaurant_id: RestaurantId(self.id),
            url: api.url.clone(),
            http_method: api.method.to_ascii_uppercase(),
            secret_key: api.secret_key.clone(),
        })
    }
}

/// External reservation API for one restaurant (`[restaurants.booking_api]`).
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BookingApiConfig {
    /// Full URL of the restaurant's booking endpoint.
    pub url: String,

    /// HTTP method the restaurant expects.
    #[serde(default = "default_method")]
    pub method: String,

    /// Shared secret for payload signing.
    #[serde(default)]
    pub secret_key: Option<String>,
}

impl std::fmt::Debug for BookingApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingApiConfig")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

fn default_method() -> String {
    "POST".to_string()
}

/// A user record seeded at startup (`[[users]]`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UserSeed {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl UserSeed {
    pub fn user_id(&self) -> UserId {
        UserId(self.id)
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.user_id(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}
