// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./tabletop.toml` > `~/.config/tabletop/tabletop.toml` > `/etc/tabletop/tabletop.toml`
//! with environment variable overrides via `TABLETOP_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TabletopConfig;

pub(crate) const SYSTEM_CONFIG_PATH: &str = "/etc/tabletop/tabletop.toml";
pub(crate) const LOCAL_CONFIG_PATH: &str = "tabletop.toml";
pub(crate) const USER_CONFIG_SUFFIX: &str = "tabletop/tabletop.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/tabletop/tabletop.toml` (system-wide)
/// 3. `~/.config/tabletop/tabletop.toml` (user XDG config)
/// 4. `./tabletop.toml` (local directory)
/// 5. `TABLETOP_*` environment variables
pub fn load_config() -> Result<TabletopConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<TabletopConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TabletopConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TabletopConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TabletopConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TabletopConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join(USER_CONFIG_SUFFIX))
                .unwrap_or_default(),
        ))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` so that underscore-containing key
/// names survive. `TABLETOP_BOOKING_REQUEST_TIMEOUT_SECS` must map to
/// `booking.request_timeout_secs`, not `booking.request.timeout.secs`.
/// Array sections (`restaurants`, `users`) are file-only.
fn env_provider() -> Env {
    Env::prefixed("TABLETOP_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("booking_", "booking.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}
