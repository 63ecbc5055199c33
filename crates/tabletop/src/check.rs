// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tabletop check-config`: a readable summary of the loaded configuration.

use std::fmt::Write;

use tabletop_config::TabletopConfig;

/// Render the summary printed after a successful validation.
///
/// Secrets are reported as present or absent, never printed.
pub fn summary(config: &TabletopConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "configuration OK");
    let _ = writeln!(out, "  server:   {}:{}", config.server.host, config.server.port);
    let _ = writeln!(
        out,
        "  auth:     {}",
        if config.server.api_token.is_some() {
            "bearer token"
        } else {
            "disabled"
        }
    );
    let _ = writeln!(out, "  database: {}", config.storage.database_path);
    let _ = writeln!(
        out,
        "  booking:  timeout {}s, availability check {}",
        config.booking.request_timeout_secs,
        if config.booking.enforce_availability {
            "on"
        } else {
            "off"
        }
    );
    let _ = writeln!(out, "  users:    {}", config.users.len());
    let _ = writeln!(out, "  restaurants: {}", config.restaurants.len());
    for seed in &config.restaurants {
        match &seed.booking_api {
            Some(api) => {
                let signed = if api.secret_key.is_some() { ", signed" } else { "" };
                let _ = writeln!(
                    out,
                    "    #{} {}: {} {}{signed}",
                    seed.id,
                    seed.name,
                    api.method.to_ascii_uppercase(),
                    api.url
                );
            }
            None => {
                let _ = writeln!(out, "    #{} {}: no booking API", seed.id, seed.name);
            }
        }
    }
    out
}
