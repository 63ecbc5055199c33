// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping of restaurant HTTP responses onto booking outcomes.

use reqwest::StatusCode;
use serde_json::Value;
use tabletop_core::ExternalBookingOutcome;

/// Classify a completed HTTP exchange.
///
/// - 2xx: confirmed. An empty body keeps no raw response; a JSON object body
///   is kept and its string `message` field (if any) replaces
///   `default_message`. Any other body cannot be interpreted and counts as
///   unreachable.
/// - 4xx: rejected by the restaurant, message carries the raw body text.
/// - 5xx: the restaurant system is unavailable.
/// - Anything else (1xx, 3xx): unreachable.
pub fn classify_response(status: StatusCode, body: &str, default_message: &str) -> ExternalBookingOutcome {
    if status.is_success() {
        if body.trim().is_empty() {
            return ExternalBookingOutcome::confirmed(default_message, None);
        }
        return match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => {
                let message = map
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or(default_message)
                    .to_string();
                ExternalBookingOutcome::confirmed(message, Some(map))
            }
            _ => ExternalBookingOutcome::unreachable(),
        };
    }

    if status.is_client_error() {
        return ExternalBookingOutcome::client_rejected(body);
    }

    if status.is_server_error() {
        return ExternalBookingOutcome::unavailable();
    }

    ExternalBookingOutcome::unreachable()
}
