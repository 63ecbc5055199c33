// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP API for the Tabletop booking backend.
//!
//! Exposes the restaurant directory, user registration, and the booking
//! orchestrator as a JSON API built on axum.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

pub use auth::AuthConfig;
pub use error::ApiError;
pub use server::{build_router, start_server, ApiState, ServerConfig};
