// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! External booking gateway for the Tabletop booking backend.
//!
//! [`HttpBookingGateway`] forwards one booking attempt to the restaurant's
//! own reservation API and folds whatever happens into an
//! [`ExternalBookingOutcome`](tabletop_core::ExternalBookingOutcome).

pub mod classify;
pub mod client;
pub mod signature;

pub use classify::classify_response;
pub use signature::{sign_payload, verify_signature};
pub use client::{ExternalBookingPayload, HttpBookingGateway, REQUEST_ID_HEADER, SIGNATURE_HEADER};
