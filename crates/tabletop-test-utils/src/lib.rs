// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Tabletop integration tests.
//!
//! Provides a mock booking gateway and a test harness for fast,
//! deterministic, CI-runnable tests without restaurant systems.
//!
//! # Components
//!
//! - [`MockBookingGateway`] - Scripted gateway that counts calls
//! - [`TestHarness`] - Real SQLite storage wired to the orchestrator

pub mod harness;
pub mod mock_gateway;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_gateway::{MockBookingGateway, RecordedCall};
