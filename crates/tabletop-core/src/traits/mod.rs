// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the booking core and its collaborators.
//!
//! All traits use `#[async_trait]` so implementations can sit behind
//! `Arc<dyn Trait>`.

pub mod component;
pub mod directory;
pub mod gateway;
pub mod store;

pub use component::Component;
pub use directory::{RestaurantDirectory, UserDirectory};
pub use gateway::BookingGateway;
pub use store::BookingStore;
