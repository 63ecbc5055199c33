// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Directory traits for restaurant and user records.

use async_trait::async_trait;

use crate::error::TabletopError;
use crate::types::{NewUser, Restaurant, RestaurantFilter, RestaurantId, User, UserId};

/// Read access to restaurant records.
#[async_trait]
pub trait RestaurantDirectory: Send + Sync {
    /// Returns the restaurant, or `None` if no such record exists.
    async fn get_restaurant(&self, id: RestaurantId) -> Result<Option<Restaurant>, TabletopError>;

    /// Lists active restaurants matching every filter that is set.
    async fn list_restaurants(
        &self,
        filter: &RestaurantFilter,
    ) -> Result<Vec<Restaurant>, TabletopError>;
}

/// Access to user records.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns the user, or `None` if no such record exists.
    async fn get_user(&self, id: UserId) -> Result<Option<User>, TabletopError>;

    /// Registers a new user and returns the stored record.
    async fn create_user(&self, user: &NewUser) -> Result<User, TabletopError>;
}
