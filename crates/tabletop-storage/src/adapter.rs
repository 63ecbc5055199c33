// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the directory and booking store traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use tabletop_config::model::StorageConfig;
use tabletop_core::types::{NewUser, RestaurantFilter};
use tabletop_core::{
    Booking, BookingId, BookingStatus, BookingStore, Component, HealthStatus, NewBooking,
    Restaurant, RestaurantDirectory, RestaurantId, TabletopError, User, UserDirectory, UserId,
};

use crate::database::{self, Database};
use crate::queries;
use crate::queries::bookings::BookingScope;

/// SQLite-backed storage.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is opened by [`SqliteStorage::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`](Self::initialize) is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, TabletopError> {
        self.db.get().ok_or_else(|| TabletopError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }

    /// Open the database and run migrations. Fails if called twice.
    pub async fn initialize(&self) -> Result<(), TabletopError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| TabletopError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    /// Checkpoint the WAL so the database file is self-contained.
    pub async fn close(&self) -> Result<(), TabletopError> {
        database::checkpoint(self.db()?).await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    /// Upsert restaurant and user records by id.
    ///
    /// Seeding is idempotent; rows already present are overwritten with the
    /// supplied values and bookings are never touched.
    pub async fn seed(&self, restaurants: &[Restaurant], users: &[User]) -> Result<(), TabletopError> {
        let db = self.db()?;
        for restaurant in restaurants {
            queries::restaurants::upsert_restaurant(db, restaurant).await?;
        }
        for user in users {
            queries::users::upsert_user(db, user).await?;
        }
        info!(
            restaurants = restaurants.len(),
            users = users.len(),
            "seeded directory records"
        );
        Ok(())
    }
}

#[async_trait]
impl Component for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn health_check(&self) -> Result<HealthStatus, TabletopError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), TabletopError> {
        if self.db.get().is_some() {
            self.close().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl RestaurantDirectory for SqliteStorage {
    async fn get_restaurant(&self, id: RestaurantId) -> Result<Option<Restaurant>, TabletopError> {
        queries::restaurants::get_restaurant(self.db()?, id).await
    }

    async fn list_restaurants(
        &self,
        filter: &RestaurantFilter,
    ) -> Result<Vec<Restaurant>, TabletopError> {
        queries::restaurants::list_restaurants(self.db()?, filter).await
    }
}

#[async_trait]
impl UserDirectory for SqliteStorage {
    async fn get_user(&self, id: UserId) -> Result<Option<User>, TabletopError> {
        queries::users::get_user(self.db()?, id).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, TabletopError> {
        queries::users::create_user(self.db()?, user).await
    }
}

#[async_trait]
impl BookingStore for SqliteStorage {
    async fn insert_booking(&self, booking: &NewBooking) -> Result<Booking, TabletopError> {
        queries::bookings::insert_booking(self.db()?, booking).await
    }

    async fn get_booking(&self, id: BookingId) -> Result<Option<Booking>, TabletopError> {
        queries::bookings::get_booking(self.db()?, id).await
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, TabletopError> {
        queries::bookings::list_bookings(self.db()?, BookingScope::All).await
    }

    async fn list_bookings_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, TabletopError> {
        queries::bookings::list_bookings(self.db()?, BookingScope::User(user_id)).await
    }

    async fn list_bookings_for_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Booking>, TabletopError> {
        queries::bookings::list_bookings(self.db()?, BookingScope::Restaurant(restaurant_id)).await
    }

    async fn update_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, TabletopError> {
        queries::bookings::update_status(self.db()?, id, status).await
    }

    async fn find_conflicting_bookings(
        &self,
        restaurant_id: RestaurantId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Booking>, TabletopError> {
        queries::bookings::find_conflicting(self.db()?, restaurant_id, start, end).await
    }
}
