// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Restaurant directory queries.

use rusqlite::{params, Row};
use tabletop_core::types::{Restaurant, RestaurantFilter, RestaurantId};
use tabletop_core::TabletopError;

use crate::database::{map_tr_err, Database};

const COLUMNS: &str = "id, name, description, address, city, cuisine, rating, price_range,
     phone_number, website, image_url, is_active";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Restaurant> {
    Ok(Restaurant {
        id: RestaurantId(row.get(0)?),
        name: row.get(1)?,
        description: row.get(2)?,
        address: row.get(3)?,
        city: row.get(4)?,
        cuisine: row.get(5)?,
        rating: row.get(6)?,
        price_range: row.get(7)?,
        phone_number: row.get(8)?,
        website: row.get(9)?,
        image_url: row.get(10)?,
        is_active: row.get(11)?,
    })
}

/// Insert a restaurant, or overwrite the existing row with the same id.
pub async fn upsert_restaurant(db: &Database, restaurant: &Restaurant) -> Result<(), TabletopError> {
    let r = restaurant.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO restaurants (id, name, description, address, city, cuisine, rating,
                     price_range, phone_number, website, image_url, is_active)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                 ON CONFLICT(id) DO UPDATE SET
                     name = excluded.name,
                     description = excluded.description,
                     address = excluded.address,
                     city = excluded.city,
                     cuisine = excluded.cuisine,
                     rating = excluded.rating,
                     price_range = excluded.price_range,
                     phone_number = excluded.phone_number,
                     website = excluded.website,
                     image_url = excluded.image_url,
                     is_active = excluded.is_active",
                params![
                    r.id.0,
                    r.name,
                    r.description,
                    r.address,
                    r.city,
                    r.cuisine,
                    r.rating,
                    r.price_range,
                    r.phone_number,
                    r.website,
                    r.image_url,
                    r.is_active,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Get a restaurant by id, active or not.
pub async fn get_restaurant(
    db: &Database,
    id: RestaurantId,
) -> Result<Option<Restaurant>, TabletopError> {
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {COLUMNS} FROM restaurants WHERE id = ?1"))?;
            match stmt.query_row(params![id.0], from_row) {
                Ok(restaurant) => Ok(Some(restaurant)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// List active restaurants. City and cuisine match case-insensitively;
/// `min_rating` is inclusive. Unset filters match everything.
pub async fn list_restaurants(
    db: &Database,
    filter: &RestaurantFilter,
) -> Result<Vec<Restaurant>, TabletopError> {
    let filter = filter.clone();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM restaurants
                 WHERE is_active = 1
                   AND (?1 IS NULL OR city = ?1 COLLATE NOCASE)
                   AND (?2 IS NULL OR cuisine = ?2 COLLATE NOCASE)
                   AND (?3 IS NULL OR rating >= ?3)
                 ORDER BY id"
            ))?;
            let rows = stmt.query_map(
                params![filter.city, filter.cuisine, filter.min_rating],
                from_row,
            )?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}
