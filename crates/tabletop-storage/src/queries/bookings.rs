// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Booking CRUD and conflict-window queries.
//!
//! Date-times are stored in the canonical millisecond UTC format, so range
//! checks are plain string comparisons.

use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Row};
use tabletop_core::time::format_date_time;
use tabletop_core::types::{Booking, BookingId, BookingStatus, NewBooking, RestaurantId, UserId};
use tabletop_core::TabletopError;

use super::timestamp_column;
use crate::database::{map_tr_err, Database};

const COLUMNS: &str = "id, user_id, restaurant_id, booking_date_time, number_of_people,
     special_requests, status, created_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Booking> {
    let status: String = row.get(6)?;
    let status = BookingStatus::from_str(&status)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;
    Ok(Booking {
        id: BookingId(row.get(0)?),
        user_id: UserId(row.get(1)?),
        restaurant_id: RestaurantId(row.get(2)?),
        booking_date_time: timestamp_column(3, row.get(3)?)?,
        number_of_people: row.get(4)?,
        special_requests: row.get(5)?,
        status,
        created_at: timestamp_column(7, row.get(7)?)?,
    })
}

/// Insert one booking row and return it with its assigned id.
pub async fn insert_booking(db: &Database, booking: &NewBooking) -> Result<Booking, TabletopError> {
    let booking = booking.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO bookings (user_id, restaurant_id, booking_date_time,
                     number_of_people, special_requests, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    booking.user_id.0,
                    booking.restaurant_id.0,
                    format_date_time(&booking.booking_date_time),
                    booking.number_of_people,
                    booking.special_requests,
                    booking.status.to_string(),
                    format_date_time(&booking.created_at),
                ],
            )?;
            Ok(Booking {
                id: BookingId(conn.last_insert_rowid()),
                user_id: booking.user_id,
                restaurant_id: booking.restaurant_id,
                booking_date_time: booking.booking_date_time.trunc_subsecs(3),
                number_of_people: booking.number_of_people,
                special_requests: booking.special_requests,
                status: booking.status,
                created_at: booking.created_at.trunc_subsecs(3),
            })
        })
        .await
        .map_err(map_tr_err)
}

/// Get a booking by id.
pub async fn get_booking(db: &Database, id: BookingId) -> Result<Option<Booking>, TabletopError> {
    db.connection()
        .call(move |conn| select_one(conn, id))
        .await
        .map_err(map_tr_err)
}

fn select_one(conn: &rusqlite::Connection, id: BookingId) -> rusqlite::Result<Option<Booking>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM bookings WHERE id = ?1"))?;
    match stmt.query_row(params![id.0], from_row) {
        Ok(booking) => Ok(Some(booking)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Which bookings a listing query returns.
#[derive(Debug, Clone, Copy)]
pub enum BookingScope {
    All,
    User(UserId),
    Restaurant(RestaurantId),
}

/// List bookings in the given scope, oldest booking time first.
pub async fn list_bookings(
    db: &Database,
    scope: BookingScope,
) -> Result<Vec<Booking>, TabletopError> {
    db.connection()
        .call(move |conn| {
            let (clause, key) = match scope {
                BookingScope::All => ("", None),
                BookingScope::User(id) => ("WHERE user_id = ?1", Some(id.0)),
                BookingScope::Restaurant(id) => ("WHERE restaurant_id = ?1", Some(id.0)),
            };
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM bookings {clause} ORDER BY booking_date_time, id"
            ))?;
            let rows = stmt.query_map(params_from_iter(key), from_row)?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}

/// Set a booking's status. Returns the updated row, or `None` if no booking
/// has that id.
pub async fn update_status(
    db: &Database,
    id: BookingId,
    status: BookingStatus,
) -> Result<Option<Booking>, TabletopError> {
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE bookings SET status = ?1 WHERE id = ?2",
                params![status.to_string(), id.0],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            select_one(conn, id)
        })
        .await
        .map_err(map_tr_err)
}

/// Active (PENDING or CONFIRMED) bookings for a restaurant whose date-time
/// falls within `[start, end]`, inclusive at both ends.
pub async fn find_conflicting(
    db: &Database,
    restaurant_id: RestaurantId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<Booking>, TabletopError> {
    let start = format_date_time(&start);
    let end = format_date_time(&end);
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM bookings
                 WHERE restaurant_id = ?1
                   AND status IN ('PENDING', 'CONFIRMED')
                   AND booking_date_time BETWEEN ?2 AND ?3
                 ORDER BY booking_date_time"
            ))?;
            let rows = stmt.query_map(params![restaurant_id.0, start, end], from_row)?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use tabletop_core::types::{Restaurant, User};

    use super::*;
    use crate::queries::{restaurants, users};

    async fn test_db() -> Database {
        let db = Database::open_in_memory().await.unwrap();
        for id in [1, 2] {
            restaurants::upsert_restaurant(
                &db,
                &Restaurant {
                    id: RestaurantId(id),
                    name: format!("Restaurant {id}"),
                    description: String::new(),
                    address: String::new(),
                    city: "Galle".to_string(),
                    cuisine: "Seafood".to_string(),
                    rating: 4.0,
                    price_range: 2,
                    phone_number: None,
                    website: None,
                    image_url: None,
                    is_active: true,
                },
            )
            .await
            .unwrap();
        }
        users::upsert_user(
            &db,
            &User {
                id: UserId(1),
                name: "Amara".to_string(),
                email: "amara@example.com".to_string(),
            },
        )
        .await
        .unwrap();
        db
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 1, hour, minute, 0).unwrap()
    }

    fn new_booking(restaurant: i64, when: DateTime<Utc>, status: BookingStatus) -> NewBooking {
        NewBooking {
            user_id: UserId(1),
            restaurant_id: RestaurantId(restaurant),
            booking_date_time: when,
            number_of_people: 2,
            special_requests: Some("Window seat".to_string()),
            status,
            created_at: Utc.with_ymd_and_hms(2030, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn insert_and_get_round_trip_preserves_fields() {
        let db = test_db().await;
        let stored = insert_booking(&db, &new_booking(1, at(19, 0), BookingStatus::Confirmed))
            .await
            .unwrap();
        let fetched = get_booking(&db, stored.id).await.unwrap().unwrap();
        assert_eq!(fetched, stored);
        assert_eq!(fetched.special_requests.as_deref(), Some("Window seat"));
        assert!(get_booking(&db, BookingId(404)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn listing_scopes() {
        let db = test_db().await;
        insert_booking(&db, &new_booking(1, at(20, 0), BookingStatus::Confirmed))
            .await
            .unwrap();
        insert_booking(&db, &new_booking(2, at(18, 0), BookingStatus::Pending))
            .await
            .unwrap();

        let all = list_bookings(&db, BookingScope::All).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].booking_date_time, at(18, 0), "ordered by booking time");

        let for_user = list_bookings(&db, BookingScope::User(UserId(1))).await.unwrap();
        assert_eq!(for_user.len(), 2);
        let for_other_user = list_bookings(&db, BookingScope::User(UserId(2))).await.unwrap();
        assert!(for_other_user.is_empty());

        let for_restaurant = list_bookings(&db, BookingScope::Restaurant(RestaurantId(2)))
            .await
            .unwrap();
        assert_eq!(for_restaurant.len(), 1);
        assert_eq!(for_restaurant[0].status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn update_status_reports_missing_rows() {
        let db = test_db().await;
        let stored = insert_booking(&db, &new_booking(1, at(19, 0), BookingStatus::Confirmed))
            .await
            .unwrap();

        let updated = update_status(&db, stored.id, BookingStatus::Cancelled)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, BookingStatus::Cancelled);

        let missing = update_status(&db, BookingId(999), BookingStatus::Completed)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn conflict_window_is_inclusive_and_ignores_inactive() {
        let db = test_db().await;
        let t = at(19, 0);
        insert_booking(&db, &new_booking(1, t + Duration::hours(1), BookingStatus::Confirmed))
            .await
            .unwrap();
        insert_booking(&db, &new_booking(1, t - Duration::minutes(30), BookingStatus::Cancelled))
            .await
            .unwrap();
        insert_booking(&db, &new_booking(1, t + Duration::minutes(61), BookingStatus::Pending))
            .await
            .unwrap();
        insert_booking(&db, &new_booking(2, t, BookingStatus::Confirmed))
            .await
            .unwrap();

        let conflicts = find_conflicting(
            &db,
            RestaurantId(1),
            t - Duration::hours(1),
            t + Duration::hours(1),
        )
        .await
        .unwrap();
        assert_eq!(conflicts.len(), 1, "only the boundary CONFIRMED booking conflicts");
        assert_eq!(conflicts[0].booking_date_time, t + Duration::hours(1));
    }
}
