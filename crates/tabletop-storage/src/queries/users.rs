// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User record queries.

use rusqlite::{params, ErrorCode};
use tabletop_core::types::{NewUser, User, UserId};
use tabletop_core::TabletopError;

use crate::database::{map_tr_err, Database};

/// Insert a user with a chosen id, or overwrite the row with that id.
pub async fn upsert_user(db: &Database, user: &User) -> Result<(), TabletopError> {
    let user = user.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO users (id, name, email) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET name = excluded.name, email = excluded.email",
                params![user.id.0, user.name, user.email],
            )?;
            Ok(())
        })
        .await
        .map_err(map_write_err)
}

/// Register a new user; the id is assigned by the database.
///
/// A duplicate email yields [`TabletopError::Conflict`].
pub async fn create_user(db: &Database, user: &NewUser) -> Result<User, TabletopError> {
    let name = user.name.clone();
    let email = user.email.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO users (name, email) VALUES (?1, ?2)",
                params![name, email],
            )?;
            Ok(User {
                id: UserId(conn.last_insert_rowid()),
                name,
                email,
            })
        })
        .await
        .map_err(map_write_err)
}

/// Get a user by id.
pub async fn get_user(db: &Database, id: UserId) -> Result<Option<User>, TabletopError> {
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT id, name, email FROM users WHERE id = ?1",
                params![id.0],
                |row| {
                    Ok(User {
                        id: UserId(row.get(0)?),
                        name: row.get(1)?,
                        email: row.get(2)?,
                    })
                },
            );
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Unique-constraint violations become `Conflict`; anything else is storage.
fn map_write_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> TabletopError {
    let is_constraint = matches!(
        &e,
        tokio_rusqlite::Error::Error(rusqlite::Error::SqliteFailure(failure, _))
            if failure.code == ErrorCode::ConstraintViolation
    );
    if is_constraint {
        TabletopError::Conflict("a user with this email already exists".to_string())
    } else {
        map_tr_err(e)
    }
}
