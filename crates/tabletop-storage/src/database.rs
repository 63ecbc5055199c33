// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! `Database` wraps the one `tokio_rusqlite::Connection`; query modules accept
//! `&Database` and go through [`Database::connection`]. Do NOT open additional
//! connections for writes.

use std::path::Path;

use tabletop_core::TabletopError;
use tracing::{debug, info};

use crate::migrations;

/// Handle to the SQLite database.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database file at `path`, apply PRAGMAs, and run
    /// pending migrations.
    ///
    /// Missing parent directories are created.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, TabletopError> {
        let parent = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(parent) = parent {
            std::fs::create_dir_all(parent).map_err(|e| TabletopError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| TabletopError::Storage {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.prepare(wal_mode).await?;
        info!(path, wal_mode, "database opened");
        Ok(db)
    }

    /// Open a private in-memory database with the full schema applied.
    pub async fn open_in_memory() -> Result<Self, TabletopError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(|e| TabletopError::Storage {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.prepare(false).await?;
        Ok(db)
    }

    async fn prepare(&self, wal_mode: bool) -> Result<(), TabletopError> {
        self.conn
            .call(move |conn| -> Result<(), TabletopError> {
                let journal = if wal_mode { "WAL" } else { "DELETE" };
                conn.execute_batch(&format!(
                    "PRAGMA journal_mode = {journal};
                     PRAGMA synchronous = NORMAL;
                     PRAGMA foreign_keys = ON;
                     PRAGMA busy_timeout = 5000;"
                ))
                .map_err(|e| TabletopError::Storage {
                    source: Box::new(e),
                })?;
                migrations::run_migrations(conn)
            })
            .await
            .map_err(|e| match e {
                tokio_rusqlite::Error::Error(inner) => inner,
                other => TabletopError::Storage {
                    source: other.to_string().into(),
                },
            })?;
        debug!("pragmas applied and migrations complete");
        Ok(())
    }

    /// The single writer connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), TabletopError> {
        checkpoint(&self).await?;
        self.conn.close().await.map_err(map_tr_err)?;
        debug!("database closed");
        Ok(())
    }
}

/// Fold the WAL back into the main database file.
pub(crate) async fn checkpoint(db: &Database) -> Result<(), TabletopError> {
    db.connection()
        .call(|conn| -> Result<(), rusqlite::Error> {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Convert a tokio-rusqlite error into `TabletopError::Storage`.
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> TabletopError {
    TabletopError::Storage {
        source: Box::new(e),
    }
}
