// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for ClassBook.
//!
//! This crate stores the class template catalog and the booking ledger in
//! `SQLite` via Diesel. Connections come from an r2d2 pool so that writes
//! against *different* class instances proceed in parallel; the per-instance
//! mutual exclusion the ledger requires is provided above this layer by the
//! lock registry, not by serializing the whole database behind one
//! connection.
//!
//! ## Testing
//!
//! Tests run against unique shared in-memory databases. Each
//! [`Persistence::new_in_memory`] call receives a fresh database named by an
//! atomic counter, giving deterministic isolation without time-based
//! collisions.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod data_models;
mod diesel_schema;
mod error;
pub mod mutations;
pub mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{
    BookingRow, ClassTemplateRow, NewBooking, NewClassTemplate, format_date, format_time,
    format_weekday, parse_date, parse_time, parse_weekday,
};
pub use error::PersistenceError;
pub use sqlite::get_last_insert_rowid;

/// A pooled `SQLite` connection.
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so test
/// databases never collide.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Default number of pooled connections.
///
/// One writer per in-flight instance lock plus headroom for read-only
/// availability queries.
const DEFAULT_POOL_SIZE: u32 = 8;

/// Persistence adapter owning the `SQLite` connection pool.
pub struct Persistence {
    pool: Pool<ConnectionManager<SqliteConnection>>,
}

impl Persistence {
    /// Creates a persistence adapter backed by a shared in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");
        Self::build(&shared_memory_url, false)
    }

    /// Creates a persistence adapter backed by a file database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;
        Self::build(path_str, true)
    }

    fn build(database_url: &str, wal: bool) -> Result<Self, PersistenceError> {
        let manager: ConnectionManager<SqliteConnection> =
            ConnectionManager::new(database_url);
        let pool: Pool<ConnectionManager<SqliteConnection>> = Pool::builder()
            .max_size(DEFAULT_POOL_SIZE)
            .connection_customizer(Box::new(sqlite::ConnectionSetup))
            .build(manager)?;

        let mut conn: DbConnection = pool.get()?;
        sqlite::run_migrations(&mut conn)?;
        if wal {
            sqlite::enable_wal_mode(&mut conn)?;
        }
        sqlite::verify_foreign_key_enforcement(&mut conn)?;
        drop(conn);

        Ok(Self { pool })
    }

    /// Checks out a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns `PoolExhausted` if no connection becomes available within the
    /// pool's checkout timeout.
    pub fn conn(&self) -> Result<DbConnection, PersistenceError> {
        Ok(self.pool.get()?)
    }
}
