//! Storage handle shared by every repository.
//!
//! # Responsibility
//! - Own the single SQLite connection for one database.
//! - Serialize physical access and scope writes to one transaction.
//!
//! # Invariants
//! - `write` commits only when the closure returns `Ok`; any `Err` rolls back.
//! - No operation spans two `write` calls atomically.

use super::{open_db, open_db_in_memory, DbError, DbResult};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Explicitly constructed storage handle, passed by reference to repositories.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens an isolated, migrated in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Runs read-only work against the connection without opening a transaction.
    pub fn read<T, E>(&self, op: impl FnOnce(&Connection) -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let conn = self.lock()?;
        op(&conn)
    }

    /// Runs work inside one immediate transaction.
    pub fn write<T, E>(&self, op: impl FnOnce(&Transaction<'_>) -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(DbError::from)?;
        let value = op(&tx)?;
        tx.commit().map_err(DbError::from)?;
        Ok(value)
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::Poisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::Store;
    use crate::db::DbError;

    #[test]
    fn write_rolls_back_when_closure_fails() {
        let store = Store::open_in_memory().unwrap();

        let result: Result<(), DbError> = store.write(|tx| {
            tx.execute("INSERT INTO people (name) VALUES ('ghost');", [])?;
            Err(DbError::Poisoned)
        });
        assert!(result.is_err());

        let count: i64 = store
            .read(|conn| {
                conn.query_row("SELECT COUNT(*) FROM people;", [], |row| row.get(0))
                    .map_err(DbError::from)
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn write_commits_on_success() {
        let store = Store::open_in_memory().unwrap();

        store
            .write(|tx| {
                tx.execute("INSERT INTO people (name) VALUES ('kept');", [])
                    .map_err(DbError::from)
            })
            .unwrap();

        let count: i64 = store
            .read(|conn| {
                conn.query_row("SELECT COUNT(*) FROM people;", [], |row| row.get(0))
                    .map_err(DbError::from)
            })
            .unwrap();
        assert_eq!(count, 1);
    }
}
