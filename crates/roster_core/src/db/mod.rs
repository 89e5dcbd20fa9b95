//! SQLite storage bootstrap, schema migration and the shared storage handle.
//!
//! # Responsibility
//! - Open and configure SQLite connections for roster core.
//! - Apply schema migrations in deterministic order.
//! - Own the connection behind [`Store`] so repositories never hold it directly.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write application data before migrations succeed.
//! - All physical access to one database goes through one `Store`.

use thiserror::Error;

pub mod migrations;
mod open;
mod store;

pub use open::{open_db, open_db_in_memory};
pub use store::Store;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    #[error("storage handle is poisoned after a panic in another operation")]
    Poisoned,
}
