//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts.
//! - Isolate SQL details from service orchestration.
//!
//! # Invariants
//! - Every repository call is one `Store` operation (one transaction for writes).
//! - Repository APIs return semantic errors (`NotFound`, `MissingReference`,
//!   `Conflict`) in addition to store transport errors.
//! - Owner checks for notes/todos run inside the same transaction as the write.

use crate::db::DbError;
use crate::model::{EntityKind, ValidationError};
use thiserror::Error;

pub mod note_repo;
pub mod person_repo;
pub mod todo_repo;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: i64 },
    #[error("referenced {entity} does not exist: {id}")]
    MissingReference { entity: EntityKind, id: i64 },
    #[error("{entity} conflicts with an existing record: {detail}")]
    Conflict { entity: EntityKind, detail: String },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Maps uniqueness violations to `Conflict`; everything else stays a store error.
pub(crate) fn classify_write_error(err: rusqlite::Error, entity: EntityKind) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::Conflict {
                entity,
                detail: err.to_string(),
            }
        }
        _ => err.into(),
    }
}
