//! Use-case services over the repositories.
//!
//! # Responsibility
//! - Turn repository `Option`s into classified `NotFound` errors.
//! - Apply the shared bulk-id policy and attach person relations.
//! - Keep transport layers decoupled from storage details.
//!
//! # Invariants
//! - Every failure reaching callers is one `ServiceError` variant; no
//!   sentinel comparison is needed to tell "no rows" from store failures.

use crate::model::{EntityKind, ValidationError};
use crate::repo::RepoError;
use thiserror::Error;

pub mod bulk;
pub mod note_service;
pub mod person_service;
pub mod relations;
pub mod todo_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: i64 },
    #[error("referenced {entity} does not exist: {id}")]
    MissingReference { entity: EntityKind, id: i64 },
    #[error("{entity} conflicts with an existing record: {detail}")]
    Conflict { entity: EntityKind, detail: String },
    #[error("store failure: {0}")]
    Store(#[source] RepoError),
    #[error("response encoding failed: {0}")]
    Encode(String),
    /// A multi-row create stopped part way; `committed` rows stay persisted.
    #[error("bulk insert stopped after {committed} committed row(s): {source}")]
    PartialBulkInsert {
        committed: usize,
        source: Box<ServiceError>,
    },
}

impl ServiceError {
    pub fn not_found(entity: EntityKind, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::MissingReference { entity, id } => Self::MissingReference { entity, id },
            RepoError::Conflict { entity, detail } => Self::Conflict { entity, detail },
            other @ RepoError::Db(_) => Self::Store(other),
        }
    }
}
