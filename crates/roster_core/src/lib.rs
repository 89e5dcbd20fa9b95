//! Core of the roster record keeper: people, their notes and their todos.
//! Storage, relation loading, bulk-id lookup, partial updates and the JSON
//! representation all live here; binaries only wire configuration to `api`.

pub mod api;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod wire;

pub use api::{Api, ApiResponse};
pub use config::{ConfigError, RosterConfig};
pub use db::{open_db, open_db_in_memory, DbError, Store};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{NewNote, Note, NoteId, NotePatch};
pub use model::person::{NewPerson, Person, PersonId, PersonWithRelations};
pub use model::todo::{NewTodo, Todo, TodoId, TodoPatch, TodoTemplate};
pub use model::{EntityKind, ValidationError};
pub use repo::{RepoError, RepoResult};
pub use service::bulk::IdSelection;
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
