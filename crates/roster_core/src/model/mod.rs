//! Domain model for people and the notes/todos they own.
//!
//! # Responsibility
//! - Define canonical records used by repositories and services.
//! - Define create-records and sparse patches for mutations.
//!
//! # Invariants
//! - Ids are assigned by the store exactly once and never mutated.
//! - Every note/todo carries the id of exactly one owning person.
//! - Patches never clear a field: empty values mean "no change".

use std::fmt::{Display, Formatter};
use thiserror::Error;

pub mod note;
pub mod person;
pub mod todo;

/// Entity families known to core, used to tag errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Person,
    Note,
    Todo,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Note => "note",
            Self::Todo => "todo",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input rejected before any store access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("invalid identifier `{0}`: expected a non-negative integer")]
    InvalidId(String),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

/// Overwrites `target` only when `value` is present and non-empty.
pub(crate) fn assign_non_empty(target: &mut String, value: Option<&str>) {
    if let Some(value) = value.filter(|value| !value.is_empty()) {
        *target = value.to_string();
    }
}
