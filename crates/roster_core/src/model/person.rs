//! Person records and their relationship view.

use super::note::{Note, NoteId};
use super::todo::{Todo, TodoId};
use super::ValidationError;
use serde::{Deserialize, Serialize};

pub type PersonId = i64;

/// Upper bound for `Person::name`, matching the column size the schema was
/// designed around.
pub const PERSON_NAME_MAX_CHARS: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    /// Unique across all people; enforced by the store.
    pub name: String,
}

/// Create-record for a person; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
}

impl NewPerson {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.name.chars().count() > PERSON_NAME_MAX_CHARS {
            return Err(ValidationError::TooLong {
                field: "name",
                max: PERSON_NAME_MAX_CHARS,
            });
        }
        Ok(())
    }

    pub fn into_person(self, id: PersonId) -> Person {
        Person {
            id,
            name: self.name,
        }
    }
}

/// A person with every note and todo it owns attached.
///
/// Relation order follows store iteration order and is not a contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonWithRelations {
    pub person: Person,
    pub notes: Vec<Note>,
    pub todos: Vec<Todo>,
}

impl PersonWithRelations {
    pub fn note_ids(&self) -> Vec<NoteId> {
        self.notes.iter().map(|note| note.id).collect()
    }

    pub fn todo_ids(&self) -> Vec<TodoId> {
        self.todos.iter().map(|todo| todo.id).collect()
    }
}
