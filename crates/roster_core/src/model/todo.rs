//! Todo records, create-records and sparse patches.

use super::person::PersonId;
use super::{assign_non_empty, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type TodoId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub subject: String,
    pub date: Option<DateTime<Utc>>,
    pub category: String,
    pub person: PersonId,
}

/// Todo fields shared by every row a create request produces.
///
/// A single-owner create pairs this with one person id; the add-to-all
/// variant stamps it onto every existing person.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoTemplate {
    pub subject: String,
    pub date: Option<DateTime<Utc>>,
    pub category: String,
}

impl TodoTemplate {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Self::default()
        }
    }

    pub fn for_person(&self, person: PersonId) -> NewTodo {
        NewTodo {
            subject: self.subject.clone(),
            date: self.date,
            category: self.category.clone(),
            person,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub subject: String,
    pub date: Option<DateTime<Utc>>,
    pub category: String,
    pub person: PersonId,
}

impl NewTodo {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.person <= 0 {
            return Err(ValidationError::MissingField("person"));
        }
        Ok(())
    }

    pub fn into_todo(self, id: TodoId) -> Todo {
        Todo {
            id,
            subject: self.subject,
            date: self.date,
            category: self.category,
            person: self.person,
        }
    }
}

/// Sparse update for a todo; same "empty means unchanged" rule as notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub subject: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub person: Option<PersonId>,
}

impl TodoPatch {
    pub fn new_owner(&self) -> Option<PersonId> {
        self.person.filter(|id| *id > 0)
    }

    pub fn apply_to(&self, todo: &mut Todo) {
        assign_non_empty(&mut todo.subject, self.subject.as_deref());
        if let Some(date) = self.date {
            todo.date = Some(date);
        }
        assign_non_empty(&mut todo.category, self.category.as_deref());
        if let Some(person) = self.new_owner() {
            todo.person = person;
        }
    }
}
