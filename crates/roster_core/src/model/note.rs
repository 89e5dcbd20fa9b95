//! Note records, create-records and sparse patches.

use super::person::PersonId;
use super::{assign_non_empty, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type NoteId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// `None` when the client never supplied a date.
    pub date: Option<DateTime<Utc>>,
    /// Free-form, may be empty.
    pub text: String,
    pub category: String,
    /// Owning person; always references an existing row at write time.
    pub person: PersonId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub date: Option<DateTime<Utc>>,
    pub text: String,
    pub category: String,
    pub person: PersonId,
}

impl NewNote {
    pub fn new(person: PersonId, text: impl Into<String>) -> Self {
        Self {
            date: None,
            text: text.into(),
            category: String::new(),
            person,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.person <= 0 {
            return Err(ValidationError::MissingField("person"));
        }
        Ok(())
    }

    pub fn into_note(self, id: NoteId) -> Note {
        Note {
            id,
            date: self.date,
            text: self.text,
            category: self.category,
            person: self.person,
        }
    }
}

/// Sparse update for a note.
///
/// `None` and empty strings both mean "leave unchanged"; a patch cannot clear
/// `text` or `category`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub date: Option<DateTime<Utc>>,
    pub text: Option<String>,
    pub category: Option<String>,
    pub person: Option<PersonId>,
}

impl NotePatch {
    /// Returns the owner this patch moves the note to, if any.
    pub fn new_owner(&self) -> Option<PersonId> {
        self.person.filter(|id| *id > 0)
    }

    pub fn apply_to(&self, note: &mut Note) {
        if let Some(date) = self.date {
            note.date = Some(date);
        }
        assign_non_empty(&mut note.text, self.text.as_deref());
        assign_non_empty(&mut note.category, self.category.as_deref());
        if let Some(person) = self.new_owner() {
            note.person = person;
        }
    }
}
