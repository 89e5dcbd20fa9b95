//! Note wire shapes.

use super::{non_empty, normalize_date, positive_id};
use crate::model::note::{NewNote, Note, NoteId, NotePatch};
use crate::model::person::PersonId;
use crate::model::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteView {
    pub id: NoteId,
    pub date: Option<DateTime<Utc>>,
    pub text: String,
    pub category: String,
    pub person: PersonId,
}

impl From<&Note> for NoteView {
    fn from(value: &Note) -> Self {
        Self {
            id: value.id,
            date: value.date,
            text: value.text.clone(),
            category: value.category.clone(),
            person: value.person,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEnvelope {
    pub note: NoteView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesEnvelope {
    pub notes: Vec<NoteView>,
}

impl NoteEnvelope {
    pub fn new(note: &Note) -> Self {
        Self { note: note.into() }
    }
}

impl NotesEnvelope {
    pub fn new(notes: &[Note]) -> Self {
        Self {
            notes: notes.iter().map(NoteView::from).collect(),
        }
    }
}

/// Incoming note payload for create and update.
///
/// Clients echo back whole records, so an `id` field may be present; it is
/// ignored in favor of the id the caller routes on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NoteInput {
    pub date: Option<DateTime<Utc>>,
    pub text: Option<String>,
    pub category: Option<String>,
    pub person: Option<PersonId>,
}

impl NoteInput {
    pub fn into_new_note(self) -> Result<NewNote, ValidationError> {
        let person = positive_id(self.person).ok_or(ValidationError::MissingField("person"))?;
        Ok(NewNote {
            date: normalize_date(self.date),
            text: self.text.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            person,
        })
    }

    pub fn into_patch(self) -> NotePatch {
        NotePatch {
            date: normalize_date(self.date),
            text: non_empty(self.text),
            category: non_empty(self.category),
            person: positive_id(self.person),
        }
    }
}
