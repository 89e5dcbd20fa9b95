//! Person wire shapes.

use crate::model::note::NoteId;
use crate::model::person::{NewPerson, PersonId, PersonWithRelations};
use crate::model::todo::TodoId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonView {
    pub id: PersonId,
    pub name: String,
    pub notes: Vec<NoteId>,
    pub todos: Vec<TodoId>,
}

impl From<&PersonWithRelations> for PersonView {
    fn from(value: &PersonWithRelations) -> Self {
        Self {
            id: value.person.id,
            name: value.person.name.clone(),
            notes: value.note_ids(),
            todos: value.todo_ids(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonEnvelope {
    pub person: PersonView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeopleEnvelope {
    pub people: Vec<PersonView>,
}

impl PersonEnvelope {
    pub fn new(person: &PersonWithRelations) -> Self {
        Self {
            person: person.into(),
        }
    }
}

impl PeopleEnvelope {
    pub fn new(people: &[PersonWithRelations]) -> Self {
        Self {
            people: people.iter().map(PersonView::from).collect(),
        }
    }
}

/// Incoming person payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PersonInput {
    pub name: Option<String>,
}

impl PersonInput {
    pub fn into_new_person(self) -> NewPerson {
        NewPerson::new(self.name.unwrap_or_default())
    }
}
