//! Person use-case service.
//!
//! # Responsibility
//! - Create and read people, always returning them with relations attached.
//!
//! # Invariants
//! - People have no updatable fields; `update_person` only proves existence.
//! - There is no delete operation: what happens to owned notes/todos has not
//!   been decided, and the schema refuses to orphan them.

use crate::model::person::{NewPerson, PersonId, PersonWithRelations};
use crate::model::EntityKind;
use crate::repo::note_repo::NoteRepository;
use crate::repo::person_repo::PersonRepository;
use crate::repo::todo_repo::TodoRepository;
use crate::service::bulk::{resolve, IdSelection};
use crate::service::relations::load_relations;
use crate::service::{ServiceError, ServiceResult};
use log::{debug, info};

pub struct PersonService<P, N, T> {
    people: P,
    notes: N,
    todos: T,
}

impl<P, N, T> PersonService<P, N, T>
where
    P: PersonRepository,
    N: NoteRepository,
    T: TodoRepository,
{
    pub fn new(people: P, notes: N, todos: T) -> Self {
        Self {
            people,
            notes,
            todos,
        }
    }

    /// Lists the selected people (or all of them) with relations attached.
    pub fn list_people(&self, selection: &IdSelection) -> ServiceResult<Vec<PersonWithRelations>> {
        debug!("event=people_list module=service status=start selection={selection:?}");
        resolve(
            selection,
            |id| self.get_person(id),
            || -> ServiceResult<Vec<PersonWithRelations>> {
                let people = self.people.list_people()?;
                people
                    .into_iter()
                    .map(|person| {
                        load_relations(&self.notes, &self.todos, person).map_err(ServiceError::from)
                    })
                    .collect()
            },
        )
    }

    pub fn get_person(&self, id: PersonId) -> ServiceResult<PersonWithRelations> {
        let person = self
            .people
            .get_person(id)?
            .ok_or(ServiceError::not_found(EntityKind::Person, id))?;
        Ok(load_relations(&self.notes, &self.todos, person)?)
    }

    /// Creates a person; a duplicate name is a `Conflict`.
    pub fn create_person(&self, name: impl Into<String>) -> ServiceResult<PersonWithRelations> {
        let person = self.people.create_person(&NewPerson::new(name))?;
        info!(
            "event=person_create module=service status=ok person_id={}",
            person.id
        );
        Ok(load_relations(&self.notes, &self.todos, person)?)
    }

    /// Returns the stored person unchanged; no person field is updatable.
    pub fn update_person(&self, id: PersonId) -> ServiceResult<PersonWithRelations> {
        debug!("event=person_update module=service status=noop person_id={id}");
        self.get_person(id)
    }
}
