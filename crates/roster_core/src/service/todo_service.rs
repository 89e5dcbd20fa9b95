//! Todo use-case service.
//!
//! # Responsibility
//! - Single-owner todo CRUD with sparse-patch updates.
//! - The add-to-everyone variant of todo creation.
//!
//! # Invariants
//! - `create_todo_for_all` is NOT atomic: each row commits on its own, and a
//!   failure part way leaves earlier rows in place and reports how many.
//! - The person list is read once up front; people created while the loop
//!   runs do not receive the todo.

use crate::model::todo::{NewTodo, Todo, TodoId, TodoPatch, TodoTemplate};
use crate::model::EntityKind;
use crate::repo::person_repo::PersonRepository;
use crate::repo::todo_repo::TodoRepository;
use crate::service::bulk::{resolve, IdSelection};
use crate::service::{ServiceError, ServiceResult};
use log::{info, warn};

pub struct TodoService<T, P> {
    todos: T,
    people: P,
}

impl<T, P> TodoService<T, P>
where
    T: TodoRepository,
    P: PersonRepository,
{
    pub fn new(todos: T, people: P) -> Self {
        Self { todos, people }
    }

    pub fn list_todos(&self, selection: &IdSelection) -> ServiceResult<Vec<Todo>> {
        resolve(
            selection,
            |id| self.get_todo(id),
            || self.todos.list_todos().map_err(ServiceError::from),
        )
    }

    pub fn get_todo(&self, id: TodoId) -> ServiceResult<Todo> {
        self.todos
            .get_todo(id)?
            .ok_or(ServiceError::not_found(EntityKind::Todo, id))
    }

    pub fn create_todo(&self, todo: &NewTodo) -> ServiceResult<Todo> {
        let created = self.todos.create_todo(todo)?;
        info!(
            "event=todo_create module=service status=ok todo_id={} person_id={}",
            created.id, created.person
        );
        Ok(created)
    }

    /// Creates one todo per existing person from the same template.
    pub fn create_todo_for_all(&self, template: &TodoTemplate) -> ServiceResult<Vec<Todo>> {
        let people = self.people.list_people()?;
        let mut created = Vec::with_capacity(people.len());

        for person in &people {
            match self.todos.create_todo(&template.for_person(person.id)) {
                Ok(todo) => created.push(todo),
                Err(err) => {
                    warn!(
                        "event=todo_create_all module=service status=error committed={} failed_person_id={}",
                        created.len(),
                        person.id
                    );
                    return Err(ServiceError::PartialBulkInsert {
                        committed: created.len(),
                        source: Box::new(err.into()),
                    });
                }
            }
        }

        info!(
            "event=todo_create_all module=service status=ok created={}",
            created.len()
        );
        Ok(created)
    }

    pub fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> ServiceResult<Todo> {
        let updated = self.todos.update_todo(id, patch)?;
        info!("event=todo_update module=service status=ok todo_id={id}");
        Ok(updated)
    }

    pub fn delete_todo(&self, id: TodoId) -> ServiceResult<()> {
        self.todos.delete_todo(id)?;
        info!("event=todo_delete module=service status=ok todo_id={id}");
        Ok(())
    }
}
