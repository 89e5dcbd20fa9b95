//! Person -> notes/todos relationship loading.
//!
//! # Invariants
//! - Both lookups must succeed; a partially populated person is never returned.
//! - Relation order is store iteration order.

use crate::model::person::{Person, PersonWithRelations};
use crate::repo::note_repo::NoteRepository;
use crate::repo::todo_repo::TodoRepository;
use crate::repo::RepoResult;

/// Attaches every note and todo owned by `person`.
pub fn load_relations<N, T>(notes: &N, todos: &T, person: Person) -> RepoResult<PersonWithRelations>
where
    N: NoteRepository,
    T: TodoRepository,
{
    let owned_notes = notes.list_notes_for_person(person.id)?;
    let owned_todos = todos.list_todos_for_person(person.id)?;
    Ok(PersonWithRelations {
        person,
        notes: owned_notes,
        todos: owned_todos,
    })
}
