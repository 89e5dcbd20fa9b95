//! Transport boundary: raw inputs in, status code plus JSON body out.
//!
//! # Responsibility
//! - Parse path ids, id tokens and JSON bodies.
//! - Call the typed services and wrap results in envelopes.
//! - Map every `ServiceError` to exactly one status and error code.
//!
//! # Invariants
//! - Invalid input is rejected before any store access.
//! - Error bodies are always `{"error": {"code", "message"}}`.

use crate::db::Store;
use crate::model::note::NoteId;
use crate::model::todo::TodoId;
use crate::repo::note_repo::SqliteNoteRepository;
use crate::repo::person_repo::SqlitePersonRepository;
use crate::repo::todo_repo::SqliteTodoRepository;
use crate::service::bulk::{self, IdSelection};
use crate::service::note_service::NoteService;
use crate::service::person_service::PersonService;
use crate::service::todo_service::TodoService;
use crate::service::{ServiceError, ServiceResult};
use crate::wire::decode_body;
use crate::wire::note::{NoteEnvelope, NoteInput, NotesEnvelope};
use crate::wire::person::{PeopleEnvelope, PersonEnvelope, PersonInput};
use crate::wire::todo::{TodoEnvelope, TodoInput, TodosEnvelope};
use serde::Serialize;
use serde_json::{json, Value};

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;
pub const STATUS_NO_CONTENT: u16 = 204;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Status code and JSON body produced by one handler call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Error code from an error body, if this is one.
    pub fn error_code(&self) -> Option<&str> {
        self.body.get("error")?.get("code")?.as_str()
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum CreatedTodos {
    One(TodoEnvelope),
    All(TodosEnvelope),
}

type People<'store> = PersonService<
    SqlitePersonRepository<'store>,
    SqliteNoteRepository<'store>,
    SqliteTodoRepository<'store>,
>;

/// Handler set bound to one store.
pub struct Api<'store> {
    people: People<'store>,
    notes: NoteService<SqliteNoteRepository<'store>>,
    todos: TodoService<SqliteTodoRepository<'store>, SqlitePersonRepository<'store>>,
}

impl<'store> Api<'store> {
    pub fn new(store: &'store Store) -> Self {
        let people = SqlitePersonRepository::new(store);
        let notes = SqliteNoteRepository::new(store);
        let todos = SqliteTodoRepository::new(store);
        Self {
            people: PersonService::new(people, notes, todos),
            notes: NoteService::new(notes),
            todos: TodoService::new(todos, people),
        }
    }

    pub fn list_people<S: AsRef<str>>(&self, ids: &[S]) -> ApiResponse {
        handle("list_people", STATUS_OK, || {
            let selection = IdSelection::parse(ids)?;
            let people = self.people.list_people(&selection)?;
            Ok(PeopleEnvelope::new(&people))
        })
    }

    pub fn get_person(&self, id: &str) -> ApiResponse {
        handle("get_person", STATUS_OK, || {
            let person = self.people.get_person(parse_path_id(id)?)?;
            Ok(PersonEnvelope::new(&person))
        })
    }

    pub fn create_person(&self, body: &str) -> ApiResponse {
        handle("create_person", STATUS_CREATED, || {
            let input: PersonInput = decode_body(body, "person")?;
            let person = self.people.create_person(input.into_new_person().name)?;
            Ok(PersonEnvelope::new(&person))
        })
    }

    /// Person updates are accepted and ignored; the current record is returned.
    ///
    /// The body must still be well-formed JSON.
    pub fn update_person(&self, id: &str, body: &str) -> ApiResponse {
        handle("update_person", STATUS_OK, || {
            let id = parse_path_id(id)?;
            let _: PersonInput = decode_body(body, "person")?;
            let person = self.people.update_person(id)?;
            Ok(PersonEnvelope::new(&person))
        })
    }

    pub fn list_notes<S: AsRef<str>>(&self, ids: &[S]) -> ApiResponse {
        handle("list_notes", STATUS_OK, || {
            let selection = IdSelection::parse(ids)?;
            let notes = self.notes.list_notes(&selection)?;
            Ok(NotesEnvelope::new(&notes))
        })
    }

    pub fn get_note(&self, id: &str) -> ApiResponse {
        handle("get_note", STATUS_OK, || {
            let note = self.notes.get_note(parse_path_id(id)?)?;
            Ok(NoteEnvelope::new(&note))
        })
    }

    pub fn create_note(&self, body: &str) -> ApiResponse {
        handle("create_note", STATUS_CREATED, || {
            let input: NoteInput = decode_body(body, "note")?;
            let note = self.notes.create_note(&input.into_new_note()?)?;
            Ok(NoteEnvelope::new(&note))
        })
    }

    pub fn update_note(&self, id: &str, body: &str) -> ApiResponse {
        handle("update_note", STATUS_OK, || {
            let id: NoteId = parse_path_id(id)?;
            let input: NoteInput = decode_body(body, "note")?;
            let note = self.notes.update_note(id, &input.into_patch())?;
            Ok(NoteEnvelope::new(&note))
        })
    }

    pub fn delete_note(&self, id: &str) -> ApiResponse {
        handle("delete_note", STATUS_NO_CONTENT, || {
            self.notes.delete_note(parse_path_id(id)?)?;
            Ok(Value::Null)
        })
    }

    pub fn list_todos<S: AsRef<str>>(&self, ids: &[S]) -> ApiResponse {
        handle("list_todos", STATUS_OK, || {
            let selection = IdSelection::parse(ids)?;
            let todos = self.todos.list_todos(&selection)?;
            Ok(TodosEnvelope::new(&todos))
        })
    }

    pub fn get_todo(&self, id: &str) -> ApiResponse {
        handle("get_todo", STATUS_OK, || {
            let todo = self.todos.get_todo(parse_path_id(id)?)?;
            Ok(TodoEnvelope::new(&todo))
        })
    }

    /// Creates one todo, or one per existing person when `add_to_all` is set.
    ///
    /// The fan-out form answers `200` with a `todos` list; the single form
    /// answers `201` with a `todo` envelope.
    pub fn create_todo(&self, body: &str, add_to_all: bool) -> ApiResponse {
        let status = if add_to_all { STATUS_OK } else { STATUS_CREATED };
        handle("create_todo", status, || {
            let input: TodoInput = decode_body(body, "todo")?;
            if add_to_all {
                let todos = self.todos.create_todo_for_all(&input.to_template())?;
                return Ok(CreatedTodos::All(TodosEnvelope::new(&todos)));
            }
            let todo = self.todos.create_todo(&input.into_new_todo()?)?;
            Ok(CreatedTodos::One(TodoEnvelope::new(&todo)))
        })
    }

    pub fn update_todo(&self, id: &str, body: &str) -> ApiResponse {
        handle("update_todo", STATUS_OK, || {
            let id: TodoId = parse_path_id(id)?;
            let input: TodoInput = decode_body(body, "todo")?;
            let todo = self.todos.update_todo(id, &input.into_patch())?;
            Ok(TodoEnvelope::new(&todo))
        })
    }

    pub fn delete_todo(&self, id: &str) -> ApiResponse {
        handle("delete_todo", STATUS_NO_CONTENT, || {
            self.todos.delete_todo(parse_path_id(id)?)?;
            Ok(Value::Null)
        })
    }
}

fn parse_path_id(raw: &str) -> ServiceResult<i64> {
    Ok(bulk::parse_id(raw)?)
}

fn handle<T, F>(operation: &'static str, ok_status: u16, run: F) -> ApiResponse
where
    T: Serialize,
    F: FnOnce() -> ServiceResult<T>,
{
    let outcome = run().and_then(|body| {
        serde_json::to_value(body).map_err(|err| {
            log::error!(
                "event=api_encode module=api status=error operation={} error={}",
                operation,
                err
            );
            ServiceError::Encode(err.to_string())
        })
    });
    match outcome {
        Ok(body) => ApiResponse {
            status: ok_status,
            body,
        },
        Err(err) => error_response(operation, &err),
    }
}

fn error_response(operation: &'static str, err: &ServiceError) -> ApiResponse {
    let (status, code) = classify(err);
    if status >= STATUS_INTERNAL_ERROR {
        log::error!(
            "event=api_call module=api status=error operation={} code={} error={}",
            operation,
            code,
            err
        );
    } else {
        log::debug!(
            "event=api_call module=api status=rejected operation={} code={}",
            operation,
            code
        );
    }
    ApiResponse {
        status,
        body: json!({ "error": { "code": code, "message": err.to_string() } }),
    }
}

/// Status and stable error code for one failure.
pub fn classify(err: &ServiceError) -> (u16, &'static str) {
    match err {
        ServiceError::Validation(_) => (STATUS_BAD_REQUEST, "validation"),
        ServiceError::NotFound { .. } => (STATUS_NOT_FOUND, "not_found"),
        ServiceError::MissingReference { .. } => (STATUS_NOT_FOUND, "missing_reference"),
        ServiceError::Conflict { .. } => (STATUS_INTERNAL_ERROR, "conflict"),
        ServiceError::Store(_) | ServiceError::Encode(_) => (STATUS_INTERNAL_ERROR, "store_error"),
        ServiceError::PartialBulkInsert { source, .. } => classify(source),
    }
}
