//! Todo repository contract and SQLite implementation.
//!
//! # Invariants
//! - Same owner and delete rules as notes.
//! - One `create_todo` call inserts exactly one row in its own transaction;
//!   multi-owner creation is a service-level loop, not a batch.

use crate::db::Store;
use crate::model::person::PersonId;
use crate::model::todo::{NewTodo, Todo, TodoId, TodoPatch};
use crate::model::EntityKind;
use crate::repo::person_repo::require_owner;
use crate::repo::{RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, Row};

const TODO_SELECT_SQL: &str = "SELECT
    id,
    subject,
    date,
    category,
    person_id
FROM todos";

/// Repository interface for todo persistence.
pub trait TodoRepository {
    fn create_todo(&self, todo: &NewTodo) -> RepoResult<Todo>;
    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>>;
    fn list_todos(&self) -> RepoResult<Vec<Todo>>;
    fn list_todos_for_person(&self, person: PersonId) -> RepoResult<Vec<Todo>>;
    fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> RepoResult<Todo>;
    fn delete_todo(&self, id: TodoId) -> RepoResult<()>;
}

/// SQLite-backed todo repository.
#[derive(Clone, Copy)]
pub struct SqliteTodoRepository<'store> {
    store: &'store Store,
}

impl<'store> SqliteTodoRepository<'store> {
    pub fn new(store: &'store Store) -> Self {
        Self { store }
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn create_todo(&self, todo: &NewTodo) -> RepoResult<Todo> {
        todo.validate()?;

        let id = self.store.write(|tx| -> RepoResult<TodoId> {
            require_owner(tx, todo.person)?;
            tx.execute(
                "INSERT INTO todos (subject, date, category, person_id)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    todo.subject.as_str(),
                    todo.date,
                    todo.category.as_str(),
                    todo.person
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })?;

        debug!(
            "event=todo_insert module=repo status=ok todo_id={id} person_id={}",
            todo.person
        );
        Ok(todo.clone().into_todo(id))
    }

    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        self.store.read(|conn| fetch_todo(conn, id))
    }

    fn list_todos(&self) -> RepoResult<Vec<Todo>> {
        self.store.read(|conn| {
            query_todos(conn, &format!("{TODO_SELECT_SQL} ORDER BY id ASC;"), [])
        })
    }

    fn list_todos_for_person(&self, person: PersonId) -> RepoResult<Vec<Todo>> {
        self.store.read(|conn| {
            query_todos(
                conn,
                &format!("{TODO_SELECT_SQL} WHERE person_id = ?1 ORDER BY id ASC;"),
                [person],
            )
        })
    }

    fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> RepoResult<Todo> {
        let todo = self.store.write(|tx| -> RepoResult<Todo> {
            let mut todo = fetch_todo(tx, id)?.ok_or(RepoError::NotFound {
                entity: EntityKind::Todo,
                id,
            })?;
            if let Some(owner) = patch.new_owner() {
                require_owner(tx, owner)?;
            }

            patch.apply_to(&mut todo);
            tx.execute(
                "UPDATE todos
                 SET
                    subject = ?1,
                    date = ?2,
                    category = ?3,
                    person_id = ?4
                 WHERE id = ?5;",
                params![
                    todo.subject.as_str(),
                    todo.date,
                    todo.category.as_str(),
                    todo.person,
                    todo.id
                ],
            )?;
            Ok(todo)
        })?;

        debug!("event=todo_update module=repo status=ok todo_id={id}");
        Ok(todo)
    }

    fn delete_todo(&self, id: TodoId) -> RepoResult<()> {
        let changed = self.store.write(|tx| -> RepoResult<usize> {
            Ok(tx.execute("DELETE FROM todos WHERE id = ?1;", [id])?)
        })?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Todo,
                id,
            });
        }

        debug!("event=todo_delete module=repo status=ok todo_id={id}");
        Ok(())
    }
}

fn fetch_todo(conn: &Connection, id: TodoId) -> RepoResult<Option<Todo>> {
    let mut stmt = conn.prepare(&format!("{TODO_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_todo_row(row)?));
    }
    Ok(None)
}

fn query_todos<P: rusqlite::Params>(conn: &Connection, sql: &str, params: P) -> RepoResult<Vec<Todo>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut todos = Vec::new();
    while let Some(row) = rows.next()? {
        todos.push(parse_todo_row(row)?);
    }
    Ok(todos)
}

fn parse_todo_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get("id")?,
        subject: row.get("subject")?,
        date: row.get("date")?,
        category: row.get("category")?,
        person: row.get("person_id")?,
    })
}
