//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over the `notes` table plus the by-owner relationship query.
//! - Merge sparse patches onto the stored row inside one transaction.
//!
//! # Invariants
//! - Create and owner-changing updates verify the owning person first.
//! - Delete is a hard delete and touches no other table.

use crate::db::Store;
use crate::model::note::{NewNote, Note, NoteId, NotePatch};
use crate::model::person::PersonId;
use crate::model::EntityKind;
use crate::repo::person_repo::require_owner;
use crate::repo::{RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, Row};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    date,
    text,
    category,
    person_id
FROM notes";

/// Repository interface for note persistence.
pub trait NoteRepository {
    /// Inserts one note after resolving its owner.
    fn create_note(&self, note: &NewNote) -> RepoResult<Note>;
    /// Gets one note by id.
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Returns every note ordered by id.
    fn list_notes(&self) -> RepoResult<Vec<Note>>;
    /// Returns every note owned by `person`.
    fn list_notes_for_person(&self, person: PersonId) -> RepoResult<Vec<Note>>;
    /// Applies a sparse patch and returns the merged note.
    fn update_note(&self, id: NoteId, patch: &NotePatch) -> RepoResult<Note>;
    /// Removes one note.
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
}

/// SQLite-backed note repository.
#[derive(Clone, Copy)]
pub struct SqliteNoteRepository<'store> {
    store: &'store Store,
}

impl<'store> SqliteNoteRepository<'store> {
    pub fn new(store: &'store Store) -> Self {
        Self { store }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, note: &NewNote) -> RepoResult<Note> {
        note.validate()?;

        let id = self.store.write(|tx| -> RepoResult<NoteId> {
            require_owner(tx, note.person)?;
            tx.execute(
                "INSERT INTO notes (date, text, category, person_id)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    note.date,
                    note.text.as_str(),
                    note.category.as_str(),
                    note.person
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })?;

        debug!(
            "event=note_insert module=repo status=ok note_id={id} person_id={}",
            note.person
        );
        Ok(note.clone().into_note(id))
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        self.store.read(|conn| fetch_note(conn, id))
    }

    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        self.store.read(|conn| {
            query_notes(conn, &format!("{NOTE_SELECT_SQL} ORDER BY id ASC;"), [])
        })
    }

    fn list_notes_for_person(&self, person: PersonId) -> RepoResult<Vec<Note>> {
        self.store.read(|conn| {
            query_notes(
                conn,
                &format!("{NOTE_SELECT_SQL} WHERE person_id = ?1 ORDER BY id ASC;"),
                [person],
            )
        })
    }

    fn update_note(&self, id: NoteId, patch: &NotePatch) -> RepoResult<Note> {
        let note = self.store.write(|tx| -> RepoResult<Note> {
            let mut note = fetch_note(tx, id)?.ok_or(RepoError::NotFound {
                entity: EntityKind::Note,
                id,
            })?;
            if let Some(owner) = patch.new_owner() {
                require_owner(tx, owner)?;
            }

            patch.apply_to(&mut note);
            tx.execute(
                "UPDATE notes
                 SET
                    date = ?1,
                    text = ?2,
                    category = ?3,
                    person_id = ?4
                 WHERE id = ?5;",
                params![
                    note.date,
                    note.text.as_str(),
                    note.category.as_str(),
                    note.person,
                    note.id
                ],
            )?;
            Ok(note)
        })?;

        debug!("event=note_update module=repo status=ok note_id={id}");
        Ok(note)
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        let changed = self.store.write(|tx| -> RepoResult<usize> {
            Ok(tx.execute("DELETE FROM notes WHERE id = ?1;", [id])?)
        })?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Note,
                id,
            });
        }

        debug!("event=note_delete module=repo status=ok note_id={id}");
        Ok(())
    }
}

fn fetch_note(conn: &Connection, id: NoteId) -> RepoResult<Option<Note>> {
    let mut stmt = conn.prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_note_row(row)?));
    }
    Ok(None)
}

fn query_notes<P: rusqlite::Params>(conn: &Connection, sql: &str, params: P) -> RepoResult<Vec<Note>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut notes = Vec::new();
    while let Some(row) = rows.next()? {
        notes.push(parse_note_row(row)?);
    }
    Ok(notes)
}

fn parse_note_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get("id")?,
        date: row.get("date")?,
        text: row.get("text")?,
        category: row.get("category")?,
        person: row.get("person_id")?,
    })
}
