//! Person repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Insert and read rows of the `people` table.
//! - Provide the owner lookup that note/todo writes use for referential checks.
//!
//! # Invariants
//! - `name` uniqueness violations surface as `RepoError::Conflict`.
//! - People are never deleted through core.

use crate::db::Store;
use crate::model::person::{NewPerson, Person, PersonId};
use crate::model::EntityKind;
use crate::repo::{classify_write_error, RepoError, RepoResult};
use log::debug;
use rusqlite::{Connection, Row};

const PERSON_SELECT_SQL: &str = "SELECT id, name FROM people";

/// Repository interface for person persistence.
pub trait PersonRepository {
    /// Inserts one person and returns it with the store-assigned id.
    fn create_person(&self, person: &NewPerson) -> RepoResult<Person>;
    /// Gets one person by id.
    fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>>;
    /// Returns every person ordered by id.
    fn list_people(&self) -> RepoResult<Vec<Person>>;
}

/// SQLite-backed person repository.
#[derive(Clone, Copy)]
pub struct SqlitePersonRepository<'store> {
    store: &'store Store,
}

impl<'store> SqlitePersonRepository<'store> {
    pub fn new(store: &'store Store) -> Self {
        Self { store }
    }
}

impl PersonRepository for SqlitePersonRepository<'_> {
    fn create_person(&self, person: &NewPerson) -> RepoResult<Person> {
        person.validate()?;

        let id = self.store.write(|tx| -> RepoResult<PersonId> {
            tx.execute("INSERT INTO people (name) VALUES (?1);", [person.name.as_str()])
                .map_err(|err| classify_write_error(err, EntityKind::Person))?;
            Ok(tx.last_insert_rowid())
        })?;

        debug!("event=person_insert module=repo status=ok person_id={id}");
        Ok(person.clone().into_person(id))
    }

    fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>> {
        self.store.read(|conn| fetch_person(conn, id))
    }

    fn list_people(&self) -> RepoResult<Vec<Person>> {
        self.store.read(|conn| -> RepoResult<Vec<Person>> {
            let mut stmt = conn.prepare(&format!("{PERSON_SELECT_SQL} ORDER BY id ASC;"))?;
            let mut rows = stmt.query([])?;
            let mut people = Vec::new();
            while let Some(row) = rows.next()? {
                people.push(parse_person_row(row)?);
            }
            Ok(people)
        })
    }
}

/// Reads one person on an already-held connection or transaction.
pub(crate) fn fetch_person(conn: &Connection, id: PersonId) -> RepoResult<Option<Person>> {
    let mut stmt = conn.prepare(&format!("{PERSON_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_person_row(row)?));
    }
    Ok(None)
}

/// Resolves the owning person of a note/todo write.
///
/// A missing owner is a `MissingReference`, never a `NotFound` on the entity
/// being written.
pub(crate) fn require_owner(conn: &Connection, id: PersonId) -> RepoResult<Person> {
    fetch_person(conn, id)?.ok_or(RepoError::MissingReference {
        entity: EntityKind::Person,
        id,
    })
}

fn parse_person_row(row: &Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}
