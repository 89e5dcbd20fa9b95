//! Note use-case service.
//!
//! # Invariants
//! - `update_note` uses sparse-patch semantics; it never clears a field.
//! - Missing owners surface as `MissingReference`, missing notes as `NotFound`.

use crate::model::note::{NewNote, Note, NoteId, NotePatch};
use crate::model::EntityKind;
use crate::repo::note_repo::NoteRepository;
use crate::service::bulk::{resolve, IdSelection};
use crate::service::{ServiceError, ServiceResult};
use log::info;

pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_notes(&self, selection: &IdSelection) -> ServiceResult<Vec<Note>> {
        resolve(
            selection,
            |id| self.get_note(id),
            || self.repo.list_notes().map_err(ServiceError::from),
        )
    }

    pub fn get_note(&self, id: NoteId) -> ServiceResult<Note> {
        self.repo
            .get_note(id)?
            .ok_or(ServiceError::not_found(EntityKind::Note, id))
    }

    pub fn create_note(&self, note: &NewNote) -> ServiceResult<Note> {
        let created = self.repo.create_note(note)?;
        info!(
            "event=note_create module=service status=ok note_id={} person_id={}",
            created.id, created.person
        );
        Ok(created)
    }

    pub fn update_note(&self, id: NoteId, patch: &NotePatch) -> ServiceResult<Note> {
        let updated = self.repo.update_note(id, patch)?;
        info!("event=note_update module=service status=ok note_id={id}");
        Ok(updated)
    }

    pub fn delete_note(&self, id: NoteId) -> ServiceResult<()> {
        self.repo.delete_note(id)?;
        info!("event=note_delete module=service status=ok note_id={id}");
        Ok(())
    }
}
