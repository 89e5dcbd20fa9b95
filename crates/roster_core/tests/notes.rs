use chrono::{TimeZone, Utc};
use roster_core::repo::note_repo::{NoteRepository, SqliteNoteRepository};
use roster_core::repo::person_repo::{PersonRepository, SqlitePersonRepository};
use roster_core::service::note_service::NoteService;
use roster_core::{
    EntityKind, IdSelection, NewNote, NewPerson, NotePatch, RepoError, ServiceError, Store,
};

fn seeded_store(names: &[&str]) -> Store {
    let store = Store::open_in_memory().unwrap();
    let people = SqlitePersonRepository::new(&store);
    for name in names {
        people.create_person(&NewPerson::new(*name)).unwrap();
    }
    store
}

#[test]
fn create_and_get_roundtrip_keeps_every_field() {
    let store = seeded_store(&["owner"]);
    let repo = SqliteNoteRepository::new(&store);

    let mut note = NewNote::new(1, "call back");
    note.category = "work".to_string();
    note.date = Some(Utc.with_ymd_and_hms(2014, 3, 2, 9, 30, 0).unwrap());
    let created = repo.create_note(&note).unwrap();

    let loaded = repo.get_note(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.text, "call back");
    assert_eq!(loaded.category, "work");
    assert_eq!(loaded.date, note.date);
    assert_eq!(loaded.person, 1);
}

#[test]
fn unset_date_roundtrips_as_none() {
    let store = seeded_store(&["owner"]);
    let repo = SqliteNoteRepository::new(&store);
    let created = repo.create_note(&NewNote::new(1, "undated")).unwrap();
    assert_eq!(repo.get_note(created.id).unwrap().unwrap().date, None);
}

#[test]
fn create_with_unknown_person_persists_nothing() {
    let store = seeded_store(&[]);
    let repo = SqliteNoteRepository::new(&store);

    let err = repo.create_note(&NewNote::new(5, "orphan")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::MissingReference {
            entity: EntityKind::Person,
            id: 5
        }
    ));
    assert!(repo.list_notes().unwrap().is_empty());
}

#[test]
fn patch_with_empty_text_keeps_text_and_sets_category() {
    let store = seeded_store(&["owner"]);
    let repo = SqliteNoteRepository::new(&store);
    let mut note = NewNote::new(1, "keep me");
    note.category = "old".to_string();
    let created = repo.create_note(&note).unwrap();

    let patch = NotePatch {
        text: Some(String::new()),
        category: Some("new".to_string()),
        ..NotePatch::default()
    };
    let updated = repo.update_note(created.id, &patch).unwrap();

    assert_eq!(updated.text, "keep me");
    assert_eq!(updated.category, "new");
    assert_eq!(repo.get_note(created.id).unwrap().unwrap(), updated);
}

#[test]
fn patch_can_move_note_to_existing_person_only() {
    let store = seeded_store(&["first", "second"]);
    let repo = SqliteNoteRepository::new(&store);
    let created = repo.create_note(&NewNote::new(1, "movable")).unwrap();

    let moved = repo
        .update_note(
            created.id,
            &NotePatch {
                person: Some(2),
                ..NotePatch::default()
            },
        )
        .unwrap();
    assert_eq!(moved.person, 2);

    let err = repo
        .update_note(
            created.id,
            &NotePatch {
                person: Some(9),
                text: Some("lost".to_string()),
                ..NotePatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::MissingReference { id: 9, .. }));

    let unchanged = repo.get_note(created.id).unwrap().unwrap();
    assert_eq!(unchanged.person, 2);
    assert_eq!(unchanged.text, "movable");
}

#[test]
fn update_of_missing_note_never_creates_one() {
    let store = seeded_store(&["owner"]);
    let service = NoteService::new(SqliteNoteRepository::new(&store));

    let patch = NotePatch {
        text: Some("ghost".to_string()),
        ..NotePatch::default()
    };
    let err = service.update_note(77, &patch).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            entity: EntityKind::Note,
            id: 77
        }
    ));
    assert!(service.list_notes(&IdSelection::All).unwrap().is_empty());
}

#[test]
fn delete_removes_once_then_reports_not_found() {
    let store = seeded_store(&["owner"]);
    let service = NoteService::new(SqliteNoteRepository::new(&store));
    let created = service.create_note(&NewNote::new(1, "short lived")).unwrap();

    service.delete_note(created.id).unwrap();
    assert!(matches!(
        service.get_note(created.id),
        Err(ServiceError::NotFound { .. })
    ));
    assert!(matches!(
        service.delete_note(created.id),
        Err(ServiceError::NotFound { .. })
    ));
}

#[test]
fn list_selection_is_exact_and_all_or_nothing() {
    let store = seeded_store(&["owner"]);
    let service = NoteService::new(SqliteNoteRepository::new(&store));
    for text in ["one", "two", "three"] {
        service.create_note(&NewNote::new(1, text)).unwrap();
    }

    let picked = service
        .list_notes(&IdSelection::parse(&["1", "2"]).unwrap())
        .unwrap();
    let mut ids: Vec<_> = picked.iter().map(|note| note.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2]);

    let all = service.list_notes(&IdSelection::parse::<&str>(&[]).unwrap()).unwrap();
    assert_eq!(all.len(), 3);

    let err = service
        .list_notes(&IdSelection::from_ids([1, 2, 99]))
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { id: 99, .. }));
}
