use chrono::{TimeZone, Utc};
use roster_core::api::classify;
use roster_core::repo::person_repo::{PersonRepository, SqlitePersonRepository};
use roster_core::repo::todo_repo::{SqliteTodoRepository, TodoRepository};
use roster_core::service::todo_service::TodoService;
use roster_core::{
    DbError, EntityKind, IdSelection, NewPerson, NewTodo, PersonId, RepoError, RepoResult,
    ServiceError, Store, Todo, TodoId, TodoPatch, TodoTemplate, ValidationError,
};
use std::cell::Cell;

type Service<'s> = TodoService<SqliteTodoRepository<'s>, SqlitePersonRepository<'s>>;

fn service(store: &Store) -> Service<'_> {
    TodoService::new(
        SqliteTodoRepository::new(store),
        SqlitePersonRepository::new(store),
    )
}

fn add_people(store: &Store, names: &[&str]) {
    let people = SqlitePersonRepository::new(store);
    for name in names {
        people.create_person(&NewPerson::new(*name)).unwrap();
    }
}

#[test]
fn create_and_get_roundtrip() {
    let store = Store::open_in_memory().unwrap();
    add_people(&store, &["owner"]);
    let todos = service(&store);

    let mut template = TodoTemplate::new("renew passport");
    template.category = "errands".to_string();
    let created = todos.create_todo(&template.for_person(1)).unwrap();

    let loaded = todos.get_todo(created.id).unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.subject, "renew passport");
    assert_eq!(loaded.category, "errands");
    assert_eq!(loaded.person, 1);
}

#[test]
fn dated_todo_roundtrips_through_the_store() {
    let store = Store::open_in_memory().unwrap();
    add_people(&store, &["owner"]);
    let todos = service(&store);

    let mut template = TodoTemplate::new("dentist");
    template.date = Some(Utc.with_ymd_and_hms(2015, 6, 30, 14, 15, 0).unwrap());
    let created = todos.create_todo(&template.for_person(1)).unwrap();

    let loaded = todos.get_todo(created.id).unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.date, template.date);
}

#[test]
fn create_for_unknown_person_is_missing_reference() {
    let store = Store::open_in_memory().unwrap();
    let todos = service(&store);

    let err = todos
        .create_todo(&TodoTemplate::new("nobody").for_person(3))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::MissingReference {
            entity: EntityKind::Person,
            id: 3
        }
    ));
    assert!(todos.list_todos(&IdSelection::All).unwrap().is_empty());
}

#[test]
fn create_without_person_is_a_validation_error() {
    let store = Store::open_in_memory().unwrap();
    let err = service(&store)
        .create_todo(&TodoTemplate::new("unowned").for_person(0))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::MissingField("person"))
    ));
}

#[test]
fn add_to_all_creates_one_todo_per_person() {
    let store = Store::open_in_memory().unwrap();
    add_people(&store, &["a", "b", "c"]);
    let todos = service(&store);

    let created = todos
        .create_todo_for_all(&TodoTemplate::new("standup"))
        .unwrap();

    assert_eq!(
        created.iter().map(|todo| todo.person).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(created.iter().all(|todo| todo.subject == "standup"));
    assert_eq!(todos.list_todos(&IdSelection::All).unwrap().len(), 3);
}

#[test]
fn add_to_all_with_no_people_creates_nothing() {
    let store = Store::open_in_memory().unwrap();
    let created = service(&store)
        .create_todo_for_all(&TodoTemplate::new("standup"))
        .unwrap();
    assert!(created.is_empty());
}

#[test]
fn patch_overwrites_only_non_empty_fields() {
    let store = Store::open_in_memory().unwrap();
    add_people(&store, &["owner"]);
    let todos = service(&store);
    let mut template = TodoTemplate::new("draft");
    template.category = "home".to_string();
    let created = todos.create_todo(&template.for_person(1)).unwrap();

    let updated = todos
        .update_todo(
            created.id,
            &TodoPatch {
                subject: Some("final".to_string()),
                category: Some(String::new()),
                ..TodoPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.subject, "final");
    assert_eq!(updated.category, "home");
}

#[test]
fn update_and_delete_of_missing_todo_are_not_found() {
    let store = Store::open_in_memory().unwrap();
    let todos = service(&store);

    assert!(matches!(
        todos.update_todo(4, &TodoPatch::default()),
        Err(ServiceError::NotFound {
            entity: EntityKind::Todo,
            id: 4
        })
    ));
    assert!(matches!(
        todos.delete_todo(4),
        Err(ServiceError::NotFound { id: 4, .. })
    ));
    assert!(todos.list_todos(&IdSelection::All).unwrap().is_empty());
}

#[test]
fn repository_lists_todos_for_one_person() {
    let store = Store::open_in_memory().unwrap();
    add_people(&store, &["a", "b"]);
    let repo = SqliteTodoRepository::new(&store);
    repo.create_todo(&TodoTemplate::new("x").for_person(1)).unwrap();
    repo.create_todo(&TodoTemplate::new("y").for_person(2)).unwrap();
    repo.create_todo(&TodoTemplate::new("z").for_person(1)).unwrap();

    let owned = repo.list_todos_for_person(1).unwrap();
    assert_eq!(owned.iter().map(|todo| todo.id).collect::<Vec<_>>(), vec![1, 3]);
}

/// Delegates to SQLite but fails the `fail_on`-th insert.
struct FailingNthInsert<'s> {
    inner: SqliteTodoRepository<'s>,
    inserts: Cell<usize>,
    fail_on: usize,
}

impl TodoRepository for FailingNthInsert<'_> {
    fn create_todo(&self, todo: &NewTodo) -> RepoResult<Todo> {
        let attempt = self.inserts.get() + 1;
        self.inserts.set(attempt);
        if attempt == self.fail_on {
            return Err(RepoError::Db(DbError::Poisoned));
        }
        self.inner.create_todo(todo)
    }

    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        self.inner.get_todo(id)
    }

    fn list_todos(&self) -> RepoResult<Vec<Todo>> {
        self.inner.list_todos()
    }

    fn list_todos_for_person(&self, person: PersonId) -> RepoResult<Vec<Todo>> {
        self.inner.list_todos_for_person(person)
    }

    fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> RepoResult<Todo> {
        self.inner.update_todo(id, patch)
    }

    fn delete_todo(&self, id: TodoId) -> RepoResult<()> {
        self.inner.delete_todo(id)
    }
}

#[test]
fn add_to_all_failure_keeps_earlier_rows_and_reports_count() {
    let store = Store::open_in_memory().unwrap();
    add_people(&store, &["a", "b", "c", "d"]);
    let todos = TodoService::new(
        FailingNthInsert {
            inner: SqliteTodoRepository::new(&store),
            inserts: Cell::new(0),
            fail_on: 3,
        },
        SqlitePersonRepository::new(&store),
    );

    let err = todos
        .create_todo_for_all(&TodoTemplate::new("standup"))
        .unwrap_err();

    match &err {
        ServiceError::PartialBulkInsert { committed, source } => {
            assert_eq!(*committed, 2);
            assert!(matches!(**source, ServiceError::Store(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(classify(&err), (500, "store_error"));

    let persisted = SqliteTodoRepository::new(&store).list_todos().unwrap();
    assert_eq!(
        persisted.iter().map(|todo| todo.person).collect::<Vec<_>>(),
        vec![1, 2]
    );
}
