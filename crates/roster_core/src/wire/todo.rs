//! Todo wire shapes.

use super::{non_empty, normalize_date, positive_id};
use crate::model::person::PersonId;
use crate::model::todo::{NewTodo, Todo, TodoId, TodoPatch, TodoTemplate};
use crate::model::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoView {
    pub id: TodoId,
    pub subject: String,
    pub date: Option<DateTime<Utc>>,
    pub category: String,
    pub person: PersonId,
}

impl From<&Todo> for TodoView {
    fn from(value: &Todo) -> Self {
        Self {
            id: value.id,
            subject: value.subject.clone(),
            date: value.date,
            category: value.category.clone(),
            person: value.person,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoEnvelope {
    pub todo: TodoView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodosEnvelope {
    pub todos: Vec<TodoView>,
}

impl TodoEnvelope {
    pub fn new(todo: &Todo) -> Self {
        Self { todo: todo.into() }
    }
}

impl TodosEnvelope {
    pub fn new(todos: &[Todo]) -> Self {
        Self {
            todos: todos.iter().map(TodoView::from).collect(),
        }
    }
}

/// Incoming todo payload for create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TodoInput {
    pub subject: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub person: Option<PersonId>,
}

impl TodoInput {
    /// Fields shared by every row; used directly by add-to-all creation.
    pub fn to_template(&self) -> TodoTemplate {
        TodoTemplate {
            subject: self.subject.clone().unwrap_or_default(),
            date: normalize_date(self.date),
            category: self.category.clone().unwrap_or_default(),
        }
    }

    pub fn into_new_todo(self) -> Result<NewTodo, ValidationError> {
        let person = positive_id(self.person).ok_or(ValidationError::MissingField("person"))?;
        Ok(self.to_template().for_person(person))
    }

    pub fn into_patch(self) -> TodoPatch {
        TodoPatch {
            subject: non_empty(self.subject),
            date: normalize_date(self.date),
            category: non_empty(self.category),
            person: positive_id(self.person),
        }
    }
}
