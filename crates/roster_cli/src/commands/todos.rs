use super::{body, date, id, text};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use roster_core::{Api, ApiResponse};

#[derive(Debug, Args)]
pub struct TodosArgs {
    #[command(subcommand)]
    command: TodosCommand,
}

#[derive(Debug, Args)]
struct TodoFields {
    #[arg(long)]
    subject: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// RFC 3339 timestamp
    #[arg(long)]
    date: Option<DateTime<Utc>>,
    /// Owning person id
    #[arg(long)]
    person: Option<i64>,
}

impl TodoFields {
    fn into_body(self) -> String {
        body(vec![
            ("subject", text(self.subject)),
            ("category", text(self.category)),
            ("date", date(self.date)),
            ("person", id(self.person)),
        ])
    }
}

#[derive(Debug, Subcommand)]
enum TodosCommand {
    /// List todos; no ids lists all of them
    List { ids: Vec<String> },
    Get { id: String },
    Create {
        #[command(flatten)]
        fields: TodoFields,
        /// Give every existing person a copy, ignoring --person
        #[arg(long)]
        all: bool,
    },
    /// Overwrite only the fields given
    Update {
        id: String,
        #[command(flatten)]
        fields: TodoFields,
    },
    Delete { id: String },
}

pub fn execute(api: &Api<'_>, args: TodosArgs) -> ApiResponse {
    match args.command {
        TodosCommand::List { ids } => api.list_todos(&ids),
        TodosCommand::Get { id } => api.get_todo(&id),
        TodosCommand::Create { fields, all } => api.create_todo(&fields.into_body(), all),
        TodosCommand::Update { id, fields } => api.update_todo(&id, &fields.into_body()),
        TodosCommand::Delete { id } => api.delete_todo(&id),
    }
}
