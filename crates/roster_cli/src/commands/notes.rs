use super::{body, date, id, text};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use roster_core::{Api, ApiResponse};

#[derive(Debug, Args)]
pub struct NotesArgs {
    #[command(subcommand)]
    command: NotesCommand,
}

#[derive(Debug, Args)]
struct NoteFields {
    #[arg(long)]
    text: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// RFC 3339 timestamp
    #[arg(long)]
    date: Option<DateTime<Utc>>,
    /// Owning person id
    #[arg(long)]
    person: Option<i64>,
}

impl NoteFields {
    fn into_body(self) -> String {
        body(vec![
            ("text", text(self.text)),
            ("category", text(self.category)),
            ("date", date(self.date)),
            ("person", id(self.person)),
        ])
    }
}

#[derive(Debug, Subcommand)]
enum NotesCommand {
    /// List notes; no ids lists all of them
    List { ids: Vec<String> },
    Get { id: String },
    Create(NoteFields),
    /// Overwrite only the fields given
    Update {
        id: String,
        #[command(flatten)]
        fields: NoteFields,
    },
    Delete { id: String },
}

pub fn execute(api: &Api<'_>, args: NotesArgs) -> ApiResponse {
    match args.command {
        NotesCommand::List { ids } => api.list_notes(&ids),
        NotesCommand::Get { id } => api.get_note(&id),
        NotesCommand::Create(fields) => api.create_note(&fields.into_body()),
        NotesCommand::Update { id, fields } => api.update_note(&id, &fields.into_body()),
        NotesCommand::Delete { id } => api.delete_note(&id),
    }
}
