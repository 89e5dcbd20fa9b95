use super::{body, text};
use clap::{Args, Subcommand};
use roster_core::{Api, ApiResponse};

#[derive(Debug, Args)]
pub struct PeopleArgs {
    #[command(subcommand)]
    command: PeopleCommand,
}

#[derive(Debug, Subcommand)]
enum PeopleCommand {
    /// List people; no ids lists everyone
    List { ids: Vec<String> },
    /// Show one person with note and todo ids
    Get { id: String },
    /// Create a person
    Create {
        #[arg(long)]
        name: String,
    },
}

pub fn execute(api: &Api<'_>, args: PeopleArgs) -> ApiResponse {
    match args.command {
        PeopleCommand::List { ids } => api.list_people(&ids),
        PeopleCommand::Get { id } => api.get_person(&id),
        PeopleCommand::Create { name } => api.create_person(&body(vec![("name", text(Some(name)))])),
    }
}
