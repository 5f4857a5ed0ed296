use clap::{Args, Subcommand};

use todosync::model::{Filter, TaskId};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List todos
    List(ListArgs),

    /// Add a todo
    Add(AddArgs),

    /// Flip a todo between active and completed
    Toggle(IdArgs),

    /// Complete every todo, or reopen all of them when all are completed
    #[command(name = "toggle-all")]
    ToggleAll,

    /// Delete a todo
    #[command(name = "rm")]
    Rm(IdArgs),

    /// Delete every completed todo
    #[command(name = "clear-completed")]
    ClearCompleted,

    /// Rename a todo (an empty title deletes it)
    Rename(RenameArgs),
}

#[derive(Args)]
pub(crate) struct ListArgs {
    /// all, active or completed
    #[arg(long, default_value_t = Filter::All)]
    pub(crate) filter: Filter,

    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct AddArgs {
    pub(crate) title: String,
}

#[derive(Args)]
pub(crate) struct IdArgs {
    pub(crate) id: TaskId,
}

#[derive(Args)]
pub(crate) struct RenameArgs {
    pub(crate) id: TaskId,
    pub(crate) title: String,
}
