use anyhow::{Context, Result};

use todosync::model::{ClientConfig, Task, TaskId};
use todosync::remote::{RemoteClient, TodoStore};
use todosync::sync::{BatchReport, EngineSettings, Outcome, SyncEngine, visible_tasks};

use crate::Commands;
use crate::cli_commands::ListArgs;

/// Loads the list, runs one engine operation, and reports how it settled.
pub(crate) fn handle_command(config: &ClientConfig, command: Commands) -> Result<()> {
    let client = RemoteClient::new(config).context("build http client")?;
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    let engine = SyncEngine::new(client, EngineSettings::from(config));

    let res = rt.block_on(async {
        ensure_applied(&engine, "load", engine.load().await)?;
        dispatch(&engine, command).await
    });
    engine.shutdown();
    res
}

async fn dispatch<S: TodoStore>(engine: &SyncEngine<S>, command: Commands) -> Result<()> {
    match command {
        Commands::List(args) => handle_list_command(engine, args)?,
        Commands::Add(args) => {
            ensure_applied(engine, "add", engine.add(&args.title).await)?;
            if let Some(task) = engine.tasks().last() {
                print_task(task);
            }
        }
        Commands::Toggle(args) => {
            ensure_applied(engine, "toggle", engine.toggle(args.id).await)?;
            print_current(engine, args.id);
        }
        Commands::ToggleAll => ensure_clean("toggle-all", engine.toggle_all().await)?,
        Commands::Rm(args) => {
            ensure_applied(engine, "rm", engine.delete(args.id).await)?;
            println!("deleted {}", args.id);
        }
        Commands::ClearCompleted => {
            ensure_clean("clear-completed", engine.clear_completed().await)?
        }
        Commands::Rename(args) => {
            // Same path as the interactive editor: enter edit mode, then commit.
            if !engine.start_edit(args.id) {
                anyhow::bail!("no todo with id {}", args.id);
            }
            engine.set_edit_draft(args.title);
            let outcome = engine.commit_edit().await;
            ensure_applied(engine, "rename", outcome)?;
            match outcome {
                Outcome::Unchanged => println!("unchanged"),
                _ if engine.task(args.id).is_none() => println!("deleted {}", args.id),
                _ => print_current(engine, args.id),
            }
        }
    }
    Ok(())
}

fn handle_list_command<S: TodoStore>(engine: &SyncEngine<S>, args: ListArgs) -> Result<()> {
    let tasks = engine.tasks();
    let visible: Vec<&Task> = visible_tasks(&tasks, args.filter).collect();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&visible).context("serialize todos json")?
        );
        return Ok(());
    }

    for task in &visible {
        print_task(task);
    }
    let view = engine.view();
    if view.show_footer() {
        println!("{}", view.items_left());
    }
    Ok(())
}

/// Turns a settled outcome into an error for `main`, which exits with status 1.
fn ensure_applied<S: TodoStore>(engine: &SyncEngine<S>, op: &str, outcome: Outcome) -> Result<()> {
    match outcome {
        Outcome::Applied | Outcome::Unchanged => Ok(()),
        Outcome::Failed(kind) => {
            let message = engine
                .notice()
                .map(|n| n.message)
                .unwrap_or_else(|| kind.message().to_string());
            anyhow::bail!("{op}: {message}")
        }
        Outcome::Missing => anyhow::bail!("{op}: no such todo"),
        Outcome::Busy => anyhow::bail!("{op}: another request is still in flight"),
    }
}

fn ensure_clean(op: &str, report: BatchReport) -> Result<()> {
    println!(
        "{op}: {}/{} succeeded",
        report.succeeded, report.attempted
    );
    if !report.is_clean() {
        anyhow::bail!("{op}: {} of {} failed", report.failed, report.attempted);
    }
    Ok(())
}

fn print_current<S: TodoStore>(engine: &SyncEngine<S>, id: TaskId) {
    if let Some(task) = engine.task(id) {
        print_task(&task);
    }
}

fn print_task(task: &Task) {
    let check = if task.completed { "x" } else { " " };
    println!("{:>4} [{}] {}", task.id.get(), check, task.title);
}
