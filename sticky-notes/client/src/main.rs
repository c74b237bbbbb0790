use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use sticky_notes_client::view::{render_list, render_task_details};
use sticky_notes_client::{ClientConfig, HttpTaskApi, TaskBoard};
use sticky_notes_core::{NewTask, TaskPatch};
use uuid::Uuid;

/// Sticky notes from the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Base URL of the task server, overrides STICKY_NOTES_API_BASE_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// Show all tasks
    List,
    /// Show one task in detail
    Show { id: Uuid },
    /// Add a new task
    Add {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Change fields of an existing task
    Edit {
        id: Uuid,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long, conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long)]
        clear_description: bool,
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Flip the completion flag of a task
    Toggle { id: Uuid },
    /// Delete a task
    Delete { id: Uuid },
}

fn edit_patch(
    title: Option<String>,
    description: Option<String>,
    clear_description: bool,
    completed: Option<bool>,
) -> TaskPatch {
    let description = if clear_description {
        Some(None)
    } else {
        description.map(Some)
    };
    TaskPatch {
        title,
        description,
        is_completed: completed,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = args.api_url {
        config.api_base_url = api_url;
    }

    let board = TaskBoard::new(HttpTaskApi::new(config.api_base_url.clone()))
        .with_toast_duration(config.toast_duration());
    board
        .fetch_tasks()
        .await
        .with_context(|| format!("Could not load tasks from {}", config.api_base_url))?;

    match args.command {
        Commands::List => {}
        Commands::Show { id } => {
            let task = board.get_task(id).await?;
            println!("{}", render_task_details(&task));
            return Ok(());
        }
        Commands::Add { title, description } => {
            board.create_task(NewTask::new(title, description)).await?;
        }
        Commands::Edit {
            id,
            title,
            description,
            clear_description,
            completed,
        } => {
            let patch = edit_patch(title, description, clear_description, completed);
            if patch.is_empty() {
                bail!("Nothing to change, pass --title, --description, --clear-description or --completed");
            }
            board.update_task(id, patch).await?;
        }
        Commands::Toggle { id } => {
            let task = board
                .tasks()
                .into_iter()
                .find(|task| task.id == id)
                .with_context(|| format!("Task with ID {} not found", id))?;
            board.toggle_complete(&task).await?;
        }
        Commands::Delete { id } => {
            board.delete_task(id).await?;
        }
    }

    if let Some(message) = board.success_message() {
        println!("{}", message);
    }
    if let Some(error) = board.error() {
        eprintln!("{}", error);
    }
    println!("{}", render_list(&board.tasks()));
    Ok(())
}
