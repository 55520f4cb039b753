//! Task list commands for CLI.

use chrono::Utc;
use clap::Subcommand;
use questlog_core::task::deadline_label;
use questlog_core::{
    notification_for, theme_config, Config, Event, RestStore, TaskBoard, TaskDraft, TaskStatus,
    TaskType, Ticker,
};

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks, newest first
    List {
        /// Print raw JSON instead of themed lines
        #[arg(long)]
        json: bool,
    },
    /// Create a new task
    Add {
        /// Task name
        name: String,
        /// Deadline: YYYY-MM-DD, YYYY-MM-DDTHH:MM or RFC 3339
        #[arg(long)]
        deadline: String,
        /// Task type: everyday, math, english, science, history, other
        #[arg(long = "type")]
        task_type: Option<TaskType>,
        /// Task description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Mark a task complete; it is deleted after a short grace period
    /// unless interrupted with Ctrl-C
    Done {
        /// Task ID
        id: i64,
    },
    /// Delete a task immediately
    Delete {
        /// Task ID
        id: i64,
    },
}

pub async fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?.with_env_overrides();

    match action {
        TaskAction::List { json } => {
            let mut board = open_board(&config)?;
            board.refresh().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(board.tasks())?);
                return Ok(());
            }
            print_tasks(&board, &config.ui.theme);
        }
        TaskAction::Add {
            name,
            deadline,
            task_type,
            description,
        } => {
            let draft = TaskDraft {
                name,
                deadline,
                description,
                task_type,
            };
            // Input errors take precedence over a missing store URL.
            draft.validate(Utc::now())?;

            let mut board = open_board(&config)?;
            let event = board.add(&draft, Utc::now()).await?;
            if let Event::TaskAdded { task_id, .. } = &event {
                println!("Task created: {task_id}");
            }
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TaskAction::Done { id } => {
            let mut board = open_board(&config)?;
            board.refresh().await?;
            board
                .arm(id)
                .ok_or_else(|| format!("Task not found: {id}"))?;
            if let Some(label) = board.countdown_label(id) {
                println!("{label}");
            }

            let mut ticker = Ticker::new();
            let ctrl_c = tokio::signal::ctrl_c();
            tokio::pin!(ctrl_c);

            while board.has_pending() {
                tokio::select! {
                    _ = ticker.tick() => {
                        for event in board.tick().await {
                            match event {
                                Event::DeletionCountdown { remaining_secs, .. } => {
                                    println!("Deleting in {remaining_secs}s...");
                                }
                                Event::TaskDeleted { task_id, .. } => {
                                    println!("Task deleted: {task_id}");
                                }
                                Event::TaskDeleteFailed { task_id, message, .. } => {
                                    return Err(format!("failed to delete task {task_id}: {message}").into());
                                }
                                _ => {}
                            }
                        }
                    }
                    _ = &mut ctrl_c => {
                        board.cancel_all();
                        println!("Deletion cancelled: {id}");
                    }
                }
            }
        }
        TaskAction::Delete { id } => {
            let mut board = open_board(&config)?;
            board.refresh().await?;
            board.delete_now(id).await?;
            println!("Task deleted: {id}");
        }
    }
    Ok(())
}

fn open_board(config: &Config) -> Result<TaskBoard<RestStore>, Box<dyn std::error::Error>> {
    let store = RestStore::from_config(&config.store)?;
    Ok(TaskBoard::new(store))
}

fn print_tasks(board: &TaskBoard<RestStore>, theme_name: &str) {
    let theme = theme_config(theme_name);
    let now = Utc::now();

    println!("{}", theme.heading);
    if board.tasks().is_empty() {
        println!("  (no tasks)");
        return;
    }
    for task in board.tasks() {
        let status = TaskStatus::of(task, now);
        let kind = task.task_type.map(|t| t.as_str()).unwrap_or("-");
        println!(
            "[{}] {} {} ({kind}) | {} | {}",
            task.id,
            theme.task_prefix,
            task.name,
            status.label(),
            deadline_label(task.deadline, now)
        );
        if !task.description.is_empty() {
            println!("      {}", task.description);
        }
        match notification_for(task, theme_name, now) {
            Some(n) if n.stage.is_active() => println!("      ! {}", n.text),
            _ if !task.done => println!("      {}", theme.incomplete_line),
            _ => {}
        }
    }
}
