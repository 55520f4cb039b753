use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "questlog", version, about = "Questlog CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task list management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Pomodoro timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Theme selection
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action).await,
        Commands::Timer { action } => commands::timer::run(action).await,
        Commands::Theme { action } => commands::theme::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
