use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "fitlog", version, about = "Fitlog CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Workout records
    Workout {
        #[command(subcommand)]
        action: commands::workout::WorkoutAction,
    },
    /// Daily activity log (weight, water, sleep, ...)
    Log {
        #[command(subcommand)]
        action: commands::log::LogAction,
    },
    /// Fitness goals
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Activity reminders
    Reminder {
        #[command(subcommand)]
        action: commands::reminder::ReminderAction,
    },
    /// Progress statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Reminder clock (foreground alarm loop)
    Clock {
        #[command(subcommand)]
        action: commands::clock::ClockAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Workout { action } => commands::workout::run(action),
        Commands::Log { action } => commands::log::run(action),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Reminder { action } => commands::reminder::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Clock { action } => commands::clock::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
