use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "studyhelper", version, about = "Study Helper class schedule CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lesson management
    Lesson {
        #[command(subcommand)]
        action: commands::lesson::LessonAction,
    },
    /// Holiday flags
    Holiday {
        #[command(subcommand)]
        action: commands::holiday::HolidayAction,
    },
    /// Single-day views
    Day {
        #[command(subcommand)]
        action: commands::day::DayAction,
    },
    /// Week overview
    Week {
        #[command(subcommand)]
        action: commands::week::WeekAction,
    },
    /// Homework and completion of one lesson occurrence
    Homework {
        #[command(subcommand)]
        action: commands::homework::HomeworkAction,
    },
    /// The running or next lesson today
    Now(commands::now::NowArgs),
    /// Write the whole schedule to a JSON file ("-" for stdout)
    Export { path: PathBuf },
    /// Replace the whole schedule with a JSON file
    Import { path: PathBuf },
    /// Watch today's lessons and print alerts until Ctrl-C
    Monitor(commands::monitor::MonitorArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions { shell: Shell },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Monitor(_) => "studyhelper_core=info,studyhelper=info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Lesson { action } => commands::lesson::run(action),
        Commands::Holiday { action } => commands::holiday::run(action),
        Commands::Day { action } => commands::day::run(action),
        Commands::Week { action } => commands::week::run(action),
        Commands::Homework { action } => commands::homework::run(action),
        Commands::Now(args) => commands::now::run(args),
        Commands::Export { path } => commands::backup::export(path),
        Commands::Import { path } => commands::backup::import(path),
        Commands::Monitor(args) => commands::monitor::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "studyhelper", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
