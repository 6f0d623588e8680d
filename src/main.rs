/// Main entry point for the Habit Quest command-line tracker
///
/// This file sets up logging, parses command line arguments, and runs one
/// habit command against the configured data file.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use habit_quest::tools::{AddHabitParams, DeleteHabitParams, MarkDoneParams};
use habit_quest::{Backend, HabitTracker, TrackerConfig};

/// Command line arguments for Habit Quest
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the habit data file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long, global = true)]
    path: Option<PathBuf>,

    /// Storage backend for the data file
    #[arg(long, value_enum, default_value_t = Backend::Json, global = true)]
    backend: Backend,

    /// Print responses as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new habit
    Add {
        name: String,
        #[arg(short = 'D', long)]
        description: Option<String>,
        /// How often, e.g. "daily" or "weekly"
        #[arg(short, long)]
        frequency: Option<String>,
    },
    /// Mark a habit done for today
    Done {
        /// Habit id or exact name
        habit: String,
        /// Progress units, multiplies the XP award
        #[arg(short, long)]
        amount: Option<i64>,
    },
    /// Show all habits
    List,
    /// Remove a habit
    Delete { id: u64 },
    /// Show level, XP and today's progress
    Status,
}

/// Print a response either as JSON or as its message
fn emit<T: Serialize>(json: bool, response: &T, message: &str) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
    } else {
        println!("{}", message);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_quest={}", log_level))
        .with_writer(std::io::stderr) // Keep stdout for command output
        .init();

    let config = TrackerConfig::resolve(args.path, args.backend)?;
    info!("Using habit data at: {}", config.path.display());

    let mut tracker = HabitTracker::open(&config)?;

    match args.command {
        Command::Add { name, description, frequency } => {
            let response = tracker.add(AddHabitParams { name, description, frequency })?;
            emit(args.json, &response, &response.message)?;
        }
        Command::Done { habit, amount } => {
            let response = tracker.mark_done(MarkDoneParams { habit, amount })?;
            emit(args.json, &response, &response.message)?;
            if !response.success {
                std::process::exit(1);
            }
        }
        Command::List => {
            let response = tracker.list();
            emit(args.json, &response, &response.message)?;
        }
        Command::Delete { id } => {
            let response = tracker.delete(DeleteHabitParams { habit_id: id })?;
            emit(args.json, &response, &response.message)?;
            if !response.success {
                std::process::exit(1);
            }
        }
        Command::Status => {
            let response = tracker.status();
            emit(args.json, &response, &response.message)?;
        }
    }

    Ok(())
}
