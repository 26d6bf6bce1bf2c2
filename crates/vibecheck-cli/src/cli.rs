//! Command line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vibecheck_client::ClassSelection;
use vibecheck_common::{AggregationPeriod, ClassId, Emotion, EventType};

/// Classroom emotional check-in/check-out from the terminal
#[derive(Parser, Debug)]
#[command(name = "vibecheck", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "VIBECHECK_CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Log level, overriding the configuration
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the address that starts the teacher login
    LoginUrl,

    /// End the teacher session
    Logout,

    /// Show emotion counts over time
    Dashboard(DashboardArgs),

    /// List, rename or delete classes
    #[command(subcommand)]
    Classes(ClassesCommand),

    /// Release a check-in or check-out code for a class
    Release(ReleaseArgs),

    /// Student code entry and emotion submission
    #[command(subcommand)]
    Student(StudentCommand),
}

/// Dashboard filters and outputs.
#[derive(Args, Debug, PartialEq, Eq)]
pub struct DashboardArgs {
    /// Time bucket: day, week, month or all (defaults to the configured period)
    #[arg(short, long)]
    pub period: Option<AggregationPeriod>,

    /// Class id, `all` or `none`
    #[arg(long, default_value = "all")]
    pub class: ClassSelection,

    /// Only checkin or checkout events
    #[arg(long = "type")]
    pub event_type: Option<EventType>,

    /// Print the chart data as JSON instead of the text report
    #[arg(long)]
    pub json: bool,

    /// Save the text report, to the configured file when no path is given
    #[arg(long)]
    pub export: Option<Option<PathBuf>>,

    /// Render an SVG line chart to this path
    #[arg(long)]
    pub chart: Option<PathBuf>,
}

/// Class management.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ClassesCommand {
    /// List classes, optionally filtered by name
    List {
        /// Case-insensitive part of the class name
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Rename a class
    Rename {
        /// Class id
        id: ClassId,
        /// New name
        name: String,
    },

    /// Delete a class after confirmation
    Delete {
        /// Class id
        id: ClassId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Code release arguments.
#[derive(Args, Debug, PartialEq, Eq)]
pub struct ReleaseArgs {
    /// Class name
    pub class: String,

    /// checkin or checkout
    #[arg(long = "type", default_value = "checkin")]
    pub event_type: EventType,
}

/// Student flow.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum StudentCommand {
    /// Verify an access code and keep it for the submission
    EnterCode {
        /// Code shown by the teacher
        code: String,
    },

    /// Submit an emotion, by code (1-9) or label
    Submit {
        /// Emotion code or label
        emotion: Emotion,
    },
}
