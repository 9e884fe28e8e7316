use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Axial capacity of piles and drilled shafts in layered soil (NAVFAC DM-7.02)"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the capacity sweep for a project file and print the results.
    Analyze(AnalyzeArgs),
    /// Write a sample project file to start from.
    Init(InitArgs),
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to the project file (.pcp).
    #[arg(value_name = "PROJECT")]
    pub project: PathBuf,

    /// Report ultimate instead of allowable capacity.
    #[arg(long)]
    pub ultimate: bool,

    /// Print the per-sublayer breakdown of every pile.
    #[arg(long, conflicts_with = "json")]
    pub details: bool,

    /// Print the analysis as JSON instead of tables.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `init` subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the new project file.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Overwrite an existing file.
    #[arg(short, long)]
    pub force: bool,

    #[arg(long, default_value = "Sample Project")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub engineer: String,

    #[arg(long, default_value = "")]
    pub client: String,

    /// Identifier recorded in the lock file while writing.
    #[arg(long, env = "USER", default_value = "unknown")]
    pub user: String,
}
