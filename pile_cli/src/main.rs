//! # pilecap
//!
//! Command-line front end for `pile_core`: runs the capacity sweep for a
//! project file and prints the soil profile and capacity tables.
//!
//! ```text
//! pilecap init site.pcp --name "Pier 7"
//! pilecap analyze site.pcp --details
//! pilecap -v analyze site.pcp --ultimate --json
//! ```

mod cli;
mod error;
mod logging;
mod report;

use std::path::Path;

use clap::Parser;
use serde::Serialize;
use tracing::{debug, info, warn};

use pile_core::file_io::load_project_with_lock_check;
use pile_core::summary::{CapacityKind, CapacitySummary};
use pile_core::{save_project, Analysis, FileLock, Project, ProjectMetadata};

use crate::cli::{AnalyzeArgs, Cli, Commands, InitArgs};
use crate::error::{CliError, Result};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::setup_logging(cli.verbose, cli.quiet) {
        eprintln!("warning: {}", e);
    }
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let result = match cli.command {
        Commands::Analyze(args) => analyze(args),
        Commands::Init(args) => init(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.hint() {
            eprintln!("{}", hint);
        }
        std::process::exit(e.exit_code());
    }
}

/// JSON document printed by `analyze --json`
#[derive(Serialize)]
struct AnalysisReport<'a> {
    meta: &'a ProjectMetadata,
    summary: &'a CapacitySummary,
    #[serde(flatten)]
    analysis: &'a Analysis,
}

fn analyze(args: AnalyzeArgs) -> Result<()> {
    let (project, lock) = load_project_with_lock_check(&args.project)?;
    if let Some(lock) = lock {
        warn!(
            holder = %lock.user_id,
            machine = %lock.machine,
            "Project is open for editing elsewhere; results reflect the last save"
        );
    }

    let analysis = project.analyze()?;
    let kind = if args.ultimate {
        CapacityKind::Ultimate
    } else {
        CapacityKind::Allowable
    };
    let summary = analysis.summary(kind)?;

    if args.json {
        let report = AnalysisReport {
            meta: &project.meta,
            summary: &summary,
            analysis: &analysis,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", report::project_header(&project));
    println!("{}", report::soil_profile_table(&project.soil_profile.profile));
    println!("{}", report::summary_tables(&summary));

    if args.details {
        for result in analysis
            .results
            .compression_results
            .iter()
            .chain(&analysis.results.tension_results)
        {
            println!("{}", report::pile_details(&analysis.detailed_profile, result));
        }
    }

    let warned = analysis
        .results
        .compression_results
        .iter()
        .chain(&analysis.results.tension_results)
        .filter(|r| !r.warnings.is_empty())
        .count();
    if warned > 0 {
        info!(results = warned, "Effective stress was limited by the 20B rule");
    }
    Ok(())
}

fn init(args: InitArgs) -> Result<()> {
    write_sample(&args.path, &args)?;
    println!("Wrote {}", args.path.display());
    Ok(())
}

fn write_sample(path: &Path, args: &InitArgs) -> Result<()> {
    if path.exists() && !args.force {
        return Err(CliError::Exists {
            path: path.to_path_buf(),
        });
    }

    let project = Project::sample(&args.name, &args.engineer, &args.client);
    let _lock = FileLock::acquire(path, &args.user)?;
    save_project(&project, path)?;
    info!(path = %path.display(), "Created sample project");
    Ok(())
}
