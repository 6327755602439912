use clap::{Parser, Subcommand};
use gt_core::Tolerances;
use gt_project::{GearTrain, ProjectError};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gt-cli")]
#[command(about = "Geartrain CLI - gear network ratio propagation tool", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and references
    Validate {
        /// Path to the project file (.yaml, .yml or .json)
        project_path: PathBuf,
    },
    /// Build the gear train, apply its drives and print every gear's state
    Run {
        /// Path to the project file (.yaml, .yml or .json)
        project_path: PathBuf,
        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Build the gear train and check that all gear ratio rules hold
    Check {
        /// Path to the project file (.yaml, .yml or .json)
        project_path: PathBuf,
        /// Relative tolerance used when comparing propagated state
        #[arg(long, default_value_t = 1e-9)]
        rel_tol: f64,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{count} invariant violation(s) found")]
    Inconsistent { count: usize },
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Run { project_path, json } => cmd_run(&project_path, json),
        Commands::Check {
            project_path,
            rel_tol,
        } => cmd_check(&project_path, rel_tol),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_train(project_path: &Path) -> CliResult<GearTrain> {
    let project = gt_project::load(project_path)?;
    tracing::info!(name = %project.name, gears = project.gears.len(), "project loaded");
    Ok(gt_project::build_train(&project)?)
}

fn cmd_validate(project_path: &Path) -> CliResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = gt_project::load(project_path)?;
    println!(
        "✓ Project is valid ({} gears, {} links, {} drives)",
        project.gears.len(),
        project.links.len(),
        project.drives.len()
    );
    Ok(())
}

fn cmd_run(project_path: &Path, json: bool) -> CliResult<()> {
    let train = load_train(project_path)?;
    let rows = gt_project::report(&train);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("Gear train: {}", train.name);
        print!("{}", gt_project::render_table(&rows));
    }
    Ok(())
}

fn cmd_check(project_path: &Path, rel_tol: f64) -> CliResult<()> {
    let train = load_train(project_path)?;
    let tol = Tolerances {
        rel: rel_tol,
        ..Tolerances::default()
    };

    let violations = train.network.check_invariants(tol);
    if violations.is_empty() {
        println!("✓ All gear ratio rules hold ({} gears)", train.network.len());
        return Ok(());
    }

    for violation in &violations {
        println!("✗ {}", violation);
    }
    Err(CliError::Inconsistent {
        count: violations.len(),
    })
}
