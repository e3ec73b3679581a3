use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use foxdesk_core::{Config, Launcher, Result};

mod app;
mod dialog;

#[derive(Parser)]
#[command(name = "foxdesk")]
#[command(about = "Desktop manager for Camoufox browser profiles")]
#[command(version)]
struct Cli {
    /// Project root containing the management script (default: current directory)
    #[arg(long)]
    project_root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli.project_root) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli_root: Option<PathBuf>) -> Result<()> {
    let project_root = resolve_project_root(cli_root)?;
    let config = Config::load(&project_root)?;

    // All preconditions are checked before any window opens; a missing
    // script or runtime is fatal, never a partial start.
    let launcher = Launcher::discover(&project_root, &config)?;
    log::info!("project root: {}", launcher.project_root().display());

    app::run(launcher)
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn resolve_project_root(cli_root: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(root) = cli_root {
        return Ok(root);
    }

    if let Ok(root) = std::env::var("FOXDESK_ROOT") {
        return Ok(PathBuf::from(root));
    }

    Ok(std::env::current_dir()?)
}
