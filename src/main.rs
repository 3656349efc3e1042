//! schooladmin - Main entry point
//!
//! Parses the command line, sets up logging and the backend, then runs either
//! the interactive wizard or one of the headless commands.

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use schooladmin::api::{DryRunApi, HttpSchoolApi, SchoolApi};
use schooladmin::app::App;
use schooladmin::cli::{Cli, Commands, ConfigCommands};
use schooladmin::config_file::ClientConfig;
use schooladmin::draft::DraftFile;
use schooladmin::error::{self, AdminError};
use schooladmin::headless::{self, CreateReport};
use std::fs::OpenOptions;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

/// Initialize tracing.
///
/// The interactive UI owns the terminal, so its logs go to a file; headless
/// commands log to stderr. `RUST_LOG` overrides the default filter.
fn init_tracing(interactive: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if interactive {
        let path = log_file
            .map(Path::to_path_buf)
            .unwrap_or_else(default_log_path);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| anyhow::anyhow!("Failed to open log file {:?}: {}", path, e))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
    Ok(())
}

fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("schooladmin.log")
}

/// Config file (if any) with command-line overrides applied, validated.
fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            ClientConfig::load_from_file(path)?
        }
        None => ClientConfig::default(),
    };
    let config = config.with_overrides(cli.api_url.clone(), cli.token.clone());
    config.validate()?;
    Ok(config)
}

fn build_api(cli: &Cli) -> Result<Arc<dyn SchoolApi>, Box<dyn std::error::Error>> {
    if cli.dry_run {
        info!("[DRY RUN] Backend calls are simulated");
        return Ok(Arc::new(DryRunApi::new()));
    }

    let config = load_config(cli)?;
    if config.token.is_none() {
        warn!("No bearer token configured; the backend will likely refuse requests");
    }
    debug!("Using backend {}", config.api_base_url);
    Ok(Arc::new(HttpSchoolApi::new(config)?))
}

/// Main application entry point
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();
    let interactive = matches!(cli.command, None | Some(Commands::Wizard { .. }));
    init_tracing(interactive, cli.log_file.as_deref())?;
    info!("schooladmin starting up");

    match &cli.command {
        None => run_tui(&cli, None)?,
        Some(Commands::Wizard { draft }) => run_tui(&cli, draft.as_deref())?,
        Some(Commands::Create { draft }) => {
            let drafts = DraftFile::load_from_file(draft)?;
            let api = build_api(&cli)?;
            let report = headless::run_create(api.as_ref(), drafts);
            print_report(&report);
            std::process::exit(report.exit_code());
        }
        Some(Commands::Validate { draft }) => run_validate(draft),
        Some(Commands::Catalog) => {
            let api = build_api(&cli)?;
            headless::print_catalog(api.as_ref(), &mut stdout().lock())?;
        }
        Some(Commands::Schools) => {
            let api = build_api(&cli)?;
            headless::print_schools(api.as_ref(), &mut stdout().lock())?;
        }
        Some(Commands::Config {
            action: ConfigCommands::Init { path, force },
        }) => {
            if path.exists() && !force {
                return Err(AdminError::config(format!(
                    "{:?} already exists (use --force to overwrite)",
                    path
                ))
                .into());
            }
            ClientConfig::default().save_to_file(path)?;
            println!("✓ Wrote default configuration to {:?}", path);
        }
    }

    Ok(())
}

fn print_report(report: &CreateReport) {
    match report {
        CreateReport::Created { school_id } => {
            println!("✓ School and administrator created (school id {})", school_id);
        }
        CreateReport::PartialSuccess {
            school_id,
            admin_error,
        } => {
            println!("⚠ School created (id {}) but its administrator was not", school_id);
            eprintln!("  {}", admin_error);
        }
        CreateReport::Failed { reason } => {
            eprintln!("✗ Nothing was created: {}", reason);
        }
    }
}

fn run_validate(path: &Path) {
    info!("Validating draft file: {:?}", path);
    let drafts = match DraftFile::load_from_file(path) {
        Ok(drafts) => drafts,
        Err(e) => {
            error!("Failed to load draft file: {:#}", e);
            eprintln!("✗ Failed to load draft file: {:#}", e);
            std::process::exit(headless::EXIT_FAILURE);
        }
    };

    let mut valid = true;
    for (step, result) in headless::validate_drafts(&drafts) {
        match result {
            Ok(()) => println!("✓ Step {} ({}) is valid", step.number(), step.title()),
            Err(e) => {
                valid = false;
                println!("✗ Step {} ({}): {}", step.number(), step.title(), e);
            }
        }
    }
    if !valid {
        std::process::exit(headless::EXIT_FAILURE);
    }
}

/// Run the interactive wizard
fn run_tui(cli: &Cli, draft: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let drafts = draft.map(DraftFile::load_from_file).transpose()?;
    let api = build_api(cli)?;

    debug!("Initializing terminal for TUI mode");
    enable_raw_mode().map_err(|e| AdminError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen).map_err(|e| {
        AdminError::terminal(format!("Failed to enter alternate screen: {}", e))
    })?;

    let result = (|| -> error::Result<()> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)
            .map_err(|e| AdminError::terminal(format!("Failed to create terminal: {}", e)))?;
        let mut app = App::new(api, cli.dry_run, drafts);
        app.run(&mut terminal)
    })();

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    if let Err(ref e) = result {
        error!("TUI exited with error: {}", e);
    }
    Ok(result?)
}
