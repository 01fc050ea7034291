use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use zcalc::ai::{AiSolver, AiWorker, GeminiClient};
use zcalc::config::Config;
use zcalc::ui::{self, App, Mode};

#[derive(Parser, Debug)]
#[command(name = "zcalc")]
#[command(about = "Keypad calculator with an AI math solver")]
#[command(version)]
struct Args {
    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Model to send AI questions to (overrides the config file)
    #[arg(long)]
    model: Option<String>,

    /// Mode to start in
    #[arg(long, value_enum, default_value_t = Mode::Calc)]
    mode: Mode,

    /// Write logs here instead of the cache directory
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref(), args.verbose)?;

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(model) = args.model {
        config.model = model;
    }

    let client = GeminiClient::new(config.api_key());
    tracing::info!(
        model = %config.model,
        key_configured = client.is_available(),
        "Starting zcalc"
    );

    let solver = AiSolver::new(Arc::new(client), config.model);
    let worker = AiWorker::spawn(solver).context("failed to start AI worker")?;

    ui::run(App::new(args.mode), worker)
}

/// Log to a file; the terminal belongs to the UI.
fn init_logging(path: Option<&Path>, verbose: bool) -> anyhow::Result<()> {
    let Some(path) = path.map(Path::to_path_buf).or_else(default_log_path) else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = File::create(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let default_level = if verbose { "zcalc=debug" } else { "zcalc=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("zcalc").join("zcalc.log"))
}
