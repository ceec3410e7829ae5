use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use qrsnap::{config::Config, platform::DesktopPlatform};

#[derive(Parser)]
#[command(name = "qrsnap")]
#[command(version, about = "Type text, get a QR code; save it to Downloads or share it")]
struct Cli {
    /// Config file (default: <config dir>/qrsnap/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log file, overrides [logging] file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Splash screen duration in milliseconds
    #[arg(long, value_name = "MS")]
    splash_ms: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };
    if let Some(file) = cli.log_file {
        config.logging.file = Some(file);
    }
    if let Some(ms) = cli.splash_ms {
        config.splash.delay_ms = ms;
    }

    // The terminal belongs to the UI, so logs go to a file
    init_logging(&config.log_file(), &config.logging.filter)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting qrsnap");

    let platform = DesktopPlatform::from_config(&config.storage);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start runtime")?;
    runtime.block_on(qrsnap::tui::run(config, platform))
}

/// `RUST_LOG` wins over the configured filter.
fn init_logging(path: &Path, filter: &str) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}
