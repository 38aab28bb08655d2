//! kolibri-syncd - periodic content synchronization for Kolibri.
//!
//! Resolves the Kolibri home directory, runs the application bootstrap
//! once, then drives the periodic sync scheduler until it stops on its
//! own or the process is interrupted.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use kolibrisync_sync::{KolibriCli, Settings, StopReason, SyncScheduler};

#[derive(Parser)]
#[command(name = "kolibri-syncd")]
#[command(about = "Periodic content synchronization for Kolibri")]
#[command(version)]
struct Cli {
    /// Kolibri data directory (defaults to $KOLIBRI_HOME, then
    /// ~/.kolibri).
    #[arg(long)]
    home: Option<PathBuf>,

    /// Path of the kolibri command-line program.
    #[arg(long, default_value = "kolibri")]
    kolibri: PathBuf,

    /// Skip the application bootstrap entry point.
    #[arg(long)]
    no_bootstrap: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set up logging")?;

    let settings = resolve_settings(cli.home)?;
    info!("Using Kolibri home {}", settings.home().display());

    let kolibri = Arc::new(KolibriCli::new(cli.kolibri, settings.clone()));

    let mut scheduler = SyncScheduler::new(settings, kolibri.clone(), kolibri.clone());
    if !cli.no_bootstrap {
        let argv: Vec<String> = std::env::args().collect();
        scheduler = scheduler.with_bootstrap(kolibri, argv);
    }

    let mut handle = scheduler.spawn();

    let finished = tokio::select! {
        reason = handle.wait() => Some(reason),
        _ = tokio::signal::ctrl_c() => None,
    };

    let reason = match finished {
        Some(reason) => reason.context("Sync scheduler failed")?,
        None => {
            info!("Interrupt received; shutting down");
            handle
                .shutdown()
                .await
                .context("Sync scheduler failed during shutdown")?
        }
    };

    match reason {
        StopReason::Initialized => {
            info!("Default sync options written; edit syncoptions.ini and restart")
        }
        StopReason::Disabled => info!("Periodic sync is disabled; nothing to do"),
        StopReason::Cancelled => info!("Sync scheduler stopped"),
    }

    Ok(())
}

/// Resolve the home directory: flag, then `KOLIBRI_HOME`, then the
/// application's conventional `~/.kolibri` default.
fn resolve_settings(home: Option<PathBuf>) -> Result<Settings> {
    if let Some(home) = home {
        return Ok(Settings::new(home));
    }
    if let Ok(settings) = Settings::from_env() {
        return Ok(settings);
    }
    let home_dir = dirs::home_dir().context("Could not determine a home directory")?;
    Ok(Settings::new(home_dir.join(".kolibri")))
}
