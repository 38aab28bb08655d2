//! Periodic sync scheduling with an owned, cancellable handle.
//!
//! The original launcher rescheduled itself through a recursive timer
//! callback with no shutdown path. Here the loop is an explicit task:
//! spawning returns a [`SchedulerHandle`] that can cancel the armed
//! timer and join the task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, info};

use kolibrisync_common::{Error, Result};

use crate::collaborators::{AppBootstrap, FacilityLookup, SyncArgs, SyncCommand};
use crate::options::{LoadOutcome, SyncOptions};
use crate::settings::Settings;

/// Why the scheduler loop ended on its own or was stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No options file existed; defaults were written and no sync ran.
    Initialized,
    /// `SYNC_ON` was false when the cycle started.
    Disabled,
    /// The handle requested shutdown.
    Cancelled,
}

/// Periodic sync scheduler.
///
/// Every cycle re-reads the options file, looks up the default
/// facility, arms the next firing, and then runs one sync pass. The
/// next firing is armed *before* the sync command runs, so a failed
/// invocation never loses the following cycle.
pub struct SyncScheduler {
    settings: Settings,
    facility: Arc<dyn FacilityLookup>,
    command: Arc<dyn SyncCommand>,
    bootstrap: Option<(Arc<dyn AppBootstrap>, Vec<String>)>,
}

impl SyncScheduler {
    /// Create a scheduler over the given collaborators.
    pub fn new(
        settings: Settings,
        facility: Arc<dyn FacilityLookup>,
        command: Arc<dyn SyncCommand>,
    ) -> Self {
        Self {
            settings,
            facility,
            command,
            bootstrap: None,
        }
    }

    /// Run the application bootstrap entry point once, with the given
    /// argv, before the first cycle.
    pub fn with_bootstrap(mut self, bootstrap: Arc<dyn AppBootstrap>, argv: Vec<String>) -> Self {
        self.bootstrap = Some((bootstrap, argv));
        self
    }

    /// Spawn the scheduler loop onto the runtime and return its handle.
    pub fn spawn(self) -> SchedulerHandle {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(self.run(shutdown_rx));
        SchedulerHandle {
            shutdown_tx: Some(shutdown_tx),
            task,
        }
    }

    /// Run the scheduler loop until it stops on its own or is
    /// cancelled.
    async fn run(self, mut shutdown: oneshot::Receiver<()>) -> Result<StopReason> {
        if let Some((bootstrap, argv)) = &self.bootstrap {
            info!("Running application bootstrap");
            bootstrap.run(argv).await?;
        }

        info!("Sync scheduler started");

        loop {
            // The options file is the single source of truth and is
            // re-read on every cycle.
            let options = match SyncOptions::load_or_init(&self.settings).await? {
                LoadOutcome::Created(_) => {
                    info!("Sync options initialized; nothing to sync on first run");
                    return Ok(StopReason::Initialized);
                }
                LoadOutcome::Loaded(options) => options,
            };

            if !options.sync_on {
                info!("Periodic sync is disabled");
                return Ok(StopReason::Disabled);
            }

            // Facility identity is looked up fresh every cycle.
            let facility = self.facility.default_facility().await?;
            let args = SyncArgs::for_cycle(&options.sync_server, &facility);

            let deadline = next_deadline(options.delay());

            debug!("Starting sync pass for facility {}", facility);
            match self.command.run(&args).await {
                Ok(()) => info!("Sync pass completed for facility {}", facility),
                Err(err) => error!("Sync pass failed for facility {}: {}", facility, err),
            }

            tokio::select! {
                _ = &mut shutdown => {
                    info!("Sync scheduler shutting down");
                    return Ok(StopReason::Cancelled);
                }
                _ = sleep_until(deadline) => {}
            }
        }
    }
}

/// Arm the next firing time for the given delay.
fn next_deadline(delay: Duration) -> Instant {
    Instant::now() + delay
}

/// Owned handle for a spawned scheduler task.
pub struct SchedulerHandle {
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<StopReason>>,
}

impl SchedulerHandle {
    /// Request cancellation without waiting for the loop to finish.
    ///
    /// A sync pass that is already running completes first; only the
    /// armed timer is interrupted.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Wait for the loop to finish without consuming the handle.
    pub async fn wait(&mut self) -> Result<StopReason> {
        (&mut self.task)
            .await
            .map_err(|e| Error::Sync(format!("Scheduler task failed: {}", e)))?
    }

    /// Wait for the loop to finish.
    pub async fn join(self) -> Result<StopReason> {
        self.task
            .await
            .map_err(|e| Error::Sync(format!("Scheduler task failed: {}", e)))?
    }

    /// Request cancellation and wait for the loop to finish.
    pub async fn shutdown(mut self) -> Result<StopReason> {
        self.cancel();
        self.join().await
    }
}
