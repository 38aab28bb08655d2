//! Kolibri periodic content-sync engine.
//!
//! This crate drives the background content-synchronization loop:
//! - Persisted sync options (`syncoptions.ini`) with write-once defaults
//! - Platform-abstraction traits for the facility store, the sync
//!   management command, and the application bootstrap entry point
//! - A cancellable periodic scheduler with an owned handle
//! - Production collaborators that shell out to the `kolibri` CLI

pub mod collaborators;
pub mod options;
pub mod process;
pub mod scheduler;
pub mod settings;

// Re-export main types
pub use collaborators::{
    AppBootstrap, FacilityLookup, SyncArgs, SyncCommand, SYNC_USERNAME, SYNC_VERBOSITY,
};
pub use options::{LoadOutcome, SyncOptions};
pub use process::KolibriCli;
pub use scheduler::{SchedulerHandle, StopReason, SyncScheduler};
pub use settings::{Settings, HOME_ENV_VAR, OPTIONS_FILENAME};
