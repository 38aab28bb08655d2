//! Collaborator implementations backed by the `kolibri` CLI.
//!
//! The facility store, the sync command, and the application bootstrap
//! all live inside the embedded Kolibri application; this module
//! reaches them by spawning its management command line with
//! `KOLIBRI_HOME` pointed at the configured home directory.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use kolibrisync_common::{Error, FacilityId, Result};

use crate::collaborators::{AppBootstrap, FacilityLookup, SyncArgs, SyncCommand};
use crate::settings::{Settings, HOME_ENV_VAR};

/// Handle to the embedded `kolibri` command-line program.
#[derive(Debug, Clone)]
pub struct KolibriCli {
    program: PathBuf,
    settings: Settings,
}

impl KolibriCli {
    /// Create a handle for the given program path and settings.
    pub fn new(program: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            program: program.into(),
            settings,
        }
    }

    /// Base command with the home directory exported.
    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.env(HOME_ENV_VAR, self.settings.home());
        cmd.stdin(Stdio::null());
        cmd
    }
}

/// Run a command to completion and capture stdout.
///
/// A non-zero exit status is mapped to an error through `fail`.
async fn output_checked(mut cmd: Command, fail: impl Fn(String) -> Error) -> Result<String> {
    let output = cmd.output().await?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(fail(format!(
            "exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[async_trait]
impl FacilityLookup for KolibriCli {
    async fn default_facility(&self) -> Result<FacilityId> {
        let mut cmd = self.command();
        cmd.args(["manage", "getdefaultfacility"]);
        debug!("Looking up default facility");

        let stdout = output_checked(cmd, Error::Facility).await?;
        FacilityId::new(stdout.trim())
            .map_err(|_| Error::Facility("No default facility reported".to_string()))
    }
}

#[async_trait]
impl SyncCommand for KolibriCli {
    async fn run(&self, args: &SyncArgs) -> Result<()> {
        let mut cmd = self.command();
        cmd.args(["manage", "sync"]);
        cmd.arg("--baseurl").arg(&args.baseurl);
        cmd.arg("--username").arg(&args.username);
        cmd.arg("--password").arg(&args.password);
        cmd.arg("--facility").arg(&args.facility);
        cmd.arg("--verbosity").arg(args.verbosity.to_string());
        debug!("Starting sync against {}", args.baseurl);

        output_checked(cmd, Error::Sync).await?;
        Ok(())
    }
}

#[async_trait]
impl AppBootstrap for KolibriCli {
    async fn run(&self, argv: &[String]) -> Result<()> {
        let mut cmd = self.command();
        // argv[0] is the launcher binary itself; forward the rest.
        cmd.args(argv.iter().skip(1));
        debug!("Running application bootstrap");

        output_checked(cmd, Error::Bootstrap).await?;
        Ok(())
    }
}
