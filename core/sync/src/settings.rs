//! Process-level settings for the sync agent.

use std::env;
use std::path::{Path, PathBuf};

use kolibrisync_common::{Error, Result};

/// Environment variable naming the Kolibri data directory.
pub const HOME_ENV_VAR: &str = "KOLIBRI_HOME";

/// Name of the persisted sync options file inside the home directory.
pub const OPTIONS_FILENAME: &str = "syncoptions.ini";

/// Explicit process settings, resolved once at startup.
///
/// The original launcher read `KOLIBRI_HOME` ambiently every time it
/// needed a path; here the home directory is captured at construction
/// and owned by the entry point.
#[derive(Debug, Clone)]
pub struct Settings {
    home: PathBuf,
}

impl Settings {
    /// Create settings with an explicit home directory.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Resolve settings from the `KOLIBRI_HOME` environment variable.
    ///
    /// # Errors
    /// - Returns error if the variable is unset or empty
    pub fn from_env() -> Result<Self> {
        match env::var(HOME_ENV_VAR) {
            Ok(home) if !home.is_empty() => Ok(Self::new(home)),
            _ => Err(Error::Config(format!("{} is not set", HOME_ENV_VAR))),
        }
    }

    /// The Kolibri data directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Full path of the sync options file.
    pub fn options_path(&self) -> PathBuf {
        self.home.join(OPTIONS_FILENAME)
    }
}
