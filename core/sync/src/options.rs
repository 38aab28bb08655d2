//! Persisted sync options (`syncoptions.ini`).
//!
//! The options file is a flat INI document with a single `[DEFAULT]`
//! section. It is written exactly once, with hard-coded defaults, the
//! first time no file is found; after that the file on disk is the
//! single source of truth and is re-read on every sync cycle.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

use kolibrisync_common::{Error, Result};

use crate::settings::Settings;

/// Section header used in the options file.
const SECTION: &str = "DEFAULT";

/// Persisted sync configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncOptions {
    /// Whether periodic sync is enabled.
    pub sync_on: bool,
    /// Hostname of the remote sync endpoint.
    pub sync_server: String,
    /// Configured sync username.
    ///
    /// Note: the sync command ignores this and always sends the literal
    /// `"syncuser"`; see [`crate::collaborators::SYNC_USERNAME`].
    pub sync_user: String,
    /// Seconds between sync attempts.
    pub sync_delay: f64,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            sync_on: true,
            sync_server: "content.myscoolserver.in".to_string(),
            sync_user: "syncuser".to_string(),
            sync_delay: 900.0,
        }
    }
}

/// Outcome of [`SyncOptions::load_or_init`].
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// No file existed; defaults were written to disk.
    Created(SyncOptions),
    /// An existing file was read.
    Loaded(SyncOptions),
}

impl SyncOptions {
    /// Load options from the settings' options file, writing defaults
    /// first if no file exists yet.
    ///
    /// An existing file is never rewritten.
    ///
    /// # Errors
    /// - Returns error if the file cannot be read, written, or parsed
    pub async fn load_or_init(settings: &Settings) -> Result<LoadOutcome> {
        let path = settings.options_path();
        if fs::try_exists(&path).await? {
            Ok(LoadOutcome::Loaded(Self::load(&path).await?))
        } else {
            let defaults = Self::default();
            defaults.store(&path).await?;
            info!("Wrote default sync options to {}", path.display());
            Ok(LoadOutcome::Created(defaults))
        }
    }

    /// Read options from an INI file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    /// Write options to an INI file, creating parent directories if
    /// needed.
    pub async fn store(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !fs::try_exists(parent).await? {
                fs::create_dir_all(parent).await?;
            }
        }
        fs::write(path, self.to_ini()).await?;
        Ok(())
    }

    /// Sync delay as a `Duration`.
    pub fn delay(&self) -> Duration {
        Duration::from_secs_f64(self.sync_delay.max(0.0))
    }

    /// Parse the `[DEFAULT]` section of an INI document.
    ///
    /// Unknown keys are ignored; all four known keys are required.
    pub fn parse(content: &str) -> Result<Self> {
        let mut section = String::new();
        let mut sync_on = None;
        let mut sync_server = None;
        let mut sync_user = None;
        let mut sync_delay = None;

        for raw in content.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                section = name.trim().to_string();
                continue;
            }
            if section != SECTION {
                continue;
            }
            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| Error::Config(format!("Malformed line: {}", raw)))?;
            let value = value.trim();
            match key.trim().to_ascii_uppercase().as_str() {
                "SYNC_ON" => sync_on = Some(parse_bool(value)?),
                "SYNC_SERVER" => sync_server = Some(value.to_string()),
                "SYNC_USER" => sync_user = Some(value.to_string()),
                "SYNC_DELAY" => {
                    let delay = value.parse::<f64>().map_err(|_| {
                        Error::Config(format!("Invalid SYNC_DELAY value: {}", value))
                    })?;
                    sync_delay = Some(delay);
                }
                _ => {}
            }
        }

        Ok(Self {
            sync_on: require(sync_on, "SYNC_ON")?,
            sync_server: require(sync_server, "SYNC_SERVER")?,
            sync_user: require(sync_user, "SYNC_USER")?,
            sync_delay: require(sync_delay, "SYNC_DELAY")?,
        })
    }

    /// Render as an INI document with a single `[DEFAULT]` section.
    pub fn to_ini(&self) -> String {
        format!(
            "[{}]\nSYNC_ON = {}\nSYNC_SERVER = {}\nSYNC_USER = {}\nSYNC_DELAY = {}\n",
            SECTION,
            if self.sync_on { "True" } else { "False" },
            self.sync_server,
            self.sync_user,
            format_delay(self.sync_delay),
        )
    }
}

/// Parse boolean text the way the original options file stores it
/// (`True`/`False`, plus the usual INI spellings).
fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(Error::Config(format!("Invalid boolean value: {}", value))),
    }
}

/// Render the delay as decimal text, keeping a trailing `.0` for whole
/// numbers to match the original file format.
fn format_delay(delay: f64) -> String {
    if delay.fract() == 0.0 {
        format!("{:.1}", delay)
    } else {
        format!("{}", delay)
    }
}

fn require<T>(value: Option<T>, key: &str) -> Result<T> {
    value.ok_or_else(|| Error::Config(format!("Missing key: {}", key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let options = SyncOptions::default();
        assert!(options.sync_on);
        assert_eq!(options.sync_server, "content.myscoolserver.in");
        assert_eq!(options.sync_user, "syncuser");
        assert_eq!(options.sync_delay, 900.0);
        assert_eq!(options.delay(), Duration::from_secs(900));
    }

    #[test]
    fn test_default_ini_rendering() {
        let ini = SyncOptions::default().to_ini();
        assert_eq!(
            ini,
            "[DEFAULT]\n\
             SYNC_ON = True\n\
             SYNC_SERVER = content.myscoolserver.in\n\
             SYNC_USER = syncuser\n\
             SYNC_DELAY = 900.0\n"
        );
    }

    #[test]
    fn test_parse_roundtrip() {
        let options = SyncOptions {
            sync_on: false,
            sync_server: "sync.example.org".to_string(),
            sync_user: "admin".to_string(),
            sync_delay: 12.5,
        };
        let parsed = SyncOptions::parse(&options.to_ini()).unwrap();
        assert_eq!(parsed, options);
    }

    #[test]
    fn test_parse_boolean_spellings() {
        for (text, expected) in [("True", true), ("false", false), ("1", true), ("off", false)] {
            let content = format!(
                "[DEFAULT]\nSYNC_ON = {}\nSYNC_SERVER = s\nSYNC_USER = u\nSYNC_DELAY = 10\n",
                text
            );
            let options = SyncOptions::parse(&content).unwrap();
            assert_eq!(options.sync_on, expected, "for input {:?}", text);
        }
    }

    #[test]
    fn test_parse_missing_key_fails() {
        let content = "[DEFAULT]\nSYNC_ON = True\nSYNC_SERVER = s\nSYNC_USER = u\n";
        let err = SyncOptions::parse(content).unwrap_err();
        assert!(err.to_string().contains("SYNC_DELAY"));
    }

    #[test]
    fn test_parse_invalid_delay_fails() {
        let content =
            "[DEFAULT]\nSYNC_ON = True\nSYNC_SERVER = s\nSYNC_USER = u\nSYNC_DELAY = soon\n";
        assert!(SyncOptions::parse(content).is_err());
    }

    #[test]
    fn test_parse_ignores_other_sections_and_comments() {
        let content = "\
            # generated file\n\
            [OTHER]\n\
            SYNC_ON = False\n\
            [DEFAULT]\n\
            ; enabled\n\
            SYNC_ON = True\n\
            SYNC_SERVER = s\n\
            SYNC_USER = u\n\
            SYNC_DELAY = 30\n";
        let options = SyncOptions::parse(content).unwrap();
        assert!(options.sync_on);
        assert_eq!(options.sync_delay, 30.0);
    }

    #[tokio::test]
    async fn test_load_or_init_creates_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::new(dir.path());

        let outcome = SyncOptions::load_or_init(&settings).await.unwrap();
        assert_eq!(outcome, LoadOutcome::Created(SyncOptions::default()));

        let written = fs::read_to_string(settings.options_path()).unwrap();
        assert_eq!(written, SyncOptions::default().to_ini());
    }

    #[tokio::test]
    async fn test_load_or_init_never_rewrites_existing_file() {
        let dir = tempdir().unwrap();
        let settings = Settings::new(dir.path());

        let custom = SyncOptions {
            sync_on: true,
            sync_server: "sync.example.org".to_string(),
            sync_user: "admin".to_string(),
            sync_delay: 60.0,
        };
        custom.store(&settings.options_path()).await.unwrap();
        let before = fs::read_to_string(settings.options_path()).unwrap();

        let outcome = SyncOptions::load_or_init(&settings).await.unwrap();
        assert_eq!(outcome, LoadOutcome::Loaded(custom));

        let after = fs::read_to_string(settings.options_path()).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_store_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let settings = Settings::new(dir.path().join("nested").join("home"));

        SyncOptions::default()
            .store(&settings.options_path())
            .await
            .unwrap();
        assert!(settings.options_path().exists());
    }
}
