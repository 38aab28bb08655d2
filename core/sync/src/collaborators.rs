//! Platform-abstraction seams for the external collaborators.
//!
//! The launcher treats the facility store, the sync management command,
//! and the application entry point as opaque services. Each is a trait
//! so the scheduler can be exercised against mocks in tests and backed
//! by the real `kolibri` CLI in production (see [`crate::process`]).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use kolibrisync_common::{FacilityId, Result};

/// Verbosity level passed to every sync invocation.
pub const SYNC_VERBOSITY: u8 = 3;

/// Username passed to every sync invocation.
///
/// The original launcher hard-codes this literal instead of using the
/// configured `SYNC_USER` value. Preserved as-is; a test pins it down.
pub const SYNC_USERNAME: &str = "syncuser";

/// Arguments for one content-sync pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncArgs {
    /// Base URL of the remote sync server.
    pub baseurl: String,
    /// Username for sync authentication (always [`SYNC_USERNAME`]).
    pub username: String,
    /// Password for sync authentication.
    pub password: String,
    /// Facility to sync.
    pub facility: String,
    /// Command verbosity level.
    pub verbosity: u8,
}

impl SyncArgs {
    /// Build the argument set for one cycle.
    ///
    /// The password is the literal `"sync"` followed by the facility
    /// id. This is a placeholder carried over from the original
    /// launcher, not a credential-derivation scheme.
    pub fn for_cycle(server: &str, facility: &FacilityId) -> Self {
        Self {
            baseurl: server.to_string(),
            username: SYNC_USERNAME.to_string(),
            password: format!("sync{}", facility),
            facility: facility.as_str().to_string(),
            verbosity: SYNC_VERBOSITY,
        }
    }
}

/// Source of the default facility identifier.
#[async_trait]
pub trait FacilityLookup: Send + Sync {
    /// Return the default facility's identifier.
    ///
    /// Looked up fresh on every cycle; the result is never cached.
    async fn default_facility(&self) -> Result<FacilityId>;
}

/// One content-synchronization pass against a remote server.
#[async_trait]
pub trait SyncCommand: Send + Sync {
    /// Run a single sync pass with the given arguments.
    async fn run(&self, args: &SyncArgs) -> Result<()>;
}

/// The application's command-line entry point.
#[async_trait]
pub trait AppBootstrap: Send + Sync {
    /// Run the application entry point with the original process argv.
    async fn run(&self, argv: &[String]) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_for_cycle() {
        let facility = FacilityId::new("abc123").unwrap();
        let args = SyncArgs::for_cycle("content.myscoolserver.in", &facility);

        assert_eq!(args.baseurl, "content.myscoolserver.in");
        assert_eq!(args.username, "syncuser");
        assert_eq!(args.password, "syncabc123");
        assert_eq!(args.facility, "abc123");
        assert_eq!(args.verbosity, 3);
    }
}
