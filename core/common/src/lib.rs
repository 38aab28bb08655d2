//! Common types shared across the Kolibri sync agent crates.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::FacilityId;
