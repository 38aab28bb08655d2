//! Common types used throughout the sync agent.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a facility, the organizational unit that scopes
/// synchronized data.
///
/// The value is opaque to the sync agent; it is passed through to the
/// sync command exactly as the facility store returned it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FacilityId(String);

impl FacilityId {
    /// Create a new FacilityId from a string.
    ///
    /// # Errors
    /// - Returns error if id is empty
    pub fn new(id: impl Into<String>) -> crate::Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(crate::Error::InvalidInput(
                "FacilityId cannot be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facility_id_creation() {
        let id = FacilityId::new("5f3c").unwrap();
        assert_eq!(id.as_str(), "5f3c");
        assert_eq!(id.to_string(), "5f3c");
    }

    #[test]
    fn test_facility_id_empty_fails() {
        assert!(FacilityId::new("").is_err());
    }
}
