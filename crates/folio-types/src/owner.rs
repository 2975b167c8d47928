use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identity of the account that owns a namespace tree and its version log.
///
/// The value is supplied by the identity collaborator and trusted as given;
/// Folio only requires it to be non-empty so it can key storage.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Create an owner id, rejecting empty or whitespace-only input.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(TypeError::EmptyOwnerId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for OwnerId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Debug for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OwnerId({})", self.0)
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty() {
        assert_eq!(OwnerId::new(""), Err(TypeError::EmptyOwnerId));
        assert_eq!(OwnerId::new("   "), Err(TypeError::EmptyOwnerId));
    }

    #[test]
    fn parses_and_displays() {
        let owner: OwnerId = "user-42".parse().unwrap();
        assert_eq!(owner.as_str(), "user-42");
        assert_eq!(owner.to_string(), "user-42");
    }

    #[test]
    fn serializes_as_plain_string() {
        let owner = OwnerId::new("alice").unwrap();
        assert_eq!(serde_json::to_string(&owner).unwrap(), "\"alice\"");
    }
}
