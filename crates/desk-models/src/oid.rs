//! Opaque document identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A database-assigned document identifier: 24 hexadecimal characters.
///
/// Path parameters are parsed into this type before they reach a repository, so
/// malformed identifiers fail early with [`InvalidObjectId`] instead of turning
/// into opaque query errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

/// Error returned when a string is not a well-formed document identifier.
#[derive(Debug, Error)]
#[error("invalid object id: {0:?}")]
pub struct InvalidObjectId(pub String);

impl ObjectId {
    /// Get the inner hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether a string is a well-formed identifier without allocating.
    pub fn is_valid(s: &str) -> bool {
        s.len() == 24 && s.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl FromStr for ObjectId {
    type Err = InvalidObjectId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidObjectId(s.to_string()))
        }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_ids() {
        let id: ObjectId = "674f1c2ab3d4e5f60718293a".parse().unwrap();
        assert_eq!(id.as_str(), "674f1c2ab3d4e5f60718293a");
        // Uppercase hex is accepted as-is
        assert!("674F1C2AB3D4E5F60718293A".parse::<ObjectId>().is_ok());
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!("".parse::<ObjectId>().is_err());
        assert!("not-an-id".parse::<ObjectId>().is_err());
        // Too short / too long
        assert!("674f1c2ab3d4e5f60718293".parse::<ObjectId>().is_err());
        assert!("674f1c2ab3d4e5f60718293ab".parse::<ObjectId>().is_err());
        // Right length, not hex
        assert!("674f1c2ab3d4e5f60718293z".parse::<ObjectId>().is_err());
    }

    #[test]
    fn serializes_transparently() {
        let id: ObjectId = "674f1c2ab3d4e5f60718293a".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"674f1c2ab3d4e5f60718293a\"");
    }
}
