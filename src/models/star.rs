//! Star (actor) types and identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Row identifier for a star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StarId(i64);

impl StarId {
    /// Creates a new star ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row ID.
    #[must_use]
    pub const fn raw(self) -> i64 {
        self.0
    }
}

impl fmt::Display for StarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for StarId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A star row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Star {
    /// Unique identifier.
    pub id: StarId,
    /// The actor's name.
    pub actor_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_id_roundtrip() {
        let id = StarId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(id.to_string(), "7");
        assert_eq!(StarId::from(7), id);
    }
}
