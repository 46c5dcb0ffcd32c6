//! Type-safe identifier wrapper for player ids.
//!
//! Players are keyed by the stable integer id assigned by the chat
//! platform. The newtype prevents accidental mixing of player ids with
//! other `i64` quantities (balances, tap counts) at compile time.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Unique identifier for a player, as assigned by the chat platform.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct UserId(pub i64);

impl UserId {
    /// Wrap a raw chat-platform id.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Return the inner `i64` value.
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_i64() {
        let id = UserId::new(42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(UserId::from(42), id);
    }

    #[test]
    fn display_matches_raw_id() {
        assert_eq!(UserId::new(123_456_789).to_string(), "123456789");
    }
}
