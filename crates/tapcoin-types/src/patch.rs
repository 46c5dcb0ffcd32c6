//! Sparse update payloads for the write operations.
//!
//! Both types follow the same rule: a field that is `None` is left
//! unchanged in the store. None of the patched columns is nullable, so
//! `Option` is a genuine two-state patch (unset / set-to-value) and
//! there is no "clear to null" case to conflate with "leave unchanged".

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::UserId;

/// Partial update of a player's mutable game-state fields.
///
/// Only the fields that are `Some` are written; an entirely empty delta
/// is a no-op that must not touch the row at all (not even
/// `last_active`). Values are absolute, not increments: the game-logic
/// layer computes the new state and the mutator persists it verbatim,
/// with no clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameDelta {
    /// New coin balance.
    pub balance: Option<i64>,
    /// New today's-tap counter.
    pub taps_today: Option<i64>,
    /// New energy value.
    pub energy: Option<i32>,
    /// New level.
    pub level: Option<i32>,
    /// New coins-per-tap power.
    pub tap_power: Option<i32>,
}

impl GameDelta {
    /// A delta that touches nothing.
    pub const fn new() -> Self {
        Self {
            balance: None,
            taps_today: None,
            energy: None,
            level: None,
            tap_power: None,
        }
    }

    /// Whether no field is set.
    pub const fn is_empty(&self) -> bool {
        self.balance.is_none()
            && self.taps_today.is_none()
            && self.energy.is_none()
            && self.level.is_none()
            && self.tap_power.is_none()
    }

    /// Set the balance field.
    #[must_use]
    pub const fn with_balance(mut self, balance: i64) -> Self {
        self.balance = Some(balance);
        self
    }

    /// Set the taps-today field.
    #[must_use]
    pub const fn with_taps_today(mut self, taps_today: i64) -> Self {
        self.taps_today = Some(taps_today);
        self
    }

    /// Set the energy field.
    #[must_use]
    pub const fn with_energy(mut self, energy: i32) -> Self {
        self.energy = Some(energy);
        self
    }

    /// Set the level field.
    #[must_use]
    pub const fn with_level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    /// Set the tap-power field.
    #[must_use]
    pub const fn with_tap_power(mut self, tap_power: i32) -> Self {
        self.tap_power = Some(tap_power);
        self
    }
}

/// Profile fields supplied on first contact or a later `/start`.
///
/// Name fields that are `None` never erase previously stored values
/// (coalesce-style merge). `invited_by` is only honored when the player
/// row is first created; it is ignored on updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UserProfile {
    /// Platform username, if known.
    pub username: Option<String>,
    /// First display name, if known.
    pub first_name: Option<String>,
    /// Last display name, if known.
    pub last_name: Option<String>,
    /// Referrer attribution from the join link, if any.
    pub invited_by: Option<UserId>,
}

impl UserProfile {
    /// An empty profile (touches nothing beyond `last_active`).
    pub const fn new() -> Self {
        Self {
            username: None,
            first_name: None,
            last_name: None,
            invited_by: None,
        }
    }

    /// Set the username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the first name.
    #[must_use]
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    /// Set the last name.
    #[must_use]
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Set the referrer attribution.
    #[must_use]
    pub const fn with_invited_by(mut self, referrer: UserId) -> Self {
        self.invited_by = Some(referrer);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_delta_is_empty() {
        assert!(GameDelta::new().is_empty());
        assert!(GameDelta::default().is_empty());
    }

    #[test]
    fn any_field_makes_delta_non_empty() {
        assert!(!GameDelta::new().with_balance(10).is_empty());
        assert!(!GameDelta::new().with_taps_today(5).is_empty());
        assert!(!GameDelta::new().with_energy(900).is_empty());
        assert!(!GameDelta::new().with_level(2).is_empty());
        assert!(!GameDelta::new().with_tap_power(3).is_empty());
    }

    #[test]
    fn builders_compose() {
        let delta = GameDelta::new().with_balance(150).with_energy(990);
        assert_eq!(delta.balance, Some(150));
        assert_eq!(delta.energy, Some(990));
        assert_eq!(delta.level, None);
    }

    #[test]
    fn delta_serde_skips_nothing_but_roundtrips() {
        let delta = GameDelta::new().with_level(4);
        let json = serde_json::to_string(&delta).unwrap();
        let back: GameDelta = serde_json::from_str(&json).unwrap();
        assert_eq!(back, delta);
    }

    #[test]
    fn profile_builder_sets_only_given_fields() {
        let profile = UserProfile::new()
            .with_username("alice")
            .with_invited_by(UserId::new(7));
        assert_eq!(profile.username.as_deref(), Some("alice"));
        assert_eq!(profile.first_name, None);
        assert_eq!(profile.invited_by, Some(UserId::new(7)));
    }
}
