//! Core entity structs for the Tapcoin game core.
//!
//! These mirror the four persisted tables (`users`, `daily_stats`,
//! `referrals`, `user_tasks`) plus the two read-only query views. The
//! data layer owns the raw row types; conversions live there.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::TaskType;
use crate::ids::UserId;

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A player record, keyed by the stable chat-platform id.
///
/// Display-name fields are nullable because the chat platform does not
/// guarantee them. `invited_by` is set at most once, at creation, and is
/// never overwritten afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct User {
    /// Stable chat-platform id, the sole primary key.
    pub user_id: UserId,
    /// Platform username, if the player has one.
    pub username: Option<String>,
    /// First display name, if supplied.
    pub first_name: Option<String>,
    /// Last display name, if supplied.
    pub last_name: Option<String>,
    /// Coin balance. Non-negative by caller discipline, not clamped here.
    pub balance: i64,
    /// Taps performed today. Reset daily by an external job.
    pub taps_today: i64,
    /// Current energy, bounded `[0, max_energy]` by the game-logic layer.
    pub energy: i32,
    /// Current level, starting at 1.
    pub level: i32,
    /// Coins earned per tap.
    pub tap_power: i32,
    /// Lifetime tap count, monotonically non-decreasing.
    pub total_taps: i64,
    /// The player who referred this one, if any. Immutable once set.
    pub invited_by: Option<UserId>,
    /// Number of players this one has referred.
    pub invited_count: i32,
    /// When the row was first created.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every write touching this player.
    pub last_active: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// DailyStat
// ---------------------------------------------------------------------------

/// Per-day activity counters for one player, keyed by `(user_id, day)`.
///
/// Rows are created lazily on the first event of the day and
/// increment-upserted afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DailyStat {
    /// The player this row belongs to.
    pub user_id: UserId,
    /// The calendar day (store-local date).
    pub day: NaiveDate,
    /// Taps performed on this day.
    pub taps: i64,
    /// Coins earned on this day.
    pub coins_earned: i64,
}

// ---------------------------------------------------------------------------
// ReferralEdge
// ---------------------------------------------------------------------------

/// A referrer -> referred attribution, keyed uniquely by `referred_id`.
///
/// A player can be referred exactly once; the primary key on
/// `referred_id` is the store-level gate. Edges are never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ReferralEdge {
    /// The player who sent the invite.
    pub referrer_id: UserId,
    /// The player who joined through it.
    pub referred_id: UserId,
    /// Whether the one-time reward has been paid to the referrer.
    pub reward_given: bool,
    /// When the edge was recorded.
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// UserTask
// ---------------------------------------------------------------------------

/// A completed one-time task, keyed by `(user_id, task_type)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UserTask {
    /// The player who completed the task.
    pub user_id: UserId,
    /// Which task was completed.
    pub task_type: TaskType,
    /// The one-time reward paid on completion.
    pub reward: i64,
    /// When the task was completed.
    pub completed_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Query views
// ---------------------------------------------------------------------------

/// One row of the balance leaderboard.
///
/// Ordered by `balance` descending with `user_id` ascending as the
/// deterministic tie-break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LeaderboardEntry {
    /// The ranked player.
    pub user_id: UserId,
    /// Platform username, if any.
    pub username: Option<String>,
    /// First display name, if any.
    pub first_name: Option<String>,
    /// Balance the ranking is computed from.
    pub balance: i64,
    /// Current level.
    pub level: i32,
    /// Lifetime tap count.
    pub total_taps: i64,
}

/// One row of the full player roster, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RosterEntry {
    /// The player.
    pub user_id: UserId,
    /// Platform username, if any.
    pub username: Option<String>,
    /// First display name, if any.
    pub first_name: Option<String>,
    /// Current balance.
    pub balance: i64,
    /// Current level.
    pub level: i32,
    /// When the player first appeared.
    pub created_at: DateTime<Utc>,
    /// Last write touching the player.
    pub last_active: DateTime<Utc>,
}
