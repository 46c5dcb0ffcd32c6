//! Data layer for the Tapcoin game core (`PostgreSQL`).
//!
//! A single durable relational store holds the four entity families:
//! player rows, per-day activity counters, referral edges, and one-time
//! task completions. Every mutating operation runs inside one scoped
//! transaction -- on any failure mid-operation the transaction guard
//! rolls back everything written so far, and the connection returns to
//! the pool on all exit paths.
//!
//! # Modules
//!
//! - [`postgres`] -- Connection pool, configuration, migrations
//! - [`user_store`] -- Player lifecycle upsert and sparse game-state updates
//! - [`referral_store`] -- Exactly-once referral edges and rewards
//! - [`stats_store`] -- Lazily created per-day counters
//! - [`task_store`] -- One-time task completions and rewards
//! - [`rankings`] -- Read-only leaderboard, roster, and count queries
//! - [`error`] -- Shared error types

pub mod error;
pub mod postgres;
pub mod rankings;
pub mod referral_store;
pub mod stats_store;
pub mod task_store;
pub mod user_store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use postgres::{PostgresConfig, PostgresPool};
pub use rankings::{LeaderboardRow, RankingStore, RosterRow};
pub use referral_store::{ReferralRow, ReferralStore};
pub use stats_store::{DailyStatRow, StatsStore};
pub use task_store::{TaskRow, TaskStore, task_type_from_db, task_type_to_db};
pub use user_store::{UserRow, UserStore};
