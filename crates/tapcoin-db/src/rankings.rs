//! Read-only aggregation views: leaderboard, roster, player count.
//!
//! These queries propagate [`DbError`] like every other store method;
//! the log-and-return-empty leniency the UI expects is applied by the
//! `Game` facade, not here, so tests can still observe failures.

use sqlx::PgPool;
use tapcoin_types::{LeaderboardEntry, RosterEntry, UserId};

use crate::error::DbError;

/// Read-only ranking and roster queries over the `users` table.
pub struct RankingStore<'a> {
    pool: &'a PgPool,
}

impl<'a> RankingStore<'a> {
    /// Create a new ranking store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The top players by balance, descending, with `user_id` ascending
    /// as the deterministic tie-break.
    ///
    /// Returns at most `limit` entries, fewer if the store has fewer
    /// players. A `limit` of zero yields an empty result.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, DbError> {
        let rows = sqlx::query_as::<_, LeaderboardRow>(
            r"SELECT user_id, username, first_name, balance, level, total_taps
              FROM users
              ORDER BY balance DESC, user_id ASC
              LIMIT $1",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(LeaderboardEntry::from).collect())
    }

    /// Every player, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn all_users(&self) -> Result<Vec<RosterEntry>, DbError> {
        let rows = sqlx::query_as::<_, RosterRow>(
            r"SELECT user_id, username, first_name, balance, level, created_at, last_active
              FROM users
              ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(RosterEntry::from).collect())
    }

    /// Total number of player rows.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn count_users(&self) -> Result<i64, DbError> {
        let count: i64 = sqlx::query_scalar(r"SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}

/// A leaderboard row projected from the `users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LeaderboardRow {
    /// The ranked player.
    pub user_id: i64,
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

impl From<LeaderboardRow> for LeaderboardEntry {
    fn from(row: LeaderboardRow) -> Self {
        Self {
            user_id: UserId::new(row.user_id),
            username: row.username,
            first_name: row.first_name,
            balance: row.balance,
            level: row.level,
            total_taps: row.total_taps,
        }
    }
}

/// A roster row projected from the `users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RosterRow {
    /// The player.
    pub user_id: i64,
    /// Platform username, if any.
    pub username: Option<String>,
    /// First display name, if any.
    pub first_name: Option<String>,
    /// Current balance.
    pub balance: i64,
    /// Current level.
    pub level: i32,
    /// Row creation time.
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Last write touching this row.
    pub last_active: chrono::DateTime<chrono::Utc>,
}

impl From<RosterRow> for RosterEntry {
    fn from(row: RosterRow) -> Self {
        Self {
            user_id: UserId::new(row.user_id),
            username: row.username,
            first_name: row.first_name,
            balance: row.balance,
            level: row.level,
            created_at: row.created_at,
            last_active: row.last_active,
        }
    }
}
