//! Per-day activity counters.
//!
//! Rows in `daily_stats` are created lazily on the first event of a
//! `(user_id, day)` pair and increment-upserted afterwards. The daily
//! reset of `users.taps_today` is an external job; this store only
//! accumulates.

use chrono::NaiveDate;
use sqlx::PgPool;
use tapcoin_types::{DailyStat, UserId};

use crate::error::DbError;

/// Operations on the `daily_stats` table.
pub struct StatsStore<'a> {
    pool: &'a PgPool,
}

impl<'a> StatsStore<'a> {
    /// Create a new stats store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add taps and coins to a player's counters for one day.
    ///
    /// Creates the row if this is the first activity recorded for the
    /// `(user_id, day)` pair, otherwise increments the existing counters.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] on store failure, including an
    /// unknown `user_id` (foreign-key violation).
    pub async fn add_activity(
        &self,
        user_id: UserId,
        day: NaiveDate,
        taps: i64,
        coins: i64,
    ) -> Result<(), DbError> {
        sqlx::query(
            r"INSERT INTO daily_stats (user_id, day, taps, coins_earned)
              VALUES ($1, $2, $3, $4)
              ON CONFLICT (user_id, day) DO UPDATE SET
                taps = daily_stats.taps + EXCLUDED.taps,
                coins_earned = daily_stats.coins_earned + EXCLUDED.coins_earned",
        )
        .bind(user_id.into_inner())
        .bind(day)
        .bind(taps)
        .bind(coins)
        .execute(self.pool)
        .await?;

        tracing::debug!(%user_id, %day, taps, coins, "Recorded daily activity");
        Ok(())
    }

    /// Fetch a player's counters for one day, if any activity was recorded.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn get_day(
        &self,
        user_id: UserId,
        day: NaiveDate,
    ) -> Result<Option<DailyStat>, DbError> {
        let row = sqlx::query_as::<_, DailyStatRow>(
            r"SELECT user_id, day, taps, coins_earned
              FROM daily_stats
              WHERE user_id = $1 AND day = $2",
        )
        .bind(user_id.into_inner())
        .bind(day)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(DailyStat::from))
    }
}

/// A row from the `daily_stats` table.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct DailyStatRow {
    /// The player.
    pub user_id: i64,
    /// The calendar day.
    pub day: NaiveDate,
    /// Taps performed on this day.
    pub taps: i64,
    /// Coins earned on this day.
    pub coins_earned: i64,
}

impl From<DailyStatRow> for DailyStat {
    fn from(row: DailyStatRow) -> Self {
        Self {
            user_id: UserId::new(row.user_id),
            day: row.day,
            taps: row.taps,
            coins_earned: row.coins_earned,
        }
    }
}
