//! Referral attribution ledger.
//!
//! A referral edge is keyed by `referred_id`: a player is referred at
//! most once, and the primary-key constraint makes concurrent duplicate
//! attempts resolve to exactly one winner. The referrer's one-time
//! reward is paid only when the insert actually creates the edge, so a
//! duplicate call can never double-pay.

use sqlx::{PgPool, Postgres, Transaction};
use tapcoin_types::{ReferralEdge, UserId};

use crate::error::DbError;

/// Operations on the `referrals` table.
pub struct ReferralStore<'a> {
    pool: &'a PgPool,
}

impl<'a> ReferralStore<'a> {
    /// Create a new referral store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a referrer -> referred edge and pay the one-time reward.
    ///
    /// Returns `true` if the edge was newly created and the referrer was
    /// paid, `false` if an edge for `referred` already existed (silent
    /// no-op, first writer wins, nothing is paid again).
    ///
    /// # Errors
    ///
    /// - [`DbError::SelfReferral`] if `referrer == referred`.
    /// - [`DbError::ReferrerNotFound`] if `referrer` has no player row;
    ///   a dangling edge is never created.
    /// - [`DbError::Postgres`] on store failure, including a missing
    ///   `referred` row (foreign-key violation).
    pub async fn record_referral(
        &self,
        referrer: UserId,
        referred: UserId,
        reward: i64,
    ) -> Result<bool, DbError> {
        if referrer == referred {
            return Err(DbError::SelfReferral(referrer));
        }

        let mut tx = self.pool.begin().await?;

        if !referrer_exists(&mut tx, referrer).await? {
            return Err(DbError::ReferrerNotFound(referrer));
        }

        let inserted = record_edge(&mut tx, referrer, referred, reward).await?;
        tx.commit().await?;

        tracing::debug!(%referrer, %referred, inserted, "Recorded referral");
        Ok(inserted)
    }

    /// Fetch the referral edge for a referred player, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn get_referral(&self, referred: UserId) -> Result<Option<ReferralEdge>, DbError> {
        let row = sqlx::query_as::<_, ReferralRow>(
            r"SELECT referrer_id, referred_id, reward_given, created_at
              FROM referrals
              WHERE referred_id = $1",
        )
        .bind(referred.into_inner())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(ReferralEdge::from))
    }

    /// Count how many players a referrer has brought in.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn count_referrals(&self, referrer: UserId) -> Result<i64, DbError> {
        let count: i64 =
            sqlx::query_scalar(r"SELECT COUNT(*) FROM referrals WHERE referrer_id = $1")
                .bind(referrer.into_inner())
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }
}

/// Whether a player row exists for the given referrer id.
pub(crate) async fn referrer_exists(
    tx: &mut Transaction<'_, Postgres>,
    referrer: UserId,
) -> Result<bool, DbError> {
    let exists: bool = sqlx::query_scalar(r"SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)")
        .bind(referrer.into_inner())
        .fetch_one(&mut **tx)
        .await?;

    Ok(exists)
}

/// Insert the edge and pay the reward inside an open transaction.
///
/// The `ON CONFLICT DO NOTHING` result is the exactly-once gate: the
/// `invited_count` bump and balance credit happen only when this call
/// created the edge.
pub(crate) async fn record_edge(
    tx: &mut Transaction<'_, Postgres>,
    referrer: UserId,
    referred: UserId,
    reward: i64,
) -> Result<bool, DbError> {
    let result = sqlx::query(
        r"INSERT INTO referrals (referrer_id, referred_id, reward_given)
          VALUES ($1, $2, TRUE)
          ON CONFLICT (referred_id) DO NOTHING",
    )
    .bind(referrer.into_inner())
    .bind(referred.into_inner())
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(false);
    }

    sqlx::query(
        r"UPDATE users
          SET invited_count = invited_count + 1,
              balance = balance + $2,
              last_active = NOW()
          WHERE user_id = $1",
    )
    .bind(referrer.into_inner())
    .bind(reward)
    .execute(&mut **tx)
    .await?;

    Ok(true)
}

/// A row from the `referrals` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReferralRow {
    /// The player who sent the invite.
    pub referrer_id: i64,
    /// The player who joined through it.
    pub referred_id: i64,
    /// Whether the one-time reward was paid.
    pub reward_given: bool,
    /// When the edge was recorded.
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ReferralRow> for ReferralEdge {
    fn from(row: ReferralRow) -> Self {
        Self {
            referrer_id: UserId::new(row.referrer_id),
            referred_id: UserId::new(row.referred_id),
            reward_given: row.reward_given,
            created_at: row.created_at,
        }
    }
}
