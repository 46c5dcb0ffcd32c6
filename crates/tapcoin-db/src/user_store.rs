//! Player lifecycle and game-state persistence.
//!
//! [`UserStore`] owns the two hot write paths of the core: the
//! create-or-update upsert that every incoming chat event funnels
//! through, and the sparse game-state update applied on taps, energy
//! changes, and level-ups. Both run as single transactions; a failure
//! mid-operation rolls back everything written so far.

use sqlx::{PgPool, Postgres, QueryBuilder};
use tapcoin_types::{GameDelta, User, UserId, UserProfile};

use crate::error::DbError;
use crate::referral_store;

/// Operations on the `users` table.
pub struct UserStore<'a> {
    pool: &'a PgPool,
}

impl<'a> UserStore<'a> {
    /// Create a new user store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create the player row on first contact, or merge profile fields
    /// into the existing row.
    ///
    /// Insert path: the row is created with the game-state defaults from
    /// the schema (balance 0, energy 1000, level 1, tap power 1). If the
    /// profile carries a referrer attribution, the referral edge is
    /// recorded and the referrer paid `referral_reward` in the same
    /// transaction. A self-referral or an unknown referrer is dropped
    /// with a warning rather than failing the signup.
    ///
    /// Update path: only the name fields that are `Some` are written
    /// (`COALESCE` merge); `last_active` is refreshed; `invited_by` is
    /// never altered. The operation is idempotent under retries with the
    /// same inputs.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the store is unreachable or the
    /// transaction fails; no partial state is left behind.
    pub async fn upsert_user(
        &self,
        user_id: UserId,
        profile: &UserProfile,
        referral_reward: i64,
    ) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        // Resolve the referrer before the insert so a dead referral code
        // cannot violate the invited_by foreign key and block onboarding.
        let referrer = match profile.invited_by {
            Some(r) if r == user_id => {
                tracing::warn!(%user_id, "Dropping self-referral on signup");
                None
            }
            Some(r) => {
                if referral_store::referrer_exists(&mut tx, r).await? {
                    Some(r)
                } else {
                    tracing::warn!(%user_id, referrer = %r, "Dropping referral from unknown user");
                    None
                }
            }
            None => None,
        };

        // xmax = 0 only for freshly inserted rows, which tells the insert
        // arm apart from the conflict-update arm.
        let inserted: bool = sqlx::query_scalar(
            r"INSERT INTO users (user_id, username, first_name, last_name, invited_by)
              VALUES ($1, $2, $3, $4, $5)
              ON CONFLICT (user_id) DO UPDATE SET
                username = COALESCE(EXCLUDED.username, users.username),
                first_name = COALESCE(EXCLUDED.first_name, users.first_name),
                last_name = COALESCE(EXCLUDED.last_name, users.last_name),
                last_active = NOW()
              RETURNING (xmax = 0)",
        )
        .bind(user_id.into_inner())
        .bind(profile.username.as_deref())
        .bind(profile.first_name.as_deref())
        .bind(profile.last_name.as_deref())
        .bind(referrer.map(UserId::into_inner))
        .fetch_one(&mut *tx)
        .await?;

        if inserted {
            if let Some(r) = referrer {
                referral_store::record_edge(&mut tx, r, user_id, referral_reward).await?;
            }
        }

        tx.commit().await?;

        tracing::debug!(%user_id, inserted, "Upserted user");
        Ok(())
    }

    /// Fetch a player by id. A missing row is `Ok(None)`, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn get_user(&self, user_id: UserId) -> Result<Option<User>, DbError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"SELECT user_id, username, first_name, last_name, balance, taps_today,
                     energy, level, tap_power, total_taps, invited_by, invited_count,
                     created_at, last_active
              FROM users
              WHERE user_id = $1",
        )
        .bind(user_id.into_inner())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Apply a sparse game-state update to one player.
    ///
    /// Only the fields present in the delta are written, as absolute
    /// values with no clamping; `last_active` is refreshed whenever at
    /// least one field is present. An empty delta is a complete no-op:
    /// no row is touched and `last_active` stays unchanged.
    ///
    /// Row-level locking on the single `UPDATE` linearizes concurrent
    /// deltas for the same player; deltas touching disjoint fields both
    /// take effect.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::UserNotFound`] if no row exists for `user_id`,
    /// and [`DbError::Postgres`] on store failure.
    pub async fn apply_delta(&self, user_id: UserId, delta: GameDelta) -> Result<(), DbError> {
        if delta.is_empty() {
            tracing::debug!(%user_id, "Empty game delta, nothing to write");
            return Ok(());
        }

        let mut query = QueryBuilder::<Postgres>::new("UPDATE users SET last_active = NOW()");
        if let Some(balance) = delta.balance {
            query.push(", balance = ").push_bind(balance);
        }
        if let Some(taps_today) = delta.taps_today {
            query.push(", taps_today = ").push_bind(taps_today);
        }
        if let Some(energy) = delta.energy {
            query.push(", energy = ").push_bind(energy);
        }
        if let Some(level) = delta.level {
            query.push(", level = ").push_bind(level);
        }
        if let Some(tap_power) = delta.tap_power {
            query.push(", tap_power = ").push_bind(tap_power);
        }
        query.push(" WHERE user_id = ").push_bind(user_id.into_inner());

        let result = query.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(DbError::UserNotFound(user_id));
        }

        tracing::debug!(%user_id, ?delta, "Applied game delta");
        Ok(())
    }
}

/// A row from the `users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    /// Chat-platform player id.
    pub user_id: i64,
    /// Platform username, if any.
    pub username: Option<String>,
    /// First display name, if any.
    pub first_name: Option<String>,
    /// Last display name, if any.
    pub last_name: Option<String>,
    /// Coin balance.
    pub balance: i64,
    /// Taps performed today.
    pub taps_today: i64,
    /// Current energy.
    pub energy: i32,
    /// Current level.
    pub level: i32,
    /// Coins earned per tap.
    pub tap_power: i32,
    /// Lifetime tap count.
    pub total_taps: i64,
    /// Referrer id, if any.
    pub invited_by: Option<i64>,
    /// Number of players referred.
    pub invited_count: i32,
    /// Row creation time.
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Last write touching this row.
    pub last_active: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            user_id: UserId::new(row.user_id),
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            balance: row.balance,
            taps_today: row.taps_today,
            energy: row.energy,
            level: row.level,
            tap_power: row.tap_power,
            total_taps: row.total_taps,
            invited_by: row.invited_by.map(UserId::new),
            invited_count: row.invited_count,
            created_at: row.created_at,
            last_active: row.last_active,
        }
    }
}
